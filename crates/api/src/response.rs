//! Shared response envelope types for API handlers.
//!
//! Successful responses use a `{ "data": ... }` envelope. Mutations may add
//! a human-readable `message` alongside the data.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope with an optional `message`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            message: None,
        }
    }

    /// Attach a feedback message, e.g. "Listing created".
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_omitted_when_absent() {
        let json = serde_json::to_value(DataResponse::new(1)).unwrap();
        assert_eq!(json, serde_json::json!({ "data": 1 }));

        let json = serde_json::to_value(DataResponse::new(1).with_message("Saved")).unwrap();
        assert_eq!(json["message"], "Saved");
    }
}
