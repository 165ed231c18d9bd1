//! Repository for the `contact_messages` table.

use sqlx::PgPool;

use crate::models::contact::{ContactMessage, CreateContactMessage};

const COLUMNS: &str = "id, name, email, subject, message, created_at";

pub struct ContactRepo;

impl ContactRepo {
    /// Record a contact form submission.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContactMessage,
    ) -> Result<ContactMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_messages (name, email, subject, message)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(input.name.trim())
            .bind(input.email.trim())
            .bind(input.subject.trim())
            .bind(input.message.trim())
            .fetch_one(pool)
            .await
    }
}
