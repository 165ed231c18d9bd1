//! About, contact and the static information pages.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use pawlink_core::validation::{require_non_blank, validate_input};
use pawlink_db::models::contact::CreateContactMessage;
use pawlink_db::models::stats::SiteStats;
use pawlink_db::repositories::{ContactRepo, StatsRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// A question and its answer.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

/// A titled block of text on the terms and privacy pages.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub body: &'static str,
}

const FAQ: &[FaqEntry] = &[
    FaqEntry {
        question: "How do I use the platform?",
        answer: "Browse listings without an account. Register to list an animal, \
                 request an adoption, donate to a shelter or write a review.",
    },
    FaqEntry {
        question: "Does it cost anything to list an animal?",
        answer: "No. Listing is free; the platform only connects owners with new families.",
    },
    FaqEntry {
        question: "How does adoption work?",
        answer: "Pick an animal and send a request. The owner reviews it, approves or \
                 rejects it, and marks the adoption complete once the animal has moved.",
    },
    FaqEntry {
        question: "Are donations safe?",
        answer: "Donations go to listed shelters only. Staff confirm each one before it \
                 counts toward a shelter's totals.",
    },
    FaqEntry {
        question: "How do I find a veterinarian?",
        answer: "The veterinarians section lists every clinic. Filter by clinic type, \
                 service or emergency care, or search by name and address.",
    },
    FaqEntry {
        question: "Can I sell an animal here?",
        answer: "Yes. Mark the listing as for sale and give a price. Free listings never \
                 show a price.",
    },
];

const TERMS: &[Section] = &[
    Section {
        title: "Accounts",
        body: "You are responsible for the activity on your account and for keeping \
               your password private.",
    },
    Section {
        title: "Listings",
        body: "Listings must describe real animals accurately. Staff may edit or remove \
               any listing that does not.",
    },
    Section {
        title: "Adoptions and sales",
        body: "Agreements are made between owners and adopters. The platform records \
               requests but is not a party to them.",
    },
    Section {
        title: "Donations",
        body: "Donations are recorded as pending until shelter staff confirm them.",
    },
];

const PRIVACY: &[Section] = &[
    Section {
        title: "What we store",
        body: "Your username, contact details, listings, requests, donations and reviews.",
    },
    Section {
        title: "Who sees it",
        body: "Listing contact details are public. Adoption requests are visible to you \
               and the listing owner. Anonymous donations never show your name.",
    },
    Section {
        title: "Passwords",
        body: "Passwords are stored only as salted hashes.",
    },
];

/// GET /about/
pub async fn about(State(state): State<AppState>) -> AppResult<Json<DataResponse<SiteStats>>> {
    let stats = StatsRepo::site_stats(&state.pool).await?;
    Ok(Json(DataResponse::new(stats)))
}

/// GET /contact/
///
/// Nothing to load; the client renders an empty form.
pub async fn contact_form() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// POST /contact/
pub async fn contact(
    State(state): State<AppState>,
    Json(input): Json<CreateContactMessage>,
) -> AppResult<(StatusCode, Json<DataResponse<()>>)> {
    validate_input(&input)?;
    require_non_blank("name", &input.name)?;
    require_non_blank("message", &input.message)?;
    let message = ContactRepo::create(&state.pool, &input).await?;
    tracing::info!(contact_message_id = message.id, "Contact message received");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(()).with_message("Your message was received. We will be in touch soon.")),
    ))
}

/// GET /faq/
pub async fn faq() -> Json<DataResponse<&'static [FaqEntry]>> {
    Json(DataResponse::new(FAQ))
}

/// GET /terms/
pub async fn terms() -> Json<DataResponse<&'static [Section]>> {
    Json(DataResponse::new(TERMS))
}

/// GET /privacy/
pub async fn privacy() -> Json<DataResponse<&'static [Section]>> {
    Json(DataResponse::new(PRIVACY))
}
