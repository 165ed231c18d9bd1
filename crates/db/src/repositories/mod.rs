//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod adoption_request_repo;
pub mod animal_image_repo;
pub mod animal_repo;
pub mod contact_repo;
pub mod donation_repo;
pub mod review_repo;
pub mod role_repo;
pub mod session_repo;
pub mod shelter_repo;
pub mod stats_repo;
pub mod user_repo;
pub mod veterinarian_repo;

pub use adoption_request_repo::AdoptionRequestRepo;
pub use animal_image_repo::AnimalImageRepo;
pub use animal_repo::AnimalRepo;
pub use contact_repo::ContactRepo;
pub use donation_repo::DonationRepo;
pub use review_repo::ReviewRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use shelter_repo::ShelterRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;
pub use veterinarian_repo::VeterinarianRepo;
