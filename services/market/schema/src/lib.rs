//! sea-orm entities for the campus-market database.

pub mod accounts;
pub mod applications;
pub mod orders;
pub mod requirements;
pub mod reviews;
pub mod service_listings;
pub mod verification_codes;
