pub mod accounts;
pub mod auth;
pub mod extract;
pub mod listings;
pub mod orders;
pub mod requirements;
pub mod reviews;
