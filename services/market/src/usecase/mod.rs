pub mod account;
pub mod auth;
pub mod credential;
pub mod listing;
pub mod order;
pub mod requirement;
pub mod review;
pub mod verification;
