pub mod auth;
pub mod species;
