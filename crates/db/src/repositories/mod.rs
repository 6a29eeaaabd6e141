//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod species_repo;
pub mod user_repo;

pub use species_repo::SpeciesRepo;
pub use user_repo::UserRepo;
