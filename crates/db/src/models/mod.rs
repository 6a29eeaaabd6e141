//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row and, where the API inserts rows, a create DTO.

pub mod species;
pub mod user;
