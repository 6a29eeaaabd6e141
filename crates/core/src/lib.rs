//! Biodiversity Hub domain core.
//!
//! Pure logic with no database or HTTP dependencies: the species record,
//! its validation schema, the summary card and detail views, and the edit
//! dialog state machine together with the collaborator traits it drives.

pub mod error;
pub mod species;
pub mod types;
