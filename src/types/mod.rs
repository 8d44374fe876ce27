// Docmark shared type definitions
// Each submodule defines types used across the service.

pub mod bookmark;
pub mod errors;
pub mod identity;
pub mod outcome;
pub mod settings;
