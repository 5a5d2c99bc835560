//! Core data types shared across the extraction engine.
//!
//! - `descriptor`: MessageDescriptor, the catalog record
//! - `position`: source positions and file identity

pub mod descriptor;
pub mod position;

pub use descriptor::MessageDescriptor;
pub use position::{FileIdentity, SourcePosition, SourceRange};
