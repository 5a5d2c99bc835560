//! Extraction engine.
//!
//! A file goes through [`pipeline::transform`]: it is parsed, the
//! [`matcher`] finds message declarations, [`validate`] turns each into a
//! descriptor, the [`registry`] rejects conflicting ids and [`rewrite`] plans
//! the source edits. [`pipeline::process_file`] adds reading and the staged
//! writes of [`catalog`].

pub mod catalog;
pub mod context;
pub mod data;
pub mod file_scanner;
pub mod icu;
pub mod matcher;
pub mod options;
pub mod parsers;
pub mod pipeline;
pub mod project;
pub mod registry;
pub mod rewrite;
pub mod validate;

pub use data::{FileIdentity, MessageDescriptor, SourcePosition, SourceRange};
pub use options::{ExtractOptions, Pass};
pub use pipeline::{FileReport, OutputPlan, TransformOutput, process_file, transform};
pub use project::{ProjectContext, ProjectOverrides};
