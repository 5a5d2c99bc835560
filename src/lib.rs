//! intl-extract - message descriptor extraction for react-intl
//!
//! Finds `defineMessages`, `defineMessage`, `<FormattedMessage>` and
//! (optionally) `formatMessage` declarations in JS/TS sources, validates
//! them, writes one JSON catalog per source file and rewrites the sources
//! so every declaration carries a stable id.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine (match, validate, rewrite, write)
//! - `error`: Extraction failures
//! - `logging`: tracing subscriber setup

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;

pub use error::ExtractError;
