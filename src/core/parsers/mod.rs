//! Source file parsing.
//!
//! - `jsx`: JS/JSX/TS/TSX parsing through swc

pub mod jsx;

pub use jsx::{ParsedSource, parse_source};
