//! ICU MessageFormat syntax checking.
//!
//! The checker only establishes that a message is well-formed; it does not
//! validate plural categories against locale data.

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::{IcuElement, IcuOption, SimpleKind, argument_names};
pub use error::IcuSyntaxError;
pub use parser::parse;

/// Check `message` against the ICU grammar.
pub fn check(message: &str) -> Result<(), IcuSyntaxError> {
    parse(message).map(|_| ())
}
