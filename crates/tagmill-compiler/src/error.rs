//! Error types for tag compilation

use thiserror::Error;

/// Errors raised while compiling component tags into directives
///
/// All variants are fatal to the current compile call: no partial output is
/// returned. Tag text that merely fails the lexical patterns is not an
/// error; it passes through to the output untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    /// A custom tag whose component name is empty after the namespace prefix
    #[error("invalid component tag `{0}`: empty component name")]
    InvalidTag(String),

    /// A slot `props` value that cannot be unwrapped from its literal quoting
    #[error("cannot unwrap slot props value {0}: expected a quoted literal")]
    PropsUnwrap(String),

    /// A slot marker with neither an inline name nor a `name` attribute
    #[error("slot tag is missing a name")]
    SlotWithoutName,
}
