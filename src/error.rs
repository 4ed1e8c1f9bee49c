use thiserror::Error;

/// Result type alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the structural transformations of this crate.
///
/// Classification predicates never fail; only formula translation, constraint
/// parsing and root derivation return these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The constraint tree contains a node the logic engine cannot represent.
    #[error("unsupported constraint construct: {constraint}")]
    UnsupportedConstruct { constraint: String },

    /// The feature map has no feature without a parent.
    #[error("feature model has no root feature")]
    ModelHasNoRoot,

    /// Recursion went past the configured depth bound.
    #[error("malformed tree: nesting exceeds {max_depth} levels")]
    MalformedTree { max_depth: usize },

    /// The constraint grammar rejected its input.
    #[error("parse error at position {position}: {message}")]
    Parse { position: usize, message: String },
}

impl Error {
    pub(crate) fn parse(position: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            position,
            message: message.into(),
        }
    }
}
