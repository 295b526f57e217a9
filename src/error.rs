use thiserror::Error;

/// Everything that can go wrong between raw input and a laid-out diagram.
///
/// None of these are transient: they describe malformed or inconsistent
/// input and abort the whole render.
#[derive(Debug, Error, PartialEq)]
pub enum SwimlaneError {
    #[error("failed to parse {format} input: {message}")]
    Syntax {
        format: &'static str,
        message: String,
    },
    #[error("message {index} of sequence {sequence} has {len} elements, expected 3 or 4")]
    Arity {
        sequence: usize,
        index: usize,
        len: usize,
    },
    #[error("message {index} of sequence {sequence}: {field} {reason}")]
    InvalidField {
        sequence: usize,
        index: usize,
        field: &'static str,
        reason: String,
    },
    #[error("peer `{0}` is declared more than once")]
    DuplicatePeer(String),
    #[error("message {index} of sequence {sequence} references undeclared peer `{peer}`")]
    UnknownPeer {
        sequence: usize,
        index: usize,
        peer: String,
    },
    #[error(
        "peer `{peer}` has more than one style-attribute set in sequence {sequence} \
         (messages {first} and {second})"
    )]
    StyleConflict {
        sequence: usize,
        peer: String,
        first: usize,
        second: usize,
    },
}

pub type Result<T, E = SwimlaneError> = std::result::Result<T, E>;
