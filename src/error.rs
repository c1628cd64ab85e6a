use thiserror::Error;

/// Errors raised building a [`crate::model::Workload`] from parsed descriptors.
///
/// These are programmer/parser errors in the sense of `spec.md` §7: a
/// correct parser feeding valid input never triggers them. They exist as
/// `Result` rather than `panic!` only because the data crossing this
/// boundary ultimately comes from a file someone can hand-edit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("process at source position {source_order} has no bursts")]
    EmptyBursts { source_order: u32 },

    #[error("process at source position {source_order} has a zero-magnitude burst")]
    ZeroMagnitudeBurst { source_order: u32 },

    #[error(
        "duplicate process identity (pid={pid}, arrival={arrival}); \
         the source accepts this and removes only the first match, \
         this implementation rejects it at model-build time instead"
    )]
    DuplicateIdentity { pid: u32, arrival: u32 },

    #[error("round-robin quantum must be >= 1, got {0}")]
    InvalidQuantum(u32),
}

/// Errors raised parsing the workload text format (`lireFichier`'s grammar).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: expected at least pid, arrival, and one burst, got {tokens} token(s)")]
    TooFewFields { line: usize, tokens: usize },

    #[error("line {line}: non-numeric token {token:?}")]
    NotANumber { line: usize, token: String },

    #[error("line {line}: pid must be a non-negative integer, got {value}")]
    InvalidPid { line: usize, value: i64 },

    #[error("line {line}: arrival must be a non-negative integer, got {value}")]
    InvalidArrival { line: usize, value: i64 },

    #[error("line {line}: burst value of 0 is not a valid burst magnitude")]
    ZeroBurst { line: usize },

    #[error("could not read workload file {path:?}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

// `std::io::Error` has no `PartialEq` impl, so this can't be derived; the
// `Io` variant compares by path only, which is all the test suite needs.
impl PartialEq for ParseError {
    fn eq(&self, other: &Self) -> bool {
        use ParseError::*;
        match (self, other) {
            (TooFewFields { line: l1, tokens: t1 }, TooFewFields { line: l2, tokens: t2 }) => {
                l1 == l2 && t1 == t2
            }
            (NotANumber { line: l1, token: t1 }, NotANumber { line: l2, token: t2 }) => {
                l1 == l2 && t1 == t2
            }
            (InvalidPid { line: l1, value: v1 }, InvalidPid { line: l2, value: v2 }) => {
                l1 == l2 && v1 == v2
            }
            (InvalidArrival { line: l1, value: v1 }, InvalidArrival { line: l2, value: v2 }) => {
                l1 == l2 && v1 == v2
            }
            (ZeroBurst { line: l1 }, ZeroBurst { line: l2 }) => l1 == l2,
            (Io { path: p1, .. }, Io { path: p2, .. }) => p1 == p2,
            (Model(a), Model(b)) => a == b,
            _ => false,
        }
    }
}
