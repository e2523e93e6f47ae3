use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Per-residue disorder classification produced by thresholding.
///
/// Each entry is `0` (ordered) or `1` (disordered). The mask is mutated in
/// place by gap closure and size filtering.
pub type BinaryMask = Vec<u8>;

/// Structural class of a contiguous residue span.
///
/// # Examples
///
/// ```rust
/// use idrscan_core::types::DomainKind;
///
/// assert_eq!(DomainKind::Disordered.to_string(), "IDR");
/// assert_eq!(DomainKind::Folded.to_string(), "FD");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainKind {
    /// Intrinsically disordered region
    Disordered,
    /// Folded domain
    Folded,
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disordered => write!(f, "IDR"),
            Self::Folded => write!(f, "FD"),
        }
    }
}

/// A materialised domain: a half-open residue interval `[start, end)` plus the
/// residues it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Domain {
    /// Disordered or folded
    pub kind: DomainKind,
    /// First residue index (0-based, inclusive)
    pub start: usize,
    /// One past the last residue index
    pub end: usize,
    /// Residues `sequence[start..end]`
    pub sequence: String,
}

impl Domain {
    /// Number of residues in the domain
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Errors reported by disorder prediction and domain decomposition.
#[derive(Error, Debug)]
pub enum IdrError {
    /// A caller-supplied parameter is out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Sequence or disorder profile is empty
    #[error("Empty sequence or disorder profile")]
    EmptyInput,
    /// Sequence and disorder profile lengths disagree
    #[error("Length mismatch: sequence has {sequence} residues but profile has {profile} values")]
    LengthMismatch { sequence: usize, profile: usize },
    /// An internal invariant of the decomposition was violated
    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),
    /// Residue string contains characters that are not amino acid codes
    #[error("Invalid sequence: {0}")]
    InvalidSequence(String),
    /// The disorder scorer failed to produce a profile
    #[error("Scoring failed: {0}")]
    Scoring(String),
    /// File I/O operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// Error parsing input data
    #[error("Parse error: {0}")]
    ParseError(String),
    /// JSON serialisation failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
