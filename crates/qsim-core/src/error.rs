//! Error types for the simulation core.
//!
//! A single enum covers the whole failure taxonomy: dimension mismatches,
//! shape mismatches, singular matrices, out-of-range field queries,
//! trajectory protocol violations and session version conflicts. Every
//! failure propagates synchronously to the immediate caller; nothing in
//! the core retries or degrades silently.

use thiserror::Error;

/// All errors returned by `qsim-core`.
#[derive(Debug, Error)]
pub enum Error {
    /// Two quantities with different units were combined in an operation
    /// that requires homogeneity (addition, subtraction, comparison).
    #[error("unit mismatch: {left} and {right}")]
    UnitMismatch { left: String, right: String },

    /// A transcendental operator received a quantity carrying a dimension.
    #[error("quantity of unit {unit} is not dimensionless")]
    NotDimensionless { unit: String },

    /// A unit string segment named an unknown symbol.
    #[error("{symbol} is not a valid unit")]
    UnknownUnit { symbol: String },

    /// A unit string segment carried a malformed exponent.
    #[error("{text} is not a valid power")]
    InvalidPower { text: String },

    /// Raising a unit to a real power produced fractional exponents.
    #[error("invalid power {power} for unit {unit}")]
    FractionalDimension { power: f64, unit: String },

    /// Operand shapes are incompatible (wrong pairing, size disagreement,
    /// or a rectangular matrix where a square one is required).
    #[error("shape mismatch: {reason}")]
    ShapeMismatch { reason: String },

    /// The matrix has a determinant of exactly zero and cannot be inverted.
    #[error("the determinant of the matrix is zero")]
    SingularMatrix,

    /// A derivative was requested of a function whose sampled difference
    /// is not scalar.
    #[error("the function is not scalar-valued")]
    NonScalarDerivative,

    /// An interpolation query fell outside the sampled region.
    #[error("the point is outside the sampled zone")]
    OutsideSampledRegion,

    /// Continuous approximation is only defined for cuboid-topology fields.
    #[error("invalid field shape: {geometry}")]
    UnsupportedFieldShape { geometry: String },

    /// `calculate` was called while a step was still waiting to be saved.
    #[error("calculated step not saved")]
    StepPending,

    /// `save` was called with no calculated step waiting.
    #[error("no calculated step waiting")]
    NoStepPending,

    /// An operation received an empty argument list.
    #[error("no argument is given")]
    EmptyArguments,

    /// The operation is not defined for the given operands.
    #[error("operation not defined: {reason}")]
    Unsupported { reason: String },

    /// An argument is outside the operation's domain.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A session file was written by an incompatible library version.
    #[error("version conflict: requires version {required}, found {found}")]
    VersionConflict { required: String, found: String },

    /// A session file is truncated or otherwise unreadable.
    #[error("malformed session file")]
    MalformedSession,

    /// Underlying I/O failure while reading or writing a session file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Underlying serialization failure.
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a [`Error::ShapeMismatch`] with a formatted reason.
    pub(crate) fn shape(reason: impl Into<String>) -> Self {
        Error::ShapeMismatch {
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout `qsim-core`.
pub type Result<T> = std::result::Result<T, Error>;
