use thiserror::Error;

/// Broad category of an [`enum@Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller passed something the algorithm is not defined for.
    InvalidArgument,
    /// The sample is well formed but carries no spread, so W is a division by zero.
    DegenerateInput,
}

/// Errors raised while computing the Shapiro-Wilk statistic.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// A probability outside the open interval (0, 1) reached the normal quantile.
    #[error("Invalid input argument ({0}); must be larger than 0 but less than 1.")]
    ProbabilityOutOfRange(f64),

    /// Fewer observations than the test (or its configuration) needs.
    #[error("Invalid input argument: sample size {given} is below the minimum of {needed}")]
    InsufficientSampleSize {
        /// Smallest admissible size.
        needed: usize,
        /// Size actually supplied.
        given: usize,
    },

    /// More observations than the configured upper bound.
    #[error("Invalid input argument: sample size {given} exceeds the configured maximum of {limit}")]
    SampleTooLarge {
        /// Configured maximum.
        limit: usize,
        /// Size actually supplied.
        given: usize,
    },

    /// A NaN or infinite observation; W is undefined for it.
    #[error("Invalid input argument: sample contains a non-finite value at position {index}")]
    NonFinite {
        /// Position of the first offending value in the caller's order.
        index: usize,
    },

    /// A slice handed to the weights does not match the size they were built for.
    #[error("Invalid input argument: expected {expected} order statistics, got {given}")]
    LengthMismatch {
        /// Size the weights were built for.
        expected: usize,
        /// Length of the slice supplied.
        given: usize,
    },

    /// Zero variance: W would divide by zero.
    #[error("Degenerate input: all {n} sample values are identical (zero variance)")]
    DegenerateInput {
        /// Sample size.
        n: usize,
    },
}

impl Error {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::DegenerateInput { .. } => ErrorKind::DegenerateInput,
            Error::ProbabilityOutOfRange(_)
            | Error::InsufficientSampleSize { .. }
            | Error::SampleTooLarge { .. }
            | Error::NonFinite { .. }
            | Error::LengthMismatch { .. } => ErrorKind::InvalidArgument,
        }
    }

    /// Shorthand for `self.kind() == ErrorKind::InvalidArgument`.
    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
