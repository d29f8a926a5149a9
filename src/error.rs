//! Common error definitions.

/// Alias for Result<T, Error>.
pub type Result<T> = core::result::Result<T, Error>;

/// Collection of all errors that can occur.
///
/// Bus accesses themselves are infallible, and the accelerator has no status register, so
/// hardware faults never surface here.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// `init` was called without a descriptor slot to populate.
    NoDescriptor,
    /// A tap index was at or past the tap count. Only returned with the `strict-range`
    /// feature; otherwise such accesses are silently ignored.
    TapIndex,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoDescriptor => write!(f, "no descriptor to initialize"),
            Self::TapIndex => write!(f, "tap index out of range"),
        }
    }
}

impl core::error::Error for Error {}
