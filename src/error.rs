use strum::{EnumCount, EnumIter, FromRepr};
use thiserror::Error;

/// Integer return codes of the BEAGLE API.
///
/// Every fallible operation of the instance API reports its outcome as one of these
/// codes. [`Error::code`] maps a Rust error back onto the code a C caller would see, and
/// `ReturnCode::from_repr` looks a raw value up, returning `None` for values outside the API.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, EnumIter, EnumCount, FromRepr)]
#[repr(i32)]
pub enum ReturnCode {
    /// Success
    NoError = 0,
    /// Unspecified error
    GeneralError = -1,
    /// Not enough memory could be allocated
    OutOfMemoryError = -2,
    /// Unspecified exception
    UnidentifiedExceptionError = -3,
    /// The instance index is invalid or the instance has been finalized
    UninitializedInstanceError = -4,
    /// One of the indices specified exceeded the range of the array
    OutOfRangeError = -5,
}

impl ReturnCode {
    /// The raw integer value of this code.
    #[must_use]
    pub fn value(self) -> i32 {
        self as i32
    }
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Each variant corresponds to exactly one negative [`ReturnCode`]; there is no variant for
/// [`ReturnCode::NoError`].
///
/// # Examples
///
/// ```rust
/// use hmsbeagle::{Error, InstanceDetails, InstanceRegistry};
///
/// let mut registry = InstanceRegistry::new();
/// let mut details = InstanceDetails::new();
///
/// match registry.initialize_instance(0, &mut details) {
///     Ok(()) => println!("resource {}", details.resource_number()),
///     Err(Error::UninitializedInstance(index)) => eprintln!("no instance {}", index),
///     Err(e) => eprintln!("error {}: {}", e.code().value(), e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Unspecified failure.
    ///
    /// Returned when no implementation factory could create an instance, or when an
    /// implementation fails for a reason not covered by the other variants.
    #[error("{0}")]
    General(String),

    /// An implementation could not allocate the buffers it needs.
    #[error("Not enough memory could be allocated")]
    OutOfMemory,

    /// An implementation raised a failure it could not classify.
    #[error("Unidentified exception - {0}")]
    UnidentifiedException(String),

    /// The instance index does not refer to a live instance.
    ///
    /// Covers indices that were never handed out as well as instances that
    /// have already been finalized.
    #[error("Instance {0} is not initialized")]
    UninitializedInstance(usize),

    /// An index passed to an implementation exceeded the range of the array it addresses.
    #[error("Index {0} is out of range")]
    OutOfRange(usize),
}

impl Error {
    /// The API return code this error is reported as.
    #[must_use]
    pub fn code(&self) -> ReturnCode {
        match self {
            Error::General(_) => ReturnCode::GeneralError,
            Error::OutOfMemory => ReturnCode::OutOfMemoryError,
            Error::UnidentifiedException(_) => ReturnCode::UnidentifiedExceptionError,
            Error::UninitializedInstance(_) => ReturnCode::UninitializedInstanceError,
            Error::OutOfRange(_) => ReturnCode::OutOfRangeError,
        }
    }
}
