//! # hmsbeagle Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the hmsbeagle library.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all hmsbeagle operations
pub use crate::Error;

/// The result type used throughout hmsbeagle
pub use crate::Result;

/// Integer return codes of the API
pub use crate::ReturnCode;

// ================================================================================================
// Instances
// ================================================================================================

/// Instance reporting and configuration
pub use crate::instance::{InstanceConfig, InstanceDetails, KernelResource};

/// Instance bootstrap
pub use crate::instance::{BeagleImpl, ImplFactory, InstanceRegistry};
