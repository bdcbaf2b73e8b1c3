//! Instance creation, initialization and reporting.
//!
//! # Key Components
//!
//! - [`InstanceDetails`] - Resource number and flags reported for an initialized instance
//! - [`InstanceConfig`] - Buffer sizes and preferences used when creating an instance
//! - [`InstanceRegistry`] - Factory trial order and live instances
//! - [`KernelResource`] - GPU kernel tuning parameters cloned per instance

mod config;
mod details;
mod kernel;
mod registry;

pub use config::InstanceConfig;
pub use details::InstanceDetails;
pub use kernel::KernelResource;
pub use registry::{BeagleImpl, ImplFactory, InstanceRegistry};
