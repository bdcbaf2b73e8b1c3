// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # hmsbeagle
//!
//! Instance bootstrap and reporting types for the BEAGLE phylogenetic likelihood API.
//!
//! A caller describes the instance it needs with an [`InstanceConfig`], asks an
//! [`InstanceRegistry`] to create it, and after initialization reads back an
//! [`InstanceDetails`] record telling it which resource the instance runs on and which
//! flags describe it.
//!
//! ## Quick Start
//!
//! ```rust
//! use hmsbeagle::prelude::*;
//!
//! struct Cpu;
//!
//! impl BeagleImpl for Cpu {
//!     fn initialize_instance(&mut self, details: &mut InstanceDetails) -> Result<()> {
//!         details.set_resource_number(0);
//!         details.set_flags(0x10);
//!         Ok(())
//!     }
//! }
//!
//! struct CpuFactory;
//!
//! impl ImplFactory for CpuFactory {
//!     fn name(&self) -> &str {
//!         "CPU"
//!     }
//!
//!     fn create_impl(&self, _config: &InstanceConfig) -> Result<Option<Box<dyn BeagleImpl>>> {
//!         Ok(Some(Box::new(Cpu)))
//!     }
//! }
//!
//! let mut registry = InstanceRegistry::new().with_factory(CpuFactory);
//! let config = InstanceConfig::default().with_state_count(4).with_pattern_count(100);
//! let instance = registry.create_instance(&config)?;
//!
//! let mut details = InstanceDetails::new();
//! registry.initialize_instance(instance, &mut details)?;
//! assert_eq!(details.flags(), 16);
//! # Ok::<(), hmsbeagle::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`instance`] - Instance details, configuration, registry and kernel resources
//! - [`Error`] and [`Result`] - Error handling with API return codes
//!
//! Flag values are opaque to this crate: they are stored and passed through, never
//! interpreted bit by bit.
//!
//! ## Logging
//!
//! The registry emits [`tracing`] events while bootstrapping and finalizing instances.
//! No subscriber is installed by the library.

pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
pub mod prelude;

/// Instance creation, initialization and reporting.
pub mod instance;

/// `hmsbeagle` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `hmsbeagle` Error type
///
/// Every variant maps onto one of the API's [`ReturnCode`] values via [`Error::code`].
pub use error::{Error, ReturnCode};

pub use instance::{
    BeagleImpl, ImplFactory, InstanceConfig, InstanceDetails, InstanceRegistry, KernelResource,
};
