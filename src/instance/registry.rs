//! Instance bootstrap, dispatch and lifetime management.
//!
//! An [`InstanceRegistry`] owns an ordered list of [`ImplFactory`] values and the instances
//! they produced. Creating an instance tries each factory in registration order; the first
//! factory that returns an implementation wins and the new instance is addressed by its
//! index from then on. Every per-instance operation looks the index up and forwards the call
//! to the implementation, failing with [`Error::UninitializedInstance`] if there is none.
//!
//! # Lifecycle
//!
//! 1. [`InstanceRegistry::create_instance`] - pick an implementation, returns the index
//! 2. [`InstanceRegistry::initialize_instance`] - the implementation fills in [`InstanceDetails`]
//! 3. buffer uploads, matrix and partials updates, likelihood calculations
//! 4. [`InstanceRegistry::finalize`] - drop the implementation; the index stays retired
//!
//! # Examples
//!
//! ```rust
//! use hmsbeagle::{BeagleImpl, ImplFactory, InstanceConfig, InstanceDetails, InstanceRegistry};
//!
//! struct Cpu;
//!
//! impl BeagleImpl for Cpu {
//!     fn initialize_instance(&mut self, details: &mut InstanceDetails) -> hmsbeagle::Result<()> {
//!         details.set_resource_number(0);
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
//!     fn create_impl(
//!         &self,
//!         _config: &InstanceConfig,
//!     ) -> hmsbeagle::Result<Option<Box<dyn BeagleImpl>>> {
//!         Ok(Some(Box::new(Cpu)))
//!     }
//! }
//!
//! let mut registry = InstanceRegistry::new().with_factory(CpuFactory);
//! let index = registry.create_instance(&InstanceConfig::default())?;
//!
//! let mut details = InstanceDetails::new();
//! registry.initialize_instance(index, &mut details)?;
//! registry.finalize(index)?;
//! # Ok::<(), hmsbeagle::Error>(())
//! ```

use tracing::{debug, warn};

use crate::{
    instance::{InstanceConfig, InstanceDetails},
    Error, Result,
};

fn unsupported(operation: &str) -> Error {
    Error::General(format!("{operation} is not supported by this implementation"))
}

/// A backend implementation of one instance.
///
/// Only [`BeagleImpl::initialize_instance`] is required. Every other operation has a default
/// body that fails with [`Error::General`], so an implementation overrides what it supports.
/// Index arguments address the implementation's own buffers; an implementation reports an
/// index beyond its allocation as [`Error::OutOfRange`].
pub trait BeagleImpl {
    /// Prepare the instance for use and report where it runs.
    ///
    /// # Errors
    /// Returns an error if the implementation cannot finish its setup, e.g.
    /// [`Error::OutOfMemory`] when buffers cannot be allocated.
    fn initialize_instance(&mut self, details: &mut InstanceDetails) -> Result<()>;

    /// Copy `partials` into the partials buffer `buffer_index`.
    ///
    /// # Errors
    /// Fails if the operation is unsupported or the buffer does not exist.
    fn set_partials(&mut self, buffer_index: usize, partials: &[f64]) -> Result<()> {
        let _ = (buffer_index, partials);
        Err(unsupported("set_partials"))
    }

    /// Copy the partials buffer `buffer_index` into `out_partials`.
    ///
    /// # Errors
    /// Fails if the operation is unsupported or the buffer does not exist.
    fn get_partials(&mut self, buffer_index: usize, out_partials: &mut [f64]) -> Result<()> {
        let _ = (buffer_index, out_partials);
        Err(unsupported("get_partials"))
    }

    /// Set the compact state representation of tip `tip_index`.
    ///
    /// # Errors
    /// Fails if the operation is unsupported or the tip does not exist.
    fn set_tip_states(&mut self, tip_index: usize, states: &[i32]) -> Result<()> {
        let _ = (tip_index, states);
        Err(unsupported("set_tip_states"))
    }

    /// Store an eigen-decomposition in buffer `eigen_index`.
    ///
    /// # Errors
    /// Fails if the operation is unsupported or the buffer does not exist.
    fn set_eigen_decomposition(
        &mut self,
        eigen_index: usize,
        eigen_vectors: &[f64],
        inverse_eigen_vectors: &[f64],
        eigen_values: &[f64],
    ) -> Result<()> {
        let _ = (eigen_index, eigen_vectors, inverse_eigen_vectors, eigen_values);
        Err(unsupported("set_eigen_decomposition"))
    }

    /// Copy `matrix` into the transition matrix buffer `matrix_index`.
    ///
    /// # Errors
    /// Fails if the operation is unsupported or the buffer does not exist.
    fn set_transition_matrix(&mut self, matrix_index: usize, matrix: &[f64]) -> Result<()> {
        let _ = (matrix_index, matrix);
        Err(unsupported("set_transition_matrix"))
    }

    /// Compute transition matrices, and optionally their derivatives, for `edge_lengths`
    /// from the eigen-decomposition `eigen_index`.
    ///
    /// The index slices are parallel to `edge_lengths`; derivative slices may be empty.
    ///
    /// # Errors
    /// Fails if the operation is unsupported or a buffer does not exist.
    fn update_transition_matrices(
        &mut self,
        eigen_index: usize,
        probability_indices: &[usize],
        first_derivative_indices: &[usize],
        second_derivative_indices: &[usize],
        edge_lengths: &[f64],
    ) -> Result<()> {
        let _ = (
            eigen_index,
            probability_indices,
            first_derivative_indices,
            second_derivative_indices,
            edge_lengths,
        );
        Err(unsupported("update_transition_matrices"))
    }

    /// Run the flattened partials `operations`, rescaling if `rescale` is set.
    ///
    /// # Errors
    /// Fails if the operation is unsupported or an operation addresses a missing buffer.
    fn update_partials(&mut self, operations: &[i32], rescale: bool) -> Result<()> {
        let _ = (operations, rescale);
        Err(unsupported("update_partials"))
    }

    /// Block until the partials buffers in `destination_partials` are up to date.
    ///
    /// # Errors
    /// Fails if the operation is unsupported or a buffer does not exist.
    fn wait_for_partials(&mut self, destination_partials: &[usize]) -> Result<()> {
        let _ = destination_partials;
        Err(unsupported("wait_for_partials"))
    }

    /// Integrate the root partials in `buffer_indices` and write one log likelihood per
    /// pattern into `out_log_likelihoods`.
    ///
    /// # Errors
    /// Fails if the operation is unsupported or a buffer does not exist.
    fn calculate_root_log_likelihoods(
        &mut self,
        buffer_indices: &[usize],
        weights: &[f64],
        state_frequencies: &[f64],
        out_log_likelihoods: &mut [f64],
    ) -> Result<()> {
        let _ = (buffer_indices, weights, state_frequencies, out_log_likelihoods);
        Err(unsupported("calculate_root_log_likelihoods"))
    }

    /// Integrate across the edges between `parent_buffer_indices` and `child_buffer_indices`,
    /// writing log likelihoods and, if requested, their derivatives.
    ///
    /// # Errors
    /// Fails if the operation is unsupported or a buffer does not exist.
    #[allow(clippy::too_many_arguments)]
    fn calculate_edge_log_likelihoods(
        &mut self,
        parent_buffer_indices: &[usize],
        child_buffer_indices: &[usize],
        probability_indices: &[usize],
        first_derivative_indices: &[usize],
        second_derivative_indices: &[usize],
        weights: &[f64],
        state_frequencies: &[f64],
        out_log_likelihoods: &mut [f64],
        out_first_derivatives: &mut [f64],
        out_second_derivatives: &mut [f64],
    ) -> Result<()> {
        let _ = (
            parent_buffer_indices,
            child_buffer_indices,
            probability_indices,
            first_derivative_indices,
            second_derivative_indices,
            weights,
            state_frequencies,
            out_log_likelihoods,
            out_first_derivatives,
            out_second_derivatives,
        );
        Err(unsupported("calculate_edge_log_likelihoods"))
    }
}

/// Named constructor for one kind of [`BeagleImpl`].
pub trait ImplFactory {
    /// Human readable name, used in the bootstrap log.
    fn name(&self) -> &str;

    /// Try to build an implementation for `config`.
    ///
    /// Returns `Ok(None)` if this implementation is not available or cannot satisfy the
    /// configuration; the registry then moves on to the next factory.
    ///
    /// # Errors
    /// An error aborts the bootstrap: no further factories are tried and the error is
    /// returned from [`InstanceRegistry::create_instance`].
    fn create_impl(&self, config: &InstanceConfig) -> Result<Option<Box<dyn BeagleImpl>>>;
}

/// Ordered implementation factories and the instances they created.
///
/// Finalizing an instance empties its slot but does not remove it, so indices stay stable and
/// are never reused. The slot table therefore grows by one entry per created instance for the
/// lifetime of the registry.
#[derive(Default)]
pub struct InstanceRegistry {
    factories: Vec<Box<dyn ImplFactory>>,
    instances: Vec<Option<Box<dyn BeagleImpl>>>,
}

impl InstanceRegistry {
    /// Create a registry without factories or instances.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a factory, builder style.
    #[must_use]
    pub fn with_factory<F: ImplFactory + 'static>(mut self, factory: F) -> Self {
        self.register_factory(factory);
        self
    }

    /// Append a factory. Factories are tried in the order they were registered.
    pub fn register_factory<F: ImplFactory + 'static>(&mut self, factory: F) {
        self.factories.push(Box::new(factory));
    }

    /// Names of the registered factories, in trial order.
    pub fn factory_names(&self) -> impl Iterator<Item = &str> {
        self.factories.iter().map(|factory| factory.name())
    }

    /// Number of instances that have been created and not yet finalized.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.instances.iter().filter(|slot| slot.is_some()).count()
    }

    /// Create a new instance from the first factory that accepts `config`.
    ///
    /// # Errors
    /// Returns the error of the first factory that fails outright, without trying the
    /// remaining ones. Returns [`Error::General`] if no factory is registered or none could
    /// create an implementation.
    pub fn create_instance(&mut self, config: &InstanceConfig) -> Result<usize> {
        for factory in &self.factories {
            debug!("bootstrap: trying {}", factory.name());

            let created = factory.create_impl(config).inspect_err(|error| {
                warn!("bootstrap: {} aborted - {}", factory.name(), error);
            })?;

            if let Some(implementation) = created {
                let index = self.instances.len();
                self.instances.push(Some(implementation));
                debug!("bootstrap: {} created instance {}", factory.name(), index);
                return Ok(index);
            }

            warn!("bootstrap: {} failed", factory.name());
        }

        Err(Error::General("No implementation could be created".to_string()))
    }

    /// Release the instance at `index`. The index is not handed out again.
    ///
    /// # Errors
    /// Returns [`Error::UninitializedInstance`] if `index` does not refer to a live instance.
    pub fn finalize(&mut self, index: usize) -> Result<()> {
        match self.instances.get_mut(index).and_then(Option::take) {
            Some(implementation) => {
                drop(implementation);
                debug!("finalized instance {}", index);
                Ok(())
            }
            None => Err(Error::UninitializedInstance(index)),
        }
    }

    /// The live implementation at `index`.
    ///
    /// # Errors
    /// Returns [`Error::UninitializedInstance`] if `index` was never handed out or has been
    /// finalized.
    pub fn instance_mut(&mut self, index: usize) -> Result<&mut dyn BeagleImpl> {
        match self.instances.get_mut(index) {
            Some(Some(implementation)) => Ok(&mut **implementation),
            _ => Err(Error::UninitializedInstance(index)),
        }
    }

    /// Initialize the instance at `index`, letting it populate `details`.
    ///
    /// # Errors
    /// Returns [`Error::UninitializedInstance`] if `index` does not refer to a live instance,
    /// or whatever error the implementation reports.
    pub fn initialize_instance(
        &mut self,
        index: usize,
        details: &mut InstanceDetails,
    ) -> Result<()> {
        self.instance_mut(index)?.initialize_instance(details)
    }

    /// Forward [`BeagleImpl::set_partials`] to the instance at `index`.
    ///
    /// # Errors
    /// Returns [`Error::UninitializedInstance`] for an unknown index, otherwise the
    /// implementation's result.
    pub fn set_partials(
        &mut self,
        index: usize,
        buffer_index: usize,
        partials: &[f64],
    ) -> Result<()> {
        self.instance_mut(index)?.set_partials(buffer_index, partials)
    }

    /// Forward [`BeagleImpl::get_partials`] to the instance at `index`.
    ///
    /// # Errors
    /// Returns [`Error::UninitializedInstance`] for an unknown index, otherwise the
    /// implementation's result.
    pub fn get_partials(
        &mut self,
        index: usize,
        buffer_index: usize,
        out_partials: &mut [f64],
    ) -> Result<()> {
        self.instance_mut(index)?.get_partials(buffer_index, out_partials)
    }

    /// Forward [`BeagleImpl::set_tip_states`] to the instance at `index`.
    ///
    /// # Errors
    /// Returns [`Error::UninitializedInstance`] for an unknown index, otherwise the
    /// implementation's result.
    pub fn set_tip_states(
        &mut self,
        index: usize,
        tip_index: usize,
        states: &[i32],
    ) -> Result<()> {
        self.instance_mut(index)?.set_tip_states(tip_index, states)
    }

    /// Forward [`BeagleImpl::set_eigen_decomposition`] to the instance at `index`.
    ///
    /// # Errors
    /// Returns [`Error::UninitializedInstance`] for an unknown index, otherwise the
    /// implementation's result.
    pub fn set_eigen_decomposition(
        &mut self,
        index: usize,
        eigen_index: usize,
        eigen_vectors: &[f64],
        inverse_eigen_vectors: &[f64],
        eigen_values: &[f64],
    ) -> Result<()> {
        self.instance_mut(index)?.set_eigen_decomposition(
            eigen_index,
            eigen_vectors,
            inverse_eigen_vectors,
            eigen_values,
        )
    }

    /// Forward [`BeagleImpl::set_transition_matrix`] to the instance at `index`.
    ///
    /// # Errors
    /// Returns [`Error::UninitializedInstance`] for an unknown index, otherwise the
    /// implementation's result.
    pub fn set_transition_matrix(
        &mut self,
        index: usize,
        matrix_index: usize,
        matrix: &[f64],
    ) -> Result<()> {
        self.instance_mut(index)?.set_transition_matrix(matrix_index, matrix)
    }

    /// Forward [`BeagleImpl::update_transition_matrices`] to the instance at `index`.
    ///
    /// # Errors
    /// Returns [`Error::UninitializedInstance`] for an unknown index, otherwise the
    /// implementation's result.
    pub fn update_transition_matrices(
        &mut self,
        index: usize,
        eigen_index: usize,
        probability_indices: &[usize],
        first_derivative_indices: &[usize],
        second_derivative_indices: &[usize],
        edge_lengths: &[f64],
    ) -> Result<()> {
        self.instance_mut(index)?.update_transition_matrices(
            eigen_index,
            probability_indices,
            first_derivative_indices,
            second_derivative_indices,
            edge_lengths,
        )
    }

    /// Run the same partials `operations` on every instance in `indices`.
    ///
    /// A missing instance stops the run immediately. Implementation errors do not: every
    /// remaining instance is still updated and the last error is returned.
    ///
    /// # Errors
    /// Returns [`Error::UninitializedInstance`] for the first unknown index, otherwise the
    /// last error reported by an implementation.
    pub fn update_partials(
        &mut self,
        indices: &[usize],
        operations: &[i32],
        rescale: bool,
    ) -> Result<()> {
        self.for_each_instance(indices, |implementation| {
            implementation.update_partials(operations, rescale)
        })
    }

    /// Wait on `destination_partials` for every instance in `indices`.
    ///
    /// Follows the same error rules as [`InstanceRegistry::update_partials`].
    ///
    /// # Errors
    /// Returns [`Error::UninitializedInstance`] for the first unknown index, otherwise the
    /// last error reported by an implementation.
    pub fn wait_for_partials(
        &mut self,
        indices: &[usize],
        destination_partials: &[usize],
    ) -> Result<()> {
        self.for_each_instance(indices, |implementation| {
            implementation.wait_for_partials(destination_partials)
        })
    }

    /// Forward [`BeagleImpl::calculate_root_log_likelihoods`] to the instance at `index`.
    ///
    /// # Errors
    /// Returns [`Error::UninitializedInstance`] for an unknown index, otherwise the
    /// implementation's result.
    pub fn calculate_root_log_likelihoods(
        &mut self,
        index: usize,
        buffer_indices: &[usize],
        weights: &[f64],
        state_frequencies: &[f64],
        out_log_likelihoods: &mut [f64],
    ) -> Result<()> {
        self.instance_mut(index)?.calculate_root_log_likelihoods(
            buffer_indices,
            weights,
            state_frequencies,
            out_log_likelihoods,
        )
    }

    /// Forward [`BeagleImpl::calculate_edge_log_likelihoods`] to the instance at `index`.
    ///
    /// # Errors
    /// Returns [`Error::UninitializedInstance`] for an unknown index, otherwise the
    /// implementation's result.
    #[allow(clippy::too_many_arguments)]
    pub fn calculate_edge_log_likelihoods(
        &mut self,
        index: usize,
        parent_buffer_indices: &[usize],
        child_buffer_indices: &[usize],
        probability_indices: &[usize],
        first_derivative_indices: &[usize],
        second_derivative_indices: &[usize],
        weights: &[f64],
        state_frequencies: &[f64],
        out_log_likelihoods: &mut [f64],
        out_first_derivatives: &mut [f64],
        out_second_derivatives: &mut [f64],
    ) -> Result<()> {
        self.instance_mut(index)?.calculate_edge_log_likelihoods(
            parent_buffer_indices,
            child_buffer_indices,
            probability_indices,
            first_derivative_indices,
            second_derivative_indices,
            weights,
            state_frequencies,
            out_log_likelihoods,
            out_first_derivatives,
            out_second_derivatives,
        )
    }

    fn for_each_instance<F>(&mut self, indices: &[usize], mut operation: F) -> Result<()>
    where
        F: FnMut(&mut dyn BeagleImpl) -> Result<()>,
    {
        let mut outcome = Ok(());
        for &index in indices {
            if let Err(error) = operation(self.instance_mut(index)?) {
                outcome = Err(error);
            }
        }
        outcome
    }
}
