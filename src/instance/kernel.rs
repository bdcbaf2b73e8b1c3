//! GPU kernel tuning parameters.
//!
//! A [`KernelResource`] bundles the compiled kernel source with the block sizes it was
//! tuned for. GPU implementations keep one template per state count and hand each new
//! instance its own clone, so per-instance adjustments (for example the pattern count)
//! never leak back into the template.

/// Kernel source and launch geometry for one padded state count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KernelResource {
    /// State count after padding to the kernel's vector width
    pub padded_state_count: usize,
    /// Kernel source code
    pub kernel_code: String,
    /// Patterns processed per thread block
    pub pattern_block_size: usize,
    /// Matrix rows processed per thread block
    pub matrix_block_size: usize,
    /// Peeling size for the partials kernels
    pub block_peeling_size: usize,
    /// Whether rescaling uses the slow path
    pub slow_reweighing: bool,
    /// Block size of the matrix multiply kernels
    pub multiply_block_size: usize,
    /// Number of rate categories
    pub category_count: usize,
    /// Number of site patterns
    pub pattern_count: usize,
}

impl KernelResource {
    /// Create a kernel resource from its tuning parameters.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        padded_state_count: usize,
        kernel_code: impl Into<String>,
        pattern_block_size: usize,
        matrix_block_size: usize,
        block_peeling_size: usize,
        slow_reweighing: bool,
        multiply_block_size: usize,
        category_count: usize,
        pattern_count: usize,
    ) -> Self {
        KernelResource {
            padded_state_count,
            kernel_code: kernel_code.into(),
            pattern_block_size,
            matrix_block_size,
            block_peeling_size,
            slow_reweighing,
            multiply_block_size,
            category_count,
            pattern_count,
        }
    }
}
