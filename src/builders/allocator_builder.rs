//! Builders to construct allocators from configuration.

use crate::config::AllocatorConfig;
use crate::core::{AllocationError, Allocator, EvictionPolicy};

/// Build an allocator from configuration, validating it first.
pub fn build_allocator(cfg: &AllocatorConfig) -> Result<Allocator, AllocationError> {
    cfg.validate()
        .map_err(|e| AllocationError::InvalidConfig(format!("config invalid: {e}")))?;
    Allocator::new(cfg.clone())
}

/// Fluent construction of an [`Allocator`].
#[derive(Debug, Clone, Default)]
pub struct AllocatorBuilder {
    config: AllocatorConfig,
}

impl AllocatorBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub const fn from_config(config: AllocatorConfig) -> Self {
        Self { config }
    }

    /// Start from environment variables (and `.env`).
    pub fn from_env() -> Result<Self, AllocationError> {
        AllocatorConfig::from_env()
            .map(Self::from_config)
            .map_err(AllocationError::InvalidConfig)
    }

    /// Configuration accumulated so far.
    pub const fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Minimum roster size.
    #[must_use]
    pub const fn slot_count(mut self, slot_count: usize) -> Self {
        self.config.slot_count = slot_count;
        self
    }

    /// Slots per squad.
    #[must_use]
    pub const fn squad_size(mut self, squad_size: usize) -> Self {
        self.config.squad_size = squad_size;
        self
    }

    /// Handling of lock-evicted signups.
    #[must_use]
    pub const fn eviction(mut self, policy: EvictionPolicy) -> Self {
        self.config.eviction = policy;
        self
    }

    /// Ceiling on resolver branches per invocation.
    #[must_use]
    pub const fn max_search_steps(mut self, steps: u64) -> Self {
        self.config.max_search_steps = Some(steps);
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<Allocator, AllocationError> {
        build_allocator(&self.config)
    }
}
