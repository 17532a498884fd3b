use rustc_hash::FxHashMap;
use thiserror::Error;

use super::{FluidId, FluidType, vanilla};

/// Errors raised while building a [`FluidRegistry`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry was frozen before the registration.
    #[error("cannot register fluid {0} after the registry is frozen")]
    Frozen(&'static str),
    /// Another type already uses the id.
    #[error("fluid id {id:?} is already registered by {existing}")]
    DuplicateId {
        /// The contested id.
        id: FluidId,
        /// The type already holding it.
        existing: &'static str,
    },
    /// The tuning cannot drive the simulation.
    #[error("fluid {key} has invalid tuning: {reason}")]
    InvalidTuning {
        /// The rejected type.
        key: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Lookup table from liquid id (and name) to tuning values.
#[derive(Debug, Clone)]
pub struct FluidRegistry {
    by_id: FxHashMap<FluidId, FluidType>,
    by_name: FxHashMap<&'static str, FluidId>,
    allows_registering: bool,
}

impl FluidRegistry {
    /// Creates an empty, unfrozen registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_id: FxHashMap::default(),
            by_name: FxHashMap::default(),
            allows_registering: true,
        }
    }

    /// A frozen registry holding vanilla water and lava.
    #[must_use]
    pub fn vanilla() -> Self {
        let mut registry = Self::new();
        registry.by_name.insert(vanilla::WATER.key, vanilla::WATER.id);
        registry.by_id.insert(vanilla::WATER.id, vanilla::WATER);
        registry.by_name.insert(vanilla::LAVA.key, vanilla::LAVA.id);
        registry.by_id.insert(vanilla::LAVA.id, vanilla::LAVA);
        registry.freeze();
        registry
    }

    /// Registers a liquid type.
    pub fn register(&mut self, fluid: FluidType) -> Result<(), RegistryError> {
        if !self.allows_registering {
            return Err(RegistryError::Frozen(fluid.key));
        }
        if let Some(existing) = self.by_id.get(&fluid.id) {
            return Err(RegistryError::DuplicateId {
                id: fluid.id,
                existing: existing.key,
            });
        }
        fluid
            .validate_tuning()
            .map_err(|reason| RegistryError::InvalidTuning {
                key: fluid.key,
                reason,
            })?;
        log::debug!("Registered fluid {} as {:?}", fluid.key, fluid.id);
        self.by_name.insert(fluid.key, fluid.id);
        self.by_id.insert(fluid.id, fluid);
        Ok(())
    }

    /// Stops further registrations.
    pub fn freeze(&mut self) {
        self.allows_registering = false;
    }

    /// Looks up the tuning for a liquid id.
    #[must_use]
    pub fn get(&self, id: FluidId) -> Option<&FluidType> {
        self.by_id.get(&id)
    }

    /// Looks up a liquid id by its namespaced name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<FluidId> {
        self.by_name.get(name).copied()
    }

    /// Iterates over every registered type, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &FluidType> {
        self.by_id.values()
    }
}

impl Default for FluidRegistry {
    fn default() -> Self {
        Self::new()
    }
}
