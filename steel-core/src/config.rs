//! Simulation configuration, read from a JSON5 file.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use steel_registry::fluid::vanilla;
use steel_registry::{FluidRegistry, FluidType, RegistryError};
use thiserror::Error;

const DEFAULT_CONFIG: &str = include_str!("../../package-content/steel_fluid.json5");

/// Errors raised while loading or applying the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("config i/o failed: {0}")]
    Io(#[from] io::Error),
    /// The file is not valid JSON5 for this schema.
    #[error("config is malformed: {0}")]
    Parse(#[from] serde_json5::Error),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(&'static str),
    /// The liquid types could not be registered.
    #[error("failed to register liquids: {0}")]
    Registry(#[from] RegistryError),
}

/// Bounds and budgets of the simulated world.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Lowest y coordinate that can hold anything.
    pub min_y: i32,
    /// Number of block layers above `min_y`.
    pub height: u32,
    /// Scheduled updates processed per world tick; the rest wait.
    pub max_updates_per_tick: usize,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            min_y: -64,
            height: 384,
            max_updates_per_tick: 65_536,
        }
    }
}

/// Tuning of one liquid type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FluidTuning {
    /// Ticks between scheduled updates.
    pub tick_rate: u32,
    /// Decay gained per block of horizontal spread.
    pub flow_decay_per_block: u8,
    /// Whether two adjacent sources over a floor form a new source.
    pub source_conversion: bool,
}

impl FluidTuning {
    fn of(fluid: &FluidType) -> Self {
        Self {
            tick_rate: fluid.tick_rate,
            flow_decay_per_block: fluid.flow_decay_per_block,
            source_conversion: fluid.source_conversion,
        }
    }

    fn apply(self, fluid: FluidType) -> FluidType {
        FluidType {
            tick_rate: self.tick_rate,
            flow_decay_per_block: self.flow_decay_per_block,
            source_conversion: self.source_conversion,
            ..fluid
        }
    }

    fn validate(self, fluid: FluidType) -> Result<(), &'static str> {
        self.apply(fluid).validate_tuning()
    }
}

/// Tuning for every configured liquid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FluidSettings {
    /// Water tuning.
    pub water: FluidTuning,
    /// Lava tuning.
    pub lava: FluidTuning,
}

impl Default for FluidSettings {
    fn default() -> Self {
        Self {
            water: FluidTuning::of(&vanilla::WATER),
            lava: FluidTuning::of(&vanilla::LAVA),
        }
    }
}

/// The whole simulation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// World bounds and budgets.
    pub world: WorldSettings,
    /// Liquid tuning.
    pub fluids: FluidSettings,
    /// World ticks the driver runs.
    pub simulation_ticks: u64,
    /// Default log filter, overridden by `RUST_LOG`.
    pub log_level: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world: WorldSettings::default(),
            fluids: FluidSettings::default(),
            simulation_ticks: 600,
            log_level: "info".to_string(),
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a JSON5 document.
    pub fn from_json5(source: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json5::from_str(source)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Loads the config at `path`, writing the commented default there first
    /// if it does not exist yet.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let config_str = fs::read_to_string(path)?;
            return Self::from_json5(&config_str);
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_CONFIG)?;
        log::info!("Wrote default config to {}", path.display());
        Self::from_json5(DEFAULT_CONFIG)
    }

    /// Checks every value is in range.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.world.height == 0 {
            return Err("World height must be at least 1");
        }
        if self.world.max_updates_per_tick == 0 {
            return Err("Max updates per tick must be at least 1");
        }
        self.fluids.water.validate(vanilla::WATER)?;
        self.fluids.lava.validate(vanilla::LAVA)?;
        Ok(())
    }

    /// Builds a frozen registry of the vanilla liquids with this tuning applied.
    pub fn build_registry(&self) -> Result<FluidRegistry, ConfigError> {
        let mut registry = FluidRegistry::new();
        registry.register(self.fluids.water.apply(vanilla::WATER))?;
        registry.register(self.fluids.lava.apply(vanilla::LAVA))?;
        registry.freeze();
        Ok(registry)
    }
}
