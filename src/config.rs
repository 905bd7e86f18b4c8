use crate::physics::integrators::{IntegratorRegistry, RegistryError};
use crate::physics::math::Scalar;
use crate::physics::parameters::Parameters;
use crate::simulation::{DEFAULT_TIME_STEP, Simulation, SimulationError};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Prefix of environment overrides, e.g. `SPRINGMASS_PHYSICS__TIME_STEP=0.008`
pub const ENV_PREFIX: &str = "SPRINGMASS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration that cannot be turned into a runnable simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SetupError {
    #[error(transparent)]
    UnknownIntegrator(#[from] RegistryError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub rendering: RenderingConfig,
    pub chart: ChartConfig,
    pub controls: ControlsConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub parameters: Parameters,
    /// Fixed integration step in seconds
    pub time_step: Scalar,
    pub integrator: String,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            parameters: Parameters::default(),
            time_step: DEFAULT_TIME_STEP,
            integrator: "semi_implicit_euler".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RenderingConfig {
    pub pixels_per_meter: f32,
    pub schematic_width: f32,
    pub schematic_height: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            pixels_per_meter: 100.0,
            schematic_width: 600.0,
            schematic_height: 200.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f32,
    pub height: f32,
    pub show_velocity: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 220.0,
            show_velocity: true,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ControlsConfig {
    /// Increment of the parameter -/+ buttons
    pub parameter_step: Scalar,
    pub font_size: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            parameter_step: 0.1,
            font_size: 12.0,
        }
    }
}

impl SimulationConfig {
    /// Layers defaults, then the TOML file at `path` (if given), then
    /// `SPRINGMASS_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_layers(path, None)
    }

    /// `environment` replaces the process environment when given
    fn load_layers(
        path: Option<&Path>,
        environment: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let defaults = toml::to_string(&Self::default())?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults,
            config::FileFormat::Toml,
        ));

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(environment),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Load configuration from a file, falling back to defaults if it can't be read
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(Some(path)) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config file {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Load the per-user config file if there is one
    pub fn load_from_user_config() -> Self {
        match Self::user_config_path() {
            Some(path) if path.exists() => {
                info!("Loading configuration from {}", path.display());
                Self::load_or_default(path)
            }
            _ => Self::load(None).unwrap_or_else(|e| {
                warn!("Ignoring environment overrides: {e}");
                Self::default()
            }),
        }
    }

    /// `config.toml` in the platform's config directory for springmass
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "springmass")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Resolves the configured integrator and builds an idle simulation
    pub fn build_simulation(
        &self,
        registry: &IntegratorRegistry,
    ) -> Result<Simulation, SetupError> {
        let integrator = registry.create(&self.physics.integrator)?;
        Ok(Simulation::new(
            self.physics.parameters,
            integrator,
            self.physics.time_step,
        )?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
