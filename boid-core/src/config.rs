use serde::{Deserialize, Serialize};

use crate::error::FlockError;

pub const DEFAULT_AGENT_COUNT: usize = 75;
pub const DEFAULT_WORLD_WIDTH: f64 = 1000.0;
pub const DEFAULT_WORLD_HEIGHT: f64 = 1000.0;
pub const DEFAULT_SEED: u64 = 3_600_000;

/// How the three steering forces are folded into an agent's acceleration.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ForceCombination {
    /// Sum of the three forces divided by three.
    #[default]
    Average,
    /// Plain sum of the three forces.
    Sum,
}

/// Which state each agent sees while the flock is being stepped.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Agents update one after another; later agents see earlier agents' new state.
    #[default]
    InPlace,
    /// Every agent steers from the same pre-tick state, then all integrate.
    Snapshot,
}

/// What happens to an agent that leaves the world rectangle.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    /// Jump to the opposite edge exactly (`x < 0` becomes `width`, `x > width` becomes `0`).
    #[default]
    Teleport,
    /// Carry the overshoot across the edge (`x.rem_euclid(width)`).
    Modulo,
}

/// Behavioural tunables shared by every agent in the flock.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockConfig {
    /// Upper bound on a steering force.
    pub max_force: f64,
    /// Upper bound on agent speed.
    pub max_speed: f64,
    pub alignment_radius: f64,
    pub cohesion_radius: f64,
    pub separation_radius: f64,
    /// Separation steering length as a multiple of `max_force`.
    pub separation_scale: f64,
    /// Cohesion steering length as a multiple of `max_force`.
    pub cohesion_scale: f64,
    pub combination: ForceCombination,
    pub update_mode: UpdateMode,
    pub edge_mode: EdgeMode,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            max_force: 1.0,
            max_speed: 4.0,
            alignment_radius: 75.0,
            cohesion_radius: 100.0,
            separation_radius: 50.0,
            separation_scale: 1.2,
            cohesion_scale: 1.0,
            combination: ForceCombination::Average,
            update_mode: UpdateMode::InPlace,
            edge_mode: EdgeMode::Teleport,
        }
    }
}

impl FlockConfig {
    pub fn validate(&self) -> Result<(), FlockError> {
        let params = [
            ("max_force", self.max_force),
            ("max_speed", self.max_speed),
            ("alignment_radius", self.alignment_radius),
            ("cohesion_radius", self.cohesion_radius),
            ("separation_radius", self.separation_radius),
            ("separation_scale", self.separation_scale),
            ("cohesion_scale", self.cohesion_scale),
        ];
        for (name, value) in params {
            if !(value.is_finite() && value > 0.0) {
                return Err(FlockError::InvalidParameter { name, value });
            }
        }
        // Initial velocities are drawn from `-max_force..=max_force`, whose width must be finite.
        if !(2.0 * self.max_force).is_finite() {
            return Err(FlockError::InvalidParameter {
                name: "max_force",
                value: self.max_force,
            });
        }
        Ok(())
    }
}

/// Everything needed to build a `FlockSimulation`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Deterministic seed for initial placement.
    pub seed: u64,
    pub agent_count: usize,
    pub world_width: f64,
    pub world_height: f64,
    pub flock: FlockConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            agent_count: DEFAULT_AGENT_COUNT,
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            flock: FlockConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, FlockError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!(
            "Loaded simulation config: {} agents in {}x{} world",
            config.agent_count,
            config.world_width,
            config.world_height
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FlockError> {
        validate_world(self.world_width, self.world_height)?;
        self.flock.validate()
    }
}

pub(crate) fn validate_world(width: f64, height: f64) -> Result<(), FlockError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(FlockError::InvalidWorldSize { width, height })
    }
}
