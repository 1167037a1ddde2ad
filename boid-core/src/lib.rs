//! Boid flocking on a wrap-around plane.
//!
//! Each tick every agent scans the whole flock once, blends alignment,
//! cohesion and separation into an acceleration, and integrates it. Seeded
//! runs are reproducible. Rendering is left to the caller, which reads
//! [`FlockSimulation::agents`] between ticks.

pub mod boid;
pub mod config;
pub mod error;
pub mod flock;
pub mod vector;

pub use boid::{behavior, Boid, Steering, HEADING_OFFSET};
pub use boid_shared::{AgentView, FrameSnapshot, Position};
pub use config::{EdgeMode, FlockConfig, ForceCombination, SimulationConfig, UpdateMode};
pub use error::FlockError;
pub use flock::FlockSimulation;
pub use vector::Vector2D;
