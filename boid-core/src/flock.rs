use boid_shared::{AgentView, FrameSnapshot};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::boid::{behavior, Boid};
use crate::config::{validate_world, FlockConfig, SimulationConfig, UpdateMode};
use crate::error::FlockError;
use crate::vector::Vector2D;

/// A fixed population of boids on a wrap-around plane.
///
/// `step` needs `&mut self`, so a renderer holding `&FlockSimulation` can only
/// read agents between ticks.
#[derive(Debug, Clone)]
pub struct FlockSimulation {
    boids: Vec<Boid>,
    config: FlockConfig,
    width: f64,
    height: f64,
    tick: u64,
}

impl FlockSimulation {
    /// Seeded random flock using the default tunables.
    pub fn initialize(
        agent_count: usize,
        width: f64,
        height: f64,
        seed: u64,
    ) -> Result<Self, FlockError> {
        Self::from_config(&SimulationConfig {
            seed,
            agent_count,
            world_width: width,
            world_height: height,
            flock: FlockConfig::default(),
        })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, FlockError> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let boids = (0..config.agent_count)
            .map(|_| {
                Boid::random(
                    &mut rng,
                    config.world_width,
                    config.world_height,
                    config.flock.max_force,
                )
            })
            .collect();

        log::debug!(
            "Initialized flock of {} boids in {}x{} world (seed {})",
            config.agent_count,
            config.world_width,
            config.world_height,
            config.seed
        );

        Ok(Self {
            boids,
            config: config.flock,
            width: config.world_width,
            height: config.world_height,
            tick: 0,
        })
    }

    /// Flock from hand-placed boids, for scenarios that need exact starting state.
    pub fn with_boids(
        boids: Vec<Boid>,
        width: f64,
        height: f64,
        config: FlockConfig,
    ) -> Result<Self, FlockError> {
        validate_world(width, height)?;
        config.validate()?;

        Ok(Self {
            boids,
            config,
            width,
            height,
            tick: 0,
        })
    }

    /// Advances every boid by one tick.
    pub fn step(&mut self) {
        match self.config.update_mode {
            UpdateMode::InPlace => self.step_in_place(),
            UpdateMode::Snapshot => self.step_snapshot(),
        }
        self.tick += 1;
        log::trace!("Flock tick {} complete", self.tick);
    }

    // Later boids see the already-updated state of earlier ones.
    fn step_in_place(&mut self) {
        let config = self.config;
        for i in 0..self.boids.len() {
            self.boids[i].wrap_edges(self.width, self.height, config.edge_mode);
            let force = behavior::steering(i, &self.boids, &config).combined(config.combination);
            let boid = &mut self.boids[i];
            boid.apply_force(force);
            boid.update(config.max_speed);
        }
    }

    fn step_snapshot(&mut self) {
        let config = self.config;
        for boid in self.boids.iter_mut() {
            boid.wrap_edges(self.width, self.height, config.edge_mode);
        }

        let forces: Vec<Vector2D> = (0..self.boids.len())
            .map(|i| behavior::steering(i, &self.boids, &config).combined(config.combination))
            .collect();

        for (boid, force) in self.boids.iter_mut().zip(forces) {
            boid.apply_force(force);
            boid.update(config.max_speed);
        }
    }

    /// Render view of every boid, in update order.
    pub fn agents(&self) -> impl Iterator<Item = AgentView> + '_ {
        self.boids.iter().map(Boid::view)
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            tick: self.tick,
            width: self.width,
            height: self.height,
            agents: self.agents().collect(),
        }
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Number of completed ticks.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EdgeMode;

    #[test]
    fn test_flock_creation() {
        let flock = FlockSimulation::initialize(50, 800.0, 600.0, 1).unwrap();
        assert_eq!(flock.len(), 50);
        assert_eq!(flock.width(), 800.0);
        assert_eq!(flock.height(), 600.0);
        assert_eq!(flock.tick(), 0);
        assert_eq!(flock.config(), &FlockConfig::default());
        for boid in flock.boids() {
            assert!(boid.position.x >= 0.0 && boid.position.x < 800.0);
            assert!(boid.position.y >= 0.0 && boid.position.y < 600.0);
            assert_eq!(boid.acceleration, Vector2D::zero());
        }
    }

    #[test]
    fn test_empty_flock_steps() {
        let mut flock = FlockSimulation::initialize(0, 100.0, 100.0, 1).unwrap();
        assert!(flock.is_empty());
        flock.step();
        assert_eq!(flock.tick(), 1);
        assert!(flock.snapshot().agents.is_empty());
    }

    #[test]
    fn test_invalid_world_rejected() {
        assert!(matches!(
            FlockSimulation::initialize(10, 0.0, 100.0, 1),
            Err(FlockError::InvalidWorldSize { .. })
        ));
        assert!(
            FlockSimulation::with_boids(Vec::new(), 100.0, f64::NAN, FlockConfig::default())
                .is_err()
        );
    }

    #[test]
    fn test_from_config_rejects_oversized_max_force() {
        let config = SimulationConfig {
            agent_count: 3,
            flock: FlockConfig {
                max_force: 1e308,
                ..FlockConfig::default()
            },
            ..SimulationConfig::default()
        };
        assert!(matches!(
            FlockSimulation::from_config(&config),
            Err(FlockError::InvalidParameter { name: "max_force", .. })
        ));
    }

    #[test]
    fn test_invalid_tunable_rejected() {
        let config = FlockConfig {
            max_speed: f64::NAN,
            ..FlockConfig::default()
        };
        assert!(matches!(
            FlockSimulation::with_boids(Vec::new(), 100.0, 100.0, config),
            Err(FlockError::InvalidParameter { name: "max_speed", .. })
        ));
    }

    #[test]
    fn test_flock_update() {
        let mut flock = FlockSimulation::initialize(10, 800.0, 600.0, 5).unwrap();
        let initial_positions: Vec<_> = flock.boids().iter().map(|b| b.position).collect();

        flock.step();

        // Every boid starts with a non-zero velocity, so every boid moves.
        for (boid, initial) in flock.boids().iter().zip(initial_positions.iter()) {
            assert_ne!(boid.position, *initial);
            assert_eq!(boid.acceleration, Vector2D::zero());
        }
        assert_eq!(flock.tick(), 1);
    }

    #[test]
    fn test_step_wraps_before_moving() {
        let boids = vec![Boid::new(Vector2D::new(105.0, 50.0), Vector2D::new(1.0, 0.0))];
        let mut flock =
            FlockSimulation::with_boids(boids, 100.0, 100.0, FlockConfig::default()).unwrap();

        flock.step();

        assert_eq!(flock.boids()[0].position, Vector2D::new(1.0, 50.0));
    }

    #[test]
    fn test_modulo_edges_in_step() {
        let config = FlockConfig {
            edge_mode: EdgeMode::Modulo,
            ..FlockConfig::default()
        };
        let boids = vec![Boid::new(Vector2D::new(105.0, 50.0), Vector2D::new(1.0, 0.0))];
        let mut flock = FlockSimulation::with_boids(boids, 100.0, 100.0, config).unwrap();

        flock.step();

        assert_eq!(flock.boids()[0].position, Vector2D::new(6.0, 50.0));
    }

    #[test]
    fn test_in_place_and_snapshot_modes_diverge() {
        // Two boids at rest one unit apart: in place, the second boid already
        // sees the first one's new velocity.
        let boids = vec![
            Boid::new(Vector2D::new(50.0, 50.0), Vector2D::zero()),
            Boid::new(Vector2D::new(51.0, 50.0), Vector2D::zero()),
        ];

        let mut in_place =
            FlockSimulation::with_boids(boids.clone(), 100.0, 100.0, FlockConfig::default())
                .unwrap();
        let snapshot_config = FlockConfig {
            update_mode: UpdateMode::Snapshot,
            ..FlockConfig::default()
        };
        let mut snapshot =
            FlockSimulation::with_boids(boids, 100.0, 100.0, snapshot_config).unwrap();

        in_place.step();
        snapshot.step();

        // Snapshot mode is symmetric: both push apart by the same amount.
        let a = snapshot.boids()[0].velocity;
        let b = snapshot.boids()[1].velocity;
        assert!(a.x < 0.0 && b.x > 0.0);
        assert!((a.x + b.x).abs() < 1e-12);

        // The first boid steers from the same state either way.
        assert_eq!(in_place.boids()[0].velocity, a);
        assert_ne!(in_place.boids()[1].velocity, b);
    }

    #[test]
    fn test_snapshot_matches_agents() {
        let mut flock = FlockSimulation::initialize(5, 200.0, 100.0, 3).unwrap();
        flock.step();
        flock.step();

        let frame = flock.snapshot();
        assert_eq!(frame.tick, 2);
        assert_eq!(frame.width, 200.0);
        assert_eq!(frame.height, 100.0);
        assert_eq!(frame.agents, flock.agents().collect::<Vec<_>>());
        for (view, boid) in frame.agents.iter().zip(flock.boids()) {
            assert_eq!(view.position.x, boid.position.x);
            assert_eq!(view.position.y, boid.position.y);
            assert_eq!(view.heading, boid.heading());
        }
    }
}
