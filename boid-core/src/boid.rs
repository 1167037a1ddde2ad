use boid_shared::{AgentView, Position};
use rand::Rng;

use crate::config::{EdgeMode, FlockConfig, ForceCombination};
use crate::vector::Vector2D;

/// Rotation applied to the travel angle so an up-pointing sprite faces forward.
pub const HEADING_OFFSET: f64 = std::f64::consts::FRAC_PI_2;

/// A single boid entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
}

impl Boid {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector2D::zero(),
        }
    }

    /// Uniform position inside the world and uniform velocity in
    /// `[-max_force, max_force]` per axis, never exactly zero.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64, max_force: f64) -> Self {
        let position = Vector2D::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
        let velocity = loop {
            let v = Vector2D::new(
                rng.gen_range(-max_force..=max_force),
                rng.gen_range(-max_force..=max_force),
            );
            if v.magnitude_squared() > 0.0 {
                break v;
            }
        };
        Self::new(position, velocity)
    }

    pub fn apply_force(&mut self, force: Vector2D) {
        self.acceleration.add(force);
    }

    /// Moves by the current velocity, then folds in the acceleration.
    pub fn update(&mut self, max_speed: f64) {
        self.position.add(self.velocity);
        self.velocity.add(self.acceleration);
        self.velocity.limit(max_speed);
        self.acceleration = Vector2D::zero();
    }

    pub fn wrap_edges(&mut self, width: f64, height: f64, mode: EdgeMode) {
        match mode {
            EdgeMode::Teleport => {
                if self.position.x < 0.0 {
                    self.position.x = width;
                } else if self.position.x > width {
                    self.position.x = 0.0;
                }

                if self.position.y < 0.0 {
                    self.position.y = height;
                } else if self.position.y > height {
                    self.position.y = 0.0;
                }
            }
            EdgeMode::Modulo => {
                self.position.x = self.position.x.rem_euclid(width);
                self.position.y = self.position.y.rem_euclid(height);
            }
        }
    }

    /// Sprite rotation in radians for the current direction of travel.
    pub fn heading(&self) -> f64 {
        HEADING_OFFSET - (-self.velocity.y).atan2(self.velocity.x)
    }

    pub fn view(&self) -> AgentView {
        AgentView::new(
            Position::new(self.position.x, self.position.y),
            self.heading(),
        )
    }
}

/// The three rule outputs for one agent, before they are combined
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Steering {
    pub alignment: Vector2D,
    pub cohesion: Vector2D,
    pub separation: Vector2D,
}

impl Steering {
    pub fn combined(&self, combination: ForceCombination) -> Vector2D {
        let mut force = Vector2D::zero();
        force.add(self.alignment);
        force.add(self.cohesion);
        force.add(self.separation);
        if combination == ForceCombination::Average {
            force.divide(3.0);
        }
        force
    }
}

/// Rule evaluation for a single agent against the rest of the flock
pub mod behavior {
    use super::*;

    /// Per-rule sums and neighbor counts gathered in one pass over the flock.
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct Neighborhood {
        pub velocity_sum: Vector2D,
        pub alignment_count: usize,
        pub position_sum: Vector2D,
        pub cohesion_count: usize,
        pub push_sum: Vector2D,
        pub separation_count: usize,
    }

    /// Scans every agent except `flock[index]`.
    ///
    /// Co-located agents still count towards alignment and cohesion but are
    /// left out of separation, whose push is divided by the distance.
    pub fn scan(index: usize, flock: &[Boid], config: &FlockConfig) -> Neighborhood {
        let boid = &flock[index];
        let mut hood = Neighborhood::default();

        for (j, other) in flock.iter().enumerate() {
            if j == index {
                continue;
            }
            let d = boid.position.distance(&other.position);

            if d < config.alignment_radius {
                hood.alignment_count += 1;
                hood.velocity_sum.add(other.velocity);
            }
            if d < config.cohesion_radius {
                hood.cohesion_count += 1;
                hood.position_sum.add(other.position);
            }
            if d < config.separation_radius && d > 0.0 {
                hood.separation_count += 1;
                let mut diff = boid.position;
                diff.subtract(other.position);
                diff.divide(d);
                hood.push_sum.add(diff);
            }
        }

        hood
    }

    pub fn alignment(boid: &Boid, hood: &Neighborhood, config: &FlockConfig) -> Vector2D {
        if hood.alignment_count == 0 {
            return Vector2D::zero();
        }
        let mut steering = hood.velocity_sum;
        steering.divide(hood.alignment_count as f64);
        steering.set_magnitude(config.max_speed);
        steering.subtract(boid.velocity);
        steering.limit(config.max_force);
        steering
    }

    pub fn cohesion(boid: &Boid, hood: &Neighborhood, config: &FlockConfig) -> Vector2D {
        if hood.cohesion_count == 0 {
            return Vector2D::zero();
        }
        let mut steering = hood.position_sum;
        steering.divide(hood.cohesion_count as f64);
        steering.subtract(boid.position);
        steering.set_magnitude(config.max_speed);
        steering.subtract(boid.velocity);
        steering.set_magnitude(config.max_force * config.cohesion_scale);
        steering
    }

    pub fn separation(boid: &Boid, hood: &Neighborhood, config: &FlockConfig) -> Vector2D {
        if hood.separation_count == 0 {
            return Vector2D::zero();
        }
        let mut steering = hood.push_sum;
        steering.divide(hood.separation_count as f64);
        steering.set_magnitude(config.max_speed);
        steering.subtract(boid.velocity);
        steering.set_magnitude(config.max_force * config.separation_scale);
        steering
    }

    pub fn steering(index: usize, flock: &[Boid], config: &FlockConfig) -> Steering {
        let hood = scan(index, flock, config);
        let boid = &flock[index];
        Steering {
            alignment: alignment(boid, &hood, config),
            cohesion: cohesion(boid, &hood, config),
            separation: separation(boid, &hood, config),
        }
    }
}
