/// A 2D vector used for position, velocity and steering
///
/// The named methods (`add`, `subtract`, `scale`, ...) mutate in place. There is
/// no `Add` operator impl, so `v.add(w)` always resolves to the in-place method.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn add(&mut self, other: Vector2D) {
        self.x += other.x;
        self.y += other.y;
    }

    pub fn subtract(&mut self, other: Vector2D) {
        self.x -= other.x;
        self.y -= other.y;
    }

    pub fn scale(&mut self, scalar: f64) {
        self.x *= scalar;
        self.y *= scalar;
    }

    /// Callers must not pass zero.
    pub fn divide(&mut self, scalar: f64) {
        self.x /= scalar;
        self.y /= scalar;
    }

    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Scales to unit length. The zero vector has no direction and is left as is.
    pub fn normalize(&mut self) {
        let mag = self.magnitude();
        if mag > 0.0 {
            self.x /= mag;
            self.y /= mag;
        }
    }

    /// Rescales to exactly `target` length, keeping direction. No-op on the zero vector.
    pub fn set_magnitude(&mut self, target: f64) {
        if self.magnitude_squared() > 0.0 {
            self.normalize();
            self.scale(target);
        }
    }

    /// Clamps the length to `max`, keeping direction.
    pub fn limit(&mut self, max: f64) {
        let mag_sq = self.magnitude_squared();
        if mag_sq > max * max {
            self.divide(mag_sq.sqrt());
            self.scale(max);
        }
    }

    pub fn distance(&self, other: &Vector2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl std::ops::Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl std::ops::Div<f64> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl std::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl std::ops::SubAssign for Vector2D {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}
