//! Arcade-style moving bodies: center position, velocity, acceleration,
//! per-body gravity, velocity caps and world-bounds clamping.
//!
//! Integration is semi-implicit Euler: velocity first, then position.

/// Axis-aligned bounding box in world units (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Aabb {
    /// Strict overlap test. Touching edges do not count as a contact.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// Rectangle the bodies live in, anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub width: f64,
    pub height: f64,
}

impl WorldBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Center x
    pub x: f64,
    /// Center y
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub velocity_x: f64,
    pub velocity_y: f64,
    pub acceleration_x: f64,
    pub acceleration_y: f64,
    /// Body gravity, added to acceleration every step
    pub gravity_y: f64,
    /// Absolute velocity caps per axis (None = uncapped)
    pub max_velocity: Option<(f64, f64)>,
    pub collide_world_bounds: bool,
    /// Immovable bodies are never pushed by contacts
    pub immovable: bool,
    /// Rendered upside down (top pipes)
    pub flip_y: bool,
}

impl Body {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            velocity_x: 0.0,
            velocity_y: 0.0,
            acceleration_x: 0.0,
            acceleration_y: 0.0,
            gravity_y: 0.0,
            max_velocity: None,
            collide_world_bounds: false,
            immovable: false,
            flip_y: false,
        }
    }

    pub fn with_velocity_x(mut self, velocity_x: f64) -> Self {
        self.velocity_x = velocity_x;
        self
    }

    pub fn with_gravity_y(mut self, gravity_y: f64) -> Self {
        self.gravity_y = gravity_y;
        self
    }

    pub fn with_max_velocity(mut self, max_x: f64, max_y: f64) -> Self {
        self.max_velocity = Some((max_x.abs(), max_y.abs()));
        self
    }

    pub fn with_world_bounds(mut self) -> Self {
        self.collide_world_bounds = true;
        self
    }

    pub fn immovable(mut self) -> Self {
        self.immovable = true;
        self
    }

    pub fn flipped_y(mut self) -> Self {
        self.flip_y = true;
        self
    }

    pub fn bounds(&self) -> Aabb {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        Aabb {
            left: self.x - half_w,
            top: self.y - half_h,
            right: self.x + half_w,
            bottom: self.y + half_h,
        }
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        self.bounds().intersects(&other.bounds())
    }

    /// True once the body's right edge has passed the left edge of the world.
    pub fn is_off_left(&self) -> bool {
        self.bounds().right < 0.0
    }

    /// Advance one step of `dt` seconds.
    pub fn step(&mut self, dt: f64, world: &WorldBounds) {
        self.velocity_x += self.acceleration_x * dt;
        self.velocity_y += (self.acceleration_y + self.gravity_y) * dt;

        if let Some((max_x, max_y)) = self.max_velocity {
            self.velocity_x = self.velocity_x.clamp(-max_x, max_x);
            self.velocity_y = self.velocity_y.clamp(-max_y, max_y);
        }

        self.x += self.velocity_x * dt;
        self.y += self.velocity_y * dt;

        if self.collide_world_bounds {
            self.clamp_to(world);
        }
    }

    /// Keep the body inside the world, zeroing velocity into the blocked edge.
    fn clamp_to(&mut self, world: &WorldBounds) {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;

        if self.x - half_w < 0.0 {
            self.x = half_w;
            self.velocity_x = self.velocity_x.max(0.0);
        } else if self.x + half_w > world.width {
            self.x = world.width - half_w;
            self.velocity_x = self.velocity_x.min(0.0);
        }

        if self.y - half_h < 0.0 {
            self.y = half_h;
            self.velocity_y = self.velocity_y.max(0.0);
        } else if self.y + half_h > world.height {
            self.y = world.height - half_h;
            self.velocity_y = self.velocity_y.min(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    fn world() -> WorldBounds {
        WorldBounds::new(800.0, 500.0)
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut body = Body::new(100.0, 100.0, 10.0, 10.0).with_gravity_y(1000.0);
        body.step(DT, &world());
        assert!(body.velocity_y > 0.0);
        assert!(body.y > 100.0);
    }

    #[test]
    fn test_velocity_capped() {
        let mut body = Body::new(100.0, 100.0, 10.0, 10.0)
            .with_gravity_y(1000.0)
            .with_max_velocity(0.0, 500.0);
        body.velocity_x = 40.0;
        for _ in 0..120 {
            body.step(DT, &world());
        }
        assert!(body.velocity_y <= 500.0);
        assert_eq!(body.velocity_x, 0.0);
    }

    #[test]
    fn test_upward_acceleration_overcomes_gravity() {
        let mut body = Body::new(100.0, 250.0, 10.0, 10.0).with_gravity_y(1000.0);
        body.acceleration_y = -5000.0;
        body.step(DT, &world());
        assert!(body.velocity_y < 0.0);
        assert!(body.y < 250.0);
    }

    #[test]
    fn test_world_bounds_clamp_floor() {
        let mut body = Body::new(100.0, 490.0, 32.0, 32.0)
            .with_gravity_y(1000.0)
            .with_world_bounds();
        body.velocity_y = 300.0;
        body.step(DT, &world());
        assert_eq!(body.y, 484.0);
        assert_eq!(body.velocity_y, 0.0);
    }

    #[test]
    fn test_world_bounds_clamp_ceiling() {
        let mut body = Body::new(100.0, 18.0, 32.0, 32.0).with_world_bounds();
        body.velocity_y = -500.0;
        body.step(DT, &world());
        assert_eq!(body.y, 16.0);
        assert_eq!(body.velocity_y, 0.0);
    }

    #[test]
    fn test_unbounded_body_leaves_world() {
        let mut body = Body::new(10.0, 100.0, 52.0, 320.0).with_velocity_x(-100.0);
        for _ in 0..60 {
            body.step(DT, &world());
        }
        assert!(body.x < 0.0);
        assert!(body.is_off_left());
    }

    #[test]
    fn test_constant_velocity_without_acceleration() {
        let mut body = Body::new(500.0, 100.0, 52.0, 320.0).with_velocity_x(-100.0);
        body.step(DT, &world());
        let after_one = body.x;
        body.step(DT, &world());
        let step_a = 500.0 - after_one;
        let step_b = after_one - body.x;
        assert!((step_a - step_b).abs() < 1e-9);
        assert!((body.velocity_x + 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = Body::new(0.0, 0.0, 10.0, 10.0);
        let touching = Body::new(10.0, 0.0, 10.0, 10.0);
        let overlapping = Body::new(9.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&overlapping));
    }

    #[test]
    fn test_aabb_contains_point() {
        let b = Body::new(50.0, 50.0, 20.0, 20.0).bounds();
        assert!(b.contains_point(50.0, 50.0));
        assert!(b.contains_point(40.0, 40.0));
        assert!(!b.contains_point(60.0, 50.0));
    }
}
