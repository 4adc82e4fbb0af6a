//! Base particle state
//!
//! A particle is one animated shape instance: center position, velocity
//! with per-axis variance, a radius/opacity/lifespan bundle, and the flags
//! controlling how those advance. Two time domains exist:
//!
//! - **free-running** ([`Particle::step`]): the particle integrates its own
//!   velocity once per call and decays while killed
//! - **driven** ([`Particle::drive`]): the host hands in a normalized time
//!   value each frame and the particle is a pure function of it
//!
//! Both shipped wave styles run driven. Neither path can fail; degenerate
//! geometry (negative radius, zero lifespan) just reads as dead.

use pulse_core::{Point, Rect, Vec2};

use crate::blend::BlendColor;

/// Lifespan used when none is configured, in seconds
pub const DEFAULT_LIFE_TIME: f32 = 5.0;

/// Per-frame decay step numerator (one 60Hz frame)
const DECAY_FRAME_STEP: f32 = 0.016;

/// One animated shape instance
#[derive(Clone, Debug)]
pub struct Particle {
    /// Center position
    pub center: Point,
    /// Current velocity
    pub velocity: Vec2,
    /// Per-axis velocity variance, added on every advance
    pub variance: Vec2,
    /// Optional position target; when set, driven mode steers toward it
    pub target: Option<Point>,
    /// Radius scale reached by the last driven advance
    pub radius_ratio: f32,
    /// Radius at full scale, captured when the radius is assigned
    pub actual_radius: f32,
    /// Current radius
    pub radius: f32,
    /// Spacing between this particle and its neighbors
    pub spacing: f32,
    /// Opacity in [0, 1]
    pub opacity: f32,
    /// Remaining lifespan in [0, 1]
    pub life_span: f32,
    /// Lifespan lost per decay step while killed
    pub decay: f32,
    /// Whether the particle is shown at all
    pub visible: bool,
    /// Whether the particle is winding down
    pub killed: bool,
    /// Whether driven mode writes opacity from time
    pub fade: bool,
    /// Whether driven mode scales radius from time
    pub shrink: bool,
    /// Whether liveness requires staying inside the bounds
    pub check_bounds: bool,
    /// Forces liveness regardless of every other field; continuous-repeat
    /// waves rely on external slot clearing instead of self-reported death
    pub always_alive: bool,
    /// The particle's own color
    pub color: BlendColor,
    /// The effect's shared bounds, used only for lifetime culling
    pub bounds: Option<Rect>,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            center: Point::ZERO,
            velocity: Vec2::ZERO,
            variance: Vec2::ZERO,
            target: None,
            radius_ratio: 0.0,
            actual_radius: 0.0,
            radius: 0.0,
            spacing: 0.0,
            opacity: 1.0,
            life_span: 1.0,
            decay: 0.0,
            visible: false,
            killed: false,
            fade: true,
            shrink: true,
            check_bounds: false,
            always_alive: false,
            color: BlendColor::default(),
            bounds: None,
        }
    }
}

impl Particle {
    /// Create a particle with a finite lifespan
    pub fn new(
        life_time: f32,
        center: Point,
        radius: f32,
        color: BlendColor,
        bounds: Option<Rect>,
    ) -> Self {
        Self {
            center,
            radius,
            actual_radius: radius,
            decay: DECAY_FRAME_STEP / life_time,
            color,
            bounds,
            ..Default::default()
        }
    }

    /// Set the velocity (builder style)
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the per-axis variance (builder style)
    pub fn with_variance(mut self, variance: Vec2) -> Self {
        self.variance = variance;
        self
    }

    /// Assign the radius, capturing it as the full-scale radius too
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
        self.actual_radius = radius;
    }

    /// Re-derive the decay step from a lifespan
    pub fn set_life_time(&mut self, life_time: f32) {
        self.decay = DECAY_FRAME_STEP / life_time;
    }

    /// Free-running advance: integrate velocity, decay while killed
    pub fn step(&mut self) {
        self.center.x += self.velocity.x + self.variance.x;
        self.center.y += self.velocity.y + self.variance.y;

        if self.killed {
            self.life_span -= self.decay;
        }
    }

    /// Driven advance as a function of normalized time
    ///
    /// With a target set, velocity is re-derived each frame so the
    /// particle homes in over the full duration. Shrink scales the radius
    /// from the captured full-scale value; fade writes opacity from time
    /// unless the particle is winding down, in which case the lifespan
    /// decays instead.
    pub fn drive(&mut self, duration: f32, time: f32) {
        if let Some(target) = self.target {
            self.velocity.x = (target.x - self.center.x) / duration;
            self.velocity.y = (target.y - self.center.y) / duration;
        }

        self.center.x += (self.velocity.x + self.variance.x) * time;
        self.center.y += (self.velocity.y + self.variance.y) * time;

        if self.shrink {
            self.radius_ratio = time;
            self.radius = self.actual_radius * self.radius_ratio;
        }

        if self.killed {
            self.life_span -= self.decay * time;
        } else if self.fade {
            self.opacity = time;
        }
    }

    /// Squared center distance to another particle
    pub fn distance_sq_to(&self, other: &Particle) -> f32 {
        self.center.distance_sq(other.center)
    }

    /// Whether the particle still participates in the effect
    ///
    /// Bounds culling uses a `radius * 2` margin so shapes leave the
    /// visible region entirely before dying. `always_alive` overrides
    /// everything.
    pub fn is_alive(&self) -> bool {
        if self.always_alive {
            return true;
        }

        match self.bounds {
            Some(bounds) => {
                (!self.check_bounds
                    || bounds.contains_with_margin(self.center, self.radius * 2.0))
                    && self.life_span > 0.0
                    && self.radius > 0.0
                    && self.opacity > 0.0
            }
            None => self.life_span > 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle() -> Particle {
        Particle::new(
            DEFAULT_LIFE_TIME,
            Point::new(50.0, 50.0),
            10.0,
            BlendColor::from_packed(0xFFFFFFFF),
            Some(Rect::new(0.0, 0.0, 100.0, 100.0)),
        )
    }

    #[test]
    fn test_new_captures_actual_radius_and_decay() {
        let p = particle();
        assert!((p.actual_radius - 10.0).abs() < 1e-6);
        assert!((p.decay - 0.016 / 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_step_integrates_velocity_and_variance() {
        let mut p = particle()
            .with_velocity(Vec2::new(2.0, -1.0))
            .with_variance(Vec2::new(0.5, 0.5));
        p.step();
        assert!((p.center.x - 52.5).abs() < 1e-6);
        assert!((p.center.y - 49.5).abs() < 1e-6);
    }

    #[test]
    fn test_step_decays_only_when_killed() {
        let mut p = particle();
        p.step();
        assert!((p.life_span - 1.0).abs() < 1e-6);
        p.killed = true;
        p.step();
        assert!(p.life_span < 1.0);
    }

    #[test]
    fn test_drive_scales_radius_and_opacity() {
        let mut p = particle();
        p.drive(1000.0, 0.5);
        assert!((p.radius - 5.0).abs() < 1e-6);
        assert!((p.radius_ratio - 0.5).abs() < 1e-6);
        assert!((p.opacity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_drive_steers_toward_target() {
        let mut p = particle();
        p.target = Some(Point::new(150.0, 50.0));
        p.drive(100.0, 1.0);
        // velocity = (150 - 50) / 100 = 1, advanced by t = 1
        assert!((p.center.x - 51.0).abs() < 1e-6);
        assert!((p.center.y - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_drive_killed_decays_instead_of_fading() {
        let mut p = particle();
        p.killed = true;
        p.opacity = 0.8;
        p.drive(1000.0, 1.0);
        assert!((p.opacity - 0.8).abs() < 1e-6);
        assert!(p.life_span < 1.0);
    }

    #[test]
    fn test_is_alive_without_bounds_checks_lifespan_only() {
        let mut p = particle();
        p.bounds = None;
        p.radius = 0.0;
        p.opacity = 0.0;
        assert!(p.is_alive());
        p.life_span = 0.0;
        assert!(!p.is_alive());
    }

    #[test]
    fn test_is_alive_requires_geometry_with_bounds() {
        let mut p = particle();
        p.opacity = 0.0;
        assert!(!p.is_alive());

        let mut p = particle();
        p.radius = 0.0;
        assert!(!p.is_alive());
    }

    #[test]
    fn test_bounds_culling_uses_double_radius_margin() {
        let mut p = particle();
        p.check_bounds = true;
        p.radius = 10.0;
        // Margin is radius * 2 = 20; just inside the expanded bounds.
        p.center = Point::new(119.9, 50.0);
        assert!(p.is_alive());
        p.center = Point::new(120.0, 50.0);
        assert!(!p.is_alive());
    }

    #[test]
    fn test_always_alive_overrides_everything() {
        let mut p = particle();
        p.always_alive = true;
        p.opacity = 0.0;
        p.radius = 0.0;
        p.life_span = 0.0;
        p.check_bounds = true;
        p.center = Point::new(-500.0, -500.0);
        assert!(p.is_alive());
    }

    #[test]
    fn test_distance_sq_to() {
        let mut a = particle();
        let mut b = particle();
        a.center = Point::new(0.0, 0.0);
        b.center = Point::new(3.0, 4.0);
        assert!((a.distance_sq_to(&b) - 25.0).abs() < 1e-6);
    }
}
