//! Spring physics
//!
//! RK4-integrated damped spring. Card timing curves drive a unit spring
//! (0 to 1) configured from a damping ratio and the animation duration.

/// Configuration for a spring
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Unit-mass spring with the given damping ratio that settles to within
    /// 0.25% of its target after `settle_secs`
    pub fn from_damping_ratio(damping_ratio: f32, settle_secs: f32) -> Self {
        let ratio = damping_ratio.max(0.05);
        // Envelope e^(-ratio * omega * t) reaches e^-6 at the settle time
        let omega = 6.0 / (ratio * settle_secs.max(f32::EPSILON));
        Self {
            stiffness: omega * omega,
            damping: 2.0 * ratio * omega,
            mass: 1.0,
        }
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Ratio of the damping to critical damping
    pub fn damping_ratio(&self) -> f32 {
        self.damping / self.critical_damping()
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }
}

impl Default for SpringConfig {
    /// Damping ratio 0.8 settling in 0.4s
    fn default() -> Self {
        Self::from_damping_ratio(0.8, 0.4)
    }
}

/// A spring-driven value
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
    epsilon: f32,
    velocity_epsilon: f32,
}

impl Spring {
    /// Spring in point units: settles within 0.5pt and 5pt/s
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self::with_tolerance(config, initial, 0.5, 5.0)
    }

    /// Spring over a normalized 0..1 range
    pub fn unit(config: SpringConfig) -> Self {
        Self::with_tolerance(config, 0.0, 1e-4, 1e-3)
    }

    pub fn with_tolerance(
        config: SpringConfig,
        initial: f32,
        epsilon: f32,
        velocity_epsilon: f32,
    ) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
            epsilon,
            velocity_epsilon,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Check if the spring has settled (within epsilon of target with minimal velocity)
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < self.epsilon
            && self.velocity.abs() < self.velocity_epsilon
    }

    /// Step the spring simulation using RK4 integration
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }

        let k1_v = self.acceleration(self.value, self.velocity);
        let k1_x = self.velocity;

        let k2_v = self.acceleration(
            self.value + k1_x * dt * 0.5,
            self.velocity + k1_v * dt * 0.5,
        );
        let k2_x = self.velocity + k1_v * dt * 0.5;

        let k3_v = self.acceleration(
            self.value + k2_x * dt * 0.5,
            self.velocity + k2_v * dt * 0.5,
        );
        let k3_x = self.velocity + k2_v * dt * 0.5;

        let k4_v = self.acceleration(self.value + k3_x * dt, self.velocity + k3_v * dt);
        let k4_x = self.velocity + k3_v * dt;

        self.velocity += (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
        self.value += (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_settles_to_target() {
        let mut spring = Spring::new(SpringConfig::new(400.0, 30.0, 1.0), 0.0);
        spring.set_target(100.0);

        // Simulate for 2 seconds at 60fps
        for _ in 0..120 {
            spring.step(1.0 / 60.0);
        }

        assert!(spring.is_settled());
        assert!((spring.value() - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_damping_ratio_round_trips() {
        let config = SpringConfig::from_damping_ratio(0.8, 0.4);
        assert!((config.damping_ratio() - 0.8).abs() < 1e-4);
        assert!(config.is_underdamped());
        assert_eq!(SpringConfig::default(), config);
    }

    #[test]
    fn test_unit_spring_settles_within_duration() {
        let mut spring = Spring::unit(SpringConfig::from_damping_ratio(0.8, 0.4));
        spring.set_target(1.0);
        spring.set_velocity(0.4);

        for _ in 0..96 {
            spring.step(1.0 / 240.0);
        }

        assert!((spring.value() - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_spring_rk4_stability() {
        let mut spring = Spring::new(SpringConfig::new(400.0, 30.0, 1.0), 0.0);
        spring.set_target(1000.0);

        for _ in 0..100 {
            spring.step(0.1);
            assert!(spring.value() < 2000.0);
            assert!(spring.value() > -500.0);
        }
    }
}
