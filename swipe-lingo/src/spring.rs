use std::time::Duration;

const MAX_STEP: f32 = 1.0 / 240.0;
const REST_DELTA: f32 = 0.5;
const REST_SPEED: f32 = 0.5;

/// Damped spring pulling a card back to its rest position at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    pub position: f32,
    pub velocity: f32,
}

impl Spring {
    /// The card's return-to-centre spring.
    pub fn card(position: f32, velocity: f32) -> Self {
        Self {
            stiffness: 200.0,
            damping: 30.0,
            mass: 1.0,
            position,
            velocity,
        }
    }

    /// Advances the simulation, integrating in small fixed steps so large
    /// frame gaps stay stable.
    pub fn step(&mut self, elapsed: Duration) {
        let mut remaining = elapsed.as_secs_f32();
        while remaining > 0.0 {
            let dt = remaining.min(MAX_STEP);
            let force = -self.stiffness * self.position - self.damping * self.velocity;
            self.velocity += force / self.mass * dt;
            self.position += self.velocity * dt;
            remaining -= dt;
        }
        if self.is_settled() {
            self.position = 0.0;
            self.velocity = 0.0;
        }
    }

    pub fn is_settled(&self) -> bool {
        self.position.abs() < REST_DELTA && self.velocity.abs() < REST_SPEED
    }
}
