use nalgebra::Vector2;

use crate::sim::{
    error::SimulationError,
    units::{Float, G},
};

/// Extra state carried by a spacecraft. Gravity does not look at it.
#[derive(Clone, Debug, PartialEq)]
pub struct CraftPayload {
    pub fuel: Float,
}

/// Displacement from a body to some point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Separation {
    pub delta: Vector2<Float>,
    pub magnitude: Float,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Force {
    pub components: Vector2<Float>,
    pub magnitude: Float,
}

/// A point mass. Mass is fixed at construction, position and velocity are only
/// changed by the owning [`SolarSystem`](crate::sim::system::SolarSystem).
#[derive(Clone, Debug)]
pub struct Body {
    mass: Float,
    position: Vector2<Float>,
    velocity: Vector2<Float>,
    payload: Option<CraftPayload>,
}

impl Body {
    pub fn new(
        mass: Float,
        position: Vector2<Float>,
        velocity: Vector2<Float>,
    ) -> Result<Body, SimulationError> {
        if !(mass.is_finite() && mass > 0.) {
            return Err(SimulationError::InvalidMass(mass));
        }
        Ok(Body {
            mass,
            position,
            velocity,
            payload: None,
        })
    }

    pub fn with_payload(mut self, payload: CraftPayload) -> Body {
        self.payload = Some(payload);
        self
    }

    pub fn mass(&self) -> Float {
        self.mass
    }

    pub fn coordinates(&self) -> Vector2<Float> {
        self.position
    }

    pub fn velocity(&self) -> Vector2<Float> {
        self.velocity
    }

    pub fn payload(&self) -> Option<&CraftPayload> {
        self.payload.as_ref()
    }

    pub fn speed(&self) -> Float {
        self.velocity.norm()
    }

    /// Signed displacement from this body to `point`.
    ///
    /// The magnitude is zero when `point` coincides with this body; anything
    /// dividing by it has to check first.
    pub fn distance_to(&self, point: &Vector2<Float>) -> Separation {
        let delta = point - self.position;
        Separation {
            delta,
            magnitude: delta.norm(),
        }
    }

    fn degenerate(&self) -> SimulationError {
        SimulationError::DegenerateGeometry {
            x: self.position.x,
            y: self.position.y,
        }
    }

    /// Newtonian attraction exerted on `self` by `other`, pointing from `self`
    /// towards `other`.
    ///
    /// Fails when the bodies coincide, or are so close that the force is no
    /// longer a finite number.
    pub fn gravitational_force_from(&self, other: &Body) -> Result<Force, SimulationError> {
        let separation = self.distance_to(&other.position);
        if separation.magnitude == 0. {
            return Err(self.degenerate());
        }
        let magnitude = G * self.mass * other.mass / separation.magnitude.powi(2);
        let components = separation.delta * (magnitude / separation.magnitude);
        if !(magnitude.is_finite() && components.iter().all(|c| c.is_finite())) {
            return Err(self.degenerate());
        }
        Ok(Force {
            components,
            magnitude,
        })
    }

    /// Net acceleration caused by every body in `bodies` other than `self`.
    ///
    /// `self` is recognised by address, so a different body that happens to sit
    /// at the same position is not skipped and yields
    /// [`SimulationError::DegenerateGeometry`].
    pub fn acceleration_given<'a, I>(&self, bodies: I) -> Result<Vector2<Float>, SimulationError>
    where
        I: IntoIterator<Item = &'a Body>,
    {
        let mut total_force: Vector2<Float> = Vector2::zeros();
        for other in bodies {
            if std::ptr::eq(self, other) {
                continue;
            }
            total_force += self.gravitational_force_from(other)?.components;
        }
        Ok(total_force / self.mass)
    }

    /// Semi-implicit Euler: the position moves with the already updated velocity.
    pub(crate) fn integrate(&mut self, acceleration: &Vector2<Float>, time_step: Float) {
        self.velocity += acceleration * time_step;
        self.position += self.velocity * time_step;
    }

    pub fn kinetic_energy(&self) -> Float {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    pub fn potential_energy_with(&self, other: &Body) -> Result<Float, SimulationError> {
        let energy = -G * self.mass * other.mass / self.distance_to(&other.position).magnitude;
        if energy.is_finite() {
            Ok(energy)
        } else {
            Err(self.degenerate())
        }
    }

    /// z component of the angular momentum about the origin.
    pub fn angular_momentum(&self) -> Float {
        self.mass * self.position.perp(&self.velocity)
    }
}
