use std::fmt;

use super::units::Float;

#[derive(Clone, Debug, PartialEq)]
pub enum SimulationError {
    /// Body mass must be finite and strictly positive.
    InvalidMass(Float),
    /// Two distinct bodies share a position, so the force direction is undefined.
    DegenerateGeometry { x: Float, y: Float },
    UnknownBody(String),
    DuplicateBody(String),
    /// The active set can only change before the first step.
    AlreadyRunning,
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidMass(mass) => {
                write!(f, "invalid mass {mass:e} kg, mass must be positive")
            }
            SimulationError::DegenerateGeometry { x, y } => write!(
                f,
                "two distinct bodies coincide at ({x:e}, {y:e}) m, force direction is undefined"
            ),
            SimulationError::UnknownBody(name) => write!(f, "no body named '{name}'"),
            SimulationError::DuplicateBody(name) => {
                write!(f, "a body named '{name}' already exists")
            }
            SimulationError::AlreadyRunning => {
                write!(f, "bodies cannot be reconfigured once the simulation is running")
            }
        }
    }
}

impl std::error::Error for SimulationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_body() {
        let error = SimulationError::UnknownBody("Pluto".to_string());
        assert_eq!(error.to_string(), "no body named 'Pluto'");

        let error = SimulationError::DuplicateBody("Earth".to_string());
        assert!(error.to_string().contains("Earth"));
    }

    #[test]
    fn invalid_mass_reports_value() {
        let error = SimulationError::InvalidMass(-1.);
        assert!(error.to_string().contains("-1e0"));
    }
}
