use std::collections::BTreeMap;

use log::{debug, info, trace, warn};
use nalgebra::Vector2;

use crate::sim::{
    body::Body,
    error::SimulationError,
    initial_parameters::{DisplayScale, InitialParameters, PLANETS, SUN},
    units::{Float, SECONDS_PER_DAY},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Configured,
    Running,
}

#[derive(Clone, Debug)]
struct Member {
    body: Body,
    active: bool,
}

/// Named bodies advanced together under their mutual gravity.
///
/// Bodies are kept sorted by name, which fixes the order in which forces are
/// summed and makes every run reproducible.
#[derive(Clone, Debug)]
pub struct SolarSystem {
    members: BTreeMap<String, Member>,
    time_step: Float,
    current_time: Float,
    steps_taken: u64,
    phase: Phase,
}

impl SolarSystem {
    pub fn new(time_step: Float) -> SolarSystem {
        SolarSystem {
            members: BTreeMap::new(),
            time_step,
            current_time: 0.,
            steps_taken: 0,
            phase: Phase::Configured,
        }
    }

    /// Builds the Sun and all planets from their presets. Planets that are not
    /// enabled in `params` are still created but left inactive.
    pub fn from_parameters(params: &InitialParameters) -> Result<SolarSystem, SimulationError> {
        let mut system = SolarSystem::new(params.time_step);
        for preset in std::iter::once(&SUN).chain(PLANETS.iter()) {
            let body = Body::new(
                preset.mass,
                Vector2::new(preset.position[0], preset.position[1]),
                Vector2::new(preset.velocity[0], preset.velocity[1]),
            )?;
            system.insert(preset.name, body)?;
            if !params.is_enabled(preset.name) {
                system.set_active(preset.name, false)?;
            }
        }
        info!(
            "Created solar system with {} active bodies, time step {} s.",
            system.active_bodies().count(),
            system.time_step
        );
        Ok(system)
    }

    pub fn insert(&mut self, name: &str, body: Body) -> Result<(), SimulationError> {
        self.ensure_configured()?;
        if self.members.contains_key(name) {
            return Err(SimulationError::DuplicateBody(name.to_string()));
        }
        self.members
            .insert(name.to_string(), Member { body, active: true });
        Ok(())
    }

    /// Includes or excludes a body from the simulation. An excluded body keeps
    /// its state and resumes from it when included again.
    pub fn set_active(&mut self, name: &str, active: bool) -> Result<(), SimulationError> {
        self.ensure_configured()?;
        let member = self
            .members
            .get_mut(name)
            .ok_or_else(|| SimulationError::UnknownBody(name.to_string()))?;
        member.active = active;
        debug!("{} is now {}.", name, if active { "active" } else { "inactive" });
        Ok(())
    }

    fn ensure_configured(&self) -> Result<(), SimulationError> {
        match self.phase {
            Phase::Configured => Ok(()),
            Phase::Running => Err(SimulationError::AlreadyRunning),
        }
    }

    pub fn active_bodies(&self) -> impl Iterator<Item = (&str, &Body)> + '_ {
        self.members
            .iter()
            .filter(|(_, member)| member.active)
            .map(|(name, member)| (name.as_str(), &member.body))
    }

    pub fn body(&self, name: &str) -> Option<&Body> {
        self.members.get(name).map(|member| &member.body)
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.members.get(name).map_or(false, |member| member.active)
    }

    pub fn time_step(&self) -> Float {
        self.time_step
    }

    pub fn elapsed_time(&self) -> Float {
        self.current_time
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Advances all active bodies by `time_step` seconds.
    ///
    /// Every acceleration is taken from the state at the start of the step
    /// before any body moves. If one of them fails nothing is changed.
    pub fn step(&mut self, time_step: Float) -> Result<(), SimulationError> {
        let accelerations = self
            .active_bodies()
            .map(|(name, body)| {
                body.acceleration_given(self.active_bodies().map(|(_, other)| other))
                    .map_err(|error| {
                        warn!("Cannot compute acceleration of {}: {}", name, error);
                        error
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let active_members = self.members.values_mut().filter(|member| member.active);
        for (member, acceleration) in active_members.zip(accelerations.iter()) {
            member.body.integrate(acceleration, time_step);
        }
        self.current_time += time_step;
        self.steps_taken += 1;
        self.phase = Phase::Running;
        trace!(
            "Step {} done, t = {} s.",
            self.steps_taken,
            self.current_time
        );
        Ok(())
    }

    pub fn advance(&mut self) -> Result<(), SimulationError> {
        self.step(self.time_step)
    }

    pub fn elapsed_description(&self, frame_index: u64) -> String {
        let days = frame_index as Float * self.time_step / SECONDS_PER_DAY;
        format!("Elapsed time: {} days", days.round_ties_even())
    }

    pub fn normalize_for_display(position: &Vector2<Float>, scale: &DisplayScale) -> (Float, Float) {
        debug_assert!(
            scale.max_distance > 0. && scale.max_distance.is_finite(),
            "display scale needs a positive max distance, got {}",
            scale.max_distance
        );
        let normalize =
            |coordinate: Float| round_to_tenth(coordinate * scale.axis_limit / scale.max_distance);
        (normalize(position.x), normalize(position.y))
    }

    pub fn total_energy(&self) -> Result<Float, SimulationError> {
        let bodies = self.active_bodies().map(|(_, body)| body).collect::<Vec<_>>();
        let mut energy = 0.;
        for i in 0..bodies.len() {
            energy += bodies[i].kinetic_energy();
            for j in (i + 1)..bodies.len() {
                energy += bodies[i].potential_energy_with(bodies[j])?;
            }
        }
        Ok(energy)
    }

    pub fn total_angular_momentum(&self) -> Float {
        self.active_bodies()
            .map(|(_, body)| body.angular_momentum())
            .sum()
    }
}

fn round_to_tenth(value: Float) -> Float {
    (value * 10.).round_ties_even() / 10.
}
