use log::warn;

use super::{
    system::SolarSystem,
    units::{Float, SECONDS_PER_HOUR},
};

pub const DEFAULT_TIME_STEP: Float = SECONDS_PER_HOUR;
pub const STAR: &str = "Sun";

/// Initial state of a named body, in SI units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyPreset {
    pub name: &'static str,
    pub mass: Float,
    pub position: [Float; 2],
    pub velocity: [Float; 2],
}

const fn preset(
    name: &'static str,
    mass: Float,
    position: [Float; 2],
    velocity: [Float; 2],
) -> BodyPreset {
    BodyPreset {
        name,
        mass,
        position,
        velocity,
    }
}

// Circular orbits at mean distance, all running counter-clockwise.
pub const SUN: BodyPreset = preset(STAR, 1.989e30, [0., 0.], [0., 0.]);
pub const PLANETS: [BodyPreset; 8] = [
    preset("Mercury", 0.330e24, [-57.9e9, 0.], [0., -47_400.]),
    preset("Venus", 4.87e24, [0., 108.2e9], [-35_000., 0.]),
    preset("Earth", 5.972e24, [0., -149.6e9], [29_800., 0.]),
    preset("Mars", 0.642e24, [227.9e9, 0.], [0., 24_100.]),
    preset("Jupiter", 1898e24, [-778.5e9, 0.], [0., -13_070.]),
    preset("Saturn", 568e24, [0., 1432.0e9], [-9_680., 0.]),
    preset("Uranus", 86.8e24, [0., -2867.0e9], [6_800., 0.]),
    preset("Neptune", 102e24, [4515.0e9, 0.], [0., 5_430.]),
];

pub struct InitialParameters {
    pub time_step: Float,
    /// One flag per entry of [`PLANETS`]. The star always takes part.
    pub enabled_planets: [bool; PLANETS.len()],
}

impl Default for InitialParameters {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP,
            enabled_planets: [true; PLANETS.len()],
        }
    }
}

impl InitialParameters {
    pub fn is_enabled(&self, name: &str) -> bool {
        name == STAR
            || PLANETS
                .iter()
                .zip(self.enabled_planets.iter())
                .any(|(planet, enabled)| *enabled && planet.name == name)
    }
}

/// Reads a time step in whole seconds, falling back to [`DEFAULT_TIME_STEP`]
/// for anything that is not a positive integer.
pub fn parse_time_step(input: &str) -> Float {
    match input.trim().parse::<u32>() {
        Ok(seconds) if seconds > 0 => seconds as Float,
        _ => {
            warn!(
                "Invalid time step '{}', using {} s instead.",
                input, DEFAULT_TIME_STEP
            );
            DEFAULT_TIME_STEP
        }
    }
}

/// Linear map from physical distances onto the drawing area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayScale {
    /// Half-width of the drawn axes.
    pub axis_limit: Float,
    /// Distance in m that lands on `axis_limit`.
    pub max_distance: Float,
}

impl Default for DisplayScale {
    fn default() -> Self {
        Self {
            axis_limit: 100.,
            max_distance: 2.5e11,
        }
    }
}

impl DisplayScale {
    /// Scale that keeps the farthest active body just inside the axes.
    pub fn fitting(system: &SolarSystem) -> DisplayScale {
        const MARGIN: Float = 1.1;
        let farthest = system
            .active_bodies()
            .map(|(_, body)| body.coordinates().norm())
            .fold(0., Float::max);
        let default = DisplayScale::default();
        if farthest > 0. && farthest.is_finite() {
            DisplayScale {
                max_distance: farthest * MARGIN,
                ..default
            }
        } else {
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn time_step_accepts_positive_integers() {
        assert_eq!(parse_time_step("100"), 100.);
        assert_eq!(parse_time_step(" 86400 "), 86_400.);
    }

    #[test]
    fn malformed_time_step_falls_back_to_default() {
        for input in ["", "abc", "1.5", "-3600", "0"] {
            assert_eq!(parse_time_step(input), DEFAULT_TIME_STEP, "input: {input:?}");
        }
    }

    #[test]
    fn all_bodies_enabled_by_default() {
        let params = InitialParameters::default();
        assert_eq!(params.time_step, 3600.);
        assert!(params.is_enabled(STAR));
        for planet in PLANETS.iter() {
            assert!(params.is_enabled(planet.name));
        }
        assert!(!params.is_enabled("Pluto"));
    }

    #[test]
    fn star_cannot_be_disabled() {
        let params = InitialParameters {
            enabled_planets: [false; PLANETS.len()],
            ..Default::default()
        };
        assert!(params.is_enabled(STAR));
        assert!(!params.is_enabled("Earth"));
    }

    #[test]
    fn planets_orbit_in_the_same_sense() {
        for planet in PLANETS.iter() {
            let [x, y] = planet.position;
            let [v_x, v_y] = planet.velocity;
            assert!(x * v_y - y * v_x > 0., "{} orbits clockwise", planet.name);
        }
    }

    #[test]
    fn fitting_scale_covers_farthest_active_body() {
        let params = InitialParameters {
            enabled_planets: PLANETS.map(|planet| planet.name == "Earth"),
            ..Default::default()
        };
        let system = SolarSystem::from_parameters(&params).unwrap();

        let scale = DisplayScale::fitting(&system);

        assert_relative_eq!(scale.max_distance, 149.6e9 * 1.1);
        assert_eq!(scale.axis_limit, 100.);

        let empty = SolarSystem::new(1.);
        assert_eq!(DisplayScale::fitting(&empty), DisplayScale::default());
    }
}
