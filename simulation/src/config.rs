//! Simulation constants
//!
//! Every tuning parameter lives in one immutable [`SimConfig`] value that is
//! handed to the stepper and shared by every agent, so worlds with different
//! parameters can run side by side.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use thiserror::Error;

use crate::colour::Colour;
use crate::geometry::Bounds;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("screen size must be finite and positive (got {width}x{height})")]
    InvalidScreenSize { width: f64, height: f64 },
    #[error("edge margin {margin} leaves no playable area")]
    MarginTooLarge { margin: f64 },
    #[error("mature_age must be greater than zero")]
    ZeroMatureAge,
    #[error("decompose_ticks must be greater than zero")]
    ZeroDecomposeTicks,
    #[error("chance_of_turn {0} must be between 0.0 and 1.0")]
    InvalidTurnChance(f64),
    #[error("{field} must be finite and non-negative (got {value})")]
    InvalidParameter { field: &'static str, value: f64 },
    #[error("birth_size {birth} and mature_size {mature} must be positive with birth <= mature")]
    InvalidSizes { birth: f64, mature: f64 },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the world's random stream.
    pub seed: u64,
    /// Width of the screen in pixels.
    pub screen_width: f64,
    /// Height of the screen in pixels.
    pub screen_height: f64,
    /// Inset from every screen edge that agents never cross.
    pub edge_margin: f64,
    /// Heading of a newborn agent (radians, 0 = +x, clockwise on screen).
    pub default_angle: f64,
    /// Distance covered per tick.
    pub default_speed: f64,
    /// How far an agent can see.
    pub detection_radius: f64,
    /// Full width of the forward viewing cone (radians).
    pub detection_slice: f64,
    /// Age in ticks at which an agent stops growing.
    pub mature_age: u32,
    /// Age in ticks at which an agent dies of old age.
    pub death_age: u32,
    /// Ticks a corpse stays on screen before it is pruned.
    pub decompose_ticks: u32,
    pub birth_size: f64,
    pub mature_size: f64,
    /// Largest random heading change in one turn, at most π.
    pub turn_angle: f64,
    /// Per-tick probability of a random turn while wandering.
    pub chance_of_turn: f64,
    /// The driver keeps spawning until this many agents are alive.
    pub target_population: usize,
    pub background: Colour,
    pub view_line_colour: Colour,
    pub goal_line_colour: Colour,
    pub view_line_length: f64,
    pub view_line_width: u32,
    /// Nose length as a multiple of body radius.
    pub nose_to_body: f64,
    pub nose_width: u32,
    /// Ticks per second for paced runs (0 = unpaced).
    pub frame_rate: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            screen_width: 640.0,
            screen_height: 480.0,
            edge_margin: 30.0,
            default_angle: 0.0,
            default_speed: 1.0,
            detection_radius: 150.0,
            detection_slice: PI / 2.0,
            mature_age: 600,
            death_age: 3000,
            decompose_ticks: 300,
            birth_size: 5.0,
            mature_size: 15.0,
            turn_angle: PI / 7.0,
            chance_of_turn: 0.1,
            target_population: 10,
            background: Colour::new(255, 255, 255),
            view_line_colour: Colour::new(200, 200, 200),
            goal_line_colour: Colour::new(255, 0, 0),
            view_line_length: 100.0,
            view_line_width: 2,
            nose_to_body: 1.4,
            nose_width: 3,
            frame_rate: 60,
        }
    }
}

impl SimConfig {
    /// Parse a JSON document; missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.screen_width, self.screen_height);
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::InvalidScreenSize { width, height });
        }
        check_non_negative("edge_margin", self.edge_margin)?;
        if 2.0 * self.edge_margin >= width || 2.0 * self.edge_margin >= height {
            return Err(ConfigError::MarginTooLarge { margin: self.edge_margin });
        }
        if self.mature_age == 0 {
            return Err(ConfigError::ZeroMatureAge);
        }
        if self.decompose_ticks == 0 {
            return Err(ConfigError::ZeroDecomposeTicks);
        }
        if !(0.0..=1.0).contains(&self.chance_of_turn) {
            return Err(ConfigError::InvalidTurnChance(self.chance_of_turn));
        }
        check_non_negative("turn_angle", self.turn_angle)?;
        if self.turn_angle > PI {
            return Err(ConfigError::InvalidParameter {
                field: "turn_angle",
                value: self.turn_angle,
            });
        }
        check_non_negative("default_speed", self.default_speed)?;
        check_non_negative("detection_radius", self.detection_radius)?;
        check_non_negative("detection_slice", self.detection_slice)?;
        if !self.default_angle.is_finite() {
            return Err(ConfigError::InvalidParameter {
                field: "default_angle",
                value: self.default_angle,
            });
        }
        let (birth, mature) = (self.birth_size, self.mature_size);
        if !(birth.is_finite() && mature.is_finite()) || birth <= 0.0 || birth > mature {
            return Err(ConfigError::InvalidSizes { birth, mature });
        }
        Ok(())
    }

    /// The screen rectangle inset by `edge_margin` on every side.
    pub fn playable_area(&self) -> Bounds {
        Bounds {
            min_x: self.edge_margin,
            max_x: self.screen_width - self.edge_margin,
            min_y: self.edge_margin,
            max_y: self.screen_height - self.edge_margin,
        }
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { field, value })
    }
}
