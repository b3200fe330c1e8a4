//! Data-driven game balance
//!
//! Every gameplay constant lives here so a page can override balance with a
//! JSON blob (`data-tuning` on the canvas) without a rebuild.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::GridSize;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("max_base_speed {max} is below start_speed {start}")]
    SpeedOrder { start: f32, max: f32 },
    #[error("power_up_chance {0} is outside [0, 1]")]
    Probability(f32),
    #[error("{obstacles} obstacles leave no room on a {cells}-cell grid")]
    Overcrowded { obstacles: u32, cells: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Steps per second at the start of a life
    pub start_speed: f32,
    /// Base speed gained per food eaten
    pub speed_step: f32,
    /// Cap for the base speed ramp
    pub max_base_speed: f32,
    /// Speed added on top of base by coffee
    pub boost_bonus: f32,
    /// Cap for boosted speed
    pub max_boost_speed: f32,
    /// Steps a coffee boost lasts
    pub boost_steps: u32,
    pub obstacle_count: u32,
    pub food_score: u64,
    pub star_score: u64,
    /// Chance that eating food spawns a power-up (when none is active)
    pub power_up_chance: f64,
    /// Steps an uncollected power-up stays on the board
    pub power_up_lifetime: u32,
    /// Steps of invulnerability granted by a shield
    pub ghost_steps: u32,
    /// Body segments nearest the head that never count as self-collision
    pub self_collision_grace: usize,
    /// Random draws before placement falls back to a scan
    pub placement_attempts: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            start_speed: 7.0,
            speed_step: 0.2,
            max_base_speed: 18.0,
            boost_bonus: 6.0,
            max_boost_speed: 24.0,
            boost_steps: 240,
            obstacle_count: 12,
            food_score: 10,
            star_score: 30,
            power_up_chance: 0.4,
            power_up_lifetime: 600,
            ghost_steps: 200,
            self_collision_grace: 6,
            placement_attempts: 512,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON object; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse and validate an optional override; anything invalid falls back to defaults
    pub fn resolve(json: Option<&str>, grid: &GridSize) -> Self {
        let Some(json) = json.filter(|j| !j.trim().is_empty()) else {
            return Self::default();
        };
        match Self::from_json(json).and_then(|t| t.validate(grid).map(|()| t)) {
            Ok(tuning) => {
                log::info!("Using custom tuning");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self, grid: &GridSize) -> Result<(), TuningError> {
        for (field, value) in [
            ("start_speed", self.start_speed),
            ("max_base_speed", self.max_base_speed),
            ("max_boost_speed", self.max_boost_speed),
        ] {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        // Speed only ever moves by these; a negative step would stall the clock
        for (field, value) in [
            ("speed_step", self.speed_step),
            ("boost_bonus", self.boost_bonus),
        ] {
            if !(value >= 0.0) {
                return Err(TuningError::Negative { field, value });
            }
        }
        if self.max_base_speed < self.start_speed {
            return Err(TuningError::SpeedOrder {
                start: self.start_speed,
                max: self.max_base_speed,
            });
        }
        if !(0.0..=1.0).contains(&self.power_up_chance) {
            return Err(TuningError::Probability(self.power_up_chance as f32));
        }
        // Snake and food need one cell each
        let cells = grid.cell_count();
        if self.obstacle_count as usize + 2 > cells {
            return Err(TuningError::Overcrowded {
                obstacles: self.obstacle_count,
                cells,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GRID;

    #[test]
    fn test_defaults_are_valid() {
        Tuning::default().validate(&GRID).unwrap();
    }

    #[test]
    fn test_partial_json_overrides() {
        let tuning = Tuning::from_json(r#"{"start_speed": 9.5, "obstacle_count": 3}"#).unwrap();
        assert_eq!(tuning.start_speed, 9.5);
        assert_eq!(tuning.obstacle_count, 3);
        assert_eq!(tuning.ghost_steps, 200);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Tuning::from_json("{start_speed: fast}"),
            Err(TuningError::Json(_))
        ));
    }

    #[test]
    fn test_resolve_falls_back() {
        assert_eq!(Tuning::resolve(None, &GRID), Tuning::default());
        assert_eq!(Tuning::resolve(Some("  "), &GRID), Tuning::default());
        assert_eq!(Tuning::resolve(Some("not json"), &GRID), Tuning::default());
        assert_eq!(
            Tuning::resolve(Some(r#"{"start_speed": -1}"#), &GRID),
            Tuning::default()
        );
        assert_eq!(
            Tuning::resolve(Some(r#"{"ghost_steps": 50}"#), &GRID).ghost_steps,
            50
        );
    }

    #[test]
    fn test_validation_rejects_nonsense() {
        let bad_speed = Tuning {
            start_speed: 0.0,
            ..Tuning::default()
        };
        assert!(matches!(
            bad_speed.validate(&GRID),
            Err(TuningError::NotPositive { field: "start_speed", .. })
        ));

        let inverted = Tuning {
            max_base_speed: 5.0,
            ..Tuning::default()
        };
        assert!(matches!(
            inverted.validate(&GRID),
            Err(TuningError::SpeedOrder { .. })
        ));

        let shrinking = Tuning {
            speed_step: -10.0,
            ..Tuning::default()
        };
        assert!(matches!(
            shrinking.validate(&GRID),
            Err(TuningError::Negative { field: "speed_step", .. })
        ));

        let slowing_coffee = Tuning {
            boost_bonus: -7.0,
            ..Tuning::default()
        };
        assert!(matches!(
            slowing_coffee.validate(&GRID),
            Err(TuningError::Negative { field: "boost_bonus", .. })
        ));

        let nan_step = Tuning {
            speed_step: f32::NAN,
            ..Tuning::default()
        };
        assert!(nan_step.validate(&GRID).is_err());

        let chance = Tuning {
            power_up_chance: 1.5,
            ..Tuning::default()
        };
        assert!(matches!(
            chance.validate(&GRID),
            Err(TuningError::Probability(_))
        ));

        let crowded = Tuning {
            obstacle_count: 9,
            ..Tuning::default()
        };
        assert!(matches!(
            crowded.validate(&GridSize::new(3, 3)),
            Err(TuningError::Overcrowded { .. })
        ));
    }
}
