//! # Settings Module
//!
//! ## Purpose
//! Holds the tunable numerical parameters of the crate: the log level and the tolerances,
//! step ceilings and pseudo-transient time scale of the surface-coverage solver.
//!
//! ## Key Features
//! - **JSON Storage**: settings are read from and written to JSON with serde_json
//! - **Defaults Everywhere**: every field is optional in the file; missing fields keep defaults
//! - **Validation**: non-positive tolerances or zero ceilings are rejected on load
//!
//! ## File Layout
//! ```json
//! {
//!   "log_level": "info",
//!   "surface_solver": {
//!     "rtol": 1e-7,
//!     "atol": 1e-14,
//!     "max_steps": 20000,
//!     "default_time_scale": 1.0
//!   }
//! }
//! ```
//!
//! ## Usage Pattern
//! ```rust
//! use SurfKin::settings::KineticsSettings;
//! let settings = KineticsSettings::from_json_str(r#"{"surface_solver": {"rtol": 1e-9}}"#).unwrap();
//! assert_eq!(settings.surface_solver.rtol, 1e-9);
//! assert_eq!(settings.surface_solver.max_steps, 20000);
//! ```
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting '{name}': {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Parameters of the surface-coverage solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSolverSettings {
    /// relative tolerance of the time integrator
    pub rtol: f64,
    /// absolute tolerance of the time integrator (coverages)
    pub atol: f64,
    /// largest integrator step, zero for the solver's own cap of 1e-3 s
    pub max_step_size: f64,
    pub max_steps: usize,
    /// consecutive steps the solver may cut below the requested size
    pub max_err_test_fails: usize,
    /// tolerances of the damped Newton iteration for the steady state
    pub newton_rtol: f64,
    pub newton_atol: f64,
    pub max_newton_iterations: usize,
    /// net production rates (scaled to dtheta/dt) below this count as converged
    pub residual_tol: f64,
    /// integration time used before retrying the direct steady-state solve, s
    pub default_time_scale: f64,
}

impl Default for SurfaceSolverSettings {
    fn default() -> Self {
        Self {
            rtol: 1e-7,
            atol: 1e-14,
            max_step_size: 0.0,
            max_steps: 20000,
            max_err_test_fails: 7,
            newton_rtol: 1e-6,
            newton_atol: 1e-12,
            max_newton_iterations: 100,
            residual_tol: 1e-12,
            default_time_scale: 1.0,
        }
    }
}

impl SurfaceSolverSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("rtol", self.rtol),
            ("atol", self.atol),
            ("newton_rtol", self.newton_rtol),
            ("newton_atol", self.newton_atol),
            ("residual_tol", self.residual_tol),
            ("default_time_scale", self.default_time_scale),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::Invalid {
                    name,
                    reason: format!("must be positive, got {}", value),
                });
            }
        }
        if !self.max_step_size.is_finite() || self.max_step_size < 0.0 {
            return Err(SettingsError::Invalid {
                name: "max_step_size",
                reason: format!("must be zero or positive, got {}", self.max_step_size),
            });
        }
        let counts = [
            ("max_steps", self.max_steps),
            ("max_err_test_fails", self.max_err_test_fails),
            ("max_newton_iterations", self.max_newton_iterations),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(SettingsError::Invalid {
                    name,
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Top level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KineticsSettings {
    /// "off", "error", "warn", "info", "debug" or "trace"
    pub log_level: String,
    pub surface_solver: SurfaceSolverSettings,
}

impl Default for KineticsSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            surface_solver: SurfaceSolverSettings::default(),
        }
    }
}

impl KineticsSettings {
    pub fn from_json_str(content: &str) -> Result<Self, SettingsError> {
        let settings: KineticsSettings = serde_json::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.level_filter()?;
        self.surface_solver.validate()
    }
    pub fn level_filter(&self) -> Result<LevelFilter, SettingsError> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| SettingsError::Invalid {
                name: "log_level",
                reason: format!("unknown level '{}'", self.log_level),
            })
    }
}
