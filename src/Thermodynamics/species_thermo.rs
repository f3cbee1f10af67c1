use crate::constants::GAS_CONSTANT;
use serde::{Deserialize, Serialize};

/// Reference-state thermodynamics of one species with a constant heat capacity:
///
/// h(T) = h0 + cp0*(T - t0)
/// s(T) = s0 + cp0*ln(T/t0)
/// g(T) = h(T) - T*s(T)
///
/// All values per kmol (J/kmol, J/kmol/K). This is the minimal stand-in for the
/// polynomial correlations (NASA7, Shomate) that belong to the thermo layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstCpThermo {
    /// reference temperature, K
    pub t0: f64,
    /// enthalpy at t0, J/kmol
    pub h0: f64,
    /// entropy at t0, J/kmol/K
    pub s0: f64,
    /// heat capacity, J/kmol/K
    pub cp0: f64,
}

impl Default for ConstCpThermo {
    fn default() -> Self {
        Self {
            t0: 298.15,
            h0: 0.0,
            s0: 0.0,
            cp0: 0.0,
        }
    }
}

impl ConstCpThermo {
    pub fn new(t0: f64, h0: f64, s0: f64, cp0: f64) -> Self {
        Self { t0, h0, s0, cp0 }
    }
    #[allow(non_snake_case)]
    pub fn enthalpy(&self, T: f64) -> f64 {
        self.h0 + self.cp0 * (T - self.t0)
    }
    #[allow(non_snake_case)]
    pub fn entropy(&self, T: f64) -> f64 {
        self.s0 + self.cp0 * (T / self.t0).ln()
    }
    #[allow(non_snake_case)]
    pub fn gibbs(&self, T: f64) -> f64 {
        self.enthalpy(T) - T * self.entropy(T)
    }
    #[allow(non_snake_case)]
    pub fn cp(&self, _T: f64) -> f64 {
        self.cp0
    }
    /// dimensionless Gibbs energy g/RT
    #[allow(non_snake_case)]
    pub fn gibbs_RT(&self, T: f64) -> f64 {
        self.gibbs(T) / (GAS_CONSTANT * T)
    }
}
