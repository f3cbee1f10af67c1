//! Phase contract consumed by the kinetics manager.
//!
//! The kinetics layer only needs activity concentrations, standard concentrations, chemical
//! potentials and the electric potential of every phase. Real equations of state live
//! elsewhere; the three implementations here (ideal gas, ideal surface, incompressible bulk)
//! are the minimal set needed to assemble interface mechanisms.
use crate::Thermodynamics::bulk_phase::BulkPhase;
use crate::Thermodynamics::ideal_gas::IdealGasPhase;
use crate::Thermodynamics::species_thermo::ConstCpThermo;
use crate::Thermodynamics::surf_phase::SurfPhase;
use crate::Thermodynamics::thermo_error::ThermoError;
use crate::constants::GAS_CONSTANT;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn default_size() -> f64 {
    1.0
}

/// species record shared by all phase models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    /// charge number (multiples of the elementary charge)
    #[serde(default)]
    pub charge: f64,
    /// kg/kmol
    pub molecular_weight: f64,
    #[serde(default)]
    pub thermo: ConstCpThermo,
    /// number of surface sites occupied (surface species only)
    #[serde(default = "default_size")]
    pub size: f64,
}

impl Species {
    pub fn new(name: &str, molecular_weight: f64, thermo: ConstCpThermo) -> Self {
        Self {
            name: name.to_string(),
            charge: 0.0,
            molecular_weight,
            thermo,
            size: 1.0,
        }
    }
    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = charge;
        self
    }
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    IdealGas,
    Surface,
    Bulk,
}

#[enum_dispatch]
pub trait ThermoPhaseTrait {
    fn name(&self) -> &str;
    fn kind(&self) -> PhaseKind;
    fn species(&self) -> &[Species];
    fn n_species(&self) -> usize {
        self.species().len()
    }
    fn species_index(&self, name: &str) -> Option<usize> {
        self.species().iter().position(|s| s.name == name)
    }
    fn charges(&self) -> Vec<f64> {
        self.species().iter().map(|s| s.charge).collect()
    }
    fn molecular_weights(&self) -> Vec<f64> {
        self.species().iter().map(|s| s.molecular_weight).collect()
    }
    /// K
    fn temperature(&self) -> f64;
    #[allow(non_snake_case)]
    fn set_temperature(&mut self, T: f64) -> Result<(), ThermoError>;
    /// Pa
    fn pressure(&self) -> f64;
    #[allow(non_snake_case)]
    fn set_pressure(&mut self, P: f64) -> Result<(), ThermoError>;
    /// V
    fn electric_potential(&self) -> f64;
    fn set_electric_potential(&mut self, volts: f64);
    /// counter bumped on every change of temperature, pressure or composition
    fn state_number(&self) -> u64;
    /// generalized concentrations C_k used directly in mass-action rate expressions
    fn activity_concentrations(&self) -> Vec<f64>;
    /// C0_k such that activity a_k = C_k / C0_k
    fn standard_concentration(&self, k: usize) -> f64;
    fn log_standard_concentration(&self, k: usize) -> f64 {
        self.standard_concentration(k).ln()
    }
    /// standard-state chemical potentials at the current T and P, J/kmol
    fn standard_chem_potentials(&self) -> Vec<f64>;
    fn standard_enthalpies(&self) -> Vec<f64> {
        let t = self.temperature();
        self.species().iter().map(|s| s.thermo.enthalpy(t)).collect()
    }
    fn standard_entropies(&self) -> Vec<f64>;
    /// mu_k = mu0_k + RT ln(a_k)
    fn chem_potentials(&self) -> Vec<f64>;
    fn partial_molar_enthalpies(&self) -> Vec<f64> {
        self.standard_enthalpies()
    }
    fn partial_molar_entropies(&self) -> Vec<f64>;
    /// m^3/kmol (zero for interfaces)
    fn molar_volume(&self) -> f64;
    fn set_molar_density(&mut self, density: f64) -> Result<(), ThermoError>;
}

/// all phase models a kinetics manager can reference
#[derive(Debug, Clone)]
#[enum_dispatch(ThermoPhaseTrait)]
pub enum Phase {
    IdealGas(IdealGasPhase),
    Surface(SurfPhase),
    Bulk(BulkPhase),
}

impl Phase {
    pub fn as_surface(&self) -> Option<&SurfPhase> {
        match self {
            Phase::Surface(s) => Some(s),
            _ => None,
        }
    }
    pub fn as_surface_mut(&mut self) -> Option<&mut SurfPhase> {
        match self {
            Phase::Surface(s) => Some(s),
            _ => None,
        }
    }
    pub fn as_gas(&self) -> Option<&IdealGasPhase> {
        match self {
            Phase::IdealGas(g) => Some(g),
            _ => None,
        }
    }
    pub fn as_gas_mut(&mut self) -> Option<&mut IdealGasPhase> {
        match self {
            Phase::IdealGas(g) => Some(g),
            _ => None,
        }
    }
}

/// checks a temperature before it is stored in a phase
#[allow(non_snake_case)]
pub(crate) fn check_temperature(T: f64) -> Result<(), ThermoError> {
    if !T.is_finite() || T <= 0.0 {
        return Err(ThermoError::InvalidState(format!("temperature must be positive, got {}", T)));
    }
    Ok(())
}

#[allow(non_snake_case)]
pub(crate) fn check_pressure(P: f64) -> Result<(), ThermoError> {
    if !P.is_finite() || P <= 0.0 {
        return Err(ThermoError::InvalidState(format!("pressure must be positive, got {}", P)));
    }
    Ok(())
}

/// normalizes a composition vector after clipping negative entries; fails on a zero sum
pub(crate) fn normalized(x: &[f64], expected_len: usize) -> Result<Vec<f64>, ThermoError> {
    if x.len() != expected_len {
        return Err(ThermoError::SizeMismatch {
            expected: expected_len,
            got: x.len(),
        });
    }
    let clipped: Vec<f64> = x.iter().map(|v| v.max(0.0)).collect();
    let sum: f64 = clipped.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        return Err(ThermoError::InvalidState(format!(
            "composition must have a positive finite sum, got {}",
            sum
        )));
    }
    Ok(clipped.iter().map(|v| v / sum).collect())
}

/// turns a name->value map into a dense vector ordered like `species`
pub(crate) fn dense_from_map(
    species: &[Species],
    values: &HashMap<String, f64>,
) -> Result<Vec<f64>, ThermoError> {
    let mut x = vec![0.0; species.len()];
    for (name, v) in values {
        let k = species
            .iter()
            .position(|s| &s.name == name)
            .ok_or_else(|| ThermoError::UnknownSpecies(name.clone()))?;
        x[k] = *v;
    }
    Ok(x)
}

/// RT ln(x) guarded against ln(0)
#[allow(non_snake_case)]
pub(crate) fn RT_ln(T: f64, x: f64) -> f64 {
    GAS_CONSTANT * T * x.max(crate::constants::SMALL_NUMBER).ln()
}
