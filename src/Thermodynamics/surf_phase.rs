//! Ideal surface phase: a lattice of equivalent sites with density n0 (kmol/m^2).
//!
//! Species k occupies s_k sites. Activity a_k = theta_k, activity concentration
//! C_k = theta_k n0 / s_k and standard concentration C0_k = n0 / s_k. The chemical potential
//! is mu_k = mu0_k(T) + RT ln(theta_k) and nothing depends on pressure.
use crate::Thermodynamics::phase::{
    PhaseKind, RT_ln, Species, ThermoPhaseTrait, check_pressure, check_temperature, dense_from_map,
    normalized,
};
use crate::Thermodynamics::thermo_error::ThermoError;
use crate::constants::{GAS_CONSTANT, ONE_ATM, SMALL_NUMBER};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct SurfPhase {
    pub name: String,
    species: Vec<Species>,
    coverages: Vec<f64>,
    site_density: f64,
    temperature: f64,
    pressure: f64,
    phi: f64,
    state_number: u64,
}

impl SurfPhase {
    /// new surface with all sites covered by the first species
    pub fn new(name: &str, species: Vec<Species>, site_density: f64) -> Result<Self, ThermoError> {
        if !site_density.is_finite() || site_density <= 0.0 {
            return Err(ThermoError::InvalidState(format!(
                "site density must be positive, got {}",
                site_density
            )));
        }
        if let Some(s) = species.iter().find(|s| !(s.size > 0.0)) {
            return Err(ThermoError::InvalidState(format!(
                "species '{}' must occupy a positive number of sites",
                s.name
            )));
        }
        let n = species.len();
        let mut coverages = vec![0.0; n];
        if n > 0 {
            coverages[0] = 1.0;
        }
        Ok(Self {
            name: name.to_string(),
            species,
            coverages,
            site_density,
            temperature: 298.15,
            pressure: ONE_ATM,
            phi: 0.0,
            state_number: 0,
        })
    }

    /// kmol/m^2
    pub fn site_density(&self) -> f64 {
        self.site_density
    }
    pub fn set_site_density(&mut self, n0: f64) -> Result<(), ThermoError> {
        if !n0.is_finite() || n0 <= 0.0 {
            return Err(ThermoError::InvalidState(format!("site density must be positive, got {}", n0)));
        }
        self.site_density = n0;
        self.state_number = self.state_number.wrapping_add(1);
        Ok(())
    }
    /// number of sites occupied by species k
    pub fn size(&self, k: usize) -> f64 {
        self.species[k].size
    }
    pub fn coverages(&self) -> &[f64] {
        &self.coverages
    }
    /// Sets the site fractions. Negative entries are clipped and the result is normalized
    /// so that the coverages sum to one.
    pub fn set_coverages(&mut self, theta: &[f64]) -> Result<(), ThermoError> {
        self.coverages = normalized(theta, self.species.len())?;
        self.state_number = self.state_number.wrapping_add(1);
        Ok(())
    }
    /// Sets the site fractions as given. Used by the surface solver for intermediate
    /// iterates, which may leave the simplex; consumers must renormalize before reading.
    pub fn set_coverages_no_norm(&mut self, theta: &[f64]) -> Result<(), ThermoError> {
        if theta.len() != self.species.len() {
            return Err(ThermoError::SizeMismatch {
                expected: self.species.len(),
                got: theta.len(),
            });
        }
        if theta.iter().any(|v| !v.is_finite()) {
            return Err(ThermoError::InvalidState("non-finite coverage".to_string()));
        }
        self.coverages.copy_from_slice(theta);
        self.state_number = self.state_number.wrapping_add(1);
        Ok(())
    }
    pub fn set_coverages_by_name(&mut self, theta: &HashMap<String, f64>) -> Result<(), ThermoError> {
        let dense = dense_from_map(&self.species, theta)?;
        self.set_coverages(&dense)
    }
}

impl ThermoPhaseTrait for SurfPhase {
    fn name(&self) -> &str {
        &self.name
    }
    fn kind(&self) -> PhaseKind {
        PhaseKind::Surface
    }
    fn species(&self) -> &[Species] {
        &self.species
    }
    fn temperature(&self) -> f64 {
        self.temperature
    }
    #[allow(non_snake_case)]
    fn set_temperature(&mut self, T: f64) -> Result<(), ThermoError> {
        check_temperature(T)?;
        self.temperature = T;
        self.state_number = self.state_number.wrapping_add(1);
        Ok(())
    }
    fn pressure(&self) -> f64 {
        self.pressure
    }
    #[allow(non_snake_case)]
    fn set_pressure(&mut self, P: f64) -> Result<(), ThermoError> {
        check_pressure(P)?;
        self.pressure = P;
        Ok(())
    }
    fn electric_potential(&self) -> f64 {
        self.phi
    }
    fn set_electric_potential(&mut self, volts: f64) {
        self.phi = volts;
    }
    fn state_number(&self) -> u64 {
        self.state_number
    }
    fn activity_concentrations(&self) -> Vec<f64> {
        self.coverages
            .iter()
            .zip(self.species.iter())
            .map(|(theta, s)| theta * self.site_density / s.size)
            .collect()
    }
    fn standard_concentration(&self, k: usize) -> f64 {
        self.site_density / self.species[k].size
    }
    fn standard_chem_potentials(&self) -> Vec<f64> {
        let t = self.temperature;
        self.species.iter().map(|s| s.thermo.gibbs(t)).collect()
    }
    fn standard_entropies(&self) -> Vec<f64> {
        let t = self.temperature;
        self.species.iter().map(|s| s.thermo.entropy(t)).collect()
    }
    fn chem_potentials(&self) -> Vec<f64> {
        let t = self.temperature;
        self.standard_chem_potentials()
            .iter()
            .zip(self.coverages.iter())
            .map(|(mu0, theta)| mu0 + RT_ln(t, *theta))
            .collect()
    }
    fn partial_molar_entropies(&self) -> Vec<f64> {
        self.standard_entropies()
            .iter()
            .zip(self.coverages.iter())
            .map(|(s0, theta)| s0 - GAS_CONSTANT * theta.max(SMALL_NUMBER).ln())
            .collect()
    }
    /// interfaces have no volume
    fn molar_volume(&self) -> f64 {
        0.0
    }
    fn set_molar_density(&mut self, density: f64) -> Result<(), ThermoError> {
        if density != 0.0 {
            return Err(ThermoError::InvalidStateAccess(format!(
                "the volume of interface '{}' is zero; cannot set molar density {}",
                self.name, density
            )));
        }
        Ok(())
    }
}
