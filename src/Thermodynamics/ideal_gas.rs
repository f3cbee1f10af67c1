use crate::Thermodynamics::phase::{
    PhaseKind, RT_ln, Species, ThermoPhaseTrait, check_pressure, check_temperature, dense_from_map,
    normalized,
};
use crate::Thermodynamics::thermo_error::ThermoError;
use crate::constants::{GAS_CONSTANT, ONE_ATM};
use std::collections::HashMap;

/// Ideal gas mixture. Activity concentrations are molar concentrations X_k P/RT and the
/// standard concentration is P/RT for every species.
#[derive(Debug, Clone)]
pub struct IdealGasPhase {
    pub name: String,
    species: Vec<Species>,
    mole_fractions: Vec<f64>,
    temperature: f64,
    pressure: f64,
    /// reference pressure of the species thermo, Pa
    pub ref_pressure: f64,
    phi: f64,
    state_number: u64,
}

impl IdealGasPhase {
    /// new phase at 298.15 K, 1 atm, composition entirely the first species
    pub fn new(name: &str, species: Vec<Species>) -> Self {
        let n = species.len();
        let mut mole_fractions = vec![0.0; n];
        if n > 0 {
            mole_fractions[0] = 1.0;
        }
        Self {
            name: name.to_string(),
            species,
            mole_fractions,
            temperature: 298.15,
            pressure: ONE_ATM,
            ref_pressure: ONE_ATM,
            phi: 0.0,
            state_number: 0,
        }
    }

    pub fn mole_fractions(&self) -> &[f64] {
        &self.mole_fractions
    }
    /// sets mole fractions; the input is normalized
    pub fn set_mole_fractions(&mut self, x: &[f64]) -> Result<(), ThermoError> {
        self.mole_fractions = normalized(x, self.species.len())?;
        self.state_number = self.state_number.wrapping_add(1);
        Ok(())
    }
    pub fn set_mole_fractions_by_name(&mut self, x: &HashMap<String, f64>) -> Result<(), ThermoError> {
        let dense = dense_from_map(&self.species, x)?;
        self.set_mole_fractions(&dense)
    }
    #[allow(non_snake_case)]
    pub fn set_state_TPX(&mut self, T: f64, P: f64, x: &[f64]) -> Result<(), ThermoError> {
        check_temperature(T)?;
        check_pressure(P)?;
        let x = normalized(x, self.species.len())?;
        self.temperature = T;
        self.pressure = P;
        self.mole_fractions = x;
        self.state_number = self.state_number.wrapping_add(1);
        Ok(())
    }
    /// total molar concentration P/RT, kmol/m^3
    pub fn molar_density(&self) -> f64 {
        self.pressure / (GAS_CONSTANT * self.temperature)
    }
    fn log_p_ratio(&self) -> f64 {
        (self.pressure / self.ref_pressure).ln()
    }
}

impl ThermoPhaseTrait for IdealGasPhase {
    fn name(&self) -> &str {
        &self.name
    }
    fn kind(&self) -> PhaseKind {
        PhaseKind::IdealGas
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
        self.state_number = self.state_number.wrapping_add(1);
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
        let c = self.molar_density();
        self.mole_fractions.iter().map(|x| x * c).collect()
    }
    fn standard_concentration(&self, _k: usize) -> f64 {
        self.molar_density()
    }
    fn standard_chem_potentials(&self) -> Vec<f64> {
        let t = self.temperature;
        let rt_lnp = GAS_CONSTANT * t * self.log_p_ratio();
        self.species.iter().map(|s| s.thermo.gibbs(t) + rt_lnp).collect()
    }
    fn standard_entropies(&self) -> Vec<f64> {
        let t = self.temperature;
        let r_lnp = GAS_CONSTANT * self.log_p_ratio();
        self.species.iter().map(|s| s.thermo.entropy(t) - r_lnp).collect()
    }
    fn chem_potentials(&self) -> Vec<f64> {
        let t = self.temperature;
        self.standard_chem_potentials()
            .iter()
            .zip(self.mole_fractions.iter())
            .map(|(mu0, x)| mu0 + RT_ln(t, *x))
            .collect()
    }
    fn partial_molar_entropies(&self) -> Vec<f64> {
        let t = self.temperature;
        self.standard_entropies()
            .iter()
            .zip(self.mole_fractions.iter())
            .map(|(s0, x)| s0 - RT_ln(t, *x) / t)
            .collect()
    }
    fn molar_volume(&self) -> f64 {
        1.0 / self.molar_density()
    }
    /// sets the pressure so that P = rho R T
    fn set_molar_density(&mut self, density: f64) -> Result<(), ThermoError> {
        if !density.is_finite() || density <= 0.0 {
            return Err(ThermoError::InvalidState(format!(
                "molar density must be positive, got {}",
                density
            )));
        }
        self.set_pressure(density * GAS_CONSTANT * self.temperature)
    }
}
