use crate::Thermodynamics::phase::{
    PhaseKind, RT_ln, Species, ThermoPhaseTrait, check_pressure, check_temperature, normalized,
};
use crate::Thermodynamics::thermo_error::ThermoError;
use crate::constants::{GAS_CONSTANT, ONE_ATM};

/// Incompressible condensed phase (a stoichiometric solid, a metal electrode holding
/// electrons, an ideal condensed solution). Standard concentration is 1 so the activity
/// concentration equals the mole fraction; properties do not depend on pressure.
#[derive(Debug, Clone)]
pub struct BulkPhase {
    pub name: String,
    species: Vec<Species>,
    mole_fractions: Vec<f64>,
    /// kmol/m^3
    molar_density: f64,
    temperature: f64,
    pressure: f64,
    phi: f64,
    state_number: u64,
}

impl BulkPhase {
    pub fn new(name: &str, species: Vec<Species>, molar_density: f64) -> Result<Self, ThermoError> {
        if !molar_density.is_finite() || molar_density <= 0.0 {
            return Err(ThermoError::InvalidState(format!(
                "molar density must be positive, got {}",
                molar_density
            )));
        }
        let n = species.len();
        let mut mole_fractions = vec![0.0; n];
        if n > 0 {
            mole_fractions[0] = 1.0;
        }
        Ok(Self {
            name: name.to_string(),
            species,
            mole_fractions,
            molar_density,
            temperature: 298.15,
            pressure: ONE_ATM,
            phi: 0.0,
            state_number: 0,
        })
    }
    pub fn mole_fractions(&self) -> &[f64] {
        &self.mole_fractions
    }
    pub fn set_mole_fractions(&mut self, x: &[f64]) -> Result<(), ThermoError> {
        self.mole_fractions = normalized(x, self.species.len())?;
        self.state_number = self.state_number.wrapping_add(1);
        Ok(())
    }
}

impl ThermoPhaseTrait for BulkPhase {
    fn name(&self) -> &str {
        &self.name
    }
    fn kind(&self) -> PhaseKind {
        PhaseKind::Bulk
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
        self.mole_fractions.clone()
    }
    fn standard_concentration(&self, _k: usize) -> f64 {
        1.0
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
            .zip(self.mole_fractions.iter())
            .map(|(mu0, x)| mu0 + RT_ln(t, *x))
            .collect()
    }
    fn partial_molar_entropies(&self) -> Vec<f64> {
        self.standard_entropies()
            .iter()
            .zip(self.mole_fractions.iter())
            .map(|(s0, x)| s0 - GAS_CONSTANT * x.max(crate::constants::SMALL_NUMBER).ln())
            .collect()
    }
    fn molar_volume(&self) -> f64 {
        1.0 / self.molar_density
    }
    fn set_molar_density(&mut self, density: f64) -> Result<(), ThermoError> {
        if density != self.molar_density {
            return Err(ThermoError::InvalidStateAccess(format!(
                "phase '{}' is incompressible; molar density is fixed at {}",
                self.name, self.molar_density
            )));
        }
        Ok(())
    }
}
