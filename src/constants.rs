//! Physical constants. Everything in the crate is SI with kmol as the amount unit,
//! so energies are J/kmol and concentrations kmol/m^3 (bulk) or kmol/m^2 (surface).

/// Universal gas constant, J/(kmol K)
pub const GAS_CONSTANT: f64 = 8314.46261815324;
/// Faraday constant, C/kmol
pub const FARADAY: f64 = 96485332.12331001;
/// One standard atmosphere, Pa
pub const ONE_ATM: f64 = 101325.0;
/// smallest number used to guard logarithms and fractional powers of coverages
pub const SMALL_NUMBER: f64 = 1.0e-300;
/// species coverages below this are treated as zero in coverage-dependency powers
pub const TINY: f64 = 1.0e-20;
