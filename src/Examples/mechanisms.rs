//! Small ready-made mechanisms used by the examples and the tests.
use crate::Kinetics::interface_kinetics::InterfaceKinetics;
use crate::Kinetics::kinetics_error::KineticsError;
use crate::Kinetics::rate_expressions::{
    ArrheniusRate, CoverageDependency, InterfaceArrheniusRate, StickingRate,
};
use crate::Kinetics::reaction::Reaction;
use crate::Thermodynamics::bulk_phase::BulkPhase;
use crate::Thermodynamics::ideal_gas::IdealGasPhase;
use crate::Thermodynamics::phase::{Species, ThermoPhaseTrait};
use crate::Thermodynamics::species_thermo::ConstCpThermo;
use crate::Thermodynamics::surf_phase::SurfPhase;

/// site density of Pt(111), kmol/m^2
pub const PT_SITE_DENSITY: f64 = 2.7063e-8;

pub fn hydrogen_gas() -> IdealGasPhase {
    IdealGasPhase::new(
        "gas",
        vec![
            Species::new("H2", 2.016, ConstCpThermo::new(298.15, 0.0, 130.68e3, 28.84e3)),
            Species::new("H", 1.008, ConstCpThermo::new(298.15, 217.998e6, 114.72e3, 20.79e3)),
            Species::new("AR", 39.95, ConstCpThermo::new(298.15, 0.0, 154.85e3, 20.79e3)),
        ],
    )
}

pub fn platinum_surface() -> Result<SurfPhase, KineticsError> {
    Ok(SurfPhase::new(
        "Pt_surf",
        vec![
            Species::new("PT(S)", 195.08, ConstCpThermo::default()),
            Species::new("H(S)", 1.008, ConstCpThermo::new(298.15, -32.6e6, 40.0e3, 0.0)),
        ],
        PT_SITE_DENSITY,
    )?)
}

/// H2 and H adsorption with sticking coefficients and recombinative desorption:
///
/// H2 + 2 PT(S) => 2 H(S)   gamma = 0.046, Motz-Wise, order 1 in PT(S)
/// H + PT(S) => H(S)        gamma = 1, Motz-Wise
/// 2 H(S) => H2 + 2 PT(S)   A = 3.7e20, Ea = 67.4 MJ/kmol lowered by 6 MJ/kmol per unit H(S) coverage
///
/// The gas holds H2, H and argon; the surface starts bare.
/// Kinetics species: H2 0, H 1, AR 2, PT(S) 3, H(S) 4.
#[allow(non_snake_case)]
pub fn hydrogen_on_platinum(T: f64, P: f64, x_h2: f64, x_h: f64) -> Result<InterfaceKinetics, KineticsError> {
    let mut kin = hydrogen_on_platinum_adsorption(T, P, x_h2, x_h)?;
    let desorption = InterfaceArrheniusRate::new(
        ArrheniusRate::new(3.7e20, 0.0, 67.4e6),
        vec![CoverageDependency::new("H(S)", 0.0, 0.0, -6.0e6)],
    );
    kin.add_reaction(Reaction::new(
        "2 H(S) => H2 + 2 PT(S)",
        vec![(4, 2.0)],
        vec![(0, 1.0), (3, 2.0)],
        false,
        desorption,
    ))?;
    Ok(kin)
}

/// the two adsorption steps of `hydrogen_on_platinum` without desorption
#[allow(non_snake_case)]
pub fn hydrogen_on_platinum_adsorption(
    T: f64,
    P: f64,
    x_h2: f64,
    x_h: f64,
) -> Result<InterfaceKinetics, KineticsError> {
    if !(0.0..=1.0).contains(&(x_h2 + x_h)) || x_h2 < 0.0 || x_h < 0.0 {
        return Err(KineticsError::InvalidState(format!(
            "mole fractions of H2 ({}) and H ({}) must be non-negative and sum to at most 1",
            x_h2, x_h
        )));
    }
    let mut gas = hydrogen_gas();
    gas.set_state_TPX(T, P, &[x_h2, x_h, 1.0 - x_h2 - x_h])?;
    let mut surf = platinum_surface()?;
    surf.set_temperature(T)?;
    surf.set_coverages(&[1.0, 0.0])?;

    let mut kin = InterfaceKinetics::new(vec![gas.into(), surf.into()])?;
    kin.add_reaction(
        Reaction::new(
            "H2 + 2 PT(S) => 2 H(S)",
            vec![(0, 1.0), (3, 2.0)],
            vec![(4, 2.0)],
            false,
            StickingRate::new(ArrheniusRate::new(0.046, 0.0, 0.0), true, None),
        )
        .with_orders(vec![(3, 1.0)]),
    )?;
    kin.add_reaction(Reaction::new(
        "H + PT(S) => H(S)",
        vec![(1, 1.0), (3, 1.0)],
        vec![(4, 1.0)],
        false,
        StickingRate::new(ArrheniusRate::new(1.0, 0.0, 0.0), true, None),
    ))?;
    Ok(kin)
}

/// Hydrogen oxidation at a Pt electrode in contact with an electrolyte:
///
/// H(S) <=> PT(S) + H+ + E-   beta = 0.5
///
/// Phases: metal (E-, charge -1), electrolyte (H+, charge +1), surface (PT(S), H(S)).
/// Kinetics species: E- 0, H+ 1, PT(S) 2, H(S) 3.
#[allow(non_snake_case)]
pub fn charge_transfer_electrode(T: f64, theta_h: f64) -> Result<InterfaceKinetics, KineticsError> {
    let mut metal = BulkPhase::new(
        "metal",
        vec![Species::new("E-", 5.4858e-4, ConstCpThermo::default()).with_charge(-1.0)],
        1.0,
    )?;
    metal.set_temperature(T)?;
    let mut electrolyte = BulkPhase::new(
        "electrolyte",
        vec![Species::new("H+", 1.007, ConstCpThermo::default()).with_charge(1.0)],
        1.0,
    )?;
    electrolyte.set_temperature(T)?;
    let mut surf = platinum_surface()?;
    surf.set_temperature(T)?;
    surf.set_coverages(&[1.0 - theta_h, theta_h])?;

    let mut kin = InterfaceKinetics::new(vec![metal.into(), electrolyte.into(), surf.into()])?;
    kin.add_reaction(
        Reaction::new(
            "H(S) <=> PT(S) + H+ + E-",
            vec![(3, 1.0)],
            vec![(2, 1.0), (1, 1.0), (0, 1.0)],
            true,
            InterfaceArrheniusRate::new(ArrheniusRate::new(5.0e13, 0.0, 20.0e6), Vec::new()),
        )
        .with_beta(0.5),
    )?;
    Ok(kin)
}
