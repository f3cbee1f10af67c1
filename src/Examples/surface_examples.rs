use crate::Examples::mechanisms::{charge_transfer_electrode, hydrogen_on_platinum};
use crate::Kinetics::kinetics_error::KineticsError;
use crate::Kinetics::surface_solver::SteadyStateMethod;
use crate::constants::ONE_ATM;
use crate::settings::SurfaceSolverSettings;
use log::info;

pub fn surface_examples(task: usize, solver: &SurfaceSolverSettings) -> Result<(), KineticsError> {
    match task {
        0 => {
            // RATES OF A FRESH SURFACE
            let mut kin = hydrogen_on_platinum(500.0, ONE_ATM, 0.5, 1e-4)?;
            kin.pretty_print_rates()?;
            let mut wdot = vec![0.0; kin.n_species()];
            kin.get_net_production_rates(&mut wdot)?;
            for (k, w) in wdot.iter().enumerate() {
                info!("{:>6}: {:.4e} kmol/m^2/s", kin.species_name(k).unwrap_or("?"), w);
            }
        }
        1 => {
            // TRANSIENT COVERAGES
            let mut kin = hydrogen_on_platinum(500.0, ONE_ATM, 0.5, 0.0)?.with_settings(solver.clone());
            let surf = kin.surface_phase_index().unwrap_or(1);
            let mut t = 0.0;
            for dt in [1e-9, 1e-8, 1e-7, 1e-6, 1e-5] {
                kin.advance_coverages(dt)?;
                t += dt;
                info!("t = {:.3e} s, coverages {:?}", t, kin.surface_coverages(surf)?);
            }
        }
        2 => {
            // PSEUDO-STEADY STATE VERSUS GAS COMPOSITION
            for x_h2 in [0.001, 0.01, 0.1, 0.5] {
                let mut kin = hydrogen_on_platinum(500.0, ONE_ATM, x_h2, 0.0)?.with_settings(solver.clone());
                kin.solve_pseudo_steady_state(SteadyStateMethod::Auto, None)?;
                let surf = kin.surface_phase_index().unwrap_or(1);
                info!("X(H2) = {}: theta(H) = {:.5}", x_h2, kin.surface_coverages(surf)?[1]);
            }
        }
        3 => {
            // CURRENT OF A CHARGE-TRANSFER REACTION VERSUS ELECTRODE POTENTIAL
            let mut kin = charge_transfer_electrode(300.0, 0.5)?;
            for phi in [-0.1, 0.0, 0.1, 0.2] {
                kin.set_electric_potential(0, phi)?;
                info!("phi = {:+.2} V: i = {:.4e} A/m^2", phi, kin.interface_current(0)?);
            }
            kin.pretty_print_rates()?;
        }
        _ => info!("no surface example with number {}", task),
    }
    Ok(())
}
