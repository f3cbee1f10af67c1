/////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
/////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::Examples::mechanisms::{
        PT_SITE_DENSITY, charge_transfer_electrode, hydrogen_gas, hydrogen_on_platinum,
        hydrogen_on_platinum_adsorption,
    };
    use crate::Kinetics::interface_kinetics::InterfaceKinetics;
    use crate::Kinetics::kinetics_error::KineticsError;
    use crate::Kinetics::phase_linkage::PhaseStability;
    use crate::Kinetics::rate_expressions::{
        ArrheniusRate, CoverageDependency, InterfaceArrheniusRate, RateExpression, StickingRate,
    };
    use crate::Kinetics::reaction::Reaction;
    use crate::Thermodynamics::phase::ThermoPhaseTrait;
    use crate::constants::{FARADAY, GAS_CONSTANT, ONE_ATM};
    use approx::assert_relative_eq;
    use serde_json::json;

    const GAS: usize = 0;
    const SURF: usize = 1;
    // kinetics species of the hydrogen mechanism
    const H2: usize = 0;
    const H: usize = 1;
    const PT_S: usize = 3;
    const H_S: usize = 4;

    fn rates(kin: &mut InterfaceKinetics) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let n = kin.n_reactions();
        let (mut f, mut r, mut net) = (vec![0.0; n], vec![0.0; n], vec![0.0; n]);
        kin.get_fwd_rates_of_progress(&mut f).unwrap();
        kin.get_rev_rates_of_progress(&mut r).unwrap();
        kin.get_net_rates_of_progress(&mut net).unwrap();
        (f, r, net)
    }

    /// gas-only mechanism H2 <=> 2 H
    #[allow(non_snake_case)]
    fn dissociation(T: f64, P: f64) -> InterfaceKinetics {
        let mut gas = hydrogen_gas();
        gas.set_state_TPX(T, P, &[0.6, 0.1, 0.3]).unwrap();
        let mut kin = InterfaceKinetics::new(vec![gas.into()]).unwrap();
        kin.add_reaction(Reaction::new(
            "H2 <=> 2 H",
            vec![(H2, 1.0)],
            vec![(H, 2.0)],
            true,
            ArrheniusRate::new(4.6e16, -1.4, 436.0e6),
        ))
        .unwrap();
        kin
    }

    #[test]
    fn species_and_phase_lookup() {
        let kin = hydrogen_on_platinum(500.0, ONE_ATM, 0.5, 0.0).unwrap();
        assert_eq!(kin.n_phases(), 2);
        assert_eq!(kin.n_species(), 5);
        assert_eq!(kin.n_reactions(), 3);
        assert_eq!(kin.surface_phase_index(), Some(SURF));
        assert_eq!(kin.kinetics_species_index("H(S)"), Some(H_S));
        assert_eq!(kin.kinetics_species_index("AR"), Some(2));
        assert_eq!(kin.kinetics_species_index("XX"), None);
        assert_eq!(kin.species_name(PT_S), Some("PT(S)"));
        assert_eq!(kin.phase_index("Pt_surf"), Some(SURF));
        assert_eq!(kin.reactant_stoich_coeff(PT_S, 0), 2.0);
        assert_eq!(kin.product_stoich_coeff(H_S, 0), 2.0);
        assert!(!kin.is_reversible(2));
        assert!(matches!(
            kin.thermo(7),
            Err(KineticsError::IndexOutOfRange { what: "phase", index: 7, .. })
        ));
        assert_eq!(kin.phase_offset(SURF), Ok(PT_S));
        assert!(matches!(
            kin.phase_offset(2),
            Err(KineticsError::IndexOutOfRange { what: "phase", index: 2, size: 2 })
        ));
    }

    #[test]
    fn sticking_rate_constant() {
        for t in [300.0, 500.0, 900.0] {
            let mut kin = hydrogen_on_platinum(t, ONE_ATM, 0.5, 0.0).unwrap();
            let mut kf = vec![0.0; 3];
            kin.get_fwd_rate_constants(&mut kf).unwrap();
            assert_relative_eq!(kf[0], 4.4579e7 * f64::sqrt(t), max_relative = 1e-3);
            let gamma = 0.046 / (1.0 - 0.023);
            let expected = gamma * (GAS_CONSTANT * t / (2.0 * std::f64::consts::PI * 2.016)).sqrt()
                / PT_SITE_DENSITY;
            assert_relative_eq!(kf[0], expected, max_relative = 1e-12);
            // H sticks with gamma = 1, doubled by the Motz-Wise correction
            let expected = 2.0 * (GAS_CONSTANT * t / (2.0 * std::f64::consts::PI * 1.008)).sqrt()
                / PT_SITE_DENSITY;
            assert_relative_eq!(kf[1], expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn coverage_dependent_rate_constant() {
        let t = 500.0;
        let mut kin = hydrogen_on_platinum(t, ONE_ATM, 0.5, 0.0).unwrap();
        let mut kf = vec![0.0; 3];
        kin.get_fwd_rate_constants(&mut kf).unwrap();
        assert_relative_eq!(kf[2], 3.7e20 * (-67.4e6 / (GAS_CONSTANT * t)).exp(), max_relative = 1e-12);

        kin.set_surface_coverages(SURF, &[0.7, 0.3]).unwrap();
        kin.get_fwd_rate_constants(&mut kf).unwrap();
        let expected = 3.7e20 * (-(67.4e6 - 6.0e6 * 0.3) / (GAS_CONSTANT * t)).exp();
        assert_relative_eq!(kf[2], expected, max_relative = 1e-12);

        let (ropf, ropr, _) = rates(&mut kin);
        let c_h = 0.3 * PT_SITE_DENSITY;
        assert_relative_eq!(ropf[2], expected * c_h * c_h, max_relative = 1e-12);
        assert_eq!(ropr, vec![0.0; 3]);
    }

    #[test]
    fn rates_follow_orders_and_production_balances() {
        let mut kin = hydrogen_on_platinum(500.0, ONE_ATM, 0.5, 1e-4).unwrap();
        kin.set_surface_coverages(SURF, &[0.4, 0.6]).unwrap();
        let mut kf = vec![0.0; 3];
        kin.get_fwd_rate_constants(&mut kf).unwrap();
        let mut conc = vec![0.0; 5];
        kin.get_activity_concentrations(&mut conc).unwrap();
        let c_gas = ONE_ATM / (GAS_CONSTANT * 500.0);
        assert_relative_eq!(conc[H2], 0.5 * c_gas, max_relative = 1e-12);
        assert_relative_eq!(conc[PT_S], 0.4 * PT_SITE_DENSITY, max_relative = 1e-12);

        let (ropf, _, net) = rates(&mut kin);
        // order 1 in PT(S) although its coefficient is 2
        assert_relative_eq!(ropf[0], kf[0] * conc[H2] * conc[PT_S], max_relative = 1e-12);
        assert_relative_eq!(ropf[1], kf[1] * conc[H] * conc[PT_S], max_relative = 1e-12);

        let mut wdot = vec![0.0; 5];
        let mut cdot = vec![0.0; 5];
        let mut ddot = vec![0.0; 5];
        kin.get_net_production_rates(&mut wdot).unwrap();
        kin.get_creation_rates(&mut cdot).unwrap();
        kin.get_destruction_rates(&mut ddot).unwrap();
        for k in 0..5 {
            assert_relative_eq!(wdot[k], cdot[k] - ddot[k], epsilon = 1e-20, max_relative = 1e-12);
        }
        assert_relative_eq!(wdot[H_S], 2.0 * net[0] + net[1] - 2.0 * net[2], max_relative = 1e-12);
        // sites are conserved
        assert_relative_eq!(wdot[PT_S] + wdot[H_S], 0.0, epsilon = 1e-12 * wdot[H_S].abs());
        assert_eq!(wdot[2], 0.0);
    }

    #[test]
    fn gas_equilibrium_constant() {
        let (t, p) = (1500.0, 2.0 * ONE_ATM);
        let mut kin = dissociation(t, p);
        let mut kc = vec![0.0];
        kin.get_equilibrium_constants(&mut kc).unwrap();

        let gas = hydrogen_gas();
        let g: Vec<f64> = gas.species().iter().map(|s| s.thermo.gibbs(t)).collect();
        let rt = GAS_CONSTANT * t;
        let expected = (-(2.0 * g[H] - g[H2]) / rt).exp() * (ONE_ATM / rt);
        assert_relative_eq!(kc[0], expected, max_relative = 1e-10);

        let mut kf = vec![0.0];
        let mut kr = vec![0.0];
        kin.get_fwd_rate_constants(&mut kf).unwrap();
        kin.get_rev_rate_constants(&mut kr).unwrap();
        assert_eq!(kr[0], kf[0] / kc[0]);

        let mut dg0 = vec![0.0];
        let mut dg = vec![0.0];
        kin.get_delta_ss_gibbs(&mut dg0).unwrap();
        kin.get_delta_gibbs(&mut dg).unwrap();
        assert_relative_eq!(dg0[0], 2.0 * g[H] - g[H2] + rt * (p / ONE_ATM).ln(), max_relative = 1e-12);
        assert_relative_eq!(dg[0], dg0[0] + rt * (0.1_f64.powi(2) / 0.6).ln(), max_relative = 1e-12);

        let mut dh = vec![0.0];
        let mut ds0 = vec![0.0];
        kin.get_delta_ss_enthalpy(&mut dh).unwrap();
        kin.get_delta_ss_entropy(&mut ds0).unwrap();
        let h: Vec<f64> = gas.species().iter().map(|s| s.thermo.enthalpy(t)).collect();
        assert_relative_eq!(dh[0], 2.0 * h[H] - h[H2], max_relative = 1e-12);
        let mut dh_partial = vec![0.0];
        kin.get_delta_enthalpy(&mut dh_partial).unwrap();
        assert_relative_eq!(dh_partial[0], dh[0], max_relative = 1e-12);
        let mut ds = vec![0.0];
        kin.get_delta_entropy(&mut ds).unwrap();
        assert_relative_eq!(dg[0], dh[0] - t * ds[0], max_relative = 1e-9);
        assert_relative_eq!(dg0[0], dh[0] - t * ds0[0], max_relative = 1e-9);
    }

    #[test]
    fn irreversible_reactions_have_no_reverse_rate() {
        let mut kin = hydrogen_on_platinum(500.0, ONE_ATM, 0.5, 0.0).unwrap();
        let mut kr = vec![1.0; 3];
        kin.get_rev_rate_constants(&mut kr).unwrap();
        assert_eq!(kr, vec![0.0; 3]);
        // the thermodynamic constant is still reported
        let mut kc = vec![0.0; 3];
        kin.get_equilibrium_constants(&mut kc).unwrap();
        assert!(kc.iter().all(|k| *k > 0.0));
    }

    #[test]
    fn electric_potential_shifts_rates() {
        let t = 300.0;
        let mut kin = charge_transfer_electrode(t, 0.5).unwrap();
        let read = |kin: &mut InterfaceKinetics| {
            let (mut kf, mut kr, mut kc) = (vec![0.0], vec![0.0], vec![0.0]);
            kin.get_fwd_rate_constants(&mut kf).unwrap();
            kin.get_rev_rate_constants(&mut kr).unwrap();
            kin.get_equilibrium_constants(&mut kc).unwrap();
            (kf[0], kr[0], kc[0])
        };
        let (kf0, kr0, kc0) = read(&mut kin);

        let phi = 0.1;
        kin.set_electric_potential(0, phi).unwrap();
        let (kf1, kr1, kc1) = read(&mut kin);
        // dE = sum nu z F phi = -F phi (the electron goes into the metal)
        let de = -FARADAY * phi;
        let rt = GAS_CONSTANT * t;
        assert_relative_eq!(kc1 / kc0, (-de / rt).exp(), max_relative = 1e-10);
        assert_relative_eq!(kf1 / kf0, (-0.5 * de / rt).exp(), max_relative = 1e-10);
        assert_relative_eq!(kr1 / kr0, (0.5 * de / rt).exp(), max_relative = 1e-10);
        assert_eq!(kr1, kf1 / kc1);

        let mut delta = vec![0.0];
        kin.get_delta_electrochem_potentials(&mut delta).unwrap();
        let mut dg = vec![0.0];
        kin.get_delta_gibbs(&mut dg).unwrap();
        assert_relative_eq!(delta[0], dg[0] + de, max_relative = 1e-10);

        kin.set_electric_potential(0, 0.0).unwrap();
        let (kf2, kr2, kc2) = read(&mut kin);
        assert_relative_eq!(kf2, kf0, max_relative = 1e-14);
        assert_relative_eq!(kr2, kr0, max_relative = 1e-14);
        assert_relative_eq!(kc2, kc0, max_relative = 1e-14);
    }

    #[test]
    fn interface_current_of_charge_transfer() {
        let mut kin = charge_transfer_electrode(300.0, 0.5).unwrap();
        kin.set_electric_potential(0, 0.6).unwrap();
        let (_, _, net) = rates(&mut kin);
        assert!(net[0] > 0.0);
        let i_metal = kin.interface_current(0).unwrap();
        let i_electrolyte = kin.interface_current(1).unwrap();
        assert_relative_eq!(i_metal, -FARADAY * net[0], max_relative = 1e-12);
        assert_relative_eq!(i_metal + i_electrolyte, 0.0, epsilon = 1e-12 * i_metal.abs());
        assert_eq!(kin.interface_current(2).unwrap(), 0.0);
    }

    #[test]
    fn missing_phase_switches_off_its_reactions() {
        let mut kin = hydrogen_on_platinum(500.0, ONE_ATM, 0.5, 1e-4).unwrap();
        kin.set_surface_coverages(SURF, &[0.5, 0.5]).unwrap();
        let (before, _, _) = rates(&mut kin);
        assert!(before.iter().all(|r| *r > 0.0));

        kin.set_phase_existence(GAS, false).unwrap();
        assert!(!kin.phase_existence(GAS).unwrap());
        assert_eq!(kin.phase_stability(GAS).unwrap(), PhaseStability::Unstable);
        let (ropf, ropr, _) = rates(&mut kin);
        assert_eq!(ropf[0], 0.0);
        assert_eq!(ropf[1], 0.0);
        // desorption into a missing (hence unstable) gas is clipped as well
        assert_eq!(ropf[2], 0.0);
        assert_eq!(ropr[2], 0.0);

        // a missing but stable gas only blocks the adsorption steps
        kin.set_phase_stability(GAS, true).unwrap();
        let (ropf, _, _) = rates(&mut kin);
        assert_eq!(ropf[0], 0.0);
        assert_eq!(ropf[2], before[2]);

        kin.set_phase_existence(GAS, true).unwrap();
        assert_eq!(kin.phase_stability(GAS).unwrap(), PhaseStability::Stable);
        let (ropf, _, _) = rates(&mut kin);
        assert_eq!(ropf, before);
    }

    #[test]
    fn unstable_phases_clip_rates() {
        let mut kin = charge_transfer_electrode(300.0, 0.5).unwrap();
        // Kc is about 200 at this potential: net rate forward
        kin.set_electric_potential(0, 0.6).unwrap();
        let (ropf, ropr, net) = rates(&mut kin);
        assert!(net[0] > 0.0 && ropr[0] > 0.0);
        kin.set_phase_stability(1, false).unwrap();
        let (f, r, n) = rates(&mut kin);
        assert_eq!(f[0], ropr[0]);
        assert_eq!(r[0], ropr[0]);
        assert_eq!(n[0], 0.0);
        kin.set_phase_stability(1, true).unwrap();
        let (f, _, _) = rates(&mut kin);
        assert_eq!(f[0], ropf[0]);

        // Kc is tiny here: net rate backward, clipped when a reactant phase is unstable
        kin.set_electric_potential(0, -0.2).unwrap();
        let (ropf, _, net) = rates(&mut kin);
        assert!(net[0] < 0.0);
        kin.set_phase_stability(2, false).unwrap();
        let (_, r, n) = rates(&mut kin);
        assert_eq!(r[0], ropf[0]);
        assert_eq!(n[0], 0.0);
    }

    #[test]
    fn failed_refresh_keeps_previous_rates() {
        let mut kin = hydrogen_on_platinum(500.0, ONE_ATM, 0.5, 0.0).unwrap();
        kin.set_surface_coverages(SURF, &[0.6, 0.4]).unwrap();
        let mut kf = vec![0.0; 3];
        kin.get_fwd_rate_constants(&mut kf).unwrap();
        let (ropf, _, _) = rates(&mut kin);
        let original = kin.reaction(2).unwrap().rate.clone();

        let overflow = InterfaceArrheniusRate::new(ArrheniusRate::new(1e300, 10.0, 0.0), Vec::new());
        kin.modify_reaction_rate(2, overflow.into()).unwrap();
        let mut out = vec![0.0; 3];
        assert!(matches!(
            kin.get_fwd_rate_constants(&mut out),
            Err(KineticsError::InvalidState(_))
        ));
        assert_eq!(out, vec![0.0; 3]);

        kin.modify_reaction_rate(2, original).unwrap();
        kin.get_fwd_rate_constants(&mut out).unwrap();
        assert_eq!(out, kf);
        let (after, _, _) = rates(&mut kin);
        assert_eq!(after, ropf);
    }

    #[test]
    fn overflowing_reverse_rate_constant_is_invalid_state() {
        // Kc of H2 <=> 2 H at 300 K is about 1e-72, so kr = kf / Kc leaves the f64 range
        let mut kin = dissociation(300.0, ONE_ATM);
        let mut kr = vec![0.0; 1];
        kin.get_rev_rate_constants(&mut kr).unwrap();
        assert!(kr[0].is_finite());
        let mut kc = vec![0.0; 1];
        kin.get_equilibrium_constants(&mut kc).unwrap();
        assert!(kc[0] < 1e-60);

        kin.modify_reaction_rate(0, ArrheniusRate::new(1e250, 0.0, 0.0).into())
            .unwrap();
        let mut out = vec![0.0; 1];
        assert!(matches!(
            kin.get_rev_rate_constants(&mut out),
            Err(KineticsError::InvalidState(_))
        ));
        assert_eq!(out, vec![0.0]);

        kin.modify_reaction_rate(0, ArrheniusRate::new(4.6e16, -1.4, 436.0e6).into())
            .unwrap();
        kin.get_rev_rate_constants(&mut out).unwrap();
        assert_eq!(out, kr);
    }

    #[test]
    fn modify_reaction_rate_updates_constants() {
        let mut kin = hydrogen_on_platinum(500.0, ONE_ATM, 0.5, 0.0).unwrap();
        let mut kf = vec![0.0; 3];
        kin.get_fwd_rate_constants(&mut kf).unwrap();
        let faster = StickingRate::new(ArrheniusRate::new(0.092, 0.0, 0.0), false, None);
        kin.modify_reaction_rate(0, faster.into()).unwrap();
        let mut kf2 = vec![0.0; 3];
        kin.get_fwd_rate_constants(&mut kf2).unwrap();
        assert_relative_eq!(kf2[0] / kf[0], 0.092 / (0.046 / 0.977), max_relative = 1e-12);
        assert_eq!(kf2[1], kf[1]);

        let wrong_kind = RateExpression::from(ArrheniusRate::new(1.0, 0.0, 0.0));
        assert!(matches!(
            kin.modify_reaction_rate(0, wrong_kind),
            Err(KineticsError::InvalidReactionData { reaction: 0, .. })
        ));
        assert!(matches!(
            kin.modify_reaction_rate(9, ArrheniusRate::new(1.0, 0.0, 0.0).into()),
            Err(KineticsError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn mechanism_freezes_after_first_evaluation() {
        let mut kin = hydrogen_on_platinum(500.0, ONE_ATM, 0.5, 0.0).unwrap();
        let mut wdot = vec![0.0; 5];
        kin.get_net_production_rates(&mut wdot).unwrap();
        let late = Reaction::new(
            "H + H(S) => H2 + PT(S)",
            vec![(H, 1.0), (H_S, 1.0)],
            vec![(H2, 1.0), (PT_S, 1.0)],
            false,
            InterfaceArrheniusRate::new(ArrheniusRate::new(1e10, 0.0, 0.0), Vec::new()),
        );
        assert!(matches!(
            kin.add_reaction(late),
            Err(KineticsError::InvalidReactionData { reaction: 3, .. })
        ));
        assert_eq!(kin.n_reactions(), 3);
    }

    #[test]
    fn invalid_reactions_are_rejected_atomically() {
        let mut kin = hydrogen_on_platinum_adsorption(500.0, ONE_ATM, 0.5, 0.0).unwrap();
        // unknown species
        let bad = Reaction::new(
            "X => H(S)",
            vec![(42, 1.0)],
            vec![(H_S, 1.0)],
            false,
            ArrheniusRate::new(1.0, 0.0, 0.0),
        );
        assert!(kin.add_reaction(bad).is_err());
        // two bulk reactants: the sticking species is ambiguous
        let bad = Reaction::new(
            "H2 + H + PT(S) => 3 H(S)",
            vec![(H2, 1.0), (H, 1.0), (PT_S, 1.0)],
            vec![(H_S, 3.0)],
            false,
            StickingRate::new(ArrheniusRate::new(0.1, 0.0, 0.0), false, None),
        );
        assert!(kin.add_reaction(bad).is_err());
        // coverage dependency on a species that is not on the surface
        let bad = Reaction::new(
            "2 H(S) => H2 + 2 PT(S)",
            vec![(H_S, 2.0)],
            vec![(H2, 1.0), (PT_S, 2.0)],
            false,
            InterfaceArrheniusRate::new(
                ArrheniusRate::new(1.0, 0.0, 0.0),
                vec![CoverageDependency::new("O(S)", 0.0, 0.0, 1e6)],
            ),
        );
        assert!(kin.add_reaction(bad).is_err());
        let bad = Reaction::new(
            "H + PT(S) => H(S)",
            vec![(H, 1.0), (PT_S, 1.0)],
            vec![(H_S, 1.0)],
            false,
            ArrheniusRate::new(1.0, 0.0, 0.0),
        )
        .with_beta(1.5);
        assert!(kin.add_reaction(bad).is_err());
        assert_eq!(kin.n_reactions(), 2);

        // the mechanism is still usable and accepts a valid reaction at the next index
        let named = Reaction::new(
            "H2 + H + 3 PT(S) => 3 H(S)",
            vec![(H2, 1.0), (H, 1.0), (PT_S, 3.0)],
            vec![(H_S, 3.0)],
            false,
            StickingRate::new(ArrheniusRate::new(0.1, 0.0, 0.0), false, Some("H")),
        );
        assert_eq!(kin.add_reaction(named).unwrap(), 2);
        let mut kf = vec![0.0; 3];
        kin.get_fwd_rate_constants(&mut kf).unwrap();
        let expected = 0.1 * (GAS_CONSTANT * 500.0 / (2.0 * std::f64::consts::PI * 1.008)).sqrt()
            / PT_SITE_DENSITY.powi(3);
        assert_relative_eq!(kf[2], expected, max_relative = 1e-12);
    }

    #[test]
    fn reaction_from_json() {
        let mut kin = hydrogen_on_platinum_adsorption(500.0, ONE_ATM, 0.5, 1e-4).unwrap();
        let record = json!({
            "equation": "H + PT(S) => H(S)",
            "reactants": [[H, 1.0], [PT_S, 1.0]],
            "products": [[H_S, 1.0]],
            "rate": {"type": "StickingArrhenius", "A": 1.0, "motz_wise": true}
        });
        let reaction: Reaction = serde_json::from_value(record).unwrap();
        assert!(!reaction.reversible);
        assert_eq!(reaction.beta, 0.0);
        kin.add_reaction(reaction).unwrap();
        let mut kf = vec![0.0; 3];
        kin.get_fwd_rate_constants(&mut kf).unwrap();
        assert_eq!(kf[2], kf[1]);
    }

    #[test]
    fn output_buffers_are_checked() {
        let mut kin = hydrogen_on_platinum(500.0, ONE_ATM, 0.5, 0.0).unwrap();
        let mut short = vec![0.0; 2];
        assert!(matches!(
            kin.get_fwd_rate_constants(&mut short),
            Err(KineticsError::ArraySize { expected: 3, got: 2, .. })
        ));
        let mut short = vec![0.0; 4];
        assert!(matches!(
            kin.get_net_production_rates(&mut short),
            Err(KineticsError::ArraySize { expected: 5, got: 4, .. })
        ));
        assert!(kin.set_temperature(-5.0).is_err());
        assert!(kin.set_electric_potential(0, f64::NAN).is_err());
        assert!(kin.set_phase_existence(5, false).is_err());
    }

    #[test]
    fn temperature_change_refreshes_everything() {
        let mut kin = hydrogen_on_platinum(500.0, ONE_ATM, 0.5, 0.0).unwrap();
        let mut kf = vec![0.0; 3];
        kin.get_fwd_rate_constants(&mut kf).unwrap();
        kin.set_temperature(800.0).unwrap();
        assert_eq!(kin.temperature(), 800.0);
        let mut kf2 = vec![0.0; 3];
        kin.get_fwd_rate_constants(&mut kf2).unwrap();
        assert_relative_eq!(kf2[0] / kf[0], (800.0_f64 / 500.0).sqrt(), max_relative = 1e-12);
        // gas concentrations follow P/RT
        let mut conc = vec![0.0; 5];
        kin.get_activity_concentrations(&mut conc).unwrap();
        assert_relative_eq!(conc[H2], 0.5 * ONE_ATM / (GAS_CONSTANT * 800.0), max_relative = 1e-12);
    }

    #[test]
    fn rates_table_lists_every_reaction() {
        let mut kin = hydrogen_on_platinum(500.0, ONE_ATM, 0.5, 0.0).unwrap();
        let table = kin.rates_table().unwrap();
        assert_eq!(table.len(), 4);
        let text = table.to_string();
        assert!(text.contains("2 H(S) => H2 + 2 PT(S)"));
    }
}
