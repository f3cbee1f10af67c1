/////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
/////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::Kinetics::kinetics_error::KineticsError;
    use crate::Kinetics::stoich_manager::ReactionStoichMgr;
    use approx::assert_relative_eq;

    // species indices
    const H: usize = 0;
    const O: usize = 1;
    const H2O: usize = 2;
    const OH: usize = 3;
    const H2: usize = 4;
    const O2: usize = 5;
    const NSP: usize = 6;

    /// 2 H2O => 1.4 H + 0.6 OH + 0.2 O2
    /// 0.7 H2 + 0.6 OH + 0.2 O2 => H2O  with orders H2:0.8, OH:2, O2:1
    /// H + O2 <=> O + OH
    fn frac_mechanism() -> ReactionStoichMgr {
        let mut mgr = ReactionStoichMgr::new();
        mgr.add_general(0, &[(H2O, 2.0)], &[(H, 1.4), (OH, 0.6), (O2, 0.2)], None, false)
            .unwrap();
        mgr.add_general(
            1,
            &[(H2, 0.7), (OH, 0.6), (O2, 0.2)],
            &[(H2O, 1.0)],
            Some(&[(H2, 0.8), (OH, 2.0), (O2, 1.0)]),
            false,
        )
        .unwrap();
        mgr.add(2, &[H, O2], &[O, OH], true).unwrap();
        mgr
    }

    #[test]
    fn fractional_coefficients_creation_and_destruction() {
        let mgr = frac_mechanism();
        let ropf = [1.0, 2.0, 0.5];
        let ropr = [0.0, 0.0, 0.25];
        let mut cdot = [0.0; NSP];
        let mut ddot = [0.0; NSP];
        mgr.get_creation_rates(NSP, &ropf, &ropr, &mut cdot).unwrap();
        mgr.get_destruction_rates(NSP, &ropf, &ropr, &mut ddot).unwrap();

        assert_relative_eq!(cdot[H], 1.4 + 0.25, epsilon = 1e-14);
        assert_relative_eq!(cdot[OH], 0.6 + 0.5, epsilon = 1e-14);
        assert_relative_eq!(cdot[O2], 0.2 + 0.25, epsilon = 1e-14);
        assert_relative_eq!(cdot[H2O], 2.0, epsilon = 1e-14);
        assert_relative_eq!(cdot[O], 0.5, epsilon = 1e-14);
        assert_eq!(cdot[H2], 0.0);

        assert_relative_eq!(ddot[H2O], 2.0, epsilon = 1e-14);
        assert_relative_eq!(ddot[H2], 1.4, epsilon = 1e-14);
        assert_relative_eq!(ddot[OH], 1.2 + 0.25, epsilon = 1e-14);
        assert_relative_eq!(ddot[O2], 0.4 + 0.5, epsilon = 1e-14);
        assert_relative_eq!(ddot[H], 0.5, epsilon = 1e-14);
        assert_relative_eq!(ddot[O], 0.25, epsilon = 1e-14);
    }

    #[test]
    fn explicit_orders_enter_mass_action_products() {
        let mgr = frac_mechanism();
        let c = [0.3, 0.1, 2.0, 0.5, 0.9, 0.2];
        let mut r = [1.0; 3];
        mgr.multiply_reactants(&c, &mut r);
        assert_relative_eq!(r[0], 4.0, epsilon = 1e-14);
        assert_relative_eq!(r[1], 0.9_f64.powf(0.8) * 0.25 * 0.2, epsilon = 1e-14);
        assert_relative_eq!(r[2], 0.3 * 0.2, epsilon = 1e-14);

        let mut rr = [1.0; 3];
        mgr.multiply_rev_products(&c, &mut rr);
        // only the reversible reaction has reverse products
        assert_eq!(rr[0], 1.0);
        assert_eq!(rr[1], 1.0);
        assert_relative_eq!(rr[2], 0.1 * 0.5, epsilon = 1e-14);
    }

    #[test]
    fn fractional_order_of_zero_concentration_is_zero() {
        let mgr = frac_mechanism();
        let c = [0.3, 0.1, 2.0, 0.5, 0.0, 0.2];
        let mut r = [1.0; 3];
        mgr.multiply_reactants(&c, &mut r);
        assert_eq!(r[1], 0.0);
    }

    #[test]
    fn stoich_coefficient_queries() {
        let mgr = frac_mechanism();
        assert_eq!(mgr.reactant_stoich_coeff(H2O, 0), 2.0);
        assert_eq!(mgr.product_stoich_coeff(H, 0), 1.4);
        assert_eq!(mgr.reactant_stoich_coeff(H, 0), 0.0);
        assert_eq!(mgr.product_stoich_coeff(H2O, 1), 1.0);
        assert!(mgr.is_reversible(2));
        assert!(!mgr.is_reversible(0));
        assert!(!mgr.is_reversible(17));
    }

    #[test]
    fn net_production_equals_creation_minus_destruction() {
        let mgr = frac_mechanism();
        let ropf = [0.7, 1.3, 2.2];
        let ropr = [0.0, 0.0, 1.9];
        let ropnet: Vec<f64> = ropf.iter().zip(ropr.iter()).map(|(f, r)| f - r).collect();
        let mut cdot = [0.0; NSP];
        let mut ddot = [0.0; NSP];
        let mut wdot = [0.0; NSP];
        mgr.get_creation_rates(NSP, &ropf, &ropr, &mut cdot).unwrap();
        mgr.get_destruction_rates(NSP, &ropf, &ropr, &mut ddot).unwrap();
        mgr.get_net_production_rates(NSP, &ropnet, &mut wdot).unwrap();
        for k in 0..NSP {
            assert_relative_eq!(wdot[k], cdot[k] - ddot[k], epsilon = 1e-13);
        }
    }

    /// deterministic linear congruential sequence for reproducible "random" mechanisms
    struct Lcg(u64);
    impl Lcg {
        fn next(&mut self) -> u64 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            self.0 >> 33
        }
        fn below(&mut self, n: u64) -> usize {
            (self.next() % n) as usize
        }
    }

    #[test]
    fn creation_matches_direct_expansion_for_many_mechanisms() {
        let mut rng = Lcg(12345);
        for _trial in 0..20 {
            let n_species = 8;
            let n_reactions = 12;
            let mut mgr = ReactionStoichMgr::new();
            let mut reactions: Vec<(Vec<(usize, f64)>, Vec<(usize, f64)>, bool)> = Vec::new();
            for i in 0..n_reactions {
                let side = |rng: &mut Lcg| -> Vec<(usize, f64)> {
                    let n = 1 + rng.below(4);
                    (0..n)
                        .map(|_| {
                            let k = rng.below(n_species as u64);
                            let nu = if rng.below(3) == 0 {
                                0.5 * (1 + rng.below(5)) as f64
                            } else {
                                (1 + rng.below(3)) as f64
                            };
                            (k, nu)
                        })
                        .collect()
                };
                let r = side(&mut rng);
                let p = side(&mut rng);
                let reversible = rng.below(2) == 0;
                mgr.add_general(i, &r, &p, None, reversible).unwrap();
                reactions.push((r, p, reversible));
            }
            let ropf: Vec<f64> = (0..n_reactions).map(|_| rng.below(1000) as f64 / 100.0).collect();
            let ropr: Vec<f64> = reactions
                .iter()
                .map(|(_, _, rev)| if *rev { rng.below(1000) as f64 / 100.0 } else { 0.0 })
                .collect();

            let mut cdot = vec![0.0; n_species];
            let mut ddot = vec![0.0; n_species];
            mgr.get_creation_rates(n_species, &ropf, &ropr, &mut cdot).unwrap();
            mgr.get_destruction_rates(n_species, &ropf, &ropr, &mut ddot).unwrap();

            let mut cdot_direct = vec![0.0; n_species];
            let mut ddot_direct = vec![0.0; n_species];
            for (i, (r, p, rev)) in reactions.iter().enumerate() {
                for (k, nu) in p {
                    cdot_direct[*k] += nu * ropf[i];
                    if *rev {
                        ddot_direct[*k] += nu * ropr[i];
                    }
                }
                for (k, nu) in r {
                    cdot_direct[*k] += nu * ropr[i];
                    ddot_direct[*k] += nu * ropf[i];
                }
            }
            for k in 0..n_species {
                assert_relative_eq!(cdot[k], cdot_direct[k], epsilon = 1e-10, max_relative = 1e-12);
                assert_relative_eq!(ddot[k], ddot_direct[k], epsilon = 1e-10, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn integer_terms_use_specialised_storage() {
        let mut mgr = ReactionStoichMgr::new();
        mgr.add(0, &[0], &[1], true).unwrap();
        mgr.add(1, &[0, 2, 2], &[1, 1], false).unwrap();
        mgr.add(2, &[0, 1, 2, 3], &[4], false).unwrap();
        // reactants: one single, one triple, one general (four species)
        assert_eq!(mgr.storage_summary()[0], [1, 0, 1, 1]);
        // products: reversible single, irreversible double and single
        assert_eq!(mgr.storage_summary()[1], [1, 0, 0, 0]);
        assert_eq!(mgr.storage_summary()[2], [1, 1, 0, 0]);
        assert_eq!(mgr.reactant_stoich_coeff(2, 1), 2.0);
        assert_eq!(mgr.product_stoich_coeff(1, 1), 2.0);
    }

    #[test]
    fn net_terms_drop_species_on_both_sides() {
        let mut mgr = ReactionStoichMgr::new();
        // A + B -> A + C: A is a spectator
        mgr.add(0, &[0, 1], &[0, 2], false).unwrap();
        assert_eq!(mgr.net_terms(0), vec![(2, 1.0), (1, -1.0)]);
        let mut wdot = [9.0; 3];
        mgr.get_net_production_rates(3, &[2.0], &mut wdot).unwrap();
        assert_eq!(wdot, [0.0, -2.0, 2.0]);
    }

    #[test]
    fn rev_reaction_delta_writes_only_reversible_slots() {
        let mgr = frac_mechanism();
        let g = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut dg = [99.0; 3];
        mgr.get_rev_reaction_delta(3, &g, &mut dg).unwrap();
        assert_eq!(dg[0], 99.0);
        assert_eq!(dg[1], 99.0);
        assert_relative_eq!(dg[2], (2.0 + 4.0) - (1.0 + 6.0));

        let mut all = [0.0; 3];
        mgr.get_reaction_delta(3, &g, &mut all).unwrap();
        assert_relative_eq!(all[0], 1.4 * 1.0 + 0.6 * 4.0 + 0.2 * 6.0 - 2.0 * 3.0, epsilon = 1e-14);
        assert_relative_eq!(all[2], dg[2]);
    }

    #[test]
    fn malformed_reactions_are_rejected() {
        let mut mgr = ReactionStoichMgr::new();
        assert!(matches!(
            mgr.add(0, &[], &[1], false),
            Err(KineticsError::InvalidReactionData { reaction: 0, .. })
        ));
        assert!(matches!(
            mgr.add(0, &[0], &[], false),
            Err(KineticsError::InvalidReactionData { .. })
        ));
        assert!(matches!(
            mgr.add(3, &[0], &[1], false),
            Err(KineticsError::InvalidReactionData { reaction: 3, .. })
        ));
        assert!(matches!(
            mgr.add_general(0, &[(0, -1.0)], &[(1, 1.0)], None, false),
            Err(KineticsError::InvalidReactionData { .. })
        ));
        assert!(matches!(
            mgr.add_general(0, &[(0, 1.0)], &[(1, 1.0)], Some(&[(0, 0.5)]), true),
            Err(KineticsError::InvalidReactionData { .. })
        ));
        // nothing was stored by the failed calls
        assert_eq!(mgr.n_reactions(), 0);
        mgr.add(0, &[0], &[1], false).unwrap();
        mgr.freeze();
        assert!(mgr.add(1, &[1], &[0], false).is_err());
        assert_eq!(mgr.n_reactions(), 1);
    }

    #[test]
    fn short_output_buffers_are_reported() {
        let mgr = frac_mechanism();
        let mut cdot = [0.0; 2];
        assert!(matches!(
            mgr.get_creation_rates(NSP, &[0.0; 3], &[0.0; 3], &mut cdot),
            Err(KineticsError::ArraySize { .. })
        ));
    }
}
