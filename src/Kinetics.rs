/// Errors of the kinetics layer and the conversions from the phase and numerics layers.
pub mod kinetics_error;
/// Sparse stoichiometry bookkeeping.
/// Reactions are stored as lists of (species, coefficient, order) terms, split into classes
/// of one, two or three integral mass-action species and a general class for fractional
/// coefficients or explicit orders. All products, production rates and reaction deltas
/// are computed from these terms without a dense stoichiometric matrix.
/// # Examples
/// ```
/// use SurfKin::Kinetics::stoich_manager::ReactionStoichMgr;
/// let mut mgr = ReactionStoichMgr::new();
/// // A + B <=> 2 C
/// mgr.add(0, &[0, 1], &[2, 2], true).unwrap();
/// let mut wdot = vec![0.0; 3];
/// mgr.get_net_production_rates(3, &[1.5], &mut wdot).unwrap();
/// assert_eq!(wdot, vec![-1.5, -1.5, 3.0]);
/// ```
pub mod stoich_manager;
pub mod stoich_manager_tests;
/// rate laws: Arrhenius, interface Arrhenius with coverage dependencies, sticking
/// coefficients (with the Motz-Wise correction) and pressure-dependent PLOG
pub mod rate_expressions;
/// Batch evaluation of rate constants. Rates of one kind are grouped into one batch, so the
/// forward rate constants of the whole mechanism are filled kind by kind. Batch constructors
/// live in an explicit `RateRegistry` value.
pub mod multi_rate;
/// reaction record consumed by the kinetics manager
pub mod reaction;
/// existence and stability of phases and the override of the rates of progress
pub mod phase_linkage;
/// rate cache, change detection and the staged refresh
pub mod kinetics_state;
/// # Interface kinetics
/// Kinetics manager of heterogeneous reactions at an interface between bulk phases.
/// # Examples
/// ```rust, ignore
/// use SurfKin::Examples::mechanisms::hydrogen_on_platinum;
/// let mut kin = hydrogen_on_platinum(500.0, 101325.0, 0.5, 0.0).unwrap();
/// let mut wdot = vec![0.0; kin.n_species()];
/// kin.get_net_production_rates(&mut wdot).unwrap();
/// kin.pretty_print_rates().unwrap();
/// ```
pub mod interface_kinetics;
pub mod interface_kinetics_tests;
/// transient integration of the surface coverages and the pseudo-steady-state solve
pub mod surface_solver;
