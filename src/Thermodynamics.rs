/// Errors of the phase layer; converted into `KineticsError` at the kinetics boundary
pub mod thermo_error;
/// Constant-heat-capacity reference-state thermodynamics of a single species
pub mod species_thermo;
/// The phase contract (`ThermoPhaseTrait`) and the `Phase` enum the kinetics manager holds.
///
/// # Examples
/// ```
/// use SurfKin::Thermodynamics::phase::{Species, ThermoPhaseTrait};
/// use SurfKin::Thermodynamics::species_thermo::ConstCpThermo;
/// use SurfKin::Thermodynamics::surf_phase::SurfPhase;
/// let mut surf = SurfPhase::new(
///     "Pt_surf",
///     vec![
///         Species::new("PT(S)", 195.08, ConstCpThermo::default()),
///         Species::new("H(S)", 1.008, ConstCpThermo::default()),
///     ],
///     2.7063e-8,
/// )
/// .unwrap();
/// surf.set_coverages(&[0.6, 0.6]).unwrap();
/// assert_eq!(surf.coverages(), &[0.5, 0.5]);
/// assert_eq!(surf.n_species(), 2);
/// ```
pub mod phase;
/// Ideal gas mixture
pub mod ideal_gas;
/// Ideal surface (site fractions, site density)
pub mod surf_phase;
/// Incompressible condensed phase: solids, electrodes
pub mod bulk_phase;
