//! # Interface Kinetics
//!
//! ## Purpose
//! Kinetics manager of a heterogeneous mechanism: reactions on a reacting surface (an
//! interface) between bulk phases such as a gas, a solid or an electrode. It owns the phases,
//! the sparse stoichiometry, the rate batches, the phase existence/stability linkage, the
//! rate cache and, lazily, the surface-coverage solver.
//!
//! ## Species indexing
//! Kinetics species are all species of all phases, phase after phase in the order the phases
//! were given. `kinetics_species_index(name)` and `phase_offset(n) + k` translate between
//! the two numbering schemes.
//!
//! ## Main Methods
//! - `add_reaction()`: appends a reaction; resolves sticking and coverage-dependency species.
//!   The mechanism is frozen at the first rate evaluation.
//! - `get_*` family: rate constants, rates of progress, species production rates and reaction
//!   thermochemistry. Each query refreshes the cache as far as the phase state requires.
//! - `set_phase_existence()` / `set_phase_stability()`: extrinsic override of the rates.
//! - `advance_coverages()` / `solve_pseudo_steady_state()`: surface-coverage solver.
//!
//! ## Usage
//! ```rust, ignore
//! let mut kin = InterfaceKinetics::new(vec![gas.into(), surf.into()])?;
//! kin.add_reaction(reaction)?;
//! let mut wdot = vec![0.0; kin.n_species()];
//! kin.get_net_production_rates(&mut wdot)?;
//! ```
use crate::Kinetics::kinetics_error::{KineticsError, check_array_len};
use crate::Kinetics::kinetics_state::{DirtyFlags, KineticsCache, Mechanism};
use crate::Kinetics::multi_rate::{MultiRateEvaluator, RateRegistry};
use crate::Kinetics::phase_linkage::{PhaseLinkage, PhaseStability};
use crate::Kinetics::rate_expressions::RateExpression;
use crate::Kinetics::reaction::Reaction;
use crate::Kinetics::stoich_manager::ReactionStoichMgr;
use crate::Kinetics::surface_solver::{SteadyStateMethod, SurfaceSolver};
use crate::Numerics::ode_solver::StiffParams;
use crate::Thermodynamics::phase::{Phase, PhaseKind, ThermoPhaseTrait};
use crate::Thermodynamics::surf_phase::SurfPhase;
use crate::constants::FARADAY;
use crate::settings::SurfaceSolverSettings;
use log::{debug, info};
use prettytable::{Cell, Row, Table};

#[derive(Debug, Clone)]
pub struct InterfaceKinetics {
    phases: Vec<Phase>,
    phase_offsets: Vec<usize>,
    species_phase: Vec<usize>,
    surface_phase: Option<usize>,
    reactions: Vec<Reaction>,
    stoich: ReactionStoichMgr,
    rates: MultiRateEvaluator,
    linkage: PhaseLinkage,
    beta: Vec<f64>,
    cache: KineticsCache,
    forced_dirty: DirtyFlags,
    settings: SurfaceSolverSettings,
    solver: Option<SurfaceSolver>,
}

impl InterfaceKinetics {
    /// Takes ownership of the phases. The first surface phase is the reacting surface; its
    /// temperature is the temperature of the mechanism.
    pub fn new(phases: Vec<Phase>) -> Result<Self, KineticsError> {
        Self::with_registry(phases, RateRegistry::default())
    }

    pub fn with_registry(phases: Vec<Phase>, registry: RateRegistry) -> Result<Self, KineticsError> {
        if phases.is_empty() {
            return Err(KineticsError::InvalidState(
                "a kinetics manager needs at least one phase".to_string(),
            ));
        }
        let mut phase_offsets = Vec::with_capacity(phases.len());
        let mut species_phase = Vec::new();
        for (n, phase) in phases.iter().enumerate() {
            phase_offsets.push(species_phase.len());
            species_phase.extend(std::iter::repeat(n).take(phase.n_species()));
        }
        let surface_phase = phases.iter().position(|p| p.kind() == PhaseKind::Surface);
        let n_species = species_phase.len();
        let linkage = PhaseLinkage::new(phases.len());
        Ok(Self {
            phases,
            phase_offsets,
            species_phase,
            surface_phase,
            reactions: Vec::new(),
            stoich: ReactionStoichMgr::new(),
            rates: MultiRateEvaluator::new(registry),
            linkage,
            beta: Vec::new(),
            cache: KineticsCache::new(n_species, 0),
            forced_dirty: DirtyFlags::all(),
            settings: SurfaceSolverSettings::default(),
            solver: None,
        })
    }

    pub fn with_settings(mut self, settings: SurfaceSolverSettings) -> Self {
        self.settings = settings;
        self
    }
    pub fn settings(&self) -> &SurfaceSolverSettings {
        &self.settings
    }
    pub fn set_settings(&mut self, settings: SurfaceSolverSettings) {
        self.settings = settings;
    }

    ////////////////////////////////// PHASES AND SPECIES //////////////////////////////////////
    pub fn n_phases(&self) -> usize {
        self.phases.len()
    }
    pub fn n_species(&self) -> usize {
        self.species_phase.len()
    }
    pub fn n_reactions(&self) -> usize {
        self.reactions.len()
    }
    pub fn surface_phase_index(&self) -> Option<usize> {
        self.surface_phase
    }
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }
    pub fn thermo(&self, n: usize) -> Result<&Phase, KineticsError> {
        let size = self.phases.len();
        self.phases.get(n).ok_or(KineticsError::IndexOutOfRange {
            what: "phase",
            index: n,
            size,
        })
    }
    /// Mutable access to a phase. Every cached quantity is considered stale afterwards.
    pub fn thermo_mut(&mut self, n: usize) -> Result<&mut Phase, KineticsError> {
        let size = self.phases.len();
        self.forced_dirty = DirtyFlags::all();
        self.phases.get_mut(n).ok_or(KineticsError::IndexOutOfRange {
            what: "phase",
            index: n,
            size,
        })
    }
    pub fn phase_index(&self, name: &str) -> Option<usize> {
        self.phases.iter().position(|p| p.name() == name)
    }
    /// kinetics index of the first species of phase `n`
    pub fn phase_offset(&self, n: usize) -> Result<usize, KineticsError> {
        self.phase_offsets
            .get(n)
            .copied()
            .ok_or(KineticsError::IndexOutOfRange {
                what: "phase",
                index: n,
                size: self.phases.len(),
            })
    }
    /// index of the first species called `name` in the kinetics species list
    pub fn kinetics_species_index(&self, name: &str) -> Option<usize> {
        self.phases
            .iter()
            .enumerate()
            .find_map(|(n, p)| p.species_index(name).map(|k| self.phase_offsets[n] + k))
    }
    pub fn species_name(&self, k: usize) -> Option<&str> {
        let n = *self.species_phase.get(k)?;
        Some(self.phases[n].species()[k - self.phase_offsets[n]].name.as_str())
    }
    pub fn species_phase_index(&self, k: usize) -> Option<usize> {
        self.species_phase.get(k).copied()
    }
    pub fn reaction(&self, i: usize) -> Option<&Reaction> {
        self.reactions.get(i)
    }
    pub fn is_reversible(&self, i: usize) -> bool {
        self.stoich.is_reversible(i)
    }
    pub fn reactant_stoich_coeff(&self, k: usize, i: usize) -> f64 {
        self.stoich.reactant_stoich_coeff(k, i)
    }
    pub fn product_stoich_coeff(&self, k: usize, i: usize) -> f64 {
        self.stoich.product_stoich_coeff(k, i)
    }

    ////////////////////////////////// MECHANISM ASSEMBLY //////////////////////////////////////
    /// Appends a reaction and returns its index.
    pub fn add_reaction(&mut self, mut reaction: Reaction) -> Result<usize, KineticsError> {
        let i = self.reactions.len();
        if self.stoich.is_frozen() {
            return Err(KineticsError::InvalidReactionData {
                reaction: i,
                reason: "reactions cannot be added after rates have been evaluated".to_string(),
            });
        }
        let n_species = self.n_species();
        if let Some((k, _)) = reaction
            .reactants
            .iter()
            .chain(reaction.products.iter())
            .chain(reaction.orders.iter())
            .find(|(k, _)| *k >= n_species)
        {
            return Err(KineticsError::InvalidReactionData {
                reaction: i,
                reason: format!("species index {} out of range ({} species)", k, n_species),
            });
        }
        if !reaction.beta.is_finite() || !(0.0..=1.0).contains(&reaction.beta) {
            return Err(KineticsError::InvalidReactionData {
                reaction: i,
                reason: format!("charge transfer coefficient must lie in [0, 1], got {}", reaction.beta),
            });
        }
        let kind = reaction.rate.kind();
        if !self.rates.supports(kind) {
            return Err(KineticsError::InvalidReactionData {
                reaction: i,
                reason: format!("no evaluator registered for {:?} rates", kind),
            });
        }
        reaction.rate = self.resolve_rate(i, &reaction, reaction.rate.clone())?;

        let orders = if reaction.orders.is_empty() {
            None
        } else {
            Some(reaction.orders.as_slice())
        };
        self.stoich.add_general(
            i,
            &reaction.reactants,
            &reaction.products,
            orders,
            reaction.reversible,
        )?;
        self.rates.add(i, reaction.rate.clone())?;
        let reactant_phases: Vec<usize> =
            reaction.reactants.iter().map(|(k, _)| self.species_phase[*k]).collect();
        let product_phases: Vec<usize> =
            reaction.products.iter().map(|(k, _)| self.species_phase[*k]).collect();
        self.linkage.add_reaction(&reactant_phases, &product_phases);
        self.beta.push(reaction.beta);
        debug!("added reaction {}: {}", i, reaction.equation);
        self.reactions.push(reaction);
        self.forced_dirty = DirtyFlags::all();
        Ok(i)
    }

    /// Fills in the species-dependent parts of a surface rate: coverage-dependency indices,
    /// sticking species molecular weight and the total order of the surface reactants.
    fn resolve_rate(
        &self,
        i: usize,
        reaction: &Reaction,
        mut rate: RateExpression,
    ) -> Result<RateExpression, KineticsError> {
        let invalid = |reason: String| KineticsError::InvalidReactionData { reaction: i, reason };
        if let RateExpression::PlogArrhenius(plog) = &rate {
            plog.validate().map_err(invalid)?;
        }
        if let Some(deps) = rate.coverage_deps_mut() {
            if !deps.is_empty() {
                let surf = self
                    .surface_phase
                    .ok_or_else(|| invalid("coverage dependencies need a surface phase".to_string()))?;
                for dep in deps.iter_mut() {
                    dep.index = self.phases[surf].species_index(&dep.species).ok_or_else(|| {
                        invalid(format!("coverage species '{}' is not on the surface", dep.species))
                    })?;
                }
            }
        }
        if let RateExpression::StickingArrhenius(sticking) = &mut rate {
            let surf = self
                .surface_phase
                .ok_or_else(|| invalid("sticking reactions need a surface phase".to_string()))?;
            let bulk_reactants: Vec<usize> = reaction
                .reactants
                .iter()
                .map(|(k, _)| *k)
                .filter(|k| self.phases[self.species_phase[*k]].kind() != PhaseKind::Surface)
                .collect();
            let k_stick = match &sticking.sticking_species {
                Some(name) => bulk_reactants
                    .iter()
                    .copied()
                    .find(|k| self.species_name(*k) == Some(name.as_str()))
                    .ok_or_else(|| {
                        invalid(format!("sticking species '{}' is not a bulk-phase reactant", name))
                    })?,
                None => match bulk_reactants.as_slice() {
                    [k] => *k,
                    _ => {
                        return Err(invalid(format!(
                            "sticking reaction needs exactly one bulk-phase reactant, found {}",
                            bulk_reactants.len()
                        )));
                    }
                },
            };
            let n = self.species_phase[k_stick];
            sticking.molecular_weight =
                self.phases[n].species()[k_stick - self.phase_offsets[n]].molecular_weight;
            sticking.surface_order = reaction
                .reactants
                .iter()
                .filter(|(k, _)| self.species_phase[*k] == surf)
                .map(|(k, nu)| {
                    reaction
                        .orders
                        .iter()
                        .find(|(kk, _)| kk == k)
                        .map(|(_, o)| *o)
                        .unwrap_or(*nu)
                })
                .sum();
        }
        Ok(rate)
    }

    /// Replaces the rate parameters of reaction `i`; the rate-law kind must stay the same.
    pub fn modify_reaction_rate(&mut self, i: usize, rate: RateExpression) -> Result<(), KineticsError> {
        let reaction = self.reactions.get(i).cloned().ok_or(KineticsError::IndexOutOfRange {
            what: "reaction",
            index: i,
            size: self.reactions.len(),
        })?;
        let rate = self.resolve_rate(i, &reaction, rate)?;
        self.rates.modify(i, rate.clone())?;
        self.reactions[i].rate = rate;
        self.forced_dirty = DirtyFlags::all();
        Ok(())
    }

    ////////////////////////////////// STATE ////////////////////////////////////////////////////
    /// Sets the temperature of every phase.
    #[allow(non_snake_case)]
    pub fn set_temperature(&mut self, T: f64) -> Result<(), KineticsError> {
        if !T.is_finite() || T <= 0.0 {
            return Err(KineticsError::InvalidState(format!("temperature must be positive, got {}", T)));
        }
        for phase in self.phases.iter_mut() {
            phase.set_temperature(T)?;
        }
        Ok(())
    }
    #[allow(non_snake_case)]
    pub fn temperature(&self) -> f64 {
        self.mechanism().temperature()
    }
    /// electric potential of phase `n`, V
    pub fn set_electric_potential(&mut self, n: usize, volts: f64) -> Result<(), KineticsError> {
        if !volts.is_finite() {
            return Err(KineticsError::InvalidState(format!("electric potential must be finite, got {}", volts)));
        }
        let size = self.phases.len();
        self.phases
            .get_mut(n)
            .ok_or(KineticsError::IndexOutOfRange {
                what: "phase",
                index: n,
                size,
            })?
            .set_electric_potential(volts);
        Ok(())
    }
    fn surface_mut(&mut self, n: usize) -> Result<&mut SurfPhase, KineticsError> {
        let size = self.phases.len();
        self.phases
            .get_mut(n)
            .ok_or(KineticsError::IndexOutOfRange {
                what: "phase",
                index: n,
                size,
            })?
            .as_surface_mut()
            .ok_or_else(|| KineticsError::InvalidStateAccess(format!("phase {} is not a surface", n)))
    }
    pub fn surface_coverages(&self, n: usize) -> Result<&[f64], KineticsError> {
        self.thermo(n)?
            .as_surface()
            .map(|s| s.coverages())
            .ok_or_else(|| KineticsError::InvalidStateAccess(format!("phase {} is not a surface", n)))
    }
    /// Sets the (normalized) coverages of surface phase `n`.
    pub fn set_surface_coverages(&mut self, n: usize, theta: &[f64]) -> Result<(), KineticsError> {
        Ok(self.surface_mut(n)?.set_coverages(theta)?)
    }
    pub(crate) fn set_surface_coverages_no_norm(&mut self, n: usize, theta: &[f64]) -> Result<(), KineticsError> {
        Ok(self.surface_mut(n)?.set_coverages_no_norm(theta)?)
    }
    pub fn set_phase_existence(&mut self, n: usize, exists: bool) -> Result<(), KineticsError> {
        self.linkage.set_existence(n, exists)?;
        self.forced_dirty.concentration = true;
        Ok(())
    }
    pub fn set_phase_stability(&mut self, n: usize, stable: bool) -> Result<(), KineticsError> {
        self.linkage.set_stability(n, stable)?;
        self.forced_dirty.concentration = true;
        Ok(())
    }
    pub fn phase_existence(&self, n: usize) -> Result<bool, KineticsError> {
        self.linkage.exists(n)
    }
    pub fn phase_stability(&self, n: usize) -> Result<PhaseStability, KineticsError> {
        self.linkage.stability(n)
    }

    ////////////////////////////////// CACHE ////////////////////////////////////////////////////
    fn mechanism(&self) -> Mechanism<'_> {
        Mechanism {
            phases: &self.phases,
            phase_offsets: &self.phase_offsets,
            n_species: self.species_phase.len(),
            stoich: &self.stoich,
            rates: &self.rates,
            linkage: &self.linkage,
            beta: &self.beta,
            surface_phase: self.surface_phase,
        }
    }

    /// Brings the rate cache up to date. Freezes the mechanism. On error the previous cache
    /// is kept.
    pub fn update_rates(&mut self) -> Result<(), KineticsError> {
        self.stoich.freeze();
        let next = {
            let mech = self.mechanism();
            let dirty = self.cache.detect_changes(&mech).merge(self.forced_dirty);
            if !dirty.any() {
                return Ok(());
            }
            self.cache.refresh(&mech, dirty)?
        };
        self.cache = next;
        self.forced_dirty = DirtyFlags::default();
        Ok(())
    }

    fn copy_out(
        &mut self,
        name: &'static str,
        out: &mut [f64],
        select: fn(&KineticsCache) -> &[f64],
    ) -> Result<(), KineticsError> {
        self.update_rates()?;
        let values = select(&self.cache);
        check_array_len(name, out.len(), values.len())?;
        out[..values.len()].copy_from_slice(values);
        Ok(())
    }

    ////////////////////////////////// RATE QUERIES /////////////////////////////////////////////
    pub fn get_fwd_rate_constants(&mut self, kf: &mut [f64]) -> Result<(), KineticsError> {
        self.copy_out("forward rate constants", kf, |c| c.kf.as_slice())
    }
    /// reverse rate constants kf / Kc, zero for irreversible reactions
    pub fn get_rev_rate_constants(&mut self, kr: &mut [f64]) -> Result<(), KineticsError> {
        self.copy_out("reverse rate constants", kr, |c| c.kr.as_slice())
    }
    pub fn get_fwd_rates_of_progress(&mut self, ropf: &mut [f64]) -> Result<(), KineticsError> {
        self.copy_out("forward rates of progress", ropf, |c| c.ropf.as_slice())
    }
    pub fn get_rev_rates_of_progress(&mut self, ropr: &mut [f64]) -> Result<(), KineticsError> {
        self.copy_out("reverse rates of progress", ropr, |c| c.ropr.as_slice())
    }
    pub fn get_net_rates_of_progress(&mut self, ropnet: &mut [f64]) -> Result<(), KineticsError> {
        self.copy_out("net rates of progress", ropnet, |c| c.ropnet.as_slice())
    }
    pub fn get_activity_concentrations(&mut self, conc: &mut [f64]) -> Result<(), KineticsError> {
        self.copy_out("activity concentrations", conc, |c| c.act_conc.as_slice())
    }
    /// thermodynamic equilibrium constants (with the electrochemical factor) of all reactions,
    /// in concentration units
    pub fn get_equilibrium_constants(&mut self, kc: &mut [f64]) -> Result<(), KineticsError> {
        self.update_rates()?;
        check_array_len("equilibrium constants", kc.len(), self.n_reactions())?;
        let values = self.cache.equilibrium_constants();
        kc[..values.len()].copy_from_slice(&values);
        Ok(())
    }

    ////////////////////////////////// SPECIES RATES ////////////////////////////////////////////
    /// kmol/m^2/s
    pub fn get_creation_rates(&mut self, cdot: &mut [f64]) -> Result<(), KineticsError> {
        self.update_rates()?;
        self.stoich
            .get_creation_rates(self.n_species(), &self.cache.ropf, &self.cache.ropr, cdot)
    }
    pub fn get_destruction_rates(&mut self, ddot: &mut [f64]) -> Result<(), KineticsError> {
        self.update_rates()?;
        self.stoich
            .get_destruction_rates(self.n_species(), &self.cache.ropf, &self.cache.ropr, ddot)
    }
    pub fn get_net_production_rates(&mut self, wdot: &mut [f64]) -> Result<(), KineticsError> {
        self.update_rates()?;
        self.stoich
            .get_net_production_rates(self.n_species(), &self.cache.ropnet, wdot)
    }

    /// Net current of charged species produced into phase `n`, A/m^2:
    /// F sum_k z_k wdot_k over the species of that phase.
    pub fn interface_current(&mut self, n: usize) -> Result<f64, KineticsError> {
        self.thermo(n)?;
        let mut wdot = vec![0.0; self.n_species()];
        self.get_net_production_rates(&mut wdot)?;
        let start = self.phase_offsets[n];
        let charges = self.phases[n].charges();
        Ok(charges
            .iter()
            .enumerate()
            .map(|(k, z)| z * wdot[start + k])
            .sum::<f64>()
            * FARADAY)
    }

    ////////////////////////////////// REACTION THERMOCHEMISTRY /////////////////////////////////
    fn species_property(&self, f: fn(&Phase) -> Vec<f64>) -> Vec<f64> {
        let mut values = Vec::with_capacity(self.n_species());
        for phase in &self.phases {
            values.extend(f(phase));
        }
        values
    }
    fn reaction_delta_of(
        &self,
        name: &'static str,
        values: &[f64],
        out: &mut [f64],
    ) -> Result<(), KineticsError> {
        check_array_len(name, out.len(), self.n_reactions())?;
        self.stoich.get_reaction_delta(self.n_reactions(), values, out)
    }
    /// Delta of the chemical potentials, J/kmol
    pub fn get_delta_gibbs(&self, dg: &mut [f64]) -> Result<(), KineticsError> {
        let mu = self.species_property(|p| p.chem_potentials());
        self.reaction_delta_of("delta gibbs", &mu, dg)
    }
    /// Delta of the electrochemical potentials mu_k + z_k F phi_k, J/kmol
    pub fn get_delta_electrochem_potentials(&self, de: &mut [f64]) -> Result<(), KineticsError> {
        let mut mu = Vec::with_capacity(self.n_species());
        for phase in &self.phases {
            let phi = phase.electric_potential();
            mu.extend(
                phase
                    .chem_potentials()
                    .into_iter()
                    .zip(phase.charges())
                    .map(|(m, z)| m + z * FARADAY * phi),
            );
        }
        self.reaction_delta_of("delta electrochemical potentials", &mu, de)
    }
    pub fn get_delta_enthalpy(&self, dh: &mut [f64]) -> Result<(), KineticsError> {
        let h = self.species_property(|p| p.partial_molar_enthalpies());
        self.reaction_delta_of("delta enthalpy", &h, dh)
    }
    pub fn get_delta_entropy(&self, ds: &mut [f64]) -> Result<(), KineticsError> {
        let s = self.species_property(|p| p.partial_molar_entropies());
        self.reaction_delta_of("delta entropy", &s, ds)
    }
    pub fn get_delta_ss_gibbs(&self, dg: &mut [f64]) -> Result<(), KineticsError> {
        let mu0 = self.species_property(|p| p.standard_chem_potentials());
        self.reaction_delta_of("delta standard gibbs", &mu0, dg)
    }
    pub fn get_delta_ss_enthalpy(&self, dh: &mut [f64]) -> Result<(), KineticsError> {
        let h0 = self.species_property(|p| p.standard_enthalpies());
        self.reaction_delta_of("delta standard enthalpy", &h0, dh)
    }
    pub fn get_delta_ss_entropy(&self, ds: &mut [f64]) -> Result<(), KineticsError> {
        let s0 = self.species_property(|p| p.standard_entropies());
        self.reaction_delta_of("delta standard entropy", &s0, ds)
    }

    ////////////////////////////////// SURFACE SOLVER ///////////////////////////////////////////
    fn take_solver(&mut self) -> Result<SurfaceSolver, KineticsError> {
        match self.solver.take() {
            Some(solver) => Ok(solver),
            None => {
                debug!("creating surface solver");
                SurfaceSolver::new(self)
            }
        }
    }

    /// Integrates the coverages of all surface phases over `dt` seconds with the tolerances
    /// from the settings.
    pub fn advance_coverages(&mut self, dt: f64) -> Result<(), KineticsError> {
        let params = StiffParams {
            rtol: self.settings.rtol,
            atol: self.settings.atol,
            max_step_size: self.settings.max_step_size,
            max_steps: self.settings.max_steps,
            max_err_test_fails: self.settings.max_err_test_fails,
            initial_step: None,
        };
        self.advance_coverages_with(dt, params)
    }

    /// `advance_coverages` with explicit integrator parameters
    pub fn advance_coverages_with(&mut self, dt: f64, params: StiffParams) -> Result<(), KineticsError> {
        let mut solver = self.take_solver()?;
        let result = solver.advance(self, dt, params);
        self.solver = Some(solver);
        result
    }

    /// Drives the surface coverages to the state with zero net production of every surface
    /// species. `time_scale` overrides the pseudo-transient integration time of the settings.
    pub fn solve_pseudo_steady_state(
        &mut self,
        method: SteadyStateMethod,
        time_scale: Option<f64>,
    ) -> Result<(), KineticsError> {
        let mut solver = self.take_solver()?;
        let time_scale = time_scale.unwrap_or(self.settings.default_time_scale);
        let result = solver.solve_steady_state(self, method, time_scale);
        self.solver = Some(solver);
        result
    }
    pub fn surface_solver(&self) -> Option<&SurfaceSolver> {
        self.solver.as_ref()
    }

    ////////////////////////////////// OUTPUT ///////////////////////////////////////////////////
    /// table of kf, kr and the rates of progress of every reaction
    pub fn rates_table(&mut self) -> Result<Table, KineticsError> {
        self.update_rates()?;
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("#"),
            Cell::new("reaction"),
            Cell::new("kf"),
            Cell::new("kr"),
            Cell::new("ropf"),
            Cell::new("ropr"),
            Cell::new("net"),
        ]));
        for (i, reaction) in self.reactions.iter().enumerate() {
            table.add_row(Row::new(vec![
                Cell::new(&i.to_string()),
                Cell::new(&reaction.equation),
                Cell::new(&format!("{:.4e}", self.cache.kf[i])),
                Cell::new(&format!("{:.4e}", self.cache.kr[i])),
                Cell::new(&format!("{:.4e}", self.cache.ropf[i])),
                Cell::new(&format!("{:.4e}", self.cache.ropr[i])),
                Cell::new(&format!("{:.4e}", self.cache.ropnet[i])),
            ]));
        }
        Ok(table)
    }
    pub fn pretty_print_rates(&mut self) -> Result<(), KineticsError> {
        let table = self.rates_table()?;
        info!("rates at T = {} K", self.temperature());
        table.printstd();
        Ok(())
    }
}
