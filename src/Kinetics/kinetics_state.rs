//! Cached rate data of a kinetics manager and its refresh protocol.
//!
//! The cache is refreshed in three independent stages, each guarded by one flag of
//! `DirtyFlags`:
//! 1. temperature (and pressure): standard chemical potentials, thermodynamic equilibrium
//!    constants, intrinsic forward rate constants;
//! 2. potential: electrochemical energy change of every reaction, exp(-dE/RT);
//! 3. concentration: activity concentrations, coverage-dependent forward rate constants.
//! The stages always run in that order, followed by combining the pieces into kf, Kc, kr and the
//! rates of progress. `refresh` works on a copy of the cache and returns it; the caller commits
//! it only when every stage succeeded, so a failed refresh never leaves half-updated values.
use crate::Kinetics::kinetics_error::KineticsError;
use crate::Kinetics::multi_rate::MultiRateEvaluator;
use crate::Kinetics::phase_linkage::PhaseLinkage;
use crate::Kinetics::rate_expressions::SharedRateData;
use crate::Kinetics::stoich_manager::ReactionStoichMgr;
use crate::Thermodynamics::phase::{Phase, PhaseKind, ThermoPhaseTrait};
use crate::constants::{FARADAY, GAS_CONSTANT, SMALL_NUMBER};
use log::debug;

/// which parts of the cache are stale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyFlags {
    pub temperature: bool,
    pub potential: bool,
    pub concentration: bool,
}

impl DirtyFlags {
    pub fn all() -> Self {
        Self {
            temperature: true,
            potential: true,
            concentration: true,
        }
    }
    pub fn any(&self) -> bool {
        self.temperature || self.potential || self.concentration
    }
    pub fn merge(self, other: DirtyFlags) -> Self {
        Self {
            temperature: self.temperature || other.temperature,
            potential: self.potential || other.potential,
            concentration: self.concentration || other.concentration,
        }
    }
}

/// state the cache was computed for
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    pub temperature: f64,
    pub pressure: f64,
    /// temperature and pressure of every phase; bulk phases may drift from the reference phase
    pub phase_temperatures: Vec<f64>,
    pub phase_pressures: Vec<f64>,
    pub potentials: Vec<f64>,
    pub state_numbers: Vec<u64>,
}

/// read-only view of everything a refresh needs besides the cache itself
pub struct Mechanism<'a> {
    pub phases: &'a [Phase],
    /// index of the first species of every phase in the kinetics species list
    pub phase_offsets: &'a [usize],
    pub n_species: usize,
    pub stoich: &'a ReactionStoichMgr,
    pub rates: &'a MultiRateEvaluator,
    pub linkage: &'a PhaseLinkage,
    /// charge-transfer coefficients per reaction
    pub beta: &'a [f64],
    /// the reacting surface, whose temperature is the kinetics temperature
    pub surface_phase: Option<usize>,
}

impl Mechanism<'_> {
    pub fn n_reactions(&self) -> usize {
        self.stoich.n_reactions()
    }
    fn reference_phase(&self) -> usize {
        self.surface_phase.unwrap_or(0)
    }
    pub fn temperature(&self) -> f64 {
        self.phases
            .get(self.reference_phase())
            .map(|p| p.temperature())
            .unwrap_or(f64::NAN)
    }
    /// pressure of the first bulk phase, or of the reference phase for a surface-only mechanism
    pub fn pressure(&self) -> f64 {
        self.phases
            .iter()
            .find(|p| p.kind() != PhaseKind::Surface)
            .or_else(|| self.phases.get(self.reference_phase()))
            .map(|p| p.pressure())
            .unwrap_or(f64::NAN)
    }
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            temperature: self.temperature(),
            pressure: self.pressure(),
            phase_temperatures: self.phases.iter().map(|p| p.temperature()).collect(),
            phase_pressures: self.phases.iter().map(|p| p.pressure()).collect(),
            potentials: self.phases.iter().map(|p| p.electric_potential()).collect(),
            state_numbers: self.phases.iter().map(|p| p.state_number()).collect(),
        }
    }
    pub fn shared_rate_data(&self) -> SharedRateData {
        let shared = SharedRateData::new(self.temperature(), self.pressure());
        match self
            .surface_phase
            .and_then(|s| self.phases.get(s))
            .and_then(|p| p.as_surface())
        {
            Some(surf) => shared.with_surface(surf.coverages(), surf.site_density()),
            None => shared,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct KineticsCache {
    /// state of the last successful refresh
    pub snapshot: Option<StateSnapshot>,
    /// standard chemical potentials, J/kmol
    pub mu0: Vec<f64>,
    /// mu0 - RT ln C0, the concentration-scale standard potentials
    pub mu0_kc: Vec<f64>,
    pub act_conc: Vec<f64>,
    /// exp(-sum nu (mu0 - RT ln C0) / RT) of every reaction
    pub kc_thermo: Vec<f64>,
    /// electrochemical energy change sum nu z F phi, J/kmol
    pub delta_electric: Vec<f64>,
    /// exp(-delta_electric / RT)
    pub elec_factor: Vec<f64>,
    /// forward rate constants straight from the rate batches
    pub kf_intrinsic: Vec<f64>,
    pub kf: Vec<f64>,
    /// equilibrium constants used for reverse rates; zero for irreversible reactions
    pub kc: Vec<f64>,
    pub kr: Vec<f64>,
    pub ropf: Vec<f64>,
    pub ropr: Vec<f64>,
    pub ropnet: Vec<f64>,
}

impl KineticsCache {
    pub fn new(n_species: usize, n_reactions: usize) -> Self {
        Self {
            snapshot: None,
            mu0: vec![0.0; n_species],
            mu0_kc: vec![0.0; n_species],
            act_conc: vec![0.0; n_species],
            kc_thermo: vec![0.0; n_reactions],
            delta_electric: vec![0.0; n_reactions],
            elec_factor: vec![1.0; n_reactions],
            kf_intrinsic: vec![0.0; n_reactions],
            kf: vec![0.0; n_reactions],
            kc: vec![0.0; n_reactions],
            kr: vec![0.0; n_reactions],
            ropf: vec![0.0; n_reactions],
            ropr: vec![0.0; n_reactions],
            ropnet: vec![0.0; n_reactions],
        }
    }

    /// compares the current state of the phases with the state of the last refresh
    pub fn detect_changes(&self, mech: &Mechanism) -> DirtyFlags {
        let now = mech.snapshot();
        let Some(old) = &self.snapshot else {
            return DirtyFlags::all();
        };
        let mut dirty = DirtyFlags::default();
        if now.temperature != old.temperature
            || now.pressure != old.pressure
            || now.phase_temperatures != old.phase_temperatures
            || now.phase_pressures != old.phase_pressures
        {
            // RT enters every stage
            dirty = DirtyFlags::all();
        }
        if now.potentials != old.potentials {
            dirty.potential = true;
        }
        if now.state_numbers != old.state_numbers {
            dirty.concentration = true;
        }
        dirty
    }

    /// Returns the refreshed cache, leaving `self` untouched. Rates of progress are recomputed
    /// whenever any flag is set.
    pub fn refresh(&self, mech: &Mechanism, dirty: DirtyFlags) -> Result<KineticsCache, KineticsError> {
        let n_rxn = mech.n_reactions();
        let mut next = if self.kf.len() == n_rxn && self.mu0.len() == mech.n_species {
            self.clone()
        } else {
            KineticsCache::new(mech.n_species, n_rxn)
        };
        let dirty = if next.snapshot.is_none() { DirtyFlags::all() } else { dirty };
        if !dirty.any() {
            return Ok(next);
        }
        let t = mech.temperature();
        let p = mech.pressure();
        if !t.is_finite() || t <= 0.0 {
            return Err(KineticsError::InvalidState(format!("temperature must be positive, got {}", t)));
        }
        if !p.is_finite() || p <= 0.0 {
            return Err(KineticsError::InvalidState(format!("pressure must be positive, got {}", p)));
        }
        let shared = mech.shared_rate_data();
        if dirty.temperature {
            next.update_temperature(mech, &shared)?;
        }
        if dirty.potential {
            next.update_potential(mech)?;
        }
        if dirty.concentration {
            next.update_concentration(mech, &shared, dirty.temperature);
        }
        next.combine(mech)?;
        next.update_rop(mech);
        next.snapshot = Some(mech.snapshot());
        Ok(next)
    }

    fn update_temperature(&mut self, mech: &Mechanism, shared: &SharedRateData) -> Result<(), KineticsError> {
        let t = shared.temperature;
        let rt = GAS_CONSTANT * t;
        for (n, phase) in mech.phases.iter().enumerate() {
            let start = mech.phase_offsets[n];
            for (k, mu) in phase.standard_chem_potentials().into_iter().enumerate() {
                self.mu0[start + k] = mu;
                self.mu0_kc[start + k] = mu - rt * phase.log_standard_concentration(k);
            }
        }
        let mut dg = vec![0.0; mech.n_reactions()];
        mech.stoich.get_reaction_delta(mech.n_reactions(), &self.mu0_kc, &mut dg)?;
        for (kc, dg) in self.kc_thermo.iter_mut().zip(dg.iter()) {
            *kc = (-dg / rt).exp();
        }
        mech.rates.update(shared, &mut self.kf_intrinsic);
        debug!("kinetics temperature stage refreshed at T = {}", t);
        Ok(())
    }

    fn update_potential(&mut self, mech: &Mechanism) -> Result<(), KineticsError> {
        let rt = GAS_CONSTANT * mech.temperature();
        let mut electric = vec![0.0; mech.n_species];
        for (n, phase) in mech.phases.iter().enumerate() {
            let start = mech.phase_offsets[n];
            let phi = phase.electric_potential();
            for (k, z) in phase.charges().into_iter().enumerate() {
                electric[start + k] = z * FARADAY * phi;
            }
        }
        mech.stoich
            .get_reaction_delta(mech.n_reactions(), &electric, &mut self.delta_electric)?;
        for (f, de) in self.elec_factor.iter_mut().zip(self.delta_electric.iter()) {
            *f = (-de / rt).exp();
        }
        Ok(())
    }

    fn update_concentration(&mut self, mech: &Mechanism, shared: &SharedRateData, rates_fresh: bool) {
        for (n, phase) in mech.phases.iter().enumerate() {
            let start = mech.phase_offsets[n];
            for (k, c) in phase.activity_concentrations().into_iter().enumerate() {
                self.act_conc[start + k] = c;
            }
        }
        if !rates_fresh && mech.rates.depends_on_coverage() {
            mech.rates.update_coverage_dependent(shared, &mut self.kf_intrinsic);
        }
    }

    /// kf = kf_intrinsic exp(-beta dE/RT), Kc = Kc_thermo exp(-dE/RT), kr = kf / Kc
    fn combine(&mut self, mech: &Mechanism) -> Result<(), KineticsError> {
        let rt = GAS_CONSTANT * mech.temperature();
        for i in 0..mech.n_reactions() {
            let beta = mech.beta.get(i).copied().unwrap_or(0.0);
            let kf = if beta != 0.0 && self.delta_electric[i] != 0.0 {
                self.kf_intrinsic[i] * (-beta * self.delta_electric[i] / rt).exp()
            } else {
                self.kf_intrinsic[i]
            };
            if !kf.is_finite() {
                return Err(KineticsError::InvalidState(format!(
                    "forward rate constant of reaction {} is not finite: {}",
                    i, kf
                )));
            }
            self.kf[i] = kf;
            if mech.stoich.is_reversible(i) {
                self.kc[i] = (self.kc_thermo[i] * self.elec_factor[i]).max(SMALL_NUMBER);
                let kr = self.kf[i] / self.kc[i];
                if !kr.is_finite() {
                    return Err(KineticsError::InvalidState(format!(
                        "reverse rate constant of reaction {} is not finite: kf = {}, Kc = {}",
                        i, self.kf[i], self.kc[i]
                    )));
                }
                self.kr[i] = kr;
            } else {
                self.kc[i] = 0.0;
                self.kr[i] = 0.0;
            }
        }
        Ok(())
    }

    fn update_rop(&mut self, mech: &Mechanism) {
        self.ropf.copy_from_slice(&self.kf);
        self.ropr.copy_from_slice(&self.kr);
        mech.stoich.multiply_reactants(&self.act_conc, &mut self.ropf);
        mech.stoich.multiply_rev_products(&self.act_conc, &mut self.ropr);
        mech.linkage.apply(&mut self.ropf, &mut self.ropr);
        for ((net, f), r) in self.ropnet.iter_mut().zip(self.ropf.iter()).zip(self.ropr.iter()) {
            *net = f - r;
        }
    }

    /// thermodynamic equilibrium constants of all reactions including the electrochemical factor
    pub fn equilibrium_constants(&self) -> Vec<f64> {
        self.kc_thermo
            .iter()
            .zip(self.elec_factor.iter())
            .map(|(k, f)| k * f)
            .collect()
    }
}
