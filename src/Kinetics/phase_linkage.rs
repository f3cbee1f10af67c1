//! Extrinsic override of rates of progress by phase existence and stability.
//!
//! Mass-action kinetics knows nothing about whether an adjacent bulk phase is actually present.
//! The linkage keeps per-phase `exists` / `stability` flags and per-reaction phase membership
//! masks, and `apply` clips the intrinsic rates of progress after they have been computed:
//! a missing phase cannot react, and nothing may be produced (net) into an unstable phase.
use crate::Kinetics::kinetics_error::KineticsError;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStability {
    Stable,
    Unstable,
}

#[derive(Debug, Clone, Default)]
pub struct PhaseLinkage {
    exists: Vec<bool>,
    stability: Vec<PhaseStability>,
    // [reaction][phase]
    reactant_phases: Vec<Vec<bool>>,
    product_phases: Vec<Vec<bool>>,
}

impl PhaseLinkage {
    /// all phases exist and are stable
    pub fn new(n_phases: usize) -> Self {
        Self {
            exists: vec![true; n_phases],
            stability: vec![PhaseStability::Stable; n_phases],
            reactant_phases: Vec::new(),
            product_phases: Vec::new(),
        }
    }
    pub fn n_phases(&self) -> usize {
        self.exists.len()
    }
    /// records which phases hold the reactants and the products of the next reaction
    pub fn add_reaction(&mut self, reactant_phases: &[usize], product_phases: &[usize]) {
        let n = self.n_phases();
        let mut r = vec![false; n];
        let mut p = vec![false; n];
        reactant_phases.iter().filter(|ph| **ph < n).for_each(|ph| r[*ph] = true);
        product_phases.iter().filter(|ph| **ph < n).for_each(|ph| p[*ph] = true);
        self.reactant_phases.push(r);
        self.product_phases.push(p);
    }
    pub fn is_reactant_phase(&self, rxn: usize, phase: usize) -> bool {
        self.reactant_phases[rxn][phase]
    }
    pub fn is_product_phase(&self, rxn: usize, phase: usize) -> bool {
        self.product_phases[rxn][phase]
    }

    fn check_phase(&self, phase: usize) -> Result<(), KineticsError> {
        if phase >= self.n_phases() {
            return Err(KineticsError::IndexOutOfRange {
                what: "phase",
                index: phase,
                size: self.n_phases(),
            });
        }
        Ok(())
    }
    /// A phase that does not exist is also unstable; bringing it back makes it stable again.
    pub fn set_existence(&mut self, phase: usize, exists: bool) -> Result<(), KineticsError> {
        self.check_phase(phase)?;
        self.exists[phase] = exists;
        self.stability[phase] = if exists {
            PhaseStability::Stable
        } else {
            PhaseStability::Unstable
        };
        debug!("phase {} exists: {}", phase, exists);
        Ok(())
    }
    pub fn set_stability(&mut self, phase: usize, stable: bool) -> Result<(), KineticsError> {
        self.check_phase(phase)?;
        self.stability[phase] = if stable {
            PhaseStability::Stable
        } else {
            PhaseStability::Unstable
        };
        Ok(())
    }
    pub fn exists(&self, phase: usize) -> Result<bool, KineticsError> {
        self.check_phase(phase)?;
        Ok(self.exists[phase])
    }
    pub fn stability(&self, phase: usize) -> Result<PhaseStability, KineticsError> {
        self.check_phase(phase)?;
        Ok(self.stability[phase])
    }
    /// nothing to clip
    pub fn is_trivial(&self) -> bool {
        self.exists.iter().all(|e| *e) && self.stability.iter().all(|s| *s == PhaseStability::Stable)
    }

    /// Clips forward and reverse rates of progress in place.
    ///
    /// 1. forward is zeroed if a reactant-side phase does not exist, reverse if a product-side
    ///    phase does not exist;
    /// 2. a net forward reaction into an unstable product phase gets forward = reverse, a net
    ///    reverse reaction into an unstable reactant phase gets reverse = forward.
    pub fn apply(&self, ropf: &mut [f64], ropr: &mut [f64]) {
        if self.is_trivial() {
            return;
        }
        let n_phases = self.n_phases();
        for rxn in 0..self.reactant_phases.len() {
            let reactant_side = &self.reactant_phases[rxn];
            let product_side = &self.product_phases[rxn];
            if (0..n_phases).any(|p| reactant_side[p] && !self.exists[p]) {
                ropf[rxn] = 0.0;
            }
            if (0..n_phases).any(|p| product_side[p] && !self.exists[p]) {
                ropr[rxn] = 0.0;
            }
            let net = ropf[rxn] - ropr[rxn];
            if net > 0.0
                && (0..n_phases)
                    .any(|p| product_side[p] && self.stability[p] == PhaseStability::Unstable)
            {
                ropf[rxn] = ropr[rxn];
            } else if net < 0.0
                && (0..n_phases)
                    .any(|p| reactant_side[p] && self.stability[p] == PhaseStability::Unstable)
            {
                ropr[rxn] = ropf[rxn];
            }
        }
    }
}
