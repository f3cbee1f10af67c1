//! # Surface-coverage solver
//!
//! Evolves or balances the site fractions of every surface phase of an `InterfaceKinetics`
//! manager while the bulk phases stay frozen.
//!
//! Transient problem, for every surface species k:
//!
//! dtheta_k/dt = wdot_k sigma_k / n0
//!
//! with sigma_k the number of sites the species occupies and n0 the site density. It is
//! integrated by `Numerics::ode_solver::BdfIntegrator` (the BDF solver of RustedSciThe) on a
//! private copy of the manager; the result is written back into the manager's surface phases.
//!
//! Pseudo-steady state: wdot_k = 0 for all surface species. Solved by a damped Newton
//! iteration in which, for every surface phase, the equation of the species with the largest
//! coverage is replaced by the site balance sum(theta) - 1 = 0 (the balance equations are
//! linearly dependent otherwise). When the direct solve fails, `SteadyStateMethod::Auto`
//! integrates for a time scale to improve the initial guess and retries.
use crate::Kinetics::interface_kinetics::InterfaceKinetics;
use crate::Kinetics::kinetics_error::KineticsError;
use crate::Numerics::linear_algebra::{solve_linear, weighted_rms};
use crate::Numerics::ode_solver::{
    BdfIntegrator, IntegrationStats, OdeSystem, StiffParams, finite_difference_jacobian,
};
use crate::Thermodynamics::phase::{PhaseKind, ThermoPhaseTrait};
use log::{debug, info, warn};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::borrow::BorrowMut;

/// smallest coverage scale used for finite-difference perturbations
const JACOBIAN_FLOOR: f64 = 1e-3;

/// how `solve_pseudo_steady_state` reaches the steady state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SteadyStateMethod {
    /// direct solve; on failure integrate for the time scale and solve again
    #[default]
    Auto,
    /// direct solve only
    Residual,
    /// integrate for the time scale, then solve directly
    Initialize,
    /// integrate for the time scale only
    Transient,
}

/// one surface phase in the vector of unknowns
#[derive(Debug, Clone, Copy, PartialEq)]
struct SurfaceBlock {
    phase: usize,
    /// first kinetics species index of the phase
    offset: usize,
    /// first position in the vector of unknowns
    start: usize,
    n: usize,
}

#[derive(Debug, Clone)]
pub struct SurfaceSolver {
    blocks: Vec<SurfaceBlock>,
    dim: usize,
    /// statistics of the last time integration
    pub last_integration: Option<IntegrationStats>,
    /// iterations of the last direct steady-state solve
    pub last_newton_iterations: usize,
}

impl SurfaceSolver {
    pub fn new(kin: &InterfaceKinetics) -> Result<Self, KineticsError> {
        let mut blocks = Vec::new();
        let mut start = 0;
        for (phase, p) in kin.phases().iter().enumerate() {
            if p.kind() == PhaseKind::Surface {
                let n = kin.thermo(phase)?.n_species();
                blocks.push(SurfaceBlock {
                    phase,
                    offset: kin.phase_offset(phase)?,
                    start,
                    n,
                });
                start += n;
            }
        }
        if blocks.is_empty() {
            return Err(KineticsError::InvalidStateAccess(
                "the surface solver needs at least one surface phase".to_string(),
            ));
        }
        Ok(Self {
            blocks,
            dim: start,
            last_integration: None,
            last_newton_iterations: 0,
        })
    }

    /// number of unknowns (all surface species)
    pub fn dim(&self) -> usize {
        self.dim
    }

    fn gather(&self, kin: &InterfaceKinetics) -> Result<Vec<f64>, KineticsError> {
        let mut y = Vec::with_capacity(self.dim);
        for b in &self.blocks {
            y.extend_from_slice(kin.surface_coverages(b.phase)?);
        }
        Ok(y)
    }

    /// Integrates the coverages over `dt`. The coverages are normalized afterwards, also when
    /// the integration fails (they then hold the last accepted step).
    pub fn advance(
        &mut self,
        kin: &mut InterfaceKinetics,
        dt: f64,
        params: StiffParams,
    ) -> Result<(), KineticsError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(KineticsError::InvalidState(format!(
                "integration time must be non-negative, got {}",
                dt
            )));
        }
        let mut y = self.gather(kin)?;
        let mut bdf = BdfIntegrator::new(params);
        let ode = CoverageOde::new(kin.clone(), self.blocks.clone());
        let result = bdf.integrate(ode, 0.0, dt, &mut y);
        self.last_integration = Some(bdf.stats);
        scatter(kin, &self.blocks, &y, true)?;
        match result {
            Ok(stats) => {
                debug!(
                    "coverages advanced by {} s in {} steps",
                    dt, stats.accepted_steps
                );
                Ok(())
            }
            Err(e) => {
                warn!("coverage integration stopped at t = {}: {}", bdf.stats.t, e);
                Err(e)
            }
        }
    }

    fn advance_with_settings(&mut self, kin: &mut InterfaceKinetics, dt: f64) -> Result<(), KineticsError> {
        let s = kin.settings();
        let params = StiffParams {
            rtol: s.rtol,
            atol: s.atol,
            max_step_size: s.max_step_size,
            max_steps: s.max_steps,
            max_err_test_fails: s.max_err_test_fails,
            initial_step: None,
        };
        self.advance(kin, dt, params)
    }

    pub fn solve_steady_state(
        &mut self,
        kin: &mut InterfaceKinetics,
        method: SteadyStateMethod,
        time_scale: f64,
    ) -> Result<(), KineticsError> {
        if !time_scale.is_finite() || time_scale <= 0.0 {
            return Err(KineticsError::InvalidState(format!(
                "time scale must be positive, got {}",
                time_scale
            )));
        }
        match method {
            SteadyStateMethod::Residual => self.newton(kin),
            SteadyStateMethod::Transient => self.advance_with_settings(kin, time_scale),
            SteadyStateMethod::Initialize => {
                self.advance_with_settings(kin, time_scale)?;
                self.newton(kin)
            }
            SteadyStateMethod::Auto => match self.newton(kin) {
                Ok(()) => Ok(()),
                Err(e) => {
                    info!(
                        "direct steady-state solve failed ({}); integrating for {} s and retrying",
                        e, time_scale
                    );
                    self.advance_with_settings(kin, time_scale)?;
                    self.newton(kin).map_err(|e| {
                        KineticsError::ConvergenceFailure(format!(
                            "no pseudo-steady state after pseudo-transient start: {}",
                            e
                        ))
                    })
                }
            },
        }
    }

    /// Damped Newton iteration. The coverages are committed (normalized) only on convergence;
    /// otherwise the initial coverages are restored.
    fn newton(&mut self, kin: &mut InterfaceKinetics) -> Result<(), KineticsError> {
        let initial = self.gather(kin)?;
        match self.newton_iterate(kin, initial.clone()) {
            Ok(theta) => scatter(kin, &self.blocks, &theta, true),
            Err(e) => {
                scatter(kin, &self.blocks, &initial, false)?;
                Err(e)
            }
        }
    }

    fn newton_iterate(
        &mut self,
        kin: &mut InterfaceKinetics,
        mut theta: Vec<f64>,
    ) -> Result<Vec<f64>, KineticsError> {
        let s = kin.settings().clone();
        let n = self.dim;
        let mut f = vec![0.0; n];
        for iter in 1..=s.max_newton_iterations {
            self.last_newton_iterations = iter;
            let rows = self.balance_rows(&theta);
            let mut residual = SteadyResidual {
                ode: CoverageOde::new(&mut *kin, self.blocks.clone()),
                rows,
            };
            residual.rhs(0.0, &theta, &mut f)?;
            if f.iter().all(|v| v.abs() <= s.residual_tol) {
                debug!("steady state: residual below tolerance after {} iterations", iter - 1);
                return Ok(theta);
            }
            let mut jac = finite_difference_jacobian(&mut residual, 0.0, &theta, &f, JACOBIAN_FLOOR)?;
            // site balance rows are linear; differencing them loses everything to cancellation
            for (b, row) in self.blocks.iter().zip(residual.rows.iter()) {
                jac.row_mut(*row).fill(0.0);
                for k in b.start..b.start + b.n {
                    jac[(*row, k)] = 1.0;
                }
            }
            let rhs = DVector::from_iterator(n, f.iter().map(|v| -v));
            let delta = solve_linear(jac, &rhs).map_err(|e| {
                KineticsError::ConvergenceFailure(format!("Newton iteration {}: {}", iter, e))
            })?;

            let mut lambda: f64 = 1.0;
            for k in 0..n {
                if delta[k] < 0.0 && theta[k] > s.newton_atol && theta[k] + delta[k] < 0.0 {
                    lambda = lambda.min(0.5 * theta[k] / -delta[k]);
                }
            }
            for k in 0..n {
                theta[k] = (theta[k] + lambda * delta[k]).max(0.0);
            }
            let step = weighted_rms(delta.as_slice(), &theta, s.newton_rtol, s.newton_atol);
            if !step.is_finite() {
                return Err(KineticsError::ConvergenceFailure(format!(
                    "Newton iteration {} produced a non-finite step",
                    iter
                )));
            }
            if lambda == 1.0 && step <= 1.0 {
                debug!("steady state: Newton converged in {} iterations", iter);
                return Ok(theta);
            }
        }
        Err(KineticsError::ConvergenceFailure(format!(
            "Newton iteration did not converge in {} iterations",
            s.max_newton_iterations
        )))
    }

    /// position of the largest coverage of every surface phase
    fn balance_rows(&self, theta: &[f64]) -> Vec<usize> {
        self.blocks
            .iter()
            .map(|b| {
                let block = &theta[b.start..b.start + b.n];
                let mut best = 0;
                for (k, v) in block.iter().enumerate() {
                    if *v > block[best] {
                        best = k;
                    }
                }
                b.start + best
            })
            .collect()
    }
}

fn scatter(
    kin: &mut InterfaceKinetics,
    blocks: &[SurfaceBlock],
    y: &[f64],
    normalize: bool,
) -> Result<(), KineticsError> {
    for b in blocks {
        let theta = &y[b.start..b.start + b.n];
        if normalize {
            kin.set_surface_coverages(b.phase, theta)?;
        } else {
            kin.set_surface_coverages_no_norm(b.phase, theta)?;
        }
    }
    Ok(())
}

/// dtheta/dt of all surface species, the bulk phases frozen. `K` is either the manager itself
/// (owned copy for the integrator) or a mutable borrow of it (Newton iteration).
struct CoverageOde<K> {
    kin: K,
    blocks: Vec<SurfaceBlock>,
    wdot: Vec<f64>,
}

impl<K: BorrowMut<InterfaceKinetics>> CoverageOde<K> {
    fn new(kin: K, blocks: Vec<SurfaceBlock>) -> Self {
        let wdot = vec![0.0; kin.borrow().n_species()];
        Self { kin, blocks, wdot }
    }
}

impl<K: BorrowMut<InterfaceKinetics>> OdeSystem for CoverageOde<K> {
    type Error = KineticsError;
    fn dim(&self) -> usize {
        self.blocks.iter().map(|b| b.n).sum()
    }
    fn jacobian_floor(&self) -> f64 {
        JACOBIAN_FLOOR
    }
    fn rhs(&mut self, _t: f64, y: &[f64], ydot: &mut [f64]) -> Result<(), KineticsError> {
        let kin: &mut InterfaceKinetics = self.kin.borrow_mut();
        scatter(kin, &self.blocks, y, false)?;
        kin.get_net_production_rates(&mut self.wdot)?;
        for b in &self.blocks {
            let surf = kin.thermo(b.phase)?.as_surface().ok_or_else(|| {
                KineticsError::InvalidStateAccess(format!("phase {} is not a surface", b.phase))
            })?;
            let n0 = surf.site_density();
            for k in 0..b.n {
                ydot[b.start + k] = self.wdot[b.offset + k] * surf.size(k) / n0;
            }
        }
        Ok(())
    }
}

/// steady-state residual: dtheta/dt with one row per surface phase replaced by the site balance
struct SteadyResidual<'a> {
    ode: CoverageOde<&'a mut InterfaceKinetics>,
    rows: Vec<usize>,
}

impl OdeSystem for SteadyResidual<'_> {
    type Error = KineticsError;
    fn dim(&self) -> usize {
        self.ode.dim()
    }
    fn rhs(&mut self, t: f64, y: &[f64], ydot: &mut [f64]) -> Result<(), KineticsError> {
        self.ode.rhs(t, y, ydot)?;
        for (b, row) in self.ode.blocks.iter().zip(self.rows.iter()) {
            ydot[*row] = y[b.start..b.start + b.n].iter().sum::<f64>() - 1.0;
        }
        Ok(())
    }
}
