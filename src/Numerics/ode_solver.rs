//! Stiff ODE integration for small dense systems.
//!
//! The stepping is done by the BDF solver of RustedSciThe (`numerical::BDF::BDF_solver::BDF`),
//! fed with numeric closures over an `OdeSystem`. That solver evaluates the Jacobian once, at
//! the point it is initialized with, so the integrator restarts it at every accepted point:
//! each step is a first-order BDF (backward Euler) step with a fresh finite-difference
//! Jacobian, a Newton solve and the solver's own error test.
//!
//! Between steps the size is chosen from the local error estimate of backward Euler,
//!
//! err = 0.5 h (f(t + h, y_new) - f(t, y))
//!
//! in the weighted RMS norm with weights atol + rtol |y_new|: h_next = h * 0.9 / sqrt(err),
//! clamped to [0.2, 5].
use crate::Numerics::linear_algebra::{NumericsError, weighted_rms};
use RustedSciThe::numerical::BDF::BDF_solver::BDF;
use RustedSciThe::numerical::BDF::common::{NumberOrVec, select_initial_step};
use log::{debug, warn};
use nalgebra::{DMatrix, DVector};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// right-hand side dy/dt = f(t, y)
pub trait OdeSystem {
    type Error: From<NumericsError>;
    fn dim(&self) -> usize;
    fn rhs(&mut self, t: f64, y: &[f64], ydot: &mut [f64]) -> Result<(), Self::Error>;
    /// smallest state scale used for finite-difference perturbations
    fn jacobian_floor(&self) -> f64 {
        1e-6
    }
}

/// forward-difference Jacobian; column j uses a perturbation proportional to max(|y_j|, floor)
pub fn finite_difference_jacobian<S: OdeSystem>(
    sys: &mut S,
    t: f64,
    y: &[f64],
    f0: &[f64],
    floor: f64,
) -> Result<DMatrix<f64>, S::Error> {
    let n = y.len();
    let mut jac = DMatrix::zeros(n, n);
    let mut yp = y.to_vec();
    let mut fp = vec![0.0; n];
    let sqrt_eps = f64::EPSILON.sqrt();
    for j in 0..n {
        let delta = sqrt_eps * y[j].abs().max(floor);
        yp[j] = y[j] + delta;
        // the actually representable step
        let delta = yp[j] - y[j];
        sys.rhs(t, &yp, &mut fp)?;
        for i in 0..n {
            jac[(i, j)] = (fp[i] - f0[i]) / delta;
        }
        yp[j] = y[j];
    }
    Ok(jac)
}

/// largest step the BDF solver of RustedSciThe takes, whatever it is asked for
pub const BDF_MAX_STEP: f64 = 1e-3;

const SAFETY: f64 = 0.9;
const MAX_GROWTH: f64 = 5.0;
const MIN_SHRINK: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct StiffParams {
    pub rtol: f64,
    pub atol: f64,
    /// zero means no limit beyond `BDF_MAX_STEP`
    pub max_step_size: f64,
    pub max_steps: usize,
    /// consecutive steps the solver may cut below the requested size
    pub max_err_test_fails: usize,
    /// first trial step; chosen by RustedSciThe's `select_initial_step` when None
    pub initial_step: Option<f64>,
}

impl Default for StiffParams {
    fn default() -> Self {
        Self {
            rtol: 1e-7,
            atol: 1e-14,
            max_step_size: 0.0,
            max_steps: 20000,
            max_err_test_fails: 7,
            initial_step: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntegrationStats {
    pub accepted_steps: usize,
    /// steps the solver had to shorten
    pub rejected_steps: usize,
    pub rhs_evaluations: usize,
    pub jacobian_evaluations: usize,
    /// time reached (equals the end time on success)
    pub t: f64,
    /// last step size taken
    pub last_step: f64,
}

/// keeps the first error raised inside a solver closure
fn record<E>(failure: &RefCell<Option<E>>, e: E) {
    let mut slot = failure.borrow_mut();
    if slot.is_none() {
        *slot = Some(e);
    }
}

type RhsFn = Box<dyn Fn(f64, &DVector<f64>) -> DVector<f64>>;
type JacFn = Box<dyn Fn(f64, &DVector<f64>) -> DMatrix<f64>>;

/// An `OdeSystem` shared with the solver closures. The first error raised inside a closure is
/// kept in `failure`; the closure itself returns zeros so that the solver step terminates.
struct SharedSystem<S: OdeSystem> {
    sys: Rc<RefCell<S>>,
    failure: Rc<RefCell<Option<S::Error>>>,
    evaluations: Rc<Cell<usize>>,
    n: usize,
}

impl<S> SharedSystem<S>
where
    S: OdeSystem + 'static,
    S::Error: 'static,
{
    fn rhs_fn(&self) -> RhsFn {
        let sys = Rc::clone(&self.sys);
        let failure = Rc::clone(&self.failure);
        let evaluations = Rc::clone(&self.evaluations);
        let n = self.n;
        Box::new(move |t: f64, y: &DVector<f64>| -> DVector<f64> {
            evaluations.set(evaluations.get() + 1);
            let mut ydot = DVector::zeros(n);
            if let Err(e) = sys.borrow_mut().rhs(t, y.as_slice(), ydot.as_mut_slice()) {
                record(&failure, e);
                ydot.fill(0.0);
            }
            ydot
        })
    }

    fn jac_fn(&self) -> JacFn {
        let sys = Rc::clone(&self.sys);
        let failure = Rc::clone(&self.failure);
        let evaluations = Rc::clone(&self.evaluations);
        let n = self.n;
        Box::new(move |t: f64, y: &DVector<f64>| -> DMatrix<f64> {
            evaluations.set(evaluations.get() + n + 1);
            let mut sys = sys.borrow_mut();
            let floor = sys.jacobian_floor();
            let mut f0 = vec![0.0; n];
            let jac = sys
                .rhs(t, y.as_slice(), &mut f0)
                .and_then(|_| finite_difference_jacobian(&mut *sys, t, y.as_slice(), &f0, floor));
            match jac {
                Ok(jac) => jac,
                Err(e) => {
                    record(&failure, e);
                    DMatrix::zeros(n, n)
                }
            }
        })
    }

    fn take_failure(&self) -> Option<S::Error> {
        self.failure.borrow_mut().take()
    }
}

#[derive(Debug, Clone)]
pub struct BdfIntegrator {
    pub params: StiffParams,
    pub stats: IntegrationStats,
}

impl BdfIntegrator {
    pub fn new(params: StiffParams) -> Self {
        Self {
            params,
            stats: IntegrationStats::default(),
        }
    }

    fn max_step(&self) -> f64 {
        if self.params.max_step_size > 0.0 {
            self.params.max_step_size.min(BDF_MAX_STEP)
        } else {
            BDF_MAX_STEP
        }
    }

    /// Integrates from `t0` to `t_end`, overwriting `y`. On failure `y` holds the last accepted
    /// state and `self.stats.t` its time.
    pub fn integrate<S>(&mut self, sys: S, t0: f64, t_end: f64, y: &mut [f64]) -> Result<IntegrationStats, S::Error>
    where
        S: OdeSystem + 'static,
        S::Error: 'static,
    {
        let n = sys.dim();
        self.stats = IntegrationStats {
            t: t0,
            ..IntegrationStats::default()
        };
        let span = t_end - t0;
        if n == 0 || !(span > 0.0) {
            return Ok(self.stats);
        }
        if y.iter().any(|v| !v.is_finite()) {
            return Err(NumericsError::NonFiniteState(t0).into());
        }
        let shared = SharedSystem {
            sys: Rc::new(RefCell::new(sys)),
            failure: Rc::new(RefCell::new(None)),
            evaluations: Rc::new(Cell::new(0)),
            n,
        };
        let rtol = self.params.rtol;
        let atol = self.params.atol;
        let max_step = self.max_step();

        let mut t = t0;
        let mut f_old = DVector::zeros(n);
        shared
            .sys
            .borrow_mut()
            .rhs(t, y, f_old.as_mut_slice())?;
        shared.evaluations.set(1);

        let mut h_next = match self.params.initial_step {
            Some(h) if h > 0.0 => h,
            _ => {
                let fun = shared.rhs_fn();
                let h = select_initial_step(
                    &fun,
                    t0,
                    &DVector::from_column_slice(y),
                    t_end,
                    max_step,
                    &f_old,
                    1.0,
                    1.0,
                    NumberOrVec::Number(rtol),
                    NumberOrVec::Number(atol),
                );
                if let Some(e) = shared.take_failure() {
                    return Err(e);
                }
                h
            }
        };
        let mut cuts = 0;

        while t_end - t > 1e-12 * span {
            if self.stats.accepted_steps >= self.params.max_steps {
                warn!("BDF: step limit {} reached at t = {}", self.params.max_steps, t);
                return Err(NumericsError::TooManySteps(self.params.max_steps, t).into());
            }
            let requested = h_next.min(max_step).min(t_end - t);
            if !(requested > 0.0) || requested <= f64::EPSILON * t.abs() {
                return Err(NumericsError::StepSizeUnderflow { t, h: requested }.into());
            }

            let mut bdf = BDF::new();
            bdf.set_initial(
                shared.rhs_fn(),
                t,
                DVector::from_column_slice(y),
                t_end,
                max_step,
                NumberOrVec::Number(rtol),
                NumberOrVec::Number(atol),
                Some(shared.jac_fn()),
                None,
                false,
                Some(requested),
            );
            self.stats.jacobian_evaluations += 1;
            let (success, message) = bdf._step_impl();
            self.stats.rhs_evaluations = shared.evaluations.get();
            if let Some(e) = shared.take_failure() {
                warn!("BDF: right-hand side failed at t = {}", t);
                return Err(e);
            }
            if !success {
                warn!("BDF: step failed at t = {}: {}", t, message.unwrap_or("unknown reason"));
                return Err(NumericsError::StepSizeUnderflow { t, h: requested }.into());
            }
            let h = bdf.t - t;
            if !(h > 0.0) || bdf.y.iter().any(|v| !v.is_finite()) {
                return Err(NumericsError::StepSizeUnderflow { t, h }.into());
            }
            self.stats.last_step = h;
            if h < requested * (1.0 - 1e-10) {
                cuts += 1;
                self.stats.rejected_steps += 1;
                if cuts >= self.params.max_err_test_fails {
                    warn!("BDF: {} consecutive shortened steps at t = {}, h = {}", cuts, t, h);
                    return Err(NumericsError::ErrorTestFailures { fails: cuts, t, h }.into());
                }
            } else {
                cuts = 0;
            }

            t = if t_end - bdf.t <= 1e-12 * span { t_end } else { bdf.t };
            y.copy_from_slice(bdf.y.as_slice());
            self.stats.accepted_steps += 1;
            self.stats.t = t;
            if t >= t_end {
                break;
            }

            let mut f_new = DVector::zeros(n);
            shared
                .sys
                .borrow_mut()
                .rhs(t, y, f_new.as_mut_slice())?;
            shared.evaluations.set(shared.evaluations.get() + 1);
            let err: Vec<f64> = (0..n).map(|i| 0.5 * h * (f_new[i] - f_old[i])).collect();
            let e = weighted_rms(&err, y, rtol, atol);
            let factor = if e > 0.0 && e.is_finite() {
                (SAFETY / e.sqrt()).clamp(MIN_SHRINK, MAX_GROWTH)
            } else if e == 0.0 {
                MAX_GROWTH
            } else {
                MIN_SHRINK
            };
            h_next = h * factor;
            f_old = f_new;
        }
        self.stats.rhs_evaluations = shared.evaluations.get();
        debug!(
            "BDF: reached t = {} in {} steps ({} shortened)",
            t, self.stats.accepted_steps, self.stats.rejected_steps
        );
        Ok(self.stats)
    }
}
