use nalgebra::{DMatrix, DVector};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum NumericsError {
    #[error("singular matrix")]
    SingularMatrix,
    #[error("step limit of {0} steps reached at t = {1}")]
    TooManySteps(usize, f64),
    #[error("{fails} consecutive error test failures at t = {t}, step size {h}")]
    ErrorTestFailures { fails: usize, t: f64, h: f64 },
    #[error("step size {h} underflow at t = {t}")]
    StepSizeUnderflow { t: f64, h: f64 },
    #[error("non-finite state at t = {0}")]
    NonFiniteState(f64),
}

/// solves A x = b by LU decomposition with partial pivoting
pub fn solve_linear(a: DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>, NumericsError> {
    let lu = a.lu();
    let x = lu.solve(b).ok_or(NumericsError::SingularMatrix)?;
    if x.iter().any(|v| !v.is_finite()) {
        return Err(NumericsError::SingularMatrix);
    }
    Ok(x)
}

/// sqrt(1/n sum (v_i / (atol + rtol |y_i|))^2)
pub fn weighted_rms(v: &[f64], y: &[f64], rtol: f64, atol: f64) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v
        .iter()
        .zip(y.iter())
        .map(|(vi, yi)| {
            let w = atol + rtol * yi.abs();
            (vi / w).powi(2)
        })
        .sum();
    (sum / v.len() as f64).sqrt()
}
