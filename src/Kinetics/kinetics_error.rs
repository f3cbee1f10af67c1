use crate::Numerics::linear_algebra::NumericsError;
use crate::Thermodynamics::thermo_error::ThermoError;
use thiserror::Error;

/// errors reported by the kinetics manager, the stoichiometry bookkeeping and the surface solver
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KineticsError {
    /// malformed reaction at mechanism-assembly time; the offending `add` is aborted
    #[error("Invalid data for reaction {reaction}: {reason}")]
    InvalidReactionData { reaction: usize, reason: String },
    /// the stiff integrator hit its step or error-test ceiling
    #[error("Integration failure: {0}")]
    IntegrationFailure(String),
    /// direct pseudo-steady-state solve did not converge
    #[error("Convergence failure: {0}")]
    ConvergenceFailure(String),
    /// request that the addressed phase cannot honour
    #[error("Invalid state access: {0}")]
    InvalidStateAccess(String),
    /// non-physical thermodynamic state (temperature, pressure, coverages) or non-finite result
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Index {index} out of range for {what} (size {size})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        size: usize,
    },
    #[error("Array '{name}' is too short: needs {expected}, got {got}")]
    ArraySize {
        name: &'static str,
        expected: usize,
        got: usize,
    },
}

impl From<ThermoError> for KineticsError {
    fn from(err: ThermoError) -> Self {
        match err {
            ThermoError::InvalidStateAccess(msg) => KineticsError::InvalidStateAccess(msg),
            ThermoError::InvalidState(msg) => KineticsError::InvalidState(msg),
            ThermoError::UnknownSpecies(name) => {
                KineticsError::InvalidStateAccess(format!("unknown species '{}'", name))
            }
            ThermoError::SizeMismatch { expected, got } => KineticsError::ArraySize {
                name: "phase composition",
                expected,
                got,
            },
        }
    }
}

impl From<NumericsError> for KineticsError {
    fn from(err: NumericsError) -> Self {
        match err {
            NumericsError::SingularMatrix => KineticsError::ConvergenceFailure(err.to_string()),
            _ => KineticsError::IntegrationFailure(err.to_string()),
        }
    }
}

/// checks that an output buffer can hold `expected` entries
pub fn check_array_len(name: &'static str, len: usize, expected: usize) -> Result<(), KineticsError> {
    if len < expected {
        return Err(KineticsError::ArraySize {
            name,
            expected,
            got: len,
        });
    }
    Ok(())
}
