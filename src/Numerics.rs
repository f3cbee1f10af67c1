/// Stiff ODE integration: the `OdeSystem` contract, finite-difference Jacobians and an adaptive
/// driver around the BDF solver of RustedSciThe
pub mod ode_solver;
/// dense linear solves (LU), weighted norms and the error type of the numerics layer
pub mod linear_algebra;
