/// ready-made mechanisms: hydrogen on platinum and a charge-transfer electrode
pub mod mechanisms;
/// runnable walk-throughs of the kinetics manager and the surface solver
pub mod surface_examples;
