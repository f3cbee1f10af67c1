use crate::Kinetics::rate_expressions::RateExpression;
use serde::{Deserialize, Serialize};

/// One reaction of a mechanism, with species given by their index in the kinetics species list
/// (all species of all phases, phase after phase). Coefficients may be fractional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    /// human readable label, e.g. "H2 + 2 PT(S) => 2 H(S)"
    pub equation: String,
    pub reactants: Vec<(usize, f64)>,
    pub products: Vec<(usize, f64)>,
    #[serde(default)]
    pub reversible: bool,
    /// explicit forward orders (irreversible reactions only)
    #[serde(default)]
    pub orders: Vec<(usize, f64)>,
    pub rate: RateExpression,
    /// charge-transfer (symmetry) coefficient
    #[serde(default)]
    pub beta: f64,
}

impl Reaction {
    pub fn new(
        equation: &str,
        reactants: Vec<(usize, f64)>,
        products: Vec<(usize, f64)>,
        reversible: bool,
        rate: impl Into<RateExpression>,
    ) -> Self {
        Self {
            equation: equation.to_string(),
            reactants,
            products,
            reversible,
            orders: Vec::new(),
            rate: rate.into(),
            beta: 0.0,
        }
    }
    pub fn with_orders(mut self, orders: Vec<(usize, f64)>) -> Self {
        self.orders = orders;
        self
    }
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }
}
