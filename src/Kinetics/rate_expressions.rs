//! Rate laws for forward rate constants.
//!
//! Every law evaluates k_f from a `SharedRateData` snapshot (temperature, pressure, coverages
//! of the reacting surface, site density), which the kinetics manager computes once per
//! refresh and hands to all rate batches.
use crate::constants::{GAS_CONSTANT, TINY};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// kinds of rate laws; one batch evaluator exists per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateKind {
    Arrhenius,
    InterfaceArrhenius,
    StickingArrhenius,
    PlogArrhenius,
}

/// state shared by every rate evaluation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharedRateData {
    pub temperature: f64,
    pub log_t: f64,
    pub recip_t: f64,
    pub pressure: f64,
    pub log_p: f64,
    /// coverages of the reacting surface phase
    pub coverages: Vec<f64>,
    /// kmol/m^2, zero when the mechanism has no surface
    pub site_density: f64,
}

impl SharedRateData {
    #[allow(non_snake_case)]
    pub fn new(T: f64, P: f64) -> Self {
        Self {
            temperature: T,
            log_t: T.ln(),
            recip_t: 1.0 / T,
            pressure: P,
            log_p: P.ln(),
            coverages: Vec::new(),
            site_density: 0.0,
        }
    }
    pub fn with_surface(mut self, coverages: &[f64], site_density: f64) -> Self {
        self.coverages = coverages.to_vec();
        self.site_density = site_density;
        self
    }
}

/// contract of a single rate law stored in a `MultiRate` batch
pub trait RateLaw: Clone + std::fmt::Debug {
    const KIND: RateKind;
    fn eval(&self, shared: &SharedRateData) -> f64;
    /// true when the value changes with coverages at fixed temperature
    fn uses_coverages(&self) -> bool {
        false
    }
    /// rejects parameters the rate law cannot evaluate
    fn check(&self) -> Result<(), String> {
        Ok(())
    }
    fn into_expression(self) -> RateExpression;
    fn from_expression(expr: RateExpression) -> Option<Self>;
}

////////////////////////////////////// ARRHENIUS //////////////////////////////////////////////
/// k = A T^b exp(-Ea/RT); Ea in J/kmol
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrheniusRate {
    pub A: f64,
    #[serde(default)]
    pub b: f64,
    #[serde(default)]
    pub Ea: f64,
}

impl ArrheniusRate {
    #[allow(non_snake_case)]
    pub fn new(A: f64, b: f64, Ea: f64) -> Self {
        Self { A, b, Ea }
    }
    pub fn eval_from(&self, log_t: f64, recip_t: f64) -> f64 {
        if self.b == 0.0 && self.Ea == 0.0 {
            return self.A;
        }
        self.A * (self.b * log_t - self.Ea / GAS_CONSTANT * recip_t).exp()
    }
}

impl RateLaw for ArrheniusRate {
    const KIND: RateKind = RateKind::Arrhenius;
    fn eval(&self, shared: &SharedRateData) -> f64 {
        self.eval_from(shared.log_t, shared.recip_t)
    }
    fn into_expression(self) -> RateExpression {
        RateExpression::Arrhenius(self)
    }
    fn from_expression(expr: RateExpression) -> Option<Self> {
        match expr {
            RateExpression::Arrhenius(r) => Some(r),
            _ => None,
        }
    }
}

////////////////////////////////////// COVERAGE DEPENDENCE //////////////////////////////////
/// multiplies a rate by 10^(a theta) theta^m exp(-E theta / RT)
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageDependency {
    /// surface species name
    pub species: String,
    #[serde(default)]
    pub a: f64,
    #[serde(default)]
    pub m: f64,
    /// J/kmol
    #[serde(default)]
    pub E: f64,
    /// index of the species within the reacting surface phase, set when the reaction is added
    #[serde(skip)]
    pub index: usize,
}

impl CoverageDependency {
    #[allow(non_snake_case)]
    pub fn new(species: &str, a: f64, m: f64, E: f64) -> Self {
        Self {
            species: species.to_string(),
            a,
            m,
            E,
            index: 0,
        }
    }
}

/// ln of the product of all coverage factors
fn log_coverage_factor(deps: &[CoverageDependency], shared: &SharedRateData) -> f64 {
    let mut acc = 0.0;
    for dep in deps {
        let theta = shared.coverages.get(dep.index).copied().unwrap_or(0.0);
        acc += dep.a * theta * std::f64::consts::LN_10;
        acc -= dep.E * theta * shared.recip_t / GAS_CONSTANT;
        if dep.m != 0.0 {
            acc += dep.m * theta.max(TINY).ln();
        }
    }
    acc
}

/// Arrhenius rate of a surface reaction with optional coverage dependencies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceArrheniusRate {
    #[serde(flatten)]
    pub arrhenius: ArrheniusRate,
    #[serde(default)]
    pub coverage_deps: Vec<CoverageDependency>,
}

impl InterfaceArrheniusRate {
    pub fn new(arrhenius: ArrheniusRate, coverage_deps: Vec<CoverageDependency>) -> Self {
        Self {
            arrhenius,
            coverage_deps,
        }
    }
}

impl RateLaw for InterfaceArrheniusRate {
    const KIND: RateKind = RateKind::InterfaceArrhenius;
    fn eval(&self, shared: &SharedRateData) -> f64 {
        let k = self.arrhenius.eval_from(shared.log_t, shared.recip_t);
        if self.coverage_deps.is_empty() {
            return k;
        }
        k * log_coverage_factor(&self.coverage_deps, shared).exp()
    }
    fn uses_coverages(&self) -> bool {
        !self.coverage_deps.is_empty()
    }
    fn into_expression(self) -> RateExpression {
        RateExpression::InterfaceArrhenius(self)
    }
    fn from_expression(expr: RateExpression) -> Option<Self> {
        match expr {
            RateExpression::InterfaceArrhenius(r) => Some(r),
            _ => None,
        }
    }
}

////////////////////////////////////// STICKING //////////////////////////////////////////////
/// Sticking-coefficient rate: gamma(T, theta) from the Arrhenius form, then
/// k = gamma sqrt(RT / (2 pi W)) / n0^m
/// with W the molecular weight of the sticking species and m the sum of the orders of the
/// surface reactants. With `motz_wise` gamma is replaced by gamma / (1 - gamma/2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickingRate {
    #[serde(flatten)]
    pub gamma: ArrheniusRate,
    #[serde(default)]
    pub motz_wise: bool,
    /// name of the bulk-phase species that sticks; by default the only non-surface reactant
    #[serde(default)]
    pub sticking_species: Option<String>,
    #[serde(default)]
    pub coverage_deps: Vec<CoverageDependency>,
    /// kg/kmol, set when the reaction is added
    #[serde(skip)]
    pub molecular_weight: f64,
    /// sum of surface reactant orders, set when the reaction is added
    #[serde(skip)]
    pub surface_order: f64,
}

impl StickingRate {
    pub fn new(gamma: ArrheniusRate, motz_wise: bool, sticking_species: Option<&str>) -> Self {
        Self {
            gamma,
            motz_wise,
            sticking_species: sticking_species.map(|s| s.to_string()),
            coverage_deps: Vec::new(),
            molecular_weight: 0.0,
            surface_order: 0.0,
        }
    }
    pub fn with_coverage_deps(mut self, deps: Vec<CoverageDependency>) -> Self {
        self.coverage_deps = deps;
        self
    }
    /// sqrt(R / (2 pi W)) / n0^m, the temperature independent multiplier
    pub fn multiplier(&self, site_density: f64) -> f64 {
        (GAS_CONSTANT / (2.0 * PI * self.molecular_weight)).sqrt()
            / site_density.powf(self.surface_order)
    }
}

impl RateLaw for StickingRate {
    const KIND: RateKind = RateKind::StickingArrhenius;
    fn eval(&self, shared: &SharedRateData) -> f64 {
        let mut gamma = self.gamma.eval_from(shared.log_t, shared.recip_t);
        if !self.coverage_deps.is_empty() {
            gamma *= log_coverage_factor(&self.coverage_deps, shared).exp();
        }
        if self.motz_wise {
            gamma /= 1.0 - 0.5 * gamma;
        }
        gamma * shared.temperature.sqrt() * self.multiplier(shared.site_density)
    }
    fn uses_coverages(&self) -> bool {
        !self.coverage_deps.is_empty()
    }
    fn into_expression(self) -> RateExpression {
        RateExpression::StickingArrhenius(self)
    }
    fn from_expression(expr: RateExpression) -> Option<Self> {
        match expr {
            RateExpression::StickingArrhenius(r) => Some(r),
            _ => None,
        }
    }
}

////////////////////////////////////// PLOG //////////////////////////////////////////////////
/// Pressure-dependent rate: Arrhenius expressions tabulated at increasing pressures,
/// interpolated linearly in ln k versus ln P and clamped outside the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlogRate {
    /// (pressure in Pa, rate at that pressure), pressures strictly increasing
    pub rates: Vec<(f64, ArrheniusRate)>,
}

impl PlogRate {
    /// sorts the table by pressure; fails on an empty table, duplicate pressures or
    /// non-positive pre-exponential factors (ln k must exist)
    pub fn new(mut rates: Vec<(f64, ArrheniusRate)>) -> Result<Self, String> {
        if rates.is_empty() {
            return Err("PLOG table is empty".to_string());
        }
        rates.sort_by(|a, b| a.0.total_cmp(&b.0));
        let plog = Self { rates };
        plog.validate()?;
        Ok(plog)
    }
    pub fn validate(&self) -> Result<(), String> {
        if self.rates.is_empty() {
            return Err("PLOG table is empty".to_string());
        }
        for w in self.rates.windows(2) {
            if !(w[1].0 > w[0].0) {
                return Err(format!(
                    "PLOG pressures must be strictly increasing, got {} after {}",
                    w[1].0, w[0].0
                ));
            }
        }
        if let Some((p, _)) = self.rates.iter().find(|(p, r)| !(*p > 0.0) || !(r.A > 0.0)) {
            return Err(format!("PLOG entry at P = {} needs positive P and A", p));
        }
        Ok(())
    }
}

impl RateLaw for PlogRate {
    const KIND: RateKind = RateKind::PlogArrhenius;
    fn eval(&self, shared: &SharedRateData) -> f64 {
        let n = self.rates.len();
        let Some((p_first, first)) = self.rates.first() else {
            return f64::NAN;
        };
        if n == 1 || shared.pressure <= *p_first {
            return first.eval_from(shared.log_t, shared.recip_t);
        }
        let (p_last, last) = &self.rates[n - 1];
        if shared.pressure >= *p_last {
            return last.eval_from(shared.log_t, shared.recip_t);
        }
        let i = self
            .rates
            .windows(2)
            .position(|w| shared.pressure < w[1].0)
            .unwrap_or(n - 2);
        let (p1, r1) = &self.rates[i];
        let (p2, r2) = &self.rates[i + 1];
        let ln_k1 = r1.eval_from(shared.log_t, shared.recip_t).ln();
        let ln_k2 = r2.eval_from(shared.log_t, shared.recip_t).ln();
        let (ln_p1, ln_p2) = (p1.ln(), p2.ln());
        (ln_k1 + (ln_k2 - ln_k1) * (shared.log_p - ln_p1) / (ln_p2 - ln_p1)).exp()
    }
    fn check(&self) -> Result<(), String> {
        self.validate()
    }
    fn into_expression(self) -> RateExpression {
        RateExpression::PlogArrhenius(self)
    }
    fn from_expression(expr: RateExpression) -> Option<Self> {
        match expr {
            RateExpression::PlogArrhenius(r) => Some(r),
            _ => None,
        }
    }
}

/// tagged rate-expression record attached to every reaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RateExpression {
    Arrhenius(ArrheniusRate),
    InterfaceArrhenius(InterfaceArrheniusRate),
    StickingArrhenius(StickingRate),
    PlogArrhenius(PlogRate),
}

impl RateExpression {
    pub fn kind(&self) -> RateKind {
        match self {
            RateExpression::Arrhenius(_) => RateKind::Arrhenius,
            RateExpression::InterfaceArrhenius(_) => RateKind::InterfaceArrhenius,
            RateExpression::StickingArrhenius(_) => RateKind::StickingArrhenius,
            RateExpression::PlogArrhenius(_) => RateKind::PlogArrhenius,
        }
    }
    /// coverage dependencies of surface rate laws, empty for the others
    pub fn coverage_deps_mut(&mut self) -> Option<&mut Vec<CoverageDependency>> {
        match self {
            RateExpression::InterfaceArrhenius(r) => Some(&mut r.coverage_deps),
            RateExpression::StickingArrhenius(r) => Some(&mut r.coverage_deps),
            _ => None,
        }
    }
    pub fn is_sticking(&self) -> bool {
        matches!(self, RateExpression::StickingArrhenius(_))
    }
}

impl From<ArrheniusRate> for RateExpression {
    fn from(r: ArrheniusRate) -> Self {
        RateExpression::Arrhenius(r)
    }
}
impl From<InterfaceArrheniusRate> for RateExpression {
    fn from(r: InterfaceArrheniusRate) -> Self {
        RateExpression::InterfaceArrhenius(r)
    }
}
impl From<StickingRate> for RateExpression {
    fn from(r: StickingRate) -> Self {
        RateExpression::StickingArrhenius(r)
    }
}
impl From<PlogRate> for RateExpression {
    fn from(r: PlogRate) -> Self {
        RateExpression::PlogArrhenius(r)
    }
}
