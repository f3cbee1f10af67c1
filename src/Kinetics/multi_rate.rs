//! Batch evaluation of forward rate constants.
//!
//! Reactions sharing a rate-law kind live in one `MultiRate<R>` batch and are evaluated in a
//! tight loop writing straight into their slots of the mechanism-wide k_f vector. Batches are
//! created on demand from a `RateRegistry` owned by the evaluator, so adding a new kind of rate
//! law means adding a variant to `RateBatch` and registering its constructor.
use crate::Kinetics::kinetics_error::KineticsError;
use crate::Kinetics::rate_expressions::{
    ArrheniusRate, InterfaceArrheniusRate, PlogRate, RateExpression, RateKind, RateLaw,
    SharedRateData, StickingRate,
};
use enum_dispatch::enum_dispatch;
use log::debug;
use std::collections::HashMap;

/// all rates of one kind together with the reactions they belong to
#[derive(Debug, Clone)]
pub struct MultiRate<R: RateLaw> {
    rxn_index: Vec<usize>,
    rates: Vec<R>,
}

impl<R: RateLaw> Default for MultiRate<R> {
    fn default() -> Self {
        Self {
            rxn_index: Vec::new(),
            rates: Vec::new(),
        }
    }
}

pub type ArrheniusBatch = MultiRate<ArrheniusRate>;
pub type InterfaceArrheniusBatch = MultiRate<InterfaceArrheniusRate>;
pub type StickingBatch = MultiRate<StickingRate>;
pub type PlogBatch = MultiRate<PlogRate>;

#[enum_dispatch]
pub trait MultiRateTrait {
    fn kind(&self) -> RateKind;
    /// stores the rate of reaction `rxn`; the expression must be of this batch's kind
    fn add_rate(&mut self, rxn: usize, expr: RateExpression) -> Result<(), KineticsError>;
    /// writes k_f of every stored reaction into `kf[rxn]`
    fn update(&self, shared: &SharedRateData, kf: &mut [f64]);
    fn n_rates(&self) -> usize;
    fn reaction_indices(&self) -> &[usize];
    fn depends_on_coverage(&self) -> bool;
    /// stored parameters as tagged expressions, in insertion order
    fn expressions(&self) -> Vec<(usize, RateExpression)>;
}

impl<R: RateLaw> MultiRateTrait for MultiRate<R> {
    fn kind(&self) -> RateKind {
        R::KIND
    }
    fn add_rate(&mut self, rxn: usize, expr: RateExpression) -> Result<(), KineticsError> {
        let got = expr.kind();
        let rate = R::from_expression(expr).ok_or_else(|| KineticsError::InvalidReactionData {
            reaction: rxn,
            reason: format!("{:?} rate given to the {:?} evaluator", got, R::KIND),
        })?;
        rate.check()
            .map_err(|reason| KineticsError::InvalidReactionData { reaction: rxn, reason })?;
        self.rxn_index.push(rxn);
        self.rates.push(rate);
        Ok(())
    }
    fn update(&self, shared: &SharedRateData, kf: &mut [f64]) {
        for (rxn, rate) in self.rxn_index.iter().zip(self.rates.iter()) {
            kf[*rxn] = rate.eval(shared);
        }
    }
    fn n_rates(&self) -> usize {
        self.rates.len()
    }
    fn reaction_indices(&self) -> &[usize] {
        &self.rxn_index
    }
    fn depends_on_coverage(&self) -> bool {
        self.rates.iter().any(|r| r.uses_coverages())
    }
    fn expressions(&self) -> Vec<(usize, RateExpression)> {
        self.rxn_index
            .iter()
            .copied()
            .zip(self.rates.iter().cloned().map(|r| r.into_expression()))
            .collect()
    }
}

/// one batch per rate-law kind
#[derive(Debug, Clone)]
#[enum_dispatch(MultiRateTrait)]
pub enum RateBatch {
    Arrhenius(ArrheniusBatch),
    InterfaceArrhenius(InterfaceArrheniusBatch),
    Sticking(StickingBatch),
    Plog(PlogBatch),
}

/// constructor of an empty batch
pub type BatchConstructor = fn() -> RateBatch;

/// Maps every known rate kind to the constructor of its empty batch. Owned by the evaluator;
/// there is no process-wide registry.
#[derive(Debug, Clone)]
pub struct RateRegistry {
    constructors: HashMap<RateKind, BatchConstructor>,
}

impl Default for RateRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(RateKind::Arrhenius, || RateBatch::from(ArrheniusBatch::default()));
        registry.register(RateKind::InterfaceArrhenius, || {
            RateBatch::from(InterfaceArrheniusBatch::default())
        });
        registry.register(RateKind::StickingArrhenius, || RateBatch::from(StickingBatch::default()));
        registry.register(RateKind::PlogArrhenius, || RateBatch::from(PlogBatch::default()));
        registry
    }
}

impl RateRegistry {
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }
    pub fn register(&mut self, kind: RateKind, constructor: BatchConstructor) {
        self.constructors.insert(kind, constructor);
    }
    pub fn is_registered(&self, kind: RateKind) -> bool {
        self.constructors.contains_key(&kind)
    }
    pub fn create(&self, kind: RateKind) -> Option<RateBatch> {
        self.constructors.get(&kind).map(|ctor| ctor())
    }
}

/// All rate batches of one mechanism plus the reaction -> batch ownership map.
#[derive(Debug, Clone, Default)]
pub struct MultiRateEvaluator {
    registry: RateRegistry,
    batches: Vec<RateBatch>,
    batch_of_kind: HashMap<RateKind, usize>,
    owner: Vec<Option<usize>>,
}

impl MultiRateEvaluator {
    pub fn new(registry: RateRegistry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }
    pub fn n_batches(&self) -> usize {
        self.batches.len()
    }
    /// true when a rate of this kind can be added
    pub fn supports(&self, kind: RateKind) -> bool {
        self.batch_of_kind.contains_key(&kind) || self.registry.is_registered(kind)
    }

    /// adds the rate of reaction `rxn`, creating the batch for its kind on first use
    pub fn add(&mut self, rxn: usize, expr: RateExpression) -> Result<(), KineticsError> {
        if self.owner.get(rxn).copied().flatten().is_some() {
            return Err(KineticsError::InvalidReactionData {
                reaction: rxn,
                reason: "reaction already has a rate".to_string(),
            });
        }
        let kind = expr.kind();
        let b = match self.batch_of_kind.get(&kind) {
            Some(b) => *b,
            None => {
                let batch = self.registry.create(kind).ok_or_else(|| {
                    KineticsError::InvalidReactionData {
                        reaction: rxn,
                        reason: format!("no evaluator registered for {:?} rates", kind),
                    }
                })?;
                debug!("creating batch evaluator for {:?} rates", kind);
                self.batches.push(batch);
                self.batch_of_kind.insert(kind, self.batches.len() - 1);
                self.batches.len() - 1
            }
        };
        self.batches[b].add_rate(rxn, expr)?;
        if self.owner.len() <= rxn {
            self.owner.resize(rxn + 1, None);
        }
        self.owner[rxn] = Some(b);
        Ok(())
    }

    /// evaluates every batch into `kf`
    pub fn update(&self, shared: &SharedRateData, kf: &mut [f64]) {
        for batch in &self.batches {
            batch.update(shared, kf);
        }
    }
    /// evaluates only the batches whose rates vary with coverage
    pub fn update_coverage_dependent(&self, shared: &SharedRateData, kf: &mut [f64]) {
        for batch in self.batches.iter().filter(|b| b.depends_on_coverage()) {
            batch.update(shared, kf);
        }
    }

    pub fn owner_of(&self, rxn: usize) -> Option<RateKind> {
        self.owner
            .get(rxn)
            .copied()
            .flatten()
            .map(|b| self.batches[b].kind())
    }
    pub fn depends_on_coverage(&self) -> bool {
        self.batches.iter().any(|b| b.depends_on_coverage())
    }
    pub fn expression(&self, rxn: usize) -> Option<RateExpression> {
        let b = self.owner.get(rxn).copied().flatten()?;
        self.batches[b]
            .expressions()
            .into_iter()
            .find(|(i, _)| *i == rxn)
            .map(|(_, e)| e)
    }

    /// Replaces the parameters of reaction `rxn` by rebuilding its batch from the registry.
    /// The rate-law kind cannot change.
    pub fn modify(&mut self, rxn: usize, expr: RateExpression) -> Result<(), KineticsError> {
        let b = self.owner.get(rxn).copied().flatten().ok_or(KineticsError::IndexOutOfRange {
            what: "rate owner",
            index: rxn,
            size: self.owner.len(),
        })?;
        let kind = self.batches[b].kind();
        if expr.kind() != kind {
            return Err(KineticsError::InvalidReactionData {
                reaction: rxn,
                reason: format!("cannot change rate type from {:?} to {:?}", kind, expr.kind()),
            });
        }
        let mut rebuilt = self.registry.create(kind).ok_or_else(|| KineticsError::InvalidReactionData {
            reaction: rxn,
            reason: format!("no evaluator registered for {:?} rates", kind),
        })?;
        let mut replacement = Some(expr);
        for (i, e) in self.batches[b].expressions() {
            let e = if i == rxn { replacement.take().unwrap_or(e) } else { e };
            rebuilt.add_rate(i, e)?;
        }
        self.batches[b] = rebuilt;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GAS_CONSTANT;
    use approx::assert_relative_eq;

    fn evaluator() -> MultiRateEvaluator {
        let mut ev = MultiRateEvaluator::new(RateRegistry::default());
        ev.add(0, ArrheniusRate::new(2.0, 0.0, 0.0).into()).unwrap();
        ev.add(
            1,
            InterfaceArrheniusRate::new(ArrheniusRate::new(1.0e3, 0.0, 1.0e7), vec![]).into(),
        )
        .unwrap();
        ev.add(2, ArrheniusRate::new(5.0, 1.0, 0.0).into()).unwrap();
        ev
    }

    #[test]
    fn batches_write_their_own_slots() {
        let ev = evaluator();
        assert_eq!(ev.n_batches(), 2);
        let mut kf = vec![0.0; 3];
        ev.update(&SharedRateData::new(400.0, 1.0e5), &mut kf);
        assert_eq!(kf[0], 2.0);
        assert_relative_eq!(kf[1], 1.0e3 * (-1.0e7 / (GAS_CONSTANT * 400.0)).exp(), max_relative = 1e-12);
        assert_relative_eq!(kf[2], 5.0 * 400.0, max_relative = 1e-12);
        assert_eq!(ev.owner_of(2), Some(RateKind::Arrhenius));
        assert_eq!(ev.owner_of(1), Some(RateKind::InterfaceArrhenius));
        assert_eq!(ev.owner_of(7), None);
        assert!(!ev.depends_on_coverage());
    }

    #[test]
    fn modify_keeps_kind_and_other_rates() {
        let mut ev = evaluator();
        ev.modify(0, ArrheniusRate::new(4.0, 0.0, 0.0).into()).unwrap();
        let mut kf = vec![0.0; 3];
        ev.update(&SharedRateData::new(400.0, 1.0e5), &mut kf);
        assert_eq!(kf[0], 4.0);
        assert_relative_eq!(kf[2], 2000.0, max_relative = 1e-12);
        assert!(matches!(
            ev.modify(0, PlogRate::new(vec![(1.0e5, ArrheniusRate::new(1.0, 0.0, 0.0))]).unwrap().into()),
            Err(KineticsError::InvalidReactionData { reaction: 0, .. })
        ));
        assert_eq!(ev.expression(0), Some(RateExpression::Arrhenius(ArrheniusRate::new(4.0, 0.0, 0.0))));
    }

    #[test]
    fn empty_plog_table_is_rejected() {
        // serde bypasses PlogRate::new
        let empty: PlogRate = serde_json::from_value(serde_json::json!({ "rates": [] })).unwrap();
        let shared = SharedRateData::new(400.0, 1.0e5);
        assert!(empty.eval(&shared).is_nan());

        let mut ev = evaluator();
        assert!(matches!(
            ev.add(3, empty.clone().into()),
            Err(KineticsError::InvalidReactionData { reaction: 3, .. })
        ));
        assert_eq!(ev.owner_of(3), None);

        let plog = PlogRate::new(vec![(1.0e5, ArrheniusRate::new(3.0, 0.0, 0.0))]).unwrap();
        ev.add(3, plog.clone().into()).unwrap();
        assert!(matches!(
            ev.modify(3, empty.into()),
            Err(KineticsError::InvalidReactionData { reaction: 3, .. })
        ));
        assert_eq!(ev.expression(3), Some(RateExpression::PlogArrhenius(plog)));
        let mut kf = vec![0.0; 4];
        ev.update(&shared, &mut kf);
        assert_eq!(kf[3], 3.0);
    }

    #[test]
    fn unregistered_kind_is_rejected() {
        let mut registry = RateRegistry::empty();
        registry.register(RateKind::Arrhenius, || RateBatch::from(ArrheniusBatch::default()));
        assert!(!registry.is_registered(RateKind::PlogArrhenius));
        let mut ev = MultiRateEvaluator::new(registry);
        ev.add(0, ArrheniusRate::new(1.0, 0.0, 0.0).into()).unwrap();
        let plog = PlogRate::new(vec![(1.0e5, ArrheniusRate::new(1.0, 0.0, 0.0))]).unwrap();
        assert!(ev.add(1, plog.into()).is_err());
        assert!(ev.add(0, ArrheniusRate::new(1.0, 0.0, 0.0).into()).is_err());
    }
}
