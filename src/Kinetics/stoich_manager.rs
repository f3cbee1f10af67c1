//! Sparse stoichiometry bookkeeping.
//!
//! Reaction i contributes to species k only through the terms stored here, so rates of
//! progress (length = number of reactions) are mapped onto species production rates (length =
//! number of species) without ever forming the dense stoichiometric matrix. Integer-coefficient
//! reactions whose kinetic orders equal their coefficients are stored as lists of species
//! indices with repetition (2 A + B -> [A, A, B]); lists of length one, two and three get their
//! own arrays so the inner loops are branch free. Everything else (fractional coefficients,
//! explicit orders, long lists) goes to the general array.
use crate::Kinetics::kinetics_error::{KineticsError, check_array_len};

/// one-species term: rxn <- ic0
#[derive(Debug, Clone, PartialEq)]
struct C1 {
    rxn: usize,
    ic0: usize,
}

impl C1 {
    fn multiply(&self, input: &[f64], output: &mut [f64]) {
        output[self.rxn] *= input[self.ic0];
    }
    fn increment_species(&self, input: &[f64], output: &mut [f64]) {
        output[self.ic0] += input[self.rxn];
    }
    fn decrement_species(&self, input: &[f64], output: &mut [f64]) {
        output[self.ic0] -= input[self.rxn];
    }
    fn increment_reaction(&self, input: &[f64], output: &mut [f64]) {
        output[self.rxn] += input[self.ic0];
    }
    fn decrement_reaction(&self, input: &[f64], output: &mut [f64]) {
        output[self.rxn] -= input[self.ic0];
    }
}

#[derive(Debug, Clone, PartialEq)]
struct C2 {
    rxn: usize,
    ic0: usize,
    ic1: usize,
}

impl C2 {
    fn multiply(&self, input: &[f64], output: &mut [f64]) {
        output[self.rxn] *= input[self.ic0] * input[self.ic1];
    }
    fn increment_species(&self, input: &[f64], output: &mut [f64]) {
        let x = input[self.rxn];
        output[self.ic0] += x;
        output[self.ic1] += x;
    }
    fn decrement_species(&self, input: &[f64], output: &mut [f64]) {
        let x = input[self.rxn];
        output[self.ic0] -= x;
        output[self.ic1] -= x;
    }
    fn increment_reaction(&self, input: &[f64], output: &mut [f64]) {
        output[self.rxn] += input[self.ic0] + input[self.ic1];
    }
    fn decrement_reaction(&self, input: &[f64], output: &mut [f64]) {
        output[self.rxn] -= input[self.ic0] + input[self.ic1];
    }
}

#[derive(Debug, Clone, PartialEq)]
struct C3 {
    rxn: usize,
    ic0: usize,
    ic1: usize,
    ic2: usize,
}

impl C3 {
    fn multiply(&self, input: &[f64], output: &mut [f64]) {
        output[self.rxn] *= input[self.ic0] * input[self.ic1] * input[self.ic2];
    }
    fn increment_species(&self, input: &[f64], output: &mut [f64]) {
        let x = input[self.rxn];
        output[self.ic0] += x;
        output[self.ic1] += x;
        output[self.ic2] += x;
    }
    fn decrement_species(&self, input: &[f64], output: &mut [f64]) {
        let x = input[self.rxn];
        output[self.ic0] -= x;
        output[self.ic1] -= x;
        output[self.ic2] -= x;
    }
    fn increment_reaction(&self, input: &[f64], output: &mut [f64]) {
        output[self.rxn] += input[self.ic0] + input[self.ic1] + input[self.ic2];
    }
    fn decrement_reaction(&self, input: &[f64], output: &mut [f64]) {
        output[self.rxn] -= input[self.ic0] + input[self.ic1] + input[self.ic2];
    }
}

/// general term: arbitrary number of species, real coefficients and real orders
#[derive(Debug, Clone, PartialEq)]
struct CGeneral {
    rxn: usize,
    species: Vec<usize>,
    stoich: Vec<f64>,
    order: Vec<f64>,
}

impl CGeneral {
    fn multiply(&self, input: &[f64], output: &mut [f64]) {
        let mut product = 1.0;
        for (k, order) in self.species.iter().zip(self.order.iter()) {
            let c = input[*k];
            if *order == 1.0 {
                product *= c;
            } else if *order == 0.0 {
                continue;
            } else if c > 0.0 {
                product *= c.powf(*order);
            } else {
                // fractional power of a non-positive concentration
                product = 0.0;
            }
        }
        output[self.rxn] *= product;
    }
    fn increment_species(&self, input: &[f64], output: &mut [f64]) {
        let x = input[self.rxn];
        for (k, nu) in self.species.iter().zip(self.stoich.iter()) {
            output[*k] += nu * x;
        }
    }
    fn decrement_species(&self, input: &[f64], output: &mut [f64]) {
        let x = input[self.rxn];
        for (k, nu) in self.species.iter().zip(self.stoich.iter()) {
            output[*k] -= nu * x;
        }
    }
    fn increment_reaction(&self, input: &[f64], output: &mut [f64]) {
        output[self.rxn] += self
            .species
            .iter()
            .zip(self.stoich.iter())
            .map(|(k, nu)| nu * input[*k])
            .sum::<f64>();
    }
    fn decrement_reaction(&self, input: &[f64], output: &mut [f64]) {
        output[self.rxn] -= self
            .species
            .iter()
            .zip(self.stoich.iter())
            .map(|(k, nu)| nu * input[*k])
            .sum::<f64>();
    }
}

/// Collection of stoichiometric terms of one side (reactants or products) of many reactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoichManagerN {
    c1: Vec<C1>,
    c2: Vec<C2>,
    c3: Vec<C3>,
    cn: Vec<CGeneral>,
}

impl StoichManagerN {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the terms of reaction `rxn`. `species`, `stoich` and `order` have equal length and
    /// contain no repeated species.
    pub fn add(&mut self, rxn: usize, species: &[usize], stoich: &[f64], order: &[f64]) {
        if species.is_empty() {
            return;
        }
        let integral_mass_action = stoich
            .iter()
            .zip(order.iter())
            .all(|(nu, o)| nu.fract() == 0.0 && *nu >= 1.0 && nu == o);
        if integral_mass_action {
            // expand 2 A + B into [A, A, B]
            let mut expanded: Vec<usize> = Vec::new();
            for (k, nu) in species.iter().zip(stoich.iter()) {
                for _ in 0..(*nu as usize) {
                    expanded.push(*k);
                }
            }
            match expanded.as_slice() {
                [a] => {
                    self.c1.push(C1 { rxn, ic0: *a });
                    return;
                }
                [a, b] => {
                    self.c2.push(C2 { rxn, ic0: *a, ic1: *b });
                    return;
                }
                [a, b, c] => {
                    self.c3.push(C3 {
                        rxn,
                        ic0: *a,
                        ic1: *b,
                        ic2: *c,
                    });
                    return;
                }
                _ => {}
            }
        }
        self.cn.push(CGeneral {
            rxn,
            species: species.to_vec(),
            stoich: stoich.to_vec(),
            order: order.to_vec(),
        });
    }

    /// output[rxn] *= prod_k input[k]^order_k
    pub fn multiply(&self, input: &[f64], output: &mut [f64]) {
        self.c1.iter().for_each(|c| c.multiply(input, output));
        self.c2.iter().for_each(|c| c.multiply(input, output));
        self.c3.iter().for_each(|c| c.multiply(input, output));
        self.cn.iter().for_each(|c| c.multiply(input, output));
    }
    /// output[k] += nu_k,rxn * input[rxn]
    pub fn increment_species(&self, input: &[f64], output: &mut [f64]) {
        self.c1.iter().for_each(|c| c.increment_species(input, output));
        self.c2.iter().for_each(|c| c.increment_species(input, output));
        self.c3.iter().for_each(|c| c.increment_species(input, output));
        self.cn.iter().for_each(|c| c.increment_species(input, output));
    }
    pub fn decrement_species(&self, input: &[f64], output: &mut [f64]) {
        self.c1.iter().for_each(|c| c.decrement_species(input, output));
        self.c2.iter().for_each(|c| c.decrement_species(input, output));
        self.c3.iter().for_each(|c| c.decrement_species(input, output));
        self.cn.iter().for_each(|c| c.decrement_species(input, output));
    }
    /// output[rxn] += sum_k nu_k,rxn * input[k]
    pub fn increment_reaction(&self, input: &[f64], output: &mut [f64]) {
        self.c1.iter().for_each(|c| c.increment_reaction(input, output));
        self.c2.iter().for_each(|c| c.increment_reaction(input, output));
        self.c3.iter().for_each(|c| c.increment_reaction(input, output));
        self.cn.iter().for_each(|c| c.increment_reaction(input, output));
    }
    pub fn decrement_reaction(&self, input: &[f64], output: &mut [f64]) {
        self.c1.iter().for_each(|c| c.decrement_reaction(input, output));
        self.c2.iter().for_each(|c| c.decrement_reaction(input, output));
        self.c3.iter().for_each(|c| c.decrement_reaction(input, output));
        self.cn.iter().for_each(|c| c.decrement_reaction(input, output));
    }
    /// number of stored terms in the specialised (one, two, three species) and general arrays
    pub fn term_counts(&self) -> [usize; 4] {
        [self.c1.len(), self.c2.len(), self.c3.len(), self.cn.len()]
    }
}

/// merges repeated species of one side of a reaction, keeping first-appearance order
fn merge_terms(terms: &[(usize, f64)]) -> Vec<(usize, f64)> {
    let mut merged: Vec<(usize, f64)> = Vec::with_capacity(terms.len());
    for (k, nu) in terms {
        match merged.iter_mut().find(|(kk, _)| kk == k) {
            Some(entry) => entry.1 += nu,
            None => merged.push((*k, *nu)),
        }
    }
    merged
}

/// Stoichiometry of a whole mechanism: reactants of all reactions, products of reversible and
/// of irreversible reactions, and per-reaction net coefficients in compressed rows.
#[derive(Debug, Clone, Default)]
pub struct ReactionStoichMgr {
    reactants: StoichManagerN,
    rev_products: StoichManagerN,
    irrev_products: StoichManagerN,
    reversible: Vec<bool>,
    reactant_terms: Vec<Vec<(usize, f64)>>,
    product_terms: Vec<Vec<(usize, f64)>>,
    // compressed rows of net coefficients (product minus reactant), zero entries dropped
    net_ptr: Vec<usize>,
    net_species: Vec<usize>,
    net_coeffs: Vec<f64>,
    frozen: bool,
}

impl ReactionStoichMgr {
    pub fn new() -> Self {
        Self {
            net_ptr: vec![0],
            ..Self::default()
        }
    }
    pub fn n_reactions(&self) -> usize {
        self.reversible.len()
    }
    /// no more reactions can be added after this
    pub fn freeze(&mut self) {
        self.frozen = true;
    }
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
    pub fn is_reversible(&self, rxn: usize) -> bool {
        self.reversible.get(rxn).copied().unwrap_or(false)
    }
    pub fn reactants_of(&self, rxn: usize) -> &[(usize, f64)] {
        &self.reactant_terms[rxn]
    }
    pub fn products_of(&self, rxn: usize) -> &[(usize, f64)] {
        &self.product_terms[rxn]
    }
    pub fn reactant_stoich_coeff(&self, k: usize, rxn: usize) -> f64 {
        self.reactant_terms
            .get(rxn)
            .and_then(|terms| terms.iter().find(|(kk, _)| *kk == k))
            .map(|(_, nu)| *nu)
            .unwrap_or(0.0)
    }
    pub fn product_stoich_coeff(&self, k: usize, rxn: usize) -> f64 {
        self.product_terms
            .get(rxn)
            .and_then(|terms| terms.iter().find(|(kk, _)| *kk == k))
            .map(|(_, nu)| *nu)
            .unwrap_or(0.0)
    }
    /// net stoichiometric coefficients (species, product minus reactant) of reaction `rxn`
    pub fn net_terms(&self, rxn: usize) -> Vec<(usize, f64)> {
        let (start, end) = (self.net_ptr[rxn], self.net_ptr[rxn + 1]);
        self.net_species[start..end]
            .iter()
            .copied()
            .zip(self.net_coeffs[start..end].iter().copied())
            .collect()
    }

    /// Integer path: each species index appears once per unit of its coefficient,
    /// e.g. H2 + 2 PT(S) -> [H2, PT(S), PT(S)].
    pub fn add(
        &mut self,
        rxn: usize,
        reactants: &[usize],
        products: &[usize],
        reversible: bool,
    ) -> Result<(), KineticsError> {
        let r: Vec<(usize, f64)> = reactants.iter().map(|k| (*k, 1.0)).collect();
        let p: Vec<(usize, f64)> = products.iter().map(|k| (*k, 1.0)).collect();
        self.add_general(rxn, &r, &p, None, reversible)
    }

    /// General path: real coefficients and, for irreversible reactions, explicit kinetic orders.
    /// Species named in `orders` that are not reactants enter the rate expression only.
    pub fn add_general(
        &mut self,
        rxn: usize,
        reactants: &[(usize, f64)],
        products: &[(usize, f64)],
        orders: Option<&[(usize, f64)]>,
        reversible: bool,
    ) -> Result<(), KineticsError> {
        let invalid = |reason: &str| KineticsError::InvalidReactionData {
            reaction: rxn,
            reason: reason.to_string(),
        };
        if self.frozen {
            return Err(invalid("mechanism is frozen; reactions cannot be added after rate evaluation"));
        }
        if rxn != self.n_reactions() {
            return Err(invalid(&format!(
                "reactions must be added in order; expected index {}",
                self.n_reactions()
            )));
        }
        if reactants.is_empty() {
            return Err(invalid("reaction has no reactants"));
        }
        if products.is_empty() {
            return Err(invalid("reaction has no products"));
        }
        if reactants
            .iter()
            .chain(products.iter())
            .any(|(_, nu)| !nu.is_finite() || *nu <= 0.0)
        {
            return Err(invalid("stoichiometric coefficients must be finite and positive"));
        }
        let orders = match orders {
            Some(o) if !o.is_empty() => {
                if reversible {
                    return Err(invalid("explicit reaction orders are only allowed for irreversible reactions"));
                }
                if o.iter().any(|(_, ord)| !ord.is_finite() || *ord < 0.0) {
                    return Err(invalid("reaction orders must be finite and non-negative"));
                }
                Some(merge_terms(o))
            }
            _ => None,
        };

        let r = merge_terms(reactants);
        let p = merge_terms(products);

        // reactant side: coefficients with either mass-action or explicit orders
        let mut r_species: Vec<usize> = r.iter().map(|(k, _)| *k).collect();
        let mut r_stoich: Vec<f64> = r.iter().map(|(_, nu)| *nu).collect();
        let mut r_order = r_stoich.clone();
        if let Some(orders) = &orders {
            for (k, ord) in orders {
                match r_species.iter().position(|kk| kk == k) {
                    Some(j) => r_order[j] = *ord,
                    None => {
                        r_species.push(*k);
                        r_stoich.push(0.0);
                        r_order.push(*ord);
                    }
                }
            }
        }
        // order-only species carry a zero coefficient and always land in the general array
        self.reactants.add(rxn, &r_species, &r_stoich, &r_order);

        let p_species: Vec<usize> = p.iter().map(|(k, _)| *k).collect();
        let p_stoich: Vec<f64> = p.iter().map(|(_, nu)| *nu).collect();
        if reversible {
            self.rev_products.add(rxn, &p_species, &p_stoich, &p_stoich);
        } else {
            self.irrev_products.add(rxn, &p_species, &p_stoich, &p_stoich);
        }

        // net row
        let mut net: Vec<(usize, f64)> = p.clone();
        for (k, nu) in &r {
            match net.iter_mut().find(|(kk, _)| kk == k) {
                Some(entry) => entry.1 -= nu,
                None => net.push((*k, -nu)),
            }
        }
        for (k, nu) in net.into_iter().filter(|(_, nu)| *nu != 0.0) {
            self.net_species.push(k);
            self.net_coeffs.push(nu);
        }
        self.net_ptr.push(self.net_species.len());

        self.reactant_terms.push(r);
        self.product_terms.push(p);
        self.reversible.push(reversible);
        Ok(())
    }

    /////////////////////////////// SPECIES RATES ///////////////////////////////////////////
    /// C = N_p Q_f + N_r Q_r. The reverse rate of an irreversible reaction is zero, so the
    /// reactant term can run over all reactions.
    pub fn get_creation_rates(
        &self,
        n_species: usize,
        ropf: &[f64],
        ropr: &[f64],
        cdot: &mut [f64],
    ) -> Result<(), KineticsError> {
        self.check_rop(ropf, ropr)?;
        check_array_len("creation rates", cdot.len(), n_species)?;
        cdot[..n_species].iter_mut().for_each(|c| *c = 0.0);
        self.irrev_products.increment_species(ropf, cdot);
        self.rev_products.increment_species(ropf, cdot);
        self.reactants.increment_species(ropr, cdot);
        Ok(())
    }
    /// D = N_r Q_f + N_p,rev Q_r
    pub fn get_destruction_rates(
        &self,
        n_species: usize,
        ropf: &[f64],
        ropr: &[f64],
        ddot: &mut [f64],
    ) -> Result<(), KineticsError> {
        self.check_rop(ropf, ropr)?;
        check_array_len("destruction rates", ddot.len(), n_species)?;
        ddot[..n_species].iter_mut().for_each(|d| *d = 0.0);
        self.reactants.increment_species(ropf, ddot);
        self.rev_products.increment_species(ropr, ddot);
        Ok(())
    }
    /// wdot_k = sum_i nu_net,k,i * ropnet_i
    pub fn get_net_production_rates(
        &self,
        n_species: usize,
        ropnet: &[f64],
        wdot: &mut [f64],
    ) -> Result<(), KineticsError> {
        check_array_len("net rates of progress", ropnet.len(), self.n_reactions())?;
        check_array_len("net production rates", wdot.len(), n_species)?;
        wdot[..n_species].iter_mut().for_each(|w| *w = 0.0);
        for rxn in 0..self.n_reactions() {
            let q = ropnet[rxn];
            for j in self.net_ptr[rxn]..self.net_ptr[rxn + 1] {
                wdot[self.net_species[j]] += self.net_coeffs[j] * q;
            }
        }
        Ok(())
    }

    /////////////////////////////// REACTION DELTAS ///////////////////////////////////////////
    /// dg_i = sum_products nu g - sum_reactants nu g
    pub fn get_reaction_delta(
        &self,
        n_reactions: usize,
        g: &[f64],
        dg: &mut [f64],
    ) -> Result<(), KineticsError> {
        check_array_len("reaction delta", dg.len(), n_reactions)?;
        dg[..n_reactions].iter_mut().for_each(|d| *d = 0.0);
        self.irrev_products.increment_reaction(g, dg);
        self.rev_products.increment_reaction(g, dg);
        self.reactants.decrement_reaction(g, dg);
        Ok(())
    }
    /// same as `get_reaction_delta` but only reversible reactions are written
    pub fn get_rev_reaction_delta(
        &self,
        n_reactions: usize,
        g: &[f64],
        dg: &mut [f64],
    ) -> Result<(), KineticsError> {
        check_array_len("reverse reaction delta", dg.len(), n_reactions)?;
        let mut tmp = vec![0.0; n_reactions];
        self.rev_products.increment_reaction(g, &mut tmp);
        self.reactants.decrement_reaction(g, &mut tmp);
        for (i, rev) in self.reversible.iter().enumerate().take(n_reactions) {
            if *rev {
                dg[i] = tmp[i];
            }
        }
        Ok(())
    }

    /////////////////////////////// MASS ACTION ///////////////////////////////////////////
    /// R_i *= prod_k C_k^order_k,i over reactants
    pub fn multiply_reactants(&self, c: &[f64], r: &mut [f64]) {
        self.reactants.multiply(c, r);
    }
    /// R_i *= prod_k C_k^nu_k,i over products of reversible reactions
    pub fn multiply_rev_products(&self, c: &[f64], r: &mut [f64]) {
        self.rev_products.multiply(c, r);
    }
    /// [reactants, reversible products, irreversible products] term counts per storage class
    pub fn storage_summary(&self) -> [[usize; 4]; 3] {
        [
            self.reactants.term_counts(),
            self.rev_products.term_counts(),
            self.irrev_products.term_counts(),
        ]
    }

    fn check_rop(&self, ropf: &[f64], ropr: &[f64]) -> Result<(), KineticsError> {
        check_array_len("forward rates of progress", ropf.len(), self.n_reactions())?;
        check_array_len("reverse rates of progress", ropr.len(), self.n_reactions())
    }
}
