use std::time::Instant;

use crate::{itemset::Itemset, lattice::Lattice};

/// `antecedent ==> consequent` with its confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub antecedent: Itemset,
    /// Items of the full itemset not in the antecedent; carries the weight
    /// of the full itemset.
    pub consequent: Itemset,
    pub confidence: f64,
    /// Weight of antecedent and consequent together.
    pub support: usize,
}

/// Rules sorted by descending confidence. Among equal confidences the most
/// recently inserted rule comes first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Splits every itemset of size two or more against each smaller itemset
    /// it contains and keeps the rules reaching `min_confidence`.
    pub fn mine(lattice: &Lattice, min_confidence: f64) -> Self {
        let begin = Instant::now();
        let mut set = Self::default();
        let levels = lattice.levels();
        for (i, level) in levels.iter().enumerate().skip(1) {
            for full in level {
                for lower in &levels[..i] {
                    for antecedent in lower {
                        if !full.contains(antecedent) {
                            continue;
                        }
                        let confidence = full.weight() as f64 / antecedent.weight() as f64;
                        if confidence >= min_confidence {
                            set.insert(Rule {
                                antecedent: antecedent.clone(),
                                consequent: full.minus(antecedent),
                                confidence,
                                support: full.weight(),
                            });
                        }
                    }
                }
            }
        }
        log::info!(
            "number of rules: {} (min_confidence: {min_confidence}), time cost: {:?}",
            set.len(),
            begin.elapsed()
        );
        set
    }

    /// Places `rule` before the first rule whose confidence is not higher.
    pub fn insert(&mut self, rule: Rule) {
        let pos = self
            .rules
            .iter()
            .position(|r| r.confidence <= rule.confidence)
            .unwrap_or(self.rules.len());
        self.rules.insert(pos, rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
