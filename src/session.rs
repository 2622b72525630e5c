use crate::{
    attribute::Attribute,
    config::MiningOptions,
    dataset::{Dataset, Record},
    lattice::{Apriori, ItemSetMiner, Lattice},
    rules::RuleSet,
    Result,
};

/// A dataset, the options it is mined with, and the results of the last
/// mining pass.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Dataset,
    options: MiningOptions,
    lattice: Lattice,
    rules: RuleSet,
}

impl Session {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            options: MiningOptions::default(),
            lattice: Lattice::default(),
            rules: RuleSet::default(),
        }
    }

    pub fn with_options(dataset: Dataset, options: MiningOptions) -> Result<Self> {
        let mut session = Self::new(dataset);
        session.set_options(options)?;
        Ok(session)
    }

    pub fn set_options(&mut self, options: MiningOptions) -> Result<()> {
        options.validate(self.dataset.num_attributes())?;
        self.options = options;
        Ok(())
    }

    pub fn set_thresholds(&mut self, min_support: f64, min_confidence: f64) -> Result<()> {
        let options = MiningOptions { min_support, min_confidence, ..self.options.clone() };
        self.set_options(options)
    }

    /// `None` selects every attribute.
    pub fn choose_attributes(&mut self, selection: Option<Vec<bool>>) -> Result<()> {
        let options = MiningOptions { selection, ..self.options.clone() };
        self.set_options(options)
    }

    pub fn set_pretreat_options(&mut self, pretreat: Option<Vec<String>>) -> Result<()> {
        let options = MiningOptions { pretreat, ..self.options.clone() };
        self.set_options(options)
    }

    /// Rebuilds the lattice from scratch, discarding the previous one.
    pub fn find_large_itemsets(&mut self) -> Result<&Lattice> {
        self.lattice = Apriori.mine(&self.dataset, &self.options)?;
        Ok(&self.lattice)
    }

    /// Rebuilds the rule list from the current lattice.
    pub fn find_association_rules(&mut self) -> &RuleSet {
        self.rules = RuleSet::mine(&self.lattice, self.options.min_confidence);
        &self.rules
    }

    pub fn run(&mut self) -> Result<()> {
        self.find_large_itemsets()?;
        self.find_association_rules();
        Ok(())
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn options(&self) -> &MiningOptions {
        &self.options
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn num_rules(&self) -> usize {
        self.rules.len()
    }

    pub fn num_selected_attributes(&self) -> usize {
        (0..self.dataset.num_attributes()).filter(|&i| self.options.is_selected(i)).count()
    }

    pub fn attribute_names(&self) -> Vec<&str> {
        self.dataset.attribute_names()
    }

    pub fn selected_attribute_names(&self) -> Vec<&str> {
        self.dataset
            .attributes()
            .iter()
            .enumerate()
            .filter(|&(i, _)| self.options.is_selected(i))
            .map(|(_, attr)| attr.name())
            .collect()
    }

    pub fn pretreat_attributes(&self) -> Result<Vec<Attribute>> {
        let pretreat = self.options.pretreatments(self.dataset.num_attributes())?;
        self.dataset.pretreat_attributes(&pretreat)
    }

    /// Records restricted to the selected attributes, with pretreated values.
    pub fn pretreat_records(&self) -> Result<Vec<Record>> {
        let pretreat = self.options.pretreatments(self.dataset.num_attributes())?;
        let records = self.dataset.pretreat_records(&pretreat)?;
        Ok(records
            .into_iter()
            .map(|record| {
                record
                    .into_iter()
                    .enumerate()
                    .filter(|&(i, _)| self.options.is_selected(i))
                    .map(|(_, value)| value)
                    .collect()
            })
            .collect())
    }
}
