use std::collections::HashMap;

use crate::{pretreat::Transformer, Result};

/// A column of the dataset: its name and every distinct value observed in
/// it, in first-seen order, each paired with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    values: Vec<String>,
    weights: Vec<usize>,
}

impl Attribute {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_values(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Occurrence counts, parallel to [`Attribute::values`].
    pub fn weights(&self) -> &[usize] {
        &self.weights
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.values.iter().map(String::as_str).zip(self.weights.iter().copied())
    }

    pub fn weight_of(&self, value: &str) -> Option<usize> {
        self.iter().find(|(v, _)| *v == value).map(|(_, w)| w)
    }

    /// Rewrites every value through `transform`, merging the counts of values
    /// that collapse onto the same treated value.
    pub fn pretreat<T: Transformer + ?Sized>(&self, transform: &T) -> Result<Attribute> {
        let mut builder = AttributeBuilder::new(self.name.as_str());
        for (value, weight) in self.iter() {
            builder.append_n(&transform.transform(value)?, weight);
        }
        Ok(builder.freeze())
    }
}

/// Append-only accumulator used while a dataset is being read.
#[derive(Debug, Default)]
pub struct AttributeBuilder {
    name: String,
    values: Vec<String>,
    weights: Vec<usize>,
    index: HashMap<String, usize>,
}

impl AttributeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn append(&mut self, value: &str) -> usize {
        self.append_n(value, 1)
    }

    /// Adds `n` occurrences of `value` and returns its position.
    pub fn append_n(&mut self, value: &str, n: usize) -> usize {
        if let Some(&idx) = self.index.get(value) {
            self.weights[idx] += n;
            return idx;
        }
        let idx = self.values.len();
        self.index.insert(value.to_string(), idx);
        self.values.push(value.to_string());
        self.weights.push(n);
        idx
    }

    pub fn freeze(self) -> Attribute {
        Attribute { name: self.name, values: self.values, weights: self.weights }
    }
}
