use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{dataset::Dataset, pretreat::Pretreat, Error, Result};

/// Thresholds, attribute selection and pretreatment for one mining pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningOptions {
    pub min_support: f64,
    pub min_confidence: f64,
    /// Selection mask aligned with the attributes; `None` selects all.
    pub selection: Option<Vec<bool>>,
    /// Pretreatment option per attribute; `None` leaves values untouched.
    pub pretreat: Option<Vec<String>>,
}

impl Default for MiningOptions {
    fn default() -> Self {
        Self {
            min_support: Self::DEFAULT_MIN_SUPPORT,
            min_confidence: Self::DEFAULT_MIN_CONFIDENCE,
            selection: None,
            pretreat: None,
        }
    }
}

impl MiningOptions {
    pub const DEFAULT_MIN_SUPPORT: f64 = 0.2;
    pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.9;

    pub fn new(min_support: f64, min_confidence: f64) -> Self {
        Self { min_support, min_confidence, ..Default::default() }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(f))?)
    }

    pub fn validate(&self, num_attributes: usize) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_support) {
            return Err(Error::InvalidOption(format!(
                "minimum support {} not in [0, 1]",
                self.min_support
            )));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(Error::InvalidOption(format!(
                "minimum confidence {} not in [0, 1]",
                self.min_confidence
            )));
        }
        if let Some(selection) = &self.selection {
            if selection.len() != num_attributes {
                return Err(Error::InvalidOption(format!(
                    "selection covers {} attributes, dataset has {num_attributes}",
                    selection.len()
                )));
            }
        }
        if let Some(pretreat) = &self.pretreat {
            if pretreat.len() != num_attributes {
                return Err(Error::InvalidOption(format!(
                    "pretreatment covers {} attributes, dataset has {num_attributes}",
                    pretreat.len()
                )));
            }
            for option in pretreat {
                option.parse::<Pretreat>()?;
            }
        }
        Ok(())
    }

    /// Absolute support floor: an itemset is kept when its weight exceeds it.
    pub fn min_weight(&self, num_instances: usize) -> usize {
        (self.min_support * num_instances as f64).floor() as usize
    }

    pub fn is_selected(&self, index: usize) -> bool {
        match &self.selection {
            Some(selection) => selection.get(index).copied().unwrap_or(true),
            None => true,
        }
    }

    pub fn selection_mask(&self, num_attributes: usize) -> Vec<bool> {
        (0..num_attributes).map(|i| self.is_selected(i)).collect()
    }

    pub fn pretreatments(&self, num_attributes: usize) -> Result<Vec<Pretreat>> {
        let Some(pretreat) = &self.pretreat else {
            return Ok(vec![Pretreat::Identity; num_attributes]);
        };
        (0..num_attributes)
            .map(|i| pretreat.get(i).map_or(Ok(Pretreat::Identity), |s| s.parse()))
            .collect()
    }

    /// Restricts the selection to the named attributes.
    pub fn select_by_name<S: AsRef<str>>(&mut self, dataset: &Dataset, names: &[S]) -> Result<()> {
        let mut selection = vec![false; dataset.num_attributes()];
        for name in names {
            selection[index_of(dataset, name.as_ref())?] = true;
        }
        self.selection = Some(selection);
        Ok(())
    }

    pub fn pretreat_by_name(&mut self, dataset: &Dataset, name: &str, option: &str) -> Result<()> {
        let index = index_of(dataset, name)?;
        option.parse::<Pretreat>()?;
        let pretreat = self.pretreat.get_or_insert_with(Vec::new);
        pretreat.resize(dataset.num_attributes(), String::new());
        pretreat[index] = option.to_string();
        Ok(())
    }
}

fn index_of(dataset: &Dataset, name: &str) -> Result<usize> {
    dataset
        .attribute_index(name)
        .ok_or_else(|| Error::InvalidOption(format!("unknown attribute: {name}")))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn weather() -> Dataset {
        "outlook temperature play\n\nsunny 85 no\nrainy 70 yes\n".parse().unwrap()
    }

    #[test]
    fn defaults() {
        let o = MiningOptions::default();
        assert_eq!(o.min_support, 0.2);
        assert_eq!(o.min_confidence, 0.9);
        assert!(o.is_selected(0) && o.is_selected(99));
        assert_eq!(o.pretreatments(2).unwrap(), [Pretreat::Identity, Pretreat::Identity]);
        assert!(o.validate(3).is_ok());
    }

    #[test]
    fn min_weight_floors() {
        assert_eq!(MiningOptions::new(0.2, 0.5).min_weight(4), 0);
        assert_eq!(MiningOptions::new(0.5, 0.5).min_weight(14), 7);
        assert_eq!(MiningOptions::new(0.3, 0.5).min_weight(14), 4);
        assert_eq!(MiningOptions::new(1.0, 0.5).min_weight(0), 0);
    }

    #[test]
    fn validate_ranges() {
        assert!(MiningOptions::new(1.5, 0.9).validate(1).is_err());
        assert!(MiningOptions::new(0.1, -0.1).validate(1).is_err());
        assert!(MiningOptions::new(f64::NAN, 0.9).validate(1).is_err());
        assert!(MiningOptions::new(0.0, 1.0).validate(1).is_ok());
    }

    #[test]
    fn validate_lengths() {
        let mut o = MiningOptions::default();
        o.selection = Some(vec![true, false]);
        assert!(o.validate(3).is_err());
        assert!(o.validate(2).is_ok());
        o.pretreat = Some(vec!["/10".into()]);
        assert!(o.validate(2).is_err());
        o.pretreat = Some(vec!["/x".into(), String::new()]);
        assert!(o.validate(2).is_err());
    }

    #[test]
    fn by_name() {
        let ds = weather();
        let mut o = MiningOptions::default();
        o.select_by_name(&ds, &["outlook", "play"]).unwrap();
        assert_eq!(o.selection_mask(3), [true, false, true]);
        o.pretreat_by_name(&ds, "temperature", "/10").unwrap();
        assert_eq!(o.pretreat.as_deref().unwrap(), ["", "/10", ""]);
        assert_eq!(
            o.pretreatments(3).unwrap(),
            [Pretreat::Identity, Pretreat::Bucket(10), Pretreat::Identity]
        );
        assert!(o.validate(3).is_ok());
        assert!(o.select_by_name(&ds, &["humidity"]).is_err());
        assert!(o.pretreat_by_name(&ds, "temperature", "/0").is_err());
    }

    #[test]
    fn load_json() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"min_support": 0.3, "selection": [true, false]}}"#).unwrap();
        let o = MiningOptions::from_file(f.path()).unwrap();
        assert_eq!(o.min_support, 0.3);
        assert_eq!(o.min_confidence, 0.9);
        assert_eq!(o.selection, Some(vec![true, false]));
        assert_eq!(o.pretreat, None);
    }

    #[test]
    fn load_bad_json() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "min_support = 0.3").unwrap();
        assert!(matches!(MiningOptions::from_file(f.path()), Err(Error::Json(_))));
    }
}
