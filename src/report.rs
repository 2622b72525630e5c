//! Plain-text summaries of a mining session.

use std::fmt::{self, Display, Formatter};

use crate::{attribute::Attribute, dataset::Record, error::Result, itemset::Itemset, session::Session};

/// An itemset rendered with attribute names: ` name=value ... weight`.
pub struct Named<'a> {
    pub itemset: &'a Itemset,
    pub attributes: &'a [Attribute],
}

impl Display for Named<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for item in self.itemset {
            let name = self.attributes.get(item.index).map_or("?", Attribute::name);
            write!(f, " {}={}", name, item.value)?;
        }
        write!(f, " {}", self.itemset.weight())
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "@attribute {} {{{} }}", self.name(), self.values().join(","))
    }
}

pub struct Information<'a>(&'a Session);
pub struct Options<'a>(&'a Session);
pub struct Pretreatment<'a>(&'a Session);
pub struct LevelCounts<'a>(&'a Session);
pub struct Levels<'a>(&'a Session);
pub struct Rules<'a>(&'a Session);
/// Selected attribute names over already pretreated records.
pub struct Table<'a> {
    names: Vec<&'a str>,
    records: Vec<Record>,
}

impl Session {
    pub fn information(&self) -> Information<'_> {
        Information(self)
    }

    pub fn options_report(&self) -> Options<'_> {
        Options(self)
    }

    pub fn pretreatment_report(&self) -> Pretreatment<'_> {
        Pretreatment(self)
    }

    pub fn level_counts(&self) -> LevelCounts<'_> {
        LevelCounts(self)
    }

    pub fn levels_report(&self) -> Levels<'_> {
        Levels(self)
    }

    pub fn rules_report(&self) -> Rules<'_> {
        Rules(self)
    }

    /// Selected attributes and pretreated records, tab separated.
    pub fn table(&self) -> Result<Table<'_>> {
        Ok(Table { names: self.selected_attribute_names(), records: self.pretreat_records()? })
    }

    fn named<'a>(&'a self, itemset: &'a Itemset) -> Named<'a> {
        Named { itemset, attributes: self.dataset().attributes() }
    }
}

impl Display for Information<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let ds = self.0.dataset();
        writeln!(f, "Scheme:\tApriori")?;
        writeln!(f, "Relation:\t{}", ds.name().unwrap_or("-"))?;
        writeln!(f, "Instances:\t{}", ds.num_instances())?;
        writeln!(f, "Attributes:\t{}", self.0.selected_attribute_names().join(", "))?;
        writeln!(f)
    }
}

impl Display for Options<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let o = self.0.options();
        writeln!(f, "Minimum support: {}", o.min_support)?;
        writeln!(f, "Minimum confidence: {}", o.min_confidence)?;
        writeln!(f)
    }
}

impl Display for Pretreatment<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let o = self.0.options();
        writeln!(f, "Pretreatment:")?;
        let entries: Vec<String> = self
            .0
            .attribute_names()
            .into_iter()
            .enumerate()
            .filter(|&(i, _)| o.is_selected(i))
            .map(|(i, name)| {
                let option = o
                    .pretreat
                    .as_ref()
                    .and_then(|p| p.get(i))
                    .filter(|s| !s.is_empty())
                    .map_or("null", String::as_str);
                format!("{name} {option}")
            })
            .collect();
        writeln!(f, "{}", entries.join(", "))?;
        writeln!(f)
    }
}

impl Display for LevelCounts<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generated sets of large itemsets:")?;
        for level in self.0.lattice() {
            writeln!(f, "Size of set of large itemsets L({}): {}", level.size(), level.len())?;
        }
        writeln!(f)
    }
}

impl Display for Levels<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for level in self.0.lattice() {
            writeln!(f, "Large itemsets L({}):", level.size())?;
            let sets: Vec<String> = level.iter().map(|s| self.0.named(s).to_string()).collect();
            writeln!(f, "{{{} }}", sets.join(","))?;
        }
        writeln!(f)
    }
}

impl Display for Rules<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Best rules found:")?;
        for (n, rule) in self.0.rules().iter().enumerate() {
            writeln!(
                f,
                "{}.{} ==>{}\tconf:({:.2})",
                n + 1,
                self.0.named(&rule.antecedent),
                self.0.named(&rule.consequent),
                rule.confidence
            )?;
        }
        writeln!(f)
    }
}

impl Display for Table<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.names.join("\t"))?;
        for record in &self.records {
            writeln!(f, "{}", record.join("\t"))?;
        }
        Ok(())
    }
}

impl Display for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.information())?;
        write!(f, "{}", self.options_report())?;
        write!(f, "{}", self.level_counts())?;
        write!(f, "{}", self.rules_report())
    }
}
