//! Apriori frequent itemset mining and association rule ranking over tables
//! of categorical records.

pub mod attribute;
pub mod config;
pub mod dataset;
mod error;
pub mod itemset;
pub mod lattice;
pub mod pretreat;
pub mod report;
pub mod rules;
pub mod session;

pub use attribute::{Attribute, AttributeBuilder};
pub use config::MiningOptions;
pub use dataset::{Dataset, DatasetBuilder, Record};
pub use error::{Error, Result};
pub use itemset::{Item, Itemset};
pub use lattice::{Apriori, ItemSetMiner, Lattice, LatticeBuilder, Level};
pub use pretreat::{pretreat, Pretreat, Transformer};
pub use rules::{Rule, RuleSet};
pub use session::Session;
