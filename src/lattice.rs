use std::{borrow::Cow, time::Instant};

use crate::{
    attribute::Attribute,
    config::MiningOptions,
    dataset::{Dataset, Record},
    itemset::{Item, Itemset},
    pretreat::{Pretreat, Transformer},
    Result,
};

/// All itemsets of one size whose weight exceeds the support floor, in
/// generation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Level {
    size: usize,
    itemsets: Vec<Itemset>,
}

impl Level {
    /// Number of items in each itemset of the level.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn itemsets(&self) -> &[Itemset] {
        &self.itemsets
    }

    pub fn len(&self) -> usize {
        self.itemsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Itemset> {
        self.itemsets.iter()
    }
}

impl<'a> IntoIterator for &'a Level {
    type Item = &'a Itemset;
    type IntoIter = std::slice::Iter<'a, Itemset>;

    fn into_iter(self) -> Self::IntoIter {
        self.itemsets.iter()
    }
}

/// The nonempty levels `L(1)..L(K)` of one mining pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lattice {
    levels: Vec<Level>,
    min_weight: usize,
}

impl Lattice {
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// The level holding itemsets of `size` items (1-based).
    pub fn level(&self, size: usize) -> Option<&Level> {
        size.checked_sub(1).and_then(|k| self.levels.get(k))
    }

    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn num_itemsets(&self) -> usize {
        self.levels.iter().map(Level::len).sum()
    }

    pub fn min_weight(&self) -> usize {
        self.min_weight
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Level> {
        self.levels.iter()
    }
}

impl<'a> IntoIterator for &'a Lattice {
    type Item = &'a Level;
    type IntoIter = std::slice::Iter<'a, Level>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}

pub trait ItemSetMiner {
    fn mine(&mut self, dataset: &Dataset, options: &MiningOptions) -> Result<Lattice>;
}

/// Level-wise candidate generation and support counting.
#[derive(Debug, Default, Clone, Copy)]
pub struct Apriori;

impl ItemSetMiner for Apriori {
    fn mine(&mut self, dataset: &Dataset, options: &MiningOptions) -> Result<Lattice> {
        let n = dataset.num_attributes();
        let pretreat = options.pretreatments(n)?;
        let attributes = dataset.pretreat_attributes(&pretreat)?;
        let min_weight = options.min_weight(dataset.num_instances());
        log::info!(
            "mining (instances: {}, min_support: {}, min_weight: {min_weight})",
            dataset.num_instances(),
            options.min_support
        );
        let builder = LatticeBuilder::new(dataset.records(), &pretreat, min_weight)?;
        Ok(builder.build(&attributes, &options.selection_mask(n)))
    }
}

/// Builds levels over a fixed record set. Records are pretreated once up
/// front, so counting only compares strings.
pub struct LatticeBuilder<'a> {
    records: Vec<Vec<Cow<'a, str>>>,
    min_weight: usize,
}

impl<'a> LatticeBuilder<'a> {
    /// `pretreat` is indexed by attribute; attributes past its end are
    /// counted as-is.
    pub fn new(records: &'a [Record], pretreat: &[Pretreat], min_weight: usize) -> Result<Self> {
        let records = records
            .iter()
            .map(|record| {
                record
                    .iter()
                    .enumerate()
                    .map(|(i, value)| match pretreat.get(i) {
                        Some(p) => p.transform(value),
                        None => Ok(Cow::Borrowed(value.as_str())),
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<_>>()?;
        Ok(Self { records, min_weight })
    }

    pub fn min_weight(&self) -> usize {
        self.min_weight
    }

    /// One itemset per selected (attribute, value) whose occurrence count
    /// exceeds the support floor, in attribute then first-seen value order.
    pub fn level_one(&self, attributes: &[Attribute], selection: &[bool]) -> Level {
        let min_weight = self.min_weight;
        let itemsets: Vec<Itemset> = attributes
            .iter()
            .enumerate()
            .filter(|(i, _)| selection.get(*i).copied().unwrap_or(true))
            .flat_map(|(i, attr)| {
                attr.iter()
                    .filter(move |&(_, weight)| weight > min_weight)
                    .map(move |(value, weight)| Itemset::new(vec![Item::new(i, value)], weight))
            })
            .collect();
        log::debug!("L(1): {} itemsets", itemsets.len());
        Level { size: 1, itemsets }
    }

    /// Joins every pair of `prev` itemsets sharing all but their last item
    /// and keeps the candidates whose weight exceeds the support floor.
    pub fn next_level(&self, prev: &Level) -> Level {
        let begin = Instant::now();
        let size = prev.size + 1;
        let mut candidates = 0;
        let mut itemsets = Vec::new();
        for (i, left) in prev.itemsets.iter().enumerate() {
            for right in &prev.itemsets[i + 1..] {
                let Some(items) = left.join(right) else {
                    continue;
                };
                candidates += 1;
                let weight = self.weight(&items);
                if weight > self.min_weight {
                    itemsets.push(Itemset::new(items, weight));
                }
            }
        }
        log::info!(
            "L({size}): {} of {candidates} candidates kept, time cost: {:?}",
            itemsets.len(),
            begin.elapsed()
        );
        Level { size, itemsets }
    }

    /// Number of records whose value matches every item.
    pub fn weight(&self, items: &[Item]) -> usize {
        self.records
            .iter()
            .filter(|record| {
                items
                    .iter()
                    .all(|item| record.get(item.index).map_or(false, |v| *v == item.value))
            })
            .count()
    }

    pub fn build(&self, attributes: &[Attribute], selection: &[bool]) -> Lattice {
        let begin = Instant::now();
        let mut levels = Vec::new();
        let mut level = self.level_one(attributes, selection);
        while !level.is_empty() {
            let next = self.next_level(&level);
            levels.push(level);
            level = next;
        }
        log::info!("found {} levels, time cost: {:?}", levels.len(), begin.elapsed());
        Lattice { levels, min_weight: self.min_weight }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shapes() -> Dataset {
        "color size shape\n\n\
         red small round\n\
         red large round\n\
         blue small square\n\
         red small round\n\
         blue large round\n"
            .parse()
            .unwrap()
    }

    fn builder(ds: &Dataset, min_weight: usize) -> LatticeBuilder<'_> {
        LatticeBuilder::new(ds.records(), &[], min_weight).unwrap()
    }

    fn names(level: &Level) -> Vec<Vec<(usize, &str)>> {
        level
            .iter()
            .map(|s| s.iter().map(|item| (item.index, item.value.as_str())).collect())
            .collect()
    }

    #[test]
    fn level_one_order_and_floor() {
        let ds = shapes();
        let l1 = builder(&ds, 1).level_one(ds.attributes(), &[true, true, true]);
        assert_eq!(l1.size(), 1);
        assert_eq!(
            names(&l1),
            [
                vec![(0, "red")],
                vec![(0, "blue")],
                vec![(1, "small")],
                vec![(1, "large")],
                vec![(2, "round")],
            ]
        );
        assert_eq!(l1.iter().map(Itemset::weight).collect::<Vec<_>>(), [3, 2, 3, 2, 4]);
    }

    #[test]
    fn level_one_selection() {
        let ds = shapes();
        let l1 = builder(&ds, 0).level_one(ds.attributes(), &[false, true, false]);
        assert_eq!(names(&l1), [vec![(1, "small")], vec![(1, "large")]]);
    }

    #[test]
    fn weight_counts_all_items() {
        let ds = shapes();
        let b = builder(&ds, 0);
        assert_eq!(b.weight(&[Item::new(0, "red"), Item::new(2, "round")]), 3);
        assert_eq!(b.weight(&[Item::new(0, "blue"), Item::new(1, "small")]), 1);
        assert_eq!(b.weight(&[Item::new(0, "blue"), Item::new(2, "triangle")]), 0);
        assert_eq!(b.weight(&[]), 5);
    }

    #[test]
    fn next_level_joins() {
        let ds = shapes();
        let b = builder(&ds, 1);
        let l1 = b.level_one(ds.attributes(), &[true, true, true]);
        let l2 = b.next_level(&l1);
        assert_eq!(l2.size(), 2);
        assert_eq!(
            names(&l2),
            [
                vec![(0, "red"), (1, "small")],
                vec![(0, "red"), (2, "round")],
                vec![(1, "small"), (2, "round")],
                vec![(1, "large"), (2, "round")],
            ]
        );
        assert_eq!(l2.iter().map(Itemset::weight).collect::<Vec<_>>(), [2, 3, 2, 2]);
        let l3 = b.next_level(&l2);
        assert_eq!(names(&l3), [vec![(0, "red"), (1, "small"), (2, "round")]]);
        assert_eq!(l3.itemsets()[0].weight(), 2);
        assert!(b.next_level(&l3).is_empty());
    }

    #[test]
    fn build_stops_at_empty_level() {
        let ds = shapes();
        let lattice = builder(&ds, 1).build(ds.attributes(), &[true, true, true]);
        assert_eq!(lattice.num_levels(), 3);
        assert_eq!(lattice.num_itemsets(), 5 + 4 + 1);
        assert_eq!(lattice.level(3).unwrap().len(), 1);
        assert!(lattice.level(0).is_none());
        assert!(lattice.level(4).is_none());
    }

    #[test]
    fn support_is_anti_monotone() {
        let ds = shapes();
        let lattice = builder(&ds, 0).build(ds.attributes(), &[true, true, true]);
        for (k, level) in lattice.iter().enumerate().skip(1) {
            for set in level {
                let subsets = lattice.levels()[k - 1].iter().filter(|s| set.contains(s));
                for sub in subsets {
                    assert!(sub.weight() >= set.weight());
                }
            }
        }
    }

    #[test]
    fn pretreated_counting() {
        let ds: Dataset = "age sex\n\n23 m\n27 m\n35 f\n31 m\n".parse().unwrap();
        let pretreat = [Pretreat::Bucket(10), Pretreat::Identity];
        let b = LatticeBuilder::new(ds.records(), &pretreat, 0).unwrap();
        let attrs = ds.pretreat_attributes(&pretreat).unwrap();
        let lattice = b.build(&attrs, &[true, true]);
        let l2 = lattice.level(2).unwrap();
        assert_eq!(
            names(l2),
            [vec![(0, "20"), (1, "m")], vec![(0, "30"), (1, "m")], vec![(0, "30"), (1, "f")]]
        );
        assert_eq!(l2.iter().map(Itemset::weight).collect::<Vec<_>>(), [2, 1, 1]);
    }

    #[test]
    fn pretreat_failure_propagates() {
        let ds: Dataset = "age\n\n23\nold\n".parse().unwrap();
        assert!(LatticeBuilder::new(ds.records(), &[Pretreat::Bucket(10)], 0).is_err());
    }

    #[test]
    fn mine_empty_dataset() {
        let ds: Dataset = "color size\n".parse().unwrap();
        let lattice = Apriori.mine(&ds, &MiningOptions::default()).unwrap();
        assert!(lattice.is_empty());
        assert_eq!(lattice.min_weight(), 0);
    }

    #[test]
    fn mine_respects_options() {
        let ds = shapes();
        let mut options = MiningOptions::new(0.4, 0.9);
        options.selection = Some(vec![true, false, true]);
        let lattice = Apriori.mine(&ds, &options).unwrap();
        assert_eq!(lattice.min_weight(), 2);
        assert_eq!(names(lattice.level(1).unwrap()), [vec![(0, "red")], vec![(2, "round")]]);
        assert_eq!(names(lattice.level(2).unwrap()), [vec![(0, "red"), (2, "round")]]);
        assert_eq!(lattice.num_levels(), 2);
    }
}
