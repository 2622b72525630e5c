/// An attribute/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    pub index: usize,
    pub value: String,
}

impl Item {
    pub fn new(index: usize, value: impl Into<String>) -> Self {
        Self { index, value: value.into() }
    }
}

/// A set of items sorted by strictly increasing attribute index, together
/// with the number of records matching all of them.
///
/// Itemsets are only created by the lattice builder (and by [`Itemset::minus`]
/// on itemsets it produced), which keeps the ordering invariant that
/// [`Itemset::contains`] and [`Itemset::minus`] depend on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itemset {
    items: Vec<Item>,
    weight: usize,
}

impl Itemset {
    pub(crate) fn new(items: Vec<Item>, weight: usize) -> Self {
        debug_assert!(items.windows(2).all(|w| w[0].index < w[1].index));
        Self { items, weight }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn weight(&self) -> usize {
        self.weight
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Whether every item of `other` is also in `self`.
    pub fn contains(&self, other: &Itemset) -> bool {
        let mut rest = self.items.iter();
        other
            .items
            .iter()
            .all(|b| rest.by_ref().find(|a| a.index >= b.index) == Some(b))
    }

    /// The items of `self` not in `other`, in order. The result keeps the
    /// weight of `self`.
    pub fn minus(&self, other: &Itemset) -> Itemset {
        let mut rest = other.items.iter().peekable();
        let items = self
            .items
            .iter()
            .filter(|a| {
                while rest.next_if(|b| b.index < a.index).is_some() {}
                rest.next_if(|b| b == a).is_none()
            })
            .cloned()
            .collect();
        Itemset { items, weight: self.weight }
    }

    /// Candidate items for the join of two itemsets of the same size that
    /// share every item but the last, and whose last items sit on different
    /// attributes. The two last items are emitted in attribute order.
    pub(crate) fn join(&self, other: &Itemset) -> Option<Vec<Item>> {
        let (last, prefix) = self.items.split_last()?;
        let (other_last, other_prefix) = other.items.split_last()?;
        if prefix != other_prefix || last.index == other_last.index {
            return None;
        }
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend_from_slice(prefix);
        if last.index < other_last.index {
            items.push(last.clone());
            items.push(other_last.clone());
        } else {
            items.push(other_last.clone());
            items.push(last.clone());
        }
        Some(items)
    }
}

impl<'a> IntoIterator for &'a Itemset {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
