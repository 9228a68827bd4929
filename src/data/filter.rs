use std::collections::BTreeSet;
use std::fmt;

use super::model::{BudgetRecord, Dataset};

// ---------------------------------------------------------------------------
// Filter dimensions
// ---------------------------------------------------------------------------

/// The three columns a user can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Kind,
    Category,
    Year,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Kind, Dimension::Category, Dimension::Year];

    /// Label shown above the multi-select widget.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Kind => "Type de ligne budgétaire (Nom indicateur 2)",
            Dimension::Category => "Catégorie budgétaire (Nom indicateur 5)",
            Dimension::Year => "Année",
        }
    }
}

/// A selectable value in one dimension.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DimensionValue {
    Text(String),
    Year(i32),
}

impl fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionValue::Text(s) => write!(f, "{s}"),
            DimensionValue::Year(y) => write!(f, "{y}"),
        }
    }
}

/// Every option the dataset offers for `dim`, in display order.
pub fn options(dataset: &Dataset, dim: Dimension) -> Vec<DimensionValue> {
    match dim {
        Dimension::Kind => dataset.kinds.iter().cloned().map(DimensionValue::Text).collect(),
        Dimension::Category => dataset
            .categories
            .iter()
            .cloned()
            .map(DimensionValue::Text)
            .collect(),
        Dimension::Year => dataset.years.iter().copied().map(DimensionValue::Year).collect(),
    }
}

// ---------------------------------------------------------------------------
// FilterSelection – what is ticked in each multi-select
// ---------------------------------------------------------------------------

/// Selected values per dimension. An empty set matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub kinds: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub years: BTreeSet<i32>,
}

impl FilterSelection {
    /// Every distinct value of every dimension selected (show everything).
    pub fn all(dataset: &Dataset) -> Self {
        Self {
            kinds: dataset.kinds.clone(),
            categories: dataset.categories.clone(),
            years: dataset.years.clone(),
        }
    }

    /// Nothing selected anywhere.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether `value` is ticked in `dim`.
    pub fn is_selected(&self, dim: Dimension, value: &DimensionValue) -> bool {
        match (dim, value) {
            (Dimension::Kind, DimensionValue::Text(s)) => self.kinds.contains(s),
            (Dimension::Category, DimensionValue::Text(s)) => self.categories.contains(s),
            (Dimension::Year, DimensionValue::Year(y)) => self.years.contains(y),
            _ => false,
        }
    }

    /// Flip a single value in `dim`. Values of the wrong shape are ignored.
    pub fn toggle(&mut self, dim: Dimension, value: &DimensionValue) {
        match (dim, value) {
            (Dimension::Kind, DimensionValue::Text(s)) => toggle_in(&mut self.kinds, s.clone()),
            (Dimension::Category, DimensionValue::Text(s)) => {
                toggle_in(&mut self.categories, s.clone())
            }
            (Dimension::Year, DimensionValue::Year(y)) => toggle_in(&mut self.years, *y),
            _ => log::debug!("Ignoring {value} for {dim:?}"),
        }
    }

    /// Select every value the dataset offers in `dim`.
    pub fn select_all(&mut self, dim: Dimension, dataset: &Dataset) {
        match dim {
            Dimension::Kind => self.kinds = dataset.kinds.clone(),
            Dimension::Category => self.categories = dataset.categories.clone(),
            Dimension::Year => self.years = dataset.years.clone(),
        }
    }

    /// Deselect everything in `dim`.
    pub fn select_none(&mut self, dim: Dimension) {
        match dim {
            Dimension::Kind => self.kinds.clear(),
            Dimension::Category => self.categories.clear(),
            Dimension::Year => self.years.clear(),
        }
    }

    pub fn selected_count(&self, dim: Dimension) -> usize {
        match dim {
            Dimension::Kind => self.kinds.len(),
            Dimension::Category => self.categories.len(),
            Dimension::Year => self.years.len(),
        }
    }

    /// A record passes when all three of its fields are selected. Null
    /// fields never match.
    pub fn matches(&self, record: &BudgetRecord) -> bool {
        let kind = record.kind.as_ref().is_some_and(|k| self.kinds.contains(k));
        let category = record
            .category
            .as_ref()
            .is_some_and(|c| self.categories.contains(c));
        let year = record.year.is_some_and(|y| self.years.contains(&y));
        kind && category && year
    }
}

fn toggle_in<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

// ---------------------------------------------------------------------------
// FilteredView – the rows passing the current selection
// ---------------------------------------------------------------------------

/// Borrowed subsequence of a [`Dataset`], in source order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Row indices into the dataset.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn records(&self) -> impl Iterator<Item = &'a BudgetRecord> + '_ {
        self.indices.iter().map(|&i| &self.dataset.records[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return the rows of `dataset` that pass `selection`.
pub fn apply<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredView<'a> {
    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect();

    FilteredView { dataset, indices }
}
