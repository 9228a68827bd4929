use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Flag – resource vs. expense classification
// ---------------------------------------------------------------------------

/// Whether a budget line is a resource (revenue) or an expense.
///
/// Variant order drives sorting, so resources come before expenses in
/// every grouped output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flag {
    Resources,
    Expenses,
    /// Any other non-empty label found in the source.
    Other(String),
}

impl Flag {
    /// Parse a source label. Both the French spelling used by the workbook
    /// and the English one are accepted, case-insensitively.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_uppercase().as_str() {
            "RESSOURCES" | "RESOURCES" => Flag::Resources,
            "DEPENSES" | "DÉPENSES" | "EXPENSES" => Flag::Expenses,
            _ => Flag::Other(trimmed.to_string()),
        }
    }

    /// Label written back to exports and shown in legends.
    pub fn label(&self) -> &str {
        match self {
            Flag::Resources => "RESSOURCES",
            Flag::Expenses => "DEPENSES",
            Flag::Other(s) => s,
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// BudgetRecord – one row of the Budget sheet
// ---------------------------------------------------------------------------

/// A single budget line. `None` marks an empty cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BudgetRecord {
    /// Type of budget line (`Nom indicateur 2`).
    pub kind: Option<String>,
    /// Budget category (`Nom indicateur 5`).
    pub category: Option<String>,
    /// Sub-category (`Nom indicateur 6`).
    pub subcategory: Option<String>,
    /// Resource / expense flag (`Nom indicateur 4`).
    pub flag: Option<Flag>,
    /// Fiscal year (`Annee`).
    pub year: Option<i32>,
    /// Amount in currency units (`Valeur`).
    pub amount: Option<f64>,
}

impl BudgetRecord {
    /// Amount with a missing value counted as zero.
    pub fn amount_or_zero(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with the distinct values of each filter dimension.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All rows, in source order.
    pub records: Vec<BudgetRecord>,
    /// Distinct non-null kinds.
    pub kinds: BTreeSet<String>,
    /// Distinct non-null categories.
    pub categories: BTreeSet<String>,
    /// Distinct non-null years.
    pub years: BTreeSet<i32>,
}

impl Dataset {
    /// Build the dimension indices from the loaded rows. Nulls never
    /// become filter options.
    pub fn from_records(records: Vec<BudgetRecord>) -> Self {
        let mut kinds = BTreeSet::new();
        let mut categories = BTreeSet::new();
        let mut years = BTreeSet::new();

        for rec in &records {
            if let Some(k) = &rec.kind {
                kinds.insert(k.clone());
            }
            if let Some(c) = &rec.category {
                categories.insert(c.clone());
            }
            if let Some(y) = rec.year {
                years.insert(y);
            }
        }

        Dataset {
            records,
            kinds,
            categories,
            years,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
