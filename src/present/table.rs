use crate::config::REQUIRED_COLUMNS;
use crate::data::filter::FilteredView;
use crate::data::model::BudgetRecord;

/// The filtered rows as display strings, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailTable {
    pub headers: [&'static str; 6],
    pub rows: Vec<[String; 6]>,
}

pub fn detail_table(view: &FilteredView<'_>) -> DetailTable {
    DetailTable {
        headers: REQUIRED_COLUMNS,
        rows: view.records().map(record_fields).collect(),
    }
}

/// Cells of one record in [`REQUIRED_COLUMNS`] order. Nulls are empty.
pub(crate) fn record_fields(rec: &BudgetRecord) -> [String; 6] {
    [
        rec.kind.clone().unwrap_or_default(),
        rec.flag.as_ref().map(|f| f.label().to_string()).unwrap_or_default(),
        rec.category.clone().unwrap_or_default(),
        rec.subcategory.clone().unwrap_or_default(),
        rec.year.map(|y| y.to_string()).unwrap_or_default(),
        rec.amount.map(|v| v.to_string()).unwrap_or_default(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply, FilterSelection};
    use crate::data::model::{Dataset, Flag};

    #[test]
    fn rows_keep_source_order_and_blank_nulls() {
        let ds = Dataset::from_records(vec![
            BudgetRecord {
                kind: Some("Budget général".into()),
                category: Some("Dette".into()),
                subcategory: None,
                flag: Some(Flag::Expenses),
                year: Some(2025),
                amount: Some(1500.25),
            },
            BudgetRecord {
                kind: Some("Budget général".into()),
                category: Some("Affectations".into()),
                subcategory: Some("Routes".into()),
                flag: None,
                year: Some(2025),
                amount: None,
            },
        ]);
        let table = detail_table(&apply(&ds, &FilterSelection::all(&ds)));

        assert_eq!(table.headers[4], "Annee");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][1], "DEPENSES");
        assert_eq!(table.rows[0][3], "");
        assert_eq!(table.rows[0][5], "1500.25");
        assert_eq!(table.rows[1][2], "Affectations");
        assert_eq!(table.rows[1][5], "");
    }
}
