use std::collections::BTreeSet;

use budget_dashboard::data::aggregate::{
    group_by_category, group_by_year_and_flag, summarize, year_trend, YearFlagTotal,
};
use budget_dashboard::data::loader::read_csv;
use budget_dashboard::present::csv_bytes;
use budget_dashboard::{
    apply, BudgetRecord, Dashboard, DashboardConfig, Dataset, Dimension, FilterSelection, Flag,
};
use pretty_assertions::assert_eq;

fn rec(kind: &str, cat: &str, sub: &str, flag: Flag, year: i32, value: f64) -> BudgetRecord {
    BudgetRecord {
        kind: Some(kind.to_string()),
        category: Some(cat.to_string()),
        subcategory: Some(sub.to_string()),
        flag: Some(flag),
        year: Some(year),
        amount: Some(value),
    }
}

fn reference_dataset() -> Dataset {
    Dataset::from_records(vec![
        rec("A", "X", "s1", Flag::Resources, 2024, 100.0),
        rec("A", "Y", "s2", Flag::Expenses, 2024, 40.0),
        rec("B", "X", "s1", Flag::Expenses, 2025, 60.0),
    ])
}

fn selection(kinds: &[&str], cats: &[&str], years: &[i32]) -> FilterSelection {
    FilterSelection {
        kinds: kinds.iter().map(|s| s.to_string()).collect(),
        categories: cats.iter().map(|s| s.to_string()).collect(),
        years: years.iter().copied().collect(),
    }
}

fn larger_dataset() -> Dataset {
    let mut records = Vec::new();
    let kinds = ["Budget général", "Comptes spéciaux"];
    let cats = ["Recettes fiscales", "Fonctionnement", "Investissement"];
    let flags = [
        Flag::Resources,
        Flag::Expenses,
        Flag::Other("FINANCEMENT".to_string()),
    ];
    for (i, year) in [2024, 2025, 2026].into_iter().enumerate() {
        for (j, kind) in kinds.iter().enumerate() {
            for (k, cat) in cats.iter().enumerate() {
                let amount = ((i + 1) * 1000 + j * 100 + k * 10) as f64;
                let flag = flags[(i + j + k) % 3].clone();
                records.push(rec(kind, cat, "sous-catégorie", flag, year, amount));
            }
        }
    }
    records.push(BudgetRecord {
        amount: None,
        ..rec("Budget général", "Dette", "Intérêts", Flag::Expenses, 2025, 0.0)
    });
    Dataset::from_records(records)
}

#[test]
fn test_reference_example() {
    let ds = reference_dataset();
    let sel = selection(&["A", "B"], &["X"], &[2024, 2025]);

    let view = apply(&ds, &sel);
    assert_eq!(view.indices(), &[0, 2]);

    let kpis = summarize(&view);
    assert_eq!(kpis.total, 160.0);
    assert_eq!(kpis.resources, 100.0);
    assert_eq!(kpis.expenses, 60.0);

    assert_eq!(
        group_by_year_and_flag(&view),
        vec![
            YearFlagTotal { year: 2024, flag: Flag::Resources, total: 100.0 },
            YearFlagTotal { year: 2025, flag: Flag::Expenses, total: 60.0 },
        ]
    );
    assert!(year_trend(&view).is_some());
}

#[test]
fn test_every_row_in_view_matches_every_dimension() {
    let ds = larger_dataset();
    let selections = [
        FilterSelection::all(&ds),
        selection(&["Budget général"], &["Fonctionnement", "Dette"], &[2025]),
        selection(&["Comptes spéciaux"], &["Recettes fiscales"], &[2024, 2026]),
        selection(&["Budget général", "Comptes spéciaux"], &["Investissement"], &[2023]),
    ];

    for sel in &selections {
        let view = apply(&ds, sel);
        let kept: BTreeSet<usize> = view.indices().iter().copied().collect();

        for (i, r) in ds.records.iter().enumerate() {
            let passes = sel.kinds.contains(r.kind.as_ref().unwrap())
                && sel.categories.contains(r.category.as_ref().unwrap())
                && sel.years.contains(&r.year.unwrap());
            assert_eq!(kept.contains(&i), passes, "row {i} with {sel:?}");
        }
    }
}

#[test]
fn test_total_decomposes_by_flag_and_by_category() {
    let ds = larger_dataset();
    let view = apply(&ds, &FilterSelection::all(&ds));
    let kpis = summarize(&view);

    let other: f64 = view
        .records()
        .filter(|r| matches!(r.flag, Some(Flag::Other(_))))
        .map(|r| r.amount_or_zero())
        .sum();
    assert_eq!(kpis.total, kpis.resources + kpis.expenses + other);

    let by_category: f64 = group_by_category(&view).values().sum();
    assert_eq!(by_category, kpis.total);
}

#[test]
fn test_recomputation_is_deterministic() {
    let ds = larger_dataset();
    let mut sel = FilterSelection::all(&ds);
    sel.select_none(Dimension::Kind);
    sel.select_all(Dimension::Kind, &ds);
    sel.years.remove(&2026);
    let config = DashboardConfig::default();

    let a = Dashboard::build(&ds, &sel, &config);
    let b = Dashboard::build(&ds, &sel, &config);

    assert_eq!(a.view.indices(), b.view.indices());
    assert_eq!(a.summary, b.summary);
    assert_eq!(a.kpis, b.kpis);
    assert_eq!(a.pie, b.pie);
    assert_eq!(a.bars, b.bars);
    assert_eq!(a.trend, b.trend);
}

#[test]
fn test_empty_selection_gives_zero_dashboard() {
    let ds = reference_dataset();
    let config = DashboardConfig::default();
    for dim in Dimension::ALL {
        let mut sel = FilterSelection::all(&ds);
        sel.select_none(dim);

        let dash = Dashboard::build(&ds, &sel, &config);
        assert!(dash.view.is_empty());
        assert_eq!(dash.summary.total, 0.0);
        assert_eq!(dash.kpis[0].value, "0 FCFA");
        assert!(dash.pie.is_empty());
        assert!(dash.bars.is_empty());
        assert!(dash.trend.is_none());
        assert!(dash.table().rows.is_empty());
    }
}

#[test]
fn test_single_year_hides_trend() {
    let ds = reference_dataset();
    let sel = selection(&["A", "B"], &["X", "Y"], &[2024]);
    let dash = Dashboard::build(&ds, &sel, &DashboardConfig::default());
    assert_eq!(dash.view.len(), 2);
    assert!(dash.trend.is_none());
    assert_eq!(dash.kpis[0].value, "140 FCFA");
}

#[test]
fn test_csv_export_round_trips() {
    let ds = larger_dataset();
    let sel = selection(
        &["Budget général", "Comptes spéciaux"],
        &["Fonctionnement", "Investissement", "Dette"],
        &[2025, 2026],
    );
    let view = apply(&ds, &sel);
    assert!(!view.is_empty());

    let bytes = csv_bytes(&view).unwrap();
    let text = String::from_utf8(bytes.clone()).unwrap();
    assert!(text.starts_with(
        "Nom indicateur 2,Nom indicateur 4,Nom indicateur 5,Nom indicateur 6,Annee,Valeur\n"
    ));

    let decoded = read_csv(bytes.as_slice()).unwrap();
    let expected: Vec<BudgetRecord> = view.records().cloned().collect();
    assert_eq!(decoded.records, expected);
}

#[test]
fn test_csv_export_keeps_blank_flag_missing() {
    let ds = Dataset::from_records(vec![
        BudgetRecord {
            flag: None,
            ..rec("A", "X", "s1", Flag::Resources, 2024, 10.0)
        },
        rec("A", "X", "s2", Flag::Expenses, 2024, 5.0),
    ]);
    let view = apply(&ds, &FilterSelection::all(&ds));

    let bytes = csv_bytes(&view).unwrap();
    let decoded = read_csv(bytes.as_slice()).unwrap();
    assert_eq!(decoded.records[0].flag, None);
    assert_eq!(decoded.records, ds.records);

    // A flag cell holding only spaces reads back as missing too.
    let padded = "Nom indicateur 2,Nom indicateur 4,Nom indicateur 5,\
                  Nom indicateur 6,Annee,Valeur\n\
                  A,   ,X,s1,2024,10\n";
    let decoded = read_csv(padded.as_bytes()).unwrap();
    assert_eq!(decoded.records[0].flag, None);
}

#[test]
fn test_csv_export_of_empty_view_is_header_only() {
    let ds = reference_dataset();
    let view = apply(&ds, &FilterSelection::none());
    let bytes = csv_bytes(&view).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "Nom indicateur 2,Nom indicateur 4,Nom indicateur 5,Nom indicateur 6,Annee,Valeur\n"
    );
}
