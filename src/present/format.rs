use crate::data::aggregate::KpiSummary;

/// One headline metric ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiCard {
    pub label: &'static str,
    pub value: String,
}

/// Total, resources and expenses, in that order.
pub fn kpi_cards(summary: &KpiSummary, currency: &str) -> [KpiCard; 3] {
    [
        KpiCard {
            label: "Budget total",
            value: format_amount(summary.total, currency),
        },
        KpiCard {
            label: "Total recettes",
            value: format_amount(summary.resources, currency),
        },
        KpiCard {
            label: "Total dépenses",
            value: format_amount(summary.expenses, currency),
        },
    ]
}

/// `1234567.8` → `"1,234,568 FCFA"`.
pub fn format_amount(value: f64, currency: &str) -> String {
    let number = group_thousands(value);
    if currency.is_empty() {
        number
    } else {
        format!("{number} {currency}")
    }
}

/// Round to an integer and insert `,` every three digits.
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0" is not a number anyone wants to read.
    if value < 0.0 && digits.bytes().any(|b| b != b'0') {
        grouped.insert(0, '-');
    }
    grouped
}
