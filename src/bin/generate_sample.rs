//! Writes a synthetic budget table as `sample_budget.csv` and
//! `sample_budget.parquet`, with the same headers as the Budget sheet.

use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use budget_dashboard::config::{
    COL_AMOUNT, COL_CATEGORY, COL_FLAG, COL_KIND, COL_SUBCATEGORY, COL_YEAR, REQUIRED_COLUMNS,
};
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

struct Row {
    kind: &'static str,
    flag: &'static str,
    category: &'static str,
    subcategory: &'static str,
    year: i64,
    amount: f64,
}

/// (flag, category, sub-categories, base amount in FCFA)
const LINES: &[(&str, &str, &[&str], f64)] = &[
    (
        "RESSOURCES",
        "Recettes fiscales",
        &["Impôts sur le revenu", "TVA", "Droits de douane"],
        1.8e12,
    ),
    ("RESSOURCES", "Recettes non fiscales", &["Dividendes", "Redevances"], 2.5e11),
    ("RESSOURCES", "Dons", &["Dons projets", "Dons programmes"], 1.2e11),
    ("DEPENSES", "Fonctionnement", &["Personnel", "Biens et services"], 1.5e12),
    ("DEPENSES", "Investissement", &["Routes", "Santé", "Éducation"], 9.0e11),
    ("DEPENSES", "Dette publique", &["Intérêts", "Amortissement"], 7.0e11),
];

const KINDS: [(&str, f64); 2] = [("Budget général", 1.0), ("Comptes spéciaux du Trésor", 0.08)];
const YEARS: [i64; 3] = [2024, 2025, 2026];

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::new();
    for &year in &YEARS {
        let growth = 1.0 + 0.06 * (year - YEARS[0]) as f64;
        for &(kind, share) in &KINDS {
            for &(flag, category, subs, base) in LINES {
                for &subcategory in subs {
                    let noise = 0.8 + 0.4 * rng.next_f64();
                    let amount = (base * share * growth * noise / subs.len() as f64).round();
                    rows.push(Row {
                        kind,
                        flag,
                        category,
                        subcategory,
                        year,
                        amount,
                    });
                }
            }
        }
    }
    rows
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(REQUIRED_COLUMNS)?;
    for r in rows {
        writer.write_record([
            r.kind.to_string(),
            r.flag.to_string(),
            r.category.to_string(),
            r.subcategory.to_string(),
            r.year.to_string(),
            r.amount.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let text =
        |f: fn(&Row) -> &'static str| StringArray::from(rows.iter().map(f).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new(COL_KIND, DataType::Utf8, false),
        Field::new(COL_FLAG, DataType::Utf8, false),
        Field::new(COL_CATEGORY, DataType::Utf8, false),
        Field::new(COL_SUBCATEGORY, DataType::Utf8, false),
        Field::new(COL_YEAR, DataType::Int64, false),
        Field::new(COL_AMOUNT, DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(text(|r| r.kind)),
            Arc::new(text(|r| r.flag)),
            Arc::new(text(|r| r.category)),
            Arc::new(text(|r| r.subcategory)),
            Arc::new(Int64Array::from(rows.iter().map(|r| r.year).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.amount).collect::<Vec<_>>())),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    write_csv(&rows, "sample_budget.csv")?;
    write_parquet(&rows, "sample_budget.parquet")?;

    println!(
        "Wrote {} budget lines ({} years) to sample_budget.csv and sample_budget.parquet",
        rows.len(),
        YEARS.len()
    );
    Ok(())
}
