use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::compute::kernels::cast::{can_cast_types, cast_with_options, CastOptions};
use arrow::datatypes::DataType;
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{BudgetRecord, Dataset, Flag};
use crate::config::{COL_AMOUNT, COL_CATEGORY, COL_FLAG, COL_KIND, COL_SUBCATEGORY, COL_YEAR};
use crate::error::DataSourceError;

type Result<T> = std::result::Result<T, DataSourceError>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the budget table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – rows of `sheet`
/// * `.csv`     – header row followed by data rows
/// * `.parquet` – flat columns named like the sheet headers
///
/// Header names are trimmed before matching; extra columns are ignored.
pub fn load_file(path: &Path, sheet: &str) -> Result<Dataset> {
    if !path.exists() {
        return Err(DataSourceError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(path, sheet)?,
        "csv" => {
            let file = File::open(path).map_err(|source| DataSourceError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            read_csv(file)?
        }
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataSourceError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} budget rows from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Cells and column resolution shared by every format
// ---------------------------------------------------------------------------

/// A raw cell before it is converted into a record field.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Cell {
    fn from_text(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }

    fn raw(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => f.to_string(),
            Cell::Bool(b) => b.to_string(),
        }
    }
}

/// Positions of the required columns in a header row.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    kind: usize,
    flag: usize,
    category: usize,
    subcategory: usize,
    year: usize,
    amount: usize,
}

impl ColumnMap {
    fn resolve<S: AsRef<str>>(headers: &[S]) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.as_ref().trim() == name)
                .ok_or_else(|| DataSourceError::MissingColumn(name.to_string()))
        };

        Ok(ColumnMap {
            kind: find(COL_KIND)?,
            flag: find(COL_FLAG)?,
            category: find(COL_CATEGORY)?,
            subcategory: find(COL_SUBCATEGORY)?,
            year: find(COL_YEAR)?,
            amount: find(COL_AMOUNT)?,
        })
    }

    /// Required column positions paired with their header names.
    fn named(&self) -> [(usize, &'static str); 6] {
        [
            (self.kind, COL_KIND),
            (self.flag, COL_FLAG),
            (self.category, COL_CATEGORY),
            (self.subcategory, COL_SUBCATEGORY),
            (self.year, COL_YEAR),
            (self.amount, COL_AMOUNT),
        ]
    }

    /// Convert one row. `cell(i)` returns the cell in column `i`.
    fn record(&self, row: usize, cell: impl Fn(usize) -> Result<Cell>) -> Result<BudgetRecord> {
        // A blank flag is a missing flag, not an unnamed one.
        let flag = text_field(cell(self.flag)?)
            .filter(|label| !label.trim().is_empty())
            .map(|label| Flag::from_label(&label));
        Ok(BudgetRecord {
            kind: text_field(cell(self.kind)?),
            category: text_field(cell(self.category)?),
            subcategory: text_field(cell(self.subcategory)?),
            flag,
            year: year_field(row, cell(self.year)?)?,
            amount: amount_field(row, cell(self.amount)?)?,
        })
    }
}

fn text_field(cell: Cell) -> Option<String> {
    match cell {
        Cell::Empty => None,
        Cell::Text(s) if s.is_empty() => None,
        Cell::Text(s) => Some(s),
        Cell::Float(f) if f.is_nan() => None,
        // Excel stores integral labels such as "2025" as floats.
        Cell::Float(f) if f.fract() == 0.0 => Some(format!("{f:.0}")),
        other => Some(other.raw()),
    }
}

fn year_field(row: usize, cell: Cell) -> Result<Option<i32>> {
    let invalid = |cell: &Cell| DataSourceError::InvalidCell {
        row,
        column: COL_YEAR.to_string(),
        value: cell.raw(),
        expected: "an integer year",
    };

    match &cell {
        Cell::Empty => Ok(None),
        Cell::Float(f) if f.is_nan() => Ok(None),
        Cell::Int(i) => i32::try_from(*i).map(Some).map_err(|_| invalid(&cell)),
        Cell::Float(f) if f.fract() == 0.0 && f.abs() <= i32::MAX as f64 => Ok(Some(*f as i32)),
        Cell::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            if let Ok(y) = s.parse::<i32>() {
                return Ok(Some(y));
            }
            match s.parse::<f64>() {
                Ok(f) if f.fract() == 0.0 && f.abs() <= i32::MAX as f64 => Ok(Some(f as i32)),
                _ => Err(invalid(&cell)),
            }
        }
        _ => Err(invalid(&cell)),
    }
}

fn amount_field(row: usize, cell: Cell) -> Result<Option<f64>> {
    let invalid = |cell: &Cell| DataSourceError::InvalidCell {
        row,
        column: COL_AMOUNT.to_string(),
        value: cell.raw(),
        expected: "a number",
    };

    match &cell {
        Cell::Empty => Ok(None),
        Cell::Int(i) => Ok(Some(*i as f64)),
        Cell::Float(f) if f.is_nan() => Ok(None),
        Cell::Float(f) => Ok(Some(*f)),
        Cell::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            match s.parse::<f64>() {
                Ok(f) if f.is_nan() => Ok(None),
                Ok(f) => Ok(Some(f)),
                Err(_) => Err(invalid(&cell)),
            }
        }
        Cell::Bool(_) => Err(invalid(&cell)),
    }
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

/// First row of `sheet` is the header row; every following row is a record.
fn load_workbook(path: &Path, sheet: &str) -> Result<Dataset> {
    let mut workbook = open_workbook_auto(path)?;

    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet) {
        return Err(DataSourceError::SheetNotFound {
            sheet: sheet.to_string(),
            available,
        });
    }

    let range = workbook.worksheet_range(sheet)?;
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default();
    let columns = ColumnMap::resolve(&headers)?;

    let mut records = Vec::with_capacity(range.height().saturating_sub(1));
    for (i, row) in rows.enumerate() {
        let record = columns.record(i + 1, |col| {
            Ok(row.get(col).map(workbook_cell).unwrap_or(Cell::Empty))
        })?;
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

fn workbook_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::from_text(s),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::Error(_) => Cell::Empty,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read a CSV stream with a header row. Exports produced by
/// [`crate::present::csv_bytes`] read back through this function.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let columns = ColumnMap::resolve(&headers)?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = result?;
        let record = columns.record(i + 1, |col| {
            Ok(Cell::from_text(row.get(col).unwrap_or("")))
        })?;
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file whose flat columns carry the sheet's header names.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|source| DataSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let columns = ColumnMap::resolve(&headers)?;

    let reader = builder.build()?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;

        // Only the required columns are converted; extra columns may hold
        // any type.
        let mut arrays: Vec<Option<(ArrayRef, &'static str)>> = vec![None; batch.num_columns()];
        for (idx, name) in columns.named() {
            arrays[idx] = Some((normalize_column(batch.column(idx), name)?, name));
        }

        for row in 0..batch.num_rows() {
            let row_no = records.len() + 1;
            let record = columns.record(row_no, |col| match &arrays[col] {
                Some((array, name)) => arrow_cell(array, row, name),
                None => Ok(Cell::Empty),
            })?;
            records.push(record);
        }
    }

    Ok(Dataset::from_records(records))
}

/// Widen a column to one of the types [`arrow_cell`] reads: integers to
/// `Int64`, floats to `Float64`, everything else (dictionaries, views,
/// dates, decimals) to `Utf8`. Overflowing casts are errors, not nulls.
fn normalize_column(col: &ArrayRef, name: &str) -> Result<ArrayRef> {
    let target = match col.data_type() {
        DataType::Utf8
        | DataType::Int64
        | DataType::Float64
        | DataType::Boolean
        | DataType::Null => return Ok(Arc::clone(col)),
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => DataType::Int64,
        DataType::Float16 | DataType::Float32 => DataType::Float64,
        _ => DataType::Utf8,
    };

    if !can_cast_types(col.data_type(), &target) {
        return Err(unsupported_type(name, col.data_type()));
    }
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    Ok(cast_with_options(col, &target, &options)?)
}

/// Extract a single cell from a normalized Arrow column at a given row.
fn arrow_cell(col: &ArrayRef, row: usize, name: &str) -> Result<Cell> {
    if col.data_type() == &DataType::Null || col.is_null(row) {
        return Ok(Cell::Empty);
    }
    let any = col.as_any();
    let cell = match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|a| Cell::from_text(a.value(row))),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| Cell::Int(a.value(row))),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| Cell::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| Cell::Bool(a.value(row))),
        _ => None,
    };
    cell.ok_or_else(|| unsupported_type(name, col.data_type()))
}

fn unsupported_type(name: &str, data_type: &DataType) -> DataSourceError {
    DataSourceError::UnsupportedColumnType {
        column: name.to_string(),
        data_type: data_type.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use arrow::array::{Date32Array, Int8Array, UInt16Array};

    use super::*;

    #[test]
    fn headers_are_trimmed() {
        let headers = [
            " Nom indicateur 2",
            "Nom indicateur 4 ",
            "Nom indicateur 5",
            "  Nom indicateur 6  ",
            "Annee",
            "Valeur\t",
            "Commentaire",
        ];
        let map = ColumnMap::resolve(&headers).unwrap();
        assert_eq!(map.kind, 0);
        assert_eq!(map.subcategory, 3);
        assert_eq!(map.amount, 5);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let headers = ["Nom indicateur 2", "Nom indicateur 4", "Annee", "Valeur"];
        match ColumnMap::resolve(&headers) {
            Err(DataSourceError::MissingColumn(name)) => assert_eq!(name, "Nom indicateur 5"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn year_accepts_integral_numbers_and_text() {
        assert_eq!(year_field(1, Cell::Int(2025)).unwrap(), Some(2025));
        assert_eq!(year_field(1, Cell::Float(2024.0)).unwrap(), Some(2024));
        assert_eq!(year_field(1, Cell::Text(" 2026 ".into())).unwrap(), Some(2026));
        assert_eq!(year_field(1, Cell::Empty).unwrap(), None);
        assert!(year_field(3, Cell::Float(2024.5)).is_err());
        assert!(year_field(3, Cell::Text("deux mille".into())).is_err());
    }

    #[test]
    fn amount_treats_blank_and_nan_as_missing() {
        assert_eq!(amount_field(1, Cell::Text("1250.5".into())).unwrap(), Some(1250.5));
        assert_eq!(amount_field(1, Cell::Int(7)).unwrap(), Some(7.0));
        assert_eq!(amount_field(1, Cell::Float(f64::NAN)).unwrap(), None);
        assert_eq!(amount_field(1, Cell::Text("   ".into())).unwrap(), None);

        match amount_field(4, Cell::Text("n/a".into())) {
            Err(DataSourceError::InvalidCell { row, column, value, .. }) => {
                assert_eq!(row, 4);
                assert_eq!(column, COL_AMOUNT);
                assert_eq!(value, "n/a");
            }
            other => panic!("expected InvalidCell, got {other:?}"),
        }
    }

    #[test]
    fn integral_float_labels_lose_the_fraction() {
        assert_eq!(text_field(Cell::Float(12.0)), Some("12".to_string()));
        assert_eq!(text_field(Cell::Float(1.5)), Some("1.5".to_string()));
        assert_eq!(text_field(Cell::Text(String::new())), None);
    }

    #[test]
    fn workbook_cells_map_to_loader_cells() {
        assert_eq!(workbook_cell(&Data::Empty), Cell::Empty);
        assert_eq!(workbook_cell(&Data::String(String::new())), Cell::Empty);
        assert_eq!(workbook_cell(&Data::Float(3.5)), Cell::Float(3.5));
        assert_eq!(workbook_cell(&Data::Int(9)), Cell::Int(9));
    }

    #[test]
    fn blank_flag_is_missing() {
        let csv = "Nom indicateur 2,Nom indicateur 4,Nom indicateur 5,\
                   Nom indicateur 6,Annee,Valeur\n\
                   A,  ,X,s,2025,1\n";
        let ds = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.records[0].flag, None);
    }

    #[test]
    fn small_and_unsigned_integers_widen_to_int64() {
        let years: ArrayRef = Arc::new(UInt16Array::from(vec![2024, 2025]));
        let widened = normalize_column(&years, COL_YEAR).unwrap();
        assert_eq!(widened.data_type(), &DataType::Int64);
        assert_eq!(arrow_cell(&widened, 1, COL_YEAR).unwrap(), Cell::Int(2025));

        let small: ArrayRef = Arc::new(Int8Array::from(vec![Some(-3), None]));
        let widened = normalize_column(&small, COL_AMOUNT).unwrap();
        assert_eq!(arrow_cell(&widened, 0, COL_AMOUNT).unwrap(), Cell::Int(-3));
        assert_eq!(arrow_cell(&widened, 1, COL_AMOUNT).unwrap(), Cell::Empty);
    }

    #[test]
    fn dates_become_text_and_fail_as_years_with_their_value() {
        // 19723 days after the epoch is 2024-01-01.
        let dates: ArrayRef = Arc::new(Date32Array::from(vec![19723]));
        let text = normalize_column(&dates, COL_YEAR).unwrap();
        let cell = arrow_cell(&text, 0, COL_YEAR).unwrap();
        assert_eq!(cell, Cell::Text("2024-01-01".to_string()));

        match year_field(1, cell) {
            Err(DataSourceError::InvalidCell { value, .. }) => assert_eq!(value, "2024-01-01"),
            other => panic!("expected InvalidCell, got {other:?}"),
        }
    }

    #[test]
    fn unnormalized_columns_are_rejected_not_labelled() {
        let dates: ArrayRef = Arc::new(Date32Array::from(vec![19723]));
        match arrow_cell(&dates, 0, COL_YEAR) {
            Err(DataSourceError::UnsupportedColumnType { column, data_type }) => {
                assert_eq!(column, COL_YEAR);
                assert_eq!(data_type, "Date32");
            }
            other => panic!("expected UnsupportedColumnType, got {other:?}"),
        }
    }
}
