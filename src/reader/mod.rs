//! Module for reading input tables with schema validation.
//!
//! Tables are read from CSV or Parquet files into Arrow record batches. Only
//! the required columns are kept; each batch is normalized so its columns
//! carry the logical field names and target types of the [`TableSchema`].
//! Missing values in required columns are checked separately by
//! [`require_values`], after the caller has dropped rows it does not need.

use std::fs::File;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::array::{Array, ArrayRef};
use arrow::compute::{CastOptions, cast_with_options};
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ProjectionMask;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::LoadError;
use crate::error::util::safe_open_file;
use crate::schema::TableSchema;
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Default batch size for reading tables
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Number of CSV records sampled when reading the header
const HEADER_SAMPLE_RECORDS: usize = 1;

/// Supported input file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Delimited text with a header row
    Csv,
    /// Apache Parquet
    Parquet,
}

impl TableFormat {
    /// Detect the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("parquet") => Ok(Self::Parquet),
            _ => Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Read a table file into normalized record batches
///
/// # Arguments
/// * `path` - Path to a `.csv` or `.parquet` file
/// * `schema` - Schema describing the required columns
///
/// # Errors
/// Returns an error if the file is missing or unreadable, a required column
/// is absent, or values cannot be converted to their target types. Missing
/// values are accepted here; see [`require_values`].
pub fn read_table(path: &Path, schema: &TableSchema) -> Result<Vec<RecordBatch>, LoadError> {
    let start = Instant::now();
    log_operation_start(&format!("Loading {} table from", schema.name), path);

    let raw = match TableFormat::from_path(path)? {
        TableFormat::Csv => read_csv(path, schema)?,
        TableFormat::Parquet => read_parquet(path, schema)?,
    };

    let batches = raw
        .iter()
        .map(|batch| normalize_batch(batch, schema))
        .collect::<Result<Vec<_>, _>>()?;

    let rows = batches.iter().map(RecordBatch::num_rows).sum();
    log_operation_complete("loaded", path, rows, Some(start.elapsed()));
    Ok(batches)
}

/// Read a CSV file, parsing required columns with their target types
fn read_csv(path: &Path, schema: &TableSchema) -> Result<Vec<RecordBatch>, LoadError> {
    let purpose = format!("{} table", schema.name);
    let mut file = safe_open_file(path, &purpose)?;

    let (header, _) = Format::default()
        .with_header(true)
        .infer_schema(&mut file, Some(HEADER_SAMPLE_RECORDS))?;
    schema.require_columns(header.fields().iter().map(|f| f.name().as_str()))?;

    // Required columns get their target type; everything else stays text and is projected away
    let mut projection = Vec::with_capacity(schema.columns.len());
    let fields: Vec<Field> = header
        .fields()
        .iter()
        .enumerate()
        .map(|(idx, field)| match schema.column_by_source(field.name()) {
            Some(def) => {
                projection.push(idx);
                Field::new(field.name(), def.data_type.clone(), true)
            }
            None => {
                log::debug!("Skipping column {} in {}", field.name(), path.display());
                Field::new(field.name(), DataType::Utf8, true)
            }
        })
        .collect();

    rewind(&mut file, path)?;
    let reader = ReaderBuilder::new(Arc::new(Schema::new(fields)))
        .with_header(true)
        .with_batch_size(DEFAULT_BATCH_SIZE)
        .with_projection(projection)
        .build(file)?;

    reader
        .map(|batch| {
            batch.map_err(|e| LoadError::malformed(schema.name, e.to_string()))
        })
        .collect()
}

/// Read a Parquet file, projecting the required root columns
fn read_parquet(path: &Path, schema: &TableSchema) -> Result<Vec<RecordBatch>, LoadError> {
    let purpose = format!("{} table", schema.name);
    let file = safe_open_file(path, &purpose)?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let file_schema = Arc::clone(builder.schema());
    schema.require_columns(file_schema.fields().iter().map(|f| f.name().as_str()))?;

    let projection: Vec<usize> = file_schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| schema.column_by_source(f.name()).is_some())
        .map(|(idx, _)| idx)
        .collect();
    let mask = ProjectionMask::roots(builder.parquet_schema(), projection);

    let reader = builder
        .with_projection(mask)
        .with_batch_size(DEFAULT_BATCH_SIZE)
        .build()?;

    reader
        .map(|batch| batch.map_err(LoadError::from))
        .collect()
}

/// Select, rename and cast the required columns of a raw batch
///
/// The result uses [`TableSchema::relaxed_arrow_schema`], so any column may
/// still hold nulls.
///
/// # Errors
/// Returns an error if a required column is missing or a value cannot be cast
pub fn normalize_batch(batch: &RecordBatch, schema: &TableSchema) -> Result<RecordBatch, LoadError> {
    let batch_schema = batch.schema();
    schema.require_columns(batch_schema.fields().iter().map(|f| f.name().as_str()))?;

    let options = CastOptions {
        safe: false,
        ..Default::default()
    };

    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.columns.len());
    for def in &schema.columns {
        let idx = batch_schema.index_of(&def.source)?;
        let column = cast_with_options(batch.column(idx), &def.data_type, &options).map_err(|e| {
            LoadError::malformed(schema.name, format!("column {}: {e}", def.source))
        })?;
        columns.push(column);
    }

    Ok(RecordBatch::try_new(schema.relaxed_arrow_schema(), columns)?)
}

/// Reject missing values in non-nullable columns of a normalized batch
///
/// On success the batch is returned under the strict
/// [`TableSchema::arrow_schema`].
///
/// # Errors
/// Returns [`LoadError::Malformed`] naming the first column with missing values
pub fn require_values(batch: &RecordBatch, schema: &TableSchema) -> Result<RecordBatch, LoadError> {
    for (def, column) in schema.columns.iter().zip(batch.columns()) {
        if !def.nullable && column.null_count() > 0 {
            return Err(LoadError::malformed(
                schema.name,
                format!(
                    "column {} contains {} missing values",
                    def.source,
                    column.null_count()
                ),
            ));
        }
    }
    Ok(RecordBatch::try_new(schema.arrow_schema(), batch.columns().to_vec())?)
}

fn rewind(file: &mut File, path: &Path) -> Result<(), LoadError> {
    file.rewind().map_err(|source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnNames;
    use crate::schema::{positions_schema, transitions_schema};
    use arrow::array::{Float64Array, StringArray, UInt64Array};
    use std::io::Write;

    fn write_csv(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_csv_columns_are_renamed_and_typed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "transitions.csv",
            "N,extra,SOURCE_COMPANY,COMPANY,CATEGORY\n10,x,Google,\"Asana, Inc.\",eng\n3,y,Meta,Other,\n",
        );

        let schema = transitions_schema(&ColumnNames::default());
        let batches = read_table(&path, &schema).unwrap();
        let batch = &batches[0];

        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.schema(), schema.relaxed_arrow_schema());
        assert_eq!(require_values(batch, &schema).unwrap().schema(), schema.arrow_schema());
        let companies = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(companies.value(0), "Asana, Inc.");
        let counts = batch
            .column(3)
            .as_any()
            .downcast_ref::<UInt64Array>()
            .unwrap();
        assert_eq!(counts.values(), &[10, 3]);
        assert!(batch.column(2).is_null(1));
    }

    #[test]
    fn test_csv_missing_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "positions.csv", "user_id,role_k150\nu1,eng\n");

        let err = read_table(&path, &positions_schema(&ColumnNames::default())).unwrap_err();
        match err {
            LoadError::MissingColumns { table, columns } => {
                assert_eq!(table, "positions");
                assert_eq!(
                    columns,
                    vec!["weight_v2", "prestige_v2", "ultimate_parent_rcid"]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_csv_unparseable_value_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "transitions.csv",
            "COMPANY,SOURCE_COMPANY,CATEGORY,N\nAsana,Google,eng,many\n",
        );

        let err = read_table(&path, &transitions_schema(&ColumnNames::default())).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }

    #[test]
    fn test_nulls_in_required_column_are_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "positions.csv",
            "user_id,role_k150,weight_v2,prestige_v2,ultimate_parent_rcid\nu1,eng,1.0,0.5,\n",
        );

        // Reading succeeds; the missing value is only rejected by the required-value check
        let schema = positions_schema(&ColumnNames::default());
        let batches = read_table(&path, &schema).unwrap();
        assert!(batches[0].column(4).is_null(0));

        let err = require_values(&batches[0], &schema).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
        assert!(err.to_string().contains("ultimate_parent_rcid"));
    }

    #[test]
    fn test_nullable_float_columns_accept_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "positions.csv",
            "user_id,role_k150,weight_v2,prestige_v2,ultimate_parent_rcid\nu1,eng,,0.5,7\nu2,eng,2.0,0.25,7\n",
        );

        let batches = read_table(&path, &positions_schema(&ColumnNames::default())).unwrap();
        let weights = batches[0]
            .column(2)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert!(weights.is_null(0));
        assert!((weights.value(1) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = read_table(
            Path::new("positions.xlsx"),
            &positions_schema(&ColumnNames::default()),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat { .. }));
    }
}
