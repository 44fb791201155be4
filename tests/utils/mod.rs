//! Shared fixtures for integration tests
//!
//! Tables are written to a temporary directory as CSV or Parquet files and a
//! configuration pointing at them is returned alongside the directory guard.

#![allow(dead_code)]

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use prestige_dash::{CompanyScope, DashboardConfig};
use tempfile::TempDir;

pub const COMPANY: &str = "Asana, Inc.";
pub const PARENT_ID: i64 = 381_043;

pub const POSITIONS_CSV: &str = "\
user_id,role_k150,weight_v2,prestige_v2,ultimate_parent_rcid
u1,eng,1.0,0.8,381043
u2,eng,1.0,0.2,381043
u3,sales,2.0,0.4,381043
u4,legal,1.0,0.9,381043
u5,eng,3.0,0.1,555
";

pub const TRANSITIONS_CSV: &str = "\
COMPANY,SOURCE_COMPANY,CATEGORY,N
\"Asana, Inc.\",Google,eng,10
\"Asana, Inc.\",Meta,eng,30
\"Asana, Inc.\",Meta,eng,5
\"Asana, Inc.\",Oracle,sales,7
\"Asana, Inc.\",Dropbox,legal,2
Notion,Google,eng,99
";

pub const EDUCATION_CSV: &str = "\
user_id,parent_school_name,education_id
u1,UNIVERSITY OF TEXAS,e1
u1,UNIVERSITY OF TEXAS,e2
u2,STANFORD UNIVERSITY,e3
u3,STANFORD UNIVERSITY,e4
u4,COLLEGE OF WILLIAM AND MARY,e5
u4,,e6
u5,HARVARD UNIVERSITY,e7
u2,UNIVERSITY OF TEXAS,
";

pub const CURVE_CSV: &str = "\
PRESTIGE,PERCENTILE
0.1,0.1
0.3,0.3
0.5,0.5
0.7,0.7
0.9,0.9
";

/// Configuration for the fixture company reading from `dir`
pub fn config_for(dir: &Path, ext: &str) -> DashboardConfig {
    let mut config = DashboardConfig {
        company: CompanyScope {
            name: COMPANY.to_string(),
            parent_id: PARENT_ID,
        },
        min_role_count: 2,
        ..DashboardConfig::default()
    };
    config.tables.data_dir = dir.to_path_buf();
    config.tables.positions = PathBuf::from(format!("positions.{ext}"));
    config.tables.transitions = PathBuf::from(format!("transitions.{ext}"));
    config.tables.education = PathBuf::from(format!("education.{ext}"));
    config.tables.prestige_curve = PathBuf::from(format!("curve.{ext}"));
    config
}

/// Write the fixture tables as CSV files
pub fn csv_fixture() -> (TempDir, DashboardConfig) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("positions.csv"), POSITIONS_CSV).unwrap();
    fs::write(dir.path().join("transitions.csv"), TRANSITIONS_CSV).unwrap();
    fs::write(dir.path().join("education.csv"), EDUCATION_CSV).unwrap();
    fs::write(dir.path().join("curve.csv"), CURVE_CSV).unwrap();
    let config = config_for(dir.path(), "csv");
    (dir, config)
}

fn strings(values: &[Option<&str>]) -> ArrayRef {
    Arc::new(StringArray::from(values.to_vec()))
}

fn write_parquet(path: &Path, columns: Vec<(&str, ArrayRef)>) {
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
        .collect();
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(
        Arc::clone(&schema),
        columns.into_iter().map(|(_, array)| array).collect(),
    )
    .unwrap();

    let file = File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

/// Write the same fixture tables as Parquet files
///
/// Transition counts are written as 32-bit signed integers so the loader's
/// casting is exercised.
pub fn parquet_fixture() -> (TempDir, DashboardConfig) {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();

    write_parquet(
        &d.join("positions.parquet"),
        vec![
            ("user_id", strings(&[Some("u1"), Some("u2"), Some("u3"), Some("u4"), Some("u5")])),
            ("role_k150", strings(&[Some("eng"), Some("eng"), Some("sales"), Some("legal"), Some("eng")])),
            ("weight_v2", Arc::new(Float64Array::from(vec![1.0, 1.0, 2.0, 1.0, 3.0]))),
            ("prestige_v2", Arc::new(Float64Array::from(vec![0.8, 0.2, 0.4, 0.9, 0.1]))),
            (
                "ultimate_parent_rcid",
                Arc::new(Int64Array::from(vec![PARENT_ID, PARENT_ID, PARENT_ID, PARENT_ID, 555])),
            ),
        ],
    );

    let company = Some(COMPANY);
    write_parquet(
        &d.join("transitions.parquet"),
        vec![
            ("COMPANY", strings(&[company, company, company, company, company, Some("Notion")])),
            (
                "SOURCE_COMPANY",
                strings(&[Some("Google"), Some("Meta"), Some("Meta"), Some("Oracle"), Some("Dropbox"), Some("Google")]),
            ),
            (
                "CATEGORY",
                strings(&[Some("eng"), Some("eng"), Some("eng"), Some("sales"), Some("legal"), Some("eng")]),
            ),
            ("N", Arc::new(Int32Array::from(vec![10, 30, 5, 7, 2, 99]))),
        ],
    );

    write_parquet(
        &d.join("education.parquet"),
        vec![
            (
                "user_id",
                strings(&[Some("u1"), Some("u1"), Some("u2"), Some("u3"), Some("u4"), Some("u4"), Some("u5"), Some("u2")]),
            ),
            (
                "parent_school_name",
                strings(&[
                    Some("UNIVERSITY OF TEXAS"),
                    Some("UNIVERSITY OF TEXAS"),
                    Some("STANFORD UNIVERSITY"),
                    Some("STANFORD UNIVERSITY"),
                    Some("COLLEGE OF WILLIAM AND MARY"),
                    None,
                    Some("HARVARD UNIVERSITY"),
                    Some("UNIVERSITY OF TEXAS"),
                ]),
            ),
            (
                "education_id",
                strings(&[Some("e1"), Some("e2"), Some("e3"), Some("e4"), Some("e5"), Some("e6"), Some("e7"), None]),
            ),
        ],
    );

    write_parquet(
        &d.join("curve.parquet"),
        vec![
            ("PRESTIGE", Arc::new(Float64Array::from(vec![0.1, 0.3, 0.5, 0.7, 0.9]))),
            ("PERCENTILE", Arc::new(Float64Array::from(vec![0.1, 0.3, 0.5, 0.7, 0.9]))),
        ],
    );

    let config = config_for(d, "parquet");
    (dir, config)
}

/// Directory holding the bundled sample tables
pub fn sample_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}
