//! Schema and data file loaders.
//!
//! Schemas are JSON arrays of column records:
//!
//! ```json
//! [
//!   { "Name": "age",   "Type": 0 },
//!   { "Name": "color", "Type": 1, "Values": ["red", "green", "blue"] },
//!   { "Name": "id",    "Type": 2 },
//!   { "Name": "score", "Type": 0 }
//! ]
//! ```
//!
//! Data files are delimited text, one row per line, fields aligned with the
//! schema columns.

use crate::config::{CsvConfig, EncoderConfig};
use crate::dataset::EncodedDataset;
use crate::error::{LoadError, SchemaError};
use crate::schema::{ColumnKind, SchemaColumn, SchemaDefinition};
use crate::table::{RawRow, RawTable};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::info;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One column as written in a schema file, before the kind code is resolved.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RawColumnRecord {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Type", alias = "type")]
    pub kind: i64,
    #[serde(rename = "Values", alias = "values", default)]
    pub values: Vec<String>,
}

impl RawColumnRecord {
    /// Resolve the kind code into a typed column.
    pub fn resolve(self) -> Result<SchemaColumn, SchemaError> {
        let kind = ColumnKind::from_code(&self.name, self.kind, self.values)?;
        Ok(SchemaColumn {
            name: self.name,
            kind,
        })
    }
}

/// Parse and resolve a JSON schema.
pub fn load_schema<R: Read>(reader: R) -> Result<SchemaDefinition, LoadError> {
    let records: Vec<RawColumnRecord> = serde_json::from_reader(reader)?;
    let columns = records
        .into_iter()
        .map(RawColumnRecord::resolve)
        .collect::<Result<Vec<_>, _>>()?;
    let schema = SchemaDefinition::new(columns)?;
    info!(
        "resolved schema: {} columns, {} input slots",
        schema.len(),
        schema.input_width()
    );
    Ok(schema)
}

/// Read delimited rows for `schema`.
///
/// Blank lines are skipped. Records with fewer fields than the schema has
/// columns are dropped and counted in [`RawTable::dropped`].
pub fn load_table<R: Read>(
    reader: R,
    schema: &SchemaDefinition,
    csv: &CsvConfig,
) -> Result<RawTable, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(csv.has_headers)
        .delimiter(csv.delimiter)
        .flexible(true)
        .trim(if csv.trim { Trim::All } else { Trim::None })
        .from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }
        records.push(record.iter().map(str::to_string).collect::<RawRow>());
    }

    let table = RawTable::from_records(records, schema.len());
    info!("loaded {} records", table.len());
    Ok(table)
}

/// Load a schema file and a data file into a dataset.
pub fn load_dataset<P, Q>(
    schema_path: P,
    data_path: Q,
    config: &EncoderConfig,
) -> Result<EncodedDataset, LoadError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let schema = load_schema(BufReader::new(File::open(schema_path)?))?;
    let table = load_table(BufReader::new(File::open(data_path)?), &schema, &config.csv)?;
    Ok(EncodedDataset::new(schema, table, config.clone()))
}

// Whitespace-only lines survive the reader as a single empty field.
fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}
