use std::collections::BTreeSet;

use csv::{ReaderBuilder, Terminator, WriterBuilder};

use crate::domain::entities::table::Table;
use crate::usecase::error::ReviewError;
use crate::usecase::ports::codec::TableCodec;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Comma-separated UTF-8 text with a header row. A leading BOM is accepted on
/// read; writing never adds one.
#[derive(Debug, Clone, Copy)]
pub struct CsvCodec {
    pub delimiter: u8,
}

impl Default for CsvCodec {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

fn parse_error(err: impl std::fmt::Display) -> ReviewError {
    ReviewError::Parse(err.to_string())
}

impl TableCodec for CsvCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Table, ReviewError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        std::str::from_utf8(bytes).map_err(|err| parse_error(format!("input is not UTF-8: {err}")))?;

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(bytes);
        let headers = reader.headers().map_err(parse_error)?.clone();
        if headers.is_empty() || headers.iter().all(|name| name.trim().is_empty()) {
            return Err(parse_error("csv header is required"));
        }

        let columns: Vec<String> = headers.iter().map(str::to_string).collect();
        let mut seen = BTreeSet::new();
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(parse_error(format!("duplicate column: {name}")));
            }
        }

        let header_len = columns.len();
        let mut rows = Vec::new();
        for (row_idx, record) in reader.records().enumerate() {
            let record = record.map_err(parse_error)?;
            if record.len() > header_len {
                return Err(parse_error(format!(
                    "record {} has {} fields, header has {header_len}",
                    row_idx + 1,
                    record.len()
                )));
            }
            rows.push(
                (0..header_len)
                    .map(|col_idx| record.get(col_idx).unwrap_or("").to_string())
                    .collect(),
            );
        }

        Ok(Table::new(columns, rows))
    }

    fn encode(&self, table: &Table) -> Result<Vec<u8>, ReviewError> {
        let encode_error = |err: csv::Error| ReviewError::Encode(err.to_string());
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(&table.columns).map_err(encode_error)?;
        for row in &table.rows {
            writer.write_record(row).map_err(encode_error)?;
        }
        writer
            .into_inner()
            .map_err(|err| ReviewError::Encode(err.to_string()))
    }
}
