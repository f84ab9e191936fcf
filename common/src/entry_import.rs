//! CSV parsing for bulk import.
//!
//! Known columns map onto [`EntryDraft`] fields (header match is
//! case-insensitive); every other column becomes an additional metadata field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    disease_entry::{AdditionalField, EntryDraft},
    error::ValidationErrors,
};

/// Body of `POST /api/disease/bulk/import`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkImportRequest {
    pub entries: Vec<EntryDraft>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportRowError {
    /// Line number in the file, header being line 1.
    pub line: usize,
    pub errors: ValidationErrors,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportError {
    #[error("could not read CSV: {0}")]
    Csv(String),

    #[error("missing required column \"{0}\"")]
    MissingColumn(&'static str),

    #[error("the file contains no data rows")]
    Empty,

    #[error("{} row(s) failed validation", .0.len())]
    InvalidRows(Vec<ImportRowError>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Column {
    Disease,
    Autoantibody,
    Autoantigen,
    Epitope,
    UniprotId,
    Type,
    Additional,
}

fn classify(header: &str) -> Column {
    let normalized = header.trim().to_ascii_lowercase().replace(['_', ' ', '-'], "");
    match normalized.as_str() {
        "disease" => Column::Disease,
        "autoantibody" => Column::Autoantibody,
        "autoantigen" => Column::Autoantigen,
        "epitope" => Column::Epitope,
        "uniprotid" | "uniprot" => Column::UniprotId,
        "type" => Column::Type,
        _ => Column::Additional,
    }
}

pub fn parse_entries_csv(text: &str) -> Result<Vec<EntryDraft>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(|e| ImportError::Csv(e.to_string()))?.clone();
    let columns = headers.iter().map(classify).collect::<Vec<_>>();
    for (required, name) in [(Column::Disease, "disease"), (Column::Autoantibody, "autoantibody"), (Column::Autoantigen, "autoantigen")] {
        if !columns.contains(&required) {
            return Err(ImportError::MissingColumn(name));
        }
    }

    let mut drafts = Vec::new();
    let mut row_errors = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ImportError::Csv(e.to_string()))?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        let mut draft = EntryDraft::default();
        for ((column, header), cell) in columns.iter().zip(headers.iter()).zip(record.iter()) {
            match column {
                Column::Disease => draft.disease = cell.to_string(),
                Column::Autoantibody => draft.autoantibody = cell.to_string(),
                Column::Autoantigen => draft.autoantigen = cell.to_string(),
                Column::Epitope => draft.epitope = cell.to_string(),
                Column::UniprotId => draft.uniprot_id = cell.to_string(),
                Column::Type => draft.entry_type = cell.to_string(),
                Column::Additional if !cell.is_empty() => draft.additional.push(AdditionalField::new(header, cell)),
                Column::Additional => {}
            }
        }
        match draft.validate() {
            Ok(valid) => drafts.push(valid),
            Err(errors) => row_errors.push(ImportRowError { line: index + 2, errors }),
        }
    }

    if !row_errors.is_empty() {
        return Err(ImportError::InvalidRows(row_errors));
    }
    if drafts.is_empty() {
        return Err(ImportError::Empty);
    }
    Ok(drafts)
}
