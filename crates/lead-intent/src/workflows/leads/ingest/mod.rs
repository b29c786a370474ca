mod decode;
mod parser;

use super::domain::Lead;
use std::io::Read;
use std::path::Path;

/// Columns every lead upload must carry, in export order.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "name",
    "role",
    "company",
    "industry",
    "location",
    "linkedin_bio",
];

#[derive(Debug)]
pub enum LeadImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(&'static str),
    NoLeads,
}

impl std::fmt::Display for LeadImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadImportError::Io(err) => write!(f, "failed to read lead upload: {}", err),
            LeadImportError::Csv(err) => write!(f, "invalid lead CSV data: {}", err),
            LeadImportError::MissingColumn(column) => write!(f, "Missing column: {}", column),
            LeadImportError::NoLeads => write!(f, "No leads found in CSV."),
        }
    }
}

impl std::error::Error for LeadImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeadImportError::Io(err) => Some(err),
            LeadImportError::Csv(err) => Some(err),
            LeadImportError::MissingColumn(_) | LeadImportError::NoLeads => None,
        }
    }
}

impl From<std::io::Error> for LeadImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LeadImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct LeadCsvImporter;

impl LeadCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Lead>, LeadImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Vec<Lead>, LeadImportError> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;
        Self::from_bytes(&raw)
    }

    /// Parse an uploaded file body. UTF-8 (with or without BOM) is preferred;
    /// anything else is read as Latin-1.
    pub fn from_bytes(raw: &[u8]) -> Result<Vec<Lead>, LeadImportError> {
        let text = decode::decode_upload(raw);
        let leads = parser::parse_leads(&text)?;
        if leads.is_empty() {
            return Err(LeadImportError::NoLeads);
        }
        Ok(leads)
    }
}
