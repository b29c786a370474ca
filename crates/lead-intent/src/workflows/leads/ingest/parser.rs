use super::{LeadImportError, REQUIRED_COLUMNS};
use crate::workflows::leads::domain::Lead;

pub(crate) fn parse_leads(text: &str) -> Result<Vec<Lead>, LeadImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = csv_reader.headers()?.clone();
    let mut positions = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|header| header == column)
            .ok_or(LeadImportError::MissingColumn(column))?;
    }

    let mut leads = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let cell = |index: usize| record.get(positions[index]).unwrap_or_default().to_string();

        leads.push(Lead {
            name: cell(0),
            role: cell(1),
            company: cell(2),
            industry: cell(3),
            location: cell(4),
            linkedin_bio: cell(5),
        });
    }

    Ok(leads)
}
