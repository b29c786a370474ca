use std::io::Write;

use super::domain::ScoreResult;

/// Column order for the downloadable results sheet.
pub const RESULT_COLUMNS: [&str; 8] = [
    "name",
    "role",
    "company",
    "industry",
    "location",
    "intent",
    "score",
    "reasoning",
];

pub fn write_results_csv<W: Write>(writer: W, results: &[ScoreResult]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(RESULT_COLUMNS)?;

    for result in results {
        let score = result.score.to_string();
        csv_writer.write_record([
            result.name.as_str(),
            result.role.as_str(),
            result.company.as_str(),
            result.industry.as_str(),
            result.location.as_str(),
            result.intent.label(),
            score.as_str(),
            result.reasoning.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn results_to_csv(results: &[ScoreResult]) -> Result<Vec<u8>, csv::Error> {
    let mut buffer = Vec::new();
    write_results_csv(&mut buffer, results)?;
    Ok(buffer)
}
