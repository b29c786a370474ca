mod cli;
mod infra;
mod routes;
mod scoring;
mod server;

use lead_intent::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
