mod analyze;
mod cli;
mod infra;
mod routes;
mod server;

use wastewise::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
