mod cli;
mod demo;
mod infra;

use internship_journey::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
