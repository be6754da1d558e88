use crate::demo::{run_demo, run_options, run_rank, DemoArgs, RankArgs};
use clap::{Parser, Subcommand};
use internship_journey::config::AppConfig;
use internship_journey::error::AppError;
use internship_journey::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "Internship Journey",
    about = "Walk through the internship discovery and application journey from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scripted applicant journey from login to application status (default command)
    Demo(DemoArgs),
    /// Print the candidate catalog ranked by a filter and sort key
    Rank(RankArgs),
    /// Print the onboarding option lists
    Options,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, "configuration loaded");

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Demo(args) => run_demo(args, &config.journey).await,
        Command::Rank(args) => run_rank(args, &config.journey),
        Command::Options => {
            run_options();
            Ok(())
        }
    }
}
