use clap::Parser;
use std::process::ExitCode;
use vmrest_control::cli::PowerCli;
use vmrest_control::config::{self, Config};
use vmrest_control::prelude::Result;
use vmrest_control::services::power::{self, PowerTask};
use vmrest_control::services::{self, ModuleResult};
use vmrest_control::telemetry;
use vmrest_control::vmrest::client::VmrestClient;

/// The main entry point for the power command.
///
#[tokio::main]
async fn main() -> ExitCode {
    let cli = PowerCli::parse();

    // Initialize logging.
    let level = telemetry::level_from_verbosity(cli.target.verbose);
    let subscriber = telemetry::get_subscriber(level, std::io::stderr);
    if let Err(error) = telemetry::init_subscriber(subscriber) {
        eprintln!("Logger setup failed: {error}");
    }
    tracing::debug!(target: "service", state = %cli.state, "Cli arguments parsed.");

    services::report(run(cli).await)
}

async fn run(cli: PowerCli) -> Result<ModuleResult> {
    config::load_dotenv()?;
    let config = Config::load(cli.target.config.as_deref(), &cli.connection())?;
    let client = VmrestClient::from_config(&config);

    let task = PowerTask {
        target_vm: cli.target.target_vm,
        target_vm_name: cli.target.target_vm_name,
        state: cli.state,
        timeout: config.api.timeout(),
    };
    power::run(&client, task).await
}
