use clap::Parser;
use std::process::ExitCode;
use vmrest_control::cli::FoldersCli;
use vmrest_control::config::{self, Config};
use vmrest_control::prelude::Result;
use vmrest_control::services::folders::{self, FolderTask};
use vmrest_control::services::{self, ModuleResult};
use vmrest_control::telemetry;
use vmrest_control::vmrest::client::VmrestClient;
use vmrest_control::vmrest::request::FolderParams;

/// The main entry point for the shared folders command.
///
#[tokio::main]
async fn main() -> ExitCode {
    let cli = FoldersCli::parse();

    // Initialize logging.
    let level = telemetry::level_from_verbosity(cli.target.verbose);
    let subscriber = telemetry::get_subscriber(level, std::io::stderr);
    if let Err(error) = telemetry::init_subscriber(subscriber) {
        eprintln!("Logger setup failed: {error}");
    }
    tracing::debug!(target: "service", action = %cli.action, "Cli arguments parsed.");

    services::report(run(cli).await)
}

async fn run(cli: FoldersCli) -> Result<ModuleResult> {
    config::load_dotenv()?;
    let config = Config::load(cli.target.config.as_deref(), &cli.connection)?;
    let client = VmrestClient::from_config(&config);

    let task = FolderTask {
        target_vm: cli.target.target_vm,
        target_vm_name: cli.target.target_vm_name,
        action: cli.action,
        params: FolderParams {
            folder_name: cli.folder_name,
            folder_path: cli.folder_path,
            access: cli.access,
        },
    };
    folders::run(&client, task).await
}
