use std::path::PathBuf;

/// Connection flags shared by both commands.
///
/// Every flag is optional here; unset flags fall back to the settings file,
/// the `VMREST__*` environment and finally the built-in defaults.
///
#[derive(Debug, Default, Clone, clap::Args)]
pub struct ConnectionArgs {
    #[arg(long, help = "vmrest API username")]
    pub username: Option<String>,
    #[arg(long, help = "vmrest API password")]
    pub password: Option<String>,
    #[arg(long, help = "vmrest API URL [default: http://127.0.0.1]")]
    pub api_url: Option<String>,
    #[arg(long, help = "vmrest API port [default: 8697]")]
    pub api_port: Option<u16>,
    #[arg(long, help = "Validate the certificate of an HTTPS connection")]
    pub validate_certs: Option<bool>,
    #[arg(skip)]
    pub timeout: Option<u32>,
}

/// Common invocation flags: settings file, verbosity and VM selection.
///
#[derive(Debug, Clone, clap::Args)]
pub struct TargetArgs {
    #[arg(long, help = "Settings file (yaml, toml, json...)", env = "VMREST_CONFIG")]
    pub config: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,
    #[arg(long, help = "Id of the target VM")]
    pub target_vm: Option<String>,
    #[arg(
        long,
        default_value = "",
        help = "Display name of the target VM, looked up in the VM descriptors"
    )]
    pub target_vm_name: String,
}

#[derive(Debug, clap::Parser)]
#[command(
    name = "vmrest-folders",
    version,
    about = "Manage VMware Workstation shared folders through vmrest"
)]
pub struct FoldersCli {
    #[command(flatten)]
    pub target: TargetArgs,
    #[command(flatten)]
    pub connection: ConnectionArgs,
    #[arg(long, help = "One of: infos, create, update, delete")]
    pub action: String,
    #[arg(long, help = "Name of the shared folder")]
    pub folder_name: Option<String>,
    #[arg(long, help = "Host path of the shared folder")]
    pub folder_path: Option<String>,
    #[arg(long, help = "Access of the VM to the folder: r or rw [default: r]")]
    pub access: Option<String>,
}

#[derive(Debug, clap::Parser)]
#[command(
    name = "vmrest-power",
    version,
    about = "Query or change the power state of a VMware Workstation VM"
)]
pub struct PowerCli {
    #[command(flatten)]
    pub target: TargetArgs,
    #[command(flatten)]
    pub connection: ConnectionArgs,
    #[arg(
        long,
        default_value = "",
        help = "on, off, shutdown, suspend, pause or unpause; empty queries the state"
    )]
    pub state: String,
    #[arg(long, help = "Timeout in seconds for the power request [default: 30]")]
    pub timeout: Option<u32>,
}

impl PowerCli {
    /// Connection flags, with the power request timeout folded in.
    ///
    pub fn connection(&self) -> ConnectionArgs {
        ConnectionArgs {
            timeout: self.timeout,
            ..self.connection.clone()
        }
    }
}
