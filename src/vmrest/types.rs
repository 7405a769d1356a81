use crate::prelude::{Error, Result};
use derive_more::Display;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::str::FromStr;

/// Media type vmrest expects in both `Accept` and `Content-Type`.
///
pub const VMREST_MEDIA_TYPE: &str = "application/vnd.vmware.vmw.rest-v1+json";

/// Power states vmrest accepts on `PUT /api/vms/{id}/power`.
///
pub const POWER_STATES: [&str; 6] = ["on", "off", "shutdown", "suspend", "pause", "unpause"];

/// One entry of the `GET /api/vms` listing.
///
/// # Fields
///
/// * `id`: vmrest identifier of the virtual machine.
/// * `path`: Location of the VM descriptor (`.vmx`) file on the host.
///
/// # Example JSON
///
/// ```json
/// { "id": "42", "path": "C:\\VMs\\odbg110\\odbg110.vmx" }
/// ```
///
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VmSummary {
    pub id: String,
    pub path: PathBuf,
}

// -----------------------------------------------------------------------------

/// Access granted to the guest on a shared folder.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Access {
    #[display("r")]
    ReadOnly,
    #[display("rw")]
    ReadWrite,
}

impl Access {
    /// Only `rw` grants write access, anything else (including nothing) is
    /// read-only.
    ///
    pub fn from_param(access: Option<&str>) -> Self {
        match access {
            Some("rw") => Self::ReadWrite,
            _ => Self::ReadOnly,
        }
    }

    /// Value of the `flags` field understood by vmrest.
    ///
    pub fn flags(self) -> u32 {
        match self {
            Self::ReadOnly => 0,
            Self::ReadWrite => 4,
        }
    }
}

/// Body of `POST /api/vms/{id}/sharedfolders`.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSharedFolder {
    pub folder_id: String,
    pub host_path: String,
    pub flags: u32,
}

/// Body of `PUT /api/vms/{id}/sharedfolders/{folder}`.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedFolderUpdate {
    pub host_path: String,
    pub flags: u32,
}

/// Body of `DELETE /api/vms/{id}/sharedfolders/{folder}`.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VmIdPayload {
    pub id: String,
}

/// Shared folder operation requested on the command line.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FolderAction {
    #[display("infos")]
    Infos,
    #[display("create")]
    Create,
    #[display("update")]
    Update,
    #[display("delete")]
    Delete,
}

impl FromStr for FolderAction {
    type Err = Error;

    fn from_str(action: &str) -> Result<Self> {
        match action {
            "infos" => Ok(Self::Infos),
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(Error::NotSupported(format!("unsupported action '{other}'"))),
        }
    }
}

// -----------------------------------------------------------------------------

/// Raw answer of vmrest, whatever its status.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    /// Decodes the body as JSON when possible, keeps it as a string otherwise.
    /// An empty body becomes an empty string.
    ///
    pub fn json_or_text(&self) -> Value {
        if self.body.trim().is_empty() {
            return Value::String(String::new());
        }
        serde_json::from_str(&self.body).unwrap_or_else(|_error| Value::String(self.body.clone()))
    }
}
