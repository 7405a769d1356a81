use crate::prelude::Result;
use crate::services::{self, ModuleResult};
use crate::vmrest::Vmrest;
use crate::vmrest::request::{FolderOperation, FolderParams};
use crate::vmrest::types::FolderAction;

/// Shared folder command as requested by the caller.
///
#[derive(Debug, Clone, Default)]
pub struct FolderTask {
    pub target_vm: Option<String>,
    pub target_vm_name: String,
    pub action: String,
    pub params: FolderParams,
}

/// Runs a shared folder command.
///
/// The action and its parameters are checked before anything is sent. The
/// reply is relayed whatever its status: the body lands in `msg`, decoded
/// as JSON when possible.
///
/// # Arguments
///
/// * `vmrest`: Client for the vmrest API.
/// * `task`: Requested command.
///
#[tracing::instrument(level = "debug", target = "service", skip(vmrest))]
pub async fn run(vmrest: &dyn Vmrest, task: FolderTask) -> Result<ModuleResult> {
    let action: FolderAction = task.action.parse()?;
    let operation = FolderOperation::new(action, &task.params)?;

    let vm_id = services::resolve_target(vmrest, task.target_vm, &task.target_vm_name).await?;
    let reply = vmrest.send(operation.request(&vm_id)?).await?;

    if reply.status.is_success() {
        tracing::info!(target: "service", %action, %vm_id, status = %reply.status, "Shared folders request done");
    } else {
        tracing::warn!(target: "service", %action, %vm_id, status = %reply.status, body = %reply.body, "vmrest rejected the shared folders request");
    }

    Ok(ModuleResult::unchanged(reply.json_or_text()))
}
