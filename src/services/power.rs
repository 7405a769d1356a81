use crate::prelude::{Error, Result, VmrestError};
use crate::services::{self, ModuleResult};
use crate::vmrest::Vmrest;
use crate::vmrest::request;
use crate::vmrest::types::POWER_STATES;
use std::time::Duration;

/// Power command as requested by the caller.
///
/// An empty `state` only queries the current power state.
///
#[derive(Debug, Clone)]
pub struct PowerTask {
    pub target_vm: Option<String>,
    pub target_vm_name: String,
    pub state: String,
    pub timeout: Duration,
}

/// Runs a power command.
///
/// Unlike shared folders, a non-success status fails the command, and the
/// reply body must be JSON.
///
#[tracing::instrument(level = "debug", target = "service", skip(vmrest))]
pub async fn run(vmrest: &dyn Vmrest, task: PowerTask) -> Result<ModuleResult> {
    let vm_id = services::resolve_target(vmrest, task.target_vm, &task.target_vm_name).await?;

    if !task.state.is_empty() && !POWER_STATES.contains(&task.state.as_str()) {
        tracing::warn!(target: "service", state = %task.state, "Unknown power state, vmrest will decide");
    }

    let request = request::power_request(&task.state, &vm_id).with_timeout(task.timeout);
    let reply = vmrest.send(request).await?;
    if !reply.status.is_success() {
        return Err(Error::Vmrest(VmrestError::Power, reply.status, reply.body));
    }
    tracing::info!(target: "service", %vm_id, state = %task.state, "Power request done");

    Ok(ModuleResult::unchanged(serde_json::from_str(&reply.body)?))
}
