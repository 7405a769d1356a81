pub mod folders;
pub mod power;

// -----------------------------------------------------------------------------

use crate::prelude::{Error, Result};
use crate::resolver;
use crate::vmrest::Vmrest;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::process::ExitCode;

/// Result record of a command.
///
/// `changed` is never computed from the reply and always reports `false`,
/// even after a successful create, update, delete or power change.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleResult {
    pub changed: bool,
    pub msg: Value,
}

impl ModuleResult {
    pub fn unchanged(msg: Value) -> Self {
        Self {
            changed: false,
            msg,
        }
    }
}

/// Record written in place of a [`ModuleResult`] when a command fails.
///
#[derive(Debug, Serialize)]
struct ModuleFailure {
    failed: bool,
    changed: bool,
    msg: String,
}

/// Determines the VM id every request of the invocation is sent to.
///
/// An empty `target_vm_name` skips the lookup entirely. A lookup without
/// any match leaves `target_vm` untouched.
///
/// # Arguments
///
/// * `vmrest`: Client used for the VM listing.
/// * `target_vm`: VM id given by the caller.
/// * `target_vm_name`: Display name given by the caller.
///
pub async fn resolve_target(
    vmrest: &dyn Vmrest,
    target_vm: Option<String>,
    target_vm_name: &str,
) -> Result<String> {
    let mut target_vm = target_vm;
    if !target_vm_name.is_empty() {
        match resolver::resolve(vmrest, target_vm_name).await? {
            Some(id) => target_vm = Some(id),
            None => {
                tracing::warn!(target: "service", target_vm_name, ?target_vm, "No VM with this display name, keeping target_vm");
            }
        }
    }
    target_vm.ok_or(Error::MissingParameter("target_vm"))
}

/// Writes the outcome of a command to `out` as a single JSON document.
///
pub fn write_report(out: &mut impl Write, result: &Result<ModuleResult>) -> Result<()> {
    match result {
        Ok(record) => serde_json::to_writer(&mut *out, record)?,
        Err(error) => serde_json::to_writer(
            &mut *out,
            &ModuleFailure {
                failed: true,
                changed: false,
                msg: error.to_string(),
            },
        )?,
    }
    writeln!(out)?;
    Ok(())
}

/// Relays the outcome of a command on stdout and maps it to an exit code.
///
pub fn report(result: Result<ModuleResult>) -> ExitCode {
    if let Err(error) = &result {
        tracing::error!(target: "service", %error, "Command failed");
    }
    if let Err(error) = write_report(&mut std::io::stdout().lock(), &result) {
        tracing::error!(target: "service", %error, "Can't write the result");
        return ExitCode::FAILURE;
    }

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
