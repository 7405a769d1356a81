//! Display name to VM id resolution.
//!
//! vmrest lists VMs by id and descriptor path only, so the display name has
//! to be read from each descriptor (`.vmx`) file on the host.
//!
//! The scan keeps the quirks of the automation it replaces: every VM is
//! visited, the **last** match wins, and a descriptor without a
//! `displayName` line inherits the name parsed from the previous one.

use crate::prelude::{Error, Result};
use crate::vmrest::Vmrest;
use crate::vmrest::types::VmSummary;
use std::path::Path;

const DISPLAY_NAME_KEY: &str = "displayName";

/// VM id paired with its lowercased display name.
///
#[derive(Debug, Clone, PartialEq)]
pub struct NamedVm {
    pub id: String,
    pub name: String,
}

/// Extracts the display name from descriptor contents.
///
/// The value is the text between the first two double quotes of the last
/// line starting with `displayName`.
///
/// # Returns
///
/// `None` when no line carries the key.
///
pub fn parse_display_name(path: &Path, contents: &str) -> Result<Option<String>> {
    let mut display_name = None;
    for line in contents.lines() {
        if !line.starts_with(DISPLAY_NAME_KEY) {
            continue;
        }
        let value = line
            .split('"')
            .nth(1)
            .ok_or_else(|| Error::descriptor(path, format!("unquoted value in '{line}'")))?;
        display_name = Some(value.to_owned());
    }
    Ok(display_name)
}

/// Reads the descriptor at `path` and extracts its display name.
///
pub async fn read_display_name(path: &Path) -> Result<Option<String>> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|error| Error::descriptor(path, error))?;
    parse_display_name(path, &String::from_utf8_lossy(&bytes))
}

/// Reads the display name of every listed VM, in listing order.
///
pub async fn discover_names(vms: &[VmSummary]) -> Result<Vec<NamedVm>> {
    let mut named = Vec::with_capacity(vms.len());
    let mut current_name: Option<String> = None;

    for vm in vms {
        match read_display_name(&vm.path).await? {
            Some(name) => current_name = Some(name),
            None => {
                tracing::warn!(target: "resolver", path = %vm.path.display(), "Descriptor has no display name");
            }
        }
        let name = current_name
            .as_deref()
            .ok_or_else(|| Error::descriptor(&vm.path, "no display name"))?;
        named.push(NamedVm {
            id: vm.id.clone(),
            name: name.to_lowercase(),
        });
    }

    Ok(named)
}

/// Picks the id of the last VM whose display name equals `name`, ignoring
/// case.
///
pub fn match_name(named: &[NamedVm], name: &str) -> Option<String> {
    let wanted = name.to_lowercase();
    named
        .iter()
        .rfind(|vm| vm.name == wanted)
        .map(|vm| vm.id.clone())
}

/// Resolves a display name to a VM id.
///
/// # Returns
///
/// `None` when no VM carries that name.
///
#[tracing::instrument(level = "debug", target = "resolver", skip(vmrest))]
pub async fn resolve(vmrest: &dyn Vmrest, name: &str) -> Result<Option<String>> {
    let vms = vmrest.list_vms().await?;
    let named = discover_names(&vms).await?;
    let id = match_name(&named, name);
    tracing::debug!(target: "resolver", ?id, candidates = named.len(), "Name lookup done");
    Ok(id)
}
