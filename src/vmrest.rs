pub mod client;
pub mod request;
pub mod types;

// -----------------------------------------------------------------------------

use crate::prelude::Result;
use crate::vmrest::request::ApiRequest;
use crate::vmrest::types::{Reply, VmSummary};
use async_trait::async_trait;

/// Operations the commands need from the vmrest service.
///
#[async_trait]
pub trait Vmrest: Send + Sync {
    /// Lists every VM registered in the product.
    async fn list_vms(&self) -> Result<Vec<VmSummary>>;
    /// Sends a routed request and returns the reply, whatever its status.
    async fn send(&self, request: ApiRequest) -> Result<Reply>;
}
