pub mod cli;
pub mod config;
pub mod error;
pub mod resolver;
pub mod services;
pub mod telemetry;
pub mod vmrest;

pub mod prelude {
    pub use crate::error::{Error, Result, VmrestError};
    pub use crate::vmrest::Vmrest;
}
