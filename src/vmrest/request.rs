use crate::prelude::{Error, Result};
use crate::vmrest::types::*;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Characters escaped when user input lands in a URL path segment.
///
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'\\')
    .add(b'^')
    .add(b'|')
    .add(b'[')
    .add(b']')
    .add(b'{')
    .add(b'}');

fn segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Payload of a vmrest request.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
    Text(String),
}

impl Body {
    fn json(payload: impl Serialize) -> Result<Self> {
        Ok(Self::Json(serde_json::to_value(payload)?))
    }
}

/// Fully routed vmrest request, relative to the service root.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Body,
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    fn new(method: Method, path: String, body: Body) -> Self {
        Self {
            method,
            path,
            body,
            timeout: None,
        }
    }

    /// Bounds the time the dispatcher waits for this request.
    ///
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// `GET /api/vms`.
    ///
    pub fn list_vms() -> Self {
        Self::new(Method::GET, "/api/vms".to_owned(), Body::Empty)
    }
}

// -----------------------------------------------------------------------------

/// Shared folder parameters as given by the caller.
///
#[derive(Debug, Clone, Default)]
pub struct FolderParams {
    pub folder_name: Option<String>,
    pub folder_path: Option<String>,
    pub access: Option<String>,
}

/// Shared folder operation with every parameter it needs checked, still
/// independent of the target VM.
///
#[derive(Debug, Clone, PartialEq)]
pub enum FolderOperation {
    Infos,
    Create(NewSharedFolder),
    Update {
        folder_name: String,
        update: SharedFolderUpdate,
    },
    Delete {
        folder_name: String,
    },
}

impl FolderOperation {
    /// Checks the parameters required by `action`.
    ///
    pub fn new(action: FolderAction, params: &FolderParams) -> Result<Self> {
        let flags = Access::from_param(params.access.as_deref()).flags();
        let folder_name = || {
            params
                .folder_name
                .clone()
                .ok_or(Error::MissingParameter("folder_name"))
        };
        let folder_path = || {
            params
                .folder_path
                .clone()
                .ok_or(Error::MissingParameter("folder_path"))
        };

        Ok(match action {
            FolderAction::Infos => Self::Infos,
            FolderAction::Create => Self::Create(NewSharedFolder {
                folder_id: folder_name()?,
                host_path: folder_path()?,
                flags,
            }),
            FolderAction::Update => Self::Update {
                folder_name: folder_name()?,
                update: SharedFolderUpdate {
                    host_path: folder_path()?,
                    flags,
                },
            },
            FolderAction::Delete => Self::Delete {
                folder_name: folder_name()?,
            },
        })
    }

    /// Routes the operation to the shared folders of `vm_id`.
    ///
    pub fn request(&self, vm_id: &str) -> Result<ApiRequest> {
        let folders = format!("/api/vms/{}/sharedfolders", segment(vm_id));

        Ok(match self {
            Self::Infos => ApiRequest::new(Method::GET, folders, Body::Empty),
            Self::Create(folder) => ApiRequest::new(Method::POST, folders, Body::json(folder)?),
            Self::Update {
                folder_name,
                update,
            } => ApiRequest::new(
                Method::PUT,
                format!("{}/{}", folders, segment(folder_name)),
                Body::json(update)?,
            ),
            Self::Delete { folder_name } => ApiRequest::new(
                Method::DELETE,
                format!("{}/{}", folders, segment(folder_name)),
                Body::json(VmIdPayload {
                    id: vm_id.to_owned(),
                })?,
            ),
        })
    }
}

/// Routes a shared folder action in one step.
///
pub fn folder_request(action: &str, vm_id: &str, params: &FolderParams) -> Result<ApiRequest> {
    FolderOperation::new(action.parse()?, params)?.request(vm_id)
}

/// Routes a power request: an empty state queries, anything else is sent
/// verbatim for vmrest to accept or reject.
///
pub fn power_request(state: &str, vm_id: &str) -> ApiRequest {
    let path = format!("/api/vms/{}/power", segment(vm_id));
    if state.is_empty() {
        ApiRequest::new(Method::GET, path, Body::Empty)
    } else {
        ApiRequest::new(Method::PUT, path, Body::Text(state.to_owned()))
    }
}
