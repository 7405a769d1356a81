use crate::config::{Config, Credentials, DEFAULT_REQUEST_TIMEOUT_SEC};
use crate::prelude::{Error, Result, VmrestError};
use crate::vmrest::Vmrest;
use crate::vmrest::request::{ApiRequest, Body};
use crate::vmrest::types::{Reply, VMREST_MEDIA_TYPE, VmSummary};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tokio::sync::OnceCell;

/// Builds the value of a Basic `Authorization` header.
///
pub fn basic_auth(credentials: &Credentials) -> SecretString {
    let pair = format!(
        "{}:{}",
        credentials.username,
        credentials.password.expose_secret()
    );
    format!("Basic {}", STANDARD.encode(pair)).into()
}

/// Concrete implementation of the `Vmrest` trait using `reqwest` crate.
///
/// Holds everything one invocation needs to talk to vmrest: the service
/// root, the pre-computed authorization header, the TLS policy and the
/// timeout of requests that do not set their own.
///
pub struct VmrestClient {
    client: OnceCell<Client>,
    url: String,
    auth_header: SecretString,
    validate_certs: bool,
    default_timeout: Duration,
}

impl VmrestClient {
    /// Creates a new instance of the vmrest client.
    ///
    /// # Arguments
    ///
    /// * `url`: Service root, `scheme://host:port`.
    /// * `credentials`: vmrest account.
    /// * `validate_certs`: Whether HTTPS certificates must be valid.
    ///
    pub fn new(url: String, credentials: &Credentials, validate_certs: bool) -> Self {
        Self {
            client: OnceCell::new(),
            url,
            auth_header: basic_auth(credentials),
            validate_certs,
            default_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SEC),
        }
    }

    /// Replaces the timeout of requests without one of their own.
    ///
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Creates a client from the loaded configuration.
    ///
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api.base_url(),
            &config.credentials,
            config.api.validate_certs,
        )
    }

    /// Lazily initializes and returns a reference to the `reqwest::Client`.
    ///
    /// The client is built on the first call with the authorization and
    /// vmrest media type headers set as defaults.
    ///
    async fn get_client(&self) -> Result<&Client> {
        self.client
            .get_or_try_init(|| async {
                let mut auth_header = HeaderValue::from_str(self.auth_header.expose_secret())?;
                auth_header.set_sensitive(true);

                let mut headers = HeaderMap::new();
                headers.insert(AUTHORIZATION, auth_header);
                headers.insert(ACCEPT, HeaderValue::from_static(VMREST_MEDIA_TYPE));
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(VMREST_MEDIA_TYPE));

                Client::builder()
                    .default_headers(headers)
                    .danger_accept_invalid_certs(!self.validate_certs)
                    .timeout(self.default_timeout)
                    .use_rustls_tls()
                    .build()
                    .map_err(Error::from)
            })
            .await
    }
}

#[async_trait]
impl Vmrest for VmrestClient {
    async fn list_vms(&self) -> Result<Vec<VmSummary>> {
        let reply = self.send(ApiRequest::list_vms()).await?;
        if !reply.status.is_success() {
            return Err(Error::Vmrest(VmrestError::List, reply.status, reply.body));
        }

        let vms: Vec<VmSummary> = serde_json::from_str(&reply.body)?;
        tracing::debug!(target: "vmrest", count = vms.len(), "VM list received");
        Ok(vms)
    }

    async fn send(&self, request: ApiRequest) -> Result<Reply> {
        let client = self.get_client().await?;
        let url = format!("{}{}", self.url, request.path);
        tracing::debug!(target: "vmrest", method = %request.method, %url, "Sending request");

        let mut builder = client.request(request.method, &url);
        builder = match request.body {
            Body::Empty => builder,
            Body::Json(payload) => builder.body(serde_json::to_string(&payload)?),
            Body::Text(text) => builder.body(text),
        };
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|error| Error::Communication(error.to_string()))?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(target: "vmrest", %status, "Reply received");

        Ok(Reply { status, body })
    }
}
