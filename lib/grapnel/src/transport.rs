//! HTTP transport implementation using hyper-util.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};

use grapnel_core::{Error, Result, Transport, TransportRequest, TransportResponse};

/// Configuration for [`HyperTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Maximum idle connections per host.
    pub pool_idle_per_host: usize,
    /// Idle connection timeout.
    pub pool_idle_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl TransportConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> TransportConfigBuilder {
        TransportConfigBuilder::default()
    }
}

/// Builder for [`TransportConfig`].
#[derive(Debug, Clone, Default)]
pub struct TransportConfigBuilder {
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
}

impl TransportConfigBuilder {
    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> TransportConfig {
        let defaults = TransportConfig::default();
        TransportConfig {
            pool_idle_per_host: self
                .pool_idle_per_host
                .unwrap_or(defaults.pool_idle_per_host),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(defaults.pool_idle_timeout),
        }
    }
}

/// Create an HTTPS connector with rustls.
///
/// Supports both HTTP/1.1 and HTTP/2, with TLS enabled using the Mozilla
/// root certificates.
fn https_connector() -> HttpsConnector<HttpConnector> {
    let root_store: rustls::RootCertStore =
        webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();

    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    HttpsConnectorBuilder::new()
        .with_tls_config(tls_config)
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .build()
}

/// [`Transport`] backed by a pooled hyper-util client.
///
/// Cancellation is honored by racing the dispatch against the request's
/// signal: a triggered signal settles the call with [`Error::Aborted`].
///
/// The credentials mode is carried on the request contract but not acted
/// on here: this transport manages no cookie jar, so there are no ambient
/// credentials to include or omit.
#[derive(Clone)]
pub struct HyperTransport {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: TransportConfig,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperTransport {
    /// Create a new transport with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TransportConfig::default())
    }

    /// Create a new transport with custom configuration.
    #[must_use]
    pub fn with_config(config: TransportConfig) -> Self {
        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(https_connector());

        Self { inner, config }
    }

    /// Get the transport configuration.
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Build a hyper request from the transport request.
    fn build_http_request(request: &TransportRequest) -> Result<http::Request<Full<Bytes>>> {
        // Deferred URL validation lands here
        let url: url::Url = request.url.parse()?;

        let mut builder = http::Request::builder()
            .method(http::Method::from(request.method))
            .uri(url.as_str());

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let body = request.body.clone().map_or_else(Full::default, Full::new);
        builder
            .body(body)
            .map_err(|e| Error::invalid_request(e.to_string()))
    }

    /// Extract response headers as a `HashMap`.
    fn extract_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    #[allow(clippy::needless_pass_by_value)]
    fn map_hyper_error(err: hyper_util::client::legacy::Error) -> Error {
        let msg = err.to_string();

        if err.is_connect() {
            return Error::connection(msg);
        }

        if msg.contains("ssl") || msg.contains("tls") || msg.contains("certificate") {
            return Error::tls(msg);
        }

        Error::connection(msg)
    }

    async fn dispatch(&self, request: TransportRequest) -> Result<TransportResponse> {
        let http_request = Self::build_http_request(&request)?;
        let signal = request.signal;

        let response = tokio::select! {
            () = signal.cancelled() => return Err(Error::Aborted),
            result = self.inner.request(http_request) => result.map_err(Self::map_hyper_error)?,
        };

        let status = response.status().as_u16();
        let headers = Self::extract_headers(response.headers());

        let body = tokio::select! {
            () = signal.cancelled() => return Err(Error::Aborted),
            collected = response.into_body().collect() => collected
                .map_err(|e| Error::connection(e.to_string()))?
                .to_bytes(),
        };

        Ok(TransportResponse::new(status, headers, body))
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HyperTransport {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse>> + Send {
        self.dispatch(request)
    }
}

#[cfg(test)]
mod tests {
    use grapnel_core::{CancellationToken, Credentials, Method};

    use super::*;

    fn transport_request(url: &str) -> TransportRequest {
        TransportRequest {
            method: Method::Get,
            url: url.to_string(),
            headers: HashMap::new(),
            body: None,
            credentials: Credentials::Include,
            signal: CancellationToken::new(),
        }
    }

    #[test]
    fn config_builder_overrides() {
        let config = TransportConfig::builder()
            .pool_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(10))
            .build();

        assert_eq!(config.pool_idle_per_host, 4);
        assert_eq!(config.pool_idle_timeout, Duration::from_secs(10));
    }

    #[test]
    fn invalid_url_is_reported() {
        let result = HyperTransport::build_http_request(&transport_request("not a url"));
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn request_carries_headers_and_body() {
        let mut request = transport_request("https://api.example.com/items");
        request
            .headers
            .insert("Accept".to_string(), "application/json".to_string());
        request.body = Some(Bytes::from(r#"{"a":1}"#));

        let http_request = HyperTransport::build_http_request(&request).expect("request");
        assert_eq!(http_request.method(), http::Method::GET);
        assert_eq!(
            http_request.uri().to_string(),
            "https://api.example.com/items"
        );
        assert_eq!(
            http_request
                .headers()
                .get("Accept")
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn pre_cancelled_signal_aborts_before_dispatch() {
        let transport = HyperTransport::new();
        let mut request = transport_request("https://api.example.com/items");
        request.signal.cancel();

        let result = transport.send(request).await;
        assert!(matches!(result, Err(Error::Aborted)));
    }
}
