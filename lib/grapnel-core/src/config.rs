//! Request configuration types.

use derive_more::Display;

/// Credentials mode forwarded to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum Credentials {
    /// Never send credentials.
    #[display("omit")]
    Omit,
    /// Send credentials for same-origin calls only.
    #[display("same-origin")]
    SameOrigin,
    /// Always send credentials.
    #[default]
    #[display("include")]
    Include,
}

/// Configuration for a request instance, immutable after construction.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Merge the default `Accept`/`Content-Type` headers under caller values.
    pub use_default_headers: bool,
    /// Serialize structured bodies to JSON text when they are set.
    pub stringify_body: bool,
    /// Allow a new dispatch while a previous one has not settled.
    pub allow_multiple: bool,
    /// Credentials mode forwarded to the transport.
    pub credentials: Credentials,
    /// Emit advisory logging for rejections and transport failures.
    ///
    /// This replaces an ambient environment check: it is an explicit,
    /// injected value so behavior is deterministic under test.
    pub diagnostics: bool,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            use_default_headers: true,
            stringify_body: true,
            allow_multiple: false,
            credentials: Credentials::Include,
            diagnostics: true,
        }
    }
}

impl RequestConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> RequestConfigBuilder {
        RequestConfigBuilder::default()
    }
}

/// Builder for [`RequestConfig`].
#[derive(Debug, Clone, Default)]
pub struct RequestConfigBuilder {
    use_default_headers: Option<bool>,
    stringify_body: Option<bool>,
    allow_multiple: Option<bool>,
    credentials: Option<Credentials>,
    diagnostics: Option<bool>,
}

impl RequestConfigBuilder {
    /// Set whether default headers are merged in.
    #[must_use]
    pub const fn use_default_headers(mut self, value: bool) -> Self {
        self.use_default_headers = Some(value);
        self
    }

    /// Set whether structured bodies are serialized when set.
    #[must_use]
    pub const fn stringify_body(mut self, value: bool) -> Self {
        self.stringify_body = Some(value);
        self
    }

    /// Set whether concurrent dispatches on one instance are allowed.
    #[must_use]
    pub const fn allow_multiple(mut self, value: bool) -> Self {
        self.allow_multiple = Some(value);
        self
    }

    /// Set the credentials mode.
    #[must_use]
    pub const fn credentials(mut self, value: Credentials) -> Self {
        self.credentials = Some(value);
        self
    }

    /// Set whether advisory logging is emitted.
    #[must_use]
    pub const fn diagnostics(mut self, value: bool) -> Self {
        self.diagnostics = Some(value);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> RequestConfig {
        let defaults = RequestConfig::default();
        RequestConfig {
            use_default_headers: self
                .use_default_headers
                .unwrap_or(defaults.use_default_headers),
            stringify_body: self.stringify_body.unwrap_or(defaults.stringify_body),
            allow_multiple: self.allow_multiple.unwrap_or(defaults.allow_multiple),
            credentials: self.credentials.unwrap_or(defaults.credentials),
            diagnostics: self.diagnostics.unwrap_or(defaults.diagnostics),
        }
    }
}
