use std::{sync::Arc, time::Duration};

use crate::HttpRequest;

/// Executes composed requests and returns the raw response text.
///
/// Implement this trait to plug in a different HTTP stack, add retries or serve canned
/// responses in tests.
///
/// ```rust
/// use dynjson_client::{Client, HttpRequest, Request, Transport};
///
/// struct Canned;
///
/// impl Transport for Canned {
///     fn execute(
///         &self,
///         request: &HttpRequest,
///     ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
///         Ok(format!(r#"{{"path": "{}"}}"#, request.url().path()))
///     }
/// }
///
/// # fn example() -> Result<(), dynjson_client::Error> {
/// let client = Client::with_transport(Canned);
/// let node = client.send(&Request::get("https://example.com/users"))?;
/// assert_eq!(node.get("path").and_then(|f| f.as_str()), Some("/users"));
/// # Ok(())
/// # }
/// ```
pub trait Transport: Send + Sync {
    /// Send `request` and return the response body.
    ///
    /// # Errors
    ///
    /// Any failure to deliver the request or to read a successful response.
    fn execute(
        &self,
        request: &HttpRequest,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

pub trait IntoTransport {
    fn into_transport(self) -> Arc<dyn Transport>;
}

impl<T: Transport + 'static> IntoTransport for T {
    fn into_transport(self) -> Arc<dyn Transport> {
        Arc::new(self)
    }
}

impl IntoTransport for Arc<dyn Transport> {
    fn into_transport(self) -> Arc<dyn Transport> {
        self
    }
}

/// Adapter turning a closure into a [`Transport`].
pub struct FnTransport<F>(F);

/// Use a closure as a [`Transport`].
pub fn transport_fn<F>(f: F) -> FnTransport<F>
where
    F: Fn(&HttpRequest) -> Result<String, Box<dyn std::error::Error + Send + Sync>> + Send + Sync,
{
    FnTransport(f)
}

impl<F> Transport for FnTransport<F>
where
    F: Fn(&HttpRequest) -> Result<String, Box<dyn std::error::Error + Send + Sync>> + Send + Sync,
{
    fn execute(
        &self,
        request: &HttpRequest,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        (self.0)(request)
    }
}

/// Blocking HTTP transport backed by `reqwest`.
///
/// Responses with a non-success status code are errors. Without the `http` feature every
/// request fails and a custom [`Transport`] is required.
#[derive(Debug, Clone, Default)]
pub struct DefaultTransport {
    timeout: Option<Duration>,
    #[cfg(feature = "http")]
    client: std::sync::OnceLock<reqwest::blocking::Client>,
}

impl DefaultTransport {
    #[must_use]
    pub fn new() -> DefaultTransport {
        DefaultTransport::default()
    }

    /// Total time allowed for a single request, from connecting to reading the body.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> DefaultTransport {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    #[cfg(feature = "http")]
    fn client(&self) -> Result<&reqwest::blocking::Client, reqwest::Error> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        install_crypto_provider();
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(self.client.get_or_init(|| client))
    }
}

/// `reqwest` is built without a bundled TLS backend; pick the one selected by features.
/// Installing fails only if the process already has a default provider, which is fine.
#[cfg(feature = "http")]
fn install_crypto_provider() {
    #[cfg(feature = "tls-aws-lc-rs")]
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    #[cfg(all(feature = "tls-ring", not(feature = "tls-aws-lc-rs")))]
    let _ = rustls::crypto::ring::default_provider().install_default();
}

impl Transport for DefaultTransport {
    #[cfg(feature = "http")]
    fn execute(
        &self,
        request: &HttpRequest,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let method = match request.method() {
            crate::Method::Get => reqwest::Method::GET,
            crate::Method::Post => reqwest::Method::POST,
        };
        let mut builder = self.client()?.request(method, request.url().as_str());
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body() {
            builder = builder
                .header("Content-Type", body.content_type())
                .body(body.encode().into_owned());
        }
        let response = builder.send()?.error_for_status()?;
        Ok(response.text()?)
    }

    #[cfg(not(feature = "http"))]
    fn execute(
        &self,
        _request: &HttpRequest,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Err("`http` feature or a custom transport is required to send requests".into())
    }
}
