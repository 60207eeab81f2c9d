use std::sync::Arc;

use dynjson::DynamicNode;

use crate::{transport::IntoTransport, DefaultTransport, Error, Request, Transport};

/// Sends [`Request`]s through a [`Transport`] and wraps the responses into [`DynamicNode`]s.
///
/// Cloning is cheap, the transport is shared.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl Default for Client {
    fn default() -> Self {
        Client::new()
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

impl Client {
    /// A client using [`DefaultTransport`].
    #[must_use]
    pub fn new() -> Client {
        Client::with_transport(DefaultTransport::new())
    }

    #[must_use]
    pub fn with_transport(transport: impl IntoTransport) -> Client {
        Client {
            transport: transport.into_transport(),
        }
    }

    /// Compose, send and parse a single request.
    ///
    /// # Errors
    ///
    /// - any error from [`Request::compose`], raised before the transport is called;
    /// - [`Error::Transport`] if the transport fails;
    /// - [`Error::Json`] if the response is not valid JSON.
    pub fn send(&self, request: &Request) -> Result<DynamicNode, Error> {
        let http = request.compose()?;
        tracing::debug!(method = %http.method(), url = %http.url(), "Sending request");
        let text = self
            .transport
            .execute(&http)
            .map_err(|source| Error::Transport {
                url: http.url().to_string(),
                source,
            })?;
        tracing::debug!(bytes = text.len(), "Received response");
        Ok(request.response_options().parse(&text)?)
    }

    /// GET `url` with the given query parameters.
    ///
    /// # Errors
    ///
    /// See [`Client::send`].
    pub fn get<K, V>(
        &self,
        url: &str,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Result<DynamicNode, Error>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.send(&Request::get(url).params(params))
    }

    /// POST `params` as a form to `url`.
    ///
    /// # Errors
    ///
    /// See [`Client::send`]. An empty `params` is [`Error::MissingArgument`].
    pub fn post<K, V>(
        &self,
        url: &str,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Result<DynamicNode, Error>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.send(&Request::post(url).params(params))
    }
}
