//! # dynjson-client
//!
//! Call HTTP/JSON APIs and navigate the responses with [`dynjson`] instead of declaring
//! response types.
//!
//! ```rust,no_run
//! use dynjson_client::{Client, Request};
//!
//! # fn example() -> Result<(), dynjson_client::Error> {
//! let client = Client::new();
//! let repo = client.send(
//!     &Request::get("https://api.github.com/repos/rust-lang/rust")
//!         .header("User-Agent", "dynjson")
//! )?;
//! let owner = repo.path("owner.login").and_then(|f| f.as_str());
//! let pushed = repo.get("pushed_at").and_then(|f| f.as_datetime());
//! # Ok(())
//! # }
//! ```
mod client;
mod error;
mod request;
mod transport;

pub use client::Client;
pub use dynjson::{DynamicNode, Field, Options};
pub use error::Error;
pub use request::{Body, HttpRequest, Method, Request};
pub use transport::{transport_fn, DefaultTransport, FnTransport, IntoTransport, Transport};

/// GET `url` with [`DefaultTransport`].
///
/// # Errors
///
/// See [`Client::send`].
pub fn get(url: &str) -> Result<DynamicNode, Error> {
    Client::new().send(&Request::get(url))
}

/// POST `params` as a form to `url` with [`DefaultTransport`].
///
/// # Errors
///
/// See [`Client::send`].
pub fn post<K, V>(url: &str, params: impl IntoIterator<Item = (K, V)>) -> Result<DynamicNode, Error>
where
    K: Into<String>,
    V: Into<String>,
{
    Client::new().post(url, params)
}
