/// Errors that can occur while building, sending or decoding an API request.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required part of the request was not provided.
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),
    /// A POST request was given both form parameters and a JSON body.
    #[error("A request carries either form parameters or a JSON body, not both")]
    ConflictingBody,
    /// A GET request was given a JSON body.
    #[error("GET requests can not carry a body")]
    BodyOnGet,
    /// The request URL could not be parsed.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// The transport failed to deliver the request or to read the response.
    #[error("Request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The response is not valid JSON, or the JSON body could not be encoded.
    #[error(transparent)]
    Json(#[from] dynjson::Error),
}
