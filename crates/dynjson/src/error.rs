/// Errors produced while building or strictly reading a [`DynamicNode`](crate::DynamicNode).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input is not well-formed JSON.
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// A strict lookup did not find the key.
    #[error("Key '{key}' is not present")]
    MissingKey { key: String },
    /// An in-memory value could not be converted into JSON.
    #[error("Value can not be represented as JSON: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl Error {
    pub(crate) fn missing_key(key: impl Into<String>) -> Error {
        Error::MissingKey { key: key.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn missing_key_message() {
        assert_eq!(
            Error::missing_key("user").to_string(),
            "Key 'user' is not present"
        );
    }

    #[test]
    fn parse_error_keeps_position() {
        let source = serde_json::from_str::<serde_json::Value>("{").expect_err("Invalid JSON");
        let error = Error::from(source);
        assert!(error.to_string().starts_with("Invalid JSON: EOF"));
    }
}
