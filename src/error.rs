pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The endpoint could not be reached or did not speak JSON-RPC.
    #[error("transport error: {0}")]
    Transport(#[source] anyhow::Error),

    /// The node answered with a JSON-RPC error object.
    #[error("node error {code}: {message}")]
    Node {
        code: i64,
        message: String,
        data: Option<serde_json::Value>,
    },

    /// The node answered with neither a result nor an error.
    #[error("empty response to `{method}`")]
    EmptyResponse { method: String },

    /// The result did not have the expected shape.
    #[error("could not decode result of `{method}`: {source}")]
    Decode {
        method: String,
        #[source]
        source: anyhow::Error,
    },

    /// The encoder could not produce call data.
    #[error("could not encode call data: {0}")]
    Encode(#[source] anyhow::Error),

    #[error("could not unlock account {account}: {reason}")]
    Unlock { account: String, reason: String },

    #[error("transaction {tx_hash} not confirmed after {attempts} attempts")]
    ConfirmationTimeout { tx_hash: String, attempts: u32 },

    #[error("confirmation of transaction {tx_hash} was cancelled")]
    Cancelled { tx_hash: String },
}

impl Error {
    pub(crate) fn transport(err: impl Into<anyhow::Error>) -> Self {
        Error::Transport(err.into())
    }

    pub(crate) fn decode(method: impl Into<String>, err: impl Into<anyhow::Error>) -> Self {
        Error::Decode {
            method: method.into(),
            source: err.into(),
        }
    }

    /// Returns whether a confirmation poll that failed with this error may be attempted again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(_)
            | Error::Node { .. }
            | Error::EmptyResponse { .. }
            | Error::Decode { .. } => true,
            Error::Encode(_)
            | Error::Unlock { .. }
            | Error::ConfirmationTimeout { .. }
            | Error::Cancelled { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_error_display() {
        let err = Error::Node {
            code: -32000,
            message: "account is locked".to_string(),
            data: None,
        };
        assert_eq!(err.to_string(), "node error -32000: account is locked");
        assert!(err.is_retryable());
    }

    #[test]
    fn terminal_errors() {
        assert!(!Error::Cancelled {
            tx_hash: "0x1".to_string()
        }
        .is_retryable());
        assert!(!Error::ConfirmationTimeout {
            tx_hash: "0x1".to_string(),
            attempts: 3
        }
        .is_retryable());
    }
}
