use std::{sync::Arc, time::Duration};

use anyhow::anyhow;
use http::header::HeaderMap;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{api, Error, Result};

/// A JSON-RPC 2.0 request. Parameters are positional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub jsonrpc: String,
    pub id: String,
    pub method: String,
    pub params: Vec<Value>,
}

impl Request {
    /// Creates a request with a fresh random id.
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), method, params)
    }

    pub fn with_id(id: impl Into<String>, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: api::JSONRPC_VERSION.to_string(),
            id: id.into(),
            method: method.into(),
            params,
        }
    }
}

/// A JSON-RPC 2.0 response. A `null` result deserializes as `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Response {
    /// A successful response to `request`.
    pub fn result(request: &Request, result: impl Into<Value>) -> Self {
        Self {
            result: Some(result.into()),
            ..Self::empty(request)
        }
    }

    /// An error response to `request`.
    pub fn error(request: &Request, code: i64, message: impl Into<String>) -> Self {
        Self {
            error: Some(ErrorObject {
                code,
                message: message.into(),
                data: None,
            }),
            ..Self::empty(request)
        }
    }

    /// A response to `request` carrying neither a result nor an error.
    pub fn empty(request: &Request) -> Self {
        Self {
            jsonrpc: api::JSONRPC_VERSION.to_string(),
            id: Value::String(request.id.clone()),
            result: None,
            error: None,
        }
    }

    /// Checks that this response answers `request`. Nodes reply with a `null` id when they
    /// could not parse the request, so those are let through to surface the error object.
    pub(crate) fn check_id(&self, request: &Request) -> Result<()> {
        match &self.id {
            Value::Null => Ok(()),
            Value::String(id) if *id == request.id => Ok(()),
            id => Err(Error::transport(anyhow!(
                "response id {} does not match request id {}",
                id,
                request.id
            ))),
        }
    }

    /// Splits the response into its result, turning an error object into `Error::Node`.
    pub(crate) fn into_result(self) -> Result<Option<Value>> {
        match self.error {
            Some(ErrorObject {
                code,
                message,
                data,
            }) => Err(Error::Node {
                code,
                message,
                data,
            }),
            None => Ok(self.result),
        }
    }
}

/// Carries a single request to a node and returns its response.
///
/// Implementations report unreachable endpoints and undecodable envelopes as
/// `Error::Transport`; interpreting the envelope is left to the caller.
pub trait Transport {
    fn send(&self, request: &Request) -> Result<Response>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &Request) -> Result<Response> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: &Request) -> Result<Response> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &Request) -> Result<Response> {
        (**self).send(request)
    }
}

/// Sends requests as JSON over HTTP POST to a single endpoint.
pub struct HttpTransport {
    /// The url of the node's RPC endpoint.
    url: String,

    /// The http session used for sending http requests.
    client: Client,
}

impl HttpTransport {
    /// Creates a new `HttpTransport` pointed at `url` that sends `headers` with every request.
    pub fn new(url: String, headers: HeaderMap, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            url,
            client: builder.build().map_err(Error::transport)?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &Request) -> Result<Response> {
        let res = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .map_err(Error::transport)?;
        if !res.status().is_success() {
            return Err(Error::transport(anyhow!(
                "node returned error: {}",
                res.status()
            )));
        }
        res.json().map_err(Error::transport)
    }
}
