//! A scripted transport for exercising gateway and orchestrator logic without a node.

use std::sync::{Mutex, PoisonError};

use crate::{
    transport::{Request, Response, Transport},
    Result,
};

type Handler = dyn Fn(&Request) -> Result<Response> + Send + Sync;

/// Answers every request with `handler` and records the requests it has seen.
pub struct MockTransport {
    handler: Box<Handler>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new(handler: impl Fn(&Request) -> Result<Response> + Send + Sync + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the requests sent so far for `method`.
    pub fn requests_for(&self, method: &str) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|req| req.method == method)
            .collect()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &Request) -> Result<Response> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        (self.handler)(request)
    }
}
