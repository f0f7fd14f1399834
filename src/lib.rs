//! A typed client for Quorum nodes running Istanbul BFT.
//!
//! [`RpcGateway`] exposes the node's JSON-RPC methods, one request per call.
//! [`Orchestrator`] builds the multi-step workflows on top of it: unlocking an account and
//! submitting a transaction, deploying a contract and waiting for its address, and
//! read-only contract calls through caller-supplied [`coder`] implementations.

#[macro_use]
extern crate log;

pub mod api;
pub mod coder;
mod error;
pub mod gateway;
pub mod orchestrator;
pub mod polling;
#[doc(hidden)]
pub mod testing;
pub mod transport;

pub use quorum_types as types;

pub use error::{Error, Result};
pub use gateway::{HttpGatewayBuilder, RpcGateway};
pub use orchestrator::{Orchestrator, OrchestratorConfig};
pub use polling::{CancellationToken, PollingParams};
pub use transport::{HttpTransport, Transport};
