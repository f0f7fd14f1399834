#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use quorum_client::{
    api,
    testing::MockTransport,
    transport::{Request, Response},
    Orchestrator, OrchestratorConfig, PollingParams, Result, RpcGateway,
};

pub const COINBASE: &str = "0xed9d02e382b34818e88b88a309c7fe71e65f419d";
pub const TX_HASH: &str = "0x0b7dd4a2a2c0e2a6f9a0c6e7f3d1f5b9e1f0a7e4c3b2a1908f7e6d5c4b3a2918";
pub const CONTRACT_ADDR: &str = "0x1932c48b2bf8102ba33b4a6b545c32236e342f34";

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn fast_polling(max_attempts: u32) -> PollingParams {
    PollingParams {
        sleep_duration: 1,
        max_sleep_duration: 1,
        max_attempts,
        timeout: None,
    }
}

/// A node that unlocks any account, accepts any transaction, and only reports a contract
/// address on the receipt query number `mined_after + 1`.
pub struct ScriptedNode {
    pub transport: Arc<MockTransport>,
    pub receipt_queries: Arc<AtomicUsize>,
}

impl ScriptedNode {
    pub fn new(mined_after: Option<usize>) -> Self {
        let receipt_queries = Arc::new(AtomicUsize::new(0));
        let queries = receipt_queries.clone();
        let transport = MockTransport::new(move |req| respond(req, mined_after, &queries));
        Self {
            transport: Arc::new(transport),
            receipt_queries,
        }
    }

    pub fn orchestrator(&self, polling: PollingParams) -> Orchestrator<Arc<MockTransport>> {
        Orchestrator::new(
            RpcGateway::new(self.transport.clone()),
            OrchestratorConfig::default().polling_params(polling),
        )
    }

    pub fn receipt_queries(&self) -> usize {
        self.receipt_queries.load(Ordering::SeqCst)
    }
}

fn respond(req: &Request, mined_after: Option<usize>, queries: &AtomicUsize) -> Result<Response> {
    Ok(match req.method.as_str() {
        api::ETH_COINBASE => Response::result(req, COINBASE),
        api::PERSONAL_UNLOCK_ACCOUNT => Response::result(req, true),
        api::ETH_SEND_TRANSACTION => Response::result(req, TX_HASH),
        api::ETH_GET_TRANSACTION_RECEIPT => {
            let seen = queries.fetch_add(1, Ordering::SeqCst);
            let mined = mined_after.map_or(false, |n| seen >= n);
            let contract_address = if mined { CONTRACT_ADDR } else { "" };
            Response::result(
                req,
                serde_json::json!({
                    "transactionHash": TX_HASH,
                    "contractAddress": contract_address,
                }),
            )
        }
        _ => Response::error(req, -32601, "the method does not exist/is not available"),
    })
}
