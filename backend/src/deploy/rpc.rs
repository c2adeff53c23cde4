//! Minimal Ethereum JSON-RPC client.
//!
//! Only the handful of methods the deploy command needs. Requests are plain
//! JSON-RPC 2.0 over HTTP. Transactions are either signed by the node
//! (`eth_sendTransaction`) or arrive pre-signed (`eth_sendRawTransaction`).

use alloy_primitives::Address;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{RpcError, RpcResult};

/// JSON-RPC response envelope.
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Subset of a transaction receipt.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    /// `0x1` success, `0x0` reverted (absent on pre-Byzantium chains)
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub contract_address: Option<String>,
}

impl TransactionReceipt {
    /// Whether the transaction reverted.
    pub fn reverted(&self) -> bool {
        matches!(self.status.as_deref(), Some("0x0") | Some("0x00"))
    }
}

/// HTTP JSON-RPC client
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one request and decode its `result`.
    pub async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> RpcResult<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!(method, id, "rpc request");
        let response: RpcResponse = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        decode_response(response)
    }

    /// `eth_chainId` as a number.
    pub async fn chain_id(&self) -> RpcResult<u64> {
        let hex: String = self.request("eth_chainId", json!([])).await?;
        parse_quantity(&hex)
    }

    /// Next nonce for `address`, counting pending transactions.
    pub async fn transaction_count(&self, address: Address) -> RpcResult<u64> {
        let hex: String = self
            .request("eth_getTransactionCount", json!([address.to_string(), "pending"]))
            .await?;
        parse_quantity(&hex)
    }

    /// `eth_gasPrice` in wei.
    pub async fn gas_price(&self) -> RpcResult<u128> {
        let hex: String = self.request("eth_gasPrice", json!([])).await?;
        parse_quantity_u128(&hex)
    }

    pub async fn estimate_gas(&self, tx: Value) -> RpcResult<u64> {
        let hex: String = self.request("eth_estimateGas", json!([tx])).await?;
        parse_quantity(&hex)
    }

    /// `eth_sendTransaction`, returning the transaction hash.
    pub async fn send_transaction(&self, tx: Value) -> RpcResult<String> {
        self.request("eth_sendTransaction", json!([tx])).await
    }

    /// `eth_sendRawTransaction` with an EIP-2718 encoded signed transaction.
    pub async fn send_raw_transaction(&self, raw: &[u8]) -> RpcResult<String> {
        self.request("eth_sendRawTransaction", json!([format!("0x{}", hex::encode(raw))]))
            .await
    }

    /// `eth_getTransactionReceipt`; `None` while the transaction is pending.
    pub async fn transaction_receipt(&self, hash: &str) -> RpcResult<Option<TransactionReceipt>> {
        self.request("eth_getTransactionReceipt", json!([hash])).await
    }
}

fn decode_response<T: DeserializeOwned>(response: RpcResponse) -> RpcResult<T> {
    if let Some(err) = response.error {
        return Err(RpcError::Node {
            code: err.code,
            message: err.message,
        });
    }
    let value = response.result.unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|e| RpcError::InvalidResponse(e.to_string()))
}

/// Parse a hex `QUANTITY` such as `0x4`.
pub fn parse_quantity(hex: &str) -> RpcResult<u64> {
    let value = parse_quantity_u128(hex)?;
    u64::try_from(value)
        .map_err(|_| RpcError::InvalidResponse(format!("quantity {} exceeds u64", hex)))
}

/// Parse a hex `QUANTITY` that may exceed `u64` (gas prices, balances).
pub fn parse_quantity_u128(hex: &str) -> RpcResult<u128> {
    let digits = hex
        .strip_prefix("0x")
        .ok_or_else(|| RpcError::InvalidResponse(format!("not a hex quantity: {}", hex)))?;
    u128::from_str_radix(digits, 16)
        .map_err(|e| RpcError::InvalidResponse(format!("bad quantity {}: {}", hex, e)))
}
