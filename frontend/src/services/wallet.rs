//! Injected wallet (EIP-1193) integration.
//!
//! [`WalletProvider`] is the capability surface the page needs from a wallet.
//! [`BrowserWallet`] implements it on top of `window.ethereum` (MetaMask and
//! compatible extensions); tests substitute their own implementation.

use alloy_primitives::{Address, U256};
use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::config::RECEIPT_POLL_MS;
use crate::types::{AppError, AppResult};

/// A state-changing call to send through the wallet.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: Vec<u8>,
    /// Payment in wei
    pub value: U256,
}

impl TransactionRequest {
    /// JSON-RPC transaction object.
    pub fn to_json(&self) -> Value {
        json!({
            "from": self.from.to_string(),
            "to": self.to.to_string(),
            "data": to_hex(&self.data),
            "value": format!("{:#x}", self.value),
        })
    }
}

/// What the page needs from a wallet.
///
/// Reads go through [`call`](WalletProvider::call); writes through
/// [`send_transaction`](WalletProvider::send_transaction) followed by
/// [`wait_for_transaction`](WalletProvider::wait_for_transaction).
#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    /// Whether a wallet is injected into the page at all.
    fn is_available(&self) -> bool;

    /// Accounts already authorised for this site, without prompting.
    async fn accounts(&self) -> AppResult<Vec<String>>;

    /// Ask the user to authorise the site.
    async fn connect(&self) -> AppResult<()>;

    async fn chain_id(&self) -> AppResult<u64>;

    /// Address of the account that signs transactions.
    async fn signer_address(&self) -> AppResult<Address>;

    /// `eth_call` against the latest block.
    async fn call(&self, to: Address, data: Vec<u8>) -> AppResult<Vec<u8>>;

    /// Submit a transaction, returning its hash.
    async fn send_transaction(&self, tx: TransactionRequest) -> AppResult<String>;

    /// Resolve once the transaction is mined; error if it reverted.
    async fn wait_for_transaction(&self, tx_hash: &str) -> AppResult<()>;
}

/// `window.ethereum` wrapper
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserWallet;

impl BrowserWallet {
    fn ethereum() -> Option<JsValue> {
        let window = web_sys::window()?;
        let ethereum = js_sys::Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        (!ethereum.is_undefined() && !ethereum.is_null()).then_some(ethereum)
    }

    /// `ethereum.request({ method, params })`
    async fn request(&self, method: &str, params: Value) -> AppResult<Value> {
        let ethereum = Self::ethereum()
            .ok_or_else(|| AppError::Wallet("Please install MetaMask!".to_string()))?;

        let request: js_sys::Function =
            js_sys::Reflect::get(&ethereum, &JsValue::from_str("request"))
                .ok()
                .and_then(|f| f.dyn_into().ok())
                .ok_or_else(|| AppError::Wallet("Injected provider has no request()".to_string()))?;

        // json_compatible: plain JS objects instead of Maps
        let args = json!({ "method": method, "params": params })
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| AppError::Rpc(e.to_string()))?;

        log::debug!("➡️  {}", method);
        let promise = request
            .call1(&ethereum, &args)
            .map_err(|e| AppError::Rpc(js_error_message(&e)))?;
        let result = JsFuture::from(js_sys::Promise::from(promise))
            .await
            .map_err(|e| AppError::Rpc(js_error_message(&e)))?;

        serde_wasm_bindgen::from_value(result).map_err(|e| AppError::Rpc(e.to_string()))
    }
}

impl WalletProvider for BrowserWallet {
    fn is_available(&self) -> bool {
        let available = Self::ethereum().is_some();
        if !available {
            log::warn!("⚠️  No injected ethereum provider found");
        }
        available
    }

    async fn accounts(&self) -> AppResult<Vec<String>> {
        let value = self.request("eth_accounts", json!([])).await?;
        serde_json::from_value(value).map_err(|e| AppError::Rpc(e.to_string()))
    }

    async fn connect(&self) -> AppResult<()> {
        log::info!("🔌 Connecting to wallet...");
        self.request("eth_requestAccounts", json!([]))
            .await
            .map_err(|e| AppError::Wallet(e.to_string()))?;
        Ok(())
    }

    async fn chain_id(&self) -> AppResult<u64> {
        let value = self.request("eth_chainId", json!([])).await?;
        let hex = value
            .as_str()
            .ok_or_else(|| AppError::Rpc("eth_chainId returned a non-string".to_string()))?;
        parse_quantity(hex)
    }

    async fn signer_address(&self) -> AppResult<Address> {
        let account = self
            .accounts()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Wallet("Please connect your MetaMask wallet.".to_string()))?;
        account.parse().map_err(|_| {
            AppError::Wallet(format!("Wallet returned an invalid address: {}", account))
        })
    }

    async fn call(&self, to: Address, data: Vec<u8>) -> AppResult<Vec<u8>> {
        let params = json!([{ "to": to.to_string(), "data": to_hex(&data) }, "latest"]);
        let value = self.request("eth_call", params).await?;
        let hex = value
            .as_str()
            .ok_or_else(|| AppError::Rpc("eth_call returned a non-string".to_string()))?;
        from_hex(hex)
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> AppResult<String> {
        let value = self
            .request("eth_sendTransaction", json!([tx.to_json()]))
            .await
            .map_err(|e| AppError::Transaction(e.to_string()))?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AppError::Rpc("eth_sendTransaction returned a non-string".to_string()))
    }

    async fn wait_for_transaction(&self, tx_hash: &str) -> AppResult<()> {
        loop {
            let receipt = self
                .request("eth_getTransactionReceipt", json!([tx_hash]))
                .await?;
            if receipt.is_null() {
                gloo_timers::future::TimeoutFuture::new(RECEIPT_POLL_MS).await;
                continue;
            }
            return match receipt.get("status").and_then(Value::as_str) {
                Some("0x0") => Err(AppError::Transaction(format!(
                    "transaction {} reverted",
                    tx_hash
                ))),
                _ => {
                    log::info!("✅ Transaction mined: {}", tx_hash);
                    Ok(())
                }
            };
        }
    }
}

/// Best-effort message from a rejected JS promise.
fn js_error_message(e: &JsValue) -> String {
    js_sys::Reflect::get(e, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .or_else(|| e.as_string())
        .unwrap_or_else(|| "Unknown JS error".to_string())
}

/// `0x`-prefixed lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode `0x`-prefixed (or bare) hex.
pub fn from_hex(value: &str) -> AppResult<Vec<u8>> {
    hex::decode(value.trim_start_matches("0x"))
        .map_err(|e| AppError::Rpc(format!("invalid hex {}: {}", value, e)))
}

/// Parse a hex `QUANTITY` such as `0x4`.
pub fn parse_quantity(value: &str) -> AppResult<u64> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| AppError::Rpc(format!("not a hex quantity: {}", value)))?;
    u64::from_str_radix(digits, 16)
        .map_err(|e| AppError::Rpc(format!("bad quantity {}: {}", value, e)))
}
