//! Contract deployment.
//!
//! Deploys the compiled `HalftoneEth` contract with the metadata base URI and
//! the whitelist contract address as constructor arguments.
//!
//! Two ways to sign:
//!
//! - [`DeployAccount::Local`]: a private key held by the CLI signs an EIP-155
//!   legacy transaction sent with `eth_sendRawTransaction`. Works with hosted
//!   endpoints.
//! - [`DeployAccount::Node`]: `eth_sendTransaction` from an account the node
//!   can sign for (local hardhat node, unlocked account).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use halftone::deploy::{deploy_contract, DeployAccount, DeploySettings};
//!
//! let account = DeployAccount::from_private_key(&key)?;
//! let settings = DeploySettings::new(rpc_url, account, "artifacts/.../HalftoneEth.json".into());
//! let address = deploy_contract(&settings).await?;
//! println!("Halftone Eth Contract Address: {}", address);
//! ```

pub mod rpc;

use alloy_consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy_eips::eip2718::Encodable2718;
use alloy_primitives::{Address, Bytes, TxKind, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::{sol, SolConstructor};
use serde::Deserialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{METADATA_URL, WHITELIST_CONTRACT_ADDRESS};
use crate::error::{ArtifactError, ArtifactResult, DeployError, DeployResult, RpcError};

pub use rpc::{RpcClient, TransactionReceipt};

sol! {
    contract HalftoneEth {
        constructor(string baseURI, address whitelistContract);
    }
}

/// Delay between receipt polls
const RECEIPT_POLL_INTERVAL_MS: u64 = 1000;

/// Give up waiting for the receipt after this long
const RECEIPT_TIMEOUT_SECS: u64 = 300;

/// Extra gas on top of the node's estimate, in percent
const GAS_LIMIT_MARGIN_PERCENT: u64 = 20;

/// Who signs the deployment.
#[derive(Debug, Clone)]
pub enum DeployAccount {
    /// The node signs for this address
    Node(Address),
    /// Signed here with a private key
    Local(PrivateKeySigner),
}

impl DeployAccount {
    /// Parse a hex private key, with or without `0x`.
    pub fn from_private_key(key: &str) -> DeployResult<Self> {
        key.trim()
            .parse::<PrivateKeySigner>()
            .map(DeployAccount::Local)
            .map_err(|_| DeployError::InvalidKey)
    }

    /// Pick the account from CLI settings: a private key wins over a
    /// node-managed address.
    pub fn resolve(private_key: Option<&str>, from: Option<&str>) -> DeployResult<Self> {
        match (private_key, from) {
            (Some(key), _) => Self::from_private_key(key),
            (None, Some(from)) => Ok(DeployAccount::Node(parse_address(from)?)),
            (None, None) => Err(DeployError::MissingConfig("PRIVATE_KEY or DEPLOYER_ADDRESS")),
        }
    }

    pub fn address(&self) -> Address {
        match self {
            DeployAccount::Node(address) => *address,
            DeployAccount::Local(signer) => signer.address(),
        }
    }
}

/// Everything needed for one deployment.
#[derive(Debug, Clone)]
pub struct DeploySettings {
    /// JSON-RPC endpoint of the node
    pub rpc_url: String,
    pub account: DeployAccount,
    /// Compiled contract artifact
    pub artifact_path: PathBuf,
    /// Constructor argument: metadata base URI
    pub metadata_url: String,
    /// Constructor argument: whitelist contract
    pub whitelist: Address,
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl DeploySettings {
    /// Settings using the collection constants for the constructor arguments.
    pub fn new(rpc_url: String, account: DeployAccount, artifact_path: PathBuf) -> Self {
        Self {
            rpc_url,
            account,
            artifact_path,
            metadata_url: METADATA_URL.to_string(),
            whitelist: WHITELIST_CONTRACT_ADDRESS.parse().unwrap_or(Address::ZERO),
            poll_interval: Duration::from_millis(RECEIPT_POLL_INTERVAL_MS),
            timeout: Duration::from_secs(RECEIPT_TIMEOUT_SECS),
        }
    }
}

/// Parse an address setting.
pub fn parse_address(value: &str) -> DeployResult<Address> {
    value
        .trim()
        .parse()
        .map_err(|_| DeployError::InvalidAddress(value.to_string()))
}

/// Hardhat (`"bytecode": "0x.."`) or Foundry (`"bytecode": {"object": "0x.."}`) artifact.
#[derive(Debug, Deserialize)]
struct Artifact {
    bytecode: Bytecode,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Bytecode {
    Hex(String),
    Object { object: String },
}

/// Load creation bytecode from a compiled artifact.
pub fn load_bytecode(path: &Path) -> ArtifactResult<Vec<u8>> {
    let content = std::fs::read_to_string(path)?;
    let artifact: Artifact = serde_json::from_str(&content)?;
    let hex_str = match artifact.bytecode {
        Bytecode::Hex(s) => s,
        Bytecode::Object { object } => object,
    };
    let digits = hex_str.trim().trim_start_matches("0x");
    if digits.is_empty() {
        return Err(ArtifactError::MissingBytecode);
    }
    Ok(hex::decode(digits)?)
}

/// ABI-encoded constructor arguments.
pub fn constructor_args(metadata_url: &str, whitelist: Address) -> Vec<u8> {
    HalftoneEth::constructorCall {
        baseURI: metadata_url.to_string(),
        whitelistContract: whitelist,
    }
    .abi_encode()
}

/// Deploy the contract and return its address once mined.
pub async fn deploy_contract(settings: &DeploySettings) -> DeployResult<Address> {
    let mut data = load_bytecode(&settings.artifact_path)?;
    data.extend(constructor_args(&settings.metadata_url, settings.whitelist));

    let client = RpcClient::new(settings.rpc_url.clone());
    let chain_id = client.chain_id().await?;
    tracing::info!(chain_id, rpc = client.url(), "connected to node");
    tracing::info!(
        deployer = %settings.account.address(),
        whitelist = %settings.whitelist,
        metadata_url = %settings.metadata_url,
        "deploying HalftoneEth"
    );

    let tx_hash = match &settings.account {
        DeployAccount::Node(from) => {
            client
                .send_transaction(json!({
                    "from": from.to_string(),
                    "data": format!("0x{}", hex::encode(&data)),
                }))
                .await?
        }
        DeployAccount::Local(signer) => {
            let raw = sign_deployment(&client, signer, chain_id, data).await?;
            client.send_raw_transaction(&raw).await?
        }
    };
    tracing::info!(tx = %tx_hash, "deployment transaction sent");

    let receipt =
        wait_for_receipt(&client, &tx_hash, settings.poll_interval, settings.timeout).await?;
    if receipt.reverted() {
        return Err(DeployError::Reverted(tx_hash));
    }

    let address = receipt
        .contract_address
        .ok_or_else(|| RpcError::InvalidResponse("receipt has no contractAddress".to_string()))?;
    parse_address(&address)
}

/// Build and sign the contract-creation transaction, returning its raw bytes.
///
/// Nonce, gas price and gas limit come from the node.
async fn sign_deployment(
    client: &RpcClient,
    signer: &PrivateKeySigner,
    chain_id: u64,
    data: Vec<u8>,
) -> DeployResult<Vec<u8>> {
    let from = signer.address();
    let nonce = client.transaction_count(from).await?;
    let gas_price = client.gas_price().await?;
    let estimate = client
        .estimate_gas(json!({
            "from": from.to_string(),
            "data": format!("0x{}", hex::encode(&data)),
        }))
        .await?;
    let margin = estimate.saturating_mul(GAS_LIMIT_MARGIN_PERCENT) / 100;
    let gas_limit = estimate.saturating_add(margin);
    tracing::debug!(nonce, gas_price, gas_limit, "signing deployment locally");

    let tx = TxLegacy {
        chain_id: Some(chain_id),
        nonce,
        gas_price,
        gas_limit,
        to: TxKind::Create,
        value: U256::ZERO,
        input: Bytes::from(data),
    };
    let signature = signer.sign_hash_sync(&tx.signature_hash())?;
    let envelope = TxEnvelope::from(tx.into_signed(signature));
    Ok(envelope.encoded_2718())
}

async fn wait_for_receipt(
    client: &RpcClient,
    tx_hash: &str,
    poll_interval: Duration,
    timeout: Duration,
) -> DeployResult<TransactionReceipt> {
    let started = tokio::time::Instant::now();
    loop {
        if let Some(receipt) = client.transaction_receipt(tx_hash).await? {
            return Ok(receipt);
        }
        if started.elapsed() >= timeout {
            return Err(DeployError::Timeout(tx_hash.to_string()));
        }
        tokio::time::sleep(poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_eips::eip2718::Decodable2718;
    use axum::{routing::post, Json, Router};
    use serde_json::Value;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    const DEPLOYED: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    // First default hardhat account
    const HARDHAT_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const HARDHAT_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn artifact_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    /// Fake node: answers pending once, then with a receipt.
    /// Raw transactions it receives are kept in `raw_txs`.
    async fn spawn_node(status: &'static str, raw_txs: Arc<Mutex<Vec<String>>>) -> String {
        let polls = Arc::new(AtomicUsize::new(0));
        let app = Router::new().route(
            "/",
            post(move |Json(req): Json<Value>| {
                let polls = polls.clone();
                let raw_txs = raw_txs.clone();
                async move {
                    let result = match req["method"].as_str().unwrap_or_default() {
                        "eth_chainId" => json!("0x7a69"),
                        "eth_getTransactionCount" => {
                            assert_eq!(req["params"][1], "pending");
                            json!("0x7")
                        }
                        "eth_gasPrice" => json!("0x3b9aca00"),
                        "eth_estimateGas" => json!("0x186a0"),
                        "eth_sendTransaction" => {
                            let data = req["params"][0]["data"].as_str().unwrap_or_default();
                            assert!(data.starts_with("0x6080"));
                            json!("0xfeed")
                        }
                        "eth_sendRawTransaction" => {
                            let raw = req["params"][0].as_str().unwrap_or_default();
                            raw_txs.lock().unwrap().push(raw.to_string());
                            json!("0xfeed")
                        }
                        "eth_getTransactionReceipt" => {
                            if polls.fetch_add(1, Ordering::SeqCst) == 0 {
                                Value::Null
                            } else {
                                json!({
                                    "transactionHash": "0xfeed",
                                    "status": status,
                                    "contractAddress": DEPLOYED,
                                })
                            }
                        }
                        other => panic!("unexpected method {}", other),
                    };
                    Json(json!({ "jsonrpc": "2.0", "id": req["id"], "result": result }))
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn settings(rpc_url: String, account: DeployAccount, artifact: &Path) -> DeploySettings {
        let mut settings = DeploySettings::new(rpc_url, account, artifact.to_path_buf());
        settings.poll_interval = Duration::from_millis(10);
        settings.timeout = Duration::from_secs(5);
        settings
    }

    fn node_account() -> DeployAccount {
        DeployAccount::Node(Address::repeat_byte(0x11))
    }

    #[test]
    fn test_load_hardhat_bytecode() {
        let file = artifact_file(r#"{"contractName":"HalftoneEth","bytecode":"0x6080604052"}"#);
        assert_eq!(load_bytecode(file.path()).unwrap(), vec![0x60, 0x80, 0x60, 0x40, 0x52]);
    }

    #[test]
    fn test_load_foundry_bytecode() {
        let file = artifact_file(r#"{"bytecode":{"object":"0x6080"}}"#);
        assert_eq!(load_bytecode(file.path()).unwrap(), vec![0x60, 0x80]);
    }

    #[test]
    fn test_empty_bytecode_rejected() {
        let file = artifact_file(r#"{"bytecode":"0x"}"#);
        assert!(matches!(load_bytecode(file.path()), Err(ArtifactError::MissingBytecode)));
    }

    #[test]
    fn test_constructor_args_layout() {
        let whitelist = parse_address(WHITELIST_CONTRACT_ADDRESS).unwrap();
        let encoded = constructor_args(METADATA_URL, whitelist);

        // head: string offset, address; tail: length + padded bytes
        assert_eq!(encoded.len() % 32, 0);
        assert_eq!(encoded[31], 0x40);
        assert_eq!(&encoded[44..64], whitelist.as_slice());
        assert_eq!(encoded[95] as usize, METADATA_URL.len());
        assert_eq!(&encoded[96..96 + METADATA_URL.len()], METADATA_URL.as_bytes());
    }

    #[test]
    fn test_parse_address() {
        assert!(parse_address(WHITELIST_CONTRACT_ADDRESS).is_ok());
        assert!(matches!(parse_address("0x123"), Err(DeployError::InvalidAddress(_))));
    }

    #[test]
    fn test_private_key_account() {
        let account = DeployAccount::from_private_key(HARDHAT_KEY).unwrap();
        assert_eq!(account.address(), parse_address(HARDHAT_ADDRESS).unwrap());

        let bare = DeployAccount::from_private_key(HARDHAT_KEY.trim_start_matches("0x")).unwrap();
        assert_eq!(bare.address(), account.address());

        assert!(matches!(
            DeployAccount::from_private_key("0x1234"),
            Err(DeployError::InvalidKey)
        ));
    }

    #[test]
    fn test_resolve_account() {
        let local = DeployAccount::resolve(Some(HARDHAT_KEY), Some(DEPLOYED)).unwrap();
        assert!(matches!(local, DeployAccount::Local(_)));

        let node = DeployAccount::resolve(None, Some(DEPLOYED)).unwrap();
        assert_eq!(node.address(), parse_address(DEPLOYED).unwrap());

        assert!(matches!(
            DeployAccount::resolve(None, None),
            Err(DeployError::MissingConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_deploy_returns_contract_address() {
        let file = artifact_file(r#"{"bytecode":"0x6080604052"}"#);
        let url = spawn_node("0x1", Arc::default()).await;

        let address = deploy_contract(&settings(url, node_account(), file.path()))
            .await
            .unwrap();
        assert_eq!(address, parse_address(DEPLOYED).unwrap());
    }

    #[tokio::test]
    async fn test_deploy_reports_revert() {
        let file = artifact_file(r#"{"bytecode":"0x6080604052"}"#);
        let url = spawn_node("0x0", Arc::default()).await;

        let err = deploy_contract(&settings(url, node_account(), file.path()))
            .await
            .unwrap_err();
        assert!(matches!(err, DeployError::Reverted(ref hash) if hash == "0xfeed"));
    }

    #[tokio::test]
    async fn test_deploy_with_private_key_sends_signed_creation() {
        let file = artifact_file(r#"{"bytecode":"0x6080604052"}"#);
        let raw_txs = Arc::new(Mutex::new(Vec::new()));
        let url = spawn_node("0x1", raw_txs.clone()).await;
        let account = DeployAccount::from_private_key(HARDHAT_KEY).unwrap();

        let address = deploy_contract(&settings(url, account, file.path())).await.unwrap();
        assert_eq!(address, parse_address(DEPLOYED).unwrap());

        let raw_txs = raw_txs.lock().unwrap();
        assert_eq!(raw_txs.len(), 1);
        let bytes = hex::decode(raw_txs[0].trim_start_matches("0x")).unwrap();
        let envelope = TxEnvelope::decode_2718(&mut bytes.as_slice()).unwrap();
        let signed = envelope.as_legacy().expect("legacy transaction");

        let tx = signed.tx();
        assert_eq!(tx.chain_id, Some(31337));
        assert_eq!(tx.nonce, 7);
        assert_eq!(tx.gas_price, 1_000_000_000);
        assert_eq!(tx.gas_limit, 120_000);
        assert_eq!(tx.to, TxKind::Create);
        assert!(tx.input.starts_with(&[0x60, 0x80, 0x60, 0x40, 0x52]));
        let whitelist = parse_address(WHITELIST_CONTRACT_ADDRESS).unwrap();
        assert_eq!(&tx.input[5..], constructor_args(METADATA_URL, whitelist).as_slice());
        assert_eq!(
            signed.recover_signer().unwrap(),
            parse_address(HARDHAT_ADDRESS).unwrap()
        );
    }
}
