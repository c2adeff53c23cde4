//! Halftone CLI - metadata server and contract deployment
//!
//! # Commands
//!
//! ```bash
//! halftone serve                 # Start metadata server (port 3000)
//! halftone deploy                # Deploy HalftoneEth, print its address
//!                                # (PRIVATE_KEY signs locally, else DEPLOYER_ADDRESS via the node)
//! halftone metadata 5            # Print the descriptor for token 5
//! ```
//!
//! Settings are read from `.env` first; flags override them.

use clap::{Parser, Subcommand};
use halftone::config::{
    DEFAULT_ARTIFACT_PATH, DEFAULT_PORT, METADATA_URL, WHITELIST_CONTRACT_ADDRESS,
};
use halftone::deploy::{parse_address, DeployAccount};
use halftone::{deploy_contract, DeployError, DeploySettings, MetadataConfig, TokenMetadata};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "halftone")]
#[command(about = "Halftone ETH metadata server and deployment tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the metadata HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Deploy the HalftoneEth contract
    Deploy {
        /// JSON-RPC endpoint of the node
        #[arg(long, env = "RPC_URL")]
        rpc_url: Option<String>,

        /// Deployer private key; signs locally and sends a raw transaction
        #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
        private_key: Option<String>,

        /// Deployer account signed for by the node (when no private key is given)
        #[arg(long, env = "DEPLOYER_ADDRESS")]
        from: Option<String>,

        /// Compiled contract artifact (hardhat or foundry JSON)
        #[arg(long, env = "CONTRACT_ARTIFACT", default_value = DEFAULT_ARTIFACT_PATH)]
        artifact: PathBuf,

        /// Metadata base URI passed to the constructor
        #[arg(long, default_value = METADATA_URL)]
        metadata_url: String,

        /// Whitelist contract passed to the constructor
        #[arg(long, default_value = WHITELIST_CONTRACT_ADDRESS)]
        whitelist: String,
    },

    /// Print the metadata descriptor for a token
    Metadata {
        /// Token id (echoed as-is)
        token_id: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present) before clap reads env-backed flags
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port } => cmd_serve(port).await,

        Commands::Deploy {
            rpc_url,
            private_key,
            from,
            artifact,
            metadata_url,
            whitelist,
        } => {
            let account = (private_key, from);
            if let Err(e) = cmd_deploy(rpc_url, account, artifact, metadata_url, &whitelist).await {
                eprintln!("Error deploying the Halftone Eth contract: {}", e);
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Metadata { token_id } => cmd_metadata(&token_id),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    halftone::server::start_server(port, MetadataConfig::from_env()).await?;
    Ok(())
}

async fn cmd_deploy(
    rpc_url: Option<String>,
    (private_key, from): (Option<String>, Option<String>),
    artifact: PathBuf,
    metadata_url: String,
    whitelist: &str,
) -> Result<(), DeployError> {
    let rpc_url = rpc_url.ok_or(DeployError::MissingConfig("RPC_URL"))?;
    let account = DeployAccount::resolve(private_key.as_deref(), from.as_deref())?;

    let mut settings = DeploySettings::new(rpc_url, account, artifact);
    settings.metadata_url = metadata_url;
    settings.whitelist = parse_address(whitelist)?;

    let address = deploy_contract(&settings).await?;
    println!("Halftone Eth Contract Address: {}", address);
    Ok(())
}

fn cmd_metadata(token_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = MetadataConfig::from_env();
    let metadata = TokenMetadata::for_token(token_id, &config.image_base_url);
    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}
