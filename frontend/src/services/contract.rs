//! HalftoneEth contract binding.
//!
//! Reads need a [`Provider`], writes need a [`Signer`]; both are handed out
//! by the page controller after the wallet's network has been checked, so a
//! state-changing call cannot be made with a read-only capability.

use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall};

use super::wallet::{TransactionRequest, WalletProvider};
use crate::types::{AppError, AppResult};

sol! {
    /// Presale/public mint surface of the deployed collection.
    #[derive(Debug)]
    interface IHalftoneEth {
        function presaleMint() external payable;
        function mint() external payable;
        function startPresale() external;
        function presaleStarted() external view returns (bool);
        function presaleEnded() external view returns (uint256);
        function owner() external view returns (address);
        function tokenIds() external view returns (uint256);
    }
}

/// Read-only chain access.
pub struct Provider<'w, W> {
    wallet: &'w W,
}

impl<'w, W: WalletProvider> Provider<'w, W> {
    pub fn new(wallet: &'w W) -> Self {
        Self { wallet }
    }
}

/// Chain access that can sign paid transactions.
pub struct Signer<'w, W> {
    wallet: &'w W,
    address: Address,
}

impl<'w, W: WalletProvider> Signer<'w, W> {
    pub fn new(wallet: &'w W, address: Address) -> Self {
        Self { wallet, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

/// A submitted, not yet confirmed transaction.
pub struct PendingTransaction<'w, W> {
    wallet: &'w W,
    hash: String,
}

impl<'w, W: WalletProvider> PendingTransaction<'w, W> {
    /// Wait until mined.
    pub async fn wait(self) -> AppResult<()> {
        self.wallet.wait_for_transaction(&self.hash).await
    }
}

/// Handle on the deployed HalftoneEth contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HalftoneContract {
    address: Address,
}

impl HalftoneContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    async fn read<W: WalletProvider, C: SolCall>(
        &self,
        provider: &Provider<'_, W>,
        call: C,
    ) -> AppResult<C::Return> {
        let output = provider.wallet.call(self.address, call.abi_encode()).await?;
        C::abi_decode_returns(&output, true)
            .map_err(|e| AppError::Contract(format!("{}: {}", C::SIGNATURE, e)))
    }

    async fn send<'w, W: WalletProvider, C: SolCall>(
        &self,
        signer: &Signer<'w, W>,
        call: C,
        value: U256,
    ) -> AppResult<PendingTransaction<'w, W>> {
        let tx = TransactionRequest {
            from: signer.address,
            to: self.address,
            data: call.abi_encode(),
            value,
        };
        let hash = signer.wallet.send_transaction(tx).await?;
        log::info!("📤 {} sent: {}", C::SIGNATURE, hash);
        Ok(PendingTransaction {
            wallet: signer.wallet,
            hash,
        })
    }

    pub async fn presale_started<W: WalletProvider>(
        &self,
        provider: &Provider<'_, W>,
    ) -> AppResult<bool> {
        Ok(self.read(provider, IHalftoneEth::presaleStartedCall {}).await?._0)
    }

    /// Presale end as unix seconds.
    ///
    /// The contract stores a uint256; anything beyond `u64` saturates, which
    /// still compares as "far future".
    pub async fn presale_ended<W: WalletProvider>(
        &self,
        provider: &Provider<'_, W>,
    ) -> AppResult<u64> {
        let ends_at = self.read(provider, IHalftoneEth::presaleEndedCall {}).await?._0;
        Ok(u256_to_u64(ends_at))
    }

    pub async fn owner<W: WalletProvider>(&self, provider: &Provider<'_, W>) -> AppResult<Address> {
        Ok(self.read(provider, IHalftoneEth::ownerCall {}).await?._0)
    }

    /// Number of tokens minted so far.
    pub async fn token_ids<W: WalletProvider>(&self, provider: &Provider<'_, W>) -> AppResult<u64> {
        let minted = self.read(provider, IHalftoneEth::tokenIdsCall {}).await?._0;
        Ok(u256_to_u64(minted))
    }

    pub async fn start_presale<'w, W: WalletProvider>(
        &self,
        signer: &Signer<'w, W>,
    ) -> AppResult<PendingTransaction<'w, W>> {
        self.send(signer, IHalftoneEth::startPresaleCall {}, U256::ZERO).await
    }

    /// Whitelist-only mint during the presale.
    pub async fn presale_mint<'w, W: WalletProvider>(
        &self,
        signer: &Signer<'w, W>,
        price: U256,
    ) -> AppResult<PendingTransaction<'w, W>> {
        self.send(signer, IHalftoneEth::presaleMintCall {}, price).await
    }

    /// Public mint after the presale.
    pub async fn mint<'w, W: WalletProvider>(
        &self,
        signer: &Signer<'w, W>,
        price: U256,
    ) -> AppResult<PendingTransaction<'w, W>> {
        self.send(signer, IHalftoneEth::mintCall {}, price).await
    }
}

fn u256_to_u64(value: U256) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}
