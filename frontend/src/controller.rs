//! Page controller: UI actions in, page updates out.
//!
//! Buttons and timers call into [`MintController`]; it talks to the wallet
//! and the contract and reports every state change as a [`PageUpdate`] to an
//! [`UpdateSink`]. The Leptos page applies updates to its signals, tests
//! apply them to plain values.
//!
//! Every write follows the same shape: acquire a signer, send the call with
//! its payment, flag `loading`, wait for the receipt, clear `loading`, toast.
//! A failure at any step produces exactly one error toast. Nothing retries.

use alloy_primitives::U256;

use crate::config::{MINT_PRICE_WEI, NETWORK_NAME, REQUIRED_CHAIN_ID};
use crate::services::contract::{HalftoneContract, Provider, Signer};
use crate::services::wallet::WalletProvider;
use crate::types::{AppError, AppResult, ToastKind};

/// User-triggered actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    ConnectWallet,
    StartPresale,
    PresaleMint,
    PublicMint,
    /// Clicked while the presale is closed
    NotStarted,
}

/// A single change to the page.
#[derive(Clone, Debug, PartialEq)]
pub enum PageUpdate {
    WalletConnected(bool),
    PresaleStarted(bool),
    PresaleEnded { ended: bool, ends_at_ms: i64 },
    IsOwner(bool),
    TokenIdsMinted(u64),
    Loading(bool),
    Toast(ToastKind, String),
}

/// Page state derived from contract reads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageState {
    pub wallet_connected: bool,
    pub presale_started: bool,
    pub presale_ended: bool,
    /// Countdown target; 0 until the end time has been read
    pub presale_ends_at_ms: i64,
    pub is_owner: bool,
    pub token_ids_minted: u64,
    /// A transaction is waiting for confirmation
    pub loading: bool,
}

impl PageState {
    /// Apply an update. Toasts are not part of the page state and are ignored.
    pub fn apply(&mut self, update: &PageUpdate) {
        match update {
            PageUpdate::WalletConnected(v) => self.wallet_connected = *v,
            PageUpdate::PresaleStarted(v) => self.presale_started = *v,
            PageUpdate::PresaleEnded { ended, ends_at_ms } => {
                self.presale_ended = *ended;
                self.presale_ends_at_ms = *ends_at_ms;
            }
            PageUpdate::IsOwner(v) => self.is_owner = *v,
            PageUpdate::TokenIdsMinted(n) => self.token_ids_minted = *n,
            PageUpdate::Loading(v) => self.loading = *v,
            PageUpdate::Toast(..) => {}
        }
    }
}

/// Receiver of page updates.
pub trait UpdateSink {
    fn apply(&self, update: PageUpdate);
}

/// Whether the presale poll should keep running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    Continue,
    /// Presale ended; nothing left to watch
    Stop,
}

#[derive(Clone, Copy, Debug)]
enum Write {
    StartPresale,
    PresaleMint,
    PublicMint,
}

/// Wallet + contract binding for the minting page.
pub struct MintController<W, S> {
    wallet: W,
    sink: S,
    contract: HalftoneContract,
}

impl<W: WalletProvider, S: UpdateSink> MintController<W, S> {
    pub fn new(wallet: W, sink: S, contract: HalftoneContract) -> Self {
        Self {
            wallet,
            sink,
            contract,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Handle a user action.
    pub async fn dispatch(&self, action: Action) {
        log::debug!("🖱️  {:?}", action);
        match action {
            Action::ConnectWallet => self.connect_wallet().await,
            Action::StartPresale => self.start_presale().await,
            Action::PresaleMint => self.mint(Write::PresaleMint).await,
            Action::PublicMint => self.mint(Write::PublicMint).await,
            Action::NotStarted => self.toast(
                ToastKind::Error,
                "The presale still not open, please wait for the developer",
            ),
        }
    }

    /// Page-load check: look for an already authorised account and, if there
    /// is one, connect and load the presale state. Returns whether a wallet
    /// account was found.
    pub async fn check_if_wallet_is_connected(&self) -> bool {
        if !self.wallet.is_available() {
            self.toast(ToastKind::Error, "Make sure you have MetaMask!");
            return false;
        }

        match self.wallet.accounts().await {
            Ok(accounts) => match accounts.first() {
                Some(account) => {
                    self.toast(ToastKind::Success, format!("Found a wallet address: {}.", account));
                    self.connect_wallet().await;
                    true
                }
                None => {
                    self.toast(ToastKind::Error, "Please connect your MetaMask wallet.");
                    false
                }
            },
            Err(e) => {
                log::error!("❌ Could not list accounts: {}", e);
                false
            }
        }
    }

    /// One tick of the presale poll.
    pub async fn poll(&self) -> PollOutcome {
        if self.check_if_presale_started().await && self.check_if_presale_ended().await {
            log::info!("🏁 Presale ended, stopping poll");
            return PollOutcome::Stop;
        }
        PollOutcome::Continue
    }

    async fn connect_wallet(&self) {
        if !self.wallet.is_available() {
            self.toast(ToastKind::Error, "Please install MetaMask!");
            return;
        }
        match self.provider().await {
            Ok(_) => self.refresh().await,
            Err(e) => {
                log::error!("❌ Wallet connection failed: {}", e);
                self.toast(ToastKind::Error, e.to_string());
            }
        }
    }

    async fn refresh(&self) {
        if self.check_if_presale_started().await {
            self.check_if_presale_ended().await;
        }
        self.get_token_ids_minted().await;
    }

    // -------------------------------------------------------------------------
    // Capabilities
    // -------------------------------------------------------------------------

    async fn ensure_network(&self) -> AppResult<()> {
        if !self.wallet.is_available() {
            return Err(AppError::Wallet("Please install MetaMask!".to_string()));
        }
        self.wallet.connect().await?;
        let chain_id = self.wallet.chain_id().await?;
        if chain_id != REQUIRED_CHAIN_ID {
            log::warn!("⚠️  Wrong network: chain {} (need {})", chain_id, REQUIRED_CHAIN_ID);
            return Err(AppError::Network(format!("Change the network to {}", NETWORK_NAME)));
        }
        Ok(())
    }

    /// Read-only access; marks the wallet connected.
    async fn provider(&self) -> AppResult<Provider<'_, W>> {
        self.ensure_network().await?;
        self.sink.apply(PageUpdate::WalletConnected(true));
        Ok(Provider::new(&self.wallet))
    }

    async fn signer(&self) -> AppResult<Signer<'_, W>> {
        self.ensure_network().await?;
        let address = self.wallet.signer_address().await?;
        Ok(Signer::new(&self.wallet, address))
    }

    // -------------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------------

    async fn submit(&self, write: Write) -> AppResult<()> {
        let signer = self.signer().await?;
        let price = U256::from(MINT_PRICE_WEI);

        let pending = match write {
            Write::StartPresale => self.contract.start_presale(&signer).await?,
            Write::PresaleMint => self.contract.presale_mint(&signer, price).await?,
            Write::PublicMint => self.contract.mint(&signer, price).await?,
        };

        self.sink.apply(PageUpdate::Loading(true));
        let confirmed = pending.wait().await;
        self.sink.apply(PageUpdate::Loading(false));
        confirmed
    }

    async fn start_presale(&self) {
        match self.submit(Write::StartPresale).await {
            Ok(()) => {
                self.check_if_presale_started().await;
                self.toast(
                    ToastKind::Success,
                    "Successfully started the presale of Halftone-ETH NFT!",
                );
            }
            Err(e) => {
                log::error!("❌ startPresale failed: {}", e);
                self.toast(
                    ToastKind::Error,
                    format!("Presale Halftone-ETH NFT unsuccessful: {}", e),
                );
            }
        }
    }

    async fn mint(&self, write: Write) {
        match self.submit(write).await {
            Ok(()) => {
                self.get_token_ids_minted().await;
                self.toast(ToastKind::Success, "Successfully minted Halftone-ETH NFT!");
            }
            Err(e) => {
                log::error!("❌ {:?} failed: {}", write, e);
                self.toast(
                    ToastKind::Error,
                    format!("Minting Halftone-ETH NFT unsuccessful: {}", e),
                );
            }
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    async fn check_if_presale_started(&self) -> bool {
        let started = async {
            let provider = self.provider().await?;
            self.contract.presale_started(&provider).await
        };
        match started.await {
            Ok(started) => {
                if !started {
                    self.get_owner().await;
                }
                self.sink.apply(PageUpdate::PresaleStarted(started));
                started
            }
            Err(e) => {
                log::error!("❌ presaleStarted() failed: {}", e);
                false
            }
        }
    }

    async fn check_if_presale_ended(&self) -> bool {
        let ends_at = async {
            let provider = self.provider().await?;
            self.contract.presale_ended(&provider).await
        };
        match ends_at.await {
            Ok(ends_at_secs) => {
                let ended = presale_has_ended(ends_at_secs, now_secs());
                self.sink.apply(PageUpdate::PresaleEnded {
                    ended,
                    ends_at_ms: secs_to_ms(ends_at_secs),
                });
                ended
            }
            Err(e) => {
                log::error!("❌ presaleEnded() failed: {}", e);
                false
            }
        }
    }

    async fn get_owner(&self) {
        let is_owner = async {
            let provider = self.provider().await?;
            let owner = self.contract.owner(&provider).await?;
            let signer = self.signer().await?;
            Ok::<_, AppError>(signer.address() == owner)
        };
        match is_owner.await {
            Ok(is_owner) => self.sink.apply(PageUpdate::IsOwner(is_owner)),
            Err(e) => {
                log::error!("❌ owner() failed: {}", e);
                self.toast(ToastKind::Error, e.to_string());
            }
        }
    }

    async fn get_token_ids_minted(&self) {
        let minted = async {
            let provider = self.provider().await?;
            self.contract.token_ids(&provider).await
        };
        match minted.await {
            Ok(minted) => self.sink.apply(PageUpdate::TokenIdsMinted(minted)),
            Err(e) => {
                log::error!("❌ tokenIds() failed: {}", e);
                self.toast(ToastKind::Error, e.to_string());
            }
        }
    }

    fn toast(&self, kind: ToastKind, text: impl Into<String>) {
        self.sink.apply(PageUpdate::Toast(kind, text.into()));
    }
}

/// Presale is over once its end second is strictly in the past.
pub fn presale_has_ended(ends_at_secs: u64, now_secs: u64) -> bool {
    ends_at_secs < now_secs
}

fn now_secs() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}

fn secs_to_ms(secs: u64) -> i64 {
    i64::try_from(secs.saturating_mul(1000)).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::contract::IHalftoneEth;
    use crate::services::wallet::TransactionRequest;
    use crate::toast::ToastQueue;
    use alloy_primitives::Address;
    use alloy_sol_types::{SolCall, SolValue};
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    const OWNER: Address = Address::repeat_byte(0xaa);
    const USER: Address = Address::repeat_byte(0xbb);
    const CONTRACT: Address = Address::repeat_byte(0xcc);

    struct MockWallet {
        available: bool,
        accounts: Vec<String>,
        chain_id: u64,
        signer: Address,
        started: Cell<bool>,
        ends_at: u64,
        minted: Cell<u64>,
        reject_send: bool,
        revert: bool,
        sent: RefCell<Vec<TransactionRequest>>,
    }

    impl Default for MockWallet {
        fn default() -> Self {
            Self {
                available: true,
                accounts: vec![USER.to_string()],
                chain_id: REQUIRED_CHAIN_ID,
                signer: USER,
                started: Cell::new(false),
                ends_at: 0,
                minted: Cell::new(3),
                reject_send: false,
                revert: false,
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    fn selector(data: &[u8]) -> [u8; 4] {
        [data[0], data[1], data[2], data[3]]
    }

    impl WalletProvider for MockWallet {
        fn is_available(&self) -> bool {
            self.available
        }

        async fn accounts(&self) -> AppResult<Vec<String>> {
            Ok(self.accounts.clone())
        }

        async fn connect(&self) -> AppResult<()> {
            Ok(())
        }

        async fn chain_id(&self) -> AppResult<u64> {
            Ok(self.chain_id)
        }

        async fn signer_address(&self) -> AppResult<Address> {
            Ok(self.signer)
        }

        async fn call(&self, to: Address, data: Vec<u8>) -> AppResult<Vec<u8>> {
            assert_eq!(to, CONTRACT);
            let output = match selector(&data) {
                s if s == IHalftoneEth::presaleStartedCall::SELECTOR => {
                    self.started.get().abi_encode()
                }
                s if s == IHalftoneEth::presaleEndedCall::SELECTOR => {
                    U256::from(self.ends_at).abi_encode()
                }
                s if s == IHalftoneEth::ownerCall::SELECTOR => OWNER.abi_encode(),
                s if s == IHalftoneEth::tokenIdsCall::SELECTOR => {
                    U256::from(self.minted.get()).abi_encode()
                }
                other => panic!("unexpected call {:?}", other),
            };
            Ok(output)
        }

        async fn send_transaction(&self, tx: TransactionRequest) -> AppResult<String> {
            if self.reject_send {
                return Err(AppError::Transaction("User denied transaction signature.".to_string()));
            }
            let s = selector(&tx.data);
            if self.revert {
                // reverted transactions leave the contract untouched
            } else if s == IHalftoneEth::startPresaleCall::SELECTOR {
                self.started.set(true);
            } else {
                self.minted.set(self.minted.get() + 1);
            }
            self.sent.borrow_mut().push(tx);
            Ok("0xfeed".to_string())
        }

        async fn wait_for_transaction(&self, tx_hash: &str) -> AppResult<()> {
            if self.revert {
                return Err(AppError::Transaction(format!("transaction {} reverted", tx_hash)));
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        state: RefCell<PageState>,
        toasts: RefCell<ToastQueue>,
        loading_changes: RefCell<Vec<bool>>,
    }

    impl UpdateSink for RecordingSink {
        fn apply(&self, update: PageUpdate) {
            match &update {
                PageUpdate::Toast(kind, text) => {
                    let now = self.toasts.borrow().len() as u64;
                    self.toasts.borrow_mut().push(*kind, text.clone(), now);
                }
                PageUpdate::Loading(v) => self.loading_changes.borrow_mut().push(*v),
                _ => {}
            }
            self.state.borrow_mut().apply(&update);
        }
    }

    fn controller(wallet: MockWallet) -> MintController<MockWallet, RecordingSink> {
        MintController::new(wallet, RecordingSink::default(), HalftoneContract::new(CONTRACT))
    }

    fn toasts(c: &MintController<MockWallet, RecordingSink>) -> Vec<(String, String)> {
        c.sink()
            .toasts
            .borrow()
            .iter()
            .map(|t| (t.title.clone(), t.description.clone()))
            .collect()
    }

    #[test]
    fn test_rejected_mint_gives_one_error_toast() {
        let c = controller(MockWallet {
            started: Cell::new(true),
            reject_send: true,
            ..Default::default()
        });
        block_on(c.dispatch(Action::PublicMint));

        let toasts = toasts(&c);
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].0, "Error");
        assert!(toasts[0].1.starts_with("Minting Halftone-ETH NFT unsuccessful:"));
        assert!(toasts[0].1.contains("User denied"));
        assert!(!c.sink().state.borrow().loading);
    }

    #[test]
    fn test_reverted_mint_clears_loading() {
        let c = controller(MockWallet {
            started: Cell::new(true),
            revert: true,
            ..Default::default()
        });
        block_on(c.dispatch(Action::PresaleMint));

        assert_eq!(*c.sink().loading_changes.borrow(), vec![true, false]);
        assert!(!c.sink().state.borrow().loading);
        let toasts = toasts(&c);
        assert_eq!(toasts.len(), 1);
        assert!(toasts[0].1.contains("reverted"));
    }

    #[test]
    fn test_successful_mint_pays_and_refreshes_count() {
        let c = controller(MockWallet {
            started: Cell::new(true),
            ..Default::default()
        });
        block_on(c.dispatch(Action::PresaleMint));

        let sent = c.sink();
        assert_eq!(sent.state.borrow().token_ids_minted, 4);
        assert!(!sent.state.borrow().loading);
        assert_eq!(
            toasts(&c),
            vec![("Success".to_string(), "Successfully minted Halftone-ETH NFT!".to_string())]
        );
    }

    #[test]
    fn test_mint_sends_price_and_selector() {
        let wallet = MockWallet {
            started: Cell::new(true),
            ..Default::default()
        };
        let c = controller(wallet);
        block_on(c.dispatch(Action::PublicMint));

        let sent = c.wallet.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, USER);
        assert_eq!(sent[0].to, CONTRACT);
        assert_eq!(sent[0].value, U256::from(MINT_PRICE_WEI));
        assert_eq!(sent[0].data, IHalftoneEth::mintCall::SELECTOR.to_vec());
    }

    #[test]
    fn test_wrong_network_blocks_mint() {
        let c = controller(MockWallet {
            chain_id: 1,
            started: Cell::new(true),
            ..Default::default()
        });
        block_on(c.dispatch(Action::PublicMint));

        assert!(c.wallet.sent.borrow().is_empty());
        let toasts = toasts(&c);
        assert_eq!(toasts.len(), 1);
        assert!(toasts[0].1.ends_with("Change the network to Rinkeby"));
        assert!(!c.sink().state.borrow().loading);
    }

    #[test]
    fn test_owner_starts_presale() {
        let c = controller(MockWallet {
            signer: OWNER,
            accounts: vec![OWNER.to_string()],
            ends_at: 4_000_000_000,
            ..Default::default()
        });
        assert!(block_on(c.check_if_wallet_is_connected()));
        {
            let state = c.sink().state.borrow();
            assert!(state.wallet_connected);
            assert!(state.is_owner);
            assert!(!state.presale_started);
            assert_eq!(state.token_ids_minted, 3);
        }

        block_on(c.dispatch(Action::StartPresale));
        assert!(c.sink().state.borrow().presale_started);
        let toasts = toasts(&c);
        assert_eq!(
            toasts.last().unwrap().1,
            "Successfully started the presale of Halftone-ETH NFT!"
        );
    }

    #[test]
    fn test_reverted_start_presale_reports_once() {
        let c = controller(MockWallet {
            signer: OWNER,
            accounts: vec![OWNER.to_string()],
            revert: true,
            ..Default::default()
        });
        block_on(c.dispatch(Action::StartPresale));

        let toasts = toasts(&c);
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].0, "Error");
        assert!(toasts[0].1.starts_with("Presale Halftone-ETH NFT unsuccessful:"));
        assert!(toasts[0].1.contains("reverted"));
        assert_eq!(*c.sink().loading_changes.borrow(), vec![true, false]);

        let state = c.sink().state.borrow();
        assert!(!state.loading);
        assert!(!state.presale_started);
    }

    #[test]
    fn test_non_owner_is_not_owner() {
        let c = controller(MockWallet::default());
        block_on(c.dispatch(Action::ConnectWallet));
        let state = c.sink().state.borrow();
        assert!(state.wallet_connected);
        assert!(!state.is_owner);
    }

    #[test]
    fn test_missing_wallet() {
        let c = controller(MockWallet {
            available: false,
            ..Default::default()
        });
        assert!(!block_on(c.check_if_wallet_is_connected()));
        block_on(c.dispatch(Action::ConnectWallet));
        assert_eq!(
            toasts(&c),
            vec![
                ("Error".to_string(), "Make sure you have MetaMask!".to_string()),
                ("Error".to_string(), "Please install MetaMask!".to_string()),
            ]
        );
        assert!(!c.sink().state.borrow().wallet_connected);
    }

    #[test]
    fn test_no_authorised_account() {
        let c = controller(MockWallet {
            accounts: vec![],
            ..Default::default()
        });
        assert!(!block_on(c.check_if_wallet_is_connected()));
        assert_eq!(toasts(&c)[0].1, "Please connect your MetaMask wallet.");
    }

    #[test]
    fn test_poll_stops_after_presale_end() {
        let c = controller(MockWallet {
            started: Cell::new(true),
            ends_at: 1,
            ..Default::default()
        });
        assert_eq!(block_on(c.poll()), PollOutcome::Stop);
        let state = c.sink().state.borrow();
        assert!(state.presale_ended);
        assert_eq!(state.presale_ends_at_ms, 1000);
    }

    #[test]
    fn test_poll_continues_during_presale() {
        let c = controller(MockWallet {
            started: Cell::new(true),
            ends_at: 4_000_000_000,
            ..Default::default()
        });
        assert_eq!(block_on(c.poll()), PollOutcome::Continue);
        let state = c.sink().state.borrow();
        assert!(state.presale_started);
        assert!(!state.presale_ended);
        assert_eq!(state.presale_ends_at_ms, 4_000_000_000_000);
    }

    #[test]
    fn test_poll_continues_before_presale() {
        let c = controller(MockWallet::default());
        assert_eq!(block_on(c.poll()), PollOutcome::Continue);
        assert!(!c.sink().state.borrow().presale_started);
    }

    #[test]
    fn test_not_started_toast() {
        let c = controller(MockWallet::default());
        block_on(c.dispatch(Action::NotStarted));
        assert_eq!(
            toasts(&c),
            vec![(
                "Error".to_string(),
                "The presale still not open, please wait for the developer".to_string()
            )]
        );
    }

    #[test]
    fn test_presale_end_comparison() {
        assert!(presale_has_ended(99, 100));
        assert!(!presale_has_ended(100, 100));
        assert!(!presale_has_ended(u64::MAX, 100));
        assert_eq!(secs_to_ms(u64::MAX), i64::MAX);
    }
}
