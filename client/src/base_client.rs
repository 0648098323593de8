//! Native Base Client event loop.
//!
//! Grounded on `sdk/src/app_client.rs`'s control flow (attach, subscribe,
//! match-on-frame loop, checkpoint application) and `client/src/app_client.rs`'s
//! simpler `AppClient` skeleton, translated off wasm-bindgen: the teacher's
//! JS `Function` callbacks become plain `FnMut` closures registered on a
//! builder before `attach_game` is called.

use std::collections::HashMap;
use std::sync::Arc;

use futures::StreamExt;
use sha2::{Digest, Sha256};
use tokio::sync::mpsc;

use lumen_core::{
    checkpoint::{Checkpoint, CheckpointOnChain},
    connection::{ConnectionState, ConnectionT, SubscribeItem},
    context::GameContext,
    encryptor::EncryptorT,
    error::{Error, Result},
    transport::TransportT,
    types::{
        Addr, AttachGameParams, BroadcastFrame, ClientMode, ExitGameParams, GameAccount,
        PlayerProfile, RandomId, SecretKey, SubmitEventParams, SubmitMessageParams,
        SubscribeEventParams, TxState,
    },
};
use lumen_api::event::{CustomEvent, Event, Message};
use lumen_handler::{HandlerManager, HandlerT};

use crate::connection::Connection;

/// `spec.md` §7: `OnchainDataNotFound` is only raised after the account
/// fetch has been retried this many times, spaced by this backoff.
const ACCOUNT_FETCH_RETRIES: u32 = 3;
const ACCOUNT_FETCH_BACKOFF: std::time::Duration = std::time::Duration::from_secs(3);

/// Fetch a game account, retrying on a transient miss before giving up.
async fn fetch_game_account(
    transport: &Arc<dyn TransportT>,
    game_addr: &str,
) -> Result<GameAccount> {
    for attempt in 0..ACCOUNT_FETCH_RETRIES {
        if let Some(account) = transport.get_game_account(game_addr).await {
            return Ok(account);
        }
        if attempt + 1 < ACCOUNT_FETCH_RETRIES {
            tokio::time::sleep(ACCOUNT_FETCH_BACKOFF).await;
        }
    }
    Err(Error::OnchainDataNotFound(game_addr.to_owned()))
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn sha256_hex(data: &[u8]) -> String {
    hex(&Sha256::digest(data))
}

type EventCallback = Box<dyn FnMut(&GameContext, &Event) + Send>;
type MessageCallback = Box<dyn FnMut(&Message) + Send>;
type TxStateCallback = Box<dyn FnMut(&TxState) + Send>;
type ProfileCallback = Box<dyn FnMut(PlayerProfile) + Send>;
type ReadyCallback = Box<dyn FnMut() + Send>;
type ErrorCallback = Box<dyn FnMut(&Error) + Send>;

#[derive(Default)]
struct Callbacks {
    on_event: Option<EventCallback>,
    on_message: Option<MessageCallback>,
    on_tx_state: Option<TxStateCallback>,
    on_profile: Option<ProfileCallback>,
    on_ready: Option<ReadyCallback>,
    on_error: Option<ErrorCallback>,
}

/// Builds a [`BaseClient`], registering callbacks ahead of `attach_game`
/// the way the teacher's `AppClient`/wasm `RaceClient` register JS
/// callbacks before `start()`.
pub struct BaseClientBuilder {
    mode: ClientMode,
    transport: Arc<dyn TransportT>,
    encryptor: Arc<dyn EncryptorT>,
    handler_manager: Arc<HandlerManager>,
    max_retries: u32,
    callbacks: Callbacks,
}

impl BaseClientBuilder {
    pub fn new(
        mode: ClientMode,
        transport: Arc<dyn TransportT>,
        encryptor: Arc<dyn EncryptorT>,
    ) -> Self {
        let handler_manager = Arc::new(HandlerManager::new(transport.clone()));
        Self {
            mode,
            transport,
            encryptor,
            handler_manager,
            max_retries: 5,
            callbacks: Callbacks::default(),
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn on_event<F: FnMut(&GameContext, &Event) + Send + 'static>(mut self, f: F) -> Self {
        self.callbacks.on_event = Some(Box::new(f));
        self
    }

    pub fn on_message<F: FnMut(&Message) + Send + 'static>(mut self, f: F) -> Self {
        self.callbacks.on_message = Some(Box::new(f));
        self
    }

    pub fn on_tx_state<F: FnMut(&TxState) + Send + 'static>(mut self, f: F) -> Self {
        self.callbacks.on_tx_state = Some(Box::new(f));
        self
    }

    pub fn on_profile<F: FnMut(PlayerProfile) + Send + 'static>(mut self, f: F) -> Self {
        self.callbacks.on_profile = Some(Box::new(f));
        self
    }

    pub fn on_ready<F: FnMut() + Send + 'static>(mut self, f: F) -> Self {
        self.callbacks.on_ready = Some(Box::new(f));
        self
    }

    pub fn on_error<F: FnMut(&Error) + Send + 'static>(mut self, f: F) -> Self {
        self.callbacks.on_error = Some(Box::new(f));
        self
    }

    /// Attach to a running game: fetch the account, build the Game Context,
    /// apply the latest checkpoint, subscribe starting at the current
    /// settle version, run the handler's `init_state`, and invoke the event
    /// callback once with the synthetic `Init` event.
    ///
    /// Per `spec.md` §7, any failure anywhere in this pipeline is surfaced
    /// as `AttachFailed` via `onError` before being returned.
    pub async fn attach_game(mut self, game_addr: &str, signer: Addr) -> Result<BaseClient> {
        match self.try_attach_game(game_addr, signer).await {
            Ok(client) => Ok(client),
            Err(e) => {
                let wrapped = Error::AttachFailed(e.to_string());
                if let Some(on_error) = self.callbacks.on_error.as_mut() {
                    on_error(&wrapped);
                }
                Err(wrapped)
            }
        }
    }

    async fn try_attach_game(&mut self, game_addr: &str, signer: Addr) -> Result<BaseClient> {
        let game_account = fetch_game_account(&self.transport, game_addr).await?;

        let transactor_addr = game_account
            .transactor_addr
            .clone()
            .ok_or(Error::GameNotServed)?;

        let transactor_account = self
            .transport
            .get_server_account(&transactor_addr)
            .await
            .ok_or(Error::CantFindTransactor)?;

        let mut context = GameContext::try_new(&game_account)?;

        let mut handler = self
            .handler_manager
            .get_handler(&game_account.bundle_addr)
            .await?;

        let checkpoint_on_chain = game_account.checkpoint_on_chain.clone();
        if let Some(onchain) = &checkpoint_on_chain {
            context.apply_checkpoint(onchain.access_version, context.versions.settle_version)?;
        }

        let connection = crate::connection::connect(&transactor_account.endpoint).await?;

        let key = self.encryptor.export_public_key(None)?.into_bytes();
        connection
            .attach_game(AttachGameParams {
                signer: signer.clone(),
                key,
            })
            .await?;

        let (profile_tx, profile_rx) = mpsc::unbounded_channel();

        let mut client = BaseClient {
            addr: game_addr.to_owned(),
            bundle_addr: game_account.bundle_addr.clone(),
            signer,
            mode: self.mode,
            transport: self.transport.clone(),
            encryptor: self.encryptor.clone(),
            handler_manager: self.handler_manager.clone(),
            handler,
            connection,
            context,
            checkpoint_on_chain,
            decryption_cache: HashMap::new(),
            callbacks: std::mem::take(&mut self.callbacks),
            max_retries: self.max_retries,
            profile_tx,
            profile_rx,
        };

        let init_account = game_account.derive_init_account();
        let effect = client.handler.init_state(&init_account)?;
        client.context.apply_effect(effect)?;
        client.invoke_on_event(&Event::Init);

        if let Some(on_ready) = client.callbacks.on_ready.as_mut() {
            on_ready();
        }

        Ok(client)
    }
}

/// The running client: owns the Game Context, the connection, and the
/// WASM handler, and drives the subscription loop.
pub struct BaseClient {
    addr: String,
    bundle_addr: String,
    signer: Addr,
    #[allow(dead_code)]
    mode: ClientMode,
    transport: Arc<dyn TransportT>,
    encryptor: Arc<dyn EncryptorT>,
    handler_manager: Arc<HandlerManager>,
    handler: Box<dyn HandlerT>,
    connection: Connection,
    context: GameContext,
    checkpoint_on_chain: Option<CheckpointOnChain>,
    decryption_cache: HashMap<RandomId, HashMap<usize, String>>,
    callbacks: Callbacks,
    max_retries: u32,
    profile_tx: mpsc::UnboundedSender<PlayerProfile>,
    profile_rx: mpsc::UnboundedReceiver<PlayerProfile>,
}

impl BaseClient {
    pub fn context(&self) -> &GameContext {
        &self.context
    }

    pub fn id_to_addr(&self, id: u64) -> Result<Addr> {
        self.context.id_to_addr(id)
    }

    pub fn addr_to_id(&self, addr: &str) -> Result<u64> {
        self.context.addr_to_id(addr)
    }

    pub async fn submit_event<E: CustomEvent>(&self, custom_event: &E) -> Result<()> {
        let sender = self.addr_to_id(&self.signer)?;
        let event = Event::custom(sender, custom_event);
        self.connection
            .submit_event(SubmitEventParams { event })
            .await
    }

    pub async fn submit_message(&self, content: String) -> Result<()> {
        self.connection
            .submit_message(SubmitMessageParams { content })
            .await
    }

    pub async fn exit(&self) -> Result<()> {
        self.connection.exit_game(ExitGameParams {}).await
    }

    /// Drive the subscription loop until `detach` is requested or the
    /// reconnect budget is exhausted.
    pub async fn run(&mut self) -> Result<()> {
        let mut retries = 0u32;
        loop {
            let mut stream = self
                .connection
                .subscribe_events(SubscribeEventParams {
                    settle_version: self.context.versions.settle_version,
                })
                .await?;

            loop {
                tokio::select! {
                    item = stream.next() => {
                        match item {
                            Some(Ok(SubscribeItem::Frame(frame))) => {
                                retries = 0;
                                self.handle_frame(frame)?;
                            }
                            Some(Ok(SubscribeItem::State(ConnectionState::Disconnected))) => {
                                break;
                            }
                            Some(Ok(SubscribeItem::State(ConnectionState::Closed))) => {
                                return Ok(());
                            }
                            Some(Ok(SubscribeItem::State(_))) => {}
                            Some(Err(e)) => {
                                self.invoke_on_error(&e);
                                break;
                            }
                            None => return Ok(()),
                        }
                    }
                    Some(profile) = self.profile_rx.recv() => {
                        if let Some(on_profile) = self.callbacks.on_profile.as_mut() {
                            on_profile(profile);
                        }
                    }
                }
            }

            retries += 1;
            if retries > self.max_retries {
                return Err(Error::ReconnectExhausted);
            }
            self.reconnect().await?;
        }
    }

    /// On `disconnected`: reload the on-chain account, reset the context,
    /// re-apply the checkpoint and resubscribe from the last settle version.
    async fn reconnect(&mut self) -> Result<()> {
        let game_account = fetch_game_account(&self.transport, &self.addr).await?;

        let transactor_addr = game_account
            .transactor_addr
            .clone()
            .ok_or(Error::GameNotServed)?;
        let transactor_account = self
            .transport
            .get_server_account(&transactor_addr)
            .await
            .ok_or(Error::CantFindTransactor)?;

        self.context = GameContext::try_new(&game_account)?;
        self.checkpoint_on_chain = game_account.checkpoint_on_chain.clone();
        if let Some(onchain) = &self.checkpoint_on_chain {
            self.context
                .apply_checkpoint(onchain.access_version, self.context.versions.settle_version)?;
        }
        self.handler = self.handler_manager.get_handler(&self.bundle_addr).await?;

        self.connection = crate::connection::connect(&transactor_account.endpoint).await?;
        let key = self.encryptor.export_public_key(None)?.into_bytes();
        self.connection
            .attach_game(AttachGameParams {
                signer: self.signer.clone(),
                key,
            })
            .await
    }

    fn handle_frame(&mut self, frame: BroadcastFrame) -> Result<()> {
        match frame {
            BroadcastFrame::Sync { sync } => {
                self.context.handle_sync(
                    sync.new_players.clone(),
                    sync.new_servers,
                    &sync.transactor_addr,
                    sync.access_version,
                )?;
                for player in sync.new_players {
                    self.request_profile_load(player.addr);
                }
            }
            BroadcastFrame::Event {
                event,
                timestamp,
                state_sha,
            } => {
                self.prepare_event(&event)?;
                self.context.set_timestamp(timestamp);
                let effect = self
                    .handler
                    .handle_event(&self.context.derive_effect(false), &event)?;
                let is_checkpoint = effect.is_checkpoint;
                self.context.apply_effect(effect)?;
                let actual_sha = sha256_hex(&self.context.handler_state);
                if actual_sha != state_sha {
                    self.invoke_on_error(&Error::EventStateShaMismatch);
                }
                self.invoke_on_event(&event);
                if is_checkpoint {
                    self.decryption_cache.clear();
                    self.invoke_on_event(&Event::CheckpointReady {
                        access_version: self.context.versions.access_version,
                    });
                }
            }
            BroadcastFrame::Message { message } => {
                if let Some(on_message) = self.callbacks.on_message.as_mut() {
                    on_message(&message);
                }
            }
            BroadcastFrame::TxState { tx_state } => {
                if let TxState::PlayerConfirming { confirm_players, .. } = &tx_state {
                    for player in confirm_players {
                        self.request_profile_load(player.addr.clone());
                    }
                }
                if let Some(on_tx_state) = self.callbacks.on_tx_state.as_mut() {
                    on_tx_state(&tx_state);
                }
            }
            BroadcastFrame::Backlogs {
                checkpoint_off_chain,
                backlogs,
                state_sha,
            } => {
                if let Some(off_chain) = checkpoint_off_chain {
                    let Some(onchain) = self.checkpoint_on_chain.clone() else {
                        return Err(Error::InitDataInvalid(
                            "backlogs carried an off-chain checkpoint part with no cached on-chain part".into(),
                        ));
                    };
                    let checkpoint = Checkpoint::new_from_parts(off_chain, onchain);
                    self.context.checkpoint = checkpoint.into();
                    let handler_state = self.context.checkpoint.root_data().handler_state.clone();
                    self.context.set_handler_state(handler_state);
                    let actual_sha = sha256_hex(&self.context.handler_state);
                    if actual_sha != state_sha {
                        self.invoke_on_error(&Error::CheckpointStateShaMismatch);
                    }
                }
                for nested in *backlogs {
                    self.handle_frame(nested)?;
                }
                self.invoke_on_event(&Event::EndOfHistory);
            }
        }
        Ok(())
    }

    /// Pre-handler bookkeeping per `spec.md` §4.5, keyed by event variant.
    /// `Bridge`/`WaitingTimeout`/`OperationTimeout`/`ActionTimeout`/
    /// `ServerLeave`/`DrawRandomItems`/`DrawTimeout` are passed straight to
    /// `GameContext::prepare_event`, which already treats them as no-ops.
    fn prepare_event(&mut self, event: &Event) -> Result<()> {
        self.context.prepare_event(event)?;
        if let Event::SecretsReady { random_ids } = event {
            for random_id in random_ids {
                let Ok(random_state) = self.context.get_random_state(*random_id) else {
                    continue;
                };
                let Ok(shares) = random_state
                    .list_shared_secrets(&self.signer)
                    .map_err(|e| Error::RandomizationError(e.to_string()))
                else {
                    continue;
                };
                let secrets: HashMap<usize, SecretKey> = shares
                    .into_iter()
                    .filter_map(|(idx, mut keys)| keys.pop().map(|k| (idx, k)))
                    .collect();
                let ciphertexts = random_state.list_assigned_ciphertexts(&self.signer);
                if let Ok(plaintexts) =
                    self.encryptor
                        .decrypt_with_secrets(ciphertexts, secrets, &[])
                {
                    self.decryption_cache.insert(*random_id, plaintexts);
                }
            }
        }
        Ok(())
    }

    fn request_profile_load(&self, addr: String) {
        let transport = self.transport.clone();
        let tx = self.profile_tx.clone();
        tokio::spawn(async move {
            if let Some(profile) = transport.get_player_profile(&addr).await {
                let _ = tx.send(profile);
            }
        });
    }

    fn invoke_on_event(&mut self, event: &Event) {
        if let Some(on_event) = self.callbacks.on_event.as_mut() {
            on_event(&self.context, event);
        }
    }

    fn invoke_on_error(&mut self, error: &Error) {
        if let Some(on_error) = self.callbacks.on_error.as_mut() {
            on_error(error);
        }
    }
}
