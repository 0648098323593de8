use std::collections::HashMap;
use std::sync::Arc;

use lumen_api::event::{CustomEvent, Event};
use lumen_core::client::Client;
use lumen_core::context::GameContext;
use lumen_core::encryptor::EncryptorT;
use lumen_core::error::Result;
use lumen_core::transport::TransportT;
use lumen_core::types::ClientMode;
use lumen_encryptor::Encryptor;

/// A no-op transport used to drive [`Client`] in tests, where a real
/// on-chain transport isn't needed for the randomization protocol itself.
struct NoopTransport;

#[async_trait::async_trait]
impl TransportT for NoopTransport {
    async fn create_game_account(
        &self,
        _params: lumen_core::types::CreateGameAccountParams,
    ) -> Result<String> {
        unimplemented!("not needed to drive the randomization protocol in tests")
    }
    async fn close_game_account(
        &self,
        _params: lumen_core::types::CloseGameAccountParams,
    ) -> Result<()> {
        unimplemented!()
    }
    async fn register_server(
        &self,
        _params: lumen_core::types::RegisterServerParams,
    ) -> Result<String> {
        unimplemented!()
    }
    async fn join(&self, _params: lumen_core::types::JoinParams) -> Result<()> {
        unimplemented!()
    }
    async fn deposit(&self, _params: lumen_core::types::DepositParams) -> Result<()> {
        unimplemented!()
    }
    async fn serve(&self, _params: lumen_core::types::ServeParams) -> Result<()> {
        unimplemented!()
    }
    async fn vote(&self, _params: lumen_core::types::VoteParams) -> Result<()> {
        unimplemented!()
    }
    async fn create_player_profile(
        &self,
        _params: lumen_core::types::CreatePlayerProfileParams,
    ) -> Result<String> {
        unimplemented!()
    }
    async fn publish_game(&self, _params: lumen_core::types::PublishGameParams) -> Result<String> {
        unimplemented!()
    }
    async fn settle_game(&self, _params: lumen_core::types::SettleParams) -> Result<()> {
        unimplemented!()
    }
    async fn create_registration(
        &self,
        _params: lumen_core::types::CreateRegistrationParams,
    ) -> Result<String> {
        unimplemented!()
    }
    async fn register_game(&self, _params: lumen_core::types::RegisterGameParams) -> Result<()> {
        unimplemented!()
    }
    async fn unregister_game(&self, _params: lumen_core::types::UnregisterGameParams) -> Result<()> {
        unimplemented!()
    }
    async fn get_game_account(&self, _addr: &str) -> Option<lumen_core::types::GameAccount> {
        None
    }
    async fn get_game_bundle(&self, _addr: &str) -> Option<lumen_core::types::GameBundle> {
        None
    }
    async fn get_player_profile(&self, _addr: &str) -> Option<lumen_core::types::PlayerProfile> {
        None
    }
    async fn get_server_account(&self, _addr: &str) -> Option<lumen_core::types::ServerAccount> {
        None
    }
    async fn get_registration(
        &self,
        _addr: &str,
    ) -> Option<lumen_core::types::RegistrationAccount> {
        None
    }
}

/// A server- or player-side client used in tests to drive the randomization
/// protocol (mask/lock/share secrets) the same way a real transactor or
/// player client would in response to context updates. Thin wrapper around
/// the real [`Client`] crypto peer, with a fixed id/address and a no-op
/// transport since tests drive the protocol directly against a [`GameContext`]
/// rather than over the wire.
pub struct TestClient {
    inner: Client,
}

impl TestClient {
    pub fn new<S: Into<String>>(mode: ClientMode, addr: S) -> Self {
        let addr = addr.into();
        let encryptor: Arc<dyn EncryptorT> = Arc::new(Encryptor::default());
        let transport: Arc<dyn TransportT> = Arc::new(NoopTransport);
        let inner = Client::try_new(0, addr, mode, transport, encryptor)
            .expect("Failed to build test client");
        Self { inner }
    }

    pub fn addr(&self) -> String {
        self.inner.addr.clone()
    }

    pub fn mode(&self) -> &ClientMode {
        &self.inner.mode
    }

    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn set_id(&mut self, id: u64) {
        self.inner.id = id;
    }

    /// Called after the context is updated with a new event, to synchronize our
    /// own secret-sharing state and respond with follow-up randomization events.
    pub fn handle_updated_context(&mut self, game_context: &GameContext) -> Result<Vec<Event>> {
        self.inner.handle_updated_context(game_context)
    }

    /// Decrypt the ciphertexts assigned to this client with the secrets shared to it.
    /// Return a mapping from index to decrypted value.
    pub fn decrypt(&self, ctx: &GameContext, random_id: usize) -> Result<HashMap<usize, String>> {
        self.inner.decrypt(ctx, random_id)
    }
}

/// A minimal player-side client, used to decrypt revealed randomness and to
/// build signed custom events, without the server-side masking/locking duties
/// of [`TestClient`].
pub struct TestPlayerClient {
    inner: Client,
}

impl TestPlayerClient {
    pub fn new<S: Into<String>>(player_addr: S) -> Self {
        let addr = player_addr.into();
        let encryptor: Arc<dyn EncryptorT> = Arc::new(Encryptor::default());
        let transport: Arc<dyn TransportT> = Arc::new(NoopTransport);
        let inner = Client::try_new(0, addr, ClientMode::Player, transport, encryptor)
            .expect("Failed to build test player client");
        Self { inner }
    }

    /// Decrypt the ciphertexts assigned to this player with the secrets shared to it.
    /// Return a mapping from index to decrypted value.
    pub fn decrypt(
        &self,
        ctx: &GameContext,
        random_id: usize,
    ) -> Result<HashMap<usize, String>> {
        self.inner.decrypt(ctx, random_id)
    }

    /// Create a custom event, borsh-encoded the way [`Event::custom`] expects.
    pub fn create_custom_event<E: CustomEvent>(&self, sender: u64, custom_event: &E) -> Event {
        Event::custom(sender, custom_event)
    }
}
