//! The crypto-peer component: the part of the Lumen protocol that runs on
//! every node (player, validator or transactor) to drive the mask/lock/share
//! randomization protocol in lockstep with [`crate::context::GameContext`]
//! updates, and to decrypt randomness once it's revealed.

use std::collections::HashMap;
use std::sync::Arc;

use lumen_api::event::Event;
use lumen_api::random::{RandomMode, RandomStatus};
use lumen_api::types::{SecretKey, SecretShare};

use crate::context::GameContext;
use crate::encryptor::EncryptorT;
use crate::error::{Error, Result};
use crate::secret::SecretState;
use crate::transport::TransportT;
use crate::types::ClientMode;

/// Drives the secret-sharing side of the randomization protocol for a
/// single node. Holds one [`SecretState`] per [`crate::node::RandomState`]
/// tracked by the game context, keyed by random id.
pub struct Client {
    pub encryptor: Arc<dyn EncryptorT>,
    pub transport: Arc<dyn TransportT>,
    /// The address of the current node: player address or server address.
    pub addr: String,
    /// Only players send custom events; only transactors drive masking/locking.
    pub mode: ClientMode,
    pub id: u64,
    secret_states: HashMap<usize, SecretState>,
}

impl Client {
    pub fn try_new(
        id: u64,
        addr: String,
        mode: ClientMode,
        transport: Arc<dyn TransportT>,
        encryptor: Arc<dyn EncryptorT>,
    ) -> Result<Self> {
        Ok(Self {
            id,
            addr,
            mode,
            transport,
            encryptor,
            secret_states: HashMap::new(),
        })
    }

    fn update_secret_states(&mut self, game_context: &GameContext) {
        for random_state in game_context.random_states.iter() {
            self.secret_states
                .entry(random_state.id)
                .or_insert_with(|| {
                    SecretState::from_random_state(
                        self.encryptor.clone(),
                        random_state,
                        RandomMode::Shuffler,
                    )
                });
        }
    }

    fn randomize_and_share(&mut self, game_context: &GameContext) -> Result<Vec<Event>> {
        let mut events = vec![];
        for random_state in game_context.random_states.iter() {
            match random_state.status {
                RandomStatus::Ready | RandomStatus::Shared => (),
                RandomStatus::WaitingSecrets => {
                    let required_idents =
                        random_state.list_required_secrets_by_from_addr(&self.addr);
                    if required_idents.is_empty() {
                        continue;
                    }
                    let secret_state = self
                        .secret_states
                        .get(&random_state.id)
                        .ok_or(Error::MissingSecret)?;
                    let mut shares = Vec::with_capacity(required_idents.len());
                    for idt in required_idents {
                        let secret: SecretKey = secret_state.get_key(idt.index)?;
                        shares.push(SecretShare::Random {
                            from_addr: idt.from_addr,
                            to_addr: idt.to_addr,
                            random_id: idt.random_id,
                            index: idt.index,
                            secret,
                        });
                    }
                    events.push(Event::ShareSecrets {
                        sender: self.id,
                        shares,
                    });
                }
                RandomStatus::Locking(ref addr) => {
                    if self.addr.eq(addr) {
                        let secret_state = self
                            .secret_states
                            .get_mut(&random_state.id)
                            .ok_or(Error::MissingSecret)?;
                        let origin = random_state
                            .ciphertexts
                            .iter()
                            .map(|c| c.ciphertext().to_owned())
                            .collect();
                        let locked = secret_state.lock(origin)?;
                        events.push(Event::Lock {
                            sender: self.id,
                            random_id: random_state.id,
                            ciphertexts_and_digests: locked,
                        });
                    }
                }
                RandomStatus::Masking(ref addr) => {
                    if self.addr.eq(addr) {
                        let secret_state = self
                            .secret_states
                            .get_mut(&random_state.id)
                            .ok_or(Error::MissingSecret)?;
                        let origin = random_state
                            .ciphertexts
                            .iter()
                            .map(|c| c.ciphertext().to_owned())
                            .collect();
                        let mut masked = secret_state.mask(origin)?;
                        self.encryptor.shuffle(&mut masked);
                        events.push(Event::Mask {
                            sender: self.id,
                            random_id: random_state.id,
                            ciphertexts: masked,
                        });
                    }
                }
            }
        }
        Ok(events)
    }

    /// Called after the context is updated with a new event, to synchronize
    /// this node's own secret-sharing state and respond with follow-up
    /// randomization events. Players only track state; transactors also
    /// mask, lock and share.
    pub fn handle_updated_context(&mut self, game_context: &GameContext) -> Result<Vec<Event>> {
        self.update_secret_states(game_context);
        match self.mode {
            ClientMode::Player => Ok(vec![]),
            ClientMode::Transactor => self.randomize_and_share(game_context),
            ClientMode::Validator => Ok(vec![]),
        }
    }

    /// Decrypt the ciphertexts assigned to this node with the secrets
    /// shared to it. Returns a mapping from index to decrypted value.
    pub fn decrypt(&self, ctx: &GameContext, random_id: usize) -> Result<HashMap<usize, String>> {
        let mut ret = HashMap::new();
        let random_state = ctx.get_random_state(random_id)?;
        let options = &random_state.options;
        let assigned_ciphertexts = random_state.list_assigned_ciphertexts(&self.addr);
        let mut shared_secrets = random_state
            .list_shared_secrets(&self.addr)
            .map_err(|e| Error::RandomizationError(e.to_string()))?;
        for (i, mut buf) in assigned_ciphertexts.into_iter() {
            if let Some(secrets) = shared_secrets.remove(&i) {
                self.encryptor.apply_multi(secrets, &mut buf);
                let value = String::from_utf8(buf).or(Err(Error::DecryptionFailed))?;
                if !options.contains(&value) {
                    return Err(Error::InvalidDecryptedValue(value));
                }
                ret.insert(i, value);
            } else {
                return Err(Error::MissingSecret);
            }
        }
        Ok(ret)
    }
}
