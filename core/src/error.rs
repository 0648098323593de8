use borsh::{BorshDeserialize, BorshSerialize};
use lumen_api::error::HandleError;

use anyhow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error kinds per `spec.md` §7's taxonomy, plus the internal variants the
/// rest of the crate needs to report precisely which invariant failed.
#[derive(Error, Debug, BorshDeserialize, BorshSerialize, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Error {
    #[error("Player already joined: {0}")]
    PlayerAlreadyJoined(String),

    #[error("Position occupied: {0}")]
    PositionOccupied(usize),

    #[error("No enough players")]
    NoEnoughPlayers,

    #[error("Malformed game event: {0}")]
    MalformedData(String),

    #[error("Invalid random id")]
    InvalidRandomId,

    #[error("Player profile not found")]
    PlayerProfileNotFound,

    #[error("Game account not found")]
    GameAccountNotFound,

    #[error("Game bundle not found")]
    GameBundleNotFound,

    #[error("Server account exists")]
    ServerAccountExists,

    #[error("Rpc error: {0}")]
    RpcError(String),

    #[error("Reconnect attempts exhausted")]
    ReconnectExhausted,

    #[error("Game not served")]
    GameNotServed,

    #[error("Can't find transactor")]
    CantFindTransactor,

    #[error("Malformed endpoint")]
    MalformedEndpoint,

    #[error("Malformed game bundle")]
    MalformedGameBundle,

    #[error("Initialization transport failed: {0}")]
    TransportError(String),

    #[error("Can't leave")]
    CantLeave,

    #[error("Randomization error: {0}")]
    RandomizationError(String),

    #[error("Crypto error: {0}")]
    CryptoError(String),

    #[error("Attach pipeline failed: {0}")]
    AttachFailed(String),

    #[error("On-chain account not found after retries: {0}")]
    OnchainDataNotFound(String),

    #[error("Handler state sha mismatch after event")]
    EventStateShaMismatch,

    #[error("Checkpoint state sha mismatch")]
    CheckpointStateShaMismatch,

    #[error("Checkpoint rebuild failed: {0}")]
    InitDataInvalid(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Missing secret")]
    MissingSecret,

    #[error("Invalid decrypted value: {0}")]
    InvalidDecryptedValue(String),

    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("Invalid key index")]
    InvalidKeyIndex,

    #[error("Invalid ciphertexts size, expect: {0}, got: {1}")]
    InvalidCiphertextsSize(u32, u32),

    #[error("Invalid max players")]
    InvalidMaxPlayers,

    #[error("IO Error: {0}")]
    IoError(String),

    #[error("Invalid decision id")]
    InvalidDecisionId,

    #[error("Invalid decision owner")]
    InvalidDecisionOwner,

    #[error("Invalid decision status")]
    InvalidDecisionStatus,

    #[error("Wasm initialization error: {0}")]
    WasmInitializationError(String),

    #[error("Wasm execution error: {0}")]
    WasmExecutionError(String),

    #[error("Wasm memory overflow")]
    WasmMemoryOverflow,

    #[error("Invalid checkpoint")]
    InvalidCheckpoint,

    #[error("Wasm execution error: {0}")]
    HandleError(HandleError),

    #[error("Cannot map id to address: {0}")]
    CantMapIdToAddr(u64),

    #[error("Cannot map address to id: {0}")]
    CantMapAddrToId(String),

    #[error("Missing Checkpoint")]
    MissingCheckpoint,

    #[error("Checkpoint already exists")]
    CheckpointAlreadyExists,
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::MalformedData(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IoError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<crate::error::Error> for HandleError {
    fn from(value: crate::error::Error) -> Self {
        HandleError::InternalError {
            message: value.to_string(),
        }
    }
}

impl From<HandleError> for Error {
    fn from(value: HandleError) -> Self {
        Error::HandleError(value)
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::TransportError(e.to_string())
    }
}
