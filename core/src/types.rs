mod accounts;
mod broadcast_frame;
mod common;
mod storage_params;
mod transactor_params;
mod transport_params;
mod tx_state;

pub use common::{
    empty_secret_key, empty_secret_key_raw, Addr, Ciphertext, ClientMode, RandomId, SecretDigest,
    SecretKey, SecretKeyRaw,
};

pub use accounts::{
    GameAccount, GameBundle, GameRegistration, PlayerProfile, RecipientAccount,
    RegistrationAccount, ServerAccount, TokenAccount, Vote,
};

pub use broadcast_frame::{BroadcastFrame, BroadcastSync};

pub use tx_state::TxState;

pub use storage_params::{CheckpointWithProof, GetCheckpointParams, SaveCheckpointParams, SaveResult};

pub use transport_params::{
    AddRecipientSlotsParams, AssetChange, AssignRecipientParams, CloseGameAccountParams,
    CreateGameAccountParams, CreatePlayerProfileParams, CreateRecipientParams,
    CreateRegistrationParams, DepositParams, GetTransactorInfoParams, JoinParams, PlayerStatus,
    PublishGameParams, QueryMode, RecipientClaimParams, RecipientSlotInit, RecipientSlotShareInit,
    RegisterGameParams, RegisterServerParams, ServeParams, SettleParams, TokenInfo,
    UnregisterGameParams, UnregisterTransactorParams, VoteParams,
};

pub use transactor_params::{
    AttachGameParams, CheckpointParams, ExitGameParams, SubmitEventParams, SubmitMessageParams,
    SubscribeEventParams,
};
