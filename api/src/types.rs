mod common;

pub use common::{
    Addr, Amount, Award, Ciphertext, CustomLog, DecisionId, EntryLock, EntryType, GamePlayer,
    GameStatus, PlayerBalance, PlayerDeposit, PlayerJoin, RandomId, RecipientSlot,
    RecipientSlotOwner, RecipientSlotShare, RecipientSlotType, SecretDigest, SecretIdent,
    SecretKey, SecretShare, ServerJoin, Settle, SettleOp, Signature, Transfer, VoteType,
};
