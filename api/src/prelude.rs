pub use crate::effect::Effect;
pub use crate::engine::{GameHandler, InitAccount};
pub use crate::error::{Error, HandleError, HandleResult, Result};
pub use crate::event::{CustomEvent, Event, BridgeEvent};
pub use crate::random::{RandomStatus, RandomSpec};
pub use crate::types::{
    Addr, Amount, DecisionId, EntryLock, EntryType, GamePlayer, GameStatus, PlayerJoin, RandomId,
    ServerJoin, Settle,
};
pub use borsh::{BorshDeserialize, BorshSerialize};
