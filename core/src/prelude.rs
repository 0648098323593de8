pub use crate::error::{Error, Result};
pub use crate::types::{Addr, ClientMode, RandomId};
pub use lumen_api::effect::Effect;
pub use lumen_api::engine::{GameHandler, InitAccount};
pub use lumen_api::event::{CustomEvent, Event};
pub use lumen_api::random::RandomSpec;
pub use lumen_api::types::{Amount, DecisionId, PlayerJoin, ServerJoin, Settle};
pub use borsh::{BorshDeserialize, BorshSerialize};
