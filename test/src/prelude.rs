pub use crate::account_helpers::*;
pub use crate::client_helpers::*;
pub use crate::handler_helpers::*;
pub use crate::transport_helpers::*;

pub use lumen_api::error::{Error, Result};
pub use lumen_api::types::{Settle, SettleOp, Transfer};
pub use lumen_core::context::{DispatchEvent, GameContext};
pub use lumen_core::types::{GameAccount, ClientMode};
pub use lumen_api::effect::{SubGame, EmitBridgeEvent};
