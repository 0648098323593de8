use borsh::{BorshDeserialize, BorshSerialize};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use lumen_api::types::RecipientSlot;

/// The data represents the state of on-chain recipient account.
///
/// # Cap Addr
///
/// An address which has the capacibility to manipulate the recipient
/// by adding and assigning slot.  A None value refers to an immutable
/// structure that no one can change.
///
/// # Slots
///
/// NFTs and Tokens are grouped by slots.  A slot can only store one
/// NFT or one kind of token.
#[derive(Debug, Clone, BorshSerialize, BorshDeserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RecipientAccount {
    pub addr: String,
    pub cap_addr: Option<String>,
    pub slots: Vec<RecipientSlot>,
}
