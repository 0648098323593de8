//! Native Base Client for the Lumen protocol: the player/validator-side
//! event loop that attaches to a running game, drives its Game Context
//! against the transactor's event stream, and exposes a callback-based API
//! to the embedding application.

pub mod base_client;
pub mod connection;
pub mod error;

pub use base_client::{BaseClient, BaseClientBuilder};
pub use connection::Connection;
