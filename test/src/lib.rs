mod account_helpers;
mod client_helpers;
mod constants;
mod handler_helpers;
mod transport_helpers;

pub use account_helpers::*;
pub use client_helpers::*;
pub use constants::*;
pub use handler_helpers::*;
pub use transport_helpers::*;
