pub use lumen_core::error::{Error, Result};
