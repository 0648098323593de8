pub mod handler;
pub mod handler_manager;
pub mod wasm_handler;

pub use handler::HandlerT;
pub use handler_manager::HandlerManager;
pub use wasm_handler::WasmHandler;
