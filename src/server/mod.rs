// Server module entry point
// Binding, the accept loop, per-connection serving and shutdown signals

pub mod connection;
pub mod listener;
pub mod signal;

// Rust 不允许 loop 作为模块名（关键字），改用 server_loop
#[path = "loop.rs"]
pub mod server_loop;

#[cfg(test)]
mod tests;

// Re-export common types
pub use listener::bind;
pub use server_loop::serve;
pub use signal::{start_signal_handler, SignalHandler};
