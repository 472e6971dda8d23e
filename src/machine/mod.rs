//! Machine instances and event dispatch.
//!
//! A [`Context`] owns a registry of states and events, the context-wide
//! hooks and the user data. Its current state changes only through
//! [`Context::emit`].

mod context;
mod dispatch;
pub mod error;

pub use context::Context;
pub use error::FsmError;
