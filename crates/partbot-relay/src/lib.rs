pub mod client;
pub mod dispatcher;
pub mod error;
pub mod format;
pub mod handlers;
pub mod responder;

pub mod test_support;

pub use client::{AutomationClient, HttpAutomationClient};
pub use dispatcher::Dispatcher;
pub use error::RelayError;
pub use responder::{Reply, Responder, Visibility};
