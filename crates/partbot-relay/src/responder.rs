use async_trait::async_trait;

use crate::error::RelayError;

/// Who can see a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Only the user who invoked the command.
    Private,
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    pub visibility: Visibility,
}

impl Reply {
    pub fn private(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            visibility: Visibility::Private,
        }
    }

    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            visibility: Visibility::Public,
        }
    }
}

/// The platform side of one interaction. Implemented by the chat gateway
/// adapter; handlers only ever see this trait.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Answer immediately.
    async fn reply(&self, reply: Reply) -> Result<(), RelayError>;

    /// Acknowledge now and answer later with [`Responder::edit_reply`].
    async fn defer(&self, visibility: Visibility) -> Result<(), RelayError>;

    /// Fill in a deferred acknowledgement.
    async fn edit_reply(&self, content: String) -> Result<(), RelayError>;
}
