use std::sync::Arc;

use partbot_models::{Command, CommandInvocation};
use tracing::{debug, error, info, warn};

use crate::client::AutomationClient;
use crate::handlers::{inventory, open_orders, order_status, request_part};
use crate::responder::{Reply, Responder};

/// Routes command invocations to their handlers. Holds no per-invocation
/// state, so one dispatcher serves every interaction.
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<dyn AutomationClient>,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn AutomationClient>) -> Self {
        Self { client }
    }

    /// Handle one invocation. Unknown commands get no reply. Nothing here
    /// returns an error: failures are logged and the requester sees a message.
    pub async fn dispatch(&self, invocation: &CommandInvocation, responder: &dyn Responder) {
        let command = match Command::parse(invocation) {
            Ok(Some(command)) => command,
            Ok(None) => {
                debug!(command = %invocation.command_name, "Ignoring unknown command");
                return;
            }
            Err(e) => {
                warn!(command = %invocation.command_name, error = %e, "Rejected invocation");
                if let Err(e) = responder
                    .reply(Reply::private(format!("⚠️ Invalid options: {e}")))
                    .await
                {
                    error!(command = %invocation.command_name, error = %e, "Failed to deliver reply");
                }
                return;
            }
        };

        info!(
            command = command.name(),
            requester = %invocation.requester,
            "Handling command"
        );

        let client = self.client.as_ref();
        let result = match &command {
            Command::RequestPart(args) => request_part::handle(args, client, responder).await,
            Command::OpenOrders => open_orders::handle(client, responder).await,
            Command::OrderStatus(args) => order_status::handle(args, client, responder).await,
            Command::Inventory(args) => inventory::handle(args, client, responder).await,
        };

        if let Err(e) = result {
            error!(command = command.name(), error = %e, "Failed to deliver reply");
        }
    }
}
