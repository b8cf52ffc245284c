use partbot_models::response::{or, placeholder};
use partbot_models::{OutboundRequest, RequestAck, RequestPartArgs};
use tracing::info;

use super::{exchange, SEND_FAILURE};
use crate::client::AutomationClient;
use crate::error::RelayError;
use crate::responder::{Responder, Visibility};

/// `/requestpart`: submit a part request row to the sheet.
pub async fn handle(
    args: &RequestPartArgs,
    client: &dyn AutomationClient,
    responder: &dyn Responder,
) -> Result<(), RelayError> {
    responder.defer(Visibility::Private).await?;

    let request = OutboundRequest::from(args);
    let content = match exchange(client, &request, SEND_FAILURE).await {
        Ok(response) => {
            let ack: RequestAck = response.decode();
            info!(
                requester = %args.requester,
                request_id = ack.request_id.as_deref().unwrap_or_default(),
                "Part request submitted"
            );
            render(args, &ack)
        }
        Err(text) => text,
    };

    responder.edit_reply(content).await
}

pub fn render(args: &RequestPartArgs, ack: &RequestAck) -> String {
    let mut msg = format!(
        "✅ Request **{}** submitted.\nSubsystem: **{}**\n",
        or(&ack.request_id, placeholder::UNKNOWN),
        args.subsystem.value()
    );
    if let Some(link) = &args.link {
        msg.push_str(&format!("Link: {link}\n"));
    }
    msg.push_str(&format!(
        "Qty: **{}**, Priority: **{}**",
        args.quantity,
        args.priority.as_str()
    ));
    msg
}
