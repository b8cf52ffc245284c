//! One handler per command. Each defers, makes exactly one remote call and
//! edits the deferred reply with the rendered result.

pub mod inventory;
pub mod open_orders;
pub mod order_status;
pub mod request_part;

use partbot_models::response::placeholder;
use partbot_models::{OutboundRequest, RemoteResponse};
use tracing::{error, warn};

use crate::client::AutomationClient;

pub const CONTACT_FAILURE: &str = "❌ Failed to contact Google Sheets.";
pub const SEND_FAILURE: &str = "❌ Failed to send request to Google Sheets.";

pub fn application_error(message: Option<&str>) -> String {
    format!(
        "❌ Error from Sheets: {}",
        message.unwrap_or(placeholder::UNKNOWN_ERROR)
    )
}

/// Make the remote call. On any failure the `Err` holds the text to show the
/// requester; the detail only goes to the log.
pub(crate) async fn exchange(
    client: &dyn AutomationClient,
    request: &OutboundRequest,
    transport_failure: &str,
) -> Result<RemoteResponse, String> {
    let response = match client.call(request).await {
        Ok(response) => response,
        Err(e) => {
            error!(action = request.action(), error = %e, "Automation endpoint call failed");
            return Err(transport_failure.to_string());
        }
    };

    if !response.is_ok() {
        warn!(
            action = request.action(),
            response = %response.body(),
            "Automation endpoint returned an error"
        );
        return Err(application_error(response.message().as_deref()));
    }

    Ok(response)
}
