use partbot_models::response::{or, placeholder};
use partbot_models::{Order, OrderStatusArgs, OrderStatusPayload, OutboundRequest, StatusLookup};

use super::{exchange, CONTACT_FAILURE};
use crate::client::AutomationClient;
use crate::error::RelayError;
use crate::format::{format_date, format_eta, DATE_FALLBACK};
use crate::responder::{Reply, Responder, Visibility};

pub const MISSING_ID: &str = "⚠️ Please provide either a **requestid** (e.g. `REQ-1234`) or an **orderid** (e.g. `ORD-5678`).";

/// `/orderstatus`: look up a request (and its orders) or a single order.
pub async fn handle(
    args: &OrderStatusArgs,
    client: &dyn AutomationClient,
    responder: &dyn Responder,
) -> Result<(), RelayError> {
    let Some(lookup) = args.lookup() else {
        return responder.reply(Reply::private(MISSING_ID)).await;
    };

    responder.defer(Visibility::Private).await?;

    let request = OutboundRequest::from(args);
    let content = match exchange(client, &request, CONTACT_FAILURE).await {
        Ok(response) => render(lookup, &response.decode()),
        Err(text) => text,
    };

    responder.edit_reply(content).await
}

pub fn render(lookup: StatusLookup<'_>, payload: &OrderStatusPayload) -> String {
    match lookup {
        StatusLookup::Request(id) => render_request(id, payload),
        StatusLookup::Order(id) => render_order(id, payload.order.as_ref()),
    }
}

fn render_request(request_id: &str, payload: &OrderStatusPayload) -> String {
    let Some(r) = &payload.request else {
        return format!("🔍 No request found for `{request_id}`.");
    };

    let mut msg = format!(
        "📄 **Request Status – {}**\n\n\
         **Status:** {}\n\
         **Subsystem:** {}\n\
         **Part:** {}\n\
         **SKU:** {}\n\
         **Qty:** {}\n\
         **Priority:** {}\n",
        r.id.as_deref().unwrap_or(request_id),
        or(&r.request_status, placeholder::UNKNOWN),
        or(&r.subsystem, placeholder::NOT_AVAILABLE),
        or(&r.part_name, placeholder::NO_NAME),
        or(&r.sku, placeholder::NONE),
        or(&r.qty, placeholder::NOT_AVAILABLE),
        or(&r.priority, placeholder::NOT_AVAILABLE),
    );

    if payload.orders.is_empty() {
        msg.push_str("\nNo orders have been created for this request yet.");
    } else {
        msg.push_str("\n📦 **Linked Orders:**\n");
        for o in &payload.orders {
            msg.push_str(&format!(
                "• **{}** — Status: {}, Vendor: {}, Ordered: {}, ETA (Delivery): {}\n",
                or(&o.order_id, placeholder::UNKNOWN),
                or(&o.status, placeholder::UNKNOWN),
                or(&o.vendor, placeholder::NOT_AVAILABLE),
                format_date(&o.order_date, DATE_FALLBACK),
                format_eta(&o.eta),
            ));
        }
    }

    msg.trim_end().to_string()
}

fn render_order(order_id: &str, order: Option<&Order>) -> String {
    let Some(o) = order else {
        return format!("🔍 No order found for `{order_id}`.");
    };

    // The received date is shown as the sheet stores it, not reformatted.
    format!(
        "📦 **Order Status – {}**\n\n\
         **Status:** {}\n\
         **Vendor:** {}\n\
         **Part:** {}\n\
         **SKU:** {}\n\
         **Qty:** {}\n\
         **Order Date:** {}\n\
         **Shipping:** {}\n\
         **Tracking:** {}\n\
         **ETA (Delivery) :** {}\n\
         **Received:** {}\n\
         **Requests:** {}",
        o.order_id.as_deref().unwrap_or(order_id),
        or(&o.status, placeholder::UNKNOWN),
        or(&o.vendor, placeholder::NOT_AVAILABLE),
        or(&o.part_name, placeholder::NO_NAME),
        or(&o.sku, placeholder::NONE),
        or(&o.qty, placeholder::NOT_AVAILABLE),
        format_date(&o.order_date, DATE_FALLBACK),
        or(&o.shipping, placeholder::NOT_AVAILABLE),
        or(&o.tracking, placeholder::DASH),
        format_eta(&o.eta),
        or(&o.received_date, placeholder::DASH),
        or(&o.included_requests, placeholder::DASH),
    )
}
