use partbot_models::response::{or, placeholder};
use partbot_models::{DeniedRequest, OpenOrdersPayload, Order, OutboundRequest};

use super::{exchange, CONTACT_FAILURE};
use crate::client::AutomationClient;
use crate::error::RelayError;
use crate::format::{format_date, format_eta, DATE_FALLBACK};
use crate::responder::{Responder, Visibility};

/// Most entries listed per section.
pub const MAX_LISTED: usize = 15;

pub const ALL_CLEAR: &str =
    "✅ No open orders and no denied requests. Everything is up to date.";

/// `/openorders`: orders not yet received, plus denied requests.
pub async fn handle(
    client: &dyn AutomationClient,
    responder: &dyn Responder,
) -> Result<(), RelayError> {
    responder.defer(Visibility::Private).await?;

    let content = match exchange(client, &OutboundRequest::OpenOrders, CONTACT_FAILURE).await {
        Ok(response) => render(&response.decode()),
        Err(text) => text,
    };

    responder.edit_reply(content).await
}

pub fn render(payload: &OpenOrdersPayload) -> String {
    let orders = &payload.orders;
    let denied = &payload.denied;

    if orders.is_empty() && denied.is_empty() {
        return ALL_CLEAR.to_string();
    }

    let mut msg = String::from("📦 **Open Orders (not yet received)**\n");
    if orders.is_empty() {
        msg.push_str("No open orders.\n\n");
    } else {
        msg.push_str(&count_line(orders.len(), "open orders"));
        for order in orders.iter().take(MAX_LISTED) {
            msg.push_str(&order_entry(order));
        }
    }

    if !denied.is_empty() {
        msg.push_str("⚠️ **Requests Needing Attention (Denied)**\n");
        msg.push_str(&count_line(denied.len(), "denied requests"));
        for request in denied.iter().take(MAX_LISTED) {
            msg.push_str(&denied_entry(request));
        }
    }

    msg.trim_end().to_string()
}

fn count_line(total: usize, noun: &str) -> String {
    if total > MAX_LISTED {
        format!("Showing first {MAX_LISTED} of {total} {noun}.\n\n")
    } else {
        format!("Total {noun}: {total}\n\n")
    }
}

fn order_entry(o: &Order) -> String {
    format!(
        "• **{}** — {}\n  Part: {}\n  SKU: {} | Qty: {}\n  Status: {}\n  Ordered: {} | ETA: {}\n  Tracking: {}\n  Requests: {}\n\n",
        or(&o.order_id, placeholder::UNKNOWN),
        or(&o.vendor, placeholder::UNKNOWN_VENDOR),
        or(&o.part_name, placeholder::NO_NAME),
        or(&o.sku, placeholder::NONE),
        or(&o.qty, placeholder::NOT_AVAILABLE),
        or(&o.status, placeholder::UNKNOWN),
        format_date(&o.order_date, DATE_FALLBACK),
        format_eta(&o.eta),
        or(&o.tracking, placeholder::DASH),
        or(&o.included_requests, placeholder::DASH),
    )
}

fn denied_entry(r: &DeniedRequest) -> String {
    format!(
        "• **{}** — {}\n  Requester: {} | Subsystem: {}\n  Qty: {} | Priority: {}\n  Notes: {}\n  Link: {}\n\n",
        or(&r.id, placeholder::UNKNOWN),
        or(&r.part_name, placeholder::NO_NAME),
        or(&r.requester, placeholder::UNKNOWN),
        or(&r.subsystem, placeholder::NOT_AVAILABLE),
        or(&r.qty, placeholder::NOT_AVAILABLE),
        or(&r.priority, placeholder::NOT_AVAILABLE),
        or(&r.mentor_notes, placeholder::DASH),
        or(&r.link, placeholder::DASH),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(id: &str) -> Order {
        Order {
            order_id: Some(id.to_string()),
            vendor: Some("REV Robotics".to_string()),
            part_name: Some("Through Bore Encoder".to_string()),
            sku: Some("REV-11-1271".to_string()),
            qty: Some("2".to_string()),
            status: Some("Ordered".to_string()),
            order_date: json!("2025-11-20"),
            eta: json!("2025-11-27T08:00:00Z"),
            tracking: Some("1Z999".to_string()),
            included_requests: Some("REQ-1,REQ-2".to_string()),
            ..Order::default()
        }
    }

    #[test]
    fn all_clear_when_both_empty() {
        assert_eq!(render(&OpenOrdersPayload::default()), ALL_CLEAR);
    }

    #[test]
    fn full_order_entry() {
        let payload = OpenOrdersPayload {
            orders: vec![order("ORD-1")],
            denied: vec![],
        };
        assert_eq!(
            render(&payload),
            "📦 **Open Orders (not yet received)**\n\
             Total open orders: 1\n\
             \n\
             • **ORD-1** — REV Robotics\n  \
             Part: Through Bore Encoder\n  \
             SKU: REV-11-1271 | Qty: 2\n  \
             Status: Ordered\n  \
             Ordered: Nov 20, 2025 | ETA: Nov 27, 2025\n  \
             Tracking: 1Z999\n  \
             Requests: REQ-1,REQ-2"
        );
    }

    #[test]
    fn absent_fields_use_placeholders() {
        let payload = OpenOrdersPayload {
            orders: vec![Order::default()],
            denied: vec![DeniedRequest::default()],
        };
        let out = render(&payload);
        assert!(out.contains("• **Unknown** — Unknown vendor"));
        assert!(out.contains("Part: (no name)"));
        assert!(out.contains("SKU: (none) | Qty: N/A"));
        assert!(out.contains("Ordered: Unknown | ETA: Not set"));
        assert!(out.contains("Tracking: —"));
        assert!(out.contains("Requester: Unknown | Subsystem: N/A"));
        assert!(out.contains("Qty: N/A | Priority: N/A"));
        assert!(out.ends_with("Link: —"));
    }

    #[test]
    fn denied_only_still_shows_orders_header() {
        let payload = OpenOrdersPayload {
            orders: vec![],
            denied: vec![DeniedRequest {
                id: Some("REQ-5".to_string()),
                mentor_notes: Some("Find a cheaper vendor".to_string()),
                ..DeniedRequest::default()
            }],
        };
        let out = render(&payload);
        assert!(out.starts_with("📦 **Open Orders (not yet received)**\nNo open orders.\n\n"));
        assert!(out.contains("⚠️ **Requests Needing Attention (Denied)**\nTotal denied requests: 1"));
        assert!(out.contains("Notes: Find a cheaper vendor"));
    }

    #[test]
    fn sections_cap_at_fifteen() {
        let payload = OpenOrdersPayload {
            orders: (0..20).map(|i| order(&format!("ORD-{i}"))).collect(),
            denied: (0..16).map(|_| DeniedRequest::default()).collect(),
        };
        let out = render(&payload);
        assert!(out.contains("Showing first 15 of 20 open orders."));
        assert!(out.contains("Showing first 15 of 16 denied requests."));
        assert!(out.contains("**ORD-14**"));
        assert!(!out.contains("**ORD-15**"));
        assert_eq!(out.matches("  Requester: ").count(), 15);
    }
}
