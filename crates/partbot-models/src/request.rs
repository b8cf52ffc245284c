use serde::{Serialize, Serializer};

use crate::command::{InventoryArgs, OrderStatusArgs, RequestPartArgs};

/// Tag prepended to notes so the sheet shows where a request came from.
pub const NOTES_ORIGIN_TAG: &str = "[Discord]";

/// Body POSTed to the automation endpoint. Serializes as one flat JSON object
/// carrying the `action` discriminator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action")]
pub enum OutboundRequest {
    #[serde(rename = "discordRequest", rename_all = "camelCase")]
    DiscordRequest {
        requester: String,
        subsystem: String,
        part_link: String,
        quantity: i64,
        /// Always sent empty.
        needed_by: String,
        #[serde(serialize_with = "number_or_blank")]
        max_budget: Option<f64>,
        priority: String,
        notes: String,
    },
    #[serde(rename = "openOrders")]
    OpenOrders,
    #[serde(rename = "orderStatus", rename_all = "camelCase")]
    OrderStatus { request_id: String, order_id: String },
    #[serde(rename = "inventory")]
    Inventory { sku: String, search: String },
}

impl OutboundRequest {
    pub fn action(&self) -> &'static str {
        match self {
            OutboundRequest::DiscordRequest { .. } => "discordRequest",
            OutboundRequest::OpenOrders => "openOrders",
            OutboundRequest::OrderStatus { .. } => "orderStatus",
            OutboundRequest::Inventory { .. } => "inventory",
        }
    }
}

impl From<&RequestPartArgs> for OutboundRequest {
    fn from(args: &RequestPartArgs) -> Self {
        let notes = format!(
            "{NOTES_ORIGIN_TAG} {}",
            args.notes.as_deref().unwrap_or_default()
        );
        OutboundRequest::DiscordRequest {
            requester: args.requester.clone(),
            subsystem: args.subsystem.value().to_string(),
            part_link: args.link.clone().unwrap_or_default(),
            quantity: args.quantity,
            needed_by: String::new(),
            max_budget: args.max_budget,
            priority: args.priority.as_str().to_string(),
            notes: notes.trim().to_string(),
        }
    }
}

impl From<&OrderStatusArgs> for OutboundRequest {
    fn from(args: &OrderStatusArgs) -> Self {
        OutboundRequest::OrderStatus {
            request_id: args.request_id.clone(),
            order_id: args.order_id.clone(),
        }
    }
}

impl From<&InventoryArgs> for OutboundRequest {
    fn from(args: &InventoryArgs) -> Self {
        OutboundRequest::Inventory {
            sku: args.sku.clone(),
            search: args.search.clone(),
        }
    }
}

fn number_or_blank<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(n) => serializer.serialize_f64(*n),
        None => serializer.serialize_str(""),
    }
}
