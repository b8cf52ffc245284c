use partbot_models::response::{or, placeholder};
use partbot_models::{InventoryArgs, InventoryItem, InventoryPayload, OutboundRequest};

use super::{exchange, CONTACT_FAILURE};
use crate::client::AutomationClient;
use crate::error::RelayError;
use crate::responder::{Reply, Responder, Visibility};

/// Most matches listed when several come back. The rest are dropped without
/// a notice, unlike the open-orders listing.
pub const MAX_MATCHES: usize = 10;

pub const MISSING_TERM: &str = "⚠️ Provide either a **sku** or a **search** term.";

/// `/inventory`: look up stock by exact sku or keyword.
pub async fn handle(
    args: &InventoryArgs,
    client: &dyn AutomationClient,
    responder: &dyn Responder,
) -> Result<(), RelayError> {
    let Some(term) = args.query_term() else {
        return responder.reply(Reply::private(MISSING_TERM)).await;
    };

    responder.defer(Visibility::Private).await?;

    let request = OutboundRequest::from(args);
    let content = match exchange(client, &request, CONTACT_FAILURE).await {
        Ok(response) => render(term, &response.decode()),
        Err(text) => text,
    };

    responder.edit_reply(content).await
}

pub fn render(term: &str, payload: &InventoryPayload) -> String {
    match payload.matches.as_slice() {
        [] => format!("🔍 No inventory found for `{term}`."),
        [item] => format!(
            "📦 **Inventory Match**\n\n\
             **SKU:** {}\n\
             **Name:** {}\n\
             **Vendor:** {}\n\
             **Location:** {}\n\
             **Qty On-Hand:** {}",
            field(&item.sku),
            field(&item.name),
            field(&item.vendor),
            field(&item.location),
            field(&item.quantity),
        ),
        matches => {
            let mut msg = format!("📦 **{} matches found:**\n", matches.len());
            for item in matches.iter().take(MAX_MATCHES) {
                msg.push_str(&compact_line(item));
            }
            msg.trim_end().to_string()
        }
    }
}

fn compact_line(item: &InventoryItem) -> String {
    format!(
        "• `{}` — {} (Qty: {}, Loc: {})\n",
        field(&item.sku),
        field(&item.name),
        field(&item.quantity),
        field(&item.location),
    )
}

fn field(value: &Option<String>) -> &str {
    or(value, placeholder::NOT_AVAILABLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(sku: &str) -> InventoryItem {
        InventoryItem {
            sku: Some(sku.to_string()),
            name: Some("1/2in Hex Shaft".to_string()),
            vendor: Some("WCP".to_string()),
            location: Some("Bin A3".to_string()),
            quantity: Some("0".to_string()),
        }
    }

    #[test]
    fn no_matches_echoes_term() {
        let out = render("hex", &InventoryPayload::default());
        assert_eq!(out, "🔍 No inventory found for `hex`.");
    }

    #[test]
    fn single_match_card() {
        let payload = InventoryPayload {
            matches: vec![item("WCP-0100")],
        };
        assert_eq!(
            render("WCP-0100", &payload),
            "📦 **Inventory Match**\n\n\
             **SKU:** WCP-0100\n\
             **Name:** 1/2in Hex Shaft\n\
             **Vendor:** WCP\n\
             **Location:** Bin A3\n\
             **Qty On-Hand:** 0"
        );
    }

    #[test]
    fn many_matches_list_at_most_ten() {
        let payload = InventoryPayload {
            matches: (0..15).map(|i| item(&format!("WCP-{i:04}"))).collect(),
        };
        let out = render("hex", &payload);
        assert!(out.starts_with("📦 **15 matches found:**\n"));
        assert_eq!(out.lines().filter(|l| l.starts_with("• ")).count(), 10);
        assert!(out.contains("• `WCP-0009` — 1/2in Hex Shaft (Qty: 0, Loc: Bin A3)"));
        assert!(!out.contains("WCP-0010"));
        assert!(!out.to_lowercase().contains("showing"));
    }

    #[test]
    fn missing_fields_use_placeholder() {
        let payload = InventoryPayload {
            matches: vec![InventoryItem::default(), InventoryItem::default()],
        };
        let out = render("x", &payload);
        assert!(out.contains("• `N/A` — N/A (Qty: N/A, Loc: N/A)"));
    }
}
