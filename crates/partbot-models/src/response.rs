//! Decoded shapes of the automation endpoint's replies.
//!
//! The endpoint is a spreadsheet script and its output is treated as untrusted:
//! every field is optional, wrong types decode as absent, and list elements
//! that are not objects decode as empty records. Renderers pick a placeholder
//! from [`placeholder`] for anything absent.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Display placeholders for absent fields.
pub mod placeholder {
    pub const UNKNOWN: &str = "Unknown";
    pub const UNKNOWN_VENDOR: &str = "Unknown vendor";
    pub const UNKNOWN_ERROR: &str = "Unknown error";
    pub const NOT_AVAILABLE: &str = "N/A";
    pub const NO_NAME: &str = "(no name)";
    pub const NONE: &str = "(none)";
    pub const DASH: &str = "—";
}

/// A JSON object returned by the endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteResponse {
    body: Value,
}

#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default, deserialize_with = "lenient::text")]
    status: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    message: Option<String>,
}

impl RemoteResponse {
    /// `None` unless the body is a JSON object.
    pub fn from_value(body: Value) -> Option<Self> {
        body.is_object().then_some(Self { body })
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    fn envelope(&self) -> Envelope {
        Envelope::deserialize(&self.body).unwrap_or_default()
    }

    pub fn is_ok(&self) -> bool {
        self.envelope().status.as_deref() == Some("ok")
    }

    /// Remote-supplied error text, if any.
    pub fn message(&self) -> Option<String> {
        self.envelope().message
    }

    /// Decode an action-specific payload, falling back to its default.
    pub fn decode<T: DeserializeOwned + Default>(&self) -> T {
        T::deserialize(&self.body).unwrap_or_default()
    }
}

/// Pick the field's text or the placeholder.
pub fn or<'a>(field: &'a Option<String>, placeholder: &'a str) -> &'a str {
    field.as_deref().unwrap_or(placeholder)
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestAck {
    #[serde(rename = "requestID", default, deserialize_with = "lenient::text")]
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Order {
    #[serde(rename = "orderId", default, deserialize_with = "lenient::text")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub vendor: Option<String>,
    #[serde(rename = "partName", default, deserialize_with = "lenient::text")]
    pub part_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub qty: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(rename = "orderDate", default)]
    pub order_date: Value,
    #[serde(default)]
    pub eta: Value,
    #[serde(default, deserialize_with = "lenient::text")]
    pub shipping: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub tracking: Option<String>,
    #[serde(rename = "receivedDate", default, deserialize_with = "lenient::text")]
    pub received_date: Option<String>,
    #[serde(rename = "includedRequests", default, deserialize_with = "lenient::text")]
    pub included_requests: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeniedRequest {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(rename = "partName", default, deserialize_with = "lenient::text")]
    pub part_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub requester: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub subsystem: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub qty: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub priority: Option<String>,
    #[serde(rename = "mentorNotes", default, deserialize_with = "lenient::text")]
    pub mentor_notes: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(rename = "requestStatus", default, deserialize_with = "lenient::text")]
    pub request_status: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub subsystem: Option<String>,
    #[serde(rename = "partName", default, deserialize_with = "lenient::text")]
    pub part_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub qty: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub priority: Option<String>,
}

/// Inventory rows keep zero quantities: only missing, null or blank count as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InventoryItem {
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub vendor: Option<String>,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub quantity: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OpenOrdersPayload {
    #[serde(default, deserialize_with = "lenient::list")]
    pub orders: Vec<Order>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub denied: Vec<DeniedRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OrderStatusPayload {
    #[serde(default, deserialize_with = "lenient::record")]
    pub request: Option<RequestRecord>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub orders: Vec<Order>,
    #[serde(default, deserialize_with = "lenient::record")]
    pub order: Option<Order>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InventoryPayload {
    #[serde(default, deserialize_with = "lenient::list")]
    pub matches: Vec<InventoryItem>,
}

/// Deserializers that never fail on a well-formed JSON value.
pub mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Text with falsy semantics: null, `""`, `0` and `false` are absent.
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(falsy_to_none(&Value::deserialize(d)?))
    }

    /// Text where only null and `""` are absent.
    pub fn scalar<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(match &value {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) => Some(number_text(n)),
            Value::Bool(b) => Some(b.to_string()),
            other => falsy_to_none(other),
        })
    }

    /// A list of records. Non-arrays decode as empty, bad elements as defaults.
    pub fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
            _ => Vec::new(),
        })
    }

    /// A nested record. Anything but an object decodes as absent.
    pub fn record<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(d)? {
            value @ Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        })
    }

    pub fn falsy_to_none(value: &Value) -> Option<String> {
        match value {
            Value::Null | Value::Bool(false) => None,
            Value::Bool(true) => Some("true".to_string()),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::Number(n) => Some(number_text(n)),
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => {
                let joined = items
                    .iter()
                    .filter_map(falsy_to_none)
                    .collect::<Vec<_>>()
                    .join(",");
                (!joined.is_empty()).then_some(joined)
            }
            Value::Object(_) => Some(value.to_string()),
        }
    }

    /// Whole floats print without a trailing `.0`, the way a sheet shows them.
    fn number_text(n: &serde_json::Number) -> String {
        match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(body: Value) -> RemoteResponse {
        RemoteResponse::from_value(body).unwrap()
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        assert!(RemoteResponse::from_value(json!("<html>")).is_none());
        assert!(RemoteResponse::from_value(json!([1, 2])).is_none());
    }

    #[test]
    fn status_and_message() {
        let ok = response(json!({ "status": "ok" }));
        assert!(ok.is_ok());
        assert_eq!(ok.message(), None);

        let err = response(json!({ "status": "error", "message": "Sheet locked" }));
        assert!(!err.is_ok());
        assert_eq!(err.message().as_deref(), Some("Sheet locked"));

        let odd = response(json!({ "status": 1, "message": {"detail": "x"} }));
        assert!(!odd.is_ok());
    }

    #[test]
    fn open_orders_tolerates_wrong_types() {
        let payload: OpenOrdersPayload = response(json!({
            "status": "ok",
            "orders": [
                { "orderId": "ORD-1", "vendor": "", "qty": 0, "includedRequests": ["REQ-1", "REQ-2"] },
                "garbage",
            ],
            "denied": "not a list",
        }))
        .decode();

        assert_eq!(payload.orders.len(), 2);
        assert_eq!(payload.orders[0].order_id.as_deref(), Some("ORD-1"));
        assert_eq!(payload.orders[0].vendor, None);
        assert_eq!(payload.orders[0].qty, None);
        assert_eq!(
            payload.orders[0].included_requests.as_deref(),
            Some("REQ-1,REQ-2")
        );
        assert_eq!(payload.orders[1], Order::default());
        assert!(payload.denied.is_empty());
    }

    #[test]
    fn order_status_nested_records() {
        let payload: OrderStatusPayload = response(json!({
            "status": "ok",
            "request": { "id": "REQ-9", "qty": 2.0 },
            "order": null,
        }))
        .decode();

        let request = payload.request.unwrap();
        assert_eq!(request.id.as_deref(), Some("REQ-9"));
        assert_eq!(request.qty.as_deref(), Some("2"));
        assert!(payload.order.is_none());
        assert!(payload.orders.is_empty());
    }

    #[test]
    fn inventory_keeps_zero_quantity() {
        let payload: InventoryPayload = response(json!({
            "matches": [{ "sku": "am-0001", "quantity": 0, "location": "" }]
        }))
        .decode();

        let item = &payload.matches[0];
        assert_eq!(item.quantity.as_deref(), Some("0"));
        assert_eq!(item.location, None);
        assert_eq!(or(&item.vendor, placeholder::NOT_AVAILABLE), "N/A");
    }

    #[test]
    fn request_ack_reads_request_id() {
        let ack: RequestAck = response(json!({ "status": "ok", "requestID": "REQ-0042" })).decode();
        assert_eq!(ack.request_id.as_deref(), Some("REQ-0042"));
    }
}
