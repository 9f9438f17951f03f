use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An order as returned by the backend.
///
/// `total_price` is computed server-side from the item ids at placement
/// time; the client never submits prices. `created_at` stays a raw string:
/// the backend stringifies its timestamps in a non-RFC3339 format, so
/// parsing is display-time best effort (see `utils::format_date`).
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub item_ids: Vec<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total_price: Decimal,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Request body for `POST /orders`. Item ids only - the backend is the
/// source of truth for pricing.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceOrderRequest {
    pub user_id: String,
    pub item_ids: Vec<String>,
}

/// Response body for `POST /orders`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrderResponse {
    pub order_id: String,
}

/// Request body for `PATCH /orders/{id}/status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order() {
        // created_at arrives as Go's time.Time String() output
        let json = r#"{"id":"ord-17","user_id":"u-3","item_ids":["m-1","m-2"],"status":"Pending","total_price":12.75,"created_at":"2026-07-01 18:30:00.123456789 +0000 UTC"}"#;

        let order: Order = serde_json::from_str(json).expect("Failed to parse order JSON");
        assert_eq!(order.id, "ord-17");
        assert_eq!(order.item_ids, vec!["m-1", "m-2"]);
        assert_eq!(order.status, "Pending");
        assert_eq!(order.total_price, "12.75".parse::<Decimal>().unwrap());
        assert!(order.created_at.is_some());
    }

    #[test]
    fn test_parse_order_with_missing_fields() {
        // Older orders may lack a timestamp or total
        let order: Order =
            serde_json::from_str(r#"{"id":"ord-1","item_ids":[]}"#).expect("Failed to parse");
        assert!(order.created_at.is_none());
        assert_eq!(order.total_price, Decimal::ZERO);
    }

    #[test]
    fn test_place_order_request_omits_prices() {
        let req = PlaceOrderRequest {
            user_id: "u-3".to_string(),
            item_ids: vec!["m-1".to_string(), "m-2".to_string()],
        };

        let value = serde_json::to_value(&req).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["item_ids", "user_id"]);
    }
}
