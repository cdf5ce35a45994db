use crate::domain::common::serde_helpers::{bool_or_false, opt_number, opt_text};
use crate::domain::common::{Entity, PartySummary, ProductSummary, Ref, UserSummary};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sales order (a001)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    #[serde(rename = "_id", default)]
    pub id: String,

    /// Human order number (e.g. "SO-0042")
    #[serde(default)]
    pub order_id: Option<String>,

    #[serde(default)]
    pub party: Option<Ref<PartySummary>>,

    #[serde(default)]
    pub product_id: Option<Ref<ProductSummary>>,

    /// Unit price
    #[serde(default, deserialize_with = "opt_number")]
    pub price: Option<f64>,

    #[serde(default, deserialize_with = "opt_number")]
    pub product_qty: Option<f64>,

    /// GST percent
    #[serde(rename = "GST", default, deserialize_with = "opt_number")]
    pub gst: Option<f64>,

    #[serde(default)]
    pub mode_of_payment: Option<String>,

    #[serde(default)]
    pub terms_of_delivery: Option<String>,

    #[serde(default)]
    pub comment: Option<String>,

    #[serde(default)]
    pub uom: Option<String>,

    #[serde(default, deserialize_with = "opt_number")]
    pub token_amt: Option<f64>,

    /// Token amount verified by accounts
    #[serde(default, deserialize_with = "bool_or_false")]
    pub token_status: bool,

    #[serde(default, deserialize_with = "opt_number")]
    pub half_payment: Option<f64>,

    #[serde(default, deserialize_with = "bool_or_false")]
    pub half_payment_status: bool,

    /// BOM ids or populated BOM documents
    #[serde(default)]
    pub boms: Vec<Value>,

    /// Logistics state: "Dispatch", "Dispatched", "Delivered"
    #[serde(default)]
    pub product_status: Option<String>,

    /// Uploaded invoice image URL
    #[serde(default)]
    pub invoice: Option<String>,

    #[serde(rename = "isCompleted", default, deserialize_with = "opt_text")]
    pub is_completed: Option<String>,

    #[serde(default)]
    pub user_id: Option<Ref<UserSummary>>,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,

    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub delivery_date: Option<String>,
}

impl Sale {
    pub fn has_token(&self) -> bool {
        self.token_amt.is_some()
    }

    pub fn has_half_payment(&self) -> bool {
        self.half_payment.is_some()
    }

    pub fn has_invoice(&self) -> bool {
        self.invoice.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false)
    }

    /// price × quantity, before tax
    pub fn subtotal(&self) -> f64 {
        self.price.unwrap_or(0.0) * self.product_qty.unwrap_or(0.0)
    }

    pub fn total_with_gst(&self) -> f64 {
        let subtotal = self.subtotal();
        subtotal + subtotal * self.gst.unwrap_or(0.0) / 100.0
    }

    /// Amount still to be collected after token and half payment.
    pub fn balance_due(&self) -> f64 {
        let paid = self.token_amt.unwrap_or(0.0) + self.half_payment.unwrap_or(0.0);
        (self.total_with_gst() - paid).max(0.0)
    }
}

impl Entity for Sale {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.order_id.clone().unwrap_or_else(|| self.id.clone())
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "sale"
    }

    fn element_name() -> &'static str {
        "Sale"
    }

    fn list_name() -> &'static str {
        "Sales"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_backend_document() {
        let sale: Sale = serde_json::from_value(json!({
            "_id": "s1",
            "order_id": "SO-0042",
            "party": {"_id": "p1", "company_name": "Mehta Steel"},
            "product_id": "prod-7",
            "price": "1200",
            "product_qty": 5,
            "GST": 18,
            "mode_of_payment": "UPI",
            "token_amt": 1000,
            "token_status": true,
            "boms": ["b1"],
            "isCompleted": "Pending",
            "createdAt": "2024-03-05T10:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(sale.display_name(), "SO-0042");
        assert_eq!(sale.party.as_ref().map(|p| p.label()), Some("Mehta Steel".to_string()));
        assert_eq!(sale.product_id.as_ref().map(|p| p.id().to_string()), Some("prod-7".to_string()));
        assert_eq!(sale.price, Some(1200.0));
        assert!(sale.token_status);
        assert_eq!(sale.boms.len(), 1);
        assert!(!sale.has_invoice());
    }

    #[test]
    fn test_amounts() {
        let sale = Sale {
            price: Some(100.0),
            product_qty: Some(10.0),
            gst: Some(18.0),
            token_amt: Some(180.0),
            half_payment: Some(500.0),
            ..Default::default()
        };
        assert_eq!(sale.subtotal(), 1000.0);
        assert_eq!(sale.total_with_gst(), 1180.0);
        assert_eq!(sale.balance_due(), 500.0);
    }
}
