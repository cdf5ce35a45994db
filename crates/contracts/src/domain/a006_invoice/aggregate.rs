use super::upload::InvoiceTotals;
use crate::domain::a001_sale::Sale;
use crate::domain::common::serde_helpers::opt_number;
use crate::domain::common::{Entity, PartySummary, ProductSummary, Ref};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    #[serde(default)]
    pub item: Option<Ref<ProductSummary>>,
    #[serde(default, deserialize_with = "opt_number")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub price: Option<f64>,
    #[serde(rename = "GST", default, deserialize_with = "opt_number")]
    pub gst: Option<f64>,
}

impl InvoiceItem {
    pub fn totals(&self) -> InvoiceTotals {
        InvoiceTotals::compute(
            self.price.unwrap_or(0.0),
            self.quantity.unwrap_or(0.0),
            self.gst.unwrap_or(0.0),
        )
    }
}

/// Invoice (a006)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub invoice_no: Option<String>,
    #[serde(default)]
    pub sale_id: Option<Ref<Sale>>,
    #[serde(default)]
    pub party: Option<Ref<PartySummary>>,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    #[serde(default, deserialize_with = "opt_number")]
    pub subtotal: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub tax: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub total: Option<f64>,
    #[serde(default)]
    pub invoice_image: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

impl Invoice {
    /// Backend totals when present, otherwise summed from the items.
    pub fn totals(&self) -> InvoiceTotals {
        let computed = self
            .items
            .iter()
            .map(InvoiceItem::totals)
            .fold(InvoiceTotals::default(), |acc, t| acc.add(t));
        InvoiceTotals {
            subtotal: self.subtotal.unwrap_or(computed.subtotal),
            tax: self.tax.unwrap_or(computed.tax),
            total: self.total.unwrap_or(computed.total),
        }
    }
}

impl Entity for Invoice {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.invoice_no.clone().unwrap_or_else(|| self.id.clone())
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "invoice"
    }

    fn element_name() -> &'static str {
        "Invoice"
    }

    fn list_name() -> &'static str {
        "Invoices"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_totals_from_items_when_backend_omits_them() {
        let invoice: Invoice = serde_json::from_value(json!({
            "_id": "i1",
            "invoice_no": "INV-7",
            "items": [
                {"item": "p1", "quantity": 2, "price": 100, "GST": 18},
                {"item": "p2", "quantity": "1", "price": "50", "GST": 5}
            ]
        }))
        .unwrap();
        let t = invoice.totals();
        assert_eq!(t.subtotal, 250.0);
        assert_eq!(t.tax, 38.5);
        assert_eq!(t.total, 288.5);
    }

    #[test]
    fn test_backend_totals_win() {
        let invoice = Invoice {
            subtotal: Some(10.0),
            tax: Some(1.8),
            total: Some(11.8),
            ..Default::default()
        };
        assert_eq!(invoice.totals().total, 11.8);
    }
}
