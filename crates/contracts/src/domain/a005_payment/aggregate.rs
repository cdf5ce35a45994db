use crate::domain::a001_sale::Sale;
use crate::domain::common::serde_helpers::{bool_or_false, opt_number};
use crate::domain::common::{Entity, Ref};
use serde::{Deserialize, Serialize};

/// Payment received against a sale (a005)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub sale_id: Option<Ref<Sale>>,
    #[serde(default, deserialize_with = "opt_number")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub mode: Option<String>,
    /// "token", "half", "full", ...
    #[serde(default)]
    pub payment_type: Option<String>,
    #[serde(default, deserialize_with = "bool_or_false")]
    pub verified: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

impl Entity for Payment {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        match &self.sale_id {
            Some(sale) => format!("{} / {}", sale.label(), self.payment_type.as_deref().unwrap_or("payment")),
            None => self.id.clone(),
        }
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "payment"
    }

    fn element_name() -> &'static str {
        "Payment"
    }

    fn list_name() -> &'static str {
        "Payments"
    }
}

/// Footer totals of the payments list.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaymentSummary {
    pub count: usize,
    pub total: f64,
    pub verified_total: f64,
}

impl PaymentSummary {
    pub fn from_payments(payments: &[Payment]) -> Self {
        payments.iter().fold(Self::default(), |mut acc, p| {
            let amount = p.amount.unwrap_or(0.0);
            acc.count += 1;
            acc.total += amount;
            if p.verified {
                acc.verified_total += amount;
            }
            acc
        })
    }

    pub fn pending_total(&self) -> f64 {
        self.total - self.verified_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary() {
        let payments: Vec<Payment> = serde_json::from_value(json!([
            {"_id": "1", "amount": 1000, "verified": true},
            {"_id": "2", "amount": "250.5", "verified": false},
            {"_id": "3"}
        ]))
        .unwrap();
        let summary = PaymentSummary::from_payments(&payments);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.total, 1250.5);
        assert_eq!(summary.verified_total, 1000.0);
        assert_eq!(summary.pending_total(), 250.5);
    }
}
