//! Create/edit form for a sales order.

use super::aggregate::Sale;
use crate::shared::validation::{
    check_integer, check_positive, non_empty, required_number, required_string, ValidationErrors,
    RULE_ONE_OF, RULE_REQUIRED, RULE_TYPE_ERROR,
};
use serde::{Deserialize, Serialize};

/// GST slab accepted for a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GstRate {
    Five,
    Twelve,
    Eighteen,
}

impl GstRate {
    pub const ALL: [GstRate; 3] = [GstRate::Five, GstRate::Twelve, GstRate::Eighteen];

    pub fn percent(self) -> u8 {
        match self {
            GstRate::Five => 5,
            GstRate::Twelve => 12,
            GstRate::Eighteen => 18,
        }
    }

    pub fn label(self) -> String {
        format!("{}%", self.percent())
    }
}

impl TryFrom<u8> for GstRate {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        GstRate::ALL
            .into_iter()
            .find(|rate| rate.percent() == value)
            .ok_or_else(|| format!("unsupported GST rate {}", value))
    }
}

impl From<GstRate> for u8 {
    fn from(rate: GstRate) -> Self {
        rate.percent()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeOfPayment {
    Cash,
    Cheque,
    #[serde(rename = "NEFT/RTGS")]
    NeftRtgs,
    #[serde(rename = "UPI")]
    Upi,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
}

impl ModeOfPayment {
    pub const ALL: [ModeOfPayment; 6] = [
        ModeOfPayment::Cash,
        ModeOfPayment::Cheque,
        ModeOfPayment::NeftRtgs,
        ModeOfPayment::Upi,
        ModeOfPayment::CreditCard,
        ModeOfPayment::DebitCard,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModeOfPayment::Cash => "Cash",
            ModeOfPayment::Cheque => "Cheque",
            ModeOfPayment::NeftRtgs => "NEFT/RTGS",
            ModeOfPayment::Upi => "UPI",
            ModeOfPayment::CreditCard => "Credit Card",
            ModeOfPayment::DebitCard => "Debit Card",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        ModeOfPayment::ALL.into_iter().find(|m| m.as_str() == raw)
    }
}

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleForm {
    pub party: String,
    pub product_id: String,
    pub price: String,
    pub product_qty: String,
    pub gst: String,
    pub mode_of_payment: String,
    pub terms_of_delivery: String,
    pub comment: String,
    pub uom: String,
}

/// Validated body for `sale/create` and `sale/update/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalePayload {
    pub party: String,
    pub product_id: String,
    pub price: f64,
    pub product_qty: u64,
    #[serde(rename = "GST")]
    pub gst: GstRate,
    pub mode_of_payment: ModeOfPayment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_delivery: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uom: Option<String>,
}

impl SaleForm {
    /// Prefills the edit form from an existing sale.
    pub fn from_sale(sale: &Sale) -> Self {
        let number = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();
        Self {
            party: sale.party.as_ref().map(|p| p.id().to_string()).unwrap_or_default(),
            product_id: sale
                .product_id
                .as_ref()
                .map(|p| p.id().to_string())
                .unwrap_or_default(),
            price: number(sale.price),
            product_qty: number(sale.product_qty),
            gst: number(sale.gst),
            mode_of_payment: sale.mode_of_payment.clone().unwrap_or_default(),
            terms_of_delivery: sale.terms_of_delivery.clone().unwrap_or_default(),
            comment: sale.comment.clone().unwrap_or_default(),
            uom: sale.uom.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<SalePayload, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let party = required_string(&mut errors, "party", &self.party, "Party is required");
        let product_id =
            required_string(&mut errors, "product_id", &self.product_id, "Product is required");

        let price = required_number(
            &mut errors,
            "price",
            &self.price,
            "Price is required",
            "Price must be a number",
        )
        .filter(|v| check_positive(&mut errors, "price", *v, "Price must be greater than zero"));

        let product_qty = required_number(
            &mut errors,
            "product_qty",
            &self.product_qty,
            "Product quantity is required",
            "Product quantity must be a number",
        )
        .filter(|v| {
            // u64::MAX as f64 rounds up to 2^64, which does not fit
            if *v >= u64::MAX as f64 {
                errors.add("product_qty", RULE_TYPE_ERROR, "Product quantity must be a number");
                return false;
            }
            check_integer(&mut errors, "product_qty", *v, "Product quantity must be an integer")
                && check_positive(
                    &mut errors,
                    "product_qty",
                    *v,
                    "Product quantity must be greater than zero",
                )
        });

        let gst = match non_empty(&self.gst) {
            None => {
                errors.add("GST", RULE_REQUIRED, "GST rate is required");
                None
            }
            Some(raw) => {
                let rate = raw
                    .trim_end_matches('%')
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v <= 255.0)
                    .and_then(|v| GstRate::try_from(v as u8).ok());
                if rate.is_none() {
                    errors.add("GST", RULE_ONE_OF, "Select a valid GST rate");
                }
                rate
            }
        };

        let mode_of_payment = match non_empty(&self.mode_of_payment) {
            None => {
                errors.add("mode_of_payment", RULE_REQUIRED, "Mode of payment is required");
                None
            }
            Some(raw) => {
                let mode = ModeOfPayment::parse(&raw);
                if mode.is_none() {
                    errors.add("mode_of_payment", RULE_ONE_OF, "Select a valid mode of payment");
                }
                mode
            }
        };

        match (party, product_id, price, product_qty, gst, mode_of_payment) {
            (Some(party), Some(product_id), Some(price), Some(qty), Some(gst), Some(mode))
                if errors.is_empty() =>
            {
                Ok(SalePayload {
                    party,
                    product_id,
                    price,
                    product_qty: qty as u64,
                    gst,
                    mode_of_payment: mode,
                    terms_of_delivery: non_empty(&self.terms_of_delivery),
                    comment: non_empty(&self.comment),
                    uom: non_empty(&self.uom),
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::{RULE_INTEGER, RULE_POSITIVE};

    fn valid_form() -> SaleForm {
        SaleForm {
            party: "p1".into(),
            product_id: "prod-7".into(),
            price: "1250.50".into(),
            product_qty: "4".into(),
            gst: "18".into(),
            mode_of_payment: "NEFT/RTGS".into(),
            terms_of_delivery: "  Ex-works  ".into(),
            comment: "".into(),
            uom: "pcs".into(),
        }
    }

    #[test]
    fn test_valid_form_builds_payload() {
        let payload = valid_form().validate().unwrap();
        assert_eq!(payload.price, 1250.5);
        assert_eq!(payload.product_qty, 4);
        assert_eq!(payload.gst, GstRate::Eighteen);
        assert_eq!(payload.mode_of_payment, ModeOfPayment::NeftRtgs);
        assert_eq!(payload.terms_of_delivery.as_deref(), Some("Ex-works"));
        assert_eq!(payload.comment, None);

        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["GST"], 18);
        assert_eq!(body["mode_of_payment"], "NEFT/RTGS");
        assert!(body.get("comment").is_none());
    }

    #[test]
    fn test_price_must_be_positive() {
        for price in ["0", "-3"] {
            let form = SaleForm {
                price: price.into(),
                ..valid_form()
            };
            let errors = form.validate().unwrap_err();
            assert_eq!(errors.message_for("price"), Some("Price must be greater than zero"));
            assert_eq!(errors.get("price").map(|e| e.rule.as_str()), Some(RULE_POSITIVE));
        }
    }

    #[test]
    fn test_price_type_error() {
        let form = SaleForm {
            price: "abc".into(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("price").map(|e| e.rule.as_str()), Some(RULE_TYPE_ERROR));
        assert_eq!(errors.message_for("price"), Some("Price must be a number"));
    }

    #[test]
    fn test_quantity_must_be_integer() {
        let form = SaleForm {
            product_qty: "2.5".into(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("product_qty").map(|e| e.rule.as_str()), Some(RULE_INTEGER));
        assert_eq!(
            errors.message_for("product_qty"),
            Some("Product quantity must be an integer")
        );

        let form = SaleForm {
            product_qty: "0".into(),
            ..valid_form()
        };
        assert_eq!(
            form.validate().unwrap_err().message_for("product_qty"),
            Some("Product quantity must be greater than zero")
        );
    }

    #[test]
    fn test_quantity_out_of_range_is_a_type_error() {
        for qty in ["1e30", "18446744073709551616"] {
            let form = SaleForm {
                product_qty: qty.into(),
                ..valid_form()
            };
            let errors = form.validate().unwrap_err();
            assert_eq!(errors.get("product_qty").map(|e| e.rule.as_str()), Some(RULE_TYPE_ERROR));
            assert_eq!(
                errors.message_for("product_qty"),
                Some("Product quantity must be a number")
            );
        }

        let form = SaleForm {
            product_qty: "1e6".into(),
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap().product_qty, 1_000_000);
    }

    #[test]
    fn test_gst_rules() {
        let missing = SaleForm {
            gst: "".into(),
            ..valid_form()
        };
        assert_eq!(
            missing.validate().unwrap_err().message_for("GST"),
            Some("GST rate is required")
        );

        for bad in ["7", "28", "twelve", "12.5"] {
            let form = SaleForm {
                gst: bad.into(),
                ..valid_form()
            };
            let errors = form.validate().unwrap_err();
            assert_eq!(errors.message_for("GST"), Some("Select a valid GST rate"));
            assert_eq!(errors.get("GST").map(|e| e.rule.as_str()), Some(RULE_ONE_OF));
        }

        for good in ["5", "12", "18", "12%"] {
            let form = SaleForm {
                gst: good.into(),
                ..valid_form()
            };
            assert!(form.validate().is_ok(), "{} should pass", good);
        }
    }

    #[test]
    fn test_empty_form_reports_every_required_field_in_order() {
        let errors = SaleForm::default().validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["party", "product_id", "price", "product_qty", "GST", "mode_of_payment"]
        );
        assert_eq!(errors.message_for("mode_of_payment"), Some("Mode of payment is required"));
    }

    #[test]
    fn test_unknown_mode_of_payment() {
        let form = SaleForm {
            mode_of_payment: "Barter".into(),
            ..valid_form()
        };
        assert_eq!(
            form.validate().unwrap_err().message_for("mode_of_payment"),
            Some("Select a valid mode of payment")
        );
    }

    #[test]
    fn test_prefill_from_sale_round_trips_through_validation() {
        let sale = Sale {
            party: Some(crate::domain::common::Ref::Id("p1".into())),
            product_id: Some(crate::domain::common::Ref::Id("prod-7".into())),
            price: Some(99.0),
            product_qty: Some(3.0),
            gst: Some(5.0),
            mode_of_payment: Some("Cash".into()),
            ..Default::default()
        };
        let payload = SaleForm::from_sale(&sale).validate().unwrap();
        assert_eq!(payload.gst, GstRate::Five);
        assert_eq!(payload.product_qty, 3);
    }
}
