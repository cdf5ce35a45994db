//! Token and half-token amounts recorded against a sale (`sale/addToken/:id`).

use crate::shared::validation::{required_number, ValidationErrors};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenForm {
    pub token_amt: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HalfTokenForm {
    pub half_payment: String,
}

/// Body of `sale/addToken/:id`; exactly one of the amounts is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_amt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_payment: Option<f64>,
}

impl TokenForm {
    pub fn validate(&self) -> Result<TokenPayload, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let amount = required_number(
            &mut errors,
            "token_amt",
            &self.token_amt,
            "Token amount is required",
            "Token amount must be a number",
        );
        errors.into_result(|| TokenPayload {
            token_amt: amount,
            half_payment: None,
        })
    }
}

impl HalfTokenForm {
    pub fn validate(&self) -> Result<TokenPayload, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let amount = required_number(
            &mut errors,
            "half_payment",
            &self.half_payment,
            "Half payment amount is required",
            "Half payment amount must be a number",
        );
        errors.into_result(|| TokenPayload {
            token_amt: None,
            half_payment: amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_amount() {
        let payload = TokenForm {
            token_amt: "2500".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(payload.token_amt, Some(2500.0));
        assert_eq!(serde_json::to_string(&payload).unwrap(), r#"{"token_amt":2500.0}"#);

        let errors = TokenForm::default().validate().unwrap_err();
        assert_eq!(errors.message_for("token_amt"), Some("Token amount is required"));

        let errors = TokenForm {
            token_amt: "lots".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.message_for("token_amt"), Some("Token amount must be a number"));
    }

    #[test]
    fn test_half_payment_amount() {
        let payload = HalfTokenForm {
            half_payment: " 12000.5 ".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(payload.half_payment, Some(12000.5));
        assert_eq!(payload.token_amt, None);

        let errors = HalfTokenForm {
            half_payment: "x".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            errors.message_for("half_payment"),
            Some("Half payment amount must be a number")
        );
    }
}
