//! Stage of a sales order derived from its payment and logistics flags.

use super::aggregate::Sale;
use crate::domain::common::BadgeVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaleStage {
    Pending,
    TokenReceived,
    TokenVerified,
    InProduction,
    Dispatched,
    Delivered,
    Completed,
}

impl SaleStage {
    /// First matching rule wins.
    pub fn of(sale: &Sale) -> Self {
        if sale.is_completed.as_deref() == Some("Completed") {
            return SaleStage::Completed;
        }
        match sale.product_status.as_deref().map(str::trim) {
            Some("Delivered") => return SaleStage::Delivered,
            Some("Dispatch") | Some("Dispatched") => return SaleStage::Dispatched,
            _ => {}
        }
        if !sale.boms.is_empty() {
            return SaleStage::InProduction;
        }
        if sale.token_status {
            return SaleStage::TokenVerified;
        }
        if sale.has_token() {
            return SaleStage::TokenReceived;
        }
        SaleStage::Pending
    }

    pub fn label(self) -> &'static str {
        match self {
            SaleStage::Pending => "Pending",
            SaleStage::TokenReceived => "Token Received",
            SaleStage::TokenVerified => "Token Verified",
            SaleStage::InProduction => "In Production",
            SaleStage::Dispatched => "Dispatched",
            SaleStage::Delivered => "Delivered",
            SaleStage::Completed => "Completed",
        }
    }

    pub fn badge(self) -> BadgeVariant {
        match self {
            SaleStage::Pending => BadgeVariant::Neutral,
            SaleStage::TokenReceived | SaleStage::TokenVerified => BadgeVariant::Info,
            SaleStage::InProduction | SaleStage::Dispatched => BadgeVariant::Warning,
            SaleStage::Delivered | SaleStage::Completed => BadgeVariant::Success,
        }
    }
}

/// Which row buttons a sale shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaleActions {
    pub can_edit: bool,
    pub can_add_token: bool,
    pub can_add_half_payment: bool,
    pub can_assign: bool,
    pub can_upload_invoice: bool,
    pub can_mark_completed: bool,
}

impl SaleActions {
    pub fn of(sale: &Sale) -> Self {
        let stage = SaleStage::of(sale);
        let completed = stage == SaleStage::Completed;
        Self {
            can_edit: matches!(stage, SaleStage::Pending | SaleStage::TokenReceived),
            can_add_token: !sale.has_token() && !completed,
            can_add_half_payment: sale.token_status && !sale.has_half_payment() && !completed,
            can_assign: !completed,
            can_upload_invoice: matches!(
                stage,
                SaleStage::InProduction | SaleStage::Dispatched | SaleStage::Delivered
            ) && !sale.has_invoice(),
            can_mark_completed: stage == SaleStage::Delivered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stage_precedence() {
        let mut sale = Sale::default();
        assert_eq!(SaleStage::of(&sale), SaleStage::Pending);

        sale.token_amt = Some(500.0);
        assert_eq!(SaleStage::of(&sale), SaleStage::TokenReceived);

        sale.token_status = true;
        assert_eq!(SaleStage::of(&sale), SaleStage::TokenVerified);

        sale.boms = vec![json!("bom-1")];
        assert_eq!(SaleStage::of(&sale), SaleStage::InProduction);

        sale.product_status = Some("Dispatch".into());
        assert_eq!(SaleStage::of(&sale), SaleStage::Dispatched);

        sale.product_status = Some("Delivered".into());
        assert_eq!(SaleStage::of(&sale), SaleStage::Delivered);

        sale.is_completed = Some("Completed".into());
        assert_eq!(SaleStage::of(&sale), SaleStage::Completed);
        assert_eq!(SaleStage::Completed.badge(), BadgeVariant::Success);
    }

    #[test]
    fn test_pending_sale_actions() {
        let actions = SaleActions::of(&Sale::default());
        assert!(actions.can_edit);
        assert!(actions.can_add_token);
        assert!(!actions.can_add_half_payment);
        assert!(actions.can_assign);
        assert!(!actions.can_upload_invoice);
        assert!(!actions.can_mark_completed);
    }

    #[test]
    fn test_verified_token_unlocks_half_payment() {
        let sale = Sale {
            token_amt: Some(1000.0),
            token_status: true,
            ..Default::default()
        };
        let actions = SaleActions::of(&sale);
        assert!(!actions.can_edit);
        assert!(!actions.can_add_token);
        assert!(actions.can_add_half_payment);

        let paid = Sale {
            half_payment: Some(5000.0),
            ..sale
        };
        assert!(!SaleActions::of(&paid).can_add_half_payment);
    }

    #[test]
    fn test_invoice_upload_and_completion() {
        let mut sale = Sale {
            token_amt: Some(1000.0),
            token_status: true,
            boms: vec![json!("bom-1")],
            product_status: Some("Delivered".into()),
            ..Default::default()
        };
        let actions = SaleActions::of(&sale);
        assert!(actions.can_upload_invoice);
        assert!(actions.can_mark_completed);

        sale.invoice = Some("/uploads/inv-1.png".into());
        assert!(!SaleActions::of(&sale).can_upload_invoice);

        sale.is_completed = Some("Completed".into());
        let done = SaleActions::of(&sale);
        assert!(!done.can_assign);
        assert!(!done.can_mark_completed);
        assert!(!done.can_add_half_payment);
    }
}
