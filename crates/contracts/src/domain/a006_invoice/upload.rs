//! Invoice image upload (`sale/upload-image/:id`) and GST arithmetic.

use crate::shared::validation::{ValidationErrors, RULE_FILE_TYPE, RULE_REQUIRED};

/// Multipart field carrying the image.
pub const INVOICE_FIELD: &str = "invoice";

pub const ALLOWED_INVOICE_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

/// What the file input reports about the picked file.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceUpload {
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
}

impl InvoiceUpload {
    pub fn validate(file: Option<&InvoiceUpload>) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        match file {
            None => errors.add(INVOICE_FIELD, RULE_REQUIRED, "Invoice file is required"),
            Some(f) if !is_allowed_mime(&f.mime_type) => errors.add(
                INVOICE_FIELD,
                RULE_FILE_TYPE,
                "Only JPEG, PNG and GIF images are allowed",
            ),
            Some(_) => {}
        }
        errors.into_result(|| ())
    }
}

pub fn is_allowed_mime(mime: &str) -> bool {
    let mime = mime.trim().to_ascii_lowercase();
    ALLOWED_INVOICE_MIME_TYPES.contains(&mime.as_str())
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl InvoiceTotals {
    /// Amounts rounded to paise.
    pub fn compute(price: f64, qty: f64, gst_percent: f64) -> Self {
        let subtotal = round2(price * qty);
        let tax = round2(subtotal * gst_percent / 100.0);
        Self {
            subtotal,
            tax,
            total: round2(subtotal + tax),
        }
    }

    pub fn add(self, other: InvoiceTotals) -> Self {
        Self {
            subtotal: round2(self.subtotal + other.subtotal),
            tax: round2(self.tax + other.tax),
            total: round2(self.total + other.total),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(mime: &str) -> InvoiceUpload {
        InvoiceUpload {
            file_name: "invoice".into(),
            mime_type: mime.into(),
            size: 2048,
        }
    }

    #[test]
    fn test_mime_allow_list() {
        assert!(InvoiceUpload::validate(Some(&file("image/png"))).is_ok());
        assert!(InvoiceUpload::validate(Some(&file("image/jpeg"))).is_ok());
        assert!(InvoiceUpload::validate(Some(&file("IMAGE/GIF"))).is_ok());

        let errors = InvoiceUpload::validate(Some(&file("application/pdf"))).unwrap_err();
        let err = errors.get(INVOICE_FIELD).unwrap();
        assert_eq!(err.rule, RULE_FILE_TYPE);
        assert_eq!(err.message, "Only JPEG, PNG and GIF images are allowed");
    }

    #[test]
    fn test_missing_file() {
        let errors = InvoiceUpload::validate(None).unwrap_err();
        assert_eq!(errors.get(INVOICE_FIELD).map(|e| e.rule.as_str()), Some(RULE_REQUIRED));
        assert_eq!(errors.message_for(INVOICE_FIELD), Some("Invoice file is required"));
    }

    #[test]
    fn test_totals_rounding() {
        let t = InvoiceTotals::compute(333.33, 3.0, 18.0);
        assert_eq!(t.subtotal, 999.99);
        assert_eq!(t.tax, 180.0);
        assert_eq!(t.total, 1179.99);
    }
}
