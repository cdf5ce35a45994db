pub mod aggregate;
pub mod upload;

pub use aggregate::{Invoice, InvoiceItem};
pub use upload::{InvoiceTotals, InvoiceUpload, ALLOWED_INVOICE_MIME_TYPES, INVOICE_FIELD};
