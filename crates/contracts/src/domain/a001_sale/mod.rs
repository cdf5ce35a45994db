pub mod aggregate;
pub mod payment;
pub mod status;
pub mod validation;

pub use aggregate::Sale;
pub use status::{SaleActions, SaleStage};
pub use validation::{GstRate, ModeOfPayment, SaleForm, SalePayload};
