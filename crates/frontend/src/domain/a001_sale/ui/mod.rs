pub mod details;
pub mod invoice_upload;
pub mod list;
pub mod token;
pub mod upcoming;
