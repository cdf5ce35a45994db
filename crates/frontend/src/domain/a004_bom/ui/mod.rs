pub mod list;
pub mod sales_order_status;
