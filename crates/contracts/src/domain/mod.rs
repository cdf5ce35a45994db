pub mod a001_sale;
pub mod a002_assignment;
pub mod a003_production_process;
pub mod a004_bom;
pub mod a005_payment;
pub mod a006_invoice;
pub mod a007_employee;
pub mod a008_role;
pub mod common;
