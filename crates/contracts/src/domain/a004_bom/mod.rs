pub mod aggregate;

pub use aggregate::{ApproveRawMaterialsPayload, Bom, BomFinishedGood, BomRawMaterial, BomSalesOrderStatus};
