//! Common types and traits shared by all domain documents

pub mod badge;
pub mod entity;
pub mod refs;
pub mod serde_helpers;

// Re-exports
pub use badge::BadgeVariant;
pub use entity::Entity;
pub use refs::{PartySummary, ProductSummary, Ref, UserSummary};
