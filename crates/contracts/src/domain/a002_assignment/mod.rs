pub mod aggregate;
pub mod validation;

pub use aggregate::{Assignment, TaskStatus};
pub use validation::{AssignForm, AssignPayload, StatusUpdatePayload};
