pub mod aggregate;

pub use aggregate::{Role, RoleForm, RolePayload, PERMISSIONS};
