//! Types shared between the console frontend and the mock API.
//!
//! - `domain` — backend documents (sales, assignments, production, BOM, ...)
//!   with their form schemas and derived status rules
//! - `dashboards` — telemetry and machine snapshots
//! - `shared` — response envelope, validation primitives, Socket.IO framing

pub mod dashboards;
pub mod domain;
pub mod shared;
