pub mod handlers;
pub mod routes;
pub mod shared;
pub mod socket;
pub mod system;

#[cfg(test)]
pub(crate) mod test_support;

pub use routes::configure_routes;
pub use shared::state::AppState;
