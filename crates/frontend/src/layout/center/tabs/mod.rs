pub mod tab;

pub use tab::{Tab, TabStrip};
