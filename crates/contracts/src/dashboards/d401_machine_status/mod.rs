pub mod dto;

pub use dto::{MachineRecord, MachineState, MachineSummary};
