pub mod counters;
pub mod dto;

pub use counters::{CounterStore, UsageCounters};
pub use dto::{Actuator, ControlDataUpdate, DeviceDataRecord, SensorReadings};

/// Socket.IO event the client emits to join the live feed.
pub const JOIN_EVENT: &str = "joinDashboard";

/// Socket.IO event carrying a [`ControlDataUpdate`].
pub const UPDATE_EVENT: &str = "controlDataUpdate";
