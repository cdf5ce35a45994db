mod dashboard;

pub use dashboard::MachineStatusDashboard;
