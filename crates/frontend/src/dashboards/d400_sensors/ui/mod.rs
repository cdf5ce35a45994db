mod dashboard;

pub use dashboard::SensorsDashboard;
