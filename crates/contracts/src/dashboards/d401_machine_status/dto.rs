use crate::domain::common::serde_helpers::opt_number;
use crate::domain::common::BadgeVariant;
use serde::{Deserialize, Serialize};

/// One machine in `dashboard/machine-data`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineRecord {
    #[serde(default, alias = "_id")]
    pub machine_id: String,
    #[serde(default)]
    pub machine_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "opt_number")]
    pub temperature: Option<f64>,
    #[serde(default, alias = "produced", deserialize_with = "opt_number")]
    pub produced_count: Option<f64>,
    #[serde(default, alias = "updatedAt")]
    pub last_updated: Option<String>,
}

impl MachineRecord {
    pub fn state(&self) -> MachineState {
        MachineState::parse(self.status.as_deref().unwrap_or(""))
    }

    pub fn label(&self) -> String {
        self.machine_name.clone().unwrap_or_else(|| self.machine_id.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MachineState {
    Running,
    Idle,
    Stopped,
    Fault,
    Unknown,
}

impl MachineState {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "running" | "active" | "on" => MachineState::Running,
            "idle" => MachineState::Idle,
            "stopped" | "off" => MachineState::Stopped,
            "fault" | "error" | "breakdown" => MachineState::Fault,
            _ => MachineState::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MachineState::Running => "Running",
            MachineState::Idle => "Idle",
            MachineState::Stopped => "Stopped",
            MachineState::Fault => "Fault",
            MachineState::Unknown => "Unknown",
        }
    }

    pub fn badge(self) -> BadgeVariant {
        match self {
            MachineState::Running => BadgeVariant::Success,
            MachineState::Idle => BadgeVariant::Info,
            MachineState::Stopped => BadgeVariant::Neutral,
            MachineState::Fault => BadgeVariant::Danger,
            MachineState::Unknown => BadgeVariant::Neutral,
        }
    }
}

/// Cards above the machine table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MachineSummary {
    pub total: usize,
    pub running: usize,
    pub idle: usize,
    pub stopped: usize,
    pub fault: usize,
    /// Mean over machines that report a temperature
    pub average_temperature: Option<f64>,
    pub total_produced: f64,
}

impl MachineSummary {
    pub fn from_records(records: &[MachineRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Default::default()
        };
        let mut temp_sum = 0.0;
        let mut temp_count = 0usize;

        for record in records {
            match record.state() {
                MachineState::Running => summary.running += 1,
                MachineState::Idle => summary.idle += 1,
                MachineState::Stopped => summary.stopped += 1,
                MachineState::Fault => summary.fault += 1,
                MachineState::Unknown => {}
            }
            if let Some(t) = record.temperature {
                temp_sum += t;
                temp_count += 1;
            }
            summary.total_produced += record.produced_count.unwrap_or(0.0);
        }

        if temp_count > 0 {
            summary.average_temperature = Some(temp_sum / temp_count as f64);
        }
        summary
    }

    /// Share of machines running, 0..=100.
    pub fn utilization_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.running as f64 / self.total as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary() {
        let records: Vec<MachineRecord> = serde_json::from_value(json!([
            {"machine_id": "M1", "status": "Running", "temperature": 60, "produced_count": 120},
            {"machine_id": "M2", "status": "idle", "temperature": "40"},
            {"_id": "M3", "status": "FAULT", "produced": 5},
            {"machine_id": "M4", "status": "Stopped"},
            {"machine_id": "M5", "status": "calibrating"}
        ]))
        .unwrap();
        let s = MachineSummary::from_records(&records);
        assert_eq!(s.total, 5);
        assert_eq!((s.running, s.idle, s.stopped, s.fault), (1, 1, 1, 1));
        assert_eq!(s.average_temperature, Some(50.0));
        assert_eq!(s.total_produced, 125.0);
        assert_eq!(s.utilization_percent(), 20.0);
        assert_eq!(records[2].machine_id, "M3");
    }

    #[test]
    fn test_empty_snapshot() {
        let s = MachineSummary::from_records(&[]);
        assert_eq!(s.total, 0);
        assert_eq!(s.average_temperature, None);
        assert_eq!(s.utilization_percent(), 0.0);
    }
}
