use crate::domain::common::serde_helpers::{opt_number, opt_switch};
use serde::{Deserialize, Serialize};

/// Switchable outputs on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actuator {
    Light,
    Fan,
    Motor,
    Buzzer,
}

impl Actuator {
    pub const ALL: [Actuator; 4] = [Actuator::Light, Actuator::Fan, Actuator::Motor, Actuator::Buzzer];

    pub fn label(self) -> &'static str {
        match self {
            Actuator::Light => "Light",
            Actuator::Fan => "Fan",
            Actuator::Motor => "Motor",
            Actuator::Buzzer => "Buzzer",
        }
    }
}

/// Last known state of the device as shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorReadings {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub gas_level: Option<f64>,
    pub light: Option<bool>,
    pub fan: Option<bool>,
    pub motor: Option<bool>,
    pub buzzer: Option<bool>,
    pub updated_at: Option<String>,
}

impl SensorReadings {
    /// Overwrites only the fields present in `update`.
    pub fn merge(&mut self, update: &ControlDataUpdate) {
        fn take<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if let Some(v) = value {
                *slot = Some(v.clone());
            }
        }
        take(&mut self.temperature, &update.temperature);
        take(&mut self.humidity, &update.humidity);
        take(&mut self.gas_level, &update.gas_level);
        take(&mut self.light, &update.light);
        take(&mut self.fan, &update.fan);
        take(&mut self.motor, &update.motor);
        take(&mut self.buzzer, &update.buzzer);
        take(&mut self.updated_at, &update.timestamp);
    }

    pub fn switch(&self, actuator: Actuator) -> Option<bool> {
        match actuator {
            Actuator::Light => self.light,
            Actuator::Fan => self.fan,
            Actuator::Motor => self.motor,
            Actuator::Buzzer => self.buzzer,
        }
    }
}

/// Payload of `controlDataUpdate` and body of `devicedata/dashboardtodb`.
/// Any subset of fields may be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlDataUpdate {
    #[serde(default, deserialize_with = "opt_number", skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "opt_number", skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(
        default,
        alias = "gas",
        alias = "gasLevel",
        deserialize_with = "opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub gas_level: Option<f64>,
    #[serde(default, deserialize_with = "opt_switch", skip_serializing_if = "Option::is_none")]
    pub light: Option<bool>,
    #[serde(default, deserialize_with = "opt_switch", skip_serializing_if = "Option::is_none")]
    pub fan: Option<bool>,
    #[serde(default, deserialize_with = "opt_switch", skip_serializing_if = "Option::is_none")]
    pub motor: Option<bool>,
    #[serde(default, deserialize_with = "opt_switch", skip_serializing_if = "Option::is_none")]
    pub buzzer: Option<bool>,
    #[serde(default, alias = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ControlDataUpdate {
    /// Single actuator write, as posted by a dashboard toggle.
    pub fn switch(actuator: Actuator, on: bool) -> Self {
        let mut update = Self::default();
        match actuator {
            Actuator::Light => update.light = Some(on),
            Actuator::Fan => update.fan = Some(on),
            Actuator::Motor => update.motor = Some(on),
            Actuator::Buzzer => update.buzzer = Some(on),
        }
        update
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Row of `devicedata/get-device-data`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceDataRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(flatten)]
    pub data: ControlDataUpdate,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_overwrites_only_present_fields() {
        let mut readings = SensorReadings {
            temperature: Some(30.0),
            humidity: Some(55.0),
            light: Some(false),
            ..Default::default()
        };
        let update: ControlDataUpdate =
            serde_json::from_value(json!({"temperature": "31.2", "light": "ON"})).unwrap();
        readings.merge(&update);

        assert_eq!(readings.temperature, Some(31.2));
        assert_eq!(readings.humidity, Some(55.0));
        assert_eq!(readings.light, Some(true));
        assert_eq!(readings.fan, None);
    }

    #[test]
    fn test_last_update_wins() {
        let mut readings = SensorReadings::default();
        readings.merge(&ControlDataUpdate::switch(Actuator::Fan, true));
        readings.merge(&ControlDataUpdate::switch(Actuator::Fan, false));
        assert_eq!(readings.switch(Actuator::Fan), Some(false));
    }

    #[test]
    fn test_aliases_and_serialization() {
        let update: ControlDataUpdate =
            serde_json::from_value(json!({"gas": 412, "motor": 1, "updatedAt": "2024-03-05T10:00:00Z"})).unwrap();
        assert_eq!(update.gas_level, Some(412.0));
        assert_eq!(update.motor, Some(true));
        assert_eq!(update.timestamp.as_deref(), Some("2024-03-05T10:00:00Z"));

        let body = serde_json::to_value(ControlDataUpdate::switch(Actuator::Buzzer, true)).unwrap();
        assert_eq!(body, json!({"buzzer": true}));
        assert!(ControlDataUpdate::default().is_empty());
    }

    #[test]
    fn test_history_record() {
        let row: DeviceDataRecord = serde_json::from_value(json!({
            "_id": "d1",
            "temperature": 28.5,
            "fan": "OFF",
            "createdAt": "2024-03-05T09:59:00Z"
        }))
        .unwrap();
        assert_eq!(row.id, "d1");
        assert_eq!(row.data.temperature, Some(28.5));
        assert_eq!(row.data.fan, Some(false));
        assert_eq!(row.created_at.as_deref(), Some("2024-03-05T09:59:00Z"));
    }
}
