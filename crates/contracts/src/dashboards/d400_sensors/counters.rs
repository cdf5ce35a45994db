//! How many times light, fan and motor were switched on, kept across reloads.

use super::dto::{Actuator, SensorReadings};
use std::collections::HashMap;

pub const LIGHT_KEY: &str = "sensors_light_on_count";
pub const FAN_KEY: &str = "sensors_fan_on_count";
pub const MOTOR_KEY: &str = "sensors_motor_on_count";

/// String key/value storage (browser local storage, a map in tests).
pub trait CounterStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

impl CounterStore for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageCounters {
    pub light_on: u64,
    pub fan_on: u64,
    pub motor_on: u64,
}

impl UsageCounters {
    /// Malformed or missing values read as 0.
    pub fn load(store: &impl CounterStore) -> Self {
        let read = |key: &str| {
            store
                .get(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(0)
        };
        Self {
            light_on: read(LIGHT_KEY),
            fan_on: read(FAN_KEY),
            motor_on: read(MOTOR_KEY),
        }
    }

    pub fn save(&self, store: &mut impl CounterStore) {
        store.set(LIGHT_KEY, &self.light_on.to_string());
        store.set(FAN_KEY, &self.fan_on.to_string());
        store.set(MOTOR_KEY, &self.motor_on.to_string());
    }

    pub fn get(&self, actuator: Actuator) -> Option<u64> {
        match actuator {
            Actuator::Light => Some(self.light_on),
            Actuator::Fan => Some(self.fan_on),
            Actuator::Motor => Some(self.motor_on),
            Actuator::Buzzer => None,
        }
    }

    /// Counts switches that went from a known off to on. Returns whether
    /// anything changed.
    pub fn observe(&mut self, before: &SensorReadings, after: &SensorReadings) -> bool {
        let turned_on = |a: Actuator| before.switch(a) == Some(false) && after.switch(a) == Some(true);
        let mut changed = false;
        if turned_on(Actuator::Light) {
            self.light_on += 1;
            changed = true;
        }
        if turned_on(Actuator::Fan) {
            self.fan_on += 1;
            changed = true;
        }
        if turned_on(Actuator::Motor) {
            self.motor_on += 1;
            changed = true;
        }
        changed
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d400_sensors::dto::ControlDataUpdate;

    #[test]
    fn test_counts_off_to_on_only() {
        let mut counters = UsageCounters::default();
        let mut readings = SensorReadings::default();

        // unknown -> on is not a transition
        let before = readings.clone();
        readings.merge(&ControlDataUpdate::switch(Actuator::Light, true));
        assert!(!counters.observe(&before, &readings));

        for on in [false, true, true, false, true] {
            let before = readings.clone();
            readings.merge(&ControlDataUpdate::switch(Actuator::Light, on));
            counters.observe(&before, &readings);
        }
        assert_eq!(counters.light_on, 2);
        assert_eq!(counters.fan_on, 0);
    }

    #[test]
    fn test_buzzer_is_not_counted() {
        let mut counters = UsageCounters::default();
        let before = SensorReadings {
            buzzer: Some(false),
            ..Default::default()
        };
        let after = SensorReadings {
            buzzer: Some(true),
            ..Default::default()
        };
        assert!(!counters.observe(&before, &after));
        assert_eq!(counters.get(Actuator::Buzzer), None);
    }

    #[test]
    fn test_persistence_and_malformed_values() {
        let mut store: HashMap<String, String> = HashMap::new();
        store.set(LIGHT_KEY, "7");
        store.set(FAN_KEY, "seven");
        store.set(MOTOR_KEY, "-1");

        let mut counters = UsageCounters::load(&store);
        assert_eq!(counters, UsageCounters { light_on: 7, fan_on: 0, motor_on: 0 });

        counters.motor_on = 3;
        counters.save(&mut store);
        assert_eq!(CounterStore::get(&store, MOTOR_KEY).as_deref(), Some("3"));
        assert_eq!(CounterStore::get(&store, FAN_KEY).as_deref(), Some("0"));
        assert_eq!(UsageCounters::load(&store).motor_on, 3);
    }
}
