//! Synthetic sensor feed standing in for the shop-floor device.

use contracts::dashboards::d400_sensors::ControlDataUpdate;
use rand::Rng;
use std::time::Duration;

use crate::handlers::d400_sensors::record;
use crate::shared::state::AppState;
use crate::shared::store::now_rfc3339;

/// One reading in the ranges the shop-floor sensors report.
pub fn synthetic_reading(rng: &mut impl Rng, timestamp: String) -> ControlDataUpdate {
    let round1 = |v: f64| (v * 10.0).round() / 10.0;
    ControlDataUpdate {
        temperature: Some(round1(rng.gen_range(24.0..34.0))),
        humidity: Some(round1(rng.gen_range(40.0..70.0))),
        gas_level: Some(rng.gen_range(200.0_f64..600.0).round()),
        timestamp: Some(timestamp),
        ..Default::default()
    }
}

/// Records and broadcasts a reading every `interval_ms` until the runtime stops.
pub fn spawn_telemetry(state: AppState, interval_ms: u64) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms.max(250)));
        tracing::info!(interval_ms, "synthetic telemetry started");
        loop {
            ticker.tick().await;
            let reading = synthetic_reading(&mut rand::thread_rng(), now_rfc3339());
            record(&state, reading).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readings_stay_in_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let r = synthetic_reading(&mut rng, "t".to_string());
            let t = r.temperature.unwrap();
            let h = r.humidity.unwrap();
            let g = r.gas_level.unwrap();
            assert!((24.0..=34.0).contains(&t), "{}", t);
            assert!((40.0..=70.0).contains(&h), "{}", h);
            assert!((200.0..=600.0).contains(&g), "{}", g);
            assert!(r.light.is_none() && r.fan.is_none());
        }
    }
}
