use contracts::dashboards::d400_sensors::{ControlDataUpdate, DeviceDataRecord};
use gloo_net::http::Method;

use crate::shared::api_utils::{get_json, send_json};

/// Stored telemetry rows
pub async fn fetch_device_history() -> Result<Vec<DeviceDataRecord>, String> {
    get_json::<Vec<DeviceDataRecord>>("devicedata/get-device-data").await
}

/// Actuator write; the device picks it up and echoes it over the socket.
pub async fn write_control(update: &ControlDataUpdate) -> Result<String, String> {
    send_json(Method::POST, "devicedata/dashboardtodb", update).await
}
