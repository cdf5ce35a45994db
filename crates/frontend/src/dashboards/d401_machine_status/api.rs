use contracts::dashboards::d401_machine_status::MachineRecord;

use crate::shared::api_utils::get_json;

pub async fn fetch_machine_data() -> Result<Vec<MachineRecord>, String> {
    get_json::<Vec<MachineRecord>>("dashboard/machine-data").await
}
