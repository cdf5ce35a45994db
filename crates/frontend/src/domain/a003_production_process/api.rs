use contracts::domain::a003_production_process::{
    BulkDeletePayload, ProcessIdPayload, ProductionProcess, ProgressPayload,
};
use gloo_net::http::Method;

use crate::shared::api_utils::{get_json, send_json};

/// Row actions that post `{_id}` and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessCommand {
    RequestAllocation,
    Start,
    Pause,
    MoveToInventory,
    OutFinishGoods,
}

impl ProcessCommand {
    pub fn method(self) -> Method {
        match self {
            ProcessCommand::RequestAllocation => Method::POST,
            _ => Method::PUT,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            ProcessCommand::RequestAllocation => "production-process/allocation",
            ProcessCommand::Start => "production-process/start-production",
            ProcessCommand::Pause => "production-process/pause",
            ProcessCommand::MoveToInventory => "production-process/move-to-inventory",
            ProcessCommand::OutFinishGoods => "production-process/out-finish-goods",
        }
    }
}

pub async fn fetch_processes() -> Result<Vec<ProductionProcess>, String> {
    get_json::<Vec<ProductionProcess>>("production-process/all").await
}

pub async fn fetch_process(id: &str) -> Result<ProductionProcess, String> {
    get_json::<ProductionProcess>(&format!("production-process/{}", id)).await
}

pub async fn run_command(command: ProcessCommand, id: &str) -> Result<String, String> {
    send_json(command.method(), command.path(), &ProcessIdPayload::new(id)).await
}

pub async fn update_progress(payload: &ProgressPayload) -> Result<String, String> {
    send_json(Method::PUT, "production-process/update-status", payload).await
}

pub async fn bulk_delete(ids: Vec<String>) -> Result<String, String> {
    send_json(Method::POST, "production-process/bulk-delete", &BulkDeletePayload { ids }).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_routes() {
        assert_eq!(ProcessCommand::RequestAllocation.method(), Method::POST);
        assert_eq!(ProcessCommand::Pause.method(), Method::PUT);
        assert_eq!(ProcessCommand::Start.path(), "production-process/start-production");
        assert_eq!(
            ProcessCommand::OutFinishGoods.path(),
            "production-process/out-finish-goods"
        );
    }
}
