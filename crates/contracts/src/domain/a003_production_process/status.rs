//! Production stage parsed from the backend status string and the row
//! actions it allows.

use super::aggregate::ProductionProcess;
use crate::domain::common::BadgeVariant;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProcessStatus {
    RawMaterialApprovalPending,
    InventoryAllocated,
    RequestForAllowToProduction,
    AllowedToProduce,
    ProductionStarted,
    ProductionInProgress,
    ProductionPaused,
    Completed,
    MovedToInventory,
    OutFinishedGoods,
    /// Anything the console does not know, kept verbatim
    Unknown(String),
}

impl ProcessStatus {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "raw material approval pending" => ProcessStatus::RawMaterialApprovalPending,
            "inventory allocated" => ProcessStatus::InventoryAllocated,
            "request for allow to production" => ProcessStatus::RequestForAllowToProduction,
            "allowed to produce" => ProcessStatus::AllowedToProduce,
            "production started" => ProcessStatus::ProductionStarted,
            "production in progress" => ProcessStatus::ProductionInProgress,
            "production paused" => ProcessStatus::ProductionPaused,
            "completed" => ProcessStatus::Completed,
            "moved to inventory" => ProcessStatus::MovedToInventory,
            "out finished goods" => ProcessStatus::OutFinishedGoods,
            _ => ProcessStatus::Unknown(raw.trim().to_string()),
        }
    }

    /// Backend spelling
    pub fn as_str(&self) -> &str {
        match self {
            ProcessStatus::RawMaterialApprovalPending => "raw material approval pending",
            ProcessStatus::InventoryAllocated => "inventory allocated",
            ProcessStatus::RequestForAllowToProduction => "request for allow to production",
            ProcessStatus::AllowedToProduce => "allowed to produce",
            ProcessStatus::ProductionStarted => "production started",
            ProcessStatus::ProductionInProgress => "production in progress",
            ProcessStatus::ProductionPaused => "production paused",
            ProcessStatus::Completed => "completed",
            ProcessStatus::MovedToInventory => "moved to inventory",
            ProcessStatus::OutFinishedGoods => "out finished goods",
            ProcessStatus::Unknown(raw) => raw,
        }
    }

    pub fn label(&self) -> String {
        let raw = self.as_str();
        if raw.is_empty() {
            return "Unknown".to_string();
        }
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn badge(&self) -> BadgeVariant {
        match self {
            ProcessStatus::RawMaterialApprovalPending | ProcessStatus::RequestForAllowToProduction => {
                BadgeVariant::Neutral
            }
            ProcessStatus::InventoryAllocated | ProcessStatus::AllowedToProduce => BadgeVariant::Info,
            ProcessStatus::ProductionStarted | ProcessStatus::ProductionInProgress => {
                BadgeVariant::Warning
            }
            ProcessStatus::ProductionPaused => BadgeVariant::Danger,
            ProcessStatus::Completed
            | ProcessStatus::MovedToInventory
            | ProcessStatus::OutFinishedGoods => BadgeVariant::Success,
            ProcessStatus::Unknown(_) => BadgeVariant::Neutral,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(
            self,
            ProcessStatus::ProductionStarted | ProcessStatus::ProductionInProgress
        )
    }

    /// Still before the shop floor touched it.
    pub fn is_before_production(&self) -> bool {
        matches!(
            self,
            ProcessStatus::RawMaterialApprovalPending
                | ProcessStatus::InventoryAllocated
                | ProcessStatus::RequestForAllowToProduction
                | ProcessStatus::AllowedToProduce
        )
    }
}

/// Why "Move to Inventory" is greyed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveBlock {
    /// `final_produce_quantity` is absent or zero
    NothingProduced,
    /// remaining quantity still equals the estimate
    NoProgress,
}

impl MoveBlock {
    pub fn reason(self) -> &'static str {
        match self {
            MoveBlock::NothingProduced => "Nothing has been produced yet",
            MoveBlock::NoProgress => "Update production progress first",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveToInventory {
    Hidden,
    Enabled,
    Disabled(MoveBlock),
}

impl MoveToInventory {
    pub fn is_visible(self) -> bool {
        self != MoveToInventory::Hidden
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessActions {
    pub request_allocation: bool,
    pub start: bool,
    /// `start` resumes a paused run
    pub resume: bool,
    pub pause: bool,
    pub update_progress: bool,
    pub move_to_inventory: MoveToInventory,
    pub out_finish_goods: bool,
    pub deletable: bool,
}

impl ProcessActions {
    pub fn of(process: &ProductionProcess) -> Self {
        let status = process.status();
        let paused = status == ProcessStatus::ProductionPaused;

        let move_to_inventory = if matches!(
            status,
            ProcessStatus::ProductionInProgress | ProcessStatus::Completed
        ) {
            match move_block(process) {
                Some(block) => MoveToInventory::Disabled(block),
                None => MoveToInventory::Enabled,
            }
        } else {
            MoveToInventory::Hidden
        };

        Self {
            request_allocation: status == ProcessStatus::InventoryAllocated,
            start: status == ProcessStatus::AllowedToProduce || paused,
            resume: paused,
            pause: status.is_running(),
            update_progress: status.is_running(),
            move_to_inventory,
            out_finish_goods: status == ProcessStatus::MovedToInventory,
            deletable: status.is_before_production(),
        }
    }

    pub fn start_label(&self) -> &'static str {
        if self.resume {
            "Resume"
        } else {
            "Start"
        }
    }
}

/// Zero final quantity is checked before unchanged remaining quantity.
fn move_block(process: &ProductionProcess) -> Option<MoveBlock> {
    match process.final_produce_quantity {
        None => return Some(MoveBlock::NothingProduced),
        Some(q) if q == 0.0 => return Some(MoveBlock::NothingProduced),
        _ => {}
    }
    match (process.remaining_quantity(), process.estimated_quantity()) {
        (Some(remaining), Some(estimated)) if remaining == estimated => Some(MoveBlock::NoProgress),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_production_process::aggregate::ProcessFinishedGood;

    fn process(status: &str, final_qty: Option<f64>, estimated: f64, remaining: f64) -> ProductionProcess {
        ProductionProcess {
            id: "pp".into(),
            status: Some(status.into()),
            final_produce_quantity: final_qty,
            finished_good: Some(ProcessFinishedGood {
                estimated_quantity: Some(estimated),
                remaining_quantity: Some(remaining),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_is_case_insensitive_and_keeps_unknown() {
        assert_eq!(ProcessStatus::parse("Production Paused"), ProcessStatus::ProductionPaused);
        assert_eq!(ProcessStatus::parse("  completed "), ProcessStatus::Completed);
        let unknown = ProcessStatus::parse("Quality Hold");
        assert_eq!(unknown, ProcessStatus::Unknown("Quality Hold".into()));
        assert_eq!(unknown.label(), "Quality Hold");
        assert_eq!(ProcessStatus::parse("").label(), "Unknown");
        assert_eq!(ProcessStatus::InventoryAllocated.label(), "Inventory allocated");
    }

    #[test]
    fn test_allocation_and_start() {
        let a = ProcessActions::of(&process("inventory allocated", None, 10.0, 10.0));
        assert!(a.request_allocation);
        assert!(!a.start);
        assert!(a.deletable);

        let a = ProcessActions::of(&process("allowed to produce", None, 10.0, 10.0));
        assert!(a.start);
        assert_eq!(a.start_label(), "Start");

        let a = ProcessActions::of(&process("production paused", Some(3.0), 10.0, 7.0));
        assert!(a.start);
        assert_eq!(a.start_label(), "Resume");
        assert!(!a.pause);
        assert!(!a.deletable);
    }

    #[test]
    fn test_running_process() {
        let a = ProcessActions::of(&process("production started", None, 10.0, 10.0));
        assert!(a.pause);
        assert!(a.update_progress);
        assert_eq!(a.move_to_inventory, MoveToInventory::Hidden);
        assert!(!a.deletable);
    }

    #[test]
    fn test_move_to_inventory_precedence() {
        // both conditions hold: nothing produced wins
        let a = ProcessActions::of(&process("production in progress", Some(0.0), 10.0, 10.0));
        assert_eq!(a.move_to_inventory, MoveToInventory::Disabled(MoveBlock::NothingProduced));

        let a = ProcessActions::of(&process("production in progress", None, 10.0, 4.0));
        assert_eq!(a.move_to_inventory, MoveToInventory::Disabled(MoveBlock::NothingProduced));

        let a = ProcessActions::of(&process("completed", Some(5.0), 10.0, 10.0));
        assert_eq!(a.move_to_inventory, MoveToInventory::Disabled(MoveBlock::NoProgress));

        let a = ProcessActions::of(&process("completed", Some(10.0), 10.0, 0.0));
        assert_eq!(a.move_to_inventory, MoveToInventory::Enabled);
        assert!(a.move_to_inventory.is_visible());
    }

    #[test]
    fn test_out_finish_goods() {
        let a = ProcessActions::of(&process("moved to inventory", Some(10.0), 10.0, 0.0));
        assert!(a.out_finish_goods);
        assert_eq!(a.move_to_inventory, MoveToInventory::Hidden);
        assert!(!ProcessActions::of(&process("out finished goods", Some(10.0), 10.0, 0.0)).out_finish_goods);
    }
}
