pub mod aggregate;
pub mod progress;
pub mod status;

pub use aggregate::{ProcessFinishedGood, ProcessRawMaterial, ProcessStep, ProductionProcess};
pub use progress::{BulkDeletePayload, ProcessIdPayload, ProgressForm, ProgressPayload};
pub use status::{MoveBlock, MoveToInventory, ProcessActions, ProcessStatus};
