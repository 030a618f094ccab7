pub mod discover_hardware;
pub mod ip_address;
pub mod load_inventory;

pub use discover_hardware::{
    DiscoverHardwareOperation, DiscoverHardwareOperationRequest, DiscoverHardwareOperationResult,
};
pub use ip_address::{get_ip_address, set_ip_address};
pub use load_inventory::{
    Disposition, LoadInventoryOperation, LoadInventoryResult, LoadPolicy, LoadStage, StepOutcome,
};
