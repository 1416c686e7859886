pub mod cleaner;
pub mod cleaner_orchestrator;
pub mod cleaners;
pub mod error;
pub mod host;
pub mod storage;
pub mod wipe;

pub use cleaner::{ClearReport, StorageCleaner};
pub use cleaner_orchestrator::{AppDataCleaner, CleanSummary};
pub use error::{DeleteError, DeleteResult, HostError};
pub use host::{AppHost, Location};
pub use wipe::{ManualWipe, SystemClearWipe, WipeOutcome, WipeStrategy};
