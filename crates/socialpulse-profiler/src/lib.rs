pub mod error;
pub mod pipeline;
pub mod setup;
pub mod store;

pub use error::{PipelineError, StoreError};
pub use pipeline::{assemble_snapshot, normalize_handle, PipelineSettings, ProfilePipeline};
pub use setup::{chromium_scraper, load_lexicon};
pub use store::{MemorySnapshotStore, SnapshotStore, StoredSnapshot};
