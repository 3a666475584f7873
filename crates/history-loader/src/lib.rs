//! Historical Data Loader
//!
//! Turns uploaded files into reading batches. The file extension picks the
//! parser (JSON array or CSV with the same column headers). Out-of-range rows
//! are dropped; any parse failure means the upload contributes nothing.

mod csv;
mod error;
mod format;
mod loader;

pub use csv::{parse_csv, to_csv};
pub use error::IngestError;
pub use format::HistoryFormat;
pub use loader::{load_history_file, parse_history, HistoryLoader};
