pub mod errors;

pub use errors::{ActionError, ApplyError, PaletteError, StateError, SyncError, TaskError};
