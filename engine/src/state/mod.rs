//! # Application State
//!
//! The single persisted document shared across runs: the last applied theme,
//! the last wallpaper handed to the daemon, and the turbo preference.
//!
//! [`StateStore`] owns the file. Callers read a copy with
//! [`StateStore::load`], change their copy, and hand it back to
//! [`StateStore::save`]. The whole document is replaced on every write, so
//! the last writer wins.

mod store;

pub use store::{AppState, StateStore};
