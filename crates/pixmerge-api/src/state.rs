//! Application state shared by all handlers.

use pixmerge_core::Config;
use pixmerge_storage::LocalStorage;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Stored inputs, one pair per request
    pub uploads: LocalStorage,
    /// Combination results, served under `/output`
    pub outputs: LocalStorage,
}
