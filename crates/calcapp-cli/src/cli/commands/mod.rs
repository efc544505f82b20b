pub mod dispatch;
pub mod eval;
pub mod examples;
pub mod history;
pub mod repl;

use std::sync::Arc;

use calcapp_core::{FileStorage, HistoryStore, HttpTransport, SubmissionController};
use tracing::debug;

use crate::config::ClientConfig;
use crate::notifier::TerminalNotifier;

/// Controller wired to the configured server and history directory,
/// already hydrated.
pub(crate) fn open_session(config: &ClientConfig) -> anyhow::Result<SubmissionController> {
    let transport = HttpTransport::new(&config.server_url, config.timeout())?;
    debug!(
        endpoint = transport.endpoint(),
        history_dir = %config.history_dir.display(),
        "client session"
    );

    let history = HistoryStore::new(Arc::new(FileStorage::new(&config.history_dir)));
    let controller =
        SubmissionController::new(Arc::new(transport), Arc::new(TerminalNotifier), history);
    controller.hydrate();
    Ok(controller)
}
