use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::state::SharedState;

/// Periodically drop form instances nobody has touched within the TTL.
/// Stops when `shutdown` flips to true.
pub fn spawn_sweeper(state: SharedState, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let interval = state.config.sweep_interval;
        let ttl = state.config.form_ttl;
        tracing::debug!("Form sweeper started (ttl {}s)", ttl.as_secs());

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                changed = shutdown.changed() => {
                    // Sender gone: nobody can signal shutdown any more.
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }
            }

            let removed = state.forms.cleanup(ttl);
            if removed > 0 {
                tracing::info!("Evicted {removed} idle form(s)");
            }
        }

        tracing::debug!("Form sweeper stopped");
    })
}
