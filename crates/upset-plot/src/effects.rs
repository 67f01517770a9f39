use std::path::PathBuf;

use crate::export;
use crate::host::{HostSink, Notification, timestamp_ms};
use crate::store::Store;

/// Deferred effects that run after the reducer (host messages, file IO)
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Send a message to the host
    Notify(Notification),
    /// Write the current drawing to disk
    WriteSvg { path: PathBuf },
}

/// Highlight notice for the host. No codes means the highlight was cleared.
pub fn notify_highlight(channel: &str, codes: Vec<String>) -> Effect {
    Effect::Notify(Notification::pattern_highlight(channel, timestamp_ms(), codes))
}

/// Execute a single effect against the store
pub fn run(store: &mut Store, sink: &mut Option<Box<dyn HostSink>>, effect: Effect) {
    match effect {
        Effect::Notify(notification) => match sink {
            Some(sink) => {
                if let Err(e) = sink.send(notification) {
                    log::debug!("host notification dropped: {e}");
                }
            }
            None => log::debug!(
                "no host sink, dropped message for `{}`",
                notification.channel
            ),
        },
        Effect::WriteSvg { path } => {
            match export::write_svg(&store.surface, &path) {
                Ok(()) => log::info!("exported chart to {}", path.display()),
                Err(e) => store.error_message = Some(e.to_string()),
            }
        }
    }
}
