//! Messages sent back to the embedding host.

use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;
use std::time::{SystemTime, UNIX_EPOCH};

pub const PATTERN_HIGHLIGHT: &str = "pattern_highlight";

/// Wire form of a host message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: Vec<String>,
}

/// A message addressed to a host channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub channel: String,
    pub message: HostMessage,
}

impl Notification {
    /// Highlight notice: a timestamp followed by the highlighted codes. No
    /// codes means the highlight was cleared.
    pub fn pattern_highlight(channel: &str, timestamp: String, codes: Vec<String>) -> Self {
        let mut payload = Vec::with_capacity(codes.len() + 1);
        payload.push(timestamp);
        payload.extend(codes);
        Self {
            channel: channel.to_string(),
            message: HostMessage {
                kind: PATTERN_HIGHLIGHT.to_string(),
                payload,
            },
        }
    }

    pub fn codes(&self) -> &[String] {
        self.message.payload.get(1..).unwrap_or(&[])
    }

    pub fn is_cleared(&self) -> bool {
        self.codes().is_empty()
    }

    pub fn to_json(&self) -> Result<String, SinkError> {
        Ok(serde_json::to_string(&self.message)?)
    }
}

/// Milliseconds since the epoch, as a string.
pub fn timestamp_ms() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
        .to_string()
}

#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    #[error("host channel closed")]
    Disconnected,
    #[error("could not encode host message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Receiver of host notifications. Delivery is best effort.
pub trait HostSink {
    fn send(&mut self, notification: Notification) -> Result<(), SinkError>;
}

impl HostSink for Sender<Notification> {
    fn send(&mut self, notification: Notification) -> Result<(), SinkError> {
        Sender::send(self, notification).map_err(|_| SinkError::Disconnected)
    }
}

/// Writes notifications to the log, for hosts without a real channel.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl HostSink for LogSink {
    fn send(&mut self, notification: Notification) -> Result<(), SinkError> {
        log::info!("[{}] {}", notification.channel, notification.to_json()?);
        Ok(())
    }
}
