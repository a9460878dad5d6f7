use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Events that flow from the collector and analysis runs to SSE subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum Event {
    /// A batch of samples was stored, either pushed over the API or
    /// collected locally.
    SamplesRecorded { host_id: String, filesystems: usize, clock: i64 },

    /// An analysis finished.
    AnalysisComplete { analysis_id: Uuid, filesystems: usize, critical: usize, warning: usize },

    /// Local collection failed.
    CollectorError { message: String },
}

impl Event {
    /// Returns the SSE event type name for this event variant.
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::SamplesRecorded { .. } => "samples_recorded",
            Self::AnalysisComplete { .. } => "analysis_complete",
            Self::CollectorError { .. } => "collector_error",
        }
    }
}

/// The central event broadcast hub.
///
/// Producers call `publish()`; the SSE handler subscribes per connection.
#[derive(Debug, Clone)]
pub struct EventHub {
    sender: broadcast::Sender<Event>,
}

impl EventHub {
    /// Subscribers lagging by more than `capacity` events miss the overflow.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Fire-and-forget: errors only when nobody is listening.
    pub fn publish(&self, event: Event) -> Result<usize, broadcast::error::SendError<Event>> {
        self.sender.send(event)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }
}
