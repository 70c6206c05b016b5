use tokio::sync::oneshot;

use crate::ArcSlice;
use crate::api::hn::Story;

/// Messages that can be sent to the story cache actor.
#[derive(Debug)]
pub enum Message {
    /// Returns the cached story collection, populating it first when the
    /// entry is missing or expired
    Get {
        /// Channel to send the result back to the caller
        tx: oneshot::Sender<anyhow::Result<ArcSlice<Story>>>,
    },
}
