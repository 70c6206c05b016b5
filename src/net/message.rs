use tokio::sync::oneshot::Sender;

use crate::ArcStr;

/// Messages that can be sent to the networking actor.
///
/// This enum defines the different types of network operations that can be performed
/// through the networking actor system.
#[derive(Debug)]
pub enum Message {
    /// Performs an HTTP GET request to the specified URL
    Get {
        /// The URL to request
        url: ArcStr,
        /// Channel to send the response body back to the caller
        tx: Sender<anyhow::Result<ArcStr>>,
    },
}
