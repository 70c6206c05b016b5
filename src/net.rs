use anyhow::Context;
use std::collections::HashMap;
use tokio::sync::mpsc::Sender;

use crate::{
    ArcStr,
    app::config::Config,
    net::{core::Core, message::Message},
};

mod core;
pub mod message;
mod mock;

/// The networking actor that provides a thread-safe interface for network operations.
///
/// This enum represents either a real networking actor or a mock implementation
/// for testing purposes. It provides a unified interface for network operations
/// regardless of the underlying implementation.
///
/// Requests are dispatched on their own tasks, so concurrent callers do not
/// serialize behind one slow response.
///
/// # Examples
/// ```ignore
/// let net = Net::spawn(config, log).await?;
/// let response = net.get(url).await?;
/// ```
///
/// # Thread Safety
/// This type is designed to be safely shared between threads. Cloning is cheap as it only
/// copies the channel sender or mock reference.
#[derive(Debug, Clone)]
pub enum Net {
    /// A real networking actor that performs HTTP requests
    Actual(Sender<Message>),
    /// A mock implementation for testing
    Mock(mock::Mock),
}

#[allow(dead_code)]
impl Net {
    /// Creates a new networking instance and spawns its actor.
    ///
    /// # Arguments
    /// * `config` - The configuration actor for settings
    /// * `log` - The logging actor for operation logging
    ///
    /// # Returns
    /// A new networking instance with a spawned actor.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub async fn spawn(config: Config, log: crate::log::Log) -> anyhow::Result<Self> {
        let (net, _) = Core::new(config, log).await?.spawn();
        Ok(net)
    }

    /// Creates a new mock networking instance for testing.
    ///
    /// # Arguments
    /// * `responses` - Initial response cache mapping URLs to response bodies
    ///
    /// # Returns
    /// A new mock networking instance that returns predefined responses.
    pub fn mock(responses: HashMap<ArcStr, ArcStr>) -> Self {
        Self::Mock(mock::Mock::new(responses))
    }

    /// Creates a new empty mock networking instance for testing.
    ///
    /// # Returns
    /// A new mock networking instance with an empty response cache.
    pub fn mock_empty() -> Self {
        Self::Mock(mock::Mock::empty())
    }

    /// Performs an HTTP GET request to the specified URL.
    ///
    /// # Arguments
    /// * `url` - The URL to send the GET request to
    ///
    /// # Returns
    /// The response body as a string, or an error if the request fails or the
    /// server answers with a non-success status.
    pub async fn get(&self, url: ArcStr) -> Result<ArcStr, anyhow::Error> {
        match self {
            Net::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Get { url, tx })
                    .await
                    .context("Sending message to Net actor")
                    .expect("Net actor died");
                rx.await
                    .context("Awaiting response from Net actor")
                    .expect("Net actor died")
            }
            Net::Mock(mock) => mock.get(url).await,
        }
    }

    /// Returns the URLs requested so far, in order.
    ///
    /// Only the mock records requests; the actual actor returns an empty list.
    pub async fn requests(&self) -> Vec<ArcStr> {
        match self {
            Net::Actual(_) => Vec::new(),
            Net::Mock(mock) => mock.requests().await,
        }
    }
}
