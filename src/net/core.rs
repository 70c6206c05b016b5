use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use tokio::task::JoinHandle;

use crate::{
    ArcStr,
    app::config::{Config, USizeOpt},
    log::Log,
    net::{Net, message::Message},
};

/// The core of the networking system that handles HTTP requests.
///
/// This struct provides thread-safe access to network operations through an actor pattern.
/// It wraps the reqwest HTTP client and provides a safe interface for making HTTP requests.
///
/// # Features
/// - Thread-safe network operations through actor pattern
/// - HTTP client with automatic connection pooling
/// - Request timeout taken from the configuration
/// - Failed requests reported through the logging system
///
/// # Examples
/// ```ignore
/// let core = Core::new(config, log).await?;
/// let (net, _) = core.spawn();
/// ```
///
/// # Thread Safety
/// This type is designed to be safely shared between threads through the actor pattern.
/// Each request runs on its own task, so slow responses do not block the mailbox.
#[derive(Debug)]
pub struct Core {
    /// Logging interface for operation logging
    log: Log,
    /// HTTP client for making requests
    client: Client,
}

impl Core {
    /// Creates a new networking instance.
    ///
    /// # Arguments
    /// * `config` - The configuration actor, used for the request timeout
    /// * `log` - The logging actor for operation logging
    ///
    /// # Returns
    /// A new instance of `Core` with a fresh HTTP client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub async fn new(config: Config, log: Log) -> anyhow::Result<Self> {
        let timeout = config.usize(USizeOpt::Timeout).await;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout as u64))
            .build()
            .context("Building the HTTP client")?;

        Ok(Self { log, client })
    }

    /// Transforms the networking core instance into an actor.
    ///
    /// This method spawns a new task that will handle network operations
    /// asynchronously through a message channel. Each request is dispatched
    /// on its own task so concurrent requests run in parallel.
    ///
    /// # Returns
    /// A tuple containing:
    /// - The `Net` interface
    /// - A join handle for the spawned task
    pub fn spawn(self) -> (Net, JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(100);

        let handle = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                match message {
                    Message::Get { url, tx } => {
                        let client = self.client.clone();
                        let log = self.log.clone();
                        tokio::spawn(async move {
                            let response = Self::handle_get_request(client, url.clone())
                                .await
                                .with_context(|| format!("GET request failed for URL: {}", url));
                            let _ = tx.send(log.warn_on_error(response));
                        });
                    }
                }
            }
        });

        (Net::Actual(tx), handle)
    }

    /// Handles a GET request and returns the response body.
    ///
    /// Non-success status codes are treated as request failures.
    async fn handle_get_request(client: Client, url: ArcStr) -> anyhow::Result<ArcStr> {
        let response = client
            .get::<&str>(url.as_ref())
            .send()
            .await
            .context("Sending GET request")?;
        let response = response
            .error_for_status()
            .context("Server answered with an error status")?;
        let text = response.text().await.context("Reading response body")?;
        Ok(ArcStr::from(text.as_str()))
    }
}
