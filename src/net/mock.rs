use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::ArcStr;

/// Mock implementation of the Net actor for testing purposes.
///
/// This struct contains predefined HTTP responses keyed by URL, allowing tests
/// to run without making actual network requests. Every request is recorded so
/// tests can assert on which URLs were fetched and how often.
#[derive(Debug, Clone)]
pub struct Mock {
    /// Predefined responses keyed by URL
    responses: Arc<Mutex<HashMap<ArcStr, ArcStr>>>,
    /// URLs requested so far, in order
    requests: Arc<Mutex<Vec<ArcStr>>>,
}

impl Mock {
    /// Creates a new mock instance with the provided responses.
    ///
    /// # Arguments
    /// * `responses` - Initial response cache mapping URLs to response bodies
    pub fn new(responses: HashMap<ArcStr, ArcStr>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a new mock instance with an empty response cache.
    pub fn empty() -> Self {
        Self::new(HashMap::new())
    }

    /// Performs an HTTP GET request using mock responses.
    ///
    /// # Arguments
    /// * `url` - The URL to send the GET request to
    ///
    /// # Returns
    /// The response body as a string, or an error if not found in mock responses.
    pub async fn get(&self, url: ArcStr) -> Result<ArcStr, anyhow::Error> {
        self.requests.lock().await.push(url.clone());

        let responses = self.responses.lock().await;
        responses
            .get(&url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("GET request not found in mock responses: {}", url))
    }

    /// Returns the URLs requested so far, in order.
    pub async fn requests(&self) -> Vec<ArcStr> {
        let requests = self.requests.lock().await;
        requests.clone()
    }
}
