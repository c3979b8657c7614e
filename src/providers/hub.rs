use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::core::CandidateRecord;
use crate::error::{MatchError, Result};
use crate::providers::CandidateSource;

/// Dataset hub client.
///
/// Resolves a tag to its datasets with `GET {base}/datasets?tag=...`, then
/// loads the first dataset's rows with `GET {base}/datasets/{name}`.
pub struct HubCandidateSource {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct DatasetInfo {
    name: String,
    #[serde(default)]
    #[allow(dead_code)]
    tags: Vec<String>,
}

impl HubCandidateSource {
    /// Create new hub client
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn datasets_url(&self, tag: &str) -> String {
        format!("{}/datasets?tag={}", self.base_url, urlencoding::encode(tag))
    }

    fn dataset_url(&self, name: &str) -> String {
        format!("{}/datasets/{}", self.base_url, urlencoding::encode(name))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.provider_error(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(self.provider_error(format!("HTTP {} for {}", response.status(), url)));
        }

        response
            .json()
            .await
            .map_err(|e| MatchError::parse(url, e))
    }

    fn provider_error(&self, message: String) -> MatchError {
        MatchError::Provider {
            provider: "hub".to_string(),
            message,
        }
    }
}

#[async_trait]
impl CandidateSource for HubCandidateSource {
    async fn fetch(&self, tag: &str) -> Result<Vec<CandidateRecord>> {
        let datasets: Vec<DatasetInfo> = self.get_json(&self.datasets_url(tag)).await?;

        let Some(dataset) = datasets.first() else {
            return Err(MatchError::NoData(tag.to_string()));
        };
        if datasets.len() > 1 {
            tracing::debug!(
                "{} datasets tagged '{}', using '{}'",
                datasets.len(),
                tag,
                dataset.name
            );
        }

        let candidates: Vec<CandidateRecord> = self.get_json(&self.dataset_url(&dataset.name)).await?;
        if candidates.is_empty() {
            return Err(MatchError::NoData(tag.to_string()));
        }

        tracing::debug!("Dataset '{}' returned {} candidates", dataset.name, candidates.len());
        Ok(candidates)
    }

    fn name(&self) -> &str {
        "hub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    type Route = (&'static str, u16, &'static str);

    /// Serve canned JSON responses keyed by request target; unknown targets get 404
    async fn serve(routes: Vec<Route>) -> HubCandidateSource {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let routes = routes.clone();
                tokio::spawn(async move {
                    let mut request: Vec<u8> = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match stream.read(&mut chunk).await {
                            Ok(0) | Err(_) => break,
                            Ok(n) => request.extend_from_slice(&chunk[..n]),
                        }
                    }

                    let request = String::from_utf8_lossy(&request);
                    let target = request.split_whitespace().nth(1).unwrap_or_default();
                    let (status, body) = routes
                        .iter()
                        .find(|(path, _, _)| *path == target)
                        .map(|(_, status, body)| (*status, *body))
                        .unwrap_or((404, "not found"));

                    let response = format!(
                        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        if status == 200 { "OK" } else { "Error" },
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        HubCandidateSource::new(format!("http://{}", addr), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_lists_then_loads_first_dataset() {
        let hub = serve(vec![
            ("/datasets?tag=Blink", 200, r#"[{"name": "blinks", "tags": ["Blink"]}, {"name": "older"}]"#),
            (
                "/datasets/blinks",
                200,
                r#"[{"title": "zk-Lokomotive", "description": "zk compression", "url": "https://dial.to/zk"}]"#,
            ),
        ])
        .await;

        let candidates = hub.fetch("Blink").await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "zk-Lokomotive");
        assert_eq!(candidates[0].url, "https://dial.to/zk");
    }

    #[tokio::test]
    async fn test_fetch_empty_dataset_list_is_no_data() {
        let hub = serve(vec![("/datasets?tag=Blink", 200, "[]")]).await;

        let err = hub.fetch("Blink").await.unwrap_err();
        assert!(matches!(err, MatchError::NoData(tag) if tag == "Blink"));
    }

    #[tokio::test]
    async fn test_fetch_empty_dataset_is_no_data() {
        let hub = serve(vec![
            ("/datasets?tag=Blink", 200, r#"[{"name": "blinks"}]"#),
            ("/datasets/blinks", 200, "[]"),
        ])
        .await;

        let err = hub.fetch("Blink").await.unwrap_err();
        assert!(matches!(err, MatchError::NoData(_)));
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_provider_error() {
        let hub = serve(vec![("/datasets?tag=Blink", 500, "boom")]).await;

        let err = hub.fetch("Blink").await.unwrap_err();
        assert!(matches!(err, MatchError::Provider { ref message, .. } if message.contains("500")));
    }

    #[tokio::test]
    async fn test_fetch_missing_dataset_is_provider_error() {
        let hub = serve(vec![("/datasets?tag=Blink", 200, r#"[{"name": "gone"}]"#)]).await;

        let err = hub.fetch("Blink").await.unwrap_err();
        assert!(matches!(err, MatchError::Provider { .. }));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body_is_parse_error() {
        let hub = serve(vec![("/datasets?tag=Blink", 200, "{not json")]).await;

        let err = hub.fetch("Blink").await.unwrap_err();
        assert!(matches!(err, MatchError::Parse { .. }));
    }

    #[test]
    fn test_urls() {
        let hub = HubCandidateSource::new("http://127.0.0.1:8000/", Duration::from_secs(1)).unwrap();

        assert_eq!(hub.base_url(), "http://127.0.0.1:8000");
        assert_eq!(hub.datasets_url("Blink"), "http://127.0.0.1:8000/datasets?tag=Blink");
        assert_eq!(
            hub.dataset_url("zk blinks/v1"),
            "http://127.0.0.1:8000/datasets/zk%20blinks%2Fv1"
        );
    }

    #[tokio::test]
    async fn test_unreachable_hub_is_provider_error() {
        // Port 9 (discard) is closed on any sane test host
        let hub = HubCandidateSource::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let err = hub.fetch("Blink").await.unwrap_err();
        assert!(matches!(err, MatchError::Provider { .. }));
    }

    #[tokio::test]
    #[ignore] // Requires a dataset hub running
    async fn test_hub_fetch() {
        let hub = HubCandidateSource::new("http://127.0.0.1:8000", Duration::from_secs(5)).unwrap();
        let candidates = hub.fetch("Blink").await.unwrap();
        assert!(!candidates.is_empty());
    }
}
