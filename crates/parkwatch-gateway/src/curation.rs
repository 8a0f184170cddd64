// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reference images for low-confidence detections.
//!
//! For each spot the model was unsure about, the service looks up a few
//! stock photos so a reviewer can compare. Lookups never fail the request:
//! any error yields an empty image list.

use std::time::Duration;

use async_trait::async_trait;
use parkwatch_core::{Detection, ParkwatchError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const UNSPLASH_SEARCH_URL: &str = "https://api.unsplash.com/search/photos";

/// Looks up image URLs for a text query.
#[async_trait]
pub trait ImageSearch: Send + Sync {
    async fn search(&self, query: &str, count: u32) -> Result<Vec<String>, ParkwatchError>;
}

/// One curation entry in the `/summarize_parking` response.
#[derive(Debug, Clone, Serialize)]
pub struct CuratedImages {
    pub original_spot: Detection,
    pub searched_query: String,
    pub fetched_images: Vec<String>,
}

/// Query used for a spot: `parking lot <class>`, or `parking lot car` when
/// the class is absent.
pub fn query_for(spot: &Detection) -> String {
    format!("parking lot {}", spot.class.as_deref().unwrap_or("car"))
}

/// Build curation entries for every low-confidence spot. Without a search
/// backend the image lists are empty.
pub async fn curate(
    spots: &[Detection],
    search: Option<&dyn ImageSearch>,
    per_query: u32,
) -> Vec<CuratedImages> {
    let mut curated = Vec::new();
    for spot in spots.iter().filter(|d| d.is_low_confidence()) {
        let query = query_for(spot);
        let fetched_images = match search {
            Some(search) => search.search(&query, per_query).await.unwrap_or_else(|e| {
                warn!(query = %query, error = %e, "image search failed");
                Vec::new()
            }),
            None => Vec::new(),
        };
        curated.push(CuratedImages {
            original_spot: spot.clone(),
            searched_query: query,
            fetched_images,
        });
    }
    curated
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}

/// Unsplash photo search client.
#[derive(Debug, Clone)]
pub struct UnsplashClient {
    client: reqwest::Client,
    access_key: String,
    search_url: String,
}

impl UnsplashClient {
    pub fn new(access_key: impl Into<String>, timeout: Duration) -> Result<Self, ParkwatchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ParkwatchError::Gateway {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            access_key: access_key.into(),
            search_url: UNSPLASH_SEARCH_URL.to_string(),
        })
    }

    /// Overrides the search URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_search_url(mut self, url: String) -> Self {
        self.search_url = url;
        self
    }
}

fn search_failed(e: reqwest::Error) -> ParkwatchError {
    ParkwatchError::Gateway {
        message: format!("image search request failed: {e}"),
        source: Some(Box::new(e)),
    }
}

#[async_trait]
impl ImageSearch for UnsplashClient {
    async fn search(&self, query: &str, count: u32) -> Result<Vec<String>, ParkwatchError> {
        let per_page = count.to_string();
        let url = reqwest::Url::parse_with_params(
            &self.search_url,
            [("query", query), ("per_page", per_page.as_str())],
        )
        .map_err(|e| ParkwatchError::Config(format!("invalid image search URL: {e}")))?;

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .send()
            .await
            .map_err(search_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ParkwatchError::Gateway {
                message: format!("image search returned {status}"),
                source: None,
            });
        }

        let body: SearchResponse = response.json().await.map_err(search_failed)?;
        debug!(query, results = body.results.len(), "image search complete");
        Ok(body.results.into_iter().map(|p| p.urls.regular).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Fixed(Vec<String>);

    #[async_trait]
    impl ImageSearch for Fixed {
        async fn search(&self, _query: &str, count: u32) -> Result<Vec<String>, ParkwatchError> {
            Ok(self.0.iter().take(count as usize).cloned().collect())
        }
    }

    struct Broken;

    #[async_trait]
    impl ImageSearch for Broken {
        async fn search(&self, _query: &str, _count: u32) -> Result<Vec<String>, ParkwatchError> {
            Err(ParkwatchError::Internal("down".into()))
        }
    }

    fn spots() -> Vec<Detection> {
        let mut unclassified = Detection::default();
        unclassified.confidence = Some(0.1);
        vec![
            Detection::classified("empty", Some(0.9)),
            Detection::classified("occupied", Some(0.2)),
            unclassified,
        ]
    }

    #[tokio::test]
    async fn curates_only_low_confidence_spots() {
        let search = Fixed(vec!["a".into(), "b".into(), "c".into(), "d".into()]);
        let curated = curate(&spots(), Some(&search), 3).await;
        assert_eq!(curated.len(), 2);
        assert_eq!(curated[0].searched_query, "parking lot occupied");
        assert_eq!(curated[1].searched_query, "parking lot car");
        assert_eq!(curated[0].fetched_images.len(), 3);
    }

    #[tokio::test]
    async fn search_failure_yields_empty_images() {
        let curated = curate(&spots(), Some(&Broken), 3).await;
        assert!(curated.iter().all(|c| c.fetched_images.is_empty()));
        assert!(curate(&spots(), None, 3).await[0].fetched_images.is_empty());
    }

    #[tokio::test]
    async fn unsplash_client_reads_regular_urls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("query", "parking lot car"))
            .and(query_param("per_page", "2"))
            .and(header("Authorization", "Client-ID key-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total": 2,
                "results": [
                    {"id": "x", "urls": {"regular": "https://img/1", "small": "s"}},
                    {"id": "y", "urls": {"regular": "https://img/2"}}
                ]
            })))
            .mount(&server)
            .await;

        let client = UnsplashClient::new("key-1", Duration::from_secs(2))
            .unwrap()
            .with_search_url(format!("{}/search/photos", server.uri()));
        let urls = client.search("parking lot car", 2).await.unwrap();
        assert_eq!(urls, vec!["https://img/1", "https://img/2"]);
    }

    #[tokio::test]
    async fn unsplash_error_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        let client = UnsplashClient::new("bad", Duration::from_secs(2))
            .unwrap()
            .with_search_url(server.uri());
        assert!(client.search("q", 1).await.is_err());
    }
}
