//! Google Places web API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use super::{DetailResponse, PlacesClient, SearchResponse};
use crate::config::PlacesConfig;
use crate::error::NetworkError;
use crate::models::GeoPoint;

const USER_AGENT: &str = "nearby/0.1 (places discovery)";

/// Only establishments are shown as annotations
const PLACE_TYPES: &str = "establishment";

/// Fetches nearby places and place details over HTTPS
pub struct GooglePlacesClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GooglePlacesClient {
    pub fn new(config: &PlacesConfig) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn search_url(&self, center: GeoPoint, radius_m: u32) -> Result<Url, NetworkError> {
        let url = Url::parse_with_params(
            &format!("{}/nearbysearch/json", self.base_url),
            &[
                ("location", center.to_string()),
                ("radius", radius_m.to_string()),
                ("sensor", "true".to_string()),
                ("types", PLACE_TYPES.to_string()),
                ("key", self.api_key.clone()),
            ],
        )?;
        Ok(url)
    }

    fn detail_url(&self, reference: &str) -> Result<Url, NetworkError> {
        let url = Url::parse_with_params(
            &format!("{}/details/json", self.base_url),
            &[
                ("reference", reference),
                ("sensor", "true"),
                ("key", self.api_key.as_str()),
            ],
        )?;
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<serde_json::Value, NetworkError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(NetworkError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| NetworkError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PlacesClient for GooglePlacesClient {
    async fn search(
        &self,
        center: GeoPoint,
        radius_m: u32,
    ) -> Result<SearchResponse, NetworkError> {
        info!("Searching places within {} m of {}", radius_m, center);

        let body = self.get_json(self.search_url(center, radius_m)?).await?;
        let response = SearchResponse::from_json(body)?;

        debug!("Search returned {} records", response.len());
        Ok(response)
    }

    async fn fetch_detail(&self, reference: &str) -> Result<DetailResponse, NetworkError> {
        debug!("Fetching detail for {}", reference);

        let body = self.get_json(self.detail_url(reference)?).await?;
        DetailResponse::from_json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GooglePlacesClient {
        let config = PlacesConfig {
            api_key: "k3y".to_string(),
            base_url: "https://maps.example.com/api/place/".to_string(),
            ..PlacesConfig::default()
        };
        GooglePlacesClient::new(&config).unwrap()
    }

    /// Serve one canned HTTP response on a local port, returning the base url.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}/api/place", addr)
    }

    fn local_client(base_url: String) -> GooglePlacesClient {
        GooglePlacesClient {
            client: Client::builder().no_proxy().build().unwrap(),
            base_url,
            api_key: "k3y".to_string(),
        }
    }

    #[tokio::test]
    async fn test_http_error_status_mapped() {
        let base = serve_once("503 Service Unavailable", "").await;

        let err = local_client(base)
            .search(GeoPoint::new(37.0, -122.0), 1000)
            .await
            .unwrap_err();
        assert!(matches!(err, NetworkError::Status(503)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let base = serve_once("200 OK", "<html>oops</html>").await;

        let err = local_client(base).fetch_detail("r1").await.unwrap_err();
        assert!(matches!(err, NetworkError::Decode(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_search_over_http() {
        let base = serve_once(
            "200 OK",
            r#"{"status":"OK","results":[{"reference":"r1"},{"reference":"r2"}]}"#,
        )
        .await;

        let response = local_client(base)
            .search(GeoPoint::new(37.0, -122.0), 1000)
            .await
            .unwrap();
        assert_eq!(response.len(), 2);
        assert_eq!(response.results[1]["reference"], "r2");
    }

    #[test]
    fn test_search_url() {
        let url = client()
            .search_url(GeoPoint::new(37.0, -122.5), 1000)
            .unwrap();

        assert_eq!(url.path(), "/api/place/nearbysearch/json");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("location".into(), "37,-122.5".into())));
        assert!(pairs.contains(&("radius".into(), "1000".into())));
        assert!(pairs.contains(&("types".into(), "establishment".into())));
        assert!(pairs.contains(&("key".into(), "k3y".into())));
    }

    #[test]
    fn test_detail_url_escapes_reference() {
        let url = client().detail_url("a b&c").unwrap();

        assert_eq!(url.path(), "/api/place/details/json");
        let reference = url
            .query_pairs()
            .find(|(k, _)| k == "reference")
            .map(|(_, v)| v.into_owned());
        assert_eq!(reference.as_deref(), Some("a b&c"));
    }
}
