use log::debug;
use reqwest::{Response, StatusCode};

use crate::client_api::{ClientError, Hostel, HostelApi};

/// [`HostelApi`] over HTTP.
pub struct HttpHostelClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpHostelClient {
    /// `server` is either `host:port` or a full `http(s)://` base url.
    pub fn new(server: &str) -> Self {
        let trimmed = server.trim_end_matches('/');
        let base_url = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("http://{}", trimmed)
        };
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn hostels_url(&self) -> String {
        format!("{}/hostels", self.base_url)
    }

    pub fn hostel_url(&self, id: &str) -> String {
        format!("{}/hostels/{}", self.base_url, id)
    }

    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(error_for_status(status, message))
    }
}

/// Maps a non-success status and its text body to a [`ClientError`].
pub fn error_for_status(status: StatusCode, message: String) -> ClientError {
    if status == StatusCode::NOT_FOUND {
        ClientError::NotFound(message)
    } else {
        ClientError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait::async_trait]
impl HostelApi for HttpHostelClient {
    async fn list(&self) -> Result<Vec<Hostel>, ClientError> {
        let response = self.http.get(self.hostels_url()).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn get(&self, id: &str) -> Result<Hostel, ClientError> {
        let response = self.http.get(self.hostel_url(id)).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create(&self, hostel: &Hostel) -> Result<Hostel, ClientError> {
        debug!("POST {} ({})", self.hostels_url(), hostel.name);
        let response = self
            .http
            .post(self.hostels_url())
            .json(hostel)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update(&self, id: &str, hostel: &Hostel) -> Result<Hostel, ClientError> {
        debug!("PUT {} ({})", self.hostel_url(id), hostel.name);
        let response = self
            .http
            .put(self.hostel_url(id))
            .json(hostel)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let response = self.http.delete(self.hostel_url(id)).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalisation() {
        assert_eq!(HttpHostelClient::new("127.0.0.1:8080").base_url(), "http://127.0.0.1:8080");
        assert_eq!(HttpHostelClient::new("http://localhost:8080/").base_url(), "http://localhost:8080");
        assert_eq!(HttpHostelClient::new("https://hostels.example").base_url(), "https://hostels.example");
    }

    #[test]
    fn test_urls() {
        let client = HttpHostelClient::new("127.0.0.1:8080");
        assert_eq!(client.hostels_url(), "http://127.0.0.1:8080/hostels");
        assert_eq!(client.hostel_url("I3953378145"), "http://127.0.0.1:8080/hostels/I3953378145");
    }

    #[test]
    fn test_error_for_status() {
        match error_for_status(StatusCode::NOT_FOUND, "No such hostel exists: I1".into()) {
            ClientError::NotFound(message) => assert!(message.contains("I1")),
            other => panic!("unexpected error: {:?}", other),
        }
        match error_for_status(StatusCode::UNSUPPORTED_MEDIA_TYPE, "need Content-Type".into()) {
            ClientError::Rejected { status, message } => {
                assert_eq!(status, 415);
                assert_eq!(message, "need Content-Type");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
