//! HTTP implementation of the remote layout store.

use super::{BoxFuture, PositionUpdate, RemoteError, RemoteResult, RemoteStore};
use crate::scene::SceneDocument;
use serde::Serialize;

/// Remote store backed by the layout HTTP API.
///
/// Endpoints, relative to the base URL:
/// - `GET /{context}/canvas/data` fetches the saved layout
/// - `POST /{context}/canvas/save` saves the layout
/// - `POST /{context}/items/{placement}/position` records a moved item
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct PositionBody {
    x: f64,
    y: f64,
}

impl HttpRemote {
    /// Create a client for the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing reqwest client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

fn check_status(response: &reqwest::Response) -> RemoteResult<()> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(RemoteError::Status(status.as_u16()))
    }
}

impl RemoteStore for HttpRemote {
    fn fetch_layout<'a>(
        &'a self,
        context: &'a str,
    ) -> BoxFuture<'a, RemoteResult<Option<SceneDocument>>> {
        Box::pin(async move {
            let response = self
                .client
                .get(self.url(&format!("{context}/canvas/data")))
                .send()
                .await?;
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Ok(None);
            }
            check_status(&response)?;
            let document: SceneDocument = response.json().await?;
            if document.objects.is_empty() {
                Ok(None)
            } else {
                Ok(Some(document))
            }
        })
    }

    fn save_layout<'a>(
        &'a self,
        context: &'a str,
        document: &'a SceneDocument,
    ) -> BoxFuture<'a, RemoteResult<()>> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.url(&format!("{context}/canvas/save")))
                .json(document)
                .send()
                .await?;
            check_status(&response)
        })
    }

    fn update_position<'a>(
        &'a self,
        context: &'a str,
        update: &'a PositionUpdate,
    ) -> BoxFuture<'a, RemoteResult<()>> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.url(&format!(
                    "{context}/items/{}/position",
                    update.location_crop_id
                )))
                .json(&PositionBody {
                    x: update.x,
                    y: update.y,
                })
                .send()
                .await?;
            check_status(&response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let remote = HttpRemote::new("http://localhost:8080/api//");
        assert_eq!(
            remote.url("garden-1/canvas/data"),
            "http://localhost:8080/api/garden-1/canvas/data"
        );
    }
}
