//! Stateless HTTP transport. Tokens are passed per call by [`crate::Session`].

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{ClientConfig, ClientError, ClientResult};

/// Error body returned by the API.
#[derive(Deserialize)]
struct ApiErrorResponse {
    error: String,
    #[allow(dead_code)]
    code: Option<String>,
}

/// HTTP client for the parish API.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    api_root: String,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            api_root: config.api_root(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        token: Option<&str>,
    ) -> ClientResult<T> {
        let request = Self::authorize(self.client.get(self.url(path)).query(query), token);
        Self::handle_response(request.send().await?).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> ClientResult<T> {
        let request = Self::authorize(self.client.post(self.url(path)).json(body), token);
        Self::handle_response(request.send().await?).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> ClientResult<T> {
        let request = Self::authorize(self.client.put(self.url(path)).json(body), token);
        Self::handle_response(request.send().await?).await
    }

    /// DELETE expecting an empty (204) or ignored body.
    pub async fn delete(&self, path: &str, token: Option<&str>) -> ClientResult<()> {
        let request = Self::authorize(self.client.delete(self.url(path)), token);
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(error_for_status(status, &text));
        }
        Ok(())
    }

    /// Multipart POST with a single `file` part.
    pub async fn post_file<T: DeserializeOwned>(
        &self,
        path: &str,
        file_name: &str,
        bytes: Vec<u8>,
        token: Option<&str>,
    ) -> ClientResult<T> {
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));
        let request = Self::authorize(self.client.post(self.url(path)).multipart(form), token);
        Self::handle_response(request.send().await?).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(error_for_status(status, &text));
        }
        Ok(response.json().await?)
    }
}

/// Map a non-success response onto [`ClientError`], preferring the API's
/// `error` message over the raw body.
pub fn error_for_status(status: StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<ApiErrorResponse>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.to_string());

    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::BAD_REQUEST => ClientError::Validation(message),
        StatusCode::CONFLICT => ClientError::Conflict(message),
        _ => ClientError::Internal(message),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn api_error_body_is_unwrapped() {
        let err = error_for_status(
            StatusCode::CONFLICT,
            r#"{"error":"Member is not pending approval","code":"CONFLICT"}"#,
        );
        assert_matches!(err, ClientError::Conflict(msg) if msg == "Member is not pending approval");
    }

    #[test]
    fn plain_body_is_kept() {
        let err = error_for_status(StatusCode::BAD_GATEWAY, "upstream down");
        assert_matches!(err, ClientError::Internal(msg) if msg == "upstream down");
    }

    #[test]
    fn status_mapping() {
        assert_matches!(error_for_status(StatusCode::UNAUTHORIZED, ""), ClientError::Unauthorized(_));
        assert_matches!(error_for_status(StatusCode::FORBIDDEN, ""), ClientError::Forbidden(_));
        assert_matches!(error_for_status(StatusCode::NOT_FOUND, ""), ClientError::NotFound(_));
        assert_matches!(error_for_status(StatusCode::BAD_REQUEST, ""), ClientError::Validation(_));
    }
}
