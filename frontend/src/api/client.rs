use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::{api::types::ApiError, config};

const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    /// Sends the request built by `build`; on 401 refreshes the session once
    /// and replays the request.
    pub(crate) async fn send_with_refresh<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn() -> Result<RequestBuilder, ApiError>,
    {
        let response = self.send(build()?).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }
        match self.refresh_session().await {
            Ok(()) => self.send(build()?).await,
            Err(err) => {
                log::debug!("Session refresh failed: {}", err);
                Ok(response)
            }
        }
    }

    /// Like `send_with_refresh`, but gives up after `timeout`.
    pub(crate) async fn send_with_timeout<F>(
        &self,
        timeout: Duration,
        build: F,
    ) -> Result<Response, ApiError>
    where
        F: Fn() -> Result<RequestBuilder, ApiError>,
    {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.send_with_refresh(|| build().map(|builder| builder.timeout(timeout)))
                .await
        }
        #[cfg(target_arch = "wasm32")]
        {
            race_timeout(self.send_with_refresh(build), timeout).await
        }
    }

    async fn refresh_session(&self) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .post(format!("{}/auth/refresh", base_url))
                    .json(&json!({})),
            )
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(ApiError::request_failed(format!(
                "Session refresh rejected ({})",
                response.status()
            )))
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = with_credentials(builder)
            .build()
            .map_err(|e| ApiError::request_failed(format!("Invalid request: {}", e)))?;

        #[cfg(all(test, not(target_arch = "wasm32")))]
        if let Some(responder) = mock::find(request.url().as_str()) {
            return responder
                .respond(&request)
                .map(mock::MockResponse::into_response);
        }

        self.client.execute(request).await.map_err(map_transport_error)
    }

    pub(crate) fn handle_unauthorized_status(status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            Self::redirect_to_login_if_needed();
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn redirect_to_login_if_needed() {
        if let Some(window) = web_sys::window() {
            let location = window.location();
            if let Ok(pathname) = location.pathname() {
                if pathname == "/login" {
                    return;
                }
            }
            let _ = location.set_href("/login");
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn redirect_to_login_if_needed() {}

    pub(crate) async fn map_json_response<T>(&self, response: Response) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        Self::handle_unauthorized_status(status);
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::map_error_response(response).await)
        }
    }

    pub(crate) async fn map_empty_response(&self, response: Response) -> Result<(), ApiError> {
        let status = response.status();
        Self::handle_unauthorized_status(status);
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::map_error_response(response).await)
        }
    }

    pub(crate) async fn map_bytes_response(&self, response: Response) -> Result<Vec<u8>, ApiError> {
        let status = response.status();
        Self::handle_unauthorized_status(status);
        if status.is_success() {
            response
                .bytes()
                .await
                .map(|bytes| bytes.to_vec())
                .map_err(|e| ApiError::unknown(format!("Failed to read file: {}", e)))
        } else {
            Err(Self::map_error_response(response).await)
        }
    }

    async fn map_error_response(response: Response) -> ApiError {
        let status = response.status();
        match response.json::<ApiError>().await {
            Ok(error) => error,
            Err(err) => Self::map_error_payload_parse_failure(status, err),
        }
    }

    pub(crate) fn map_error_payload_parse_failure(
        status: StatusCode,
        err: reqwest::Error,
    ) -> ApiError {
        log::debug!("Unparseable error payload ({}): {}", status, err);
        ApiError::unknown(format!("Request failed with status {}", status.as_u16()))
    }
}

pub(crate) fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Drops empty values so the server sees only active filters.
pub(crate) fn push_param(params: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        params.push((key.to_string(), value.to_string()));
    }
}

#[cfg(target_arch = "wasm32")]
fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
    builder.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
    builder
}

const TIMEOUT_MESSAGE: &str = "サーバーからの応答がタイムアウトしました。";

/// The fetch backend has no per-request timeout, so the request is raced
/// against a timer.
#[cfg(target_arch = "wasm32")]
async fn race_timeout<F>(future: F, timeout: Duration) -> Result<Response, ApiError>
where
    F: std::future::Future<Output = Result<Response, ApiError>>,
{
    use std::{future::Future, task::Poll};

    let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
    let mut timer = Box::pin(gloo_timers::future::TimeoutFuture::new(millis));
    let mut request = Box::pin(future);
    std::future::poll_fn(|cx| {
        if let Poll::Ready(result) = request.as_mut().poll(cx) {
            return Poll::Ready(result);
        }
        if timer.as_mut().poll(cx).is_ready() {
            return Poll::Ready(Err(ApiError::timeout(TIMEOUT_MESSAGE)));
        }
        Poll::Pending
    })
    .await
}

fn map_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::timeout(TIMEOUT_MESSAGE)
    } else {
        ApiError::request_failed(format!("Request failed: {}", err))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_segment_escapes_reserved_characters() {
        assert_eq!(encode_segment("emp 1/2"), "emp%201%2F2");
        assert_eq!(encode_segment("plain-id"), "plain-id");
    }

    #[test]
    fn push_param_skips_blank_values() {
        let mut params = Vec::new();
        push_param(&mut params, "search", Some("  "));
        push_param(&mut params, "department", None);
        push_param(&mut params, "status", Some(" active "));
        assert_eq!(params, vec![("status".to_string(), "active".to_string())]);
    }
}
