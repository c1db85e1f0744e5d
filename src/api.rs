use crate::{
    config::Config,
    constants::ASK_PATH,
    errors::TarantibotResult,
    logging::log_api_call,
    models::ApiCallLog,
};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Why an exchange with the answering service failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection refused, reset, DNS, and other transport problems
    Transport,
    /// The transport gave up waiting
    Timeout,
    /// The service answered with a non-success status
    Status(u16),
    /// Success status but the body had no usable `response` string
    Malformed,
    /// The service implementation panicked mid-request
    Panicked,
    /// The exchange task was dropped before it finished, e.g. at runtime shutdown
    Interrupted,
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct ExchangeFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ExchangeFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Transport, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Timeout, message)
    }

    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::new(FailureKind::Status(code), message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Malformed, message)
    }

    pub fn panicked(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Panicked, message)
    }
}

impl From<reqwest::Error> for ExchangeFailure {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::timeout(format!("Request timed out: {}", e))
        } else {
            Self::transport(format!("Request failed: {}", e))
        }
    }
}

/// Something that can answer a single query.
///
/// One call is one attempt: implementations must not retry.
#[async_trait]
pub trait AskService: Send + Sync {
    async fn ask(&self, query: &str) -> Result<String, ExchangeFailure>;
}

#[derive(Serialize)]
struct AskRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct AskReply {
    response: String,
}

/// Joins the configured base URL with the `/ask` route.
pub fn ask_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), ASK_PATH)
}

/// Client for the answering service's `POST /ask` route.
#[derive(Debug, Clone)]
pub struct HttpAskService {
    client: Client,
    endpoint: String,
}

impl HttpAskService {
    pub fn new(base_url: &str, timeout: Duration) -> TarantibotResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: ask_endpoint(base_url),
        })
    }

    pub fn from_config(config: &Config) -> TarantibotResult<Self> {
        Self::new(&config.backend_url, config.request_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn record(&self, query: &str, status: Option<u16>, started: Instant) {
        log_api_call(&ApiCallLog {
            timestamp: Utc::now(),
            endpoint: self.endpoint.clone(),
            request_summary: format!("ask ({} chars)", query.chars().count()),
            response_status: status,
            response_time_ms: started.elapsed().as_millis(),
        });
    }
}

#[async_trait]
impl AskService for HttpAskService {
    async fn ask(&self, query: &str) -> Result<String, ExchangeFailure> {
        let started = Instant::now();
        let response = match self
            .client
            .post(&self.endpoint)
            .json(&AskRequest { query })
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                self.record(query, None, started);
                return Err(e.into());
            }
        };

        let status = response.status();
        self.record(query, Some(status.as_u16()), started);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ExchangeFailure::status(
                status.as_u16(),
                format!("Service returned error: {} - {}", status, error_text),
            ));
        }

        let body = response.bytes().await?;
        let reply: AskReply = serde_json::from_slice(&body).map_err(|e| {
            ExchangeFailure::malformed(format!("Response missing expected content: {}", e))
        })?;

        Ok(reply.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn service_for(server: &MockServer) -> HttpAskService {
        HttpAskService::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_ask_endpoint_joins_without_double_slash() {
        assert_eq!(ask_endpoint("http://localhost:8000"), "http://localhost:8000/ask");
        assert_eq!(ask_endpoint("http://localhost:8000/"), "http://localhost:8000/ask");
        assert_eq!(ask_endpoint("https://bot.example/api/"), "https://bot.example/api/ask");
    }

    #[tokio::test]
    async fn test_ask_success_returns_response_verbatim() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ask"))
            .and(body_json(json!({ "query": "Hola" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "  ¡Hola! ¿En qué puedo ayudarte?\n"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let answer = service_for(&mock_server).ask("Hola").await.unwrap();
        assert_eq!(answer, "  ¡Hola! ¿En qué puedo ayudarte?\n");
    }

    #[tokio::test]
    async fn test_ask_non_success_status_is_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&mock_server)
            .await;

        let failure = service_for(&mock_server).ask("Hola").await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::Status(503));
    }

    #[tokio::test]
    async fn test_ask_error_body_with_ok_status_is_malformed() {
        let mock_server = MockServer::start().await;

        // The backend reports its own failures as 200 + {"error": ...}.
        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "error": "Error al procesar tu solicitud." })),
            )
            .mount(&mock_server)
            .await;

        let failure = service_for(&mock_server).ask("Hola").await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::Malformed);
    }

    #[tokio::test]
    async fn test_ask_non_string_response_is_malformed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": 42 })))
            .mount(&mock_server)
            .await;

        let failure = service_for(&mock_server).ask("Hola").await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::Malformed);
    }

    #[tokio::test]
    async fn test_ask_non_json_body_is_malformed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let failure = service_for(&mock_server).ask("Hola").await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::Malformed);
    }

    #[tokio::test]
    async fn test_ask_slow_service_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "response": "tarde" }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let service = HttpAskService::new(&mock_server.uri(), Duration::from_millis(50)).unwrap();
        let failure = service.ask("Hola").await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::Timeout);
    }

    #[tokio::test]
    async fn test_ask_unreachable_service_is_transport_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let service =
            HttpAskService::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
        let failure = service.ask("Hola").await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::Transport);
    }
}
