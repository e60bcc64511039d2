//! HTTP data client

use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use crate::error::FetchError;
use crate::kind::ResourceKind;
use crate::payload::{ApiFailure, ApiResponse};
use crate::Result;

/// Source of region data for the dashboard.
///
/// Implementations must not retry; retrying is the caller's decision.
#[async_trait]
pub trait DataClient: Send + Sync {
    async fn fetch(&self, kind: ResourceKind, region: &str) -> Result<ApiResponse>;
}

#[derive(Clone)]
pub struct HttpDataClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpDataClient {
    pub fn new(base_url: Url, timeout: Duration, user_agent: &str) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl DataClient for HttpDataClient {
    async fn fetch(&self, kind: ResourceKind, region: &str) -> Result<ApiResponse> {
        let url = kind.endpoint(&self.base_url, region)?;

        tracing::debug!(url = %url, kind = %kind, region = %region, "Fetching");

        let resp = self.client.get(url).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        decode(kind, status, &body)
    }
}

/// Turn a raw HTTP response into a typed payload.
///
/// An object with a non-blank `error` field is a payload-level failure even
/// under a success status. 5xx is always a transport-level failure.
pub fn decode(kind: ResourceKind, status: u16, body: &str) -> Result<ApiResponse> {
    if status >= 500 {
        return Err(FetchError::Status(status));
    }

    let value: serde_json::Value = serde_json::from_str(body)?;

    if value.get("error").is_some_and(reports_error) {
        let failure: ApiFailure = serde_json::from_value(value)?;
        return Ok(ApiResponse::Failure(failure));
    }

    if !(200..300).contains(&status) {
        return Err(FetchError::Status(status));
    }

    let response = match kind {
        ResourceKind::Antecedentes => ApiResponse::Antecedentes(serde_json::from_value(value)?),
        ResourceKind::Pronostico => ApiResponse::Pronostico(serde_json::from_value(value)?),
    };

    Ok(response)
}

fn reports_error(error: &serde_json::Value) -> bool {
    match error {
        serde_json::Value::Null => false,
        serde_json::Value::String(message) => !message.trim().is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const FORECAST: &str = r#"{
        "region": "Lima",
        "fecha_estimada": "2026-11-02",
        "hora_estimada": "14:21:09",
        "magnitud_estimada": 4.7,
        "profundidad_estimada": 52.3,
        "probabilidad": "Alta",
        "total_eventos_historicos": 118,
        "intervalo_promedio_dias": 21.4,
        "ultimo_sismo_registrado": {
            "fecha": "2026-10-11 03:12:44",
            "magnitud": 4.5,
            "profundidad": 60.0
        }
    }"#;

    /// Serve one canned response and hand back the request line.
    async fn serve_once(status: &str, body: &'static str) -> (Url, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let status = status.to_string();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            let request = String::from_utf8_lossy(&buf).to_string();
            request.lines().next().unwrap_or_default().to_string()
        });

        (Url::parse(&format!("http://{}", addr)).unwrap(), handle)
    }

    fn client(base: Url) -> HttpDataClient {
        HttpDataClient::new(base, Duration::from_secs(5), "sismo-test").unwrap()
    }

    #[test]
    fn test_decode_forecast() {
        let resp = decode(ResourceKind::Pronostico, 200, FORECAST).unwrap();
        match resp {
            ApiResponse::Pronostico(f) => {
                assert_eq!(f.region, "Lima");
                assert_eq!(f.probabilidad, "Alta");
                assert_eq!(f.ultimo_sismo_registrado.magnitud, 4.5);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn test_decode_payload_error_under_success_status() {
        let resp = decode(
            ResourceKind::Antecedentes,
            200,
            r#"{"error": "Región no encontrada", "region": "Ica"}"#,
        )
        .unwrap();
        assert_eq!(
            resp,
            ApiResponse::Failure(ApiFailure {
                error: "Región no encontrada".to_string(),
                region: Some("Ica".to_string()),
            })
        );
    }

    #[test]
    fn test_decode_null_error_is_not_a_failure() {
        let body = FORECAST.replacen('{', r#"{"error": null,"#, 1);
        let resp = decode(ResourceKind::Pronostico, 200, &body).unwrap();
        assert!(!resp.is_failure());
    }

    #[test]
    fn test_decode_blank_error_is_not_a_failure() {
        let err = decode(ResourceKind::Pronostico, 200, r#"{"error": ""}"#).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));

        let err = decode(ResourceKind::Pronostico, 404, r#"{"error": "  "}"#).unwrap_err();
        assert!(matches!(err, FetchError::Status(404)));

        let body = FORECAST.replacen('{', r#"{"error": "","#, 1);
        assert!(!decode(ResourceKind::Pronostico, 200, &body).unwrap().is_failure());
    }

    #[test]
    fn test_decode_client_error_with_message() {
        let resp = decode(ResourceKind::Pronostico, 404, r#"{"error": "sin datos"}"#).unwrap();
        assert!(resp.is_failure());

        let err = decode(ResourceKind::Pronostico, 404, r#"{"detail": "nope"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Status(404)));
    }

    #[test]
    fn test_decode_server_error() {
        let err = decode(ResourceKind::Pronostico, 500, r#"{"error": "boom"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Status(500)));
    }

    #[test]
    fn test_decode_malformed() {
        let err = decode(ResourceKind::Antecedentes, 200, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));

        // Valid JSON, wrong shape for the kind
        let err = decode(ResourceKind::Antecedentes, 200, FORECAST).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_over_http() {
        let (base, server) = serve_once("200 OK", FORECAST).await;

        let resp = client(base)
            .fetch(ResourceKind::Pronostico, "Lima")
            .await
            .unwrap();
        assert_eq!(resp.kind(), Some(ResourceKind::Pronostico));

        let request_line = server.await.unwrap();
        assert_eq!(request_line, "GET /api/pronostico/Lima HTTP/1.1");
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let (base, server) = serve_once("503 Service Unavailable", "{}").await;

        let err = client(base)
            .fetch(ResourceKind::Antecedentes, "Lima")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status(503)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base = Url::parse(&format!("http://{}", addr)).unwrap();
        let err = client(base)
            .fetch(ResourceKind::Pronostico, "Lima")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[test]
    fn test_rejects_non_base_url() {
        let base = Url::parse("mailto:someone@example.com").unwrap();
        assert!(HttpDataClient::new(base, Duration::from_secs(1), "x").is_err());
    }
}
