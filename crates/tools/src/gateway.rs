//! Internal status-service gateway
//!
//! One signed POST envelope for all call codes:
//! `{site, session_id, code, params}` with an HMAC-SHA256 signature of
//! the serialized body in the `X-Signature` header. The service answers
//! with `{resultCode, data}`; interpretation of the codes lives in the
//! engine, not here.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Serialize;
use sha2::Sha256;

use chatai_config::GatewaySettings;
use chatai_core::{BackendGateway, BackendReply, CallCode, Result};

use crate::IntegrationError;

type HmacSha256 = Hmac<Sha256>;

/// HTTP implementation of the backend gateway
pub struct HttpBackendGateway {
    client: Client,
    endpoint: String,
    secret: String,
}

#[derive(Debug, Serialize)]
struct Envelope<'a> {
    site: i64,
    session_id: &'a str,
    code: CallCode,
    params: &'a serde_json::Value,
}

impl HttpBackendGateway {
    pub fn new(settings: &GatewaySettings) -> std::result::Result<Self, IntegrationError> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| {
                IntegrationError::Configuration(format!("failed to create HTTP client: {e}"))
            })?;
        Ok(Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            secret: settings.secret.clone(),
        })
    }

    fn sign(&self, body: &str) -> String {
        // The service accepts unsigned calls only in development; an
        // empty secret produces a signature it will reject.
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(body.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn query_url(&self) -> String {
        format!("{}/query", self.endpoint)
    }
}

#[async_trait]
impl BackendGateway for HttpBackendGateway {
    async fn query(
        &self,
        session_id: &str,
        code: CallCode,
        params: serde_json::Value,
        site: i64,
    ) -> Result<BackendReply> {
        let envelope = Envelope {
            site,
            session_id,
            code,
            params: &params,
        };
        let body = serde_json::to_string(&envelope)
            .map_err(|e| IntegrationError::InvalidReply(e.to_string()))?;
        let signature = self.sign(&body);

        let response = self
            .client
            .post(self.query_url())
            .header("Content-Type", "application/json")
            .header("X-Signature", signature)
            .body(body)
            .send()
            .await
            .map_err(IntegrationError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(
                IntegrationError::ConnectionFailed(format!("HTTP {status} from status service"))
                    .into(),
            );
        }

        let reply: BackendReply = response
            .json()
            .await
            .map_err(|e| IntegrationError::InvalidReply(e.to_string()))?;

        tracing::debug!(
            session_id,
            code = code.as_str(),
            result_code = reply.code,
            "status service replied"
        );
        Ok(reply)
    }
}
