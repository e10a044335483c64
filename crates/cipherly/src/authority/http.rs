//! HTTP sealing client for a remote policy authority.

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

use common::protocol::{SealRequest, SealResponse, UnsealRequest, UnsealResponse};
use common::CipherlyError;

use crate::crypto::SymmetricKey;

use super::{Authority, Envelope, SealedEnvelope};

/// Sealing client that speaks the authority's JSON contract over HTTP:
/// `POST {base}/api/seal` and `POST {base}/api/unseal`.
#[derive(Debug, Clone)]
pub struct HttpAuthority {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthority {
    /// Build a client for the authority at `base_url` (scheme + host, no
    /// trailing slash required) with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CipherlyError::Transport`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CipherlyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CipherlyError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl Authority for HttpAuthority {
    #[tracing::instrument(skip_all)]
    async fn seal(&self, envelope: &Envelope) -> Result<SealedEnvelope, CipherlyError> {
        let request = SealRequest {
            dek: URL_SAFE_NO_PAD.encode(envelope.dek.as_bytes()),
            emails: envelope.emails.clone(),
        };

        let response = self
            .client
            .post(self.endpoint("/api/seal"))
            .json(&request)
            .send()
            .await
            .map_err(|e| CipherlyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CipherlyError::Seal {
                status: status.as_u16(),
                message: read_error_body(response).await,
            });
        }

        let body: SealResponse = response
            .json()
            .await
            .map_err(|e| CipherlyError::Transport(format!("unreadable seal response: {e}")))?;
        debug!(kid = %body.kid, "envelope sealed");

        Ok(SealedEnvelope {
            key_id: body.kid,
            nonce: decode_b64(&body.nonce, "nonce")?,
            data: decode_b64(&body.data, "data")?,
        })
    }

    #[tracing::instrument(skip_all)]
    async fn unseal(
        &self,
        sealed: &SealedEnvelope,
        bearer_token: &str,
    ) -> Result<Envelope, CipherlyError> {
        let request = UnsealRequest {
            kid: sealed.key_id.clone(),
            nonce: URL_SAFE_NO_PAD.encode(&sealed.nonce),
            data: URL_SAFE_NO_PAD.encode(&sealed.data),
        };

        let response = self
            .client
            .post(self.endpoint("/api/unseal"))
            .bearer_auth(bearer_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| CipherlyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CipherlyError::Unseal {
                status: status.as_u16(),
                message: read_error_body(response).await,
            });
        }

        let body: UnsealResponse = response
            .json()
            .await
            .map_err(|e| CipherlyError::Transport(format!("unreadable unseal response: {e}")))?;
        let dek_bytes = decode_b64(&body.dek, "dek")?;
        let dek = SymmetricKey::from_bytes(&dek_bytes)
            .map_err(|e| CipherlyError::Transport(format!("authority returned a bad dek: {e}")))?;
        debug!(kid = %sealed.key_id, "envelope unsealed");

        Ok(Envelope {
            dek,
            emails: body.emails,
        })
    }
}

/// Best-effort read of a non-2xx response body; the raw text is surfaced to
/// the caller for interpretation.
async fn read_error_body(response: reqwest::Response) -> String {
    let status: StatusCode = response.status();
    match response.text().await {
        Ok(text) if !text.is_empty() => text,
        _ => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    }
}

fn decode_b64(value: &str, field: &str) -> Result<Vec<u8>, CipherlyError> {
    URL_SAFE_NO_PAD
        .decode(value)
        .map_err(|e| CipherlyError::Transport(format!("authority sent invalid {field}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let authority = HttpAuthority::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            authority.endpoint("/api/seal"),
            "http://localhost:8000/api/seal"
        );
    }

    #[tokio::test]
    async fn unreachable_authority_is_transport_error() {
        // Reserved TEST-NET-1 address; nothing listens there.
        let authority =
            HttpAuthority::new("http://192.0.2.1:1", Duration::from_millis(200)).unwrap();
        let envelope = Envelope {
            dek: SymmetricKey::generate(),
            emails: vec!["a@test.com".into()],
        };
        assert!(matches!(
            authority.seal(&envelope).await,
            Err(CipherlyError::Transport(_))
        ));
    }
}
