//! HTTP client for the ledger backend

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::AppConfig;
use crate::domain::{Block, Pool, TransactRequest, Transaction, WalletInfo};
use crate::infrastructure::ledger::LedgerError;

/// Everything the client needs from the ledger service
#[async_trait::async_trait]
pub trait LedgerApi: Send + Sync + 'static {
    /// Address and balance of the backend's wallet
    async fn wallet_info(&self) -> Result<WalletInfo, LedgerError>;

    /// Full chain, genesis first
    async fn chain(&self) -> Result<Vec<Block>, LedgerError>;

    /// Transactions waiting to be mined
    async fn pool(&self) -> Result<Pool, LedgerError>;

    /// Submit a transfer from the backend's wallet
    async fn transact(&self, request: TransactRequest) -> Result<Transaction, LedgerError>;

    /// Mine the pending pool into a new block
    async fn mine(&self) -> Result<Block, LedgerError>;

    /// Get endpoint display name
    fn endpoint_name(&self) -> String;
}

/// Backend routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    WalletInfo,
    Blockchain,
    Transactions,
    Transact,
    Mine,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::WalletInfo => "/wallet/info",
            Endpoint::Blockchain => "/blockchain",
            Endpoint::Transactions => "/transactions",
            Endpoint::Transact => "/wallet/transact",
            Endpoint::Mine => "/blockchain/mine",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::Transact => Method::POST,
            _ => Method::GET,
        }
    }
}

/// reqwest-backed [`LedgerApi`]
pub struct HttpLedger {
    http: reqwest::Client,
    base_url: String,
}

impl HttpLedger {
    pub fn new(config: &AppConfig) -> Result<Self, LedgerError> {
        let base_url = config.base_url().to_string();
        reqwest::Url::parse(&base_url).map_err(|err| LedgerError::InvalidUrl(format!("{base_url}: {err}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: Option<&TransactRequest>,
    ) -> Result<T, LedgerError> {
        let url = self.url(endpoint);
        debug!(method = %endpoint.method(), %url, "ledger request");

        let mut request = self.http.request(endpoint.method(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        decode_response(status, &bytes)
    }
}

#[async_trait::async_trait]
impl LedgerApi for HttpLedger {
    async fn wallet_info(&self) -> Result<WalletInfo, LedgerError> {
        self.send(Endpoint::WalletInfo, None).await
    }

    async fn chain(&self) -> Result<Vec<Block>, LedgerError> {
        self.send(Endpoint::Blockchain, None).await
    }

    async fn pool(&self) -> Result<Pool, LedgerError> {
        self.send(Endpoint::Transactions, None).await
    }

    async fn transact(&self, request: TransactRequest) -> Result<Transaction, LedgerError> {
        self.send(Endpoint::Transact, Some(&request)).await
    }

    async fn mine(&self) -> Result<Block, LedgerError> {
        self.send(Endpoint::Mine, None).await
    }

    fn endpoint_name(&self) -> String {
        self.base_url.clone()
    }
}

/// Turn a status and body into a typed result.
///
/// The backend reports rejected submissions as `{"type": "error", "message": ..}`,
/// sometimes with a success status, so the body is inspected before decoding.
pub(crate) fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<T, LedgerError> {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();
    let error_message = parsed.as_ref().and_then(error_message);

    if !status.is_success() {
        let message = error_message
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());
        return Err(LedgerError::Status {
            status: status.as_u16(),
            message,
        });
    }
    if let Some(message) = error_message {
        return Err(LedgerError::Rejected(message));
    }

    match parsed {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Ok(serde_json::from_slice(body)?),
    }
}

fn error_message(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    if object.get("type").and_then(Value::as_str) != Some("error") {
        return None;
    }
    Some(
        object
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let config = AppConfig {
            api_url: "http://localhost:5000/".to_string(),
            ..AppConfig::default()
        };
        let ledger = HttpLedger::new(&config).unwrap();
        assert_eq!(ledger.url(Endpoint::WalletInfo), "http://localhost:5000/wallet/info");
        assert_eq!(ledger.url(Endpoint::Mine), "http://localhost:5000/blockchain/mine");
        assert_eq!(Endpoint::Transact.method(), Method::POST);
        assert_eq!(Endpoint::Transactions.method(), Method::GET);
    }

    #[test]
    fn test_invalid_base_url() {
        let config = AppConfig {
            api_url: "http://".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            HttpLedger::new(&config),
            Err(LedgerError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_decode_success() {
        let wallet: WalletInfo =
            decode_response(StatusCode::OK, br#"{"address": "0xabc", "balance": 1000}"#).unwrap();
        assert_eq!(wallet.address_display(), "0xabc");
    }

    #[test]
    fn test_decode_rejection_with_ok_status() {
        let result: Result<Transaction, _> = decode_response(
            StatusCode::OK,
            br#"{"type": "error", "message": "Amount exceeds balance"}"#,
        );
        match result {
            Err(LedgerError::Rejected(message)) => assert_eq!(message, "Amount exceeds balance"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_decode_error_status() {
        let result: Result<Transaction, _> = decode_response(
            StatusCode::BAD_REQUEST,
            br#"{"type": "error", "message": "Invalid amount"}"#,
        );
        match result {
            Err(LedgerError::Status { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid amount");
            }
            other => panic!("unexpected {other:?}"),
        }

        let result: Result<Vec<Block>, _> =
            decode_response(StatusCode::INTERNAL_SERVER_ERROR, b"<html>boom</html>");
        assert!(matches!(result, Err(LedgerError::Status { status: 500, .. })));
    }

    #[test]
    fn test_decode_malformed_body() {
        let result: Result<Vec<Block>, _> = decode_response(StatusCode::OK, b"not json");
        assert!(matches!(result, Err(LedgerError::Decode(_))));
    }
}
