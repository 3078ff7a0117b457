use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::{select, Either, LocalBoxFuture};
use serde_json::Value;
use thiserror::Error;

/// EIP-1193 "user rejected the request".
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProviderError {
    #[error("provider error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("{0}")]
    Message(String),
    #[error("{method} timed out after {millis} ms")]
    Timeout { method: String, millis: u128 },
    #[error("unexpected {method} payload: {detail}")]
    Payload { method: String, detail: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    Rejected,
    Timeout,
    Internal,
    Other,
}

impl ProviderError {
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        Self::Rpc {
            code,
            message: message.into(),
        }
    }

    pub fn payload(method: &str, detail: impl Into<String>) -> Self {
        Self::Payload {
            method: method.to_string(),
            detail: detail.into(),
        }
    }

    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Short category used to choose the user-facing message. Extension
    /// crashes surface as "Unexpected error" or stack frames from `hook.js`.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Rpc { code, .. } if *code == USER_REJECTED_CODE => ErrorCategory::Rejected,
            Self::Timeout { .. } => ErrorCategory::Timeout,
            Self::Rpc { message, .. } | Self::Message(message)
                if message.contains("Unexpected error") || message.contains("hook.js") =>
            {
                ErrorCategory::Internal
            }
            _ => ErrorCategory::Other,
        }
    }
}

/// Events pushed by the provider after a connection is established.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderNotification {
    AccountsChanged(Vec<String>),
    ChainChanged(String),
}

pub type NotificationListener = Rc<dyn Fn(ProviderNotification)>;

/// An injected EIP-1193 provider such as `window.ethereum`.
#[async_trait(?Send)]
pub trait WalletProvider {
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, ProviderError>;

    /// Registers a listener for `accountsChanged` and `chainChanged`.
    fn subscribe(&self, listener: NotificationListener);
}

/// Timer and task primitives for whatever executor hosts the wallet flow.
pub trait Runtime {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

/// Races `request` against a timer; the loser is dropped.
pub async fn with_timeout<T, F>(
    runtime: &dyn Runtime,
    method: &str,
    limit: Duration,
    request: F,
) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    let request = Box::pin(request);
    match select(request, runtime.sleep(limit)).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ProviderError::Timeout {
            method: method.to_string(),
            millis: limit.as_millis(),
        }),
    }
}

pub fn parse_accounts(method: &str, value: &Value) -> Result<Vec<String>, ProviderError> {
    let Value::Array(items) = value else {
        return Err(ProviderError::payload(method, format!("expected an array, got {value}")));
    };
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| ProviderError::payload(method, format!("non-string account {item}")))
        })
        .collect()
}

pub fn parse_string(method: &str, value: &Value) -> Result<String, ProviderError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ProviderError::payload(method, format!("expected a string, got {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn categorizes_errors() {
        assert_eq!(ProviderError::rpc(4001, "User rejected the request.").category(), ErrorCategory::Rejected);
        assert_eq!(ProviderError::rpc(-32603, "Unexpected error").category(), ErrorCategory::Internal);
        assert_eq!(ProviderError::Message("at hook.js:1:2".into()).category(), ErrorCategory::Internal);
        assert_eq!(ProviderError::rpc(-32002, "Request already pending").category(), ErrorCategory::Other);
        let timeout = ProviderError::Timeout {
            method: "eth_accounts".into(),
            millis: 1000,
        };
        assert_eq!(timeout.category(), ErrorCategory::Timeout);
        assert_eq!(timeout.to_string(), "eth_accounts timed out after 1000 ms");
        assert_eq!(timeout.code(), None);
    }

    #[test]
    fn parses_account_arrays() {
        assert_eq!(
            parse_accounts("eth_accounts", &json!(["0xabc", "0xdef"])),
            Ok(vec!["0xabc".to_string(), "0xdef".to_string()])
        );
        assert_eq!(parse_accounts("eth_accounts", &json!([])), Ok(vec![]));
        assert!(parse_accounts("eth_accounts", &json!("0xabc")).is_err());
        assert!(parse_accounts("eth_accounts", &json!([1])).is_err());
    }
}
