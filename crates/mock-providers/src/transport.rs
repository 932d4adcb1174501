//! Scripted telephony transport.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use campaign_core::{DispatchError, MessageTransport, OutboundSms};
use tokio::sync::Mutex;

/// One scripted answer from the telephony provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportReply {
    /// Accept the message with this provider SID.
    Accept(String),
    /// Fail at the socket level with this normalized code (e.g. "ECONNRESET").
    Network(String),
    /// Reject the message.
    Reject {
        status: u16,
        code: Option<i64>,
        message: String,
    },
}

impl TransportReply {
    fn into_result(self) -> Result<String, DispatchError> {
        match self {
            TransportReply::Accept(sid) => Ok(sid),
            TransportReply::Network(code) => Err(DispatchError::Network {
                message: format!("simulated {}", code),
                code,
            }),
            TransportReply::Reject {
                status,
                code,
                message,
            } => Err(DispatchError::Rejected {
                status,
                code,
                message,
            }),
        }
    }
}

/// A transport that answers from a queue of scripted replies.
///
/// Once the queue is drained every message is accepted with a generated SID.
/// Every message handed to the transport is recorded, including failed ones.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<TransportReply>>,
    sent: Mutex<Vec<OutboundSms>>,
    calls: AtomicUsize,
    unconfigured: bool,
}

impl ScriptedTransport {
    /// Create a transport that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply.
    pub fn then(mut self, reply: TransportReply) -> Self {
        self.replies.get_mut().push_back(reply);
        self
    }

    /// Queue an acceptance with the given SID.
    pub fn then_accept(self, sid: impl Into<String>) -> Self {
        self.then(TransportReply::Accept(sid.into()))
    }

    /// Queue a network failure with the given normalized code.
    pub fn then_network(self, code: impl Into<String>) -> Self {
        self.then(TransportReply::Network(code.into()))
    }

    /// Queue a provider rejection.
    pub fn then_reject(self, status: u16, code: Option<i64>, message: impl Into<String>) -> Self {
        self.then(TransportReply::Reject {
            status,
            code,
            message: message.into(),
        })
    }

    /// Report missing credentials from `ensure_configured`.
    pub fn unconfigured(mut self) -> Self {
        self.unconfigured = true;
        self
    }

    /// Number of `create_message` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Messages handed to the transport, in call order.
    pub async fn sent(&self) -> Vec<OutboundSms> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl MessageTransport for ScriptedTransport {
    fn ensure_configured(&self) -> Result<(), DispatchError> {
        if self.unconfigured {
            return Err(DispatchError::Configuration(
                "TWILIO_ACCOUNT_SID and TWILIO_AUTH_TOKEN must be set".to_string(),
            ));
        }
        Ok(())
    }

    async fn create_message(&self, message: &OutboundSms) -> Result<String, DispatchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.sent.lock().await.push(message.clone());

        match self.replies.lock().await.pop_front() {
            Some(reply) => reply.into_result(),
            None => Ok(format!("SM{:032}", call)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> OutboundSms {
        OutboundSms {
            from: "+15005550006".to_string(),
            to: "+15551234567".to_string(),
            body: "hi".to_string(),
        }
    }

    #[tokio::test]
    async fn test_replies_in_order_then_accepts() {
        let transport = ScriptedTransport::new()
            .then_network("ECONNRESET")
            .then_accept("SMabc");

        let first = transport.create_message(&message()).await.unwrap_err();
        assert_eq!(first.code().as_deref(), Some("ECONNRESET"));
        assert_eq!(transport.create_message(&message()).await.unwrap(), "SMabc");
        assert!(transport.create_message(&message()).await.unwrap().starts_with("SM"));

        assert_eq!(transport.calls(), 3);
        assert_eq!(transport.sent().await.len(), 3);
    }

    #[tokio::test]
    async fn test_reject_carries_code() {
        let transport = ScriptedTransport::new().then_reject(400, Some(21211), "Invalid 'To'");
        let err = transport.create_message(&message()).await.unwrap_err();
        assert_eq!(err.code().as_deref(), Some("21211"));
    }
}
