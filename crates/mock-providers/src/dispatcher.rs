//! Scripted message dispatcher.

use async_trait::async_trait;
use campaign_core::{DispatchError, DispatchReceipt, DispatchRequest, MessageDispatcher};
use tokio::sync::Mutex;

/// A dispatcher that accepts every message with a fixed SID, or fails every
/// message with an error built by the given constructor.
#[derive(Debug)]
pub struct ScriptedDispatcher {
    reply: Result<String, fn() -> DispatchError>,
    requests: Mutex<Vec<DispatchRequest>>,
}

impl ScriptedDispatcher {
    /// Accept every message with `sid`.
    pub fn accepting(sid: impl Into<String>) -> Self {
        Self {
            reply: Ok(sid.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail every message with the error returned by `make_error`.
    pub fn failing(make_error: fn() -> DispatchError) -> Self {
        Self {
            reply: Err(make_error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    pub async fn requests(&self) -> Vec<DispatchRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl MessageDispatcher for ScriptedDispatcher {
    async fn send(&self, request: &DispatchRequest) -> Result<DispatchReceipt, DispatchError> {
        self.requests.lock().await.push(request.clone());

        match &self.reply {
            Ok(sid) => Ok(DispatchReceipt {
                provider_message_id: sid.clone(),
                attempts: 1,
            }),
            Err(make_error) => Err(make_error()),
        }
    }
}
