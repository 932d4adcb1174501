//! Dispatcher: normalizes addresses and sends with retry.

use std::sync::Arc;

use campaign_core::{
    async_trait, Channel, DispatchError, DispatchReceipt, DispatchRequest, MessageDispatcher,
    MessageTransport, OutboundSms,
};
use tracing::info;

use crate::client::TwilioClient;
use crate::config::TwilioConfig;
use crate::phone::{normalize_phone, normalize_whatsapp_address};
use crate::retry::RetryPolicy;

/// Sends SMS and WhatsApp messages through a [`MessageTransport`].
///
/// Credentials and the channel's sender are checked before any network
/// attempt. Transient network failures are retried per the [`RetryPolicy`].
pub struct Dispatcher {
    transport: Arc<dyn MessageTransport>,
    sms_from: Option<String>,
    whatsapp_from: Option<String>,
    retry: RetryPolicy,
}

impl Dispatcher {
    /// Create a dispatcher with no senders and the default retry policy.
    pub fn new(transport: Arc<dyn MessageTransport>) -> Self {
        Self {
            transport,
            sms_from: None,
            whatsapp_from: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Create a Twilio-backed dispatcher.
    pub fn from_config(config: TwilioConfig) -> Result<Self, DispatchError> {
        let retry = RetryPolicy::new(config.max_attempts, config.retry_delay);
        let sms_from = config.sms_from.clone();
        let whatsapp_from = config.whatsapp_from.clone();

        info!(
            has_credentials = config.has_credentials(),
            sms_sender = sms_from.is_some(),
            whatsapp_sender = whatsapp_from.is_some(),
            max_attempts = retry.max_attempts,
            "Dispatcher initialized"
        );

        let transport = Arc::new(TwilioClient::new(config)?);
        let mut dispatcher = Self::new(transport).with_retry_policy(retry);
        dispatcher.sms_from = sms_from;
        dispatcher.whatsapp_from = whatsapp_from;
        Ok(dispatcher)
    }

    /// Create a Twilio-backed dispatcher from environment variables.
    ///
    /// See [`TwilioConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, DispatchError> {
        Self::from_config(TwilioConfig::from_env()?)
    }

    /// Set the SMS sender number.
    pub fn with_sms_sender(mut self, from: impl Into<String>) -> Self {
        self.sms_from = Some(from.into());
        self
    }

    /// Set the WhatsApp sender address.
    pub fn with_whatsapp_sender(mut self, from: impl Into<String>) -> Self {
        self.whatsapp_from = Some(from.into());
        self
    }

    /// Replace the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Send an SMS to an E.164 destination.
    pub async fn send_sms(&self, to: &str, body: &str) -> Result<DispatchReceipt, DispatchError> {
        self.transport.ensure_configured()?;
        let from = self.sms_from.as_deref().ok_or_else(|| {
            DispatchError::Configuration("TWILIO_PHONE_NUMBER is not configured".to_string())
        })?;

        let message = OutboundSms {
            from: normalize_phone(from)?,
            to: normalize_phone(to)?,
            body: body.to_string(),
        };

        self.deliver(Channel::Sms, message).await
    }

    /// Send a WhatsApp message to an E.164 destination.
    ///
    /// Failures after the sender is resolved carry the sender address.
    pub async fn send_whatsapp(
        &self,
        to: &str,
        body: &str,
    ) -> Result<DispatchReceipt, DispatchError> {
        self.transport.ensure_configured()?;
        let from = self.whatsapp_from.as_deref().ok_or_else(|| {
            DispatchError::Configuration("TWILIO_WHATSAPP_FROM is not configured".to_string())
        })?;
        let from = normalize_whatsapp_address(from)?;

        let result = match normalize_whatsapp_address(to) {
            Ok(to) => {
                let message = OutboundSms {
                    from: from.clone(),
                    to,
                    body: body.to_string(),
                };
                self.deliver(Channel::WhatsApp, message).await
            }
            Err(e) => Err(e),
        };

        result.map_err(|e| e.with_sender(from))
    }

    async fn deliver(
        &self,
        channel: Channel,
        message: OutboundSms,
    ) -> Result<DispatchReceipt, DispatchError> {
        let transport = &self.transport;
        let message = &message;

        let (provider_message_id, attempts) = self
            .retry
            .run(|_| async move { transport.create_message(message).await })
            .await?;

        info!(%channel, sid = %provider_message_id, attempts, "Provider accepted message");
        Ok(DispatchReceipt {
            provider_message_id,
            attempts,
        })
    }
}

#[async_trait]
impl MessageDispatcher for Dispatcher {
    async fn send(&self, request: &DispatchRequest) -> Result<DispatchReceipt, DispatchError> {
        match request.channel {
            Channel::Sms => self.send_sms(&request.destination, &request.body).await,
            Channel::WhatsApp => self.send_whatsapp(&request.destination, &request.body).await,
        }
    }
}
