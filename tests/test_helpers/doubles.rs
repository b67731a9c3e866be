//! Test doubles for the oracle and the clock.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use skillquest::oracle::{
    GenerationUnavailable, OracleGateway, TextTransport, TransportError, ports::TransportResult,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

/// Clock that advances one second on every reading so creation order is
/// always observable.
#[derive(Debug, Default)]
pub struct StepClock {
    ticks: AtomicI64,
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        let epoch = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .unwrap_or_default();
        epoch + Duration::seconds(tick)
    }
}

/// Gateway that replays queued replies and records every prompt.
///
/// Once the queue is exhausted every call reports the oracle as
/// unavailable.
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    /// Creates a gateway with no queued replies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw oracle reply.
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies
            .lock()
            .expect("reply queue lock")
            .push_back(reply.into());
    }

    /// Returns the prompts received so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log lock").clone()
    }
}

#[async_trait]
impl OracleGateway for ScriptedGateway {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationUnavailable> {
        self.prompts
            .lock()
            .expect("prompt log lock")
            .push(prompt.to_owned());
        self.replies
            .lock()
            .expect("reply queue lock")
            .pop_front()
            .ok_or_else(|| GenerationUnavailable {
                primary: TransportError::EmptyResponse,
                fallback: TransportError::EmptyResponse,
            })
    }
}

/// Transport that answers with a fixed result and counts its calls.
#[derive(Debug)]
pub struct FixedTransport {
    name: &'static str,
    result: TransportResult<String>,
    calls: Arc<AtomicI64>,
}

impl FixedTransport {
    /// Creates a transport that always succeeds with `text`.
    #[must_use]
    pub fn answering(name: &'static str, text: impl Into<String>) -> Self {
        Self {
            name,
            result: Ok(text.into()),
            calls: Arc::default(),
        }
    }

    /// Creates a transport that always fails with `error`.
    #[must_use]
    pub fn failing(name: &'static str, error: TransportError) -> Self {
        Self {
            name,
            result: Err(error),
            calls: Arc::default(),
        }
    }

    /// Returns a handle on the call counter that outlives the transport.
    #[must_use]
    pub fn call_counter(&self) -> Arc<AtomicI64> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl TextTransport for FixedTransport {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn complete(&self, _prompt: &str) -> TransportResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}
