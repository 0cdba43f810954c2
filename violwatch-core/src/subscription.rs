// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Server-push subscription with explicit reconnection.
//!
//! The browser's `EventSource` reconnects on its own, but on a schedule the page
//! cannot observe or bound. Here a connection that fails to open, errors, or ends
//! is treated as lost; the subscription waits out an exponential backoff and
//! opens a new one. A delivered message proves the link is healthy and resets
//! the schedule.

use crate::cancellation::CancellationToken;
use crate::config::ReconnectConfig;
use crate::error::{DashboardError, Result};
use crate::logging::{log_info, log_warn};
use crate::model::ViolationRecord;
use async_trait::async_trait;
use futures::future::{select, Either};
use futures::stream::LocalBoxStream;
use futures::StreamExt;
use std::future::Future;
use std::pin::pin;
use std::time::Duration;

/// Raw message payloads of one open connection.
///
/// An `Err` item or the end of the stream means the connection is gone.
pub type MessageStream = LocalBoxStream<'static, Result<String>>;

/// Something that can open server-push connections.
#[async_trait(?Send)]
pub trait EventStreamSource {
    /// Open a new connection.
    async fn connect(&self) -> Result<MessageStream>;

    /// Where the connection points, for log and error messages.
    fn url(&self) -> &str;
}

/// Runtime-agnostic sleep.
pub trait Timer {
    type Sleep: Future<Output = ()>;

    fn sleep(&self, duration: Duration) -> Self::Sleep;
}

/// Exponential reconnection schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconnectPolicy {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
    /// Reconnect attempts allowed in a row without a delivered message.
    pub max_attempts: Option<u32>,
}

impl ReconnectPolicy {
    pub fn backoff(&self) -> Backoff {
        Backoff {
            policy: self.clone(),
            attempts: 0,
            next: self.initial_delay.min(self.max_delay),
        }
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::from(&ReconnectConfig::default())
    }
}

impl From<&ReconnectConfig> for ReconnectPolicy {
    fn from(config: &ReconnectConfig) -> Self {
        Self {
            initial_delay: config.initial_delay(),
            max_delay: config.max_delay(),
            multiplier: config.multiplier,
            max_attempts: config.max_attempts,
        }
    }
}

/// Running state of a [`ReconnectPolicy`].
#[derive(Debug, Clone)]
pub struct Backoff {
    policy: ReconnectPolicy,
    attempts: u32,
    next: Duration,
}

impl Backoff {
    /// Delay before the next reconnect, or `None` once the attempts are used up.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self
            .policy
            .max_attempts
            .is_some_and(|max| self.attempts >= max)
        {
            return None;
        }
        self.attempts += 1;

        let delay = self.next;
        let multiplier = if self.policy.multiplier.is_finite() && self.policy.multiplier >= 1.0 {
            self.policy.multiplier
        } else {
            1.0
        };
        self.next = Duration::try_from_secs_f64(delay.as_secs_f64() * multiplier)
            .unwrap_or(self.policy.max_delay)
            .min(self.policy.max_delay);
        Some(delay)
    }

    /// Back to the initial delay with a fresh attempt budget.
    pub fn reset(&mut self) {
        self.attempts = 0;
        self.next = self.policy.initial_delay.min(self.policy.max_delay);
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

/// Why a subscription stopped.
#[derive(Debug)]
pub enum SubscriptionEnd {
    /// The owning [`Subscription`] was cancelled or dropped.
    Cancelled,
    /// The reconnect budget ran out.
    GaveUp {
        attempts: u32,
        last_error: DashboardError,
    },
}

/// Handle to a running subscription. Cancels it when dropped.
#[derive(Debug)]
pub struct Subscription {
    cancel: CancellationToken,
}

impl Subscription {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Subscribe to `source`, calling `on_message` with every decoded record.
///
/// Returns the handle and the future that does the work; the caller decides
/// where to drive it (`spawn_local` in the browser, `join!` in the controller).
pub fn subscribe<S, T, F>(
    source: S,
    timer: T,
    policy: ReconnectPolicy,
    on_message: F,
) -> (Subscription, impl Future<Output = SubscriptionEnd>)
where
    S: EventStreamSource,
    T: Timer,
    F: FnMut(ViolationRecord),
{
    let cancel = CancellationToken::new();
    let subscription = Subscription {
        cancel: cancel.clone(),
    };
    let work = async move {
        run_subscription(&source, &timer, &policy, &cancel, on_message).await
    };
    (subscription, work)
}

/// Connect/read/backoff loop behind [`subscribe`].
///
/// Any delivered payload resets the backoff. Malformed ones are then logged and
/// skipped; they do not cost the connection.
pub async fn run_subscription<S, T, F>(
    source: &S,
    timer: &T,
    policy: &ReconnectPolicy,
    cancel: &CancellationToken,
    mut on_message: F,
) -> SubscriptionEnd
where
    S: EventStreamSource + ?Sized,
    T: Timer + ?Sized,
    F: FnMut(ViolationRecord),
{
    let mut backoff = policy.backoff();

    loop {
        let failure = match until_cancelled(cancel, source.connect()).await {
            None => return SubscriptionEnd::Cancelled,
            Some(Err(e)) => e,
            Some(Ok(mut messages)) => {
                log_info!("Event stream connected: {}", source.url());
                loop {
                    match until_cancelled(cancel, messages.next()).await {
                        None => return SubscriptionEnd::Cancelled,
                        Some(None) => break DashboardError::stream_closed("server ended the stream"),
                        Some(Some(Err(e))) => break e,
                        Some(Some(Ok(payload))) => {
                            backoff.reset();
                            match ViolationRecord::from_json(&payload, source.url()) {
                                Ok(record) => on_message(record),
                                Err(e) => log_warn!("Skipping event: {}", e),
                            }
                        }
                    }
                }
            }
        };

        let Some(delay) = backoff.next_delay() else {
            log_warn!(
                "Giving up on {} after {} attempts: {}",
                source.url(),
                backoff.attempts(),
                failure
            );
            return SubscriptionEnd::GaveUp {
                attempts: backoff.attempts(),
                last_error: failure,
            };
        };

        log_warn!("{}; reconnecting in {:?}", failure, delay);
        if until_cancelled(cancel, timer.sleep(delay)).await.is_none() {
            return SubscriptionEnd::Cancelled;
        }
    }
}

/// `None` if `cancel` fires first. Ties go to the work.
async fn until_cancelled<F: Future>(cancel: &CancellationToken, work: F) -> Option<F::Output> {
    if cancel.is_cancelled() {
        return None;
    }
    let work = pin!(work);
    let cancelled = pin!(cancel.cancelled());
    match select(work, cancelled).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(((), _)) => None,
    }
}
