// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use violwatch_core::{
    CancellationToken, DashboardError, EventStreamSource, MessageStream, Result,
    ViolationRecord,
};

/// One item delivered on a scripted connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedEvent {
    /// Raw payload, delivered as-is (may be invalid JSON)
    Payload(String),
    /// Transport error; the connection is lost after it
    Error(String),
}

impl ScriptedEvent {
    pub fn record(record: &ViolationRecord) -> Self {
        Self::Payload(format!(
            r#"{{"file":"{}","ts":"{}"}}"#,
            record.file, record.ts
        ))
    }
}

/// What the next `connect` call does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedConnection {
    /// `connect` fails
    Refused(String),
    /// `connect` succeeds, delivers the events, then the server closes
    Deliver(Vec<ScriptedEvent>),
    /// `connect` succeeds, delivers the events, then stays open forever
    DeliverAndHold(Vec<ScriptedEvent>),
}

#[derive(Default)]
struct SourceState {
    script: RefCell<VecDeque<ScriptedConnection>>,
    connects: Cell<u32>,
    cancel_when_exhausted: RefCell<Option<CancellationToken>>,
}

/// [`EventStreamSource`] that replays a fixed list of connections.
///
/// Once the script runs out, every further `connect` is refused. If a token was
/// registered with [`cancel_when_exhausted`](Self::cancel_when_exhausted) it is
/// cancelled at that point, which lets a test end an unbounded subscription.
#[derive(Clone)]
pub struct ScriptedSource {
    url: String,
    state: Rc<SourceState>,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = ScriptedConnection>) -> Self {
        let source = Self {
            url: "/viol_stream".to_string(),
            state: Rc::default(),
        };
        source.state.script.borrow_mut().extend(script);
        source
    }

    /// A single connection that delivers `records` and then closes.
    pub fn delivering(records: &[ViolationRecord]) -> Self {
        Self::new([ScriptedConnection::Deliver(
            records.iter().map(ScriptedEvent::record).collect(),
        )])
    }

    pub fn cancel_when_exhausted(&self, token: CancellationToken) -> &Self {
        *self.state.cancel_when_exhausted.borrow_mut() = Some(token);
        self
    }

    /// Number of `connect` calls so far.
    pub fn connects(&self) -> u32 {
        self.state.connects.get()
    }

    fn events(events: Vec<ScriptedEvent>) -> impl futures::Stream<Item = Result<String>> {
        stream::iter(events.into_iter().map(|event| match event {
            ScriptedEvent::Payload(payload) => Ok(payload),
            ScriptedEvent::Error(reason) => Err(DashboardError::stream_closed(reason)),
        }))
    }
}

#[async_trait(?Send)]
impl EventStreamSource for ScriptedSource {
    async fn connect(&self) -> Result<MessageStream> {
        self.state.connects.set(self.state.connects.get() + 1);
        let next = self.state.script.borrow_mut().pop_front();
        match next {
            Some(ScriptedConnection::Refused(reason)) => {
                Err(DashboardError::network(&self.url, reason))
            }
            Some(ScriptedConnection::Deliver(events)) => Ok(Self::events(events).boxed_local()),
            Some(ScriptedConnection::DeliverAndHold(events)) => Ok(Self::events(events)
                .chain(stream::pending())
                .boxed_local()),
            None => {
                if let Some(token) = self.state.cancel_when_exhausted.borrow().as_ref() {
                    token.cancel();
                }
                Err(DashboardError::network(&self.url, "script exhausted"))
            }
        }
    }

    fn url(&self) -> &str {
        &self.url
    }
}
