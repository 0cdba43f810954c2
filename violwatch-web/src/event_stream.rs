// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use futures::StreamExt;
use gloo_net::eventsource::futures::EventSource;
use violwatch_core::{DashboardError, EventStreamSource, MessageStream, Result};

/// Server-sent events from one URL.
///
/// Each [`connect`](EventStreamSource::connect) opens a fresh `EventSource`.
/// The first error closes it and ends the message stream, which hands
/// reconnection to the subscription's backoff instead of the browser's own
/// retry loop.
#[derive(Debug, Clone)]
pub struct ServerSentEvents {
    url: String,
}

impl ServerSentEvents {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Keeps the `EventSource` alive alongside its subscription and closes it on
/// the first error or when the stream is dropped.
struct OpenSource(Option<EventSource>);

impl OpenSource {
    fn close(&mut self) {
        if let Some(source) = self.0.take() {
            source.close();
        }
    }
}

impl Drop for OpenSource {
    fn drop(&mut self) {
        self.close();
    }
}

#[async_trait(?Send)]
impl EventStreamSource for ServerSentEvents {
    async fn connect(&self) -> Result<MessageStream> {
        let url = self.url.clone();
        let mut source = EventSource::new(&url)
            .map_err(|e| DashboardError::network(&url, format!("{e:?}")))?;
        let messages = source
            .subscribe("message")
            .map_err(|e| DashboardError::network(&url, format!("{e:?}")))?;

        let mut guard = OpenSource(Some(source));
        let stream = messages.map(move |item| match item {
            // Non-text data decodes as an empty payload and is skipped upstream.
            Ok((_, event)) => Ok(event.data().as_string().unwrap_or_default()),
            Err(e) => {
                guard.close();
                Err(DashboardError::stream_closed(format!("{url}: {e:?}")))
            }
        });
        Ok(stream.boxed_local())
    }

    fn url(&self) -> &str {
        &self.url
    }
}
