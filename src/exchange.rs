//! The exchange controller: turns user intents into at most one in-flight
//! query and folds the answer back into the transcript.

use crate::{
    api::{AskService, ExchangeFailure, FailureKind},
    constants::{catalog_query, FALLBACK_REPLY},
    models::Message,
    transcript::{Snapshot, Transcript},
};
use futures::FutureExt;
use log::{debug, info, warn};
use std::{
    future::Future,
    panic::AssertUnwindSafe,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use thiserror::Error;
use tokio::{sync::watch, task::JoinHandle};

/// Why a submission was ignored. Neither case changes the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("input is empty after trimming")]
    EmptyInput,
    #[error("an exchange is already awaiting a response")]
    Busy,
}

/// How an accepted exchange ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    Answered(String),
    Failed(FailureKind),
}

impl ExchangeOutcome {
    /// The text appended to the transcript for this outcome.
    pub fn reply_text(&self) -> &str {
        match self {
            Self::Answered(text) => text.as_str(),
            Self::Failed(_) => FALLBACK_REPLY,
        }
    }
}

/// Handle to a running exchange; resolves to its outcome.
///
/// Exchanges cannot be cancelled through this handle, and dropping it leaves
/// the request running.
#[derive(Debug)]
pub struct Exchange {
    handle: JoinHandle<ExchangeOutcome>,
}

impl Future for Exchange {
    type Output = ExchangeOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<ExchangeOutcome> {
        Pin::new(&mut self.handle).poll(cx).map(|joined| match joined {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => ExchangeOutcome::Failed(FailureKind::Panicked),
            Err(_) => ExchangeOutcome::Failed(FailureKind::Interrupted),
        })
    }
}

/// Owns the in-flight half of an exchange: appends exactly one bot reply and
/// lowers the busy flag, however the exchange task ends.
struct ReplyGuard {
    transcript: Arc<Transcript>,
    replied: bool,
}

impl ReplyGuard {
    fn new(transcript: Arc<Transcript>) -> Self {
        Self {
            transcript,
            replied: false,
        }
    }

    fn reply(mut self, text: &str) {
        self.transcript.append(Message::bot(text));
        self.replied = true;
    }
}

impl Drop for ReplyGuard {
    fn drop(&mut self) {
        if !self.replied {
            warn!("Exchange ended without a reply, appending fallback");
            self.transcript.append(Message::bot(FALLBACK_REPLY));
        }
        self.transcript.set_busy(false);
    }
}

#[derive(Clone)]
pub struct ExchangeController {
    transcript: Arc<Transcript>,
    service: Arc<dyn AskService>,
}

impl ExchangeController {
    pub fn new(service: Arc<dyn AskService>) -> Self {
        Self {
            transcript: Arc::new(Transcript::new()),
            service,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.transcript.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.transcript.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.transcript.is_busy()
    }

    /// Sends typed text to the answering service.
    ///
    /// The user message is in the transcript by the time this returns; the
    /// bot reply follows when the returned exchange settles. Must be called
    /// from within a Tokio runtime.
    pub fn submit(&self, raw_input: &str) -> Result<Exchange, Rejection> {
        let query = raw_input.trim();
        if query.is_empty() {
            debug!("Ignoring empty submission");
            return Err(Rejection::EmptyInput);
        }
        self.dispatch(query.to_string())
    }

    /// Asks about a catalog film using the canned query template.
    pub fn select_catalog_entry(&self, title: &str) -> Result<Exchange, Rejection> {
        self.dispatch(catalog_query(title))
    }

    fn dispatch(&self, query: String) -> Result<Exchange, Rejection> {
        if !self.transcript.try_begin(Message::user(query.clone())) {
            debug!("Ignoring submission while an exchange is in flight");
            return Err(Rejection::Busy);
        }

        let guard = ReplyGuard::new(Arc::clone(&self.transcript));
        let service = Arc::clone(&self.service);

        let handle = tokio::spawn(async move {
            let outcome = run_exchange(service.as_ref(), &query).await;
            guard.reply(outcome.reply_text());
            outcome
        });
        Ok(Exchange { handle })
    }
}

async fn run_exchange(service: &dyn AskService, query: &str) -> ExchangeOutcome {
    let result = AssertUnwindSafe(service.ask(query))
        .catch_unwind()
        .await
        .unwrap_or_else(|_| Err(ExchangeFailure::panicked("Answer service panicked")));

    match result {
        Ok(text) => {
            info!("Exchange answered ({} chars)", text.chars().count());
            ExchangeOutcome::Answered(text)
        }
        Err(failure) => {
            warn!("Exchange failed ({:?}): {}", failure.kind, failure);
            ExchangeOutcome::Failed(failure.kind)
        }
    }
}
