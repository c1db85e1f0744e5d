// src/transcript.rs

use crate::models::Message;
use tokio::sync::watch;

/// Read-only view of the conversation handed to presentation code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    messages: Vec<Message>,
    busy: bool,
}

impl Snapshot {
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// True while an exchange is waiting on the answering service.
    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Ordered, append-only record of the conversation plus the busy flag.
///
/// Every mutation is published through a watch channel before the mutator
/// returns, so a snapshot taken right after `append` already contains the new
/// message and subscribers are woken without polling. Mutators are
/// crate-private: only the exchange controller writes here.
#[derive(Debug)]
pub struct Transcript {
    state: watch::Sender<Snapshot>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        let (state, _) = watch::channel(Snapshot::default());
        Self { state }
    }

    /// Copies out the current messages and busy flag.
    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    /// Returns a receiver that is marked changed after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.state.borrow().busy
    }

    pub(crate) fn append(&self, message: Message) {
        self.state.send_modify(|snapshot| snapshot.messages.push(message));
    }

    pub(crate) fn set_busy(&self, busy: bool) {
        self.state.send_if_modified(|snapshot| {
            let changed = snapshot.busy != busy;
            snapshot.busy = busy;
            changed
        });
    }

    /// Appends `message` and raises the busy flag in one step, unless the
    /// flag is already up. Returns whether the exchange was started.
    pub(crate) fn try_begin(&self, message: Message) -> bool {
        self.state.send_if_modified(|snapshot| {
            if snapshot.busy {
                return false;
            }
            snapshot.messages.push(message);
            snapshot.busy = true;
            true
        })
    }
}
