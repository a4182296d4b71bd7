//! Confirmation prompts as a one-shot rendezvous.
//!
//! [`Confirmer::confirm`] records a prompt and hands back a future; whatever
//! presents the prompt reads [`Confirmer::pending`] and answers with
//! [`Confirmer::respond`]. The future resolves with the answer. Nothing here
//! knows about widgets.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

/// Visual weight of a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmKind {
    #[default]
    Warning,
    Info,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmOptions {
    pub title: String,
    pub confirm_text: String,
    pub cancel_text: String,
    pub kind: ConfirmKind,
}

impl Default for ConfirmOptions {
    fn default() -> Self {
        Self {
            title: "Confirm".to_string(),
            confirm_text: "OK".to_string(),
            cancel_text: "Cancel".to_string(),
            kind: ConfirmKind::Warning,
        }
    }
}

impl ConfirmOptions {
    pub fn danger() -> Self {
        Self {
            kind: ConfirmKind::Danger,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = text.into();
        self
    }

    pub fn with_cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = text.into();
        self
    }
}

/// What the presenter shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub message: String,
    pub options: ConfirmOptions,
}

struct Pending {
    prompt: ConfirmPrompt,
    reply: oneshot::Sender<bool>,
}

/// Answer to a prompt opened with [`Confirmer::confirm`].
///
/// Resolves to `false` if the prompt is superseded or its confirmer dropped.
#[derive(Debug)]
pub struct ConfirmReply {
    rx: oneshot::Receiver<bool>,
}

impl Future for ConfirmReply {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        Pin::new(&mut self.rx).poll(cx).map(|r| r.unwrap_or(false))
    }
}

/// Owner of at most one open prompt.
#[derive(Default)]
pub struct Confirmer {
    pending: Mutex<Option<Pending>>,
}

impl std::fmt::Debug for Confirmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Confirmer")
            .field("pending", &self.pending())
            .finish()
    }
}

impl Confirmer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a prompt and wait for the answer.
    ///
    /// An earlier prompt still open is superseded and resolves to `false`.
    pub fn confirm(&self, message: impl Into<String>, options: ConfirmOptions) -> ConfirmReply {
        let (tx, rx) = oneshot::channel();
        let prompt = ConfirmPrompt {
            message: message.into(),
            options,
        };
        let previous = self.lock().replace(Pending { prompt, reply: tx });
        if let Some(previous) = previous {
            tracing::debug!("Superseding open prompt {:?}", previous.prompt.message);
            let _ = previous.reply.send(false);
        }
        ConfirmReply { rx }
    }

    /// The prompt currently waiting for an answer.
    pub fn pending(&self) -> Option<ConfirmPrompt> {
        self.lock().as_ref().map(|p| p.prompt.clone())
    }

    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    /// Answer the open prompt. Returns `false` when nothing was open.
    pub fn respond(&self, accepted: bool) -> bool {
        match self.lock().take() {
            Some(pending) => {
                // The waiter may have given up; that is fine.
                let _ = pending.reply.send(accepted);
                true
            }
            None => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Pending>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }
}
