//! Error Notifications
//!
//! Controllers report failures through an injected `Callback<String>`.
//! Presentation is up to the caller; [`ToastQueue`] keeps the pending
//! messages as observable state.

use leptos::prelude::*;

/// Report-error capability handed to the controllers
pub type ErrorReporter = Callback<String>;

/// Reporter that only writes to the log
pub fn log_reporter() -> ErrorReporter {
    Callback::new(|message: String| {
        log::warn!("[Toast] {}", message);
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub message: String,
}

/// Observable queue of one-shot error notifications
#[derive(Clone, Copy)]
pub struct ToastQueue {
    toasts: ReadSignal<Vec<Toast>>,
    set_toasts: WriteSignal<Vec<Toast>>,
    next_id: RwSignal<u32>,
}

impl ToastQueue {
    pub fn new() -> Self {
        let (toasts, set_toasts) = signal(Vec::new());
        Self {
            toasts,
            set_toasts,
            next_id: RwSignal::new(1),
        }
    }

    /// Pending toasts, oldest first
    pub fn toasts(&self) -> ReadSignal<Vec<Toast>> {
        self.toasts
    }

    pub fn push(&self, message: String) -> u32 {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.set_toasts.write().push(Toast { id, message });
        id
    }

    pub fn dismiss(&self, id: u32) {
        self.set_toasts.write().retain(|toast| toast.id != id);
    }

    /// A reporter feeding this queue
    pub fn reporter(&self) -> ErrorReporter {
        let queue = *self;
        Callback::new(move |message: String| {
            log::warn!("[Toast] {}", message);
            queue.push(message);
        })
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}
