//! Toast notifications.
//!
//! `ToastService` is provided once in `App`; pages call `notify_error` with
//! the `Err` text of a failed request and `notify_success` after a mutation.
//! Every toast disappears after [`TOAST_TIMEOUT_MS`].

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub const TOAST_TIMEOUT_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast--success",
            ToastKind::Error => "toast toast--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ToastEntry {
    id: u64,
    kind: ToastKind,
    text: String,
}

#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<Vec<ToastEntry>>,
    next_id: RwSignal<u64>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
        }
    }

    pub fn notify_success(&self, text: impl Into<String>) {
        self.push(ToastKind::Success, text.into());
    }

    pub fn notify_error(&self, text: impl Into<String>) {
        let text = text.into();
        log::warn!("error toast: {}", text);
        self.push(ToastKind::Error, text);
    }

    /// Ok → success toast with `ok_text`, Err → error toast with the message.
    pub fn report<T>(&self, result: &Result<T, String>, ok_text: &str) {
        match result {
            Ok(_) => self.notify_success(ok_text),
            Err(e) => self.notify_error(e.clone()),
        }
    }

    fn push(&self, kind: ToastKind, text: String) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.toasts.update(|t| t.push(ToastEntry { id, kind, text }));

        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_TIMEOUT_MS).await;
            svc.dismiss(id);
        });
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|t| t.retain(|entry| entry.id != id));
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toast() -> ToastService {
    use_context::<ToastService>().expect("ToastService not found in component tree")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let svc = use_toast();

    view! {
        <div class="toast-host">
            <For
                each=move || svc.toasts.get()
                key=|entry| entry.id
                children=move |entry: ToastEntry| {
                    let id = entry.id;
                    view! {
                        <div class=entry.kind.class() role="status">
                            <span class="toast__text">{entry.text}</span>
                            <button class="toast__close" on:click=move |_| svc.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
