use std::time::Duration;

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Transient notifications; each one removes itself after `duration`.
#[derive(Clone, Copy)]
pub struct ToastContext {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
    duration: Duration,
}

impl ToastContext {
    pub fn new(duration: Duration) -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
            duration,
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&self, kind: ToastKind, message: String) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.toasts.update(|t| t.push(Toast { id, kind, message }));

        let toasts = self.toasts;
        set_timeout(
            move || toasts.update(|t| t.retain(|toast| toast.id != id)),
            self.duration,
        );
    }

    fn dismiss(&self, id: u64) {
        self.toasts.update(|t| t.retain(|toast| toast.id != id));
    }
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = expect_context::<ToastContext>();

    view! {
        <div class="toast-container">
            {move || {
                ctx.toasts
                    .get()
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        let class = match toast.kind {
                            ToastKind::Success => "toast toast-success",
                            ToastKind::Error => "toast toast-error",
                        };
                        view! {
                            <div class=class on:click=move |_| ctx.dismiss(id)>
                                {toast.message}
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
