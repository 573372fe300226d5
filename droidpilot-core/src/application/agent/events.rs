use tokio::sync::mpsc;

/// Notification produced by a session, in phase order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Status(String),
    ToolResult(String),
    Error(String),
    Completed(String),
}

impl SessionEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Error(_) | Self::Completed(_))
    }
}

/// Callback-style consumer for [`super::SessionHandle::drive`].
pub trait SessionObserver {
    fn on_status(&mut self, text: &str);
    fn on_tool_result(&mut self, text: &str);
    fn on_error(&mut self, text: &str);
    fn on_completed(&mut self, message: &str);

    fn dispatch(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Status(text) => self.on_status(text),
            SessionEvent::ToolResult(text) => self.on_tool_result(text),
            SessionEvent::Error(text) => self.on_error(text),
            SessionEvent::Completed(message) => self.on_completed(message),
        }
    }
}

/// Sending half of a session's event channel.
///
/// The terminal methods take `self`, so a session can emit at most one of them.
pub(crate) struct EventSink {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl EventSink {
    pub(crate) fn channel() -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub(crate) fn status(&self, text: impl Into<String>) {
        self.send(SessionEvent::Status(text.into()));
    }

    pub(crate) fn tool_result(&self, text: impl Into<String>) {
        self.send(SessionEvent::ToolResult(text.into()));
    }

    pub(crate) fn complete(self, message: impl Into<String>) {
        self.send(SessionEvent::Completed(message.into()));
    }

    pub(crate) fn fail(self, text: impl Into<String>) {
        self.send(SessionEvent::Error(text.into()));
    }

    fn send(&self, event: SessionEvent) {
        // The receiver may already be gone; the session still runs to its end.
        let _ = self.tx.send(event);
    }
}
