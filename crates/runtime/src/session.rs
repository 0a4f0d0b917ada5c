//! Per-character text sessions.
//!
//! Each connected character has an unbounded channel of lines. Delivery is
//! fire-and-forget: a character without a session, or whose receiver was
//! dropped, simply misses the line.

use std::collections::HashMap;

use tokio::sync::mpsc;

use mud_core::{CharacterId, Notifier, NotifyError};

#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<CharacterId, mpsc::UnboundedSender<String>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session for `id`, replacing any previous one.
    pub fn connect(&mut self, id: CharacterId) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        if self.sessions.insert(id, tx).is_some() {
            tracing::debug!(character = %id, "replacing existing session");
        }
        rx
    }

    pub fn disconnect(&mut self, id: CharacterId) -> bool {
        self.sessions.remove(&id).is_some()
    }

    pub fn is_connected(&self, id: CharacterId) -> bool {
        self.sessions.get(&id).is_some_and(|tx| !tx.is_closed())
    }
}

impl Notifier for SessionRegistry {
    fn send_line(&self, to: CharacterId, line: &str) -> Result<(), NotifyError> {
        let Some(tx) = self.sessions.get(&to) else {
            tracing::trace!(character = %to, "no session; line dropped");
            return Err(NotifyError::NoSession(to));
        };
        tx.send(line.to_string()).map_err(|_| {
            tracing::debug!(character = %to, "session closed; line dropped");
            NotifyError::Closed(to)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_reach_connected_characters() {
        let mut sessions = SessionRegistry::new();
        let mut rx = sessions.connect(CharacterId(1));

        sessions.send_line(CharacterId(1), "hello").unwrap();
        assert_eq!(rx.try_recv().unwrap(), "hello");
        assert!(sessions.is_connected(CharacterId(1)));
    }

    #[test]
    fn missing_and_closed_sessions_report_errors() {
        let mut sessions = SessionRegistry::new();
        assert_eq!(
            sessions.send_line(CharacterId(2), "x"),
            Err(NotifyError::NoSession(CharacterId(2)))
        );

        drop(sessions.connect(CharacterId(2)));
        assert!(!sessions.is_connected(CharacterId(2)));
        assert_eq!(
            sessions.send_line(CharacterId(2), "x"),
            Err(NotifyError::Closed(CharacterId(2)))
        );

        assert!(sessions.disconnect(CharacterId(2)));
        assert!(!sessions.disconnect(CharacterId(2)));
    }
}
