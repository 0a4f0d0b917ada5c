use crate::error::{ErrorSeverity, GameError};
use crate::state::CharacterId;

/// Reasons a line could not be delivered.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NotifyError {
    #[error("{0} has no active session")]
    NoSession(CharacterId),

    #[error("session for {0} is closed")]
    Closed(CharacterId),
}

impl GameError for NotifyError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoSession(_) => "NOTIFY_NO_SESSION",
            Self::Closed(_) => "NOTIFY_CLOSED",
        }
    }
}

/// Per-participant text channel.
///
/// Delivery is fire-and-forget. Callers inside the rules go through
/// [`send`] and [`send_room`], which drop delivery errors.
pub trait Notifier {
    fn send_line(&self, to: CharacterId, line: &str) -> Result<(), NotifyError>;
}

/// Delivers `line` to `to`, ignoring delivery failures.
pub fn send<N>(notifier: &N, to: CharacterId, line: &str)
where
    N: Notifier + ?Sized,
{
    let _ = notifier.send_line(to, line);
}

/// Delivers `line` to every id in `occupants` not listed in `except`.
pub fn send_room<N>(notifier: &N, occupants: &[CharacterId], except: &[CharacterId], line: &str)
where
    N: Notifier + ?Sized,
{
    for &who in occupants.iter().filter(|id| !except.contains(id)) {
        send(notifier, who, line);
    }
}
