use log::debug;

use super::input::Key;
use super::navigation::AssetIndex;

/// Text-entry session, alive only while the user is typing an index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSession {
    buffer: String,
}

impl SearchSession {
    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

/// Result of feeding one key to an active session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Session still open; the buffer may have changed
    Editing,
    /// Session closed by Enter. `None` when the buffer was empty or did not parse.
    Committed(Option<AssetIndex>),
    /// Session closed by Escape
    Cancelled,
}

/// Inactive / Editing(buffer) state machine for direct index entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInputController {
    session: Option<SearchSession>,
}

impl SearchInputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Current buffer, `None` while inactive
    pub fn buffer(&self) -> Option<&str> {
        self.session.as_ref().map(SearchSession::buffer)
    }

    /// Start (or restart) an edit with an empty buffer
    pub fn activate(&mut self) {
        self.session = Some(SearchSession::default());
    }

    /// Append `c` if it is a decimal digit. Returns whether the buffer changed.
    pub fn push_char(&mut self, c: char) -> bool {
        match self.session.as_mut() {
            Some(session) if c.is_ascii_digit() => {
                session.buffer.push(c);
                true
            }
            _ => false,
        }
    }

    pub fn backspace(&mut self) -> bool {
        self.session
            .as_mut()
            .is_some_and(|session| session.buffer.pop().is_some())
    }

    /// End the session and parse what was typed
    pub fn commit(&mut self) -> Option<AssetIndex> {
        let session = self.session.take()?;
        if session.buffer.is_empty() {
            return None;
        }
        match session.buffer.parse::<AssetIndex>() {
            Ok(value) => Some(value),
            Err(err) => {
                debug!("search input {:?} rejected: {}", session.buffer, err);
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            debug!("search cancelled with {:?}", session.buffer);
        }
    }

    /// Route a key to the session. Every key is swallowed while editing;
    /// `None` means no session was open and the key belongs to someone else.
    pub fn handle_key(&mut self, key: Key) -> Option<SearchOutcome> {
        if !self.is_active() {
            return None;
        }
        let outcome = match key {
            Key::Enter => SearchOutcome::Committed(self.commit()),
            Key::Escape => {
                self.cancel();
                SearchOutcome::Cancelled
            }
            Key::Backspace => {
                self.backspace();
                SearchOutcome::Editing
            }
            Key::Char(c) => {
                self.push_char(c);
                SearchOutcome::Editing
            }
            Key::Left | Key::Right | Key::Other => SearchOutcome::Editing,
        };
        Some(outcome)
    }
}
