use super::Message;
use crate::{Error, Result};
use serde::Serialize;

/// Ordered chat history of one session.
///
/// A user turn is staged first and only becomes part of the history when the
/// matching assistant reply is committed. Discarding a staged turn leaves the
/// history exactly as it was before the submission.
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    messages: Vec<Message>,
    pending: Option<Message>,
}

impl Transcript {
    pub fn new(greeting: &str) -> Self {
        let messages = if greeting.is_empty() {
            Vec::new()
        } else {
            vec![Message::assistant(greeting)]
        };
        Self {
            messages,
            pending: None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// User message waiting for its reply, shown optimistically by the UI.
    pub fn pending(&self) -> Option<&Message> {
        self.pending.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn stage(&mut self, session_id: &str, content: impl Into<String>) -> Result<()> {
        if self.pending.is_some() {
            return Err(Error::Busy {
                session_id: session_id.to_string(),
            });
        }
        self.pending = Some(Message::user(content));
        Ok(())
    }

    pub(crate) fn commit(&mut self, reply: impl Into<String>) -> Result<()> {
        let user = self
            .pending
            .take()
            .ok_or_else(|| Error::internal("commit called without a staged message"))?;
        self.messages.push(user);
        self.messages.push(Message::assistant(reply));
        Ok(())
    }

    pub(crate) fn discard(&mut self) -> Option<Message> {
        self.pending.take()
    }
}
