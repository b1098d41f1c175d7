use super::Transcript;
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// In-memory transcripts keyed by session id. Nothing is written to disk;
/// a session lives as long as the process.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, Transcript>>>,
    greeting: String,
}

/// User turn waiting for its reply. Dropping it without [`StagedTurn::commit`]
/// discards the turn, and removes the session again if staging created it.
#[derive(Debug)]
#[must_use = "dropping a staged turn discards it"]
pub struct StagedTurn {
    store: SessionStore,
    session_id: String,
    created: bool,
    committed: bool,
}

impl StagedTurn {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Appends the staged user message and the reply to the transcript.
    pub fn commit(mut self, reply: impl Into<String>) -> Result<Transcript> {
        let transcript = self.store.commit(&self.session_id, reply)?;
        self.committed = true;
        Ok(transcript)
    }
}

impl Drop for StagedTurn {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Err(e) = self.store.release(&self.session_id, self.created) {
            warn!(
                "Could not discard staged message for session {}: {}",
                self.session_id, e
            );
        }
    }
}

impl SessionStore {
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            greeting: greeting.into(),
        }
    }

    fn sessions(&self) -> Result<MutexGuard<'_, HashMap<String, Transcript>>> {
        self.sessions
            .lock()
            .map_err(|e| Error::internal(format!("Mutex lock failed: {e}")))
    }

    pub fn create(&self) -> Result<(String, Transcript)> {
        let session_id = Uuid::new_v4().to_string();
        let transcript = Transcript::new(&self.greeting);
        self.sessions()?
            .insert(session_id.clone(), transcript.clone());
        info!("Created session {}", session_id);
        Ok((session_id, transcript))
    }

    pub fn get(&self, session_id: &str) -> Result<Transcript> {
        self.sessions()?
            .get(session_id)
            .cloned()
            .ok_or_else(|| Error::SessionNotFound {
                session_id: session_id.to_string(),
            })
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.sessions()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.sessions()?.is_empty())
    }

    /// Stages a user message, creating the session on first use. The session
    /// only outlives the returned turn if the turn is committed or the session
    /// existed before.
    pub fn stage(&self, session_id: &str, content: impl Into<String>) -> Result<StagedTurn> {
        let mut sessions = self.sessions()?;
        let created = !sessions.contains_key(session_id);
        let transcript = sessions.entry(session_id.to_string()).or_insert_with(|| {
            debug!("Session {} not seen before, starting a new transcript", session_id);
            Transcript::new(&self.greeting)
        });
        transcript.stage(session_id, content)?;

        Ok(StagedTurn {
            store: self.clone(),
            session_id: session_id.to_string(),
            created,
            committed: false,
        })
    }

    fn commit(&self, session_id: &str, reply: impl Into<String>) -> Result<Transcript> {
        let mut sessions = self.sessions()?;
        let transcript = sessions
            .get_mut(session_id)
            .ok_or_else(|| Error::SessionNotFound {
                session_id: session_id.to_string(),
            })?;
        transcript.commit(reply)?;
        Ok(transcript.clone())
    }

    fn release(&self, session_id: &str, created: bool) -> Result<()> {
        let mut sessions = self.sessions()?;
        if created {
            // Nothing else can have been committed while the turn was pending
            if sessions.remove(session_id).is_some() {
                debug!("Dropped session {} after its first turn was discarded", session_id);
            }
        } else if let Some(transcript) = sessions.get_mut(session_id)
            && transcript.discard().is_some()
        {
            debug!("Discarded staged message for session {}", session_id);
        }
        Ok(())
    }
}
