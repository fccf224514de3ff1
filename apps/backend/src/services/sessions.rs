//! Lookup sessions driven over HTTP.
//!
//! Each session runs a [`LookupRetryFlow`] on its own task. When the flow
//! needs a decision, the session parks the [`ChoiceResponder`] and reports
//! `awaiting_choice`; a later `POST .../choice` request resolves it.
//!
//! Finished sessions are kept for a retention window and then evicted.
//! Removing a session that still waits for a choice drops the parked
//! responder, which ends its flow with `SurfaceClosed`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use flashforge_core::ranking::format_definitions;
use flashforge_core::{
    Choice, ChoiceRendezvous, ChoiceResponder, DictionaryLookup, FlowError, LookupOutcome,
    LookupRetryFlow, SelectionSurface,
};
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{LookupSessionResponse, LookupStatus};

struct SessionState {
    status: LookupStatus,
    responder: Option<ChoiceResponder>,
    outcome: Option<LookupOutcome>,
    finished_at: Option<Instant>,
    /// Set once the session left the registry; no further choices are parked.
    closed: bool,
}

pub struct LookupSession {
    pub id: Uuid,
    pub word: String,
    pub created_at: DateTime<Utc>,
    state: Mutex<SessionState>,
}

impl LookupSession {
    fn new(word: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            word: word.to_string(),
            created_at: Utc::now(),
            state: Mutex::new(SessionState {
                status: LookupStatus::Searching,
                responder: None,
                outcome: None,
                finished_at: None,
                closed: false,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self) -> LookupStatus {
        self.state().status.clone()
    }

    pub fn snapshot(&self) -> LookupSessionResponse {
        LookupSessionResponse {
            session_id: self.id,
            word: self.word.clone(),
            created_at: self.created_at,
            status: self.status(),
        }
    }

    /// Resolve the pending choice with the offered choice labelled `label`.
    pub fn submit_choice(&self, label: &str) -> Result<()> {
        let mut state = self.state();
        let responder = state
            .responder
            .take()
            .ok_or_else(|| ApiError::Conflict("no choice is pending".to_string()))?;

        match responder.resolve_label(label) {
            Ok(()) => {
                tracing::info!(session = %self.id, label, "choice submitted");
                state.status = LookupStatus::Searching;
                Ok(())
            }
            Err(rejected) => {
                state.responder = Some(rejected.responder);
                Err(ApiError::BadRequest(format!(
                    "choice {:?} was not offered",
                    rejected.label
                )))
            }
        }
    }

    /// The settled definitions, or the reason there are none.
    pub fn outcome(&self) -> Result<LookupOutcome> {
        let state = self.state();
        if let Some(outcome) = &state.outcome {
            return Ok(outcome.clone());
        }
        match &state.status {
            LookupStatus::Failed { error, message } => Err(match error.as_str() {
                "cancelled" => ApiError::Cancelled(message.clone()),
                "no_definitions" => ApiError::NoDefinitions(message.clone()),
                _ => ApiError::Internal(message.clone()),
            }),
            _ => Err(ApiError::Conflict("lookup is still in progress".to_string())),
        }
    }

    fn await_choice(&self, choices: &[Choice], responder: ChoiceResponder) {
        let mut state = self.state();
        if state.closed {
            return;
        }
        state.status = LookupStatus::AwaitingChoice {
            choices: choices.iter().map(Choice::label).collect(),
        };
        state.responder = Some(responder);
    }

    fn finish(&self, result: flashforge_core::Result<LookupOutcome>) {
        let mut state = self.state();
        state.responder = None;
        state.finished_at = Some(Instant::now());
        match result {
            Ok(outcome) => {
                tracing::info!(
                    session = %self.id,
                    searched = %outcome.searched_key,
                    rounds = outcome.rounds,
                    "lookup completed"
                );
                state.status = LookupStatus::Completed {
                    searched_word: outcome.searched_key.clone(),
                    definitions: outcome.definitions.clone(),
                    formatted: format_definitions(&outcome.definitions),
                    rounds: outcome.rounds,
                };
                state.outcome = Some(outcome);
            }
            Err(err) => {
                tracing::info!(session = %self.id, kind = err.kind(), "lookup failed: {}", err);
                state.status = LookupStatus::Failed {
                    error: failure_kind(&err).to_string(),
                    message: err.to_string(),
                };
            }
        }
    }

    fn close(&self) {
        let mut state = self.state();
        state.closed = true;
        state.responder = None;
    }

    fn is_expired(&self, retention: Duration, now: Instant) -> bool {
        self.state()
            .finished_at
            .map_or(false, |at| now.duration_since(at) >= retention)
    }
}

fn failure_kind(err: &FlowError) -> &'static str {
    match err {
        FlowError::UserCancelled => "cancelled",
        FlowError::NoDefinitionsFound { .. } => "no_definitions",
        _ => "internal",
    }
}

/// Selection surface backed by a session awaiting an HTTP request.
struct HttpSelectionSurface {
    session: Arc<LookupSession>,
}

impl SelectionSurface for HttpSelectionSurface {
    fn show_choices(&self, choices: &[Choice], responder: ChoiceResponder) {
        tracing::debug!(session = %self.session.id, choices = choices.len(), "awaiting choice");
        self.session.await_choice(choices, responder);
    }
}

/// Registry of running and finished lookup sessions.
pub struct LookupSessions {
    sessions: RwLock<HashMap<Uuid, Arc<LookupSession>>>,
    choice_timeout: Option<Duration>,
    /// How long a finished session stays readable.
    retention: Duration,
}

impl LookupSessions {
    pub fn new(choice_timeout: Option<Duration>, retention: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            choice_timeout,
            retention,
        }
    }

    /// Register a session and spawn its lookup flow.
    pub async fn start(
        &self,
        dictionary: Arc<dyn DictionaryLookup>,
        word: &str,
    ) -> Arc<LookupSession> {
        self.purge_expired().await;
        let session = Arc::new(LookupSession::new(word));

        let surface = Arc::new(HttpSelectionSurface {
            session: session.clone(),
        });
        let mut rendezvous = ChoiceRendezvous::new(surface);
        if let Some(timeout) = self.choice_timeout {
            rendezvous = rendezvous.with_timeout(timeout);
        }
        let flow = LookupRetryFlow::new(dictionary, rendezvous);

        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());

        let task_session = session.clone();
        tokio::spawn(async move {
            let result = flow.run(&task_session.word).await;
            task_session.finish(result);
        });

        session
    }

    pub async fn get(&self, id: Uuid) -> Result<Arc<LookupSession>> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("lookup session {}", id)))
    }

    /// Drop a session, closing its pending choice if it has one.
    pub async fn remove(&self, id: Uuid) -> Result<()> {
        let session = self
            .sessions
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| ApiError::NotFound(format!("lookup session {}", id)))?;
        session.close();
        tracing::info!(session = %id, "lookup session removed");
        Ok(())
    }

    /// Evict finished sessions older than the retention window.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(self.retention, now));
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, "purged finished lookup sessions");
        }
        evicted
    }

    /// Purge expired sessions every `period` until the registry is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>, period: Duration) {
        let sessions = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let Some(sessions) = sessions.upgrade() else {
                    break;
                };
                sessions.purge_expired().await;
            }
        });
    }
}
