//! Many independent conversation sessions behind one handle.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

use super::attachment::IncomingAttachment;
use super::collaborators::Collaborators;
use super::orchestrator::{ConversationSnapshot, Orchestrator, ProcessResponse};
use super::settings::OrchestratorSettings;
use crate::domain::foundation::ConversationId;
use crate::domain::intent::IntentLabel;

const TURN_FAILED: &str = "Something went wrong while processing your message. Please try again.";

/// One conversation plus the time of its last turn.
struct Session {
    orchestrator: Mutex<Orchestrator>,
    /// Milliseconds since the registry epoch.
    last_active_ms: AtomicU64,
}

impl Session {
    fn new(orchestrator: Orchestrator, now_ms: u64) -> Self {
        Self {
            orchestrator: Mutex::new(orchestrator),
            last_active_ms: AtomicU64::new(now_ms),
        }
    }

    fn touch(&self, now_ms: u64) {
        self.last_active_ms.store(now_ms, Ordering::Relaxed);
    }

    fn last_active_ms(&self) -> u64 {
        self.last_active_ms.load(Ordering::Relaxed)
    }
}

/// Maps conversation ids to sessions.
///
/// Each session sits behind its own async mutex, so turns of one
/// conversation run strictly one after another while different
/// conversations proceed concurrently. Sessions share nothing but the
/// collaborator bundle and settings.
///
/// Sessions idle longer than `session_idle_timeout` are swept whenever a
/// new session is created; `max_sessions` is a soft cap that evicts the
/// least recently active idle session first. A session with a turn in
/// flight is never evicted.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<ConversationId, Arc<Session>>>,
    collaborators: Collaborators,
    settings: OrchestratorSettings,
    epoch: Instant,
}

impl SessionRegistry {
    pub fn new(collaborators: Collaborators, settings: OrchestratorSettings) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            collaborators,
            settings,
            epoch: Instant::now(),
        }
    }

    /// Routes a message to its session, creating the session when the id
    /// is absent or unknown.
    ///
    /// Blank messages never create a session. The turn runs on its own
    /// task, so it completes and is logged even if the caller goes away.
    pub async fn process(
        &self,
        conversation_id: Option<ConversationId>,
        message: &str,
        attachment: Option<IncomingAttachment>,
    ) -> ProcessResponse {
        if message.trim().is_empty() {
            return ProcessResponse::empty_message(conversation_id.unwrap_or_default());
        }

        let (id, session) = self.get_or_create(conversation_id).await;
        let message = message.to_string();
        let epoch = self.epoch;

        let turn = tokio::spawn(async move {
            let mut orchestrator = session.orchestrator.lock().await;
            let response = orchestrator.process_message(&message, attachment).await;
            session.touch(millis_since(epoch));
            response
        });

        match turn.await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(conversation_id = %id, error = %err, "Turn aborted");
                ProcessResponse {
                    response: TURN_FAILED.to_string(),
                    agent: IntentLabel::General.agent_name().to_string(),
                    conversation_id: id,
                }
            }
        }
    }

    /// Snapshot of a known session.
    pub async fn state(&self, conversation_id: ConversationId) -> Option<ConversationSnapshot> {
        let session = self.get(conversation_id).await?;
        let orchestrator = session.orchestrator.lock().await;
        Some(orchestrator.get_state())
    }

    /// Resets a known session; returns false for unknown ids.
    pub async fn reset(&self, conversation_id: ConversationId) -> bool {
        match self.get(conversation_id).await {
            Some(session) => {
                session.orchestrator.lock().await.reset_state();
                session.touch(self.now_ms());
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn now_ms(&self) -> u64 {
        millis_since(self.epoch)
    }

    async fn get(&self, conversation_id: ConversationId) -> Option<Arc<Session>> {
        self.sessions.read().await.get(&conversation_id).cloned()
    }

    async fn get_or_create(&self, conversation_id: Option<ConversationId>) -> (ConversationId, Arc<Session>) {
        if let Some(id) = conversation_id {
            if let Some(session) = self.get(id).await {
                session.touch(self.now_ms());
                return (id, session);
            }
        }

        let id = conversation_id.unwrap_or_default();
        let now = self.now_ms();
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get(&id) {
            session.touch(now);
            return (id, Arc::clone(session));
        }

        self.evict(&mut sessions, now);

        tracing::info!(conversation_id = %id, "Session created");
        let orchestrator = Orchestrator::with_id(id, self.collaborators.clone(), self.settings);
        let session = Arc::new(Session::new(orchestrator, now));
        sessions.insert(id, Arc::clone(&session));
        (id, session)
    }

    /// Drops idle sessions, then the oldest idle ones while at the cap.
    fn evict(&self, sessions: &mut HashMap<ConversationId, Arc<Session>>, now_ms: u64) {
        let idle_ms = duration_ms(self.settings.session_idle_timeout);
        let before = sessions.len();

        sessions.retain(|_, session| {
            in_use(session) || now_ms.saturating_sub(session.last_active_ms()) < idle_ms
        });

        while sessions.len() >= self.settings.max_sessions {
            let oldest = sessions
                .iter()
                .filter(|(_, session)| !in_use(*session))
                .min_by_key(|(_, session)| session.last_active_ms())
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                }
                None => break,
            }
        }

        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining = sessions.len(), "Sessions evicted");
        }
    }
}

/// The map holds one handle; any other belongs to a turn in flight.
fn in_use(session: &Arc<Session>) -> bool {
    Arc::strong_count(session) > 1
}

fn millis_since(epoch: Instant) -> u64 {
    duration_ms(epoch.elapsed())
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
