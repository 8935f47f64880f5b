//! Orchestrator - the single entry point of a conversation session.
//!
//! One inbound message flows through:
//!
//! 1. capture of the recent context (before the message is logged),
//! 2. attachment validation and logging of the user message,
//! 3. confirmation tokens, resolved against the pending action,
//! 4. otherwise intent routing and the matching action handler,
//! 5. staging of any returned action and logging of the reply.
//!
//! Failures never escape: every path ends in a reply string plus the name
//! of the agent that produced it.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::actions::{HandlerError, HandlerOutcome, HandlerRequest, HandlerSet};
use super::attachment::IncomingAttachment;
use super::collaborators::Collaborators;
use super::confirmation::ConfirmationController;
use super::intent_router::IntentRouter;
use super::settings::OrchestratorSettings;
use crate::domain::action::{ConfirmationToken, PendingAction, PendingActionRegistry, RegistryError};
use crate::domain::conversation::{ConversationState, ConversationStore, Message};
use crate::domain::foundation::ConversationId;
use crate::domain::intent::IntentLabel;

/// Agent reported for confirmation replies.
pub const CONFIRMATION_AGENT: &str = "confirmation";
/// Agent reported for rejected attachments.
pub const ATTACHMENT_AGENT: &str = "attachment";
/// Context key holding the name of the last accepted attachment.
pub const LAST_ATTACHMENT_KEY: &str = "last_attachment";

const EMPTY_MESSAGE: &str = "Please enter a message.";
const ATTACHMENT_ON_CONFIRMATION: &str = "Files can't be attached to a confirmation reply. \
Reply 'yes' or 'no' without a file, or cancel and send the file with a new request.";

/// Reply to one inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub response: String,
    pub agent: String,
    pub conversation_id: ConversationId,
}

impl ProcessResponse {
    /// Reply to a blank message; nothing is logged for it.
    pub(crate) fn empty_message(conversation_id: ConversationId) -> Self {
        Self {
            response: EMPTY_MESSAGE.to_string(),
            agent: IntentLabel::General.agent_name().to_string(),
            conversation_id,
        }
    }
}

/// Administrative view of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSnapshot {
    pub conversation_id: ConversationId,
    #[serde(flatten)]
    pub state: ConversationState,
    pub pending_action: Option<PendingAction>,
}

/// Façade over the store, registry, router, handlers and confirmation.
pub struct Orchestrator {
    conversation_id: ConversationId,
    store: ConversationStore,
    registry: PendingActionRegistry,
    router: IntentRouter,
    confirmation: ConfirmationController,
    handlers: HandlerSet,
    settings: OrchestratorSettings,
}

impl Orchestrator {
    pub fn new(collaborators: Collaborators, settings: OrchestratorSettings) -> Self {
        Self::with_id(ConversationId::new(), collaborators, settings)
    }

    pub fn with_id(
        conversation_id: ConversationId,
        collaborators: Collaborators,
        settings: OrchestratorSettings,
    ) -> Self {
        let timeout = settings.collaborator_timeout;
        Self {
            conversation_id,
            store: ConversationStore::new(),
            registry: PendingActionRegistry::new(),
            router: IntentRouter::new(collaborators.classifier.clone(), timeout),
            confirmation: ConfirmationController::new(&collaborators, timeout),
            handlers: HandlerSet::new(&collaborators, &settings),
            settings,
        }
    }

    pub fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }

    pub fn pending_action(&self) -> Option<&PendingAction> {
        self.registry.peek()
    }

    /// Processes one inbound message and returns the reply.
    pub async fn process_message(
        &mut self,
        message: &str,
        attachment: Option<IncomingAttachment>,
    ) -> ProcessResponse {
        let message = message.trim();
        if message.is_empty() {
            return ProcessResponse::empty_message(self.conversation_id);
        }

        let context = self.store.recent_context(self.settings.context_window).to_string();

        let mut user_message = Message::user(message);
        let staged_attachment = match attachment {
            None => None,
            Some(file) => match file.validate(self.settings.max_attachment_bytes) {
                Ok(staged) => {
                    user_message = user_message.with_metadata(
                        "attachment",
                        json!({ "filename": staged.filename, "size_bytes": staged.size_bytes }),
                    );
                    Some(staged)
                }
                Err(err) => {
                    tracing::info!(conversation_id = %self.conversation_id, error = %err, "Attachment rejected");
                    self.store.append(user_message);
                    return self.reply(err.to_string(), ATTACHMENT_AGENT, None);
                }
            },
        };
        self.store.append(user_message);

        if let Some(token) = ConfirmationToken::parse(message) {
            if staged_attachment.is_some() {
                tracing::info!(conversation_id = %self.conversation_id, ?token, "Attachment sent with confirmation reply");
                return self.reply(ATTACHMENT_ON_CONFIRMATION.to_string(), ATTACHMENT_AGENT, None);
            }
            let response = self.confirmation.resolve(token, &mut self.registry).await;
            tracing::info!(conversation_id = %self.conversation_id, ?token, "Confirmation resolved");
            return self.reply(response, CONFIRMATION_AGENT, None);
        }

        let route = self.router.classify(message, &context).await;
        tracing::info!(
            conversation_id = %self.conversation_id,
            intent = %route.label,
            source = ?route.source,
            "Message routed"
        );
        self.store.set_current_intent(route.label);
        if let Some(staged) = &staged_attachment {
            self.store.set_context(LAST_ATTACHMENT_KEY, staged.filename.clone());
        }

        let request = HandlerRequest::new(message, &context)
            .with_attachment(staged_attachment.as_ref())
            .with_pending(self.registry.peek().map(PendingAction::kind));

        let result = self.handlers.for_intent(route.label).handle(request).await;
        let response = match result {
            Ok(HandlerOutcome {
                response,
                staged: Some(action),
            }) => self.stage(action, response),
            Ok(outcome) => outcome.response,
            Err(err) => {
                if err.is_user_error() {
                    tracing::info!(conversation_id = %self.conversation_id, code = %err.code(), "Request rejected");
                } else {
                    tracing::warn!(conversation_id = %self.conversation_id, code = %err.code(), error = %err, "Handler failed");
                }
                err.to_string()
            }
        };

        self.reply(response, route.label.agent_name(), Some(route.label))
    }

    /// Snapshot of the conversation and its pending action.
    pub fn get_state(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            conversation_id: self.conversation_id,
            state: self.store.snapshot(),
            pending_action: self.registry.peek().cloned(),
        }
    }

    /// Clears the log and the pending action; the conversation id is kept.
    pub fn reset_state(&mut self) {
        tracing::info!(conversation_id = %self.conversation_id, "Conversation reset");
        self.store.clear();
        self.registry.clear();
    }

    fn stage(&mut self, action: PendingAction, summary: String) -> String {
        let kind = action.kind();
        let course = action.course_name().to_string();
        match self.registry.stage(action) {
            Ok(()) => {
                tracing::info!(conversation_id = %self.conversation_id, %kind, course, "Action staged");
                summary
            }
            Err(RegistryError::AlreadyPending { pending }) => {
                HandlerError::AlreadyPending { pending }.to_string()
            }
            Err(err @ RegistryError::Transition(_)) => {
                tracing::warn!(conversation_id = %self.conversation_id, %kind, error = %err, "Action not staged");
                err.to_string()
            }
        }
    }

    fn reply(&mut self, response: String, agent: &str, intent: Option<IntentLabel>) -> ProcessResponse {
        let mut message = Message::assistant(response.clone()).with_metadata("agent", agent);
        if let Some(intent) = intent {
            message = message.with_metadata("intent", intent.as_str());
        }
        self.store.append(message);
        self.response(response, agent)
    }

    fn response(&self, response: String, agent: &str) -> ProcessResponse {
        ProcessResponse {
            response,
            agent: agent.to_string(),
            conversation_id: self.conversation_id,
        }
    }
}
