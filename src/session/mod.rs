//! Conversational surround for the extraction/merge pipeline.
//!
//! The transport and the conversational AI are external collaborators:
//! messages arrive from outside, and replies are produced by an opaque
//! [`ResponseGenerator`]. This module wires one inbound message through
//! extraction and merge, keeps a TTL-bounded conversation context per
//! user, and guarantees that neither persistence nor generation
//! failures ever abort the turn.

use crate::cache::TimedCache;
use crate::extract::{process_message, ContactCandidate};
use crate::merge::{MergeCoordinator, MessageContext};
use crate::metrics::Metrics;
use async_trait::async_trait;
use std::sync::Arc;

/// Reply offered when the response generator is unavailable; keeps the
/// conversation moving toward its goal.
const FALLBACK_REPLY: &str = "I'm having some trouble on my end right now. Could you please \
     share your email address and phone number so our team can reach out to you directly?";

/// Who said a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One remembered conversation turn.
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

/// Per-user conversation state, held in a TTL cache rather than an
/// unbounded process-wide map. Evicted wholesale once the TTL lapses.
#[derive(Debug, Clone, Default)]
pub struct ConversationContext {
    /// First name parsed from the platform display name.
    pub first_name: String,

    /// Bounded tail of recent turns.
    pub history: Vec<Turn>,
}

impl ConversationContext {
    fn for_display_name(display_name: &str) -> Self {
        let first_name = display_name
            .split_whitespace()
            .next()
            .unwrap_or("there")
            .to_string();
        Self {
            first_name,
            history: Vec::new(),
        }
    }

    fn push(&mut self, role: Role, text: &str, max_len: usize) {
        self.history.push(Turn {
            role,
            text: text.to_string(),
        });
        if self.history.len() > max_len {
            let excess = self.history.len() - max_len;
            self.history.drain(..excess);
        }
    }
}

/// Opaque text-in/text-out collaborator producing the assistant reply.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn generate(
        &self,
        context: &ConversationContext,
        message: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// A deterministic generator used when no AI backend is wired in.
/// Nudges the conversation toward sharing contact info and acknowledges
/// what was captured.
pub struct PromptResponder;

#[async_trait]
impl ResponseGenerator for PromptResponder {
    async fn generate(
        &self,
        context: &ConversationContext,
        message: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let candidate = process_message(message);
        let reply = if candidate.has_contact_info {
            format!(
                "Thanks {}, got it! Anything else I can help you with?",
                context.first_name
            )
        } else {
            format!(
                "By the way {}, what's a good email or phone number to reach you at?",
                context.first_name
            )
        };
        Ok(reply)
    }
}

/// Orchestrates one inbound message end to end.
pub struct IntakeSession {
    coordinator: Arc<MergeCoordinator>,
    responder: Arc<dyn ResponseGenerator>,
    contexts: TimedCache<String, ConversationContext>,
    metrics: Metrics,
    max_history: usize,
}

impl IntakeSession {
    pub fn new(
        coordinator: Arc<MergeCoordinator>,
        responder: Arc<dyn ResponseGenerator>,
        metrics: Metrics,
        conversation_ttl_minutes: u64,
        max_history: usize,
    ) -> Self {
        Self {
            coordinator,
            responder,
            contexts: TimedCache::new(conversation_ttl_minutes * 60),
            metrics,
            max_history,
        }
    }

    /// Handle one inbound message: extract, merge, reply.
    ///
    /// Always returns a reply; store and generator failures degrade to
    /// logged events and a fallback prompt.
    pub async fn handle_message(&self, ctx: &MessageContext, text: &str) -> String {
        let candidate = process_message(text);
        self.metrics
            .record_message(candidate.email.is_some(), candidate.phone.is_some());

        tracing::debug!(
            key = %ctx.key,
            has_contact_info = candidate.has_contact_info,
            "message scanned"
        );

        // The merge never propagates failure into the conversation.
        self.coordinator.record_candidate(ctx, &candidate).await;

        // Each turn is appended atomically; two in-flight messages for
        // the same user cannot lose each other's history across the
        // generation await below.
        let cache_key = ctx.key.to_string();
        let max_history = self.max_history;
        let context = self.contexts.update(
            cache_key.clone(),
            || ConversationContext::for_display_name(&ctx.display_name),
            |c| c.push(Role::User, text, max_history),
        );

        let reply = match self.responder.generate(&context, text).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(key = %ctx.key, error = %e, "response generation failed");
                FALLBACK_REPLY.to_string()
            }
        };

        self.contexts.update(
            cache_key,
            || ConversationContext::for_display_name(&ctx.display_name),
            |c| c.push(Role::Assistant, &reply, max_history),
        );
        self.contexts.purge_expired();

        reply
    }

    /// Peek at the candidate a message would produce, without merging.
    pub fn preview(&self, text: &str) -> ContactCandidate {
        process_message(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProfileKey;
    use crate::store::{MemoryStore, ProfileStore};

    fn session_with_store() -> (IntakeSession, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let metrics = Metrics::new();
        let coordinator = Arc::new(MergeCoordinator::new(
            store.clone(),
            metrics.clone(),
            3,
        ));
        let session = IntakeSession::new(
            coordinator,
            Arc::new(PromptResponder),
            metrics,
            30,
            10,
        );
        (session, store)
    }

    fn ctx() -> MessageContext {
        MessageContext {
            key: ProfileKey::new("T1", "U1").unwrap(),
            display_name: "Ada Lovelace".to_string(),
            channel: "C1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_message_with_email_is_persisted_and_answered() {
        let (session, store) = session_with_store();

        let reply = session
            .handle_message(&ctx(), "sure, it's ada@example.com")
            .await;
        assert!(reply.contains("Ada"));

        let profile = store.fetch(&ctx().key).await.unwrap().unwrap();
        assert_eq!(profile.email.as_deref(), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn test_chatter_gets_contact_prompt() {
        let (session, store) = session_with_store();

        let reply = session.handle_message(&ctx(), "hello!").await;
        assert!(reply.contains("email or phone"));
        assert!(store.fetch(&ctx().key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_history_accumulates_across_messages() {
        let (session, _store) = session_with_store();

        session.handle_message(&ctx(), "hello!").await;
        session.handle_message(&ctx(), "it's ada@example.com").await;

        let context = session.contexts.get(&ctx().key.to_string()).unwrap();
        assert_eq!(context.history.len(), 4);
        assert_eq!(context.history[0].text, "hello!");
        assert_eq!(context.history[0].role, Role::User);
        assert_eq!(context.history[2].text, "it's ada@example.com");
        assert_eq!(context.history[3].role, Role::Assistant);
    }

    #[tokio::test]
    async fn test_history_is_bounded() {
        let mut context = ConversationContext::for_display_name("Ada Lovelace");
        for i in 0..20 {
            context.push(Role::User, &format!("message {}", i), 4);
        }
        assert_eq!(context.history.len(), 4);
        assert_eq!(context.history.last().unwrap().text, "message 19");
    }

    #[tokio::test]
    async fn test_first_name_fallback() {
        let context = ConversationContext::for_display_name("");
        assert_eq!(context.first_name, "there");
    }

    struct FailingResponder;

    #[async_trait]
    impl ResponseGenerator for FailingResponder {
        async fn generate(
            &self,
            _context: &ConversationContext,
            _message: &str,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            Err("backend offline".into())
        }
    }

    #[tokio::test]
    async fn test_generation_failure_falls_back() {
        let store = Arc::new(MemoryStore::default());
        let metrics = Metrics::new();
        let coordinator = Arc::new(MergeCoordinator::new(store.clone(), metrics.clone(), 3));
        let session = IntakeSession::new(
            coordinator,
            Arc::new(FailingResponder),
            metrics,
            30,
            10,
        );

        let reply = session
            .handle_message(&ctx(), "it's ada@example.com")
            .await;
        assert!(reply.contains("email address and phone number"));

        // The merge still happened despite the generator failing.
        let profile = store.fetch(&ctx().key).await.unwrap().unwrap();
        assert_eq!(profile.email.as_deref(), Some("ada@example.com"));
    }
}
