//! Chat session lifecycle management.
//!
//! `ChatSessionController` owns all mutable session state and is the only
//! component that touches the stores or the gateway. The presentation
//! layer reads state snapshots and dispatches intents; it never mutates
//! the log directly.

use super::gateway::{BackendGateway, ImageAttachment, IMAGE_ANALYSIS_AGENT};
use super::message::Message;
use super::state::ChatState;
use super::store::{ConversationStore, SessionStore};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Banner shown when a text turn fails, regardless of the failure kind.
pub const SEND_FAILED_BANNER: &str = "Failed to send message. Please try again.";
/// Banner shown when an image turn fails.
pub const IMAGE_FAILED_BANNER: &str = "Failed to process image. Please try again.";
/// Synthetic assistant reply appended when a text turn fails.
pub const SEND_FAILED_REPLY: &str =
    "Sorry, there was an error processing your message. Please try again.";
/// Synthetic assistant reply appended when an image turn fails.
pub const IMAGE_FAILED_REPLY: &str =
    "Sorry, there was an error processing your image. Please try again.";
/// Placeholder text for a user message that carries only an image.
const IMAGE_ONLY_TEXT: &str = "Image uploaded";

/// Drives one conversation's request/response cycles.
///
/// `ChatSessionController` is responsible for:
/// - Restoring session identity and history on startup
/// - Optimistically echoing the user's own messages
/// - Brokering turns through the [`BackendGateway`]
/// - Recovering every gateway failure into a visible error turn
/// - Persisting the log after each append
///
/// Constructed once per application lifetime and shared by reference;
/// there are no ambient singletons.
pub struct ChatSessionController {
    /// Live session state; consumers receive clones via [`state`](Self::state).
    state: RwLock<ChatState>,
    /// Durable session identifier, replaced only by [`start_new_chat`](Self::start_new_chat).
    session_id: RwLock<String>,
    /// Next message id. Seeded past the restored log so restored and new
    /// ids never collide.
    next_id: AtomicU64,
    /// Turn guard. Set atomically so two near-simultaneous intents can
    /// never both start a turn.
    in_flight: AtomicBool,
    /// Bumped by `start_new_chat`; a turn that settles under a stale
    /// epoch is discarded instead of appending into the fresh session.
    epoch: AtomicU64,
    gateway: Arc<dyn BackendGateway>,
    conversations: Arc<dyn ConversationStore>,
    sessions: Arc<dyn SessionStore>,
}

impl ChatSessionController {
    /// Creates a controller, restoring identity and history from the
    /// stores.
    ///
    /// A missing or corrupt persisted copy of either degrades to a fresh
    /// session; initialization itself cannot fail.
    pub async fn init(
        gateway: Arc<dyn BackendGateway>,
        conversations: Arc<dyn ConversationStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let session_id = sessions.get_or_create().await;
        let messages = conversations.load().await;
        let next_id = messages.iter().map(|m| m.id).max().map_or(1, |id| id + 1);

        tracing::debug!(
            session_id = %session_id,
            restored = messages.len(),
            "chat session initialized"
        );

        Self {
            state: RwLock::new(ChatState {
                messages,
                ..ChatState::default()
            }),
            session_id: RwLock::new(session_id),
            next_id: AtomicU64::new(next_id),
            in_flight: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
            gateway,
            conversations,
            sessions,
        }
    }

    /// Returns a snapshot of the current session state.
    pub async fn state(&self) -> ChatState {
        self.state.read().await.clone()
    }

    /// Returns the current session identifier.
    pub async fn session_id(&self) -> String {
        self.session_id.read().await.clone()
    }

    /// Sends a text turn.
    ///
    /// The user's message is echoed into the log before the gateway call
    /// and is never retracted, even on failure. Empty (post-trim) text is
    /// silently ignored, as is a call issued while another turn is in
    /// flight. Every failure is recovered into an error banner plus one
    /// synthetic assistant message; this method itself never fails.
    pub async fn send_message(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("ignoring empty submission");
            return;
        }
        let Some(epoch) = self.begin_turn().await else {
            return;
        };

        self.append(Message::user(self.mint_id(), text)).await;
        self.persist().await;

        let session_id = self.session_id().await;
        let outcome = self.gateway.send_text(&session_id, text).await;

        match outcome {
            Ok(reply) => {
                // A tagged reply becomes the session's current agent; an
                // untagged one inherits whatever tag is already current.
                let agent = match &reply.agent {
                    Some(tag) => Some(tag.clone()),
                    None => self.state.read().await.current_agent.clone(),
                };
                let message = Message::assistant(self.mint_id(), reply.text, agent);
                self.settle_turn(epoch, message, None, reply.agent).await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "text turn failed");
                let message = Message::assistant_error(self.mint_id(), SEND_FAILED_REPLY);
                self.settle_turn(epoch, message, Some(SEND_FAILED_BANNER), None)
                    .await;
            }
        }
    }

    /// Sends an image turn, with optional accompanying text.
    ///
    /// Identical shape to [`send_message`](Self::send_message), except
    /// that empty text is valid (the echoed message falls back to a
    /// placeholder) and a successful reply is always attributed to the
    /// image-analysis agent regardless of what the backend reports.
    pub async fn send_message_with_image(&self, text: &str, image: ImageAttachment) {
        let text = text.trim();
        let Some(epoch) = self.begin_turn().await else {
            return;
        };

        let echoed = if text.is_empty() { IMAGE_ONLY_TEXT } else { text };
        self.append(Message::user_with_image(
            self.mint_id(),
            echoed,
            image.preview_ref(),
        ))
        .await;
        self.persist().await;

        let session_id = self.session_id().await;
        let context = (!text.is_empty()).then_some(text);
        let outcome = self.gateway.send_image(&session_id, context, &image).await;

        match outcome {
            Ok(reply) => {
                let message = Message::assistant(
                    self.mint_id(),
                    reply.text,
                    Some(IMAGE_ANALYSIS_AGENT.to_string()),
                );
                self.settle_turn(epoch, message, None, None).await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "image turn failed");
                let message = Message::assistant_error(self.mint_id(), IMAGE_FAILED_REPLY);
                self.settle_turn(epoch, message, Some(IMAGE_FAILED_BANNER), None)
                    .await;
            }
        }
    }

    /// Discards the session: identity and history are wiped together.
    ///
    /// From the caller's perspective the reset is atomic; there is no
    /// partial path that keeps one of the two. A turn still in flight
    /// when this runs settles under a stale epoch and is discarded, so
    /// nothing from the old session leaks into the new one.
    pub async fn start_new_chat(&self) {
        self.conversations.clear().await;
        self.sessions.clear().await;
        let new_id = self.sessions.get_or_create().await;

        let mut state = self.state.write().await;
        *state = ChatState::default();
        drop(state);
        *self.session_id.write().await = new_id;
        self.next_id.store(1, Ordering::Release);
        self.epoch.fetch_add(1, Ordering::AcqRel);
        self.in_flight.store(false, Ordering::Release);

        tracing::debug!("started new chat session");
    }

    fn mint_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::AcqRel)
    }

    /// Claims the turn guard and enters the loading state.
    ///
    /// Returns the epoch the turn runs under, or `None` when another
    /// turn already holds the guard (the intent is dropped, not queued).
    async fn begin_turn(&self) -> Option<u64> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("turn already in flight, ignoring intent");
            return None;
        }
        let epoch = self.epoch.load(Ordering::Acquire);

        let mut state = self.state.write().await;
        state.error = None;
        state.loading = true;
        state.is_typing = true;
        Some(epoch)
    }

    /// Completes a turn: appends its closing message, records the error
    /// banner if any, applies the agent tag update, drops the loading
    /// flags and persists.
    ///
    /// Runs on the success and the failure path alike, so the flags
    /// always come back down. A stale epoch means the session was reset
    /// mid-flight; the result is discarded without touching fresh state.
    async fn settle_turn(
        &self,
        epoch: u64,
        message: Message,
        banner: Option<&str>,
        agent_update: Option<String>,
    ) {
        if self.epoch.load(Ordering::Acquire) != epoch {
            tracing::debug!("session reset while turn was in flight, discarding result");
            return;
        }

        let mut state = self.state.write().await;
        state.messages.push(message);
        if agent_update.is_some() {
            state.current_agent = agent_update;
        }
        state.error = banner.map(str::to_string);
        state.loading = false;
        state.is_typing = false;
        drop(state);

        self.in_flight.store(false, Ordering::Release);
        self.persist().await;
    }

    async fn append(&self, message: Message) {
        let mut state = self.state.write().await;
        state.messages.push(message);
    }

    async fn persist(&self) {
        let messages = {
            let state = self.state.read().await;
            state.messages.clone()
        };
        self.conversations.save(&messages).await;
    }
}
