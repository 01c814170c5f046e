//! Entities for the room domain.
//!
//! A `Room` is an isolated broadcast domain: membership keyed by opaque
//! connection id, a bounded message history with per-identity reaction
//! state, and at most one active mini-game. All mutation happens behind
//! the registry's per-room lock.

use std::collections::{HashMap, VecDeque};

use super::error::RoomError;
use super::game::Game;
use super::value_object::{
    ClientIdentity, ConnectionId, DisplayName, MessageId, RoomId, Timestamp,
};

/// Maximum number of messages retained per room (oldest evicted first).
pub const MESSAGE_HISTORY_LIMIT: usize = 100;

/// A connection currently joined to a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: DisplayName,
    pub identity: ClientIdentity,
}

/// A single reaction held by one network identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEntry {
    pub identity: ClientIdentity,
    pub reacted_at: Timestamp,
}

/// One posted emoji event plus its accumulated reactions.
///
/// Reactions are keyed label -> reactor display name -> entry. The name key
/// is the display name the reactor carried when the reaction landed; it is
/// what removal events echo, even if the identity later reconnects under a
/// different name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiMessage {
    pub id: MessageId,
    pub author: DisplayName,
    pub emoji: String,
    pub posted_at: Timestamp,
    pub reactions: HashMap<String, HashMap<String, ReactionEntry>>,
}

impl EmojiMessage {
    pub fn new(id: MessageId, author: DisplayName, emoji: String, posted_at: Timestamp) -> Self {
        Self {
            id,
            author,
            emoji,
            posted_at,
            reactions: HashMap::new(),
        }
    }
}

/// One reaction state transition, in broadcast order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionChange {
    pub message_id: MessageId,
    pub label: String,
    pub name: String,
    pub active: bool,
}

/// A viewer-specific projection of a stored message.
///
/// Every reaction entry collapses to whether the viewer itself reacted.
/// Raw identities never leave the room; aggregate counts stay computable
/// from the size of each boolean map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageProjection {
    pub id: MessageId,
    pub author: DisplayName,
    pub emoji: String,
    pub posted_at: Timestamp,
    pub reactions: HashMap<String, HashMap<String, bool>>,
}

/// An isolated broadcast domain identified by a user-chosen key.
#[derive(Debug)]
pub struct Room {
    id: RoomId,
    members: HashMap<ConnectionId, Member>,
    identity_index: HashMap<ClientIdentity, ConnectionId>,
    messages: VecDeque<EmojiMessage>,
    created_at: Timestamp,
    last_activity: Timestamp,
    game: Option<Game>,
}

impl Room {
    pub fn new(id: RoomId, now: Timestamp) -> Self {
        Self {
            id,
            members: HashMap::new(),
            identity_index: HashMap::new(),
            messages: VecDeque::new(),
            created_at: now,
            last_activity: now,
            game: None,
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn last_activity(&self) -> Timestamp {
        self.last_activity
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn touch(&mut self, now: Timestamp) {
        self.last_activity = now;
    }

    /// Bind a connection to this room and record its identity.
    pub fn join(&mut self, connection_id: ConnectionId, member: Member, now: Timestamp) {
        self.identity_index
            .insert(member.identity.clone(), connection_id.clone());
        self.members.insert(connection_id, member);
        self.touch(now);
    }

    /// Remove a connection from membership. The identity index entry is
    /// dropped only while it still points at the departing connection, so a
    /// second connection sharing the identity keeps its entry.
    pub fn leave(&mut self, connection_id: &ConnectionId, now: Timestamp) -> Option<Member> {
        let member = self.members.remove(connection_id)?;
        if self.identity_index.get(&member.identity) == Some(connection_id) {
            self.identity_index.remove(&member.identity);
        }
        self.touch(now);
        Some(member)
    }

    /// Display names of every live member. Order is unspecified.
    pub fn roster(&self) -> Vec<String> {
        self.members
            .values()
            .map(|member| member.name.as_str().to_string())
            .collect()
    }

    /// Snapshot of the live connection ids, taken for fan-out.
    pub fn member_connections(&self) -> Vec<ConnectionId> {
        self.members.keys().cloned().collect()
    }

    /// Append a message with an empty reaction map, evicting the oldest
    /// entries beyond [`MESSAGE_HISTORY_LIMIT`].
    pub fn post_message(
        &mut self,
        author: DisplayName,
        emoji: String,
        now: Timestamp,
    ) -> EmojiMessage {
        let message = EmojiMessage::new(MessageId::generate(), author, emoji, now);
        self.messages.push_back(message.clone());
        while self.messages.len() > MESSAGE_HISTORY_LIMIT {
            self.messages.pop_front();
        }
        self.touch(now);
        message
    }

    /// Add or move a reaction on a message.
    ///
    /// A given identity holds at most one active reaction across all labels
    /// on a message. If the identity already reacted (under any label), that
    /// entry is removed first and the removal change precedes the addition
    /// in the returned list. The removal echoes the display name stored at
    /// reaction time, not the reactor's current name.
    pub fn react(
        &mut self,
        message_id: &str,
        label: &str,
        reactor: &DisplayName,
        identity: &ClientIdentity,
        now: Timestamp,
    ) -> Result<Vec<ReactionChange>, RoomError> {
        let message = self
            .messages
            .iter_mut()
            .find(|message| message.id.as_str() == message_id)
            .ok_or(RoomError::MessageNotFound)?;

        let mut changes = Vec::with_capacity(2);

        let existing = message.reactions.iter().find_map(|(label, entries)| {
            entries
                .iter()
                .find(|(_, entry)| entry.identity == *identity)
                .map(|(name, _)| (label.clone(), name.clone()))
        });

        if let Some((old_label, old_name)) = existing {
            if let Some(entries) = message.reactions.get_mut(&old_label) {
                entries.remove(&old_name);
                if entries.is_empty() {
                    message.reactions.remove(&old_label);
                }
            }
            changes.push(ReactionChange {
                message_id: message.id.clone(),
                label: old_label,
                name: old_name,
                active: false,
            });
        }

        message
            .reactions
            .entry(label.to_string())
            .or_default()
            .insert(
                reactor.as_str().to_string(),
                ReactionEntry {
                    identity: identity.clone(),
                    reacted_at: now,
                },
            );
        changes.push(ReactionChange {
            message_id: message.id.clone(),
            label: label.to_string(),
            name: reactor.as_str().to_string(),
            active: true,
        });

        self.touch(now);
        Ok(changes)
    }

    /// Project the stored history for one viewer. Pure transform, recomputed
    /// on every join and never cached.
    pub fn project_history(&self, viewer: &ClientIdentity) -> Vec<MessageProjection> {
        self.messages
            .iter()
            .map(|message| MessageProjection {
                id: message.id.clone(),
                author: message.author.clone(),
                emoji: message.emoji.clone(),
                posted_at: message.posted_at,
                reactions: message
                    .reactions
                    .iter()
                    .map(|(label, entries)| {
                        (
                            label.clone(),
                            entries
                                .iter()
                                .map(|(name, entry)| (name.clone(), entry.identity == *viewer))
                                .collect(),
                        )
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn game_mut(&mut self) -> Option<&mut Game> {
        self.game.as_mut()
    }

    /// Install a game, replacing any active one.
    pub fn set_game(&mut self, game: Game) {
        self.game = Some(game);
    }

    pub fn clear_game(&mut self) -> Option<Game> {
        self.game.take()
    }
}
