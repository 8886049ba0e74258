use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Conversation {
    pub id: i64,
    pub user_a_id: i64,
    pub user_b_id: i64,
    pub last_message_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    pub fn involves(&self, user_id: i64) -> bool {
        self.user_a_id == user_id || self.user_b_id == user_id
    }

    /// The participant that is not `user_id`.
    pub fn other_party(&self, user_id: i64) -> i64 {
        if self.user_a_id == user_id {
            self.user_b_id
        } else {
            self.user_a_id
        }
    }
}

/// Conversations persist their participant pair in canonical order so the
/// uniqueness constraint holds regardless of who opened the thread.
pub fn canonical_pair(a: i64, b: i64) -> (i64, i64) {
    if a < b { (a, b) } else { (b, a) }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub conversation_id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct OpenConversationRequest {
    pub user_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 5000, message = "Message content is required"))]
    pub content: String,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ConversationView {
    pub id: i64,
    pub other_user_id: i64,
    pub other_user_name: String,
    pub last_message_at: DateTime<Utc>,
    pub unread_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_is_ordered_regardless_of_direction() {
        assert_eq!(canonical_pair(3, 7), (3, 7));
        assert_eq!(canonical_pair(7, 3), (3, 7));
    }

    #[test]
    fn other_party_returns_the_counterpart() {
        let convo = Conversation {
            id: 1,
            user_a_id: 3,
            user_b_id: 7,
            last_message_at: Utc::now(),
            created_at: Utc::now(),
        };
        assert_eq!(convo.other_party(3), 7);
        assert_eq!(convo.other_party(7), 3);
        assert!(convo.involves(3));
        assert!(!convo.involves(4));
    }
}
