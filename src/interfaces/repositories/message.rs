use async_trait::async_trait;
use chrono::Utc;

use crate::{
    entities::message::{canonical_pair, Conversation, ConversationView, Message},
    errors::AppError,
    repositories::sqlx_repo::SqlxMessageRepo,
};

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Returns the conversation between the two users, creating it when
    /// absent. The pair is normalized before it touches the database.
    async fn find_or_create_conversation(&self, a: i64, b: i64) -> Result<Conversation, AppError>;
    async fn get_conversation(&self, id: i64) -> Result<Option<Conversation>, AppError>;
    async fn list_conversations(&self, user_id: i64) -> Result<Vec<ConversationView>, AppError>;
    async fn insert_message(
        &self,
        conversation_id: i64,
        sender_id: i64,
        receiver_id: i64,
        content: &str,
    ) -> Result<Message, AppError>;
    /// Returns the conversation's messages and atomically marks the
    /// reader's unread received messages as read.
    async fn fetch_and_acknowledge(
        &self,
        conversation_id: i64,
        reader_id: i64,
    ) -> Result<Vec<Message>, AppError>;
}

impl SqlxMessageRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxMessageRepo { pool }
    }
}

#[async_trait]
impl MessageRepository for SqlxMessageRepo {
    async fn find_or_create_conversation(&self, a: i64, b: i64) -> Result<Conversation, AppError> {
        let (low, high) = canonical_pair(a, b);

        if let Some(existing) = sqlx::query_as::<_, Conversation>(
            "SELECT * FROM conversations WHERE user_a_id = ? AND user_b_id = ?",
        )
        .bind(low)
        .bind(high)
        .fetch_optional(&self.pool)
        .await?
        {
            return Ok(existing);
        }

        let now = Utc::now();
        let insert = sqlx::query_as::<_, Conversation>(
            r#"
            INSERT INTO conversations (user_a_id, user_b_id, last_message_at, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(low)
        .bind(high)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await;

        match insert {
            Ok(conversation) => Ok(conversation),
            // Lost a create race: the winner's row is the conversation.
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                let conversation = sqlx::query_as::<_, Conversation>(
                    "SELECT * FROM conversations WHERE user_a_id = ? AND user_b_id = ?",
                )
                .bind(low)
                .bind(high)
                .fetch_one(&self.pool)
                .await?;
                Ok(conversation)
            }
            Err(e) => Err(AppError::from(e)),
        }
    }

    async fn get_conversation(&self, id: i64) -> Result<Option<Conversation>, AppError> {
        let conversation =
            sqlx::query_as::<_, Conversation>("SELECT * FROM conversations WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(conversation)
    }

    async fn list_conversations(&self, user_id: i64) -> Result<Vec<ConversationView>, AppError> {
        let conversations = sqlx::query_as::<_, ConversationView>(
            r#"
            SELECT c.id,
                   u.id AS other_user_id,
                   u.name AS other_user_name,
                   c.last_message_at,
                   (SELECT COUNT(*) FROM messages m
                    WHERE m.conversation_id = c.id
                      AND m.receiver_id = ?
                      AND m.is_read = 0) AS unread_count
            FROM conversations c
            JOIN users u
              ON u.id = CASE WHEN c.user_a_id = ? THEN c.user_b_id ELSE c.user_a_id END
            WHERE c.user_a_id = ? OR c.user_b_id = ?
            ORDER BY c.last_message_at DESC
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(conversations)
    }

    async fn insert_message(
        &self,
        conversation_id: i64,
        sender_id: i64,
        receiver_id: i64,
        content: &str,
    ) -> Result<Message, AppError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (conversation_id, sender_id, receiver_id, content,
                                  is_read, created_at)
            VALUES (?, ?, ?, ?, 0, ?)
            RETURNING *
            "#,
        )
        .bind(conversation_id)
        .bind(sender_id)
        .bind(receiver_id)
        .bind(content)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE conversations SET last_message_at = ? WHERE id = ?")
            .bind(now)
            .bind(conversation_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(message)
    }

    async fn fetch_and_acknowledge(
        &self,
        conversation_id: i64,
        reader_id: i64,
    ) -> Result<Vec<Message>, AppError> {
        let mut tx = self.pool.begin().await?;

        let messages = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE conversation_id = ? ORDER BY created_at, id",
        )
        .bind(conversation_id)
        .fetch_all(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE messages SET is_read = 1
            WHERE conversation_id = ? AND receiver_id = ? AND is_read = 0
            "#,
        )
        .bind(conversation_id)
        .bind(reader_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(messages)
    }
}
