use serde::Serialize;
use validator::Validate;

use crate::entities::message::{ConversationView, Message, SendMessageRequest};
use crate::entities::token::Claims;
use crate::errors::AppError;
use crate::interfaces::repositories::message::MessageRepository;
use crate::interfaces::repositories::user::UserRepository;

#[derive(Debug, Serialize)]
pub struct OpenedConversation {
    pub id: i64,
    pub other_user_id: i64,
    pub other_user_name: String,
}

pub struct MessagingService<M, U>
where
    M: MessageRepository,
    U: UserRepository,
{
    pub message_repo: M,
    pub user_repo: U,
}

impl<M, U> MessagingService<M, U>
where
    M: MessageRepository,
    U: UserRepository,
{
    pub fn new(message_repo: M, user_repo: U) -> Self {
        MessagingService {
            message_repo,
            user_repo,
        }
    }

    pub async fn open_conversation(
        &self,
        claims: &Claims,
        other_user_id: i64,
    ) -> Result<OpenedConversation, AppError> {
        let caller_id = claims.user_id()?;
        if caller_id == other_user_id {
            return Err(AppError::BadRequest(
                "Cannot start a conversation with yourself".to_string(),
            ));
        }

        let other = self
            .user_repo
            .get_user_by_id(other_user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let conversation = self
            .message_repo
            .find_or_create_conversation(caller_id, other_user_id)
            .await?;

        Ok(OpenedConversation {
            id: conversation.id,
            other_user_id: other.id,
            other_user_name: other.name,
        })
    }

    pub async fn list_conversations(
        &self,
        claims: &Claims,
    ) -> Result<Vec<ConversationView>, AppError> {
        self.message_repo.list_conversations(claims.user_id()?).await
    }

    pub async fn send_message(
        &self,
        claims: &Claims,
        conversation_id: i64,
        request: SendMessageRequest,
    ) -> Result<Message, AppError> {
        request.validate()?;

        let caller_id = claims.user_id()?;
        let conversation = self
            .message_repo
            .get_conversation(conversation_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conversation not found".to_string()))?;

        if !conversation.involves(caller_id) {
            return Err(AppError::Forbidden(
                "Not a participant in this conversation".to_string(),
            ));
        }

        let receiver_id = conversation.other_party(caller_id);
        self.message_repo
            .insert_message(conversation_id, caller_id, receiver_id, request.content.trim())
            .await
    }

    /// Returns the conversation's messages; the caller's unread received
    /// messages are acknowledged in the same transaction.
    pub async fn fetch_messages(
        &self,
        claims: &Claims,
        conversation_id: i64,
    ) -> Result<Vec<Message>, AppError> {
        let caller_id = claims.user_id()?;
        let conversation = self
            .message_repo
            .get_conversation(conversation_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conversation not found".to_string()))?;

        if !conversation.involves(caller_id) {
            return Err(AppError::Forbidden(
                "Not a participant in this conversation".to_string(),
            ));
        }

        self.message_repo
            .fetch_and_acknowledge(conversation_id, caller_id)
            .await
    }
}
