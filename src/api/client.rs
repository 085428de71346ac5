//! gRPC client for the conversations service
//!
//! Messages are declared with `prost` derives so the client needs no proto
//! compilation step. Calls go through a lazily-connected tonic channel.

use super::error::MutationError;
use super::traits::ConversationApi;
use super::types::{Collective, ConversationRecord, CreateConversationRequest};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};

/// Wire messages of the `conversations.v1.Conversations` service
pub mod proto {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct TagList {
        #[prost(string, repeated, tag = "1")]
        pub values: Vec<String>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct CreateConversationRequest {
        #[prost(string, tag = "1")]
        pub collective_id: String,
        #[prost(string, tag = "2")]
        pub title: String,
        #[prost(string, tag = "3")]
        pub html: String,
        /// Unset when the conversation has no tags
        #[prost(message, optional, tag = "4")]
        pub tags: Option<TagList>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Conversation {
        #[prost(string, tag = "1")]
        pub id: String,
        #[prost(string, tag = "2")]
        pub slug: String,
        #[prost(string, tag = "3")]
        pub title: String,
        #[prost(string, tag = "4")]
        pub summary: String,
        #[prost(string, repeated, tag = "5")]
        pub tags: Vec<String>,
        #[prost(string, tag = "6")]
        pub created_at: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct CreateConversationResponse {
        #[prost(bool, tag = "1")]
        pub success: bool,
        #[prost(string, tag = "2")]
        pub error: String,
        #[prost(string, tag = "3")]
        pub code: String,
        #[prost(message, optional, tag = "4")]
        pub conversation: Option<Conversation>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct GetCollectiveRequest {
        #[prost(string, tag = "1")]
        pub collective_id: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Collective {
        #[prost(string, tag = "1")]
        pub id: String,
        #[prost(string, tag = "2")]
        pub slug: String,
        #[prost(string, tag = "3")]
        pub name: String,
        #[prost(string, repeated, tag = "4")]
        pub conversation_tags: Vec<String>,
    }
}

const CREATE_CONVERSATION_PATH: &str = "/conversations.v1.Conversations/CreateConversation";
const GET_COLLECTIVE_PATH: &str = "/conversations.v1.Conversations/GetCollective";

/// Client for communicating with the conversations service
#[derive(Clone)]
pub struct ConversationClient {
    channel: Channel,
    address: String,
}

impl ConversationClient {
    /// Create a client. The connection is only opened on the first call.
    pub fn new(address: &str, request_timeout: Duration) -> Result<Self> {
        let channel = Endpoint::from_shared(address.to_string())
            .map_err(|e| anyhow!("Invalid conversations service address {address}: {e}"))?
            .timeout(request_timeout)
            .connect_lazy();

        Ok(Self {
            channel,
            address: address.to_string(),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    async fn unary<Req, Resp>(
        &self,
        path: &'static str,
        message: Req,
    ) -> std::result::Result<Resp, tonic::Status>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let mut grpc = tonic::client::Grpc::new(self.channel.clone());
        grpc.ready()
            .await
            .map_err(|e| tonic::Status::unavailable(format!("Service was not ready: {e}")))?;

        let codec = tonic::codec::ProstCodec::<Req, Resp>::default();
        let response = grpc
            .unary(
                tonic::Request::new(message),
                PathAndQuery::from_static(path),
                codec,
            )
            .await?;

        Ok(response.into_inner())
    }
}

#[async_trait]
impl ConversationApi for ConversationClient {
    async fn create_conversation(
        &self,
        request: CreateConversationRequest,
    ) -> std::result::Result<ConversationRecord, MutationError> {
        let response: proto::CreateConversationResponse = self
            .unary(CREATE_CONVERSATION_PATH, request_to_proto(request))
            .await?;

        record_from_response(response)
    }

    async fn fetch_collective(&self, collective_id: &str) -> Result<Collective> {
        let request = proto::GetCollectiveRequest {
            collective_id: collective_id.to_string(),
        };

        let collective: proto::Collective = self
            .unary(GET_COLLECTIVE_PATH, request)
            .await
            .map_err(|e| anyhow!("Failed to load collective {collective_id}: {}", e.message()))?;

        Ok(Collective {
            id: collective.id,
            slug: collective.slug,
            name: collective.name,
            suggested_tags: collective.conversation_tags,
        })
    }
}

fn request_to_proto(request: CreateConversationRequest) -> proto::CreateConversationRequest {
    proto::CreateConversationRequest {
        collective_id: request.collective_id,
        title: request.title,
        html: request.html,
        tags: request.tags.map(|values| proto::TagList { values }),
    }
}

fn record_from_response(
    response: proto::CreateConversationResponse,
) -> std::result::Result<ConversationRecord, MutationError> {
    if !response.success {
        return Err(MutationError::Rejected {
            code: if response.code.is_empty() {
                None
            } else {
                Some(response.code)
            },
            message: response.error,
        });
    }

    let conversation = response.conversation.ok_or_else(|| {
        MutationError::InvalidResponse("response carries no conversation".to_string())
    })?;

    Ok(ConversationRecord {
        id: conversation.id,
        slug: conversation.slug,
        title: conversation.title,
        summary: conversation.summary,
        tags: conversation.tags,
        created_at: parse_timestamp(&conversation.created_at),
    })
}

/// Parse an ISO timestamp string to DateTime<Utc>
fn parse_timestamp(s: &str) -> DateTime<Utc> {
    if s.is_empty() {
        return Utc::now();
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn wire_conversation() -> proto::Conversation {
        proto::Conversation {
            id: "conv-1".to_string(),
            slug: "hello-world".to_string(),
            title: "Hello world".to_string(),
            summary: "content".to_string(),
            tags: vec!["design".to_string()],
            created_at: "2024-03-01T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_request_without_tags_leaves_them_unset() {
        let wire = request_to_proto(CreateConversationRequest {
            collective_id: "webpack".to_string(),
            title: "Hello world".to_string(),
            html: "<p>content</p>".to_string(),
            tags: None,
        });
        assert!(wire.tags.is_none());
        assert_eq!(wire.collective_id, "webpack");
        assert_eq!(wire.html, "<p>content</p>");
    }

    #[test]
    fn test_request_with_tags() {
        let wire = request_to_proto(CreateConversationRequest {
            collective_id: "webpack".to_string(),
            title: "Hello world".to_string(),
            html: "<p>content</p>".to_string(),
            tags: Some(vec!["a".to_string(), "b".to_string()]),
        });
        assert_eq!(
            wire.tags,
            Some(proto::TagList {
                values: vec!["a".to_string(), "b".to_string()]
            })
        );
    }

    #[test]
    fn test_successful_response_becomes_record() {
        let record = record_from_response(proto::CreateConversationResponse {
            success: true,
            error: String::new(),
            code: String::new(),
            conversation: Some(wire_conversation()),
        })
        .unwrap();

        assert_eq!(
            record,
            ConversationRecord {
                id: "conv-1".to_string(),
                slug: "hello-world".to_string(),
                title: "Hello world".to_string(),
                summary: "content".to_string(),
                tags: vec!["design".to_string()],
                created_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            }
        );
    }

    #[test]
    fn test_unsuccessful_response_is_rejected() {
        let err = record_from_response(proto::CreateConversationResponse {
            success: false,
            error: "You need to be logged in".to_string(),
            code: "Unauthorized".to_string(),
            conversation: None,
        })
        .unwrap_err();

        assert_eq!(
            err,
            MutationError::Rejected {
                code: Some("Unauthorized".to_string()),
                message: "You need to be logged in".to_string(),
            }
        );
    }

    #[test]
    fn test_rejected_without_code() {
        let err = record_from_response(proto::CreateConversationResponse {
            success: false,
            error: "nope".to_string(),
            code: String::new(),
            conversation: None,
        })
        .unwrap_err();
        assert!(matches!(err, MutationError::Rejected { code: None, .. }));
    }

    #[test]
    fn test_success_without_conversation_is_invalid() {
        let err = record_from_response(proto::CreateConversationResponse {
            success: true,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, MutationError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_timestamp_falls_back_to_now() {
        let before = Utc::now();
        let parsed = parse_timestamp("not a date");
        assert!(parsed >= before);
        assert!(parse_timestamp("") >= before);
    }

    #[test]
    fn test_proto_tags_roundtrip_distinguishes_absent() {
        use prost::Message;

        let with_empty = proto::CreateConversationRequest {
            tags: Some(proto::TagList { values: vec![] }),
            ..Default::default()
        };
        let decoded =
            proto::CreateConversationRequest::decode(with_empty.encode_to_vec().as_slice())
                .unwrap();
        assert!(decoded.tags.is_some());

        let without = proto::CreateConversationRequest::default();
        let decoded =
            proto::CreateConversationRequest::decode(without.encode_to_vec().as_slice()).unwrap();
        assert!(decoded.tags.is_none());
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_address() {
        assert!(ConversationClient::new("not a uri \n", Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn test_new_keeps_address() {
        let client =
            ConversationClient::new("http://127.0.0.1:50061", Duration::from_secs(1)).unwrap();
        assert_eq!(client.address(), "http://127.0.0.1:50061");
    }
}
