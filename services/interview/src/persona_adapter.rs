use async_trait::async_trait;
use mirror_core::catalog::PersonaRef;
use mirror_core::error::PersonaError;
use mirror_core::generic_types::{PersonaContext, QuestionContext, RemoteSession};
use mirror_core::persona_api::PersonaApi;
use persona_client::PersonaHttp;
use persona_client::types::{EmbedParams, StartContext, StartPersonaRequest};

/// An adapter that implements the core `PersonaApi` trait for the persona HTTP client.
/// It is generic over `PersonaHttp` to allow for mocking the underlying client in tests.
pub struct PersonaAdapter<C: PersonaHttp> {
    client: C,
}

impl<C: PersonaHttp> PersonaAdapter<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

/// Maps the session's view of the persona context onto the provider's wire shape.
pub fn start_request(persona: &PersonaRef, context: &PersonaContext) -> StartPersonaRequest {
    let mut start = StartContext::new(
        &context.user_label,
        &context.domain_id,
        &context.persona_name,
    )
    .with_current_question_index(context.question_index);
    match &context.questions {
        QuestionContext::Current(Some(question)) => {
            start = start.with_current_question(&question.text);
        }
        QuestionContext::Current(None) => {}
        QuestionContext::Full(_) => {
            start = start.with_questions(context.questions.texts());
        }
    }
    StartPersonaRequest::new(&persona.replica_id, start)
}

pub fn embed_params(persona: &PersonaRef, context: &PersonaContext) -> EmbedParams {
    EmbedParams::new(&persona.persona_id, &persona.replica_id)
        .with_user_label(&context.user_label)
        .with_domain(&context.domain_id)
        .with_questions(context.questions.texts())
}

#[async_trait]
impl<C: PersonaHttp> PersonaApi for PersonaAdapter<C> {
    async fn start_session(
        &self,
        persona: &PersonaRef,
        context: &PersonaContext,
    ) -> Result<RemoteSession, PersonaError> {
        let request = start_request(persona, context);
        let response = self
            .client
            .start_persona(&persona.persona_id, &request)
            .await
            .map_err(|e| PersonaError::ConnectionFailure(format!("{e:#}")))?;
        Ok(RemoteSession {
            session_id: response.session_id().map(str::to_string),
            url: response.url().map(str::to_string),
        })
    }

    async fn end_session(&self, session: &RemoteSession) -> Result<(), PersonaError> {
        let Some(session_id) = session.session_id.as_deref() else {
            tracing::debug!("Remote session has no id, nothing to end");
            return Ok(());
        };
        self.client
            .end_conversation(session_id)
            .await
            .map_err(|e| PersonaError::ConnectionFailure(format!("{e:#}")))
    }

    fn embed_url(&self, persona: &PersonaRef, context: &PersonaContext) -> Option<String> {
        match self.client.embed_url(&embed_params(persona, context)) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                tracing::warn!("Failed to build embed url: {:#}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use mirror_core::catalog::{Difficulty, Question, QuestionType};
    use mockall::mock;
    use persona_client::Url;
    use persona_client::types::StartPersonaResponse;

    mock! {
        pub PersonaHttp {}
        #[async_trait]
        impl PersonaHttp for PersonaHttp {
            async fn start_persona(
                &self,
                persona_id: &str,
                request: &StartPersonaRequest,
            ) -> Result<StartPersonaResponse>;
            async fn end_conversation(&self, conversation_id: &str) -> Result<()>;
            fn embed_url(&self, params: &EmbedParams) -> Result<Url>;
        }
    }

    fn persona() -> PersonaRef {
        PersonaRef {
            persona_id: "p87da90823bb".to_string(),
            replica_id: "r4dcf31b60e1".to_string(),
            display_name: "Evelyn Cross".to_string(),
        }
    }

    fn question(text: &str) -> Question {
        Question::new("q1", "API Design", text, QuestionType::Technical, Difficulty::Medium)
    }

    fn context(questions: QuestionContext) -> PersonaContext {
        PersonaContext {
            domain_id: "backend".to_string(),
            user_label: "Candidate".to_string(),
            persona_name: "Evelyn Cross".to_string(),
            question_index: 0,
            questions,
        }
    }

    #[test]
    fn test_host_paced_request_carries_current_question() {
        let ctx = context(QuestionContext::Current(Some(question("What is REST?"))));
        let request = start_request(&persona(), &ctx);

        assert_eq!(request.replica_id(), "r4dcf31b60e1");
        assert_eq!(request.context().current_question(), Some("What is REST?"));
        assert!(request.context().questions().is_empty());
        assert_eq!(request.context().persona_name(), "Evelyn Cross");
    }

    #[test]
    fn test_remote_paced_request_carries_all_questions() {
        let ctx = context(QuestionContext::Full(vec![
            question("What is REST?"),
            question("Explain indexing."),
        ]));
        let request = start_request(&persona(), &ctx);

        assert_eq!(request.context().current_question(), None);
        assert_eq!(
            request.context().questions(),
            &["What is REST?".to_string(), "Explain indexing.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_start_session_maps_response() {
        let mut mock_client = MockPersonaHttp::new();
        mock_client
            .expect_start_persona()
            .withf(|persona_id, request| {
                persona_id.to_string() == "p87da90823bb" && request.context().interview_domain() == "backend"
            })
            .times(1)
            .returning(|_, _| {
                Ok(serde_json_response(
                    r#"{"conversation_id":"c-1","conversation_url":"https://call.example/c-1"}"#,
                ))
            });

        let adapter = PersonaAdapter::new(mock_client);
        let remote = adapter
            .start_session(&persona(), &context(QuestionContext::Current(None)))
            .await
            .unwrap();

        assert_eq!(remote.session_id.as_deref(), Some("c-1"));
        assert_eq!(remote.url.as_deref(), Some("https://call.example/c-1"));
    }

    #[tokio::test]
    async fn test_start_session_failure_is_connection_failure() {
        let mut mock_client = MockPersonaHttp::new();
        mock_client
            .expect_start_persona()
            .returning(|_, _| Err(anyhow::anyhow!("Failed to initialize persona: Unauthorized")));

        let adapter = PersonaAdapter::new(mock_client);
        let result = adapter
            .start_session(&persona(), &context(QuestionContext::Current(None)))
            .await;

        assert_eq!(
            result,
            Err(PersonaError::ConnectionFailure(
                "Failed to initialize persona: Unauthorized".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_end_session_without_id_skips_call() {
        let mut mock_client = MockPersonaHttp::new();
        mock_client.expect_end_conversation().never();

        let adapter = PersonaAdapter::new(mock_client);
        assert!(adapter.end_session(&RemoteSession::default()).await.is_ok());
    }

    #[test]
    fn test_embed_url_error_yields_none() {
        let mut mock_client = MockPersonaHttp::new();
        mock_client
            .expect_embed_url()
            .returning(|_| Err(anyhow::anyhow!("relative URL without a base")));

        let adapter = PersonaAdapter::new(mock_client);
        assert_eq!(
            adapter.embed_url(&persona(), &context(QuestionContext::Current(None))),
            None
        );
    }

    fn serde_json_response(body: &str) -> StartPersonaResponse {
        serde_json::from_str(body).unwrap()
    }
}
