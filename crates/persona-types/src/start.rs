/// Body of `POST /v2/personas/{persona_id}/start`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StartPersonaRequest {
    replica_id: String,
    context: StartContext,
}

impl StartPersonaRequest {
    pub fn new(replica_id: &str, context: StartContext) -> Self {
        Self {
            replica_id: replica_id.to_string(),
            context,
        }
    }

    pub fn replica_id(&self) -> &str {
        &self.replica_id
    }

    pub fn context(&self) -> &StartContext {
        &self.context
    }
}

/// Interview context the persona is seeded with.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StartContext {
    user_name: String,
    interview_domain: String,
    current_question_index: usize,
    persona_name: String,

    /// Host-paced sessions send only the question on screen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_question: Option<String>,

    /// Remote-paced sessions hand off the whole list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    questions: Vec<String>,
}

impl StartContext {
    pub fn new(user_name: &str, interview_domain: &str, persona_name: &str) -> Self {
        Self {
            user_name: user_name.to_string(),
            interview_domain: interview_domain.to_string(),
            current_question_index: 0,
            persona_name: persona_name.to_string(),
            current_question: None,
            questions: Vec::new(),
        }
    }

    pub fn with_current_question_index(mut self, index: usize) -> Self {
        self.current_question_index = index;
        self
    }

    pub fn with_current_question(mut self, question: &str) -> Self {
        self.current_question = Some(question.to_string());
        self
    }

    pub fn with_questions(mut self, questions: Vec<String>) -> Self {
        self.questions = questions;
        self
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn interview_domain(&self) -> &str {
        &self.interview_domain
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn persona_name(&self) -> &str {
        &self.persona_name
    }

    pub fn current_question(&self) -> Option<&str> {
        self.current_question.as_deref()
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }
}

/// The provider's answer. Only the identifiers are read; everything else is
/// kept so a proxy can pass it through untouched.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StartPersonaResponse {
    #[serde(default, alias = "conversation_id", skip_serializing_if = "Option::is_none")]
    session_id: Option<String>,

    #[serde(default, alias = "conversation_url", skip_serializing_if = "Option::is_none")]
    url: Option<String>,

    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl StartPersonaResponse {
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn extra(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.extra
    }
}
