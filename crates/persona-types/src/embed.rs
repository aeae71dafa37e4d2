/// Parameters for the interactive persona view.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmbedParams {
    persona_id: String,
    replica_id: String,
    user_label: String,
    domain: String,
    questions: Vec<String>,
}

impl EmbedParams {
    pub fn new(persona_id: &str, replica_id: &str) -> Self {
        Self {
            persona_id: persona_id.to_string(),
            replica_id: replica_id.to_string(),
            ..Default::default()
        }
    }

    pub fn with_user_label(mut self, user_label: &str) -> Self {
        self.user_label = user_label.to_string();
        self
    }

    pub fn with_domain(mut self, domain: &str) -> Self {
        self.domain = domain.to_string();
        self
    }

    pub fn with_questions(mut self, questions: Vec<String>) -> Self {
        self.questions = questions;
        self
    }

    pub fn persona_id(&self) -> &str {
        &self.persona_id
    }

    pub fn replica_id(&self) -> &str {
        &self.replica_id
    }

    pub fn user_label(&self) -> &str {
        &self.user_label
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }
}
