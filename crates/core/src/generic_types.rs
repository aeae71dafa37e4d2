use crate::catalog::Question;
use crate::error::PersonaError;

/// What the persona is told about the questions, depending on navigation mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionContext {
    /// Host-paced: only the question currently on screen.
    Current(Option<Question>),
    /// Remote-paced: the whole list, handed off once.
    Full(Vec<Question>),
}

impl QuestionContext {
    pub fn texts(&self) -> Vec<String> {
        match self {
            QuestionContext::Current(question) => {
                question.iter().map(|q| q.text.clone()).collect()
            }
            QuestionContext::Full(questions) => questions.iter().map(|q| q.text.clone()).collect(),
        }
    }
}

/// Initialization context handed to the persona provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaContext {
    pub domain_id: String,
    pub user_label: String,
    pub persona_name: String,
    pub question_index: usize,
    pub questions: QuestionContext,
}

/// Handle for a remote session the provider accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteSession {
    pub session_id: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Idle,
    Loading,
    Connected,
    Error(PersonaError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MicrophoneStatus {
    Disabled,
    Requesting,
    Enabled,
    Denied(String),
}

/// Events the connector publishes for whatever view is rendering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectorEvent {
    Status(ConnectionStatus),
    Microphone(MicrophoneStatus),
    Active(bool),
}
