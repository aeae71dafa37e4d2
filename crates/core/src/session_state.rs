use crate::{
    Command,
    catalog::{Question, QuestionCatalog},
    generic_types::{PersonaContext, QuestionContext},
};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_USER_LABEL: &str = "Candidate";

/// Who drives progression through the question list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavigationMode {
    /// The session tracks the current index and offers next/prev.
    #[default]
    HostPaced,
    /// The full list is handed to the persona once; the index is informational.
    RemotePaced,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown navigation mode '{0}', expected 'host-paced' or 'remote-paced'")]
pub struct ParseNavigationModeError(String);

impl FromStr for NavigationMode {
    type Err = ParseNavigationModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "host-paced" | "host" => Ok(NavigationMode::HostPaced),
            "remote-paced" | "remote" => Ok(NavigationMode::RemotePaced),
            _ => Err(ParseNavigationModeError(s.to_string())),
        }
    }
}

impl fmt::Display for NavigationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationMode::HostPaced => write!(f, "host-paced"),
            NavigationMode::RemotePaced => write!(f, "remote-paced"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    NotStarted,
    Active,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Start,
    Pause,
    Resume,
    TogglePause,
    Reset,
    NextQuestion,
    PrevQuestion,
}

/// Derived progress metrics. Never stored, always computed from the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current_index: usize,
    pub total: usize,
    pub percent_complete: u32,
    pub remaining: usize,
}

/// Result of a pure transition: the next session value and the side effect to run.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub session: InterviewSession,
    pub command: Option<Command>,
}

/// One user's run through a domain's interview.
///
/// The questions are snapshotted at creation, so later catalog changes never
/// affect a running session.
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewSession {
    domain_id: String,
    persona_name: String,
    user_label: String,
    questions: Vec<Question>,
    mode: NavigationMode,
    status: SessionStatus,
    current_index: Option<usize>,
}

impl InterviewSession {
    pub fn new(domain_id: &str, questions: Vec<Question>, mode: NavigationMode) -> Self {
        Self {
            domain_id: domain_id.to_string(),
            persona_name: String::new(),
            user_label: DEFAULT_USER_LABEL.to_string(),
            questions,
            mode,
            status: SessionStatus::NotStarted,
            current_index: None,
        }
    }

    /// Seeds a session from the catalog. An unknown domain yields an empty
    /// question list rather than an error.
    pub fn for_domain(catalog: &QuestionCatalog, domain_id: &str, mode: NavigationMode) -> Self {
        let session = Self::new(domain_id, catalog.lookup(domain_id).to_vec(), mode);
        match catalog.domain(domain_id) {
            Some(domain) => session.with_persona_name(&domain.persona_ref.display_name),
            None => {
                tracing::warn!("No catalog entry for domain '{}'", domain_id);
                session
            }
        }
    }

    pub fn with_user_label(mut self, user_label: &str) -> Self {
        self.user_label = user_label.to_string();
        self
    }

    pub fn with_persona_name(mut self, persona_name: &str) -> Self {
        self.persona_name = persona_name.to_string();
        self
    }

    pub fn domain_id(&self) -> &str {
        &self.domain_id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// `None` until the interview has been started.
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn is_started(&self) -> bool {
        self.status != SessionStatus::NotStarted
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_index.and_then(|i| self.questions.get(i))
    }

    pub fn progress(&self) -> Progress {
        let total = self.questions.len();
        let current_index = self.current_index.unwrap_or(0);
        let percent_complete = if total == 0 {
            0
        } else {
            // Integer round-half-up of 100 * (index + 1) / total.
            ((200 * (current_index + 1) + total) / (2 * total)) as u32
        };
        Progress {
            current_index,
            total,
            percent_complete,
            remaining: total.saturating_sub(current_index + 1),
        }
    }

    pub fn persona_context(&self) -> PersonaContext {
        let questions = match self.mode {
            NavigationMode::HostPaced => QuestionContext::Current(self.current_question().cloned()),
            NavigationMode::RemotePaced => QuestionContext::Full(self.questions.clone()),
        };
        PersonaContext {
            domain_id: self.domain_id.clone(),
            user_label: self.user_label.clone(),
            persona_name: self.persona_name.clone(),
            question_index: self.current_index.unwrap_or(0),
            questions,
        }
    }

    /// Computes the next session without touching `self`.
    pub fn transition(&self, action: SessionAction) -> Transition {
        let mut next = self.clone();
        let command = match (action, self.status) {
            (SessionAction::Start, SessionStatus::NotStarted) => {
                next.status = SessionStatus::Active;
                next.current_index = Some(0);
                Some(Command::BeginPersona(next.persona_context()))
            }
            (SessionAction::Pause, SessionStatus::Active)
            | (SessionAction::TogglePause, SessionStatus::Active) => {
                next.status = SessionStatus::Paused;
                Some(Command::SetActive(false))
            }
            (SessionAction::Resume, SessionStatus::Paused)
            | (SessionAction::TogglePause, SessionStatus::Paused) => {
                next.status = SessionStatus::Active;
                Some(Command::SetActive(true))
            }
            (SessionAction::Reset, _) => {
                next.status = SessionStatus::NotStarted;
                next.current_index = None;
                Some(Command::Teardown)
            }
            (SessionAction::NextQuestion, SessionStatus::Active | SessionStatus::Paused)
                if self.mode == NavigationMode::HostPaced =>
            {
                match self.current_index {
                    Some(i) if i + 1 < self.questions.len() => {
                        next.current_index = Some(i + 1);
                        Some(Command::UpdateContext(next.persona_context()))
                    }
                    _ => None,
                }
            }
            (SessionAction::PrevQuestion, SessionStatus::Active | SessionStatus::Paused)
                if self.mode == NavigationMode::HostPaced =>
            {
                match self.current_index {
                    Some(i) if i > 0 => {
                        next.current_index = Some(i - 1);
                        Some(Command::UpdateContext(next.persona_context()))
                    }
                    _ => None,
                }
            }
            _ => None,
        };

        if command.is_none() {
            tracing::trace!("{:?} ignored in state {:?}", action, self.status);
        }
        Transition {
            session: next,
            command,
        }
    }

    /// Applies `action` in place and returns the side effect, if any.
    pub fn apply(&mut self, action: SessionAction) -> Option<Command> {
        let Transition { session, command } = self.transition(action);
        *self = session;
        command
    }

    pub fn start(&mut self) -> Option<Command> {
        self.apply(SessionAction::Start)
    }

    pub fn pause(&mut self) -> Option<Command> {
        self.apply(SessionAction::Pause)
    }

    pub fn resume(&mut self) -> Option<Command> {
        self.apply(SessionAction::Resume)
    }

    pub fn toggle_pause(&mut self) -> Option<Command> {
        self.apply(SessionAction::TogglePause)
    }

    pub fn reset(&mut self) -> Option<Command> {
        self.apply(SessionAction::Reset)
    }

    pub fn next_question(&mut self) -> Option<Command> {
        self.apply(SessionAction::NextQuestion)
    }

    pub fn prev_question(&mut self) -> Option<Command> {
        self.apply(SessionAction::PrevQuestion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Difficulty, QuestionType};

    fn numbered_questions(n: usize) -> Vec<Question> {
        (1..=n)
            .map(|i| {
                Question::new(
                    &format!("q-{i}"),
                    "General",
                    &format!("Question {i}?"),
                    QuestionType::Technical,
                    Difficulty::Medium,
                )
            })
            .collect()
    }

    fn backend_session() -> InterviewSession {
        let catalog = QuestionCatalog::builtin().unwrap();
        InterviewSession::for_domain(&catalog, "backend", NavigationMode::HostPaced)
    }

    #[test]
    fn start_begins_at_first_question() {
        let mut session = InterviewSession::new("x", numbered_questions(5), NavigationMode::HostPaced);
        assert_eq!(session.current_index(), None);

        let command = session.start();

        assert_eq!(session.status(), SessionStatus::Active);
        assert_eq!(session.current_index(), Some(0));
        match command {
            Some(Command::BeginPersona(context)) => {
                assert_eq!(context.question_index, 0);
                assert_eq!(context.domain_id, "x");
                assert_eq!(context.user_label, DEFAULT_USER_LABEL);
            }
            other => panic!("Expected BeginPersona, got {other:?}"),
        }
    }

    #[test]
    fn next_question_stops_at_last_index() {
        let n = 7;
        let mut session = InterviewSession::new("x", numbered_questions(n), NavigationMode::HostPaced);
        session.start();

        for _ in 0..n - 1 {
            assert!(session.next_question().is_some());
        }
        assert_eq!(session.current_index(), Some(n - 1));

        assert!(session.next_question().is_none());
        assert_eq!(session.current_index(), Some(n - 1));
    }

    #[test]
    fn prev_question_at_first_index_is_noop() {
        let mut session = InterviewSession::new("x", numbered_questions(3), NavigationMode::HostPaced);
        session.start();
        let before = session.clone();

        assert!(session.prev_question().is_none());
        assert_eq!(session, before);
    }

    #[test]
    fn navigation_before_start_is_noop() {
        let mut session = InterviewSession::new("x", numbered_questions(3), NavigationMode::HostPaced);
        assert!(session.next_question().is_none());
        assert!(session.pause().is_none());
        assert!(session.resume().is_none());
        assert_eq!(session.status(), SessionStatus::NotStarted);
        assert_eq!(session.current_index(), None);
    }

    #[test]
    fn reset_then_start_begins_again_at_zero() {
        let mut session = InterviewSession::new("x", numbered_questions(5), NavigationMode::HostPaced);
        session.start();
        session.next_question();
        session.next_question();
        assert_eq!(session.current_index(), Some(2));

        assert_eq!(session.reset(), Some(Command::Teardown));
        assert_eq!(session.status(), SessionStatus::NotStarted);
        assert_eq!(session.current_index(), None);

        session.start();
        assert_eq!(session.current_index(), Some(0));
    }

    #[test]
    fn reset_from_paused_returns_to_not_started() {
        let mut session = InterviewSession::new("x", numbered_questions(5), NavigationMode::HostPaced);
        session.start();
        session.pause();
        assert_eq!(session.status(), SessionStatus::Paused);

        session.reset();
        assert_eq!(session.status(), SessionStatus::NotStarted);
        session.start();
        assert_eq!(session.current_index(), Some(0));
    }

    #[test]
    fn progress_after_three_steps_of_twenty() {
        let mut session = InterviewSession::new("x", numbered_questions(20), NavigationMode::HostPaced);
        session.start();
        for _ in 0..3 {
            session.next_question();
        }

        assert_eq!(
            session.progress(),
            Progress {
                current_index: 3,
                total: 20,
                percent_complete: 20,
                remaining: 16,
            }
        );
    }

    #[test]
    fn progress_rounds_half_up() {
        // 1 of 8 is 12.5%.
        let mut session = InterviewSession::new("x", numbered_questions(8), NavigationMode::HostPaced);
        session.start();
        assert_eq!(session.progress().percent_complete, 13);
        // 2 of 3 is 66.67%.
        let mut session = InterviewSession::new("x", numbered_questions(3), NavigationMode::HostPaced);
        session.start();
        session.next_question();
        assert_eq!(session.progress().percent_complete, 67);
    }

    #[test]
    fn backend_scenario_pause_resume_keeps_index() {
        let mut session = backend_session();
        assert_eq!(session.questions().len(), 15);

        session.start();
        assert_eq!(session.pause(), Some(Command::SetActive(false)));
        assert_eq!(session.resume(), Some(Command::SetActive(true)));
        session.next_question();
        session.next_question();
        assert_eq!(session.progress().current_index, 2);

        session.pause();
        assert_eq!(session.current_index(), Some(2));
        session.resume();
        assert_eq!(session.current_index(), Some(2));
        assert_eq!(session.current_question().map(|q| q.id.as_str()), Some("be-3"));
    }

    #[test]
    fn navigation_is_allowed_while_paused() {
        let mut session = backend_session();
        session.start();
        session.toggle_pause();
        assert_eq!(session.status(), SessionStatus::Paused);

        assert!(session.next_question().is_some());
        assert_eq!(session.current_index(), Some(1));
        assert_eq!(session.status(), SessionStatus::Paused);
    }

    #[test]
    fn unknown_domain_session_has_no_navigation() {
        let catalog = QuestionCatalog::builtin().unwrap();
        let mut session =
            InterviewSession::for_domain(&catalog, "nonexistent", NavigationMode::HostPaced);
        assert!(session.questions().is_empty());

        assert!(session.start().is_some());
        assert_eq!(session.status(), SessionStatus::Active);
        assert!(session.next_question().is_none());
        assert!(session.prev_question().is_none());

        let progress = session.progress();
        assert_eq!(progress.total, 0);
        assert_eq!(progress.percent_complete, 0);
        assert_eq!(progress.remaining, 0);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn start_twice_is_noop() {
        let mut session = InterviewSession::new("x", numbered_questions(4), NavigationMode::HostPaced);
        session.start();
        session.next_question();
        assert!(session.start().is_none());
        assert_eq!(session.current_index(), Some(1));
    }

    #[test]
    fn transition_does_not_mutate_original() {
        let session = InterviewSession::new("x", numbered_questions(4), NavigationMode::HostPaced);
        let transition = session.transition(SessionAction::Start);
        assert_eq!(session.status(), SessionStatus::NotStarted);
        assert_eq!(transition.session.status(), SessionStatus::Active);
    }

    #[test]
    fn host_paced_context_carries_current_question() {
        let mut session = backend_session().with_user_label("Ada");
        session.start();
        let command = session.next_question();

        match command {
            Some(Command::UpdateContext(context)) => {
                assert_eq!(context.question_index, 1);
                assert_eq!(context.user_label, "Ada");
                assert_eq!(context.persona_name, "Evelyn Cross");
                match context.questions {
                    QuestionContext::Current(Some(q)) => assert_eq!(q.id, "be-2"),
                    other => panic!("Expected current question, got {other:?}"),
                }
            }
            other => panic!("Expected UpdateContext, got {other:?}"),
        }
    }

    #[test]
    fn remote_paced_hands_off_full_list_and_ignores_navigation() {
        let catalog = QuestionCatalog::builtin().unwrap();
        let mut session =
            InterviewSession::for_domain(&catalog, "frontend", NavigationMode::RemotePaced);

        match session.start() {
            Some(Command::BeginPersona(context)) => {
                assert_eq!(context.questions, QuestionContext::Full(session.questions().to_vec()));
            }
            other => panic!("Expected BeginPersona, got {other:?}"),
        }
        assert!(session.next_question().is_none());
        assert_eq!(session.current_index(), Some(0));
    }

    #[test]
    fn navigation_mode_parses_from_str() {
        assert_eq!("host-paced".parse::<NavigationMode>().unwrap(), NavigationMode::HostPaced);
        assert_eq!("Remote-Paced".parse::<NavigationMode>().unwrap(), NavigationMode::RemotePaced);
        assert!("sideways".parse::<NavigationMode>().is_err());
        assert_eq!(NavigationMode::RemotePaced.to_string(), "remote-paced");
    }
}
