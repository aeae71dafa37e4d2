//! Plain-text rendering for the terminal front end, plus the interview
//! prompt's command parser. Everything here is pure so it can be tested
//! without a terminal.

use mirror_core::catalog::{Domain, Question, QuestionCatalog, sample, summarize};
use mirror_core::connector::ConnectorState;
use mirror_core::generic_types::{ConnectionStatus, ConnectorEvent, MicrophoneStatus};
use mirror_core::session_state::{InterviewSession, NavigationMode, SessionStatus};
use std::fmt::Write;
use std::str::FromStr;

/// Number of sample questions shown before the interview starts.
pub const PREVIEW_SAMPLE_SIZE: usize = 3;

/// A line typed at the interview prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptCommand {
    Start,
    Pause,
    Resume,
    Next,
    Prev,
    Reset,
    Mic,
    Retry,
    Status,
    Help,
    Back,
}

impl FromStr for PromptCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "start" => Ok(PromptCommand::Start),
            "pause" => Ok(PromptCommand::Pause),
            "resume" => Ok(PromptCommand::Resume),
            "next" | "n" => Ok(PromptCommand::Next),
            "prev" | "previous" | "p" => Ok(PromptCommand::Prev),
            "reset" => Ok(PromptCommand::Reset),
            "mic" => Ok(PromptCommand::Mic),
            "retry" => Ok(PromptCommand::Retry),
            "status" => Ok(PromptCommand::Status),
            "help" | "?" => Ok(PromptCommand::Help),
            "back" | "quit" | "exit" | "q" => Ok(PromptCommand::Back),
            other => Err(format!("Unknown command '{other}'. Type 'help' for the list.")),
        }
    }
}

pub fn help() -> &'static str {
    "Commands: start, pause, resume, next, prev, reset, mic, retry, status, back"
}

pub fn render_domains(catalog: &QuestionCatalog) -> String {
    let mut out = String::new();
    for domain in catalog.domains() {
        let count = catalog.lookup(&domain.id).len();
        let _ = writeln!(out, "{} ({})", domain.title, domain.id);
        let _ = writeln!(out, "    {}", domain.description);
        let _ = writeln!(
            out,
            "    Questions: {}  Duration: {}  AI Persona: {}",
            count, domain.duration, domain.persona_ref.display_name
        );
    }
    out
}

pub fn render_questions(questions: &[&Question]) -> String {
    if questions.is_empty() {
        return "No questions found.".to_string();
    }
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            format!(
                "{:>2}. [{} / {} / {}] {}",
                i + 1,
                q.question_type,
                q.difficulty,
                q.category,
                q.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The "what to expect" block shown before the interview starts.
pub fn render_preview(domain: &Domain, session: &InterviewSession) -> String {
    let summary = summarize(session.questions());
    let mut out = String::new();
    let _ = writeln!(out, "{} with {}", domain.title, domain.persona_ref.display_name);
    let _ = writeln!(out, "Question Preview");
    let _ = writeln!(
        out,
        "  {} questions ({} technical, {} behavioral)",
        summary.total, summary.technical, summary.behavioral
    );
    let _ = writeln!(
        out,
        "  {} easy, {} medium, {} hard",
        summary.easy, summary.medium, summary.hard
    );
    let _ = writeln!(out, "Sample Questions:");
    for question in sample(session.questions(), PREVIEW_SAMPLE_SIZE) {
        let _ = writeln!(out, "  - {}", question.text);
    }
    let _ = write!(
        out,
        "Ready to meet {}? Type 'start' to begin.",
        domain.persona_ref.display_name
    );
    out
}

pub fn render_session(session: &InterviewSession) -> String {
    if !session.is_started() {
        return "Interview not started.".to_string();
    }
    let progress = session.progress();
    let mut out = String::new();
    if session.status() == SessionStatus::Paused {
        let _ = writeln!(out, "[paused]");
    }
    match session.mode() {
        NavigationMode::HostPaced => {
            let _ = writeln!(
                out,
                "Question {} of {}",
                progress.current_index + 1,
                progress.total
            );
            match session.current_question() {
                Some(question) => {
                    let _ = writeln!(
                        out,
                        "  [{} / {}] {}",
                        question.question_type, question.difficulty, question.text
                    );
                }
                None => {
                    let _ = writeln!(out, "  No questions for this domain.");
                }
            }
            let _ = write!(
                out,
                "Progress: {}% complete, {} remaining",
                progress.percent_complete, progress.remaining
            );
        }
        NavigationMode::RemotePaced => {
            let _ = write!(
                out,
                "The interviewer is pacing {} questions.",
                progress.total
            );
        }
    }
    out
}

pub fn render_connection(status: &ConnectionStatus, persona_name: &str) -> String {
    match status {
        ConnectionStatus::Idle => "Persona idle".to_string(),
        ConnectionStatus::Loading => format!("Initializing {persona_name}..."),
        ConnectionStatus::Connected => "Connected".to_string(),
        ConnectionStatus::Error(e) => format!("{}: {} (type 'retry')", e.title(), e),
    }
}

pub fn render_microphone(status: &MicrophoneStatus) -> String {
    match status {
        MicrophoneStatus::Disabled => "Microphone off".to_string(),
        MicrophoneStatus::Requesting => "Requesting microphone...".to_string(),
        MicrophoneStatus::Enabled => "Microphone on".to_string(),
        MicrophoneStatus::Denied(message) => message.clone(),
    }
}

pub fn render_event(event: &ConnectorEvent, persona_name: &str) -> String {
    match event {
        ConnectorEvent::Status(status) => render_connection(status, persona_name),
        ConnectorEvent::Microphone(status) => render_microphone(status),
        ConnectorEvent::Active(true) => format!("{persona_name} is live"),
        ConnectorEvent::Active(false) => format!("{persona_name} is paused"),
    }
}

pub fn render_connector(state: &ConnectorState, persona_name: &str) -> String {
    let mut out = format!(
        "{} | {}",
        render_connection(&state.status, persona_name),
        render_microphone(&state.microphone)
    );
    if let Some(url) = &state.embed_url {
        let _ = write!(out, "\nPersona view: {url}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_core::error::PersonaError;

    fn builtin() -> QuestionCatalog {
        QuestionCatalog::builtin().unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("start".parse::<PromptCommand>(), Ok(PromptCommand::Start));
        assert_eq!("  NEXT ".parse::<PromptCommand>(), Ok(PromptCommand::Next));
        assert_eq!("quit".parse::<PromptCommand>(), Ok(PromptCommand::Back));
        assert_eq!("back".parse::<PromptCommand>(), Ok(PromptCommand::Back));
        assert!("dance".parse::<PromptCommand>().is_err());
    }

    #[test]
    fn test_render_domains_lists_every_domain() {
        let out = render_domains(&builtin());
        assert!(out.contains("(frontend)"));
        assert!(out.contains("(backend)"));
        assert!(out.contains("(data-analyst)"));
        assert!(out.contains("Questions: 15"));
        assert!(out.contains("AI Persona: Evelyn Cross"));
    }

    #[test]
    fn test_render_questions_empty() {
        assert_eq!(render_questions(&[]), "No questions found.");
    }

    #[test]
    fn test_preview_shows_three_samples() {
        let catalog = builtin();
        let domain = catalog.domain("backend").unwrap();
        let session = InterviewSession::for_domain(&catalog, "backend", NavigationMode::HostPaced);

        let out = render_preview(domain, &session);

        assert!(out.contains("15 questions (10 technical, 5 behavioral)"));
        assert_eq!(out.matches("\n  - ").count(), PREVIEW_SAMPLE_SIZE);
        assert!(out.ends_with("Ready to meet Evelyn Cross? Type 'start' to begin."));
    }

    #[test]
    fn test_render_session_progress() {
        let catalog = builtin();
        let mut session =
            InterviewSession::for_domain(&catalog, "backend", NavigationMode::HostPaced);
        assert_eq!(render_session(&session), "Interview not started.");

        session.start();
        session.next_question();
        let out = render_session(&session);

        assert!(out.starts_with("Question 2 of 15"));
        assert!(out.ends_with("Progress: 13% complete, 13 remaining"));
    }

    #[test]
    fn test_render_paused_session() {
        let catalog = builtin();
        let mut session =
            InterviewSession::for_domain(&catalog, "frontend", NavigationMode::HostPaced);
        session.start();
        session.pause();
        assert!(render_session(&session).starts_with("[paused]"));
    }

    #[test]
    fn test_render_error_event_suggests_retry() {
        let event = ConnectorEvent::Status(ConnectionStatus::Error(
            PersonaError::ConnectionFailure("Failed to initialize persona: Bad Gateway".to_string()),
        ));
        assert_eq!(
            render_event(&event, "Evelyn Cross"),
            "Connection Error: Failed to initialize persona: Bad Gateway (type 'retry')"
        );
        assert_eq!(
            render_event(&ConnectorEvent::Status(ConnectionStatus::Loading), "Evelyn Cross"),
            "Initializing Evelyn Cross..."
        );
    }
}
