pub mod catalog;
pub mod connector;
pub mod error;
pub mod generic_types;
pub mod persona_api;
pub mod session_state;

use generic_types::PersonaContext;

/// Represents commands that the core logic (`InterviewSession`) issues to the runtime.
///
/// This enum decouples the session's transitions from the runtime's execution
/// of side effects against the persona provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a remote persona session with the given context.
    BeginPersona(PersonaContext),
    /// The question context changed while the session is running.
    UpdateContext(PersonaContext),
    /// Dim or restore the persona's rendering.
    SetActive(bool),
    /// Drop the current remote session so a restart gets fresh context.
    Teardown,
}
