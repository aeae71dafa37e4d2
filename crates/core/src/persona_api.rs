use crate::catalog::PersonaRef;
use crate::error::PersonaError;
use crate::generic_types::{PersonaContext, RemoteSession};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Abstracts the hosted persona provider so the connector can run against the
/// real HTTP client, the credential proxy, or a mock in tests.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PersonaApi: Send + Sync {
    /// Asks the provider to start a conversation for `persona` seeded with `context`.
    async fn start_session(
        &self,
        persona: &PersonaRef,
        context: &PersonaContext,
    ) -> Result<RemoteSession, PersonaError>;

    /// Tears down a session previously returned by `start_session`.
    async fn end_session(&self, session: &RemoteSession) -> Result<(), PersonaError>;

    /// The interactive view address for `persona`, if the provider has one.
    fn embed_url(&self, persona: &PersonaRef, context: &PersonaContext) -> Option<String>;
}

/// Access to the local audio input device.
///
/// `open` acquires the device; dropping the returned handle releases it.
pub trait AudioInput: Send + Sync + 'static {
    type Handle;

    fn open(&self) -> Result<Self::Handle, PersonaError>;
}
