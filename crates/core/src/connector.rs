use crate::catalog::PersonaRef;
use crate::error::PersonaError;
use crate::generic_types::{
    ConnectionStatus, ConnectorEvent, MicrophoneStatus, PersonaContext, RemoteSession,
};
use crate::persona_api::{AudioInput, PersonaApi};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// How long a handshake may stay silent before the session is assumed connected.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

const EVENT_CAPACITY: usize = 64;

/// Snapshot of everything the connector reports to its view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorState {
    /// Bumped on every connect and teardown; responses for an older value are dropped.
    pub generation: u64,
    pub status: ConnectionStatus,
    pub microphone: MicrophoneStatus,
    pub is_active: bool,
    pub embed_url: Option<String>,
}

struct Shared {
    state: ConnectorState,
    context: Option<PersonaContext>,
    remote: Option<RemoteSession>,
    /// Bumped only on teardown, so a reconnect does not void a pending microphone check.
    microphone_epoch: u64,
}

fn lock_shared(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

fn publish(events: &broadcast::Sender<ConnectorEvent>, event: ConnectorEvent) {
    if events.send(event).is_err() {
        tracing::trace!("No connector event subscribers");
    }
}

async fn end_remote<A: PersonaApi + ?Sized>(api: &A, remote: &RemoteSession) {
    match api.end_session(remote).await {
        Ok(()) => tracing::info!("Ended persona session {:?}", remote.session_id),
        Err(e) => tracing::warn!("Failed to end persona session: {}", e),
    }
}

/// Applies `status` only if no connect/teardown happened since `generation`.
fn update_status(
    shared: &Mutex<Shared>,
    events: &broadcast::Sender<ConnectorEvent>,
    generation: u64,
    status: ConnectionStatus,
) {
    {
        let mut shared = lock_shared(shared);
        if shared.state.generation != generation {
            tracing::debug!(
                "Dropping stale persona response for generation {} (current {})",
                generation,
                shared.state.generation
            );
            return;
        }
        if shared.state.status == status {
            return;
        }
        shared.state.status = status.clone();
    }
    publish(events, ConnectorEvent::Status(status));
}

/// Boundary component that owns the remote persona session and the
/// microphone capability.
///
/// It holds no interview logic: it mirrors `is_active` and the persona context
/// into its own state and reports a coarse connection status. None of its
/// operations block; the handshake and the microphone probe run on spawned
/// tasks and write their results back through the shared state.
pub struct PersonaConnector<A: ?Sized, M> {
    persona: PersonaRef,
    api: Arc<A>,
    microphone: Arc<M>,
    timeout: Duration,
    shared: Arc<Mutex<Shared>>,
    events: broadcast::Sender<ConnectorEvent>,
}

impl<A, M> PersonaConnector<A, M>
where
    A: PersonaApi + ?Sized + 'static,
    M: AudioInput,
{
    pub fn new(persona: PersonaRef, api: Arc<A>, microphone: Arc<M>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            persona,
            api,
            microphone,
            timeout: DEFAULT_CONNECT_TIMEOUT,
            shared: Arc::new(Mutex::new(Shared {
                state: ConnectorState {
                    generation: 0,
                    status: ConnectionStatus::Idle,
                    microphone: MicrophoneStatus::Disabled,
                    is_active: true,
                    embed_url: None,
                },
                context: None,
                remote: None,
                microphone_epoch: 0,
            })),
            events,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn persona(&self) -> &PersonaRef {
        &self.persona
    }

    pub fn state(&self) -> ConnectorState {
        lock_shared(&self.shared).state.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConnectorEvent> {
        self.events.subscribe()
    }

    /// Starts a handshake with the provider. Returns `None` if one is
    /// already in flight.
    pub fn connect(&self, context: PersonaContext) -> Option<JoinHandle<()>> {
        let generation = {
            let mut shared = lock_shared(&self.shared);
            if shared.state.status == ConnectionStatus::Loading {
                tracing::warn!(
                    "Connection to {} already in progress, ignoring request",
                    self.persona.display_name
                );
                return None;
            }
            shared.state.generation += 1;
            shared.state.status = ConnectionStatus::Loading;
            shared.state.embed_url = self.api.embed_url(&self.persona, &context);
            shared.context = Some(context.clone());
            shared.remote = None;
            shared.state.generation
        };
        publish(&self.events, ConnectorEvent::Status(ConnectionStatus::Loading));
        tracing::info!("Initializing {}...", self.persona.display_name);

        let api = Arc::clone(&self.api);
        let shared = Arc::clone(&self.shared);
        let events = self.events.clone();
        let persona = self.persona.clone();
        let timeout = self.timeout;

        Some(tokio::spawn(async move {
            let mut request = api.start_session(&persona, &context);
            let result = match tokio::time::timeout(timeout, &mut request).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        "No answer from persona provider within {:?}, assuming connected",
                        timeout
                    );
                    update_status(&shared, &events, generation, ConnectionStatus::Connected);
                    request.await
                }
            };

            match result {
                Ok(remote) => {
                    tracing::info!(
                        "Persona {} initialized: {:?}",
                        persona.display_name,
                        remote.session_id
                    );
                    let orphaned = {
                        let mut guard = lock_shared(&shared);
                        if guard.state.generation == generation {
                            guard.remote = Some(remote);
                            None
                        } else {
                            Some(remote)
                        }
                    };
                    match orphaned {
                        None => {
                            update_status(&shared, &events, generation, ConnectionStatus::Connected)
                        }
                        Some(remote) => {
                            tracing::debug!(
                                "Session {:?} arrived after its connection was replaced, ending it",
                                remote.session_id
                            );
                            end_remote(api.as_ref(), &remote).await;
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("Persona initialization error: {}", e);
                    update_status(&shared, &events, generation, ConnectionStatus::Error(e));
                }
            }
        }))
    }

    /// Re-runs the last connection attempt from scratch. Only valid from `Error`.
    pub fn retry(&self) -> Option<JoinHandle<()>> {
        let context = {
            let shared = lock_shared(&self.shared);
            match (&shared.state.status, &shared.context) {
                (ConnectionStatus::Error(_), Some(context)) => context.clone(),
                (status, _) => {
                    tracing::debug!("Nothing to retry in state {:?}", status);
                    return None;
                }
            }
        };
        self.connect(context)
    }

    pub fn set_active(&self, is_active: bool) {
        {
            let mut shared = lock_shared(&self.shared);
            if shared.state.is_active == is_active {
                return;
            }
            shared.state.is_active = is_active;
        }
        publish(&self.events, ConnectorEvent::Active(is_active));
    }

    /// Records new question context. The running remote session is kept.
    pub fn update_context(&self, context: PersonaContext) {
        let mut shared = lock_shared(&self.shared);
        shared.state.embed_url = self.api.embed_url(&self.persona, &context);
        shared.context = Some(context);
    }

    /// Returns to `Idle`, invalidating in-flight responses, and ends the
    /// remote session if one was established.
    pub fn teardown(&self) -> Option<JoinHandle<()>> {
        let (remote, microphone_was_on) = {
            let mut shared = lock_shared(&self.shared);
            shared.state.generation += 1;
            shared.microphone_epoch += 1;
            shared.state.status = ConnectionStatus::Idle;
            shared.state.is_active = true;
            shared.state.embed_url = None;
            let microphone_was_on = shared.state.microphone != MicrophoneStatus::Disabled;
            shared.state.microphone = MicrophoneStatus::Disabled;
            shared.context = None;
            (shared.remote.take(), microphone_was_on)
        };
        publish(&self.events, ConnectorEvent::Status(ConnectionStatus::Idle));
        if microphone_was_on {
            publish(&self.events, ConnectorEvent::Microphone(MicrophoneStatus::Disabled));
        }

        let remote = remote?;
        let api = Arc::clone(&self.api);
        Some(tokio::spawn(async move {
            end_remote(api.as_ref(), &remote).await;
        }))
    }

    /// Enables the microphone after a permission check, or disables it.
    ///
    /// The check acquires the input device and releases it before returning,
    /// on both the granted and the denied path.
    pub async fn toggle_microphone(&self) -> Result<MicrophoneStatus, PersonaError> {
        let epoch = {
            let mut shared = lock_shared(&self.shared);
            match shared.state.microphone {
                MicrophoneStatus::Requesting => {
                    tracing::debug!("Microphone request already pending");
                    return Ok(MicrophoneStatus::Requesting);
                }
                MicrophoneStatus::Enabled => {
                    shared.state.microphone = MicrophoneStatus::Disabled;
                    None
                }
                MicrophoneStatus::Disabled | MicrophoneStatus::Denied(_) => {
                    shared.state.microphone = MicrophoneStatus::Requesting;
                    Some(shared.microphone_epoch)
                }
            }
        };
        let Some(epoch) = epoch else {
            publish(&self.events, ConnectorEvent::Microphone(MicrophoneStatus::Disabled));
            return Ok(MicrophoneStatus::Disabled);
        };
        publish(&self.events, ConnectorEvent::Microphone(MicrophoneStatus::Requesting));

        let microphone = Arc::clone(&self.microphone);
        let outcome = tokio::task::spawn_blocking(move || microphone.open().map(drop))
            .await
            .unwrap_or_else(|e| {
                Err(PersonaError::PermissionDenied(format!(
                    "Microphone check did not complete: {e}"
                )))
            });

        let status = match &outcome {
            Ok(()) => MicrophoneStatus::Enabled,
            Err(e) => {
                tracing::warn!("Microphone unavailable: {}", e);
                MicrophoneStatus::Denied(e.to_string())
            }
        };
        {
            let mut shared = lock_shared(&self.shared);
            if shared.microphone_epoch != epoch {
                tracing::debug!("Connector was torn down during microphone check");
                return outcome.map(|()| MicrophoneStatus::Disabled);
            }
            shared.state.microphone = status.clone();
        }
        publish(&self.events, ConnectorEvent::Microphone(status.clone()));
        outcome.map(|()| status)
    }
}
