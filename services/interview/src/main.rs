use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mirror_core::Command;
use mirror_core::catalog::{
    Difficulty, Question, QuestionCatalog, QuestionType, filter_by_difficulty, filter_by_type,
    loader::load_catalog,
};
use mirror_core::connector::PersonaConnector;
use mirror_core::session_state::{InterviewSession, NavigationMode};
use mirror_service::config::Config;
use mirror_service::microphone_adapter::CpalMicrophone;
use mirror_service::persona_adapter::PersonaAdapter;
use mirror_service::view::{self, PromptCommand};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, mpsc};
use tracing_subscriber::fmt::time::ChronoLocal;

type Connector = PersonaConnector<PersonaAdapter<persona_client::Client>, CpalMicrophone>;

#[derive(Parser)]
#[command(name = "mirror", version, about = "Mock interviews with an AI persona")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the interview domains
    Domains,
    /// Browse the questions of a domain
    Questions {
        domain: String,
        #[arg(long = "type")]
        question_type: Option<QuestionType>,
        #[arg(long)]
        difficulty: Option<Difficulty>,
    },
    /// List audio input devices
    Devices,
    /// Run an interactive interview
    Interview {
        domain: String,
        /// host-paced or remote-paced
        #[arg(long)]
        mode: Option<NavigationMode>,
        /// Name the interviewer uses for you
        #[arg(long)]
        user: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load application configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    // --- 3. Parse Command-Line Arguments ---
    let args = Cli::parse();

    // --- 4. Load the Catalog ---
    let catalog = match &config.catalog_dir {
        Some(dir) => load_catalog(dir).context("Failed to load question catalog")?,
        None => QuestionCatalog::builtin().context("Built-in question catalog is invalid")?,
    };
    tracing::debug!("Loaded {} domains.", catalog.domains().len());

    match args.command {
        Commands::Domains => println!("{}", view::render_domains(&catalog)),
        Commands::Questions {
            domain,
            question_type,
            difficulty,
        } => {
            let all = catalog.lookup(&domain);
            let mut questions: Vec<&Question> = match difficulty {
                Some(difficulty) => filter_by_difficulty(all, difficulty),
                None => all.iter().collect(),
            };
            if let Some(question_type) = question_type {
                let matching = filter_by_type(all, question_type);
                questions.retain(|q| matching.contains(q));
            }
            println!("{}", view::render_questions(&questions));
        }
        Commands::Devices => {
            let devices = mirror_native_utils::device::get_available_inputs()
                .context("Failed to list audio input devices")?;
            println!("{}", mirror_native_utils::device::format_inputs(&devices));
        }
        Commands::Interview { domain, mode, user } => {
            let mode = mode.unwrap_or(config.navigation_mode);
            let user = user.unwrap_or_else(|| config.candidate_name.clone());
            run_interview(&config, &catalog, &domain, mode, &user).await?;
        }
    }
    Ok(())
}

async fn run_interview(
    config: &Config,
    catalog: &QuestionCatalog,
    domain_id: &str,
    mode: NavigationMode,
    user: &str,
) -> Result<()> {
    let Some(domain) = catalog.domain(domain_id) else {
        let known: Vec<&str> = catalog.domains().iter().map(|d| d.id.as_str()).collect();
        return Err(anyhow::anyhow!(
            "Unknown domain '{}'. Available: {}",
            domain_id,
            known.join(", ")
        ));
    };
    let persona_name = domain.persona_ref.display_name.clone();

    // --- Persona client, pointed at the credential proxy ---
    let mut client_config =
        persona_client::Config::builder().with_base_url(&config.persona_api_url);
    if let Some(embed_url) = &config.persona_embed_url {
        client_config = client_config.with_embed_url(embed_url);
    }
    let client = persona_client::Client::new(client_config.build());

    let connector: Arc<Connector> = Arc::new(
        PersonaConnector::new(
            domain.persona_ref.clone(),
            Arc::new(PersonaAdapter::new(client)),
            Arc::new(CpalMicrophone::new(config.microphone_device.clone())),
        )
        .with_timeout(config.connect_timeout),
    );

    // Create the command channel to decouple the session from the runtime.
    let (command_tx, mut command_rx) = mpsc::channel::<Command>(32);

    // This task executes the session's side effects against the connector.
    let connector_for_commands = Arc::clone(&connector);
    let command_handler = tokio::spawn(async move {
        while let Some(command) = command_rx.recv().await {
            match command {
                Command::BeginPersona(context) => {
                    tracing::info!("COMMAND RECEIVED: Begin persona for '{}'", context.domain_id);
                    // The handshake reports back through connector events.
                    if connector_for_commands.connect(context).is_none() {
                        println!("Connection already in progress.");
                    }
                }
                Command::UpdateContext(context) => {
                    tracing::debug!("COMMAND RECEIVED: Update context to #{}", context.question_index);
                    connector_for_commands.update_context(context);
                }
                Command::SetActive(is_active) => {
                    tracing::debug!("COMMAND RECEIVED: Set active {}", is_active);
                    connector_for_commands.set_active(is_active);
                }
                Command::Teardown => {
                    tracing::info!("COMMAND RECEIVED: Teardown");
                    if let Some(handle) = connector_for_commands.teardown() {
                        if let Err(e) = handle.await {
                            tracing::error!("Persona teardown task failed: {:?}", e);
                        }
                    }
                }
            }
        }
    });

    // This task prints connector events as they arrive.
    let mut events = connector.subscribe();
    let event_persona = persona_name.clone();
    let event_printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => println!("* {}", view::render_event(&event, &event_persona)),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Skipped {} connector events", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut session = InterviewSession::for_domain(catalog, domain_id, mode).with_user_label(user);
    println!("{}", view::render_preview(domain, &session));
    println!("{}", view::help());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read from stdin")?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received Ctrl-C, shutting down...");
                None
            }
        };
        // EOF leaves the interview like `back` does.
        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        let prompt = match line.parse::<PromptCommand>() {
            Ok(prompt) => prompt,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        let command = match prompt {
            PromptCommand::Start => session.start(),
            PromptCommand::Pause => session.pause(),
            PromptCommand::Resume => session.resume(),
            PromptCommand::Next => session.next_question(),
            PromptCommand::Prev => session.prev_question(),
            PromptCommand::Reset => session.reset(),
            PromptCommand::Mic => {
                // The result reaches the user through the event printer.
                let connector = Arc::clone(&connector);
                tokio::spawn(async move {
                    if let Err(e) = connector.toggle_microphone().await {
                        tracing::debug!("Microphone toggle failed: {}", e);
                    }
                });
                None
            }
            PromptCommand::Retry => {
                if connector.retry().is_none() {
                    println!("Nothing to retry.");
                }
                None
            }
            PromptCommand::Status => {
                println!("{}", view::render_session(&session));
                println!("{}", view::render_connector(&connector.state(), &persona_name));
                None
            }
            PromptCommand::Help => {
                println!("{}", view::help());
                None
            }
            PromptCommand::Back => break,
        };

        let Some(command) = command else { continue };
        let was_reset = command == Command::Teardown;
        if let Err(e) = command_tx.send(command).await {
            tracing::error!("Failed to send command to handler: {:?}", e);
            break;
        }
        if was_reset {
            println!("{}", view::render_preview(domain, &session));
        } else {
            println!("{}", view::render_session(&session));
        }
    }

    // Leaving discards the session: drain pending commands, then drop the remote session.
    tracing::info!("Shutting down...");
    drop(command_tx);
    if let Err(e) = command_handler.await {
        tracing::error!("Command handler failed: {:?}", e);
    }
    if let Some(handle) = connector.teardown() {
        if let Err(e) = handle.await {
            tracing::error!("Persona teardown task failed: {:?}", e);
        }
    }
    event_printer.abort();
    Ok(())
}
