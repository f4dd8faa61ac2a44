//! Sahayak application binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Build the scheme catalog, engines and dialogue controller
//! 3. Run the conversation over the terminal or the demo script
//! 4. Optionally print a JSON summary of what was learned
//!
//! `--init-config` writes the default configuration and exits.

mod cli;
mod console;

use std::io::Cursor;

use chrono::{DateTime, Local};
use clap::Parser;
use serde::Serialize;
use uuid::Uuid;

use sahayak_core::config::SahayakConfig;
use sahayak_core::types::{Contradiction, Interaction, UserProfile};
use sahayak_dialogue::{
    ConversationOutcome, ConversationRunner, DialogueController, Evaluation, PlannedAction,
    Recommendation, DEMO_SCRIPT,
};

use cli::{CliArgs, Mode};
use console::ConsoleVoice;

/// End-of-run report printed with `--json`.
#[derive(Debug, Serialize)]
struct ConversationSummary<'a> {
    session_id: Uuid,
    finished_at: DateTime<Local>,
    outcome: &'a ConversationOutcome,
    profile: UserProfile,
    contradictions: &'a [Contradiction],
    recommendations: &'a [Recommendation],
    evaluation: Evaluation,
    next_action: PlannedAction,
    recent_history: &'a [Interaction],
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config = SahayakConfig::load_or_default(&config_file);

    // Tracing.
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .init();

    tracing::info!("Starting Sahayak v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    if args.init_config {
        if SahayakConfig::init(&config_file)? {
            println!("Wrote default configuration to {}", config_file.display());
        } else {
            println!("Configuration already exists at {}", config_file.display());
        }
        return Ok(());
    }

    let mut controller = DialogueController::from_config(&config)?;
    let runner = ConversationRunner::new(&config.dialogue);

    let outcome = match args.mode {
        Mode::Voice => {
            tracing::info!("Voice mode: answers are read from the terminal");
            let mut voice = ConsoleVoice::stdio();
            runner.run(&mut controller, &mut voice)
        }
        Mode::Demo => {
            tracing::info!(utterances = DEMO_SCRIPT.len(), "Running text demo");
            let script = DEMO_SCRIPT.join("\n");
            let mut voice =
                ConsoleVoice::new(Cursor::new(script.into_bytes()), std::io::stdout()).with_echo();
            runner.run(&mut controller, &mut voice)
        }
    };

    if args.json {
        let memory = controller.memory();
        let summary = ConversationSummary {
            session_id: controller.session_id(),
            finished_at: Local::now(),
            outcome: &outcome,
            profile: memory.get_user_profile(),
            contradictions: memory.get_contradictions(),
            recommendations: controller.last_recommendations(),
            evaluation: controller.evaluate(),
            next_action: controller.plan_next(),
            recent_history: memory.get_history(config.dialogue.history_window),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
