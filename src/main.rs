use cardform::application::session::FormSession;
use cardform::application::submit::PaymentSubmitter;
use cardform::config::CardFormConfig;
use cardform::infrastructure::in_memory::InMemoryTokenizationService;
use cardform::interfaces::csv::event_reader::EventReader;
use cardform::interfaces::csv::state_writer::StateWriter;
use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormKind {
    /// Card number, expiration, CVC and postal code
    Card,
    /// A standalone CVV field
    Cvv,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Recorded UI events CSV file
    input: PathBuf,

    /// Which form the events drive
    #[arg(long, value_enum, default_value_t = FormKind::Card)]
    form: FormKind,

    /// JSON form configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report errors on fields the user has not edited and left yet
    #[arg(long)]
    show_unedited: bool,

    /// Submit the form to the in-memory tokenizer after replaying events
    #[arg(long)]
    tokenize: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).into_diagnostic()?;

    let mut config = match &cli.config {
        Some(path) => CardFormConfig::from_path(path).into_diagnostic()?,
        None => CardFormConfig::default(),
    };
    if cli.show_unedited {
        config.ignore_unedited_field_errors = false;
    }

    let mut session = match cli.form {
        FormKind::Card => FormSession::card(&config),
        FormKind::Cvv => FormSession::cvv(&config),
    };

    // Replay events
    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = EventReader::new(file);
    for event_result in reader.events() {
        match event_result {
            Ok(event) => {
                if let Err(e) = session.apply(event) {
                    eprintln!("Error applying event: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Error reading event: {}", e);
            }
        }
    }

    let token = if cli.tokenize {
        let submitter = PaymentSubmitter::new(Box::new(InMemoryTokenizationService::new()));
        match session.submit(&submitter).await {
            Ok(token) => Some(token),
            Err(e) => {
                eprintln!("Submission rejected: {}", e);
                None
            }
        }
    } else {
        None
    };

    // Output final state
    let states = session.states();
    let stdout = io::stdout();
    let mut writer = StateWriter::new(stdout.lock());
    writer
        .write_states(states.iter().map(|(field, state)| (field.as_str(), state)))
        .into_diagnostic()?;
    writer
        .write_summary(session.is_valid(), &session.error_message())
        .into_diagnostic()?;
    if let Some(token) = token {
        writer.write_token(&token).into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;

    Ok(())
}
