use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use mail_polish::clipboard::{ClipboardWriter, Osc52Surface, SystemClipboard};
use mail_polish::config::ClientConfig;
use mail_polish::notify::Notifier;
use mail_polish::service::{HttpPolishService, PolishService};
use mail_polish::terminal::command::{HELP, is_body_terminator};
use mail_polish::terminal::{Command, TerminalView};
use mail_polish::theme::{ThemePreference, open_store, prefers_light_from_env};
use mail_polish::workflow::{FormEvent, WorkflowController, WorkflowDeps};

type StdinLines = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout belongs to the form (and OSC 52 sequences).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let Client {
        config,
        view,
        service,
        controller,
        theme,
    } = startup().context("Startup failed")?;

    eprintln!("✉️  mail-polish v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Backend: {}", config.base_url);
    match &config.theme_path {
        Some(path) => eprintln!("   Theme: {}", path.display()),
        None => eprintln!("   Theme: not persisted"),
    }
    eprintln!("   Type 'help' for commands, 'quit' to exit.\n");

    if let Err(e) = theme.load() {
        tracing::warn!("Theme preference not loaded: {e}");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    eprint!("> ");
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(cmd) => {
                run_command(cmd, &controller, &view, &theme, service.as_ref(), &mut lines).await?
            }
            Err(msg) => eprintln!("{msg}"),
        }
        eprint!("> ");
    }

    Ok(())
}

/// Everything the REPL drives.
struct Client {
    config: ClientConfig,
    view: Arc<TerminalView>,
    service: Arc<dyn PolishService>,
    controller: WorkflowController,
    theme: ThemePreference,
}

fn startup() -> mail_polish::error::Result<Client> {
    let config = ClientConfig::from_env()?;

    let view = Arc::new(TerminalView::stdout());
    let service: Arc<dyn PolishService> = Arc::new(HttpPolishService::new(&config)?);
    let notifier = Notifier::new(view.clone(), config.toast_duration);
    let clipboard = ClipboardWriter::new(
        Arc::new(SystemClipboard::new()),
        Arc::new(Osc52Surface::stdout()),
        notifier.clone(),
    );
    let controller = WorkflowController::new(
        &config,
        WorkflowDeps {
            view: view.clone(),
            service: Arc::clone(&service),
            notifier,
            clipboard,
        },
    );
    let theme = ThemePreference::new(
        open_store(config.theme_path.clone()),
        view.clone(),
        prefers_light_from_env(),
    );

    Ok(Client {
        config,
        view,
        service,
        controller,
        theme,
    })
}

async fn run_command(
    cmd: Command,
    controller: &WorkflowController,
    view: &TerminalView,
    theme: &ThemePreference,
    service: &dyn PolishService,
    lines: &mut StdinLines,
) -> anyhow::Result<()> {
    match cmd {
        Command::From(addr) => view.edit(|d| d.sender_email = addr),
        Command::To(addr) => view.edit(|d| d.recipient_email = addr),
        Command::Subject(subject) => view.edit(|d| d.subject = subject),
        Command::Tone(tone) => view.set_tone(tone),
        Command::Body => {
            eprintln!("Enter the body; finish with a line containing only '.'");
            let mut body = Vec::new();
            while let Some(line) = lines.next_line().await? {
                if is_body_terminator(&line) {
                    break;
                }
                body.push(line);
            }
            view.edit(|d| d.body = body.join("\n"));
            controller.dispatch(FormEvent::BodyInput).await;
        }
        Command::Show => view.print_fields(),
        Command::Polish => controller.dispatch(FormEvent::Analyze).await,
        Command::Copy => controller.dispatch(FormEvent::Copy).await,
        Command::Send => controller.dispatch(FormEvent::Send).await,
        Command::Submit => controller.dispatch(FormEvent::Submit).await,
        Command::Theme => {
            if let Err(e) = theme.toggle() {
                tracing::warn!("Theme preference not saved: {e}");
            }
        }
        Command::Health => match service.health().await {
            Ok(health) => view.line(&format!(
                "Backend {} (AI {})",
                health.status,
                if health.ai_available { "available" } else { "unavailable" }
            )),
            Err(e) => view.line(&format!("Backend unreachable: {e}")),
        },
        Command::Help => eprintln!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}
