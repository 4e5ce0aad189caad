use anyhow::Result;
use clap::Parser;
use crewdesk_core::{Config, Provider};

mod app;
mod handler;
mod logging;
mod render;
mod tui;
mod ui;

use app::App;
use tui::EventHandler;

#[derive(Parser)]
#[command(name = "crewdesk")]
#[command(about = "Chat with your employee management assistant", version)]
struct Cli {
    /// Who answers: "workflow" (remote engine) or "local" (offline matcher)
    #[arg(short, long)]
    provider: Option<String>,
    /// Base URL of the workflow engine
    #[arg(short, long)]
    url: Option<String>,
    /// Simulated latency for the local assistant, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
}

impl Cli {
    /// Flags override the config file and the environment
    fn apply(self, config: &mut Config) -> Result<()> {
        if let Some(provider) = self.provider {
            if Provider::from_str(&provider).is_none() {
                anyhow::bail!("unknown provider '{}', expected 'workflow' or 'local'", provider);
            }
            config.provider = Some(provider);
        }
        if let Some(url) = self.url {
            config.base_url = url;
        }
        if let Some(delay) = self.delay_ms {
            config.reply_delay_ms = delay;
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = logging::init_tracing()?;

    // Config file first, then environment, then flags
    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "could not read config, using defaults");
        Config::new()
    });
    config.apply_env(|key| std::env::var(key).ok());
    cli.apply(&mut config)?;

    tracing::info!(
        provider = config.provider().as_str(),
        base_url = %config.base_url,
        log = %log_path.display(),
        "starting crewdesk"
    );

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();
    let mut app = App::new(&config, events.sender());

    let result = run(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    result
}

async fn run(terminal: &mut tui::Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event)?,
            None => break,
        }
    }
    Ok(())
}
