use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use tracing::info;

use proctop::app::App;
use proctop::config::{Config, load_config, load_config_from_path};
use proctop::event::{Event, EventHandler};
use proctop::logging::{Fallback, init_logging};
use proctop::system::collector::Collector;
use proctop::{report, ui};

#[derive(Parser)]
#[command(
    name = "proctop",
    about = "Minimal terminal process monitor reading /proc"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Read counters from this directory instead of /proc
    #[arg(long)]
    proc_root: Option<PathBuf>,

    /// Print a single snapshot and exit
    #[arg(long, default_value_t = false)]
    once: bool,

    /// With --once, print the snapshot as JSON
    #[arg(long, default_value_t = false, requires = "once")]
    json: bool,

    /// Append log output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    if cli.once {
        init_logging(&config.logging, Fallback::Stderr)?;
        return run_once(&config, cli.json);
    }

    init_logging(&config.logging, Fallback::Discard)?;
    info!(refresh_rate_ms = config.general.refresh_rate_ms, "starting");

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &config).await;
    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: &Config) -> Result<()> {
    let tick_rate = Duration::from_millis(config.general.refresh_rate_ms.max(1));
    let mut app = App::new(config);
    let mut events = EventHandler::new(tick_rate);

    terminal.draw(|frame| ui::draw(frame, &mut app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Key(key) => {
                if key.kind == crossterm::event::KeyEventKind::Press {
                    let action = app.map_key(key);
                    app.dispatch(action);
                }
            }
            Event::Tick => app.refresh_data(),
            Event::Resize => {}
        }
        terminal.draw(|frame| ui::draw(frame, &mut app))?;
    }

    info!("exiting");
    Ok(())
}

fn run_once(config: &Config, json: bool) -> Result<()> {
    let snapshot = Collector::from_config(config).refresh();
    if json {
        println!("{}", report::json(&snapshot)?);
    } else {
        print!("{}", report::plain_table(&snapshot)?);
    }
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(ref root) = cli.proc_root {
        config.paths.proc_root = root.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.logging.file = Some(file.clone());
    }

    config
}
