use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tokio::runtime::Runtime;

use nwsboard::app::{run_app, TuiRenderer};
use nwsboard::cli::Args;
use nwsboard::config::Config;
use nwsboard::fetch::{fetch_snapshot, resolve_location, Clients};
use nwsboard::logging;
use nwsboard::render::{Renderer, TextRenderer, View};
use nwsboard::store::{LocalStore, StationRecord, STATION_KEY};

fn get_weather_data(
    rt: &Runtime,
    clients: &Clients,
    record: &StationRecord,
    config: &Config,
) -> View {
    match rt.block_on(fetch_snapshot(clients, record, config.pressure)) {
        Ok(snapshot) => View::Ready(Box::new(snapshot)),
        Err(err) => {
            tracing::warn!(error = %err, station = %record.station_id, "refresh failed");
            View::Unavailable(err.to_string())
        }
    }
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        existing(panic);
    }));
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_args(Args::parse());
    if config.once {
        logging::init_stderr();
    } else {
        logging::init_file(&config.config_dir)?;
    }

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime failed")?;
    let clients = Clients::from_config(&config)?;
    let store = LocalStore::open(&config.config_dir);

    if config.forget {
        store.remove(STATION_KEY)?;
        tracing::info!(path = %store.path().display(), "forgot saved location");
    }
    let record = rt.block_on(resolve_location(&clients, &store, &config.location))?;

    if config.once {
        let view = get_weather_data(&rt, &clients, &record, &config);
        TextRenderer::new(io::stdout().lock()).render(&view)?;
        if let View::Unavailable(reason) = view {
            anyhow::bail!(reason);
        }
        return Ok(());
    }

    // setup terminal
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut renderer = TuiRenderer::new(Terminal::new(backend)?);

    let res = run_app(&mut renderer, config.refresh, || {
        get_weather_data(&rt, &clients, &record, &config)
    });

    // restore terminal
    disable_raw_mode()?;
    let terminal = renderer.terminal_mut();
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
