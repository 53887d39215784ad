//! Terminal dashboard for scoring urban heat risk and planning cooling
//! interventions per city.

mod app;
mod input;
mod ui;

use std::{env, fs, io, path::PathBuf, sync::Arc, time::Duration as StdDuration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;
use swelter_core::{
    config::AnalysisConfig,
    model::{Cities, CityMeta},
    plugin::{CityPlugin, PluginRegistry},
    service::SwelterService,
};
use swelter_provider_aqicn as aqicn;
use swelter_provider_gridexport as gridexport;

use crate::app::App;
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    // HTTP + service setup
    let client = Client::builder().user_agent("swelter/0.1").build()?;

    let token = env::var("AQICN_TOKEN").ok();
    let data_dir = PathBuf::from(env::var("SWELTER_DATA_DIR").unwrap_or_else(|_| "data".into()));
    let config = load_config()?;

    let plugins = builtin_cities()
        .into_iter()
        .map(|meta| {
            let export_path = data_dir.join(format!("{}.json", meta.id.0));
            CityPlugin {
                meta: meta.clone(),
                grid_port: gridexport::port(meta.clone(), export_path),
                air_quality_port: aqicn::port(client.clone(), token.clone(), meta),
            }
        })
        .collect();

    let registry = Arc::new(PluginRegistry::new(plugins));
    let service = Arc::new(SwelterService::new(registry, config)?);

    // App state
    let app = App::new(service);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

/// Read the optional TOML override named by `SWELTER_CONFIG`; defaults
/// otherwise. Either way the configuration is validated before the service
/// accepts it.
fn load_config() -> Result<AnalysisConfig> {
    match env::var("SWELTER_CONFIG") {
        Ok(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("reading config override {path}"))?;
            AnalysisConfig::from_toml_str(&raw)
                .with_context(|| format!("loading config override {path}"))
        }
        Err(_) => Ok(AnalysisConfig::default()),
    }
}

/// Cities with bundled grid exports, centred on their regions of interest.
fn builtin_cities() -> Vec<CityMeta> {
    vec![
        CityMeta {
            id: Cities::Pune.into(),
            name: String::from("Pune"),
            latitude: 18.5204,
            longitude: 73.8567,
        },
        CityMeta {
            id: Cities::Mumbai.into(),
            name: String::from("Mumbai"),
            latitude: 19.0760,
            longitude: 72.8777,
        },
        CityMeta {
            id: Cities::Delhi.into(),
            name: String::from("Delhi"),
            latitude: 28.7041,
            longitude: 77.1025,
        },
    ]
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            let action = input::handle_key_event(key, &mut app);

            match action {
                Action::Quit => break,
                Action::None => {}
                Action::RunAnalysis => {
                    let Some(city) = app.selected_city.clone() else {
                        app.error_message = Some("Select a city first".into());
                        continue;
                    };

                    app.is_loading = true;
                    app.error_message = None;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    let res = app.service.analyze(city.id, &app.plan, app.order).await;

                    app.is_loading = false;
                    match res {
                        Ok(analysis) => {
                            app.analysis = Some(analysis);
                            app.screen = app::Screen::Results;
                        }
                        Err(err) => {
                            app.error_message = Some(format!("Analysis failed: {err}"));
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
