mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use indoor_analytics::config::init_app_config;
use indoor_analytics::logging;
use indoor_analytics::registry;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;

    let mut app = App::new(config);
    let headless = args.headless || args.json || !is_terminal();

    // File logging keeps the alternate screen clean; the guard flushes on drop
    let _log_guard = if headless || args.export {
        logging::init_stderr(app.config.debug);
        None
    } else {
        Some(logging::init_file(&app.config.log_dir, app.config.debug)?)
    };

    apply_startup_selection(&mut app, &args);

    if args.export {
        let receipt = app.export()?;
        println!(
            "Exported {} records to {}",
            receipt.total_records,
            receipt.path.display()
        );
        return Ok(());
    }

    if headless {
        return event::run_headless(&app, args.json);
    }

    let mut terminal = terminal::setup()?;

    let result = event::run(&mut terminal, &mut app).await;

    terminal::cleanup();

    result
}

/// Seeds the filter and mode from CLI flags and applies them.
fn apply_startup_selection(app: &mut App, args: &CliArgs) {
    if let Some(building) = &args.building {
        app.editor.set_building(building);
    }
    if let Some(floor) = &args.floor {
        app.editor.set_floor(floor);
    }
    if let Some(area) = &args.area {
        app.editor.set_area(area);
    }
    if let Some(day_type) = args.day_type {
        app.editor.set_day_type(day_type);
    }
    for identifier in &args.select {
        if !app.editor.is_selected(identifier) {
            app.editor.toggle_identifier(identifier);
        }
    }

    if let Some(query) = &args.mode {
        match registry::find_mode(query) {
            Some(mode) => app.select_mode(mode),
            None => tracing::warn!(query = %query, "no visualization matches, keeping default"),
        }
    }

    app.apply_filters();
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
