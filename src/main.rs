mod app;
mod controller;
mod errors;
mod event_handlers;
mod logging;
mod rendering;
mod scripts;
mod settings;

use app::App;
use clap::Parser;
use controller::Console;
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture,
    },
    execute,
};
use duckling_api::HttpConsoleApi;
use settings::Settings;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let settings = Settings::parse();
    settings.validate()?;
    logging::init(&settings.log_path())?;

    let api = HttpConsoleApi::new(settings.server.clone());
    let app = App::new(Console::new(api), settings.server.to_string());

    let terminal = ratatui::init();
    execute!(std::io::stdout(), EnableMouseCapture, EnableBracketedPaste)?;
    let result = app.run(terminal).await;
    let cleanup =
        execute!(std::io::stdout(), DisableMouseCapture, DisableBracketedPaste);
    ratatui::restore();
    result?;
    cleanup?;
    Ok(())
}
