mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;

use config::Settings;
use controller::{Actions, CommandEntry, InputHandler, SearchEntry, Vimpd};
use model::{AppModel, Mode, MpdClient};
use view::Screen;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== vimpd starting ===");

    let settings = Settings::from_env();

    let library = MpdClient::load_library(&settings.host, settings.port).await?;
    let client = MpdClient::connect(&settings.host, settings.port).await?;

    let model = Arc::new(Mutex::new(AppModel::new(library)));

    let actions = Actions::new(model.clone(), client.clone());
    let command = CommandEntry::new(model.clone(), client.clone());
    let search = SearchEntry::new(model.clone());

    // Startup commands run through a typed handle to the command handler,
    // before it joins the mode table.
    let proceed = match config::rc_path() {
        Some(path) => config::run_startup_commands(&path, &command)?,
        None => true,
    };

    if proceed {
        let mut handlers: BTreeMap<Mode, Box<dyn InputHandler>> = BTreeMap::new();
        handlers.insert(Mode::Normal, Box::new(actions));
        handlers.insert(Mode::Command, Box::new(command));
        handlers.insert(Mode::Search, Box::new(search));

        let mut screen = Screen::new(model.clone())?;
        let mut vimpd = Vimpd::new(handlers);

        let result = vimpd.run(&mut screen);

        // Restore the terminal before reporting any run error
        screen.restore()?;
        result?;
    } else {
        tracing::info!("startup command requested quit, not entering the input loop");
    }

    tracing::info!("vimpd shutting down");
    Ok(())
}
