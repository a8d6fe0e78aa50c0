use clap::Parser;
use macroquad::prelude::*;
use tracing_subscriber::EnvFilter;

use water_sort::cli::Cli;
use water_sort::config::GameConfig;
use water_sort::gameplay::Game;
use water_sort::gui::GuiApp;

fn setup(cli: &Cli) -> Result<(Game<char>, GameConfig), water_sort::ConfigError> {
    let config = cli.resolve()?;
    let board = config.build_board()?;
    Ok((Game::new(board), config))
}

#[macroquad::main("Water Sort")]
async fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (game, config) = match setup(&cli) {
        Ok(ready) => ready,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    let mut app = GuiApp::new(game, config.symbol_list());
    loop {
        app.render();
        if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            app.handle_click(x, y);
        }
        if is_key_pressed(KeyCode::C) {
            app.copy_layout();
        }
        if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
            break;
        }
        next_frame().await;
    }
}
