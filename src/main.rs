use std::io::{self, BufRead};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use water_sort::cli::Cli;
use water_sort::gameplay::{Game, Status};
use water_sort::renderer::{RULES, TerminalRenderer};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the board on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.resolve().context("invalid configuration")?;
    let board = config.build_board().context("could not set up the board")?;
    let renderer = TerminalRenderer::new(config.symbol_list(), config.color, !cli.no_clear);
    let mut game = Game::new(board);

    let mut out = io::stdout().lock();
    if game.is_won() {
        renderer.render_win(&mut out, &game)?;
        return Ok(());
    }
    renderer.render_turn(&mut out, &game, Some(RULES))?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read a move")?;
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
            info!(moves = game.moves_made(), "player quit");
            return Ok(());
        }

        let message = match game.play(input) {
            Ok(turn) if turn.status == Status::Won => {
                renderer.render_win(&mut out, &game)?;
                return Ok(());
            }
            Ok(turn) => {
                debug!(action = %turn.action, moved = turn.moved, "turn played");
                None
            }
            Err(err) => {
                debug!(kind = ?err.kind(), "move rejected");
                Some(err.to_string())
            }
        };
        renderer.render_turn(&mut out, &game, message.as_deref())?;
    }

    info!("input closed");
    println!();
    Ok(())
}
