//! main.rs
//! Entry point for trek

use clap::Parser;
use trek_tui::app::AppState;
use trek_tui::config::Config;
use trek_tui::core::terminal;
use trek_tui::utils::cli::{Args, CliAction, handle_args, init_logging};

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[trek] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let args = Args::parse();
    init_logging(args.log.as_deref());

    let action = handle_args(&args);
    if let CliAction::Exit = action {
        return Ok(());
    }

    let config = Config::load();

    let opened = match action {
        CliAction::RunAppAtPath(path) => AppState::from_dir(&config, &path),
        _ => AppState::new(&config),
    };
    let mut app = match opened {
        Ok(app) => app,
        Err(e) => {
            log::error!("cannot open start directory: {e}");
            eprintln!("\n[trek] Error: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("trek started in {}", app.nav().current_dir().display());
    terminal::run_terminal(&mut app)
}
