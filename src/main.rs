// XRay: collapsible, cycle-safe value inspector

use std::fs::File;
use std::io;
use std::path::Path;
use std::rc::Rc;
use std::sync::Mutex;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use xray::config::InspectorConfig;
use xray::inspector::{Console, Inspector};
use xray::load::{load_config, load_value};
use xray::ui::App;

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} <file.json> [--config <config.json>]", program_name);
    eprintln!("       {} --demo [--config <config.json>]", program_name);
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} state.json                       # Inspect a JSON document", program_name);
    eprintln!("  {} --demo                           # Inspect the built-in sample", program_name);
    eprintln!("  {} state.json --config xray.json    # Apply collapse/count options", program_name);
    eprintln!();
    eprintln!("Set XRAY_LOG=<file> to write logs (filtered by RUST_LOG).");
}

/// Logs go to a file: the terminal belongs to the UI
fn init_logging() -> io::Result<()> {
    let Ok(log_path) = std::env::var("XRAY_LOG") else {
        return Ok(());
    };
    let file = File::create(log_path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("xray");

    let mut input = None;
    let mut config_path = None;
    let mut demo = false;
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--demo" => demo = true,
            "--config" => match rest.next() {
                Some(path) => config_path = Some(path.clone()),
                None => {
                    eprintln!("Error: --config needs a file");
                    print_usage(program_name);
                    std::process::exit(1);
                }
            },
            "-h" | "--help" => {
                print_usage(program_name);
                return Ok(());
            }
            _ => input = Some(arg.clone()),
        }
    }

    init_logging()?;

    let root = match (&input, demo) {
        (_, true) => xray::demo::sample(),
        (Some(file), false) => {
            if !Path::new(file).exists() {
                eprintln!("Error: File '{}' not found", file);
                print_usage(program_name);
                std::process::exit(1);
            }
            match load_value(Path::new(file)) {
                Ok(value) => value,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        (None, false) => {
            eprintln!("Error: No input file provided");
            eprintln!();
            print_usage(program_name);
            std::process::exit(1);
        }
    };

    let config = match &config_path {
        Some(path) => match load_config(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => InspectorConfig::default(),
    };

    let console = Rc::new(Console::new());
    let inspector = Inspector::with_sink(&config, &root, console.clone());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(inspector, root, console);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
