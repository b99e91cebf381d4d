use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use crossterm::event::{poll as event_poll, read as event_read, Event as CrosstermEvent, KeyEventKind};
use files::app::session::BrowserSession;
use files::app::App;
use files::config::Config;
use files::config_io::{self, DirectoryContext};
use files::model::filesystem::{FileSystem, StdFileSystem};
use files::services::terminal_modes::{self, TerminalModes};
use files::services::time_source::RealTimeSource;
use files::services::{log_dirs, tracing_setup};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::{
    io::{self, stdout},
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

/// A lightweight terminal file browser
#[derive(Parser, Debug)]
#[command(name = "fresh-files")]
#[command(about = "Browse, create, delete, move and copy files and folders", long_about = None)]
#[command(version)]
struct Args {
    /// Folder to start in (default: current directory)
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for diagnostics (default: per-process file in the state dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Override the locale (e.g., 'en')
    #[arg(long, value_name = "LOCALE")]
    locale: Option<String>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Print the JSON Schema of the configuration file and exit
    #[arg(long)]
    dump_schema: bool,

    /// Print the directories used by fresh-files and exit
    #[arg(long)]
    show_paths: bool,
}

fn run_event_loop(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> AnyhowResult<()> {
    const FRAME_DURATION: Duration = Duration::from_millis(16);
    let mut last_render = Instant::now();
    let mut needs_render = true;

    loop {
        if app.process_async_messages() {
            needs_render = true;
        }

        if app.should_quit() {
            break;
        }

        if needs_render && last_render.elapsed() >= FRAME_DURATION {
            terminal.draw(|frame| app.render(frame))?;
            last_render = Instant::now();
            needs_render = false;
        }

        let timeout = if needs_render {
            FRAME_DURATION.saturating_sub(last_render.elapsed())
        } else {
            Duration::from_millis(50)
        };
        if !event_poll(timeout)? {
            continue;
        }

        match event_read()? {
            CrosstermEvent::Key(key_event) => {
                if key_event.kind == KeyEventKind::Press {
                    app.handle_key(key_event);
                    needs_render = true;
                }
            }
            CrosstermEvent::Mouse(mouse_event) => {
                if app.handle_mouse(mouse_event) {
                    needs_render = true;
                }
            }
            CrosstermEvent::Resize(width, height) => {
                tracing::debug!("Terminal resized to {}x{}", width, height);
                needs_render = true;
            }
            CrosstermEvent::Paste(text) => {
                app.paste_text(&text);
                needs_render = true;
            }
            _ => {}
        }
    }

    Ok(())
}

fn load_config(args: &Args, dir_context: &DirectoryContext) -> AnyhowResult<Config> {
    config_io::load_config(args.config.as_deref(), dir_context).with_context(|| {
        format!(
            "Failed to load config from {}",
            args.config
                .as_deref()
                .unwrap_or(&dir_context.config_path())
                .display()
        )
    })
}

fn run(args: Args) -> AnyhowResult<()> {
    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(log_dirs::main_log_path);
    if !tracing_setup::init_global(&log_file) {
        eprintln!("Warning: cannot write log file {}", log_file.display());
    }
    log_dirs::cleanup_stale_logs();
    tracing::info!("fresh-files starting");

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        terminal_modes::emergency_cleanup();
        original_hook(panic);
    }));

    let dir_context = DirectoryContext::from_system().context("Failed to locate config directory")?;
    let config = load_config(&args, &dir_context)?;
    files::i18n::init(args.locale.as_deref().or(config.locale.as_deref()));

    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let start_dir = match &args.path {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    let start_dir = fs
        .canonicalize(&start_dir)
        .with_context(|| format!("Cannot open {}", start_dir.display()))?;
    if !fs
        .is_folder(&start_dir)
        .with_context(|| format!("Cannot open {}", start_dir.display()))?
    {
        anyhow::bail!("{} is not a folder", start_dir.display());
    }
    let session = BrowserSession::new(fs, start_dir.clone(), config.browser.listing_options())
        .with_context(|| format!("Cannot list {}", start_dir.display()))?;
    tracing::info!("Browsing {:?}", start_dir);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("Failed to start background runtime")?;

    let mut app = App::new(
        session,
        config,
        Some(runtime.handle().clone()),
        RealTimeSource::shared(),
    );

    let mut terminal_modes = TerminalModes::enable()?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.clear()?;

    let result = run_event_loop(&mut app, &mut terminal);

    terminal_modes.undo();
    runtime.shutdown_timeout(Duration::from_secs(5));
    tracing::info!("fresh-files exiting");
    result
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    // Informational flags run before any terminal setup
    if args.show_paths {
        let dir_context = DirectoryContext::from_system()?;
        log_dirs::print_all_paths(&dir_context.config_path());
        return Ok(());
    }

    if args.dump_schema {
        println!("{}", Config::json_schema()?);
        return Ok(());
    }

    if args.dump_config {
        let dir_context = DirectoryContext::from_system()?;
        let config = load_config(&args, &dir_context)?;
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    run(args)
}
