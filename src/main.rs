//! cellkit demo CLI
//!
//! Drives the menus and progress bars against the real terminal.

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use crossterm::event::KeyCode;
use log::info;
use rayon::prelude::*;
use simplelog::LevelFilter;

use cellkit::logging::init_file_logger;
use cellkit::prompt::{exit_message, wait_for_key};
use cellkit::report::format_selection;
use cellkit::{
    CrosstermSurface, HighlightStyle, Menu, OutputFormat, ProgressIndicator, SharedSurface,
    Surface,
};

#[derive(Parser)]
#[command(name = "cellkit")]
#[command(about = "Terminal menus and progress bars, drawn cell by cell")]
#[command(version)]
struct Cli {
    /// Write a debug log to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Minimum level written to the log file
    #[arg(long, global = true, value_enum, default_value = "debug")]
    log_level: LogLevelArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick an option by pressing its number
    Numbered {
        /// Question shown above the options
        #[arg(long, default_value = "Enter a thing")]
        prompt: String,

        /// Output format for the selection
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,

        /// Options to choose from (at most nine)
        options: Vec<String>,
    },

    /// Pick an option with the arrow keys and Enter
    Highlight {
        /// Question shown above the options
        #[arg(long, default_value = "Enter a thing")]
        prompt: String,

        /// Leave the menu on screen after choosing
        #[arg(long)]
        keep: bool,

        /// Minimum highlight bar width
        #[arg(long)]
        min_width: Option<u16>,

        /// Output format for the selection
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,

        /// Options to choose from
        options: Vec<String>,
    },

    /// Animate several progress bars on consecutive rows
    Progress {
        /// Number of bars
        #[arg(long, default_value_t = 3)]
        bars: u16,

        /// Percentage points the first bar advances per tick
        #[arg(long, default_value_t = 1)]
        step: i32,

        /// Pause between ticks
        #[arg(long, default_value_t = 40)]
        delay_ms: u64,

        /// Update each bar from its own worker instead of round-robin
        #[arg(long)]
        parallel: bool,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => LevelFilter::Error,
            LogLevelArg::Warn => LevelFilter::Warn,
            LogLevelArg::Info => LevelFilter::Info,
            LogLevelArg::Debug => LevelFilter::Debug,
            LogLevelArg::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        if let Err(e) = init_file_logger(path, cli.log_level.into()) {
            eprintln!("Note: logging disabled: {}", e);
        }
    }

    let result = match cli.command {
        Commands::Numbered { prompt, format, options } => cmd_numbered(prompt, options, format.into()),
        Commands::Highlight { prompt, keep, min_width, format, options } => {
            cmd_highlight(prompt, options, keep, min_width, format.into())
        }
        Commands::Progress { bars, step, delay_ms, parallel } => {
            cmd_progress(bars, step, Duration::from_millis(delay_ms), parallel)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // A menu may have hidden the cursor before failing
            let mut surface = CrosstermSurface::stdout();
            let _ = surface.set_cursor_visible(true);
            let _ = surface.flush();
            if e.is_interrupted() {
                info!("interrupted by Ctrl+C");
                eprintln!();
                eprintln!("Interrupted.");
                // 128 + SIGINT, as a shell reports it
                return ExitCode::from(130);
            }
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

/// Options used when none are given on the command line.
fn demo_options(options: Vec<String>) -> Vec<String> {
    if options.is_empty() {
        ["RelativeLength 1", "RelativeLength 22", "RelativeLength 333", "RelativeLength 4444"]
            .map(String::from)
            .to_vec()
    } else {
        options
    }
}

fn cmd_numbered(prompt: String, options: Vec<String>, format: OutputFormat) -> cellkit::Result<()> {
    let mut surface = CrosstermSurface::stdout();
    let mut menu = Menu::numbered(&mut surface, prompt, demo_options(options))?;
    let selection = menu.get_selection(&mut surface)?;
    info!("numbered menu returned {:?}", selection);

    print!("{}", format_selection(&selection, format));
    if format == OutputFormat::Human {
        wait_for_key(&mut surface, KeyCode::Enter, &exit_message(KeyCode::Enter))?;
    }
    Ok(())
}

fn cmd_highlight(
    prompt: String,
    options: Vec<String>,
    keep: bool,
    min_width: Option<u16>,
    format: OutputFormat,
) -> cellkit::Result<()> {
    let defaults = HighlightStyle::default();
    let style = HighlightStyle {
        clear_after_selection: !keep,
        min_width: min_width.unwrap_or(defaults.min_width),
        ..defaults
    };

    let mut surface = CrosstermSurface::stdout();
    let mut menu = Menu::highlighted_with_style(&mut surface, prompt, demo_options(options), style)?;
    let selection = menu.get_selection(&mut surface)?;
    info!("highlight menu returned {:?}", selection);

    print!("{}", format_selection(&selection, format));
    if format == OutputFormat::Human {
        wait_for_key(&mut surface, KeyCode::Enter, &exit_message(KeyCode::Enter))?;
    }
    Ok(())
}

fn cmd_progress(bars: u16, step: i32, delay: Duration, parallel: bool) -> cellkit::Result<()> {
    let mut surface = CrosstermSurface::stdout();

    // Line breaks make room (scrolling if needed); the bars then take
    // the rows just above the cursor.
    for _ in 0..bars {
        surface.write_line("")?;
    }
    surface.flush()?;
    let first_row = surface.cursor_row()?.saturating_sub(bars);

    let mut indicators = (0..bars)
        .map(|i| ProgressIndicator::new(&mut surface, 0, first_row.saturating_add(i)))
        .collect::<cellkit::Result<Vec<_>>>()?;

    // Later bars move faster so they finish at different times
    let step_for = |i: usize| step.max(1).saturating_mul(i32::try_from(i + 1).unwrap_or(i32::MAX));

    let surface = if parallel {
        let shared = SharedSurface::new(surface);
        indicators
            .par_iter_mut()
            .enumerate()
            .try_for_each(|(i, bar)| -> cellkit::Result<()> {
                while !bar.is_done() {
                    let next = i32::from(bar.progress()).saturating_add(step_for(i));
                    shared.with(|s| bar.set_progress(s, next))?;
                    thread::sleep(delay);
                }
                Ok(())
            })?;
        shared
    } else {
        while indicators.iter().any(|bar| !bar.is_done()) {
            for (i, bar) in indicators.iter_mut().enumerate() {
                let next = i32::from(bar.progress()).saturating_add(step_for(i));
                bar.set_progress(&mut surface, next)?;
            }
            thread::sleep(delay);
        }
        SharedSurface::new(surface)
    };

    info!("{} progress bars finished", indicators.len());

    surface.with(|s| -> cellkit::Result<()> {
        s.move_cursor(0, first_row.saturating_add(bars))?;
        wait_for_key(s, KeyCode::Enter, &exit_message(KeyCode::Enter))
    })
}
