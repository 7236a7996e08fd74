//! librarium - read catalog books in the terminal

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use unicode_width::UnicodeWidthChar;

use librarium::{FlowSettings, Librarium, LibrariumConfig, MonospaceMeasure, TextLayout};

#[derive(Parser)]
#[command(name = "librarium")]
#[command(version, about = "Read word-wrapped catalog books", long_about = None)]
#[command(after_help = "EXAMPLES:
    librarium list                          List catalog titles
    librarium read lilia --page 2 -w 40     Show page 2 wrapped at 40 columns
    librarium contents lilia                Print every page of a book")]
struct Cli {
    /// Directory holding the catalog
    #[arg(short, long, value_name = "DIR", default_value = librarium::config::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Catalog file name without the .json extension
    #[arg(short, long, value_name = "NAME", default_value = librarium::config::DEFAULT_FILE_NAME)]
    file_name: String,

    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every title in the catalog
    List,

    /// Print a book's full contents
    Contents {
        #[arg(value_name = "TITLE")]
        title: String,
    },

    /// Lay out one page of a book
    Read {
        #[arg(value_name = "TITLE")]
        title: String,

        /// Page number (1-based, clamped to the book)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Columns per line
        #[arg(short, long, default_value_t = 60)]
        width: usize,

        /// Lines per page
        #[arg(long, default_value_t = 20)]
        height: usize,

        /// Print layout tokens as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // One cell per column and one row per line.
    let flow = FlowSettings {
        line_height: 1.0,
        icon_advance: 2.0,
        ..FlowSettings::default()
    };
    let config = LibrariumConfig::new()
        .with_data_dir(cli.data_dir)
        .with_file_name(cli.file_name)
        .with_flow(flow);
    let mut library = Librarium::from_config(&config)?;

    match cli.command {
        Command::List => {
            for title in library.catalog().titles() {
                println!("{title}");
            }
        }
        Command::Contents { title } => {
            println!("{}", library.get_book_contents(&title)?);
        }
        Command::Read {
            title,
            page,
            width,
            height,
            json,
        } => {
            library.open_reading(&title)?;
            library.go_to_page(page)?;

            let measure = MonospaceMeasure::new(1.0)
                .with_base_font_size(library.settings().base_font_size);
            let layout = library.get_current_page_layout(&measure, width as f32, height as f32)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&layout)?);
            } else {
                let session = library.current_session()?;
                println!("{} ({})", session.title(), session.page_label());
                println!("{}", "-".repeat(width));
                print!("{}", render_grid(&layout));
                println!("{}", "-".repeat(width));
                if layout.overflow {
                    println!("(page overflows {height} lines)");
                }
            }
        }
    }

    Ok(())
}

/// Paint tokens into a character grid, one row per line. Icons show as `*`.
fn render_grid(layout: &TextLayout) -> String {
    // Wide characters are followed by a NUL filler cell.
    let mut rows: Vec<Vec<char>> = Vec::new();
    for token in &layout.tokens {
        let row = token.y.max(0.0).round() as usize;
        let mut col = token.x.max(0.0).round() as usize;
        if rows.len() <= row {
            rows.resize_with(row + 1, Vec::new);
        }
        let line = &mut rows[row];
        let text = if token.text.is_empty() { "*" } else { token.text.as_str() };
        for c in text.chars() {
            let cells = c.width().unwrap_or(0);
            if cells == 0 {
                continue;
            }
            if line.len() < col + cells {
                line.resize(col + cells, ' ');
            }
            line[col] = c;
            for filler in &mut line[col + 1..col + cells] {
                *filler = '\0';
            }
            col += cells;
        }
    }

    let mut out = String::new();
    for row in rows {
        let text: String = row.into_iter().filter(|&c| c != '\0').collect();
        out.push_str(text.trim_end());
        out.push('\n');
    }
    out
}
