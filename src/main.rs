mod settings;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use netscape_bookmarks::parser::parse_file_with_diagnostics;
use netscape_bookmarks::report::{folder_counts, stats, truncate};
use netscape_bookmarks::{parse_file, Bookmark, Options};
use settings::Settings;

#[derive(Parser)]
#[command(name = "netscape-bookmarks", about = "Read Netscape bookmark exports as structured data")]
struct Cli {
    #[command(flatten)]
    flags: ParseFlags,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ParseFlags {
    /// Folder path separator (default: BOOKMARKS_SEPARATOR or ␝)
    #[arg(long, global = true)]
    separator: Option<String>,
    /// Capture <DD> descriptions
    #[arg(long, global = true)]
    descriptions: bool,
    /// Keep javascript: bookmarklets
    #[arg(long, global = true)]
    keep_bookmarklets: bool,
}

impl ParseFlags {
    fn apply(self, mut options: Options) -> Options {
        if let Some(separator) = self.separator {
            options.folder_path_separator = separator;
        }
        if self.descriptions {
            options.parse_description = true;
        }
        if self.keep_bookmarklets {
            options.ignore_bookmarklets = false;
        }
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print bookmarks as JSON
    Parse {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Show bookmark statistics
    Stats { file: PathBuf },
    /// Folders by bookmark count
    Folders {
        file: PathBuf,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
    /// List malformed entries that were recovered from
    Check { file: PathBuf },
}

#[derive(Serialize)]
struct FileBookmarks<'a> {
    file: &'a Path,
    bookmarks: &'a [Bookmark],
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to read BOOKMARKS_* settings")?;
    let options = cli.flags.apply(settings.options());
    info!(?options, "resolved parse options");

    match cli.command {
        Commands::Parse { files, pretty } => {
            let parsed: Vec<(PathBuf, Vec<Bookmark>)> = files
                .into_par_iter()
                .map(|path| -> Result<(PathBuf, Vec<Bookmark>)> {
                    let bookmarks = parse_file(&path, &options)
                        .with_context(|| format!("Failed to parse {}", path.display()))?;
                    Ok((path, bookmarks))
                })
                .collect::<Result<_>>()?;

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            if let [(_, bookmarks)] = parsed.as_slice() {
                write_json(&mut out, bookmarks, pretty)?;
            } else {
                let per_file: Vec<FileBookmarks> = parsed
                    .iter()
                    .map(|(file, bookmarks)| FileBookmarks { file, bookmarks })
                    .collect();
                write_json(&mut out, &per_file, pretty)?;
            }
            writeln!(out)?;
        }
        Commands::Stats { file } => {
            let bookmarks = read(&file, &options)?;
            let s = stats(&bookmarks, &options.folder_path_separator);
            println!("Bookmarks:    {}", s.bookmarks);
            println!("Folders:      {}", s.folders);
            println!("Top level:    {}", s.top_level);
            println!("Max depth:    {}", s.max_depth);
            println!("Tagged:       {} ({} distinct tags)", s.tagged, s.distinct_tags);
            println!("Private:      {}", s.private);
            println!("Described:    {}", s.with_description);
            println!("Dated:        {}", s.dated);
            println!("Bookmarklets: {}", s.bookmarklets);
        }
        Commands::Folders { file, limit } => {
            let bookmarks = read(&file, &options)?;
            let rows = folder_counts(&bookmarks, &options.folder_path_separator);
            if rows.is_empty() {
                println!("No bookmarks found.");
                return Ok(());
            }

            println!("{:>3} | {:<60} | {:>5}", "#", "Folder", "Count");
            println!("{}", "-".repeat(76));
            for (i, row) in rows.iter().take(limit).enumerate() {
                let path = if row.path.is_empty() {
                    "(top level)".to_string()
                } else {
                    row.path.join(" / ")
                };
                println!("{:>3} | {:<60} | {:>5}", i + 1, truncate(&path, 57), row.bookmarks);
            }
            println!("\n{} folders, {} bookmarks", rows.len(), bookmarks.len());
        }
        Commands::Check { file } => {
            let parsed = parse_file_with_diagnostics(&file, &options)
                .with_context(|| format!("Failed to parse {}", file.display()))?;
            for d in &parsed.diagnostics {
                println!("{}", d);
            }
            println!(
                "{}: {} bookmarks, {} issue(s)",
                file.display(),
                parsed.bookmarks.len(),
                parsed.diagnostics.len()
            );
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("Done in {:.1}s", elapsed.as_secs_f64());
    }
    Ok(())
}

fn read(file: &Path, options: &Options) -> Result<Vec<Bookmark>> {
    parse_file(file, options).with_context(|| format!("Failed to parse {}", file.display()))
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(out, value)?;
    } else {
        serde_json::to_writer(out, value)?;
    }
    Ok(())
}
