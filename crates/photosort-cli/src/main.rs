mod exiftool;

use std::ffi::OsStr;
use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use photosort_core::writer;

/// Append-only error log, written next to wherever the tool is run.
const LOG_PATH: &str = "errors.log";

/// Sidecar and document files that are never media; matched on the raw
/// path suffix, case-sensitive.
const SKIP_EXTENSIONS: &[&str] = &[".py", ".json", ".txt", ".md", ".html"];

#[derive(Parser)]
#[command(
    name = "photosort",
    version,
    about = "Normalize a messy photo/video collection into a chronological layout"
)]
struct Cli {
    /// Directory to fix
    #[arg(short, long)]
    directory: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Clock offset added to every resolved timestamp, in seconds
    #[arg(short = 'D', long, default_value_t = 0)]
    delta: i64,
}

#[derive(Default)]
struct RunStats {
    moved: u64,
    unresolved: u64,
    rewrite_failures: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let t_total = std::time::Instant::now();

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("cannot create output directory {}", cli.output.display()))?;

    let mut files = Vec::new();
    collect_files(&cli.directory, cli.output.file_name(), &mut files)?;
    files.retain(|path| {
        let name = path.to_string_lossy();
        !SKIP_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
    });

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(ProgressStyle::with_template("[{bar:40}] {pos}/{len} {msg}")?.progress_chars("=> "));

    let mut stats = RunStats::default();
    for path in &files {
        if let Err(err) = process_file(path, &cli.output, cli.delta, &pb, &mut stats) {
            pb.println(format!("Error processing {}: {err:#}", path.display()));
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    eprintln!(
        "Done! {} file(s) moved, {} sent to {}, {} metadata rewrite failure(s) ({:.2}s)",
        stats.moved,
        stats.unresolved,
        writer::UNRESOLVED_DIR,
        stats.rewrite_failures,
        t_total.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Depth-first, sequential traversal. Dot-directories are skipped, and so is
/// any directory sharing the output directory's name — a name-only compare,
/// since the output tree may sit inside the input tree.
fn collect_files(dir: &Path, output_name: Option<&OsStr>, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("cannot read directory {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name();
        if path.is_dir() {
            if name.to_string_lossy().starts_with('.') || Some(name.as_os_str()) == output_name {
                continue;
            }
            collect_files(&path, output_name, files)?;
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(())
}

/// Resolve, relocate and re-stamp one file. Failures here never abort the
/// batch; the caller reports them and moves on.
fn process_file(
    path: &Path,
    output_root: &Path,
    delta: i64,
    pb: &ProgressBar,
    stats: &mut RunStats,
) -> Result<()> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("non-UTF-8 filename: {}", path.display()))?;

    let tags = exiftool::read_metadata(path)?;

    match photosort_core::place_file(&tags, filename, delta, output_root)? {
        Some(placement) => {
            pb.println(format!(
                "Found date in {} for {}",
                placement.source,
                path.display()
            ));
            move_file(path, &placement.target)?;
            stats.moved += 1;
            pb.println(format!(
                "Moving/Renaming {} to {}",
                path.display(),
                placement.target.display()
            ));
            if exiftool::write_dates(&placement.target, &placement.timestamp).is_err() {
                stats.rewrite_failures += 1;
                let line = format!(
                    "Failed to run Exiftool on {}, with date {}",
                    placement.target.display(),
                    exiftool::exif_date_value(&placement.timestamp)
                );
                pb.println(&line);
                log_error(&line)?;
            }
        }
        None => {
            let dump = serde_json::to_string(&tags).unwrap_or_default();
            log_error(&format!(
                "No date found for {} with metadata {}",
                path.display(),
                dump
            ))?;
            pb.println(format!("No date found for {}", path.display()));
            let target = writer::unresolved_target(output_root, filename)?;
            move_file(path, &target)?;
            stats.unresolved += 1;
            pb.println(format!("Moving {} to {}", path.display(), target.display()));
        }
    }
    Ok(())
}

/// Rename, falling back to copy+remove when the output root lives on a
/// different filesystem.
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to)
        .with_context(|| format!("cannot copy {} to {}", from.display(), to.display()))?;
    fs::remove_file(from).with_context(|| format!("cannot remove {}", from.display()))?;
    Ok(())
}

fn log_error(line: &str) -> Result<()> {
    let mut log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_PATH)
        .with_context(|| format!("cannot open {LOG_PATH}"))?;
    writeln!(log, "{line}")?;
    Ok(())
}
