//! wad-util: inspect WAD2/WAD3 texture archives and export their textures

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use wad_util::dump::ArchiveReport;
use wad_util::export::{export_textures, ImageFormat};
use wad_util::{Archive, ArchiveParse};

#[derive(Parser)]
#[command(name = "wad-util")]
#[command(about = "Inspect WAD2/WAD3 texture archives and export textures")]
#[command(version)]
struct Cli {
    /// Archive to read
    file: PathBuf,

    /// Print the header, lump and texture tables
    #[arg(short, long)]
    dump: bool,

    /// Export the first LEVELS mip levels (1 to 4) of every texture
    #[arg(
        short,
        long,
        value_name = "LEVELS",
        num_args = 0..=1,
        default_missing_value = "4"
    )]
    export: Option<u32>,

    /// Directory exported images are written to
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Image format for exported textures
    #[arg(short, long, value_enum, default_value = "bmp")]
    format: Format,

    /// Decode textures on the calling thread only
    #[arg(long)]
    sequential: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Bmp,
    Png,
}

impl From<Format> for ImageFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Bmp => ImageFormat::Bmp,
            Format::Png => ImageFormat::Png,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    )
    .init();

    let cli = Cli::parse();

    if cli.verbose > 0 {
        log::set_max_level(match cli.verbose {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    }

    let bytes = read_input(&cli.file)?;
    let archive = parse_archive(&cli, &bytes)?;

    if cli.dump || cli.export.is_none() {
        print!("{}", ArchiveReport(&archive));
    }

    if let Some(levels) = cli.export {
        if !archive.duplicate_names().is_empty() {
            log::warn!(
                "{} texture(s) share a name and overwrite each other on export",
                archive.duplicate_names().len()
            );
        }

        let start = Instant::now();
        let written = export_textures(
            archive.textures(),
            &cli.output,
            levels,
            cli.format.into(),
        )
        .with_context(|| {
            format!("Failed to export textures to {}", cli.output.display())
        })?;

        log::info!(
            "Exported {} image(s) in {:?}",
            written.len(),
            start.elapsed()
        );
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.is_dir() {
        bail!("{} is a directory", path.display());
    }

    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if bytes.is_empty() {
        bail!("{} is empty", path.display());
    }

    Ok(bytes)
}

fn parse_archive<'a>(cli: &Cli, bytes: &'a [u8]) -> Result<Archive<'a>> {
    let path = &cli.file;
    let start = Instant::now();

    let result: ArchiveParse = if cli.sequential {
        wad_util::parse(bytes)
    } else {
        wad_util::parse_parallel(bytes)
    };

    log::info!(
        "Parsed {} ({} bytes) in {:?}",
        path.display(),
        bytes.len(),
        start.elapsed()
    );

    result
        .into_result()
        .with_context(|| format!("Failed to parse {}", path.display()))
}
