use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use console::style;
use indicatif::HumanBytes;
use tracing::{debug, info};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use huffpack::{Compressor, Decompressor, HuffmanTree, TextEncoding};

mod progress;
use progress::ProgressMonitor;

#[derive(Parser)]
#[command(version, about = "Compress and decompress text with Huffman coding")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// How the uncompressed bytes are split into characters. Both directions
    /// have to use the same encoding.
    #[arg(long, global = true, value_enum, default_value_t = Encoding::Utf8)]
    encoding: Encoding,
    /// Log timings and stream details
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a text file
    Compress {
        /// File to compress, `-` for stdin
        input: PathBuf,
        /// Where to write the compressed stream, stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the Huffman tree to stderr
        #[arg(long)]
        show_tree: bool,
    },
    /// Decompress a file written by `compress`
    Decompress {
        /// File to decompress, `-` for stdin
        input: PathBuf,
        /// Where to write the text, stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Encoding {
    Utf8,
    Latin1,
}

impl From<Encoding> for TextEncoding {
    fn from(encoding: Encoding) -> Self {
        match encoding {
            Encoding::Utf8 => TextEncoding::Utf8,
            Encoding::Latin1 => TextEncoding::Latin1,
        }
    }
}

fn init_tracing(cli: &Cli) {
    let level = if cli.quiet {
        LevelFilter::ERROR
    } else if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(indicatif_layer.get_stderr_writer()),
        )
        .with(indicatif_layer)
        .with(level)
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(&cli);
    let encoding = TextEncoding::from(cli.encoding);

    match cli.command {
        Commands::Compress {
            input,
            output,
            show_tree,
        } => compress(&input, output.as_deref(), encoding, show_tree, cli.quiet),
        Commands::Decompress { input, output } => {
            decompress(&input, output.as_deref(), encoding, cli.quiet)
        }
    }
}

fn compress(
    input: &Path,
    output: Option<&Path>,
    encoding: TextEncoding,
    show_tree: bool,
    quiet: bool,
) -> Result<()> {
    let start = Instant::now();
    let data = read_input(input)?;
    let read_done = Instant::now();

    let mut compressed = Vec::new();
    let summary = Compressor::new(encoding)
        .compress(data.as_slice(), &mut compressed)
        .wrap_err_with(|| format!("could not compress {}", input.display()))?;
    let compress_done = Instant::now();
    info!(elapsed = ?(compress_done - read_done), "compressed {} characters", summary.character_count);
    debug!(
        distinct = summary.distinct_characters,
        tree = summary.tree_bytes,
        data = summary.data_bytes,
        "compressed stream layout"
    );

    write_output(output, &compressed)?;
    let write_done = Instant::now();
    info!(elapsed = ?(write_done - compress_done), "wrote {}", HumanBytes(compressed.len() as u64));
    info!(elapsed = ?(write_done - start), "done");

    if show_tree {
        let text = encoding.decode(&data)?;
        if let Some(tree) = HuffmanTree::from_text(&text) {
            eprint!("{tree}");
        }
    }
    if !quiet {
        let ratio = compressed.len() as f64 / data.len() as f64 * 100.0;
        eprintln!(
            "{} {} -> {} ({:.1}%)",
            style("compressed").green().bold(),
            HumanBytes(data.len() as u64),
            HumanBytes(compressed.len() as u64),
            ratio
        );
    }
    Ok(())
}

fn decompress(input: &Path, output: Option<&Path>, encoding: TextEncoding, quiet: bool) -> Result<()> {
    let start = Instant::now();
    let data = read_input(input)?;
    let read_done = Instant::now();

    let mut text = Vec::new();
    let summary = Decompressor::new(encoding)
        .decompress(data.as_slice(), &mut text)
        .wrap_err_with(|| format!("could not decompress {}", input.display()))?;
    let decompress_done = Instant::now();
    info!(elapsed = ?(decompress_done - read_done), "decompressed {} characters", summary.character_count);

    write_output(output, &text)?;
    let write_done = Instant::now();
    info!(elapsed = ?(write_done - decompress_done), "wrote {}", HumanBytes(text.len() as u64));
    info!(elapsed = ?(write_done - start), "done");

    if !quiet {
        eprintln!(
            "{} {} -> {}",
            style("decompressed").green().bold(),
            HumanBytes(data.len() as u64),
            HumanBytes(text.len() as u64)
        );
    }
    Ok(())
}

fn is_std_stream(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    if is_std_stream(path) {
        ProgressMonitor::new(io::stdin().lock(), None, "stdin")
            .read_to_end(&mut data)
            .wrap_err("could not read stdin")?;
    } else {
        let file = File::open(path).wrap_err_with(|| format!("could not open {}", path.display()))?;
        let size = file.metadata().map(|meta| meta.len()).ok();
        ProgressMonitor::new(file, size, &path.display().to_string())
            .read_to_end(&mut data)
            .wrap_err_with(|| format!("could not read {}", path.display()))?;
    }
    Ok(data)
}

/// Output is only created once the whole result is in memory, so a failed
/// run never leaves a partial file behind
fn write_output(path: Option<&Path>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) if !is_std_stream(path) => {
            let mut file =
                File::create(path).wrap_err_with(|| format!("could not create {}", path.display()))?;
            file.write_all(data)
                .wrap_err_with(|| format!("could not write {}", path.display()))?;
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data).wrap_err("could not write to stdout")?;
            stdout.flush()?;
        }
    }
    Ok(())
}
