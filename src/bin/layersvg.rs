use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "layersvg", version)]
struct Cli {
    /// Log filter (e.g. `warn`, `layersvg=debug`).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a JSON layer document to SVG.
    Convert(ConvertArgs),
    /// Validate a JSON layer document and print conversion warnings.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct LimitArgs {
    /// JSON file with conversion options; flags below override it.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Maximum group nesting depth.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Wall-clock budget in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Prefix for generated element ids.
    #[arg(long)]
    id_prefix: Option<String>,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    limits: LimitArgs,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    limits: LimitArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&cli.log_level)
                .with_context(|| format!("invalid log level '{}'", cli.log_level))?,
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f)).with_context(|| format!("parse {what} JSON"))
}

fn options(args: &LimitArgs) -> anyhow::Result<layersvg::ConvertOptions> {
    let mut opts = match &args.options {
        Some(path) => read_json(path, "options")?,
        None => layersvg::ConvertOptions::default(),
    };
    if let Some(depth) = args.max_depth {
        opts.limits.max_depth = depth;
    }
    if let Some(ms) = args.timeout_ms {
        opts.limits.timeout_ms = Some(ms);
    }
    if let Some(prefix) = &args.id_prefix {
        opts.id_prefix.clone_from(prefix);
    }
    Ok(opts)
}

fn report(warnings: &[layersvg::Warning]) {
    for w in warnings {
        eprintln!("warning: {w}");
    }
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let doc: layersvg::Document = read_json(&args.in_path, "document")?;
    let opts = options(&args.limits)?;
    let out = layersvg::convert(&doc, &opts)?;
    report(&out.warnings);

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, out.to_svg_string())
        .with_context(|| format!("write svg '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let doc: layersvg::Document = read_json(&args.in_path, "document")?;
    doc.validate()?;
    let opts = options(&args.limits)?;
    let out = layersvg::convert(&doc, &opts)?;
    report(&out.warnings);
    println!(
        "ok: {} layers, {} nodes, {} warnings",
        doc.layers.len(),
        out.tree.len(),
        out.warnings.len()
    );
    Ok(())
}
