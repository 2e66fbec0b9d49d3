use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tokenpaint::{
    Bindings, DocumentFormat, GifPlan, GifQuality, Lottie, Svg, SvgCounting, TokenSession,
    ToolConfig,
};

#[derive(Parser, Debug)]
#[command(name = "tokenpaint", version)]
struct Cli {
    /// Tool config JSON; command-line flags override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log more to stderr (`-v` debug, `-vv` trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the distinct fill/stroke colors of a document.
    Extract(ExtractArgs),
    /// Bind colors to token names and write the rewritten document.
    Apply(ApplyArgs),
    /// Convert a video clip to an optimized GIF (requires `ffmpeg` on PATH).
    Gif(GifArgs),
    /// Print the video id of a YouTube URL.
    VideoId(VideoIdArgs),
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Input Lottie JSON or SVG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Document format; detected from the extension when omitted.
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// How overlapping SVG matches are counted.
    #[arg(long, value_enum)]
    counting: Option<CountingChoice>,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Print every paint site instead of the ranked palette.
    #[arg(long)]
    sites: bool,
}

#[derive(Parser, Debug)]
struct ApplyArgs {
    /// Input Lottie JSON or SVG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// JSON object mapping colors to token names, e.g. `{"#ff0000": "primary"}`.
    #[arg(long)]
    bindings: PathBuf,

    /// Output path; defaults to `<name>_with_variables.<ext>` next to the input.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Document format; detected from the extension when omitted.
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// Rewrite even if some colors have no name.
    #[arg(long)]
    allow_partial: bool,
}

#[derive(Parser, Debug)]
struct GifArgs {
    /// Input video.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output GIF; defaults to the input with a `.gif` extension.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Start time in seconds.
    #[arg(long)]
    start: Option<f64>,

    /// End time in seconds.
    #[arg(long)]
    end: Option<f64>,

    /// Output width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Output frame rate.
    #[arg(long)]
    fps: Option<u32>,

    #[arg(long, value_enum)]
    quality: Option<QualityChoice>,

    /// Print the ffmpeg commands instead of running them.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Parser, Debug)]
struct VideoIdArgs {
    url: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Lottie,
    Svg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CountingChoice {
    PerMatch,
    PerOccurrence,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum QualityChoice {
    Ultra,
    High,
    Medium,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut cfg = match &cli.config {
        Some(path) => ToolConfig::from_path(path)?,
        None => ToolConfig::default(),
    };

    match cli.cmd {
        Command::Extract(args) => {
            if let Some(counting) = args.counting {
                cfg.svg_counting = match counting {
                    CountingChoice::PerMatch => SvgCounting::PerMatch,
                    CountingChoice::PerOccurrence => SvgCounting::PerOccurrence,
                };
            }
            match resolve_format(&args.in_path, args.format)? {
                FormatChoice::Lottie => cmd_extract::<Lottie>(&args, &cfg),
                FormatChoice::Svg => cmd_extract::<Svg>(&args, &cfg),
            }
        }
        Command::Apply(args) => match resolve_format(&args.in_path, args.format)? {
            FormatChoice::Lottie => cmd_apply::<Lottie>(&args, &cfg),
            FormatChoice::Svg => cmd_apply::<Svg>(&args, &cfg),
        },
        Command::Gif(args) => cmd_gif(args, cfg),
        Command::VideoId(args) => {
            let id = tokenpaint::extract_video_id(args.url.trim())
                .ok_or(tokenpaint::TranscriptError::InvalidUrl)?;
            println!("{id}");
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_format(path: &Path, explicit: Option<FormatChoice>) -> anyhow::Result<FormatChoice> {
    if let Some(format) = explicit {
        return Ok(format);
    }
    let name = file_name(path)?;
    if Lottie::accepts(name) {
        Ok(FormatChoice::Lottie)
    } else if Svg::accepts(name) {
        Ok(FormatChoice::Svg)
    } else {
        anyhow::bail!("cannot tell the format of '{}'; pass --format", path.display())
    }
}

fn file_name(path: &Path) -> anyhow::Result<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("'{}' has no usable file name", path.display()))
}

/// With `forced` set the format came from `--format`, so the extension is not checked.
fn load_session<F: DocumentFormat>(
    path: &Path,
    forced: bool,
    cfg: &ToolConfig,
) -> anyhow::Result<TokenSession<F>> {
    let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
    let name = file_name(path)?;
    let mut session = TokenSession::<F>::from_config(cfg);
    let loaded = if forced {
        session.load_as(name, &bytes)
    } else {
        session.load(name, &bytes)
    };
    loaded.with_context(|| format!("load '{}'", path.display()))?;
    Ok(session)
}

fn cmd_extract<F: DocumentFormat>(args: &ExtractArgs, cfg: &ToolConfig) -> anyhow::Result<()> {
    if args.sites {
        return print_sites(args, cfg);
    }

    let session = load_session::<F>(&args.in_path, args.format.is_some(), cfg)?;
    let colors = session.colors();
    if args.json {
        println!("{}", serde_json::to_string_pretty(colors)?);
        return Ok(());
    }

    if colors.is_empty() {
        eprintln!("no paint colors found in {}", args.in_path.display());
    }
    for c in colors {
        println!("{}\t{}", c.hex, c.count);
    }
    Ok(())
}

fn print_sites(args: &ExtractArgs, cfg: &ToolConfig) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read '{}'", args.in_path.display()))?;

    match resolve_format(&args.in_path, args.format)? {
        FormatChoice::Lottie => {
            let doc = tokenpaint::lottie::parse(&text)?;
            let sites = tokenpaint::lottie::paint_sites(&doc);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&sites)?);
                return Ok(());
            }
            for site in &sites {
                let animated = if site.keyframed { "\tkeyframed" } else { "" };
                println!(
                    "{}\t{}\t{}{animated}",
                    site.rgb.to_hex(),
                    site.role.tag(),
                    site.path
                );
            }
        }
        FormatChoice::Svg => {
            let matches = tokenpaint::svg::counted_matches(&text, cfg.svg_counting);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&matches)?);
                return Ok(());
            }
            for m in &matches {
                println!(
                    "{}\t{:?}\t{}..{}\t{}",
                    m.rgb.to_hex(),
                    m.scanner,
                    m.span.start,
                    m.span.end,
                    &text[m.span.clone()]
                );
            }
        }
    }
    Ok(())
}

fn cmd_apply<F: DocumentFormat>(args: &ApplyArgs, cfg: &ToolConfig) -> anyhow::Result<()> {
    let mut session = load_session::<F>(&args.in_path, args.format.is_some(), cfg)?;

    let raw = std::fs::read_to_string(&args.bindings)
        .with_context(|| format!("read bindings '{}'", args.bindings.display()))?;
    let bindings: Bindings = serde_json::from_str(&raw)
        .with_context(|| format!("parse bindings '{}'", args.bindings.display()))?;

    for (key, name) in bindings.iter() {
        if session.colors().iter().any(|c| c.key == key) {
            session.set_name(key, name)?;
        } else {
            tracing::warn!(color = %key, token = name, "binding for a color the document does not use");
        }
    }

    if args.allow_partial {
        session.apply_partial()?;
    } else {
        session.apply()?;
    }

    let export = session.export()?;
    let out = args
        .out
        .clone()
        .unwrap_or_else(|| args.in_path.with_file_name(&export.file_name));
    tokenpaint::encode::gif::ensure_parent_dir(&out)?;
    std::fs::write(&out, &export.contents)
        .with_context(|| format!("write '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_gif(args: GifArgs, cfg: ToolConfig) -> anyhow::Result<()> {
    let mut settings = cfg.gif;
    if args.start.is_some() {
        settings.start_sec = args.start;
    }
    if args.end.is_some() {
        settings.end_sec = args.end;
    }
    if let Some(width) = args.width {
        settings.width = width;
    }
    if let Some(fps) = args.fps {
        settings.fps = fps;
    }
    if let Some(quality) = args.quality {
        settings.quality = match quality {
            QualityChoice::Ultra => GifQuality::Ultra,
            QualityChoice::High => GifQuality::High,
            QualityChoice::Medium => GifQuality::Medium,
        };
    }

    let out = args
        .out
        .unwrap_or_else(|| tokenpaint::encode::gif::gif_output_path(&args.in_path));
    let palette = std::env::temp_dir().join(format!("tokenpaint-palette-{}.png", std::process::id()));
    let plan = GifPlan::new(&settings, &args.in_path, &palette, &out)?;

    if args.dry_run {
        for pass in [&plan.palette_args, &plan.gif_args] {
            let line: Vec<_> = pass.iter().map(|a| a.to_string_lossy()).collect();
            println!("ffmpeg -y -loglevel error {}", line.join(" "));
        }
        return Ok(());
    }

    tokenpaint::run_gif_plan(&plan, &palette)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
