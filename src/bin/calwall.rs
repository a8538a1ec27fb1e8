use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "calwall", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one wallpaper as a PNG.
    Render(RenderArgs),
    /// Render every export preset of a view mode into a directory.
    ExportAll(ExportAllArgs),
    /// List the export presets.
    Presets,
    /// Report the background luminance and the text color it calls for.
    Analyze(AnalyzeArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Wallpaper config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Background image (PNG, JPEG, ...). Omit for a flat fill.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Font to register, as `Family=path/to/font.ttf`. Repeatable; the first is the fallback.
    #[arg(long = "font", value_name = "FAMILY=PATH")]
    fonts: Vec<String>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Export preset to render at.
    #[arg(long, value_enum, conflicts_with = "size")]
    preset: Option<calwall::ExportPreset>,

    /// Explicit output size, `WxH`.
    #[arg(long)]
    size: Option<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ExportAllArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output directory; files are named `<preset>.png`.
    #[arg(long)]
    out_dir: PathBuf,

    /// View mode to export (defaults to the config's).
    #[arg(long, value_enum)]
    view: Option<ViewChoice>,

    /// Worker threads (defaults to the number of CPUs).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// Background image to analyze.
    #[arg(long)]
    background: PathBuf,

    /// Surface size the background is fitted to, `WxH`.
    #[arg(long, default_value = "1920x1080")]
    size: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ViewChoice {
    Desktop,
    Mobile,
}

impl From<ViewChoice> for calwall::ViewMode {
    fn from(v: ViewChoice) -> Self {
        match v {
            ViewChoice::Desktop => calwall::ViewMode::Desktop,
            ViewChoice::Mobile => calwall::ViewMode::Mobile,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::ExportAll(args) => cmd_export_all(args),
        Command::Presets => cmd_presets(),
        Command::Analyze(args) => cmd_analyze(args),
    }
}

fn read_config_json(path: &Path) -> anyhow::Result<calwall::WallpaperConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let r = BufReader::new(f);
    let config: calwall::WallpaperConfig =
        serde_json::from_reader(r).with_context(|| "parse config JSON")?;
    config.validate()?;
    Ok(config)
}

fn read_background(path: &Path) -> anyhow::Result<calwall::BackgroundImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read background '{}'", path.display()))?;
    calwall::decode_background(&bytes)
        .with_context(|| format!("decode background '{}'", path.display()))
}

fn load_fonts(specs: &[String]) -> anyhow::Result<calwall::FontRegistry> {
    let fonts = calwall::FontRegistry::new();
    for spec in specs {
        let (family, path) = spec
            .split_once('=')
            .with_context(|| format!("font '{spec}' is not FAMILY=PATH"))?;
        fonts.register_file(family, Path::new(path.trim()))?;
    }
    Ok(fonts)
}

struct Sources {
    config: calwall::WallpaperConfig,
    background: Option<calwall::BackgroundImage>,
    fonts: calwall::FontRegistry,
}

fn load_sources(args: &SourceArgs) -> anyhow::Result<Sources> {
    Ok(Sources {
        config: read_config_json(&args.config)?,
        background: args.background.as_deref().map(read_background).transpose()?,
        fonts: load_fonts(&args.fonts)?,
    })
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let src = load_sources(&args.source)?;
    let size = match (args.preset, args.size.as_deref()) {
        (Some(preset), _) => preset.size(),
        (None, Some(s)) => calwall::SurfaceSize::parse(s)?,
        (None, None) => anyhow::bail!("either --preset or --size is required"),
    };
    let mut config = src.config;
    if let Some(preset) = args.preset {
        config.view_mode = preset.view_mode();
    }

    let opts = calwall::RenderOpts::from_env();
    let png = calwall::render_png(&config, src.background.as_ref(), size, &src.fonts, &opts)?;
    calwall::write_png_file(&args.out, &png)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_export_all(args: ExportAllArgs) -> anyhow::Result<()> {
    let src = load_sources(&args.source)?;
    let view = args
        .view
        .map(calwall::ViewMode::from)
        .unwrap_or(src.config.view_mode);
    let presets = calwall::ExportPreset::for_view(view);

    let opts = calwall::RenderOpts::from_env();
    let exported = calwall::export_presets(
        &src.config,
        src.background.as_ref(),
        &presets,
        &src.fonts,
        &opts,
        args.threads,
    )?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for item in exported {
        let path = args.out_dir.join(format!("{}.png", item.preset.name()));
        calwall::write_png_file(&path, &item.png)?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    for preset in calwall::ExportPreset::all() {
        println!(
            "{}\t{}\t{:?}",
            preset.name(),
            preset.size(),
            preset.view_mode()
        );
    }
    Ok(())
}

fn cmd_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let background = read_background(&args.background)?;
    let size = calwall::SurfaceSize::parse(&args.size)?;
    let opts = calwall::RenderOpts::from_env();

    let mut surface = calwall::CpuSurface::new(size, calwall::FontRegistry::new())?;
    calwall::draw_background(
        &mut surface,
        &calwall::BackgroundLayer::new(Some(&background), opts.fill_rgb),
    )?;
    let frame = surface.finish()?;
    let reading = calwall::analyze_contrast(&frame.data, frame.size, opts.luminance_threshold)?;

    println!("luminance\t{:.4}", reading.luminance);
    println!("text_color\t{}", reading.text_color().to_hex());
    Ok(())
}
