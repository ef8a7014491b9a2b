use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing::Level;

const FONT_ENV: &str = "ADCOMPOSE_FONT";

#[derive(Parser, Debug)]
#[command(name = "adcompose", version)]
struct Cli {
    /// Raise log verbosity (repeat for more).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the ad as PNG or JPEG (picked from the output extension).
    Raster(RasterArgs),
    /// Render the ad as a self-contained SVG document.
    Svg(SvgArgs),
    /// Watermark an image with a logo in its bottom-right corner.
    Stamp(StampArgs),
}

#[derive(Args, Debug)]
struct AdInputs {
    /// Base photo.
    #[arg(long)]
    image: PathBuf,

    /// Optional logo image.
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Style JSON; omitted fields take their defaults.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Override the style's layout id.
    #[arg(long)]
    layout: Option<String>,

    /// Company name.
    #[arg(long)]
    company: String,

    /// Phone number.
    #[arg(long, default_value = "")]
    tel: String,

    /// Email address.
    #[arg(long, default_value = "")]
    email: String,
}

#[derive(Args, Debug)]
struct RasterArgs {
    #[command(flatten)]
    inputs: AdInputs,

    /// TTF/OTF font used for text (falls back to $ADCOMPOSE_FONT).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Scale applied to every absolute measurement (default 1, or 3 with --print).
    #[arg(long)]
    scale: Option<f64>,

    /// Print export: scale 3 (unless --scale is given) plus bleed and crop marks.
    #[arg(long)]
    print: bool,

    /// Output path (.png, .jpg or .jpeg).
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SvgArgs {
    #[command(flatten)]
    inputs: AdInputs,

    /// Only the bottom-banner layout gets panels and text.
    #[arg(long)]
    legacy_parity: bool,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct StampArgs {
    /// Image to watermark; its format is kept.
    #[arg(long)]
    image: PathBuf,

    /// Logo to stamp.
    #[arg(long)]
    logo: PathBuf,

    /// Output path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Raster(args) => cmd_raster(args),
        Command::Svg(args) => cmd_svg(args),
        Command::Stamp(args) => cmd_stamp(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_style(inputs: &AdInputs) -> anyhow::Result<adcompose::StyleConfig> {
    let mut style = match &inputs.style {
        Some(path) => adcompose::StyleConfig::from_path(path)
            .with_context(|| format!("load style '{}'", path.display()))?,
        None => adcompose::StyleConfig::default(),
    };
    if let Some(layout) = &inputs.layout {
        style.layout = Some(layout.clone());
    }
    Ok(style)
}

fn details(inputs: &AdInputs) -> adcompose::BusinessDetails {
    adcompose::BusinessDetails::new(inputs.company.as_str())
        .with_tel(inputs.tel.as_str())
        .with_email(inputs.email.as_str())
}

fn asset_request(inputs: &AdInputs, font: Option<PathBuf>) -> adcompose::AssetRequest {
    let mut req = adcompose::AssetRequest::new(adcompose::AssetSource::path(&inputs.image));
    if let Some(logo) = &inputs.logo {
        req = req.with_logo(adcompose::AssetSource::path(logo));
    }
    if let Some(font) = font {
        req = req.with_font(adcompose::AssetSource::path(font));
    }
    req
}

fn ensure_parent(out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_raster(args: RasterArgs) -> anyhow::Result<()> {
    let style = read_style(&args.inputs)?;
    let font = args
        .font
        .or_else(|| std::env::var_os(FONT_ENV).map(PathBuf::from));
    if font.is_none() {
        tracing::warn!("no font given (--font or ${FONT_ENV}); text will be skipped");
    }
    let assets = adcompose::load_assets_blocking(&asset_request(&args.inputs, font))
        .context("load assets")?;

    let mut opts = if args.print {
        adcompose::RasterOpts::print()
    } else {
        adcompose::RasterOpts::default()
    };
    if let Some(scale) = args.scale {
        opts.scale = scale;
    }

    let surface = adcompose::render_raster(&style, &assets, &details(&args.inputs), opts)
        .context("render raster")?;
    ensure_parent(&args.out)?;
    surface
        .save(&args.out)
        .with_context(|| format!("write '{}'", args.out.display()))?;
    if let Some((perspective, transform)) = surface.frame_effect().viewer_css() {
        tracing::info!(perspective, transform, "frame effect is applied by the viewer");
    }
    println!(
        "wrote {} ({}x{})",
        args.out.display(),
        surface.width(),
        surface.height()
    );
    Ok(())
}

fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let style = read_style(&args.inputs)?;
    let assets =
        adcompose::load_assets_blocking(&asset_request(&args.inputs, None)).context("load assets")?;
    let parity = if args.legacy_parity {
        adcompose::VectorParity::BottomBannerOnly
    } else {
        adcompose::VectorParity::Full
    };
    let doc = adcompose::render_vector(
        &style,
        &assets,
        &details(&args.inputs),
        adcompose::VectorOpts { parity },
    )
    .context("render svg")?;
    ensure_parent(&args.out)?;
    std::fs::write(&args.out, doc.svg.as_bytes())
        .with_context(|| format!("write '{}'", args.out.display()))?;
    println!("wrote {} ({}x{})", args.out.display(), doc.width, doc.height);
    Ok(())
}

fn cmd_stamp(args: StampArgs) -> anyhow::Result<()> {
    let base = std::fs::read(&args.image)
        .with_context(|| format!("read image '{}'", args.image.display()))?;
    let logo = std::fs::read(&args.logo)
        .with_context(|| format!("read logo '{}'", args.logo.display()))?;
    let out = adcompose::stamp_logo(&base, &logo).context("stamp logo")?;
    ensure_parent(&args.out)?;
    std::fs::write(&args.out, out).with_context(|| format!("write '{}'", args.out.display()))?;
    println!("wrote {}", args.out.display());
    Ok(())
}
