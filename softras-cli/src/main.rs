use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "softras", version)]
struct Cli {
    /// Log pipeline statistics (equivalent to RUST_LOG=debug).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame of a scene as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Override the scene's MSAA level (none, x2, x4, x8).
    #[arg(long)]
    msaa: Option<softras::MsaaMode>,

    /// Draw clipped triangle outlines instead of filled triangles.
    #[arg(long, default_value_t = false)]
    wireframe: bool,

    /// Stop after the drawable at this index in draw order.
    #[arg(long)]
    debug_index: Option<usize>,

    /// Also write the depth buffer as a grayscale PNG.
    #[arg(long)]
    depth_out: Option<PathBuf>,

    /// Worker threads for frame-buffer passes.
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = softras::Scene::from_path(&args.in_path)
        .with_context(|| format!("load scene '{}'", args.in_path.display()))?;
    let assets_root = args.in_path.parent().unwrap_or_else(|| Path::new("."));

    let opts = softras::RenderSessionOpts {
        msaa: args.msaa,
        primitive: args.wireframe.then_some(softras::PrimitiveMode::Line),
        debug_index: args.debug_index,
        threads: args.threads,
    };
    let mut sess = softras::RenderSession::new(&scene, assets_root, opts)?;
    let frame = sess.render_frame();
    write_png(&args.out, &frame)?;

    if let Some(depth_out) = &args.depth_out {
        write_png(depth_out, &sess.depth_image())?;
    }

    let stats = sess.last_stats();
    tracing::debug!(?stats, "frame stats");
    eprintln!(
        "wrote {} ({}x{}, {} triangles, {} fragments)",
        args.out.display(),
        frame.width,
        frame.height,
        stats.triangles_rasterized,
        stats.fragments_shaded
    );
    println!("{}", frame.fingerprint());
    Ok(())
}

fn write_png(path: &Path, frame: &softras::FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
