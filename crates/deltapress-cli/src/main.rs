use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use deltapress_config::Config;
use deltapress_engine::{
    Delta, FontFamily, Orientation, OutputKind, PageSetup, PageSize, SourceLoader,
    document_filename, generate_html, generate_pdf,
};
use std::path::{Path, PathBuf};

/// Render a rich-text delta (JSON) into a paginated PDF or printable HTML.
#[derive(Parser, Debug, Default)]
#[command(name = "deltapress", version, about, long_about = None)]
struct Args {
    /// Delta JSON file (`{"ops": [...]}` or a bare op array)
    input: PathBuf,

    /// Output file; defaults to document-YYYY-MM-DD.<ext> in the configured output dir
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write printable HTML instead of PDF
    #[arg(long)]
    html: bool,

    /// Read defaults from this config file instead of ~/.config/deltapress/config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// A0-A6, Letter, Legal, Tabloid or Custom
    #[arg(long, value_name = "NAME")]
    page_size: Option<String>,

    /// portrait or landscape
    #[arg(long)]
    orientation: Option<String>,

    /// helvetica, times or courier
    #[arg(long, value_name = "NAME")]
    font: Option<String>,

    /// Base font size in points
    #[arg(long, value_name = "N")]
    font_size: Option<f32>,

    /// Custom page width in points
    #[arg(long, value_name = "W")]
    custom_width: Option<f32>,

    /// Custom page height in points
    #[arg(long, value_name = "H")]
    custom_height: Option<f32>,
}

impl Args {
    fn output_kind(&self) -> OutputKind {
        if self.html {
            OutputKind::Html
        } else {
            OutputKind::Pdf
        }
    }
}

/// Merges command-line overrides onto the config defaults.
fn page_setup(args: &Args, config: &Config) -> Result<PageSetup> {
    let size_name = args.page_size.as_deref().unwrap_or(&config.page_size);
    let size = if size_name.trim().eq_ignore_ascii_case("custom") {
        PageSize::custom(
            args.custom_width.or(config.custom_width),
            args.custom_height.or(config.custom_height),
        )
    } else {
        PageSize::from_name(size_name).unwrap_or_else(|| {
            log::warn!("Unknown page size '{size_name}', using A4");
            PageSize::A4
        })
    };

    let orientation =
        Orientation::from_name(args.orientation.as_deref().unwrap_or(&config.orientation));
    let font_family =
        FontFamily::from_name_or_default(args.font.as_deref().unwrap_or(&config.font_family));
    let font_size = args.font_size.unwrap_or(config.font_size);

    let setup = PageSetup::new(size, orientation, font_family, font_size)?;
    log::debug!(
        "Page setup: {} {} {:?} {}pt",
        setup.size.name(),
        setup.orientation.as_str(),
        setup.font_family,
        setup.font_size
    );
    Ok(setup)
}

fn output_path(args: &Args, config: &Config, kind: OutputKind) -> PathBuf {
    if let Some(output) = &args.output {
        return output.clone();
    }
    let filename = document_filename(Utc::now().date_naive(), kind);
    match &config.output_dir {
        Some(dir) => dir.join(filename),
        None => PathBuf::from(filename),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::load_from_path(path)?.unwrap_or_default()),
        None => {
            log::debug!("Config path: {}", Config::config_path().display());
            Ok(Config::load_or_default()?)
        }
    }
}

fn run(args: &Args) -> Result<PathBuf> {
    let config = load_config(args.config.as_deref())?;
    let setup = page_setup(args, &config)?;
    let kind = args.output_kind();

    let json = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let delta = Delta::from_json(&json)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    let bytes = match kind {
        OutputKind::Pdf => {
            let base_dir = args
                .input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            generate_pdf(&delta, &setup, &SourceLoader::with_base_dir(base_dir))
        }
        OutputKind::Html => generate_html(&delta, &setup).into_bytes(),
    };

    let path = output_path(args, &config, kind);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let path = run(&args)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
