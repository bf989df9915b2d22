use anyhow::Result;
use clap::Parser;
use relpage::render::RenderOptions;
use relpage::source::ManifestSpec;
use relpage::verify::DEFAULT_CONCURRENCY;
use std::path::PathBuf;
use std::time::Duration;

/// Default download-link prefix for published release artifacts.
const DEFAULT_BASE_URL: &str = "https://electrumsv-downloads.s3.us-east-2.amazonaws.com/releases";

/// relpage - Release Download Page Builder
///
/// Turn a release-metadata manifest into the HTML fragment for a product
/// download page, check manifests before publishing, and verify that every
/// published link resolves.
///
/// Examples:
///   relpage build --manifest releases.json --out downloads.html
#[derive(Parser, Debug)]
#[command(author, version = env!("RELPAGE_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Product display name used in release headers (also via RELPAGE_PRODUCT)
    #[arg(
        long,
        env = "RELPAGE_PRODUCT",
        value_name = "NAME",
        default_value = "ElectrumSV",
        global = true
    )]
    pub product: String,

    /// Base download URL prefix (also via RELPAGE_BASE_URL)
    #[arg(
        long = "base-url",
        env = "RELPAGE_BASE_URL",
        value_name = "URL",
        default_value = DEFAULT_BASE_URL,
        global = true
    )]
    pub base_url: String,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Render the download page from a release manifest
    Build(BuildArgs),

    /// Validate a release manifest without writing anything
    Check(CheckArgs),

    /// Probe every published link in a release manifest
    Verify(VerifyArgs),
}

#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    /// Manifest location: a local path or an http(s) URL
    #[arg(long, value_name = "PATH|URL")]
    pub manifest: String,

    /// Output path for the rendered page
    #[arg(long, value_name = "PATH")]
    pub out: PathBuf,

    /// Page shell to splice the fragment into (at the relpage:releases marker)
    #[arg(long, value_name = "PATH")]
    pub shell: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Manifest location: a local path or an http(s) URL
    #[arg(long, value_name = "PATH|URL")]
    pub manifest: String,
}

#[derive(clap::Args, Debug)]
pub struct VerifyArgs {
    /// Manifest location: a local path or an http(s) URL
    #[arg(long, value_name = "PATH|URL")]
    pub manifest: String,

    /// Number of link probes in flight at once
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long = "timeout-secs", value_name = "SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = relpage::runtime::RealRuntime;

    let options = RenderOptions {
        product: cli.product,
        base_url: cli.base_url.trim_end_matches('/').to_string(),
    };

    match cli.command {
        Commands::Build(args) => {
            let spec = args.manifest.parse::<ManifestSpec>()?;
            relpage::commands::build(&runtime, &spec, &args.out, args.shell.as_deref(), &options)
                .await?
        }
        Commands::Check(args) => {
            let spec = args.manifest.parse::<ManifestSpec>()?;
            relpage::commands::check(&runtime, &spec).await?
        }
        Commands::Verify(args) => {
            let spec = args.manifest.parse::<ManifestSpec>()?;
            relpage::commands::verify(
                &runtime,
                &spec,
                &options.base_url,
                args.concurrency,
                Duration::from_secs(args.timeout_secs),
            )
            .await?
        }
    }
    Ok(())
}
