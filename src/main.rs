use clap::{Args, Parser, Subcommand};
use rclone_fetch::config::{FetchConfig, DEFAULT_BASE_URL, DEFAULT_DEST_DIR};
use rclone_fetch::download::Downloader;
use rclone_fetch::install::Installer;
use rclone_fetch::platform;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rclone-fetch")]
#[command(about = "Download the prebuilt rclone binary for this platform", long_about = None)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Hide progress bars
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    install: InstallArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download and extract rclone (the default)
    Install(InstallArgs),
    /// Print the download URL for this platform
    Url(TargetArgs),
    /// List every supported platform and its archive
    Platforms,
    /// Download any file, keeping its name from the URL
    Download {
        #[arg(name = "URL")]
        url: String,
        /// Folder to save into
        #[arg(short, long, default_value = ".")]
        dest: PathBuf,
    },
}

#[derive(Args)]
struct TargetArgs {
    /// Operating system to fetch for (e.g. linux, darwin, windows)
    #[arg(long)]
    os: Option<String>,

    /// CPU architecture to fetch for (e.g. x86_64, arm64, amd64)
    #[arg(long)]
    arch: Option<String>,

    /// Download root
    #[arg(long, env = "RCLONE_FETCH_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

#[derive(Args)]
struct InstallArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// Directory the binary is written to
    #[arg(short, long, env = "RCLONE_FETCH_DEST", default_value = DEFAULT_DEST_DIR)]
    dest: PathBuf,
}

impl TargetArgs {
    fn into_config(self, dest_dir: PathBuf) -> FetchConfig {
        FetchConfig {
            base_url: self.base_url,
            dest_dir,
            os: self.os,
            arch: self.arch,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli, &mut std::io::stdout()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let downloader = Downloader::new(!cli.quiet);

    match cli.command.unwrap_or(Commands::Install(cli.install)) {
        Commands::Install(args) => {
            let installer = Installer::new(args.target.into_config(args.dest), downloader);
            let installed = installer.install().await?;
            writeln!(out, "Extracted binary to: {}", installed.path.display())?;
        }
        Commands::Url(target) => {
            let config = target.into_config(PathBuf::from(DEFAULT_DEST_DIR));
            let installer = Installer::new(config, downloader);
            writeln!(out, "{}", installer.resolve_url()?)?;
        }
        Commands::Platforms => {
            writeln!(out, "Supported platforms:")?;
            for (os, arch, archive) in platform::supported_platforms() {
                writeln!(out, "  {os:<8} {arch:<8} {archive}")?;
            }
        }
        Commands::Download { url, dest } => {
            let path = downloader.download_file(&url, &dest).await?;
            writeln!(out, "Download completed: {}", path.display())?;
        }
    }

    Ok(())
}
