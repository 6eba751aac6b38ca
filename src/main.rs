//! identigen CLI - Serve or write deterministic pixel-art avatars.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use identigen::config::IdentigenConfig;
use identigen::generator::encode::EXTENSION;
use identigen::{AvatarGenerator, AvatarRequest, HashAlgorithm};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "identigen")]
#[command(about = "Generate symmetric pixel-art avatars from names")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "identigen.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Write a single avatar to a PNG file
    Generate {
        /// Name to derive the avatar from
        #[arg(short, long)]
        name: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Image width and height in pixels
        #[arg(short, long)]
        size: Option<i64>,

        /// Number of cells per side
        #[arg(short, long)]
        grid: Option<i64>,

        /// Also print the hex color and the grid as text
        #[arg(long)]
        ascii: bool,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Serve avatars over HTTP
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Generate a set of names at several grid sizes for comparison
    Showcase {
        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Names to render (comma-separated)
        #[arg(
            long,
            value_delimiter = ',',
            default_values = ["saitama", "alice", "bob", "carol"]
        )]
        names: Vec<String>,

        /// Image width and height in pixels
        #[arg(short, long)]
        size: Option<i64>,

        #[command(flatten)]
        style: StyleArgs,
    },
}

/// Overrides for the `[avatar]` config section shared by every subcommand.
#[derive(clap::Args)]
struct StyleArgs {
    /// Hash used to derive avatars
    #[arg(long, value_enum)]
    hash: Option<HashArg>,

    /// Keep color channels within [30, 225]
    #[arg(long, overrides_with = "no_clamp_color")]
    clamp_color: bool,

    /// Use raw digest bytes as the color
    #[arg(long, overrides_with = "clamp_color")]
    no_clamp_color: bool,
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum HashArg {
    /// 16-byte MD5
    Md5,
    /// 32-byte SHA-256
    Sha256,
}

impl HashArg {
    fn to_algorithm(self) -> HashAlgorithm {
        match self {
            HashArg::Md5 => HashAlgorithm::Md5,
            HashArg::Sha256 => HashAlgorithm::Sha256,
        }
    }
}

impl StyleArgs {
    fn apply(&self, config: &mut IdentigenConfig) {
        if let Some(hash) = self.hash {
            config.avatar.hash = hash.to_algorithm();
        }
        if self.clamp_color {
            config.avatar.clamp_color = true;
        }
        if self.no_clamp_color {
            config.avatar.clamp_color = false;
        }
    }
}

const SHOWCASE_GRIDS: [i64; 4] = [4, 6, 8, 12];

/// Turn an avatar name into a single safe path component.
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn write_avatar(
    generator: &AvatarGenerator,
    request: &AvatarRequest,
    path: &Path,
) -> Result<()> {
    let params = request.resolve(generator.settings())?;
    let bytes = generator
        .generate(&params)
        .with_context(|| format!("failed to generate avatar for '{}'", params.name))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &bytes).with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(
        name = %params.name,
        size = params.size,
        grid = params.grid,
        path = %path.display(),
        "avatar written"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("identigen=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let mut config = IdentigenConfig::load(&cli.config)?;

    match cli.command {
        Commands::Generate {
            name,
            output,
            size,
            grid,
            ascii,
            style,
        } => {
            style.apply(&mut config);
            let generator = AvatarGenerator::new(config.avatar.clone());

            let request = AvatarRequest {
                name,
                resolution: size,
                grid,
            };
            let params = request.resolve(generator.settings())?;
            if ascii {
                println!("{}", generator.preview(&params));
            }

            let output_path = output.unwrap_or_else(|| {
                PathBuf::from(&config.output.directory)
                    .join(format!("{}.{}", file_stem(&params.name), EXTENSION))
            });

            write_avatar(&generator, &request, &output_path)?;
            println!("Saved to {}", output_path.display());
        }

        Commands::Serve { host, port, style } => {
            style.apply(&mut config);
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            identigen::server::serve(&config).await?;
        }

        Commands::Showcase {
            output_dir,
            names,
            size,
            style,
        } => {
            style.apply(&mut config);
            let generator = AvatarGenerator::new(config.avatar.clone());

            let output_dir = output_dir
                .unwrap_or_else(|| PathBuf::from(&config.output.directory).join("showcase"));
            fs::create_dir_all(&output_dir)?;

            println!(
                "Generating showcase with {} hash{}...",
                config.avatar.hash.name(),
                if config.avatar.clamp_color { ", clamped colors" } else { "" }
            );

            for name in &names {
                for grid in SHOWCASE_GRIDS {
                    let request = AvatarRequest {
                        name: Some(name.clone()),
                        resolution: size,
                        grid: Some(grid),
                    };
                    let filename = format!("{}_{}.{}", file_stem(name), grid, EXTENSION);
                    write_avatar(&generator, &request, &output_dir.join(&filename))?;
                    println!("  Created {}", filename);
                }
            }

            println!("Done! Showcase saved to {}", output_dir.display());
        }
    }

    Ok(())
}
