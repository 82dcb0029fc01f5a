//! FVFG - group-based Hilbert encoding
//! Command-line driver over precomputed state views

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use fvfg_core::prelude::*;
use fvfg_core::CONFIG_FILE;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fvfg")]
#[command(author = "SIL Contributors")]
#[command(version = "2026.1.16")]
#[command(about = "FVFG - group-based Hilbert curve encoding", long_about = None)]
struct Cli {
    /// Config file (defaults to ./fvfg.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding CHM/CSM/HCM/HSM state views
    #[arg(long, global = true, env = "FVFG_TABLES", value_name = "DIR")]
    tables: Option<PathBuf>,

    /// Group size the state views were generated for
    #[arg(short, long, global = true, env = "FVFG_GROUP_SIZE")]
    group_size: Option<u32>,

    /// Bits per coordinate axis
    #[arg(short, long, global = true, env = "FVFG_ORDER")]
    order: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a coordinate pair into its Hilbert index
    Encode {
        #[arg(value_name = "X")]
        x: u32,

        #[arg(value_name = "Y")]
        y: u32,
    },

    /// Decode a Hilbert index into its coordinate pair
    Decode {
        #[arg(value_name = "INDEX")]
        index: u64,
    },

    /// Run the first END×END coordinates through plain and batch paths
    Sweep {
        /// Side of the swept square
        #[arg(short = 'n', long, default_value_t = 16)]
        end: u32,

        /// Only print the summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show the loaded state views and batch contexts
    Info,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fvfg=info,fvfg_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Encode { x, y } => encode_command(&config, x, y),
        Commands::Decode { index } => decode_command(&config, index),
        Commands::Sweep { end, quiet } => sweep_command(&config, end, quiet),
        Commands::Info => info_command(&config),
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Defaults, then the config file, then flags and environment
fn resolve_config(cli: &Cli) -> Result<FvfgConfig> {
    let mut config = match cli.config.as_deref() {
        Some(path) => load_config(path)?,
        None => {
            let local = Path::new(CONFIG_FILE);
            if local.exists() {
                load_config(local)?
            } else {
                FvfgConfig::default()
            }
        }
    };

    if let Some(dir) = &cli.tables {
        config.tables.dir = dir.clone();
    }
    if let Some(group_size) = cli.group_size {
        config.tables.group_size = group_size;
    }
    if let Some(order) = cli.order {
        config.transform.order = order;
    }

    config.validate()?;
    tracing::debug!(?config, "configuration resolved");
    Ok(config)
}

fn load_config(path: &Path) -> Result<FvfgConfig> {
    FvfgConfig::from_file(path)
        .with_context(|| format!("failed to load config {}", path.display()))
}

fn load_tables(config: &FvfgConfig) -> Result<StateTables> {
    config.load_tables().with_context(|| {
        format!(
            "failed to load state views (g = {}) from {}",
            config.tables.group_size,
            config.tables.dir.display()
        )
    })
}

// ============================================================================
// Commands
// ============================================================================

fn encode_command(config: &FvfgConfig, x: u32, y: u32) -> Result<()> {
    let tables = load_tables(config)?;
    let index = encode(x, y, config.transform.order, config.tables.group_size, &tables)?;
    println!("{}", index);
    Ok(())
}

fn decode_command(config: &FvfgConfig, index: u64) -> Result<()> {
    let tables = load_tables(config)?;
    let (x, y) = decode(index, config.transform.order, config.tables.group_size, &tables)?;
    println!("({}, {})", x, y);
    Ok(())
}

fn sweep_command(config: &FvfgConfig, end: u32, quiet: bool) -> Result<()> {
    let order = config.transform.order;
    let group_size = config.tables.group_size;
    if order < MAX_ORDER && u64::from(end) > 1u64 << order {
        bail!("sweep end {} exceeds the 2^{} grid", end, order);
    }

    let tables = load_tables(config)?;
    let enc = config.encode_context(&tables)?;
    let dec = config.decode_context(&tables)?;

    println!(
        "{} {}×{} cells, order {}, group size {}",
        "Sweeping".green().bold(),
        end,
        end,
        order,
        group_size
    );

    let mut checked = 0u64;
    for x in 0..end {
        for y in 0..end {
            let index = encode(x, y, order, group_size, &tables)?;
            let batch = encode_batch(x, y, &enc, &tables);
            if index != batch {
                bail!("encode mismatch at ({}, {}): plain {} batch {}", x, y, index, batch);
            }
            if !quiet {
                println!("The result of coordinate ({},{}) is {}", x, y, index);
            }
            checked += 1;
        }
    }

    let cells = u64::from(end) * u64::from(end);
    for index in 0..cells {
        let plain = decode(index, order, group_size, &tables)?;
        let batch = decode_batch(index, &dec, &tables);
        if plain != batch {
            bail!(
                "decode mismatch at {}: plain {:?} batch {:?}",
                index,
                plain,
                batch
            );
        }
        if !quiet {
            println!("The result of index {} is ({},{})", index, plain.0, plain.1);
        }
        checked += 1;
    }

    tracing::info!(checked, order, group_size, "sweep finished");
    println!(
        "{} {} lookups, plain and batch paths agree",
        "    Finished".green().bold(),
        checked
    );
    Ok(())
}

fn info_command(config: &FvfgConfig) -> Result<()> {
    let tables = load_tables(config)?;
    let enc = config.encode_context(&tables)?;
    let dec = config.decode_context(&tables)?;

    println!("{}", "FVFG - group-based Hilbert encoding".bold());
    println!();
    println!("{}", "State views:".bold());
    println!("  Directory:         {}", config.tables.dir.display().to_string().cyan());
    println!("  Group size:        {}", tables.group_size());
    println!("  Dim size:          {}", tables.dim_size());
    println!("  Entries per view:  {}", tables.entries_per_table());
    println!();
    println!("{}", "Batch context:".bold());
    println!("  Order:             {}", enc.order());
    println!("  Groups:            {}", enc.group_num());
    println!("  Initial state:     {}", enc.state0());
    println!("  Encode start bit:  {}", enc.start_pos());
    println!("  Decode start bit:  {}", dec.start_pos());
    Ok(())
}
