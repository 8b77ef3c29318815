//! blockdiff - block-level differential backup between two file versions

use blockdiff::backup::run_backup;
use blockdiff::cli::{Cli, Commands, ConfigArgs, InspectArgs};
use blockdiff::config::Config;
use blockdiff::delta::{read_delta_from_bytes, DeltaOp, DELTA_MAGIC};
use blockdiff::restore::run_restore;
use blockdiff::signature::{read_signature_from_bytes, SIGNATURE_MAGIC};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json);

    match cli.command {
        Commands::Backup(args) => {
            let chunk_size = args.effective_chunk_size()?;
            tracing::info!(
                v1 = %args.v1.display(),
                v2 = %args.v2.display(),
                chunk_size,
                "Starting backup"
            );

            let report = run_backup(&args.v1, &args.v2, chunk_size)?;
            report.print();
        }

        Commands::Restore(args) => {
            tracing::info!(
                v1 = %args.v1.display(),
                delta = %args.delta.display(),
                dest = %args.dest.display(),
                "Starting restore"
            );

            let report = run_restore(&args.v1, &args.delta, &args.dest)?;
            report.print();
        }

        Commands::Inspect(args) => {
            handle_inspect_command(args)?;
        }

        Commands::Config(args) => {
            handle_config_command(args)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::new("blockdiff=warn"),
        1 => EnvFilter::new("blockdiff=info"),
        2 => EnvFilter::new("blockdiff=debug"),
        _ => EnvFilter::new("trace"),
    };

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init();
    }
}

/// Sniff the leading magic and print the entries of either artifact kind
fn handle_inspect_command(args: InspectArgs) -> anyhow::Result<()> {
    let data = blockdiff::fileio::load(&args.file)?;

    let magic = match data.get(0..4) {
        Some(head) => u32::from_be_bytes(head.try_into().unwrap()),
        None => anyhow::bail!("{} is too short to carry a magic", args.file.display()),
    };

    if magic == SIGNATURE_MAGIC {
        let index = read_signature_from_bytes(&data)?;
        for block in index.iter() {
            println!(
                "block {} pos: {} hash: {:#010x} size: {}",
                block.id, block.pos, block.hash, block.size
            );
        }
        return Ok(());
    }

    if magic == DELTA_MAGIC {
        let delta = read_delta_from_bytes(&data)?;
        for (id, op) in delta.operations.iter().enumerate() {
            match op {
                DeltaOp::Add { pos, data } => {
                    println!("delta {} ADD  pos: {} size: {}", id, pos, data.len());
                }
                DeltaOp::Keep { pos, size } => {
                    println!("delta {} KEEP pos: {} size: {}", id, pos, size);
                }
            }
        }
        return Ok(());
    }

    anyhow::bail!(
        "{} is neither a signature nor a delta file",
        args.file.display()
    )
}

fn handle_config_command(args: ConfigArgs) -> anyhow::Result<()> {
    if args.path {
        println!("{}", Config::default_config_path()?.display());
    } else if args.init {
        let config = Config::default();
        config.save()?;
        println!(
            "Created default configuration at {}",
            Config::default_config_path()?.display()
        );
    } else {
        let config = Config::load().unwrap_or_default();
        println!("{}", toml::to_string_pretty(&config)?);
    }
    Ok(())
}
