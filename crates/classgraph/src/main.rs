mod cli;
mod commands;

use crate::cli::{ClassGraphCli, Commands};
use crate::commands::{index::IndexArgs, query::QueryArgs};
use logging::LogMode;
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> anyhow::Result<()> {
    let cli = ClassGraphCli::parse_args();

    match cli.command {
        Commands::Index {
            source_directory,
            database,
            config,
            no_tree,
            stats,
            log_dir,
            verbose,
        } => {
            let mode = match log_dir {
                Some(dir) => LogMode::CliWithFile(dir),
                None => LogMode::Cli,
            };
            let _guards = logging::init(mode, verbose)?;

            commands::index::run(IndexArgs {
                source_directory,
                database,
                config,
                no_tree,
                stats,
            })
        }
        Commands::Query {
            database,
            query_or_file,
            verbose,
        } => {
            let _guards = logging::init(LogMode::Cli, verbose)?;
            commands::query::run(QueryArgs {
                database,
                query_or_file,
            })
        }
        Commands::Clean { database } => {
            let _guards = logging::init(LogMode::Cli, false)?;
            commands::clean::run(&database)
        }
    }
}
