use clap::Parser;
use gridmap::cli::{Cli, Commands};
use gridmap::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new().verbose(cli.verbose);

    match cli.command {
        Commands::Build(args) => gridmap::cli::build::run(args, &printer)?,
        Commands::Validate(args) => gridmap::cli::validate::run(args, &printer)?,
        Commands::Init(args) => gridmap::cli::init::run(args, &printer)?,
        Commands::Tiles(args) => gridmap::cli::tiles::run(args, &printer)?,
        Commands::Completions(args) => gridmap::cli::completions::run(args)?,
    }

    Ok(())
}
