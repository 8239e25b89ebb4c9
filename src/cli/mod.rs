pub mod build;
pub mod completions;
pub mod init;
pub mod tiles;
pub mod validate;

use clap::{Parser, Subcommand};

/// gridmap - Tile map generator
#[derive(Parser, Debug)]
#[command(name = "gridmap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print per-map detail
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Paint map scripts and write map documents
    Build(build::BuildArgs),

    /// Check built map documents
    Validate(validate::ValidateArgs),

    /// Initialize a gridmap project (generates gridmap.yaml)
    Init(init::InitArgs),

    /// List the tile registry
    Tiles(tiles::TilesArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_flags() {
        let cli = Cli::parse_from(["gridmap", "-v", "build", "maps", "-o", "out", "--validate"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.files.len(), 1);
                assert!(args.validate);
                assert_eq!(args.output.as_deref(), Some(std::path::Path::new("out")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
