use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "homage",
    about = "Homage: open-source attribution for your application",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List libraries from manifests with their resolved licenses
    List(ListArgs),
    /// Show the license templates known to the catalog
    Licenses(LicensesArgs),
    /// Validate manifests without resolving them
    Check(CheckArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Manifest files, read in order
    pub manifests: Vec<PathBuf>,
    /// Also read every *.json file under this directory
    #[arg(long)]
    pub dir: Option<PathBuf>,
    /// Directory holding icon images named after manifest icons
    #[arg(long)]
    pub icons: Option<PathBuf>,
    /// Include license descriptions
    #[arg(long)]
    pub full: bool,
}

#[derive(Args)]
pub struct LicensesArgs {
    /// Include license descriptions
    #[arg(long)]
    pub full: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    #[arg(required = true)]
    pub manifests: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list() {
        let cli = Cli::try_parse_from(["homage", "list", "a.json", "b.json"]).unwrap();
        if let Command::List(args) = cli.command {
            assert_eq!(args.manifests, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
            assert!(args.dir.is_none());
            assert!(!args.full);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_list_dir_and_icons() {
        let cli = Cli::try_parse_from([
            "homage", "list", "--dir", "assets", "--icons", "res", "--full",
        ])
        .unwrap();
        if let Command::List(args) = cli.command {
            assert!(args.manifests.is_empty());
            assert_eq!(args.dir, Some(PathBuf::from("assets")));
            assert_eq!(args.icons, Some(PathBuf::from("res")));
            assert!(args.full);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_licenses() {
        let cli = Cli::try_parse_from(["homage", "licenses", "--full"]).unwrap();
        if let Command::Licenses(args) = cli.command {
            assert!(args.full);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn check_requires_a_manifest() {
        assert!(Cli::try_parse_from(["homage", "check"]).is_err());
        let cli = Cli::try_parse_from(["homage", "check", "x.json"]).unwrap();
        assert!(matches!(cli.command, Command::Check(_)));
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "homage", "--verbose", "--format", "json", "--config", "homage.toml", "licenses",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.format, OutputFormat::Json));
        assert_eq!(cli.config, Some(PathBuf::from("homage.toml")));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["homage", "list", "a.json", "--format", "json", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
