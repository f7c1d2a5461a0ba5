use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub const DEFAULT_SERVER: &str = "http://localhost:8080";

#[derive(Parser)]
#[command(
    name = "annostore",
    about = "Append-only annotation ledger keyed by identity",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Gateway base URL used by the client commands
    #[arg(long, global = true, default_value = DEFAULT_SERVER)]
    pub server: String,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP gateway until interrupted
    Serve(ServeArgs),
    /// Start a ledger for an identity
    Create(WriteArgs),
    /// Append an annotation to an existing ledger
    Append(WriteArgs),
    /// Print every annotation recorded for an identity
    Find(FindArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML file holding the server configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Listen address; overrides the configuration file
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Args)]
pub struct IdentityArgs {
    pub identity: String,
    /// Treat the identity as a hex BLAKE3 digest instead of a URL
    #[arg(long)]
    pub hash: bool,
}

#[derive(Args)]
pub struct WriteArgs {
    #[command(flatten)]
    pub id: IdentityArgs,
    /// JSON file holding the annotation
    pub annotation: PathBuf,
}

#[derive(Args)]
pub struct FindArgs {
    #[command(flatten)]
    pub id: IdentityArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve_defaults() {
        let cli = Cli::try_parse_from(["annostore", "serve"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert!(args.config.is_none());
            assert!(args.bind.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_serve_with_overrides() {
        let cli = Cli::try_parse_from([
            "annostore", "serve", "--config", "gw.toml", "--bind", "0.0.0.0:9000",
        ])
        .unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.config, Some(PathBuf::from("gw.toml")));
            assert_eq!(args.bind, Some("0.0.0.0:9000".into()));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_create() {
        let cli = Cli::try_parse_from(["annostore", "create", "pump-4", "entry.json"]).unwrap();
        if let Command::Create(args) = cli.command {
            assert_eq!(args.id.identity, "pump-4");
            assert!(!args.id.hash);
            assert_eq!(args.annotation, PathBuf::from("entry.json"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_append_hash() {
        let cli = Cli::try_parse_from(["annostore", "append", "--hash", "ab", "e.json"]).unwrap();
        if let Command::Append(args) = cli.command {
            assert!(args.id.hash);
            assert_eq!(args.id.identity, "ab");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn create_requires_annotation_file() {
        assert!(Cli::try_parse_from(["annostore", "create", "pump-4"]).is_err());
    }

    #[test]
    fn parse_find_with_server() {
        let cli = Cli::try_parse_from([
            "annostore", "find", "pump-4", "--server", "http://gw:8080",
        ])
        .unwrap();
        assert_eq!(cli.server, "http://gw:8080");
        assert!(matches!(cli.command, Command::Find(_)));
    }

    #[test]
    fn default_server() {
        let cli = Cli::try_parse_from(["annostore", "find", "x"]).unwrap();
        assert_eq!(cli.server, DEFAULT_SERVER);
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["annostore", "--verbose", "serve"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["annostore", "--format", "json", "find", "x"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
