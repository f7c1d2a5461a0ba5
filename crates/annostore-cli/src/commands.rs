use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use annostore_client::{HttpRequestor, LedgerClient};
use annostore_ledger::{AnnotationStore, InMemoryStore};
use annostore_server::{LedgerServer, ServerConfig};
use annostore_types::{Annotation, Factories, HashIdentity, Identity, Status, UrlIdentity};
use colored::Colorize;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Create(args) => cmd_write(&cli.server, &cli.format, WriteOp::Create, args),
        Command::Append(args) => cmd_write(&cli.server, &cli.format, WriteOp::Append, args),
        Command::Find(args) => cmd_find(&cli.server, &cli.format, args),
    }
}

#[derive(Clone, Copy)]
enum WriteOp {
    Create,
    Append,
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    println!("{} annostore gateway on {}", "▶".green().bold(), config.bind_addr.bold());
    let server = LedgerServer::new(config, Arc::new(InMemoryStore::new()), Factories::default());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.run())?;
    println!("{} gateway stopped", "✓".green());
    Ok(())
}

fn cmd_write(server: &str, format: &OutputFormat, op: WriteOp, args: WriteArgs) -> anyhow::Result<()> {
    let factories = Factories::default();
    let id = parse_identity(&args.id)?;
    let entry = load_annotation(&args.annotation, &factories)?;
    let client = LedgerClient::new(HttpRequestor::new(server)?, factories);

    let status = match op {
        WriteOp::Create => client.create(&*id, entry),
        WriteOp::Append => client.append(&*id, entry),
    };
    print_status(format, status)?;
    if status == Status::Unknown {
        anyhow::bail!("request to {server} did not complete");
    }
    Ok(())
}

fn cmd_find(server: &str, format: &OutputFormat, args: FindArgs) -> anyhow::Result<()> {
    let factories = Factories::default();
    let id = parse_identity(&args.id)?;
    let client = LedgerClient::new(HttpRequestor::new(server)?, factories);

    let (entries, status) = client.find_by_identity(&*id);
    if status != Status::Success {
        print_status(format, status)?;
        anyhow::bail!("no ledger found for {}", id.printable());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => {
            println!("{} ({} entries)", id.printable().bold(), entries.len());
            for entry in &entries {
                println!(
                    "  {} {} {} {}",
                    entry.unique.to_string().dimmed(),
                    entry.created.to_rfc3339().cyan(),
                    entry.metadata.kind.yellow(),
                    entry.metadata.body,
                );
            }
        }
    }
    Ok(())
}

fn parse_identity(args: &IdentityArgs) -> anyhow::Result<Box<dyn Identity>> {
    if args.hash {
        let id = HashIdentity::from_hex(&args.identity)
            .with_context(|| format!("invalid hash identity {}", args.identity))?;
        Ok(Box::new(id))
    } else {
        Ok(Box::new(UrlIdentity::new(args.identity.clone())))
    }
}

fn load_annotation(path: &Path, factories: &Factories) -> anyhow::Result<Annotation> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Annotation::from_json(&bytes, factories)
        .with_context(|| format!("parsing annotation in {}", path.display()))
}

fn print_status(format: &OutputFormat, status: Status) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&status)?),
        OutputFormat::Text => {
            let label = status.to_string();
            let label = match status {
                Status::Success => label.green().bold(),
                Status::Exists | Status::NotFound => label.yellow().bold(),
                Status::Unknown => label.red().bold(),
            };
            println!("{label}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use annostore_types::Metadata;
    use std::io::Write;

    fn identity_args(identity: &str, hash: bool) -> IdentityArgs {
        IdentityArgs {
            identity: identity.into(),
            hash,
        }
    }

    #[test]
    fn url_identity_is_taken_verbatim() {
        let id = parse_identity(&identity_args("https://x/y z", false)).unwrap();
        assert_eq!(id.kind(), UrlIdentity::KIND);
        assert_eq!(id.printable(), "https://x/y z");
    }

    #[test]
    fn hash_identity_is_parsed_from_hex() {
        let expected = HashIdentity::derive(b"pump");
        let id = parse_identity(&identity_args(&expected.printable(), true)).unwrap();
        assert_eq!(id.kind(), HashIdentity::KIND);
        assert_eq!(id.printable(), expected.printable());
    }

    #[test]
    fn bad_hash_identity_is_error() {
        assert!(parse_identity(&identity_args("not-hex", true)).is_err());
    }

    #[test]
    fn annotation_file_round_trips() {
        let factories = Factories::default();
        let entry = Annotation::new(Arc::new(UrlIdentity::new("pump")), Metadata::assess("tpm", true));
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&entry.to_json().unwrap()).unwrap();

        let loaded = load_annotation(file.path(), &factories).unwrap();
        assert_eq!(loaded, entry);
    }

    #[test]
    fn malformed_annotation_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"unique\": 7}").unwrap();
        assert!(load_annotation(file.path(), &Factories::default()).is_err());
    }

    #[test]
    fn missing_annotation_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_annotation(&dir.path().join("absent.json"), &Factories::default()).is_err());
    }
}
