// ABOUTME: Interactive shell for inspecting and exercising a role configuration.
// ABOUTME: Finds roles.toml, loads it, and answers authorization queries.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use rustyline::DefaultEditor;

use rolegate::prelude::*;

/// Query a role configuration interactively.
#[derive(Parser, Debug)]
#[command(name = "rolegate-shell", version, about)]
struct Args {
    /// Role configuration file (.toml or .json).
    #[arg(short, long, env = "ROLEGATE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level, overridden by RUST_LOG.
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Log format: pretty, compact or json.
    #[arg(long, default_value = "compact")]
    log_format: LogFormat,
}

fn parse_principal(raw: &str) -> Result<PrincipalId> {
    let id = raw
        .parse::<uuid::Uuid>()
        .with_context(|| format!("'{raw}' is not a principal id"))?;
    Ok(PrincipalId(id))
}

fn find_config(explicit: Option<PathBuf>) -> Option<PathBuf> {
    if explicit.is_some() {
        return explicit;
    }

    // Try roles.toml in current directory
    let local = PathBuf::from("roles.toml");
    if local.exists() {
        return Some(local);
    }

    // Try ~/.rolegate/roles.toml
    if let Some(home) = dirs::home_dir() {
        let global = home.join(".rolegate").join("roles.toml");
        if global.exists() {
            return Some(global);
        }
    }

    None
}

struct Shell {
    source: ConfigSource,
    authorizer: Authorizer,
    store: MemoryPrincipalStore,
}

impl Shell {
    async fn open(path: Option<&Path>) -> Result<Self> {
        let (config, source) = RbacConfig::discover(path)?;
        let handle = RoleTableHandle::from_config(&config)
            .with_context(|| format!("refusing to start with {source}"))?;
        let store = MemoryPrincipalStore::seeded(&config, &handle.current()).await?;
        Ok(Self {
            source,
            authorizer: Authorizer::new(handle),
            store,
        })
    }

    async fn run(&self, line: &str) -> Result<()> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            ["help"] => print_help(),
            ["roles"] => {
                for name in self.authorizer.tables().current().names() {
                    println!("{name}");
                }
            }
            ["aliases"] => {
                let table = self.authorizer.tables().current();
                for alias in table.catalog().aliases() {
                    let canonical = table.catalog().resolve(alias)?;
                    println!("{alias} -> {canonical}");
                }
            }
            ["role", name] => self.show_role(name)?,
            ["can", roles, resource, permission] => {
                let principal = roles
                    .split(',')
                    .filter(|r| !r.is_empty())
                    .fold(Principal::new(PrincipalId::new()), |p, r| p.with_role(r));
                let decision = self.authorizer.check(&principal, resource, permission);
                println!("{decision:?}");
            }
            ["check", id, resource, permission] => {
                let id = parse_principal(id)?;
                let decision = self
                    .authorizer
                    .check_principal(&self.store, id, resource, permission)
                    .await?;
                println!("{decision:?}");
            }
            ["reload"] => {
                let config = RbacConfig::load_source(&self.source)?;
                let version = self.authorizer.tables().reload(&config)?;
                println!("Reloaded {} (version {version})", self.source);
            }
            _ => bail!("unrecognised command, try 'help'"),
        }
        Ok(())
    }

    fn show_role(&self, name: &str) -> Result<()> {
        let table = self.authorizer.tables().current();
        let Some(role) = table.get(name) else {
            bail!("no role named '{name}'");
        };
        if let Some(display) = &role.display_name {
            println!("{display}");
        }
        if let Some(description) = &role.description {
            println!("  {description}");
        }
        for resource in role.resources() {
            let permissions = role
                .permissions(resource)
                .unwrap_or_default()
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            println!("  {resource}: {permissions}");
        }
        Ok(())
    }
}

fn print_help() {
    println!("Commands:");
    println!("  roles                                  list roles");
    println!("  role <name>                            show a role's permissions");
    println!("  aliases                                list permission aliases");
    println!("  can <role,...> <resource> <permission> check an ad-hoc principal");
    println!("  check <principal-id> <resource> <perm> check a seeded principal");
    println!("  reload                                 reload the configuration");
    println!("  quit                                   exit");
}

async fn run_loop(shell: &Shell) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!("Type 'help' for commands, 'quit' to exit.\n");

    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(_) => break,
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        let _ = rl.add_history_entry(line);
        if let Err(e) = shell.run(line).await {
            println!("Error: {e:#}");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    setup_logging(&LogConfig::new(&args.log_level).with_format(args.log_format))?;

    let path = find_config(args.config);
    let shell = Shell::open(path.as_deref()).await?;
    tracing::info!(source = %shell.source, "shell ready");

    println!("rolegate shell ({})", shell.source);
    run_loop(&shell).await
}
