//! NavBlock CLI
//!
//! CLI tool for checking navigations against a settings file and editing the
//! blocked lists it contains.

mod config_file;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use nb_core::{notice_url, Engine, NavigationTarget, Policy, TimeOfDay};
use nb_lists::{normalize_entry, parse_site_list, parse_term_list, ListEditor, ListKind};

use config_file::{read_config, read_config_or_default, read_list, write_config};

#[derive(Parser)]
#[command(name = "nb-cli")]
#[command(about = "NavBlock policy checker and list tools")]
struct Cli {
    /// Log decisions and skipped entries
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide a navigation against a settings file
    Check {
        /// Settings file (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Destination URL
        #[arg(short, long)]
        url: String,

        /// Time of day as HH:MM (defaults to now)
        #[arg(short, long)]
        at: Option<String>,

        /// Notice page address used for redirects
        #[arg(long, default_value = "chrome-extension://navblock/blocked.html")]
        notice_page: String,
    },

    /// Report entries and bounds that can never take effect
    Validate {
        /// Settings file (JSON)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Summarize a settings file and list the entries that take effect
    Info {
        /// Settings file (JSON)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Edit the blocked site list
    Sites {
        #[command(subcommand)]
        action: ListAction,
    },

    /// Edit the blocked search list
    Searches {
        #[command(subcommand)]
        action: ListAction,
    },

    /// Merge plain-text, hosts-file or ABP lists into a settings file
    Import {
        /// Settings file (JSON), created if missing
        #[arg(short, long)]
        config: PathBuf,

        /// Site list files
        #[arg(long)]
        sites: Vec<PathBuf>,

        /// Search term list files
        #[arg(long)]
        searches: Vec<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ListAction {
    /// Add an entry
    Add {
        entry: String,
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Remove an entry
    Remove {
        entry: String,
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Print the entries
    List {
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            config,
            url,
            at,
            notice_page,
        } => cmd_check(&config, &url, at.as_deref(), &notice_page),
        Commands::Validate { config } => cmd_validate(&config),
        Commands::Info { config } => cmd_info(&config),
        Commands::Sites { action } => cmd_list(ListKind::Sites, action),
        Commands::Searches { action } => cmd_list(ListKind::Searches, action),
        Commands::Import {
            config,
            sites,
            searches,
        } => cmd_import(&config, &sites, &searches),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if verbose { "debug" } else { "warn" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_check(config_path: &Path, url: &str, at: Option<&str>, notice_page: &str) -> Result<(), String> {
    let config = read_config(config_path)?;
    let policy = Policy::compile(&config);
    let engine = Engine::new(notice_page);

    let target = NavigationTarget::now(url);
    let now = match at {
        Some(text) => TimeOfDay::parse(text).map_err(|e| format!("Invalid --at: {}", e))?,
        None => TimeOfDay::from_time(&target.observed_at),
    };

    let verdict = engine.decide(&policy, &target, now);

    println!("{}", url);
    println!("  Time:     {}", now);
    println!("  Window:   {} ({})", policy.window(), if policy.window().contains(now) { "active" } else { "inactive" });
    println!("  Verdict:  {:?}", verdict);
    if let Some(redirect) = notice_url(engine.notice_page(), verdict, url) {
        println!("  Redirect: {}", redirect);
    }

    Ok(())
}

fn cmd_validate(config_path: &Path) -> Result<(), String> {
    let config = read_config(config_path)?;
    let diagnostics = config.diagnostics();

    if diagnostics.is_empty() {
        println!("Settings '{}' are valid", config_path.display());
        return Ok(());
    }

    println!("Settings '{}' have {} problem(s):", config_path.display(), diagnostics.len());
    for diagnostic in &diagnostics {
        println!("  - {}", diagnostic);
    }

    Ok(())
}

fn cmd_info(config_path: &Path) -> Result<(), String> {
    let config = read_config(config_path)?;
    let policy = Policy::compile(&config);
    let window = policy.window();

    println!("Settings: {}", config_path.display());
    println!();
    println!("Sites:");
    println!("  Entries:     {}", config.blocked_sites.len());
    println!("  Usable:      {}", policy.hosts().len());
    for host in policy.hosts().iter() {
        println!("    {}", host);
    }
    println!();
    println!("Searches:");
    println!("  Terms:       {}", config.blocked_searches.len());
    println!("  Usable:      {}", policy.terms().len());
    for pattern in policy.terms().iter() {
        println!("    {}", pattern.term());
    }
    println!();
    println!("Window:");
    println!("  Active:      {}", window);
    println!("  Wraps:       {}", window.wraps_midnight());

    Ok(())
}

fn cmd_list(kind: ListKind, action: ListAction) -> Result<(), String> {
    match action {
        ListAction::Add { entry, config: path } => {
            let mut config = read_config_or_default(&path)?;
            let added = ListEditor::new(&mut config)
                .add(kind, &entry)
                .map_err(|e| e.to_string())?;
            let entry = normalize_entry(&entry);
            if added {
                write_config(&path, &config)?;
                println!("Added {} entry '{}'", kind, entry);
            } else {
                println!("{} entry '{}' already present", kind, entry);
            }
        }
        ListAction::Remove { entry, config: path } => {
            let mut config = read_config(&path)?;
            ListEditor::new(&mut config)
                .remove(kind, &entry)
                .map_err(|e| e.to_string())?;
            write_config(&path, &config)?;
            println!("Removed {} entry '{}'", kind, entry);
        }
        ListAction::List { config: path } => {
            let config = read_config(&path)?;
            let entries = match kind {
                ListKind::Sites => &config.blocked_sites,
                ListKind::Searches => &config.blocked_searches,
            };
            for entry in entries {
                println!("{}", entry);
            }
        }
    }
    Ok(())
}

fn cmd_import(config_path: &Path, sites: &[PathBuf], searches: &[PathBuf]) -> Result<(), String> {
    if sites.is_empty() && searches.is_empty() {
        return Err("No list files specified".to_string());
    }

    let mut config = read_config_or_default(config_path)?;
    let mut editor = ListEditor::new(&mut config);

    for (kind, paths) in [(ListKind::Sites, sites), (ListKind::Searches, searches)] {
        for path in paths {
            let text = read_list(path)?;
            let parsed = match kind {
                ListKind::Sites => parse_site_list(&text),
                ListKind::Searches => parse_term_list(&text),
            };
            let added = editor.extend(kind, &parsed.entries);
            println!(
                "  {} - {} entries, {} new, {} skipped",
                path.file_name().unwrap_or_default().to_string_lossy(),
                parsed.entries.len(),
                added,
                parsed.skipped
            );
        }
    }

    let site_stats = editor.tidy(ListKind::Sites);
    let search_stats = editor.tidy(ListKind::Searches);
    write_config(config_path, &config)?;

    println!("Imported into '{}'", config_path.display());
    println!("  Sites:    {}", site_stats.after);
    println!("  Searches: {}", search_stats.after);

    Ok(())
}
