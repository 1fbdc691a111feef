use anyhow::Result;
use clap::{Parser, Subcommand};

use cascade::audit::AuditLogger;
use cascade::catalog::Catalog;
use cascade::config::{CascadePaths, Settings};
use cascade::wizard::{BudgetWizard, WizardOutcome};

#[derive(Parser)]
#[command(
    name = "cascade",
    version,
    about = "Terminal-based top-down budget distribution wizard",
    long_about = "cascade guides you through distributing a subsidiary's total \
                  budget down departments, locations, and GL accounts. Every \
                  level must balance exactly against its parent before the \
                  plan can be submitted to the accounting system."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new budget plan and run the wizard
    #[command(alias = "plan")]
    New,

    /// Show the reference catalog (subsidiaries, departments, locations, GL accounts)
    Catalog,

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = CascadePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Reference data: a configured catalog file, or the built-in tables
    let catalog = match &settings.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };

    match cli.command {
        Some(Commands::New) => {
            paths.ensure_directories()?;
            let audit = AuditLogger::new(paths.audit_log());
            let wizard = BudgetWizard::new(&catalog, &settings, &paths, &audit);
            match wizard.run()? {
                WizardOutcome::Completed(plan) => {
                    println!();
                    println!(
                        "Plan {} for {} is finalized.",
                        plan.id, plan.subsidiary_name
                    );
                }
                WizardOutcome::Cancelled => {}
            }
        }
        Some(Commands::Catalog) => {
            print_catalog(&catalog);
        }
        Some(Commands::Audit { count }) => {
            let audit = AuditLogger::new(paths.audit_log());
            let entries = audit.read_recent(count)?;
            if entries.is_empty() {
                println!("Audit log is empty.");
            } else {
                for entry in entries {
                    println!("{}", entry.format_human_readable());
                }
            }
        }
        Some(Commands::Config) => {
            println!("cascade-cli Configuration");
            println!("=========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Date format:        {}", settings.date_format);
            match &settings.catalog_path {
                Some(path) => println!("  Catalog file:       {}", path.display()),
                None => println!("  Catalog file:       (built-in)"),
            }
            println!("  Publish latency:    {} ms", settings.publish_latency_ms);
        }
        None => {
            println!("cascade - top-down budget distribution");
            println!();
            println!("Run 'cascade new' to start a budget plan.");
            println!("Run 'cascade --help' for usage information.");
        }
    }

    Ok(())
}

fn print_catalog(catalog: &Catalog) {
    let sections = [
        ("Subsidiaries", catalog.subsidiaries()),
        ("Departments", catalog.departments()),
        ("Locations", catalog.locations()),
        ("GL Accounts", catalog.gl_accounts()),
    ];
    for (title, entries) in sections {
        println!("{}", title);
        for entry in entries {
            println!("  {:<6} {}", entry.id, entry.name);
        }
        println!();
    }
}
