mod render;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use url::Url;

use employees_info::config::EmployeesInfoConfig;
use employees_info::contract::client::EmployeesInfoApi;
use employees_info::contract::model::{EmployeeStatus, NewEmployee, PageView};
use employees_info::{Adapters, EmployeesInfo, SupabaseSettings};
use render::{write_page, ConsoleNotificationSink};
use runtime::{default_logging_config, AppConfig, CliArgs};

const MODULE_NAME: &str = "employees_info";

/// HR Console - employee directory and onboarding
#[derive(Parser)]
#[command(name = "hr-console")]
#[command(about = "HR Console - employee directory and onboarding")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory demo backend instead of the configured one
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of the directory
    List {
        /// Case-insensitive match on name, department or position
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Provision a new employee: login account, record and role
    Add(AddArgs),
    /// Flip an employee between active and inactive
    Toggle { id: String },
    /// Interactive session over one directory view
    Shell,
    /// Check configuration
    Check,
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    position: String,
    #[arg(long, default_value = "")]
    department: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    avatar: String,
    /// Annual salary; anything non-numeric is stored as 0
    #[arg(long, default_value = "")]
    salary: String,
    /// YYYY-MM-DD, defaults to today
    #[arg(long)]
    join_date: Option<NaiveDate>,
    /// active, inactive or on-leave
    #[arg(long, default_value = "active")]
    status: String,
    /// Login password; the configured default is used when omitted
    #[arg(long)]
    password: Option<String>,
}

impl AddArgs {
    fn into_new_employee(self) -> NewEmployee {
        let mut e = NewEmployee::new(self.name, self.email);
        e.position = self.position;
        e.department = self.department;
        e.phone = self.phone;
        e.avatar = self.avatar;
        e.salary = self.salary;
        if let Some(date) = self.join_date {
            e.join_date = date;
        }
        e.status = EmployeeStatus::from_form(&self.status);
        e.password = self.password;
        e
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_else(default_logging_config);
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.console.home_dir));
    tracing::debug!("HR console starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let command = cli.command.unwrap_or(Commands::List {
        search: String::new(),
        page: 1,
    });
    match command {
        Commands::Check => check_config(&config),
        Commands::List { search, page } => {
            let client = connect(&config, &args)?;
            list(client.as_ref(), &search, page).await
        }
        Commands::Add(add) => {
            let client = connect(&config, &args)?;
            let outcome = client
                .provision(add.into_new_employee())
                .await
                .context("provisioning failed")?;
            println!("id: {}", outcome.employee.id);
            if let Some(user) = outcome.identity_id {
                println!("login: {user}");
            }
            Ok(())
        }
        Commands::Toggle { id } => {
            let client = connect(&config, &args)?;
            client.reload().await?;
            let updated = client.toggle_status(&id).await?;
            tracing::info!(employee_id = %updated.id, status = %updated.status, "toggled");
            Ok(())
        }
        Commands::Shell => {
            let client = connect(&config, &args)?;
            shell(client.as_ref()).await
        }
    }
}

/// Wire the module to either the configured backend or the demo adapters.
fn connect(config: &AppConfig, args: &CliArgs) -> Result<Arc<dyn EmployeesInfoApi>> {
    let module_cfg: EmployeesInfoConfig = config.module_config(MODULE_NAME)?;

    let adapters = if args.mock {
        tracing::info!("Using in-memory demo backend");
        Adapters::in_memory_demo()
    } else {
        let backend = config.backend.with_dev_fallbacks();
        let url = Url::parse(backend.url.trim())
            .with_context(|| format!("Invalid backend.url '{}'", backend.url))?;
        Adapters::supabase(&SupabaseSettings {
            url,
            anon_key: backend.anon_key,
            service_role_key: backend.service_role_key,
            timeout: backend.timeout,
        })?
    };

    let module = EmployeesInfo::new();
    module.init(&module_cfg, adapters.with_notifier(Arc::new(ConsoleNotificationSink)))?;
    module.client()
}

async fn list(client: &dyn EmployeesInfoApi, search: &str, page: u32) -> Result<()> {
    client.reload().await?;
    client.search(search).await;
    let view = client.go_to_page(page).await;
    write_page(&mut std::io::stdout().lock(), &view)?;
    Ok(())
}

const SHELL_HELP: &str =
    "commands: list | search <text> | next | prev | page <n> | toggle <id> | reload | help | quit";

async fn shell(client: &dyn EmployeesInfoApi) -> Result<()> {
    // A failed initial load is already reported; the view starts empty.
    let _ = client.reload().await;
    print_view(&client.page().await)?;
    println!("{SHELL_HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let (cmd, rest) = match line.trim().split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (line.trim(), ""),
        };

        let view = match cmd {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{SHELL_HELP}");
                continue;
            }
            "list" => client.page().await,
            "search" => client.search(rest).await,
            "next" => client.next_page().await,
            "prev" => client.previous_page().await,
            "page" => match rest.parse::<u32>() {
                Ok(n) => client.go_to_page(n).await,
                Err(_) => {
                    println!("page expects a number");
                    continue;
                }
            },
            "toggle" => {
                // Failures are reported through the notification sink.
                let _ = client.toggle_status(rest).await;
                client.page().await
            }
            "reload" => {
                let _ = client.reload().await;
                client.page().await
            }
            other => {
                println!("unknown command '{other}'; {SHELL_HELP}");
                continue;
            }
        };
        print_view(&view)?;
    }
    Ok(())
}

fn print_view(view: &PageView) -> Result<()> {
    write_page(&mut std::io::stdout().lock(), view)?;
    Ok(())
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let module_cfg: EmployeesInfoConfig = config.module_config(MODULE_NAME)?;
    if !config.backend.is_configured() {
        println!(
            "warning: backend.url / backend.anon_key are not set; development fallbacks will be used"
        );
    } else {
        Url::parse(config.backend.url.trim())
            .with_context(|| format!("Invalid backend.url '{}'", config.backend.url))?;
    }

    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    println!(
        "{MODULE_NAME}: page_size={}, create_identity={}, assign_role={}, orphan_policy={:?}",
        module_cfg.page_size,
        module_cfg.create_identity,
        module_cfg.assign_role,
        module_cfg.orphan_policy
    );
    Ok(())
}
