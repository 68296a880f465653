//! `ridedesk` admin console
//!
//! Lists, filters and pages through ride requests held by the admin service,
//! and approves, rejects, cancels or creates them.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ridedesk_console::render::{render_action_result, render_details, render_page, render_tabs};
use ridedesk_console::{AdminService, AppState, Dashboard};
use ridedesk_core::session::{ADMIN_ID_KEY, ADMIN_NAME_KEY, ADMIN_PHONE_KEY};
use ridedesk_core::{Config, MemorySessionStore, Operator, SessionStore, StatusFilter};
use std::path::PathBuf;
use tracing::info;

/// Command line interface for the ridedesk console
#[derive(Parser)]
#[command(
    name = "ridedesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Admin console for ride requests"
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Emit JSON logs
    #[arg(long, global = true)]
    json: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

/// Operator identity overrides
#[derive(Args, Debug, Default)]
struct OperatorArgs {
    /// Operator id (overrides `[operator].id`)
    #[arg(long, env = "RIDEDESK_ADMIN_ID")]
    admin_id: Option<String>,

    /// Operator name (overrides `[operator].name`)
    #[arg(long, env = "RIDEDESK_ADMIN_NAME")]
    admin_name: Option<String>,

    /// Operator phone (overrides `[operator].phone`)
    #[arg(long, env = "RIDEDESK_ADMIN_PHONE")]
    admin_phone: Option<String>,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// List requests
    List {
        /// Status filter (ALL, PENDING, APPROVED, REJECTED, CANCELLED)
        #[arg(short, long, default_value = "ALL")]
        status: String,

        /// Page to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Show request counts per status
    Counts,

    /// Show one request in full
    Show {
        /// Request id
        request_id: String,
    },

    /// Create a request
    Create {
        /// Requesting user
        #[arg(long)]
        user_name: String,

        /// Pickup location
        #[arg(long = "from")]
        from_location: String,

        /// Drop-off location
        #[arg(long = "to")]
        to_location: String,

        /// Goods description
        #[arg(long = "goods")]
        goods_description: String,

        /// Fare
        #[arg(long)]
        fare: f64,

        /// Comments
        #[arg(long, default_value = "")]
        comments: String,

        /// First goods photo URL
        #[arg(long, default_value = "")]
        photo1: String,

        /// Second goods photo URL
        #[arg(long, default_value = "")]
        photo2: String,
    },

    /// Approve a request
    Approve {
        /// Request id
        request_id: String,

        /// Approval comments
        #[arg(long, default_value = "")]
        comments: String,

        #[command(flatten)]
        operator: OperatorArgs,
    },

    /// Reject a request
    Reject {
        /// Request id
        request_id: String,

        /// Rejection reason
        #[arg(long)]
        reason: String,

        #[command(flatten)]
        operator: OperatorArgs,
    },

    /// Cancel a request
    Cancel {
        /// Request id
        request_id: String,
    },

    /// Print the resolved configuration
    Config,
}

fn resolve_operator(config: &Config, overrides: OperatorArgs) -> Result<Operator> {
    let mut store = MemorySessionStore::new();
    if let Some(ref configured) = config.operator {
        for key in [ADMIN_ID_KEY, ADMIN_NAME_KEY, ADMIN_PHONE_KEY] {
            if let Some(value) = configured.get(key) {
                store.insert(key, value);
            }
        }
    }
    for (key, value) in [
        (ADMIN_ID_KEY, overrides.admin_id),
        (ADMIN_NAME_KEY, overrides.admin_name),
        (ADMIN_PHONE_KEY, overrides.admin_phone),
    ] {
        if let Some(value) = value {
            store.insert(key, value);
        }
    }

    Operator::from_session(&store)
        .context("operator identity required: set [operator] in the config or pass --admin-* flags")
}

fn print_summary<S: AdminService>(dashboard: &Dashboard<S>) {
    println!("{}", render_tabs(dashboard.view()));
    println!();
    println!("{}", render_page(dashboard.view(), dashboard.selected_request_id()));
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json {
        config.logging.format = "json".to_string();
    }
    ridedesk_core::init_logging(&config.logging)?;

    if matches!(cli.command, Commands::Config) {
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let mut state = AppState::new(config)?;
    info!(base_url = %state.config.api.base_url, "connecting to admin service");
    let dashboard = &mut state.dashboard;
    dashboard.load().await.context("failed to load requests")?;

    match cli.command {
        Commands::List { status, page } => {
            let filter: StatusFilter = status.parse()?;
            dashboard.filter_by_status(filter);
            dashboard.go_to_page(page);
            print_summary(dashboard);
        }
        Commands::Counts => {
            for tab in dashboard.view().status_tabs() {
                println!("{:<10} {}", tab.label, tab.count);
            }
        }
        Commands::Show { request_id } => {
            dashboard.toggle_selection(&request_id);
            dashboard.open_details().await?;
            if let Some(record) = dashboard.mode().details() {
                println!("{}", render_details(record));
            }
        }
        Commands::Create {
            user_name,
            from_location,
            to_location,
            goods_description,
            fare,
            comments,
            photo1,
            photo2,
        } => {
            dashboard.open_create();
            if let Some(draft) = dashboard.draft_mut() {
                draft.user_name = user_name;
                draft.from_location = from_location;
                draft.to_location = to_location;
                draft.goods_description = goods_description;
                draft.fare = fare;
                draft.comments = comments;
                draft.goods_photo1_url = photo1;
                draft.goods_photo2_url = photo2;
            }
            dashboard.submit_create().await?;
            println!("request created");
            print_summary(dashboard);
        }
        Commands::Approve {
            request_id,
            comments,
            operator,
        } => {
            let operator = resolve_operator(&state.config, operator)?;
            dashboard.begin_approve(&request_id);
            dashboard.submit_approve(&operator, &comments).await?;
            if let Some(result) = dashboard.action_result() {
                println!("{request_id}: {}", render_action_result(result));
            }
        }
        Commands::Reject {
            request_id,
            reason,
            operator,
        } => {
            let operator = resolve_operator(&state.config, operator)?;
            dashboard.begin_reject(&request_id);
            dashboard.submit_reject(&operator, &reason).await?;
            if let Some(result) = dashboard.action_result() {
                println!("{request_id}: {}", render_action_result(result));
            }
        }
        Commands::Cancel { request_id } => {
            dashboard.cancel(&request_id).await?;
            println!("{request_id}: cancelled");
        }
        Commands::Config => {}
    }

    if let Some(notice) = state.dashboard.notice() {
        eprintln!("warning: {notice}");
    }

    Ok(())
}
