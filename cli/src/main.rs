//! Eventboard command-line client.
//!
//! Drives the `eventboard` library against a live backend: session
//! management, the event catalog, participation, and admin moderation.
//! The session lives in a JSON file between runs, so repeated commands
//! reuse one signed-in session.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use eventboard::net::auth::{self, AuthError};
use eventboard::net::{ApiContext, ApiError, admin, categories, events, users};
use eventboard::state::session::Role;
use eventboard::state::visibility;

mod store;
use store::FileStorage;

#[derive(Debug, thiserror::Error)]
enum CliError {
    /// Auth failures carry the display-ready message, credentials
    /// localization included.
    #[error("{0}")]
    Auth(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("unknown role `{0}`; expected visitor, organizer or admin")]
    UnknownRole(String),
}

impl From<AuthError> for CliError {
    fn from(error: AuthError) -> Self {
        Self::Auth(error.user_message())
    }
}

#[derive(Parser, Debug)]
#[command(name = "eventboard-cli", about = "Eventboard API command-line client")]
struct Cli {
    #[arg(long, env = "EVENTBOARD_BASE_URL", default_value = "http://127.0.0.1:8000")]
    base_url: String,

    /// Where the token and cached profile live between runs.
    #[arg(long, env = "EVENTBOARD_SESSION_FILE", default_value = ".eventboard-session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and persist the session.
    Login { email: String, password: String },
    /// Clear the persisted session.
    Logout,
    /// Create an account (does not sign in).
    Register {
        email: String,
        username: String,
        password: String,
    },
    /// Fetch the authoritative profile from the backend.
    Me,
    /// Show the local session state and the UI regions it unlocks.
    Status,
    Event(EventCommand),
    Category(CategoryCommand),
    Admin(AdminCommand),
}

#[derive(Args, Debug)]
struct EventCommand {
    #[command(subcommand)]
    command: EventSubcommand,
}

#[derive(Subcommand, Debug)]
enum EventSubcommand {
    /// Browse the public catalog.
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
        #[arg(long)]
        skip: Option<i64>,
        #[arg(long)]
        limit: Option<i64>,
    },
    Show {
        event_id: i64,
    },
    /// Create an event from a JSON draft (organizer).
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        event_id: i64,
        #[arg(long)]
        data: String,
    },
    Delete {
        event_id: i64,
    },
    /// Join an approved event.
    Join {
        event_id: i64,
        #[arg(long, default_value_t = false)]
        ticket: bool,
    },
    /// Cancel participation.
    Leave {
        event_id: i64,
    },
    /// Events organized by the current user.
    Mine,
    /// Events the current user participates in.
    Joined,
    Upcoming,
    Past,
}

#[derive(Args, Debug)]
struct CategoryCommand {
    #[command(subcommand)]
    command: CategorySubcommand,
}

#[derive(Subcommand, Debug)]
enum CategorySubcommand {
    List,
}

#[derive(Args, Debug)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminSubcommand {
    /// All events, every moderation status.
    Events,
    Approve {
        event_id: i64,
    },
    Reject {
        event_id: i64,
        #[arg(long)]
        reason: String,
    },
    Delete {
        event_id: i64,
    },
    Users {
        #[arg(long, default_value_t = 0)]
        skip: i64,
        #[arg(long, default_value_t = 100)]
        limit: i64,
    },
    SetRole {
        user_id: i64,
        role: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let storage = Arc::new(FileStorage::open(cli.session_file.clone()));
    let ctx = ApiContext::new(cli.base_url.clone(), storage);

    match cli.command {
        Command::Login { email, password } => run_login(&ctx, &email, &password).await,
        Command::Logout => run_logout(&ctx),
        Command::Register { email, username, password } => {
            run_register(&ctx, &email, &username, &password).await
        }
        Command::Me => run_me(&ctx).await,
        Command::Status => run_status(&ctx),
        Command::Event(event) => run_event(&ctx, event).await,
        Command::Category(category) => run_category(&ctx, category).await,
        Command::Admin(admin_cmd) => run_admin(&ctx, admin_cmd).await,
    }
}

async fn run_login(ctx: &ApiContext, email: &str, password: &str) -> Result<(), CliError> {
    let user = auth::login(ctx, email, password).await?;
    print_json(&user)?;
    Ok(())
}

fn run_logout(ctx: &ApiContext) -> Result<(), CliError> {
    auth::logout(ctx);
    println!("signed out");
    Ok(())
}

async fn run_register(
    ctx: &ApiContext,
    email: &str,
    username: &str,
    password: &str,
) -> Result<(), CliError> {
    let created = auth::register(ctx, email, password, username).await?;
    print_json(&created)?;
    eprintln!("account created; sign in with `eventboard-cli login`");
    Ok(())
}

async fn run_me(ctx: &ApiContext) -> Result<(), CliError> {
    let user = auth::fetch_current_user(ctx).await?;
    print_json(&user)?;
    Ok(())
}

/// Render what a UI bound to this session would show: the auth phase and
/// the visibility of each protected region class.
fn run_status(ctx: &ApiContext) -> Result<(), CliError> {
    let visibility = visibility::compute(ctx.session());
    let phase = match auth::phase(ctx) {
        auth::AuthPhase::Anonymous => "anonymous",
        auth::AuthPhase::Authenticating => "authenticating",
        auth::AuthPhase::Authenticated => "authenticated",
    };

    print_json(&serde_json::json!({
        "phase": phase,
        "regions": {
            "authenticated": visibility.authenticated,
            "guest": visibility.guest,
            "admin": visibility.admin,
        },
        "display_name": visibility.display_name,
    }))?;
    Ok(())
}

async fn run_event(ctx: &ApiContext, event: EventCommand) -> Result<(), CliError> {
    match event.command {
        EventSubcommand::List { search, start_date, end_date, skip, limit } => {
            let filter = events::EventFilter { search, start_date, end_date, skip, limit };
            print_json(&events::list(ctx, &filter).await?)?;
        }
        EventSubcommand::Show { event_id } => {
            print_json(&events::detail(ctx, event_id).await?)?;
        }
        EventSubcommand::Create { data } => {
            let draft: events::EventDraft = serde_json::from_str(&data)?;
            print_json(&events::create(ctx, &draft).await?)?;
        }
        EventSubcommand::Update { event_id, data } => {
            let draft: events::EventDraft = serde_json::from_str(&data)?;
            print_json(&events::update(ctx, event_id, &draft).await?)?;
        }
        EventSubcommand::Delete { event_id } => {
            print_json(&events::delete(ctx, event_id).await?)?;
        }
        EventSubcommand::Join { event_id, ticket } => {
            print_json(&events::participate(ctx, event_id, ticket).await?)?;
        }
        EventSubcommand::Leave { event_id } => {
            print_json(&events::cancel_participation(ctx, event_id).await?)?;
        }
        EventSubcommand::Mine => {
            print_json(&events::mine(ctx).await?)?;
        }
        EventSubcommand::Joined => {
            print_json(&users::my_events(ctx).await?)?;
        }
        EventSubcommand::Upcoming => {
            print_json(&users::upcoming_events(ctx).await?)?;
        }
        EventSubcommand::Past => {
            print_json(&users::past_events(ctx).await?)?;
        }
    }
    Ok(())
}

async fn run_category(ctx: &ApiContext, category: CategoryCommand) -> Result<(), CliError> {
    match category.command {
        CategorySubcommand::List => {
            print_json(&categories::list(ctx).await?)?;
        }
    }
    Ok(())
}

async fn run_admin(ctx: &ApiContext, admin_cmd: AdminCommand) -> Result<(), CliError> {
    match admin_cmd.command {
        AdminSubcommand::Events => {
            print_json(&admin::list_events(ctx).await?)?;
        }
        AdminSubcommand::Approve { event_id } => {
            print_json(&admin::approve_event(ctx, event_id).await?)?;
        }
        AdminSubcommand::Reject { event_id, reason } => {
            print_json(&admin::reject_event(ctx, event_id, &reason).await?)?;
        }
        AdminSubcommand::Delete { event_id } => {
            print_json(&admin::delete_event(ctx, event_id).await?)?;
        }
        AdminSubcommand::Users { skip, limit } => {
            print_json(&admin::list_users(ctx, skip, limit).await?)?;
        }
        AdminSubcommand::SetRole { user_id, role } => {
            let Some(parsed) = Role::parse(&role) else {
                return Err(CliError::UnknownRole(role));
            };
            print_json(&admin::set_role(ctx, user_id, parsed).await?)?;
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
