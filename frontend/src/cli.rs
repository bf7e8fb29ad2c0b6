use std::sync::Arc;

use anyhow::{anyhow, bail, Context as _};
use clap::{Parser, Subcommand};
use leavedesk_core::{DateFieldError, LeaveRange, LeaveType};

use crate::{
    api::{ApiClient, ApiError, Claims},
    config::Config,
    pages::{
        leave::{
            repository::LeaveRepository, types::LeaveRequestSummary, LeaveViewModel,
        },
        login::{repository::LoginRepository, LoginViewModel},
        manager::{
            repository::ManagerRepository,
            types::{Decision, PendingRequest},
            ManagerViewModel,
        },
    },
    router::Route,
    state::auth::AuthState,
    utils::{
        storage::{FileSessionStore, SessionStore},
        time::today_in_tz,
    },
};

#[derive(Debug, Parser)]
#[command(name = "leavedesk", version, about = "Leave requests from the command line")]
pub struct Cli {
    /// Overrides LEAVEDESK_API_BASE_URL
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "LEAVEDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Count business days between two dates (inclusive)
    Days { from: String, to: String },
    /// Remaining balance per leave type
    Balances,
    /// Your leave requests, newest first
    Requests,
    /// Request leave
    Request {
        #[arg(long = "type")]
        leave_type: Option<String>,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Submit without stopping at the confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Delete one of your pending requests
    Cancel {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Team requests awaiting a decision (managers)
    Pending,
    /// Approve a pending request (managers)
    Approve {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Reject a pending request (managers)
    Reject {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

struct Context {
    config: Config,
    client: Arc<ApiClient>,
}

impl Context {
    fn build(api_base_url: Option<&str>) -> anyhow::Result<Self> {
        let mut config = Config::load()?;
        if let Some(url) = api_base_url {
            config = config.with_api_base_url(url);
        }
        let store = FileSessionStore::new(config.session_file.clone());
        tracing::debug!(
            api_base_url = %config.api_base_url,
            session_file = %store.path().display(),
            time_zone = %config.time_zone,
            "Loaded configuration"
        );
        let session: Arc<dyn SessionStore> = Arc::new(store);
        let client = ApiClient::new(&config, session)?;
        Ok(Self {
            config,
            client: Arc::new(client),
        })
    }

    fn auth_state(&self) -> anyhow::Result<AuthState> {
        Ok(AuthState::from_session(self.client.session().as_ref())?)
    }

    /// Claims of the signed-in user, provided `route` is where they belong.
    fn claims_for(&self, route: Route) -> anyhow::Result<Claims> {
        let state = self.auth_state()?;
        match state.route_for(route) {
            Route::Login => bail!("Not signed in. Run `leavedesk login` first."),
            resolved if resolved != route => match resolved {
                Route::PendingRequests => {
                    bail!("Managers review requests with `leavedesk pending`.")
                }
                _ => bail!("Only managers can review leave requests."),
            },
            _ => state
                .claims
                .ok_or_else(|| anyhow!("Not signed in. Run `leavedesk login` first.")),
        }
    }

    fn leave(&self) -> LeaveViewModel {
        LeaveViewModel::new(LeaveRepository::new(self.client.clone()))
    }

    fn manager(&self) -> ManagerViewModel {
        ManagerViewModel::new(ManagerRepository::new(self.client.clone()))
    }

    fn login(&self) -> LoginViewModel {
        LoginViewModel::new(LoginRepository::new(self.client.clone()))
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        if let Command::Days { from, to } = &self.command {
            println!("{}", render_days(from, to)?);
            return Ok(());
        }

        let signing_in = matches!(self.command, Command::Login { .. });
        let ctx = Context::build(self.api_base_url.as_deref())?;
        self.execute(&ctx).await.map_err(|err| {
            if signing_in {
                err
            } else {
                with_sign_in_hint(err)
            }
        })
    }

    async fn execute(self, ctx: &Context) -> anyhow::Result<()> {
        match self.command {
            Command::Days { .. } => Ok(()),
            Command::Login { username, password } => {
                let (claims, landing) = ctx.login().submit(&username, &password).await?;
                println!(
                    "Signed in as {} ({}). Start at {}.",
                    claims.display_name(),
                    claims.role_name.as_deref().unwrap_or("Employee"),
                    landing.path()
                );
                Ok(())
            }
            Command::Logout => {
                ctx.login().sign_out()?;
                println!("Signed out.");
                Ok(())
            }
            Command::Whoami => {
                let state = ctx.auth_state()?;
                match &state.claims {
                    Some(claims) => println!(
                        "{} ({}), employee no {}, home {}",
                        claims.display_name(),
                        claims.role_name.as_deref().unwrap_or("Employee"),
                        employee_no(claims.user_id.as_deref()),
                        state.route_for(Route::MyRequests).path()
                    ),
                    None => println!("Not signed in."),
                }
                Ok(())
            }
            Command::Balances => {
                let claims = ctx.claims_for(Route::MyRequests)?;
                let overview = ctx.leave().load(claims).await?;
                println!("{}", render_balances(&overview.leave_types));
                Ok(())
            }
            Command::Requests => {
                let claims = ctx.claims_for(Route::MyRequests)?;
                let overview = ctx.leave().load(claims).await?;
                println!("{}", render_requests(&overview.requests));
                Ok(())
            }
            Command::Request {
                leave_type,
                from,
                to,
                yes,
            } => {
                let claims = ctx.claims_for(Route::MyRequests)?;
                let vm = ctx.leave();
                let overview = vm.load(claims).await?;
                println!(
                    "Employee no: {}",
                    employee_no(overview.claims.user_id.as_deref())
                );
                let leave_type = match leave_type {
                    Some(name) => name,
                    None => overview
                        .default_leave_type()
                        .map(|leave_type| leave_type.name.clone())
                        .ok_or_else(|| anyhow!("No leave types are available."))?,
                };
                let today = today_in_tz(ctx.config.time_zone);
                let plan = vm.preview(&overview, &leave_type, &from, &to, today)?;
                println!("{}", plan.summary());
                if !yes {
                    println!("Re-run with --yes to submit this request.");
                    return Ok(());
                }
                vm.submit(&plan).await?;
                println!("Leave request submitted.");
                Ok(())
            }
            Command::Cancel { id, yes } => {
                let claims = ctx.claims_for(Route::MyRequests)?;
                let vm = ctx.leave();
                let overview = vm.load(claims).await?;
                let request = vm.cancellable(&overview, &id)?;
                println!("{}", request.deletion_summary());
                if !yes {
                    println!("Re-run with --yes to delete this request.");
                    return Ok(());
                }
                vm.cancel(&overview, &id).await?;
                println!("Leave request {} deleted.", id);
                Ok(())
            }
            Command::Pending => {
                ctx.claims_for(Route::PendingRequests)?;
                let pending = ctx.manager().load().await?;
                println!("{}", render_pending(&pending));
                Ok(())
            }
            Command::Approve { id, yes } => decide(ctx, &id, Decision::Approve, yes).await,
            Command::Reject { id, yes } => decide(ctx, &id, Decision::Reject, yes).await,
        }
    }
}

/// Points at `leavedesk login` when the API turned the stored session down.
fn with_sign_in_hint(err: anyhow::Error) -> anyhow::Error {
    match err.downcast_ref::<ApiError>() {
        Some(api_err) if api_err.is_unauthorized() => {
            anyhow!("{} Run `leavedesk login` to sign in again.", api_err.error)
        }
        _ => err,
    }
}

fn employee_no(user_id: Option<&str>) -> &str {
    user_id.unwrap_or("-")
}

async fn decide(ctx: &Context, id: &str, decision: Decision, yes: bool) -> anyhow::Result<()> {
    ctx.claims_for(Route::PendingRequests)?;
    let vm = ctx.manager();
    let pending = vm.load().await?;
    let request = pending
        .iter()
        .find(|request| request.id == id)
        .with_context(|| format!("No pending leave request with id {}.", id))?;
    println!("{}", request.decision_prompt(decision));
    if !yes {
        println!("Re-run with --yes to {} it.", decision.verb());
        return Ok(());
    }
    vm.decide(id, decision).await?;
    println!("Leave request {} {}.", id, decision.status().as_str());
    Ok(())
}

/// Inverted or weekend-only ranges are reported as such instead of as a
/// negative or zero count.
pub fn render_days(from: &str, to: &str) -> Result<String, DateFieldError> {
    let range = LeaveRange::parse(from, to)?;
    Ok(match range.checked_duration() {
        Ok(duration) => format!("{} -> {}: {}", range.from, range.to, duration),
        Err(err) => format!("{} -> {}: {}", range.from, range.to, err),
    })
}

pub fn render_balances(leave_types: &[LeaveType]) -> String {
    if leave_types.is_empty() {
        return "No leave balances.".to_string();
    }
    leave_types
        .iter()
        .map(|leave_type| format!("{:<10} {}", leave_type.name, leave_type.formatted_balance()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_requests(requests: &[LeaveRequestSummary]) -> String {
    if requests.is_empty() {
        return "No leave requests.".to_string();
    }
    requests
        .iter()
        .map(|request| {
            format!(
                "#{:<5} {:<10} {} -> {} {:>8}  {}",
                request.id,
                request.leave_type,
                request.from,
                request.to,
                request.duration.formatted,
                request.status
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_pending(pending: &[PendingRequest]) -> String {
    if pending.is_empty() {
        return "No pending leave requests.".to_string();
    }
    pending
        .iter()
        .map(|request| {
            let quota = request
                .quota
                .iter()
                .map(|entry| format!("{} ({:.0}%)", entry.label(), entry.remaining_ratio() * 100.0))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "#{:<5} {:<20} Employee no: {:<6} {:<10} {} -> {} {:>8}  [{}]",
                request.id,
                request.employee_name,
                employee_no(request.employee_id.as_deref()),
                request.leave_type,
                request.from,
                request.to,
                request.duration.formatted,
                quota
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
