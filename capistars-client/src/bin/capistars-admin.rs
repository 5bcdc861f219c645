//! capistars-admin - operator command line for the CAPISTARS backend

use anyhow::{Context, bail};
use capistars_client::facade::Resource;
use capistars_client::logger::init_logger;
use capistars_client::session::hash_password;
use capistars_client::view::filter_logs;
use capistars_client::{
    Client, ClientConfig, EntityKind, Establishment, Facade, Fetched, LogFilter,
    NetworkRpcClient, ResourceList, SalesRep, Session, SettingsStore,
};

const USAGE: &str = "\
Usage: capistars-admin <command> [args]

Commands:
  login <email> <password>        Sign in and persist the session
  logout                          Clear the session
  hash-password <password>        Print an argon2 hash for CAPISTARS_ADMIN_PASSWORD_HASH
  stats                           Dashboard counters derived from the lists
  server-stats                    Dashboard counters computed by the backend
  sales-reps [search]             List sales reps
  establishments [search]         List establishments
  clients [search]                List clients
  logs [search] [entity]          List the action log (entity: salesRep|establishment|client)
  toggle <kind> <id>              Flip the active flag (kind: sales-rep|establishment|client)
  delete <kind> <id>              Delete a record
  update <kind> <id> <field>=<value>...
                                  Edit fields by wire name (e.g. lastName=Moreau city=Lyon)
  set-api-url <url>               Persist a backend URL override
  reset-api-url                   Remove the backend URL override";

/// One-line description of a record in a listing
trait Describe {
    fn describe(&self) -> String;
}

fn status(is_active: bool) -> &'static str {
    if is_active { "active" } else { "pending" }
}

impl Describe for SalesRep {
    fn describe(&self) -> String {
        format!(
            "#{:<5} {:<10} {:<28} {:<30} {:<24} {}",
            self.id,
            self.code,
            self.full_name(),
            self.email,
            self.territories,
            status(self.is_active)
        )
    }
}

impl Describe for Establishment {
    fn describe(&self) -> String {
        format!(
            "#{:<5} {:<30} {:<20} {:<8} {:<30} {}",
            self.id,
            self.name,
            self.city,
            self.postal_code,
            self.email,
            status(self.is_active)
        )
    }
}

impl Describe for Client {
    fn describe(&self) -> String {
        format!(
            "#{:<5} {:<28} {:<30} {:<14} {:>6} pts  {}",
            self.id,
            self.display_name(),
            self.email.as_deref().unwrap_or("-"),
            self.phone.as_deref().unwrap_or("-"),
            self.capimiles_points,
            status(self.is_active)
        )
    }
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    SalesRep,
    Establishment,
    Client,
}

impl Kind {
    fn parse(arg: &str) -> anyhow::Result<Self> {
        Ok(match arg {
            "sales-rep" | "sales-reps" | "salesRep" => Self::SalesRep,
            "establishment" | "establishments" => Self::Establishment,
            "client" | "clients" => Self::Client,
            other => bail!("unknown kind: {other}"),
        })
    }
}

async fn list<T: Resource + Describe>(facade: &Facade<NetworkRpcClient>, search: &str) {
    let mut list = ResourceList::<T>::new();
    list.refresh(facade).await;

    let rows = list.filtered(search);
    if rows.is_empty() {
        if list.status() == capistars_client::view::ListStatus::Unavailable {
            println!("Backend unavailable");
        } else {
            println!("No records found");
        }
        return;
    }
    for row in rows {
        println!("{}", row.describe());
    }
}

async fn toggle<T: Resource>(facade: &Facade<NetworkRpcClient>, id: i64) -> anyhow::Result<()> {
    let mut list = ResourceList::<T>::new().with_audit(true);
    list.refresh(facade).await;
    if list.get(id).is_none() {
        bail!("no {} with id {id}", T::KIND);
    }
    if !list.toggle(facade, id).await {
        bail!("update failed");
    }
    if let Some(item) = list.get(id) {
        println!("{} is now {}", item.display_name(), status(item.is_active()));
    }
    Ok(())
}

async fn update<T: Resource>(
    facade: &Facade<NetworkRpcClient>,
    id: i64,
    assignments: &[String],
) -> anyhow::Result<()> {
    if assignments.is_empty() {
        bail!("nothing to update, pass <field>=<value>");
    }
    let mut list = ResourceList::<T>::new().with_audit(true);
    list.refresh(facade).await;
    if !list.begin_edit(id) {
        bail!("no {} with id {id}", T::KIND);
    }
    for assignment in assignments {
        let (field, value) = assignment
            .split_once('=')
            .with_context(|| format!("expected <field>=<value>, got {assignment:?}"))?;
        list.set_draft_field(field, value)?;
    }
    if !list.save_edit(facade).await {
        bail!("update failed");
    }
    if let Some(item) = list.get(id) {
        println!("Updated {}", item.display_name());
    }
    Ok(())
}

async fn delete<T: Resource>(facade: &Facade<NetworkRpcClient>, id: i64) -> anyhow::Result<()> {
    let mut list = ResourceList::<T>::new().with_audit(true);
    list.refresh(facade).await;
    if list.get(id).is_none() {
        bail!("no {} with id {id}", T::KIND);
    }
    if !list.delete(facade, id).await {
        bail!("deletion failed");
    }
    println!("Deleted {} #{id}", T::KIND);
    Ok(())
}

fn print_stats(stats: Fetched<capistars_client::Stats>) {
    if stats.is_unavailable() {
        println!("Backend unavailable, showing zeroed counters");
    }
    let stats = stats.into_inner();
    println!("Sales reps:          {} ({} active)", stats.total_sales_reps, stats.active_sales_reps);
    println!(
        "Establishments:      {} ({} active)",
        stats.total_establishments, stats.active_establishments
    );
    println!("Clients:             {} ({} active)", stats.total_clients, stats.active_clients);
    println!("Pending validation:  {}", stats.pending_validation);
    println!("Monthly revenue:     {:.2} EUR", stats.monthly_revenue);
    println!("Bookings:            {}", stats.total_bookings);
}

fn require_session(session: &Session) -> anyhow::Result<&str> {
    session
        .token()
        .context("not signed in, run `capistars-admin login <email> <password>`")
}

fn id_arg(args: &[String], index: usize) -> anyhow::Result<i64> {
    args.get(index)
        .context("missing id")?
        .parse()
        .context("id must be an integer")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_logger(None);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        println!("{USAGE}");
        return Ok(());
    };
    let arg = |i: usize| args.get(i).map(String::as_str).unwrap_or_default();

    let config = ClientConfig::from_env()?;
    let settings_store = SettingsStore::new(&config.data_dir);
    let config = config.with_settings(&settings_store.load());
    let mut session = Session::from_config(&config);

    match command {
        "login" => {
            session.login(arg(1), arg(2))?;
            println!("Signed in as {}", session.operator().unwrap_or_default());
            return Ok(());
        }
        "logout" => {
            session.logout()?;
            println!("Signed out");
            return Ok(());
        }
        "hash-password" => {
            println!("{}", hash_password(arg(1))?);
            return Ok(());
        }
        "set-api-url" => {
            let mut settings = settings_store.load();
            settings.api_url = Some(arg(1).to_string()).filter(|url| !url.is_empty());
            settings_store.save(&settings)?;
            println!("Saved");
            return Ok(());
        }
        "reset-api-url" => {
            settings_store.clear()?;
            println!("Saved");
            return Ok(());
        }
        _ => {}
    }

    let token = require_session(&session)?;
    let facade = Facade::new(
        config.build_rpc_client()?.with_token(token),
        config.procedures.table(),
    );
    tracing::debug!(base_url = facade.rpc().base_url(), "Using backend");

    match command {
        "stats" => print_stats(facade.stats().await),
        "server-stats" => print_stats(facade.server_stats().await),
        "sales-reps" => list::<SalesRep>(&facade, arg(1)).await,
        "establishments" => list::<Establishment>(&facade, arg(1)).await,
        "clients" => list::<Client>(&facade, arg(1)).await,
        "logs" => {
            let filter = match arg(2) {
                "" | "all" => LogFilter::All,
                kind => LogFilter::Only(EntityKind::from(kind.to_string())),
            };
            match facade.action_logs().list().await {
                Fetched::Loaded(logs) => {
                    let rows = filter_logs(&logs, arg(1), &filter);
                    if rows.is_empty() {
                        println!("No records found");
                    }
                    for log in rows {
                        println!(
                            "{}  {:<10} {:<13} {:<28} by {}",
                            log.created_at.format("%d/%m/%Y %H:%M"),
                            log.action,
                            log.entity_type,
                            log.entity_name,
                            log.performed_by
                        );
                    }
                }
                Fetched::Unavailable => println!("Backend unavailable"),
            }
        }
        "toggle" | "delete" => {
            let kind = Kind::parse(arg(1))?;
            let id = id_arg(&args, 2)?;
            match (command, kind) {
                ("toggle", Kind::SalesRep) => toggle::<SalesRep>(&facade, id).await?,
                ("toggle", Kind::Establishment) => toggle::<Establishment>(&facade, id).await?,
                ("toggle", Kind::Client) => toggle::<Client>(&facade, id).await?,
                (_, Kind::SalesRep) => delete::<SalesRep>(&facade, id).await?,
                (_, Kind::Establishment) => delete::<Establishment>(&facade, id).await?,
                (_, Kind::Client) => delete::<Client>(&facade, id).await?,
            }
        }
        "update" => {
            let kind = Kind::parse(arg(1))?;
            let id = id_arg(&args, 2)?;
            let assignments = args.get(3..).unwrap_or_default();
            match kind {
                Kind::SalesRep => update::<SalesRep>(&facade, id, assignments).await?,
                Kind::Establishment => update::<Establishment>(&facade, id, assignments).await?,
                Kind::Client => update::<Client>(&facade, id, assignments).await?,
            }
        }
        other => {
            println!("Unknown command: {other}\n\n{USAGE}");
        }
    }

    Ok(())
}
