//!
//! parkwise CLI binary
//! -------------------
//! Interactive client for the parking reservation backend. Every command belongs to a page
//! of the app and is only sent after the access guard lets the current session onto that
//! page, so the terminal behaves like the web client would.

use std::env;

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use parkwise::api::Registration;
use parkwise::cli::{self, Command};
use parkwise::config::{ClientConfig, API_URL_ENV, SESSION_FILE_ENV};
use parkwise::identity::Session;
use parkwise::routing::NavigationDecision;
use parkwise::{ApiError, ParkingClient};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--api <url>] [--session-file <path>] [--user <u> --password <p>] [--json] [-c \"<command>\"]\n\nFlags:\n  --api <url>              Backend base URL (default: ${API_URL_ENV} or http://localhost:5000/api)\n  --session-file <path>    Where the session is kept (default: ${SESSION_FILE_ENV} or ~/.parkwise/session.json)\n  --user <u>               Log in on startup (requires --password)\n  --password <p>           Password for --user\n  -c, --command <cmd>      Run one command and exit\n  --json                   Print listings as JSON-derived tables instead of page views\n  -h, --help               Show this help\n\nCommands:\n  login <user> <password>            sign in and keep the session\n  register <user> <password> [email] create an account\n  logout                             drop the session\n  status                             show who is signed in\n  go <path>                          navigate and show where you land\n  lots                               list lots with free spots\n  book <lot_id>                      take the first free spot in a lot\n  leave <reservation_id>             release a reservation\n  reservations                       list your reservations\n  export | export status             request / check a CSV export\n  export download <job_id> <file>    save a finished export\n  admin stats | lots | lot <id> | spots <id>\n  admin create name=<n> price=<p> spots=<n> [address=<a>] [pincode=<c>]\n  admin update <id> key=value..      change lot fields (underscores become spaces)\n  admin delete <id>\n  cache clear                        drop backend caches (admin)\n  help | quit | exit"
    );
}

/// Entry point. Parses flags, optionally logs in, then runs one command or the REPL.
fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();

    let mut args: Vec<String> = env::args().collect();
    let program = args.remove(0);

    let mut cfg = ClientConfig::from_env();
    let mut user: Option<String> = None;
    let mut password: Option<String> = None;
    let mut one_shot: Option<String> = None;
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args.get(i + 1).cloned();
        match flag {
            "-h" | "--help" => {
                print_usage(&program);
                return Ok(());
            }
            "--json" => {
                json = true;
                i += 1;
            }
            "--api" | "--session-file" | "--user" | "--password" | "-c" | "--command" => {
                let Some(v) = value else {
                    eprintln!("{} requires a value", flag);
                    print_usage(&program);
                    std::process::exit(2);
                };
                match flag {
                    "--api" => cfg.api_url = v,
                    "--session-file" => cfg.session_file = v.into(),
                    "--user" => user = Some(v),
                    "--password" => password = Some(v),
                    _ => one_shot = Some(v),
                }
                i += 2;
            }
            other => {
                eprintln!("unknown flag: {}", other);
                print_usage(&program);
                std::process::exit(2);
            }
        }
    }
    debug!(target: "parkwise", "config: {:?}", cfg);

    let client = ParkingClient::from_config(&cfg).context("failed to set up client")?;
    let rt = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;

    match (user, password) {
        (Some(u), Some(p)) => run(&rt, &client, Command::Login { username: u, password: p }, json),
        (Some(_), None) | (None, Some(_)) => {
            eprintln!("--user and --password must be given together");
            std::process::exit(2);
        }
        (None, None) => {}
    }

    if let Some(line) = one_shot {
        return match cli::parse(&line) {
            Ok(cmd) => {
                run(&rt, &client, cmd, json);
                Ok(())
            }
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(2);
            }
        };
    }

    run_repl(&rt, &client, &cfg, json)
}

fn run_repl(rt: &tokio::runtime::Runtime, client: &ParkingClient, cfg: &ClientConfig, json: bool) -> Result<()> {
    let mut rl = DefaultEditor::new().context("failed to open line editor")?;
    println!("parkwise interpreter against {}. Type 'help' for commands.", cfg.api_url);
    loop {
        match rl.readline(&prompt(&client.sessions().current())) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() { continue; }
                let _ = rl.add_history_entry(line);
                match cli::parse(line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => print_usage("parkwise_cli"),
                    Ok(cmd) => run(rt, client, cmd, json),
                    Err(e) => eprintln!("{}", e),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn prompt(session: &Session) -> String {
    match session {
        Session::Authenticated { role, subject_id, .. } => format!("{}#{}> ", role, subject_id),
        Session::Unauthenticated => "guest> ".to_string(),
    }
}

/// Navigate to the command's page, then run it. Errors are printed, never fatal.
fn run(rt: &tokio::runtime::Runtime, client: &ParkingClient, cmd: Command, json: bool) {
    if let Some(page) = cmd.page() {
        if let NavigationDecision::Redirect(to) = client.navigator().navigate(&page) {
            println!("{} is not available in this session; redirected to {}", page, to);
            return;
        }
    }
    let page = cmd.page();
    let Err(err) = rt.block_on(execute(client, cmd, json)) else { return };
    match err.downcast_ref::<ApiError>() {
        Some(e) => {
            eprintln!("error: {}", e.user_message());
            if e.is_auth_failure() {
                if let Some(landing) = page.and_then(|p| client.navigator().settle(&p)) {
                    println!("session ended; now at {} ({})", landing.path, landing.view);
                }
            }
        }
        None => eprintln!("error: {:#}", err),
    }
}

fn write_export(file: &str, bytes: &[u8]) -> Result<()> {
    std::fs::write(file, bytes).with_context(|| format!("cannot write export to {}", file))
}

async fn execute(client: &ParkingClient, cmd: Command, json: bool) -> Result<()> {
    let api = client.api();
    if json {
        let listing = match &cmd {
            Command::Lots => Some(serde_json::to_value(api.user().lots().await?)?),
            Command::Reservations => Some(serde_json::to_value(api.user().reservations().await?)?),
            Command::AdminLots => Some(serde_json::to_value(api.admin().lots().await?)?),
            Command::AdminSpots { lot_id } => Some(serde_json::to_value(api.admin().lot_spots(*lot_id).await?.spots)?),
            _ => None,
        };
        if let Some(value) = listing {
            cli::print_json(&value);
            return Ok(());
        }
    }
    match cmd {
        Command::Help | Command::Quit => {}
        Command::Status => match client.sessions().current() {
            Session::Authenticated { role, subject_id, .. } => {
                println!("signed in: subject {} ({}) at {}", subject_id, role, api.gateway().base_url())
            }
            Session::Unauthenticated => println!("not signed in ({})", api.gateway().base_url()),
        },
        Command::Login { username, password } => {
            let session = api.auth().login(&username, &password).await?;
            if let Some(role) = session.role() {
                println!("logged in as {} ({})", username, role);
                println!("home: {}", client.navigator().guard().home_for(role));
            }
        }
        Command::Register { username, password, email } => {
            match api.auth().register(&username, &password, email.as_deref()).await? {
                Registration::Created { user_id } => println!("account {} created (id {}); log in to continue", username, user_id),
                Registration::SignedIn(_) => println!("account {} created and signed in", username),
            }
        }
        Command::Logout => {
            let decision = api.auth().logout();
            if let Some(to) = decision.target() {
                println!("logged out; go to {}", to);
            }
        }
        Command::Go { path } => {
            match client.navigator().navigate(&path) {
                NavigationDecision::Proceed => println!("proceed"),
                NavigationDecision::Redirect(to) => println!("redirect -> {}", to),
            }
            match client.navigator().settle(&path) {
                Some(l) if l.params.is_empty() => println!("at {} ({})", l.path, l.view),
                Some(l) => println!("at {} ({}) {:?}", l.path, l.view, l.params),
                None => println!("no page could be shown for {}", path),
            }
        }
        Command::Lots => println!("{}", cli::lots_table(&api.user().lots().await?)),
        Command::Book { lot_id } => {
            let b = api.user().book(lot_id).await?;
            println!("booked spot {} in lot {} (reservation {})", b.spot_number, b.lot_id, b.reservation_id);
        }
        Command::Leave { reservation_id } => {
            let r = api.user().leave(reservation_id).await?;
            println!(
                "released after {:.0} min, cost {}",
                r.duration_minutes,
                cli::format::format_currency(Some(r.parking_cost))
            );
        }
        Command::Reservations => println!("{}", cli::reservations_table(&api.user().reservations().await?)),
        Command::ExportTrigger => {
            let job = api.user().trigger_export().await?;
            println!("export job {} queued", job.job_id);
        }
        Command::ExportStatus => {
            let s = api.user().export_status().await?;
            println!(
                "job {}: {} [{}] requested {} completed {}",
                s.job_id,
                s.status,
                cli::format::status_class(&s.status),
                cli::format::format_datetime(s.requested_at.as_deref()),
                cli::format::format_datetime(s.completed_at.as_deref())
            );
            if s.is_done() {
                println!("ready: export download {} <file>", s.job_id);
            }
        }
        Command::ExportDownload { job_id, file } => {
            let bytes = api.user().download_export(job_id).await?;
            write_export(&file, &bytes)?;
            println!("wrote {} bytes to {}", bytes.len(), file);
        }
        Command::AdminStats => println!("{}", cli::stats_summary(&api.admin().dashboard_stats().await?)),
        Command::AdminLots => println!("{}", cli::managed_lots_table(&api.admin().lots().await?)),
        Command::AdminLot { lot_id } => {
            println!("{}", cli::managed_lots_table(&[api.admin().lot(lot_id).await?]))
        }
        Command::AdminSpots { lot_id } => println!("{}", cli::spots_table(&api.admin().lot_spots(lot_id).await?)),
        Command::AdminCreate(input) => {
            let created = api.admin().create_lot(&input).await?;
            println!("lot {} created with {} spots", created.lot_id, created.spots_created);
        }
        Command::AdminUpdate { lot_id, input } => println!("{}", api.admin().update_lot(lot_id, &input).await?.msg),
        Command::AdminDelete { lot_id } => println!("{}", api.admin().delete_lot(lot_id).await?.msg),
        Command::CacheClear => println!("{}", api.clear_cache().await?.msg),
    }
    Ok(())
}
