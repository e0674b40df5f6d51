//! Line grammar of the interactive client.

use crate::api::dto::LotInput;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Status,
    Login { username: String, password: String },
    Register { username: String, password: String, email: Option<String> },
    Logout,
    Go { path: String },
    Lots,
    Book { lot_id: i64 },
    Leave { reservation_id: i64 },
    Reservations,
    ExportTrigger,
    ExportStatus,
    ExportDownload { job_id: i64, file: String },
    AdminStats,
    AdminLots,
    AdminLot { lot_id: i64 },
    AdminSpots { lot_id: i64 },
    AdminCreate(LotInput),
    AdminUpdate { lot_id: i64, input: LotInput },
    AdminDelete { lot_id: i64 },
    CacheClear,
}

impl Command {
    /// Page a command belongs to. The client navigates there first, so a command is only
    /// sent when the guard would let the subject see the page.
    pub fn page(&self) -> Option<String> {
        match self {
            Command::Lots | Command::Book { .. } => Some("/user/lots".into()),
            Command::Leave { .. } | Command::Reservations => Some("/user/reservations".into()),
            Command::ExportTrigger | Command::ExportStatus | Command::ExportDownload { .. } => Some("/user/profile".into()),
            Command::AdminStats | Command::CacheClear => Some("/admin/dashboard".into()),
            Command::AdminLots | Command::AdminCreate(_) => Some("/admin/lots".into()),
            Command::AdminLot { lot_id }
            | Command::AdminSpots { lot_id }
            | Command::AdminUpdate { lot_id, .. }
            | Command::AdminDelete { lot_id } => Some(format!("/admin/lots/{}", lot_id)),
            Command::Login { .. } => Some("/login".into()),
            Command::Register { .. } => Some("/register".into()),
            Command::Help | Command::Quit | Command::Status | Command::Logout | Command::Go { .. } => None,
        }
    }
}

pub fn parse(line: &str) -> Result<Command, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((head, rest)) = parts.split_first() else { return Err("empty command".into()) };
    let head = head.to_ascii_lowercase();
    match (head.as_str(), rest) {
        ("help", _) => Ok(Command::Help),
        ("quit" | "exit", _) => Ok(Command::Quit),
        ("status" | "whoami", _) => Ok(Command::Status),
        ("login", [u, p]) => Ok(Command::Login { username: u.to_string(), password: p.to_string() }),
        ("login", _) => Err("usage: login <username> <password>".into()),
        ("register", [u, p]) => Ok(Command::Register { username: u.to_string(), password: p.to_string(), email: None }),
        ("register", [u, p, e]) => {
            if !super::format::is_valid_email(e) {
                return Err(format!("invalid email '{}'", e));
            }
            Ok(Command::Register { username: u.to_string(), password: p.to_string(), email: Some(e.to_string()) })
        }
        ("register", _) => Err("usage: register <username> <password> [email]".into()),
        ("logout", _) => Ok(Command::Logout),
        ("go", [p]) => Ok(Command::Go { path: p.to_string() }),
        ("go", _) => Err("usage: go <path>".into()),
        ("lots", []) => Ok(Command::Lots),
        ("book", [id]) => Ok(Command::Book { lot_id: int_arg("lot id", id)? }),
        ("book", _) => Err("usage: book <lot_id>".into()),
        ("leave", [id]) => Ok(Command::Leave { reservation_id: int_arg("reservation id", id)? }),
        ("leave", _) => Err("usage: leave <reservation_id>".into()),
        ("reservations", []) => Ok(Command::Reservations),
        ("export", []) => Ok(Command::ExportTrigger),
        ("export", ["status"]) => Ok(Command::ExportStatus),
        ("export", ["download", id, file]) => {
            Ok(Command::ExportDownload { job_id: int_arg("job id", id)?, file: file.to_string() })
        }
        ("export", _) => Err("usage: export | export status | export download <job_id> <file>".into()),
        ("admin", args) => parse_admin(args),
        ("cache", ["clear"]) => Ok(Command::CacheClear),
        (other, _) => Err(format!("unknown command '{}', type 'help'", other)),
    }
}

fn parse_admin(args: &[&str]) -> Result<Command, String> {
    match args {
        ["stats"] => Ok(Command::AdminStats),
        ["lots"] => Ok(Command::AdminLots),
        ["lot", id] => Ok(Command::AdminLot { lot_id: int_arg("lot id", id)? }),
        ["spots", id] => Ok(Command::AdminSpots { lot_id: int_arg("lot id", id)? }),
        ["create", fields @ ..] => {
            let input = lot_fields(fields)?;
            if input.name.is_none() || input.number_of_spots.unwrap_or(0) <= 0 {
                return Err("admin create needs name=<name> and number_of_spots=<n> (> 0)".into());
            }
            Ok(Command::AdminCreate(input))
        }
        ["update", id, fields @ ..] if !fields.is_empty() => {
            Ok(Command::AdminUpdate { lot_id: int_arg("lot id", id)?, input: lot_fields(fields)? })
        }
        ["delete", id] => Ok(Command::AdminDelete { lot_id: int_arg("lot id", id)? }),
        _ => Err("usage: admin stats | lots | lot <id> | spots <id> | create k=v.. | update <id> k=v.. | delete <id>".into()),
    }
}

/// `key=value` pairs; underscores in values stand for spaces.
fn lot_fields(fields: &[&str]) -> Result<LotInput, String> {
    let mut input = LotInput::default();
    for f in fields {
        let (k, v) = f.split_once('=').ok_or_else(|| format!("expected key=value, got '{}'", f))?;
        let text = v.replace('_', " ");
        match k {
            "name" => input.name = Some(text),
            "price" | "price_per_hour" => {
                input.price_per_hour = Some(v.parse::<f64>().map_err(|_| format!("invalid price '{}'", v))?)
            }
            "spots" | "number_of_spots" => input.number_of_spots = Some(int_arg("number_of_spots", v)?),
            "address" => input.address = Some(text),
            "pincode" => input.pincode = Some(v.to_string()),
            other => return Err(format!("unknown lot field '{}'", other)),
        }
    }
    Ok(input)
}

fn int_arg(what: &str, s: &str) -> Result<i64, String> {
    s.parse::<i64>().map_err(|_| format!("invalid {} '{}'", what, s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_session_commands() {
        assert_eq!(parse("login alice pw").unwrap(), Command::Login { username: "alice".into(), password: "pw".into() });
        assert!(parse("login alice").is_err());
        assert_eq!(parse("LOGOUT").unwrap(), Command::Logout);
        assert_eq!(parse("go /admin/dashboard").unwrap(), Command::Go { path: "/admin/dashboard".into() });
        assert!(parse("register bob pw not-an-email").is_err());
        assert!(matches!(parse("register bob pw bob@example.com").unwrap(), Command::Register { email: Some(_), .. }));
    }

    #[test]
    fn parses_user_and_admin_commands() {
        assert_eq!(parse("book 3").unwrap(), Command::Book { lot_id: 3 });
        assert!(parse("book three").is_err());
        assert_eq!(
            parse("export download 7 out.csv").unwrap(),
            Command::ExportDownload { job_id: 7, file: "out.csv".into() }
        );
        match parse("admin create name=North_Gate price=20 spots=10 pincode=560001").unwrap() {
            Command::AdminCreate(input) => {
                assert_eq!(input.name.as_deref(), Some("North Gate"));
                assert_eq!(input.price_per_hour, Some(20.0));
                assert_eq!(input.number_of_spots, Some(10));
                assert_eq!(input.pincode.as_deref(), Some("560001"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse("admin create name=X").is_err());
        assert!(parse("admin update 4").is_err());
        assert!(matches!(parse("admin update 4 price=15").unwrap(), Command::AdminUpdate { lot_id: 4, .. }));
        assert!(parse("frobnicate").is_err());
    }

    #[test]
    fn commands_map_to_pages() {
        assert_eq!(parse("lots").unwrap().page().as_deref(), Some("/user/lots"));
        assert_eq!(parse("admin spots 5").unwrap().page().as_deref(), Some("/admin/lots/5"));
        assert_eq!(parse("cache clear").unwrap().page().as_deref(), Some("/admin/dashboard"));
        assert_eq!(parse("status").unwrap().page(), None);
    }
}
