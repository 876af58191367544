//! Command-line front-end for the requirements core.
//!
//! # Responsibility
//! - Exercise every core workflow (submit, list, get, update, delete)
//!   from a terminal without any HTTP adapter.
//! - Keep output deterministic JSON for quick local sanity checks.

use reqcat_core::{
    core_version, health, init_logging, Config, ExcelMirror, RequirementDraft,
    RequirementListQuery, RequirementPatch, RequirementService, ServiceError,
    SqliteRequirementRepository, SubmissionService,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print_usage();
        return ExitCode::from(2);
    };

    let config = Config::from_env();
    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Some(log_dir) = log_dir.to_str() {
            if let Err(err) = init_logging(&config.log_level, log_dir) {
                eprintln!("logging init failed: {err}");
            }
        }
    }

    match run(command, &args[1..], &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(message)) => {
            eprintln!("{message}");
            print_usage();
            ExitCode::from(2)
        }
        Err(CliError::Service(err)) => {
            eprintln!("error ({}): {err}", err.http_status());
            ExitCode::FAILURE
        }
        Err(CliError::Db(message)) => {
            eprintln!("database error: {message}");
            ExitCode::FAILURE
        }
    }
}

enum CliError {
    Usage(String),
    Service(ServiceError),
    Db(String),
}

impl From<ServiceError> for CliError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

fn run(command: &str, rest: &[String], config: &Config) -> Result<(), CliError> {
    match command {
        "health" => {
            println!(
                "{}",
                serde_json::to_string_pretty(&health()).expect("health payload serializes")
            );
            println!("core version {}", core_version());
            Ok(())
        }
        "submit" => submit(rest, config),
        "list" => list(rest, config),
        "get" => get(rest, config),
        "update" => update(rest, config),
        "delete" => delete(rest, config),
        other => Err(CliError::Usage(format!("unknown command `{other}`"))),
    }
}

fn submit(rest: &[String], config: &Config) -> Result<(), CliError> {
    if rest.len() != 6 {
        return Err(CliError::Usage(format!(
            "submit expects 6 field values, got {}",
            rest.len()
        )));
    }

    let draft = RequirementDraft {
        attribute: rest[0].clone(),
        description: rest[1].clone(),
        domain: rest[2].clone(),
        source_system: rest[3].clone(),
        source_entity: rest[4].clone(),
        responsible_analyst: rest[5].clone(),
    };

    let conn = open_store(config)?;
    let repo = repo(&conn)?;
    let service = SubmissionService::new(repo, ExcelMirror::new(config.mirror_path.clone()));
    let receipt = service.submit(&draft)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&receipt).expect("receipt serializes")
    );
    Ok(())
}

fn list(rest: &[String], config: &Config) -> Result<(), CliError> {
    let mut query = RequirementListQuery::default();
    let mut rest = rest.iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--analyst" => {
                let value = rest
                    .next()
                    .ok_or_else(|| CliError::Usage("--analyst needs a value".to_string()))?;
                query.analyst_contains = Some(value.clone());
            }
            "--latest" => query.latest_only = true,
            other => {
                return Err(CliError::Usage(format!("unknown list option `{other}`")));
            }
        }
    }

    let conn = open_store(config)?;
    let service = RequirementService::new(repo(&conn)?);
    let requirements = service.list(&query)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&requirements).expect("list serializes")
    );
    Ok(())
}

fn get(rest: &[String], config: &Config) -> Result<(), CliError> {
    let id = parse_id(rest)?;
    let conn = open_store(config)?;
    let service = RequirementService::new(repo(&conn)?);
    let requirement = service.get(id)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&requirement).expect("record serializes")
    );
    Ok(())
}

fn update(rest: &[String], config: &Config) -> Result<(), CliError> {
    let id = parse_id(rest)?;
    let mut patch = RequirementPatch::default();
    let mut rest = rest[1..].iter();
    while let Some(arg) = rest.next() {
        let field = arg
            .strip_prefix("--")
            .ok_or_else(|| CliError::Usage(format!("expected --field value, got `{arg}`")))?;
        let value = rest
            .next()
            .ok_or_else(|| CliError::Usage(format!("--{field} needs a value")))?
            .clone();
        match field {
            "attribute" => patch.attribute = Some(value),
            "description" => patch.description = Some(value),
            "domain" => patch.domain = Some(value),
            "source-system" => patch.source_system = Some(value),
            "source-entity" => patch.source_entity = Some(value),
            "responsible-analyst" => patch.responsible_analyst = Some(value),
            other => {
                return Err(CliError::Usage(format!("unknown field `--{other}`")));
            }
        }
    }

    let conn = open_store(config)?;
    let service = RequirementService::new(repo(&conn)?);
    let requirement = service.update(id, &patch)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&requirement).expect("record serializes")
    );
    Ok(())
}

fn delete(rest: &[String], config: &Config) -> Result<(), CliError> {
    let id = parse_id(rest)?;
    let conn = open_store(config)?;
    let service = RequirementService::new(repo(&conn)?);
    service.delete(id)?;
    println!("deleted {id}");
    Ok(())
}

fn parse_id(rest: &[String]) -> Result<i64, CliError> {
    let raw = rest
        .first()
        .ok_or_else(|| CliError::Usage("expected an id argument".to_string()))?;
    raw.parse::<i64>()
        .map_err(|_| CliError::Usage(format!("invalid id `{raw}`")))
}

fn open_store(config: &Config) -> Result<rusqlite::Connection, CliError> {
    reqcat_core::db::open_db(&config.db_path).map_err(|err| CliError::Db(err.to_string()))
}

fn repo(conn: &rusqlite::Connection) -> Result<SqliteRequirementRepository<'_>, CliError> {
    SqliteRequirementRepository::try_new(conn).map_err(|err| CliError::Db(err.to_string()))
}

fn print_usage() {
    eprintln!(
        "usage: reqcat_cli <command>\n\
         \n\
         commands:\n\
         \x20 health\n\
         \x20 submit <attribute> <description> <domain> <source_system> <source_entity> <responsible_analyst>\n\
         \x20 list [--analyst <substring>] [--latest]\n\
         \x20 get <id>\n\
         \x20 update <id> [--attribute <v>] [--description <v>] [--domain <v>] [--source-system <v>] [--source-entity <v>] [--responsible-analyst <v>]\n\
         \x20 delete <id>\n\
         \n\
         environment: REQCAT_DB_PATH, REQCAT_MIRROR_PATH, REQCAT_LOG_DIR, REQCAT_LOG_LEVEL"
    );
}
