use std::env;

use crate::data::import::{export_file, import_file, parse_import_document, ImportMode};
use crate::data::session::{load_session, save_session, DEFAULT_SESSION_PATH};
use crate::server;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Import,
    Export,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("import") => Some(Command::Import),
        Some("export") => Some(Command::Export),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Import) => handle_import(args),
        Some(Command::Export) => handle_export(args),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("usage: gearsmith <serve|import|export|validate>");
            2
        }
    }
}

fn session_path() -> String {
    env::var("GEARSMITH_SESSION").unwrap_or_else(|_| DEFAULT_SESSION_PATH.to_string())
}

fn handle_serve() -> i32 {
    let bind_addr = env::var("GEARSMITH_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    match server::run_server(&bind_addr, &session_path()) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_import(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: gearsmith import <path-to-export.json> [--replace]");
        return 2;
    };
    let mode = if args.iter().any(|arg| arg == "--replace") {
        ImportMode::Replace
    } else {
        ImportMode::Merge
    };

    let session_path = session_path();
    let mut session = load_session(&session_path);
    match import_file(&mut session, path, mode) {
        Ok(report) => {
            save_session(&session_path, &session);
            println!(
                "import complete ({}): accepted={}, dropped={}, store={}",
                report.mode,
                report.accepted,
                report.dropped,
                session.store.len()
            );
            0
        }
        Err(err) => {
            eprintln!("import failed: {err}");
            1
        }
    }
}

fn handle_export(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: gearsmith export <output.json>");
        return 2;
    };

    let session = load_session(session_path());
    match export_file(&session, path) {
        Ok(count) => {
            println!("export complete: {count} configuration(s) -> {path}");
            0
        }
        Err(err) => {
            eprintln!("export failed: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: gearsmith validate <path-to-export.json>");
        return 2;
    };

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("validation failed: unable to read '{path}': {err}");
            return 1;
        }
    };
    match parse_import_document(&raw) {
        Ok(document) => {
            println!(
                "validation passed: {} of {} item(s) valid",
                document.configs.len(),
                document.total_records
            );
            0
        }
        Err(err) => {
            eprintln!("validation failed: {err}");
            1
        }
    }
}
