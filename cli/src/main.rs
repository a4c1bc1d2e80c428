//! xpect CLI — driving adapter for xpect assertion extensions.
//!
//! Subcommands:
//! - `check <extension> <document> [--expected <file>]` — apply an extension to a document
//! - `run <fixture>` — run a conformance fixture file
//! - `info` — print available guard kinds and extension forms

use std::process;

use serde_json::Value;
use xpect::ExpectExtension;
use xpect_test::fixture::{ExtensionConfig, Fixture};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "check" => cmd_check(&args[2..]),
        "run" => cmd_run(&args[2..]),
        "info" => cmd_info(),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_check(args: &[String]) -> Result<(), String> {
    if args.len() < 2 {
        return Err("check requires an extension file and a document file".into());
    }

    let config: ExtensionConfig = load_value(&args[0])
        .and_then(|v| serde_json::from_value(v).map_err(|e| format!("extension config: {e}")))?;
    let document = load_value(&args[1])?;
    let expected = parse_expected(&args[2..])?;

    let extension = config
        .build()
        .map_err(|e| format!("extension build failed: {e}"))?;

    let verdict = extension.apply(&document, expected.as_ref());
    if verdict.pass() {
        println!("pass");
        Ok(())
    } else {
        println!("fail: {}", verdict.message());
        process::exit(1);
    }
}

fn cmd_run(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("run requires a fixture file path".into());
    }

    let path = &args[0];
    let yaml = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read \"{path}\": {e}"))?;
    let fixtures =
        Fixture::from_yaml_multi(&yaml).map_err(|e| format!("fixture parse error: {e}"))?;

    let mut failures = 0usize;
    for fixture in &fixtures {
        let results = fixture
            .run()
            .map_err(|e| format!("fixture \"{}\" failed to build: {e}", fixture.name))?;
        for result in results {
            if result.passed {
                println!("ok   {} / {}", fixture.name, result.case_name);
            } else {
                println!(
                    "FAIL {} / {} (pass={}, message: {})",
                    fixture.name, result.case_name, result.pass, result.message
                );
                failures += 1;
            }
        }
    }

    if failures > 0 {
        println!("{failures} case(s) failed");
        process::exit(1);
    }
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Uniform return type for all commands
fn cmd_info() -> Result<(), String> {
    println!("Guard kinds:");
    println!("  any                          accept every value");
    println!("  object                       require a JSON object");
    println!("  string_field {{ key }}         require a string-typed field");
    println!("  pattern_field {{ key, pattern }} require a field matching a regex");

    println!("\nExtension forms:");
    println!("  with condition               shape fixed at definition time");
    println!("  without condition            shape supplied per call via --expected");

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Document loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_value(path: &str) -> Result<Value, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;

    let is_json = std::path::Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).map_err(|e| format!("JSON parse error: {e}"))
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(&content).map_err(|e| format!("YAML parse error: {e}"))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Argument parsing
// ═══════════════════════════════════════════════════════════════════════════════

fn parse_expected(args: &[String]) -> Result<Option<Value>, String> {
    let mut expected = None;
    let mut i = 0;

    while i < args.len() {
        if args[i] == "--expected" {
            let Some(path) = args.get(i + 1) else {
                return Err("--expected requires a file path".into());
            };
            expected = Some(load_value(path)?);
            i += 2;
        } else {
            return Err(format!("unexpected argument \"{}\"", args[i]));
        }
    }

    Ok(expected)
}

fn print_usage() {
    eprintln!("xpect — apply assertion extensions to documents");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  xpect check <extension.(yaml|json)> <document.(yaml|json)> [--expected <file>]");
    eprintln!("  xpect run <fixture.yaml>");
    eprintln!("  xpect info");
}
