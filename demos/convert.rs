//! Converts filter list rules read from stdin, one per line, and prints the result.
//!
//! `cargo run --example convert -- ubo < list.txt` converts AdGuard rules to uBlock Origin;
//! without an argument every rule is converted to AdGuard syntax. Set `RUST_LOG=debug` to see
//! why rules were dropped.

use std::io::{self, BufRead};

use adblock_scriptlets::{ConversionError, Engine};
use tracing_subscriber::EnvFilter;

fn convert(engine: &Engine, rule: &str, to_ubo: bool) -> Result<Vec<String>, ConversionError> {
    if to_ubo {
        return Ok(engine.convert_adg_to_ubo(rule)?.into_iter().collect());
    }

    let converted = engine.convert_scriptlet_to_adg(rule)?;
    Ok(converted
        .into_iter()
        .map(|rule| engine.convert_redirect_to_adg(&rule).unwrap_or(rule))
        .collect())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let to_ubo = std::env::args().nth(1).as_deref() == Some("ubo");
    let engine = Engine::default();

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        };
        let rule = line.trim();
        if rule.is_empty() {
            continue;
        }

        match convert(&engine, rule, to_ubo) {
            Ok(converted) => converted.iter().for_each(|rule| println!("{}", rule)),
            Err(e) => eprintln!("{}: {}", rule, e),
        }
    }
}
