//! Build script for lumen-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates lumen.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted in each section, with the allowed integer range
const SCHEMA: &[(&str, &[(&str, Kind)])] = &[
    (
        "power",
        &[
            ("threshold", Kind::Int(0, 1022)),
            ("wake_settle_ms", Kind::Int(0, u32::MAX as i64)),
            ("asleep_poll_ms", Kind::Int(1, u32::MAX as i64)),
        ],
    ),
    (
        "auto",
        &[
            ("hysteresis", Kind::Int(0, 1023)),
            ("settle_ms", Kind::Int(0, u32::MAX as i64)),
            ("loop_interval_ms", Kind::Int(1, u32::MAX as i64)),
        ],
    ),
    (
        "session",
        &[
            ("step", Kind::Int(1, 100)),
            ("idle_timeout_ms", Kind::Int(0, u32::MAX as i64)),
            ("poll_ms", Kind::Int(1, u32::MAX as i64)),
        ],
    ),
    (
        "panel",
        &[
            ("pulse_ms", Kind::Int(1, u32::MAX as i64)),
            ("gap_ms", Kind::Int(0, u32::MAX as i64)),
            ("menu_open_ms", Kind::Int(0, u32::MAX as i64)),
            ("menu_close_ms", Kind::Int(0, u32::MAX as i64)),
            ("reset_open_ms", Kind::Int(0, u32::MAX as i64)),
            ("reset_hold_ms", Kind::Int(1, u32::MAX as i64)),
            ("reset_release_ms", Kind::Int(0, u32::MAX as i64)),
            ("reset_close_ms", Kind::Int(0, u32::MAX as i64)),
        ],
    ),
    ("persist", &[("enabled", Kind::Bool)]),
];

#[derive(Clone, Copy)]
enum Kind {
    Int(i64, i64),
    Bool,
}

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate lumen.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=lumen.toml");

    let config_path = Path::new("lumen.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: lumen.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds lumen.toml as its default configuration.    ║\n\
            ║  Please create one in the lumen-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read lumen.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in lumen.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let errors = check_schema(&config);
    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in lumen.toml                      ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=lumen.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check sections, keys and value ranges against [`SCHEMA`]
fn check_schema(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let root = match config.as_table() {
        Some(t) => t,
        None => return errors,
    };

    for (section, value) in root {
        let keys = match SCHEMA.iter().find(|(name, _)| *name == section.as_str()) {
            Some((_, keys)) => keys,
            None => {
                errors.push(format!("unknown section or key '{}'", section));
                continue;
            }
        };

        let table = match value {
            toml::Value::Table(t) => t,
            _ => {
                errors.push(format!("[{}] must be a table", section));
                continue;
            }
        };

        for (key, value) in table {
            let kind = match keys.iter().find(|(name, _)| *name == key.as_str()) {
                Some((_, kind)) => *kind,
                None => {
                    errors.push(format!("[{}] unknown key '{}'", section, key));
                    continue;
                }
            };

            match (kind, value) {
                (Kind::Int(min, max), toml::Value::Integer(n)) => {
                    if *n < min || *n > max {
                        errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
                    }
                }
                (Kind::Bool, toml::Value::Boolean(_)) => {}
                (Kind::Int(..), _) => {
                    errors.push(format!("[{}] {} must be an integer", section, key));
                }
                (Kind::Bool, _) => {
                    errors.push(format!("[{}] {} must be true or false", section, key));
                }
            }
        }
    }

    errors
}
