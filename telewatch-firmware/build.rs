//! Build script for telewatch-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates watch.toml and compiles it into `board_config.rs`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    let config = load_config();
    let board = validate_config(&config);
    write_board_config(&board);
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

    // cortex-m-rt, embassy-rp boot2 and defmt linker scripts
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validated board configuration
struct BoardConfig {
    prefers_24h: bool,
    initial_clock: (u16, u8, u8, u8, u8, u8),
    budget_bytes: usize,
    companion_baud: u32,
    spi_frequency_hz: u32,
}

/// Read and parse watch.toml
fn load_config() -> toml::Value {
    println!("cargo:rerun-if-changed=watch.toml");

    let config_path = Path::new("watch.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: watch.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a watch.toml board configuration file.    ║\n\
            ║  Please create one in the telewatch-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read watch.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in watch.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    }
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

/// Panic with every collected error in one box
fn report_errors(errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: Invalid configuration in watch.toml                      ║\n\
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

/// Look up `section.key`
fn field<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a toml::Value> {
    config.get(section).and_then(|s| s.get(key))
}

fn integer_in(
    config: &toml::Value,
    section: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) -> i64 {
    match field(config, section, key) {
        Some(toml::Value::Integer(v)) if range.contains(v) => *v,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!(
                "[{}] {} must be {}-{}",
                section,
                key,
                range.start(),
                range.end()
            ));
            *range.start()
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            *range.start()
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            *range.start()
        }
    }
}

/// Validate every section and collect the values the firmware needs
fn validate_config(config: &toml::Value) -> BoardConfig {
    let mut errors = Vec::new();

    let prefers_24h = match field(config, "locale", "prefers_24h") {
        Some(toml::Value::Boolean(b)) => *b,
        Some(_) => {
            errors.push("[locale] prefers_24h must be true or false".to_string());
            true
        }
        None => {
            errors.push("[locale] missing 'prefers_24h'".to_string());
            true
        }
    };

    let initial_clock = validate_clock(config, &mut errors);

    let budget_bytes = integer_in(config, "surface", "budget_bytes", 1024..=65536, &mut errors);
    let companion_baud = integer_in(config, "companion", "baud", 1200..=921_600, &mut errors);
    let spi_frequency_hz = integer_in(
        config,
        "panel",
        "spi_frequency_hz",
        100_000..=2_000_000,
        &mut errors,
    );

    report_errors(&errors);
    println!("cargo:warning=watch.toml validated successfully");

    BoardConfig {
        prefers_24h,
        initial_clock,
        budget_bytes: budget_bytes as usize,
        companion_baud: companion_baud as u32,
        spi_frequency_hz: spi_frequency_hz as u32,
    }
}

/// Validate `[clock] initial`, a TOML local date-time
fn validate_clock(config: &toml::Value, errors: &mut Vec<String>) -> (u16, u8, u8, u8, u8, u8) {
    let fallback = (2024, 1, 1, 0, 0, 0);

    let datetime = match field(config, "clock", "initial") {
        Some(toml::Value::Datetime(dt)) => dt,
        Some(_) => {
            errors.push("[clock] initial must be a date-time, e.g. 2024-03-07T10:10:00".into());
            return fallback;
        }
        None => {
            errors.push("[clock] missing 'initial'".to_string());
            return fallback;
        }
    };

    let (Some(date), Some(time)) = (datetime.date, datetime.time) else {
        errors.push("[clock] initial needs both a date and a time".to_string());
        return fallback;
    };
    if datetime.offset.is_some() {
        errors.push("[clock] initial must be local time without an offset".to_string());
    }

    let leap = (date.year % 4 == 0 && date.year % 100 != 0) || date.year % 400 == 0;
    let days_in_month = match date.month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if leap => 29,
        _ => 28,
    };
    if !(2000..=2099).contains(&date.year) {
        errors.push("[clock] initial year must be 2000-2099".to_string());
    }
    if date.day > days_in_month {
        errors.push(format!("[clock] initial day {} is past month end", date.day));
    }
    if time.second > 59 {
        errors.push("[clock] initial seconds must be 0-59".to_string());
    }

    (
        date.year,
        date.month,
        date.day,
        time.hour,
        time.minute,
        time.second,
    )
}

/// Emit the validated configuration as Rust constants
fn write_board_config(board: &BoardConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let (year, month, day, hour, minute, second) = board.initial_clock;

    let source = format!(
        "/// Default for the 24h setting when nothing is stored\n\
         pub const LOCALE_PREFERS_24H: bool = {};\n\
         /// RTC seed as (year, month, day, hour, minute, second)\n\
         pub const INITIAL_CLOCK: (u16, u8, u8, u8, u8, u8) = ({}, {}, {}, {}, {}, {});\n\
         /// Compositor resource budget in bytes\n\
         pub const SURFACE_BUDGET_BYTES: usize = {};\n\
         /// Companion UART baud rate\n\
         pub const COMPANION_BAUD: u32 = {};\n\
         /// Panel SPI clock\n\
         pub const SPI_FREQUENCY_HZ: u32 = {};\n",
        board.prefers_24h,
        year,
        month,
        day,
        hour,
        minute,
        second,
        board.budget_bytes,
        board.companion_baud,
        board.spi_frequency_hz,
    );

    let mut f = File::create(out_dir.join("board_config.rs")).unwrap();
    f.write_all(source.as_bytes()).unwrap();
}
