//! Build script for segmux-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use segmux_core::config::parse_config;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate display.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");
    if !config_path.exists() {
        fail(&["display.toml not found next to Cargo.toml".to_string()]);
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail(&[format!("failed to read display.toml: {}", e)]),
    };

    // Syntax first: the toml crate gives better error positions
    if let Err(e) = toml::from_str::<toml::Value>(&content) {
        fail(&e.to_string().lines().map(str::to_string).collect::<Vec<_>>());
    }

    // Same parser the firmware runs at boot
    if let Err(e) = parse_config(&content) {
        fail(&[format!("rejected by the display config parser: {:?}", e)]);
    }

    println!("cargo:warning=display.toml validated successfully");
}

fn fail(errors: &[String]) -> ! {
    let lines = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");
    panic!("\nInvalid display.toml:\n{}\n", lines);
}
