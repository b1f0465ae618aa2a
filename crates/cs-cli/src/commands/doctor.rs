//! Doctor command
//!
//! Diagnose configuration and storage.

use anyhow::Result;
use colored::Colorize;
use cs_core::config::{Config, StorageBackend};
use cs_storage::FileSystemStore;
use std::fs;
use std::path::Path;

/// Check result
struct CheckResult {
    name: String,
    passed: bool,
    message: String,
    suggestion: Option<String>,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            suggestion: None,
        }
    }

    fn fail(name: &str, message: &str, suggestion: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    fn warn(name: &str, message: &str, suggestion: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: format!("⚠ {}", message),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    fn is_warning(&self) -> bool {
        self.passed && self.message.starts_with('⚠')
    }
}

/// Execute the doctor command
pub fn execute(config_path: Option<&Path>) -> Result<()> {
    let mut results = vec![CheckResult::ok(
        "comment-service version",
        env!("CARGO_PKG_VERSION"),
    )];

    println!("\n{}", "Configuration".bold().underline());
    let config = match check_config_file(config_path, &mut results) {
        Some(config) => config,
        None => Config::default(),
    };
    results.extend(check_config(&config));
    results.push(check_storage(&config));

    for result in &results {
        let status = if !result.passed {
            "✗".red()
        } else if result.is_warning() {
            "⚠".yellow()
        } else {
            "✓".green()
        };
        println!("   {} {}: {}", status, result.name, result.message);
        if let Some(suggestion) = &result.suggestion {
            println!("     {}", suggestion.dimmed());
        }
    }

    let warnings = results.iter().filter(|r| r.is_warning()).count();
    let errors = results.iter().filter(|r| !r.passed).count();

    println!(
        "\n{}: {} warnings, {} errors",
        "Summary".bold(),
        warnings.to_string().yellow(),
        errors.to_string().red()
    );
    if errors == 0 && warnings == 0 {
        println!("\n{} All checks passed!", "✓".green());
    }

    Ok(())
}

fn check_config_file(config_path: Option<&Path>, results: &mut Vec<CheckResult>) -> Option<Config> {
    let path = super::config_path(config_path);
    let name = path.display().to_string();

    if !path.exists() {
        results.push(CheckResult::warn(
            &name,
            "not found, using defaults",
            Some("Run 'comment-service init' to create"),
        ));
        return None;
    }

    match Config::load(&path) {
        Ok(config) => {
            results.push(CheckResult::ok(&name, "valid"));
            Some(config)
        }
        Err(e) => {
            results.push(CheckResult::fail(
                &name,
                &format!("invalid: {}", e),
                Some("Fix the errors or regenerate with 'comment-service init --force'"),
            ));
            None
        }
    }
}

fn check_config(config: &Config) -> Vec<CheckResult> {
    let mut results = Vec::new();

    match config.server.socket_addr() {
        Ok(addr) => results.push(CheckResult::ok("Bind address", &addr.to_string())),
        Err(e) => results.push(CheckResult::fail("Bind address", &e.to_string(), None)),
    }

    let env_secret = std::env::var("AUTH_TOKEN_SECRET")
        .map(|s| !s.trim().is_empty())
        .unwrap_or(false);
    let file_secret = config
        .auth
        .token_secret
        .as_deref()
        .map(|s| !s.trim().is_empty())
        .unwrap_or(false);

    if file_secret {
        results.push(CheckResult::ok("Token secret", "set in config"));
    } else if env_secret {
        results.push(CheckResult::ok("Token secret", "set via AUTH_TOKEN_SECRET"));
    } else {
        results.push(CheckResult::fail(
            "Token secret",
            "not set",
            Some("Set auth.token_secret or export AUTH_TOKEN_SECRET"),
        ));
    }

    if config.comments.max_length == 0 {
        results.push(CheckResult::fail(
            "Comment policy",
            "max_length must be greater than zero",
            None,
        ));
    } else if config.comments.verify_references {
        results.push(CheckResult::ok("Comment policy", "references verified"));
    } else {
        results.push(CheckResult::ok("Comment policy", "references not verified"));
    }

    results
}

fn check_storage(config: &Config) -> CheckResult {
    if config.storage.backend == StorageBackend::Memory {
        return CheckResult::warn(
            "Storage",
            "memory backend, comments are lost on restart",
            Some("Set storage.backend = \"filesystem\" to persist"),
        );
    }

    let dir = config
        .storage
        .data_dir
        .clone()
        .or_else(|| std::env::var_os("DATA_DIR").map(Into::into))
        .unwrap_or_else(FileSystemStore::default_dir);
    check_writable(&dir)
}

fn check_writable(dir: &Path) -> CheckResult {
    let name = "Data directory";
    if let Err(e) = fs::create_dir_all(dir) {
        return CheckResult::fail(name, &format!("cannot create {}: {}", dir.display(), e), None);
    }

    let probe = dir.join(".doctor-probe");
    match fs::write(&probe, b"ok") {
        Ok(()) => {
            let _ = fs::remove_file(&probe);
            CheckResult::ok(name, &format!("{} (writable)", dir.display()))
        }
        Err(e) => CheckResult::fail(
            name,
            &format!("{} is not writable: {}", dir.display(), e),
            Some("Fix permissions or set storage.data_dir"),
        ),
    }
}
