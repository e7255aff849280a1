//! Environment diagnostics
//!
//! The only hard requirement at runtime is a liboqs that can sign and
//! verify with the configured Falcon variant. The toolchain, the tools
//! liboqs is compiled with, and the libclang that bindgen loads only matter
//! when rebuilding, so they are reported as optional.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::config::defaults::CONFIG_FILE;
use crate::core::bench;
use crate::core::crypto::SignatureAlgorithm;
use crate::core::ledger_config::LedgerConfig;

/// Variable bindgen reads to locate libclang
pub const ENV_LIBCLANG_PATH: &str = "LIBCLANG_PATH";

/// Dynamic-library search path variable
pub const ENV_LIBRARY_PATH: &str = "LD_LIBRARY_PATH";

const DEV_SHELL_HINT: &str = "enter the development shell with 'nix develop'";

/// Build tools probed with `--version`: (label, executable, what needs it)
const BUILD_TOOLS: &[(&str, &str, &str)] = &[
    ("Cargo", "cargo", "building falcondag"),
    ("rustc", "rustc", "building falcondag"),
    ("CMake", "cmake", "building liboqs"),
    ("Clang", "clang", "generating liboqs bindings"),
];

/// One diagnostic
#[derive(Debug, Clone, Serialize)]
pub struct Check {
    /// What was checked
    pub name: String,
    /// Whether a failure makes the installation unusable
    pub required: bool,
    /// Outcome
    pub passed: bool,
    /// Version or location found
    pub detail: Option<String>,
    /// What went wrong
    pub error: Option<String>,
    /// How to fix it
    pub suggestion: Option<String>,
}

impl Check {
    fn ok(name: impl Into<String>, required: bool, detail: Option<String>) -> Self {
        Self {
            name: name.into(),
            required,
            passed: true,
            detail,
            error: None,
            suggestion: None,
        }
    }

    fn failed(
        name: impl Into<String>,
        required: bool,
        error: impl Into<String>,
        suggestion: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            required,
            passed: false,
            detail: None,
            error: Some(error.into()),
            suggestion,
        }
    }
}

/// Overall result of a doctor run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// Every check passed
    #[serde(rename = "success")]
    Healthy,
    /// Only optional checks failed
    #[serde(rename = "warning")]
    Degraded,
    /// A required check failed or the configuration is invalid
    #[serde(rename = "error")]
    Broken,
}

/// Everything a doctor run found
#[derive(Debug, Default, Serialize)]
pub struct DoctorReport {
    /// Individual checks, required ones first
    pub checks: Vec<Check>,
    /// Problems with the data directory's configuration
    pub config_issues: Vec<String>,
}

impl DoctorReport {
    /// Number of passing checks
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Required checks that failed
    pub fn failed_required(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| c.required && !c.passed)
    }

    /// Classify the report
    pub fn verdict(&self) -> Verdict {
        if self.failed_required().next().is_some() || !self.config_issues.is_empty() {
            Verdict::Broken
        } else if self.checks.iter().all(|c| c.passed) {
            Verdict::Healthy
        } else {
            Verdict::Degraded
        }
    }
}

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"v?(\d+\.\d+(?:\.\d+)?(?:-\w+)?)").expect("Invalid version regex")
    })
}

/// First version number in a tool's `--version` output
fn parse_version(output: &str) -> Option<String> {
    version_regex()
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Locate an executable on `PATH` and ask it for its version
///
/// Returns `None` when the tool is missing; a tool that runs but prints
/// no recognizable version yields `Some("unknown")`.
pub fn probe_tool(executable: &str) -> Option<String> {
    let path = which::which(executable).ok()?;
    let output = Command::new(&path).arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let text = [output.stdout, output.stderr].concat();
    Some(parse_version(&String::from_utf8_lossy(&text)).unwrap_or_else(|| "unknown".to_string()))
}

fn check_build_tool(label: &str, executable: &str, purpose: &str) -> Check {
    match probe_tool(executable) {
        Some(version) => Check::ok(label, false, Some(version)),
        None => Check::failed(
            label,
            false,
            format!("{executable} not found in PATH"),
            Some(format!("Needed for {purpose}; {DEV_SHELL_HINT}")),
        ),
    }
}

/// Split a search-path variable into its directories, dropping empty entries
pub fn split_search_path(value: &str) -> Vec<PathBuf> {
    env::split_paths(value)
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}

fn is_libclang(file_name: &str) -> bool {
    file_name.starts_with("libclang")
        && (file_name.contains(".so") || file_name.ends_with(".dylib"))
}

fn contains_libclang(dir: &Path) -> bool {
    std::fs::read_dir(dir).is_ok_and(|entries| {
        entries
            .filter_map(Result::ok)
            .any(|entry| is_libclang(&entry.file_name().to_string_lossy()))
    })
}

/// Locate libclang through `LIBCLANG_PATH`, then the library search path
pub fn find_libclang(libclang_path: Option<&str>, library_path: Option<&str>) -> Option<PathBuf> {
    let explicit = libclang_path.map(PathBuf::from);
    let searched = library_path.map(split_search_path).unwrap_or_default();

    explicit
        .into_iter()
        .chain(searched)
        .find(|dir| contains_libclang(dir))
}

/// Check that bindgen will be able to load libclang
pub fn check_libclang() -> Check {
    let libclang_path = env::var(ENV_LIBCLANG_PATH).ok();
    let library_path = env::var(ENV_LIBRARY_PATH).ok();

    match find_libclang(libclang_path.as_deref(), library_path.as_deref()) {
        Some(dir) => Check::ok("libclang", false, Some(dir.display().to_string())),
        None => Check::failed(
            "libclang",
            false,
            format!("not found via {ENV_LIBCLANG_PATH} or {ENV_LIBRARY_PATH}"),
            Some(format!("Set {ENV_LIBCLANG_PATH} or {DEV_SHELL_HINT}")),
        ),
    }
}

/// Check that the linked liboqs signs and verifies
pub fn check_liboqs(algorithm: SignatureAlgorithm) -> Check {
    let name = format!("liboqs ({algorithm})");
    match bench::self_test(algorithm) {
        Ok(true) => Check::ok(name, true, None),
        Ok(false) => Check::failed(name, true, "sign/verify self-test failed", None),
        Err(e) => Check::failed(
            name,
            true,
            e.to_string(),
            Some("Rebuild against a liboqs with Falcon enabled".to_string()),
        ),
    }
}

/// Problems with the configuration file of a data directory, if it has one
pub fn check_data_dir_config(data_dir: &Path) -> Vec<String> {
    let path = data_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Vec::new();
    }

    LedgerConfig::load_from_path(&path)
        .err()
        .map(|e| e.to_string())
        .into_iter()
        .collect()
}

/// Run every check
///
/// The liboqs self-test uses the data directory's algorithm when its
/// configuration loads, and the default algorithm otherwise.
pub fn run_doctor(data_dir: Option<&Path>) -> DoctorReport {
    let algorithm = data_dir
        .and_then(|dir| LedgerConfig::load_from_path(&dir.join(CONFIG_FILE)).ok())
        .map(|config| config.algorithm)
        .unwrap_or_default();

    let mut checks = vec![check_liboqs(algorithm)];
    checks.extend(
        BUILD_TOOLS
            .iter()
            .map(|(label, executable, purpose)| check_build_tool(label, executable, purpose)),
    );
    checks.push(check_libclang());

    DoctorReport {
        checks,
        config_issues: data_dir.map(check_data_dir_config).unwrap_or_default(),
    }
}
