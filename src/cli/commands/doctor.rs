//! Doctor command implementation
//!
//! Reports build metadata, environment checks and, for an initialized data
//! directory, configuration problems.

use anyhow::{bail, Result};
use serde::Serialize;

use crate::cli::output::{
    is_json, is_quiet, print_detail, print_info, print_json, print_success, print_warning, status,
};
use crate::core::doctor::{run_doctor, Check, DoctorReport, Verdict};
use crate::infra::dirs::FalcondagDirs;

/// Metadata captured at compile time
#[derive(Debug, Serialize)]
struct BuildInfo {
    version: &'static str,
    git_sha: &'static str,
    target: &'static str,
    rustc: &'static str,
    built: &'static str,
}

impl BuildInfo {
    fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            git_sha: option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
            target: option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown"),
            rustc: option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown"),
            built: option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown"),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    status: Verdict,
    build: BuildInfo,
    #[serde(flatten)]
    report: &'a DoctorReport,
    passed_count: usize,
    total_count: usize,
}

fn print_check(check: &Check) {
    let marker = if check.passed {
        status::SUCCESS
    } else {
        status::ERROR
    };
    let detail = check
        .detail
        .as_deref()
        .map(|d| format!(" ({d})"))
        .unwrap_or_default();
    let optional = if check.required { "" } else { " [optional]" };
    println!("  {marker} {}{detail}{optional}", check.name);

    if let Some(error) = &check.error {
        print_detail(&format!("Error: {error}"));
    }
    if let Some(suggestion) = &check.suggestion {
        print_detail(&format!("Suggestion: {suggestion}"));
    }
}

/// Execute the doctor command
pub async fn execute(dirs: &FalcondagDirs) -> Result<()> {
    let data_dir = dirs.is_initialized().then(|| dirs.data_dir());
    let report = run_doctor(data_dir);
    let verdict = report.verdict();

    if is_json() {
        print_json(&JsonReport {
            status: verdict,
            build: BuildInfo::current(),
            report: &report,
            passed_count: report.passed_count(),
            total_count: report.checks.len(),
        })?;
    } else if is_quiet() {
        for check in report.failed_required() {
            eprintln!("{} Missing required: {}", status::ERROR, check.name);
        }
        for issue in &report.config_issues {
            eprintln!("{} {issue}", status::ERROR);
        }
    } else {
        let build = BuildInfo::current();
        print_info(&format!(
            "falcondag {} ({}, {})",
            build.version, build.git_sha, build.target
        ));
        println!();
        report.checks.iter().for_each(print_check);

        if !report.config_issues.is_empty() {
            println!();
            print_warning(&format!(
                "Configuration issues in {}:",
                dirs.config_path().display()
            ));
            for issue in &report.config_issues {
                print_detail(&format!("• {issue}"));
            }
        }

        println!();
        let summary = format!(
            "{}/{} checks passed",
            report.passed_count(),
            report.checks.len()
        );
        match verdict {
            Verdict::Healthy => print_success(&summary),
            Verdict::Degraded => {
                print_warning(&format!("{summary} (optional build tools missing)"));
                print_detail("The ledger works; rebuilding falcondag needs the development shell.");
            }
            Verdict::Broken => println!("{} {summary}", status::ERROR),
        }
    }

    if verdict == Verdict::Broken {
        bail!("Doctor found problems");
    }
    Ok(())
}
