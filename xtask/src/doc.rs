use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

use crate::HOST_FEATURES;

/// Crates with a public API.
const DOC_PACKAGES: &[&str] = &["platform", "time-svc"];

/// Arguments for one `cargo doc` run over every driver crate.
fn doc_args(open: bool) -> Vec<&'static str> {
    let mut args = vec!["doc", "--no-deps", "--features", HOST_FEATURES];
    for &package in DOC_PACKAGES {
        args.extend(["-p", package]);
    }
    if open {
        args.push("--open");
    }
    args
}

/// Rustdoc output directory for `package`, relative to the workspace root.
fn index_path(package: &str) -> String {
    format!("target/doc/{}/index.html", package.replace('-', "_"))
}

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building RTC driver documentation...".cyan().bold());
    println!();

    let start = Instant::now();

    let output = Command::new("cargo")
        .args(doc_args(open))
        // Broken intra-doc links fail the build instead of rendering as text.
        .env("RUSTDOCFLAGS", "-D rustdoc::broken_intra_doc_links")
        .output()
        .context("Failed to run cargo doc")?;

    if !output.status.success() {
        eprintln!("{}", "✗ Documentation build failed".red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("Documentation build failed");
    }

    println!(
        "{}",
        format!(
            "✓ Documented {} crates in {:.2}s",
            DOC_PACKAGES.len(),
            start.elapsed().as_secs_f64()
        )
        .green()
    );

    if !open {
        println!();
        for package in DOC_PACKAGES {
            println!("   {}", format!("{package}: {}", index_path(package)).dimmed());
        }
        println!("   {}", "Or run 'cargo run -p xtask -- doc --open'".dimmed());
    }

    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_driver_crate_with_host_features() {
        let args = doc_args(false);
        assert_eq!(args.first(), Some(&"doc"));
        assert!(args.windows(2).any(|w| w == ["--features", HOST_FEATURES]));
        for package in DOC_PACKAGES {
            assert!(args.windows(2).any(|w| w == ["-p", *package]));
        }
        assert!(!args.contains(&"--open"));
    }

    #[test]
    fn open_flag_is_last() {
        assert_eq!(doc_args(true).last(), Some(&"--open"));
    }

    #[test]
    fn index_path_uses_crate_name() {
        assert_eq!(index_path("time-svc"), "target/doc/time_svc/index.html");
        assert_eq!(index_path("platform"), "target/doc/platform/index.html");
    }
}
