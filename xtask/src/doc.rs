use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

// The published doc surface is the two library crates; xtask stays out.
const DOC_PACKAGES: [&str; 2] = ["amp-platform", "amp-hal"];

// Applied to every pass: a second pass with different flags would rebuild
// from scratch instead of reusing the artifacts.
const RUSTDOC_FLAGS: &str = "-D warnings";

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building documentation...".cyan().bold());
    println!();

    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.args(["doc", "--no-deps", "--document-private-items"]);
    for package in DOC_PACKAGES {
        cmd.args(["-p", package]);
    }
    // missing_docs is a workspace warn; rustdoc warnings (missing docs,
    // broken intra-doc links) fail this build.
    cmd.env("RUSTDOCFLAGS", RUSTDOC_FLAGS);

    let output = cmd.output().context("Failed to build documentation")?;

    if !output.status.success() {
        eprintln!(
            "{}",
            "✗ Documentation build failed (rustdoc warnings are denied)"
                .red()
                .bold()
        );
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("Documentation build failed");
    }

    println!(
        "{}",
        format!(
            "✓ Documentation built in {:.2}s",
            start.elapsed().as_secs_f64()
        )
        .green()
    );

    if open {
        // cargo rejects --open with more than one -p; reopen the HAL crate
        // over the artifacts the first pass just built.
        let opened = Command::new("cargo")
            .args(["doc", "--no-deps", "--document-private-items"])
            .args(["-p", "amp-hal", "--open"])
            .env("RUSTDOCFLAGS", RUSTDOC_FLAGS)
            .status()
            .context("Failed to open documentation")?;
        if !opened.success() {
            anyhow::bail!("Failed to open documentation");
        }
    } else {
        println!();
        for package in DOC_PACKAGES {
            let index = format!("target/doc/{}/index.html", package.replace('-', "_"));
            println!("   {}", index.dimmed());
        }
        println!(
            "   {}",
            "Or run 'cargo run -p xtask -- doc --open'".dimmed()
        );
    }

    println!();

    Ok(())
}
