use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

/// Crates worth landing on after a build, composition root first.
const ENTRY_POINTS: &[&str] = &["firmware", "dialer", "keypad", "platform"];

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building Dialtone docs...".cyan().bold());
    println!();

    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.args(["doc", "--workspace", "--no-deps", "--document-private-items"]);

    if open {
        // Land on the firmware crate; everything else is reachable from it.
        cmd.args(["--open", "-p", "firmware"]);
    }

    let output = cmd.output().context("Failed to build documentation")?;

    if !output.status.success() {
        eprintln!("{}", "✗ Documentation build failed".red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("Documentation build failed");
    }

    println!(
        "{}",
        format!("✓ Docs built in {:.2}s", start.elapsed().as_secs_f64()).green()
    );

    if !open {
        println!();
        println!("   {}", "Entry points:".dimmed());
        for krate in ENTRY_POINTS {
            println!("   {}", format!("target/doc/{krate}/index.html").dimmed());
        }
        println!();
        println!(
            "   {}",
            "Or run 'cargo run -p xtask -- doc --open'".dimmed()
        );
    }

    println!();

    Ok(())
}
