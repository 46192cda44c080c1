//! Developer tasks: man page and shell completion generation.
//!
//! Run with `cargo xtask <task>` (or `cargo run -p xtask -- <task>`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "textmetrics developer tasks")]
struct Xtask {
    #[command(subcommand)]
    task: Task,

    /// Output directory for generated files
    #[arg(long, global = true, default_value = "target/dist")]
    out_dir: PathBuf,
}

#[derive(Subcommand)]
enum Task {
    /// Generate the man page
    Man,
    /// Generate shell completions
    Completions {
        /// Shells to generate for (default: all supported)
        #[arg(value_enum)]
        shells: Vec<Shell>,
    },
    /// Generate the man page and all completions
    Dist,
}

fn main() -> anyhow::Result<()> {
    let xtask = Xtask::parse();

    match xtask.task {
        Task::Man => gen_man(&xtask.out_dir),
        Task::Completions { shells } => gen_completions(&xtask.out_dir, &shells),
        Task::Dist => {
            gen_man(&xtask.out_dir)?;
            gen_completions(&xtask.out_dir, &[])
        }
    }
}

fn gen_man(out_dir: &Path) -> anyhow::Result<()> {
    let dir = out_dir.join("man");
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let cmd = textmetrics::command();
    let path = dir.join("textmetrics.1");
    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd.clone())
        .render(&mut buf)
        .context("failed to render man page")?;
    fs::write(&path, buf).with_context(|| format!("failed to write {}", path.display()))?;
    println!("wrote {}", path.display());

    for sub in cmd.get_subcommands() {
        let name = format!("textmetrics-{}", sub.get_name());
        let path = dir.join(format!("{name}.1"));
        let mut buf = Vec::new();
        clap_mangen::Man::new(sub.clone().name(name))
            .render(&mut buf)
            .with_context(|| format!("failed to render man page for {}", sub.get_name()))?;
        fs::write(&path, buf).with_context(|| format!("failed to write {}", path.display()))?;
        println!("wrote {}", path.display());
    }

    Ok(())
}

fn gen_completions(out_dir: &Path, shells: &[Shell]) -> anyhow::Result<()> {
    let dir = out_dir.join("completions");
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let shells = if shells.is_empty() {
        &[Shell::Bash, Shell::Elvish, Shell::Fish, Shell::PowerShell, Shell::Zsh][..]
    } else {
        shells
    };

    let mut cmd = textmetrics::command();
    for &shell in shells {
        let path = clap_complete::generate_to(shell, &mut cmd, "textmetrics", &dir)
            .with_context(|| format!("failed to generate {shell} completions"))?;
        println!("wrote {}", path.display());
    }

    Ok(())
}
