use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use obsource::codec::Seed;
use obsource::process::{self, Mode, Outcome, Request};

#[derive(Parser, Debug)]
#[command(version, about = "Obscure or deobscure source files with a seeded byte shift")]
struct Args {
    /// Mode: "o" to obscure, "d" to deobscure
    #[arg(value_enum)]
    mode: Option<Mode>,

    /// Source file to process (must end in .py)
    file: Option<PathBuf>,

    /// Four-digit seed
    seed: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Fully specified on the command line, or fall back to prompts.
    let request = match (args.mode, args.file, args.seed) {
        (Some(mode), Some(path), Some(seed)) => {
            let seed: Seed = seed.parse().context("invalid seed argument")?;
            Request { mode, path, seed }
        }
        _ => match interactive_request()? {
            Some(r) => r,
            None => {
                println!("Exiting obsource.");
                return Ok(());
            }
        },
    };

    match process::process_file(&request, confirm_overwrite)? {
        Outcome::Written { path, elapsed } => {
            println!(
                "File {} successfully {} in {:.2?}.",
                path.display(),
                request.mode.verb(),
                elapsed
            );
        }
        Outcome::Cancelled => println!("Operation cancelled."),
    }
    Ok(())
}

/// Prompt for mode, file and seed in order. Returns None if the user
/// enters 'q' at any prompt.
fn interactive_request() -> Result<Option<Request>> {
    clear_screen();
    println!("Obsource - Sourcecode security through obscurity");
    println!("================================================\n");

    let mode = match prompt("Obscure (o) or deobscure (d) a source file? ('q' to quit): ")? {
        q if q.eq_ignore_ascii_case("q") => return Ok(None),
        m if m.eq_ignore_ascii_case("o") => Mode::Obscure,
        m if m.eq_ignore_ascii_case("d") => Mode::Deobscure,
        other => bail!("invalid mode '{}': expected 'o' or 'd'", other),
    };

    let file = prompt("Enter the name of the source file (with .py): ")?;
    if file.eq_ignore_ascii_case("q") {
        return Ok(None);
    }

    let seed = prompt("Enter a four-digit seed: ")?;
    if seed.eq_ignore_ascii_case("q") {
        return Ok(None);
    }
    let seed: Seed = seed.parse()?;

    Ok(Some(Request {
        mode,
        path: PathBuf::from(file),
        seed,
    }))
}

fn confirm_overwrite(path: &std::path::Path) -> Result<bool> {
    let answer = prompt(&format!(
        "File {} already exists. Overwrite? (y/n): ",
        path.display()
    ))?;
    Ok(answer.eq_ignore_ascii_case("y"))
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush().context("flushing stdout")?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("reading from stdin")?;
    Ok(line.trim().to_string())
}

fn clear_screen() {
    // ANSI clear + home; harmless where unsupported.
    print!("\x1b[2J\x1b[1;1H");
    let _ = io::stdout().flush();
}
