use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context, Result};
use clap::ValueEnum;
use log::info;

use crate::codec::{self, Seed};
use crate::fingerprint;

/// Only source files with this extension are accepted. Boundary policy,
/// not transform logic.
pub const SOURCE_EXT: &str = "py";

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Mode {
    /// Shift bytes forward, rendering the file unreadable
    #[value(name = "o", alias = "obscure")]
    Obscure,
    /// Reverse a previous obscure pass with the same seed
    #[value(name = "d", alias = "deobscure")]
    Deobscure,
}

impl Mode {
    fn suffix(self) -> &'static str {
        match self {
            Mode::Obscure => "_obscure",
            Mode::Deobscure => "_deobscure",
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            Mode::Obscure => "obscured",
            Mode::Deobscure => "deobscured",
        }
    }
}

/// A fully validated invocation: the prompt/argument layer resolves to
/// this before the transform runs.
#[derive(Debug)]
pub struct Request {
    pub mode: Mode,
    pub path: PathBuf,
    pub seed: Seed,
}

#[derive(Debug)]
pub enum Outcome {
    Written { path: PathBuf, elapsed: Duration },
    /// User declined to overwrite the existing output; nothing was touched.
    Cancelled,
}

/// `name.ext` -> `name_obscure.ext` / `name_deobscure.ext`.
pub fn output_path(input: &Path, mode: Mode) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{}{}", stem, mode.suffix());
    if let Some(ext) = input.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    input.with_file_name(name)
}

/// Transform one file end to end: validate, read, shift, confirm any
/// overwrite, write atomically, log fingerprints. `confirm_overwrite` is
/// only called when the output path already exists; returning false
/// cancels the whole operation before anything is written.
pub fn process_file(
    req: &Request,
    mut confirm_overwrite: impl FnMut(&Path) -> Result<bool>,
) -> Result<Outcome> {
    let start = Instant::now();

    validate_input(&req.path)?;

    let original_digest = fingerprint::sha256_file(&req.path)?;
    info!("sha256 of original file ({}): {}", req.path.display(), original_digest);

    let shift = req.seed.shift();
    let transformed: Vec<u8> = match req.mode {
        Mode::Obscure => {
            let content = read_text(&req.path)?;
            codec::obscure(&content, shift)
        }
        Mode::Deobscure => {
            let content = fs::read(&req.path)
                .with_context(|| format!("reading '{}'", req.path.display()))?;
            codec::deobscure(&content, shift)
                .with_context(|| format!("deobscuring '{}'", req.path.display()))?
                .into_bytes()
        }
    };

    let out = output_path(&req.path, req.mode);
    if out.exists() && !confirm_overwrite(&out)? {
        return Ok(Outcome::Cancelled);
    }

    write_atomic(&out, &transformed)?;

    let new_digest = fingerprint::sha256_file(&out)?;
    info!("sha256 of new file ({}): {}", out.display(), new_digest);

    let elapsed = start.elapsed();
    info!(
        "file {} successfully {} in {:.2?}",
        out.display(),
        req.mode.verb(),
        elapsed
    );
    Ok(Outcome::Written { path: out, elapsed })
}

fn validate_input(path: &Path) -> Result<()> {
    if !path.is_file() {
        bail!("file '{}' does not exist", path.display());
    }
    let ext = path.extension().map(|e| e.to_string_lossy().to_lowercase());
    if ext.as_deref() != Some(SOURCE_EXT) {
        bail!(
            "invalid file extension for '{}': expected a .{} file",
            path.display(),
            SOURCE_EXT
        );
    }
    Ok(())
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::InvalidData {
            anyhow!("'{}' is not valid UTF-8 text, cannot obscure it", path.display())
        } else {
            anyhow::Error::new(e).context(format!("reading '{}'", path.display()))
        }
    })
}

/// Stage into a tempfile next to the destination, then rename into place.
/// A failed run never leaves a half-written output behind.
fn write_atomic(out: &Path, data: &[u8]) -> Result<()> {
    let dir = out
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let mut tmp = tempfile::NamedTempFile::new_in(&dir)
        .with_context(|| format!("creating temporary file in '{}'", dir.display()))?;
    tmp.write_all(data)
        .with_context(|| format!("writing '{}'", out.display()))?;
    tmp.persist(out)
        .with_context(|| format!("replacing '{}'", out.display()))?;
    Ok(())
}
