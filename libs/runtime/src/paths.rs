use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

/// Resolve the server home directory.
///
/// - `None` or an empty string means the platform default: `$HOME/<subdir>`
///   (`%USERPROFILE%` on Windows).
/// - A leading `~` is expanded against the user's home directory.
/// - Relative paths are resolved against the current working directory.
///
/// When `create` is set the directory is created if missing.
pub fn resolve_home_dir(value: Option<String>, subdir: &str, create: bool) -> Result<PathBuf> {
    let resolved = match value.filter(|v| !v.trim().is_empty()) {
        None => user_home()?.join(subdir),
        Some(raw) => {
            let raw = raw.trim();
            if raw == "~" {
                user_home()?
            } else if let Some(rest) = raw.strip_prefix("~/") {
                user_home()?.join(rest)
            } else {
                let p = PathBuf::from(raw);
                if p.is_absolute() {
                    p
                } else {
                    std::env::current_dir()
                        .context("cannot resolve current directory")?
                        .join(p)
                }
            }
        }
    };

    if create {
        std::fs::create_dir_all(&resolved)
            .with_context(|| format!("cannot create home dir {}", resolved.display()))?;
    }
    Ok(resolved)
}

fn user_home() -> Result<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("cannot determine user home directory"))
}
