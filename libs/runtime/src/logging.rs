use crate::config::{LoggingConfig, Section};
use std::collections::HashMap;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{filter::FilterFn, fmt};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

// -------- level helpers --------

fn parse_tracing_level(s: &str) -> Option<Level> {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        "off" | "none" => None,
        _ => Some(Level::INFO),
    }
}

/// Returns true if target == crate_name or target starts with "crate_name::"
fn matches_crate_prefix(target: &str, crate_name: &str) -> bool {
    target == crate_name
        || (target.starts_with(crate_name) && target[crate_name.len()..].starts_with("::"))
}

type CrateFilter = FilterFn<Box<dyn Fn(&tracing::Metadata<'_>) -> bool + Send + Sync + 'static>>;

/// Filter for the "default" section: everything NOT claimed by an explicit
/// subsystem section, up to `max_level`.
fn default_section_filter(crate_names: &[String], max_level: Level) -> CrateFilter {
    let crates = crate_names.to_vec();
    FilterFn::new(Box::new(move |meta: &tracing::Metadata<'_>| {
        let t = meta.target();
        for c in &crates {
            if matches_crate_prefix(t, c) {
                return false;
            }
        }
        meta.level() <= &max_level
    }))
}

// -------- rotating file writers --------

#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

#[derive(Clone)]
struct RotWriterHandle(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl Write for RotWriterHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.lock().unwrap().flush()
    }
}

/// A writer handle that may be None (drops writes).
#[derive(Clone)]
struct RoutedWriterHandle(Option<RotWriterHandle>);

impl Write for RoutedWriterHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.0 {
            Some(w) => w.write(buf),
            None => Ok(buf.len()),
        }
    }
    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.0 {
            Some(w) => w.flush(),
            None => Ok(()),
        }
    }
}

/// Routes log records to per-subsystem files by target prefix, falling back
/// to the "default" section's file.
#[derive(Clone)]
struct FileRouter {
    default: Option<RotWriter>,
    by_prefix: HashMap<String, RotWriter>,
}

impl FileRouter {
    fn resolve_for(&self, target: &str) -> Option<RotWriterHandle> {
        for (crate_name, wr) in &self.by_prefix {
            if matches_crate_prefix(target, crate_name) {
                return Some(RotWriterHandle(wr.0.clone()));
            }
        }
        self.default.as_ref().map(|w| RotWriterHandle(w.0.clone()))
    }

    fn is_empty(&self) -> bool {
        self.default.is_none() && self.by_prefix.is_empty()
    }
}

impl<'a> fmt::MakeWriter<'a> for FileRouter {
    type Writer = RoutedWriterHandle;

    fn make_writer(&'a self) -> Self::Writer {
        RoutedWriterHandle(self.default.as_ref().map(|w| RotWriterHandle(w.0.clone())))
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        RoutedWriterHandle(self.resolve_for(meta.target()))
    }
}

// -------- path resolution --------

/// Resolve a log file path against `base_dir` (home_dir). Absolute paths
/// are kept as-is.
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

fn rotating_writer(log_path: &Path, max_bytes: usize) -> std::io::Result<RotWriter> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let rot = FileRotate::new(
        log_path,
        AppendTimestamp::default(FileLimit::Age(chrono::Duration::days(1))),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    );

    Ok(RotWriter(Arc::new(Mutex::new(rot))))
}

fn section_writer(name: &str, section: &Section, base_dir: &Path) -> Option<RotWriter> {
    if section.file.trim().is_empty() {
        return None;
    }
    let max_bytes = section.max_size_mb.unwrap_or(100) * 1024 * 1024;
    let log_path = resolve_log_path(&section.file, base_dir);
    match rotating_writer(&log_path, max_bytes as usize) {
        Ok(w) => Some(w),
        Err(e) => {
            eprintln!(
                "Failed to init log file for '{}': {} ({})",
                name,
                log_path.to_string_lossy(),
                e
            );
            None
        }
    }
}

// -------- public init --------

/// Initialize logging from a configuration.
/// - `cfg`: logging sections ("default" + per-subsystem)
/// - `base_dir`: base directory used to resolve relative log file paths
///   (usually server.home_dir)
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    // Bridge `log` → `tracing` *before* installing the subscriber.
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        init_default_logging();
        return;
    }

    let default_section = cfg.get("default");
    let crate_sections: Vec<(String, &Section)> = cfg
        .iter()
        .filter(|(k, _)| k.as_str() != "default")
        .map(|(k, v)| (k.clone(), v))
        .collect();
    let crate_names: Vec<String> = crate_sections.iter().map(|(n, _)| n.clone()).collect();

    let mut router = FileRouter {
        default: default_section.and_then(|s| section_writer("default", s, base_dir)),
        by_prefix: HashMap::new(),
    };
    for (name, section) in &crate_sections {
        if let Some(w) = section_writer(name, section, base_dir) {
            router.by_prefix.insert(name.clone(), w);
        }
    }

    install_layers(default_section, &crate_sections, &crate_names, router);
}

fn init_default_logging() {
    let _ = fmt()
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .try_init();
}

/// Console layer for the "default" section, filtered to targets not claimed
/// by an explicit subsystem section. Generic over the subscriber so it can
/// be attached at any stacking depth.
fn default_console_layer<S>(
    ansi: bool,
    crate_names: &[String],
    level: Level,
) -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_ansi(ansi)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(default_section_filter(crate_names, level))
}

/// JSON file layer for the "default" section, routed through the rotating
/// file writers.
fn default_file_layer<S>(
    router: FileRouter,
    crate_names: &[String],
    level: Level,
) -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(router)
        .with_filter(default_section_filter(crate_names, level))
}

fn install_layers(
    default_section: Option<&Section>,
    crate_sections: &[(String, &Section)],
    crate_names: &[String],
    router: FileRouter,
) {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::{filter::Targets, Registry};

    let ansi = std::io::stdout().is_terminal();

    // Console targets for explicit subsystem sections.
    let mut console_targets = Targets::new().with_default(LevelFilter::OFF);
    let mut file_targets = Targets::new().with_default(LevelFilter::OFF);
    for (name, section) in crate_sections {
        if let Some(level) = parse_tracing_level(&section.console_level) {
            console_targets = console_targets.with_target(name.clone(), LevelFilter::from_level(level));
        }
        if !section.file.trim().is_empty() {
            if let Some(level) = parse_tracing_level(&section.file_level) {
                file_targets = file_targets.with_target(name.clone(), LevelFilter::from_level(level));
            }
        }
    }

    let console_layer = fmt::layer()
        .with_ansi(ansi)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(console_targets);

    if router.is_empty() {
        // Console only: explicit subsystems plus the default catch-all.
        let registry = Registry::default().with(console_layer);
        if let Some(level) = default_section.and_then(|s| parse_tracing_level(&s.console_level)) {
            let _ = registry
                .with(default_console_layer(ansi, crate_names, level))
                .try_init();
        } else {
            let _ = registry.try_init();
        }
        return;
    }

    let explicit_file_layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(router.clone())
        .with_filter(file_targets);

    let registry = Registry::default()
        .with(console_layer)
        .with(explicit_file_layer);

    match default_section {
        Some(section) => {
            let console_level = parse_tracing_level(&section.console_level);
            let file_level = if router.default.is_some() {
                parse_tracing_level(&section.file_level)
            } else {
                None
            };

            // Each arm builds its layers in place so they are typed for the
            // exact subscriber stack they land on.
            match (console_level, file_level) {
                (Some(cl), Some(fl)) => {
                    let _ = registry
                        .with(default_console_layer(ansi, crate_names, cl))
                        .with(default_file_layer(router, crate_names, fl))
                        .try_init();
                }
                (Some(cl), None) => {
                    let _ = registry
                        .with(default_console_layer(ansi, crate_names, cl))
                        .try_init();
                }
                (None, Some(fl)) => {
                    let _ = registry
                        .with(default_file_layer(router, crate_names, fl))
                        .try_init();
                }
                (None, None) => {
                    let _ = registry.try_init();
                }
            }
        }
        None => {
            let _ = registry.try_init();
        }
    }
}

// =================== tests ===================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_logging_config;
    use tempfile::tempdir;

    #[test]
    fn level_parsing() {
        assert_eq!(parse_tracing_level("trace"), Some(Level::TRACE));
        assert_eq!(parse_tracing_level("DEBUG"), Some(Level::DEBUG));
        assert_eq!(parse_tracing_level("Info"), Some(Level::INFO));
        assert_eq!(parse_tracing_level("warn"), Some(Level::WARN));
        assert_eq!(parse_tracing_level("ERROR"), Some(Level::ERROR));
        assert_eq!(parse_tracing_level("off"), None);
        assert_eq!(parse_tracing_level("none"), None);
        assert_eq!(parse_tracing_level("invalid"), Some(Level::INFO));
    }

    #[test]
    fn crate_prefix_matching() {
        assert!(matches_crate_prefix("notifications", "notifications"));
        assert!(matches_crate_prefix("notifications::scanner", "notifications"));
        assert!(!matches_crate_prefix("notifications_ext", "notifications"));
        assert!(!matches_crate_prefix("roster", "notifications"));
    }

    #[test]
    fn log_paths_resolved_against_base_dir() {
        let tmp = tempdir().unwrap();
        let resolved = resolve_log_path("logs/test.log", tmp.path());
        assert!(resolved.starts_with(tmp.path()));
        assert!(resolved.ends_with("logs/test.log"));
    }

    #[test]
    fn rotating_writer_creates_parent_dirs() {
        let tmp = tempdir().unwrap();
        let p = tmp.path().join("nested/dir/app.log");
        assert!(rotating_writer(&p, 128 * 1024).is_ok());
        assert!(p.parent().unwrap().exists());
    }

    fn section(console_level: &str, file: &str, file_level: &str) -> Section {
        Section {
            console_level: console_level.to_string(),
            file: file.to_string(),
            file_level: file_level.to_string(),
            max_size_mb: Some(1),
        }
    }

    #[test]
    fn init_with_default_and_subsystem_files() {
        let tmp = tempdir().unwrap();
        let mut cfg = LoggingConfig::new();
        cfg.insert("default".to_string(), section("off", "logs/app.log", "debug"));
        cfg.insert(
            "notifications".to_string(),
            section("off", "logs/notifications.log", "trace"),
        );

        // Only one global subscriber can win across the test binary; the
        // point here is that layer assembly itself is sound.
        init_logging_from_config(&cfg, tmp.path());

        assert!(tmp.path().join("logs").exists());
    }

    #[test]
    fn init_with_console_only_config() {
        let tmp = tempdir().unwrap();
        let mut cfg = LoggingConfig::new();
        cfg.insert("default".to_string(), section("info", "", ""));
        cfg.insert("roster".to_string(), section("debug", "", ""));

        init_logging_from_config(&cfg, tmp.path());
    }

    #[test]
    fn default_config_has_catch_all_section() {
        let cfg = default_logging_config();
        assert!(cfg.contains_key("default"));
        assert_eq!(cfg["default"].file, "logs/club-server.log");
    }
}
