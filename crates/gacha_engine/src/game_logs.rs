use std::collections::HashSet;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Duration, Local, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use scan_logging::{redact_url, scan_debug, scan_info, scan_warn};

use crate::{
    registry, LinkClipboard, LogSink, ScanResponse, ScanSettings, SystemClipboard, UrlScanner,
};

const GACHA_URL_PATTERN: &str = r"(https://aki-gm-resources(?:-oversea)?\.aki-game\.(?:net|com)/aki/gacha/index\.html#/record[^\s]*)";
const LINE_TIMESTAMP_PATTERN: &str = r"^\[(\d{4}\.\d{2}\.\d{2}-\d{2}\.\d{2}\.\d{2}):\d{3}\]";
const LINE_TIMESTAMP_FORMAT: &str = "%Y.%m.%d-%H.%M.%S";

static GACHA_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(GACHA_URL_PATTERN).expect("gacha url pattern compiles"));
static LINE_TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(LINE_TIMESTAMP_PATTERN).expect("timestamp pattern compiles"));

type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// A link found in one log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCandidate {
    pub url: String,
    pub timestamp: NaiveDateTime,
    pub source: PathBuf,
}

/// Returns the last gacha link in `contents`, with the timestamp prefix of the
/// line it was found on when that line has one.
pub fn find_latest_link(contents: &str) -> Option<(String, Option<NaiveDateTime>)> {
    contents.lines().fold(None, |latest, line| {
        match GACHA_URL.captures(line).and_then(|caps| caps.get(1)) {
            Some(url) => Some((url.as_str().to_string(), line_timestamp(line))),
            None => latest,
        }
    })
}

fn line_timestamp(line: &str) -> Option<NaiveDateTime> {
    let caps = LINE_TIMESTAMP.captures(line)?;
    NaiveDateTime::parse_from_str(caps.get(1)?.as_str(), LINE_TIMESTAMP_FORMAT).ok()
}

/// Finds the gacha record link in the game's client logs.
pub struct GameLogScanner {
    settings: ScanSettings,
    clock: Clock,
    clipboard: Arc<dyn LinkClipboard>,
}

impl fmt::Debug for GameLogScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameLogScanner")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl GameLogScanner {
    pub fn new(settings: ScanSettings) -> Self {
        Self {
            settings,
            clock: Arc::new(|| Local::now().naive_local()),
            clipboard: Arc::new(SystemClipboard),
        }
    }

    /// Replaces the wall clock used for the expiry check.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> NaiveDateTime + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// Replaces the clipboard the chosen link is copied to.
    pub fn with_clipboard<C>(mut self, clipboard: C) -> Self
    where
        C: LinkClipboard + 'static,
    {
        self.clipboard = Arc::new(clipboard);
        self
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// Directories to inspect, in order: configured install dirs, registry
    /// entries, then every root joined with the known install subpaths. The
    /// directories themselves are not checked for existence yet.
    pub async fn candidate_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = self.settings.install_dirs.clone();
        if self.settings.scan_registry {
            dirs.extend(registry_dirs().await);
        }

        let mut roots = self.settings.search_roots.clone();
        if self.settings.scan_drive_roots {
            roots.extend(drive_roots().await);
        }
        for root in &roots {
            dirs.extend(
                self.settings
                    .install_subpaths
                    .iter()
                    .map(|subpath| root.join(subpath)),
            );
        }
        dirs
    }

    fn is_excluded(&self, dir: &Path) -> bool {
        let path = dir.to_string_lossy().to_lowercase();
        self.settings
            .excluded_markers
            .iter()
            .any(|marker| path.contains(&marker.to_lowercase()))
    }

    async fn inspect_dir(&self, dir: &Path, sink: &dyn LogSink) -> Vec<LinkCandidate> {
        let mut announced = false;
        let mut found = Vec::new();

        for relative in &self.settings.log_files {
            let file = dir.join(relative);
            if !announced {
                if let Some(parent) = file.parent() {
                    if exists(parent).await {
                        sink.emit(&format!("🔎 发现潜在游戏目录: {}", dir.display()));
                        announced = true;
                    }
                }
            }

            let bytes = match tokio::fs::read(&file).await {
                Ok(bytes) => bytes,
                Err(err) if err.kind() == ErrorKind::NotFound => continue,
                Err(err) => {
                    scan_warn!("Could not read {:?}: {}", file, err);
                    continue;
                }
            };
            let contents = String::from_utf8_lossy(&bytes);
            let Some((url, stamp)) = find_latest_link(&contents) else {
                scan_debug!("No gacha link in {:?}", file);
                continue;
            };
            let timestamp = match stamp {
                Some(stamp) => stamp,
                None => modified_time(&file).await,
            };
            found.push(LinkCandidate {
                url,
                timestamp,
                source: file,
            });
        }
        found
    }
}

#[async_trait::async_trait]
impl UrlScanner for GameLogScanner {
    async fn scan(&self, sink: &dyn LogSink) -> ScanResponse {
        self.settings.validate()?;

        let mut checked: HashSet<PathBuf> = HashSet::new();
        let mut candidates = Vec::new();

        for dir in self.candidate_dirs().await {
            if self.is_excluded(&dir) {
                scan_debug!("Skipping excluded directory {:?}", dir);
                continue;
            }
            if !exists(&dir).await {
                continue;
            }
            let key = tokio::fs::canonicalize(&dir)
                .await
                .unwrap_or_else(|_| dir.clone());
            if !checked.insert(key) {
                continue;
            }
            candidates.extend(self.inspect_dir(&dir, sink).await);
        }

        // Newest first; the earliest-discovered candidate wins ties.
        candidates.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        let Some(newest) = candidates.into_iter().next() else {
            sink.emit(&format!(
                "⚠️ 已检查 {} 个游戏目录，未在日志中发现抽卡链接",
                checked.len()
            ));
            return Ok(None);
        };

        let expiry = self.settings.expiry_minutes;
        let age = (self.clock)().signed_duration_since(newest.timestamp);
        let expired = age > Duration::minutes(i64::from(expiry));
        if expired {
            sink.emit(&format!(
                "⚠️ 链接已过期 (生成于 {}，超过{}分钟)\n请在游戏中重新打开抽卡记录",
                newest.timestamp.format("%Y-%m-%d %H:%M"),
                expiry
            ));
        }

        // Expired links are copied too.
        match self.clipboard.copy(&newest.url) {
            Ok(()) if !expired => sink.emit("✅ 抽卡链接已找到并复制到剪贴板"),
            Ok(()) => {}
            Err(err) => {
                scan_warn!("Clipboard copy failed: {}", err);
                if !expired {
                    sink.emit("✅ 抽卡链接已找到");
                }
                sink.emit(&format!("⚠️ 复制失败: {err}"));
            }
        }

        scan_info!(
            "Selected gacha link from {:?}: {}",
            newest.source,
            redact_url(&newest.url)
        );
        Ok(Some(newest.url))
    }
}

async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

async fn modified_time(file: &Path) -> NaiveDateTime {
    match tokio::fs::metadata(file).await.and_then(|meta| meta.modified()) {
        Ok(modified) => DateTime::<Local>::from(modified).naive_local(),
        Err(err) => {
            scan_debug!("No modification time for {:?}: {}", file, err);
            DateTime::<Utc>::UNIX_EPOCH.naive_utc()
        }
    }
}

async fn drive_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    for drive in 'A'..='Z' {
        let root = PathBuf::from(format!("{drive}:/"));
        if exists(&root).await {
            roots.push(root);
        }
    }
    roots
}

async fn registry_dirs() -> Vec<PathBuf> {
    match tokio::task::spawn_blocking(registry::discover_install_dirs).await {
        Ok(dirs) => {
            scan_debug!("Registry lists {} game directories", dirs.len());
            dirs
        }
        Err(err) => {
            scan_warn!("Registry lookup did not complete: {}", err);
            Vec::new()
        }
    }
}
