use crate::{LogBuffer, LogLevel, ScanState};

pub const START_LABEL: &str = "一键获取链接";
pub const START_LABEL_BUSY: &str = "扫描中...";
pub const EMPTY_LOG_PLACEHOLDER: &str = "点击按钮开始扫描";

const STATUS_READY: &str = "准备就绪";
const STATUS_SCANNING: &str = "扫描中...";
const STATUS_FOUND: &str = "✓ 链接已复制";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusTone {
    #[default]
    Neutral,
    Busy,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusView {
    pub text: String,
    pub tone: StatusTone,
    /// The discovered link, shown only after a successful scan.
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLineView {
    pub text: String,
    pub level: LogLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub scan: ScanState,
    pub start_label: &'static str,
    pub start_enabled: bool,
    pub logs: Vec<LogLineView>,
    /// Shown in the log area while there is nothing to list.
    pub placeholder: Option<&'static str>,
    pub status: StatusView,
    pub dirty: bool,
}

impl AppViewModel {
    pub(crate) fn from_state(scan: &ScanState, logs: &LogBuffer, dirty: bool) -> Self {
        let scanning = matches!(scan, ScanState::Scanning);
        let status = match scan {
            ScanState::Scanning => StatusView {
                text: STATUS_SCANNING.to_string(),
                tone: StatusTone::Busy,
                url: None,
            },
            ScanState::Succeeded { url } => StatusView {
                text: STATUS_FOUND.to_string(),
                tone: StatusTone::Success,
                url: Some(url.clone()),
            },
            // Failures are explained in the log area; the status line goes back to ready.
            ScanState::Idle | ScanState::Failed => StatusView {
                text: STATUS_READY.to_string(),
                tone: StatusTone::Neutral,
                url: None,
            },
        };

        Self {
            scan: scan.clone(),
            start_label: if scanning { START_LABEL_BUSY } else { START_LABEL },
            start_enabled: !scanning,
            logs: logs
                .iter()
                .map(|entry| LogLineView {
                    text: entry.text().to_string(),
                    level: entry.level(),
                })
                .collect(),
            placeholder: logs.is_empty().then_some(EMPTY_LOG_PLACEHOLDER),
            status,
            dirty,
        }
    }
}
