/// Guidance appended when a scan completes without finding a link.
pub const NOT_FOUND_GUIDANCE: &str =
    "❌ 未找到有效的抽卡链接。请确认：\n1. 已打开过游戏内的【抽卡历史记录】\n2. 翻阅了几页记录以生成日志";

/// Log line for a scan command that could not run at all.
pub fn request_failed_message(description: &str) -> String {
    format!("❌ 发生错误: {description}")
}

/// Result of one scan command.
///
/// `NotFound` means the scan ran and found nothing; `Failed` means the command
/// itself could not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Found(String),
    NotFound,
    Failed(String),
}

impl ScanOutcome {
    /// Collapses the command's response into a single outcome. Blank URLs count
    /// as no result.
    pub fn from_response<E: std::fmt::Display>(response: Result<Option<String>, E>) -> Self {
        match response {
            Ok(Some(url)) if !url.trim().is_empty() => ScanOutcome::Found(url),
            Ok(_) => ScanOutcome::NotFound,
            Err(err) => ScanOutcome::Failed(err.to_string()),
        }
    }
}
