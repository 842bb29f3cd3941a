use std::time::Duration;

pub const TITLE: &str = "爱弥斯抽卡助手";
pub const SUBTITLE: &str = "鸣潮抽卡记录导出工具";
pub const HELP_TEXT: &str = "Enter/s 开始扫描 • q/Esc 关闭";
pub const LOG_TITLE: &str = "日志";
pub const STATUS_TITLE: &str = "状态";

/// How long the event loop waits for input before draining messages again.
pub const POLL_INTERVAL: Duration = Duration::from_millis(75);

pub const HEADER_HEIGHT: u16 = 2;
pub const BUTTON_HEIGHT: u16 = 3;
pub const LOG_MIN_HEIGHT: u16 = 6;
pub const STATUS_MIN_HEIGHT: u16 = 4;
pub const HELP_HEIGHT: u16 = 1;
