use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::services::scroll_stabilizer::StabilizerConfig;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "zhihu_export.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 浏览器调试端口；设置后连接已运行的浏览器，否则自行启动
    pub browser_debug_port: Option<u16>,
    /// 浏览器用户数据目录（保存登录状态）
    pub profile_dir: PathBuf,
    /// 浏览器启动后打开的页面
    pub start_url: String,
    /// 页面快照文件
    pub snapshot_file: PathBuf,
    /// 导出文件
    pub output_file: PathBuf,
    /// 是否按时间排序（最新在前）
    pub sort_by_time: bool,
    /// 最大滚动次数
    pub max_iterations: u32,
    /// 每次滚动后的等待时间（毫秒）
    pub settle_interval_ms: u64,
    /// 高度无变化多久后尝试回滚（秒）
    pub stall_threshold_secs: u64,
    /// 回滚后仍无变化多久后停止（秒）
    pub abort_threshold_secs: u64,
    /// 滚到底部后回退的像素
    pub retreat_offset_px: u32,
    /// 回滚比例（相对视口高度）
    pub nudge_fraction: f64,
    /// 点击"查看全部"前后的等待时间（毫秒）
    pub expand_settle_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        let home = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            browser_debug_port: None,
            profile_dir: home.join(".zhihu_scraper_profile"),
            start_url: "https://www.zhihu.com/".to_string(),
            snapshot_file: PathBuf::from("zhihu_page.html"),
            output_file: PathBuf::from("answers.txt"),
            sort_by_time: true,
            max_iterations: 200,
            settle_interval_ms: 400,
            stall_threshold_secs: 5,
            abort_threshold_secs: 10,
            retreat_offset_px: 200,
            nudge_fraction: 0.5,
            expand_settle_ms: 2000,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 读取 TOML 配置文件（不存在时使用默认值），再用环境变量覆盖
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let base = if path.exists() {
            let content =
                std::fs::read_to_string(path).map_err(|e| AppError::file(path.display().to_string(), e))?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        Ok(base.with_env_overrides())
    }

    fn with_env_overrides(self) -> Self {
        Self {
            browser_debug_port: env_parse("BROWSER_DEBUG_PORT").or(self.browser_debug_port),
            profile_dir: std::env::var("PROFILE_DIR").map(PathBuf::from).unwrap_or(self.profile_dir),
            start_url: std::env::var("START_URL").unwrap_or(self.start_url),
            snapshot_file: std::env::var("SNAPSHOT_FILE").map(PathBuf::from).unwrap_or(self.snapshot_file),
            output_file: std::env::var("OUTPUT_FILE").map(PathBuf::from).unwrap_or(self.output_file),
            sort_by_time: env_parse("SORT_BY_TIME").unwrap_or(self.sort_by_time),
            max_iterations: env_parse("MAX_ITERATIONS").unwrap_or(self.max_iterations),
            settle_interval_ms: env_parse("SETTLE_INTERVAL_MS").unwrap_or(self.settle_interval_ms),
            stall_threshold_secs: env_parse("STALL_THRESHOLD_SECS").unwrap_or(self.stall_threshold_secs),
            abort_threshold_secs: env_parse("ABORT_THRESHOLD_SECS").unwrap_or(self.abort_threshold_secs),
            retreat_offset_px: env_parse("RETREAT_OFFSET_PX").unwrap_or(self.retreat_offset_px),
            nudge_fraction: env_parse("NUDGE_FRACTION").unwrap_or(self.nudge_fraction),
            expand_settle_ms: env_parse("EXPAND_SETTLE_MS").unwrap_or(self.expand_settle_ms),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
        }
    }

    /// 滚动稳定器使用的参数
    pub fn stabilizer(&self) -> StabilizerConfig {
        StabilizerConfig {
            max_iterations: self.max_iterations,
            settle_interval: Duration::from_millis(self.settle_interval_ms),
            stall_threshold: Duration::from_secs(self.stall_threshold_secs),
            abort_threshold: Duration::from_secs(self.abort_threshold_secs),
            retreat_offset_px: self.retreat_offset_px,
            nudge_fraction: self.nudge_fraction,
            expand_settle: Duration::from_millis(self.expand_settle_ms),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = Config::default();
        let stabilizer = config.stabilizer();
        assert_eq!(stabilizer.max_iterations, 200);
        assert_eq!(stabilizer.stall_threshold, Duration::from_secs(5));
        assert_eq!(stabilizer.abort_threshold, Duration::from_secs(10));
        assert_eq!(stabilizer.settle_interval, Duration::from_millis(400));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("max_iterations = 50\nsort_by_time = false\n").unwrap();
        assert_eq!(config.max_iterations, 50);
        assert!(!config.sort_by_time);
        assert_eq!(config.output_file, PathBuf::from("answers.txt"));
        assert_eq!(config.abort_threshold_secs, 10);
    }

    #[test]
    fn test_missing_config_file_falls_back_to_defaults() {
        let config = Config::load(Some(Path::new("definitely-missing-config.toml"))).unwrap();
        assert_eq!(config.snapshot_file, PathBuf::from("zhihu_page.html"));
    }
}
