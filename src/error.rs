use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 运行前置条件不满足（例如浏览器尚未启动）
    #[error("状态错误: {0}")]
    InvalidState(String),

    /// 输入文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },

    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),

    /// 文件读写错误
    #[error("文件错误 ({path}): {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSS 选择器解析失败
    #[error("无效的选择器 '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed {
        port: u16,
        #[source]
        source: chromiumoxide::error::CdpError,
    },

    /// 启动浏览器失败
    #[error("启动浏览器失败: {0}")]
    LaunchFailed(String),

    /// 执行命令失败（脚本、查找元素、点击等）
    #[error("执行浏览器命令失败: {0}")]
    CommandFailed(#[from] chromiumoxide::error::CdpError),

    /// 脚本返回值无法解析
    #[error("脚本返回值解析失败: {0}")]
    BadScriptValue(#[from] serde_json::Error),
}

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(BrowserError::CommandFailed(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Browser(BrowserError::BadScriptValue(err))
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File {
            path: String::new(),
            source: err,
        }
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建状态错误
    pub fn invalid_state(message: impl Into<String>) -> Self {
        AppError::InvalidState(message.into())
    }

    /// 创建文件不存在错误
    pub fn not_found(path: impl Into<String>) -> Self {
        AppError::NotFound { path: path.into() }
    }

    /// 创建带路径的文件错误
    pub fn file(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File {
            path: path.into(),
            source,
        }
    }

    /// 创建选择器解析错误
    pub fn selector(selector: impl Into<String>, message: impl std::fmt::Display) -> Self {
        AppError::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// 创建浏览器连接错误
    pub fn browser_connection_failed(port: u16, source: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(BrowserError::ConnectionFailed { port, source })
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
