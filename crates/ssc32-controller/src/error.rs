//! 控制器错误类型定义

use ssc32_calibration::CalibrationError;
use ssc32_protocol::ProtocolError;
use std::path::PathBuf;
use thiserror::Error;

/// 传输层错误
///
/// 传输层是外部协作者，这里只定义控制器需要区分的几种失败。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// 传输通道已关闭
    #[error("Transport closed")]
    Closed,

    /// 请求/响应超时
    #[error("Transport timeout")]
    Timeout,

    /// 对端拒绝了消息
    #[error("Transport rejected message: {0}")]
    Rejected(String),
}

/// 控制器错误类型
#[derive(Error, Debug)]
pub enum ControllerError {
    /// 标定错误（未知关节、角度越界）
    #[error("Calibration error: {0}")]
    Calibration(#[from] CalibrationError),

    /// 协议错误（查询响应不对齐等）
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// 传输层错误
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// 路点的位置数组比关节名数组短
    #[error("Trajectory point {point} has no position for joint [{joint}] ({available} positions given)")]
    MissingPosition {
        point: usize,
        joint: String,
        available: usize,
    },

    /// 配置文件读取失败
    #[error("Failed to read config {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 配置文件内容非法
    #[error("Invalid config: {0}")]
    Config(String),

    /// 后台线程启动失败
    #[error("Failed to spawn thread: {0}")]
    Spawn(#[from] std::io::Error),
}

impl From<toml::de::Error> for ControllerError {
    fn from(err: toml::de::Error) -> Self {
        ControllerError::Config(err.to_string())
    }
}
