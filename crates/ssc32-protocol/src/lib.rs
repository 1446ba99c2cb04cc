//! # SSC-32U Protocol
//!
//! 舵机控制器与外部传输层之间交换的消息定义（无硬件依赖）
//!
//! ## 模块
//!
//! - `constants`: 脉宽常量定义
//! - `command`: 舵机命令、命令组、离散输出
//! - `trajectory`: 关节轨迹命令
//! - `state`: 关节状态与脉宽查询
//!
//! 本 crate 只描述数据，不包含任何换算逻辑。角度与脉宽之间的换算见
//! `ssc32-calibration`。

pub mod command;
pub mod constants;
pub mod state;
pub mod trajectory;

// 重新导出常用类型
pub use command::*;
pub use constants::*;
pub use state::*;
pub use trajectory::*;

use thiserror::Error;

/// 舵机通道号
///
/// SSC-32U 有 32 个通道，但协议层不限制上界。
pub type Channel = u32;

/// 协议错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// 脉宽查询的响应数量与请求的通道数量不一致
    #[error("Pulse width reading count mismatch: expected {expected}, got {actual}")]
    ReadingCountMismatch { expected: usize, actual: usize },

    /// 非法的离散输出电平
    #[error("Invalid output level: {0}")]
    InvalidOutputLevel(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_display() {
        let err = ProtocolError::ReadingCountMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "Pulse width reading count mismatch: expected 3, got 2"
        );

        let err = ProtocolError::InvalidOutputLevel(7);
        assert_eq!(err.to_string(), "Invalid output level: 7");
    }
}
