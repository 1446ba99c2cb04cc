//! 标定层错误类型定义

use crate::units::Rad;
use thiserror::Error;

/// 标定层错误类型
///
/// 所有错误都是局部、同步的，由调用方决定记录、丢弃还是上报。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// 关节不在标定表中
    #[error("Joint [{name}] does not exist")]
    UnknownJoint { name: String },

    /// 指令角超出关节限位
    #[error("The given position [{angle}] for joint [{joint}] is invalid (limits [{min}, {max}])")]
    OutOfRangeAngle {
        joint: String,
        angle: Rad,
        min: Rad,
        max: Rad,
    },

    /// 标定表中出现重复的关节名
    #[error("Duplicate joint [{name}] in calibration table")]
    DuplicateJoint { name: String },

    /// 关节表无法解析
    #[error("Invalid joint table: {0}")]
    InvalidTable(String),
}

impl From<toml::de::Error> for CalibrationError {
    fn from(err: toml::de::Error) -> Self {
        CalibrationError::InvalidTable(err.to_string())
    }
}
