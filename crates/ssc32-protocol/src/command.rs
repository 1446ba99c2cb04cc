//! 舵机命令定义
//!
//! 包含发送给执行器的脉宽命令、命令组（原子批次）以及离散输出指令。

use crate::{Channel, ProtocolError};

/// 单个舵机命令
///
/// 发布前 `pulse_width` 已经被限幅到 `[PULSE_WIDTH_MIN, PULSE_WIDTH_MAX]`，
/// 并已按需镜像。
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServoCommand {
    /// 执行器通道
    pub channel: Channel,

    /// 脉宽（µs）
    pub pulse_width: u16,

    /// 速度（µs/s）
    ///
    /// `None` 表示不覆盖执行器的速度限制，与 `Some(0.0)` 含义不同。
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub speed: Option<f64>,
}

impl ServoCommand {
    /// 创建不带速度的命令
    pub fn new(channel: Channel, pulse_width: u16) -> Self {
        Self {
            channel,
            pulse_width,
            speed: None,
        }
    }

    /// 附加速度
    pub fn with_speed(mut self, speed: Option<f64>) -> Self {
        self.speed = speed;
        self
    }
}

/// 舵机命令组
///
/// 一条轨迹命令对应一个命令组，整组要么全部发布，要么全部丢弃。
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServoCommandGroup {
    pub commands: Vec<ServoCommand>,
}

impl ServoCommandGroup {
    /// 创建空命令组
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加命令
    pub fn push(&mut self, command: ServoCommand) {
        self.commands.push(command);
    }

    /// 命令数量
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ServoCommand> {
        self.commands.iter()
    }
}

impl FromIterator<ServoCommand> for ServoCommandGroup {
    fn from_iter<I: IntoIterator<Item = ServoCommand>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ServoCommandGroup {
    type Item = ServoCommand;
    type IntoIter = std::vec::IntoIter<ServoCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

/// 离散输出电平
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutputLevel {
    /// 低电平（放松舵机）
    Low = 0,
    /// 高电平
    High = 1,
}

impl TryFrom<u8> for OutputLevel {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(OutputLevel::Low),
            1 => Ok(OutputLevel::High),
            _ => Err(ProtocolError::InvalidOutputLevel(value)),
        }
    }
}

impl From<OutputLevel> for u8 {
    fn from(level: OutputLevel) -> Self {
        level as u8
    }
}

/// 离散输出指令
///
/// 把通道当作数字 IO 使用；拉低时舵机失去保持力。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscreteOutput {
    pub channel: Channel,
    pub level: OutputLevel,
}

impl DiscreteOutput {
    /// 拉低指定通道
    pub fn low(channel: Channel) -> Self {
        Self {
            channel,
            level: OutputLevel::Low,
        }
    }

    /// 拉高指定通道
    pub fn high(channel: Channel) -> Self {
        Self {
            channel,
            level: OutputLevel::High,
        }
    }
}
