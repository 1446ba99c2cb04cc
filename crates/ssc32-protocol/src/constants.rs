//! 脉宽相关常量定义
//!
//! 集中定义所有执行器相关的常量，避免在代码中散落"魔法数"。

/// 执行器可接受的最小脉宽（µs）
pub const PULSE_WIDTH_MIN: u16 = 500;

/// 执行器可接受的最大脉宽（µs）
pub const PULSE_WIDTH_MAX: u16 = 2500;

/// 中位脉宽（µs），对应机械零位
pub const PULSE_WIDTH_CENTER: u16 = 1500;

/// 脉宽镜像和
///
/// 反向舵机的脉宽按 `PULSE_WIDTH_REFLECT_SUM - pw` 关于中位镜像，
/// 即 `PULSE_WIDTH_MIN + PULSE_WIDTH_MAX`。
pub const PULSE_WIDTH_REFLECT_SUM: u16 = PULSE_WIDTH_MIN + PULSE_WIDTH_MAX;

/// 每弧度对应的脉宽单位数
///
/// π 弧度映射到 2000 µs 的脉宽跨度。
pub const PULSE_UNITS_PER_RAD: f64 = 2000.0 / std::f64::consts::PI;
