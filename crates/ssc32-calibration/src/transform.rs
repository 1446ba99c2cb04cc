//! 角度 ↔ 脉宽换算
//!
//! 正向（指令）流水线：
//!
//! ```text
//! angle ─校验限位─▶ scale·(angle − offset) + 1500 ─半数进位─▶ 限幅 [500, 2500] ─反向?─▶ pw
//! ```
//!
//! 逆向（反馈）流水线：
//!
//! ```text
//! pw ─反向?─▶ (pw − 1500) / scale + offset ─▶ angle
//! ```
//!
//! 正向先限幅再镜像；逆向先撤销镜像再换算。关节限位校验失败直接拒绝，
//! 而执行器硬限位只限幅不拒绝：较大的零偏可能让合法角度落到硬限位之外，
//! 此时指令位置会被截到边界。
//!
//! 所有函数都是纯函数，可以在任意线程并发调用。

use crate::error::CalibrationError;
use crate::joint::JointCalibration;
use crate::pulse::{clamp_pulse_width, invert_pulse_width, round_half_up};
use crate::units::Rad;
use ssc32_protocol::{PULSE_UNITS_PER_RAD, PULSE_WIDTH_CENTER, PULSE_WIDTH_REFLECT_SUM, ServoCommand};

/// 角度 → 脉宽
///
/// # 错误
///
/// 角度不在 `[min_angle, max_angle]` 内（含 NaN）时返回
/// [`CalibrationError::OutOfRangeAngle`]。
///
/// # 示例
///
/// ```rust
/// use ssc32_calibration::{JointCalibration, Rad, transform};
///
/// let shoulder = JointCalibration::new("shoulder", 0, Rad(-1.57), Rad(1.57));
/// assert_eq!(transform::angle_to_pulse_width(Rad(0.0), &shoulder).unwrap(), 1500);
/// assert_eq!(transform::angle_to_pulse_width(Rad(0.5), &shoulder).unwrap(), 1818);
/// assert!(transform::angle_to_pulse_width(Rad(1.6), &shoulder).is_err());
/// ```
pub fn angle_to_pulse_width(angle: Rad, calib: &JointCalibration) -> Result<u16, CalibrationError> {
    calib.validate(angle)?;

    let raw = PULSE_UNITS_PER_RAD * (angle - calib.offset_angle).value()
        + f64::from(PULSE_WIDTH_CENTER);
    let rounded = round_half_up(raw);
    let clamped = clamp_pulse_width(rounded);

    if i64::from(clamped) != rounded {
        tracing::debug!(
            joint = %calib.name,
            %angle,
            raw = rounded,
            clamped,
            "pulse width clamped to actuator limits"
        );
    }

    if calib.invert {
        Ok(invert_pulse_width(clamped))
    } else {
        Ok(clamped)
    }
}

/// 关节速度（rad/s）→ 舵机速度（µs/s）
///
/// 只有严格为正的速度才会生成速度字段；0、负数、NaN 和缺省都返回 `None`，
/// 表示不覆盖执行器的速度限制。
#[inline]
pub fn velocity_to_speed(velocity: Option<f64>) -> Option<f64> {
    velocity
        .filter(|v| *v > 0.0)
        .map(|v| PULSE_UNITS_PER_RAD * v)
}

/// 角度（及可选速度）→ 舵机命令
pub fn servo_command(
    angle: Rad,
    velocity: Option<f64>,
    calib: &JointCalibration,
) -> Result<ServoCommand, CalibrationError> {
    let pulse_width = angle_to_pulse_width(angle, calib)?;
    Ok(ServoCommand::new(calib.channel, pulse_width).with_speed(velocity_to_speed(velocity)))
}

/// 脉宽读数 → 角度
///
/// 不做限幅也不做限位校验：这是上报感知到的状态，异常读数只会得到超出
/// 名义限位的角度。调用方负责过滤非正读数（"无读数"）。
pub fn pulse_width_to_angle(pulse_width: i32, calib: &JointCalibration) -> Rad {
    let pw = if calib.invert {
        i32::from(PULSE_WIDTH_REFLECT_SUM) - pulse_width
    } else {
        pulse_width
    };

    Rad((f64::from(pw) - f64::from(PULSE_WIDTH_CENTER)) / PULSE_UNITS_PER_RAD) + calib.offset_angle
}
