//! 关节标定记录
//!
//! 每个命名关节一条记录：通道、限位、机械零偏、是否反向，以及供外部初始化
//! 逻辑使用的默认姿态。记录在启动时构造，之后只读。

use crate::error::CalibrationError;
use crate::transform;
use crate::units::Rad;
use serde::{Deserialize, Serialize};
use ssc32_protocol::{Channel, ServoCommand};

/// 关节标定记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointCalibration {
    /// 关节名（标定表中唯一）
    pub name: String,

    /// 执行器通道
    pub channel: Channel,

    /// 关节下限（rad）
    pub min_angle: Rad,

    /// 关节上限（rad）
    ///
    /// 不检查 `min_angle <= max_angle`；若写反，所有角度都会被拒绝。
    pub max_angle: Rad,

    /// 机械零偏（rad）
    pub offset_angle: Rad,

    /// 是否需要关于中位镜像脉宽
    pub invert: bool,

    /// 启动默认角（rad）
    pub default_angle: Option<Rad>,

    /// 启动时是否移动到默认角
    pub initialize: bool,
}

impl JointCalibration {
    /// 创建标定记录（零偏 0，不反向，无默认姿态）
    pub fn new(name: impl Into<String>, channel: Channel, min_angle: Rad, max_angle: Rad) -> Self {
        Self {
            name: name.into(),
            channel,
            min_angle,
            max_angle,
            offset_angle: Rad::ZERO,
            invert: false,
            default_angle: None,
            initialize: false,
        }
    }

    /// 设置机械零偏
    pub fn with_offset(mut self, offset_angle: Rad) -> Self {
        self.offset_angle = offset_angle;
        self
    }

    /// 设置是否反向
    pub fn inverted(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// 设置启动默认姿态
    pub fn with_default_angle(mut self, default_angle: Rad, initialize: bool) -> Self {
        self.default_angle = Some(default_angle);
        self.initialize = initialize;
        self
    }

    /// 角度是否在 `[min_angle, max_angle]` 内（闭区间）
    ///
    /// NaN 永远不在范围内。
    #[inline]
    pub fn accepts(&self, angle: Rad) -> bool {
        angle >= self.min_angle && angle <= self.max_angle
    }

    /// 校验角度
    ///
    /// # 错误
    ///
    /// 超出限位时返回 [`CalibrationError::OutOfRangeAngle`]。
    pub fn validate(&self, angle: Rad) -> Result<(), CalibrationError> {
        if self.accepts(angle) {
            Ok(())
        } else {
            Err(CalibrationError::OutOfRangeAngle {
                joint: self.name.clone(),
                angle,
                min: self.min_angle,
                max: self.max_angle,
            })
        }
    }

    /// 限位是否写反
    pub fn has_inverted_limits(&self) -> bool {
        self.min_angle > self.max_angle
    }

    /// 角度 → 脉宽，见 [`transform::angle_to_pulse_width`]
    #[inline]
    pub fn pulse_width(&self, angle: Rad) -> Result<u16, CalibrationError> {
        transform::angle_to_pulse_width(angle, self)
    }

    /// 角度（及可选速度）→ 舵机命令，见 [`transform::servo_command`]
    #[inline]
    pub fn command(&self, angle: Rad, velocity: Option<f64>) -> Result<ServoCommand, CalibrationError> {
        transform::servo_command(angle, velocity, self)
    }

    /// 脉宽读数 → 角度，见 [`transform::pulse_width_to_angle`]
    #[inline]
    pub fn angle(&self, pulse_width: i32) -> Rad {
        transform::pulse_width_to_angle(pulse_width, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shoulder() -> JointCalibration {
        JointCalibration::new("shoulder", 0, Rad(-1.57), Rad(1.57))
    }

    #[test]
    fn test_new_defaults() {
        let joint = shoulder();
        assert_eq!(joint.offset_angle, Rad::ZERO);
        assert!(!joint.invert);
        assert_eq!(joint.default_angle, None);
        assert!(!joint.initialize);
    }

    #[test]
    fn test_validate_inclusive_bounds() {
        let joint = shoulder();
        assert!(joint.validate(Rad(-1.57)).is_ok());
        assert!(joint.validate(Rad(1.57)).is_ok());
        assert!(joint.validate(Rad(0.0)).is_ok());
    }

    #[test]
    fn test_validate_epsilon_outside() {
        let joint = shoulder();
        let eps = 1e-9;

        match joint.validate(Rad(1.57 + eps)) {
            Err(CalibrationError::OutOfRangeAngle { joint, min, max, .. }) => {
                assert_eq!(joint, "shoulder");
                assert_eq!(min, Rad(-1.57));
                assert_eq!(max, Rad(1.57));
            },
            other => panic!("Expected OutOfRangeAngle, got {:?}", other),
        }
        assert!(joint.validate(Rad(-1.57 - eps)).is_err());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let joint = shoulder();
        assert!(!joint.accepts(Rad(f64::NAN)));
        assert!(joint.validate(Rad(f64::NAN)).is_err());
    }

    #[test]
    fn test_inverted_limits_reject_everything() {
        let joint = JointCalibration::new("broken", 1, Rad(1.0), Rad(-1.0));
        assert!(joint.has_inverted_limits());
        assert!(joint.validate(Rad(0.0)).is_err());
        assert!(joint.validate(Rad(1.0)).is_err());
        assert!(joint.validate(Rad(-1.0)).is_err());
    }

    #[test]
    fn test_builder_chain() {
        let joint = shoulder()
            .with_offset(Rad(0.1))
            .inverted(true)
            .with_default_angle(Rad(0.2), true);
        assert_eq!(joint.offset_angle, Rad(0.1));
        assert!(joint.invert);
        assert_eq!(joint.default_angle, Some(Rad(0.2)));
        assert!(joint.initialize);
    }
}
