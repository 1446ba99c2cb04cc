//! 轨迹命令处理
//!
//! 把一条关节轨迹命令换算成一个舵机命令组。按路点顺序、再按关节名顺序
//! 逐个处理 (路点, 关节) 对；任意一对失败，整条命令被拒绝，不产出任何
//! 部分结果。多个条目同时非法时，报告的是遇到的第一个。

use crate::error::ControllerError;
use ssc32_calibration::{JointRegistry, Rad};
use ssc32_protocol::{JointTrajectory, ServoCommandGroup, TrajectoryPoint};

/// 处理轨迹命令
///
/// 每个 (路点, 关节) 对产生一个 [`ServoCommand`](ssc32_protocol::ServoCommand)，
/// 命令组里的顺序与遍历顺序一致。没有路点的轨迹得到空命令组。
///
/// # 错误
///
/// - 关节名不在标定表中：[`CalibrationError::UnknownJoint`](ssc32_calibration::CalibrationError::UnknownJoint)
/// - 指令角超出限位：[`CalibrationError::OutOfRangeAngle`](ssc32_calibration::CalibrationError::OutOfRangeAngle)
/// - 路点缺少某个关节的位置：[`ControllerError::MissingPosition`]
pub fn process(
    joint_names: &[String],
    points: &[TrajectoryPoint],
    registry: &JointRegistry,
) -> Result<ServoCommandGroup, ControllerError> {
    let mut group = ServoCommandGroup::new();

    for (point_index, point) in points.iter().enumerate() {
        for (joint_index, name) in joint_names.iter().enumerate() {
            let joint = registry.lookup(name)?;

            let position =
                point
                    .positions
                    .get(joint_index)
                    .copied()
                    .ok_or_else(|| ControllerError::MissingPosition {
                        point: point_index,
                        joint: name.clone(),
                        available: point.positions.len(),
                    })?;

            let command = joint.command(Rad(position), point.velocity(joint_index))?;
            group.push(command);
        }
    }

    Ok(group)
}

/// 处理整条轨迹消息，见 [`process`]
#[inline]
pub fn process_trajectory(
    trajectory: &JointTrajectory,
    registry: &JointRegistry,
) -> Result<ServoCommandGroup, ControllerError> {
    process(&trajectory.joint_names, &trajectory.points, registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssc32_calibration::{CalibrationError, JointCalibration};
    use ssc32_protocol::PULSE_UNITS_PER_RAD;

    fn registry() -> JointRegistry {
        JointRegistry::new([
            JointCalibration::new("shoulder", 0, Rad(-1.57), Rad(1.57)),
            JointCalibration::new("elbow", 1, Rad(-1.57), Rad(1.57)).inverted(true),
            JointCalibration::new("wrist", 2, Rad(-0.5), Rad(0.5)),
        ])
        .unwrap()
    }

    #[test]
    fn test_single_point() {
        let traj = JointTrajectory::new(["shoulder", "elbow"])
            .point(TrajectoryPoint::positions([0.0, 0.5]));

        let group = process_trajectory(&traj, &registry()).unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(group.commands[0].channel, 0);
        assert_eq!(group.commands[0].pulse_width, 1500);
        assert_eq!(group.commands[1].channel, 1);
        assert_eq!(group.commands[1].pulse_width, 1182);
    }

    #[test]
    fn test_multiple_points_preserve_order() {
        let traj = JointTrajectory::new(["wrist", "shoulder"])
            .point(TrajectoryPoint::positions([0.0, 0.0]))
            .point(TrajectoryPoint::positions([0.1, -0.5]));

        let group = process_trajectory(&traj, &registry()).unwrap();
        let channels: Vec<_> = group.iter().map(|c| c.channel).collect();
        assert_eq!(channels, vec![2, 0, 2, 0]);
        assert_eq!(group.commands[3].pulse_width, 1182);
    }

    #[test]
    fn test_unknown_joint_rejects_whole_batch() {
        let traj = JointTrajectory::new(["shoulder", "gripper"])
            .point(TrajectoryPoint::positions([0.0, 0.0]));

        match process_trajectory(&traj, &registry()) {
            Err(ControllerError::Calibration(CalibrationError::UnknownJoint { name })) => {
                assert_eq!(name, "gripper");
            },
            other => panic!("Expected UnknownJoint, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_in_later_point_rejects_everything() {
        let traj = JointTrajectory::new(["shoulder", "wrist"])
            .point(TrajectoryPoint::positions([0.0, 0.0]))
            .point(TrajectoryPoint::positions([0.0, 0.6]));

        match process_trajectory(&traj, &registry()) {
            Err(ControllerError::Calibration(CalibrationError::OutOfRangeAngle {
                joint,
                angle,
                ..
            })) => {
                assert_eq!(joint, "wrist");
                assert_eq!(angle, Rad(0.6));
            },
            other => panic!("Expected OutOfRangeAngle, got {:?}", other),
        }
    }

    #[test]
    fn test_first_error_is_reported() {
        // 第一个路点的 wrist 越界先于第二个路点的未知关节
        let traj = JointTrajectory::new(["wrist"])
            .point(TrajectoryPoint::positions([1.0]))
            .point(TrajectoryPoint::positions([0.0]));
        let err = process_trajectory(&traj, &registry()).unwrap_err();
        assert!(matches!(
            err,
            ControllerError::Calibration(CalibrationError::OutOfRangeAngle { .. })
        ));
    }

    #[test]
    fn test_missing_position() {
        let traj = JointTrajectory::new(["shoulder", "elbow"])
            .point(TrajectoryPoint::positions([0.0]));

        match process_trajectory(&traj, &registry()) {
            Err(ControllerError::MissingPosition {
                point,
                joint,
                available,
            }) => {
                assert_eq!(point, 0);
                assert_eq!(joint, "elbow");
                assert_eq!(available, 1);
            },
            other => panic!("Expected MissingPosition, got {:?}", other),
        }
    }

    #[test]
    fn test_speed_only_for_positive_velocity() {
        let traj = JointTrajectory::new(["shoulder", "elbow", "wrist"])
            .point(TrajectoryPoint::positions([0.0, 0.0, 0.0]).with_velocities([2.0, 0.0]));

        let group = process_trajectory(&traj, &registry()).unwrap();
        assert!((group.commands[0].speed.unwrap() - 2.0 * PULSE_UNITS_PER_RAD).abs() < 1e-9);
        assert_eq!(group.commands[1].speed, None);
        // 速度数组比关节名短
        assert_eq!(group.commands[2].speed, None);
    }

    #[test]
    fn test_no_points_yields_empty_group() {
        let traj = JointTrajectory::new(["gripper"]);
        let group = process_trajectory(&traj, &registry()).unwrap();
        assert!(group.is_empty());
    }
}
