//! 关节轨迹命令
//!
//! 一条轨迹命令由一组有序的关节名和若干路点组成。每个路点的
//! `positions`（必需）和 `velocities`（可选）按下标与 `joint_names` 对齐。

/// 轨迹路点
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectoryPoint {
    /// 目标位置（rad）
    pub positions: Vec<f64>,

    /// 目标速度（rad/s），可以比 `positions` 短或为空
    #[cfg_attr(feature = "serde", serde(default))]
    pub velocities: Vec<f64>,
}

impl TrajectoryPoint {
    /// 仅包含位置的路点
    pub fn positions(positions: impl Into<Vec<f64>>) -> Self {
        Self {
            positions: positions.into(),
            velocities: Vec::new(),
        }
    }

    /// 附加速度
    pub fn with_velocities(mut self, velocities: impl Into<Vec<f64>>) -> Self {
        self.velocities = velocities.into();
        self
    }

    /// 第 `index` 个关节的速度（缺省时为 `None`）
    #[inline]
    pub fn velocity(&self, index: usize) -> Option<f64> {
        self.velocities.get(index).copied()
    }
}

/// 关节轨迹命令
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointTrajectory {
    /// 关节名，所有路点共享
    pub joint_names: Vec<String>,

    /// 路点，按时间顺序
    pub points: Vec<TrajectoryPoint>,
}

impl JointTrajectory {
    pub fn new<S: Into<String>>(joint_names: impl IntoIterator<Item = S>) -> Self {
        Self {
            joint_names: joint_names.into_iter().map(Into::into).collect(),
            points: Vec::new(),
        }
    }

    /// 追加路点（链式调用）
    pub fn point(mut self, point: TrajectoryPoint) -> Self {
        self.points.push(point);
        self
    }

    /// 路点数量
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
