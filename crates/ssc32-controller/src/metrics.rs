//! 控制器计数器
//!
//! 原子计数器，可以在任意线程读取，不引入锁竞争。

use std::sync::atomic::{AtomicU64, Ordering};

/// 控制器实时指标
#[derive(Debug, Default)]
pub struct ControllerMetrics {
    /// 已发布的轨迹命令数
    pub trajectories_accepted: AtomicU64,

    /// 被整体拒绝的轨迹命令数
    pub trajectories_rejected: AtomicU64,

    /// 已发布的舵机命令数（所有命令组累计）
    pub servo_commands_published: AtomicU64,

    /// 已发布的关节状态快照数
    pub joint_states_published: AtomicU64,

    /// 脉宽查询失败次数（超时、通道关闭、响应不对齐）
    pub query_failures: AtomicU64,
}

impl ControllerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            trajectories_accepted: self.trajectories_accepted.load(Ordering::Relaxed),
            trajectories_rejected: self.trajectories_rejected.load(Ordering::Relaxed),
            servo_commands_published: self.servo_commands_published.load(Ordering::Relaxed),
            joint_states_published: self.joint_states_published.load(Ordering::Relaxed),
            query_failures: self.query_failures.load(Ordering::Relaxed),
        }
    }

    #[inline]
    pub(crate) fn incr(counter: &AtomicU64, n: u64) {
        counter.fetch_add(n, Ordering::Relaxed);
    }
}

/// 指标快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub trajectories_accepted: u64,
    pub trajectories_rejected: u64,
    pub servo_commands_published: u64,
    pub joint_states_published: u64,
    pub query_failures: u64,
}
