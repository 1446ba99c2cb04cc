//! 舵机控制器
//!
//! 把只读标定表、传输层和核心换算组合起来：
//!
//! - 轨迹命令 → 处理 → 整组发布（失败时什么都不发布）
//! - 放松关节 → 每个通道一条拉低指令
//! - 状态上报 → 查询脉宽 → 换算 → 发布快照
//!
//! 标定表在构造后不可变，通过 `Arc` 共享；最近一次的状态快照存放在
//! `ArcSwapOption` 中，读取无锁。

use crate::config::publish_period;
use crate::error::ControllerError;
use crate::metrics::{ControllerMetrics, MetricsSnapshot};
use crate::publisher::StatePublisher;
use crate::transport::ServoTransport;
use crate::{processor, relax, reporter};
use arc_swap::ArcSwapOption;
use ssc32_calibration::JointRegistry;
use ssc32_protocol::{JointState, JointTrajectory, TrajectoryPoint};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// 状态上报设置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishSettings {
    /// 是否上报关节状态
    pub publish_joint_states: bool,
    /// 上报频率（Hz），0 表示不周期上报
    pub publish_rate: u32,
    /// 脉宽查询超时
    pub query_timeout: Duration,
}

impl PublishSettings {
    /// 周期上报间隔，见 [`ControllerConfig::publish_period`](crate::ControllerConfig::publish_period)
    pub fn period(&self) -> Option<Duration> {
        publish_period(self.publish_joint_states, self.publish_rate)
    }
}

/// 舵机控制器
pub struct ServoController<T: ServoTransport> {
    registry: Arc<JointRegistry>,
    transport: T,
    settings: PublishSettings,
    latest_state: ArcSwapOption<JointState>,
    metrics: ControllerMetrics,
}

impl<T: ServoTransport> ServoController<T> {
    pub(crate) fn new(registry: Arc<JointRegistry>, transport: T, settings: PublishSettings) -> Self {
        info!(
            joints = registry.len(),
            publish_joint_states = settings.publish_joint_states,
            publish_rate = settings.publish_rate,
            "servo controller created"
        );
        for joint in registry.iter() {
            info!(
                joint = %joint.name,
                channel = joint.channel,
                min = %joint.min_angle,
                max = %joint.max_angle,
                offset = %joint.offset_angle,
                invert = joint.invert,
                "joint calibration"
            );
        }

        Self {
            registry,
            transport,
            settings,
            latest_state: ArcSwapOption::empty(),
            metrics: ControllerMetrics::new(),
        }
    }

    /// 标定表
    pub fn registry(&self) -> &JointRegistry {
        &self.registry
    }

    /// 传输层
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn settings(&self) -> PublishSettings {
        self.settings
    }

    /// 处理并发布一条轨迹命令
    ///
    /// 成功时返回发布的舵机命令数。任意条目非法时整条命令被丢弃，
    /// 错误被记录并返回给调用方，不会重试。
    pub fn handle_trajectory(&self, trajectory: &JointTrajectory) -> Result<usize, ControllerError> {
        let group = match processor::process_trajectory(trajectory, &self.registry) {
            Ok(group) => group,
            Err(e) => {
                ControllerMetrics::incr(&self.metrics.trajectories_rejected, 1);
                error!("Trajectory rejected: {}", e);
                return Err(e);
            },
        };

        self.transport.publish_commands(&group)?;

        let count = group.len();
        ControllerMetrics::incr(&self.metrics.trajectories_accepted, 1);
        ControllerMetrics::incr(&self.metrics.servo_commands_published, count as u64);
        debug!(commands = count, "servo command group published");
        Ok(count)
    }

    /// 放松所有关节
    ///
    /// 返回发布的拉低指令数。某条指令发布失败时立即返回错误，
    /// 之前已发布的指令不会撤回。
    pub fn relax_joints(&self) -> Result<usize, ControllerError> {
        let outputs = relax::relax_outputs(&self.registry);
        for output in &outputs {
            self.transport.publish_discrete_output(*output)?;
        }
        info!(channels = outputs.len(), "joints relaxed");
        Ok(outputs.len())
    }

    /// 查询脉宽并换算为关节状态（不发布）
    ///
    /// 成功时快照同时写入 [`latest_joint_state`](Self::latest_joint_state)。
    pub fn sample_joint_states(&self) -> Result<Arc<JointState>, ControllerError> {
        let query = reporter::build_query(&self.registry);

        let readings = self
            .transport
            .query_pulse_widths(&query, self.settings.query_timeout)
            .map_err(ControllerError::from)
            .and_then(|response| {
                reporter::collect_readings(&query, &response).map_err(ControllerError::from)
            });

        let readings = match readings {
            Ok(readings) => readings,
            Err(e) => {
                ControllerMetrics::incr(&self.metrics.query_failures, 1);
                return Err(e);
            },
        };

        let state = Arc::new(reporter::report(&readings, &self.registry));
        self.latest_state.store(Some(Arc::clone(&state)));
        Ok(state)
    }

    /// 查询、换算并发布关节状态
    pub fn publish_joint_states(&self) -> Result<Arc<JointState>, ControllerError> {
        let state = self.sample_joint_states()?;
        self.transport.publish_joint_state(&state)?;
        ControllerMetrics::incr(&self.metrics.joint_states_published, 1);
        debug!(samples = state.len(), "joint state published");
        Ok(state)
    }

    /// 最近一次的关节状态快照
    pub fn latest_joint_state(&self) -> Option<Arc<JointState>> {
        self.latest_state.load_full()
    }

    /// 启动姿态
    ///
    /// 由 `initialize = true` 且配置了 `default_angle` 的关节组成的单路点轨迹；
    /// 没有这样的关节时返回 `None`。
    pub fn initial_pose(&self) -> Option<JointTrajectory> {
        let (names, positions): (Vec<String>, Vec<f64>) = self
            .registry
            .iter()
            .filter(|j| j.initialize)
            .filter_map(|j| j.default_angle.map(|angle| (j.name.clone(), angle.value())))
            .unzip();

        if names.is_empty() {
            return None;
        }

        Some(JointTrajectory::new(names).point(TrajectoryPoint::positions(positions)))
    }

    /// 把需要初始化的关节移动到默认角
    ///
    /// 返回发布的命令数；没有需要初始化的关节时返回 0。
    pub fn move_to_initial_pose(&self) -> Result<usize, ControllerError> {
        match self.initial_pose() {
            Some(trajectory) => self.handle_trajectory(&trajectory),
            None => Ok(0),
        }
    }

    /// 计数器快照
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl<T: ServoTransport + 'static> ServoController<T> {
    /// 启动周期状态上报线程
    ///
    /// 未启用上报或频率为 0 时返回 `Ok(None)`。返回的句柄被 drop 时线程停止。
    pub fn spawn_state_publisher(self: &Arc<Self>) -> Result<Option<StatePublisher>, ControllerError> {
        let Some(period) = self.settings.period() else {
            if self.settings.publish_joint_states {
                warn!("publish_rate is 0, joint states will only be published on demand");
            }
            return Ok(None);
        };

        let controller = Arc::clone(self);
        let publisher = StatePublisher::spawn(period, move || {
            if let Err(e) = controller.publish_joint_states() {
                warn!("Failed to publish joint states: {}", e);
            }
        })?;
        Ok(Some(publisher))
    }
}
