//! Builder 模式实现
//!
//! 提供链式构造 `ServoController` 实例的便捷方式。

use crate::config::{ControllerConfig, DEFAULT_QUERY_TIMEOUT_MS};
use crate::controller::{PublishSettings, ServoController};
use crate::transport::ServoTransport;
use ssc32_calibration::JointRegistry;
use std::sync::Arc;
use std::time::Duration;

/// ServoController Builder（链式构造）
///
/// # Example
///
/// ```
/// use ssc32_calibration::{JointCalibration, JointRegistry, Rad};
/// use ssc32_controller::{LoopbackTransport, ServoControllerBuilder};
///
/// let registry = JointRegistry::new([
///     JointCalibration::new("shoulder", 0, Rad(-1.57), Rad(1.57)),
/// ])
/// .unwrap();
///
/// let (transport, _monitor) = LoopbackTransport::new();
/// let controller = ServoControllerBuilder::new()
///     .registry(registry)
///     .publish_joint_states(true)
///     .publish_rate(10)
///     .build(transport);
///
/// assert_eq!(controller.registry().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ServoControllerBuilder {
    registry: Arc<JointRegistry>,
    publish_joint_states: bool,
    publish_rate: u32,
    query_timeout: Duration,
}

impl Default for ServoControllerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServoControllerBuilder {
    /// 创建新的 Builder（空标定表，不上报状态）
    pub fn new() -> Self {
        Self {
            registry: Arc::new(JointRegistry::default()),
            publish_joint_states: false,
            publish_rate: 0,
            query_timeout: Duration::from_millis(DEFAULT_QUERY_TIMEOUT_MS),
        }
    }

    /// 从配置文件内容初始化
    pub fn from_config(config: &ControllerConfig) -> Self {
        Self {
            registry: Arc::new(config.registry()),
            publish_joint_states: config.publish_joint_states,
            publish_rate: config.publish_rate,
            query_timeout: config.query_timeout(),
        }
    }

    /// 设置标定表
    pub fn registry(mut self, registry: impl Into<Arc<JointRegistry>>) -> Self {
        self.registry = registry.into();
        self
    }

    /// 是否上报关节状态
    pub fn publish_joint_states(mut self, enabled: bool) -> Self {
        self.publish_joint_states = enabled;
        self
    }

    /// 上报频率（Hz），0 表示只在显式调用时上报
    pub fn publish_rate(mut self, rate: u32) -> Self {
        self.publish_rate = rate;
        self
    }

    /// 脉宽查询超时
    pub fn query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// 构建控制器
    ///
    /// 只组装各部分，不启动任何线程；周期上报见
    /// [`ServoController::spawn_state_publisher`]。
    pub fn build<T: ServoTransport>(self, transport: T) -> ServoController<T> {
        let settings = PublishSettings {
            publish_joint_states: self.publish_joint_states,
            publish_rate: self.publish_rate,
            query_timeout: self.query_timeout,
        };
        ServoController::new(self.registry, transport, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loopback::LoopbackTransport;

    #[test]
    fn test_from_config() {
        let config = ControllerConfig::from_toml_str(
            r#"
publish_joint_states = true
publish_rate = 20
query_timeout_ms = 250

[joints.shoulder]
channel = 0
min_angle = -1.0
max_angle = 1.0
"#,
        )
        .unwrap();

        let (transport, _monitor) = LoopbackTransport::new();
        let controller = ServoControllerBuilder::from_config(&config).build(transport);
        let settings = controller.settings();

        assert!(settings.publish_joint_states);
        assert_eq!(settings.publish_rate, 20);
        assert_eq!(settings.query_timeout, Duration::from_millis(250));
        assert_eq!(settings.period(), Some(Duration::from_millis(50)));
        assert!(controller.registry().contains("shoulder"));
    }

    #[test]
    fn test_defaults() {
        let (transport, _monitor) = LoopbackTransport::new();
        let controller = ServoControllerBuilder::default().build(transport);
        let settings = controller.settings();

        assert!(!settings.publish_joint_states);
        assert_eq!(settings.period(), None);
        assert_eq!(settings.query_timeout, Duration::from_millis(DEFAULT_QUERY_TIMEOUT_MS));
        assert!(controller.registry().is_empty());
    }
}
