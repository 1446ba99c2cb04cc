//! 控制器配置
//!
//! 配置文件（TOML）：
//!
//! ```toml
//! publish_joint_states = true
//! publish_rate = 10          # Hz，0 表示不周期上报
//! query_timeout_ms = 100
//!
//! [joints.shoulder]
//! channel = 0
//! min_angle = -1.57
//! max_angle = 1.57
//! ```

use crate::error::ControllerError;
use serde::{Deserialize, Serialize};
use ssc32_calibration::{JointEntry, JointRegistry, JointTable};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// 默认查询超时（ms）
pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 100;

fn default_query_timeout_ms() -> u64 {
    DEFAULT_QUERY_TIMEOUT_MS
}

/// 控制器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControllerConfig {
    /// 是否上报关节状态
    #[serde(default)]
    pub publish_joint_states: bool,

    /// 上报频率（Hz）
    #[serde(default)]
    pub publish_rate: u32,

    /// 脉宽查询超时（ms）
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// 关节表
    #[serde(default)]
    pub joints: JointTable,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            publish_joint_states: false,
            publish_rate: 0,
            query_timeout_ms: DEFAULT_QUERY_TIMEOUT_MS,
            joints: JointTable::new(),
        }
    }
}

impl ControllerConfig {
    /// 从 TOML 文本解析
    pub fn from_toml_str(content: &str) -> Result<Self, ControllerError> {
        Ok(toml::from_str(content)?)
    }

    /// 从文件加载
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ControllerError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ControllerError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// 序列化为 TOML 文本
    pub fn to_toml_string(&self) -> Result<String, ControllerError> {
        toml::to_string_pretty(self).map_err(|e| ControllerError::Config(e.to_string()))
    }

    /// 从标定表反向生成配置
    pub fn with_registry(mut self, registry: &JointRegistry) -> Self {
        self.joints = registry
            .iter()
            .map(|j| (j.name.clone(), JointEntry::from(j)))
            .collect();
        self
    }

    /// 构造只读标定表
    pub fn registry(&self) -> JointRegistry {
        JointRegistry::from_table(self.joints.clone())
    }

    /// 周期上报的间隔
    ///
    /// 只有 `publish_joint_states && publish_rate > 0` 时才有值。
    /// 间隔为 `1000 / publish_rate` 毫秒（整数除法），最小 1ms。
    pub fn publish_period(&self) -> Option<Duration> {
        publish_period(self.publish_joint_states, self.publish_rate)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

pub(crate) fn publish_period(publish_joint_states: bool, publish_rate: u32) -> Option<Duration> {
    if !publish_joint_states || publish_rate == 0 {
        return None;
    }
    let millis = (1000 / u64::from(publish_rate)).max(1);
    Some(Duration::from_millis(millis))
}
