//! 关节标定表
//!
//! 关节名 → 标定记录的只读映射，启动时构造一次，之后以引用或 `Arc` 传入
//! 各个核心操作。没有运行时修改接口，因此并发读取不需要加锁。
//!
//! 迭代顺序按关节名字典序（`BTreeMap`），但这不是对外约定。

use crate::config::JointTable;
use crate::error::CalibrationError;
use crate::joint::JointCalibration;
use ssc32_protocol::Channel;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// 关节标定表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JointRegistry {
    joints: BTreeMap<String, JointCalibration>,
}

impl JointRegistry {
    /// 从标定记录构造
    ///
    /// 不校验 `min_angle <= max_angle`，也不拒绝共用通道的关节，只记录警告。
    ///
    /// # 错误
    ///
    /// 关节名重复时返回 [`CalibrationError::DuplicateJoint`]。
    pub fn new(joints: impl IntoIterator<Item = JointCalibration>) -> Result<Self, CalibrationError> {
        let mut map = BTreeMap::new();
        for joint in joints {
            if map.contains_key(&joint.name) {
                return Err(CalibrationError::DuplicateJoint { name: joint.name });
            }
            map.insert(joint.name.clone(), joint);
        }

        let registry = Self { joints: map };
        registry.warn_suspicious();
        Ok(registry)
    }

    /// 从解析好的关节表构造
    pub fn from_table(table: JointTable) -> Self {
        let joints = table
            .into_iter()
            .map(|(name, entry)| {
                let joint = entry.into_calibration(name.clone());
                (name, joint)
            })
            .collect();

        let registry = Self { joints };
        registry.warn_suspicious();
        registry
    }

    /// 从 TOML 文本构造（`[joints.<name>]` 表）
    pub fn from_toml_str(content: &str) -> Result<Self, CalibrationError> {
        let table = crate::config::parse_joint_table(content)?;
        Ok(Self::from_table(table))
    }

    fn warn_suspicious(&self) {
        if self.joints.is_empty() {
            warn!("No joints were provided");
        }

        for joint in self.joints.values() {
            if joint.has_inverted_limits() {
                warn!(
                    joint = %joint.name,
                    min = %joint.min_angle,
                    max = %joint.max_angle,
                    "min_angle is greater than max_angle, every command for this joint will be rejected"
                );
            }
        }

        for channel in self.shared_channels() {
            warn!(
                channel,
                "channel is assigned to more than one joint, state reports for it are ambiguous"
            );
        }
    }

    /// 按名查找
    #[inline]
    pub fn get(&self, name: &str) -> Option<&JointCalibration> {
        self.joints.get(name)
    }

    /// 按名查找，不存在时返回 [`CalibrationError::UnknownJoint`]
    pub fn lookup(&self, name: &str) -> Result<&JointCalibration, CalibrationError> {
        self.get(name).ok_or_else(|| CalibrationError::UnknownJoint {
            name: name.to_string(),
        })
    }

    /// 按通道查找（共用通道时返回第一个）
    pub fn by_channel(&self, channel: Channel) -> Option<&JointCalibration> {
        self.joints.values().find(|j| j.channel == channel)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.joints.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// 迭代所有关节
    pub fn iter(&self) -> impl Iterator<Item = &JointCalibration> {
        self.joints.values()
    }

    /// 所有关节名
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.joints.keys().map(String::as_str)
    }

    /// 去重后的通道集合
    pub fn channels(&self) -> BTreeSet<Channel> {
        self.joints.values().map(|j| j.channel).collect()
    }

    /// 被多个关节共用的通道
    pub fn shared_channels(&self) -> Vec<Channel> {
        let mut counts: BTreeMap<Channel, usize> = BTreeMap::new();
        for joint in self.joints.values() {
            *counts.entry(joint.channel).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(ch, _)| ch)
            .collect()
    }
}

impl<'a> IntoIterator for &'a JointRegistry {
    type Item = &'a JointCalibration;
    type IntoIter = std::collections::btree_map::Values<'a, String, JointCalibration>;

    fn into_iter(self) -> Self::IntoIter {
        self.joints.values()
    }
}
