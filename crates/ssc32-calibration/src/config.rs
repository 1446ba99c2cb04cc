//! 关节表（TOML）
//!
//! 每个关节一张表，表名即关节名：
//!
//! ```toml
//! [joints.shoulder]
//! channel = 0
//! min_angle = -1.57
//! max_angle = 1.57
//! offset_angle = 0.0   # 可选，默认 0
//! invert = false       # 可选，默认 false
//! default_angle = 0.0  # 可选
//! initialize = false   # 可选，默认 false
//! ```

use crate::error::CalibrationError;
use crate::joint::JointCalibration;
use crate::units::Rad;
use serde::{Deserialize, Serialize};
use ssc32_protocol::Channel;
use std::collections::BTreeMap;

/// 关节表：关节名 → 条目
pub type JointTable = BTreeMap<String, JointEntry>;

/// 关节表条目（不含关节名）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JointEntry {
    pub channel: Channel,
    pub min_angle: Rad,
    pub max_angle: Rad,
    #[serde(default)]
    pub offset_angle: Rad,
    #[serde(default)]
    pub invert: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_angle: Option<Rad>,
    #[serde(default)]
    pub initialize: bool,
}

impl JointEntry {
    /// 附上关节名，得到标定记录
    pub fn into_calibration(self, name: impl Into<String>) -> JointCalibration {
        JointCalibration {
            name: name.into(),
            channel: self.channel,
            min_angle: self.min_angle,
            max_angle: self.max_angle,
            offset_angle: self.offset_angle,
            invert: self.invert,
            default_angle: self.default_angle,
            initialize: self.initialize,
        }
    }
}

impl From<&JointCalibration> for JointEntry {
    fn from(joint: &JointCalibration) -> Self {
        Self {
            channel: joint.channel,
            min_angle: joint.min_angle,
            max_angle: joint.max_angle,
            offset_angle: joint.offset_angle,
            invert: joint.invert,
            default_angle: joint.default_angle,
            initialize: joint.initialize,
        }
    }
}

#[derive(Debug, Deserialize)]
struct JointTableDocument {
    #[serde(default)]
    joints: JointTable,
}

/// 解析只包含 `[joints.*]` 的 TOML 文本
///
/// 其他顶层键会被忽略，因此可以直接读取完整的控制器配置文件。
pub fn parse_joint_table(content: &str) -> Result<JointTable, CalibrationError> {
    let doc: JointTableDocument = toml::from_str(content)?;
    Ok(doc.joints)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
publish_rate = 10

[joints.shoulder]
channel = 0
min_angle = -1.57
max_angle = 1.57

[joints.wrist]
channel = 3
min_angle = -0.5
max_angle = 0.5
offset_angle = 0.1
invert = true
default_angle = 0.2
initialize = true
"#;

    #[test]
    fn test_parse_with_defaults() {
        let table = parse_joint_table(SAMPLE).unwrap();
        assert_eq!(table.len(), 2);

        let shoulder = &table["shoulder"];
        assert_eq!(shoulder.channel, 0);
        assert_eq!(shoulder.min_angle, Rad(-1.57));
        assert_eq!(shoulder.offset_angle, Rad::ZERO);
        assert!(!shoulder.invert);
        assert_eq!(shoulder.default_angle, None);
        assert!(!shoulder.initialize);
    }

    #[test]
    fn test_parse_all_fields() {
        let table = parse_joint_table(SAMPLE).unwrap();
        let wrist = table["wrist"].clone().into_calibration("wrist");
        assert_eq!(wrist.name, "wrist");
        assert_eq!(wrist.channel, 3);
        assert_eq!(wrist.offset_angle, Rad(0.1));
        assert!(wrist.invert);
        assert_eq!(wrist.default_angle, Some(Rad(0.2)));
        assert!(wrist.initialize);
    }

    #[test]
    fn test_missing_required_field() {
        let content = r#"
[joints.elbow]
channel = 1
min_angle = -1.0
"#;
        let err = parse_joint_table(content).unwrap_err();
        match err {
            CalibrationError::InvalidTable(msg) => {
                assert!(msg.contains("max_angle"), "message: {}", msg)
            },
            other => panic!("Expected InvalidTable, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let content = r#"
[joints.elbow]
channel = 1
min_angle = -1.0
max_angle = 1.0
ofset_angle = 0.3
"#;
        assert!(parse_joint_table(content).is_err());
    }

    #[test]
    fn test_negative_channel_rejected() {
        let content = r#"
[joints.elbow]
channel = -1
min_angle = -1.0
max_angle = 1.0
"#;
        assert!(parse_joint_table(content).is_err());
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_joint_table("").unwrap().is_empty());
    }

    #[test]
    fn test_entry_from_calibration() {
        let joint = JointCalibration::new("elbow", 2, Rad(-1.0), Rad(1.0)).inverted(true);
        let entry = JointEntry::from(&joint);
        assert_eq!(entry.into_calibration("elbow"), joint);
    }
}
