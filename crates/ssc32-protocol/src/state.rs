//! 关节状态与脉宽查询
//!
//! 状态上报分两步：先按通道查询原始脉宽，再把读数换算成关节角。
//! 查询的请求和响应按下标对齐。

use crate::{Channel, ProtocolError};

/// 单个关节的状态采样
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointStateSample {
    pub name: String,
    /// 关节角（rad）
    pub position: f64,
}

/// 关节状态快照
///
/// 只包含有有效读数的关节，顺序不构成约定。
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointState {
    pub samples: Vec<JointStateSample>,
}

impl JointState {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 按关节名查找位置
    pub fn position(&self, name: &str) -> Option<f64> {
        self.samples
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JointStateSample> {
        self.samples.iter()
    }
}

impl FromIterator<JointStateSample> for JointState {
    fn from_iter<I: IntoIterator<Item = JointStateSample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

/// 脉宽查询请求
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PulseWidthQuery {
    pub channels: Vec<Channel>,
}

/// 脉宽查询响应
///
/// `pulse_widths[i]` 对应请求中的 `channels[i]`；非正值表示"无读数"。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PulseWidthResponse {
    pub pulse_widths: Vec<i32>,
}

impl PulseWidthQuery {
    /// 把响应按下标与请求的通道配对
    ///
    /// # 错误
    ///
    /// 响应数量与通道数量不一致时返回 [`ProtocolError::ReadingCountMismatch`]。
    pub fn pair<'a>(
        &'a self,
        response: &'a PulseWidthResponse,
    ) -> Result<impl Iterator<Item = (Channel, i32)> + 'a, ProtocolError> {
        if self.channels.len() != response.pulse_widths.len() {
            return Err(ProtocolError::ReadingCountMismatch {
                expected: self.channels.len(),
                actual: response.pulse_widths.len(),
            });
        }

        Ok(self
            .channels
            .iter()
            .copied()
            .zip(response.pulse_widths.iter().copied()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_aligned() {
        let query = PulseWidthQuery {
            channels: vec![0, 3, 7],
        };
        let response = PulseWidthResponse {
            pulse_widths: vec![1500, 0, -1],
        };

        let pairs: Vec<_> = query.pair(&response).unwrap().collect();
        assert_eq!(pairs, vec![(0, 1500), (3, 0), (7, -1)]);
    }

    #[test]
    fn test_pair_mismatch() {
        let query = PulseWidthQuery {
            channels: vec![0, 1],
        };
        let response = PulseWidthResponse {
            pulse_widths: vec![1500],
        };

        match query.pair(&response) {
            Err(ProtocolError::ReadingCountMismatch { expected, actual }) => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            },
            _ => panic!("Expected ReadingCountMismatch"),
        }
    }

    #[test]
    fn test_joint_state_position_lookup() {
        let state: JointState = vec![
            JointStateSample {
                name: "shoulder".to_string(),
                position: 0.5,
            },
            JointStateSample {
                name: "elbow".to_string(),
                position: -0.25,
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(state.len(), 2);
        assert_eq!(state.position("elbow"), Some(-0.25));
        assert_eq!(state.position("wrist"), None);
    }
}
