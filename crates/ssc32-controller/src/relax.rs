//! 放松关节
//!
//! 把每个已标定通道拉低，舵机失去保持力。与角度换算无关，只是对标定表的枚举。

use ssc32_calibration::JointRegistry;
use ssc32_protocol::DiscreteOutput;

/// 每个已标定通道一条拉低指令，通道去重
pub fn relax_outputs(registry: &JointRegistry) -> Vec<DiscreteOutput> {
    registry
        .channels()
        .into_iter()
        .map(DiscreteOutput::low)
        .collect()
}
