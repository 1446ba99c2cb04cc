//! 关节状态上报
//!
//! 给定已经收到的各通道脉宽读数，换算出关节状态快照。如何向执行器发起
//! 查询、何时触发上报都不在这里：这里只做同步的纯计算。

use ssc32_calibration::JointRegistry;
use ssc32_protocol::{
    Channel, JointState, JointStateSample, ProtocolError, PulseWidthQuery, PulseWidthResponse,
};
use std::collections::BTreeMap;

/// 通道 → 原始脉宽读数
pub type ChannelReadings = BTreeMap<Channel, i32>;

/// 构造脉宽查询：按标定表顺序列出每个关节的通道
pub fn build_query(registry: &JointRegistry) -> PulseWidthQuery {
    PulseWidthQuery {
        channels: registry.iter().map(|j| j.channel).collect(),
    }
}

/// 把查询响应按下标对齐成通道读数
pub fn collect_readings(
    query: &PulseWidthQuery,
    response: &PulseWidthResponse,
) -> Result<ChannelReadings, ProtocolError> {
    Ok(query.pair(response)?.collect())
}

/// 生成关节状态快照
///
/// 读数缺失或 `<= 0`（"无读数"）的关节被跳过，不会以 0 上报。
pub fn report(readings: &ChannelReadings, registry: &JointRegistry) -> JointState {
    registry
        .iter()
        .filter_map(|joint| {
            let pw = readings.get(&joint.channel).copied().filter(|pw| *pw > 0)?;
            Some(JointStateSample {
                name: joint.name.clone(),
                position: joint.angle(pw).value(),
            })
        })
        .collect()
}
