//! 传输层抽象
//!
//! 控制器与外部传输（串口桥、消息总线等）之间的接缝。控制器只依赖这个
//! trait，具体实现由集成方提供；测试和仿真使用
//! [`LoopbackTransport`](crate::loopback::LoopbackTransport)。
//!
//! 脉宽查询在原始实现中是异步请求/响应，这里抽象为带超时的阻塞调用：
//! 实现方可以在内部用任意并发原语（线程、通道、future）完成交换，
//! 超时与取消语义完全属于实现方。

use crate::error::TransportError;
use ssc32_protocol::{DiscreteOutput, JointState, PulseWidthQuery, PulseWidthResponse, ServoCommandGroup};
use std::sync::Arc;
use std::time::Duration;

/// 舵机控制器传输层
///
/// 所有方法都可能被多个线程并发调用（例如轨迹处理与状态上报线程），
/// 因此要求 `Send + Sync`。
pub trait ServoTransport: Send + Sync {
    /// 发布一个完整的舵机命令组
    fn publish_commands(&self, group: &ServoCommandGroup) -> Result<(), TransportError>;

    /// 发布离散输出指令
    fn publish_discrete_output(&self, output: DiscreteOutput) -> Result<(), TransportError>;

    /// 发布关节状态快照
    fn publish_joint_state(&self, state: &JointState) -> Result<(), TransportError>;

    /// 查询通道脉宽
    ///
    /// 响应必须与 `query.channels` 按下标对齐；非正值表示该通道无读数。
    fn query_pulse_widths(
        &self,
        query: &PulseWidthQuery,
        timeout: Duration,
    ) -> Result<PulseWidthResponse, TransportError>;
}

impl<T: ServoTransport + ?Sized> ServoTransport for Arc<T> {
    fn publish_commands(&self, group: &ServoCommandGroup) -> Result<(), TransportError> {
        (**self).publish_commands(group)
    }

    fn publish_discrete_output(&self, output: DiscreteOutput) -> Result<(), TransportError> {
        (**self).publish_discrete_output(output)
    }

    fn publish_joint_state(&self, state: &JointState) -> Result<(), TransportError> {
        (**self).publish_joint_state(state)
    }

    fn query_pulse_widths(
        &self,
        query: &PulseWidthQuery,
        timeout: Duration,
    ) -> Result<PulseWidthResponse, TransportError> {
        (**self).query_pulse_widths(query, timeout)
    }
}
