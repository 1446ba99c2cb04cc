//! 回环传输
//!
//! 内存中的 [`ServoTransport`] 实现，用于测试和仿真：
//!
//! - 发布的消息进入 crossbeam 通道，由 [`LoopbackMonitor`] 读取
//! - 脉宽查询返回每个通道最后一次被指令的脉宽
//! - 被拉低的通道读数为 0（无读数），从未指令过的通道同样为 0

use crate::error::TransportError;
use crate::transport::ServoTransport;
use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use ssc32_protocol::{
    Channel, DiscreteOutput, JointState, OutputLevel, PulseWidthQuery, PulseWidthResponse,
    ServoCommandGroup,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// 回环传输
pub struct LoopbackTransport {
    /// 通道 → 最近一次的脉宽
    pulse_widths: Mutex<BTreeMap<Channel, i32>>,
    commands_tx: Sender<ServoCommandGroup>,
    outputs_tx: Sender<DiscreteOutput>,
    states_tx: Sender<JointState>,
    /// 模拟查询延迟
    latency: Duration,
    /// 下一次查询注入的错误
    query_failure: Mutex<Option<TransportError>>,
    closed: AtomicBool,
}

/// 回环传输的观察端
pub struct LoopbackMonitor {
    pub commands: Receiver<ServoCommandGroup>,
    pub outputs: Receiver<DiscreteOutput>,
    pub states: Receiver<JointState>,
}

impl LoopbackTransport {
    /// 创建回环传输及其观察端
    pub fn new() -> (Self, LoopbackMonitor) {
        let (commands_tx, commands) = crossbeam_channel::unbounded();
        let (outputs_tx, outputs) = crossbeam_channel::unbounded();
        let (states_tx, states) = crossbeam_channel::unbounded();

        let transport = Self {
            pulse_widths: Mutex::new(BTreeMap::new()),
            commands_tx,
            outputs_tx,
            states_tx,
            latency: Duration::ZERO,
            query_failure: Mutex::new(None),
            closed: AtomicBool::new(false),
        };

        (
            transport,
            LoopbackMonitor {
                commands,
                outputs,
                states,
            },
        )
    }

    /// 设置模拟查询延迟
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// 直接设置某个通道的读数（模拟手动掰动舵机、读数异常等）
    pub fn set_reading(&self, channel: Channel, pulse_width: i32) {
        self.pulse_widths.lock().insert(channel, pulse_width);
    }

    /// 读取某个通道当前的读数
    pub fn reading(&self, channel: Channel) -> i32 {
        self.pulse_widths.lock().get(&channel).copied().unwrap_or(0)
    }

    /// 让下一次查询失败
    pub fn fail_next_query(&self, error: TransportError) {
        *self.query_failure.lock() = Some(error);
    }

    /// 关闭传输，之后所有调用返回 [`TransportError::Closed`]
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    fn ensure_open(&self) -> Result<(), TransportError> {
        if self.closed.load(Ordering::Acquire) {
            Err(TransportError::Closed)
        } else {
            Ok(())
        }
    }
}

impl ServoTransport for LoopbackTransport {
    fn publish_commands(&self, group: &ServoCommandGroup) -> Result<(), TransportError> {
        self.ensure_open()?;

        {
            let mut pulse_widths = self.pulse_widths.lock();
            for command in group.iter() {
                pulse_widths.insert(command.channel, i32::from(command.pulse_width));
            }
        }

        // 观察端被丢弃时消息直接丢弃
        let _ = self.commands_tx.send(group.clone());
        Ok(())
    }

    fn publish_discrete_output(&self, output: DiscreteOutput) -> Result<(), TransportError> {
        self.ensure_open()?;

        if output.level == OutputLevel::Low {
            self.pulse_widths.lock().insert(output.channel, 0);
        }

        let _ = self.outputs_tx.send(output);
        Ok(())
    }

    fn publish_joint_state(&self, state: &JointState) -> Result<(), TransportError> {
        self.ensure_open()?;
        let _ = self.states_tx.send(state.clone());
        Ok(())
    }

    fn query_pulse_widths(
        &self,
        query: &PulseWidthQuery,
        timeout: Duration,
    ) -> Result<PulseWidthResponse, TransportError> {
        self.ensure_open()?;

        if let Some(error) = self.query_failure.lock().take() {
            return Err(error);
        }

        if !self.latency.is_zero() {
            if self.latency > timeout {
                spin_sleep::sleep(timeout);
                return Err(TransportError::Timeout);
            }
            spin_sleep::sleep(self.latency);
        }

        let pulse_widths = self.pulse_widths.lock();
        Ok(PulseWidthResponse {
            pulse_widths: query
                .channels
                .iter()
                .map(|ch| pulse_widths.get(ch).copied().unwrap_or(0))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssc32_protocol::ServoCommand;

    const TIMEOUT: Duration = Duration::from_millis(50);

    #[test]
    fn test_commands_update_readings() {
        let (transport, monitor) = LoopbackTransport::new();
        let group: ServoCommandGroup = [ServoCommand::new(0, 1200), ServoCommand::new(3, 1800)]
            .into_iter()
            .collect();

        transport.publish_commands(&group).unwrap();
        assert_eq!(monitor.commands.try_recv().unwrap(), group);

        let query = PulseWidthQuery {
            channels: vec![3, 0, 9],
        };
        let response = transport.query_pulse_widths(&query, TIMEOUT).unwrap();
        assert_eq!(response.pulse_widths, vec![1800, 1200, 0]);
    }

    #[test]
    fn test_low_output_clears_reading() {
        let (transport, monitor) = LoopbackTransport::new();
        transport.set_reading(4, 1500);

        transport
            .publish_discrete_output(DiscreteOutput::low(4))
            .unwrap();
        assert_eq!(monitor.outputs.try_recv().unwrap(), DiscreteOutput::low(4));
        assert_eq!(transport.reading(4), 0);

        transport.set_reading(5, 1500);
        transport
            .publish_discrete_output(DiscreteOutput::high(5))
            .unwrap();
        assert_eq!(transport.reading(5), 1500);
    }

    #[test]
    fn test_injected_query_failure_is_one_shot() {
        let (transport, _monitor) = LoopbackTransport::new();
        let query = PulseWidthQuery { channels: vec![0] };

        transport.fail_next_query(TransportError::Timeout);
        assert_eq!(
            transport.query_pulse_widths(&query, TIMEOUT),
            Err(TransportError::Timeout)
        );
        assert!(transport.query_pulse_widths(&query, TIMEOUT).is_ok());
    }

    #[test]
    fn test_latency_beyond_timeout() {
        let (transport, _monitor) = LoopbackTransport::new();
        let transport = transport.with_latency(Duration::from_millis(20));
        let query = PulseWidthQuery { channels: vec![0] };

        assert_eq!(
            transport.query_pulse_widths(&query, Duration::from_millis(5)),
            Err(TransportError::Timeout)
        );
        assert!(
            transport
                .query_pulse_widths(&query, Duration::from_millis(100))
                .is_ok()
        );
    }

    #[test]
    fn test_closed_transport() {
        let (transport, _monitor) = LoopbackTransport::new();
        transport.close();
        assert_eq!(
            transport.publish_commands(&ServoCommandGroup::new()),
            Err(TransportError::Closed)
        );
        assert_eq!(
            transport.publish_joint_state(&JointState::default()),
            Err(TransportError::Closed)
        );
    }

    #[test]
    fn test_dropped_monitor_does_not_fail() {
        let (transport, monitor) = LoopbackTransport::new();
        drop(monitor);
        assert!(transport.publish_commands(&ServoCommandGroup::new()).is_ok());
    }
}
