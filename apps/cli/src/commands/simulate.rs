//! simulate 命令
//!
//! 在回环传输上运行完整的控制器：移动到启动姿态，执行可选的轨迹文件，
//! 然后周期上报关节状态，直到 Ctrl-C 或到达指定时长。

use super::OutputFormat;
use super::trajectory::load_trajectory;
use anyhow::{Context, Result};
use clap::Args;
use crossbeam_channel::RecvTimeoutError;
use ssc32_controller::{ControllerConfig, LoopbackTransport, ServoControllerBuilder};
use ssc32_protocol::JointState;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::info;

/// 仿真命令参数
#[derive(Args, Debug)]
pub struct SimulateCommand {
    /// 启动后执行的轨迹文件（JSON）
    #[arg(short = 'F', long)]
    pub file: Option<PathBuf>,

    /// 覆盖上报频率（Hz），同时启用状态上报
    #[arg(short, long)]
    pub rate: Option<u32>,

    /// 运行时长（秒），默认运行到 Ctrl-C
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// 跳过启动姿态
    #[arg(long)]
    pub no_initialize: bool,

    /// 退出前放松所有关节
    #[arg(long)]
    pub relax: bool,

    /// 输出格式
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl SimulateCommand {
    pub fn execute(&self, config: &ControllerConfig) -> Result<()> {
        let mut builder = ServoControllerBuilder::from_config(config);
        if let Some(rate) = self.rate {
            builder = builder.publish_joint_states(true).publish_rate(rate);
        }

        let (transport, monitor) = LoopbackTransport::new();
        let controller = Arc::new(builder.build(transport));

        if !self.no_initialize {
            let count = controller.move_to_initial_pose()?;
            info!(joints = count, "initial pose applied");
        }

        if let Some(path) = &self.file {
            let trajectory = load_trajectory(path)?;
            controller
                .handle_trajectory(&trajectory)
                .context("轨迹被拒绝")?;
        }

        let running = Arc::new(AtomicBool::new(true));
        let r = running.clone();
        ctrlc::set_handler(move || {
            r.store(false, Ordering::SeqCst);
        })?;

        match controller.spawn_state_publisher()? {
            Some(publisher) => {
                let deadline = self
                    .duration
                    .map(|secs| Instant::now() + Duration::from_secs_f64(secs.max(0.0)));

                while running.load(Ordering::SeqCst) {
                    if deadline.is_some_and(|d| Instant::now() >= d) {
                        break;
                    }
                    match monitor.states.recv_timeout(Duration::from_millis(100)) {
                        Ok(state) => self.print_state(&state)?,
                        Err(RecvTimeoutError::Timeout) => continue,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                publisher.stop();
            },
            None => {
                let state = controller.publish_joint_states()?;
                self.print_state(&state)?;
            },
        }

        if self.relax {
            controller.relax_joints()?;
        }

        let metrics = controller.metrics();
        info!(
            trajectories = metrics.trajectories_accepted,
            commands = metrics.servo_commands_published,
            states = metrics.joint_states_published,
            "simulation finished"
        );
        Ok(())
    }

    fn print_state(&self, state: &JointState) -> Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(state)?),
            OutputFormat::Text => {
                let fields: Vec<String> = state
                    .iter()
                    .map(|s| format!("{}={:.4}", s.name, s.position))
                    .collect();
                println!("state {}", fields.join(" "));
            },
        }
        Ok(())
    }
}
