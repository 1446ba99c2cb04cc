//! feedback 命令
//!
//! 脉宽读数 → 关节角

use super::OutputFormat;
use anyhow::{Result, bail};
use clap::Args;
use ssc32_controller::ControllerConfig;
use ssc32_protocol::JointStateSample;

/// 反馈换算命令参数
#[derive(Args, Debug)]
pub struct FeedbackCommand {
    /// 关节名
    #[arg(short, long)]
    pub joint: String,

    /// 脉宽读数（µs），非正值表示无读数
    #[arg(short, long, allow_hyphen_values = true)]
    pub pulse_width: i32,

    /// 输出格式
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl FeedbackCommand {
    pub fn execute(&self, config: &ControllerConfig) -> Result<()> {
        let registry = config.registry();
        let joint = registry.lookup(&self.joint)?;

        if self.pulse_width <= 0 {
            bail!(
                "Pulse width {} for joint [{}] is not a reading",
                self.pulse_width,
                joint.name
            );
        }

        let angle = joint.angle(self.pulse_width);
        match self.format {
            OutputFormat::Json => {
                let sample = JointStateSample {
                    name: joint.name.clone(),
                    position: angle.value(),
                };
                println!("{}", serde_json::to_string(&sample)?);
            },
            OutputFormat::Text => {
                println!("{} {:.4} rad ({})", joint.name, angle.value(), angle.to_deg());
            },
        }
        Ok(())
    }
}
