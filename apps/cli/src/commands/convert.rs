//! convert 命令
//!
//! 单个关节角 → 舵机命令（脉宽 + 可选速度）

use super::OutputFormat;
use anyhow::Result;
use clap::Args;
use ssc32_calibration::{Deg, Rad};
use ssc32_controller::ControllerConfig;

/// 换算命令参数
#[derive(Args, Debug)]
pub struct ConvertCommand {
    /// 关节名
    #[arg(short, long)]
    pub joint: String,

    /// 关节角（默认弧度）
    #[arg(short, long, allow_hyphen_values = true)]
    pub angle: f64,

    /// 角度以度为单位
    #[arg(long)]
    pub deg: bool,

    /// 关节角速度（rad/s）
    #[arg(short, long, allow_hyphen_values = true)]
    pub velocity: Option<f64>,

    /// 输出格式
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ConvertCommand {
    pub fn angle_rad(&self) -> Rad {
        if self.deg {
            Deg(self.angle).to_rad()
        } else {
            Rad(self.angle)
        }
    }

    pub fn execute(&self, config: &ControllerConfig) -> Result<()> {
        let registry = config.registry();
        let joint = registry.lookup(&self.joint)?;
        let command = joint.command(self.angle_rad(), self.velocity)?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&command)?),
            OutputFormat::Text => {
                print!(
                    "{} ch {} pulse_width {}",
                    joint.name, command.channel, command.pulse_width
                );
                if let Some(speed) = command.speed {
                    print!(" speed {speed:.1}");
                }
                println!();
            },
        }
        Ok(())
    }
}
