//! relax 命令
//!
//! 列出放松关节时会发布的拉低指令

use super::OutputFormat;
use anyhow::Result;
use clap::Args;
use ssc32_controller::{ControllerConfig, relax};

/// 放松命令参数
#[derive(Args, Debug)]
pub struct RelaxCommand {
    /// 输出格式
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl RelaxCommand {
    pub fn execute(&self, config: &ControllerConfig) -> Result<()> {
        let outputs = relax::relax_outputs(&config.registry());

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&outputs)?),
            OutputFormat::Text => {
                for output in &outputs {
                    println!("ch {} {:?}", output.channel, output.level);
                }
            },
        }
        Ok(())
    }
}
