//! check 命令
//!
//! 打印标定表，并指出可疑条目（空表、限位颠倒、通道共用）

use anyhow::Result;
use clap::Args;
use ssc32_calibration::JointRegistry;
use ssc32_controller::ControllerConfig;

/// 检查命令参数
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// 以规范化 TOML 输出配置
    #[arg(long)]
    pub dump: bool,
}

impl CheckCommand {
    pub fn execute(&self, config: &ControllerConfig) -> Result<()> {
        if self.dump {
            print!("{}", config.to_toml_string()?);
            return Ok(());
        }

        let registry = config.registry();
        for line in report_lines(&registry) {
            println!("{line}");
        }

        match config.publish_period() {
            Some(period) => println!(
                "joint states: every {} ms ({} Hz)",
                period.as_millis(),
                config.publish_rate
            ),
            None => println!("joint states: on demand"),
        }

        let problems = problems(&registry);
        if problems.is_empty() {
            println!("✅ {} joints OK", registry.len());
        } else {
            for problem in &problems {
                println!("⚠️  {problem}");
            }
        }
        Ok(())
    }
}

fn report_lines(registry: &JointRegistry) -> Vec<String> {
    registry
        .iter()
        .map(|joint| {
            let mut line = format!(
                "{:<16} ch {:>2}  [{:+.4}, {:+.4}] rad  offset {:+.4}",
                joint.name,
                joint.channel,
                joint.min_angle.value(),
                joint.max_angle.value(),
                joint.offset_angle.value(),
            );
            if joint.invert {
                line.push_str("  inverted");
            }
            if let Some(angle) = joint.default_angle {
                line.push_str(&format!("  default {:+.4}", angle.value()));
                if joint.initialize {
                    line.push_str(" (initialize)");
                }
            }
            line
        })
        .collect()
}

fn problems(registry: &JointRegistry) -> Vec<String> {
    let mut problems = Vec::new();

    if registry.is_empty() {
        problems.push("no joints configured".to_string());
    }

    for joint in registry.iter().filter(|j| j.has_inverted_limits()) {
        problems.push(format!(
            "joint [{}] has min_angle > max_angle, every command will be rejected",
            joint.name
        ));
    }

    for channel in registry.shared_channels() {
        let names: Vec<&str> = registry
            .iter()
            .filter(|j| j.channel == channel)
            .map(|j| j.name.as_str())
            .collect();
        problems.push(format!(
            "channel {channel} is shared by {}",
            names.join(", ")
        ));
    }

    problems
}
