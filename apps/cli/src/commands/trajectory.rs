//! trajectory 命令
//!
//! 处理 JSON 轨迹文件，输出对应的舵机命令组
//!
//! ```json
//! {
//!   "joint_names": ["shoulder", "elbow"],
//!   "points": [
//!     { "positions": [0.0, 0.5], "velocities": [0.2, 0.0] }
//!   ]
//! }
//! ```

use super::OutputFormat;
use anyhow::{Context, Result};
use clap::Args;
use ssc32_controller::{ControllerConfig, processor};
use ssc32_protocol::JointTrajectory;
use std::fs;
use std::path::{Path, PathBuf};

/// 轨迹命令参数
#[derive(Args, Debug)]
pub struct TrajectoryCommand {
    /// 轨迹文件（JSON）
    #[arg(short = 'F', long)]
    pub file: PathBuf,

    /// 输出格式
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// 加载轨迹文件
pub fn load_trajectory(path: &Path) -> Result<JointTrajectory> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("读取轨迹文件失败: {}", path.display()))?;
    let trajectory: JointTrajectory =
        serde_json::from_str(&content).context("解析轨迹 JSON 失败")?;
    Ok(trajectory)
}

impl TrajectoryCommand {
    pub fn execute(&self, config: &ControllerConfig) -> Result<()> {
        let trajectory = load_trajectory(&self.file)?;
        let registry = config.registry();
        let group = processor::process_trajectory(&trajectory, &registry)
            .context("轨迹被拒绝")?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&group)?),
            OutputFormat::Text => {
                for command in group.iter() {
                    match command.speed {
                        Some(speed) => println!(
                            "ch {} pulse_width {} speed {:.1}",
                            command.channel, command.pulse_width, speed
                        ),
                        None => println!("ch {} pulse_width {}", command.channel, command.pulse_width),
                    }
                }
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_trajectory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traj.json");
        fs::write(
            &path,
            r#"{"joint_names":["a","b"],"points":[{"positions":[0.1,0.2]}]}"#,
        )
        .unwrap();

        let traj = load_trajectory(&path).unwrap();
        assert_eq!(traj.joint_names, vec!["a", "b"]);
        assert_eq!(traj.points[0].positions, vec![0.1, 0.2]);
        assert!(traj.points[0].velocities.is_empty());
    }

    #[test]
    fn test_load_malformed_trajectory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traj.json");
        fs::write(&path, "{not json").unwrap();
        assert!(load_trajectory(&path).is_err());
    }
}
