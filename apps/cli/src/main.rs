//! # SSC-32U CLI
//!
//! Command-line interface for SSC-32U servo controller calibration and simulation.
//!
//! ```bash
//! # 检查配置文件（默认 ~/.config/ssc32/controller.toml）
//! ssc32-cli check
//!
//! # 单个关节角 → 脉宽
//! ssc32-cli convert --joint elbow --angle 0.5
//! ssc32-cli convert --joint elbow --angle 30 --deg --velocity 0.2
//!
//! # 脉宽读数 → 关节角
//! ssc32-cli feedback --joint elbow --pulse-width 1182
//!
//! # 处理轨迹文件（JSON），输出命令组
//! ssc32-cli trajectory --file wave.json
//!
//! # 在回环传输上运行控制器
//! ssc32-cli simulate --file wave.json --duration 2
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod settings;

use commands::{
    CheckCommand, ConvertCommand, FeedbackCommand, RelaxCommand, SimulateCommand,
    TrajectoryCommand,
};

/// SSC-32U CLI - 舵机控制器命令行工具
#[derive(Parser, Debug)]
#[command(name = "ssc32-cli")]
#[command(about = "Command-line interface for SSC-32U servo controller calibration", long_about = None)]
#[command(version)]
struct Cli {
    /// 配置文件路径（默认 <config_dir>/ssc32/controller.toml）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 检查标定表
    Check {
        #[command(flatten)]
        args: CheckCommand,
    },

    /// 关节角 → 舵机命令
    Convert {
        #[command(flatten)]
        args: ConvertCommand,
    },

    /// 脉宽读数 → 关节角
    Feedback {
        #[command(flatten)]
        args: FeedbackCommand,
    },

    /// 处理轨迹文件
    Trajectory {
        #[command(flatten)]
        args: TrajectoryCommand,
    },

    /// 列出放松关节时的拉低指令
    Relax {
        #[command(flatten)]
        args: RelaxCommand,
    },

    /// 在回环传输上运行控制器
    Simulate {
        #[command(flatten)]
        args: SimulateCommand,
    },
}

fn main() -> Result<()> {
    // 初始化日志（输出到 stderr，stdout 留给命令结果）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ssc32_cli=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = settings::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Check { args } => args.execute(&config),
        Commands::Convert { args } => args.execute(&config),
        Commands::Feedback { args } => args.execute(&config),
        Commands::Trajectory { args } => args.execute(&config),
        Commands::Relax { args } => args.execute(&config),
        Commands::Simulate { args } => args.execute(&config),
    }
}
