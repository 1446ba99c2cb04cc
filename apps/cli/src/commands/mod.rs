//! 命令定义和实现

pub mod check;
pub mod convert;
pub mod feedback;
pub mod relax;
pub mod simulate;
pub mod trajectory;

pub use check::CheckCommand;
pub use convert::ConvertCommand;
pub use feedback::FeedbackCommand;
pub use relax::RelaxCommand;
pub use simulate::SimulateCommand;
pub use trajectory::TrajectoryCommand;

use clap::ValueEnum;

/// 输出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// 人类可读
    #[default]
    Text,
    /// JSON
    Json,
}
