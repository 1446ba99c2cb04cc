//! 控制器层模块
//!
//! 在只读标定表之上提供 SSC-32U 舵机控制器的运行时：
//! - 轨迹处理（整条命令要么全部发布，要么全部丢弃）
//! - 关节状态上报（脉宽查询 → 关节角）
//! - 放松关节（通道拉低）
//! - 周期上报线程
//! - 回环传输（测试与仿真）
//!
//! 外部传输通过 [`ServoTransport`] trait 接入。
//!
//! # 示例
//!
//! ```rust
//! use ssc32_calibration::{JointCalibration, JointRegistry, Rad};
//! use ssc32_controller::{LoopbackTransport, ServoControllerBuilder};
//! use ssc32_protocol::{JointTrajectory, TrajectoryPoint};
//!
//! let registry = JointRegistry::new([
//!     JointCalibration::new("shoulder", 0, Rad(-1.57), Rad(1.57)),
//! ])
//! .unwrap();
//!
//! let (transport, monitor) = LoopbackTransport::new();
//! let controller = ServoControllerBuilder::new().registry(registry).build(transport);
//!
//! let traj = JointTrajectory::new(["shoulder"]).point(TrajectoryPoint::positions([0.0]));
//! assert_eq!(controller.handle_trajectory(&traj).unwrap(), 1);
//!
//! let group = monitor.commands.try_recv().unwrap();
//! assert_eq!(group.commands[0].pulse_width, 1500);
//!
//! let state = controller.publish_joint_states().unwrap();
//! assert!(state.position("shoulder").unwrap().abs() < 1e-9);
//! ```

mod builder;
pub mod config;
mod controller;
mod error;
pub mod loopback;
pub mod metrics;
pub mod processor;
pub mod publisher;
pub mod relax;
pub mod reporter;
pub mod transport;

pub use builder::ServoControllerBuilder;
pub use config::ControllerConfig;
pub use controller::{PublishSettings, ServoController};
pub use error::{ControllerError, TransportError};
pub use loopback::{LoopbackMonitor, LoopbackTransport};
pub use metrics::{ControllerMetrics, MetricsSnapshot};
pub use publisher::StatePublisher;
pub use transport::ServoTransport;
