//! # SSC-32U Calibration
//!
//! 关节标定与角度 ↔ 脉宽换算（纯函数，无 IO）。
//!
//! ## 模块
//!
//! - `units`: 强类型角度单位（`Rad` / `Deg`）
//! - `pulse`: 脉宽定点化、限幅、镜像
//! - `joint`: 单个关节的标定记录
//! - `registry`: 只读的关节标定表
//! - `transform`: 正向（角度 → 脉宽）与逆向（脉宽 → 角度）换算
//! - `config`: 关节表 TOML 解析
//!
//! # 示例
//!
//! ```rust
//! use ssc32_calibration::{JointCalibration, JointRegistry, Rad};
//!
//! let registry = JointRegistry::new([
//!     JointCalibration::new("shoulder", 0, Rad(-1.57), Rad(1.57)),
//!     JointCalibration::new("elbow", 1, Rad(-1.57), Rad(1.57)).inverted(true),
//! ])
//! .unwrap();
//!
//! let elbow = registry.lookup("elbow").unwrap();
//! let pw = elbow.pulse_width(Rad(0.5)).unwrap();
//! assert_eq!(pw, 1182);
//!
//! let angle = elbow.angle(i32::from(pw));
//! assert!((angle.0 - 0.5).abs() < 2e-3);
//! ```

pub mod config;
mod error;
pub mod joint;
pub mod pulse;
pub mod registry;
pub mod transform;
pub mod units;

pub use config::{JointEntry, JointTable, parse_joint_table};
pub use error::CalibrationError;
pub use joint::JointCalibration;
pub use registry::JointRegistry;
pub use units::{Deg, Rad};
