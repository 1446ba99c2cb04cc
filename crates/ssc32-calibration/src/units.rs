//! 强类型角度单位
//!
//! 使用 NewType 模式防止弧度与角度混用。标定表和换算函数只接受 [`Rad`]，
//! [`Deg`] 仅用于人机交互（命令行输入输出）。
//!
//! # 示例
//!
//! ```rust
//! use ssc32_calibration::{Deg, Rad};
//!
//! let angle_rad = Rad(std::f64::consts::FRAC_PI_2);
//! let angle_deg = angle_rad.to_deg();
//! assert!((angle_deg.0 - 90.0).abs() < 1e-9);
//!
//! // 类型安全：以下代码无法编译
//! // let _ = Rad(1.0) + Deg(1.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// 弧度（NewType）
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rad(pub f64);

impl Rad {
    /// 零弧度常量
    pub const ZERO: Self = Rad(0.0);

    /// π/2 弧度（90度）
    pub const FRAC_PI_2: Self = Rad(std::f64::consts::FRAC_PI_2);

    #[inline]
    pub const fn new(value: f64) -> Self {
        Rad(value)
    }

    /// 转换为角度
    #[inline]
    pub fn to_deg(self) -> Deg {
        Deg(self.0.to_degrees())
    }

    /// 获取原始值
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// 是否为有限值（非 NaN、非无穷）
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl fmt::Display for Rad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} rad", self.0)
    }
}

impl From<f64> for Rad {
    #[inline]
    fn from(value: f64) -> Self {
        Rad(value)
    }
}

impl Add for Rad {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Rad(self.0 + rhs.0)
    }
}

impl Sub for Rad {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Rad(self.0 - rhs.0)
    }
}

impl Neg for Rad {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Rad(-self.0)
    }
}

/// 角度（NewType）
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deg(pub f64);

impl Deg {
    #[inline]
    pub const fn new(value: f64) -> Self {
        Deg(value)
    }

    /// 转换为弧度
    #[inline]
    pub fn to_rad(self) -> Rad {
        Rad(self.0.to_radians())
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Deg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}°", self.0)
    }
}
