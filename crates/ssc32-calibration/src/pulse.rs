//! 脉宽定点化、限幅与镜像
//!
//! 三个函数各自独立可测，换算流水线（见 [`transform`](crate::transform)）按固定顺序组合它们：
//!
//! ```text
//! raw (f64) ──round_half_up──▶ i64 ──clamp_pulse_width──▶ u16 ──invert_pulse_width?──▶ u16
//! ```

use ssc32_protocol::{PULSE_WIDTH_MAX, PULSE_WIDTH_MIN, PULSE_WIDTH_REFLECT_SUM};

/// 半数进位取整
///
/// 先加 0.5 再向零截断，与旧控制器的定点化行为一致：
/// `2499.5 → 2500`，`1500.49 → 1500`。
///
/// 对负数而言向零截断并不等价于数学上的四舍五入，但负值之后一定会被
/// [`clamp_pulse_width`] 限到下限，因此结果不受影响。NaN 得到 0，超出
/// `i64` 范围的值饱和到边界。
#[inline]
pub fn round_half_up(raw: f64) -> i64 {
    (raw + 0.5).trunc() as i64
}

/// 把脉宽限制在执行器硬限位 `[500, 2500]` 内
///
/// 限幅是幂等的：`clamp(clamp(p)) == clamp(p)`。
#[inline]
pub fn clamp_pulse_width(pulse_width: i64) -> u16 {
    pulse_width.clamp(i64::from(PULSE_WIDTH_MIN), i64::from(PULSE_WIDTH_MAX)) as u16
}

/// 关于中位 1500 镜像脉宽：`3000 - pw`
///
/// 在 `[500, 2500]` 内是自逆的。超过 3000 的输入饱和为 0（限幅后的脉宽不会出现）。
#[inline]
pub fn invert_pulse_width(pulse_width: u16) -> u16 {
    PULSE_WIDTH_REFLECT_SUM.saturating_sub(pulse_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(1500.0), 1500);
        assert_eq!(round_half_up(1500.49), 1500);
        assert_eq!(round_half_up(1500.5), 1501);
        assert_eq!(round_half_up(2499.5), 2500);
        assert_eq!(round_half_up(2499.7), 2500);
    }

    #[test]
    fn test_round_half_up_degenerate() {
        assert_eq!(round_half_up(f64::NAN), 0);
        assert_eq!(round_half_up(f64::INFINITY), i64::MAX);
        assert_eq!(round_half_up(f64::NEG_INFINITY), i64::MIN);
        // 负数向零截断
        assert_eq!(round_half_up(-0.7), 0);
        assert_eq!(round_half_up(-1.7), -1);
    }

    #[test]
    fn test_clamp_pulse_width() {
        assert_eq!(clamp_pulse_width(1500), 1500);
        assert_eq!(clamp_pulse_width(499), 500);
        assert_eq!(clamp_pulse_width(500), 500);
        assert_eq!(clamp_pulse_width(2500), 2500);
        assert_eq!(clamp_pulse_width(2501), 2500);
        assert_eq!(clamp_pulse_width(i64::MIN), 500);
        assert_eq!(clamp_pulse_width(i64::MAX), 2500);
    }

    #[test]
    fn test_invert_pulse_width() {
        assert_eq!(invert_pulse_width(1500), 1500);
        assert_eq!(invert_pulse_width(500), 2500);
        assert_eq!(invert_pulse_width(2500), 500);
        assert_eq!(invert_pulse_width(1800), 1200);
        assert_eq!(invert_pulse_width(u16::MAX), 0);
    }
}
