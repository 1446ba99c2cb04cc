//! 换算性能基准测试
//!
//! 正向与逆向换算都处于每条轨迹命令 / 每个上报周期的热路径上。

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ssc32_calibration::transform::{angle_to_pulse_width, pulse_width_to_angle, servo_command};
use ssc32_calibration::{JointCalibration, Rad};

fn bench_forward(c: &mut Criterion) {
    let joint = JointCalibration::new("shoulder", 0, Rad(-1.57), Rad(1.57))
        .with_offset(Rad(0.1))
        .inverted(true);

    c.bench_function("angle_to_pulse_width", |b| {
        b.iter(|| angle_to_pulse_width(black_box(Rad(0.75)), black_box(&joint)))
    });

    c.bench_function("servo_command_with_speed", |b| {
        b.iter(|| servo_command(black_box(Rad(0.75)), black_box(Some(1.2)), black_box(&joint)))
    });
}

fn bench_inverse(c: &mut Criterion) {
    let joint = JointCalibration::new("shoulder", 0, Rad(-1.57), Rad(1.57)).inverted(true);

    c.bench_function("pulse_width_to_angle", |b| {
        b.iter(|| pulse_width_to_angle(black_box(1818), black_box(&joint)))
    });
}

criterion_group!(benches, bench_forward, bench_inverse);
criterion_main!(benches);
