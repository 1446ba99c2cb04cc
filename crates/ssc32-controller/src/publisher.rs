//! 周期状态上报线程
//!
//! 固定周期调用一次上报回调。停止信号通过 crossbeam 通道传递，
//! 等待下一周期时用 `recv_timeout` 睡眠，停止请求可以立即唤醒线程。

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// 周期上报线程句柄
///
/// 调用 [`stop`](Self::stop) 或 drop 句柄时线程退出并被 join。
pub struct StatePublisher {
    period: Duration,
    stop_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl StatePublisher {
    /// 启动上报线程
    ///
    /// 第一次上报在启动后立即发生，之后按 `period` 对齐。
    /// 单次回调耗时超过周期时不补发，直接进入下一周期。
    pub fn spawn<F>(period: Duration, mut tick: F) -> std::io::Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let (stop_tx, stop_rx) = bounded::<()>(1);

        let thread = std::thread::Builder::new()
            .name("ssc32-state-publisher".into())
            .spawn(move || run_loop(period, &stop_rx, &mut tick))?;

        debug!(period_ms = period.as_millis() as u64, "state publisher started");

        Ok(Self {
            period,
            stop_tx: Some(stop_tx),
            thread: Some(thread),
        })
    }

    /// 上报周期
    pub fn period(&self) -> Duration {
        self.period
    }

    /// 线程是否仍在运行
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// 停止线程并等待其退出
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // 关闭发送端即可唤醒 recv_timeout
        self.stop_tx.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("state publisher thread panicked");
            }
        }
    }
}

impl Drop for StatePublisher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_loop<F: FnMut()>(period: Duration, stop_rx: &Receiver<()>, tick: &mut F) {
    let mut next = Instant::now();
    loop {
        tick();

        next += period;
        let now = Instant::now();
        if next < now {
            trace!("state publisher overran its period");
            next = now + period;
        }

        match stop_rx.recv_timeout(next - now) {
            Err(RecvTimeoutError::Timeout) => continue,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    debug!("state publisher stopped");
}
