use std::time::Duration;

/// Accumulates per-stage durations across many pipeline runs.
///
/// Stage `i` is one slot in `duration`; `n` counts every sample pushed.
#[derive(Debug, Default)]
pub struct TimeCalc {
    n: usize,
    duration: Vec<Duration>,
}

impl TimeCalc {
    pub fn total(&self) -> Duration {
        self.duration.iter().sum::<Duration>()
    }

    /// Number of complete runs recorded.
    pub fn n(&self) -> usize {
        if self.duration.is_empty() {
            return 0;
        }
        self.n / self.duration.len()
    }

    /// Average wall time of one full run, `Duration::ZERO` before the first one.
    pub fn avg(&self) -> Duration {
        match self.n() {
            0 => Duration::ZERO,
            n => self.total() / n as u32,
        }
    }

    /// Average time spent in stage `i`, or `None` if the stage was never recorded.
    pub fn avg_i(&self, i: usize) -> Option<Duration> {
        let n = self.n();
        if n == 0 {
            return None;
        }
        self.duration.get(i).map(|d| *d / n as u32)
    }

    pub fn add_or_push(&mut self, i: usize, x: Duration) {
        match self.duration.get_mut(i) {
            Some(elem) => *elem += x,
            None => {
                if i >= self.duration.len() {
                    self.duration.push(x)
                }
            }
        }
        self.n += 1;
    }
}
