//! Animated Counter
//!
//! Counts from zero up to the collection total on page load.

use std::time::Duration;

/// Default animation length
pub const DEFAULT_DURATION: Duration = Duration::from_millis(2500);

/// Browser side of the counter; runs the same easing as `CountUp::value_at`.
pub const COUNTER_SCRIPT: &str = r#"(function () {
  var nodes = document.querySelectorAll("[data-countup-end]");
  Array.prototype.forEach.call(nodes, function (node) {
    var end = Number(node.getAttribute("data-countup-end"));
    var duration = Number(node.getAttribute("data-countup-duration")) * 1000;
    var start = null;
    function valueAt(elapsed) {
      if (elapsed >= duration) return end;
      var eased = end * (1 - Math.pow(2, -10 * elapsed / duration)) * 1024 / 1023;
      return Math.min(end, Math.round(eased));
    }
    function step(now) {
      if (start === null) start = now;
      var elapsed = now - start;
      node.textContent = String(valueAt(elapsed));
      if (elapsed < duration) window.requestAnimationFrame(step);
    }
    node.textContent = "0";
    window.requestAnimationFrame(step);
  });
})();"#;

/// Ease-out exponential count from 0 to `end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountUp {
    end: u64,
    duration: Duration,
}

impl CountUp {
    pub fn new(end: u64) -> Self {
        Self {
            end,
            duration: DEFAULT_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Displayed value after `elapsed` time.
    ///
    /// Never decreases, never exceeds `end`, and equals `end` once the
    /// duration has passed.
    pub fn value_at(&self, elapsed: Duration) -> u64 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.end;
        }

        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = (1.0 - 2f64.powf(-10.0 * t)) * 1024.0 / 1023.0;
        let value = (self.end as f64 * eased).round();

        (value.max(0.0) as u64).min(self.end)
    }

    /// Every frame value at `fps` frames per second, ending on `end`
    pub fn frames(&self, fps: u32) -> impl Iterator<Item = u64> + '_ {
        let fps = fps.max(1);
        let count = (self.duration.as_secs_f64() * fps as f64).ceil() as u32;

        (0..=count).map(move |frame| {
            self.value_at(Duration::from_secs_f64(frame as f64 / fps as f64))
        })
    }

    /// Duration in seconds as written into the `data-countup-duration` attribute
    pub fn duration_attr(&self) -> String {
        format!("{}", self.duration.as_secs_f64())
    }
}
