use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use massccs::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{info, warn};

const SPINNER_TICK_MS: u64 = 80;

/// Live state of the phase currently drawn on stderr.
struct ScanDisplay {
    bar: ProgressBar,
    phase: &'static str,
    started: Option<Instant>,
    evaluated: u64,
}

impl ScanDisplay {
    fn begin_phase(&mut self, name: &'static str) {
        self.phase = name;
        self.started = Some(Instant::now());
        self.evaluated = 0;
        self.bar.reset();
        self.bar.set_length(0);
        self.bar.set_style(spinner_style());
        self.bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        self.bar.set_message(name);
    }

    fn begin_positions(&mut self, total: u64) {
        self.bar.disable_steady_tick();
        self.bar.reset();
        self.bar.set_length(total);
        self.bar.set_style(positions_style());
        self.bar.set_message(self.phase);
    }

    fn position_done(&mut self) {
        self.evaluated += 1;
        self.bar.inc(1);
    }

    fn finish_positions(&mut self) {
        let total = self.bar.length().unwrap_or(self.evaluated);
        self.bar.set_position(total);
        self.bar.finish();
    }

    fn finish_phase(&mut self) {
        self.bar.disable_steady_tick();
        let elapsed = self.started.take().map_or(Duration::ZERO, |t| t.elapsed());
        info!(
            phase = self.phase,
            positions = self.evaluated,
            elapsed_ms = elapsed.as_millis() as u64,
            "Phase finished."
        );
        self.bar.finish_with_message(summary(self.phase, self.evaluated, elapsed));
    }

    fn note(&self, msg: String) {
        if self.bar.is_finished() {
            self.bar.set_message(msg);
        } else {
            self.bar.println(format!("  {}", msg));
        }
    }
}

fn summary(phase: &str, evaluated: u64, elapsed: Duration) -> String {
    let noun = if evaluated == 1 { "position" } else { "positions" };
    format!(
        "✓ {}: {} {} in {:.2}s",
        phase,
        evaluated,
        noun,
        elapsed.as_secs_f64()
    )
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn positions_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{msg:<8} [{bar:40.cyan/blue}] {pos}/{len} positions, {rate} ({eta})",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .with_key(
        "rate",
        |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.0}/s", state.per_sec());
        },
    )
    .with_key(
        "eta",
        |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.1}s left", state.eta().as_secs_f64());
        },
    )
    .progress_chars("=> ")
}

/// Draws scan progress on stderr and logs a summary when a phase ends.
#[derive(Clone)]
pub struct CliProgressHandler {
    display: Arc<Mutex<ScanDisplay>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(spinner_style());
        bar.finish_and_clear();

        Self {
            display: Arc::new(Mutex::new(ScanDisplay {
                bar,
                phase: "Scan",
                started: None,
                evaluated: 0,
            })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let display = self.display.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut display) = display.lock() else {
                warn!("Progress display mutex was poisoned; dropping event.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => display.begin_phase(name),
                Progress::PhaseFinish => display.finish_phase(),
                Progress::TaskStart { total_steps } => display.begin_positions(total_steps),
                Progress::TaskIncrement => display.position_done(),
                Progress::TaskFinish => display.finish_positions(),
                Progress::Message(msg) => display.note(msg),
            }
        })
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn hidden_handler() -> CliProgressHandler {
        CliProgressHandler::with_draw_target(ProgressDrawTarget::hidden())
    }

    #[test]
    fn handler_starts_idle() {
        let handler = hidden_handler();
        let display = handler.display.lock().unwrap();
        assert_eq!(display.bar.length(), Some(0));
        assert!(display.bar.is_finished());
        assert!(display.started.is_none());
    }

    #[test]
    fn scan_phase_counts_positions_and_summarizes() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Scan" });
        {
            let display = handler.display.lock().unwrap();
            assert_eq!(display.bar.message(), "Scan");
            assert!(display.started.is_some());
        }

        callback(Progress::TaskStart { total_steps: 25 });
        callback(Progress::TaskIncrement);
        callback(Progress::TaskIncrement);
        {
            let display = handler.display.lock().unwrap();
            assert_eq!(display.bar.length(), Some(25));
            assert_eq!(display.bar.position(), 2);
            assert_eq!(display.evaluated, 2);
        }

        callback(Progress::TaskFinish);
        assert_eq!(handler.display.lock().unwrap().bar.position(), 25);

        callback(Progress::PhaseFinish);
        let display = handler.display.lock().unwrap();
        assert!(display.bar.is_finished());
        assert!(display.started.is_none());
        assert!(display.bar.message().starts_with("✓ Scan: 2 positions in "));
    }

    #[test]
    fn summary_uses_singular_for_one_position() {
        assert_eq!(
            summary("Scan", 1, Duration::from_millis(1500)),
            "✓ Scan: 1 position in 1.50s"
        );
        assert_eq!(
            summary("Scan", 0, Duration::ZERO),
            "✓ Scan: 0 positions in 0.00s"
        );
    }

    #[test]
    fn message_after_finish_replaces_status() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        callback(Progress::Message("No probe configurations".to_string()));
        assert_eq!(
            handler.display.lock().unwrap().bar.message(),
            "No probe configurations"
        );
    }

    #[test]
    fn callback_is_usable_from_worker_threads() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart { name: "Scan" });
            callback(Progress::TaskStart { total_steps: 4 });
            for _ in 0..4 {
                callback(Progress::TaskIncrement);
            }
            callback(Progress::TaskFinish);
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        let display = handler.display.lock().unwrap();
        assert!(display.bar.is_finished());
        assert_eq!(display.bar.position(), 4);
        assert_eq!(display.evaluated, 4);
    }
}
