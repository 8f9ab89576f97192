//! Viewability Monitor
//!
//! Samples an element on a fixed cadence and declares it viewable after an
//! uninterrupted run of passing samples. Each tick runs, in order:
//!
//! 1. the CSS filter (fail on hidden / `display: none`);
//! 2. the occlusion detector (fail when covered beyond the threshold);
//! 3. the geometry calculator, whose percentage minus the obscured share
//!    must reach the accepted percentage.
//!
//! The caller's callback receives an owned snapshot after every tick.

use crate::calculator::GeometryViewabilityCalculator;
use crate::config::MonitorConfig;
use crate::css::css_invisibility;
use crate::error::ViewabilityError;
use crate::host::Host;
use crate::occlusion::OcclusionDetector;
use crate::state::{MonitorPhase, ViewabilityStatus, VisibilityCheckState};
use crate::timers::{Scheduler, TimerId, TimerQueue};

/// One monitoring session for one element
pub struct ViewabilityMonitor<E, F> {
    element: E,
    config: MonitorConfig,
    state: VisibilityCheckState,
    phase: MonitorPhase,
    timer: Option<TimerId>,
    tick: u64,
    last_error: Option<ViewabilityError>,
    calculator: GeometryViewabilityCalculator,
    occlusion: OcclusionDetector,
    callback: F,
}

impl<E: std::fmt::Debug, F> std::fmt::Debug for ViewabilityMonitor<E, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewabilityMonitor")
            .field("element", &self.element)
            .field("phase", &self.phase)
            .field("tick", &self.tick)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<E, F> ViewabilityMonitor<E, F>
where
    E: Copy + Eq + std::fmt::Debug,
    F: FnMut(ViewabilityStatus),
{
    /// Create an idle session. Nothing is sampled until [`start`](Self::start).
    pub fn new(element: E, config: MonitorConfig, callback: F) -> Self {
        let state = VisibilityCheckState::new(config.default_accepted_percentage);
        let calculator = GeometryViewabilityCalculator::new(config.fast_path_ratio, config.max_frame_depth);
        let occlusion = OcclusionDetector::new(config.occlusion_inset);
        Self {
            element,
            config,
            state,
            phase: MonitorPhase::Idle,
            timer: None,
            tick: 0,
            last_error: None,
            calculator,
            occlusion,
            callback,
        }
    }

    /// Begin a fresh session and start polling.
    ///
    /// Restarting clears the verdict, the tick count and the last error.
    /// The large-unit threshold is derived again from the first tick.
    pub fn start<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(timer) = self.timer.take() {
            scheduler.cancel(timer);
        }
        self.state = VisibilityCheckState::new(self.config.default_accepted_percentage);
        self.tick = 0;
        self.last_error = None;
        self.phase = MonitorPhase::Sampling;
        self.timer = Some(scheduler.schedule_periodic(self.config.cadence()));
        tracing::info!(
            "Monitoring {:?} every {}ms",
            self.element,
            self.config.cadence_ms
        );
    }

    /// Cancel polling. Safe to call between ticks at any time.
    pub fn stop<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(timer) = self.timer.take() {
            scheduler.cancel(timer);
            if !self.phase.is_terminal() {
                self.phase = MonitorPhase::Stopped;
            }
            tracing::info!("Stopped monitoring {:?} after {} ticks", self.element, self.tick);
        }
    }

    /// Handle one firing of the periodic timer.
    pub fn on_tick<H, S>(&mut self, host: &H, scheduler: &mut S) -> MonitorPhase
    where
        H: Host<Element = E>,
        S: Scheduler,
    {
        if self.timer.is_none() {
            return self.phase;
        }
        self.tick += 1;

        match self.sample(host) {
            Ok(passed) => {
                self.last_error = None;
                if passed {
                    self.state.consecutive_pass_count =
                        self.state.consecutive_pass_count.saturating_add(1);
                } else {
                    self.state.consecutive_pass_count = 0;
                }
            }
            Err(error) if error.is_permanent() => {
                tracing::warn!("Giving up on {:?}: {}", self.element, error);
                self.state.consecutive_pass_count = 0;
                self.state.duration = 0;
                self.last_error = Some(error);
                self.phase = MonitorPhase::Failed;
                if let Some(timer) = self.timer.take() {
                    scheduler.cancel(timer);
                }
                self.emit();
                return self.phase;
            }
            Err(error) => {
                tracing::warn!("Sample {} of {:?} failed: {}", self.tick, self.element, error);
                self.state.consecutive_pass_count = 0;
                self.last_error = Some(error);
            }
        }

        self.state.duration = u64::from(self.state.consecutive_pass_count) * self.config.cadence_ms;

        if self.state.consecutive_pass_count >= self.config.required_passes {
            if !self.state.viewability_status {
                tracing::info!(
                    "{:?} viewable after {}ms at {}%",
                    self.element,
                    self.state.duration,
                    self.state.percent_viewable
                );
            }
            self.state.viewability_status = true;
            self.phase = MonitorPhase::Viewable;
            if !self.config.debug_mode {
                if let Some(timer) = self.timer.take() {
                    scheduler.cancel(timer);
                }
            }
        }

        tracing::debug!(
            "Tick {}: {:?} viewable {}% obscured {}% passes {}",
            self.tick,
            self.element,
            self.state.percent_viewable,
            self.state.percent_obscured,
            self.state.consecutive_pass_count
        );

        self.emit();
        self.phase
    }

    /// Advance `queue` and dispatch the firings that belong to this session.
    ///
    /// Firings of other timers stay queued until their owners collect them,
    /// so several sessions can drive one shared queue in turn.
    pub fn drive<H>(&mut self, host: &H, queue: &mut TimerQueue, elapsed: std::time::Duration) -> MonitorPhase
    where
        H: Host<Element = E>,
    {
        queue.advance_queued(elapsed);
        let Some(timer) = self.timer else {
            return self.phase;
        };
        for _ in 0..queue.take_fired(timer) {
            if self.timer != Some(timer) {
                break;
            }
            self.on_tick(host, queue);
        }
        self.phase
    }

    /// Run one sample. `Ok(true)` is a passing sample.
    fn sample<H: Host<Element = E>>(&mut self, host: &H) -> Result<bool, ViewabilityError> {
        let window = host.owner_window(self.element);
        let rect = host.bounding_rect(self.element);

        // Large units keep the lower threshold for the rest of the session.
        if rect.area() >= self.config.large_ad_area {
            self.state.accepted_viewable_percentage = self.config.large_ad_accepted_percentage;
        }
        self.state.percent_obscured = 0.0;

        if let Some(reason) = css_invisibility(host, self.element) {
            tracing::trace!("{:?} invisible by style: {:?}", self.element, reason);
            self.state.percent_viewable = 0.0;
            return Ok(false);
        }

        if self.occlusion.is_dom_obscured(host, self.element, window, &mut self.state) {
            return Ok(false);
        }

        let report = match self.calculator.viewability_state(host, self.element, window) {
            Ok(report) => report,
            Err(error) => {
                self.state.percent_viewable = 0.0;
                return Err(error);
            }
        };
        self.state.percent_viewable = (report.percent_viewable - self.state.percent_obscured).max(0.0);

        Ok(self.state.percent_viewable > 0.0
            && self.state.percent_viewable >= self.state.accepted_viewable_percentage)
    }

    fn emit(&mut self) {
        let status = self.status();
        (self.callback)(status);
    }

    /// Snapshot of the current state
    pub fn status(&self) -> ViewabilityStatus {
        ViewabilityStatus {
            tick: self.tick,
            phase: self.phase,
            state: self.state.clone(),
            error: self.last_error.clone(),
        }
    }

    /// Current state
    pub fn state(&self) -> &VisibilityCheckState {
        &self.state
    }

    /// Current phase
    pub fn phase(&self) -> MonitorPhase {
        self.phase
    }

    /// Timer driving this session, while polling
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Is the periodic task still registered?
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Monitored element
    pub fn element(&self) -> E {
        self.element
    }

    /// Session configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
}

/// Create a session for `element` and start polling it.
pub fn check_viewability<E, S, F>(
    scheduler: &mut S,
    element: E,
    config: MonitorConfig,
    callback: F,
) -> ViewabilityMonitor<E, F>
where
    E: Copy + Eq + std::fmt::Debug,
    S: Scheduler,
    F: FnMut(ViewabilityStatus),
{
    let mut monitor = ViewabilityMonitor::new(element, config, callback);
    monitor.start(scheduler);
    monitor
}
