//! Build-in animation state machine.

/// Build-in animation options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    pub enabled: bool,
    /// Seconds from the first visible frame to full height.
    pub build_time: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            build_time: 1.5,
        }
    }
}

impl AnimationConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationPhase {
    /// Waiting for the first visible frame.
    #[default]
    Idle,
    Animating,
    /// Full height applied; no more scale updates until restarted.
    Done,
}

/// Drives the height scale of one chart, frame by frame.
///
/// [`step`](Self::step) returns the scale to apply this frame, or `None`
/// when nothing should change. Hiding the chart before the animation
/// finishes rewinds it, so it replays from the start once visible again.
#[derive(Debug, Clone, Default)]
pub struct AnimationController {
    config: AnimationConfig,
    elapsed: f32,
    phase: AnimationPhase,
}

impl AnimationController {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            elapsed: 0.0,
            phase: AnimationPhase::Idle,
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AnimationConfig) {
        self.config = config;
        self.restart();
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == AnimationPhase::Done
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        match self.phase {
            AnimationPhase::Done => 1.0,
            _ if self.config.build_time > 0.0 => (self.elapsed / self.config.build_time).min(1.0),
            _ => 0.0,
        }
    }

    /// Rewind for a freshly rebuilt chart.
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.phase = AnimationPhase::Idle;
    }

    /// Advance by `dt` seconds and return the height scale to apply, if any.
    pub fn step(&mut self, dt: f32, visible: bool) -> Option<f32> {
        if !visible {
            if self.phase != AnimationPhase::Done {
                self.elapsed = 0.0;
                self.phase = AnimationPhase::Idle;
            }
            return None;
        }

        if self.phase == AnimationPhase::Done {
            return None;
        }

        if !self.config.enabled || self.config.build_time <= 0.0 {
            self.phase = AnimationPhase::Done;
            return Some(1.0);
        }

        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.config.build_time {
            self.phase = AnimationPhase::Done;
            tracing::debug!("Build-in animation finished after {:.2}s", self.elapsed);
            Some(1.0)
        } else {
            self.phase = AnimationPhase::Animating;
            Some(self.elapsed / self.config.build_time)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_to_completion() {
        let mut anim = AnimationController::new(AnimationConfig {
            enabled: true,
            build_time: 1.0,
        });
        assert_eq!(anim.step(0.25, true), Some(0.25));
        assert_eq!(anim.phase(), AnimationPhase::Animating);
        assert_eq!(anim.step(0.5, true), Some(0.75));
        assert_eq!(anim.step(0.5, true), Some(1.0));
        assert!(anim.is_done());
        assert_eq!(anim.step(0.5, true), None);
    }

    #[test]
    fn test_disabled_applies_full_height_once() {
        let mut anim = AnimationController::new(AnimationConfig::disabled());
        assert_eq!(anim.step(0.016, true), Some(1.0));
        assert_eq!(anim.step(0.016, true), None);
        assert_eq!(anim.step(0.016, true), None);
    }

    #[test]
    fn test_hidden_mid_animation_rewinds() {
        let mut anim = AnimationController::new(AnimationConfig {
            enabled: true,
            build_time: 2.0,
        });
        anim.step(1.0, true);
        assert_eq!(anim.step(1.0, false), None);
        assert_eq!(anim.elapsed(), 0.0);
        assert_eq!(anim.phase(), AnimationPhase::Idle);
        assert_eq!(anim.step(0.5, true), Some(0.25));
    }

    #[test]
    fn test_hidden_after_done_stays_done() {
        let mut anim = AnimationController::new(AnimationConfig::disabled());
        anim.step(0.1, true);
        anim.step(0.1, false);
        assert!(anim.is_done());
        assert_eq!(anim.step(0.1, true), None);
    }

    #[test]
    fn test_restart() {
        let mut anim = AnimationController::new(AnimationConfig::default());
        anim.step(5.0, true);
        assert!(anim.is_done());
        anim.restart();
        assert_eq!(anim.progress(), 0.0);
        assert!(anim.step(0.15, true).is_some());
    }
}
