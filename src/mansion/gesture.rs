//! Hand-gesture control.
//!
//! Classification happens outside the crate; what arrives here is one of a
//! fixed set of labels, sampled on a fixed interval. A gesture has to be
//! held across several samples before it fires, so a hand passing through
//! a pose on the way to another one does not trigger anything.

use super::actions::Action;

/// Milliseconds between gesture samples.
pub const SAMPLE_INTERVAL_MS: f64 = 500.0;
/// Progress gained per matching sample, in percent.
pub const PROGRESS_STEP: u8 = 25;
pub const PROGRESS_FULL: u8 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    OpenAndClosed,
    Pointing,
    PointingAndOpen,
    PointingAndClosed,
    OpenHand,
    TwoOpenHands,
    ClosedHand,
    TwoClosedHands,
    None,
}

impl Gesture {
    pub const ALL: [Gesture; 9] = [
        Gesture::OpenAndClosed,
        Gesture::Pointing,
        Gesture::PointingAndOpen,
        Gesture::PointingAndClosed,
        Gesture::OpenHand,
        Gesture::TwoOpenHands,
        Gesture::ClosedHand,
        Gesture::TwoClosedHands,
        Gesture::None,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Gesture::OpenAndClosed => "Open & Closed",
            Gesture::Pointing => "Hand Pointing",
            Gesture::PointingAndOpen => "Pointing & Open",
            Gesture::PointingAndClosed => "Pointing & Closed",
            Gesture::OpenHand => "Open Hand",
            Gesture::TwoOpenHands => "Two Open Hands",
            Gesture::ClosedHand => "Closed Hand",
            Gesture::TwoClosedHands => "Two Closed Hands",
            Gesture::None => "None",
        }
    }

    /// Unknown labels read as [`Gesture::None`].
    pub fn from_label(label: &str) -> Gesture {
        Gesture::ALL
            .into_iter()
            .find(|g| g.label() == label)
            .unwrap_or(Gesture::None)
    }
}

/// Map a held gesture to an engine command. Before a game is running the
/// only live gesture is the one that starts it.
pub fn gesture_action(gesture: Gesture, has_started_game: bool) -> Action {
    if !has_started_game {
        return match gesture {
            Gesture::OpenAndClosed => Action::StartGame,
            _ => Action::NoAction,
        };
    }
    match gesture {
        Gesture::OpenAndClosed => Action::RestartGame,
        Gesture::OpenHand => Action::TurnLeft,
        Gesture::ClosedHand => Action::TurnRight,
        Gesture::TwoOpenHands | Gesture::TwoClosedHands => Action::TurnAround,
        Gesture::PointingAndClosed => Action::PickUpItem,
        Gesture::PointingAndOpen => Action::SearchRoom,
        Gesture::Pointing => Action::MoveForward,
        Gesture::None => Action::NoAction,
    }
}

/// Turns a stream of classified frames into one-shot gestures.
///
/// Frames can arrive at any rate; [`GestureDebouncer::update`] folds the
/// elapsed wall-clock time into fixed-interval samples the same way a
/// fixed-timestep game clock does.
pub struct GestureDebouncer {
    interval_ms: f64,
    accumulator: f64,
    last_timestamp: Option<f64>,
    previous: Gesture,
    progress: u8,
}

impl Default for GestureDebouncer {
    fn default() -> Self {
        Self::new(SAMPLE_INTERVAL_MS)
    }
}

impl GestureDebouncer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            accumulator: 0.0,
            last_timestamp: None,
            previous: Gesture::None,
            progress: 0,
        }
    }

    /// Feed the latest classification with a wall-clock timestamp. Takes at
    /// most one sample per call, once a full interval has built up.
    pub fn update(&mut self, now_ms: f64, gesture: Gesture) -> Option<Gesture> {
        let delta = match self.last_timestamp {
            // Clamp so a backgrounded tab does not dump a burst of samples.
            Some(prev) => (now_ms - prev).clamp(0.0, self.interval_ms * 2.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        if self.accumulator < self.interval_ms {
            return None;
        }
        self.accumulator -= self.interval_ms;
        self.sample(gesture)
    }

    /// One sample. Returns the gesture when it has been held long enough.
    pub fn sample(&mut self, gesture: Gesture) -> Option<Gesture> {
        let held = gesture == self.previous && gesture != Gesture::None;
        self.previous = gesture;

        if !held {
            self.progress = 0;
            return None;
        }
        if self.progress >= PROGRESS_FULL {
            self.progress = 0;
            return Some(gesture);
        }
        self.progress += PROGRESS_STEP;
        None
    }

    /// Percent toward firing the current gesture.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Used when gesture control is switched off.
    pub fn reset(&mut self) {
        self.progress = 0;
        self.previous = Gesture::None;
        self.accumulator = 0.0;
        self.last_timestamp = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for g in Gesture::ALL {
            assert_eq!(Gesture::from_label(g.label()), g);
        }
        assert_eq!(Gesture::from_label("Jazz Hands"), Gesture::None);
        assert_eq!(Gesture::from_label(""), Gesture::None);
    }

    #[test]
    fn only_open_and_closed_starts() {
        for g in Gesture::ALL {
            let expected = if g == Gesture::OpenAndClosed {
                Action::StartGame
            } else {
                Action::NoAction
            };
            assert_eq!(gesture_action(g, false), expected, "{g:?}");
        }
    }

    #[test]
    fn started_gesture_table() {
        let table = [
            (Gesture::OpenAndClosed, Action::RestartGame),
            (Gesture::OpenHand, Action::TurnLeft),
            (Gesture::ClosedHand, Action::TurnRight),
            (Gesture::TwoOpenHands, Action::TurnAround),
            (Gesture::TwoClosedHands, Action::TurnAround),
            (Gesture::PointingAndClosed, Action::PickUpItem),
            (Gesture::PointingAndOpen, Action::SearchRoom),
            (Gesture::Pointing, Action::MoveForward),
            (Gesture::None, Action::NoAction),
        ];
        for (g, a) in table {
            assert_eq!(gesture_action(g, true), a, "{g:?}");
        }
    }

    #[test]
    fn fires_on_sixth_identical_sample() {
        let mut d = GestureDebouncer::default();
        let mut progress = Vec::new();
        for _ in 0..5 {
            assert_eq!(d.sample(Gesture::OpenHand), None);
            progress.push(d.progress());
        }
        assert_eq!(progress, vec![0, 25, 50, 75, 100]);
        assert_eq!(d.sample(Gesture::OpenHand), Some(Gesture::OpenHand));
        assert_eq!(d.progress(), 0);
    }

    #[test]
    fn keeps_firing_while_held() {
        let mut d = GestureDebouncer::default();
        let fired: Vec<usize> = (0..16)
            .filter(|_| d.sample(Gesture::Pointing).is_some())
            .collect();
        // First fire on sample 6; after that every 5th sample.
        assert_eq!(fired, vec![5, 10, 15]);
    }

    #[test]
    fn change_resets_progress() {
        let mut d = GestureDebouncer::default();
        for _ in 0..4 {
            d.sample(Gesture::ClosedHand);
        }
        assert_eq!(d.progress(), 75);
        d.sample(Gesture::OpenHand);
        assert_eq!(d.progress(), 0);
    }

    #[test]
    fn none_never_fires() {
        let mut d = GestureDebouncer::default();
        for _ in 0..20 {
            assert_eq!(d.sample(Gesture::None), None);
            assert_eq!(d.progress(), 0);
        }
    }

    #[test]
    fn update_samples_once_per_interval() {
        let mut d = GestureDebouncer::new(500.0);
        assert_eq!(d.update(0.0, Gesture::OpenHand), None);
        // 16ms frames: nothing is sampled until 500ms have gone by.
        let mut t = 0.0;
        while t < 480.0 {
            t += 16.0;
            d.update(t, Gesture::OpenHand);
        }
        assert_eq!(d.progress(), 0);
        let mut fired = None;
        for step in 1..=6 {
            fired = d.update(t + 500.0 * step as f64, Gesture::OpenHand);
        }
        assert_eq!(fired, Some(Gesture::OpenHand));
    }

    #[test]
    fn long_gap_is_clamped() {
        let mut d = GestureDebouncer::new(500.0);
        d.update(0.0, Gesture::OpenHand);
        d.update(60_000.0, Gesture::OpenHand);
        assert_eq!(d.progress(), 0);
        d.update(60_500.0, Gesture::OpenHand);
        assert_eq!(d.progress(), 25);
    }

    #[test]
    fn reset_clears_everything() {
        let mut d = GestureDebouncer::default();
        for _ in 0..3 {
            d.sample(Gesture::TwoOpenHands);
        }
        d.reset();
        assert_eq!(d.progress(), 0);
        assert_eq!(d.sample(Gesture::TwoOpenHands), None);
        assert_eq!(d.progress(), 0);
    }
}
