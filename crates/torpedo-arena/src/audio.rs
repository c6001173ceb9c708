//! Audio handles attached to the torpedo.

use std::cell::Cell;
use std::rc::Rc;

use tracing::trace;

use torpedo_guidance::services::AudioCue;

/// A sound source that only counts how often it was played.
///
/// The counter is shared so the host can read it after the source has
/// been handed to the guidance.
pub struct CueSource {
    name: &'static str,
    plays: Rc<Cell<u32>>,
}

impl CueSource {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            plays: Rc::new(Cell::new(0)),
        }
    }

    pub fn counter(&self) -> Rc<Cell<u32>> {
        Rc::clone(&self.plays)
    }
}

impl AudioCue for CueSource {
    fn play(&mut self) {
        self.plays.set(self.plays.get() + 1);
        trace!(cue = self.name, plays = self.plays.get(), "cue played");
    }
}
