//! Event capture for pipeline assertions.

use std::sync::Mutex;

use chainprobe::{Reporter, VerifyEvent};

/// Records every event; the engine sees an ordinary reporter.
#[derive(Default)]
pub struct CollectingReporter {
    events: Mutex<Vec<VerifyEvent>>,
}

impl CollectingReporter {
    pub fn events(&self) -> Vec<VerifyEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Reporter for CollectingReporter {
    fn report(&self, event: &VerifyEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
