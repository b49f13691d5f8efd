//! Navigation sinks
//!
//! The router and the auto-logout exit point only decide *where* to go.
//! A `Navigator` is told the outcome and does whatever moving there means
//! for the current front end.

use std::sync::Mutex;

use super::Route;

/// Receives every navigation decision.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, route: &'static Route);
}

/// Navigator for the terminal front end: logs and remembers the last route.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    current: Mutex<Option<&'static Route>>,
}

impl TerminalNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The route most recently navigated to.
    pub fn current(&self) -> Option<&'static Route> {
        *self.current.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl Navigator for TerminalNavigator {
    fn navigate_to(&self, route: &'static Route) {
        log::debug!("Navigating to {} ({})", route.path, route.title);
        *self.current.lock().unwrap_or_else(|p| p.into_inner()) = Some(route);
    }
}

/// Records every navigation for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<&'static str>>,
}

#[cfg(test)]
impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths navigated to, oldest first.
    pub fn paths(&self) -> Vec<&'static str> {
        self.visits.lock().unwrap().clone()
    }

    /// How many times the given path was navigated to.
    pub fn count(&self, path: &str) -> usize {
        self.visits.lock().unwrap().iter().filter(|p| **p == path).count()
    }

    pub fn last(&self) -> Option<&'static str> {
        self.visits.lock().unwrap().last().copied()
    }
}

#[cfg(test)]
impl Navigator for RecordingNavigator {
    fn navigate_to(&self, route: &'static Route) {
        self.visits.lock().unwrap().push(route.path);
    }
}
