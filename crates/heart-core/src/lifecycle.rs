//! Start/stop bookkeeping for a front-end whose startup spans several awaits.

/// Slot for the running app.
///
/// A stop that arrives while startup is still in flight is remembered: the
/// later `install` is refused and hands the app back so the caller can tear
/// it down on the spot.
#[derive(Debug)]
pub struct Lifecycle<T> {
    stopped: bool,
    app: Option<T>,
}

impl<T> Default for Lifecycle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Lifecycle<T> {
    pub const fn new() -> Self {
        Self {
            stopped: false,
            app: None,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn install(&mut self, app: T) -> Result<(), T> {
        if self.stopped {
            return Err(app);
        }
        self.app = Some(app);
        Ok(())
    }

    pub fn app_mut(&mut self) -> Option<&mut T> {
        self.app.as_mut()
    }

    /// Mark stopped and take whatever was installed. Later calls return `None`.
    pub fn stop(&mut self) -> Option<T> {
        self.stopped = true;
        self.app.take()
    }
}
