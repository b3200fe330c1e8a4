//! Deferred install prompt
//!
//! The browser offers a one-shot install event; we hold on to it until the
//! player clicks the install button. Generic over the event type so the
//! flow is testable off the web.

#[derive(Debug)]
pub struct InstallFlow<E> {
    deferred: Option<E>,
}

impl<E> Default for InstallFlow<E> {
    fn default() -> Self {
        Self { deferred: None }
    }
}

impl<E> InstallFlow<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the platform event for later; a newer event replaces an older one
    pub fn defer(&mut self, event: E) {
        self.deferred = Some(event);
    }

    /// Whether the install button should be shown
    pub fn can_install(&self) -> bool {
        self.deferred.is_some()
    }

    /// Hand over the event for prompting. Works once per deferred event.
    pub fn take(&mut self) -> Option<E> {
        self.deferred.take()
    }
}
