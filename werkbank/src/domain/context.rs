use super::csrf::CsrfToken;

/// Session-derived state handed into a pipeline call and read back out.
///
/// The pipelines never touch the session directly; the HTTP adapter loads
/// this context before the call and writes the flash change back afterwards.
#[derive(Debug, Clone)]
pub struct RequestContext {
    csrf_token: CsrfToken,
    flash: Option<String>,
    flash_changed: bool,
}

/// What the adapter has to do with the stored flash after a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlashChange {
    Unchanged,
    Set(String),
    Cleared,
}

impl RequestContext {
    pub fn new(csrf_token: CsrfToken, flash: Option<String>) -> Self {
        Self {
            csrf_token,
            flash,
            flash_changed: false,
        }
    }

    pub fn csrf_token(&self) -> &CsrfToken {
        &self.csrf_token
    }

    /// Pulls the pending flash message, clearing it.
    pub fn take_flash(&mut self) -> Option<String> {
        let flash = self.flash.take();
        if flash.is_some() {
            self.flash_changed = true;
        }
        flash
    }

    pub fn set_flash(&mut self, message: impl Into<String>) {
        self.flash = Some(message.into());
        self.flash_changed = true;
    }

    pub fn flash(&self) -> Option<&str> {
        self.flash.as_deref()
    }

    pub fn into_flash_change(self) -> FlashChange {
        match (self.flash_changed, self.flash) {
            (false, _) => FlashChange::Unchanged,
            (true, Some(message)) => FlashChange::Set(message),
            (true, None) => FlashChange::Cleared,
        }
    }
}
