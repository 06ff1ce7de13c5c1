//! Focus hand-off to the host UI.
//!
//! The session decides *where* focus goes; the host decides what focusing
//! means (moving a terminal cursor, calling a widget toolkit, nothing at
//! all). The core calls [`FocusTarget`] and never implements it beyond the
//! headless [`NoFocus`].

/// An element inside a prompt that can hold keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    /// The panel of the question at this index.
    Panel(usize),
    /// The free-text input of the question at this index.
    OtherInput(usize),
}

/// Capability the host provides so the core can direct focus.
pub trait FocusTarget {
    /// Move keyboard focus to `focus`.
    fn focus(&mut self, focus: Focus);

    /// Mark a tab (and its prompt text) active or inactive.
    fn mark_active(&mut self, tab: usize, active: bool) {
        let _ = (tab, active);
    }
}

/// Host for headless sessions: ignores every directive.
pub struct NoFocus;

impl FocusTarget for NoFocus {
    fn focus(&mut self, _focus: Focus) {}
}
