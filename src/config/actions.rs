#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    Quit,
    Suspend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Select,
}

/// Actions available on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingAction {
    /// Open the login dialog.
    Login,
    /// Open the consultation booking dialog.
    Consultation,
    ToggleMenu,
    Search,
    NextCondition,
    PrevCondition,
}

/// Actions available inside an open dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Close,
    NextField,
    PrevField,
    Confirm,
    Submit,
}
