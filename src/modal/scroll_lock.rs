/// Reference-counted suppression of background scrolling.
///
/// Every visible dialog holds the lock once, so closing one of two open
/// dialogs keeps the page locked.
#[derive(Debug, Default)]
pub struct ScrollLock {
    holders: usize,
}

impl ScrollLock {
    pub const fn new() -> Self {
        Self { holders: 0 }
    }

    pub const fn acquire(&mut self) {
        self.holders += 1;
    }

    pub const fn release(&mut self) {
        self.holders = self.holders.saturating_sub(1);
    }

    pub const fn is_locked(&self) -> bool {
        self.holders > 0
    }

    pub const fn holders(&self) -> usize {
        self.holders
    }
}
