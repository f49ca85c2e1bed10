use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::Theme;
use crate::config::ToastConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Where a toast is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastPhase {
    /// Sliding in; progress goes from 0.0 to 1.0.
    Entering(f64),
    Shown,
    /// Sliding out; progress goes from 0.0 to 1.0.
    Exiting(f64),
    Expired,
}

/// Entrance, dwell and exit durations of a toast.
///
/// The dwell is counted from the moment the toast is shown, so the entrance
/// runs inside it. The exit starts once both have elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTiming {
    pub enter: Duration,
    pub dwell: Duration,
    pub exit: Duration,
}

impl ToastTiming {
    /// Phase of a toast that was shown `elapsed` ago.
    pub fn phase(&self, elapsed: Duration) -> ToastPhase {
        if elapsed < self.enter {
            return ToastPhase::Entering(elapsed.as_secs_f64() / self.enter.as_secs_f64());
        }
        let shown_until = self.enter.max(self.dwell);
        if elapsed < shown_until {
            return ToastPhase::Shown;
        }
        let exiting = elapsed - shown_until;
        if exiting < self.exit {
            return ToastPhase::Exiting(exiting.as_secs_f64() / self.exit.as_secs_f64());
        }
        ToastPhase::Expired
    }
}

impl Default for ToastTiming {
    fn default() -> Self {
        Self {
            enter: Duration::from_millis(300),
            dwell: Duration::from_millis(3000),
            exit: Duration::from_millis(300),
        }
    }
}

impl From<&ToastConfig> for ToastTiming {
    fn from(config: &ToastConfig) -> Self {
        Self {
            enter: Duration::from_millis(config.enter_ms),
            dwell: Duration::from_millis(config.dwell_ms),
            exit: Duration::from_millis(config.exit_ms),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    message: String,
    kind: ToastKind,
    created_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn kind(&self) -> ToastKind {
        self.kind
    }
}

/// Stack of transient notifications in the top-right corner.
pub struct ToastManager {
    toasts: VecDeque<Toast>,
    timing: ToastTiming,
    max_visible: usize,
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new(ToastTiming::default(), 3)
    }
}

impl ToastManager {
    pub fn new(timing: ToastTiming, max_visible: usize) -> Self {
        Self {
            toasts: VecDeque::new(),
            timing,
            max_visible: max_visible.max(1),
        }
    }

    pub fn from_config(config: &ToastConfig) -> Self {
        Self::new(config.into(), config.max_visible)
    }

    /// Show a toast. Its lifecycle starts now.
    pub fn show(&mut self, mut toast: Toast) {
        toast.created_at = Instant::now();
        tracing::debug!(kind = ?toast.kind(), message = %toast.message(), "Showing toast");
        self.toasts.push_back(toast);
        while self.toasts.len() > self.max_visible {
            self.toasts.pop_front();
        }
    }

    /// Drop toasts whose exit animation has finished.
    pub fn on_tick(&mut self) {
        self.prune(Instant::now());
    }

    fn prune(&mut self, now: Instant) {
        let timing = self.timing;
        self.toasts
            .retain(|t| timing.phase(now.duration_since(t.created_at)) != ToastPhase::Expired);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let now = Instant::now();
        let toast_height = 3u16;
        let toast_width = 50u16.min(area.width.saturating_sub(4));

        for (i, toast) in self.toasts.iter().enumerate() {
            let slot = u16::try_from(i).unwrap_or(u16::MAX);
            let y = area.y + 1 + slot.saturating_mul(toast_height + 1);
            if y + toast_height > area.bottom() {
                break;
            }

            // Slide horizontally: hidden offset shrinks while entering and grows while exiting.
            let hidden = match self.timing.phase(now.duration_since(toast.created_at)) {
                ToastPhase::Entering(progress) => 1.0 - progress,
                ToastPhase::Shown => 0.0,
                ToastPhase::Exiting(progress) => progress,
                ToastPhase::Expired => continue,
            };
            let offset = slide_offset(toast_width, hidden);
            let visible_width = toast_width - offset;
            if visible_width < 3 {
                continue;
            }
            let x = area.right().saturating_sub(toast_width + 2) + offset;
            let toast_area = Rect::new(x, y, visible_width, toast_height);

            let (border_color, icon) = match toast.kind() {
                ToastKind::Success => (theme.success(), "✓"),
                ToastKind::Error => (theme.error(), "✗"),
            };

            frame.render_widget(Clear, toast_area);

            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color))
                .style(Style::default().bg(theme.surface0()));

            let paragraph = Paragraph::new(format!("{icon} {}", toast.message()))
                .block(block)
                .style(Style::default().fg(theme.text()).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center);

            frame.render_widget(paragraph, toast_area);
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn slide_offset(width: u16, hidden: f64) -> u16 {
    (f64::from(width) * hidden.clamp(0.0, 1.0)).round() as u16
}
