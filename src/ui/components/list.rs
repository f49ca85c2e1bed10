use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{List as RatatuiList, ListItem, ListState};

use crate::Theme;
use crate::config::{KeyResolver, NavAction};
use crate::ui::{Component, Handled, Result};

pub enum ListEvent<T> {
    Changed(T),
    Activated(T),
}

pub trait ListRow {
    fn render_row(&self, theme: &Theme) -> ListItem<'static>;
}

/// Selectable list driven by the navigation keybindings.
pub struct List<T: ListRow + Clone> {
    items: Vec<T>,
    state: ListState,
    resolver: Arc<KeyResolver>,
}

impl<T: ListRow + Clone> List<T> {
    pub fn new(items: Vec<T>, resolver: Arc<KeyResolver>) -> Self {
        let mut state = ListState::default();
        if !items.is_empty() {
            state.select(Some(0));
        }
        Self {
            items,
            state,
            resolver,
        }
    }

    pub fn selected(&self) -> Option<&T> {
        self.state.selected().and_then(|i| self.items.get(i))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    fn change_event(&self, before: Option<usize>) -> Handled<ListEvent<T>> {
        match self.state.selected() {
            Some(selected) if Some(selected) != before => self
                .items
                .get(selected)
                .map_or(Handled::Consumed, |item| ListEvent::Changed(item.clone()).into()),
            _ => Handled::Consumed,
        }
    }
}

impl<T: ListRow + Clone> Component for List<T> {
    type Output = ListEvent<T>;

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Output>> {
        let before = self.state.selected();
        let last = self.items.len().saturating_sub(1);

        if self.resolver.matches_nav(&key, NavAction::Down) {
            let next = before.map_or(0, |i| (i + 1).min(last));
            self.state.select(Some(next));
            return Ok(self.change_event(before));
        }
        if self.resolver.matches_nav(&key, NavAction::Up) {
            let previous = before.map_or(0, |i| i.saturating_sub(1));
            self.state.select(Some(previous));
            return Ok(self.change_event(before));
        }
        if self.resolver.matches_nav(&key, NavAction::Home) {
            self.state.select(Some(0));
            return Ok(self.change_event(before));
        }
        if self.resolver.matches_nav(&key, NavAction::End) {
            self.state.select(Some(last));
            return Ok(self.change_event(before));
        }
        if self.resolver.matches_nav(&key, NavAction::Select) {
            return Ok(self
                .selected()
                .map_or(Handled::Ignored, |item| ListEvent::Activated(item.clone()).into()));
        }

        Ok(Handled::Ignored)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let items: Vec<ListItem> = self.items.iter().map(|i| i.render_row(theme)).collect();

        let list = RatatuiList::new(items)
            .highlight_style(
                Style::default()
                    .bg(theme.selection_bg())
                    .fg(theme.primary())
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}
