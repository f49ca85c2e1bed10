//! The clinic's landing page.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, ListItem, Paragraph};

use crate::Theme;
use crate::clinic::catalog::{CONSULTATION, LOGIN};
use crate::clinic::conditions::{CONDITIONS, Condition};
use crate::clinic::stats::StatCounter;
use crate::config::{GlobalAction, KeyResolver, LandingAction, NavAction};
use crate::modal::ModalId;
use crate::search::Matcher;
use crate::ui::{
    Component, Handled, List, ListEvent, ListRow, Result, Screen, TextInput, TextInputEvent,
};

/// Rows scrolled past before the header switches to its compact style.
const HEADER_THRESHOLD: u16 = 5;
/// Fraction of the remaining distance covered per tick while smooth scrolling.
const SCROLL_EASING: f64 = 0.35;
/// How long a card stays dimmed after it first scrolls into view.
const REVEAL: Duration = Duration::from_millis(600);

const HERO_STATS: &[(&str, &str)] = &[
    ("50.000+", "behandelte Patienten"),
    ("24/7", "ärztliche Erreichbarkeit"),
    ("1.200", "Rezepte pro Tag"),
];

const SERVICES: &[(&str, &str)] = &[
    ("Videosprechstunde", "Sprechen Sie per Video mit zugelassenen Ärzten."),
    ("E-Rezept", "Ihr Rezept direkt in die Apotheke Ihrer Wahl."),
    ("Krankschreibung", "Arbeitsunfähigkeitsbescheinigung digital erhalten."),
    ("Facharzttermine", "Kardiologie, Dermatologie, Psychiatrie und mehr."),
];

const STEPS: &[&str] = &[
    "1. Symptome beschreiben",
    "2. Mit einem Arzt sprechen",
    "3. Rezept oder Krankschreibung erhalten",
];

const TESTIMONIALS: &[(&str, &str)] = &[
    ("Schnell und unkompliziert, nach zehn Minuten hatte ich mein Rezept.", "Anna, Berlin"),
    ("Die Ärztin hat sich viel Zeit genommen. Sehr empfehlenswert!", "Markus, Köln"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LandingMsg {
    OpenModal(ModalId),
    ShowCondition(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Start,
    Services,
    Conditions,
    Steps,
    Testimonials,
}

impl Section {
    pub const ALL: [Self; 5] = [
        Self::Start,
        Self::Services,
        Self::Conditions,
        Self::Steps,
        Self::Testimonials,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Services => "Leistungen",
            Self::Conditions => "Krankheiten",
            Self::Steps => "So funktioniert's",
            Self::Testimonials => "Bewertungen",
        }
    }
}

impl ListRow for Section {
    fn render_row(&self, _theme: &Theme) -> ListItem<'static> {
        ListItem::new(self.title())
    }
}

/// Rendered page content and where its interactive parts ended up.
#[derive(Default)]
struct Page {
    lines: Vec<Line<'static>>,
    sections: Vec<(Section, u16)>,
    hero_end: u16,
    hero_button: Option<u16>,
    conditions: Vec<(u16, &'static Condition)>,
    /// Lines that fade in when they first appear.
    cards: Vec<u16>,
}

impl Page {
    fn push(&mut self, line: Line<'static>) -> u16 {
        self.lines.push(line);
        self.last_index()
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    fn section(&mut self, section: Section, heading: Style) {
        let index = self.push(Line::from(Span::styled(section.title(), heading)));
        self.sections.push((section, index));
        self.blank();
    }

    fn card(&mut self, line: Line<'static>) -> u16 {
        let index = self.push(line);
        self.cards.push(index);
        index
    }

    fn last_index(&self) -> u16 {
        u16::try_from(self.lines.len().saturating_sub(1)).unwrap_or(u16::MAX)
    }

    fn height(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
    }
}

pub struct LandingScreen {
    resolver: Arc<KeyResolver>,
    matcher: Matcher,
    stats: Vec<(StatCounter, &'static str)>,
    menu: Option<List<Section>>,
    search: Option<TextInput>,
    filter: String,
    conditions: Vec<&'static Condition>,
    selected: usize,

    scroll: f64,
    scroll_target: u16,
    max_scroll: u16,
    viewport: u16,
    first_seen: HashMap<u16, Instant>,

    // Layout of the last render, for mouse hits and section jumps
    body_area: Rect,
    login_area: Rect,
    consultation_area: Rect,
    menu_area: Rect,
    menu_popup: Rect,
    section_offsets: Vec<(Section, u16)>,
    hero_button: Option<u16>,
    condition_lines: Vec<(u16, &'static Condition)>,
}

impl LandingScreen {
    pub fn new(resolver: Arc<KeyResolver>) -> Self {
        let stats = HERO_STATS
            .iter()
            .filter_map(|(text, label)| StatCounter::parse(text).map(|counter| (counter, *label)))
            .collect();

        Self {
            resolver,
            matcher: Matcher::new(),
            stats,
            menu: None,
            search: None,
            filter: String::new(),
            conditions: CONDITIONS.iter().collect(),
            selected: 0,
            scroll: 0.0,
            scroll_target: 0,
            max_scroll: u16::MAX,
            viewport: 0,
            first_seen: HashMap::new(),
            body_area: Rect::default(),
            login_area: Rect::default(),
            consultation_area: Rect::default(),
            menu_area: Rect::default(),
            menu_popup: Rect::default(),
            section_offsets: Vec::new(),
            hero_button: None,
            condition_lines: Vec::new(),
        }
    }

    /// Whether the screen is taking text input and wants every key.
    pub const fn is_capturing(&self) -> bool {
        self.search.is_some()
    }

    pub const fn menu_open(&self) -> bool {
        self.menu.is_some()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn selected_condition(&self) -> Option<&'static Condition> {
        self.conditions.get(self.selected).copied()
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn scroll_offset(&self) -> u16 {
        self.scroll.round().max(0.0) as u16
    }

    /// Whether the header has switched to its scrolled style.
    pub fn header_scrolled(&self) -> bool {
        self.scroll_offset() > HEADER_THRESHOLD
    }

    fn toggle_menu(&mut self) {
        self.menu = match self.menu {
            Some(_) => None,
            None => Some(List::new(Section::ALL.to_vec(), self.resolver.clone())),
        };
    }

    fn open_search(&mut self) {
        self.search = Some(
            TextInput::new("Krankheit suchen")
                .with_value(self.filter.clone())
                .with_placeholder("z. B. Halsschmerzen"),
        );
    }

    fn set_filter(&mut self, filter: String) {
        self.conditions = self.matcher.rank(CONDITIONS, &filter, |c| c.name);
        tracing::debug!(filter, matches = self.conditions.len(), "Filtered conditions");
        self.filter = filter;
        self.selected = 0;

        // Everything below the condition heading moved, so it fades in again
        let heading = self
            .section_offsets
            .iter()
            .find(|(s, _)| *s == Section::Conditions)
            .map(|(_, offset)| *offset);
        if let Some(heading) = heading {
            self.first_seen.retain(|line, _| *line <= heading);
        }
    }

    /// Whether a page line is still inside its fade-in.
    fn revealing(&self, line: u16, now: Instant) -> bool {
        self.first_seen
            .get(&line)
            .is_some_and(|seen| now.saturating_duration_since(*seen) < REVEAL)
    }

    fn select_next(&mut self) {
        if !self.conditions.is_empty() {
            self.selected = (self.selected + 1) % self.conditions.len();
            self.reveal_selected();
        }
    }

    fn select_prev(&mut self) {
        let count = self.conditions.len();
        if count > 0 {
            self.selected = (self.selected + count - 1) % count;
            self.reveal_selected();
        }
    }

    /// Scroll so the selected condition is inside the viewport.
    fn reveal_selected(&mut self) {
        let Some(selected) = self.selected_condition() else {
            return;
        };
        let Some(line) = self
            .condition_lines
            .iter()
            .find(|(_, c)| c.name == selected.name)
            .map(|(line, _)| *line)
        else {
            return;
        };
        if line < self.scroll_target {
            self.scroll_target = line;
        } else if self.viewport > 0 && line >= self.scroll_target + self.viewport {
            self.scroll_target = (line + 1).saturating_sub(self.viewport).min(self.max_scroll);
        }
    }

    /// Start a smooth scroll to a section.
    pub fn jump_to(&mut self, section: Section) {
        if let Some((_, offset)) = self.section_offsets.iter().find(|(s, _)| *s == section) {
            self.scroll_target = (*offset).min(self.max_scroll);
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        let target = i32::from(self.scroll_target) + delta;
        let target = u16::try_from(target.max(0)).unwrap_or(u16::MAX).min(self.max_scroll);
        self.scroll_target = target;
    }

    /// Mouse input for the page. Wheel scrolling does nothing while a dialog
    /// holds the scroll lock.
    pub fn handle_mouse(&mut self, event: MouseEvent, scroll_locked: bool) -> Handled<LandingMsg> {
        match event.kind {
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp if scroll_locked => {
                Handled::Ignored
            }
            MouseEventKind::ScrollDown => {
                self.scroll_by(3);
                self.scroll = f64::from(self.scroll_target);
                Handled::Consumed
            }
            MouseEventKind::ScrollUp => {
                self.scroll_by(-3);
                self.scroll = f64::from(self.scroll_target);
                Handled::Consumed
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(Position::new(event.column, event.row))
            }
            _ => Handled::Ignored,
        }
    }

    fn handle_click(&mut self, position: Position) -> Handled<LandingMsg> {
        if self.login_area.contains(position) {
            return LandingMsg::OpenModal(LOGIN.into()).into();
        }
        if self.consultation_area.contains(position) {
            return LandingMsg::OpenModal(CONSULTATION.into()).into();
        }
        if self.menu_area.contains(position) {
            self.toggle_menu();
            return Handled::Consumed;
        }
        if self.menu.is_some() && self.menu_popup.contains(position) {
            return Handled::Consumed;
        }
        if !self.body_area.contains(position) {
            return Handled::Ignored;
        }

        let line = position.y - self.body_area.y + self.scroll_offset();
        if self.hero_button == Some(line) {
            return LandingMsg::OpenModal(CONSULTATION.into()).into();
        }
        if let Some((_, condition)) = self.condition_lines.iter().find(|(l, _)| *l == line) {
            let name = condition.name;
            if let Some(index) = self.conditions.iter().position(|c| c.name == name) {
                self.selected = index;
            }
            return LandingMsg::ShowCondition(name.to_string()).into();
        }
        Handled::Ignored
    }

    fn build_page(&self, theme: &Theme, now: Instant) -> Page {
        let heading = Style::default().fg(theme.primary()).add_modifier(Modifier::BOLD);
        let text = Style::default().fg(theme.text());
        let subtle = Style::default().fg(theme.subtext0());
        let mut page = Page::default();

        page.section(Section::Start, heading);
        page.push(Line::from(Span::styled(
            "Ihr Arzt. Online. Rund um die Uhr.",
            Style::default().fg(theme.text()).add_modifier(Modifier::BOLD),
        )));
        page.push(Line::from(Span::styled(
            "Ärztliche Beratung per Video, Rezepte und Krankschreibungen bequem von zu Hause.",
            subtle,
        )));
        page.blank();
        let mut stats = Vec::new();
        for (counter, label) in &self.stats {
            stats.push(Span::styled(
                counter.display(now),
                Style::default().fg(theme.peach()).add_modifier(Modifier::BOLD),
            ));
            stats.push(Span::styled(format!(" {label}    "), subtle));
        }
        page.push(Line::from(stats));
        page.blank();
        let button = Style::default()
            .fg(theme.base())
            .bg(theme.primary())
            .add_modifier(Modifier::BOLD);
        page.hero_button = Some(page.push(Line::from(Span::styled("[ Behandlung starten ]", button))));
        page.blank();
        page.hero_end = page.height();

        page.section(Section::Services, heading);
        for (name, description) in SERVICES {
            page.card(Line::from(vec![
                Span::styled(format!("• {name}: "), text.add_modifier(Modifier::BOLD)),
                Span::styled(*description, subtle),
            ]));
        }
        page.blank();

        page.section(Section::Conditions, heading);
        let search_key = self.resolver.display_landing(LandingAction::Search);
        let filter_line = if self.filter().is_empty() {
            format!("{search_key} zum Filtern, Enter für Details")
        } else {
            format!("Filter: „{}“ ({} Treffer)", self.filter(), self.conditions.len())
        };
        page.push(Line::from(Span::styled(filter_line, subtle)));
        if self.conditions.is_empty() {
            page.push(Line::from(Span::styled("Keine passende Krankheit gefunden.", subtle)));
        }
        for (index, condition) in self.conditions.iter().enumerate() {
            let selected = index == self.selected;
            let marker = if selected { "▸ " } else { "  " };
            let name_style = if selected {
                Style::default()
                    .fg(theme.primary())
                    .bg(theme.selection_bg())
                    .add_modifier(Modifier::BOLD)
            } else {
                text
            };
            let line = page.card(Line::from(vec![
                Span::styled(format!("{marker}{}", condition.name), name_style),
                Span::styled(format!("  {}", condition.description), subtle),
            ]));
            page.conditions.push((line, *condition));
        }
        page.blank();

        page.section(Section::Steps, heading);
        for step in STEPS {
            page.card(Line::from(Span::styled(*step, text)));
        }
        page.blank();

        page.section(Section::Testimonials, heading);
        for (quote, author) in TESTIMONIALS {
            page.card(Line::from(Span::styled(format!("„{quote}“"), text)));
            page.card(Line::from(Span::styled(format!("  {author}"), subtle)));
        }
        page
    }

    fn render_header(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let (background, border) = if self.header_scrolled() {
            (theme.mantle(), theme.lavender())
        } else {
            (theme.base(), theme.surface0())
        };
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(background));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                " ✚ TeleClinic",
                Style::default().fg(theme.primary()).add_modifier(Modifier::BOLD),
            )),
            inner,
        );

        let menu_glyph = if self.menu_open() { "✕" } else { "☰" };
        let buttons = [
            ("[ Einloggen ]", Style::default().fg(theme.primary())),
            (
                "[ Behandlung starten ]",
                Style::default()
                    .fg(theme.base())
                    .bg(theme.primary())
                    .add_modifier(Modifier::BOLD),
            ),
            (menu_glyph, Style::default().fg(theme.text()).add_modifier(Modifier::BOLD)),
        ];

        // Lay the buttons out right to left
        let mut right = inner.right().saturating_sub(1);
        let mut areas = [Rect::default(); 3];
        for (slot, (label, style)) in buttons.iter().enumerate().rev() {
            let width = u16::try_from(label.chars().count()).unwrap_or(u16::MAX);
            let x = right.saturating_sub(width).max(inner.x);
            let rect = Rect::new(x, inner.y, width.min(inner.right() - x), 1.min(inner.height));
            frame.render_widget(Paragraph::new(Span::styled(*label, *style)), rect);
            areas[slot] = rect;
            right = x.saturating_sub(2);
        }
        [self.login_area, self.consultation_area, self.menu_area] = areas;
    }

    fn render_menu(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(menu) = &mut self.menu else {
            return;
        };
        let height = u16::try_from(menu.len()).unwrap_or(u16::MAX) + 2;
        let width = 26.min(area.width);
        let popup = Rect::new(
            area.right().saturating_sub(width),
            area.y,
            width,
            height.min(area.height),
        );
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(" Menü ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.lavender()))
            .style(Style::default().bg(theme.base()));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);
        menu.render(frame, inner, theme);
        self.menu_popup = popup;
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let r = &self.resolver;
        let hints = format!(
            " {} Einloggen · {} Behandlung · {} Menü · {} Suche · {}/{} Krankheit · {} Beenden",
            r.display_landing(LandingAction::Login),
            r.display_landing(LandingAction::Consultation),
            r.display_landing(LandingAction::ToggleMenu),
            r.display_landing(LandingAction::Search),
            r.display_landing(LandingAction::PrevCondition),
            r.display_landing(LandingAction::NextCondition),
            r.display_global(GlobalAction::Quit),
        );
        frame.render_widget(
            Paragraph::new(hints).style(Style::default().fg(theme.overlay0()).bg(theme.mantle())),
            area,
        );
    }
}

impl Screen for LandingScreen {
    type Msg = LandingMsg;

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Msg>> {
        if let Some(search) = &mut self.search {
            match search.handle_key(key)? {
                Handled::Event(TextInputEvent::Submitted(filter)) => {
                    self.search = None;
                    self.set_filter(filter);
                }
                Handled::Event(TextInputEvent::Cancelled) => self.search = None,
                _ => {}
            }
            return Ok(Handled::Consumed);
        }

        if let Some(menu) = &mut self.menu {
            if self.resolver.matches_landing(&key, LandingAction::ToggleMenu)
                || key.code == KeyCode::Esc
            {
                self.menu = None;
                return Ok(Handled::Consumed);
            }
            return Ok(match menu.handle_key(key)? {
                Handled::Event(ListEvent::Activated(section)) => {
                    // Choosing a link closes the menu
                    self.menu = None;
                    self.jump_to(section);
                    Handled::Consumed
                }
                Handled::Ignored => Handled::Ignored,
                _ => Handled::Consumed,
            });
        }

        let r = self.resolver.clone();
        if r.matches_landing(&key, LandingAction::Login) {
            return Ok(LandingMsg::OpenModal(LOGIN.into()).into());
        }
        if r.matches_landing(&key, LandingAction::Consultation) {
            return Ok(LandingMsg::OpenModal(CONSULTATION.into()).into());
        }
        if r.matches_landing(&key, LandingAction::ToggleMenu) {
            self.toggle_menu();
            return Ok(Handled::Consumed);
        }
        if r.matches_landing(&key, LandingAction::Search) {
            self.open_search();
            return Ok(Handled::Consumed);
        }
        if r.matches_landing(&key, LandingAction::NextCondition) {
            self.select_next();
            return Ok(Handled::Consumed);
        }
        if r.matches_landing(&key, LandingAction::PrevCondition) {
            self.select_prev();
            return Ok(Handled::Consumed);
        }
        if r.matches_nav(&key, NavAction::Select) {
            return Ok(self
                .selected_condition()
                .map_or(Handled::Ignored, |c| LandingMsg::ShowCondition(c.name.to_string()).into()));
        }

        let page = i32::from((self.viewport / 2).max(1));
        let delta = if r.matches_nav(&key, NavAction::Down) {
            1
        } else if r.matches_nav(&key, NavAction::Up) {
            -1
        } else if r.matches_nav(&key, NavAction::PageDown) {
            page
        } else if r.matches_nav(&key, NavAction::PageUp) {
            -page
        } else if r.matches_nav(&key, NavAction::Home) {
            self.scroll_target = 0;
            return Ok(Handled::Consumed);
        } else if r.matches_nav(&key, NavAction::End) {
            self.scroll_target = self.max_scroll;
            return Ok(Handled::Consumed);
        } else {
            return Ok(Handled::Ignored);
        };
        self.scroll_by(delta);
        Ok(Handled::Consumed)
    }

    /// Ease the scroll position toward its target.
    fn on_tick(&mut self) {
        let target = f64::from(self.scroll_target);
        let distance = target - self.scroll;
        if distance.abs() < 0.5 {
            self.scroll = target;
        } else {
            self.scroll += distance * SCROLL_EASING;
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        frame.render_widget(Block::default().style(Style::default().bg(theme.base())), area);
        let [header, body, hints] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let now = Instant::now();
        let mut page = self.build_page(theme, now);
        self.viewport = body.height;
        self.max_scroll = page.height().saturating_sub(body.height);
        self.scroll_target = self.scroll_target.min(self.max_scroll);
        self.scroll = self.scroll.min(f64::from(self.max_scroll));

        let offset = self.scroll_offset();
        let visible_end = offset.saturating_add(body.height).min(page.height());
        for line in offset..visible_end {
            self.first_seen.entry(line).or_insert(now);
        }
        for card in page.cards.iter().filter(|&&card| self.revealing(card, now)) {
            if let Some(line) = page.lines.get_mut(usize::from(*card)) {
                line.style = line.style.add_modifier(Modifier::DIM);
            }
        }

        // Counters start the first time the hero is on screen
        if self.scroll_offset() < page.hero_end {
            for (counter, _) in self.stats.iter_mut().filter(|(c, _)| !c.is_started()) {
                counter.start(now);
            }
        }

        self.body_area = body;
        self.section_offsets = page.sections;
        self.hero_button = page.hero_button;
        self.condition_lines = page.conditions;
        frame.render_widget(
            Paragraph::new(page.lines).scroll((self.scroll_offset(), 0)),
            body.inner(Margin::new(2, 0)),
        );

        self.render_header(frame, header, theme);
        self.render_hints(frame, hints, theme);
        self.render_menu(frame, body, theme);
        if let Some(search) = &mut self.search {
            search.render(frame, area, theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn landing() -> LandingScreen {
        LandingScreen::new(Arc::new(KeyResolver::default()))
    }

    fn render(screen: &mut LandingScreen) {
        render_buffer(screen);
    }

    fn render_buffer(screen: &mut LandingScreen) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|frame| screen.render(frame, frame.area(), &Theme::default()))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn settle(screen: &mut LandingScreen) {
        for _ in 0..50 {
            screen.on_tick();
        }
    }

    #[test]
    fn test_trigger_keys_open_dialogs() {
        let mut screen = landing();
        let result = screen.handle_key(key(KeyCode::Char('l'))).unwrap();
        assert_eq!(result, Handled::Event(LandingMsg::OpenModal("login".into())));

        let result = screen.handle_key(key(KeyCode::Char('b'))).unwrap();
        assert_eq!(result, Handled::Event(LandingMsg::OpenModal("consultation".into())));
    }

    #[test]
    fn test_header_buttons_are_clickable() {
        let mut screen = landing();
        render(&mut screen);

        let login = screen.login_area;
        let result = screen.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), login.x, login.y), false);
        assert_eq!(result, Handled::Event(LandingMsg::OpenModal("login".into())));

        let consultation = screen.consultation_area;
        let result = screen.handle_mouse(
            mouse(MouseEventKind::Down(MouseButton::Left), consultation.x + 1, consultation.y),
            false,
        );
        assert_eq!(result, Handled::Event(LandingMsg::OpenModal("consultation".into())));
    }

    #[test]
    fn test_menu_link_jumps_and_closes_menu() {
        let mut screen = landing();
        render(&mut screen);

        screen.handle_key(key(KeyCode::Char('m'))).unwrap();
        assert!(screen.menu_open());

        // Start, Leistungen, Krankheiten
        screen.handle_key(key(KeyCode::Down)).unwrap();
        screen.handle_key(key(KeyCode::Down)).unwrap();
        screen.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(!screen.menu_open());

        let expected = screen
            .section_offsets
            .iter()
            .find(|(s, _)| *s == Section::Conditions)
            .map(|(_, offset)| (*offset).min(screen.max_scroll))
            .unwrap();
        assert_eq!(screen.scroll_target, expected);
        assert!(expected > 0);

        // Smooth scroll: partway after one tick, there after several
        screen.on_tick();
        assert!(screen.scroll_offset() < expected);
        settle(&mut screen);
        assert_eq!(screen.scroll_offset(), expected);
    }

    #[test]
    fn test_header_changes_after_threshold() {
        let mut screen = landing();
        render(&mut screen);
        assert!(!screen.header_scrolled());

        screen.handle_key(key(KeyCode::End)).unwrap();
        settle(&mut screen);
        assert!(screen.max_scroll > HEADER_THRESHOLD);
        assert!(screen.header_scrolled());
    }

    #[test]
    fn test_wheel_ignored_while_locked() {
        let mut screen = landing();
        render(&mut screen);

        let result = screen.handle_mouse(mouse(MouseEventKind::ScrollDown, 10, 10), true);
        assert_eq!(result, Handled::Ignored);
        assert_eq!(screen.scroll_offset(), 0);

        screen.handle_mouse(mouse(MouseEventKind::ScrollDown, 10, 10), false);
        assert_eq!(screen.scroll_offset(), 3);
    }

    #[test]
    fn test_search_filters_conditions() {
        let mut screen = landing();
        screen.handle_key(key(KeyCode::Char('/'))).unwrap();
        assert!(screen.is_capturing());

        for c in "nacken".chars() {
            screen.handle_key(key(KeyCode::Char(c))).unwrap();
        }
        screen.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(!screen.is_capturing());
        assert_eq!(screen.filter(), "nacken");
        assert_eq!(
            screen.selected_condition().map(|c| c.name),
            Some("Nackenschmerzen")
        );

        let result = screen.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(result, Handled::Event(LandingMsg::ShowCondition("Nackenschmerzen".to_string())));
    }

    #[test]
    fn test_condition_selection_wraps() {
        let mut screen = landing();
        screen.handle_key(key(KeyCode::BackTab)).unwrap();
        assert_eq!(screen.selected_condition().map(|c| c.name), Some("Nackenschmerzen"));

        screen.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(screen.selected_condition().map(|c| c.name), Some("Heuschnupfen"));
    }

    #[test]
    fn test_clicking_condition_shows_it() {
        let mut screen = landing();
        render(&mut screen);

        let (line, _) = screen
            .condition_lines
            .iter()
            .find(|(_, c)| c.name == "Burnout")
            .copied()
            .unwrap();
        screen.scroll_target = line;
        settle(&mut screen);
        render(&mut screen);

        let row = screen.body_area.y + line - screen.scroll_offset();
        let result =
            screen.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, row), false);
        assert_eq!(result, Handled::Event(LandingMsg::ShowCondition("Burnout".to_string())));
        assert_eq!(screen.selected_condition().map(|c| c.name), Some("Burnout"));
    }

    #[test]
    fn test_counters_start_when_hero_rendered() {
        let mut screen = landing();
        assert!(screen.stats.iter().all(|(c, _)| !c.is_started()));
        render(&mut screen);
        assert!(screen.stats.iter().all(|(c, _)| c.is_started()));
    }

    #[test]
    fn test_cards_fade_in_when_first_visible() {
        let mut screen = landing();
        let buffer = render_buffer(&mut screen);

        // First service card sits on page line 11, below the two header rows
        let service = &buffer[(2, 13)];
        assert_eq!(service.symbol(), "•");
        assert!(service.modifier.contains(Modifier::DIM));
        // Section headings are not cards
        assert!(!buffer[(2, 11)].modifier.contains(Modifier::DIM));

        let later = Instant::now() + REVEAL;
        assert!(screen.revealing(11, Instant::now()));
        assert!(!screen.revealing(11, later));

        // Testimonials have not been on screen yet
        let last = screen.max_scroll + screen.viewport - 1;
        assert!(!screen.first_seen.contains_key(&last));
        screen.handle_key(key(KeyCode::End)).unwrap();
        settle(&mut screen);
        render(&mut screen);
        assert!(screen.revealing(last, Instant::now()));
    }
}
