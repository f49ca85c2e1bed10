use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::Theme;
use crate::config::DialogAction;
use crate::modal::element::BodyState;
use crate::modal::form::{FieldControl, FormState};
use crate::modal::{Document, FieldKind, ModalElement, SectionContent};
use crate::ui::{Component, Modal};

const MAX_WIDTH: u16 = 64;
const CLOSE_GLYPH: &str = "×";

/// Draw a dialog as a dimmed overlay with a centered content box, and
/// remember where the box and its close glyph ended up.
pub(super) fn render_element(
    element: &mut ModalElement,
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
) {
    frame
        .buffer_mut()
        .set_style(area, Style::default().add_modifier(Modifier::DIM));

    let width = MAX_WIDTH.min(area.width.saturating_mul(9) / 10);
    let body_height = match &element.body {
        BodyState::Form(form) => form_height(form),
        BodyState::Document { document, .. } => {
            document_height(document, width.saturating_sub(4))
        }
    };
    // Borders, header and separator, hint line
    let height = (body_height + 5).min(area.height.saturating_mul(9) / 10);
    let content = area.centered(Constraint::Length(width), Constraint::Length(height));

    frame.render_widget(Clear, content);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.lavender()))
        .style(Style::default().bg(theme.base()).fg(theme.text()));
    let inner = block.inner(content);
    frame.render_widget(block, content);

    let [header, separator, body, hints] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let title = Paragraph::new(Span::styled(
        format!(" {}", element.title().unwrap_or_default()),
        Style::default().fg(theme.text()).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(title, header);

    let close_area = Rect::new(header.right().saturating_sub(2), header.y, 1, 1);
    frame.render_widget(
        Paragraph::new(Span::styled(CLOSE_GLYPH, Style::default().fg(theme.overlay1()))),
        close_area,
    );
    frame.render_widget(
        Paragraph::new("─".repeat(usize::from(separator.width)))
            .style(Style::default().fg(theme.surface1())),
        separator,
    );

    let body = body.inner(Margin::new(1, 0));
    match &mut element.body {
        BodyState::Form(form) => render_form(form, frame, body, theme),
        BodyState::Document { document, selected } => {
            render_document(document, *selected, frame, body, theme);
        }
    }

    let resolver = &element.resolver;
    let hint = format!(
        "{} weiter · {} absenden · {} schließen",
        resolver.display_dialog(DialogAction::NextField),
        resolver.display_dialog(DialogAction::Submit),
        resolver.display_dialog(DialogAction::Close),
    );
    frame.render_widget(
        Paragraph::new(hint)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.overlay0())),
        hints,
    );

    element.content_area = Some(content);
    element.close_area = Some(close_area);
}

fn field_rows(kind: &FieldKind) -> u16 {
    match kind {
        FieldKind::TextArea { rows } => (*rows).max(1),
        _ => 1,
    }
}

fn form_height(form: &FormState) -> u16 {
    // Label, control and a blank line per field
    let fields: u16 = form.fields.iter().map(|f| field_rows(&f.field.kind) + 2).sum();
    let footer = if form.footer().is_some() { 2 } else { 0 };
    fields + 1 + footer
}

fn document_height(document: &Document, width: u16) -> u16 {
    let wrapped = |text: &str| {
        let width = usize::from(width.max(1));
        u16::try_from(text.chars().count().div_ceil(width).max(1)).unwrap_or(u16::MAX)
    };
    let mut height = 2 + wrapped(&document.description) + 1;
    for section in &document.sections {
        height += 1;
        height += match &section.content {
            SectionContent::List(items) => u16::try_from(items.len()).unwrap_or(u16::MAX),
            SectionContent::Paragraph(text) => wrapped(text),
        };
        height += 1;
    }
    height + 1
}

fn render_form(form: &mut FormState, frame: &mut Frame, area: Rect, theme: &Theme) {
    let focused = form.focused();
    let mut y = area.y;

    for (index, state) in form.fields.iter_mut().enumerate() {
        if y >= area.bottom() {
            return;
        }
        let mut label = vec![Span::styled(
            state.field.label.clone(),
            Style::default().fg(theme.subtext0()).add_modifier(Modifier::BOLD),
        )];
        if state.field.required {
            label.push(Span::styled(" *", Style::default().fg(theme.error())));
        }
        frame.render_widget(
            Paragraph::new(Line::from(label)),
            Rect::new(area.x, y, area.width, 1),
        );
        y += 1;

        let rows = field_rows(&state.field.kind).min(area.bottom().saturating_sub(y));
        let control_area = Rect::new(area.x, y, area.width, rows);
        match &mut state.control {
            FieldControl::Input(input) => input.render(frame, control_area, theme),
            FieldControl::Select { options, selected } => {
                let label = options.get(*selected).map_or("", |o| o.label.as_str());
                let background = if index == focused {
                    theme.surface1()
                } else {
                    theme.surface0()
                };
                frame.render_widget(
                    Paragraph::new(format!("‹ {label} ›"))
                        .style(Style::default().bg(background).fg(theme.text())),
                    control_area,
                );
            }
        }
        y += rows + 1;
    }

    if y >= area.bottom() {
        return;
    }
    let button_area = Rect::new(area.x, y, area.width, 1);
    let submit_focused = form.submit_focused();
    let footer = form.footer().map(str::to_string);
    let submit = form.submit_control_mut();
    if submit.is_disabled() {
        submit.spinner.render(frame, button_area, theme);
    } else {
        let mut style = Style::default().fg(theme.primary()).add_modifier(Modifier::BOLD);
        if submit_focused {
            style = Style::default()
                .fg(theme.base())
                .bg(theme.primary())
                .add_modifier(Modifier::BOLD);
        }
        frame.render_widget(
            Paragraph::new(Span::styled(format!("[ {} ]", submit.label()), style))
                .alignment(Alignment::Center),
            button_area,
        );
    }
    y += 2;

    if let Some(footer) = footer
        && y < area.bottom()
    {
        frame.render_widget(
            Paragraph::new(footer)
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.subtext0())),
            Rect::new(area.x, y, area.width, 1),
        );
    }
}

fn render_document(
    document: &Document,
    selected: usize,
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
) {
    let heading = Style::default().fg(theme.primary()).add_modifier(Modifier::BOLD);
    let section_title = Style::default().fg(theme.text()).add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(document.heading.clone(), heading)),
        Line::from(Span::styled(
            document.description.clone(),
            Style::default().fg(theme.subtext0()),
        )),
        Line::default(),
    ];
    for section in &document.sections {
        lines.push(Line::from(Span::styled(section.title.clone(), section_title)));
        match &section.content {
            SectionContent::List(items) => {
                lines.extend(items.iter().map(|item| Line::from(format!("  • {item}"))));
            }
            SectionContent::Paragraph(text) => lines.push(Line::from(text.clone())),
        }
        lines.push(Line::default());
    }

    let mut buttons = Vec::new();
    for (index, action) in document.actions.iter().enumerate() {
        let style = if index == selected {
            Style::default()
                .fg(theme.base())
                .bg(theme.primary())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.primary())
        };
        buttons.push(Span::styled(format!("[ {} ]", action.label), style));
        buttons.push(Span::raw("  "));
    }
    buttons.pop();
    lines.push(Line::from(buttons).alignment(Alignment::Center));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
