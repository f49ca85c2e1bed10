use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use tokio_util::sync::CancellationToken;

use crate::Theme;
use crate::config::{DialogAction, KeyResolver};
use crate::modal::{
    ActionEffect, Document, DocumentAction, FormState, ModalBody, ModalDefinition,
};
use crate::ui::{Handled, Modal, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

/// What a key press inside a dialog asks its manager to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementEvent {
    Close,
    Submit,
    Action(ActionEffect),
}

pub(crate) enum BodyState {
    Form(FormState),
    Document { document: Document, selected: usize },
}

impl BodyState {
    fn realize(body: &ModalBody) -> Self {
        match body {
            ModalBody::Form(spec) => Self::Form(FormState::from_spec(spec)),
            ModalBody::Document(document) => Self::Document {
                document: document.clone(),
                selected: 0,
            },
        }
    }
}

pub(crate) struct PendingSubmission {
    pub(crate) ticket: u64,
    pub(crate) token: CancellationToken,
}

/// A registered dialog as it lives on screen.
pub struct ModalElement {
    pub(super) title: String,
    pub(super) visibility: Visibility,
    pub(super) body: BodyState,
    pub(super) resolver: Arc<KeyResolver>,
    /// Content box from the last render, used for overlay clicks.
    pub(super) content_area: Option<Rect>,
    pub(super) close_area: Option<Rect>,
    pending: Option<PendingSubmission>,
}

impl ModalElement {
    pub fn new(definition: &ModalDefinition, resolver: Arc<KeyResolver>) -> Self {
        Self {
            title: definition.title().to_string(),
            visibility: Visibility::Hidden,
            body: BodyState::realize(definition.body()),
            resolver,
            content_area: None,
            close_area: None,
            pending: None,
        }
    }

    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub(crate) const fn show(&mut self) {
        self.visibility = Visibility::Visible;
    }

    pub(crate) const fn hide(&mut self) {
        self.visibility = Visibility::Hidden;
        self.content_area = None;
        self.close_area = None;
    }

    pub(crate) fn set_body(&mut self, body: &ModalBody) {
        self.body = BodyState::realize(body);
    }

    pub const fn form(&self) -> Option<&FormState> {
        match &self.body {
            BodyState::Form(form) => Some(form),
            BodyState::Document { .. } => None,
        }
    }

    pub const fn form_mut(&mut self) -> Option<&mut FormState> {
        match &mut self.body {
            BodyState::Form(form) => Some(form),
            BodyState::Document { .. } => None,
        }
    }

    pub const fn document(&self) -> Option<&Document> {
        match &self.body {
            BodyState::Document { document, .. } => Some(document),
            BodyState::Form(_) => None,
        }
    }

    pub(crate) fn set_pending(&mut self, ticket: u64, token: CancellationToken) {
        self.pending = Some(PendingSubmission { ticket, token });
    }

    pub(crate) const fn take_pending(&mut self) -> Option<PendingSubmission> {
        self.pending.take()
    }

    pub fn pending_ticket(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.ticket)
    }

    /// Whether a terminal cell lies on the close glyph.
    pub fn hits_close(&self, position: Position) -> bool {
        self.close_area.is_some_and(|area| area.contains(position))
    }

    /// Whether a terminal cell lies inside the content box.
    pub fn hits_content(&self, position: Position) -> bool {
        self.content_area.is_some_and(|area| area.contains(position))
    }

    pub fn on_tick(&mut self) {
        if let BodyState::Form(form) = &mut self.body {
            form.on_tick();
        }
    }

    fn handle_form_key(
        form: &mut FormState,
        resolver: &KeyResolver,
        key: KeyEvent,
    ) -> Result<Handled<ElementEvent>> {
        if resolver.matches_dialog(&key, DialogAction::NextField) {
            form.focus_next();
            return Ok(Handled::Consumed);
        }
        if resolver.matches_dialog(&key, DialogAction::PrevField) {
            form.focus_prev();
            return Ok(Handled::Consumed);
        }

        let confirm = resolver.matches_dialog(&key, DialogAction::Confirm);
        if form.submit_focused() {
            return Ok(if confirm {
                ElementEvent::Submit.into()
            } else {
                Handled::Consumed
            });
        }

        // Enter in a single-line field submits the form, as browsers do.
        match form.handle_key(key)? {
            Handled::Ignored if confirm => Ok(ElementEvent::Submit.into()),
            _ => Ok(Handled::Consumed),
        }
    }

    fn handle_document_key(
        actions: &[DocumentAction],
        selected: &mut usize,
        resolver: &KeyResolver,
        key: KeyEvent,
    ) -> Handled<ElementEvent> {
        let count = actions.len();
        if count == 0 {
            return Handled::Consumed;
        }
        if resolver.matches_dialog(&key, DialogAction::NextField) || key.code == KeyCode::Right {
            *selected = (*selected + 1) % count;
            return Handled::Consumed;
        }
        if resolver.matches_dialog(&key, DialogAction::PrevField) || key.code == KeyCode::Left {
            *selected = (*selected + count - 1) % count;
            return Handled::Consumed;
        }
        if resolver.matches_dialog(&key, DialogAction::Confirm) {
            return actions
                .get(*selected)
                .map_or(Handled::Consumed, |action| {
                    ElementEvent::Action(action.effect.clone()).into()
                });
        }
        Handled::Consumed
    }
}

impl Modal for ModalElement {
    type Msg = ElementEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Msg>> {
        if self.resolver.matches_dialog(&key, DialogAction::Close) {
            return Ok(ElementEvent::Close.into());
        }

        match &mut self.body {
            BodyState::Form(form) => {
                if form.submit_control().is_disabled() {
                    // Fields stay read-only while the submission runs
                    return Ok(Handled::Consumed);
                }
                if self.resolver.matches_dialog(&key, DialogAction::Submit) {
                    return Ok(ElementEvent::Submit.into());
                }
                Self::handle_form_key(form, &self.resolver, key)
            }
            BodyState::Document { document, selected } => Ok(Self::handle_document_key(
                &document.actions,
                selected,
                &self.resolver,
                key,
            )),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        super::render::render_element(self, frame, area, theme);
    }

    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::modal::{FormField, FormSpec, ModalId};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn element(body: ModalBody) -> ModalElement {
        let definition = ModalDefinition::new("test", "Test", body);
        ModalElement::new(&definition, Arc::new(KeyResolver::default()))
    }

    fn login_body() -> ModalBody {
        ModalBody::Form(
            FormSpec::new("Einloggen")
                .field(FormField::email("email", "E-Mail").required())
                .field(FormField::password("password", "Passwort").required()),
        )
    }

    #[test]
    fn test_new_element_is_hidden() {
        let element = element(login_body());
        assert_eq!(element.visibility(), Visibility::Hidden);
        assert_eq!(element.title(), Some("Test"));
    }

    #[test]
    fn test_close_key_requests_close() {
        let mut element = element(login_body());
        let result = element.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(result, Handled::Event(ElementEvent::Close));
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let mut element = element(login_body());
        for c in "a@b".chars() {
            element.handle_key(key(KeyCode::Char(c))).unwrap();
        }
        element.handle_key(key(KeyCode::Tab)).unwrap();
        element.handle_key(key(KeyCode::Char('x'))).unwrap();

        let form = element.form().unwrap();
        assert_eq!(form.value("email").as_deref(), Some("a@b"));
        assert_eq!(form.value("password").as_deref(), Some("x"));
    }

    #[test]
    fn test_enter_in_field_requests_submit() {
        let mut element = element(login_body());
        let result = element.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(result, Handled::Event(ElementEvent::Submit));
    }

    #[test]
    fn test_keys_are_swallowed_while_submitting() {
        let mut element = element(login_body());
        element.form_mut().unwrap().begin_submit();

        let result = element.handle_key(key(KeyCode::Char('z'))).unwrap();
        assert_eq!(result, Handled::Consumed);
        assert_eq!(element.form().unwrap().value("email").as_deref(), Some(""));

        let result = element.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(result, Handled::Event(ElementEvent::Close));
    }

    #[test]
    fn test_document_actions_cycle_and_activate() {
        let mut element = element(ModalBody::Document(Document {
            heading: "Erkältung".to_string(),
            description: String::new(),
            sections: vec![],
            actions: vec![
                DocumentAction::new(
                    "Behandlung starten",
                    ActionEffect::Open(ModalId::from("consultation")),
                ),
                DocumentAction::new("Schließen", ActionEffect::Close),
            ],
        }));

        let result = element.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(
            result,
            Handled::Event(ElementEvent::Action(ActionEffect::Open("consultation".into())))
        );

        element.handle_key(key(KeyCode::Tab)).unwrap();
        let result = element.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(result, Handled::Event(ElementEvent::Action(ActionEffect::Close)));
    }
}
