use std::sync::Arc;

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::Theme;
use crate::config::{KeyResolver, ModalConfig};
use crate::modal::submission::spawn_submission;
use crate::modal::{
    ActionEffect, ElementEvent, ModalBody, ModalDefinition, ModalElement, ModalError, ModalId,
    ModalRegistry, ScrollLock, SimulatedSubmitter, SubmissionOutcome, SubmissionReport, Submitter,
};
use crate::ui::{Handled, Modal, Result, Toast};

/// Owns every registered dialog and mediates its lifecycle.
///
/// Visible dialogs form a stack; input goes to the topmost one. Each visible
/// dialog holds the scroll lock once. Form submissions run as tokio tasks
/// and report back through a channel that [`ModalManager::update`] drains.
pub struct ModalManager {
    registry: ModalRegistry,
    /// Visible dialogs, bottom to top.
    stack: Vec<ModalId>,
    scroll_lock: ScrollLock,
    exclusive: bool,
    submitter: Arc<dyn Submitter>,
    resolver: Arc<KeyResolver>,
    shutdown: CancellationToken,
    next_ticket: u64,
    report_tx: UnboundedSender<SubmissionReport>,
    report_rx: UnboundedReceiver<SubmissionReport>,
    notices: Vec<Toast>,
}

impl ModalManager {
    pub fn new(submitter: Arc<dyn Submitter>, resolver: Arc<KeyResolver>) -> Self {
        let (report_tx, report_rx) = mpsc::unbounded_channel();
        Self {
            registry: ModalRegistry::new(),
            stack: Vec::new(),
            scroll_lock: ScrollLock::new(),
            exclusive: false,
            submitter,
            resolver,
            shutdown: CancellationToken::new(),
            next_ticket: 0,
            report_tx,
            report_rx,
            notices: Vec::new(),
        }
    }

    pub fn from_config(config: &ModalConfig, resolver: Arc<KeyResolver>) -> Self {
        let submitter =
            SimulatedSubmitter::new(config.submit_delay(), config.acknowledgement.clone());
        Self::new(Arc::new(submitter), resolver).with_exclusive(config.exclusive)
    }

    /// Close every other dialog whenever one is opened.
    #[must_use]
    pub fn with_exclusive(mut self, exclusive: bool) -> Self {
        self.exclusive = exclusive;
        self
    }

    pub fn register(
        &mut self,
        definition: ModalDefinition,
    ) -> std::result::Result<(), ModalError> {
        let element = ModalElement::new(&definition, self.resolver.clone());
        self.registry.insert(definition, element)
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.registry.contains(id)
    }

    pub fn element(&self, id: &str) -> Option<&ModalElement> {
        self.registry.get(id).map(|entry| &entry.element)
    }

    pub fn definition(&self, id: &str) -> Option<&ModalDefinition> {
        self.registry.get(id).map(|entry| &entry.definition)
    }

    pub fn open(&mut self, id: &str) {
        if !self.registry.contains(id) {
            debug!(id, "Ignoring open of unknown dialog");
            return;
        }

        if self.exclusive {
            let others: Vec<ModalId> = self
                .stack
                .iter()
                .filter(|visible| visible.as_str() != id)
                .cloned()
                .collect();
            for other in others {
                self.close(other.as_str());
            }
        }

        let Some(entry) = self.registry.get_mut(id) else {
            return;
        };
        let modal_id = entry.definition.id().clone();
        if entry.element.is_visible() {
            // Already open: bring to front without taking the lock again
            self.stack.retain(|visible| visible != &modal_id);
            self.stack.push(modal_id);
            return;
        }

        entry.element.show();
        self.scroll_lock.acquire();
        info!(id, holders = self.scroll_lock.holders(), "Opened dialog");
        self.stack.push(modal_id);
    }

    pub fn close(&mut self, id: &str) {
        let Some(entry) = self.registry.get_mut(id) else {
            debug!(id, "Ignoring close of unknown dialog");
            return;
        };
        if !entry.element.is_visible() {
            return;
        }

        if let Some(pending) = entry.element.take_pending() {
            pending.token.cancel();
            if let Some(form) = entry.element.form_mut() {
                form.end_submit();
            }
            debug!(id, ticket = pending.ticket, "Cancelled pending submission");
        }

        entry.element.hide();
        self.scroll_lock.release();
        self.stack.retain(|visible| visible.as_str() != id);
        info!(id, holders = self.scroll_lock.holders(), "Closed dialog");
    }

    /// Validate and submit the form of a visible dialog.
    pub fn submit(&mut self, id: &str) {
        let Some(entry) = self.registry.get_mut(id) else {
            debug!(id, "Ignoring submit of unknown dialog");
            return;
        };
        if !entry.element.is_visible() {
            debug!(id, "Ignoring submit of hidden dialog");
            return;
        }
        let Some(form) = entry.element.form_mut() else {
            return;
        };
        if form.submit_control().is_disabled() {
            return;
        }
        if let Err(invalid) = form.validate() {
            debug!(id, field = invalid.index, "Form failed validation");
            form.focus(invalid.index);
            self.notices.push(Toast::error(invalid.message));
            return;
        }

        let data = form.collect();
        form.begin_submit();

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        let token = self.shutdown.child_token();
        entry.element.set_pending(ticket, token.clone());

        info!(id, ticket, "Submitting dialog form");
        spawn_submission(
            self.submitter.clone(),
            entry.definition.id().clone(),
            ticket,
            data,
            token,
            self.report_tx.clone(),
        );
    }

    /// Replace the body of a registered dialog, keeping its visibility.
    pub fn set_body(&mut self, id: &str, body: ModalBody) {
        if let Some(entry) = self.registry.get_mut(id)
            && let Some(pending) = entry.element.take_pending()
        {
            pending.token.cancel();
        }
        if !self.registry.replace_body(id, body) {
            debug!(id, "Ignoring body update of unknown dialog");
        }
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.registry
            .get(id)
            .is_some_and(|entry| entry.element.is_visible())
    }

    /// Visible dialogs, bottom to top.
    pub fn visible_ids(&self) -> &[ModalId] {
        &self.stack
    }

    pub fn top(&self) -> Option<&ModalId> {
        self.stack.last()
    }

    pub const fn scroll_locked(&self) -> bool {
        self.scroll_lock.is_locked()
    }

    /// Route a key to the topmost visible dialog.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<()>> {
        let Some(top) = self.top().cloned() else {
            return Ok(Handled::Ignored);
        };
        let Some(entry) = self.registry.get_mut(top.as_str()) else {
            return Ok(Handled::Ignored);
        };

        match entry.element.handle_key(key)? {
            Handled::Ignored => Ok(Handled::Ignored),
            Handled::Consumed => Ok(Handled::Consumed),
            Handled::Event(event) => {
                self.dispatch(&top, event);
                Ok(Handled::Consumed)
            }
        }
    }

    fn dispatch(&mut self, id: &ModalId, event: ElementEvent) {
        match event {
            ElementEvent::Close | ElementEvent::Action(ActionEffect::Close) => {
                self.close(id.as_str());
            }
            ElementEvent::Submit => self.submit(id.as_str()),
            ElementEvent::Action(ActionEffect::Open(target)) => self.open(target.as_str()),
        }
    }

    /// A left click on the close glyph or outside the content box closes the
    /// topmost dialog. Other clicks on a dialog are swallowed.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> Handled<()> {
        let Some(top) = self.top().cloned() else {
            return Handled::Ignored;
        };
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return Handled::Ignored;
        }
        let Some(entry) = self.registry.get(top.as_str()) else {
            return Handled::Ignored;
        };
        // Not drawn yet, so there is no overlay to hit
        if entry.element.content_area.is_none() {
            return Handled::Consumed;
        }

        let position = Position::new(event.column, event.row);
        if entry.element.hits_close(position) || !entry.element.hits_content(position) {
            self.close(top.as_str());
        }
        Handled::Consumed
    }

    /// Apply finished submissions and hand out the toasts they produced.
    pub fn update(&mut self) -> Vec<Toast> {
        while let Ok(report) = self.report_rx.try_recv() {
            self.complete(report);
        }
        std::mem::take(&mut self.notices)
    }

    fn complete(&mut self, report: SubmissionReport) {
        let id = report.modal.as_str();
        let Some(entry) = self.registry.get_mut(id) else {
            return;
        };
        if entry.element.pending_ticket() != Some(report.ticket) {
            debug!(id, ticket = report.ticket, "Discarding stale submission result");
            return;
        }
        entry.element.take_pending();
        if let Some(form) = entry.element.form_mut() {
            form.end_submit();
        }

        match report.outcome {
            SubmissionOutcome::Acknowledged(ack) => {
                info!(id, ticket = report.ticket, "Submission acknowledged");
                self.notices.push(Toast::success(ack.message));
                self.close(id);
                if let Some(form) = self
                    .registry
                    .get_mut(id)
                    .and_then(|entry| entry.element.form_mut())
                {
                    form.reset();
                }
            }
            SubmissionOutcome::Failed(e) => self.notices.push(Toast::error(e.to_string())),
            SubmissionOutcome::Cancelled => {}
        }
    }

    pub fn on_tick(&mut self) {
        for id in &self.stack {
            if let Some(entry) = self.registry.get_mut(id.as_str()) {
                entry.element.on_tick();
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        for id in &self.stack {
            if let Some(entry) = self.registry.get_mut(id.as_str()) {
                entry.element.render(frame, area, theme);
            }
        }
    }

    /// Abort every pending submission.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

impl Drop for ModalManager {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::modal::element::Visibility;
    use crate::modal::form::PROCESSING_LABEL;
    use crate::modal::submission::Acknowledgement;
    use crate::modal::{Document, DocumentAction, FormData, FormField, FormSpec, SubmitError};
    use crate::ui::ToastKind;

    const DELAY: Duration = Duration::from_millis(2000);

    fn login(title: &str) -> ModalDefinition {
        ModalDefinition::new(
            "login",
            title,
            ModalBody::Form(
                FormSpec::new("Einloggen")
                    .field(FormField::email("email", "E-Mail").required())
                    .field(FormField::password("password", "Passwort").required()),
            ),
        )
    }

    fn consultation() -> ModalDefinition {
        ModalDefinition::new(
            "consultation",
            "Behandlung starten",
            ModalBody::Form(
                FormSpec::new("Termin buchen")
                    .field(FormField::textarea("symptoms", "Symptome", 4)),
            ),
        )
    }

    fn condition() -> ModalDefinition {
        ModalDefinition::new(
            "condition",
            "Krankheitsinformationen",
            ModalBody::Document(Document {
                heading: "Erkältung".to_string(),
                description: "Virusinfektion der oberen Atemwege.".to_string(),
                sections: vec![],
                actions: vec![
                    DocumentAction::new(
                        "Behandlung starten",
                        ActionEffect::Open("consultation".into()),
                    ),
                    DocumentAction::new("Schließen", ActionEffect::Close),
                ],
            }),
        )
    }

    fn manager() -> ModalManager {
        let submitter = SimulatedSubmitter::new(DELAY, "Vielen Dank!");
        let mut manager = ModalManager::new(Arc::new(submitter), Arc::new(KeyResolver::default()));
        manager.register(login("Sign In")).unwrap();
        manager.register(consultation()).unwrap();
        manager
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn render(manager: &mut ModalManager) {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| manager.render(frame, frame.area(), &Theme::default()))
            .unwrap();
    }

    fn fill_login(manager: &mut ModalManager) {
        let form = manager
            .registry
            .get_mut("login")
            .and_then(|entry| entry.element.form_mut())
            .unwrap();
        form.set_value("email", "max@example.com");
        form.set_value("password", "geheim");
    }

    fn submit_label(manager: &ModalManager, id: &str) -> (String, bool) {
        let control = manager.element(id).unwrap().form().unwrap().submit_control();
        (control.label().to_string(), control.is_disabled())
    }

    /// Let spawned submission tasks run on the current-thread runtime.
    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    struct RejectingSubmitter;

    #[async_trait]
    impl Submitter for RejectingSubmitter {
        async fn submit(
            &self,
            _modal: &ModalId,
            _data: FormData,
        ) -> std::result::Result<Acknowledgement, SubmitError> {
            Err(SubmitError::Rejected("Server nicht erreichbar".to_string()))
        }
    }

    #[test]
    fn test_sign_in_open_and_close() {
        let mut manager = manager();
        assert_eq!(manager.definition("login").unwrap().title(), "Sign In");
        assert!(!manager.is_visible("login"));

        manager.open("login");
        assert!(manager.is_visible("login"));
        assert!(manager.scroll_locked());

        manager.close("login");
        assert_eq!(manager.element("login").unwrap().visibility(), Visibility::Hidden);
        assert!(!manager.scroll_locked());
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut manager = manager();
        let result = manager.register(login("Einloggen"));
        assert_eq!(result, Err(ModalError::DuplicateId("login".into())));
        assert_eq!(manager.definition("login").unwrap().title(), "Sign In");
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let mut manager = manager();
        manager.open("nope");
        manager.close("nope");
        manager.submit("nope");
        manager.set_body("nope", consultation().body().clone());

        assert!(manager.visible_ids().is_empty());
        assert!(!manager.scroll_locked());
        assert!(manager.update().is_empty());
    }

    #[test]
    fn test_overlapping_dialogs_keep_scroll_locked() {
        let mut manager = manager();
        manager.open("login");
        manager.open("consultation");
        assert!(manager.is_visible("login"));
        assert!(manager.is_visible("consultation"));

        manager.close("login");
        assert!(manager.scroll_locked());

        manager.close("consultation");
        assert!(!manager.scroll_locked());
    }

    #[test]
    fn test_reopening_moves_to_top_without_extra_lock() {
        let mut manager = manager();
        manager.open("login");
        manager.open("consultation");
        manager.open("login");

        assert_eq!(manager.top().map(ModalId::as_str), Some("login"));
        assert_eq!(manager.visible_ids().len(), 2);

        manager.close("login");
        manager.close("consultation");
        assert!(!manager.scroll_locked());
    }

    #[test]
    fn test_exclusive_mode_closes_others() {
        let mut manager = manager().with_exclusive(true);
        manager.open("login");
        manager.open("consultation");

        assert!(!manager.is_visible("login"));
        assert!(manager.is_visible("consultation"));

        manager.close("consultation");
        assert!(!manager.scroll_locked());
    }

    #[test]
    fn test_close_key_closes_only_top() {
        let mut manager = manager();
        manager.open("login");
        manager.open("consultation");

        let result = manager.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(result, Handled::Consumed);
        assert!(!manager.is_visible("consultation"));
        assert!(manager.is_visible("login"));
    }

    #[test]
    fn test_keys_ignored_without_visible_dialog() {
        let mut manager = manager();
        let result = manager.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(result, Handled::Ignored);
        assert_eq!(manager.handle_mouse(click(0, 0)), Handled::Ignored);
    }

    #[test]
    fn test_overlay_click_closes_exactly_top_dialog() {
        let mut manager = manager();
        manager.open("login");
        manager.open("consultation");
        render(&mut manager);

        let content = manager.element("consultation").unwrap().content_area.unwrap();
        let inside = manager.handle_mouse(click(content.x + 2, content.y + 2));
        assert_eq!(inside, Handled::Consumed);
        assert!(manager.is_visible("consultation"));

        manager.handle_mouse(click(0, 0));
        assert!(!manager.is_visible("consultation"));
        assert!(manager.is_visible("login"));
        assert!(manager.scroll_locked());
    }

    #[test]
    fn test_close_glyph_click() {
        let mut manager = manager();
        manager.open("login");
        render(&mut manager);

        let glyph = manager.element("login").unwrap().close_area.unwrap();
        let content = manager.element("login").unwrap().content_area.unwrap();
        assert!(content.contains(glyph.as_position()));

        manager.handle_mouse(click(glyph.x, glyph.y));
        assert!(!manager.is_visible("login"));
    }

    #[test]
    fn test_render_shows_header_and_close_glyph() {
        let mut manager = manager();
        manager.open("login");

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| manager.render(frame, frame.area(), &Theme::default()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Sign In"));
        assert!(text.contains('×'));
        assert!(text.contains("[ Einloggen ]"));
    }

    #[test]
    fn test_document_action_opens_other_dialog() {
        let mut manager = manager();
        manager.register(condition()).unwrap();
        manager.open("condition");

        manager.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(manager.is_visible("condition"));
        assert_eq!(manager.top().map(ModalId::as_str), Some("consultation"));

        manager.close("consultation");
        manager.handle_key(key(KeyCode::Tab)).unwrap();
        manager.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(!manager.is_visible("condition"));
    }

    #[test]
    fn test_set_body_keeps_visibility() {
        let mut manager = manager();
        manager.register(condition()).unwrap();
        manager.open("condition");

        let mut updated = condition().body().clone();
        if let ModalBody::Document(document) = &mut updated {
            document.heading = "Burnout".to_string();
        }
        manager.set_body("condition", updated);

        assert!(manager.is_visible("condition"));
        let document = manager.element("condition").unwrap().document().unwrap();
        assert_eq!(document.heading, "Burnout");
    }

    #[tokio::test(start_paused = true)]
    async fn test_submission_lifecycle() {
        let mut manager = manager();
        manager.open("login");
        fill_login(&mut manager);

        manager.submit("login");
        assert_eq!(submit_label(&manager, "login"), (PROCESSING_LABEL.to_string(), true));

        tokio::time::sleep(DELAY - Duration::from_millis(1)).await;
        settle().await;
        assert!(manager.update().is_empty());
        assert!(submit_label(&manager, "login").1);

        tokio::time::sleep(Duration::from_millis(1)).await;
        settle().await;
        let toasts = manager.update();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind(), ToastKind::Success);
        assert_eq!(toasts[0].message(), "Vielen Dank!");

        assert_eq!(submit_label(&manager, "login"), ("Einloggen".to_string(), false));
        assert!(!manager.is_visible("login"));
        assert!(!manager.scroll_locked());
        let form = manager.element("login").unwrap().form().unwrap();
        assert_eq!(form.value("email").as_deref(), Some(""));
        assert_eq!(form.value("password").as_deref(), Some(""));

        // Re-enabled exactly once
        tokio::time::sleep(DELAY).await;
        settle().await;
        assert!(manager.update().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_form_is_not_submitted() {
        let mut manager = manager();
        manager.open("login");

        manager.submit("login");
        let toasts = manager.update();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind(), ToastKind::Error);
        assert!(!submit_label(&manager, "login").1);
        assert!(manager.is_visible("login"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_optional_form_is_rejected_after_delay() {
        let mut manager = manager();
        manager.open("consultation");

        manager.submit("consultation");
        assert!(manager.update().is_empty());
        assert!(submit_label(&manager, "consultation").1);

        tokio::time::sleep(DELAY).await;
        settle().await;
        let toasts = manager.update();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind(), ToastKind::Error);
        assert_eq!(toasts[0].message(), "Keine Angaben übermittelt.");
        assert!(manager.is_visible("consultation"));
        assert!(!submit_label(&manager, "consultation").1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_key_starts_submission() {
        let mut manager = manager();
        manager.open("login");
        fill_login(&mut manager);

        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        manager.handle_key(ctrl_s).unwrap();
        assert!(submit_label(&manager, "login").1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closing_mid_submission_aborts_acknowledgement() {
        let mut manager = manager();
        manager.open("login");
        fill_login(&mut manager);
        manager.submit("login");

        tokio::time::sleep(Duration::from_millis(500)).await;
        manager.close("login");
        assert_eq!(submit_label(&manager, "login"), ("Einloggen".to_string(), false));

        tokio::time::sleep(DELAY).await;
        settle().await;
        assert!(manager.update().is_empty());
        assert!(!manager.is_visible("login"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_result_is_discarded() {
        let mut manager = manager();
        manager.open("login");
        fill_login(&mut manager);
        manager.submit("login");

        tokio::time::sleep(Duration::from_millis(500)).await;
        manager.close("login");
        manager.open("login");
        manager.submit("login");

        // First submission's deadline passes, second is still running
        tokio::time::sleep(Duration::from_millis(1600)).await;
        settle().await;
        assert!(manager.update().is_empty());
        assert!(submit_label(&manager, "login").1);

        tokio::time::sleep(Duration::from_millis(400)).await;
        settle().await;
        assert_eq!(manager.update().len(), 1);
        assert!(!manager.is_visible("login"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_submission_keeps_dialog_open() {
        let mut manager =
            ModalManager::new(Arc::new(RejectingSubmitter), Arc::new(KeyResolver::default()));
        manager.register(login("Einloggen")).unwrap();
        manager.open("login");
        fill_login(&mut manager);

        manager.submit("login");
        settle().await;
        let toasts = manager.update();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind(), ToastKind::Error);

        assert!(manager.is_visible("login"));
        assert!(!submit_label(&manager, "login").1);
        let form = manager.element("login").unwrap().form().unwrap();
        assert_eq!(form.value("email").as_deref(), Some("max@example.com"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_pending_submissions() {
        let mut manager = manager();
        manager.open("login");
        fill_login(&mut manager);
        manager.submit("login");

        manager.shutdown();
        settle().await;
        tokio::time::sleep(DELAY).await;
        settle().await;
        // Cancellation report restores the control without a toast
        assert!(manager.update().is_empty());
        assert!(!submit_label(&manager, "login").1);
        assert!(manager.is_visible("login"));
    }
}
