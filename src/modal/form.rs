use std::collections::BTreeMap;

use crossterm::event::{KeyCode, KeyEvent};

use crate::modal::{FieldKind, FormField, FormSpec, SelectOption};
use crate::ui::{Component, FieldInput, Handled, Result, Spinner};

/// Label of the submit control while a submission is in flight.
pub const PROCESSING_LABEL: &str = "Wird verarbeitet...";

/// Values of a form keyed by field name.
pub type FormData = BTreeMap<String, String>;

/// A field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField {
    pub index: usize,
    pub message: String,
}

pub(crate) enum FieldControl {
    Input(FieldInput),
    Select {
        options: Vec<SelectOption>,
        selected: usize,
    },
}

pub(crate) struct FieldState {
    pub(crate) field: FormField,
    pub(crate) control: FieldControl,
}

impl FieldState {
    fn new(field: &FormField) -> Self {
        let control = match &field.kind {
            FieldKind::Select { options } => FieldControl::Select {
                options: options.clone(),
                selected: 0,
            },
            kind => {
                let mut input = FieldInput::new();
                if let Some(placeholder) = &field.placeholder {
                    input = input.with_placeholder(placeholder.clone());
                }
                match kind {
                    FieldKind::Password => input = input.masked(),
                    FieldKind::TextArea { .. } => input = input.multiline(),
                    _ => {}
                }
                FieldControl::Input(input)
            }
        };
        Self {
            field: field.clone(),
            control,
        }
    }

    fn value(&self) -> String {
        match &self.control {
            FieldControl::Input(input) => input.value().to_string(),
            FieldControl::Select { options, selected } => options
                .get(*selected)
                .map(|option| option.value.clone())
                .unwrap_or_default(),
        }
    }

    fn reset(&mut self) {
        match &mut self.control {
            FieldControl::Input(input) => input.clear(),
            FieldControl::Select { selected, .. } => *selected = 0,
        }
    }

    fn set_focused(&mut self, focused: bool) {
        if let FieldControl::Input(input) = &mut self.control {
            input.set_focused(focused);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<()>> {
        match &mut self.control {
            FieldControl::Input(input) => input.handle_key(key),
            FieldControl::Select { options, selected } => {
                let count = options.len();
                if count == 0 {
                    return Ok(Handled::Ignored);
                }
                Ok(match key.code {
                    KeyCode::Right | KeyCode::Char(' ') => {
                        *selected = (*selected + 1) % count;
                        Handled::Consumed
                    }
                    KeyCode::Left => {
                        *selected = (*selected + count - 1) % count;
                        Handled::Consumed
                    }
                    _ => Handled::Ignored,
                })
            }
        }
    }
}

/// The submit button of a form.
pub struct SubmitControl {
    label: String,
    original: String,
    disabled: bool,
    pub(crate) spinner: Spinner,
}

impl SubmitControl {
    fn new(label: &str) -> Self {
        let mut spinner = Spinner::new();
        spinner.set_label(PROCESSING_LABEL);
        Self {
            label: label.to_string(),
            original: label.to_string(),
            disabled: false,
            spinner,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn disable(&mut self) {
        PROCESSING_LABEL.clone_into(&mut self.label);
        self.disabled = true;
    }

    fn enable(&mut self) {
        self.label.clone_from(&self.original);
        self.disabled = false;
    }
}

/// Editable state of a form dialog.
///
/// Focus moves over the fields and then the submit button, which sits at
/// index `fields.len()`.
pub struct FormState {
    pub(crate) fields: Vec<FieldState>,
    focus: usize,
    submit: SubmitControl,
    footer: Option<String>,
}

impl FormState {
    pub fn from_spec(spec: &FormSpec) -> Self {
        let mut state = Self {
            fields: spec.fields.iter().map(FieldState::new).collect(),
            focus: 0,
            submit: SubmitControl::new(&spec.submit_label),
            footer: spec.footer.clone(),
        };
        state.sync_focus();
        state
    }

    pub fn footer(&self) -> Option<&str> {
        self.footer.as_deref()
    }

    pub const fn submit_control(&self) -> &SubmitControl {
        &self.submit
    }

    pub(crate) const fn submit_control_mut(&mut self) -> &mut SubmitControl {
        &mut self.submit
    }

    pub const fn focused(&self) -> usize {
        self.focus
    }

    pub const fn submit_focused(&self) -> bool {
        self.focus == self.fields.len()
    }

    pub fn focus(&mut self, index: usize) {
        self.focus = index.min(self.fields.len());
        self.sync_focus();
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % (self.fields.len() + 1);
        self.sync_focus();
    }

    pub fn focus_prev(&mut self) {
        let slots = self.fields.len() + 1;
        self.focus = (self.focus + slots - 1) % slots;
        self.sync_focus();
    }

    fn sync_focus(&mut self) {
        let focus = self.focus;
        for (index, field) in self.fields.iter_mut().enumerate() {
            field.set_focused(index == focus);
        }
    }

    /// Current value of a field, if the form has a field with that name.
    pub fn value(&self, name: &str) -> Option<String> {
        self.fields
            .iter()
            .find(|f| f.field.name == name)
            .map(FieldState::value)
    }

    /// Set a field by name. For selects, `value` picks the option with that value.
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        let Some(state) = self.fields.iter_mut().find(|f| f.field.name == name) else {
            return false;
        };
        match &mut state.control {
            FieldControl::Input(input) => {
                input.set_value(value);
                true
            }
            FieldControl::Select { options, selected } => {
                match options.iter().position(|o| o.value == value) {
                    Some(index) => {
                        *selected = index;
                        true
                    }
                    None => false,
                }
            }
        }
    }

    pub fn collect(&self) -> FormData {
        self.fields
            .iter()
            .map(|f| (f.field.name.clone(), f.value()))
            .collect()
    }

    /// Check required fields and email syntax, returning the first offender.
    pub fn validate(&self) -> std::result::Result<(), InvalidField> {
        for (index, state) in self.fields.iter().enumerate() {
            let value = state.value();
            let value = value.trim();
            if state.field.required && value.is_empty() {
                return Err(InvalidField {
                    index,
                    message: format!("Bitte füllen Sie das Feld „{}“ aus.", state.field.label),
                });
            }
            if state.field.kind == FieldKind::Email && !value.is_empty() && !value.contains('@') {
                return Err(InvalidField {
                    index,
                    message: "Bitte geben Sie eine gültige E-Mail-Adresse ein.".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Clear every field back to its default and focus the first one.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.reset();
        }
        self.focus(0);
    }

    pub(crate) fn begin_submit(&mut self) {
        self.submit.disable();
    }

    pub(crate) fn end_submit(&mut self) {
        self.submit.enable();
    }

    /// Route a key to the focused field.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<()>> {
        match self.fields.get_mut(self.focus) {
            Some(field) => field.handle_key(key),
            None => Ok(Handled::Ignored),
        }
    }

    pub fn on_tick(&mut self) {
        if self.submit.disabled {
            self.submit.spinner.on_tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn login_spec() -> FormSpec {
        FormSpec::new("Einloggen")
            .field(FormField::email("email", "E-Mail").required())
            .field(FormField::password("password", "Passwort").required())
            .footer("Noch kein Konto? Registrieren")
    }

    fn time_spec() -> FormSpec {
        FormSpec::new("Termin buchen").field(
            FormField::select(
                "preferred-time",
                "Bevorzugte Zeit",
                vec![
                    SelectOption::prompt("Bevorzugte Zeit auswählen"),
                    SelectOption::new("morning", "Vormittag (8-12 Uhr)"),
                    SelectOption::new("urgent", "Dringend (sofort)"),
                ],
            )
            .required(),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_collect_uses_field_names() {
        let mut form = FormState::from_spec(&login_spec());
        form.set_value("email", "max@example.com");
        form.set_value("password", "geheim");

        let data = form.collect();
        assert_eq!(data.get("email").map(String::as_str), Some("max@example.com"));
        assert_eq!(data.get("password").map(String::as_str), Some("geheim"));
        assert_eq!(form.footer(), Some("Noch kein Konto? Registrieren"));
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let mut form = FormState::from_spec(&login_spec());
        form.set_value("email", "max@example.com");

        let invalid = form.validate().unwrap_err();
        assert_eq!(invalid.index, 1);
        assert_eq!(invalid.message, "Bitte füllen Sie das Feld „Passwort“ aus.");
    }

    #[test]
    fn test_validate_rejects_email_without_at() {
        let mut form = FormState::from_spec(&login_spec());
        form.set_value("email", "max.example.com");
        form.set_value("password", "geheim");

        let invalid = form.validate().unwrap_err();
        assert_eq!(invalid.index, 0);

        form.set_value("email", "max@example.com");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_select_prompt_counts_as_empty() {
        let mut form = FormState::from_spec(&time_spec());
        assert!(form.validate().is_err());

        form.handle_key(key(KeyCode::Right)).unwrap();
        assert_eq!(form.value("preferred-time").as_deref(), Some("morning"));
        assert!(form.validate().is_ok());

        form.handle_key(key(KeyCode::Left)).unwrap();
        form.handle_key(key(KeyCode::Left)).unwrap();
        assert_eq!(form.value("preferred-time").as_deref(), Some("urgent"));
    }

    #[test]
    fn test_focus_wraps_over_submit_button() {
        let mut form = FormState::from_spec(&login_spec());
        assert_eq!(form.focused(), 0);

        form.focus_prev();
        assert!(form.submit_focused());

        form.focus_next();
        assert_eq!(form.focused(), 0);
    }

    #[test]
    fn test_submit_control_restores_label() {
        let mut form = FormState::from_spec(&login_spec());
        form.begin_submit();
        assert!(form.submit_control().is_disabled());
        assert_eq!(form.submit_control().label(), PROCESSING_LABEL);

        form.end_submit();
        assert!(!form.submit_control().is_disabled());
        assert_eq!(form.submit_control().label(), "Einloggen");
    }

    #[test]
    fn test_reset_clears_values() {
        let mut form = FormState::from_spec(&time_spec());
        form.set_value("preferred-time", "urgent");
        form.reset();
        assert_eq!(form.value("preferred-time").as_deref(), Some(""));
        assert_eq!(form.focused(), 0);
    }
}
