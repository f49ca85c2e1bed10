use std::borrow::Borrow;
use std::fmt;

/// Unique key of a registered dialog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModalId(String);

impl ModalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ModalId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModalId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ModalId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A dialog as registered with the manager: identity, header title and body.
#[derive(Debug, Clone)]
pub struct ModalDefinition {
    id: ModalId,
    title: String,
    body: ModalBody,
}

impl ModalDefinition {
    pub fn new(id: impl Into<ModalId>, title: impl Into<String>, body: ModalBody) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body,
        }
    }

    pub const fn id(&self) -> &ModalId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub const fn body(&self) -> &ModalBody {
        &self.body
    }

    pub(crate) fn set_body(&mut self, body: ModalBody) {
        self.body = body;
    }
}

#[derive(Debug, Clone)]
pub enum ModalBody {
    Form(FormSpec),
    Document(Document),
}

/// Description of a dialog form.
#[derive(Debug, Clone)]
pub struct FormSpec {
    pub fields: Vec<FormField>,
    pub submit_label: String,
    pub footer: Option<String>,
}

impl FormSpec {
    pub fn new(submit_label: impl Into<String>) -> Self {
        Self {
            fields: Vec::new(),
            submit_label: submit_label.into(),
            footer: None,
        }
    }

    #[must_use]
    pub fn field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: Option<String>,
}

impl FormField {
    fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            placeholder: None,
        }
    }

    pub fn email(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Email)
    }

    pub fn password(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Password)
    }

    pub fn textarea(name: impl Into<String>, label: impl Into<String>, rows: u16) -> Self {
        Self::new(name, label, FieldKind::TextArea { rows })
    }

    pub fn select(
        name: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::new(name, label, FieldKind::Select { options })
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Email,
    Password,
    TextArea { rows: u16 },
    Select { options: Vec<SelectOption> },
}

/// Entry of a select field. An empty value marks the prompt entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    pub fn prompt(label: impl Into<String>) -> Self {
        Self::new("", label)
    }
}

/// Read-only dialog content with action buttons.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub heading: String,
    pub description: String,
    pub sections: Vec<DocumentSection>,
    pub actions: Vec<DocumentAction>,
}

#[derive(Debug, Clone)]
pub struct DocumentSection {
    pub title: String,
    pub content: SectionContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionContent {
    List(Vec<String>),
    Paragraph(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentAction {
    pub label: String,
    pub effect: ActionEffect,
}

impl DocumentAction {
    pub fn new(label: impl Into<String>, effect: ActionEffect) -> Self {
        Self {
            label: label.into(),
            effect,
        }
    }
}

/// What activating a document action does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionEffect {
    /// Open another dialog on top of this one.
    Open(ModalId),
    /// Close the dialog that shows the action.
    Close,
}
