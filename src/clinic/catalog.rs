//! The clinic's built-in dialogs.

use tracing::debug;

use crate::clinic::conditions;
use crate::modal::{
    FormField, FormSpec, ModalBody, ModalDefinition, ModalError, ModalManager, SelectOption,
};

pub const LOGIN: &str = "login";
pub const CONSULTATION: &str = "consultation";
pub const CONDITION: &str = "condition";

const CONDITION_TITLE: &str = "Krankheitsinformationen";

pub fn login() -> ModalDefinition {
    ModalDefinition::new(
        LOGIN,
        "Einloggen",
        ModalBody::Form(
            FormSpec::new("Einloggen")
                .field(FormField::email("email", "E-Mail").required())
                .field(FormField::password("password", "Passwort").required())
                .footer("Noch kein Konto? Registrieren"),
        ),
    )
}

pub fn consultation() -> ModalDefinition {
    let consultation_types = vec![
        SelectOption::prompt("Behandlungsart auswählen"),
        SelectOption::new("general", "Allgemeinmedizin"),
        SelectOption::new("cardiology", "Kardiologie"),
        SelectOption::new("mental-health", "Psychiatrie"),
        SelectOption::new("pediatrics", "Pädiatrie"),
        SelectOption::new("dermatology", "Dermatologie"),
    ];
    let times = vec![
        SelectOption::prompt("Bevorzugte Zeit auswählen"),
        SelectOption::new("morning", "Vormittag (8-12 Uhr)"),
        SelectOption::new("afternoon", "Nachmittag (12-17 Uhr)"),
        SelectOption::new("evening", "Abend (17-21 Uhr)"),
        SelectOption::new("urgent", "Dringend (sofort)"),
    ];

    ModalDefinition::new(
        CONSULTATION,
        "Behandlung starten",
        ModalBody::Form(
            FormSpec::new("Termin buchen")
                .field(
                    FormField::select("consultation-type", "Behandlungsart", consultation_types)
                        .required(),
                )
                .field(
                    FormField::textarea("symptoms", "Beschreiben Sie Ihre Symptome", 4)
                        .placeholder("Bitte beschreiben Sie Ihre Symptome..."),
                )
                .field(FormField::select("preferred-time", "Bevorzugte Zeit", times).required()),
        ),
    )
}

/// Register the login and consultation dialogs.
pub fn register_defaults(manager: &mut ModalManager) -> Result<(), ModalError> {
    manager.register(login())?;
    manager.register(consultation())?;
    Ok(())
}

/// Show the information dialog for a condition.
///
/// The dialog is registered the first time a condition is shown; later calls
/// swap its content. Unknown names do nothing.
pub fn show_condition(manager: &mut ModalManager, name: &str) -> Result<(), ModalError> {
    let Some(condition) = conditions::find(name) else {
        debug!(name, "No information for condition");
        return Ok(());
    };

    let body = ModalBody::Document(condition.document());
    if manager.is_registered(CONDITION) {
        manager.set_body(CONDITION, body);
    } else {
        manager.register(ModalDefinition::new(CONDITION, CONDITION_TITLE, body))?;
    }
    manager.open(CONDITION);
    Ok(())
}
