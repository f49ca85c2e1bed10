//! Static information about the conditions treated by the clinic.

use crate::modal::{ActionEffect, Document, DocumentAction, DocumentSection, SectionContent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionDetails {
    Symptoms(&'static [&'static str]),
    /// Conditions without symptoms list the available options instead.
    Options(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub name: &'static str,
    pub description: &'static str,
    pub details: ConditionDetails,
    pub treatment: &'static str,
}

pub const CONDITIONS: &[Condition] = &[
    Condition {
        name: "Heuschnupfen",
        description: "Allergische Rhinitis verursacht durch Pollen von Bäumen, Gräsern und Unkräutern.",
        details: ConditionDetails::Symptoms(&[
            "Niesen",
            "Laufende Nase",
            "Juckende Augen",
            "Nasenverstopfung",
        ]),
        treatment: "Antihistaminika, Nasensprays und Allergiemanagement",
    },
    Condition {
        name: "Durchfall",
        description: "Häufige, lockere oder wässrige Stuhlgänge.",
        details: ConditionDetails::Symptoms(&[
            "Lockere Stühle",
            "Bauchkrämpfe",
            "Dehydratation",
            "Übelkeit",
        ]),
        treatment: "Flüssigkeitsersatz, Ernährungsumstellung und Medikamente bei Bedarf",
    },
    Condition {
        name: "Übelkeit",
        description: "Gefühl von Übelkeit mit Neigung zum Erbrechen.",
        details: ConditionDetails::Symptoms(&[
            "Übelkeitsgefühl",
            "Schwindel",
            "Appetitlosigkeit",
            "Schwäche",
        ]),
        treatment: "Anti-Übelkeitsmedikamente, Ernährungsumstellung und Ruhe",
    },
    Condition {
        name: "Coronavirus",
        description: "COVID-19-Infektion verursacht durch das SARS-CoV-2-Virus.",
        details: ConditionDetails::Symptoms(&[
            "Fieber",
            "Husten",
            "Kurzatmigkeit",
            "Verlust von Geschmack/Geruch",
        ]),
        treatment: "Ruhe, Flüssigkeitszufuhr, fiebersenkende Mittel und medizinische Überwachung",
    },
    Condition {
        name: "Erektionsstörungen",
        description: "Schwierigkeiten beim Erreichen oder Aufrechterhalten einer Erektion.",
        details: ConditionDetails::Symptoms(&[
            "Probleme beim Erreichen einer Erektion",
            "Schwierigkeiten beim Aufrechterhalten",
            "Reduziertes sexuelles Verlangen",
        ]),
        treatment: "Medikamente, Lebensstiländerungen und psychologische Unterstützung",
    },
    Condition {
        name: "Burnout",
        description: "Körperliche und emotionale Erschöpfung durch chronischen Stress.",
        details: ConditionDetails::Symptoms(&[
            "Erschöpfung",
            "Zynismus",
            "Reduzierte Leistung",
            "Depression",
        ]),
        treatment: "Stressmanagement, Therapie, Lebensstiländerungen und Ruhe",
    },
    Condition {
        name: "Blasenentzündung",
        description: "Bakterielle Infektion der Harnblase.",
        details: ConditionDetails::Symptoms(&[
            "Schmerzhaftes Wasserlassen",
            "Häufiges Wasserlassen",
            "Unterbauchschmerzen",
            "Trüber Urin",
        ]),
        treatment: "Antibiotika, erhöhte Flüssigkeitszufuhr und Schmerzlinderung",
    },
    Condition {
        name: "Verhütung",
        description: "Methoden zur Verhinderung einer Schwangerschaft.",
        details: ConditionDetails::Options(&["Antibabypille", "Spirale", "Kondome", "Hormonpflaster"]),
        treatment: "Beratung für geeignete Verhütungsmethode",
    },
    Condition {
        name: "Erkältung",
        description: "Virusinfektion der oberen Atemwege.",
        details: ConditionDetails::Symptoms(&["Laufende Nase", "Halsschmerzen", "Husten", "Niesen"]),
        treatment: "Ruhe, Flüssigkeiten, rezeptfreie Medikamente und Symptomlinderung",
    },
    Condition {
        name: "Gürtelrose",
        description: "Schmerzhafter Hautausschlag verursacht durch das Varicella-Zoster-Virus.",
        details: ConditionDetails::Symptoms(&[
            "Schmerzhafter Hautausschlag",
            "Bläschen",
            "Brennendes Gefühl",
            "Fieber",
        ]),
        treatment: "Antivirale Medikamente, Schmerzlinderung und Hautpflege",
    },
    Condition {
        name: "Halsschmerzen",
        description: "Schmerzen, Kratzen oder Reizung im Hals.",
        details: ConditionDetails::Symptoms(&[
            "Halsschmerzen",
            "Schluckbeschwerden",
            "Heiserkeit",
            "Geschwollene Drüsen",
        ]),
        treatment: "Ruhe, warme Flüssigkeiten, Halsbonbons und Schmerzlinderung",
    },
    Condition {
        name: "Nackenschmerzen",
        description: "Beschwerden im Bereich der Halswirbelsäule.",
        details: ConditionDetails::Symptoms(&[
            "Steifer Nacken",
            "Muskelverspannungen",
            "Kopfschmerzen",
            "Eingeschränkte Bewegung",
        ]),
        treatment: "Schmerzlinderung, Physiotherapie, Wärme-/Kältetherapie und Übungen",
    },
];

/// Look up a condition by its exact display name.
pub fn find(name: &str) -> Option<&'static Condition> {
    CONDITIONS.iter().find(|condition| condition.name == name)
}

impl Condition {
    /// Dialog content describing this condition.
    pub fn document(&self) -> Document {
        let (title, items) = match self.details {
            ConditionDetails::Symptoms(items) => ("Symptome:", items),
            ConditionDetails::Options(items) => ("Optionen:", items),
        };

        Document {
            heading: self.name.to_string(),
            description: self.description.to_string(),
            sections: vec![
                DocumentSection {
                    title: title.to_string(),
                    content: SectionContent::List(items.iter().map(ToString::to_string).collect()),
                },
                DocumentSection {
                    title: "Behandlung:".to_string(),
                    content: SectionContent::Paragraph(self.treatment.to_string()),
                },
            ],
            actions: vec![
                DocumentAction::new(
                    "Behandlung starten",
                    ActionEffect::Open(super::catalog::CONSULTATION.into()),
                ),
                DocumentAction::new("Schließen", ActionEffect::Close),
            ],
        }
    }
}
