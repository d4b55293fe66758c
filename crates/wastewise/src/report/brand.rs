use serde::{Deserialize, Serialize};

/// A named point of contact printed on every report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub role: String,
    pub name: String,
}

impl Contact {
    pub fn new(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            name: name.into(),
        }
    }
}

/// Branding applied to rendered reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandConfig {
    pub name: String,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            name: "WasteWise".to_string(),
            contacts: Vec::new(),
        }
    }
}

impl BrandConfig {
    /// Parses `role=name;role=name`. Entries without a role or name are dropped.
    pub fn parse_contacts(raw: &str) -> Vec<Contact> {
        raw.split(';')
            .filter_map(|entry| {
                let (role, name) = entry.split_once('=')?;
                let (role, name) = (role.trim(), name.trim());
                (!role.is_empty() && !name.is_empty()).then(|| Contact::new(role, name))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_contact_list_and_skips_incomplete_entries() {
        let contacts = BrandConfig::parse_contacts(
            "Primary=Jordan Lee;Compactor Monitors = Sam Ruiz <sam@example.com>;bulk=; =Nobody;junk",
        );

        assert_eq!(
            contacts,
            vec![
                Contact::new("Primary", "Jordan Lee"),
                Contact::new("Compactor Monitors", "Sam Ruiz <sam@example.com>"),
            ]
        );
    }
}
