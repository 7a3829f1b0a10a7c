use std::collections::HashMap;

/// Per-run mapping from clinician names to sequential pseudonyms (`medico1`, `medico2`, ...).
///
/// Pseudonyms follow the order in which names first appear. The visible clinician keeps
/// their real name.
#[derive(Debug, Clone, Default)]
pub struct ClinicianPseudonyms {
    visible: String,
    mapping: HashMap<String, String>,
}

impl ClinicianPseudonyms {
    pub fn build<'a, I>(visible: &str, names: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut mapping = HashMap::new();
        for name in names.into_iter().flatten() {
            if name == visible || mapping.contains_key(name) {
                continue;
            }
            let pseudonym = format!("medico{}", mapping.len() + 1);
            mapping.insert(name.to_string(), pseudonym);
        }
        Self {
            visible: visible.to_string(),
            mapping,
        }
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    pub fn pseudonym(&self, name: &str) -> Option<&str> {
        self.mapping.get(name).map(String::as_str)
    }

    /// Masks `name` unless it is the visible clinician. Unknown names pass through.
    pub fn rename(&self, name: Option<&str>) -> Option<String> {
        let name = name?;
        if name == self.visible {
            return Some(name.to_string());
        }
        Some(self.pseudonym(name).unwrap_or(name).to_string())
    }
}
