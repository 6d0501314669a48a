use super::text_input::TextInput;

/// Fields of the connection-configuration form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigForm {
    pub name: TextInput,
    pub path: TextInput,
    pub read_only: bool,
}

impl ConfigForm {
    /// Blank every field and untick read-only
    pub fn clear(&mut self) {
        self.name.clear();
        self.path.clear();
        self.read_only = false;
    }

    pub fn fill(&mut self, name: &str, path: &str, read_only: bool) {
        self.name.set_text(name);
        self.path.set_text(path);
        self.read_only = read_only;
    }

    #[must_use]
    pub fn trimmed_name(&self) -> &str {
        self.name.text().trim()
    }

    #[must_use]
    pub fn trimmed_path(&self) -> &str {
        self.path.text().trim()
    }

    pub const fn toggle_read_only(&mut self) {
        self.read_only = !self.read_only;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_then_clear() {
        let mut form = ConfigForm::default();
        form.fill("  main ", "/data/main.db", true);
        assert_eq!(form.trimmed_name(), "main");
        assert!(form.read_only);

        form.clear();
        assert_eq!(form, ConfigForm::default());
    }
}
