use super::*;

/// Identifiers, key bindings and cookie settings the form behaviors bind to.
///
/// The defaults are the consent form's markup contract. Override single
/// fields with struct update syntax:
///
/// ```
/// use consent_form::FormConfig;
///
/// let config = FormConfig {
///     reentry_target_id: "focus-before-consents".into(),
///     ..FormConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Checkbox mirroring its state onto the whole group.
    pub toggle_all_id: String,
    /// `name` shared by the consent checkboxes.
    pub checkbox_group_name: String,
    /// Element whose text shows how many group members are checked.
    pub checked_count_id: String,
    /// Scroll container holding the consent table.
    pub scroll_region_selector: String,
    /// Focus anchor placed just after the table.
    pub sentinel_id: String,
    /// Where Shift+Tab from the sentinel sends focus back to.
    pub reentry_target_id: String,
    /// `KeyboardEvent.key` value that leaves the table.
    pub escape_key: String,
    /// Commit action gated on the table having been reviewed.
    pub validate_button_id: String,
    /// Warning shown while the commit action is gated.
    pub validate_alert_id: String,
    /// Elements carrying a `lang` attribute that switch the UI language.
    pub language_selector: String,
    pub language_cookie_name: String,
    pub language_cookie_path: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            toggle_all_id: "toggle-all".into(),
            checkbox_group_name: "status".into(),
            checked_count_id: "checked-count".into(),
            scroll_region_selector: ".fr-table__content".into(),
            sentinel_id: "focus-after-consents".into(),
            reentry_target_id: "toggle-all".into(),
            escape_key: "Escape".into(),
            validate_button_id: "btn-validate".into(),
            validate_alert_id: "alert-validate".into(),
            language_selector: ".fr-translate__language".into(),
            language_cookie_name: "django_language".into(),
            language_cookie_path: "/django-dsfr".into(),
        }
    }
}

impl FormConfig {
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("toggle_all_id", &self.toggle_all_id),
            ("checked_count_id", &self.checked_count_id),
            ("sentinel_id", &self.sentinel_id),
            ("reentry_target_id", &self.reentry_target_id),
            ("validate_button_id", &self.validate_button_id),
            ("validate_alert_id", &self.validate_alert_id),
        ] {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(Error::InvalidConfig(format!(
                    "{field} must be a non-empty id without whitespace, got {value:?}"
                )));
            }
        }

        if self.checkbox_group_name.is_empty() {
            return Err(Error::InvalidConfig(
                "checkbox_group_name must not be empty".into(),
            ));
        }
        if self.escape_key.is_empty() {
            return Err(Error::InvalidConfig("escape_key must not be empty".into()));
        }

        for (field, selector) in [
            ("scroll_region_selector", &self.scroll_region_selector),
            ("language_selector", &self.language_selector),
        ] {
            Selector::parse(selector).map_err(|err| {
                Error::InvalidConfig(format!("{field} is not a supported selector: {err}"))
            })?;
        }

        if !patterns::is_cookie_token(&self.language_cookie_name)? {
            return Err(Error::InvalidConfig(format!(
                "language_cookie_name is not a cookie token: {:?}",
                self.language_cookie_name
            )));
        }
        if !patterns::is_cookie_path(&self.language_cookie_path)? {
            return Err(Error::InvalidConfig(format!(
                "language_cookie_path must be an absolute path, got {:?}",
                self.language_cookie_path
            )));
        }
        Ok(())
    }
}
