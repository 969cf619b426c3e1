use super::*;

/// Turns a click on a language option into the language cookie. The page
/// then reloads so the server renders in the chosen language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSwitcher {
    selector: String,
    cookie_name: String,
    cookie_path: String,
    initialized: bool,
}

impl LanguageSwitcher {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            selector: config.language_selector.clone(),
            cookie_name: config.language_cookie_name.clone(),
            cookie_path: config.language_cookie_path.clone(),
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns the language options that need a click listener. Only the
    /// first call finds anything; later calls return an empty list.
    pub fn init<D: DocumentAccess + ?Sized>(&mut self, doc: &D) -> Result<Vec<NodeId>> {
        if self.initialized {
            return Ok(Vec::new());
        }
        let options = doc.query_selector_all(&self.selector)?;
        self.initialized = true;
        Ok(options)
    }

    /// Builds the cookie for the option's `lang`. Options without a usable
    /// language tag select nothing.
    pub fn on_select<D: DocumentAccess + ?Sized>(
        &self,
        doc: &D,
        option: NodeId,
    ) -> Result<Option<Cookie>> {
        let Some(lang) = doc.attribute(option, "lang") else {
            return Ok(None);
        };
        let lang = lang.trim();
        if !patterns::is_language_code(lang)? {
            return Ok(None);
        }
        Ok(Some(Cookie::new(
            &self.cookie_name,
            lang,
            &self.cookie_path,
            SameSite::Strict,
        )))
    }
}
