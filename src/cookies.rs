use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Lax => "Lax",
            Self::None => "None",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub same_site: SameSite,
}

impl Cookie {
    pub fn new(name: &str, value: &str, path: &str, same_site: SameSite) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            path: path.to_string(),
            same_site,
        }
    }
}

/// Serializes the cookie the way a `document.cookie = ...` assignment spells
/// it, e.g. `django_language=fr; Path=/django-dsfr; SameSite=Strict`.
impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}; Path={}; SameSite={}",
            self.name,
            self.value,
            self.path,
            self.same_site.as_str()
        )
    }
}

/// Cookies written by the page, in insertion order. A cookie replaces an
/// earlier one with the same name and path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: Vec<Cookie>,
}

impl CookieJar {
    pub fn set(&mut self, cookie: Cookie) {
        if let Some(existing) = self
            .cookies
            .iter_mut()
            .find(|existing| existing.name == cookie.name && existing.path == cookie.path)
        {
            *existing = cookie;
        } else {
            self.cookies.push(cookie);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Cookie> {
        self.cookies.iter().find(|cookie| cookie.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cookie> {
        self.cookies.iter()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// `document.cookie` getter: `name=value` pairs joined by `"; "`.
    pub fn document_cookie(&self) -> String {
        self.cookies
            .iter()
            .map(|cookie| format!("{}={}", cookie.name, cookie.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
