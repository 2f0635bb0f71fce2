use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The authenticated actor as handed over by the auth layer.
///
/// Carries credentials and whatever else the identity provider returned, so
/// it must never be persisted or cached as-is. Use [`Author::from_principal`]
/// to get the storable projection.
///
/// Only `Deserialize` is derived, so a principal cannot be written anywhere:
///
/// ```compile_fail
/// fn assert_serialize<T: serde::Serialize>() {}
/// assert_serialize::<articles_core::article::Principal>();
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Principal {
    pub id: String,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    /// OAuth access token of the session.
    #[serde(default)]
    pub token: Option<String>,
    /// Any other attribute the identity provider attached.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Principal {
    /// Creates a principal with only an id set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            login: None,
            name: None,
            email: None,
            avatar_url: None,
            html_url: None,
            token: None,
            extra: Map::new(),
        }
    }

    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    pub fn with_html_url(mut self, html_url: impl Into<String>) -> Self {
        self.html_url = Some(html_url.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Attaches an arbitrary provider attribute.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Public profile of an article owner.
///
/// This is the only shape of a principal that reaches the store or the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

impl Author {
    /// Creates an author with only an id set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            login: None,
            name: None,
            avatar_url: None,
            html_url: None,
        }
    }

    /// Projects a principal onto its public profile fields.
    ///
    /// `token`, `email` and every extra attribute are dropped.
    pub fn from_principal(principal: &Principal) -> Self {
        Self {
            id: principal.id.clone(),
            login: principal.login.clone(),
            name: principal.name.clone(),
            avatar_url: principal.avatar_url.clone(),
            html_url: principal.html_url.clone(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }
}

impl From<&Principal> for Author {
    fn from(principal: &Principal) -> Self {
        Self::from_principal(principal)
    }
}
