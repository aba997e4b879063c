use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// AccountKey
///
/// Identifier of a local account: a bare `id`, or `id@host` for accounts on
/// a federated service.
///
/// A local id never contains '@' and a host never does either, so the
/// string form always parses back to the same key.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountKey {
    id: String,
    host: Option<String>,
}

impl AccountKey {
    /// Key without a host component.
    pub fn local(id: impl Into<String>) -> Result<Self, AccountKeyParseError> {
        let id = id.into();
        if id.is_empty() {
            return Err(AccountKeyParseError::Empty);
        }
        if id.contains('@') {
            return Err(AccountKeyParseError::SeparatorInLocalId(id));
        }

        Ok(Self { id, host: None })
    }

    /// Key qualified by `host`. The id itself may contain '@'.
    pub fn federated(
        id: impl Into<String>,
        host: impl Into<String>,
    ) -> Result<Self, AccountKeyParseError> {
        let (id, host) = (id.into(), host.into());
        if id.is_empty() {
            return Err(AccountKeyParseError::EmptyId(format!("@{host}")));
        }
        if host.is_empty() {
            return Err(AccountKeyParseError::EmptyHost(format!("{id}@")));
        }
        if host.contains('@') {
            return Err(AccountKeyParseError::SeparatorInHost(host));
        }

        Ok(Self {
            id,
            host: Some(host),
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Addressing scheme of the users this account can see.
    #[must_use]
    pub fn scope(&self) -> UserScope<'_> {
        match &self.host {
            None => UserScope::Local,
            Some(host) => UserScope::Federated { host },
        }
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.host {
            None => write!(f, "{}", self.id),
            Some(host) => write!(f, "{}@{host}", self.id),
        }
    }
}

impl FromStr for AccountKey {
    type Err = AccountKeyParseError;

    // The host never contains '@', so the last one is the separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(AccountKeyParseError::Empty);
        }

        match s.rsplit_once('@') {
            None => Self::local(s),
            Some(("", _)) => Err(AccountKeyParseError::EmptyId(s.to_string())),
            Some((_, "")) => Err(AccountKeyParseError::EmptyHost(s.to_string())),
            Some((id, host)) => Self::federated(id, host),
        }
    }
}

impl TryFrom<String> for AccountKey {
    type Error = AccountKeyParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<AccountKey> for String {
    fn from(key: AccountKey) -> Self {
        key.to_string()
    }
}

///
/// AccountKeyParseError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum AccountKeyParseError {
    #[error("account key is empty")]
    Empty,

    #[error("account key '{0}' has an empty id")]
    EmptyId(String),

    #[error("account key '{0}' has an empty host")]
    EmptyHost(String),

    #[error("local account id '{0}' contains '@'")]
    SeparatorInLocalId(String),

    #[error("account host '{0}' contains '@'")]
    SeparatorInHost(String),
}

///
/// UserScope
///
/// Which cached users belong to an account: bare identifiers for a local
/// account, `user@host` identifiers for a federated one. Lets one cache table
/// serve both schemes without a type column.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UserScope<'a> {
    Local,
    Federated { host: &'a str },
}

impl UserScope<'_> {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Federated { .. } => "federated",
        }
    }
}
