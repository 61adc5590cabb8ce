use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Provider-specific request/response shape the gateway must speak.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// LibreTranslate-style JSON POST endpoints.
    Libre,
    /// The unofficial `translate_a/single` Google endpoint.
    Google,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Libre => f.write_str("libre"),
            Self::Google => f.write_str("google"),
        }
    }
}

impl FromStr for Dialect {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "libre" => Ok(Self::Libre),
            "google" => Ok(Self::Google),
            other => Err(RegistryError::UnknownDialect(other.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderDescriptor {
    pub dialect: Dialect,
    pub url: String,
}

/// Raw configuration entry: either a bare URL (implies the Libre dialect)
/// or a tagged entry whose dialect defaults to Libre when absent.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RawEndpoint {
    Url(String),
    Entry {
        #[serde(default)]
        dialect: Option<Dialect>,
        url: String,
    },
}

impl RawEndpoint {
    fn into_descriptor(self) -> ProviderDescriptor {
        match self {
            Self::Url(url) => ProviderDescriptor {
                dialect: Dialect::Libre,
                url,
            },
            Self::Entry { dialect, url } => ProviderDescriptor {
                dialect: dialect.unwrap_or(Dialect::Libre),
                url,
            },
        }
    }
}

impl FromStr for RawEndpoint {
    type Err = RegistryError;

    /// Parses `DIALECT=URL` or a bare URL. A `=` inside the URL itself
    /// (query strings) does not count as a dialect tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((tag, url)) if !tag.contains("://") => Ok(Self::Entry {
                dialect: Some(tag.parse()?),
                url: url.to_owned(),
            }),
            _ => Ok(Self::Url(s.to_owned())),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("endpoint registry must not be empty")]
    Empty,
    #[error("unknown dialect: {0}")]
    UnknownDialect(String),
}

/// Ordered list of providers; the order is the fallback priority, first to
/// last. Duplicates are legal and simply retried under a different slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderRegistry(Vec<ProviderDescriptor>);

impl ProviderRegistry {
    pub fn normalize<I>(raw: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = RawEndpoint>,
    {
        let providers: Vec<_> = raw
            .into_iter()
            .map(RawEndpoint::into_descriptor)
            .collect();
        if providers.is_empty() {
            return Err(RegistryError::Empty);
        }
        Ok(Self(providers))
    }

    /// Built-in best-effort public endpoints, in fallback order.
    pub fn defaults() -> Self {
        Self(vec![
            ProviderDescriptor {
                dialect: Dialect::Libre,
                url: "https://libretranslate.de/translate".to_owned(),
            },
            ProviderDescriptor {
                dialect: Dialect::Libre,
                url: "https://translate.astian.org/translate".to_owned(),
            },
            ProviderDescriptor {
                dialect: Dialect::Google,
                url: "https://translate.googleapis.com/translate_a/single".to_owned(),
            },
        ])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.0.iter()
    }
}
