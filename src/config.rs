//! Runtime settings resolved from named keys with fallback defaults.
//!
//! | Key            | Default                      |
//! |----------------|------------------------------|
//! | `API_URL`      | `http://localhost:3000/api`  |
//! | `SHOP_URL`     | `http://yoast.test`          |
//! | `USER_ID`      | unset                        |
//! | `ACCESS_TOKEN` | unset                        |
//!
//! Each key can also be given as `MY_ACCOUNT_<KEY>`, which takes precedence.

use crate::api::RequestContext;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_SHOP_URL: &str = "http://yoast.test";

const PREFIX: &str = "MY_ACCOUNT_";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub shop_url: String,
    pub user_id: Option<String>,
    pub access_token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            shop_url: DEFAULT_SHOP_URL.into(),
            user_id: None,
            access_token: None,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(format!("{PREFIX}{key}").as_str())
                .filter(|v| !v.is_empty())
                .or_else(|| lookup(key).filter(|v| !v.is_empty()))
        };

        let defaults = Self::default();
        Self {
            api_url: get("API_URL").unwrap_or(defaults.api_url),
            shop_url: get("SHOP_URL").unwrap_or(defaults.shop_url),
            user_id: get("USER_ID"),
            access_token: get("ACCESS_TOKEN"),
        }
    }

    pub fn shop_url(&self) -> &str {
        &self.shop_url
    }

    /// Request context for the configured user, if one is set.
    pub fn request_context(&self) -> Option<RequestContext> {
        let user_id = self.user_id.as_ref()?;
        let context = RequestContext::new(self.api_url.clone(), user_id.clone());
        Some(match &self.access_token {
            Some(token) => context.with_access_token(token.clone()),
            None => context,
        })
    }
}
