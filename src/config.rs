// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::Deserialize;

/// Prefix of environment variables read by `Configuration::from_env`.
const ENV_PREFIX: &str = "GRAPHQL_";

/// Name of the root query object when nothing else was configured.
pub const DEFAULT_QUERY_TYPE_NAME: &str = "Query";

/// Configuration object holding all variables used when building a schema.
///
/// Values can be overwritten through the process environment, for example
/// `GRAPHQL_MAX_DEPTH=16` or `GRAPHQL_INTROSPECTION=false`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Name of the object definition which serves as the root query type, "Query" by default.
    pub query_type_name: String,

    /// Allow introspection queries against the generated schema, true by default.
    pub introspection: bool,

    /// Maximum depth of incoming queries, unlimited when not set.
    pub max_depth: Option<usize>,

    /// Maximum complexity of incoming queries, unlimited when not set.
    pub max_complexity: Option<usize>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            query_type_name: DEFAULT_QUERY_TYPE_NAME.into(),
            introspection: true,
            max_depth: None,
            max_complexity: None,
        }
    }
}

impl Configuration {
    /// Create a new configuration object pulling in the variables from the process environment.
    ///
    /// Variables which are not set fall back to their defaults.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed(ENV_PREFIX).from_env::<Self>()
    }
}
