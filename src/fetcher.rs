// SPDX-License-Identifier: AGPL-3.0-or-later

//! Data fetchers compute the value of a field from the arguments passed by the caller.
use std::future::Future;
use std::iter::FromIterator;

use async_graphql::indexmap::IndexMap;
use async_graphql::{from_value, Context, Name, Result, Value};
use async_graphql_value::Value as DocumentValue;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Argument values available to a data fetcher, keyed by argument name.
///
/// Contains arguments supplied by the caller and arguments which were omitted but have a default.
/// Omitted arguments without default are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentValues(IndexMap<Name, Value>);

impl ArgumentValues {
    /// Collect the arguments the caller supplied to the field currently being resolved.
    ///
    /// Arguments bound to a variable which the request neither sets nor defaults count as
    /// omitted and are left out.
    pub fn from_context(ctx: &Context<'_>) -> Result<Self> {
        let omitted: Vec<Name> = ctx
            .item
            .node
            .arguments
            .iter()
            .filter_map(|(name, value)| match &value.node {
                DocumentValue::Variable(variable) if !is_variable_set(ctx, variable) => {
                    Some(name.node.clone())
                }
                _ => None,
            })
            .collect();

        let values = ctx
            .field()
            .arguments()?
            .into_iter()
            .filter(|(name, _)| !omitted.contains(name))
            .collect();

        Ok(Self(values))
    }

    /// Add defaults for arguments which are not present. Explicit `null` values are kept.
    pub fn insert_defaults<'a>(
        &mut self,
        defaults: impl IntoIterator<Item = &'a (String, Value)>,
    ) {
        for (name, value) in defaults {
            if !self.0.contains_key(name.as_str()) {
                self.0.insert(Name::new(name), value.clone());
            }
        }
    }

    /// Value of the argument called `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Value of the argument called `name` deserialized into `T`.
    ///
    /// Returns `Ok(None)` when the argument is absent or `null`.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(from_value(value.clone())?)),
        }
    }

    /// Returns true if a value for `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Names of all present arguments in the order they were received.
    pub fn names(&self) -> Vec<&str> {
        self.0.keys().map(|name| name.as_str()).collect()
    }

    /// Iterate over names and values of all present arguments.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of present arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no argument is present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: AsRef<str>> FromIterator<(N, Value)> for ArgumentValues {
    fn from_iter<I: IntoIterator<Item = (N, Value)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (Name::new(name), value))
                .collect(),
        )
    }
}

// Variables count as set when the request carries a value or the operation declares a default.
fn is_variable_set(ctx: &Context<'_>, variable: &Name) -> bool {
    let query_env = ctx.query_env;

    query_env.variables.contains_key(variable)
        || query_env
            .operation
            .node
            .variable_definitions
            .iter()
            .any(|definition| {
                definition.node.name.node == *variable && definition.node.default_value.is_some()
            })
}

/// Everything a data fetcher gets to know about the field it resolves.
#[derive(Debug, Clone)]
pub struct FetchEnvironment {
    /// Arguments of the field.
    pub arguments: ArgumentValues,

    /// Value of the parent object, `None` for fields of the root query object.
    pub source: Option<Value>,
}

/// Computes the result of a field.
///
/// Returning `Ok(None)` resolves the field to `null`. Errors end up in the error list of the
/// response.
#[async_trait]
pub trait DataFetcher: Send + Sync {
    /// Resolve the field for the given environment.
    async fn fetch(&self, environment: FetchEnvironment) -> Result<Option<Value>>;
}

#[async_trait]
impl<F, Fut> DataFetcher for F
where
    F: Fn(FetchEnvironment) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<Value>>> + Send + 'static,
{
    async fn fetch(&self, environment: FetchEnvironment) -> Result<Option<Value>> {
        self(environment).await
    }
}
