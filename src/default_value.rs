// SPDX-License-Identifier: AGPL-3.0-or-later

//! Providers for default values of field arguments.
//!
//! A `DefaultValue` wraps a factory which first instantiates a `DefaultValueProvider` and then
//! asks it for the value. Both steps run every time a default gets resolved, which is once per
//! argument and schema build.
use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use async_graphql::Value;
use log::debug;

use crate::errors::SchemaBuildError;

/// Produces the value used for an argument when the caller omits it.
///
/// Returning `Value::Null` means the argument has no default.
pub trait DefaultValueProvider: Send + Sync {
    /// Returns the default value.
    fn default_value(&self) -> anyhow::Result<Value>;
}

/// Provider which never yields a default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDefaultValue;

impl DefaultValueProvider for NullDefaultValue {
    fn default_value(&self) -> anyhow::Result<Value> {
        Ok(Value::Null)
    }
}

struct FnProvider<F>(F);

impl<F> DefaultValueProvider for FnProvider<F>
where
    F: Fn() -> anyhow::Result<Value> + Send + Sync,
{
    fn default_value(&self) -> anyhow::Result<Value> {
        (self.0)()
    }
}

type ProviderFactory = dyn Fn() -> anyhow::Result<Box<dyn DefaultValueProvider>> + Send + Sync;

/// Factory for the default value of one argument.
#[derive(Clone)]
pub struct DefaultValue {
    provider: &'static str,
    factory: Arc<ProviderFactory>,
}

impl DefaultValue {
    /// Default which always yields a clone of `value`.
    pub fn constant(value: impl Into<Value>) -> Self {
        let value = value.into();

        Self {
            provider: "constant",
            factory: Arc::new(move || -> anyhow::Result<Box<dyn DefaultValueProvider>> {
                let value = value.clone();
                Ok(Box::new(FnProvider(move || -> anyhow::Result<Value> {
                    Ok(value.clone())
                })))
            }),
        }
    }

    /// Default computed by calling `f`.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        let f = Arc::new(f);

        Self {
            provider: type_name::<F>(),
            factory: Arc::new(move || -> anyhow::Result<Box<dyn DefaultValueProvider>> {
                let f = f.clone();
                Ok(Box::new(FnProvider(move || f())))
            }),
        }
    }

    /// Default computed by a fresh `P` created through its `Default` implementation.
    pub fn of<P>() -> Self
    where
        P: DefaultValueProvider + Default + 'static,
    {
        Self {
            provider: type_name::<P>(),
            factory: Arc::new(|| -> anyhow::Result<Box<dyn DefaultValueProvider>> {
                Ok(Box::new(P::default()))
            }),
        }
    }

    /// Default computed by a `P` which is created by `factory`.
    ///
    /// Errors returned by `factory` abort the schema build.
    pub fn from_factory<F, P>(factory: F) -> Self
    where
        F: Fn() -> anyhow::Result<P> + Send + Sync + 'static,
        P: DefaultValueProvider + 'static,
    {
        Self {
            provider: type_name::<P>(),
            factory: Arc::new(move || -> anyhow::Result<Box<dyn DefaultValueProvider>> {
                let provider = factory()?;
                Ok(Box::new(provider))
            }),
        }
    }

    /// Name of the provider, used in logs and error messages.
    pub fn provider_name(&self) -> &'static str {
        self.provider
    }

    /// Instantiate the provider and ask it for the default of `argument`.
    ///
    /// Returns `None` when the provider yields `null`.
    pub fn resolve(&self, argument: &str) -> Result<Option<Value>, SchemaBuildError> {
        let provider =
            (self.factory)().map_err(|error| SchemaBuildError::ProviderInstantiation {
                argument: argument.to_owned(),
                provider: self.provider.to_owned(),
                error,
            })?;

        let value = provider
            .default_value()
            .map_err(|error| SchemaBuildError::ProviderEvaluation {
                argument: argument.to_owned(),
                provider: self.provider.to_owned(),
                error,
            })?;

        debug!(
            "Resolved default {} for argument {} using {}",
            value, argument, self.provider
        );

        match value {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultValue")
            .field("provider", &self.provider)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use anyhow::anyhow;
    use async_graphql::Value;

    use crate::errors::SchemaBuildError;

    use super::{DefaultValue, DefaultValueProvider, NullDefaultValue};

    #[derive(Default)]
    struct Greeting;

    impl DefaultValueProvider for Greeting {
        fn default_value(&self) -> anyhow::Result<Value> {
            Ok(Value::from("default"))
        }
    }

    struct Broken;

    impl DefaultValueProvider for Broken {
        fn default_value(&self) -> anyhow::Result<Value> {
            Err(anyhow!("out of defaults"))
        }
    }

    #[test]
    fn constant_value() {
        let default = DefaultValue::constant(42);
        assert_eq!(default.resolve("limit").unwrap(), Some(Value::from(42)));
    }

    #[test]
    fn provider_type() {
        let default = DefaultValue::of::<Greeting>();
        assert_eq!(default.resolve("name").unwrap(), Some(Value::from("default")));
        assert!(default.provider_name().ends_with("Greeting"));
    }

    #[test]
    fn null_means_no_default() {
        assert_eq!(DefaultValue::of::<NullDefaultValue>().resolve("id").unwrap(), None);
        assert_eq!(DefaultValue::constant(Value::Null).resolve("id").unwrap(), None);
    }

    #[test]
    fn instantiated_on_every_resolve() {
        let instances = Arc::new(AtomicUsize::new(0));
        let counter = instances.clone();
        let default = DefaultValue::from_factory(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Greeting)
        });

        default.resolve("name").unwrap();
        default.resolve("name").unwrap();
        assert_eq!(instances.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn instantiation_error() {
        let default = DefaultValue::from_factory(|| -> anyhow::Result<Greeting> {
            Err(anyhow!("no accessible constructor"))
        });

        let result = default.resolve("name");
        assert!(matches!(
            result,
            Err(SchemaBuildError::ProviderInstantiation { ref argument, .. }) if argument == "name"
        ));
    }

    #[test]
    fn evaluation_error() {
        let default = DefaultValue::from_factory(|| Ok(Broken));
        assert!(matches!(
            default.resolve("name"),
            Err(SchemaBuildError::ProviderEvaluation { .. })
        ));

        let default = DefaultValue::from_fn(|| Err(anyhow!("out of defaults")));
        assert!(matches!(
            default.resolve("name"),
            Err(SchemaBuildError::ProviderEvaluation { .. })
        ));
    }
}
