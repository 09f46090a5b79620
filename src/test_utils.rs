// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use async_graphql::indexmap::IndexMap;
use async_graphql::{Name, Value};
use rstest::fixture;
use tokio::sync::Mutex;

use crate::{
    ArgumentDescriptor, ArgumentValues, DataFetcher, DeclaredType, DefaultValue,
    DefaultValueProvider, FetchEnvironment, FieldDefinition, ObjectDefinition, SchemaBuilder,
};

/// Description used on all arguments of the test object.
pub const ARGUMENT_DESCRIPTION: &str = "Named argument on field";

/// Default value provider yielding the string "default".
#[derive(Debug, Default)]
pub struct TestDefault;

impl DefaultValueProvider for TestDefault {
    fn default_value(&self) -> anyhow::Result<Value> {
        Ok(Value::from("default"))
    }
}

/// Data fetcher which records the arguments of every invocation.
///
/// Resolves to an `InnerTestObject` named after the `id` argument if present, otherwise after the
/// `name` argument.
#[derive(Clone, Debug, Default)]
pub struct RecordingFetcher {
    calls: Arc<Mutex<Vec<ArgumentValues>>>,
}

impl RecordingFetcher {
    /// Arguments of all invocations so far.
    pub async fn calls(&self) -> Vec<ArgumentValues> {
        self.calls.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl DataFetcher for RecordingFetcher {
    async fn fetch(&self, environment: FetchEnvironment) -> async_graphql::Result<Option<Value>> {
        let arguments = environment.arguments;
        self.calls.lock().await.push(arguments.clone());

        let name = match (
            arguments.get_as::<i64>("id")?,
            arguments.get_as::<String>("name")?,
        ) {
            (Some(id), _) => Value::from(id.to_string()),
            (None, Some(name)) => Value::from(name),
            (None, None) => Value::Null,
        };

        let mut object = IndexMap::new();
        object.insert(Name::new("name"), name);
        Ok(Some(Value::Object(object)))
    }
}

/// Object type returned by `innerTestObject`.
pub fn inner_test_object() -> ObjectDefinition {
    ObjectDefinition::new("InnerTestObject")
        .field(FieldDefinition::property("name", DeclaredType::of::<String>()))
}

/// Query object with a single `innerTestObject` field taking `id` and `name` arguments.
pub fn test_object(fetcher: RecordingFetcher, with_defaults: bool) -> ObjectDefinition {
    let mut id = ArgumentDescriptor::new("id", DeclaredType::of::<i64>())
        .description(ARGUMENT_DESCRIPTION);
    let mut name = ArgumentDescriptor::new("name", DeclaredType::of::<String>())
        .description(ARGUMENT_DESCRIPTION);

    if with_defaults {
        id = id.default_value(DefaultValue::constant(1));
        name = name.default_value(DefaultValue::of::<TestDefault>());
    }

    ObjectDefinition::new("Query").description("TestObject object").field(
        FieldDefinition::new(
            "innerTestObject",
            DeclaredType::named("InnerTestObject"),
            fetcher,
        )
        .argument(id)
        .argument(name),
    )
}

/// Builder holding the test object without defaults and a fetcher recording its invocations.
#[fixture]
pub fn test_schema_builder() -> (SchemaBuilder, RecordingFetcher) {
    let fetcher = RecordingFetcher::default();

    let builder = SchemaBuilder::default()
        .register_object(test_object(fetcher.clone(), false))
        .register_object(inner_test_object());

    (builder, fetcher)
}
