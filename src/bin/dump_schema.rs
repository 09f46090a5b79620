// SPDX-License-Identifier: AGPL-3.0-or-later

//! Print the SDL of a small demonstration schema using field arguments with defaults.
use anyhow::Result;
use async_graphql::indexmap::IndexMap;
use async_graphql::{Name, Value};
use graphql_field_arguments::{
    ArgumentDescriptor, Configuration, DeclaredType, DefaultValue, FetchEnvironment,
    FieldDefinition, ObjectDefinition, SchemaBuilder,
};

async fn inner_test_object(environment: FetchEnvironment) -> async_graphql::Result<Option<Value>> {
    let arguments = environment.arguments;
    let name = match arguments.get_as::<i64>("id")? {
        Some(id) => Some(id.to_string()),
        None => arguments.get_as::<String>("name")?,
    };

    let mut object = IndexMap::new();
    object.insert(Name::new("name"), name.map(Value::from).unwrap_or(Value::Null));
    Ok(Some(Value::Object(object)))
}

fn main() -> Result<()> {
    env_logger::init();

    let config = Configuration::from_env()?;
    let query_type_name = config.query_type_name.clone();

    let schema = SchemaBuilder::new(config)
        .register_object(
            ObjectDefinition::new("InnerTestObject")
                .field(FieldDefinition::property("name", DeclaredType::of::<String>())),
        )
        .register_object(
            ObjectDefinition::new(query_type_name)
                .description("TestObject object")
                .field(
                    FieldDefinition::new(
                        "innerTestObject",
                        DeclaredType::named("InnerTestObject"),
                        inner_test_object,
                    )
                    .argument(
                        ArgumentDescriptor::new("id", DeclaredType::of::<i64>())
                            .description("Named argument on field"),
                    )
                    .argument(
                        ArgumentDescriptor::new("name", DeclaredType::of::<String>())
                            .description("Named argument on field")
                            .default_value(DefaultValue::constant("default")),
                    ),
                ),
        )
        .build()?;

    println!("{}", schema.sdl());

    Ok(())
}
