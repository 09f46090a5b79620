// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashSet;

use async_graphql::dynamic::{InputValue, TypeRef};
use async_graphql::Value;
use log::debug;

use crate::descriptor::ArgumentDescriptor;
use crate::errors::{ConfigurationError, SchemaBuildError};
use crate::registry::TypeRegistry;

/// Argument of a generated schema field, derived from exactly one `ArgumentDescriptor`.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaArgument {
    name: String,
    type_ref: TypeRef,
    description: Option<String>,
    default_value: Option<Value>,
}

impl SchemaArgument {
    /// Name of the argument.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved schema type.
    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    /// Description, `None` when the descriptor did not have one.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Default used when the caller omits this argument.
    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Convert into an argument definition of the dynamic schema.
    pub fn to_input_value(&self) -> InputValue {
        let mut input_value = InputValue::new(self.name.clone(), self.type_ref.clone());

        if let Some(description) = &self.description {
            input_value = input_value.description(description.clone());
        }

        if let Some(default_value) = &self.default_value {
            input_value = input_value.default_value(default_value.clone());
        }

        input_value
    }
}

/// Build the arguments of `field` from its descriptors, keeping their order.
///
/// Fails on the first descriptor which has an empty or duplicate name, declares an unresolvable
/// type or whose default value provider fails.
pub fn build_arguments(
    field: &str,
    descriptors: &[ArgumentDescriptor],
    registry: &TypeRegistry,
) -> Result<Vec<SchemaArgument>, SchemaBuildError> {
    let mut names = HashSet::new();
    let mut arguments = Vec::with_capacity(descriptors.len());

    for descriptor in descriptors {
        if descriptor.name().is_empty() {
            let location = format!("argument on field \"{}\"", field);
            return Err(ConfigurationError::EmptyName(location).into());
        }

        if !names.insert(descriptor.name()) {
            return Err(ConfigurationError::DuplicateArgument {
                field: field.to_owned(),
                argument: descriptor.name().to_owned(),
            }
            .into());
        }

        arguments.push(build_argument(field, descriptor, registry)?);
    }

    Ok(arguments)
}

fn build_argument(
    field: &str,
    descriptor: &ArgumentDescriptor,
    registry: &TypeRegistry,
) -> Result<SchemaArgument, SchemaBuildError> {
    let location = format!("{}({})", field, descriptor.name());
    let type_ref = registry.resolve(
        descriptor.declared_type(),
        descriptor.is_required(),
        &location,
    )?;

    let default_value = match descriptor.get_default_value() {
        Some(default_value) => default_value.resolve(descriptor.name())?,
        None => None,
    };

    let description = match descriptor.get_description() {
        "" => None,
        description => Some(description.to_owned()),
    };

    debug!("Built argument {} of type {}", location, type_ref);

    Ok(SchemaArgument {
        name: descriptor.name().to_owned(),
        type_ref,
        description,
        default_value,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_graphql::dynamic::TypeRef;
    use async_graphql::Value;
    use rstest::rstest;

    use crate::default_value::{DefaultValue, NullDefaultValue};
    use crate::descriptor::{ArgumentDescriptor, DeclaredType};
    use crate::errors::{ConfigurationError, SchemaBuildError};
    use crate::registry::TypeRegistry;

    use super::build_arguments;

    fn named_argument(name: &str, declared_type: DeclaredType) -> ArgumentDescriptor {
        ArgumentDescriptor::new(name, declared_type).description("Named argument on field")
    }

    #[test]
    fn keeps_name_type_and_description() {
        let descriptors = vec![
            named_argument("id", DeclaredType::of::<i64>()),
            named_argument("name", DeclaredType::of::<String>()),
        ];

        let arguments =
            build_arguments("Query.innerTestObject", &descriptors, &TypeRegistry::new()).unwrap();

        assert_eq!(arguments.len(), 2);
        assert_eq!(arguments[0].name(), "id");
        assert_eq!(arguments[0].description(), Some("Named argument on field"));
        assert_eq!(arguments[0].type_ref(), &TypeRef::named(TypeRef::INT));
        assert_eq!(arguments[1].name(), "name");
        assert_eq!(arguments[1].description(), Some("Named argument on field"));
        assert_eq!(arguments[1].type_ref(), &TypeRef::named(TypeRef::STRING));
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec!["a"])]
    #[case(vec!["c", "a", "b"])]
    #[case(vec!["limit", "offset", "orderBy", "filter", "after"])]
    fn preserves_declaration_order(#[case] names: Vec<&str>) {
        let descriptors: Vec<ArgumentDescriptor> = names
            .iter()
            .map(|name| ArgumentDescriptor::new(*name, DeclaredType::of::<String>()))
            .collect();

        let arguments = build_arguments("Query.items", &descriptors, &TypeRegistry::new()).unwrap();
        let built: Vec<&str> = arguments.iter().map(|argument| argument.name()).collect();

        assert_eq!(built, names);
    }

    #[test]
    fn empty_description_is_omitted() {
        let descriptors = vec![ArgumentDescriptor::new("id", DeclaredType::of::<i64>())];
        let arguments = build_arguments("Query.item", &descriptors, &TypeRegistry::new()).unwrap();
        assert_eq!(arguments[0].description(), None);
    }

    #[test]
    fn required_arguments_are_non_null() {
        let descriptors = vec![ArgumentDescriptor::new("id", DeclaredType::of::<i64>()).required()];
        let arguments = build_arguments("Query.item", &descriptors, &TypeRegistry::new()).unwrap();
        assert_eq!(arguments[0].type_ref(), &TypeRef::named_nn(TypeRef::INT));
    }

    #[test]
    fn absent_provider_leaves_default_unset() {
        let descriptors = vec![
            ArgumentDescriptor::new("id", DeclaredType::of::<i64>()),
            ArgumentDescriptor::new("name", DeclaredType::of::<String>())
                .default_value(DefaultValue::of::<NullDefaultValue>()),
        ];

        let arguments = build_arguments("Query.item", &descriptors, &TypeRegistry::new()).unwrap();
        assert_eq!(arguments[0].default_value(), None);
        assert_eq!(arguments[1].default_value(), None);
    }

    #[test]
    fn provider_invoked_once_per_build() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let descriptors = vec![ArgumentDescriptor::new("name", DeclaredType::of::<String>())
            .default_value(DefaultValue::from_fn(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Value::from("default"))
            }))];
        let registry = TypeRegistry::new();

        let first = build_arguments("Query.item", &descriptors, &registry).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let second = build_arguments("Query.item", &descriptors, &registry).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        assert_eq!(first[0].default_value(), Some(&Value::from("default")));
        assert_eq!(first, second);
    }

    #[test]
    fn duplicate_names_fail() {
        let descriptors = vec![
            ArgumentDescriptor::new("id", DeclaredType::of::<i64>()),
            ArgumentDescriptor::new("name", DeclaredType::of::<String>()),
            ArgumentDescriptor::new("id", DeclaredType::of::<String>()),
        ];

        let result = build_arguments("Query.item", &descriptors, &TypeRegistry::new());
        match result {
            Err(SchemaBuildError::Configuration(ConfigurationError::DuplicateArgument {
                field,
                argument,
            })) => {
                assert_eq!(field, "Query.item");
                assert_eq!(argument, "id");
            }
            other => panic!("Expected duplicate argument error, got {:?}", other),
        }
    }

    #[test]
    fn empty_name_fails() {
        let descriptors = vec![ArgumentDescriptor::new("", DeclaredType::of::<i64>())];
        let result = build_arguments("Query.item", &descriptors, &TypeRegistry::new());
        assert!(matches!(
            result,
            Err(SchemaBuildError::Configuration(ConfigurationError::EmptyName(_)))
        ));
    }

    #[test]
    fn unresolved_type_names_location() {
        let descriptors = vec![ArgumentDescriptor::new(
            "owner",
            DeclaredType::named("Person"),
        )];

        let error = build_arguments("Query.item", &descriptors, &TypeRegistry::new()).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Type Person used on \"Query.item(owner)\" can not be resolved to a schema type"
        );
    }
}
