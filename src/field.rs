// SPDX-License-Identifier: AGPL-3.0-or-later

//! Definitions of objects and their fields, the place where argument descriptors get attached.
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use async_graphql::dynamic::{Field, FieldFuture, FieldValue, Object, TypeRef};
use async_graphql::Value;
use log::debug;

use crate::argument::{build_arguments, SchemaArgument};
use crate::descriptor::{ArgumentDescriptor, DeclaredType};
use crate::errors::{ConfigurationError, SchemaBuildError};
use crate::fetcher::{ArgumentValues, DataFetcher, FetchEnvironment};
use crate::registry::TypeRegistry;

/// How the value of a field is computed.
#[derive(Clone)]
enum Resolver {
    /// Look up the field name in the parent object value.
    Property,

    /// Ask a data fetcher.
    Fetcher(Arc<dyn DataFetcher>),
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolver::Property => f.write_str("Property"),
            Resolver::Fetcher(_) => f.write_str("Fetcher"),
        }
    }
}

/// Declaration of a single field of an object.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    name: String,
    output_type: DeclaredType,
    required: bool,
    description: Option<String>,
    arguments: Vec<ArgumentDescriptor>,
    resolver: Resolver,
}

impl FieldDefinition {
    /// Field whose value is computed by `fetcher`.
    pub fn new(
        name: impl Into<String>,
        output_type: DeclaredType,
        fetcher: impl DataFetcher + 'static,
    ) -> Self {
        Self::with_resolver(name, output_type, Resolver::Fetcher(Arc::new(fetcher)))
    }

    /// Field whose value is taken from the parent object value under the field's name.
    pub fn property(name: impl Into<String>, output_type: DeclaredType) -> Self {
        Self::with_resolver(name, output_type, Resolver::Property)
    }

    fn with_resolver(
        name: impl Into<String>,
        output_type: DeclaredType,
        resolver: Resolver,
    ) -> Self {
        Self {
            name: name.into(),
            output_type,
            required: false,
            description: None,
            arguments: Vec::new(),
            resolver,
        }
    }

    /// Human-readable description of this field.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the output of this field as non-nullable.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach an argument descriptor after the ones already declared.
    pub fn argument(mut self, descriptor: ArgumentDescriptor) -> Self {
        self.arguments.push(descriptor);
        self
    }

    /// Attach several argument descriptors, keeping their order.
    pub fn arguments(mut self, descriptors: impl IntoIterator<Item = ArgumentDescriptor>) -> Self {
        self.arguments.extend(descriptors);
        self
    }

    /// Name of this field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Argument descriptors in declaration order.
    pub fn descriptors(&self) -> &[ArgumentDescriptor] {
        &self.arguments
    }

    /// Build the schema field owned by `object` together with its arguments.
    pub(crate) fn build(
        &self,
        object: &str,
        registry: &TypeRegistry,
    ) -> Result<(Field, Vec<SchemaArgument>), SchemaBuildError> {
        let location = format!("{}.{}", object, self.name);

        let output_type = registry.resolve(&self.output_type, self.required, &location)?;

        let arguments = build_arguments(&location, &self.arguments, registry)?;

        let mut field = match &self.resolver {
            Resolver::Property => property_field(&self.name, output_type),
            Resolver::Fetcher(fetcher) => {
                let defaults = arguments
                    .iter()
                    .filter_map(|argument| {
                        argument
                            .default_value()
                            .map(|value| (argument.name().to_owned(), value.clone()))
                    })
                    .collect();

                fetcher_field(&self.name, &location, output_type, defaults, fetcher.clone())
            }
        };

        for argument in &arguments {
            field = field.argument(argument.to_input_value());
        }

        if let Some(description) = &self.description {
            field = field.description(description.clone());
        }

        Ok((field, arguments))
    }
}

// Resolve a field by looking its name up in the parent object value.
fn property_field(name: &str, output_type: TypeRef) -> Field {
    Field::new(name, output_type, move |ctx| {
        FieldFuture::new(async move {
            let field_name = ctx.field().name();
            match ctx.parent_value.as_value() {
                Some(Value::Object(map)) => Ok(map
                    .get(field_name)
                    .map(|value| FieldValue::value(value.to_owned()))),
                _ => Ok(FieldValue::NONE),
            }
        })
    })
}

// Resolve a field by handing its arguments to a data fetcher. Omitted arguments with a default
// are passed with their default value, this includes arguments bound to unset variables.
fn fetcher_field(
    name: &str,
    location: &str,
    output_type: TypeRef,
    defaults: Vec<(String, Value)>,
    fetcher: Arc<dyn DataFetcher>,
) -> Field {
    let location = location.to_owned();
    let defaults = Arc::new(defaults);

    Field::new(name, output_type, move |ctx| {
        let fetcher = fetcher.clone();
        let location = location.clone();
        let defaults = defaults.clone();

        FieldFuture::new(async move {
            let mut arguments = ArgumentValues::from_context(&ctx)?;
            arguments.insert_defaults(defaults.iter());

            let environment = FetchEnvironment {
                arguments,
                source: match ctx.parent_value.as_value() {
                    Some(Value::Null) | None => None,
                    Some(value) => Some(value.clone()),
                },
            };

            debug!(
                "Fetching {} with arguments {:?}",
                location,
                environment.arguments.names()
            );

            let value = fetcher.fetch(environment).await?;
            Ok(value.map(FieldValue::value))
        })
    })
}

/// Declaration of an object type and its fields.
#[derive(Debug, Clone)]
pub struct ObjectDefinition {
    name: String,
    description: Option<String>,
    fields: Vec<FieldDefinition>,
}

impl ObjectDefinition {
    /// Returns an object definition without fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    /// Human-readable description of this object.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a field after the ones already declared.
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Name of this object.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Build the schema object and the arguments of each of its fields, keyed by field name.
    pub(crate) fn build(
        &self,
        registry: &TypeRegistry,
    ) -> Result<(Object, Vec<(String, Vec<SchemaArgument>)>), SchemaBuildError> {
        let mut object = Object::new(self.name.clone());
        let mut field_names = HashSet::new();
        let mut field_arguments = Vec::with_capacity(self.fields.len());

        for definition in &self.fields {
            if definition.name().is_empty() {
                return Err(
                    ConfigurationError::EmptyName(format!("field on object \"{}\"", self.name))
                        .into(),
                );
            }

            if !field_names.insert(definition.name()) {
                return Err(ConfigurationError::DuplicateField {
                    object: self.name.clone(),
                    field: definition.name().to_owned(),
                }
                .into());
            }

            let (field, arguments) = definition.build(&self.name, registry)?;
            object = object.field(field);
            field_arguments.push((definition.name().to_owned(), arguments));
        }

        if let Some(description) = &self.description {
            object = object.description(description.clone());
        }

        Ok((object, field_arguments))
    }
}
