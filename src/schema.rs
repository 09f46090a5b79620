// SPDX-License-Identifier: AGPL-3.0-or-later

//! Build an executable GraphQL schema from object definitions.
use std::collections::HashMap;
use std::fmt;

use async_graphql::dynamic::{Scalar, Schema};
use async_graphql::{Request, Response};
use log::{debug, info};

use crate::argument::SchemaArgument;
use crate::config::Configuration;
use crate::errors::{ConfigurationError, SchemaBuildError};
use crate::field::ObjectDefinition;
use crate::registry::TypeRegistry;

/// Collects object definitions and custom types and builds schemas from them.
///
/// Building does not consume the builder, a schema can be rebuilt any number of times from the
/// same definitions. Every build resolves all default values again.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    config: Configuration,
    registry: TypeRegistry,
    objects: Vec<ObjectDefinition>,
    scalars: Vec<String>,
    errors: Vec<ConfigurationError>,
}

impl SchemaBuilder {
    /// Returns an empty builder using the given configuration.
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            registry: TypeRegistry::new(),
            objects: Vec::new(),
            scalars: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Register an object type.
    ///
    /// The object name becomes resolvable for arguments and fields of all registered objects,
    /// independent of registration order.
    pub fn register_object(mut self, object: ObjectDefinition) -> Self {
        match self.registry.register_named(object.name()) {
            Ok(()) => self.objects.push(object),
            Err(error) => self.errors.push(error),
        }
        self
    }

    /// Register a custom scalar type called `name`.
    pub fn register_scalar(mut self, name: &str) -> Self {
        match self.registry.register_named(name) {
            Ok(()) => self.scalars.push(name.to_owned()),
            Err(error) => self.errors.push(error),
        }
        self
    }

    /// Map the Rust type `T` onto the registered type called `name`.
    pub fn register_type<T: 'static>(mut self, name: &str) -> Self {
        self.registry.map_type::<T>(name);
        self
    }

    /// Configuration used by this builder.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Build the schema.
    ///
    /// Fails on the first invalid declaration, unresolvable type or failing default value
    /// provider.
    pub fn build(&self) -> Result<GeneratedSchema, SchemaBuildError> {
        if let Some(error) = self.errors.first() {
            return Err(error.clone().into());
        }

        let query_type_name = &self.config.query_type_name;
        if !self.objects.iter().any(|object| object.name() == query_type_name) {
            return Err(ConfigurationError::MissingQueryRoot(query_type_name.clone()).into());
        }

        let mut schema_builder = Schema::build(query_type_name, None, None);
        let mut arguments = HashMap::new();

        for name in &self.scalars {
            schema_builder = schema_builder.register(Scalar::new(name.clone()));
        }

        for definition in &self.objects {
            let (object, field_arguments) = definition.build(&self.registry)?;
            debug!(
                "Built object {} with {} fields",
                definition.name(),
                field_arguments.len()
            );

            for (field, field_arguments) in field_arguments {
                arguments.insert((definition.name().to_owned(), field), field_arguments);
            }

            schema_builder = schema_builder.register(object);
        }

        if let Some(depth) = self.config.max_depth {
            schema_builder = schema_builder.limit_depth(depth);
        }

        if let Some(complexity) = self.config.max_complexity {
            schema_builder = schema_builder.limit_complexity(complexity);
        }

        if !self.config.introspection {
            schema_builder = schema_builder.disable_introspection();
        }

        let schema = schema_builder
            .finish()
            .map_err(|error| SchemaBuildError::Schema(error.to_string()))?;

        info!(
            "Built schema with {} objects and {} custom scalars",
            self.objects.len(),
            self.scalars.len()
        );

        Ok(GeneratedSchema { schema, arguments })
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new(Configuration::default())
    }
}

/// Immutable, executable schema together with the arguments generated for every field.
#[derive(Clone)]
pub struct GeneratedSchema {
    schema: Schema,
    arguments: HashMap<(String, String), Vec<SchemaArgument>>,
}

impl fmt::Debug for GeneratedSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedSchema")
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

impl GeneratedSchema {
    /// Arguments generated for `field` of `object` in declaration order.
    ///
    /// Returns `None` if there is no such field.
    pub fn arguments(&self, object: &str, field: &str) -> Option<&[SchemaArgument]> {
        self.arguments
            .get(&(object.to_owned(), field.to_owned()))
            .map(|arguments| arguments.as_slice())
    }

    /// Execute a GraphQL request.
    pub async fn execute(&self, request: impl Into<Request>) -> Response {
        self.schema.execute(request).await
    }

    /// Schema in GraphQL SDL.
    pub fn sdl(&self) -> String {
        self.schema.sdl()
    }

    /// Underlying dynamic schema, for example to serve it over HTTP.
    pub fn inner(&self) -> &Schema {
        &self.schema
    }
}
