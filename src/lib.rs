// SPDX-License-Identifier: AGPL-3.0-or-later

//! # graphql-field-arguments
//!
//! Attach named, typed arguments with optional default value providers to fields of a dynamic
//! GraphQL schema and read their values in data fetchers during query execution.
//!
//! ```
//! use async_graphql::Value;
//! use graphql_field_arguments::{
//!     ArgumentDescriptor, DeclaredType, FetchEnvironment, FieldDefinition, ObjectDefinition,
//!     SchemaBuilder,
//! };
//!
//! let schema = SchemaBuilder::default()
//!     .register_object(
//!         ObjectDefinition::new("Query").field(
//!             FieldDefinition::new(
//!                 "greeting",
//!                 DeclaredType::of::<String>(),
//!                 |environment: FetchEnvironment| async move {
//!                     let name: Option<String> = environment.arguments.get_as("name")?;
//!                     let greeting = name.map(|name| Value::from(format!("Hello, {name}!")));
//!                     Ok::<_, async_graphql::Error>(greeting)
//!                 },
//!             )
//!             .argument(ArgumentDescriptor::new("name", DeclaredType::of::<String>())),
//!         ),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.arguments("Query", "greeting").unwrap()[0].name(), "name");
//! ```
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

mod argument;
mod config;
mod default_value;
mod descriptor;
mod errors;
mod fetcher;
mod field;
mod registry;
mod schema;

#[cfg(test)]
mod test_utils;

pub use crate::argument::{build_arguments, SchemaArgument};
pub use crate::config::{Configuration, DEFAULT_QUERY_TYPE_NAME};
pub use crate::default_value::{DefaultValue, DefaultValueProvider, NullDefaultValue};
pub use crate::descriptor::{ArgumentDescriptor, DeclaredType};
pub use crate::errors::{ConfigurationError, SchemaBuildError};
pub use crate::fetcher::{ArgumentValues, DataFetcher, FetchEnvironment};
pub use crate::field::{FieldDefinition, ObjectDefinition};
pub use crate::registry::TypeRegistry;
pub use crate::schema::{GeneratedSchema, SchemaBuilder};
