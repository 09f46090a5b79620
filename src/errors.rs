// SPDX-License-Identifier: AGPL-3.0-or-later

use thiserror::Error;

/// Invalid declarations detected while building a schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Two argument descriptors on the same field share a name.
    #[error("Argument \"{argument}\" is declared more than once on field \"{field}\"")]
    DuplicateArgument {
        /// Field the arguments were declared on.
        field: String,

        /// Name used by more than one descriptor.
        argument: String,
    },

    /// Two fields of the same object share a name.
    #[error("Field \"{field}\" is declared more than once on object \"{object}\"")]
    DuplicateField {
        /// Object the fields were declared on.
        object: String,

        /// Name used by more than one field.
        field: String,
    },

    /// A type name was registered more than once.
    #[error("Type \"{0}\" is registered more than once")]
    DuplicateType(String),

    /// An argument, field or type was declared without a name.
    #[error("Empty name given for {0}")]
    EmptyName(String),

    /// No object definition was registered under the configured query type name.
    #[error("Query root object \"{0}\" was not registered")]
    MissingQueryRoot(String),
}

/// Errors which abort building a schema.
#[derive(Error, Debug)]
pub enum SchemaBuildError {
    /// Declarations are invalid.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The declared type of an argument or field has no mapping in the type registry.
    #[error("Type {declared_type} used on \"{location}\" can not be resolved to a schema type")]
    UnresolvedType {
        /// Field or argument the type was declared on, for example `Query.user(id)`.
        location: String,

        /// Display name of the declared type.
        declared_type: String,
    },

    /// A default value provider could not be created.
    #[error("Could not instantiate default value provider {provider} for argument \"{argument}\": {error}")]
    ProviderInstantiation {
        /// Argument the provider belongs to.
        argument: String,

        /// Type name of the provider.
        provider: String,

        /// Error returned while creating the provider.
        error: anyhow::Error,
    },

    /// A default value provider failed when asked for its value.
    #[error("Default value provider {provider} for argument \"{argument}\" failed: {error}")]
    ProviderEvaluation {
        /// Argument the provider belongs to.
        argument: String,

        /// Type name of the provider.
        provider: String,

        /// Error returned by the provider.
        error: anyhow::Error,
    },

    /// async-graphql rejected the finished schema.
    #[error("Invalid schema: {0}")]
    Schema(String),
}
