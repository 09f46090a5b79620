// SPDX-License-Identifier: AGPL-3.0-or-later

//! Declarative metadata describing arguments of schema fields.
use std::any::{type_name, TypeId};
use std::fmt::Display;

use crate::default_value::DefaultValue;

/// Type declared for an argument or field before it got resolved against a `TypeRegistry`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    /// A Rust type, for example `i64` or `String`.
    Rust {
        /// Identifier used for the registry lookup.
        id: TypeId,

        /// Name of the Rust type, used in error messages.
        name: &'static str,
    },

    /// A named schema type, for example an object or a custom scalar.
    Named(String),

    /// A list of another declared type.
    List(Box<DeclaredType>),
}

impl DeclaredType {
    /// Declared type for the Rust type `T`.
    pub fn of<T: 'static>() -> Self {
        Self::Rust {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Declared type referring to a schema type by its name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Declared type for a list of `item`s.
    pub fn list(item: DeclaredType) -> Self {
        Self::List(Box::new(item))
    }
}

impl Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclaredType::Rust { name, .. } => write!(f, "{name}"),
            DeclaredType::Named(name) => write!(f, "{name}"),
            DeclaredType::List(item) => write!(f, "[{item}]"),
        }
    }
}

/// Describes one named and typed argument to be exposed on a schema field.
///
/// Descriptors are attached to a `FieldDefinition` in the order they should appear on the
/// generated field:
///
/// ```
/// use graphql_field_arguments::{ArgumentDescriptor, DeclaredType, DefaultValue};
///
/// let descriptor = ArgumentDescriptor::new("name", DeclaredType::of::<String>())
///     .description("Named argument on field")
///     .default_value(DefaultValue::constant("default"));
///
/// assert_eq!(descriptor.name(), "name");
/// ```
#[derive(Debug, Clone)]
pub struct ArgumentDescriptor {
    name: String,
    declared_type: DeclaredType,
    description: String,
    default_value: Option<DefaultValue>,
    required: bool,
}

impl ArgumentDescriptor {
    /// Returns a descriptor without description and default value.
    pub fn new(name: impl Into<String>, declared_type: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared_type,
            description: String::new(),
            default_value: None,
            required: false,
        }
    }

    /// Human-readable description of this argument.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Provider of the value used when the caller omits this argument.
    pub fn default_value(mut self, default_value: DefaultValue) -> Self {
        self.default_value = Some(default_value);
        self
    }

    /// Mark this argument as non-nullable.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Name of this argument.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type of this argument as it was declared.
    pub fn declared_type(&self) -> &DeclaredType {
        &self.declared_type
    }

    /// Description of this argument, empty if none was given.
    pub fn get_description(&self) -> &str {
        &self.description
    }

    /// Provider of the default value, if any.
    pub fn get_default_value(&self) -> Option<&DefaultValue> {
        self.default_value.as_ref()
    }

    /// Returns true if this argument is non-nullable.
    pub fn is_required(&self) -> bool {
        self.required
    }
}
