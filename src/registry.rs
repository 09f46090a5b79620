// SPDX-License-Identifier: AGPL-3.0-or-later

use std::any::TypeId;
use std::collections::{HashMap, HashSet};

use async_graphql::dynamic::TypeRef;
use async_graphql::ID;

use crate::descriptor::DeclaredType;
use crate::errors::{ConfigurationError, SchemaBuildError};

/// Maps declared types onto types of the generated schema.
///
/// Common Rust scalars are mapped to the built-in GraphQL scalars. Named types (objects or custom
/// scalars) become resolvable once they got registered.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    rust_types: HashMap<TypeId, String>,
    named_types: HashSet<String>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let mut registry = Self {
            rust_types: HashMap::new(),
            named_types: HashSet::new(),
        };

        for name in [
            TypeRef::BOOLEAN,
            TypeRef::INT,
            TypeRef::FLOAT,
            TypeRef::STRING,
            TypeRef::ID,
        ] {
            registry.named_types.insert(name.to_owned());
        }

        registry.map_builtin::<bool>(TypeRef::BOOLEAN);
        registry.map_builtin::<i8>(TypeRef::INT);
        registry.map_builtin::<i16>(TypeRef::INT);
        registry.map_builtin::<i32>(TypeRef::INT);
        registry.map_builtin::<i64>(TypeRef::INT);
        registry.map_builtin::<u8>(TypeRef::INT);
        registry.map_builtin::<u16>(TypeRef::INT);
        registry.map_builtin::<u32>(TypeRef::INT);
        registry.map_builtin::<f32>(TypeRef::FLOAT);
        registry.map_builtin::<f64>(TypeRef::FLOAT);
        registry.map_builtin::<String>(TypeRef::STRING);
        registry.map_builtin::<&'static str>(TypeRef::STRING);
        registry.map_builtin::<ID>(TypeRef::ID);

        registry
    }
}

impl TypeRegistry {
    /// Returns a registry knowing about the built-in scalars.
    pub fn new() -> Self {
        Self::default()
    }

    fn map_builtin<T: 'static>(&mut self, name: &str) {
        self.rust_types.insert(TypeId::of::<T>(), name.to_owned());
    }

    /// Make a named schema type resolvable.
    pub fn register_named(&mut self, name: &str) -> Result<(), ConfigurationError> {
        if name.is_empty() {
            return Err(ConfigurationError::EmptyName("type".into()));
        }

        if !self.named_types.insert(name.to_owned()) {
            return Err(ConfigurationError::DuplicateType(name.to_owned()));
        }

        Ok(())
    }

    /// Map the Rust type `T` onto the schema type called `name`.
    ///
    /// Overrides earlier mappings of `T`. The schema type itself needs to be registered as well
    /// for the mapping to resolve.
    pub fn map_type<T: 'static>(&mut self, name: &str) {
        self.rust_types.insert(TypeId::of::<T>(), name.to_owned());
    }

    /// Returns true if `name` is a known schema type.
    pub fn contains(&self, name: &str) -> bool {
        self.named_types.contains(name)
    }

    /// Resolve a declared type to a schema type reference, non-null if `required` is set.
    ///
    /// Lists can hold named types only, lists of lists do not resolve. `location` names the field
    /// or argument the type was declared on and is only used for error reporting.
    pub fn resolve(
        &self,
        declared_type: &DeclaredType,
        required: bool,
        location: &str,
    ) -> Result<TypeRef, SchemaBuildError> {
        let (name, list) = match declared_type {
            DeclaredType::List(item) => (self.resolve_named(item), true),
            _ => (self.resolve_named(declared_type), false),
        };

        let name = name.ok_or_else(|| SchemaBuildError::UnresolvedType {
            location: location.to_owned(),
            declared_type: declared_type.to_string(),
        })?;

        let type_ref = match (list, required) {
            (false, false) => TypeRef::named(name),
            (false, true) => TypeRef::named_nn(name),
            (true, false) => TypeRef::named_list(name),
            (true, true) => TypeRef::named_list_nn(name),
        };

        Ok(type_ref)
    }

    fn resolve_named(&self, declared_type: &DeclaredType) -> Option<String> {
        let name = match declared_type {
            DeclaredType::Rust { id, .. } => self.rust_types.get(id)?,
            DeclaredType::Named(name) => name,
            DeclaredType::List(_) => return None,
        };

        if self.contains(name) {
            Some(name.clone())
        } else {
            None
        }
    }
}
