//! The resource table: a sorted `package → type → entry → (config, product)` namespace.
//!
//! Every level is a vector kept sorted by its key and searched with `binary_search_by`, so
//! iteration is always in key order and there is at most one child per key. Levels are
//! created on first reference and only removed by explicit passes.
//!
//! Mutators never fail with an [`crate::Error`]. Invalid names, id mismatches and value
//! collisions are reported to a [`Diagnostics`] sink and the call returns `false` without
//! having changed the table.
//!
//! # Key Components
//!
//! - [`ResourceTable`] - The root, owning packages
//! - [`ResourceTablePackage`] / [`ResourceTableType`] / [`ResourceEntry`] - The levels
//! - [`ResourceConfigValue`] - One value slot per configuration and product
//! - [`Value`] / [`ValueKind`] - What a slot holds
//! - [`resolve_value_collision`] - Policy applied when a slot is already filled
//! - [`ResourceName`], [`ResourceType`], [`ResourceId`] - Resource identities
//!
//! # Usage Examples
//!
//! ```rust
//! use resforge::prelude::*;
//!
//! let mut table = ResourceTable::new();
//! let diag = Diagnostics::new();
//! let name: ResourceName = "com.app:bool/enabled".parse()?;
//! let land: ConfigDescription = "land".parse()?;
//!
//! let value = Value::new(ValueKind::Primitive(BinaryPrimitive::boolean(true)));
//! assert!(table.add_resource(&name, &land, "", value, &diag));
//!
//! let (_, _, entry) = table.find_resource(&name).unwrap();
//! assert!(entry.find_value(&land, "").is_some());
//! assert!(!diag.has_any());
//! # Ok::<(), resforge::Error>(())
//! ```

mod collision;
mod name;
mod symbol;
mod value;

pub use collision::{resolve_value_collision, CollisionResult};
pub use name::{ResourceId, ResourceName, ResourceType};
pub use symbol::{Symbol, Visibility};
pub use value::{Attribute, AttributeTypeMask, BinaryPrimitive, Reference, Value, ValueKind};

use crate::{
    config::ConfigDescription,
    diagnostics::{DiagnosticCategory, Diagnostics, Source},
    stringpool::{Context, StringPool},
};

/// A value slot for one configuration and product of an entry.
#[derive(Clone, Debug)]
pub struct ResourceConfigValue {
    /// Configuration the value applies to
    pub config: ConfigDescription,
    /// Product partition, empty for the default product
    pub product: String,
    /// The value; `None` once a pass has removed it and before compaction
    pub value: Option<Value>,
}

impl ResourceConfigValue {
    /// Creates an empty slot.
    pub fn new(config: ConfigDescription, product: impl Into<String>) -> Self {
        ResourceConfigValue {
            config,
            product: product.into(),
            value: None,
        }
    }

    fn key_cmp(&self, config: &ConfigDescription, product: &str) -> std::cmp::Ordering {
        self.config
            .cmp(config)
            .then_with(|| self.product.as_str().cmp(product))
    }
}

/// A named resource with its per-configuration values.
#[derive(Clone, Debug)]
pub struct ResourceEntry {
    name: String,
    /// Assigned entry id
    pub id: Option<u16>,
    /// Declared visibility
    pub symbol: Symbol,
    values: Vec<ResourceConfigValue>,
}

impl ResourceEntry {
    /// Creates an entry without values.
    pub fn new(name: impl Into<String>) -> Self {
        ResourceEntry {
            name: name.into(),
            id: None,
            symbol: Symbol::default(),
            values: Vec::new(),
        }
    }

    /// Returns the entry name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value slots sorted by configuration, then product.
    #[must_use]
    pub fn values(&self) -> &[ResourceConfigValue] {
        &self.values
    }

    /// Returns the value slots for in-place updates.
    pub fn values_mut(&mut self) -> &mut [ResourceConfigValue] {
        &mut self.values
    }

    /// Returns the slot for `config` and `product`.
    #[must_use]
    pub fn find_value(
        &self,
        config: &ConfigDescription,
        product: &str,
    ) -> Option<&ResourceConfigValue> {
        self.values
            .binary_search_by(|slot| slot.key_cmp(config, product))
            .ok()
            .map(|position| &self.values[position])
    }

    /// Returns the slot for `config` and `product`, inserting an empty one at its sorted
    /// position if needed.
    pub fn find_or_create_value(
        &mut self,
        config: &ConfigDescription,
        product: &str,
    ) -> &mut ResourceConfigValue {
        let position = match self
            .values
            .binary_search_by(|slot| slot.key_cmp(config, product))
        {
            Ok(position) => position,
            Err(position) => {
                self.values
                    .insert(position, ResourceConfigValue::new(*config, product));
                position
            }
        };
        &mut self.values[position]
    }

    /// Returns the slots for `config` across all products.
    #[must_use]
    pub fn find_all_values(&self, config: &ConfigDescription) -> Vec<&ResourceConfigValue> {
        self.values
            .iter()
            .filter(|slot| slot.config == *config)
            .collect()
    }

    /// Returns the slots matching `pred`.
    pub fn find_values_if<P>(&self, mut pred: P) -> Vec<&ResourceConfigValue>
    where
        P: FnMut(&ResourceConfigValue) -> bool,
    {
        self.values.iter().filter(|slot| pred(slot)).collect()
    }

    /// Drops every slot whose value was removed, returning how many were dropped.
    pub fn compact(&mut self) -> usize {
        let before = self.values.len();
        self.values.retain(|slot| slot.value.is_some());
        before - self.values.len()
    }
}

/// All entries of one resource type within a package.
#[derive(Clone, Debug)]
pub struct ResourceTableType {
    ty: ResourceType,
    /// Assigned type id
    pub id: Option<u8>,
    /// Public once any entry of the type is public
    pub visibility: Visibility,
    entries: Vec<ResourceEntry>,
}

impl ResourceTableType {
    /// Creates an empty type.
    #[must_use]
    pub fn new(ty: ResourceType) -> Self {
        ResourceTableType {
            ty,
            id: None,
            visibility: Visibility::Undefined,
            entries: Vec::new(),
        }
    }

    /// Returns the resource type.
    #[must_use]
    pub fn ty(&self) -> ResourceType {
        self.ty
    }

    /// Returns the entries sorted by name.
    #[must_use]
    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    /// Returns the entries for in-place updates.
    pub fn entries_mut(&mut self) -> &mut [ResourceEntry] {
        &mut self.entries
    }

    /// Returns the entry called `name`.
    #[must_use]
    pub fn find_entry(&self, name: &str) -> Option<&ResourceEntry> {
        self.entries
            .binary_search_by(|entry| entry.name.as_str().cmp(name))
            .ok()
            .map(|position| &self.entries[position])
    }

    /// Returns the entry called `name`, creating it if needed.
    pub fn find_or_create_entry(&mut self, name: &str) -> &mut ResourceEntry {
        let position = match self
            .entries
            .binary_search_by(|entry| entry.name.as_str().cmp(name))
        {
            Ok(position) => position,
            Err(position) => {
                self.entries.insert(position, ResourceEntry::new(name));
                position
            }
        };
        &mut self.entries[position]
    }
}

/// A package and its types.
#[derive(Clone, Debug)]
pub struct ResourceTablePackage {
    name: String,
    /// Assigned package id
    pub id: Option<u8>,
    types: Vec<ResourceTableType>,
}

impl ResourceTablePackage {
    /// Creates an empty package.
    pub fn new(name: impl Into<String>) -> Self {
        ResourceTablePackage {
            name: name.into(),
            id: None,
            types: Vec::new(),
        }
    }

    /// Returns the package name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the types sorted by [`ResourceType`].
    #[must_use]
    pub fn types(&self) -> &[ResourceTableType] {
        &self.types
    }

    /// Returns the types for in-place updates.
    pub fn types_mut(&mut self) -> &mut [ResourceTableType] {
        &mut self.types
    }

    /// Returns the type `ty`.
    #[must_use]
    pub fn find_type(&self, ty: ResourceType) -> Option<&ResourceTableType> {
        self.types
            .binary_search_by(|t| t.ty.cmp(&ty))
            .ok()
            .map(|position| &self.types[position])
    }

    /// Returns the type `ty`, creating it if needed.
    pub fn find_or_create_type(&mut self, ty: ResourceType) -> &mut ResourceTableType {
        let position = match self.types.binary_search_by(|t| t.ty.cmp(&ty)) {
            Ok(position) => position,
            Err(position) => {
                self.types.insert(position, ResourceTableType::new(ty));
                position
            }
        };
        &mut self.types[position]
    }
}

/// Which characters an entry name may use.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum NameValidation {
    Strict,
    AllowMangled,
}

impl NameValidation {
    fn accepts(self, entry: &str) -> bool {
        match self {
            NameValidation::Strict => name::is_valid_entry_name(entry),
            NameValidation::AllowMangled => name::is_valid_mangled_entry_name(entry),
        }
    }
}

/// The root of the resource namespace.
#[derive(Clone, Debug, Default)]
pub struct ResourceTable {
    packages: Vec<ResourceTablePackage>,
}

impl ResourceTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the packages sorted by name.
    #[must_use]
    pub fn packages(&self) -> &[ResourceTablePackage] {
        &self.packages
    }

    /// Returns the packages for in-place updates.
    pub fn packages_mut(&mut self) -> &mut [ResourceTablePackage] {
        &mut self.packages
    }

    /// Returns the package called `name`.
    #[must_use]
    pub fn find_package(&self, name: &str) -> Option<&ResourceTablePackage> {
        self.packages
            .binary_search_by(|package| package.name.as_str().cmp(name))
            .ok()
            .map(|position| &self.packages[position])
    }

    /// Returns the package with id `id`.
    #[must_use]
    pub fn find_package_by_id(&self, id: u8) -> Option<&ResourceTablePackage> {
        self.packages.iter().find(|package| package.id == Some(id))
    }

    /// Returns the package called `name`, creating it if needed.
    pub fn find_or_create_package(&mut self, name: &str) -> &mut ResourceTablePackage {
        let position = match self
            .packages
            .binary_search_by(|package| package.name.as_str().cmp(name))
        {
            Ok(position) => position,
            Err(position) => {
                self.packages
                    .insert(position, ResourceTablePackage::new(name));
                position
            }
        };
        &mut self.packages[position]
    }

    /// Returns the package, type and entry `name` resolves to.
    #[must_use]
    pub fn find_resource(
        &self,
        name: &ResourceName,
    ) -> Option<(&ResourceTablePackage, &ResourceTableType, &ResourceEntry)> {
        let package = self.find_package(&name.package)?;
        let ty = package.find_type(name.ty)?;
        let entry = ty.find_entry(&name.entry)?;
        Some((package, ty, entry))
    }

    /// Calls `f` for every entry with its full name, in table order.
    pub fn visit_entries_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&ResourceName, &mut ResourceEntry),
    {
        for package in &mut self.packages {
            for ty in &mut package.types {
                for entry in &mut ty.entries {
                    let name = ResourceName::new(package.name.clone(), ty.ty, entry.name.clone());
                    f(&name, entry);
                }
            }
        }
    }

    /// Removes entries with no values, no id and undefined visibility, then types left
    /// with no entries, no id and undefined visibility. Packages are kept.
    ///
    /// Returns the number of entries removed.
    pub fn prune_empty(&mut self) -> usize {
        let mut removed = 0;
        for package in &mut self.packages {
            for ty in &mut package.types {
                let before = ty.entries.len();
                ty.entries.retain(|entry| {
                    !entry.values.is_empty()
                        || entry.id.is_some()
                        || entry.symbol.state != Visibility::Undefined
                });
                removed += before - ty.entries.len();
            }
            package.types.retain(|ty| {
                !ty.entries.is_empty() || ty.id.is_some() || ty.visibility != Visibility::Undefined
            });
        }
        removed
    }

    /// Adds `value` for `config` and `product` under `name`.
    ///
    /// Returns `false` if the entry name is invalid or the value collides with an existing
    /// one; both are reported to `diag`.
    ///
    /// # Arguments
    ///
    /// * `name` - The resource to add the value to
    /// * `config` - The configuration the value applies to
    /// * `product` - The product partition, empty for the default
    /// * `value` - The value; its source is cited in diagnostics
    /// * `diag` - Sink for errors
    pub fn add_resource(
        &mut self,
        name: &ResourceName,
        config: &ConfigDescription,
        product: &str,
        value: Value,
        diag: &Diagnostics,
    ) -> bool {
        self.add_resource_impl(name, None, config, product, value, NameValidation::Strict, diag)
    }

    /// Like [`ResourceTable::add_resource`], also assigning `id` to the package, type and
    /// entry.
    ///
    /// Fails if any level already carries a different id.
    pub fn add_resource_with_id(
        &mut self,
        name: &ResourceName,
        id: ResourceId,
        config: &ConfigDescription,
        product: &str,
        value: Value,
        diag: &Diagnostics,
    ) -> bool {
        self.add_resource_impl(
            name,
            Some(id),
            config,
            product,
            value,
            NameValidation::Strict,
            diag,
        )
    }

    /// Like [`ResourceTable::add_resource`], accepting mangled entry names containing `$`.
    pub fn add_resource_allow_mangled(
        &mut self,
        name: &ResourceName,
        config: &ConfigDescription,
        product: &str,
        value: Value,
        diag: &Diagnostics,
    ) -> bool {
        self.add_resource_impl(
            name,
            None,
            config,
            product,
            value,
            NameValidation::AllowMangled,
            diag,
        )
    }

    /// Adds a file reference to `path` for `config` under `name`.
    ///
    /// The path is interned in `pool` with high priority and the value's configuration.
    pub fn add_file_reference(
        &mut self,
        name: &ResourceName,
        config: &ConfigDescription,
        source: &Source,
        path: &str,
        pool: &mut StringPool,
        diag: &Diagnostics,
    ) -> bool {
        let context = Context {
            priority: Context::HIGH_PRIORITY,
            config: *config,
        };
        let path = pool.make_ref_with_context(path, context);
        let value = Value::new(ValueKind::FileReference(path)).with_source(source.clone());
        self.add_resource_impl(name, None, config, "", value, NameValidation::Strict, diag)
    }

    #[allow(clippy::too_many_arguments)]
    fn add_resource_impl(
        &mut self,
        name: &ResourceName,
        id: Option<ResourceId>,
        config: &ConfigDescription,
        product: &str,
        value: Value,
        validation: NameValidation,
        diag: &Diagnostics,
    ) -> bool {
        if !self.validate(name, validation, &value.source, diag) {
            return false;
        }
        if let Some(id) = id {
            if !self.check_ids(name, id, &value.source, diag) {
                return false;
            }
        }

        if let Some((_, _, entry)) = self.find_resource(name) {
            if let Some(existing) = entry
                .find_value(config, product)
                .and_then(|slot| slot.value.as_ref())
            {
                if resolve_value_collision(existing, &value) == CollisionResult::Conflict {
                    diag.error_at(
                        DiagnosticCategory::Collision,
                        value.source.clone(),
                        format!("duplicate value for resource '{name}' with config '{config}'"),
                    );
                    diag.error_at(
                        DiagnosticCategory::Collision,
                        existing.source.clone(),
                        "resource previously defined here",
                    );
                    return false;
                }
            }
        }

        let package = self.find_or_create_package(&name.package);
        let ty = package.find_or_create_type(name.ty);
        let entry = ty.find_or_create_entry(&name.entry);
        let slot = entry.find_or_create_value(config, product);

        match &slot.value {
            None => slot.value = Some(value),
            Some(existing) => {
                if resolve_value_collision(existing, &value) == CollisionResult::TakeNew {
                    slot.value = Some(value);
                }
            }
        }

        if let Some(id) = id {
            self.assign_ids(name, id);
        }
        true
    }

    /// Declares the visibility of `name`, optionally assigning `id`.
    ///
    /// Visibility never decreases and an undefined state never overwrites a declared one.
    /// `allow_new` is sticky. Declaring an entry public also makes its type public.
    pub fn set_symbol_state(
        &mut self,
        name: &ResourceName,
        id: Option<ResourceId>,
        symbol: &Symbol,
        diag: &Diagnostics,
    ) -> bool {
        self.set_symbol_state_impl(name, id, symbol, NameValidation::Strict, diag)
    }

    /// Like [`ResourceTable::set_symbol_state`], accepting mangled entry names.
    pub fn set_symbol_state_allow_mangled(
        &mut self,
        name: &ResourceName,
        id: Option<ResourceId>,
        symbol: &Symbol,
        diag: &Diagnostics,
    ) -> bool {
        self.set_symbol_state_impl(name, id, symbol, NameValidation::AllowMangled, diag)
    }

    fn set_symbol_state_impl(
        &mut self,
        name: &ResourceName,
        id: Option<ResourceId>,
        symbol: &Symbol,
        validation: NameValidation,
        diag: &Diagnostics,
    ) -> bool {
        if !self.validate(name, validation, &symbol.source, diag) {
            return false;
        }
        if let Some(id) = id {
            if !self.check_ids(name, id, &symbol.source, diag) {
                return false;
            }
            self.assign_ids(name, id);
        }

        let package = self.find_or_create_package(&name.package);
        let ty = package.find_or_create_type(name.ty);
        if symbol.state == Visibility::Public {
            ty.visibility = Visibility::Public;
        }
        ty.find_or_create_entry(&name.entry).symbol.merge(symbol);
        true
    }

    fn validate(
        &self,
        name: &ResourceName,
        validation: NameValidation,
        source: &Source,
        diag: &Diagnostics,
    ) -> bool {
        if validation.accepts(&name.entry) {
            return true;
        }

        diag.error_at(
            DiagnosticCategory::Table,
            source.clone(),
            format!("resource '{name}' has invalid entry name '{}'", name.entry),
        );
        false
    }

    /// Reports the first level whose assigned id differs from `id`.
    fn check_ids(
        &self,
        name: &ResourceName,
        id: ResourceId,
        source: &Source,
        diag: &Diagnostics,
    ) -> bool {
        let Some(package) = self.find_package(&name.package) else {
            return true;
        };
        if let Some(package_id) = package.id {
            if package_id != id.package_id() {
                diag.error_at(
                    DiagnosticCategory::Table,
                    source.clone(),
                    format!(
                        "trying to add resource '{name}' with ID {id} but package '{}' already has ID 0x{package_id:02x}",
                        package.name
                    ),
                );
                return false;
            }
        }

        let Some(ty) = package.find_type(name.ty) else {
            return true;
        };
        if let Some(type_id) = ty.id {
            if type_id != id.type_id() {
                diag.error_at(
                    DiagnosticCategory::Table,
                    source.clone(),
                    format!(
                        "trying to add resource '{name}' with ID {id} but type '{}' already has ID 0x{type_id:02x}",
                        ty.ty
                    ),
                );
                return false;
            }
        }

        let Some(entry) = ty.find_entry(&name.entry) else {
            return true;
        };
        if let Some(entry_id) = entry.id {
            if entry_id != id.entry_id() {
                let current = ResourceId::from_parts(
                    package.id.unwrap_or(id.package_id()),
                    ty.id.unwrap_or(id.type_id()),
                    entry_id,
                );
                diag.error_at(
                    DiagnosticCategory::Table,
                    source.clone(),
                    format!(
                        "trying to add resource '{name}' with ID {id} but resource already has ID {current}"
                    ),
                );
                return false;
            }
        }

        true
    }

    fn assign_ids(&mut self, name: &ResourceName, id: ResourceId) {
        let package = self.find_or_create_package(&name.package);
        package.id = Some(id.package_id());
        let ty = package.find_or_create_type(name.ty);
        ty.id = Some(id.type_id());
        ty.find_or_create_entry(&name.entry).id = Some(id.entry_id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(qualifiers: &str) -> ConfigDescription {
        ConfigDescription::parse(qualifiers).unwrap()
    }

    fn name(s: &str) -> ResourceName {
        s.parse().unwrap()
    }

    fn int(data: i32) -> Value {
        Value::new(ValueKind::Primitive(BinaryPrimitive::int(data)))
    }

    #[test]
    fn levels_stay_sorted() {
        let mut table = ResourceTable::new();
        let diag = Diagnostics::new();
        let default = ConfigDescription::default_config();

        for n in ["b:string/z", "a:string/y", "a:bool/x", "a:string/a"] {
            assert!(table.add_resource(&name(n), &default, "", int(1), &diag));
        }

        let packages: Vec<_> = table.packages().iter().map(|p| p.name()).collect();
        assert_eq!(packages, ["a", "b"]);

        let a = table.find_package("a").unwrap();
        let types: Vec<_> = a.types().iter().map(|t| t.ty()).collect();
        assert_eq!(types, [ResourceType::Bool, ResourceType::String]);

        let entries: Vec<_> = a
            .find_type(ResourceType::String)
            .unwrap()
            .entries()
            .iter()
            .map(|e| e.name())
            .collect();
        assert_eq!(entries, ["a", "y"]);
    }

    #[test]
    fn values_sorted_by_config_then_product() {
        let mut entry = ResourceEntry::new("x");
        let land = config("land");
        let default = ConfigDescription::default_config();

        entry.find_or_create_value(&land, "tablet").value = Some(int(1));
        entry.find_or_create_value(&land, "").value = Some(int(2));
        entry.find_or_create_value(&default, "").value = Some(int(3));
        entry.find_or_create_value(&land, "").value = Some(int(4));

        assert_eq!(entry.values().len(), 3);
        assert_eq!(entry.values()[0].config, default);
        assert_eq!(entry.values()[1].product, "");
        assert_eq!(entry.values()[2].product, "tablet");
        assert!(entry.find_value(&land, "tablet").is_some());
        assert!(entry.find_value(&land, "phone").is_none());
        assert_eq!(entry.find_all_values(&land).len(), 2);
        assert_eq!(entry.find_values_if(|v| v.product.is_empty()).len(), 2);

        entry.values_mut()[1].value = None;
        assert_eq!(entry.compact(), 1);
        assert_eq!(entry.values().len(), 2);
    }

    #[test]
    fn rejects_invalid_names_before_mutation() {
        let mut table = ResourceTable::new();
        let diag = Diagnostics::new();
        let default = ConfigDescription::default_config();

        let bad = ResourceName::new("pkg", ResourceType::String, "has space");
        assert!(!table.add_resource(&bad, &default, "", int(1), &diag));
        assert!(diag.has_errors());
        assert!(table.packages().is_empty());

        let mangled = ResourceName::new("pkg", ResourceType::String, "lib$name");
        assert!(!table.add_resource(&mangled, &default, "", int(1), &diag));
        assert!(table.add_resource_allow_mangled(&mangled, &default, "", int(1), &diag));
    }

    #[test]
    fn collisions_follow_policy() {
        let mut table = ResourceTable::new();
        let diag = Diagnostics::new();
        let n = name("pkg:integer/count");
        let default = ConfigDescription::default_config();

        let first = int(1).with_source(Source::with_line("values.xml", 3));
        let second = int(2).with_source(Source::with_line("other.xml", 7));

        assert!(table.add_resource(&n, &default, "", first, &diag));
        assert!(!table.add_resource(&n, &default, "", second, &diag));
        assert_eq!(diag.error_count(), 2);

        let messages: Vec<_> = diag.errors().iter().map(|d| d.to_string()).collect();
        assert!(messages[0]
            .contains("other.xml:7: duplicate value for resource 'pkg:integer/count' with config ''"));
        assert!(messages[1].contains("values.xml:3: resource previously defined here"));

        // weak incoming is ignored, weak existing is replaced
        assert!(table.add_resource(&n, &default, "", int(9).with_weak(true), &diag));
        let land = config("land");
        assert!(table.add_resource(&n, &land, "", int(5).with_weak(true), &diag));
        assert!(table.add_resource(&n, &land, "", int(6), &diag));

        let (_, _, entry) = table.find_resource(&n).unwrap();
        let value = |c: &ConfigDescription| entry.find_value(c, "").unwrap().value.clone();
        assert!(value(&default).unwrap().equals(&int(1)));
        assert!(value(&land).unwrap().equals(&int(6)));
    }

    #[test]
    fn explicit_ids_must_agree() {
        let mut table = ResourceTable::new();
        let diag = Diagnostics::new();
        let default = ConfigDescription::default_config();
        let n = name("pkg:string/title");

        let id = ResourceId::from_parts(0x7f, 0x02, 0x0001);
        assert!(table.add_resource_with_id(&n, id, &default, "", int(1), &diag));

        let (package, ty, entry) = table.find_resource(&n).unwrap();
        assert_eq!(package.id, Some(0x7f));
        assert_eq!(ty.id, Some(0x02));
        assert_eq!(entry.id, Some(0x0001));
        assert!(table.find_package_by_id(0x7f).is_some());

        let land = config("land");
        let wrong_package = ResourceId::from_parts(0x01, 0x02, 0x0001);
        assert!(!table.add_resource_with_id(&n, wrong_package, &land, "", int(2), &diag));
        assert!(diag.errors()[0]
            .message
            .contains("but package 'pkg' already has ID 0x7f"));

        let wrong_entry = ResourceId::from_parts(0x7f, 0x02, 0x0002);
        assert!(!table.add_resource_with_id(&n, wrong_entry, &land, "", int(2), &diag));
        assert!(diag.errors()[1]
            .message
            .contains("but resource already has ID 0x7f020001"));

        let (_, _, entry) = table.find_resource(&n).unwrap();
        assert!(entry.find_value(&land, "").is_none());
    }

    #[test]
    fn symbol_state_is_monotonic() {
        let mut table = ResourceTable::new();
        let diag = Diagnostics::new();
        let n = name("pkg:string/shared");

        let public = Symbol::new(Visibility::Public).with_source(Source::new("public.xml"));
        assert!(table.set_symbol_state(&n, None, &public, &diag));
        assert!(table.set_symbol_state(&n, None, &Symbol::new(Visibility::Private), &diag));
        assert!(table.set_symbol_state(
            &n,
            None,
            &Symbol::default().with_allow_new(true),
            &diag
        ));

        let (_, ty, entry) = table.find_resource(&n).unwrap();
        assert_eq!(entry.symbol.state, Visibility::Public);
        assert_eq!(entry.symbol.source.path, "public.xml");
        assert!(entry.symbol.allow_new);
        assert_eq!(ty.visibility, Visibility::Public);

        let private = name("pkg:bool/hidden");
        assert!(table.set_symbol_state(&private, None, &Symbol::new(Visibility::Private), &diag));
        let (_, ty, _) = table.find_resource(&private).unwrap();
        assert_eq!(ty.visibility, Visibility::Undefined);
    }

    #[test]
    fn file_references_are_interned() {
        let mut table = ResourceTable::new();
        let mut pool = StringPool::new();
        let diag = Diagnostics::new();
        let n = name("pkg:drawable/icon");
        let hdpi = config("hdpi");

        assert!(table.add_file_reference(
            &n,
            &hdpi,
            &Source::new("res/drawable-hdpi/icon.png"),
            "res/drawable-hdpi-v4/icon.png",
            &mut pool,
            &diag,
        ));
        assert_eq!(pool.len(), 1);

        let (_, _, entry) = table.find_resource(&n).unwrap();
        let slot = entry.find_value(&hdpi, "").unwrap();
        match slot.value.as_ref().map(|v| &v.kind) {
            Some(ValueKind::FileReference(path)) => {
                assert_eq!(path.to_string_lossy(), "res/drawable-hdpi-v4/icon.png");
                assert_eq!(path.context().priority, Context::HIGH_PRIORITY);
                assert_eq!(path.context().config, hdpi);
            }
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn visit_entries_in_order() {
        let mut table = ResourceTable::new();
        let diag = Diagnostics::new();
        let default = ConfigDescription::default_config();
        for n in ["p:string/b", "p:string/a", "p:bool/c"] {
            table.add_resource(&name(n), &default, "", int(1), &diag);
        }

        let mut seen = Vec::new();
        table.visit_entries_mut(|name, entry| {
            seen.push(name.to_string());
            entry.values_mut()[0].value = None;
        });
        assert_eq!(seen, ["p:bool/c", "p:string/a", "p:string/b"]);
    }

    #[test]
    fn prune_keeps_declared_entries() {
        let mut table = ResourceTable::new();
        let diag = Diagnostics::new();
        let default = ConfigDescription::default_config();
        for n in ["p:string/kept", "p:string/emptied", "p:bool/emptied"] {
            table.add_resource(&name(n), &default, "", int(1), &diag);
        }
        let public = Symbol::new(Visibility::Public);
        assert!(table.set_symbol_state(&name("p:color/declared"), None, &public, &diag));

        table.visit_entries_mut(|name, entry| {
            if name.entry == "emptied" {
                entry.values_mut()[0].value = None;
                entry.compact();
            }
        });

        assert_eq!(table.prune_empty(), 2);
        let package = table.find_package("p").unwrap();
        let types: Vec<_> = package.types().iter().map(|t| t.ty()).collect();
        assert_eq!(types, [ResourceType::Color, ResourceType::String]);
        assert!(table.find_resource(&name("p:color/declared")).is_some());
        assert!(table.find_resource(&name("p:string/emptied")).is_none());
        assert_eq!(table.prune_empty(), 0);
    }
}
