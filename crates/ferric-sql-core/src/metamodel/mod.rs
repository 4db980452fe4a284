//! Entity metamodels: typed descriptions of tables and their columns.
//!
//! A metamodel is built eagerly through [`MetamodelBuilder`] and then
//! shared as a cheap handle. Column declarations return typed
//! [`Column`] handles that the query DSL uses for criteria and
//! projections.
//!
//! ```rust
//! use ferric_sql_core::metamodel::{integer, varchar, EntityMetamodel};
//!
//! let mut builder = EntityMetamodel::builder("Customer");
//! let id = builder.column(integer("id").id());
//! let name = builder.column(varchar("name", 50));
//! let customer = builder.build();
//! assert_eq!(customer.table_name(), "customer");
//! assert_eq!(name.name(), "name");
//! ```

mod constraint;

pub use constraint::{ForeignKey, Index, IndexType, ReferenceOption, UniqueKey};

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::error::{Result, SqlError};
use crate::value::{SqlValue, ToSqlValue};

static NEXT_METAMODEL_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a metamodel.
///
/// Clones of one metamodel compare equal; two structurally identical
/// metamodels built separately do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetamodelId(u64);

impl MetamodelId {
    fn next() -> Self {
        Self(NEXT_METAMODEL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Storage type of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    /// Boolean column.
    Boolean,
    /// 32-bit integer column.
    Integer,
    /// 64-bit integer column.
    BigInt,
    /// Bounded text column.
    Varchar(u32),
    /// Unbounded text column.
    Text,
    /// Date-and-time column.
    DateTime,
    /// Enum column stored as a variant ordinal.
    Enum {
        /// Name of the enum type.
        type_name: &'static str,
        /// Variant names in declaration order.
        variants: &'static [&'static str],
    },
}

/// How identifier values are produced for new rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdGenerator {
    /// No generated identifier.
    None,
    /// Database-assigned auto-increment column.
    AutoIncrement,
    /// Database sequence.
    Sequence {
        /// Sequence name.
        name: String,
        /// Schema holding the sequence, when not the default.
        schema: Option<String>,
        /// First value the sequence produces.
        start_with: i64,
        /// Step between produced values.
        increment_by: i64,
    },
}

impl IdGenerator {
    /// Returns the dot-joined, quoted sequence name, or `None` for
    /// non-sequence generators.
    pub fn canonical_sequence_name<F>(&self, enquote: F) -> Option<String>
    where
        F: Fn(&str) -> String,
    {
        match self {
            Self::Sequence { name, schema, .. } => {
                let joined = schema
                    .iter()
                    .map(String::as_str)
                    .chain(std::iter::once(name.as_str()))
                    .filter(|s| !s.is_empty())
                    .map(|s| enquote(s))
                    .collect::<Vec<_>>()
                    .join(".");
                Some(joined)
            }
            _ => None,
        }
    }
}

/// Mapping between a Rust enum and its stored ordinal.
///
/// Implementations bind the ordinal through [`ToSqlValue`] and recover
/// variants from stored ordinals through [`Column::wrap`].
pub trait EnumValue: ToSqlValue + Sized {
    /// Type name reported in mapping errors.
    const NAME: &'static str;
    /// Variant names in declaration order.
    const VARIANTS: &'static [&'static str];

    /// Returns the zero-based position of this variant.
    fn ordinal(&self) -> usize;

    /// Returns the variant at the zero-based position.
    fn from_ordinal(ordinal: usize) -> Option<Self>;
}

/// Description of one property and its column.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
    /// Property name.
    pub name: String,
    /// Column name (mirrors the property name).
    pub column_name: String,
    /// Storage type.
    pub column_type: ColumnType,
    /// Whether the column name is always quoted when rendered.
    pub always_quote: bool,
    /// Whether bound values are hidden in debug SQL.
    pub masking: bool,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether update statements may assign the column.
    pub updatable: bool,
    /// Whether this is an identifier property.
    pub id: bool,
    /// Whether the identifier exists only in the application.
    pub virtual_id: bool,
    /// Default literal used in DDL, when declared.
    pub default_value: Option<SqlValue>,
}

impl PropertyDef {
    /// Returns the column name, quoted when the property requires it.
    pub fn canonical_column_name<F>(&self, enquote: F) -> String
    where
        F: Fn(&str) -> String,
    {
        if self.always_quote {
            enquote(&self.column_name)
        } else {
            self.column_name.clone()
        }
    }
}

// ============================================================================
// Property builders
// ============================================================================

/// Fluent description of a column before registration.
///
/// Produced by the factory functions ([`integer`], [`varchar`], …) and
/// consumed by [`MetamodelBuilder::column`].
#[derive(Debug)]
pub struct PropertyBuilder<V> {
    def: PropertyDef,
    _marker: PhantomData<fn() -> V>,
}

impl<V> PropertyBuilder<V> {
    fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        let name = name.into();
        Self {
            def: PropertyDef {
                column_name: name.clone(),
                name,
                column_type,
                always_quote: false,
                masking: false,
                nullable: false,
                updatable: true,
                id: false,
                virtual_id: false,
                default_value: None,
            },
            _marker: PhantomData,
        }
    }

    /// Marks the property as the identifier.
    ///
    /// Identifier properties lead the property list and install the
    /// auto-increment generator unless a sequence is declared.
    #[must_use]
    pub fn id(mut self) -> Self {
        self.def.id = true;
        self
    }

    /// Marks the identifier as application-side only, excluding it from
    /// the rendered primary key.
    #[must_use]
    pub fn virtual_id(mut self) -> Self {
        self.def.id = true;
        self.def.virtual_id = true;
        self
    }

    /// Allows NULL values in the column.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.def.nullable = true;
        self
    }

    /// Excludes the column from update assignments.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.def.updatable = false;
        self
    }

    /// Hides bound values in debug SQL.
    #[must_use]
    pub fn masked(mut self) -> Self {
        self.def.masking = true;
        self
    }

    /// Quotes the column name wherever it is rendered.
    #[must_use]
    pub fn always_quote(mut self) -> Self {
        self.def.always_quote = true;
        self
    }

    /// Declares a DDL default literal for the column.
    #[must_use]
    pub fn default_value(mut self, value: impl ToSqlValue) -> Self {
        self.def.default_value = Some(value.to_sql_value());
        self
    }
}

/// Creates a boolean column.
#[must_use]
pub fn boolean(name: impl Into<String>) -> PropertyBuilder<bool> {
    PropertyBuilder::new(name, ColumnType::Boolean)
}

/// Creates a 32-bit integer column.
#[must_use]
pub fn integer(name: impl Into<String>) -> PropertyBuilder<i32> {
    PropertyBuilder::new(name, ColumnType::Integer)
}

/// Creates a 64-bit integer column.
#[must_use]
pub fn big_integer(name: impl Into<String>) -> PropertyBuilder<i64> {
    PropertyBuilder::new(name, ColumnType::BigInt)
}

/// Creates a bounded text column.
#[must_use]
pub fn varchar(name: impl Into<String>, length: u32) -> PropertyBuilder<String> {
    PropertyBuilder::new(name, ColumnType::Varchar(length))
}

/// Creates an unbounded text column.
#[must_use]
pub fn text(name: impl Into<String>) -> PropertyBuilder<String> {
    PropertyBuilder::new(name, ColumnType::Text)
}

/// Creates a date-and-time column.
#[must_use]
pub fn datetime(name: impl Into<String>) -> PropertyBuilder<NaiveDateTime> {
    PropertyBuilder::new(name, ColumnType::DateTime)
}

/// Creates an enum column stored by variant ordinal.
#[must_use]
pub fn enumeration<E: EnumValue>(name: impl Into<String>) -> PropertyBuilder<E> {
    PropertyBuilder::new(
        name,
        ColumnType::Enum {
            type_name: E::NAME,
            variants: E::VARIANTS,
        },
    )
}

// ============================================================================
// Column handles
// ============================================================================

/// Untyped view of a column: its property plus the identity of the
/// owning metamodel.
#[derive(Debug, Clone)]
pub struct ColumnRef {
    owner_id: MetamodelId,
    owner_entity: String,
    owner_table: String,
    property: Arc<PropertyDef>,
}

impl ColumnRef {
    /// Identity of the owning metamodel.
    #[must_use]
    pub const fn owner_id(&self) -> MetamodelId {
        self.owner_id
    }

    /// Entity name of the owning metamodel.
    #[must_use]
    pub fn owner_entity(&self) -> &str {
        &self.owner_entity
    }

    /// Table name of the owning metamodel.
    #[must_use]
    pub fn owner_table(&self) -> &str {
        &self.owner_table
    }

    /// The described property.
    #[must_use]
    pub fn property(&self) -> &PropertyDef {
        &self.property
    }

    /// Returns the column name, quoted when the property requires it.
    pub fn canonical_column_name<F>(&self, enquote: F) -> String
    where
        F: Fn(&str) -> String,
    {
        self.property.canonical_column_name(enquote)
    }
}

/// Typed handle to a declared column.
///
/// `V` is the Rust value type bound through criteria and assignments.
pub struct Column<V> {
    source: ColumnRef,
    _marker: PhantomData<fn() -> V>,
}

impl<V> Column<V> {
    /// Property name of the column.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.source.property.name
    }

    /// The described property.
    #[must_use]
    pub fn property(&self) -> &PropertyDef {
        self.source.property()
    }
}

impl<E: EnumValue> Column<E> {
    /// Recovers an enum variant from its stored ordinal.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::EnumMapping`] when the ordinal has no
    /// matching variant.
    pub fn wrap(&self, ordinal: usize) -> Result<E> {
        E::from_ordinal(ordinal).ok_or(SqlError::EnumMapping {
            enum_type: E::NAME,
            property: "ordinal",
            ordinal,
        })
    }
}

impl<V> Clone for Column<V> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            _marker: PhantomData,
        }
    }
}

impl<V> std::fmt::Debug for Column<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("source", &self.source)
            .finish()
    }
}

impl<V> AsRef<ColumnRef> for Column<V> {
    fn as_ref(&self) -> &ColumnRef {
        &self.source
    }
}

/// Two columns treated as one tuple operand.
pub type ColumnPair<'a, A, B> = (&'a Column<A>, &'a Column<B>);

// ============================================================================
// Entity metamodel
// ============================================================================

#[derive(Debug)]
struct EntityDef {
    entity_name: String,
    table_name: String,
    catalog: Option<String>,
    schema: Option<String>,
    properties: Vec<Arc<PropertyDef>>,
    id_generator: IdGenerator,
    foreign_keys: Vec<ForeignKey>,
    unique_keys: Vec<UniqueKey>,
    indexes: Vec<Index>,
}

/// Strategy for deciding whether a live table is missing declared
/// properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPropertiesStrategy {
    /// Legacy count comparison: answers true only when the column count
    /// and the constraint count both disagree with the database.
    CountHeuristic,
    /// Name comparison: answers true when any declared column or
    /// constraint name is absent from the database lists,
    /// case-insensitively.
    NameDiff,
}

/// Shared handle to an entity description.
#[derive(Debug, Clone)]
pub struct EntityMetamodel {
    id: MetamodelId,
    def: Arc<EntityDef>,
}

impl EntityMetamodel {
    /// Starts building a metamodel for the named entity.
    ///
    /// The table name defaults to the lowercased entity name.
    #[must_use]
    pub fn builder(entity_name: impl Into<String>) -> MetamodelBuilder {
        let entity_name = entity_name.into();
        MetamodelBuilder {
            id: MetamodelId::next(),
            table_name: entity_name.to_lowercase(),
            entity_name,
            catalog: None,
            schema: None,
            properties: Vec::new(),
            id_generator: IdGenerator::None,
            foreign_keys: Vec::new(),
            unique_keys: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Process-unique identity of the metamodel.
    #[must_use]
    pub const fn id(&self) -> MetamodelId {
        self.id
    }

    /// Entity name.
    #[must_use]
    pub fn entity_name(&self) -> &str {
        &self.def.entity_name
    }

    /// Table name.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.def.table_name
    }

    /// Catalog name, when set.
    #[must_use]
    pub fn catalog(&self) -> Option<&str> {
        self.def.catalog.as_deref()
    }

    /// Schema name, when set.
    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.def.schema.as_deref()
    }

    /// Properties in declaration order, identifier first.
    #[must_use]
    pub fn properties(&self) -> &[Arc<PropertyDef>] {
        &self.def.properties
    }

    /// Identifier properties.
    #[must_use]
    pub fn id_properties(&self) -> Vec<&PropertyDef> {
        self.def
            .properties
            .iter()
            .filter(|p| p.id)
            .map(Arc::as_ref)
            .collect()
    }

    /// Identifier properties that take part in the rendered primary
    /// key.
    #[must_use]
    pub fn primary_key_properties(&self) -> Vec<&PropertyDef> {
        self.def
            .properties
            .iter()
            .filter(|p| p.id && !p.virtual_id)
            .map(Arc::as_ref)
            .collect()
    }

    /// The identifier generator.
    #[must_use]
    pub fn id_generator(&self) -> &IdGenerator {
        &self.def.id_generator
    }

    /// Declared foreign keys.
    #[must_use]
    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.def.foreign_keys
    }

    /// Declared unique keys.
    #[must_use]
    pub fn unique_keys(&self) -> &[UniqueKey] {
        &self.def.unique_keys
    }

    /// Declared indexes.
    #[must_use]
    pub fn indexes(&self) -> &[Index] {
        &self.def.indexes
    }

    /// Untyped column references for every property, in order.
    #[must_use]
    pub fn columns(&self) -> Vec<ColumnRef> {
        self.def
            .properties
            .iter()
            .map(|property| ColumnRef {
                owner_id: self.id,
                owner_entity: self.def.entity_name.clone(),
                owner_table: self.def.table_name.clone(),
                property: Arc::clone(property),
            })
            .collect()
    }

    /// Returns the dot-joined, quoted table name including catalog and
    /// schema segments.
    pub fn canonical_table_name<F>(&self, enquote: F) -> String
    where
        F: Fn(&str) -> String,
    {
        [
            self.def.catalog.as_deref(),
            self.def.schema.as_deref(),
            Some(self.def.table_name.as_str()),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .map(|s| enquote(s))
        .collect::<Vec<_>>()
        .join(".")
    }

    /// Decides whether a live table lacks declared columns or
    /// constraints, given the names reported by the database.
    #[must_use]
    pub fn should_create_missing_properties(
        &self,
        columns: &[String],
        indexes: &[String],
        strategy: MissingPropertiesStrategy,
    ) -> bool {
        let declared_constraints = self.def.foreign_keys.len()
            + self.def.unique_keys.len()
            + self.def.indexes.len();
        match strategy {
            MissingPropertiesStrategy::CountHeuristic => {
                columns.len() != self.def.properties.len()
                    && indexes.len() != declared_constraints
            }
            MissingPropertiesStrategy::NameDiff => {
                let missing =
                    |list: &[String], name: &str| !list.iter().any(|n| n.eq_ignore_ascii_case(name));
                self.def
                    .properties
                    .iter()
                    .any(|p| missing(columns, &p.column_name))
                    || self.def.foreign_keys.iter().any(|f| missing(indexes, &f.name))
                    || self.def.unique_keys.iter().any(|u| missing(indexes, &u.name))
                    || self.def.indexes.iter().any(|i| missing(indexes, &i.name))
            }
        }
    }
}

impl PartialEq for EntityMetamodel {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EntityMetamodel {}

/// Eager builder for [`EntityMetamodel`].
///
/// Set the table, catalog, and schema before declaring columns; column
/// handles snapshot the owning table name at declaration time.
#[derive(Debug)]
pub struct MetamodelBuilder {
    id: MetamodelId,
    entity_name: String,
    table_name: String,
    catalog: Option<String>,
    schema: Option<String>,
    properties: Vec<Arc<PropertyDef>>,
    id_generator: IdGenerator,
    foreign_keys: Vec<ForeignKey>,
    unique_keys: Vec<UniqueKey>,
    indexes: Vec<Index>,
}

impl MetamodelBuilder {
    /// Sets the table name.
    pub fn table(&mut self, name: impl Into<String>) -> &mut Self {
        self.table_name = name.into();
        self
    }

    /// Sets the catalog name.
    pub fn catalog(&mut self, name: impl Into<String>) -> &mut Self {
        self.catalog = Some(name.into());
        self
    }

    /// Sets the schema name.
    pub fn schema(&mut self, name: impl Into<String>) -> &mut Self {
        self.schema = Some(name.into());
        self
    }

    /// Registers a column and returns its typed handle.
    ///
    /// Identifier columns move to the front of the property list and
    /// install the auto-increment generator unless a sequence was
    /// declared.
    pub fn column<V>(&mut self, property: PropertyBuilder<V>) -> Column<V> {
        let def = Arc::new(property.def);
        if def.id {
            // Composite identifiers keep their declaration order.
            let position = self.properties.iter().take_while(|p| p.id).count();
            self.properties.insert(position, Arc::clone(&def));
            if self.id_generator == IdGenerator::None {
                self.id_generator = IdGenerator::AutoIncrement;
            }
        } else {
            self.properties.push(Arc::clone(&def));
        }
        Column {
            source: ColumnRef {
                owner_id: self.id,
                owner_entity: self.entity_name.clone(),
                owner_table: self.table_name.clone(),
                property: def,
            },
            _marker: PhantomData,
        }
    }

    /// Registers a foreign-key column referencing another entity's
    /// column and returns the typed handle.
    ///
    /// The constraint takes the column's name.
    pub fn reference<V>(
        &mut self,
        name: impl Into<String>,
        referenced: &Column<V>,
        on_delete: ReferenceOption,
        on_update: ReferenceOption,
    ) -> Column<V> {
        let name = name.into();
        let referenced = referenced.as_ref();
        self.foreign_keys.push(ForeignKey {
            name: name.clone(),
            column: name.clone(),
            referenced_table: referenced.owner_table().to_string(),
            referenced_column: referenced.property().column_name.clone(),
            on_delete,
            on_update,
        });
        self.column(PropertyBuilder::new(
            name,
            referenced.property().column_type.clone(),
        ))
    }

    /// Replaces the identifier generator with a sequence.
    pub fn sequence(
        &mut self,
        name: impl Into<String>,
        start_with: i64,
        increment_by: i64,
    ) -> &mut Self {
        self.id_generator = IdGenerator::Sequence {
            name: name.into(),
            schema: self.schema.clone(),
            start_with,
            increment_by,
        };
        self
    }

    /// Declares a unique key over the named columns.
    pub fn unique_key(&mut self, name: impl Into<String>, columns: &[&str]) -> &mut Self {
        self.unique_keys.push(UniqueKey {
            name: name.into(),
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
        });
        self
    }

    /// Declares an index over the named columns.
    pub fn index(
        &mut self,
        name: impl Into<String>,
        columns: &[&str],
        index_type: IndexType,
    ) -> &mut Self {
        self.indexes.push(Index {
            name: name.into(),
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            index_type,
        });
        self
    }

    /// Finishes the metamodel.
    #[must_use]
    pub fn build(self) -> EntityMetamodel {
        EntityMetamodel {
            id: self.id,
            def: Arc::new(EntityDef {
                entity_name: self.entity_name,
                table_name: self.table_name,
                catalog: self.catalog,
                schema: self.schema,
                properties: self.properties,
                id_generator: self.id_generator,
                foreign_keys: self.foreign_keys,
                unique_keys: self.unique_keys,
                indexes: self.indexes,
            }),
        }
    }
}
