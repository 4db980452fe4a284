//! Schema DDL statement builder.

use tracing::debug;

use crate::context::SchemaContext;
use crate::dialect::Dialect;
use crate::error::{Result, SqlError};
use crate::metamodel::{EntityMetamodel, IdGenerator, PropertyDef};
use crate::statement::Statement;

/// Renders create, drop, and alter DDL for entity metamodels.
///
/// Create statements declare the primary key, unique keys, and, when
/// the dialect supports inline definitions, secondary indexes inside
/// the table body; other dialects get separate `create index`
/// statements. Sequence-backed identifiers add their own statements and
/// fail on dialects without sequences.
pub struct SchemaStatementBuilder<'a> {
    dialect: &'a dyn Dialect,
}

impl<'a> SchemaStatementBuilder<'a> {
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    /// Builds the create statements for every covered entity.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Unsupported`] when an entity uses a sequence
    /// generator and the dialect has no sequences.
    pub fn create(&self, context: &SchemaContext) -> Result<Vec<Statement>> {
        let mut statements = Vec::new();
        for metamodel in context.metamodels() {
            statements.push(self.create_table(metamodel, context.with_foreign_keys()));
            if !self.dialect.supports_inline_index_definitions() {
                statements.extend(self.create_indexes(metamodel));
            }
            if let Some(statement) = self.create_sequence(metamodel)? {
                statements.push(statement);
            }
        }
        let statements: Vec<_> = statements.into_iter().filter(|s| !s.is_empty()).collect();
        debug!(count = statements.len(), "Built schema create statements");
        Ok(statements)
    }

    /// Builds the drop statements for every covered entity.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Unsupported`] when an entity uses a sequence
    /// generator and the dialect has no sequences.
    pub fn drop(&self, context: &SchemaContext) -> Result<Vec<Statement>> {
        let mut statements = Vec::new();
        for metamodel in context.metamodels() {
            let mut sql = String::from("drop table ");
            if self.dialect.supports_drop_if_exists() {
                sql.push_str("if exists ");
            }
            sql.push_str(&metamodel.canonical_table_name(|s| self.dialect.enquote(s)));
            statements.push(Statement::from_text(sql));
            if let Some(statement) = self.drop_sequence(metamodel)? {
                statements.push(statement);
            }
        }
        debug!(count = statements.len(), "Built schema drop statements");
        Ok(statements)
    }

    /// Builds an `alter table` statement adding the declared columns
    /// and constraints missing from a live table, given the column and
    /// index names the database reports. Name comparison ignores ASCII
    /// case. Returns no statements when nothing is missing.
    #[must_use]
    pub fn create_missing_properties(
        &self,
        metamodel: &EntityMetamodel,
        columns: &[String],
        indexes: &[String],
    ) -> Vec<Statement> {
        let known = |list: &[String], name: &str| list.iter().any(|n| n.eq_ignore_ascii_case(name));
        let mut clauses = Vec::new();
        for property in metamodel.properties() {
            if !known(columns, &property.column_name) {
                clauses.push(format!(
                    "ADD COLUMN {}",
                    self.column_definition(metamodel, property)
                ));
            }
        }
        for foreign_key in metamodel.foreign_keys() {
            if !known(indexes, &foreign_key.name) {
                clauses.push(format!(
                    "ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE {} ON UPDATE {}",
                    self.dialect.enquote(&foreign_key.name),
                    self.dialect.enquote(&foreign_key.column),
                    self.dialect.enquote(&foreign_key.referenced_table),
                    self.dialect.enquote(&foreign_key.referenced_column),
                    foreign_key.on_delete.as_sql(),
                    foreign_key.on_update.as_sql(),
                ));
            }
        }
        for unique_key in metamodel.unique_keys() {
            if !known(indexes, &unique_key.name) {
                clauses.push(format!(
                    "ADD CONSTRAINT {} UNIQUE ({})",
                    self.dialect.enquote(&unique_key.name),
                    unique_key.columns.join(", "),
                ));
            }
        }
        for index in metamodel.indexes() {
            if !known(indexes, &index.name) {
                clauses.push(format!(
                    "ADD INDEX {} ({}) USING {}",
                    self.dialect.enquote(&index.name),
                    index.columns.join(", "),
                    index.index_type.as_sql(),
                ));
            }
        }
        if clauses.is_empty() {
            return Vec::new();
        }
        let sql = format!(
            "alter table {} {}",
            metamodel.canonical_table_name(|s| self.dialect.enquote(s)),
            clauses.join(", ")
        );
        vec![Statement::from_text(sql)]
    }

    fn create_table(&self, metamodel: &EntityMetamodel, with_foreign_keys: bool) -> Statement {
        let mut sql = String::from("create table ");
        if self.dialect.supports_create_if_not_exists() {
            sql.push_str("if not exists ");
        }
        sql.push_str(&metamodel.canonical_table_name(|s| self.dialect.enquote(s)));
        sql.push_str(" (");
        let definitions: Vec<_> = metamodel
            .properties()
            .iter()
            .map(|p| self.column_definition(metamodel, p))
            .collect();
        sql.push_str(&definitions.join(", "));
        let primary_key = metamodel.primary_key_properties();
        if !primary_key.is_empty() {
            sql.push_str(", constraint pk_");
            sql.push_str(metamodel.table_name());
            sql.push_str(" primary key(");
            let columns: Vec<_> = primary_key
                .iter()
                .map(|p| p.canonical_column_name(|s| self.dialect.enquote(s)))
                .collect();
            sql.push_str(&columns.join(", "));
            sql.push(')');
        }
        if with_foreign_keys {
            for foreign_key in metamodel.foreign_keys() {
                sql.push_str(", CONSTRAINT ");
                sql.push_str(&self.dialect.enquote(&foreign_key.name));
                sql.push_str(" FOREIGN KEY (");
                sql.push_str(&self.dialect.enquote(&foreign_key.column));
                sql.push_str(") REFERENCES ");
                sql.push_str(&self.dialect.enquote(&foreign_key.referenced_table));
                sql.push_str(" (");
                sql.push_str(&self.dialect.enquote(&foreign_key.referenced_column));
                sql.push_str(") ON DELETE ");
                sql.push_str(foreign_key.on_delete.as_sql());
                sql.push_str(" ON UPDATE ");
                sql.push_str(foreign_key.on_update.as_sql());
            }
        }
        for unique_key in metamodel.unique_keys() {
            sql.push_str(", CONSTRAINT ");
            sql.push_str(&self.dialect.enquote(&unique_key.name));
            sql.push_str(" UNIQUE (");
            sql.push_str(&unique_key.columns.join(", "));
            sql.push(')');
        }
        if self.dialect.supports_inline_index_definitions() {
            for index in metamodel.indexes() {
                sql.push_str(", INDEX ");
                sql.push_str(&self.dialect.enquote(&index.name));
                sql.push_str(" (");
                sql.push_str(&index.columns.join(", "));
                sql.push_str(") USING ");
                sql.push_str(index.index_type.as_sql());
            }
        }
        sql.push(')');
        Statement::from_text(sql)
    }

    fn create_indexes(&self, metamodel: &EntityMetamodel) -> Vec<Statement> {
        metamodel
            .indexes()
            .iter()
            .map(|index| {
                let mut sql = String::from("create index ");
                if self.dialect.supports_create_if_not_exists() {
                    sql.push_str("if not exists ");
                }
                sql.push_str(&self.dialect.enquote(&index.name));
                sql.push_str(" on ");
                sql.push_str(&metamodel.canonical_table_name(|s| self.dialect.enquote(s)));
                sql.push_str(" (");
                sql.push_str(&index.columns.join(", "));
                sql.push(')');
                Statement::from_text(sql)
            })
            .collect()
    }

    fn column_definition(&self, metamodel: &EntityMetamodel, property: &PropertyDef) -> String {
        let mut definition = property.canonical_column_name(|s| self.dialect.enquote(s));
        definition.push(' ');
        definition.push_str(&self.dialect.data_type_name(&property.column_type));
        if property.id && *metamodel.id_generator() == IdGenerator::AutoIncrement {
            definition.push(' ');
            definition.push_str(self.dialect.auto_increment_keyword());
        }
        if !property.nullable {
            definition.push_str(" not null");
        }
        if let Some(value) = &property.default_value {
            definition.push_str(" DEFAULT ");
            definition.push_str(&self.dialect.format_value(value));
        }
        definition
    }

    fn create_sequence(&self, metamodel: &EntityMetamodel) -> Result<Option<Statement>> {
        match metamodel.id_generator() {
            IdGenerator::Sequence {
                start_with,
                increment_by,
                ..
            } => {
                let name = self.sequence_name(metamodel)?;
                let mut sql = String::from("create sequence ");
                if self.dialect.supports_create_if_not_exists() {
                    sql.push_str("if not exists ");
                }
                sql.push_str(&name);
                sql.push_str(&format!(
                    " start with {start_with} increment by {increment_by}"
                ));
                Ok(Some(Statement::from_text(sql)))
            }
            _ => Ok(None),
        }
    }

    fn drop_sequence(&self, metamodel: &EntityMetamodel) -> Result<Option<Statement>> {
        match metamodel.id_generator() {
            IdGenerator::Sequence { .. } => {
                let name = self.sequence_name(metamodel)?;
                let mut sql = String::from("drop sequence ");
                if self.dialect.supports_drop_if_exists() {
                    sql.push_str("if exists ");
                }
                sql.push_str(&name);
                Ok(Some(Statement::from_text(sql)))
            }
            _ => Ok(None),
        }
    }

    fn sequence_name(&self, metamodel: &EntityMetamodel) -> Result<String> {
        if !self.dialect.supports_sequences() {
            return Err(SqlError::Unsupported {
                dialect: self.dialect.name(),
                feature: "sequences",
            });
        }
        let name = metamodel
            .id_generator()
            .canonical_sequence_name(|s| self.dialect.enquote(s));
        name.ok_or(SqlError::Unsupported {
            dialect: self.dialect.name(),
            feature: "sequences",
        })
    }
}
