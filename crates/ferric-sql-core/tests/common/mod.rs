#![allow(dead_code)]

use ferric_sql_core::builder::{
    DeleteStatementBuilder, InsertStatementBuilder, SelectStatementBuilder,
    SetOperationStatementBuilder, UpdateStatementBuilder,
};
use ferric_sql_core::context::{
    DeleteContext, InsertContext, SelectContext, SetOperationContext, UpdateContext,
};
use ferric_sql_core::dialect::GenericDialect;
use ferric_sql_core::metamodel::{big_integer, integer, varchar, Column, EntityMetamodel};
use ferric_sql_core::statement::Statement;

pub struct Employee {
    pub metamodel: EntityMetamodel,
    pub id: Column<i32>,
    pub name: Column<String>,
    pub department_id: Column<i32>,
    pub salary: Column<i64>,
}

pub fn employee() -> Employee {
    let mut builder = EntityMetamodel::builder("Employee");
    let id = builder.column(integer("id").id());
    let name = builder.column(varchar("name", 100));
    let department_id = builder.column(integer("department_id"));
    let salary = builder.column(big_integer("salary"));
    Employee {
        metamodel: builder.build(),
        id,
        name,
        department_id,
        salary,
    }
}

pub struct Department {
    pub metamodel: EntityMetamodel,
    pub id: Column<i32>,
    pub name: Column<String>,
}

pub fn department() -> Department {
    let mut builder = EntityMetamodel::builder("Department");
    let id = builder.column(integer("id").id());
    let name = builder.column(varchar("name", 100));
    Department {
        metamodel: builder.build(),
        id,
        name,
    }
}

pub fn build_select(context: &SelectContext) -> Statement {
    SelectStatementBuilder::new(&GenericDialect, context).build()
}

pub fn build_set_operation(context: &SetOperationContext) -> Statement {
    SetOperationStatementBuilder::new(&GenericDialect, context).build()
}

pub fn build_insert(context: &InsertContext) -> Statement {
    InsertStatementBuilder::new(&GenericDialect, context).build()
}

pub fn build_update(context: &UpdateContext) -> Statement {
    UpdateStatementBuilder::new(&GenericDialect, context).build()
}

pub fn build_delete(context: &DeleteContext) -> Statement {
    DeleteStatementBuilder::new(&GenericDialect, context).build()
}
