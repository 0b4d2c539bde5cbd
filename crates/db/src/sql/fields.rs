//! Per-entity field registries.
//!
//! A registry maps each public (camelCase, API-facing) field name to its
//! storage column and expected type. It is the single source of truth used
//! when translating partial-update payloads into SQL.

use std::fmt;

/// The SQL type a public field is stored as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Int,
    Decimal,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "string"),
            Self::Int => write!(f, "integer"),
            Self::Decimal => write!(f, "decimal"),
        }
    }
}

/// One public field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Storage column; `None` when it is spelled like the public name.
    pub column: Option<&'static str>,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, column: None, kind }
    }

    pub const fn stored_as(self, column: &'static str) -> Self {
        Self { column: Some(column), ..self }
    }

    pub fn column_name(&self) -> &'static str {
        self.column.unwrap_or(self.name)
    }
}

/// The updatable fields of one entity, in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct FieldRegistry {
    entity: &'static str,
    fields: &'static [FieldSpec],
}

impl FieldRegistry {
    pub const fn new(entity: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self { entity, fields }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn get(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

static COMPANY_FIELD_SPECS: [FieldSpec; 4] = [
    FieldSpec::new("name", FieldKind::Text),
    FieldSpec::new("description", FieldKind::Text),
    FieldSpec::new("numEmployees", FieldKind::Int).stored_as("num_employees"),
    FieldSpec::new("logoUrl", FieldKind::Text).stored_as("logo_url"),
];

static JOB_FIELD_SPECS: [FieldSpec; 4] = [
    FieldSpec::new("title", FieldKind::Text),
    FieldSpec::new("salary", FieldKind::Int),
    FieldSpec::new("equity", FieldKind::Decimal),
    FieldSpec::new("companyHandle", FieldKind::Text).stored_as("company_handle"),
];

/// Updatable company fields. `handle` is the key and never updatable.
pub static COMPANY_FIELDS: FieldRegistry = FieldRegistry::new("company", &COMPANY_FIELD_SPECS);

/// Updatable job fields. `id` is generated and never updatable.
pub static JOB_FIELDS: FieldRegistry = FieldRegistry::new("job", &JOB_FIELD_SPECS);
