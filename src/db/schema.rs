//! Table definitions and their per-backend DDL.
//!
//! A `SchemaRelation` describes a table once; each backend compiles it to its
//! own dialect (PostgreSQL SQL or CozoScript).

use crate::types::Category;

/// Column data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit integer
    Int,
    /// Text
    String,
    /// Closed set of labels. PostgreSQL gets a native enum type; Cozo stores text.
    Enum {
        type_name: &'static str,
        labels: &'static [&'static str],
    },
}

impl DataType {
    pub fn postgres_type(&self) -> &'static str {
        match self {
            DataType::Int => "BIGINT",
            DataType::String => "TEXT",
            DataType::Enum { type_name, .. } => *type_name,
        }
    }

    pub fn cozo_type(&self) -> &'static str {
        match self {
            DataType::Int => "Int",
            DataType::String | DataType::Enum { .. } => "String",
        }
    }
}

/// A column of a relation.
#[derive(Debug, Clone)]
pub struct SchemaField {
    pub name: &'static str,
    pub data_type: DataType,
    pub nullable: bool,
}

/// A table: key columns first, then value columns.
#[derive(Debug, Clone)]
pub struct SchemaRelation {
    pub name: &'static str,
    pub key_fields: &'static [SchemaField],
    pub value_fields: &'static [SchemaField],
}

const CATEGORY_LABELS: &[&str] = &[
    Category::Sandwich.as_str(),
    Category::Salad.as_str(),
    Category::Soup.as_str(),
];

/// The `foods` table.
pub const FOODS: SchemaRelation = SchemaRelation {
    name: "foods",
    key_fields: &[SchemaField {
        name: "id",
        data_type: DataType::Int,
        nullable: false,
    }],
    value_fields: &[
        SchemaField {
            name: "food",
            data_type: DataType::String,
            nullable: false,
        },
        SchemaField {
            name: "foodtype",
            data_type: DataType::Enum {
                type_name: "food_type",
                labels: CATEGORY_LABELS,
            },
            nullable: true,
        },
    ],
};

impl SchemaRelation {
    pub fn all_fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.key_fields.iter().chain(self.value_fields.iter())
    }

    pub fn field_count(&self) -> usize {
        self.key_fields.len() + self.value_fields.len()
    }

    fn field_names(&self) -> Vec<&'static str> {
        self.all_fields().map(|f| f.name).collect()
    }

    /// PostgreSQL DDL: enum types first, then the table. Idempotent.
    ///
    /// PostgreSQL has no `CREATE TYPE IF NOT EXISTS`, so enum creation runs in
    /// a `DO` block that swallows `duplicate_object`.
    pub fn compile_postgres_create(&self) -> String {
        let mut statements = Vec::new();

        for field in self.all_fields() {
            if let DataType::Enum { type_name, labels } = field.data_type {
                let quoted: Vec<String> = labels.iter().map(|l| format!("'{}'", l)).collect();
                statements.push(format!(
                    "DO $$ BEGIN\n    CREATE TYPE {} AS ENUM ({});\nEXCEPTION\n    WHEN duplicate_object THEN NULL;\nEND $$;",
                    type_name,
                    quoted.join(", ")
                ));
            }
        }

        let mut columns: Vec<String> = self
            .all_fields()
            .map(|f| {
                let null = if f.nullable { "" } else { " NOT NULL" };
                format!("    {} {}{}", f.name, f.data_type.postgres_type(), null)
            })
            .collect();
        let keys: Vec<&str> = self.key_fields.iter().map(|f| f.name).collect();
        columns.push(format!("    PRIMARY KEY ({})", keys.join(", ")));

        statements.push(format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n);",
            self.name,
            columns.join(",\n")
        ));

        statements.join("\n")
    }

    /// CozoScript `:create` for the relation.
    pub fn compile_cozo_create(&self) -> String {
        let render = |fields: &[SchemaField]| -> String {
            fields
                .iter()
                .map(|f| {
                    let opt = if f.nullable { "?" } else { "" };
                    format!("{}: {}{}", f.name, f.data_type.cozo_type(), opt)
                })
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            ":create {} {{{} => {}}}",
            self.name,
            render(self.key_fields),
            render(self.value_fields)
        )
    }

    /// Parameterized PostgreSQL INSERT, one `$n` per column in field order.
    ///
    /// Enum parameters are bound as text and cast, so callers never need the
    /// server's enum OID.
    pub fn compile_postgres_insert(&self) -> String {
        let placeholders: Vec<String> = self
            .all_fields()
            .enumerate()
            .map(|(i, f)| match f.data_type {
                DataType::Enum { type_name, .. } => format!("${}::text::{}", i + 1, type_name),
                _ => format!("${}", i + 1),
            })
            .collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.name,
            self.field_names().join(", "),
            placeholders.join(", ")
        )
    }

    /// CozoScript `:put` of a single row bound from `$<field>` parameters.
    pub fn compile_cozo_put(&self) -> String {
        let names = self.field_names();
        let bound: Vec<String> = names.iter().map(|n| format!("${}", n)).collect();
        let keys: Vec<&str> = self.key_fields.iter().map(|f| f.name).collect();
        let values: Vec<&str> = self.value_fields.iter().map(|f| f.name).collect();
        format!(
            "?[{}] <- [[{}]]\n:put {} {{{} => {}}}",
            names.join(", "),
            bound.join(", "),
            self.name,
            keys.join(", "),
            values.join(", ")
        )
    }

    /// CozoScript lookup of a row by its key fields, bound from `$<field>`.
    pub fn compile_cozo_key_lookup(&self) -> String {
        let keys: Vec<&str> = self.key_fields.iter().map(|f| f.name).collect();
        let filters: Vec<String> = keys.iter().map(|k| format!("{} = ${}", k, k)).collect();
        format!(
            "?[{}] := *{}{{{}}}, {}",
            keys.join(", "),
            self.name,
            keys.join(", "),
            filters.join(", ")
        )
    }
}
