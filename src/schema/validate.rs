use std::fmt;

use crate::foundation::error::FormError;
use crate::schema::model::{DYNAMIC_GROUP_KEY, FieldDescriptor, FieldFormat, FormSchema};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SchemaPathElem {
    Field(String),
    Index(usize),
}

/// One structural problem found in a schema.
#[derive(Debug, Clone)]
pub struct SchemaError {
    pub(crate) path: Vec<SchemaPathElem>,
    /// Problem description.
    pub message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }

    /// JSON-path style location, e.g. `$.properties.speed.step`.
    pub fn location(&self) -> String {
        format_path(&self.path)
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

/// Every problem found by [`FormSchema::validate`].
#[derive(Debug, Clone)]
pub struct SchemaErrors {
    /// Problems in document order.
    pub errors: Vec<SchemaError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl From<SchemaErrors> for FormError {
    fn from(errs: SchemaErrors) -> Self {
        FormError::validation(errs.to_string())
    }
}

impl FormSchema {
    /// Check the structural invariants the form engine relies on.
    ///
    /// Unknown formats are not reported: they render as plain text.
    pub fn validate(&self) -> Result<(), SchemaErrors> {
        validate_schema(self)
    }
}

pub(crate) fn validate_schema(schema: &FormSchema) -> Result<(), SchemaErrors> {
    let mut errors = Vec::new();
    let props = SchemaPathElem::Field("properties".to_owned());

    for (key, field) in schema.static_fields() {
        let path = vec![props.clone(), SchemaPathElem::Field(key.to_owned())];
        validate_field(field, &path, &mut errors);
    }

    match schema.dynamic_group() {
        None => errors.push(SchemaError::at(
            &[props.clone()],
            format!("missing \"{DYNAMIC_GROUP_KEY}\" group"),
        )),
        Some(group) => {
            let base = vec![
                props.clone(),
                SchemaPathElem::Field(DYNAMIC_GROUP_KEY.to_owned()),
            ];
            if let Some(explicit) = &group.title_key
                && group.field(explicit).is_none()
            {
                let mut path = base.clone();
                path.push(SchemaPathElem::Field("titleKey".to_owned()));
                errors.push(SchemaError::at(
                    &path,
                    format!("title field \"{explicit}\" is not declared in items.properties"),
                ));
            }
            for (key, field) in &group.fields {
                let mut path = base.clone();
                path.extend([
                    SchemaPathElem::Field("items".to_owned()),
                    SchemaPathElem::Field("properties".to_owned()),
                    SchemaPathElem::Field(key.clone()),
                ]);
                validate_field(field, &path, &mut errors);
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaErrors { errors })
    }
}

fn validate_field(field: &FieldDescriptor, path: &[SchemaPathElem], errors: &mut Vec<SchemaError>) {
    let with = |leaf: &str| {
        let mut p = path.to_vec();
        p.push(SchemaPathElem::Field(leaf.to_owned()));
        p
    };

    match field.format {
        FieldFormat::Slider => {
            if !field.minimum.is_finite() || !field.maximum.is_finite() {
                errors.push(SchemaError::at(path, "slider bounds must be finite"));
            } else if field.minimum > field.maximum {
                errors.push(SchemaError::at(
                    &with("minimum"),
                    "slider minimum must be <= maximum",
                ));
            }
            if !field.step.is_finite() || field.step <= 0.0 {
                errors.push(SchemaError::at(&with("step"), "slider step must be > 0"));
            }
        }
        FieldFormat::CustomBoolean => {
            if field.choices.is_empty() {
                errors.push(SchemaError::at(
                    &with("enum"),
                    "customBoolean needs at least one option",
                ));
            }
            check_unique_choices(field, &with("enum"), errors);
        }
        FieldFormat::Tagify => check_unique_choices(field, &with("enum"), errors),
        FieldFormat::Plain | FieldFormat::Color | FieldFormat::ColorsDropdown => {}
    }
}

fn check_unique_choices(
    field: &FieldDescriptor,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) {
    for (i, option) in field.choices.iter().enumerate() {
        if field.choices[..i].iter().any(|o| o.value == option.value) {
            let mut p = path.to_vec();
            p.push(SchemaPathElem::Index(i));
            errors.push(SchemaError::at(
                &p,
                format!("duplicate option value {}", option.value),
            ));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/validate.rs"]
mod tests;
