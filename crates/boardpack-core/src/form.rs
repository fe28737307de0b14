//! Flat form-field input.
//!
//! The request arrives as string key/value pairs: `num_sections`, per-section `section_type_<i>`
//! and `width_<i>`, the shared-or-per-section attributes (`common_depth` + `depth_<i>`, ...) and
//! the header fields.

use crate::model::{
    Amperage, Depth, DocumentRequest, PacketHeader, SectionRequest, SectionSpec, SectionType,
    Width,
};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Value of a `common_<name>` field that selects the per-section `<name>_<i>` fields instead.
pub const PER_SECTION: &str = "no";

/// Largest accepted `num_sections`.
pub const MAX_SECTIONS: u32 = 64;

const HEADER_FIELDS: [&str; 4] = [
    "sales_order",
    "customer_name",
    "job_address",
    "switchboard_name",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormFields(IndexMap<String, String>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the trimmed value, treating blank fields as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Builds fields from a JSON object. Numbers and booleans are stringified; `null` is skipped.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(Error::InvalidField {
                field: "<root>".to_string(),
                value: value.to_string(),
            });
        };
        let mut out = Self::new();
        for (key, v) in map {
            let text = match v {
                Value::Null => continue,
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(Error::InvalidField {
                        field: key.clone(),
                        value: other.to_string(),
                    });
                }
            };
            out.insert(key.clone(), text);
        }
        Ok(out)
    }

    /// Resolves a shared-or-per-section attribute for section `index`.
    ///
    /// `common_<name> == "no"` selects `<name>_<index>`; any other value is the shared value. When
    /// `common_<name>` is absent only the per-section field can supply a value.
    pub fn section_value(&self, name: &str, index: u32) -> Option<&str> {
        let per_section = || self.get(&format!("{name}_{index}"));
        match self.get(&format!("common_{name}")) {
            Some(PER_SECTION) | None => per_section(),
            Some(shared) => Some(shared),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for FormFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}

impl DocumentRequest {
    pub fn from_form(fields: &FormFields) -> Result<Self> {
        let raw_count = fields
            .get("num_sections")
            .ok_or_else(|| Error::MissingField {
                field: "num_sections".to_string(),
            })?;
        let invalid_count = || Error::InvalidField {
            field: "num_sections".to_string(),
            value: raw_count.to_string(),
        };
        let total: u32 = raw_count.trim().parse().map_err(|_| invalid_count())?;
        if total == 0 {
            return Err(Error::NoSections);
        }
        if total > MAX_SECTIONS {
            return Err(invalid_count());
        }

        let header_field = |name: &str| fields.get(name).unwrap_or_default().to_string();
        let header = PacketHeader {
            sales_order: header_field("sales_order"),
            customer_name: header_field("customer_name"),
            job_address: header_field("job_address"),
            switchboard_name: header_field("switchboard_name"),
        };

        let mut sections = Vec::new();
        for index in 1..=total {
            let own = |name: &str| {
                fields
                    .get(&format!("{name}_{index}"))
                    .unwrap_or_default()
                    .to_string()
            };
            let shared = |name: &str| fields.section_value(name, index).unwrap_or_default();

            let spec = SectionSpec::new(
                index,
                total,
                SectionType::parse(&own("section_type")),
                Width::parse(&own("width")),
                Amperage::parse(shared("amperage")),
                Depth::parse(shared("depth")),
            )?;
            sections.push(SectionRequest {
                spec,
                height: fields.section_value("height", index).map(str::to_string),
                bus_size: fields.section_value("bus", index).map(str::to_string),
            });
        }

        Ok(Self { header, sections })
    }

    /// Checks what a packet cannot be generated without: every header field filled in and at
    /// least one section with a type.
    pub fn validate(&self) -> Result<()> {
        let values = [
            &self.header.sales_order,
            &self.header.customer_name,
            &self.header.job_address,
            &self.header.switchboard_name,
        ];
        for (field, value) in HEADER_FIELDS.into_iter().zip(values) {
            if value.trim().is_empty() {
                return Err(Error::MissingField {
                    field: field.to_string(),
                });
            }
        }

        let typed = self
            .sections
            .iter()
            .any(|s| !s.spec.section_type.as_str().is_empty());
        if !typed {
            return Err(Error::NoSectionTypes);
        }
        Ok(())
    }
}
