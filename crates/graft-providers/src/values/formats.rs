//! Value file formats
//!
//! Registers JSON, YAML and TOML parsers into the
//! [`VALUE_FORMATS`](graft_application::ports::registry::VALUE_FORMATS)
//! registry. Parsing goes through `figment`'s format providers so every format
//! produces the same nested tree shape.

use std::path::Path;

use figment::Figment;
use figment::providers::{Format, Json, Toml, Yaml};
use graft_application::ports::registry::{VALUE_FORMATS, ValueFormatEntry};
use serde_json::{Map, Value};

use super::tree::strip_nulls;

fn parse_with<F: Format>(path: &Path) -> Result<Map<String, Value>, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    Figment::from(F::string(&text))
        .extract::<Map<String, Value>>()
        .map(strip_nulls)
        .map_err(|e| e.to_string())
}

#[linkme::distributed_slice(VALUE_FORMATS)]
static JSON_FORMAT: ValueFormatEntry = ValueFormatEntry {
    name: "json",
    extensions: &["json"],
    description: "JSON documents",
    parse: parse_with::<Json>,
};

#[linkme::distributed_slice(VALUE_FORMATS)]
static YAML_FORMAT: ValueFormatEntry = ValueFormatEntry {
    name: "yaml",
    extensions: &["yaml", "yml"],
    description: "YAML documents",
    parse: parse_with::<Yaml>,
};

#[linkme::distributed_slice(VALUE_FORMATS)]
static TOML_FORMAT: ValueFormatEntry = ValueFormatEntry {
    name: "toml",
    extensions: &["toml"],
    description: "TOML documents",
    parse: parse_with::<Toml>,
};
