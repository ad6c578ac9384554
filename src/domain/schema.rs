//! Serialized shape of a learning module.
//!
//! These records mirror the JSON payload one-to-one. Field order is the
//! serialization order. Scalars are read leniently: strings accept any JSON
//! scalar and numbers are coerced, so a sloppy payload still loads.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::services::text_ops::{coerce_number, coerce_string};

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_string(value.as_ref()))
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_number(value.as_ref()))
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(coerce_string(Some(&v))),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModel {
    #[serde(default, deserialize_with = "lenient_string")]
    pub module_id: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub version: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient_number")]
    pub min_score: f64,

    #[serde(default, deserialize_with = "lenient_number")]
    pub estimated_time: f64,

    #[serde(default, deserialize_with = "lenient_number")]
    pub allowed_attempts: f64,

    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<RawStep>>,

    #[serde(default, deserialize_with = "lenient_vec")]
    pub assets: Vec<RawAsset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStep {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,

    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,

    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<RawQuestion>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawQuestion {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub solution: String,

    #[serde(default, deserialize_with = "lenient_vec")]
    pub options: Vec<RawOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOption {
    /// Older payloads call this `id`.
    #[serde(alias = "id", default, deserialize_with = "lenient_string")]
    pub value: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAsset {
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type", default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
}
