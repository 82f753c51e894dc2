use crate::lenient;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A movie document as stored in the `movie` collection.
///
/// Documents are not schema-checked when they are imported, so every field except the id may be
/// missing or carry an unexpected shape. Deserializing into this type is the normalization
/// boundary: list-like fields always come out as a `Vec<String>`, dates as a calendar date, and
/// fields with an unusable shape are dropped. Fields we don't know about are kept in `extra` and
/// written back out unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    #[serde(rename = "_id", deserialize_with = "lenient::object_id")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[serde(default, deserialize_with = "lenient::date", skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "lenient::string_list", skip_serializing_if = "Vec::is_empty")]
    pub cast: Vec<String>,

    #[serde(default, deserialize_with = "lenient::string_list", skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,

    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,

    #[serde(default, deserialize_with = "lenient::boolean", skip_serializing_if = "Option::is_none")]
    pub adult: Option<bool>,

    #[serde(default, deserialize_with = "lenient::string_list", skip_serializing_if = "Vec::is_empty")]
    pub production_countries: Vec<String>,

    /// Minutes.
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub runtime: Option<f64>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Movie {
    /// Normalizes a raw JSON document into a `Movie`.
    pub fn from_document(document: Value) -> serde_json::Result<Self> {
        serde_json::from_value(document)
    }

    /// The normalized document, as it is written to the store.
    pub fn to_document(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
