//! BSON storage shape of a toy listing.

use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::{self, Bson, Document, oid::ObjectId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ToyResult;
use crate::models::{NewToy, Toy};

/// A document of the toys collection.
///
/// Everything but `_id` is kept as raw [`Bson`]. Older listings were stored
/// exactly as clients sent them, so a field may hold any BSON type and is
/// returned unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToyDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: Bson,
    #[serde(default)]
    pub photo: Bson,
    #[serde(default)]
    pub seller_mail: Bson,
    #[serde(default)]
    pub seller_name: Bson,
    #[serde(default)]
    pub category: Bson,
    #[serde(default)]
    pub sub_category: Bson,
    #[serde(default)]
    pub price: Bson,
    #[serde(default)]
    pub rating: Bson,
    #[serde(default)]
    pub available_quantity: Bson,
    #[serde(default)]
    pub details_description: Bson,
    #[serde(default)]
    pub created_at: Bson,
}

impl ToyDocument {
    pub fn from_new(id: ObjectId, toy: NewToy) -> ToyResult<Self> {
        Ok(Self {
            id,
            name: Bson::from(toy.name),
            photo: Bson::from(toy.photo),
            seller_mail: Bson::from(toy.seller_mail),
            seller_name: Bson::from(toy.seller_name),
            category: Bson::from(toy.category),
            sub_category: Bson::from(toy.sub_category),
            price: Bson::Double(toy.price),
            rating: bson::to_bson(&toy.rating)?,
            available_quantity: bson::to_bson(&toy.available_quantity)?,
            details_description: Bson::from(toy.details_description),
            created_at: Bson::DateTime(bson::DateTime::from_millis(
                toy.created_at.timestamp_millis(),
            )),
        })
    }

    /// Decode a raw document. Fails only when `_id` is missing or not an ObjectId.
    pub fn decode(raw: Document) -> ToyResult<Self> {
        Ok(bson::from_document(raw)?)
    }
}

impl From<ToyDocument> for Toy {
    fn from(doc: ToyDocument) -> Self {
        Self {
            id: doc.id,
            name: bson_to_json(doc.name),
            photo: bson_to_json(doc.photo),
            seller_mail: bson_to_json(doc.seller_mail),
            seller_name: bson_to_json(doc.seller_name),
            category: bson_to_json(doc.category),
            sub_category: bson_to_json(doc.sub_category),
            price: bson_to_json(doc.price),
            rating: bson_to_json(doc.rating),
            available_quantity: bson_to_json(doc.available_quantity),
            details_description: bson_to_json(doc.details_description),
            created_at: created_at_of(doc.created_at),
        }
    }
}

/// Creation time of a stored listing.
///
/// BSON dates are used as is. Strings holding an RFC 3339 timestamp or a
/// plain `YYYY-MM-DD` date are parsed; anything else has no creation time.
fn created_at_of(value: Bson) -> Option<DateTime<Utc>> {
    match value {
        Bson::DateTime(at) => DateTime::<Utc>::from_timestamp_millis(at.timestamp_millis()),
        Bson::String(raw) => DateTime::parse_from_rfc3339(&raw)
            .map(|at| at.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .map(|at| at.and_utc())
            }),
        _ => None,
    }
}

/// Render a stored value as plain JSON.
///
/// Numbers stay numbers, NaN and infinities become `null` (JSON has no
/// representation for them) and exotic BSON types fall back to relaxed
/// extended JSON.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(n) => Value::from(n),
        Bson::Int64(n) => Value::from(n),
        Bson::Double(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Bson::String(s) => Value::String(s),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(doc) => Value::Object(
            doc.into_iter()
                .map(|(k, v)| (k, bson_to_json(v)))
                .collect::<Map<_, _>>(),
        ),
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        other => other.into_relaxed_extjson(),
    }
}
