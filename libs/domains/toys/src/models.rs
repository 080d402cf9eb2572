use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

/// Price ordering for a seller's listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PriceSort {
    /// Most expensive first
    Highest,
    /// Cheapest first
    Lowest,
}

/// Toy listing as returned to clients
///
/// Stored fields are rendered as found. Listings written by older clients
/// may hold any JSON type where a string is documented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Toy {
    /// Store-generated identifier, rendered as 24 hex characters
    #[serde(rename = "_id", with = "object_id_hex")]
    #[schema(value_type = String, example = "65f1c0ffee00000000000001")]
    pub id: ObjectId,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub name: Value,
    /// Picture URL, opaque to the server
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub photo: Value,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub seller_mail: Value,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub seller_name: Value,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub category: Value,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub sub_category: Value,
    /// Numeric after creation; `null` when the stored value is NaN
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub price: Value,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub rating: Value,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub available_quantity: Value,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub details_description: Value,
    /// `null` on listings created before the field existed
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /addToy`. Every field is optional and unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateToy {
    pub name: Option<String>,
    pub photo: Option<String>,
    pub seller_mail: Option<String>,
    pub seller_name: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    /// Coerced to a number. `None` means the field was absent, `Some(Null)` an explicit `null`.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Object)]
    pub price: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub rating: Value,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub available_quantity: Value,
    pub details_description: Option<String>,
}

/// Payload for `PATCH /toyUpdate/{id}`.
///
/// All ten fields are written on every update. A field missing from the
/// payload overwrites the stored value with `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateToy {
    pub name: Option<String>,
    pub photo: Option<String>,
    pub seller_mail: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    /// Stored as given, without coercion
    #[serde(default)]
    #[schema(value_type = Object)]
    pub price: Value,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub rating: Value,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub available_quantity: Value,
    pub seller_name: Option<String>,
    pub details_description: Option<String>,
}

/// A validated, timestamped listing ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewToy {
    pub name: Option<String>,
    pub photo: Option<String>,
    pub seller_mail: Option<String>,
    pub seller_name: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    /// May be NaN
    pub price: f64,
    pub rating: Value,
    pub available_quantity: Value,
    pub details_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewToy {
    /// Stamp `created_at` and coerce the price.
    pub fn from_input(input: CreateToy, now: DateTime<Utc>) -> Self {
        Self {
            price: coerce_price(input.price.as_ref()),
            name: input.name,
            photo: input.photo,
            seller_mail: input.seller_mail,
            seller_name: input.seller_name,
            category: input.category,
            sub_category: input.sub_category,
            rating: input.rating,
            available_quantity: input.available_quantity,
            details_description: input.details_description,
            created_at: now,
        }
    }
}

/// Read shapes supported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToyQuery {
    /// Everything, newest first
    All,
    /// Case-insensitive substring match on `name`, newest first
    NameContains(String),
    /// Listings of one seller, optionally ordered by price
    BySeller {
        seller_mail: String,
        sort: Option<PriceSort>,
    },
    /// Listings in one sub-category, newest first
    BySubCategory(String),
}

/// Query string of `GET /myToys/{email}`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SellerToysParams {
    /// `highest` or `lowest`; anything else leaves the order to the store
    pub sort: Option<String>,
}

impl SellerToysParams {
    pub fn price_sort(&self) -> Option<PriceSort> {
        self.sort
            .as_deref()
            .and_then(|s| PriceSort::from_str(s).ok())
    }
}

/// Acknowledgement of `POST /addToy`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: String,
}

/// Acknowledgement of `PATCH /toyUpdate/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<String>,
}

/// Acknowledgement of `DELETE /toyDetails/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Numeric coercion applied to `price` on creation.
///
/// Follows JavaScript `Number()`: strings are trimmed and parsed as decimal,
/// `0x`/`0o`/`0b` integers or `Infinity`; the empty string and `null` are 0;
/// booleans are 1/0; an absent value, arrays, objects and anything
/// unparsable become NaN.
pub fn coerce_price(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => string_to_number(s),
        Some(Value::Array(_)) | Some(Value::Object(_)) => f64::NAN,
    }
}

fn string_to_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            if digits.is_empty() {
                return f64::NAN;
            }
            return digits
                .chars()
                .try_fold(0.0_f64, |acc, c| {
                    c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
                })
                .unwrap_or(f64::NAN);
        }
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // f64::from_str also takes "inf" and "nan", which Number() does not.
    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// ObjectId as a plain hex string in JSON.
pub(crate) mod object_id_hex {
    use mongodb::bson::oid::ObjectId;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(id: &ObjectId, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&id.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ObjectId, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ObjectId::parse_str(&raw).map_err(D::Error::custom)
    }
}
