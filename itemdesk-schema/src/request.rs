//! Inbound payloads for `POST /items` and `PUT /items/{id}`.
//!
//! Field rules are declared with `validator`; the `into_*` conversions run them and resolve
//! defaults, so callers only ever hold a checked [`NewItem`] or [`ItemChanges`].
//! Keys outside the known field set are ignored during deserialization.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::item::ItemStatus;

const TITLE_REQUIRED: &str = "Title is required";

fn validate_status(status: &str) -> Result<(), ValidationError> {
    if ItemStatus::from_name(status).is_some() {
        return Ok(());
    }
    let mut err = ValidationError::new("invalid_status");
    err.message = Some("Status must be one of: active, inactive, pending".into());
    err.add_param("value".into(), &status);
    Err(err)
}

fn reject_null<T>(field: &PatchField<T>, message: &'static str) -> Result<(), ValidationError> {
    if field.is_null() {
        return Err(ValidationError::new("null").with_message(message.into()));
    }
    Ok(())
}

fn validate_title_change(title: &PatchField<String>) -> Result<(), ValidationError> {
    reject_null(title, TITLE_REQUIRED)?;
    match title {
        PatchField::Value(t) if t.is_empty() => {
            Err(ValidationError::new("length").with_message(TITLE_REQUIRED.into()))
        }
        _ => Ok(()),
    }
}

fn validate_description_change(description: &PatchField<String>) -> Result<(), ValidationError> {
    reject_null(description, "Description must be a string")
}

fn validate_status_change(status: &PatchField<String>) -> Result<(), ValidationError> {
    reject_null(status, "Status must be one of: active, inactive, pending")?;
    match status {
        PatchField::Value(s) => validate_status(s),
        _ => Ok(()),
    }
}

/// One field of a partial update: left out, sent as `null`, or sent with a value.
///
/// Use with `#[serde(default)]` so a missing key lands on [`PatchField::Missing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchField<T> {
    Missing,
    Null,
    Value(T),
}

impl<T> Default for PatchField<T> {
    fn default() -> Self {
        PatchField::Missing
    }
}

impl<T> PatchField<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, PatchField::Missing)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PatchField::Null)
    }

    /// The sent value, if any; `Missing` and `Null` both yield `None`.
    pub fn into_value(self) -> Option<T> {
        match self {
            PatchField::Value(v) => Some(v),
            PatchField::Missing | PatchField::Null => None,
        }
    }
}

impl<T> From<T> for PatchField<T> {
    fn from(value: T) -> Self {
        PatchField::Value(value)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for PatchField<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<T>::deserialize(deserializer)?.map_or(PatchField::Null, PatchField::Value))
    }
}

impl<T: Serialize> Serialize for PatchField<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PatchField::Value(v) => v.serialize(serializer),
            PatchField::Missing | PatchField::Null => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(
        required(message = "Title is required"),
        length(min = 1, message = "Title is required")
    )]
    pub title: Option<String>,

    pub description: Option<String>,

    /// `None` => `active`.
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
}

/// Every field may be left out; a field that is sent, including as `null`, must pass its rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[serde(default, skip_serializing_if = "PatchField::is_missing")]
    #[validate(custom(function = "validate_title_change"))]
    pub title: PatchField<String>,

    #[serde(default, skip_serializing_if = "PatchField::is_missing")]
    #[validate(custom(function = "validate_description_change"))]
    pub description: PatchField<String>,

    #[serde(default, skip_serializing_if = "PatchField::is_missing")]
    #[validate(custom(function = "validate_status_change"))]
    pub status: PatchField<String>,
}

/// Checked create payload with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub title: String,
    pub description: Option<String>,
    pub status: ItemStatus,
}

/// Checked partial update. Every `None` leaves the stored column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ItemStatus>,
}

impl ItemChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}

impl CreateItemRequest {
    pub fn into_new_item(self) -> Result<NewItem, ValidationErrors> {
        self.validate()?;

        let CreateItemRequest {
            title,
            description,
            status,
        } = self;

        let Some(title) = title else {
            let mut errors = ValidationErrors::new();
            errors.add("title", ValidationError::new("required").with_message(TITLE_REQUIRED.into()));
            return Err(errors);
        };

        Ok(NewItem {
            title,
            // An empty description is stored as absent.
            description: description.filter(|d| !d.is_empty()),
            status: status
                .as_deref()
                .and_then(ItemStatus::from_name)
                .unwrap_or_default(),
        })
    }
}

impl UpdateItemRequest {
    pub fn into_changes(self) -> Result<ItemChanges, ValidationErrors> {
        self.validate()?;

        let UpdateItemRequest {
            title,
            description,
            status,
        } = self;

        Ok(ItemChanges {
            title: title.into_value(),
            description: description.into_value(),
            status: status
                .into_value()
                .as_deref()
                .and_then(ItemStatus::from_name),
        })
    }
}
