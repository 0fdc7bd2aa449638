//! Resource entity, identifiers, and request types.
//!
//! The entity is a plain struct; persistence behaviour lives solely in the
//! repository port and its adapters. All wire serialisation is camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::validation::{Constraint, FieldRule, FieldValue, ValidateRequest};

/// Errors raised while parsing a resource identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ResourceIdError {
    /// The supplied text is not a UUID.
    #[error("resource id must be a valid UUID")]
    InvalidUuid,
}

/// Opaque resource identifier, assigned by the store on creation and
/// immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ResourceId(Uuid);

impl ResourceId {
    /// Parse an identifier from its textual form.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceIdError::InvalidUuid`] when the text is not a
    /// valid UUID.
    pub fn new(value: &str) -> Result<Self, ResourceIdError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| ResourceIdError::InvalidUuid)
    }

    /// Wrap an already-parsed UUID.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted resource record.
///
/// ## Invariants
/// - `name` length is within [1, 255].
/// - `description`, when present, is at most 500 characters.
/// - `id` and `created_at` never change after creation; the store owns
///   both, along with `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Store-assigned identifier.
    pub id: ResourceId,
    /// Display name, 1-255 characters.
    pub name: String,
    /// Optional free-text description, up to 500 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Soft-visibility flag; defaults to `true` on creation and is just
    /// another patchable field afterwards.
    pub is_active: bool,
    /// Optional attribution for the creating principal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Optional attribution for the last updating principal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    /// Store-set creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Store-set last-modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Whitelisted fields accepted by the store when creating a resource.
/// Everything else (flags, attribution, timestamps) is store-owned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResource {
    pub name: String,
    pub description: Option<String>,
}

/// The full post-merge field set persisted by an update. Built by the
/// service's explicit merge; the store applies it atomically and refreshes
/// `updated_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceChanges {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub updated_by: Option<String>,
}

/// Equality criteria for a search. An absent field constrains nothing,
/// so the store is never asked to match an absent value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceFilter {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

impl ResourceFilter {
    /// Whether a record satisfies every supplied criterion.
    #[must_use]
    pub fn matches(&self, resource: &Resource) -> bool {
        if self.name.as_deref().is_some_and(|name| name != resource.name) {
            return false;
        }
        if self
            .is_active
            .is_some_and(|is_active| is_active != resource.is_active)
        {
            return false;
        }
        true
    }
}

/// Body of `POST /resources`.
///
/// Unknown fields are dropped at deserialisation and never persisted.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceRequest {
    /// Display name, 1-255 characters.
    #[serde(default)]
    pub name: String,
    /// Optional description, up to 500 characters.
    #[serde(default)]
    pub description: Option<String>,
}

const CREATE_RULES: &[FieldRule] = &[
    FieldRule {
        field: "name",
        constraints: &[Constraint::MinLength(1), Constraint::MaxLength(255)],
    },
    FieldRule {
        field: "description",
        constraints: &[Constraint::MaxLength(500)],
    },
];

impl ValidateRequest for CreateResourceRequest {
    fn rules() -> &'static [FieldRule] {
        CREATE_RULES
    }

    fn field(&self, name: &'static str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(&self.name),
            "description" => self
                .description
                .as_deref()
                .map_or(FieldValue::Absent, FieldValue::Text),
            _ => FieldValue::Absent,
        }
    }
}

/// Body of `PATCH /resources/{id}`: a partial set of fields merged onto
/// the existing record (supplied fields win, others are retained).
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourceRequest {
    /// Replacement name, 1-255 characters when supplied.
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement description, up to 500 characters when supplied.
    #[serde(default)]
    pub description: Option<String>,
    /// Replacement visibility flag.
    #[serde(default)]
    pub is_active: Option<bool>,
}

const UPDATE_RULES: &[FieldRule] = &[
    FieldRule {
        field: "name",
        constraints: &[Constraint::MinLength(1), Constraint::MaxLength(255)],
    },
    FieldRule {
        field: "description",
        constraints: &[Constraint::MaxLength(500)],
    },
    FieldRule {
        field: "isActive",
        constraints: &[],
    },
];

impl UpdateResourceRequest {
    /// Whether the patch carries no fields at all. Empty patches are
    /// rejected before any store call.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.is_active.is_none()
    }
}

impl ValidateRequest for UpdateResourceRequest {
    fn rules() -> &'static [FieldRule] {
        UPDATE_RULES
    }

    fn field(&self, name: &'static str) -> FieldValue<'_> {
        match name {
            "name" => self
                .name
                .as_deref()
                .map_or(FieldValue::Absent, FieldValue::Text),
            "description" => self
                .description
                .as_deref()
                .map_or(FieldValue::Absent, FieldValue::Text),
            "isActive" => self.is_active.map_or(FieldValue::Absent, FieldValue::Flag),
            _ => FieldValue::Absent,
        }
    }
}

/// Query parameters of `GET /resources`: pagination plus entity filters.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchResourcesRequest {
    /// Page to fetch, 1-based; defaults to 1.
    #[serde(default)]
    pub page: Option<u64>,
    /// Page size; defaults to 10.
    #[serde(default)]
    pub limit: Option<u64>,
    /// Exact-match filter on the resource name.
    #[serde(default)]
    pub name: Option<String>,
    /// Exact-match filter on the visibility flag.
    #[serde(default)]
    pub is_active: Option<bool>,
}

// Integer and boolean coercion is handled at deserialisation; page/limit
// range checks belong to the pagination conversion, so nothing is left
// for the table to constrain.
const SEARCH_RULES: &[FieldRule] = &[
    FieldRule {
        field: "name",
        constraints: &[],
    },
    FieldRule {
        field: "isActive",
        constraints: &[],
    },
];

impl ValidateRequest for SearchResourcesRequest {
    fn rules() -> &'static [FieldRule] {
        SEARCH_RULES
    }

    fn field(&self, name: &'static str) -> FieldValue<'_> {
        match name {
            "name" => self
                .name
                .as_deref()
                .map_or(FieldValue::Absent, FieldValue::Text),
            "isActive" => self.is_active.map_or(FieldValue::Absent, FieldValue::Flag),
            _ => FieldValue::Absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::validate_request;
    use rstest::rstest;

    fn sample_resource(name: &str, is_active: bool) -> Resource {
        Resource {
            id: ResourceId::random(),
            name: name.to_owned(),
            description: None,
            is_active,
            created_by: None,
            updated_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    #[case(1, true)]
    #[case(255, true)]
    #[case(0, false)]
    #[case(256, false)]
    fn create_name_length_boundaries(#[case] length: usize, #[case] valid: bool) {
        let request = CreateResourceRequest {
            name: "x".repeat(length),
            description: None,
        };
        assert_eq!(validate_request(&request).is_ok(), valid);
    }

    #[rstest]
    #[case(500, true)]
    #[case(501, false)]
    fn create_description_length_boundaries(#[case] length: usize, #[case] valid: bool) {
        let request = CreateResourceRequest {
            name: "widget".to_owned(),
            description: Some("d".repeat(length)),
        };
        assert_eq!(validate_request(&request).is_ok(), valid);
    }

    #[test]
    fn update_patch_with_no_fields_is_empty() {
        assert!(UpdateResourceRequest::default().is_empty());
        let patch = UpdateResourceRequest {
            is_active: Some(false),
            ..UpdateResourceRequest::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn update_validates_only_supplied_fields() {
        let patch = UpdateResourceRequest {
            name: None,
            description: Some("d".repeat(501)),
            is_active: None,
        };
        assert!(validate_request(&patch).is_err());
        assert!(validate_request(&UpdateResourceRequest::default()).is_ok());
    }

    #[test]
    fn filter_with_no_criteria_matches_everything() {
        let filter = ResourceFilter::default();
        assert!(filter.matches(&sample_resource("anything", false)));
    }

    #[test]
    fn filter_applies_each_supplied_criterion() {
        let filter = ResourceFilter {
            name: Some("widget".to_owned()),
            is_active: Some(true),
        };
        assert!(filter.matches(&sample_resource("widget", true)));
        assert!(!filter.matches(&sample_resource("widget", false)));
        assert!(!filter.matches(&sample_resource("other", true)));
    }

    #[test]
    fn resource_serialises_camel_case() {
        let resource = sample_resource("widget", true);
        let value = serde_json::to_value(&resource).expect("resource serialises");
        assert!(value.get("isActive").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("is_active").is_none());
    }

    #[test]
    fn create_request_drops_unknown_fields() {
        let request: CreateResourceRequest =
            serde_json::from_value(serde_json::json!({ "name": "A", "owner": "mallory" }))
                .expect("unknown fields ignored");
        assert_eq!(request.name, "A");
    }
}
