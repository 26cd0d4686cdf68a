// SPDX-License-Identifier: Apache-2.0

use eco9_core::{ActivityId, UserId};
use serde::{Deserialize, Serialize};

use crate::category::ActivityCategory;
use crate::impact::ImpactResult;

pub const DEFAULT_PAGE_LIMIT: usize = 50;
pub const MAX_PAGE_LIMIT: usize = 500;
pub const UNIT_MAX_LEN: usize = 32;
pub const NOTE_MAX_LEN: usize = 1024;

/// Body of an activity create/update request.
///
/// `subtype` is optional; when absent the category's first declared subtype
/// governs the impact calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActivityInput {
    pub category: ActivityCategory,
    pub value: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
}

impl ActivityInput {
    #[must_use]
    pub fn new(category: impl Into<ActivityCategory>, value: f64, unit: &str) -> Self {
        Self {
            category: category.into(),
            value,
            unit: unit.to_string(),
            subtype: None,
        }
    }

    #[must_use]
    pub fn with_subtype(mut self, subtype: &str) -> Self {
        self.subtype = Some(subtype.to_string());
        self
    }
}

/// An activity that has been validated and scored but not yet stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewActivity {
    pub user: UserId,
    pub category: ActivityCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    pub value: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub impact: ImpactResult,
}

impl NewActivity {
    #[must_use]
    pub fn into_activity(self, id: ActivityId) -> Activity {
        Activity {
            id,
            user: self.user,
            category: self.category,
            subtype: self.subtype,
            value: self.value,
            unit: self.unit,
            note: self.note,
            impact: self.impact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Activity {
    pub id: ActivityId,
    pub user: UserId,
    pub category: ActivityCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    pub value: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub impact: ImpactResult,
}

/// Filter and page window for listing stored activities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityQuery {
    pub user: Option<UserId>,
    pub category: Option<ActivityCategory>,
    pub limit: usize,
    pub cursor: Option<String>,
}

impl Default for ActivityQuery {
    fn default() -> Self {
        Self {
            user: None,
            category: None,
            limit: DEFAULT_PAGE_LIMIT,
            cursor: None,
        }
    }
}

impl ActivityQuery {
    #[must_use]
    pub fn for_user(user: UserId) -> Self {
        Self {
            user: Some(user),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn matches(&self, activity: &Activity) -> bool {
        self.user.as_ref().map_or(true, |u| *u == activity.user)
            && self
                .category
                .as_ref()
                .map_or(true, |c| *c == activity.category)
    }

    /// Limit clamped into `1..=MAX_PAGE_LIMIT`.
    #[must_use]
    pub fn effective_limit(&self) -> usize {
        self.limit.clamp(1, MAX_PAGE_LIMIT)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActivityPage {
    pub items: Vec<Activity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}
