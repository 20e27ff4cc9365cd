//! Raw input records.
//!
//! Records mirror the caller's data as closely as possible: optional fields
//! stay optional here and are normalized to sentinels when entities are built.

use serde::{Deserialize, Serialize};

use crate::ids::{Age, ChildId, DaycareId, FamilyId, AGE_COUNT};

/// A child as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChildRecord {
    pub id: ChildId,
    pub age: Age,
    #[serde(default)]
    pub family_id: Option<FamilyId>,
    #[serde(default)]
    pub initial_daycare_id: Option<DaycareId>,
    #[serde(default)]
    pub actual_daycare_id: Option<DaycareId>,
    #[serde(default)]
    pub preference_list: Vec<Option<DaycareId>>,
}

impl ChildRecord {
    pub fn new(id: u32, age: Age) -> Self {
        Self {
            id: ChildId(id),
            age,
            family_id: None,
            initial_daycare_id: None,
            actual_daycare_id: None,
            preference_list: Vec::new(),
        }
    }

    pub fn with_family(mut self, family: u32) -> Self {
        self.family_id = Some(FamilyId(family));
        self
    }

    /// Marks the child as currently enrolled at `daycare`.
    pub fn enrolled_at(mut self, daycare: u32) -> Self {
        self.initial_daycare_id = Some(DaycareId(daycare));
        self.actual_daycare_id = Some(DaycareId(daycare));
        self
    }

    pub fn with_preferences(mut self, prefs: impl IntoIterator<Item = Option<u32>>) -> Self {
        self.preference_list = prefs.into_iter().map(|d| d.map(DaycareId)).collect();
        self
    }
}

/// A daycare as supplied by the caller.
///
/// Capacities are signed so that negative values reach validation instead of
/// failing deserialization with an unrelated message.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DaycareRecord {
    pub id: DaycareId,
    pub recruiting_numbers_list: Vec<i64>,
    #[serde(default)]
    pub share_ages_list: Vec<Vec<Age>>,
    #[serde(default)]
    pub priority_child_id_list: Vec<ChildId>,
    #[serde(default)]
    pub priority_score_list: Vec<f64>,
}

impl DaycareRecord {
    pub fn new(id: u32, recruiting_numbers: [i64; AGE_COUNT]) -> Self {
        Self {
            id: DaycareId(id),
            recruiting_numbers_list: recruiting_numbers.to_vec(),
            share_ages_list: Vec::new(),
            priority_child_id_list: Vec::new(),
            priority_score_list: Vec::new(),
        }
    }

    pub fn with_shared_ages(mut self, groups: impl IntoIterator<Item = Vec<Age>>) -> Self {
        self.share_ages_list = groups.into_iter().collect();
        self
    }

    /// Sets the priority list, highest priority first, with parallel scores.
    pub fn with_priority(mut self, ranking: impl IntoIterator<Item = (u32, f64)>) -> Self {
        let (children, scores): (Vec<_>, Vec<_>) = ranking
            .into_iter()
            .map(|(c, score)| (ChildId(c), score))
            .unzip();
        self.priority_child_id_list = children;
        self.priority_score_list = scores;
        self
    }
}

/// One position of a family's preference list.
///
/// Families with siblings give one daycare per child; singleton families may
/// give a bare id.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FamilyPreference {
    Joint(Vec<Option<DaycareId>>),
    Single(Option<DaycareId>),
}

impl FamilyPreference {
    pub fn joint(ids: impl IntoIterator<Item = Option<u32>>) -> Self {
        FamilyPreference::Joint(ids.into_iter().map(|d| d.map(DaycareId)).collect())
    }

    pub fn single(id: Option<u32>) -> Self {
        FamilyPreference::Single(id.map(DaycareId))
    }
}

/// A family as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FamilyRecord {
    pub id: FamilyId,
    pub children: Vec<ChildId>,
    #[serde(default)]
    pub pref: Vec<FamilyPreference>,
}

impl FamilyRecord {
    pub fn new(id: u32, children: impl IntoIterator<Item = u32>) -> Self {
        Self {
            id: FamilyId(id),
            children: children.into_iter().map(ChildId).collect(),
            pref: Vec::new(),
        }
    }

    pub fn with_preferences(mut self, prefs: impl IntoIterator<Item = FamilyPreference>) -> Self {
        self.pref = prefs.into_iter().collect();
        self
    }
}

/// The three record collections making up one matching problem.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MatchingInput {
    #[serde(default)]
    pub children: Vec<ChildRecord>,
    #[serde(default)]
    pub daycares: Vec<DaycareRecord>,
    #[serde(default)]
    pub families: Vec<FamilyRecord>,
}
