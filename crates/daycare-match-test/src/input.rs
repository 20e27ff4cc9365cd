//! Builder for matching inputs.

use daycare_match_core::{
    Age, ChildRecord, DaycareRecord, FamilyPreference, FamilyRecord, MatchingInput, AGE_COUNT,
};

/// Collects children, daycares and families into a [`MatchingInput`].
///
/// ```
/// use daycare_match_test::InputBuilder;
///
/// let input = InputBuilder::new()
///     .daycare(10, [1, 0, 0, 0, 0, 0], [(1, 90.0)])
///     .singleton(1, 0, [Some(10), None])
///     .build();
///
/// assert_eq!(input.children.len(), 1);
/// assert_eq!(input.families[0].pref.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputBuilder {
    input: MatchingInput,
}

impl InputBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a daycare with its recruiting numbers and priority ranking.
    pub fn daycare(
        self,
        id: u32,
        recruiting: [i64; AGE_COUNT],
        priority: impl IntoIterator<Item = (u32, f64)>,
    ) -> Self {
        self.daycare_record(DaycareRecord::new(id, recruiting).with_priority(priority))
    }

    /// Adds a daycare whose `shared` age groups pool their capacity.
    pub fn pooled_daycare(
        self,
        id: u32,
        recruiting: [i64; AGE_COUNT],
        shared: impl IntoIterator<Item = Vec<Age>>,
        priority: impl IntoIterator<Item = (u32, f64)>,
    ) -> Self {
        self.daycare_record(
            DaycareRecord::new(id, recruiting)
                .with_shared_ages(shared)
                .with_priority(priority),
        )
    }

    pub fn daycare_record(mut self, record: DaycareRecord) -> Self {
        self.input.daycares.push(record);
        self
    }

    pub fn child_record(mut self, record: ChildRecord) -> Self {
        self.input.children.push(record);
        self
    }

    pub fn family_record(mut self, record: FamilyRecord) -> Self {
        self.input.families.push(record);
        self
    }

    /// Adds a child that applies alone, with its own single-child family.
    pub fn singleton(
        self,
        id: u32,
        age: Age,
        prefs: impl IntoIterator<Item = Option<u32>> + Clone,
    ) -> Self {
        self.singleton_record(ChildRecord::new(id, age), prefs)
    }

    /// Adds a child already enrolled at `daycare`, applying alone.
    pub fn enrolled(
        self,
        id: u32,
        age: Age,
        daycare: u32,
        prefs: impl IntoIterator<Item = Option<u32>> + Clone,
    ) -> Self {
        self.singleton_record(ChildRecord::new(id, age).enrolled_at(daycare), prefs)
    }

    /// Adds a family of siblings with joint preference positions.
    ///
    /// `children` lists (id, age) pairs; every position names one daycare
    /// per child in the same order.
    pub fn siblings<P>(mut self, family: u32, children: &[(u32, Age)], positions: P) -> Self
    where
        P: IntoIterator,
        P::Item: IntoIterator<Item = Option<u32>>,
    {
        let positions: Vec<Vec<Option<u32>>> = positions
            .into_iter()
            .map(|p| p.into_iter().collect())
            .collect();
        for (slot, &(id, age)) in children.iter().enumerate() {
            let column = positions.iter().map(|p| p.get(slot).copied().flatten());
            self.input.children.push(
                ChildRecord::new(id, age)
                    .with_family(family)
                    .with_preferences(column),
            );
        }
        self.input.families.push(
            FamilyRecord::new(family, children.iter().map(|(id, _)| *id)).with_preferences(
                positions
                    .into_iter()
                    .map(FamilyPreference::joint),
            ),
        );
        self
    }

    pub fn build(self) -> MatchingInput {
        self.input
    }

    fn singleton_record(
        mut self,
        record: ChildRecord,
        prefs: impl IntoIterator<Item = Option<u32>> + Clone,
    ) -> Self {
        let id = record.id.0;
        self.input
            .children
            .push(record.with_preferences(prefs.clone()));
        self.input.families.push(
            FamilyRecord::new(id, [id])
                .with_preferences(prefs.into_iter().map(FamilyPreference::single)),
        );
        self
    }
}
