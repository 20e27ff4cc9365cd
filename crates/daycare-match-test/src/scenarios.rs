//! Small matching problems with known optimal outcomes.
//!
//! Child ids double as singleton family ids; sibling families use ids from
//! 50 upward.

use daycare_match_core::{DaycareRecord, MatchingContext, MatchingInput};

use crate::input::InputBuilder;

/// The daycare every scenario revolves around.
pub const MAIN_DAYCARE: u32 = 100;

/// A second daycare for transfer scenarios.
pub const OTHER_DAYCARE: u32 = 200;

/// Derives the context of a fixture input.
///
/// # Panics
///
/// Panics if the input is rejected; fixtures are expected to be valid.
pub fn derive(input: &MatchingInput) -> MatchingContext {
    MatchingContext::from_input(input).expect("fixture input must derive")
}

/// Ages 0 and 1 pool raw capacities [1, 1]. Child 1 (age 0) outranks
/// child 2 (age 1); both want the daycare first and nothing second.
///
/// Both children are matched, pooled or not.
pub fn pooling() -> MatchingInput {
    InputBuilder::new()
        .pooled_daycare(
            MAIN_DAYCARE,
            [1, 1, 0, 0, 0, 0],
            [vec![0, 1]],
            [(1, 90.0), (2, 80.0)],
        )
        .singleton(1, 0, [Some(MAIN_DAYCARE), None])
        .singleton(2, 1, [Some(MAIN_DAYCARE), None])
        .build()
}

/// As [`pooling`] but both children are age 0, so only the pooled
/// capacity of 2 seats them both.
pub fn pooling_same_age() -> MatchingInput {
    InputBuilder::new()
        .pooled_daycare(
            MAIN_DAYCARE,
            [1, 1, 0, 0, 0, 0],
            [vec![0, 1]],
            [(1, 90.0), (2, 80.0)],
        )
        .singleton(1, 0, [Some(MAIN_DAYCARE), None])
        .singleton(2, 0, [Some(MAIN_DAYCARE), None])
        .build()
}

/// Family 50 with twins 11 and 12 (age 0) applies jointly; unrelated
/// child 1 outranks them. The daycare offers `capacity` seats for age 0.
pub fn siblings(capacity: i64) -> MatchingInput {
    InputBuilder::new()
        .daycare(
            MAIN_DAYCARE,
            [capacity, 0, 0, 0, 0, 0],
            [(1, 90.0), (11, 80.0), (12, 70.0)],
        )
        .singleton(1, 0, [Some(MAIN_DAYCARE), None])
        .siblings(
            50,
            &[(11, 0), (12, 0)],
            [
                [Some(MAIN_DAYCARE), Some(MAIN_DAYCARE)],
                [None, None],
            ],
        )
        .build()
}

/// One seat for age 0 and twins 11 and 12, with 11 ranked first. Each
/// twin applies alone: 11 at the first position, 12 at the second.
pub fn split_siblings() -> MatchingInput {
    InputBuilder::new()
        .daycare(MAIN_DAYCARE, [1, 0, 0, 0, 0, 0], [(11, 90.0), (12, 80.0)])
        .siblings(
            50,
            &[(11, 0), (12, 0)],
            [
                [Some(MAIN_DAYCARE), None],
                [None, Some(MAIN_DAYCARE)],
                [None, None],
            ],
        )
        .build()
}

/// Two seats for age 0. Child 1 outranks twins 11 and 12.
///
/// Seating the twins matches two children but leaves child 1 unmatched
/// while it fits, which blocks. With no blocking allowed only child 1 is
/// matched; allowing one blocking pair matches the twins instead.
pub fn stability() -> MatchingInput {
    InputBuilder::new()
        .daycare(
            MAIN_DAYCARE,
            [2, 0, 0, 0, 0, 0],
            [(1, 90.0), (11, 80.0), (12, 70.0)],
        )
        .singleton(1, 0, [Some(MAIN_DAYCARE), None])
        .siblings(
            50,
            &[(11, 0), (12, 0)],
            [
                [Some(MAIN_DAYCARE), Some(MAIN_DAYCARE)],
                [None, None],
            ],
        )
        .build()
}

/// Child 5 is enrolled at [`OTHER_DAYCARE`] and asks to move to
/// [`MAIN_DAYCARE`], where child 1 outranks it for the only seat. The
/// transfer family must keep its current seat.
pub fn transfer() -> MatchingInput {
    InputBuilder::new()
        .daycare(MAIN_DAYCARE, [1, 0, 0, 0, 0, 0], [(1, 90.0), (5, 80.0)])
        .daycare(OTHER_DAYCARE, [0, 0, 0, 0, 0, 0], [(5, 90.0)])
        .singleton(1, 0, [Some(MAIN_DAYCARE), None])
        .enrolled(5, 0, OTHER_DAYCARE, [Some(MAIN_DAYCARE), Some(OTHER_DAYCARE)])
        .build()
}

/// Child 5 is enrolled at [`OTHER_DAYCARE`] but only lists a daycare with
/// no seats, so no assignment exists.
pub fn stranded_transfer() -> MatchingInput {
    InputBuilder::new()
        .daycare(MAIN_DAYCARE, [0, 0, 0, 0, 0, 0], [(5, 90.0)])
        .daycare_record(DaycareRecord::new(OTHER_DAYCARE, [0, 0, 0, 0, 0, 0]))
        .enrolled(5, 0, OTHER_DAYCARE, [Some(MAIN_DAYCARE)])
        .build()
}

/// Two daycares, nine children, one sibling pair split across ages, one
/// pooled age group and one tied score.
pub fn small_city() -> MatchingInput {
    InputBuilder::new()
        .pooled_daycare(
            MAIN_DAYCARE,
            [1, 1, 1, 0, 0, 0],
            [vec![1, 2]],
            [
                (1, 95.0),
                (2, 90.0),
                (21, 88.0),
                (3, 85.0),
                (22, 85.0),
                (4, 70.0),
                (6, 60.0),
            ],
        )
        .daycare(
            OTHER_DAYCARE,
            [1, 1, 0, 1, 0, 0],
            [(4, 92.0), (3, 80.0), (22, 79.0), (5, 75.0), (7, 60.0), (6, 50.0)],
        )
        .singleton(1, 0, [Some(MAIN_DAYCARE), None])
        .singleton(2, 1, [Some(MAIN_DAYCARE), None])
        .singleton(3, 2, [Some(MAIN_DAYCARE), Some(OTHER_DAYCARE), None])
        .singleton(4, 0, [Some(OTHER_DAYCARE), Some(MAIN_DAYCARE), None])
        .singleton(5, 3, [Some(OTHER_DAYCARE), None])
        .singleton(6, 1, [Some(MAIN_DAYCARE), Some(OTHER_DAYCARE), None])
        .enrolled(7, 3, OTHER_DAYCARE, [Some(OTHER_DAYCARE)])
        .siblings(
            50,
            &[(21, 1), (22, 2)],
            [
                [Some(MAIN_DAYCARE), Some(MAIN_DAYCARE)],
                [Some(MAIN_DAYCARE), Some(OTHER_DAYCARE)],
                [None, None],
            ],
        )
        .build()
}
