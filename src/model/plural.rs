//! Counter row label.
//!
//! The review noun has three plural forms. Selection rule:
//! - last two digits 11..=14, or last digit 0 → many
//! - last digit 2..=4 → few
//! - last digit 1 → one
//! - otherwise → many

/// Plural category of a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralForm {
    One,
    Few,
    Many,
}

impl PluralForm {
    pub fn for_count(count: usize) -> Self {
        let last_two = count % 100;
        let last = count % 10;
        if (11..=14).contains(&last_two) || last == 0 {
            Self::Many
        } else if (2..=4).contains(&last) {
            Self::Few
        } else if last == 1 {
            Self::One
        } else {
            Self::Many
        }
    }
}

const REVIEW_ONE: &str = "отзыв";
const REVIEW_FEW: &str = "отзыва";
const REVIEW_MANY: &str = "отзывов";

/// Noun for `count` reviews.
pub fn review_noun(count: usize) -> &'static str {
    match PluralForm::for_count(count) {
        PluralForm::One => REVIEW_ONE,
        PluralForm::Few => REVIEW_FEW,
        PluralForm::Many => REVIEW_MANY,
    }
}

/// Full counter label, e.g. `"45 отзывов"`.
pub fn reviews_label(count: usize) -> String {
    format!("{} {}", count, review_noun(count))
}
