//! Pronoun classification into the fixed category taxonomy

use shared::Category;

use crate::types::{ClassifiedRunner, Resolution, ResolvedRunner};

const HE_HIM_FORMS: [&str; 3] = ["he/him", "he", "him"];
const SHE_HER_FORMS: [&str; 3] = ["she/her", "she", "her"];

/// Canonical spelling used for set membership
///
/// Lowercases, drops whitespace, treats `,` and `\` as `/` and trims
/// punctuation around the whole value, so `"He / Him."` becomes `"he/him"`.
fn canonical_form(pronoun: &str) -> String {
    pronoun
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            ',' | '\\' => '/',
            other => other.to_ascii_lowercase(),
        })
        .collect::<String>()
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_string()
}

/// Category of a pronoun string
pub fn classify_pronoun(pronoun: &str) -> Category {
    let form = canonical_form(pronoun);

    if HE_HIM_FORMS.contains(&form.as_str()) {
        Category::HeHim
    } else if SHE_HER_FORMS.contains(&form.as_str()) {
        Category::SheHer
    } else {
        Category::Other
    }
}

pub fn classify(resolved: &ResolvedRunner) -> Category {
    match &resolved.resolution {
        Resolution::Pronoun(pronoun) => classify_pronoun(pronoun),
        Resolution::Error => Category::Error,
        Resolution::Unresolved => Category::None,
    }
}

pub fn classify_runner(resolved: &ResolvedRunner) -> ClassifiedRunner {
    ClassifiedRunner {
        identifier: resolved.identifier().to_string(),
        category: classify(resolved),
    }
}
