use model::Landmark;

use crate::selection::FilterSelection;

/// AND semantics across the selected experience tags.
///
/// An empty selection passes every landmark; otherwise every selected tag
/// must appear in the landmark's tag list.
pub fn matches_experience_tags(landmark: &Landmark, selected: &[String]) -> bool {
    selected
        .iter()
        .all(|tag| landmark.experiencetag.iter().any(|t| t == tag))
}

/// Unified landmark filter.
///
/// A landmark passes iff:
/// - city dimension: unset, or equal to `landmark.city`
/// - type dimension: unset, or equal to `landmark.typetag`
/// - experience tags: `matches_experience_tags`
///
/// Ordering contract:
/// - The output is a subsequence of the input in the input's order. The
///   filter is recomputed in full on every call; callers must not assume
///   result identity across invocations.
pub fn filter_landmarks<'a>(
    landmarks: &'a [Landmark],
    selection: &FilterSelection,
) -> Vec<&'a Landmark> {
    landmarks
        .iter()
        .filter(|lm| {
            if let Some(city) = &selection.selected_city
                && city != &lm.city
            {
                return false;
            }
            if let Some(typetag) = &selection.selected_type
                && typetag != &lm.typetag
            {
                return false;
            }
            matches_experience_tags(lm, &selection.selected_experience_tags)
        })
        .collect()
}
