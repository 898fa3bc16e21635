/// The active filter, owned by the caller and passed in on every recompute.
///
/// City and type are single-select: at most one active value per dimension,
/// and re-selecting the active value clears the dimension back to "any".
/// Experience tags are a multi-select set combined with AND semantics by the
/// filter (drill-down composition: adding a tag narrows, never widens).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub selected_city: Option<String>,
    pub selected_type: Option<String>,
    pub selected_experience_tags: Vec<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `city`, replacing any other active city; selecting the
    /// currently-active city clears the dimension.
    pub fn toggle_city(&mut self, city: &str) {
        toggle_single(&mut self.selected_city, city);
    }

    pub fn toggle_type(&mut self, typetag: &str) {
        toggle_single(&mut self.selected_type, typetag);
    }

    /// Set-membership flip: adds `tag` if absent, removes it if present.
    pub fn toggle_experience_tag(&mut self, tag: &str) {
        if let Some(pos) = self.selected_experience_tags.iter().position(|t| t == tag) {
            self.selected_experience_tags.remove(pos);
        } else {
            self.selected_experience_tags.push(tag.to_string());
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.selected_city.is_none()
            && self.selected_type.is_none()
            && self.selected_experience_tags.is_empty()
    }
}

fn toggle_single(slot: &mut Option<String>, value: &str) {
    if slot.as_deref() == Some(value) {
        *slot = None;
    } else {
        *slot = Some(value.to_string());
    }
}
