//! Name matching policy for resolvable references.
//!
//! Exact (case-sensitive) matches win. Without one, trimmed case-insensitive
//! matches are used. The winning tier must hold exactly one candidate:
//! none is `NotFound`, several is `Ambiguous`.

use crate::clickup::{ClickUpError, ClickUpResult};

/// Pick the single item named `name` from `items`.
pub fn find_unique_by_name<'a, T, F>(
    entity: &str,
    name: &str,
    items: &'a [T],
    name_of: F,
) -> ClickUpResult<&'a T>
where
    F: Fn(&T) -> &str,
{
    let exact: Vec<&T> = items.iter().filter(|item| name_of(item) == name).collect();
    let candidates = if exact.is_empty() {
        let wanted = name.trim().to_lowercase();
        items
            .iter()
            .filter(|item| name_of(item).trim().to_lowercase() == wanted)
            .collect()
    } else {
        exact
    };

    match candidates.as_slice() {
        [] => Err(ClickUpError::not_found(entity, format!("'{name}'"))),
        [only] => Ok(*only),
        many => Err(ClickUpError::Ambiguous {
            entity: entity.to_string(),
            name: name.to_string(),
            count: many.len(),
        }),
    }
}
