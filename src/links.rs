//! Link collection transitions. Every write takes the current snapshot and
//! returns a new one; callers decide what to do with it.

use crate::error::HubError;
use crate::models::link::{LinkDraft, LinkEntry, FALLBACK_CATEGORY, FALLBACK_ICON};
use crate::models::state::AppState;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

// ── Views ──────────────────────────────────────────────────────────────

/// Links by ascending `order`; ties keep storage order.
pub fn sorted(links: &[LinkEntry]) -> Vec<&LinkEntry> {
    let mut v: Vec<&LinkEntry> = links.iter().collect();
    v.sort_by_key(|l| l.order);
    v
}

/// Distinct category labels in first-seen storage order.
pub fn categories(links: &[LinkEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    links.iter()
        .filter(|l| seen.insert(l.category.as_str()))
        .map(|l| l.category.clone())
        .collect()
}

/// Sorted view narrowed by a case-insensitive search on title or category
/// and an optional exact category.
pub fn filtered<'a>(links: &'a [LinkEntry], query: &str, category: Option<&str>) -> Vec<&'a LinkEntry> {
    let q = query.to_lowercase();
    sorted(links).into_iter()
        .filter(|l| {
            q.is_empty()
                || l.title.to_lowercase().contains(&q)
                || l.category.to_lowercase().contains(&q)
        })
        .filter(|l| category.map_or(true, |c| l.category == c))
        .collect()
}

// ── Writes ─────────────────────────────────────────────────────────────

fn required(value: Option<&String>, field: &'static str) -> Result<String, HubError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(HubError::MissingField(field)),
    }
}

fn fresh_id(links: &[LinkEntry], now_ms: i64) -> String {
    let mut stamp = now_ms;
    loop {
        let id = format!("id-{}", stamp);
        if !links.iter().any(|l| l.id == id) {
            return id;
        }
        stamp += 1;
    }
}

/// Append a new link. Returns the new snapshot and the new entry's id.
pub fn add(state: &AppState, draft: &LinkDraft, now_ms: i64) -> Result<(AppState, String), HubError> {
    let title = required(draft.title.as_ref(), "title")?;
    let url   = required(draft.url.as_ref(), "url")?;

    let non_empty = |v: &Option<String>, fallback: &str| match v {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => fallback.to_string(),
    };

    let id = fresh_id(&state.links, now_ms);
    let entry = LinkEntry {
        id:          id.clone(),
        title,
        url,
        description: draft.description.clone().unwrap_or_default(),
        category:    non_empty(&draft.category, FALLBACK_CATEGORY),
        icon:        non_empty(&draft.icon, FALLBACK_ICON),
        order:       state.links.len() as i64,
    };

    let mut links = state.links.clone();
    links.push(entry);
    Ok((AppState { links, ..state.clone() }, id))
}

/// Shallow-merge `draft` over the entry with `id`.
pub fn edit(state: &AppState, id: &str, draft: &LinkDraft) -> Result<AppState, HubError> {
    let pos = state.links.iter().position(|l| l.id == id)
        .ok_or_else(|| HubError::LinkNotFound(id.to_string()))?;

    let mut entry = state.links[pos].clone();
    if let Some(t) = &draft.title       { entry.title = t.trim().to_string(); }
    if let Some(u) = &draft.url         { entry.url = u.trim().to_string(); }
    if let Some(d) = &draft.description { entry.description = d.clone(); }
    if let Some(c) = &draft.category    { entry.category = c.clone(); }
    if let Some(i) = &draft.icon        { entry.icon = i.clone(); }
    if let Some(o) = draft.order        { entry.order = o; }

    if entry.title.is_empty() { return Err(HubError::MissingField("title")); }
    if entry.url.is_empty()   { return Err(HubError::MissingField("url")); }

    let mut links = state.links.clone();
    links[pos] = entry;
    Ok(AppState { links, ..state.clone() })
}

/// Remove by id. Remaining orders are left as they are.
pub fn delete(state: &AppState, id: &str, confirmed: bool) -> Result<AppState, HubError> {
    if !confirmed {
        return Err(HubError::NotConfirmed);
    }
    if !state.links.iter().any(|l| l.id == id) {
        return Err(HubError::LinkNotFound(id.to_string()));
    }
    let links = state.links.iter().filter(|l| l.id != id).cloned().collect();
    Ok(AppState { links, ..state.clone() })
}

/// Swap the entry with its neighbour in the sorted view and renumber densely.
/// Moving the first entry up or the last entry down returns the state unchanged.
pub fn move_link(state: &AppState, id: &str, dir: Direction) -> Result<AppState, HubError> {
    let mut view: Vec<LinkEntry> = sorted(&state.links).into_iter().cloned().collect();
    let idx = view.iter().position(|l| l.id == id)
        .ok_or_else(|| HubError::LinkNotFound(id.to_string()))?;

    let target = match dir {
        Direction::Up   => idx.checked_sub(1),
        Direction::Down => Some(idx + 1).filter(|&t| t < view.len()),
    };
    let Some(target) = target else {
        return Ok(state.clone());
    };

    view.swap(idx, target);
    for (i, l) in view.iter_mut().enumerate() {
        l.order = i as i64;
    }
    Ok(AppState { links: view, ..state.clone() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::state::Defaults;

    fn link(id: &str, category: &str, order: i64) -> LinkEntry {
        LinkEntry {
            id:          id.to_string(),
            title:       format!("Title {}", id),
            url:         format!("https://{}.test", id),
            description: String::new(),
            category:    category.to_string(),
            icon:        FALLBACK_ICON.to_string(),
            order,
        }
    }

    fn state_with(links: Vec<LinkEntry>) -> AppState {
        AppState { links, ..Defaults::new("https://store.test/exec", "pw").state() }
    }

    fn ids(links: &[&LinkEntry]) -> Vec<String> {
        links.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn add_appends_with_next_order() {
        let s = state_with(vec![link("a", "Ops", 0), link("b", "Ops", 1)]);
        let (next, id) = add(&s, &LinkDraft::new("Docs", "https://x.test"), 1_700_000_000_000).unwrap();
        assert_eq!(next.links.len(), 3);
        let added = next.links.iter().find(|l| l.id == id).unwrap();
        assert_eq!(added.order, 2);
        assert_eq!(added.category, FALLBACK_CATEGORY);
        assert_eq!(added.icon, FALLBACK_ICON);
        assert_eq!(added.description, "");
        assert!(s.links.iter().all(|l| l.id != id));
        assert_eq!(s.links.len(), 2, "previous snapshot untouched");
    }

    #[test]
    fn add_id_is_unique_even_within_same_millisecond() {
        let s = state_with(vec![]);
        let (s1, id1) = add(&s,  &LinkDraft::new("A", "https://a.test"), 42).unwrap();
        let (s2, id2) = add(&s1, &LinkDraft::new("B", "https://b.test"), 42).unwrap();
        assert_ne!(id1, id2);
        assert_eq!(s2.links.len(), 2);
    }

    #[test]
    fn add_rejects_blank_title_or_url() {
        let s = state_with(vec![link("a", "Ops", 0)]);
        assert_eq!(add(&s, &LinkDraft::new("", "https://x.test"), 1).unwrap_err(), HubError::MissingField("title"));
        assert_eq!(add(&s, &LinkDraft::new("Docs", "   "), 1).unwrap_err(), HubError::MissingField("url"));
        assert_eq!(add(&s, &LinkDraft::default(), 1).unwrap_err(), HubError::MissingField("title"));
    }

    #[test]
    fn edit_merges_and_keeps_identity() {
        let s = state_with(vec![link("a", "Ops", 5)]);
        let draft = LinkDraft { category: Some("HR".into()), ..LinkDraft::default() };
        let next = edit(&s, "a", &draft).unwrap();
        let e = &next.links[0];
        assert_eq!(e.category, "HR");
        assert_eq!(e.id, "a");
        assert_eq!(e.order, 5);
        assert_eq!(e.title, "Title a");
    }

    #[test]
    fn edit_unknown_id_fails() {
        let s = state_with(vec![link("a", "Ops", 0)]);
        assert_eq!(edit(&s, "zz", &LinkDraft::default()).unwrap_err(), HubError::LinkNotFound("zz".into()));
    }

    #[test]
    fn edit_cannot_blank_title() {
        let s = state_with(vec![link("a", "Ops", 0)]);
        let draft = LinkDraft { title: Some(" ".into()), ..LinkDraft::default() };
        assert_eq!(edit(&s, "a", &draft).unwrap_err(), HubError::MissingField("title"));
    }

    #[test]
    fn delete_needs_confirmation_and_leaves_gaps() {
        let s = state_with(vec![link("a", "Ops", 0), link("b", "Ops", 1), link("c", "Ops", 2)]);
        assert_eq!(delete(&s, "b", false).unwrap_err(), HubError::NotConfirmed);
        let next = delete(&s, "b", true).unwrap();
        let orders: Vec<i64> = next.links.iter().map(|l| l.order).collect();
        assert_eq!(orders, vec![0, 2]);
    }

    #[test]
    fn move_edges_are_noops() {
        let s = state_with(vec![link("a", "Ops", 0), link("b", "Ops", 1), link("c", "Ops", 2)]);
        assert_eq!(move_link(&s, "a", Direction::Up).unwrap(), s);
        assert_eq!(move_link(&s, "c", Direction::Down).unwrap(), s);
    }

    #[test]
    fn move_down_then_up_restores_order() {
        let s = state_with(vec![link("a", "Ops", 0), link("b", "Ops", 1), link("c", "Ops", 2)]);
        let down = move_link(&s, "a", Direction::Down).unwrap();
        assert_eq!(ids(&sorted(&down.links)), vec!["b", "a", "c"]);
        let back = move_link(&down, "a", Direction::Up).unwrap();
        assert_eq!(ids(&sorted(&back.links)), vec!["a", "b", "c"]);
    }

    #[test]
    fn move_uses_sorted_view_and_renumbers() {
        // Storage order differs from sort order and has gaps.
        let s = state_with(vec![link("c", "Ops", 9), link("a", "Ops", 1), link("b", "Ops", 4)]);
        let next = move_link(&s, "c", Direction::Up).unwrap();
        let view = sorted(&next.links);
        assert_eq!(ids(&view), vec!["a", "c", "b"]);
        let orders: Vec<i64> = view.iter().map(|l| l.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn sort_ties_keep_storage_order() {
        let links = vec![link("x", "Ops", 1), link("y", "Ops", 0), link("z", "Ops", 1)];
        assert_eq!(ids(&sorted(&links)), vec!["y", "x", "z"]);
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        let links = vec![link("a", "TI", 0), link("b", "RH", 1), link("c", "TI", 2)];
        assert_eq!(categories(&links), vec!["TI".to_string(), "RH".to_string()]);
    }

    #[test]
    fn filter_matches_title_or_category_case_insensitively() {
        let mut links = vec![link("a", "Tools", 0), link("b", "HR", 1)];
        links[1].title = "Payroll".into();
        assert_eq!(ids(&filtered(&links, "tool", None)), vec!["a"]);
        assert_eq!(ids(&filtered(&links, "PAY", None)), vec!["b"]);
        assert_eq!(ids(&filtered(&links, "", Some("HR"))), vec!["b"]);
        assert!(filtered(&links, "tool", Some("HR")).is_empty());
    }
}
