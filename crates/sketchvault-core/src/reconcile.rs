//! Idempotent element reconciliation and conceal propagation.
//!
//! Merging is a pure map-merge on element id: the strictly higher version
//! wins, `version_nonce` breaks version ties, and a full tie keeps the local
//! copy. Applied pairwise this is commutative and associative, which is what
//! makes multi-peer merges order-independent.

use std::collections::{HashMap, HashSet};

use crate::element::Element;

/// True when `remote` should replace `local` for the same id.
fn remote_wins(local: &Element, remote: &Element) -> bool {
    remote.version > local.version
        || (remote.version == local.version && remote.version_nonce > local.version_nonce)
}

/// Merge two element sets by version precedence.
///
/// Every id present in either input appears exactly once in the result,
/// sorted by id for determinism. `reconcile(s, s) == s` for any set `s`.
pub fn reconcile(local: &[Element], remote: &[Element]) -> Vec<Element> {
    let mut merged: HashMap<&str, &Element> =
        local.iter().map(|el| (el.id.as_str(), el)).collect();

    for el in remote {
        let replace = match merged.get(el.id.as_str()) {
            Some(&current) => remote_wins(current, el),
            None => true,
        };
        if replace {
            merged.insert(el.id.as_str(), el);
        }
    }

    let mut result: Vec<Element> = merged.into_values().cloned().collect();
    result.sort_by(|a, b| a.id.cmp(&b.id));
    result
}

/// Next conceal state for a selection: conceal iff everything selected is
/// currently revealed, otherwise reveal.
pub fn should_conceal<'a>(selected: impl IntoIterator<Item = &'a Element>) -> bool {
    selected.into_iter().all(|el| !el.concealed)
}

/// Toggle conceal on the selected ids, then propagate one hop to connectors.
pub fn toggle_concealed(elements: &[Element], selected_ids: &HashSet<String>) -> Vec<Element> {
    let selected: Vec<&Element> = elements
        .iter()
        .filter(|el| selected_ids.contains(&el.id))
        .collect();
    if selected.is_empty() {
        return elements.to_vec();
    }
    let next_state = should_conceal(selected.into_iter());

    let toggled: Vec<Element> = elements
        .iter()
        .map(|el| {
            if selected_ids.contains(&el.id) {
                let mut el = el.clone();
                el.concealed = next_state;
                el
            } else {
                el.clone()
            }
        })
        .collect();

    propagate_concealment(&toggled, selected_ids)
}

/// One-hop conceal propagation from endpoints to their bound connectors.
///
/// A connector whose bound endpoints intersect `toggled_ids` derives its
/// concealed state as the OR of the concealed flags of its bound endpoints
/// that are concealable node kinds. Connectors outside the toggled
/// neighborhood keep their state. Propagation never recurses: a connector
/// bound to another connector contributes nothing to the OR.
pub fn propagate_concealment(elements: &[Element], toggled_ids: &HashSet<String>) -> Vec<Element> {
    let by_id: HashMap<&str, &Element> =
        elements.iter().map(|el| (el.id.as_str(), el)).collect();

    // Adjacency built once per pass: connector id -> bound endpoint ids.
    let adjacency: HashMap<&str, Vec<&str>> = elements
        .iter()
        .filter(|el| el.kind.is_connector())
        .map(|el| {
            let endpoints: Vec<&str> = [&el.start_binding, &el.end_binding]
                .into_iter()
                .flatten()
                .map(|b| b.element_id.as_str())
                .collect();
            (el.id.as_str(), endpoints)
        })
        .collect();

    elements
        .iter()
        .map(|el| {
            let Some(endpoints) = adjacency.get(el.id.as_str()) else {
                return el.clone();
            };
            let touched = endpoints.iter().any(|id| toggled_ids.contains(*id));
            if !touched {
                return el.clone();
            }
            let derived = endpoints
                .iter()
                .filter_map(|id| by_id.get(id))
                .filter(|endpoint| endpoint.kind.is_concealable_node())
                .any(|endpoint| endpoint.concealed);
            let mut el = el.clone();
            el.concealed = derived;
            el
        })
        .collect()
}
