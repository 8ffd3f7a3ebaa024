//! Catalog tab filter for the gallery page.
//!
//! The gallery markup is authored statically; this module only enhances it.
//! At startup every card is classified once by its title and annotated with
//! `data-catalog`, the tab labels get live counts, and from then on tab
//! activation (pointer or arrow keys) toggles card visibility.

use std::rc::Rc;

use catalog::{classify_title, filter_shows, tab_label, Catalog, CatalogCounts};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent, MouseEvent};

const TAB_SELECTOR: &str = "[role=tab]";

/// Locate the tab list and the card grid and wire the filter up.
///
/// If the page carries neither region this is a no-op: not every page has the
/// gallery. The two element sequences are fixed here for the page lifetime;
/// cards or tabs added later are not tracked.
pub fn init() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Ok(Some(tablist)) = document.query_selector(".tabs") else {
        return;
    };
    let Ok(Some(grid)) = document.query_selector(".grid") else {
        return;
    };

    let tabs = query_all(&tablist, TAB_SELECTOR);
    let cards = query_all(&grid, ".card");

    // One-time classification snapshot; later title edits are not re-scanned.
    for card in &cards {
        let _ = card.set_attribute("data-catalog", classify_card(card).as_str());
    }

    let filter = Rc::new(TabFilter { tabs, cards });

    // Event delegation: one click listener on the container resolves the tab
    // from wherever inside it the click landed.
    let click = {
        let filter = Rc::clone(&filter);
        Closure::wrap(Box::new(move |e: MouseEvent| {
            let Some(target) = e.target() else { return };
            let Ok(element) = target.dyn_into::<Element>() else {
                return;
            };
            let Ok(Some(tab)) = element.closest(TAB_SELECTOR) else {
                return;
            };
            if let Some(value) = tab.get_attribute("data-filter") {
                filter.select_filter(&value);
            }
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    let _ = tablist.add_event_listener_with_callback("click", click.as_ref().unchecked_ref());

    let keydown = {
        let filter = Rc::clone(&filter);
        Closure::wrap(Box::new(move |e: KeyboardEvent| {
            filter.handle_key(&e.key());
        }) as Box<dyn FnMut(KeyboardEvent)>)
    };
    let _ = tablist.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());

    // The listeners live for the page lifetime; keep the closures alive.
    click.forget();
    keydown.forget();

    filter.update_tab_labels();
}

struct TabFilter {
    tabs: Vec<Element>,
    cards: Vec<Element>,
}

impl TabFilter {
    fn counts(&self) -> CatalogCounts {
        CatalogCounts::from_catalogs(self.cards.iter().map(stored_catalog))
    }

    /// Write the live counts into the managed tab labels. Runs once, at the
    /// end of initialization; tabs with an unmanaged filter value keep their
    /// authored text.
    fn update_tab_labels(&self) {
        let counts = self.counts();
        for tab in &self.tabs {
            let Some(value) = tab.get_attribute("data-filter") else {
                continue;
            };
            if let Some(label) = tab_label(&value, &counts) {
                tab.set_text_content(Some(&label));
            }
        }
    }

    /// Select the tab carrying `value` and recompute every card's visibility
    /// from scratch. A value matching no tab leaves all tabs unselected.
    fn select_filter(&self, value: &str) {
        for tab in &self.tabs {
            let selected = tab.get_attribute("data-filter").as_deref() == Some(value);
            let _ = tab.set_attribute("aria-selected", if selected { "true" } else { "false" });
        }
        for card in &self.cards {
            let shown = filter_shows(value, stored_catalog(card));
            let _ = card.class_list().toggle_with_force("hidden", !shown);
        }
    }

    fn selected_index(&self) -> Option<usize> {
        self.tabs
            .iter()
            .position(|tab| tab.get_attribute("aria-selected").as_deref() == Some("true"))
    }

    /// Roving focus: arrow keys move focus and selection together, wrapping
    /// at the ends. Other keys are ignored.
    fn handle_key(&self, key: &str) {
        let Some(index) = next_tab_index(self.selected_index(), self.tabs.len(), key) else {
            return;
        };
        let Some(tab) = self.tabs.get(index) else {
            return;
        };
        if let Some(html) = tab.dyn_ref::<HtmlElement>() {
            let _ = html.focus();
        }
        if let Some(value) = tab.get_attribute("data-filter") {
            self.select_filter(&value);
        }
    }
}

/// Arrow-key arithmetic for the roving focus. With nothing selected, "next"
/// lands on the first tab and "previous" on the last.
fn next_tab_index(current: Option<usize>, len: usize, key: &str) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match key {
        "ArrowRight" => Some(current.map_or(0, |i| (i + 1) % len)),
        "ArrowLeft" => Some(current.map_or(len - 1, |i| (i + len - 1) % len)),
        _ => None,
    }
}

/// Classify a card by its `.title` descendant. A card without a title element
/// has an empty title and ends up in `Other`.
fn classify_card(card: &Element) -> Catalog {
    let title = card
        .query_selector(".title")
        .ok()
        .flatten()
        .and_then(|el| el.text_content())
        .unwrap_or_default();
    classify_title(&title)
}

fn stored_catalog(card: &Element) -> Catalog {
    card.get_attribute("data-catalog")
        .map(|v| Catalog::from_str(&v))
        .unwrap_or(Catalog::Other)
}

fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    let mut elements = Vec::new();
    if let Ok(list) = root.query_selector_all(selector) {
        for i in 0..list.length() {
            if let Some(node) = list.get(i) {
                if let Ok(element) = node.dyn_into::<Element>() {
                    elements.push(element);
                }
            }
        }
    }
    elements
}

#[cfg(test)]
mod tests {
    use super::next_tab_index;

    #[test]
    fn test_next_wraps_forward() {
        assert_eq!(next_tab_index(Some(0), 3, "ArrowRight"), Some(1));
        assert_eq!(next_tab_index(Some(2), 3, "ArrowRight"), Some(0));
    }

    #[test]
    fn test_previous_wraps_backward() {
        assert_eq!(next_tab_index(Some(1), 3, "ArrowLeft"), Some(0));
        assert_eq!(next_tab_index(Some(0), 3, "ArrowLeft"), Some(2));
    }

    #[test]
    fn test_no_selection() {
        // Nothing selected: next goes to the first tab, previous to the last.
        assert_eq!(next_tab_index(None, 3, "ArrowRight"), Some(0));
        assert_eq!(next_tab_index(None, 3, "ArrowLeft"), Some(2));
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(next_tab_index(Some(1), 3, "Enter"), None);
        assert_eq!(next_tab_index(Some(1), 3, "ArrowDown"), None);
    }

    #[test]
    fn test_empty_tab_list() {
        assert_eq!(next_tab_index(None, 0, "ArrowRight"), None);
    }

    #[test]
    fn test_full_cycle_returns_home() {
        let mut index = Some(1);
        for _ in 0..3 {
            index = next_tab_index(index, 3, "ArrowRight");
        }
        assert_eq!(index, Some(1));
    }
}
