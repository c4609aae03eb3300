//! Named conditions understood by the host editor
//!
//! These are the atoms the binding table is written in. Names are passed through
//! untouched; the host decides what they mean.

use super::context::{Atom, When};

/// `groog.context.<mode>Mode`, the context keys the extension sets for its modes
pub fn mode_context(mode: &str) -> Atom {
    Atom::new(format!("groog.context.{}Mode", mode))
}

pub fn active_panel() -> Atom {
    Atom::new("activePanel")
}

pub fn editor_focus() -> Atom {
    Atom::new("editorFocus")
}

pub fn editor_text_focus() -> Atom {
    Atom::new("editorTextFocus")
}

pub fn find_input_focussed() -> Atom {
    Atom::new("findInputFocussed")
}

pub fn find_mode() -> Atom {
    mode_context("find")
}

pub fn qmk_mode() -> Atom {
    mode_context("qmk")
}

pub fn recording() -> Atom {
    mode_context("record")
}

pub fn terminal_find_mode() -> Atom {
    mode_context("terminal.find")
}

pub fn in_quick_open() -> Atom {
    Atom::new("inQuickOpen")
}

pub fn in_search_editor() -> Atom {
    Atom::new("inSearchEditor")
}

pub fn panel_focus() -> Atom {
    Atom::new("panelFocus")
}

pub fn list_focus() -> Atom {
    Atom::new("listFocus")
}

pub fn list_supports_multiselect() -> Atom {
    Atom::new("listSupportsMultiselect")
}

pub fn search_viewlet_focus() -> Atom {
    Atom::new("searchViewletFocus")
}

pub fn side_bar_focus() -> Atom {
    Atom::new("sideBarFocus")
}

pub fn suggest_widget_visible() -> Atom {
    Atom::new("suggestWidgetVisible")
}

pub fn terminal_focus() -> Atom {
    Atom::new("terminalFocus")
}

/// `terminal.visible` stays true while the terminal is behind another panel,
/// so the view-scoped key is used instead.
pub fn terminal_visible() -> Atom {
    Atom::new("view.terminal.visible")
}

pub fn search_input_box_focus() -> Atom {
    Atom::new("searchInputBoxFocus")
}

/// Text is being edited, either in an editor or in the find widget
///
/// Keys gated on this do nothing in other input boxes. Being compound, it
/// cannot be negated; negate the two atoms instead.
pub fn focus_context() -> When {
    editor_text_focus().or(&find_input_focussed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_context_name() {
        assert_eq!(recording().text(), "groog.context.recordMode");
        assert_eq!(
            terminal_find_mode().text(),
            "groog.context.terminal.findMode"
        );
    }

    #[test]
    fn test_focus_context_is_compound() {
        let when = focus_context();
        assert_eq!(when.text(), "editorTextFocus || findInputFocussed");
        assert!(when.not().is_err());
    }

    #[test]
    fn test_mode_contexts_are_branchable() {
        for atom in [find_mode(), qmk_mode(), recording(), terminal_find_mode()] {
            assert!(atom.is_identifier(), "{} should be an identifier", atom);
        }
    }
}
