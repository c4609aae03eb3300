//! Default key table shipped with the generator
//!
//! Emacs-style editing on top of the host editor, with splits for find mode,
//! macro recording, the QMK keyboard layout and the terminal panel.

use std::path::Path;

use super::binding::{
    if_else, keyboard_split, only_when, panel_split, recording_split, terminal_panel_split,
    text_only, unconditional, Bindings, KeyTable,
};
use super::command::{
    notification, repeat, send_sequence, sequence, sequence_of, type_text, unbind, Action,
};
use super::conditions::*;
use super::config::load_overlay_file;
use super::context::{Atom, When};
use super::error::KeymapError;
use super::types::keys::*;
use super::types::{alt, ctrl, ctrl_x, ctrl_z, shift};

/// The default table plus an optional overlay file
///
/// Overlay keys extend the table; redefining a default key is a conflict
/// reported at compile time.
pub fn load_table(overlay: Option<&Path>) -> Result<KeyTable, KeymapError> {
    let mut table = default_table()?;
    tracing::info!("Built default key table ({} keys)", table.len());

    if let Some(path) = overlay {
        let extra = load_overlay_file(path)?;
        tracing::info!(
            "Merging overlay from {} ({} keys)",
            path.display(),
            extra.len()
        );
        table.extend(extra);
    }

    Ok(table)
}

/// The hand-authored key table
pub fn default_table() -> Result<KeyTable, KeymapError> {
    let qmk = qmk_mode();
    let rec = recording();
    let find = find_mode();
    let terminal_find = terminal_find_mode();
    let text_focus = editor_text_focus();
    let quick = in_quick_open();
    let viewlet = search_viewlet_focus();
    let suggest = suggest_widget_visible();
    let terminal = terminal_visible();
    let panel = active_panel();

    let table = KeyTable::new()
        // ====================================================================
        // Find
        // ====================================================================
        .bind(
            ctrl("f"),
            Bindings::new()
                .with(qmk.and(&terminal), Action::new("groog.terminal.find"))
                .with(
                    qmk.and(&terminal.not()).and(&rec),
                    Action::new("groog.record.findNext"),
                )
                // ctrl+s twice in simple find mode repeats the previous search
                .with(
                    qmk.and(&terminal.not()).and(&rec.not()).and(&quick),
                    Action::new("workbench.action.acceptSelectedQuickOpenItem"),
                )
                .with(
                    qmk.and(&terminal.not()).and(&rec.not()).and(&quick.not()),
                    Action::new("groog.find"),
                )
                .with(
                    qmk.not().and(&text_focus.and(&quick.not())),
                    Action::new("groog.cursorRight"),
                )
                .with(
                    When::always(),
                    unbind("workbench.action.terminal.focusFind"),
                ),
        )
        .bind(
            ctrl("s"),
            Bindings::new()
                .with(&qmk, Action::new("groog.cursorRight"))
                .with(qmk.not().and(&terminal), Action::new("groog.terminal.find"))
                .with(
                    qmk.not().and(&terminal.not()).and(&rec),
                    Action::new("groog.record.findNext"),
                )
                .with(
                    qmk.not().and(&terminal.not()).and(&rec.not()).and(&quick),
                    Action::new("workbench.action.acceptSelectedQuickOpenItem"),
                )
                .with(
                    qmk.not()
                        .and(&terminal.not())
                        .and(&rec.not())
                        .and(&quick.not()),
                    Action::new("groog.find"),
                ),
        )
        // Not terminal_visible: outside find mode ctrl+r should keep searching
        // shell history
        .bind(
            ctrl("r"),
            if_else(
                &terminal_find,
                Action::new("groog.terminal.reverseFind"),
                Action::new("groog.reverseFind"),
            )?,
        )
        .bind(
            shift(ENTER),
            Bindings::new()
                .with(&find, Action::new("editor.action.previousMatchFindAction"))
                .with(&terminal_find, Action::new("groog.terminal.reverseFind")),
        )
        .bind(
            ENTER,
            Bindings::new()
                .with(&terminal_find, Action::new("groog.terminal.find"))
                .with(&find, Action::new("editor.action.nextMatchFindAction"))
                // Recorded so macros replay newlines; tab is left alone since its
                // width depends on the file type
                .with(&rec, type_text("\n")),
        )
        .bind(SPACE, text_only(type_text(" ")))
        .bind(shift(SPACE), text_only(type_text(" ")))
        .bind(alt("r"), find_toggler("Regex", None, Bindings::new()))
        .bind(
            alt("c"),
            find_toggler("CaseSensitive", None, Bindings::new()),
        )
        .bind(alt("w"), find_toggler("WholeWord", None, Bindings::new()))
        .bind(alt(shift("c")), unconditional("togglePreserveCase"))
        .bind(
            alt("f4"),
            find_toggler(
                "WholeWord",
                Some(&qmk),
                only_when(
                    notification("Run alt+shift+f4 to close the window"),
                    qmk.not(),
                ),
            ),
        )
        .bind(
            alt(shift("f4")),
            unconditional("workbench.action.closeWindow"),
        )
        // ====================================================================
        // Emacs
        // ====================================================================
        .bind(ctrl("w"), unconditional("groog.yank"))
        .bind(
            ctrl("j"),
            Bindings::new()
                .with(&find, Action::new("groog.find.toggleReplaceMode"))
                .with(
                    find.not().and(&panel),
                    Action::new("workbench.action.previousPanelView"),
                )
                .with(
                    find.not().and(&panel.not()),
                    Action::new("groog.toggleMarkMode"),
                ),
        )
        .bind(ctrl("y"), unconditional("groog.emacsPaste"))
        .bind(ctrl(shift("k")), unconditional("editor.action.replaceAll"))
        .bind(
            ctrl("k"),
            if_else(
                &find,
                Action::new("editor.action.replaceOne"),
                Action::new("groog.kill"),
            )?,
        )
        .bind(ctrl("l"), ctrl_l_bindings())
        .bind(PAGE_UP, ctrl_l_bindings())
        .bind(ctrl("v"), ctrl_v_bindings()?)
        .bind(PAGE_DOWN, ctrl_v_bindings()?)
        .bind(ctrl(shift("p")), unconditional("groog.find.previous"))
        .bind(alt("s"), unconditional("groog.find.toggleSimpleMode"))
        .bind(shift(UP), only_when("groog.find.previous", qmk.and(&find)))
        .bind(ctrl("p"), up_bindings())
        .bind(UP, up_bindings())
        .bind(ctrl("n"), down_bindings())
        .bind(DOWN, down_bindings())
        .bind(LEFT, left_bindings())
        .bind(ctrl("b"), left_bindings())
        .bind(
            ctrl("m"),
            only_when(
                "workbench.action.quickPickManyToggle",
                quick.and(&list_supports_multiselect()),
            )
            // Never enter tab focus mode
            .with(When::always(), unbind("editor.action.toggleTabFocusMode")),
        )
        .bind(
            RIGHT,
            only_when("groog.cursorRight", text_focus.and(&quick.not())),
        )
        .bind(HOME, text_only("groog.cursorHome"))
        .bind(
            ctrl("a"),
            keyboard_split(
                Action::new("groog.cursorHome"),
                Action::new("editor.action.selectAll"),
            )?,
        )
        .bind(ctrl(shift("a")), unconditional("editor.action.selectAll"))
        .bind(ctrl(shift(HOME)), unconditional("editor.action.selectAll"))
        .bind(shift(HOME), unconditional("editor.action.selectAll"))
        .bind(END, text_only("groog.cursorEnd"))
        .bind(ctrl("e"), unconditional("groog.cursorEnd"))
        .bind(alt("f"), unconditional("groog.cursorWordRight"))
        .bind(
            ctrl("g"),
            Bindings::new()
                .with(
                    side_bar_focus()
                        .not()
                        .and(&quick.not().and(&suggest.not())),
                    Action::new("groog.ctrlG"),
                )
                .with(
                    side_bar_focus().and(&quick.not().and(&suggest.not())),
                    Action::new("workbench.action.focusActiveEditorGroup"),
                )
                .with(
                    quick.and(&suggest.not()),
                    Action::new("workbench.action.closeQuickOpen"),
                )
                .with(&suggest, Action::new("hideSuggestWidget")),
        )
        .bind(ctrl("/"), panel_split(None, Action::new("groog.undo"))?)
        .bind(
            ctrl(shift("/")),
            panel_split(None, Action::new("groog.redo"))?,
        )
        .bind(ctrl(RIGHT), text_only("groog.cursorWordRight"))
        .bind(alt("b"), unconditional("groog.cursorWordLeft"))
        .bind(ctrl(LEFT), text_only("groog.cursorWordLeft"))
        .bind(ctrl_x("p"), unconditional("groog.cursorTop"))
        .bind(ctrl_x("s"), unconditional("workbench.action.files.save"))
        .bind(
            ctrl("h"),
            if_else(
                &viewlet,
                Action::new("search.action.remove"),
                Action::new("groog.deleteLeft"),
            )?,
        )
        .bind(
            BACKSPACE,
            text_only("groog.deleteLeft").with(
                viewlet.and(&list_focus()),
                Action::new("search.action.remove"),
            ),
        )
        .bind(
            ctrl("d"),
            if_else(
                &viewlet,
                Action::new("search.action.remove"),
                Action::new("groog.deleteRight"),
            )?,
        )
        .bind(
            DELETE,
            text_only("groog.deleteRight").with(
                viewlet.and(&list_focus()),
                Action::new("search.action.remove"),
            ),
        )
        .bind(alt("h"), unconditional("groog.deleteWordLeft"))
        .bind(alt(BACKSPACE), text_only("groog.deleteWordLeft"))
        // The terminal side needs the shell to bind ctrl+x ctrl+h to
        // backward-kill-word
        .bind(
            ctrl(BACKSPACE),
            Bindings::new()
                .with(qmk.and(&panel_focus()), send_sequence("\u{18}\u{8}"))
                .with(&text_focus, Action::new("groog.deleteWordLeft")),
        )
        .bind(alt("d"), unconditional("groog.deleteWordRight"))
        .bind(alt(DELETE), text_only("groog.deleteWordRight"))
        .bind(ctrl(DELETE), text_only("groog.deleteWordRight"))
        .bind(alt("x"), unconditional("workbench.action.showCommands"))
        .bind(ctrl_x("l"), unconditional("workbench.action.gotoLine"))
        .bind(ctrl(";"), unconditional("editor.action.commentLine"))
        // ====================================================================
        // File navigation
        // ====================================================================
        .bind(ctrl_x("f"), unconditional("workbench.action.quickOpen"))
        .bind(
            ctrl_x("v"),
            unconditional(sequence_of(&["workbench.action.splitEditorDown"])),
        )
        .bind(ctrl_z("v"), unconditional("faves.toggle"))
        .bind(ctrl_z(PAGE_DOWN), only_when("faves.toggle", &qmk))
        .bind(ctrl_z("f"), unconditional("faves.search"))
        .bind(ctrl_z(RIGHT), only_when("faves.search", &qmk))
        .bind(
            ctrl_x("h"),
            unconditional(sequence_of(&["workbench.action.splitEditorRight"])),
        )
        .bind(
            ctrl(shift("n")),
            if_else(
                &find,
                Action::new("groog.find.next"),
                Action::new("workbench.action.files.newUntitledFile"),
            )?,
        )
        // The QMK layer sends shift+down for ctrl+shift+n
        .bind(
            shift(DOWN),
            Bindings::new()
                .with(qmk.and(&find), Action::new("groog.find.next"))
                .with(
                    qmk.and(&find.not()),
                    Action::new("workbench.action.files.newUntitledFile"),
                ),
        )
        .bind(ctrl_x("d"), unconditional("editor.action.revealDefinition"))
        .bind(ctrl(shift("d")), reveal_in_new_editor())
        .bind(shift(DELETE), reveal_in_new_editor())
        .bind(ctrl(PAGE_UP), prev_tab()?)
        .bind(ctrl(PAGE_DOWN), next_tab()?)
        .bind(ctrl("u"), prev_tab()?)
        .bind(ctrl("o"), next_tab()?)
        .bind(ctrl(shift(TAB)), prev_tab()?)
        .bind(ctrl(TAB), next_tab()?)
        // Re-opens the previously opened file
        .bind(
            ctrl_x("b"),
            unconditional(sequence_of(&[
                "workbench.action.openPreviousEditorFromHistory",
                "workbench.action.acceptSelectedQuickOpenItem",
            ])),
        )
        // ====================================================================
        // Recording
        // ====================================================================
        .bind(ctrl_x("x"), unconditional("groog.record.startRecording"))
        .bind(
            alt("e"),
            recording_split(
                Action::new("groog.record.endRecording"),
                Action::new("groog.record.playRecording"),
            )?,
        )
        .bind(
            alt(shift("e")),
            recording_split(
                Action::new("groog.record.saveRecordingAs"),
                Action::new("groog.record.playNamedRecording"),
            )?,
        )
        .bind(
            alt(shift("d")),
            unconditional("groog.record.deleteRecording"),
        )
        .bind(
            ctrl(shift("s")),
            Bindings::new()
                .with(qmk.not().and(&rec), Action::new("groog.record.find"))
                .with(
                    qmk.not().and(&rec.not()),
                    Action::new("workbench.action.findInFiles"),
                ),
        )
        .bind(
            ctrl(shift("f")),
            Bindings::new()
                .with(qmk.and(&rec), Action::new("groog.record.find"))
                .with(
                    qmk.and(&rec.not()),
                    Action::new("workbench.action.findInFiles"),
                ),
        )
        // ====================================================================
        // Terminal and panels
        // ====================================================================
        .bind(
            ctrl_x("q"),
            unconditional("workbench.action.toggleSidebarVisibility"),
        )
        .bind(ctrl_x("z"), unconditional("workbench.action.togglePanel"))
        // Killing a terminal takes ctrl+shift+q; ctrl+q only explains how
        .bind(
            ctrl("q"),
            panel_split(
                notification("Run ctrl+shift+q to kill the terminal"),
                Action::new("workbench.action.closeEditorsAndGroup"),
            )?,
        )
        .bind(
            ctrl(shift("q")),
            panel_split(Action::new("workbench.action.terminal.kill"), None)?,
        )
        .bind(
            ctrl_x("n"),
            panel_split(
                Action::new("workbench.action.terminal.rename"),
                Action::new("groog.cursorBottom"),
            )?,
        )
        .bind(
            ctrl("t"),
            panel_split(
                sequence_of(&["groog.ctrlG", "termin-all-or-nothing.closePanel"]),
                sequence_of(&["groog.ctrlG", "termin-all-or-nothing.openPanel"]),
            )?,
        )
        // alt+t on the QMK keyboard sends ctrl+shift+t
        .bind(ctrl(shift("t")), alt_t()?)
        .bind(alt("t"), alt_t()?)
        .bind(
            alt(shift("t")),
            unconditional("workbench.action.terminal.newWithProfile"),
        )
        // ctrl+x ctrl+c never reaches the terminal, so copy explicitly
        .bind(
            ctrl_x("c"),
            panel_split(
                sequence([
                    notification("Terminal output copied!"),
                    Action::new("workbench.action.terminal.copyLastCommandOutput"),
                ]),
                None,
            )?,
        )
        .bind(ctrl_z("c"), unconditional("groog.copyFilename"))
        // ctrl+/ as the terminal sees it (octal 037)
        .bind(ctrl("z"), panel_split(send_sequence("\u{1f}"), None)?)
        // ====================================================================
        // Formatting
        // ====================================================================
        .bind(ctrl_x(TAB), unconditional("groog.format"))
        .bind(ctrl("i"), unconditional("editor.action.indentLines"))
        .bind(
            ctrl(shift("i")),
            unconditional("editor.action.outdentLines"),
        )
        .bind(ctrl_x("i"), unconditional("editor.action.organizeImports"))
        .bind(alt("i"), unconditional("groog.indentToPreviousLine"))
        .bind(
            alt(shift("i")),
            unconditional("groog.indentToNextLine").with(
                &text_focus,
                unbind("editor.action.insertCursorAtEndOfEachLineSelected"),
            ),
        )
        // ====================================================================
        // Pasting
        // ====================================================================
        .bind(ctrl_x("y"), paste()?)
        // ctrl+x ctrl+y on the QMK keyboard
        .bind(ctrl("x shift+insert"), paste()?)
        .bind(alt("y"), paste()?)
        // ====================================================================
        // Settings
        // ====================================================================
        .bind(
            ctrl("."),
            settings_split("workbench.action.openGlobalKeybindings")?,
        )
        .bind(
            ctrl_x("."),
            settings_split("workbench.action.openGlobalKeybindingsFile")?,
        )
        .bind(ctrl(","), settings_split("workbench.action.openSettings")?)
        .bind(
            ctrl_x(","),
            settings_split("workbench.action.openSettingsJson")?,
        )
        // ====================================================================
        // Languages and git
        // ====================================================================
        .bind(
            ctrl_x("m"),
            only_when(
                "markdown.showPreviewToSide",
                Atom::new("editorLangId == 'markdown'"),
            ),
        )
        .bind(alt("z"), unconditional("git.revertSelectedRanges"))
        .bind(
            alt("p"),
            unconditional("workbench.action.editor.previousChange"),
        )
        .bind(
            alt("n"),
            unconditional("workbench.action.editor.nextChange"),
        )
        .bind(
            alt(shift("p")),
            unconditional(sequence_of(&[
                "editor.action.marker.prevInFiles",
                "closeMarkersNavigation",
            ])),
        )
        .bind(
            alt(shift("n")),
            unconditional(sequence_of(&[
                "editor.action.marker.nextInFiles",
                "closeMarkersNavigation",
            ])),
        )
        // go.test.package only focuses the panel once the tests finish
        .bind(
            ctrl_x("t"),
            unconditional(sequence([
                Action::new("go.test.package").run_async(),
                Action::new("workbench.action.focusPanel").delayed(250),
            ])),
        )
        // ====================================================================
        // Miscellaneous
        // ====================================================================
        .bind(ctrl_x("r"), unconditional("workbench.action.reloadWindow"))
        // Stray alt+g on the QMK keyboard shouldn't focus the menu bar
        .bind(alt("g"), unconditional("noop"))
        .bind(ctrl_x("o"), unconditional("workbench.action.openRecent"))
        // ctrl+shift+l in QMK mode
        .bind(
            shift(PAGE_UP),
            only_when("editor.action.selectHighlights", editor_focus()),
        )
        .bind(ctrl_x("k"), unconditional("groog.toggleQMK"))
        .bind(
            ctrl_x("e"),
            unconditional(sequence_of(&[
                "workbench.view.extensions",
                "workbench.extensions.action.checkForUpdates",
            ])),
        );

    Ok(table)
}

/// Toggle a find option in whichever find UI is focused
///
/// With `context`, every entry is additionally gated on it. `extra` entries are
/// layered on top.
fn find_toggler(suffix: &str, context: Option<&Atom>, extra: Bindings) -> Bindings {
    let toggle = format!("groog.find.toggle{}", suffix);
    let toggle_with = |host: String| sequence_of(&[toggle.as_str(), host.as_str()]);
    let gate = |when: When| match context {
        Some(context) => context.and(&when),
        None => when,
    };

    let neither = editor_focus()
        .not()
        .and(&in_search_editor().not())
        .and(&search_viewlet_focus().not());

    Bindings::new()
        .with(
            gate(editor_focus().into()),
            toggle_with(format!("toggleFind{}", suffix)),
        )
        .with(
            gate(in_search_editor().into()),
            toggle_with(format!("toggleSearchEditor{}", suffix)),
        )
        .with(
            gate(search_viewlet_focus().into()),
            toggle_with(format!("toggleSearch{}", suffix)),
        )
        .with(
            gate(neither),
            toggle_with(format!("toggleSearch{}", suffix)),
        )
        .merge(extra)
}

fn ctrl_l_bindings() -> Bindings {
    let quick = in_quick_open();
    Bindings::new()
        .with(
            &quick,
            sequence_of(&repeat(
                "workbench.action.quickOpenNavigatePreviousInFilePicker",
                5,
            )),
        )
        .with(
            active_panel().and(&quick.not()),
            Action::new("workbench.action.nextPanelView"),
        )
        .with(
            active_panel().not().and(&quick.not()),
            Action::new("groog.jump"),
        )
}

fn ctrl_v_bindings() -> Result<Bindings, KeymapError> {
    if_else(
        &in_quick_open(),
        sequence_of(&repeat(
            "workbench.action.quickOpenNavigateNextInFilePicker",
            5,
        )),
        Action::new("groog.fall"),
    )
}

fn up_bindings() -> Bindings {
    let text_focus = editor_text_focus();
    let suggest = suggest_widget_visible();
    Bindings::new()
        .with(
            terminal_find_mode(),
            Action::new("groog.terminal.reverseFind"),
        )
        .with(When::always(), unbind("workbench.action.quickOpen"))
        .with(
            text_focus.and(&suggest.not()),
            Action::new("groog.cursorUp"),
        )
        .with(
            text_focus.and(&suggest),
            Action::new("selectPrevSuggestion"),
        )
        .with(
            in_quick_open(),
            Action::new("workbench.action.quickOpenNavigatePreviousInFilePicker"),
        )
        .with(
            find_mode(),
            Action::new("editor.action.previousMatchFindAction"),
        )
        .with(search_viewlet_focus(), Action::new("list.focusUp"))
}

fn down_bindings() -> Bindings {
    let text_focus = editor_text_focus();
    let suggest = suggest_widget_visible();
    Bindings::new()
        .with(terminal_find_mode(), Action::new("groog.terminal.find"))
        .with(
            When::always(),
            unbind("workbench.action.files.newUntitledFile"),
        )
        .with(
            text_focus.and(&suggest.not()),
            Action::new("groog.cursorDown"),
        )
        .with(
            text_focus.and(&suggest),
            Action::new("selectNextSuggestion"),
        )
        .with(
            in_quick_open(),
            Action::new("workbench.action.quickOpenNavigateNextInFilePicker"),
        )
        .with(
            find_mode(),
            Action::new("editor.action.nextMatchFindAction"),
        )
        .with(
            search_input_box_focus(),
            Action::new("search.action.focusSearchList"),
        )
        .with(
            search_input_box_focus()
                .not()
                .and(&search_viewlet_focus()),
            Action::new("list.focusDown"),
        )
}

// Left only moves the cursor; in quick open it edits the query text
fn left_bindings() -> Bindings {
    only_when(
        "groog.cursorLeft",
        editor_text_focus().and(&in_quick_open().not()),
    )
}

fn paste() -> Result<Bindings, KeymapError> {
    if_else(
        &editor_text_focus(),
        Action::new("groog.paste"),
        Action::new("editor.action.clipboardPasteAction"),
    )
}

fn prev_tab() -> Result<Bindings, KeymapError> {
    terminal_panel_split(
        Action::new("workbench.action.terminal.focusPrevious"),
        Action::new("workbench.action.terminal.focus"),
        Action::new("groog.focusPreviousEditor"),
    )
}

fn next_tab() -> Result<Bindings, KeymapError> {
    terminal_panel_split(
        Action::new("workbench.action.terminal.focusNext"),
        Action::new("workbench.action.terminal.focus"),
        Action::new("groog.focusNextEditor"),
    )
}

/// New terminal in a panel; elsewhere re-run the last shell command
fn alt_t() -> Result<Bindings, KeymapError> {
    panel_split(
        Action::new("workbench.action.terminal.newInActiveWorkspace"),
        sequence([
            send_sequence("\u{1b}[A\u{d}"),
            Action::new("terminal.focus"),
        ]),
    )
}

fn reveal_in_new_editor() -> Bindings {
    unconditional(sequence_of(&[
        "workbench.action.splitEditorRight",
        "editor.action.revealDefinition",
    ]))
}

/// Open a settings view, closing the panel first if one is visible
fn settings_split(command: &str) -> Result<Bindings, KeymapError> {
    panel_split(
        sequence_of(&["workbench.action.closePanel", command]),
        Action::new(command),
    )
}
