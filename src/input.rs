use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrev,
    SelectUp,
    SelectDown,
    Left,
    Right,
    Confirm,
    Back,
    ScrollUp,
    ScrollDown,
    JumpTop,
    JumpBottom,
    ShowHelp,
    Search,        // /: focus search bar
    CycleLayout,   // p: grid / compact / list
    CycleCategory, // c: category filter
    Admin,         // A: login prompt or admin panel
    New,           // n: new link (also "no" in prompts)
    Edit,          // e: edit selected link
    Delete,        // d / Del: delete selected link
    MoveUp,        // K: reorder up
    MoveDown,      // J: reorder down
    ForceSync,     // S: push snapshot now
    Suggest,       // Ctrl-G: AI metadata suggestion in the link form
    Logout,        // X: leave admin mode
    Yes,           // y: confirm prompt
    Input(char),
    Backspace,
    None,
}

/// Map a key press. `typing` is true while a text field has focus; printable
/// keys then become `Input` instead of commands.
pub fn handle_key(key: KeyEvent, typing: bool) -> Action {
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return Action::Quit;
    }
    if let (KeyCode::Char('g'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return Action::Suggest;
    }

    if typing {
        return match key.code {
            KeyCode::Char(c)   => Action::Input(c),
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Enter     => Action::Confirm,
            KeyCode::Esc       => Action::Back,
            KeyCode::Tab       => Action::FocusNext,
            KeyCode::BackTab   => Action::FocusPrev,
            KeyCode::Up        => Action::SelectUp,
            KeyCode::Down      => Action::SelectDown,
            _                  => Action::None,
        };
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) => Action::Quit,

        (KeyCode::Tab, _)     => Action::FocusNext,
        (KeyCode::BackTab, _) => Action::FocusPrev,

        // Navigation — arrow keys and vim hjkl
        (KeyCode::Up,   _) | (KeyCode::Char('k'), _) => Action::SelectUp,
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Action::SelectDown,
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => Action::Left,
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => Action::Right,

        (KeyCode::Enter, _)     => Action::Confirm,
        (KeyCode::Char('o'), _) => Action::Confirm,
        (KeyCode::Char(' '), _) => Action::Confirm,

        (KeyCode::Esc, _) => Action::Back,

        (KeyCode::PageUp,   _) => Action::ScrollUp,
        (KeyCode::PageDown, _) => Action::ScrollDown,

        (KeyCode::Char('g'), _) | (KeyCode::Home, _) => Action::JumpTop,
        (KeyCode::Char('G'), _) | (KeyCode::End, _)  => Action::JumpBottom,

        (KeyCode::Char('?'), _) | (KeyCode::F(1), _) => Action::ShowHelp,

        (KeyCode::Char('/'), _) => Action::Search,
        (KeyCode::Char('p'), _) => Action::CycleLayout,
        (KeyCode::Char('c'), _) => Action::CycleCategory,
        (KeyCode::Char('A'), _) => Action::Admin,

        // Admin keys
        (KeyCode::Char('n'), _) => Action::New,
        (KeyCode::Char('e'), _) => Action::Edit,
        (KeyCode::Char('d'), _) | (KeyCode::Delete, _) => Action::Delete,
        (KeyCode::Char('K'), _) => Action::MoveUp,
        (KeyCode::Char('J'), _) => Action::MoveDown,
        (KeyCode::Char('S'), _) => Action::ForceSync,
        (KeyCode::Char('X'), _) => Action::Logout,
        (KeyCode::Char('y'), _) => Action::Yes,

        _ => Action::None,
    }
}
