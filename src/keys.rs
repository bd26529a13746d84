//! Keys the root handles before anything else sees them.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    Quit,
    FocusMethod,
    FocusUrl,
    FocusQuery,
    FocusResult,
    Submit,
}

pub fn global_action(key: &KeyEvent) -> Option<GlobalAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(GlobalAction::Quit),
        KeyCode::Esc => Some(GlobalAction::Quit),
        KeyCode::Char('1') if alt => Some(GlobalAction::FocusMethod),
        KeyCode::Char('2') if alt => Some(GlobalAction::FocusUrl),
        KeyCode::Char('3') if alt => Some(GlobalAction::FocusQuery),
        KeyCode::Char('4') if alt => Some(GlobalAction::FocusResult),
        KeyCode::Char('5') if alt => Some(GlobalAction::Submit),
        _ => None,
    }
}

pub fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
