//! Key bindings - physical keys to logical actions

use crate::messages::KeyPress;

/// Logical actions, independent of the physical key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    TabRight,
    TabLeft,
    ListNext,
    ListPrev,
    ListAdd,
    ListDelete,
    EditUrl,
    Confirm,
    ToggleQuerySelector,
    Unfocus,
    ToggleHelp,
    Quit,
}

/// A binding as shown in the help footer
pub struct Binding {
    pub action: Action,
    pub key: &'static str,
    pub help: &'static str,
}

pub const BINDINGS: &[Binding] = &[
    Binding { action: Action::TabLeft, key: "←", help: "change open tab" },
    Binding { action: Action::TabRight, key: "→", help: "change open tab" },
    Binding { action: Action::ListPrev, key: "↑", help: "focus previous item" },
    Binding { action: Action::ListNext, key: "↓", help: "focus next item" },
    Binding { action: Action::ListAdd, key: "z", help: "add new item" },
    Binding { action: Action::ListDelete, key: "x", help: "delete focused item" },
    Binding { action: Action::EditUrl, key: "u", help: "edit url" },
    Binding { action: Action::Confirm, key: "enter", help: "send request / confirm" },
    Binding { action: Action::ToggleQuerySelector, key: "tab", help: "select query" },
    Binding { action: Action::Unfocus, key: "esc", help: "unfocus text input" },
    Binding { action: Action::ToggleHelp, key: "?", help: "toggle help" },
    Binding { action: Action::Quit, key: "q/ctrl+c", help: "quit" },
];

/// Bindings shown when help is collapsed
pub const SHORT_HELP: &[Action] = &[Action::ToggleHelp, Action::Quit];

/// Map a key pressed outside any text editor to its action
pub fn action_for(key: KeyPress) -> Option<Action> {
    match key {
        KeyPress::Right => Some(Action::TabRight),
        KeyPress::Left => Some(Action::TabLeft),
        KeyPress::Down => Some(Action::ListNext),
        KeyPress::Up => Some(Action::ListPrev),
        KeyPress::Char('z') => Some(Action::ListAdd),
        KeyPress::Char('x') => Some(Action::ListDelete),
        KeyPress::Char('u') => Some(Action::EditUrl),
        KeyPress::Enter => Some(Action::Confirm),
        KeyPress::Tab => Some(Action::ToggleQuerySelector),
        KeyPress::Esc => Some(Action::Unfocus),
        KeyPress::Char('?') => Some(Action::ToggleHelp),
        KeyPress::Char('q') | KeyPress::CtrlC => Some(Action::Quit),
        _ => None,
    }
}

pub fn binding(action: Action) -> Option<&'static Binding> {
    BINDINGS.iter().find(|b| b.action == action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_has_a_binding() {
        let actions = [
            Action::TabRight,
            Action::TabLeft,
            Action::ListNext,
            Action::ListPrev,
            Action::ListAdd,
            Action::ListDelete,
            Action::EditUrl,
            Action::Confirm,
            Action::ToggleQuerySelector,
            Action::Unfocus,
            Action::ToggleHelp,
            Action::Quit,
        ];
        for action in actions {
            assert!(binding(action).is_some(), "{:?} has no binding", action);
        }
    }

    #[test]
    fn test_action_for() {
        assert_eq!(action_for(KeyPress::Enter), Some(Action::Confirm));
        assert_eq!(action_for(KeyPress::CtrlC), Some(Action::Quit));
        assert_eq!(action_for(KeyPress::Char('k')), None);
        assert_eq!(action_for(KeyPress::Backspace), None);
    }
}
