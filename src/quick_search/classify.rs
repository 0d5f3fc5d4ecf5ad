//! Key classification - raw key event to text edit.
//!
//! Pure and stateless. Named keys win over the literal payload because
//! the name is unambiguous; the payload is the fallback for keyboards and
//! terminals that only report characters.

use crate::state::keyboard::KeyboardEvent;

/// Literal characters that mean "delete backward" (DEL and BS).
const BACKSPACE_LITERALS: [&str; 2] = ["\u{7f}", "\u{8}"];

/// Literal characters that would end a line.
const NEWLINE_LITERALS: [&str; 3] = ["\n", "\r", "\r\n"];

/// Edit requested by a single keystroke.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Append the literal to the end of the text.
    Append(String),
    /// Remove the last character.
    DeleteLast,
    /// Empty the text.
    Clear,
    /// Not a quick-search keystroke.
    Ignore,
}

/// Map a key event to the edit it requests.
pub fn classify(event: &KeyboardEvent) -> Action {
    // Shortcuts (copy, paste, menu accelerators) pass through untouched.
    if !event.modifiers.is_empty() {
        return Action::Ignore;
    }

    match event.key.as_str() {
        "Backspace" => return Action::DeleteLast,
        "Escape" => return Action::Clear,
        "Enter" => return Action::Ignore,
        _ => {}
    }

    let text = event.text.as_str();
    if BACKSPACE_LITERALS.contains(&text) {
        Action::DeleteLast
    } else if NEWLINE_LITERALS.contains(&text) || text == "\t" {
        Action::Ignore
    } else if text == " " {
        Action::Append(" ".to_string())
    } else if text.is_empty() || text.chars().any(char::is_control) {
        Action::Ignore
    } else {
        Action::Append(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::keyboard::Modifiers;

    #[test]
    fn test_printable_characters_append() {
        for c in ['a', 'Z', '0', '!', '/', 'é', 'ß', '中'] {
            assert_eq!(classify(&KeyboardEvent::char(c)), Action::Append(c.to_string()));
        }
    }

    #[test]
    fn test_multi_character_literal_appends_whole() {
        let event = KeyboardEvent::named("Unidentified").with_text("👍🏽");
        assert_eq!(classify(&event), Action::Append("👍🏽".to_string()));
    }

    #[test]
    fn test_whitespace_literals() {
        assert_eq!(classify(&KeyboardEvent::char(' ')), Action::Append(" ".to_string()));
        assert_eq!(classify(&KeyboardEvent::char('\t')), Action::Ignore);
        assert_eq!(classify(&KeyboardEvent::char('\n')), Action::Ignore);
        assert_eq!(classify(&KeyboardEvent::char('\r')), Action::Ignore);
    }

    #[test]
    fn test_any_modifier_ignores() {
        let modifier_sets = [
            Modifiers::CTRL,
            Modifiers::ALT,
            Modifiers::SHIFT,
            Modifiers::META,
            Modifiers::CTRL | Modifiers::SHIFT,
        ];
        let events = [
            KeyboardEvent::char('v'),
            KeyboardEvent::char(' '),
            KeyboardEvent::named("Backspace"),
            KeyboardEvent::named("Escape"),
            KeyboardEvent::named("Delete").with_text("\u{7f}"),
        ];

        for modifiers in modifier_sets {
            for event in &events {
                let event = KeyboardEvent { modifiers, ..event.clone() };
                assert_eq!(classify(&event), Action::Ignore, "{:?}", event);
            }
        }
    }

    #[test]
    fn test_named_keys_take_precedence() {
        let backspace = KeyboardEvent::named("Backspace").with_text("x");
        assert_eq!(classify(&backspace), Action::DeleteLast);

        let escape = KeyboardEvent::named("Escape").with_text("\u{1b}");
        assert_eq!(classify(&escape), Action::Clear);

        let enter = KeyboardEvent::named("Enter").with_text("\r");
        assert_eq!(classify(&enter), Action::Ignore);
    }

    #[test]
    fn test_literal_backspace_fallback() {
        let del = KeyboardEvent::named("").with_text("\u{7f}");
        assert_eq!(classify(&del), Action::DeleteLast);

        let bs = KeyboardEvent::named("").with_text("\u{8}");
        assert_eq!(classify(&bs), Action::DeleteLast);
    }

    #[test]
    fn test_bare_carriage_return_is_ignored() {
        let cr = KeyboardEvent::named("").with_text("\r");
        assert_eq!(classify(&cr), Action::Ignore);

        let crlf = KeyboardEvent::named("").with_text("\r\n");
        assert_eq!(classify(&crlf), Action::Ignore);
    }

    #[test]
    fn test_control_and_empty_payloads_ignore() {
        for key in ["ArrowUp", "Home", "F1", "Delete", "Tab", ""] {
            assert_eq!(classify(&KeyboardEvent::named(key)), Action::Ignore, "{}", key);
        }

        let escape_char = KeyboardEvent::named("").with_text("\u{1b}");
        assert_eq!(classify(&escape_char), Action::Ignore);
    }

    #[test]
    fn test_literal_with_embedded_control_is_ignored() {
        for literal in ["a\tb", "x\n", "\u{1b}[A", "ab\r", "\u{0}z"] {
            let event = KeyboardEvent::named("").with_text(literal);
            assert_eq!(classify(&event), Action::Ignore, "{:?}", literal);
        }
    }
}
