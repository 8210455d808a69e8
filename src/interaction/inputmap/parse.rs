use super::types::*;
use bevy::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ParsedBindings {
    pub bindings: Vec<Binding>,
    pub errors: Vec<String>,
}

#[derive(Debug, serde::Deserialize)]
struct RootToml {
    bindings: Option<HashMap<String, Vec<String>>>,
}

/// Parses `[bindings]` tables of `Action = ["Key", ...]`. Unknown actions and
/// keys are reported and skipped; everything valid is kept.
pub fn parse_input_toml(raw: &str) -> ParsedBindings {
    let mut result = ParsedBindings::default();
    let root: RootToml = match toml::from_str(raw) {
        Ok(r) => r,
        Err(e) => {
            result.errors.push(format!("Top-level parse: {e}"));
            return result;
        }
    };
    let Some(table) = root.bindings else {
        result.errors.push("Missing [bindings] table".into());
        return result;
    };
    // Sorted for a stable binding order regardless of map iteration.
    let mut entries: Vec<_> = table.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    for (action_name, keys) in entries {
        let Some(action) = ControlAction::from_name(&action_name) else {
            result
                .errors
                .push(format!("Binding references unknown action '{action_name}'"));
            continue;
        };
        for spec in keys {
            match parse_keycode(spec.trim()) {
                Ok(key) => {
                    if result.bindings.iter().any(|b| b.key == key) {
                        result
                            .errors
                            .push(format!("[binding {action_name} '{spec}'] key already bound"));
                        continue;
                    }
                    result.bindings.push(Binding { key, action });
                }
                Err(err) => result.errors.push(format!("[binding {action_name} '{spec}'] {err}")),
            }
        }
    }
    result
}

fn parse_keycode(name: &str) -> Result<KeyCode, String> {
    let name = name.strip_prefix("Key:").unwrap_or(name);
    let kc = match name {
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Escape" | "Esc" => KeyCode::Escape,
        "Tab" => KeyCode::Tab,
        "ArrowUp" | "Up" => KeyCode::ArrowUp,
        "ArrowDown" | "Down" => KeyCode::ArrowDown,
        "ArrowLeft" | "Left" => KeyCode::ArrowLeft,
        "ArrowRight" | "Right" => KeyCode::ArrowRight,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        "Equal" | "=" => KeyCode::Equal,
        "Minus" | "-" => KeyCode::Minus,
        "BracketLeft" | "[" => KeyCode::BracketLeft,
        "BracketRight" | "]" => KeyCode::BracketRight,
        "Digit0" | "0" => KeyCode::Digit0,
        "Digit1" | "1" => KeyCode::Digit1,
        "Digit2" | "2" => KeyCode::Digit2,
        "Digit3" | "3" => KeyCode::Digit3,
        "Digit4" | "4" => KeyCode::Digit4,
        "Digit5" | "5" => KeyCode::Digit5,
        "Digit6" | "6" => KeyCode::Digit6,
        "Digit7" | "7" => KeyCode::Digit7,
        "Digit8" | "8" => KeyCode::Digit8,
        "Digit9" | "9" => KeyCode::Digit9,
        other => return parse_letter(other),
    };
    Ok(kc)
}

fn parse_letter(name: &str) -> Result<KeyCode, String> {
    const LETTERS: [KeyCode; 26] = [
        KeyCode::KeyA, KeyCode::KeyB, KeyCode::KeyC, KeyCode::KeyD, KeyCode::KeyE,
        KeyCode::KeyF, KeyCode::KeyG, KeyCode::KeyH, KeyCode::KeyI, KeyCode::KeyJ,
        KeyCode::KeyK, KeyCode::KeyL, KeyCode::KeyM, KeyCode::KeyN, KeyCode::KeyO,
        KeyCode::KeyP, KeyCode::KeyQ, KeyCode::KeyR, KeyCode::KeyS, KeyCode::KeyT,
        KeyCode::KeyU, KeyCode::KeyV, KeyCode::KeyW, KeyCode::KeyX, KeyCode::KeyY,
        KeyCode::KeyZ,
    ];
    let letter = name.strip_prefix("Key").unwrap_or(name);
    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            Ok(LETTERS[(c.to_ascii_uppercase() as u8 - b'A') as usize])
        }
        _ => Err(format!("Unsupported KeyCode '{name}' (extend parser)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bindings_and_aliases() {
        let raw = r#"
            [bindings]
            TogglePause = ["Space", "KeyP"]
            SpeedUp = ["Up"]
            RadiusDown = ["-", "q"]
        "#;
        let parsed = parse_input_toml(raw);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        let b = ControlBindings { bindings: parsed.bindings };
        let pause: Vec<_> = b.keys_for(ControlAction::TogglePause).collect();
        assert_eq!(pause, vec![KeyCode::Space, KeyCode::KeyP]);
        let radius: Vec<_> = b.keys_for(ControlAction::RadiusDown).collect();
        assert_eq!(radius, vec![KeyCode::Minus, KeyCode::KeyQ]);
        assert_eq!(b.keys_for(ControlAction::SpeedUp).next(), Some(KeyCode::ArrowUp));
    }

    #[test]
    fn reports_unknown_action_and_key() {
        let raw = r#"
            [bindings]
            Explode = ["Space"]
            SpeedDown = ["Down", "F13"]
            SpeedUp = ["Down"]
        "#;
        let parsed = parse_input_toml(raw);
        let joined = parsed.errors.join("\n");
        assert!(joined.contains("unknown action 'Explode'"), "{joined}");
        assert!(joined.contains("Unsupported KeyCode 'F13'"), "{joined}");
        assert!(joined.contains("key already bound"), "{joined}");
        assert_eq!(parsed.bindings.len(), 1);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let parsed = parse_input_toml("[bindings\nTogglePause = ");
        assert_eq!(parsed.bindings.len(), 0);
        assert!(parsed.errors[0].starts_with("Top-level parse"));
    }
}
