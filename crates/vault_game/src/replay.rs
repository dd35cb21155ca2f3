use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use vault_core::input::{InputSource, Key};

#[derive(Debug, Deserialize, Clone)]
pub struct InputScript {
    pub frames: Vec<ScriptFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScriptFrame {
    #[serde(default)]
    pub keys: Vec<Key>,
    #[serde(default)]
    pub quit: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

/// Input for one scripted frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptedInput {
    held: HashSet<Key>,
    quit: bool,
}

impl InputSource for ScriptedInput {
    fn is_quit_requested(&self) -> bool {
        self.quit || self.held.contains(&Key::Escape)
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

impl InputScript {
    pub fn expanded_inputs(&self) -> Vec<ScriptedInput> {
        let mut out = Vec::new();
        for frame in &self.frames {
            let input = ScriptedInput {
                held: frame.keys.iter().copied().collect(),
                quit: frame.quit,
            };
            for _ in 0..frame.repeat.max(1) {
                out.push(input.clone());
            }
        }
        out
    }
}

pub fn load_script_from_path(path: &Path) -> Result<InputScript, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let script: InputScript = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse input script JSON {}: {e}", path.display()))?;
    validate_script(&script)?;
    Ok(script)
}

fn validate_script(script: &InputScript) -> Result<(), String> {
    if script.frames.is_empty() {
        return Err("Input script validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::{Game, LoopControl};
    use crate::level::LevelKind;
    use crate::test_support::RecordingRenderer;
    use glam::Vec2;
    use std::time::{SystemTime, UNIX_EPOCH};
    use vault_core::time::{Clock, ManualClock};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "vault_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn load_inline(name_hint: &str, body: &str) -> InputScript {
        let path = temp_file_path(name_hint);
        fs::write(&path, body).expect("write input script");
        let script = load_script_from_path(&path).expect("script should load");
        let _ = fs::remove_file(path);
        script
    }

    struct Run {
        game: Game,
        frames_run: usize,
        quit: bool,
    }

    fn play(inputs: &[ScriptedInput]) -> Run {
        let mut clock = ManualClock::new();
        let mut renderer = RecordingRenderer::default();
        let mut game = Game::new(GameConfig::default(), clock.now());
        let mut frames_run = 0;
        for input in inputs {
            if game.run_frame(input, &mut renderer, &mut clock) == LoopControl::Quit {
                return Run {
                    game,
                    frames_run,
                    quit: true,
                };
            }
            frames_run += 1;
        }
        Run {
            game,
            frames_run,
            quit: false,
        }
    }

    fn player_center(game: &Game) -> Option<Vec2> {
        let id = game.current_level()?.player()?;
        game.world().get(id).map(|e| e.rect.center())
    }

    #[test]
    fn script_file_parses_and_expands() {
        let script = load_inline(
            "parse",
            r#"{
              "frames": [
                { "keys": ["right", "down"], "repeat": 3 },
                { "keys": [] },
                { "quit": true }
              ]
            }"#,
        );
        let expanded = script.expanded_inputs();
        assert_eq!(expanded.len(), 5);
        assert!(expanded[0].is_key_down(Key::Right));
        assert!(expanded[2].is_key_down(Key::Down));
        assert!(!expanded[3].is_key_down(Key::Right));
        assert!(expanded[4].is_quit_requested());
    }

    #[test]
    fn empty_script_is_rejected() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write input script");
        let err = load_script_from_path(&path).expect_err("empty script must fail");
        assert!(err.contains("frames list is empty"), "{err}");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn unknown_key_is_a_parse_error() {
        let path = temp_file_path("bad_key");
        fs::write(&path, r#"{ "frames": [{ "keys": ["jump"] }] }"#).expect("write input script");
        let err = load_script_from_path(&path).expect_err("unknown key must fail");
        assert!(err.contains("Failed to parse input script JSON"), "{err}");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn open_field_run_pins_player_to_the_corner() {
        // The first level's spawn corner is outside the vault walls, so the
        // player can run along the display edges unobstructed.
        let script = load_inline(
            "corner",
            r#"{
              "frames": [
                { "keys": ["right"], "repeat": 200 },
                { "keys": ["down"], "repeat": 100 }
              ]
            }"#,
        );
        let run = play(&script.expanded_inputs());
        assert_eq!(run.frames_run, 300);
        assert!(!run.quit);
        assert_eq!(run.game.current_kind(), LevelKind::Entrance);
        assert_eq!(player_center(&run.game), Some(Vec2::new(1260.0, 705.0)));
    }

    #[test]
    fn quit_frame_stops_the_run() {
        let script = load_inline(
            "quit",
            r#"{
              "frames": [
                { "keys": ["right"], "repeat": 5 },
                { "quit": true },
                { "keys": ["right"], "repeat": 5 }
              ]
            }"#,
        );
        let run = play(&script.expanded_inputs());
        assert!(run.quit);
        assert_eq!(run.frames_run, 5);
        assert_eq!(player_center(&run.game), Some(Vec2::new(60.0, 15.0)));
    }

    #[test]
    fn escape_key_requests_quit() {
        let script = load_inline("escape", r#"{ "frames": [{ "keys": ["escape"] }] }"#);
        let run = play(&script.expanded_inputs());
        assert!(run.quit);
        assert_eq!(run.frames_run, 0);
    }

    #[test]
    fn replay_run_is_deterministic() {
        let script = load_inline(
            "deterministic",
            r#"{
              "frames": [
                { "keys": ["right", "down"], "repeat": 40 },
                { "keys": ["down"], "repeat": 60 },
                { "keys": ["left", "up"], "repeat": 25 },
                { "keys": ["right"], "repeat": 90 }
              ]
            }"#,
        );
        let inputs = script.expanded_inputs();
        let run_a = play(&inputs);
        let run_b = play(&inputs);

        assert_eq!(run_a.game.current_index(), run_b.game.current_index());
        assert_eq!(player_center(&run_a.game), player_center(&run_b.game));
        let ids_a: Vec<_> = run_a.game.world().ids().collect();
        let ids_b: Vec<_> = run_b.game.world().ids().collect();
        assert_eq!(ids_a, ids_b);
    }
}
