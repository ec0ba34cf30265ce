//! Keyboard input.
//!
//! Maps winit key codes to core [`KeyCode`] values and turns key presses
//! into viewer actions: quitting and hot-reloading the shader program.

use miterline_core::input::KeyCode;
use miterline_graphics::shader::load_program;
use miterline_graphics::{GraphicsError, ShaderProgram, ShaderSource};
use winit::keyboard;

/// Convert a winit [`keyboard::KeyCode`] to a core [`KeyCode`], if a
/// mapping exists.
pub fn map_winit_key(key: keyboard::KeyCode) -> Option<KeyCode> {
    Some(match key {
        // Letters
        keyboard::KeyCode::KeyA => KeyCode::A,
        keyboard::KeyCode::KeyB => KeyCode::B,
        keyboard::KeyCode::KeyC => KeyCode::C,
        keyboard::KeyCode::KeyD => KeyCode::D,
        keyboard::KeyCode::KeyE => KeyCode::E,
        keyboard::KeyCode::KeyF => KeyCode::F,
        keyboard::KeyCode::KeyG => KeyCode::G,
        keyboard::KeyCode::KeyH => KeyCode::H,
        keyboard::KeyCode::KeyI => KeyCode::I,
        keyboard::KeyCode::KeyJ => KeyCode::J,
        keyboard::KeyCode::KeyK => KeyCode::K,
        keyboard::KeyCode::KeyL => KeyCode::L,
        keyboard::KeyCode::KeyM => KeyCode::M,
        keyboard::KeyCode::KeyN => KeyCode::N,
        keyboard::KeyCode::KeyO => KeyCode::O,
        keyboard::KeyCode::KeyP => KeyCode::P,
        keyboard::KeyCode::KeyQ => KeyCode::Q,
        keyboard::KeyCode::KeyR => KeyCode::R,
        keyboard::KeyCode::KeyS => KeyCode::S,
        keyboard::KeyCode::KeyT => KeyCode::T,
        keyboard::KeyCode::KeyU => KeyCode::U,
        keyboard::KeyCode::KeyV => KeyCode::V,
        keyboard::KeyCode::KeyW => KeyCode::W,
        keyboard::KeyCode::KeyX => KeyCode::X,
        keyboard::KeyCode::KeyY => KeyCode::Y,
        keyboard::KeyCode::KeyZ => KeyCode::Z,

        // Function keys
        keyboard::KeyCode::F1 => KeyCode::F1,
        keyboard::KeyCode::F2 => KeyCode::F2,
        keyboard::KeyCode::F3 => KeyCode::F3,
        keyboard::KeyCode::F4 => KeyCode::F4,
        keyboard::KeyCode::F5 => KeyCode::F5,

        // Common
        keyboard::KeyCode::Space => KeyCode::Space,
        keyboard::KeyCode::Enter => KeyCode::Enter,
        keyboard::KeyCode::Escape => KeyCode::Escape,
        keyboard::KeyCode::Tab => KeyCode::Tab,

        _ => return None,
    })
}

/// Parse a key by name, case-insensitively (`r`, `escape`, `f5`, ...).
pub fn parse_key_name(name: &str) -> Option<KeyCode> {
    const LETTERS: [KeyCode; 26] = [
        KeyCode::A,
        KeyCode::B,
        KeyCode::C,
        KeyCode::D,
        KeyCode::E,
        KeyCode::F,
        KeyCode::G,
        KeyCode::H,
        KeyCode::I,
        KeyCode::J,
        KeyCode::K,
        KeyCode::L,
        KeyCode::M,
        KeyCode::N,
        KeyCode::O,
        KeyCode::P,
        KeyCode::Q,
        KeyCode::R,
        KeyCode::S,
        KeyCode::T,
        KeyCode::U,
        KeyCode::V,
        KeyCode::W,
        KeyCode::X,
        KeyCode::Y,
        KeyCode::Z,
    ];

    let name = name.trim().to_ascii_lowercase();
    let key = match name.as_str() {
        "f1" => KeyCode::F1,
        "f2" => KeyCode::F2,
        "f3" => KeyCode::F3,
        "f4" => KeyCode::F4,
        "f5" => KeyCode::F5,
        "space" => KeyCode::Space,
        "enter" | "return" => KeyCode::Enter,
        "escape" | "esc" => KeyCode::Escape,
        "tab" => KeyCode::Tab,
        _ => {
            let [letter] = name.as_bytes() else {
                return None;
            };
            if !letter.is_ascii_lowercase() {
                return None;
            }
            LETTERS[(letter - b'a') as usize]
        }
    };
    Some(key)
}

/// What a key press asked the viewer to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Close the viewer.
    Quit,
    /// The shader program was rebuilt from disk.
    Reloaded,
    /// Rebuilding failed; the previous program stays active.
    ReloadFailed(GraphicsError),
    /// The key has no binding.
    Ignored,
}

/// Routes key presses to viewer actions.
///
/// `Escape` quits; `R` re-reads the shader files and relinks the program,
/// replacing the one currently linked.
pub struct InputDispatcher<'a, P: ShaderProgram + ?Sized> {
    program: &'a mut P,
    source: ShaderSource,
}

impl<'a, P: ShaderProgram + ?Sized> InputDispatcher<'a, P> {
    /// Create a dispatcher that reloads `program` from `source`.
    pub fn new(program: &'a mut P, source: ShaderSource) -> Self {
        Self { program, source }
    }

    /// The shader source the next reload reads from.
    pub fn source(&self) -> &ShaderSource {
        &self.source
    }

    /// Handle a key event. Releases are ignored.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> InputAction {
        if !pressed {
            return InputAction::Ignored;
        }

        match key {
            KeyCode::Escape => InputAction::Quit,
            KeyCode::R => self.reload(),
            _ => InputAction::Ignored,
        }
    }

    fn reload(&mut self) -> InputAction {
        log::info!("Reloading shaders");

        let source = match self.source.reload() {
            Ok(source) => source,
            Err(e) => {
                log::error!("Failed to read shaders: {e}");
                return InputAction::ReloadFailed(e);
            }
        };

        match load_program(&mut *self.program, &source, true) {
            Ok(()) => {
                self.source = source;
                InputAction::Reloaded
            }
            Err(e) => InputAction::ReloadFailed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miterline_graphics::{GlslProgram, ShaderStage, UniformLocation};
    use rstest::rstest;
    use std::path::PathBuf;

    /// Records calls instead of compiling anything.
    #[derive(Default)]
    struct MockProgram {
        shaders: Vec<(ShaderStage, String)>,
        links: Vec<bool>,
        fail_link: bool,
    }

    impl ShaderProgram for MockProgram {
        fn register_shader(
            &mut self,
            stage: ShaderStage,
            source: &str,
        ) -> Result<(), GraphicsError> {
            self.shaders.push((stage, source.to_string()));
            Ok(())
        }

        fn register_program(
            &mut self,
            erase_if_program_registered: bool,
        ) -> Result<(), GraphicsError> {
            self.links.push(erase_if_program_registered);
            if self.fail_link {
                Err(GraphicsError::ShaderCompilationFailed("mock".to_string()))
            } else {
                Ok(())
            }
        }

        fn uniform_location(&self, _name: &str) -> Option<UniformLocation> {
            None
        }

        fn is_linked(&self) -> bool {
            !self.links.is_empty()
        }
    }

    fn temp_shader_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "miterline-{name}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let bundled = ShaderSource::bundled();
        std::fs::write(dir.join("line.vert"), &bundled.vertex).unwrap();
        std::fs::write(dir.join("line.frag"), &bundled.fragment).unwrap();
        dir
    }

    #[rstest]
    #[case::letter(keyboard::KeyCode::KeyR, Some(KeyCode::R))]
    #[case::escape(keyboard::KeyCode::Escape, Some(KeyCode::Escape))]
    #[case::function(keyboard::KeyCode::F5, Some(KeyCode::F5))]
    #[case::unmapped(keyboard::KeyCode::NumLock, None)]
    fn test_map_winit_key(#[case] key: keyboard::KeyCode, #[case] expected: Option<KeyCode>) {
        assert_eq!(map_winit_key(key), expected);
    }

    #[rstest]
    #[case::lower("r", Some(KeyCode::R))]
    #[case::upper("Q", Some(KeyCode::Q))]
    #[case::escape("Escape", Some(KeyCode::Escape))]
    #[case::esc("esc", Some(KeyCode::Escape))]
    #[case::function("F2", Some(KeyCode::F2))]
    #[case::digit("1", None)]
    #[case::word("rr", None)]
    #[case::empty("", None)]
    fn test_parse_key_name(#[case] name: &str, #[case] expected: Option<KeyCode>) {
        assert_eq!(parse_key_name(name), expected);
    }

    #[test]
    fn test_escape_quits() {
        let mut program = MockProgram::default();
        let mut dispatcher = InputDispatcher::new(&mut program, ShaderSource::new("v", "f"));
        assert_eq!(dispatcher.handle_key(KeyCode::Escape, true), InputAction::Quit);
    }

    #[test]
    fn test_release_ignored() {
        let mut program = MockProgram::default();
        let mut dispatcher = InputDispatcher::new(&mut program, ShaderSource::new("v", "f"));
        assert_eq!(dispatcher.handle_key(KeyCode::Escape, false), InputAction::Ignored);
        assert_eq!(dispatcher.handle_key(KeyCode::R, false), InputAction::Ignored);
        assert!(program.links.is_empty());
    }

    #[test]
    fn test_unbound_key_ignored() {
        let mut program = MockProgram::default();
        let mut dispatcher = InputDispatcher::new(&mut program, ShaderSource::new("v", "f"));
        assert_eq!(dispatcher.handle_key(KeyCode::Space, true), InputAction::Ignored);
    }

    #[test]
    fn test_reload_registers_both_stages_with_erase() {
        let mut program = MockProgram::default();
        let mut dispatcher = InputDispatcher::new(&mut program, ShaderSource::new("v", "f"));
        assert_eq!(dispatcher.handle_key(KeyCode::R, true), InputAction::Reloaded);

        assert_eq!(
            program.shaders,
            [
                (ShaderStage::Vertex, "v".to_string()),
                (ShaderStage::Fragment, "f".to_string()),
            ]
        );
        assert_eq!(program.links, [true]);
    }

    #[test]
    fn test_reload_link_failure_reported() {
        let mut program = MockProgram {
            fail_link: true,
            ..MockProgram::default()
        };
        let mut dispatcher = InputDispatcher::new(&mut program, ShaderSource::new("v", "f"));
        assert!(matches!(
            dispatcher.handle_key(KeyCode::R, true),
            InputAction::ReloadFailed(GraphicsError::ShaderCompilationFailed(_))
        ));
    }

    #[test]
    fn test_reload_picks_up_file_changes() {
        let dir = temp_shader_dir("reload");
        let source = ShaderSource::from_dir(&dir).unwrap();
        let mut program = GlslProgram::new();
        load_program(&mut program, &source, false).unwrap();

        let edited = source.fragment.replace("out_color = color;", "out_color = vec4(1.0);");
        std::fs::write(dir.join("line.frag"), &edited).unwrap();

        let mut dispatcher = InputDispatcher::new(&mut program, source);
        assert_eq!(dispatcher.handle_key(KeyCode::R, true), InputAction::Reloaded);
        assert_eq!(dispatcher.source().fragment, edited);
        assert_eq!(program.link_count(), 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_broken_edit_keeps_program() {
        let dir = temp_shader_dir("broken");
        let source = ShaderSource::from_dir(&dir).unwrap();
        let mut program = GlslProgram::new();
        load_program(&mut program, &source, false).unwrap();

        std::fs::write(dir.join("line.vert"), "#version 450\nvoid main() {").unwrap();

        let mut dispatcher = InputDispatcher::new(&mut program, source.clone());
        assert!(matches!(
            dispatcher.handle_key(KeyCode::R, true),
            InputAction::ReloadFailed(_)
        ));
        assert_eq!(dispatcher.source(), &source);
        assert!(program.is_linked());
        assert_eq!(program.link_count(), 1);
        assert!(program.uniform_location("thickness").is_some());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_files_reported() {
        let dir = temp_shader_dir("missing");
        let source = ShaderSource::from_dir(&dir).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        let mut program = MockProgram::default();
        let mut dispatcher = InputDispatcher::new(&mut program, source);
        assert!(matches!(
            dispatcher.handle_key(KeyCode::R, true),
            InputAction::ReloadFailed(GraphicsError::ShaderLoadFailed(_))
        ));
        assert!(program.links.is_empty());
    }
}
