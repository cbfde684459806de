use nalgebra_glm::{vec4, Vec4};

use crate::{logging::LoggingConfig, shader::ShaderSources};

pub const VERTEX_SHADER: &str = r#"#version 410 core
layout (location = 0) in vec3 aPos;
void main()
{
   gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
"#;

pub const FRAGMENT_SHADER: &str = r#"#version 410 core
out vec4 FragColor;
void main()
{
   FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
"#;

/// Everything the program would otherwise keep in globals.
#[derive(Debug, Clone)]
pub struct Config {
    pub window: WindowConfig,
    pub shaders: ShaderSources,
    pub clear_color: Vec4,
    pub polygon_mode: PolygonMode,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            shaders: ShaderSources::new(VERTEX_SHADER, FRAGMENT_SHADER),
            clear_color: vec4(0.2, 0.3, 0.3, 1.0),
            polygon_mode: PolygonMode::Line,
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Requested core-profile version, `(major, minor)`.
    pub gl_version: (u8, u8),
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "LearnOpenGL".to_owned(),
            width: 800,
            height: 600,
            gl_version: (4, 1),
            vsync: true,
        }
    }
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonMode {
    Line = gl::LINE,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_tutorial_window() {
        let config = Config::default();

        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.window.title, "LearnOpenGL");
        assert_eq!(config.window.gl_version, (4, 1));
        assert_eq!(config.polygon_mode, PolygonMode::Line);
        assert_eq!(config.clear_color, vec4(0.2, 0.3, 0.3, 1.0));
    }

    #[test]
    fn wireframe_mode_maps_to_gl_line() {
        assert_eq!(PolygonMode::Line as u32, gl::LINE);
    }

    #[test]
    fn shader_sources_share_a_version_tag() {
        assert!(VERTEX_SHADER.starts_with("#version 410 core\n"));
        assert!(FRAGMENT_SHADER.starts_with("#version 410 core\n"));
        assert!(VERTEX_SHADER.contains("layout (location = 0) in vec3 aPos;"));
        assert!(FRAGMENT_SHADER.contains("out vec4 FragColor;"));
    }
}
