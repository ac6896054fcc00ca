//! Embedded instruction templates for the three generation calls.

use include_dir::{Dir, include_dir};
use minijinja::{Environment, Value};

use crate::domain::AppError;

static PROMPTS_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/src/assets/prompts");

pub const ANALYZE_SCENE: &str = "analyze_scene.j2";
pub const STORYBOARD: &str = "storyboard.j2";
pub const SINGLE_SHOT: &str = "single_shot.j2";

fn build_environment() -> Result<Environment<'static>, AppError> {
    let mut env = Environment::new();

    for file in PROMPTS_DIR.files() {
        let (Some(name), Some(source)) = (file.path().to_str(), file.contents_utf8()) else {
            continue;
        };
        env.add_template(name, source).map_err(|e| AppError::PromptRender {
            template: name.to_string(),
            details: e.to_string(),
        })?;
    }

    Ok(env)
}

/// Render the named template with `ctx`.
pub fn render(template_name: &str, ctx: Value) -> Result<String, AppError> {
    let env = build_environment()?;
    let render_error = |e: minijinja::Error| AppError::PromptRender {
        template: template_name.to_string(),
        details: e.to_string(),
    };

    let template = env.get_template(template_name).map_err(render_error)?;
    template.render(ctx).map_err(render_error)
}
