use cvgen_core::models::CvData;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::ExportError;
use crate::outline::{Block, build_outline};

const TEMPLATE_NAME: &str = "outline.md";

/// Built-in Markdown rendering of an outline. The context exposes `blocks`
/// (each with `kind`, `text` and, for headings, `level`) and `name`.
pub const DEFAULT_OUTLINE_TEMPLATE: &str = r#"{% for block in blocks -%}
{% if block.kind == "heading" -%}
{% if block.level == 1 %}# {% elif block.level == 2 %}
## {% else %}
### {% endif %}{{ block.text }}
{% elif block.kind == "bullet" -%}
- {{ block.text }}
{% elif block.kind == "detail" -%}
*{{ block.text }}*
{% else -%}
{{ block.text }}
{% endif -%}
{% endfor %}"#;

#[derive(Serialize)]
struct OutlineContext<'a> {
    name: String,
    blocks: &'a [Block],
}

/// Render `data` as a Markdown outline.
///
/// `template` overrides [`DEFAULT_OUTLINE_TEMPLATE`] (Jinja2 syntax). The
/// section order and omission rules are the same as the DOCX export.
pub fn render_outline(
    data: &CvData,
    template: Option<&str>,
    max_entries: usize,
) -> Result<String, ExportError> {
    let blocks = build_outline(data, max_entries);

    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, template.unwrap_or(DEFAULT_OUTLINE_TEMPLATE))
        .map_err(|e| ExportError::Template(crate::error::format_err_chain(&e)))?;

    let value = serde_json::to_value(OutlineContext {
        name: data.display_name(),
        blocks: &blocks,
    })
    .map_err(|e| ExportError::Template(e.to_string()))?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::Template(e.to_string()))?;

    let rendered = tera.render(TEMPLATE_NAME, &context)?;
    Ok(rendered)
}
