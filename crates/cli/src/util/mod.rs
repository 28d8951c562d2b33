use owo_colors::{OwoColorize, Stream};
use rowtree_core::node::TreeNodeView;
use rowtree_core::provider::ProviderError;
use std::error::Error;

pub type CliResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

pub fn map_provider_error(err: ProviderError) -> Box<dyn Error + Send + Sync> {
    Box::new(err)
}

/// Row name, bold when the row is selectable.
pub fn styled_name(view: &TreeNodeView) -> String {
    if view.is_selectable() {
        view.name()
            .if_supports_color(Stream::Stdout, |text| text.bold().fg_rgb::<79, 166, 255>().to_string())
            .to_string()
    } else {
        view.name().if_supports_color(Stream::Stdout, |text| text.fg_rgb::<241, 149, 255>().to_string()).to_string()
    }
}

/// Dimmed `[children, selectable]` marker list.
pub fn row_flags(view: &TreeNodeView) -> String {
    let mut flags = Vec::new();
    if view.has_children() {
        flags.push("children");
    }
    if view.is_selectable() {
        flags.push("selectable");
    }
    if flags.is_empty() {
        return String::new();
    }
    let text = format!("[{}]", flags.join(", "));
    text.if_supports_color(Stream::Stdout, |text| text.dimmed().to_string()).to_string()
}

/// Styled name followed by its flags, if any.
pub fn row_label(view: &TreeNodeView) -> String {
    let flags = row_flags(view);
    if flags.is_empty() { styled_name(view) } else { format!("{} {flags}", styled_name(view)) }
}

pub fn render_json<T: serde::Serialize + ?Sized>(value: &T) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
