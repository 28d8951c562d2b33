use crate::session::Session;
use crate::util::{CliResult, render_json, row_label};
use crate::{OutputFormat, QueryArgs};
use clap::Args;
use rowtree_runtime::{TableView, VisibleRow};
use std::fmt::Write;

#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    /// Expand at most this many levels below the roots.
    #[arg(long = "depth", value_name = "N")]
    pub depth: Option<usize>,
    #[command(flatten)]
    pub query: QueryArgs,
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn run(session: &Session, args: &TreeArgs) -> CliResult<String> {
    let mut view = TableView::new(session.roots().clone(), session.children().clone());
    view.apply(args.query.to_state()?)?;

    let mut level = 0;
    while args.depth.is_none_or(|depth| level < depth) {
        if view.expand_visible()? == 0 {
            break;
        }
        level += 1;
    }

    match args.format {
        OutputFormat::Text => Ok(render_tree_text(view.visible_rows())),
        OutputFormat::Json => render_json(view.visible_rows()),
    }
}

fn render_tree_text(rows: &[VisibleRow]) -> String {
    let mut output = String::new();
    for row in rows {
        let marker = match (row.has_children, row.is_expanded) {
            (true, true) => "- ",
            (true, false) => "+ ",
            (false, _) => "  ",
        };
        let _ = writeln!(&mut output, "{}{marker}{}", "  ".repeat(row.depth), row_label(&row.value));
    }
    output.trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowtree_provider_mock::StaticExampleTree;
    use rstest::rstest;

    fn session() -> Session {
        Session::with_tree(StaticExampleTree::default(), false)
    }

    #[rstest]
    fn expands_every_level_by_default() {
        owo_colors::set_override(false);
        let args = TreeArgs { depth: None, query: QueryArgs::default(), format: OutputFormat::Text };
        let output = run(&session(), &args).expect("tree");
        let expected = [
            "  phoneNumber [selectable]",
            "- data [children]",
            "    color [selectable]",
            "- profile [children]",
            "    email [selectable]",
            "    firstName [selectable]",
            "    lastName [selectable]",
        ]
        .join("\n");
        assert_eq!(output, expected);
    }

    #[rstest]
    fn depth_zero_keeps_rows_collapsed() {
        let args = TreeArgs { depth: Some(0), query: QueryArgs::default(), format: OutputFormat::Json };
        let output = run(&session(), &args).expect("tree");
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("json");
        let rows = parsed.as_array().expect("array");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1]["isExpanded"], false);
        assert_eq!(rows[1]["key"], "data");
    }

    #[rstest]
    fn search_narrows_children_of_expanded_rows() {
        owo_colors::set_override(false);
        let args = TreeArgs {
            depth: None,
            query: QueryArgs { search: "e".into(), ..QueryArgs::default() },
            format: OutputFormat::Text,
        };
        let output = run(&session(), &args).expect("tree");
        assert_eq!(
            output,
            "  phoneNumber [selectable]\n- profile [children]\n    email [selectable]\n    firstName [selectable]\n    lastName [selectable]"
        );
    }
}
