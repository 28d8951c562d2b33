use crate::session::Session;
use crate::util::{CliResult, map_provider_error, render_json, row_label};
use crate::{OutputFormat, QueryArgs};
use clap::Args;
use rowtree_core::node::TreeNodeView;
use rowtree_core::provider::TableDataProvider;
use serde::Serialize;
use std::fmt::Write;

#[derive(Args, Debug, Clone)]
pub struct RootsArgs {
    #[command(flatten)]
    pub query: QueryArgs,
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RootsSummary {
    total_items: usize,
    rows: Vec<TreeNodeView>,
}

pub fn run(session: &Session, args: &RootsArgs) -> CliResult<String> {
    let state = args.query.to_state()?;
    let rows = session.roots().fetch(Some(&state)).into_inner().map_err(map_provider_error)?;
    let summary = RootsSummary { total_items: session.roots().total_items(), rows };

    match args.format {
        OutputFormat::Text => Ok(render_roots_text(&summary)),
        OutputFormat::Json => render_json(&summary),
    }
}

fn render_roots_text(summary: &RootsSummary) -> String {
    let mut output = String::new();
    for row in &summary.rows {
        let _ = writeln!(&mut output, "{}", row_label(row));
    }
    let _ = writeln!(&mut output, "Total: {}", summary.total_items);
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
    fn lists_example_roots_as_json() {
        let args = RootsArgs { query: QueryArgs::default(), format: OutputFormat::Json };
        let output = run(&session(), &args).expect("roots");
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("json");
        assert_eq!(parsed["totalItems"], 3);
        assert_eq!(parsed["rows"][2]["name"], "profile");
        assert_eq!(parsed["rows"][2]["hasChildren"], true);
        assert_eq!(parsed["rows"][0]["selectable"], true);
    }

    #[rstest]
    fn text_output_ends_with_total() {
        owo_colors::set_override(false);
        let args = RootsArgs {
            query: QueryArgs { search: "prof".into(), ..QueryArgs::default() },
            format: OutputFormat::Text,
        };
        let output = run(&session(), &args).expect("roots");
        assert_eq!(output, "profile [children]\nTotal: 1");
    }
}
