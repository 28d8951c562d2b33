use crate::session::Session;
use crate::util::{CliResult, map_provider_error, render_json, row_label};
use crate::{OutputFormat, QueryArgs};
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use rowtree_core::node::TreeNodeView;
use rowtree_core::provider::{TableChildrenDataProvider, TableRow};
use serde::Serialize;
use std::fmt::Write;

#[derive(Args, Debug, Clone)]
pub struct ChildrenArgs {
    /// Row paths such as `profile` or `data/color`.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,
    #[command(flatten)]
    pub query: QueryArgs,
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ChildrenSummary {
    path: String,
    children_count: usize,
    rows: Vec<TreeNodeView>,
}

pub fn run(session: &Session, args: &ChildrenArgs) -> CliResult<String> {
    let state = args.query.to_state()?;
    let rows: Vec<TableRow> = args.paths.iter().map(|path| session.row(path)).collect();
    let mut fetched =
        session.children().fetch(Some(&state), &rows).into_inner().map_err(map_provider_error)?;

    let mut summaries = Vec::with_capacity(rows.len());
    for row in &rows {
        let children_count =
            session.children().row_children_count(row).into_inner().map_err(map_provider_error)?;
        summaries.push(ChildrenSummary {
            path: row.key().to_string(),
            children_count,
            rows: fetched.remove(row.key()).unwrap_or_default(),
        });
    }

    match args.format {
        OutputFormat::Text => Ok(render_children_text(&summaries)),
        OutputFormat::Json => render_json(&summaries),
    }
}

fn render_children_text(summaries: &[ChildrenSummary]) -> String {
    let mut output = String::new();
    for summary in summaries {
        let header = format!("{} ({} of {})", summary.path, summary.rows.len(), summary.children_count);
        let _ = writeln!(
            &mut output,
            "{}",
            header.if_supports_color(Stream::Stdout, |text| text.bold().to_string())
        );
        for row in &summary.rows {
            let _ = writeln!(&mut output, "  {}", row_label(row));
        }
    }
    output.trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowtree_provider_mock::StaticExampleTree;
    use rstest::rstest;

    fn args(paths: &[&str], query: QueryArgs, format: OutputFormat) -> ChildrenArgs {
        ChildrenArgs { paths: paths.iter().map(|path| (*path).to_owned()).collect(), query, format }
    }

    #[rstest]
    fn pages_children_and_reports_the_full_count() {
        owo_colors::set_override(false);
        let session = Session::with_tree(StaticExampleTree::default(), false);
        let query = QueryArgs { page: Some(1), page_size: 2, ..QueryArgs::default() };
        let output = run(&session, &args(&["profile"], query, OutputFormat::Text)).expect("children");
        assert_eq!(output, "profile (2 of 3)\n  email [selectable]\n  firstName [selectable]");
    }

    #[rstest]
    fn batches_several_rows_into_json() {
        let session = Session::with_tree(StaticExampleTree::default(), false);
        let output = run(&session, &args(&["data", "profile", "missing"], QueryArgs::default(), OutputFormat::Json))
            .expect("children");
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("json");
        assert_eq!(parsed[0]["rows"][0]["name"], "color");
        assert_eq!(parsed[1]["childrenCount"], 3);
        assert_eq!(parsed[2]["rows"].as_array().map(Vec::len), Some(0));
        assert_eq!(session.children().cache_fills(), 2);
    }

    #[rstest]
    fn strict_sessions_reject_unknown_rows() {
        let session = Session::with_tree(StaticExampleTree::default(), true);
        let err = run(&session, &args(&["missing"], QueryArgs::default(), OutputFormat::Text))
            .expect_err("unknown row");
        assert_eq!(err.to_string(), "no node found for row 'missing'");
    }
}
