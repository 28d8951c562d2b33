use crate::session::Session;
use crate::util::{CliResult, map_provider_error, render_json};
use crate::{OutputFormat, QueryArgs};
use clap::Args;
use rowtree_runtime::ChildTableDataSource;
use serde::Serialize;

#[derive(Args, Debug, Clone)]
pub struct CountArgs {
    #[arg(value_name = "PATH")]
    pub path: String,
    #[command(flatten)]
    pub query: QueryArgs,
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct CountSummary {
    path: String,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pages: Option<usize>,
}

pub fn run(session: &Session, args: &CountArgs) -> CliResult<String> {
    let row = session.row(&args.path);
    let mut source = ChildTableDataSource::new(session.children().clone());
    source.set_state(args.query.to_state()?).map_err(map_provider_error)?;
    source.expand(std::slice::from_ref(&row)).map_err(map_provider_error)?;

    let summary = CountSummary {
        path: row.key().to_string(),
        count: source.children_count(&row).map_err(map_provider_error)?,
        pages: source.page_count(&row).map_err(map_provider_error)?,
    };

    match args.format {
        OutputFormat::Text => Ok(match summary.pages {
            Some(pages) => format!("{}: {} ({pages} pages)", summary.path, summary.count),
            None => format!("{}: {}", summary.path, summary.count),
        }),
        OutputFormat::Json => render_json(&summary),
    }
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
    #[case(QueryArgs::default(), "profile: 3")]
    #[case(QueryArgs { search: "name".into(), ..QueryArgs::default() }, "profile: 2")]
    #[case(QueryArgs { page: Some(1), page_size: 2, ..QueryArgs::default() }, "profile: 3 (2 pages)")]
    fn counts_filtered_children(#[case] query: QueryArgs, #[case] expected: &str) {
        let args = CountArgs { path: "profile".into(), query, format: OutputFormat::Text };
        assert_eq!(run(&session(), &args).expect("count"), expected);
    }

    #[rstest]
    fn leaf_and_unknown_rows_count_zero() {
        for path in ["phoneNumber", "nowhere/at/all"] {
            let args = CountArgs { path: path.into(), query: QueryArgs::default(), format: OutputFormat::Json };
            let parsed: serde_json::Value =
                serde_json::from_str(&run(&session(), &args).expect("count")).expect("json");
            assert_eq!(parsed["count"], 0);
            assert!(parsed.get("pages").is_none());
        }
    }
}
