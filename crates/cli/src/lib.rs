mod commands;
mod session;
mod util;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rowtree_core::query::{FieldPath, FilterRule, Page, QueryState, SortRule};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub use session::Session;
pub use util::CliResult;

const LOG_ENV: &str = "ROWTREE_LOG";

#[derive(Parser, Debug)]
#[command(name = "rowtree", version, about = "Browse hierarchical rows the way a table widget pulls them")]
pub struct Cli {
    /// Load the tree from an XML document instead of the built-in example.
    #[arg(long = "tree", value_name = "FILE", global = true)]
    pub tree: Option<PathBuf>,
    /// Fail on rows that do not resolve to a node.
    #[arg(long = "strict", global = true)]
    pub strict: bool,
    /// Log filter, e.g. `debug` or `rowtree_provider_mock=trace`. Overrides ROWTREE_LOG.
    #[arg(long = "log-level", value_name = "FILTER", global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the root rows.
    Roots(commands::roots::RootsArgs),
    /// List the children of one or more rows.
    Children(commands::children::ChildrenArgs),
    /// Count the children of a row under the query.
    Count(commands::count::CountArgs),
    /// List the distinct values of a field across the root rows.
    Options(commands::options::OptionsArgs),
    /// Print the flattened tree with rows expanded.
    Tree(commands::tree::TreeArgs),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Query flags shared by the row commands.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Free-text search, matched case-insensitively.
    #[arg(long = "search", value_name = "TEXT", default_value = "")]
    pub search: String,
    /// Field path searched by --search (repeatable). Defaults to `name`.
    #[arg(long = "column", value_name = "FIELD")]
    pub columns: Vec<String>,
    /// 1-based page of children to show.
    #[arg(long = "page", value_name = "N")]
    pub page: Option<usize>,
    #[arg(long = "page-size", value_name = "N", default_value_t = 10)]
    pub page_size: usize,
    /// Sort rule `field[:asc|desc]` (repeatable, applied in order).
    #[arg(long = "sort", value_name = "RULE")]
    pub sort: Vec<String>,
    /// Filter rule `[!]field:strategy:value` (repeatable, all must pass).
    #[arg(long = "filter", value_name = "RULE")]
    pub filter: Vec<String>,
}

impl Default for QueryArgs {
    fn default() -> Self {
        Self {
            search: String::new(),
            columns: Vec::new(),
            page: None,
            page_size: 10,
            sort: Vec::new(),
            filter: Vec::new(),
        }
    }
}

impl QueryArgs {
    pub fn to_state(&self) -> CliResult<QueryState> {
        let columns = if self.columns.is_empty() {
            vec![FieldPath::parse("name")?]
        } else {
            self.columns.iter().map(|column| FieldPath::parse(column)).collect::<Result<_, _>>()?
        };

        let mut state = QueryState::new().with_search(self.search.clone(), columns);
        if let Some(page) = self.page {
            state = state.with_page(Page::new(page, self.page_size)?);
        }
        for rule in &self.sort {
            state = state.with_sort(rule.parse::<SortRule>()?);
        }
        for rule in &self.filter {
            state = state.with_filter(rule.parse::<FilterRule>()?);
        }
        Ok(state)
    }
}

/// Parses the process arguments, runs the command and prints its output.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());
    let output = run_cli(&cli).map_err(|err| anyhow::anyhow!(err))?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Runs an already parsed command line and returns what it would print.
pub fn run_cli(cli: &Cli) -> CliResult<String> {
    let session = Session::open(cli.tree.as_deref(), cli.strict)?;
    match &cli.command {
        Command::Roots(args) => commands::roots::run(&session, args),
        Command::Children(args) => commands::children::run(&session, args),
        Command::Count(args) => commands::count::run(&session, args),
        Command::Options(args) => commands::options::run(&session, args),
        Command::Tree(args) => commands::tree::run(&session, args),
    }
}

fn init_tracing(level: Option<&str>) {
    let filter = tracing_filter(level);

    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// `--log-level` wins over `ROWTREE_LOG`; an invalid or missing filter falls
/// back to `warn`.
fn tracing_filter(level: Option<&str>) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::try_new(level).ok(),
        None => EnvFilter::try_from_env(LOG_ENV).ok(),
    }
    .unwrap_or_else(|| EnvFilter::new("warn"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_query_searches_name() {
        let state = QueryArgs { search: "prof".into(), ..QueryArgs::default() }.to_state().expect("state");
        assert_eq!(state.search_columns().len(), 1);
        assert_eq!(state.search_columns()[0].to_string(), "name");
        assert!(state.page().is_none());
    }

    #[rstest]
    fn query_flags_build_state() {
        let args = QueryArgs {
            search: "x".into(),
            columns: vec!["profile.email".into(), "name".into()],
            page: Some(2),
            page_size: 5,
            sort: vec!["name:desc".into()],
            filter: vec!["!writeAccess:equalTo:readOnly".into()],
        };
        let state = args.to_state().expect("state");
        assert_eq!(state.search_columns().len(), 2);
        assert_eq!(state.page().map(Page::current_page), Some(2));
        assert_eq!(state.sort_by().len(), 1);
        assert_eq!(state.filter_by().len(), 1);
    }

    #[rstest]
    #[case(QueryArgs { page: Some(0), ..QueryArgs::default() })]
    #[case(QueryArgs { page: Some(1), page_size: 0, ..QueryArgs::default() })]
    #[case(QueryArgs { columns: vec!["a..b".into()], ..QueryArgs::default() })]
    #[case(QueryArgs { filter: vec!["name".into()], ..QueryArgs::default() })]
    fn invalid_query_flags_are_rejected(#[case] args: QueryArgs) {
        assert!(args.to_state().is_err());
    }

    #[rstest]
    #[case(Some("debug"), "debug")]
    #[case(Some("rowtree_provider_mock=trace"), "rowtree_provider_mock=trace")]
    #[case(Some("rowtree=loud"), "warn")]
    fn log_level_flag_builds_the_filter(#[case] level: Option<&str>, #[case] expected: &str) {
        assert_eq!(tracing_filter(level).to_string(), expected);
    }

    #[rstest]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["rowtree", "children", "profile", "--strict", "--format", "json"])
            .expect("valid args");
        assert!(cli.strict);
        assert!(matches!(cli.command, Command::Children(_)));
    }
}
