use crate::OutputFormat;
use crate::session::Session;
use crate::util::{CliResult, map_provider_error, render_json};
use clap::Args;
use rowtree_core::query::FieldPath;
use rowtree_runtime::TableDataSource;
use std::fmt::Write;

#[derive(Args, Debug, Clone)]
pub struct OptionsArgs {
    /// Dotted field path, e.g. `writeAccess` or `profile.email`.
    #[arg(value_name = "FIELD")]
    pub field: String,
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn run(session: &Session, args: &OptionsArgs) -> CliResult<String> {
    let field = FieldPath::parse(&args.field)?;
    let source = TableDataSource::new(session.roots().clone());
    let options = source.field_options(&field).map_err(map_provider_error)?;

    match args.format {
        OutputFormat::Text => {
            let mut output = String::new();
            for option in &options {
                let _ = writeln!(&mut output, "{}", option.label);
            }
            Ok(output.trim_end().to_owned())
        }
        OutputFormat::Json => render_json(&options),
    }
}
