use clap::{Parser, ValueEnum};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TableArg {
    Types,
    Attributes,
    Elements,
    All,
}

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[arg(help = "The XSD or WSDL file")]
    pub input: String,

    #[arg(long, help = "Allow a XML Document Type Definition (DTD) to occur")]
    pub allow_dtd: bool,

    #[arg(long, value_enum, default_value = "all", help = "Which table to print")]
    pub table: TableArg,

    #[arg(
        long = "prefix",
        value_name = "PREFIX=URI",
        value_parser = parse_prefix,
        help = "Bind a namespace prefix before the document's own prefixes are read"
    )]
    pub prefixes: Vec<(String, String)>,
}

fn parse_prefix(source: &str) -> Result<(String, String), String> {
    match source.split_once('=') {
        Some((prefix, uri)) if !prefix.is_empty() && !uri.is_empty() => {
            Ok((prefix.to_string(), uri.to_string()))
        }
        _ => Err(format!("expected PREFIX=URI, got {source:?}")),
    }
}
