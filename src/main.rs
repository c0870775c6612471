mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use cli::TableArg;
use xsd_typemap::{schema, NamespaceManager, SchemaTypes, Table, TypeMap};

fn run(cli: cli::Cli) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(&cli.input)?;
    let options = roxmltree::ParsingOptions {
        allow_dtd: cli.allow_dtd,
        ..Default::default()
    };
    let document = roxmltree::Document::parse_with_options(&source, options)?;
    let types = SchemaTypes::from_document(&document)?;

    let mut manager = NamespaceManager::with_standard_prefixes();
    for (prefix, uri) in &cli.prefixes {
        manager.set_prefix(prefix.as_str(), uri.as_str());
    }
    schema::collect_prefixes(&document, &mut manager);
    for namespace in types.namespaces() {
        manager.assign_prefix(namespace);
    }

    let mut type_map = TypeMap::new();
    type_map.set_prefix_resolver(Arc::new(manager));
    type_map.add_schema_types(&types)?;
    type_map.dump();

    let tables: &[Table] = match cli.table {
        TableArg::Types => &[Table::Type],
        TableArg::Attributes => &[Table::Attribute],
        TableArg::Elements => &[Table::Element],
        TableArg::All => &[Table::Type, Table::Attribute, Table::Element],
    };
    for table in tables {
        for entry in type_map.entries(*table) {
            println!(
                "{:?}\t{}\t{}\t{}\t{}",
                table,
                entry.namespace,
                entry.type_name,
                entry.local_type,
                entry.headers.join(",")
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    match run(cli::Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
