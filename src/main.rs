//! Command-line interface for pohoda-xml

#[cfg(feature = "cli")]
use clap::{ArgAction, Parser, Subcommand};

#[cfg(feature = "cli")]
use serde::Deserialize;
#[cfg(feature = "cli")]
use serde_json::Value as JsonValue;

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use pohoda_xml::stock::Stock;
#[cfg(feature = "cli")]
use pohoda_xml::{options_from_json, DataPack, Document, Value, XmlConfig};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "pohoda-xml")]
#[command(author, version, about = "Pohoda import XML builder", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a stock card document from a JSON description
    Stock {
        /// Path to the JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Organization identifier
        #[arg(long)]
        ico: String,

        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,

        /// Wrap the stock in a data pack with this id
        #[arg(long, value_name = "ID")]
        data_pack: Option<String>,

        /// Application name written on the data pack
        #[arg(long, default_value = "pohoda-xml")]
        application: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// JSON description of a stock card
#[cfg(feature = "cli")]
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct StockInput {
    header: JsonValue,
    #[serde(default)]
    action_type: Option<ActionInput>,
    #[serde(default)]
    items: Vec<JsonValue>,
    #[serde(default)]
    prices: Vec<PriceInput>,
    #[serde(default)]
    pictures: Vec<PictureInput>,
    #[serde(default)]
    categories: Vec<i64>,
    #[serde(default)]
    related_links: Vec<LinkInput>,
    #[serde(default)]
    int_parameters: Vec<JsonValue>,
    #[serde(default)]
    parameters: Vec<ParameterInput>,
}

#[cfg(feature = "cli")]
#[derive(Deserialize, Debug)]
struct ActionInput {
    #[serde(rename = "type")]
    action: String,
    #[serde(default)]
    filter: Option<JsonValue>,
    #[serde(default)]
    agenda: Option<String>,
}

#[cfg(feature = "cli")]
#[derive(Deserialize, Debug)]
struct PriceInput {
    code: String,
    price: f64,
}

#[cfg(feature = "cli")]
#[derive(Deserialize, Debug)]
struct PictureInput {
    filepath: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    order: Option<i64>,
    #[serde(default)]
    default: bool,
}

#[cfg(feature = "cli")]
#[derive(Deserialize, Debug)]
struct LinkInput {
    url: String,
    #[serde(default)]
    description: String,
}

#[cfg(feature = "cli")]
#[derive(Deserialize, Debug)]
struct ParameterInput {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    value: JsonValue,
    #[serde(default)]
    list: Option<JsonValue>,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Stock {
            file,
            ico,
            pretty,
            data_pack,
            application,
            output,
        } => cmd_stock(file, ico, pretty, data_pack, application, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn cmd_stock(
    file: PathBuf,
    ico: String,
    pretty: bool,
    data_pack: Option<String>,
    application: String,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(&file)?;
    let input: StockInput = serde_json::from_str(&content)?;
    tracing::info!(file = %file.display(), "building stock document");

    let stock = build_stock(input, &ico)?;

    let document = match data_pack {
        Some(id) => {
            let mut pack = DataPack::new(id.as_str(), ico.as_str(), application);
            pack.add_item(&format!("{}-1", id), &stock)?;
            pack.to_document()?
        }
        None => Document::new(stock.get_xml()?),
    };

    let config = if pretty {
        XmlConfig::pretty()
    } else {
        XmlConfig::new()
    };
    let xml = document.to_xml_string(&config)?;

    if let Some(output_path) = output {
        fs::write(&output_path, xml)?;
        eprintln!("Output written to: {}", output_path.display());
    } else {
        println!("{}", xml);
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn build_stock(input: StockInput, ico: &str) -> pohoda_xml::Result<Stock> {
    let mut stock = Stock::new(options_from_json(input.header)?, ico)?;

    if let Some(action) = input.action_type {
        let filter = action.filter.map(options_from_json).transpose()?;
        stock.add_action_type(&action.action, filter, action.agenda.as_deref())?;
    }
    for item in input.items {
        stock.add_stock_item(options_from_json(item)?)?;
    }
    for price in input.prices {
        stock.add_price(&price.code, price.price)?;
    }
    for picture in input.pictures {
        stock.add_image(
            &picture.filepath,
            &picture.description,
            picture.order,
            picture.default,
        )?;
    }
    for category in input.categories {
        stock.add_category(category)?;
    }
    for link in input.related_links {
        stock.add_related_link(&link.url, &link.description)?;
    }
    for parameter in input.int_parameters {
        stock.add_int_parameter(options_from_json(parameter)?)?;
    }
    for parameter in input.parameters {
        let list = parameter.list.map(Value::try_from).transpose()?;
        stock.add_parameter(
            &parameter.name,
            &parameter.kind,
            Value::try_from(parameter.value)?,
            list,
        )?;
    }

    Ok(stock)
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
