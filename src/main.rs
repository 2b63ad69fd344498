#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "jsonschema2avro", about = "Convert JSON Schema to Avro Schema")]
struct Cli {
    /// Path or URL to the JSON Schema input
    #[arg(value_name = "JSONSCHEMA")]
    input: String,

    /// Path to the Avro schema output file
    #[arg(value_name = "AVRO")]
    output: std::path::PathBuf,

    /// Namespace override
    #[arg(long)]
    namespace: Option<String>,

    /// Root record class name, used when the root object has no title
    #[arg(long, default_value = "document")]
    root_class_name: String,

    /// Maximum schema nesting depth
    #[arg(long, default_value_t = 40)]
    max_depth: usize,

    /// Make optional fields ["null", T] with a null default
    #[arg(long, default_value_t = false)]
    null_defaults: bool,

    /// Log translation details to stderr
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[cfg(feature = "cli")]
fn main() {
    use jsonschema2avro::JsonToAvroConverter;
    use tracing_subscriber::EnvFilter;

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut converter = JsonToAvroConverter::new()
        .with_root_class_name(cli.root_class_name)
        .with_max_recursion_depth(cli.max_depth)
        .with_null_defaults(cli.null_defaults);
    if let Some(ns) = cli.namespace {
        converter = converter.with_namespace(ns);
    }

    if let Err(e) = jsonschema2avro::convert_jsons_to_avro(&cli.input, &cli.output, &converter) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("This binary is only available with the `cli` feature enabled.");
    std::process::exit(1);
}
