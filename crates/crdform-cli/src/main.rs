//! crdform CLI - drive the Kubernetes CRD provider from the command line

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod error;
mod exit_codes;

use commands::ConnectionArgs;
use commands::schema::SchemaKind;
use error::Result;

#[derive(Parser)]
#[command(name = "crdform")]
#[command(author = "crdform Contributors")]
#[command(version)]
#[command(about = "Kubernetes custom resources as Terraform data sources and resources", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the kubeconfig file
    #[arg(long, global = true, env = "KUBECONFIG")]
    kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use
    #[arg(long, global = true, env = "CRDFORM_CONTEXT")]
    context: Option<String>,

    /// Never contact a cluster
    #[arg(long, global = true, env = "CRDFORM_OFFLINE")]
    offline: bool,

    /// Provider configuration file (YAML or JSON)
    #[arg(long, global = true)]
    provider_config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered data sources and resources
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the schema of a type as JSON
    Schema {
        /// Type name, e.g. k8s_route_openshift_io_route_v1
        type_name: Option<String>,

        /// Schema to print
        #[arg(long, value_enum, default_value = "resource")]
        kind: SchemaKind,
    },

    /// Validate a configuration file against a type's schema
    Validate {
        /// Type name
        type_name: String,

        /// Configuration file (YAML or JSON)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Read an object through its data source
    Read {
        /// Type name
        type_name: String,

        /// Object name
        #[arg(long)]
        name: String,

        /// Object namespace
        #[arg(short, long)]
        namespace: String,
    },

    /// Create or update an object
    Apply {
        /// Resource type name
        type_name: String,

        /// Configuration file (YAML or JSON)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Delete an object
    Delete {
        /// Resource type name
        type_name: String,

        /// State or configuration file identifying the object
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Import an existing object by its "name/namespace" id
    Import {
        /// Resource type name
        type_name: String,

        /// Object id, "name/namespace"
        id: String,
    },

    /// Render a configuration file as a Kubernetes manifest
    Manifest {
        /// Type name, with or without the _manifest suffix
        type_name: String,

        /// Configuration file (YAML or JSON)
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let args = ConnectionArgs {
        kubeconfig: cli.kubeconfig,
        context: cli.context,
        offline: cli.offline,
        provider_config: cli.provider_config,
    };

    match cli.command {
        Commands::List { json } => commands::list::run(json),

        Commands::Schema { type_name, kind } => commands::schema::run(type_name.as_deref(), kind),

        Commands::Validate { type_name, file } => commands::validate::run(&type_name, &file),

        Commands::Read {
            type_name,
            name,
            namespace,
        } => commands::read::run(&args, &type_name, &name, &namespace).await,

        Commands::Apply { type_name, file } => commands::apply::run(&args, &type_name, &file).await,

        Commands::Delete { type_name, file } => {
            commands::delete::run(&args, &type_name, &file).await
        }

        Commands::Import { type_name, id } => commands::import::run(&args, &type_name, &id).await,

        Commands::Manifest { type_name, file } => commands::manifest::run(&type_name, &file).await,
    }
}

#[tokio::main]
async fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let code = match run(cli).await {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            code
        }
    };
    std::process::exit(code);
}
