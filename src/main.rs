use clap::Parser;
use scangen::{run_codegen, CodeGenConfig, CodeGenError};

/// Generate Rust code to convert database rows into arbitrary structs.
///
/// Struct field names don't have to match column names at all, but the
/// column order must match the field declaration order.
#[derive(Parser)]
#[command(name = "scangen", version)]
struct Args {
    /// Name of the generated file.
    #[arg(short, long, default_value = "scans.rs")]
    output: String,

    /// Module name recorded in the generated file header. Defaults to the
    /// current directory name.
    #[arg(short, long)]
    package: Option<String>,

    /// Generate private functions instead of pub.
    #[arg(short, long)]
    unexport: bool,

    /// Only include structs named in this case-sensitive, comma-delimited
    /// list.
    #[arg(short, long)]
    whitelist: Option<String>,

    /// Targets of the form <module_path>=<source_path>. The module path may
    /// be empty for same-module generation; the source path is a file or a
    /// directory to walk.
    #[arg(required = true, value_name = "MODULE_PATH=SOURCE_PATH")]
    targets: Vec<String>,
}

fn main() -> Result<(), CodeGenError> {
    env_logger::init();
    let args = Args::parse();

    let package_name = match args.package {
        Some(name) => name,
        None => current_dir_name()?,
    };

    run_codegen(&CodeGenConfig {
        output_file: args.output,
        package_name,
        unexport: args.unexport,
        whitelist: args.whitelist,
        targets: args.targets,
    })
}

fn current_dir_name() -> Result<String, CodeGenError> {
    let dir = std::env::current_dir()
        .map_err(|e| CodeGenError::io("Failed to get working directory", e))?;
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| CodeGenError::other("Working directory has no name"))
}
