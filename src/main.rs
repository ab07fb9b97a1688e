//! arbor - render, filter and interactively prune directory trees.
//!
//! Usage:
//!   arbor [PATH] [FLAGS]               Render a tree (same as `arbor tree`)
//!   arbor tree [PATH] [FLAGS]          Render a tree
//!   arbor interactive [PATH] [FLAGS]   Select entries, then export them
//!   arbor version                      Show the version
//!
//! Set `ARBOR_LOG` (e.g. `ARBOR_LOG=debug`) to see diagnostics on stderr.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Result};

use arbor_core::{ConnectorStyle, DirectoryTree, FilterPolicy, MetadataFields, TreeOptions};
use arbor_export::{ExportFormat, export_to};
use arbor_interactive::{
    CommandSource, ScriptThenReader, ScriptedCommands, SelectionSession, SessionOutcome, prune,
    run_session,
};
use arbor_scan::DirectoryTreeBuilder;

#[derive(Parser)]
#[command(
    name = "arbor",
    version,
    about = "Render, filter and interactively prune directory trees",
    long_about = "arbor prints a directory structure like the classic `tree` command.\n\n\
                  Run `arbor [PATH]` for a tree, or `arbor interactive [PATH]` to pick \
                  entries and export just those.",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    tree: TreeArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Render a directory tree
    Tree(TreeArgs),

    /// Browse a tree, select entries and export the selection
    Interactive(InteractiveArgs),

    /// Show the arbor version
    Version,
}

#[derive(Args, Debug, Clone, Default)]
struct TreeArgs {
    /// Root directory (defaults to the current directory)
    path: Option<PathBuf>,

    /// Include files, not just directories
    #[arg(short, long)]
    files: bool,

    /// Limit traversal depth: 0 shows only the root, 1 its children, etc.
    #[arg(long, value_name = "LEVEL")]
    depth: Option<u32>,

    /// Use ASCII connectors
    #[arg(long)]
    ascii: bool,

    /// Show size and modification time
    #[arg(short, long)]
    details: bool,

    /// Show specific metadata fields (size, time, perm, owner, group); comma-separated values allowed
    #[arg(long = "details-field", value_name = "FIELD")]
    details_fields: Vec<String>,

    /// Keep only files matching this pattern
    #[arg(long = "include", value_name = "GLOB")]
    include: Vec<String>,

    /// Drop files matching this pattern
    #[arg(long = "exclude", value_name = "GLOB")]
    exclude: Vec<String>,

    /// Keep only files with this extension, e.g. `.rs` or `toml`
    #[arg(short = 'e', long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Keep only directories matching this pattern
    #[arg(long = "include-dir", value_name = "GLOB")]
    include_dirs: Vec<String>,

    /// Drop directories matching this pattern, with their contents
    #[arg(long = "exclude-dir", value_name = "GLOB")]
    exclude_dirs: Vec<String>,

    /// Export format: text, json or markdown
    #[arg(long = "export", value_name = "FORMAT", default_value = "text")]
    format: ExportFormat,

    /// Write the export to a file instead of stdout
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
struct InteractiveArgs {
    #[command(flatten)]
    tree: TreeArgs,

    /// Run this command before reading from stdin (repeatable)
    #[arg(long, value_name = "COMMAND")]
    script: Vec<String>,
}

impl TreeArgs {
    fn root(&self) -> &Path {
        self.path.as_deref().unwrap_or(Path::new("."))
    }

    fn options(&self) -> Result<TreeOptions> {
        let connector_style = if self.ascii {
            ConnectorStyle::Ascii
        } else {
            ConnectorStyle::Unicode
        };

        TreeOptions::builder()
            .include_files(self.files)
            .max_depth(self.depth)
            .connector_style(connector_style)
            .metadata(MetadataFields::parse(&self.details_fields, self.details))
            .include_file_patterns(self.include.clone())
            .exclude_file_patterns(self.exclude.clone())
            .include_extensions(self.extensions.clone())
            .include_directory_patterns(self.include_dirs.clone())
            .exclude_directory_patterns(self.exclude_dirs.clone())
            .build()
            .context("Invalid tree options")
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut err = io::stderr();

    match cli.command.unwrap_or(Command::Tree(cli.tree)) {
        Command::Tree(args) => run_tree(&args, &mut out, &mut err),
        Command::Interactive(args) => {
            let stdin = io::stdin();
            let mut source =
                ScriptThenReader::new(ScriptedCommands::new(args.script.clone()), stdin.lock());
            run_interactive(&args, &mut source, &mut out, &mut err)
        }
        Command::Version => {
            writeln!(out, "arbor {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
    }
}

/// Log to stderr, filtered by `ARBOR_LOG` (warnings only by default).
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("ARBOR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Build the tree for `args`, reporting scan warnings to `err`.
fn build_tree(args: &TreeArgs, err: &mut dyn Write) -> Result<(TreeOptions, DirectoryTree)> {
    let options = args.options()?;
    let root = args.root();
    tracing::debug!(?options, root = %root.display(), "building tree");

    let tree = DirectoryTreeBuilder::new()
        .build(root, &FilterPolicy::new(&options))
        .with_context(|| format!("Failed to build tree for {}", root.display()))?;

    for warning in &tree.warnings {
        writeln!(err, "{warning}")?;
    }

    Ok((options, tree))
}

fn export(
    args: &TreeArgs,
    tree: &DirectoryTree,
    options: &TreeOptions,
    out: &mut dyn Write,
) -> Result<()> {
    let exporter = args.format.exporter();
    let written = export_to(exporter.as_ref(), tree, options, args.output.as_deref(), out)
        .context("Export failed")?;

    if let Some(path) = written {
        writeln!(out, "Exported tree to {}", path.display())?;
    }
    Ok(())
}

fn run_tree(args: &TreeArgs, out: &mut dyn Write, err: &mut dyn Write) -> Result<()> {
    let (options, tree) = build_tree(args, err)?;
    export(args, &tree, &options, out)
}

fn run_interactive(
    args: &InteractiveArgs,
    source: &mut dyn CommandSource,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    let (options, tree) = build_tree(&args.tree, err)?;
    let policy = FilterPolicy::new(&options);

    let mut session = SelectionSession::new(&tree.root, &policy);
    let outcome = run_session(&mut session, source, out).context("Interactive session failed")?;

    let (selected, command) = match outcome {
        SessionOutcome::Exported { selected, command } => (selected, command),
        SessionOutcome::Quit { selected } => {
            if selected.is_empty() {
                writeln!(out, "No nodes selected. Exiting without export.")?;
            }
            return Ok(());
        }
    };

    let pruned = prune(&tree, &selected);
    export(&args.tree, &pruned, &options, out)?;

    if let Some(command) = command {
        writeln!(out, "Re-run this selection with:")?;
        writeln!(out, "{command}")?;
    }
    Ok(())
}
