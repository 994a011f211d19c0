use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Input .by source file
    pub input: PathBuf,
    /// Output file (defaults to the input name with .py)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Prefix for every output file name
    #[arg(short, long)]
    pub prefix: Option<String>,
    /// Directory for derived output files (defaults to next to the input)
    #[arg(short = 'd', long)]
    pub out_dir: Option<PathBuf>,
    /// Prepend `true=True; false=False;` to support lowercase booleans
    #[arg(short, long)]
    pub truefalse: bool,
    /// Also convert every imported .by module found on disk
    #[arg(short, long)]
    pub recursive: bool,
    /// Extra directory to search for imported modules (repeatable)
    #[arg(short = 'I', long = "search-dir")]
    pub search_dirs: Vec<PathBuf>,
    /// JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Treat any quote right after a backslash as escaped, even in `\\'`
    #[arg(long)]
    pub legacy_escapes: bool,
    /// Spaces per indentation level
    #[arg(long)]
    pub indent: Option<usize>,
    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
