use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "icon-harvest",
    version,
    about = "Extract, split and inspect the icons embedded in Windows executables"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract every icon group of an .exe or .dll into .ico files
    Extract {
        /// The file path to the icon library
        file: PathBuf,

        /// Output directory (default: the file name without extension)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Also write every image of every icon as its own .ico file
        #[arg(long)]
        split: bool,

        /// Assemble icon groups in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Split a multi-image .ico file into single-image .ico files
    Split {
        /// The .ico file to split
        file: PathBuf,

        /// Output directory (default: the directory of the input file)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show the images of an .ico file, or the icon groups of an .exe or .dll
    Info {
        /// An .ico, .exe or .dll file
        file: PathBuf,
    },
}
