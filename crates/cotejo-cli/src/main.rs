mod commands;
mod fs_source;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cotejo",
    version,
    about = "Extracts EXPEDIENTE, PPTO META HG and winning-vendor totals from comparison spreadsheets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the three figures from a single spreadsheet
    Extract {
        /// Path to .xlsx/.xlsm/.xls workbook, or a .json 2-D array of cell values
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the result to a JSON file instead of printing it
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Run the full scan pipeline against a local folder and mail text
    Scan {
        /// Mail subject line, used for candidate ranking and project detection
        #[arg(short, long)]
        subject: String,

        /// Folder of candidate spreadsheets
        #[arg(short, long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// File holding the mail body; scanned for links and amounts
        #[arg(short, long, value_name = "FILE")]
        body: Option<PathBuf>,

        /// Sender address, used for project detection
        #[arg(long)]
        sender: Option<String>,

        /// JSON match-profile override
        #[arg(short, long, value_name = "FILE")]
        profile: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Rank a folder's files against a subject without scanning them
    Rank {
        /// Mail subject line
        subject: String,

        /// Folder of candidate files
        dir: PathBuf,

        /// JSON match-profile override
        #[arg(short, long, value_name = "FILE")]
        profile: Option<PathBuf>,
    },
    /// List the folder/file/sheet references found in a text file
    Links {
        /// Text file to search (a saved mail body, for example)
        input_file: PathBuf,
    },
    /// Inspect and validate match profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Print the builtin profile as JSON
    Show,
    /// Validate a custom profile file
    Validate {
        /// Path to JSON profile file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input_file,
            output,
            out,
        } => commands::extract::run(input_file, &output, out),
        Commands::Scan {
            subject,
            dir,
            body,
            sender,
            profile,
            output,
        } => commands::scan::run(subject, dir, body, sender, profile, &output),
        Commands::Rank {
            subject,
            dir,
            profile,
        } => commands::rank::run(&subject, dir, profile),
        Commands::Links { input_file } => commands::links::run(input_file),
        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::profile::show(),
            ProfileAction::Validate { file } => commands::profile::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
