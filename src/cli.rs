//! CLI argument parser
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use clap_complete::Shell;

use invpick::combobox::config::ComboboxConfig;

/// Command-line argument parser for `invpick`.
#[derive(Debug, Parser)]
#[command(name = "invpick")]
#[command(
    about = "A searchable picker for fixed-asset inventories",
    long_about = "invpick - pick one entry out of an asset catalogue from your terminal.

Key Features:
 - Case-insensitive search over labels and descriptions.
 - Keyboard and mouse navigation.
 - Prints the chosen value to stdout, ready for scripts.

Examples:
 invpick pick assets.yaml               # pick an asset interactively
 invpick pick assets.yaml -v a2 --once  # start at `a2`, exit on the first pick
 invpick filter assets.yaml proj        # show what a search would match

Use `invpick <COMMAND> --help` for more details."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands for `invpick`.
#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(
        about = "Pick an option interactively",
        long_about = "Open the picker over the options in <FILE>. The final value
is printed to stdout when it is not empty.",
        alias = "p"
    )]
    Pick {
        /// YAML file with the options
        file: PathBuf,
        /// Currently selected value
        #[arg(long, short, default_value = "")]
        value: String,
        #[command(flatten)]
        display: DisplayArgs,
        /// Heading shown above the picker
        #[arg(long)]
        title: Option<String>,
        #[clap(long, short, help = "Show the picker without allowing changes")]
        disabled: bool,
        #[clap(long, short, help = "Exit right after the first selection")]
        once: bool,
    },

    #[command(
        about = "Print the options matching a query",
        long_about = "Print the options in <FILE> matching [QUERY] the way the
picker would list them, followed by the result count.",
        alias = "f"
    )]
    Filter {
        /// YAML file with the options
        file: PathBuf,
        /// Search text (default: everything)
        #[arg(default_value = "")]
        query: String,
        /// Value to mark as selected
        #[arg(long, short, default_value = "")]
        value: String,
        #[command(flatten)]
        display: DisplayArgs,
    },

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Display strings that override the config file.
#[derive(Debug, Default, ClapArgs)]
pub struct DisplayArgs {
    /// Text shown when nothing is selected
    #[arg(long)]
    pub placeholder: Option<String>,
    /// Text shown in the empty search input
    #[arg(long)]
    pub search_placeholder: Option<String>,
    /// Text shown when nothing matches
    #[arg(long)]
    pub empty_message: Option<String>,
    /// Noun appended to the result count
    #[arg(long)]
    pub count_label: Option<String>,
}

impl DisplayArgs {
    pub fn apply(self, mut config: ComboboxConfig) -> ComboboxConfig {
        if let Some(placeholder) = self.placeholder {
            config.placeholder = placeholder;
        }
        if let Some(search_placeholder) = self.search_placeholder {
            config.search_placeholder = search_placeholder;
        }
        if let Some(empty_message) = self.empty_message {
            config.empty_message = empty_message;
        }
        if self.count_label.is_some() {
            config.count_label = self.count_label;
        }
        config
    }
}
