use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use ratatui::{Terminal, backend::Backend};
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;

use invpick::combobox::{
    Combobox,
    action::ComboboxAction,
    config::ComboboxConfig,
    filter::Segment,
    option::SelectOption,
    view::{PanelBody, RowView},
};
use invpick::config::Config;
use invpick::logging::init_logging;
use invpick::persistence::load_options;
use invpick::picker::{CrosstermEvents, EventSource, Picker, PickerSettings};
use invpick::terminal_utils;

use crate::cli::{Args, Commands, DisplayArgs};

pub fn handle(args: Args) -> Result<()> {
    match args.command {
        Commands::Pick {
            file,
            value,
            display,
            title,
            disabled,
            once,
        } => {
            let (config, _guard) = load_config()?;
            let settings = PickerSettings {
                title: title.or_else(|| config.title.clone()),
                exit_on_commit: once,
            };
            pick(&file, value, &config, display, disabled, settings)
        }
        Commands::Filter {
            file,
            query,
            value,
            display,
        } => {
            let (config, _guard) = load_config()?;
            let options = load_options(&file)?;
            let combobox_config = display.apply(config.combobox_config());
            print!(
                "{}",
                render_filter_output(options, combobox_config, &query, &value)
            );
            Ok(())
        }
        Commands::Completions { shell } => {
            print_completions(shell);
            Ok(())
        }
    }
}

/// Loads the user config and starts logging. The guard must outlive the
/// command so buffered log lines are flushed.
fn load_config() -> Result<(Config, Option<WorkerGuard>)> {
    let config = Config::load()?;
    let guard = init_logging(config.log_dir.as_deref())?;
    Ok((config, guard))
}

fn pick(
    file: &Path,
    value: String,
    config: &Config,
    display: DisplayArgs,
    disabled: bool,
    settings: PickerSettings,
) -> Result<()> {
    let options = load_options(file)?;
    let mut combobox_config = display.apply(config.combobox_config());
    combobox_config.disabled = disabled;

    debug!(file = %file.display(), value = %value, "starting picker");

    let picker = Picker::new(options, combobox_config, value, settings);

    pick_with(
        picker,
        terminal_utils::init()?,
        &mut CrosstermEvents,
        terminal_utils::restore,
        &mut io::stdout().lock(),
    )
}

/// Runs `picker` on `terminal`, restores it, then reports the final value
/// on `out`. The UI never touches `out`.
fn pick_with<B: Backend>(
    picker: Picker<'_>,
    mut terminal: Terminal<B>,
    events: &mut impl EventSource,
    restore: impl FnOnce(Terminal<B>) -> Result<()>,
    out: &mut impl Write,
) -> Result<()> {
    let result = picker.run(&mut terminal, events);
    restore(terminal)?;

    terminal_utils::write_value(out, &result?)?;
    Ok(())
}

fn print_completions(shell: Shell) {
    let mut command = Args::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, &mut io::stdout());
}

/// Lists what the picker would show for `query`, one row per line.
///
/// Rows read `<check><value>\t<label>[\t<description>]` with matches
/// wrapped in brackets, followed by the result count when the query is not
/// empty.
fn render_filter_output(
    options: Vec<SelectOption>,
    config: ComboboxConfig,
    query: &str,
    value: &str,
) -> String {
    let mut combobox = Combobox::new(
        options,
        ComboboxConfig {
            disabled: false,
            ..config
        },
        |_: &str| {},
    );
    combobox.update(ComboboxAction::Activate);
    combobox.update(ComboboxAction::PasteIntoQuery(query.to_string()));

    let view = combobox.view(value);
    let Some(panel) = view.panel else {
        return String::new();
    };

    let mut output = String::new();

    match &panel.body {
        PanelBody::Empty(message) => {
            output += message;
            output += "\n";
        }
        PanelBody::Rows(rows) => {
            for row in rows {
                output += &format_row(row);
                output += "\n";
            }
        }
    }

    if let Some(count) = &panel.count {
        output += count;
        output += "\n";
    }

    output
}

fn format_row(row: &RowView) -> String {
    let check = if row.selected { "✓ " } else { "  " };
    let mut line = format!("{check}{}\t{}", row.value, format_segments(&row.label));

    if let Some(description) = &row.description {
        line += "\t";
        line += &format_segments(description);
    }

    line
}

fn format_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| {
            if segment.matched {
                format!("[{}]", segment.text)
            } else {
                segment.text.clone()
            }
        })
        .collect()
}
