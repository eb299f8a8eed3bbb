//! Interactive organize shell.
//!
//! Reads one command per line and drives an [`Organizer`]. Positions typed by
//! the user are 1-based display positions among the active pages, the way the
//! list view numbers them; `restore` takes original page numbers, the way the
//! removed section labels them.

use anyhow::{Result, anyhow, bail};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use sopdf::config::{OrganizeConfig, OverwriteMode};
use sopdf::organize::{Confirm, Organizer};
use sopdf::output::{OutputFormatter, display_error, display_save_summary};
use sopdf::utils::ensure_pdf_extension;
use sopdf::view::{PageView, ViewSynchronizer};
use sopdf::{SoPdfError, WindowState};

use crate::prompt::LinePrompt;

const PROMPT: &str = "sopdf> ";

const HELP: &[&str] = &[
    "Commands:",
    "  open FILE        Load a PDF (replaces the current one)",
    "  clear            Close the current PDF",
    "  list             Show pages as a list",
    "  grid             Show pages as a thumbnail grid",
    "  show             Show pages in the current view",
    "  width PIXELS     Fit the grid to a window this wide",
    "  move FROM TO     Move the page at position FROM onto position TO",
    "  up N             Move the page at position N up one place",
    "  down N           Move the page at position N down one place",
    "  remove N         Remove the page at position N",
    "  restore [N]      Restore original page N (no argument lists removed pages)",
    "  reset            Restore the original order and every removed page",
    "  status           Show page counts",
    "  save [FILE]      Save the active pages (default: <name>_organized.pdf)",
    "  help             Show this help",
    "  quit             Leave the shell",
];

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Open(PathBuf),
    Clear,
    List,
    Grid,
    Show,
    Width(u32),
    Move { from: usize, to: usize },
    Up(usize),
    Down(usize),
    Remove(usize),
    Restore(Option<usize>),
    Reset,
    Status,
    Save(Option<PathBuf>),
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse one input line. Blank lines and `#` comments give `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match word.to_lowercase().as_str() {
            "open" | "load" => Self::Open(path_arg(rest).ok_or_else(|| anyhow!("Usage: open FILE"))?),
            "clear" | "close" => Self::Clear,
            "list" => Self::List,
            "grid" | "preview" => Self::Grid,
            "show" | "ls" => Self::Show,
            "width" => match args.as_slice() {
                [width] => Self::Width(parse_number(width, "width")?),
                _ => bail!("Usage: width PIXELS"),
            },
            "move" | "mv" => match args.as_slice() {
                [from, to] => Self::Move {
                    from: parse_position(from)?,
                    to: parse_position(to)?,
                },
                _ => bail!("Usage: move FROM TO"),
            },
            "up" => Self::Up(single_position(&args, "up N")?),
            "down" => Self::Down(single_position(&args, "down N")?),
            "remove" | "rm" => Self::Remove(single_position(&args, "remove N")?),
            "restore" => match args.as_slice() {
                [] => Self::Restore(None),
                [page] => Self::Restore(Some(parse_position(page)?)),
                _ => bail!("Usage: restore [N]"),
            },
            "reset" => Self::Reset,
            "status" => Self::Status,
            "save" => Self::Save(path_arg(rest)),
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => bail!("Unknown command: {other} (type 'help' for a list)"),
        };
        Ok(Some(command))
    }
}

fn path_arg(rest: &str) -> Option<PathBuf> {
    let rest = rest.trim_matches(|c| c == '"' || c == '\'');
    (!rest.is_empty()).then(|| PathBuf::from(rest))
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow!("Invalid {what}: {value}"))
}

fn parse_position(value: &str) -> Result<usize> {
    match parse_number::<usize>(value, "page number")? {
        0 => bail!("Page numbers start at 1"),
        position => Ok(position),
    }
}

fn single_position(args: &[&str], usage: &str) -> Result<usize> {
    match args {
        [position] => parse_position(position),
        _ => bail!("Usage: {usage}"),
    }
}

/// The organize shell.
pub struct Shell {
    organizer: Organizer,
    formatter: OutputFormatter,
    overwrite_mode: OverwriteMode,
    assume_yes: bool,
    interactive: bool,
    window: WindowState,
    state_path: PathBuf,
}

impl Shell {
    /// Create a shell, restoring window state from `state_path`.
    pub fn new(config: &OrganizeConfig, formatter: OutputFormatter, state_path: PathBuf) -> Self {
        let window = WindowState::load_from(&state_path);
        let organizer = Organizer::with_views(ViewSynchronizer::with_window_width(window.width));
        Self {
            organizer,
            formatter,
            overwrite_mode: config.overwrite_mode,
            assume_yes: config.assume_yes,
            interactive: false,
            window,
            state_path,
        }
    }

    /// Print a prompt before each command.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// The organizer driven by this shell.
    #[cfg(test)]
    pub fn organizer(&self) -> &Organizer {
        &self.organizer
    }

    /// Whether the grid is the current view.
    #[cfg(test)]
    pub fn preview_mode(&self) -> bool {
        self.window.organize_preview_mode
    }

    /// Run until `quit` or end of input, optionally opening `initial` first.
    ///
    /// Command errors are reported and the loop carries on. When commands
    /// come from a script, an error that is not recoverable stops the run
    /// and is returned. Window state is saved on every way out.
    pub async fn run<R: BufRead>(&mut self, input: &mut R, initial: Option<&Path>) -> Result<()> {
        let result = self.read_commands(input, initial).await;
        self.window.save_to(&self.state_path);
        result
    }

    async fn read_commands<R: BufRead>(
        &mut self,
        input: &mut R,
        initial: Option<&Path>,
    ) -> Result<()> {
        if let Some(path) = initial {
            self.dispatch(ShellCommand::Open(path.to_path_buf()), input)
                .await?;
        }

        let mut line = String::new();
        loop {
            if self.interactive {
                print!("{PROMPT}");
                std::io::stdout().flush().ok();
            }

            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }

            match ShellCommand::parse(&line) {
                Ok(None) => {}
                Ok(Some(ShellCommand::Quit)) => return Ok(()),
                Ok(Some(command)) => self.dispatch(command, input).await?,
                Err(err) => self.report(&err),
            }
        }
    }

    async fn dispatch<R: BufRead>(&mut self, command: ShellCommand, input: &mut R) -> Result<()> {
        tracing::debug!(?command, "shell command");
        let Err(err) = self.execute(command, input).await else {
            return Ok(());
        };

        let recoverable = err
            .downcast_ref::<SoPdfError>()
            .is_none_or(SoPdfError::is_recoverable);
        if recoverable || self.interactive {
            self.report(&err);
            Ok(())
        } else {
            tracing::warn!(error = %err, "stopping command script");
            Err(err)
        }
    }

    fn report(&self, err: &anyhow::Error) {
        match err.downcast_ref::<SoPdfError>() {
            Some(err) => display_error(&self.formatter, err),
            None => self.formatter.error(&format!("{err:#}")),
        }
    }

    /// Run a single command.
    pub async fn execute<R: BufRead>(&mut self, command: ShellCommand, input: &mut R) -> Result<()> {
        match command {
            ShellCommand::Open(path) => {
                let session = self.organizer.open(&path).await?;
                self.formatter.success(&format!(
                    "Loaded {} ({} pages)",
                    session.file_name(),
                    session.page_count()
                ));
                self.show();
            }
            ShellCommand::Clear => {
                if self.organizer.is_loaded() {
                    self.organizer.clear();
                    self.formatter.info("Closed the current file");
                }
            }
            ShellCommand::List => {
                self.window.organize_preview_mode = false;
                self.show();
            }
            ShellCommand::Grid => {
                self.window.organize_preview_mode = true;
                self.show();
            }
            ShellCommand::Show => self.show(),
            ShellCommand::Width(width) => {
                self.window.width = width;
                self.organizer.fit_to_width(width);
                self.formatter.info(&format!(
                    "Grid fits {} columns",
                    self.organizer.views().grid().columns()
                ));
            }
            ShellCommand::Move { from, to } => {
                self.active_page(from)?;
                self.active_page(to)?;
                if self.organizer.move_to_position(from - 1, to - 1)? {
                    self.changed();
                }
            }
            ShellCommand::Up(position) => {
                let page = self.active_page(position)?;
                if self.organizer.move_up(page)? {
                    self.changed();
                } else {
                    self.formatter.info("Page is already first");
                }
            }
            ShellCommand::Down(position) => {
                let page = self.active_page(position)?;
                if self.organizer.move_down(page)? {
                    self.changed();
                } else {
                    self.formatter.info("Page is already last");
                }
            }
            ShellCommand::Remove(position) => {
                let page = self.active_page(position)?;
                let mut prompt = LinePrompt::new(input, &self.formatter, self.assume_yes);
                if self.organizer.remove(page, &mut prompt)? {
                    self.formatter.success(&format!("Removed page {}", page + 1));
                    self.changed();
                }
            }
            ShellCommand::Restore(page) => self.restore(page)?,
            ShellCommand::Reset => {
                let mut prompt = LinePrompt::new(input, &self.formatter, self.assume_yes);
                if self.organizer.reset(&mut prompt)? {
                    self.formatter.success("Restored the original page order");
                    self.changed();
                }
            }
            ShellCommand::Status => {
                self.formatter.lines(&[self.organizer.status()]);
            }
            ShellCommand::Save(path) => self.save(path, input).await?,
            ShellCommand::Help => self.formatter.lines(HELP),
            ShellCommand::Quit => {}
        }
        Ok(())
    }

    fn show(&self) {
        let views = self.organizer.views();
        let lines = if self.window.organize_preview_mode {
            views.grid().lines()
        } else {
            views.list().lines()
        };
        self.formatter.lines(lines);
        self.formatter.lines(&[self.organizer.status()]);
    }

    fn changed(&self) {
        self.formatter.info(&self.organizer.status());
    }

    /// Original page index shown at 1-based `position`.
    fn active_page(&self, position: usize) -> Result<usize> {
        self.organizer.session()?;
        let layout = self.organizer.views().layout();
        layout
            .active_at(position)
            .map(|entry| entry.page)
            .ok_or_else(|| {
                anyhow!(
                    "No page at position {position} ({} pages shown)",
                    layout.active.len()
                )
            })
    }

    fn restore(&mut self, page: Option<usize>) -> Result<()> {
        let order = self.organizer.session()?.order();
        let removed: Vec<usize> = order.removed().iter().copied().collect();

        let page = match (page, removed.as_slice()) {
            (Some(number), _) => {
                if number > order.page_count() {
                    bail!(
                        "Page {number} does not exist ({} pages)",
                        order.page_count()
                    );
                }
                number - 1
            }
            (None, []) => {
                self.formatter.info("No pages have been removed");
                return Ok(());
            }
            (None, [only]) => *only,
            (None, pages) => {
                self.formatter.info("Removed pages:");
                for page in pages {
                    self.formatter.lines(&[format!("  Page {}", page + 1)]);
                }
                self.formatter.info("Use 'restore N' to restore one of them");
                return Ok(());
            }
        };

        if self.organizer.restore(page)? {
            self.formatter.success(&format!("Restored page {}", page + 1));
            self.changed();
        } else {
            self.formatter.info(&format!("Page {} is not removed", page + 1));
        }
        Ok(())
    }

    async fn save<R: BufRead>(&mut self, path: Option<PathBuf>, input: &mut R) -> Result<()> {
        let session = self.organizer.session()?;
        if session.order().active_len() == 0 {
            return Err(SoPdfError::NoActivePages.into());
        }
        let output = path
            .map(ensure_pdf_extension)
            .unwrap_or_else(|| session.default_output_path());

        let mut prompt = LinePrompt::new(&mut *input, &self.formatter, self.assume_yes);
        prompt.allow_overwrite(&output, self.overwrite_mode)?;

        let summary = self.organizer.save(Some(&output)).await?;
        display_save_summary(&self.formatter, &summary);

        let mut prompt = LinePrompt::new(input, &self.formatter, self.assume_yes);
        if prompt.confirm(
            "Start Over",
            "Would you like to clear the current file and start over?",
        ) {
            self.organizer.clear();
        }
        Ok(())
    }
}
