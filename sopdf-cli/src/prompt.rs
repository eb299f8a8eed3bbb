//! Yes/no prompts read from a line-oriented input.

use std::io::{self, BufRead};
use std::path::Path;

use sopdf::config::OverwriteMode;
use sopdf::organize::Confirm;
use sopdf::output::OutputFormatter;
use sopdf::{Result, SoPdfError};

/// Read one answer line. EOF counts as "no".
pub fn read_yes_no<R: BufRead>(input: &mut R) -> io::Result<bool> {
    let mut response = String::new();
    if input.read_line(&mut response)? == 0 {
        return Ok(false);
    }
    let response = response.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

/// [`Confirm`] implementation asking on `input`.
pub struct LinePrompt<'a, R> {
    input: &'a mut R,
    formatter: &'a OutputFormatter,
    assume_yes: bool,
}

impl<'a, R: BufRead> LinePrompt<'a, R> {
    /// Create a prompt. With `assume_yes` nothing is read.
    pub fn new(input: &'a mut R, formatter: &'a OutputFormatter, assume_yes: bool) -> Self {
        Self {
            input,
            formatter,
            assume_yes,
        }
    }

    /// Decide whether `output` may be written under `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`SoPdfError::OutputExists`] under no-clobber (or a prompt in
    /// quiet mode) and [`SoPdfError::Cancelled`] if the user says no.
    pub fn allow_overwrite(&mut self, output: &Path, mode: OverwriteMode) -> Result<()> {
        if !output.exists() {
            return Ok(());
        }

        match mode {
            OverwriteMode::Force => Ok(()),
            OverwriteMode::NoClobber => Err(SoPdfError::output_exists(output.to_path_buf())),
            OverwriteMode::Prompt if self.assume_yes => Ok(()),
            OverwriteMode::Prompt => {
                // In quiet mode, treat as no-clobber
                if self.formatter.is_quiet() {
                    return Err(SoPdfError::output_exists(output.to_path_buf()));
                }

                let message = format!("Output file already exists: {}", output.display());
                if self.confirm("Overwrite?", &message) {
                    Ok(())
                } else {
                    Err(SoPdfError::Cancelled)
                }
            }
        }
    }
}

impl<R: BufRead> Confirm for LinePrompt<'_, R> {
    fn confirm(&mut self, title: &str, message: &str) -> bool {
        if self.assume_yes {
            tracing::debug!(title, "confirmed by --yes");
            return true;
        }

        self.formatter.warning(message);
        self.formatter.lines(&[format!("{title} [y/N]")]);
        match read_yes_no(&mut *self.input) {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read answer");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    #[rstest]
    #[case("y\n", true)]
    #[case("YES\n", true)]
    #[case(" yes \n", true)]
    #[case("n\n", false)]
    #[case("\n", false)]
    #[case("", false)]
    #[case("maybe\n", false)]
    fn test_read_yes_no(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(read_yes_no(&mut Cursor::new(input)).unwrap(), expected);
    }

    #[test]
    fn test_confirm_shows_message_and_reads_answer() {
        let (formatter, output) = OutputFormatter::captured(false, false);
        let mut input = Cursor::new("y\nn\n");
        let mut prompt = LinePrompt::new(&mut input, &formatter, false);

        assert!(prompt.confirm("Remove Page", "Remove page 2?"));
        assert!(!prompt.confirm("Remove Page", "Remove page 3?"));
        assert_eq!(
            output.contents(),
            "⚠ Remove page 2?\nRemove Page [y/N]\n⚠ Remove page 3?\nRemove Page [y/N]\n"
        );
    }

    #[test]
    fn test_assume_yes_reads_nothing() {
        let (formatter, output) = OutputFormatter::captured(false, false);
        let mut input = Cursor::new("n\n");
        let mut prompt = LinePrompt::new(&mut input, &formatter, true);

        assert!(prompt.confirm("Reset Order", "Reset?"));
        assert!(output.contents().is_empty());
        assert_eq!(input.position(), 0);
    }

    #[test]
    fn test_allow_overwrite_modes() {
        let existing = NamedTempFile::new().unwrap();
        let formatter = OutputFormatter::captured(false, false).0;
        let mut input = Cursor::new("n\n");
        let mut prompt = LinePrompt::new(&mut input, &formatter, false);

        assert!(prompt.allow_overwrite(existing.path(), OverwriteMode::Force).is_ok());
        assert!(matches!(
            prompt.allow_overwrite(existing.path(), OverwriteMode::NoClobber),
            Err(SoPdfError::OutputExists { .. })
        ));
        assert!(matches!(
            prompt.allow_overwrite(existing.path(), OverwriteMode::Prompt),
            Err(SoPdfError::Cancelled)
        ));
        assert!(
            prompt
                .allow_overwrite(Path::new("/nonexistent/out.pdf"), OverwriteMode::NoClobber)
                .is_ok()
        );
    }

    #[test]
    fn test_allow_overwrite_quiet_prompt_refuses() {
        let existing = NamedTempFile::new().unwrap();
        let formatter = OutputFormatter::captured(true, false).0;
        let mut input = Cursor::new("y\n");
        let mut prompt = LinePrompt::new(&mut input, &formatter, false);

        assert!(matches!(
            prompt.allow_overwrite(existing.path(), OverwriteMode::Prompt),
            Err(SoPdfError::OutputExists { .. })
        ));
    }
}
