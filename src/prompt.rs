use colored::Colorize;
use inquire::Confirm;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PromptError {
    #[error("Error occurred trying to prompt user")]
    #[diagnostic(
        code(hinagata::prompt::inquire),
        help("Run from an interactive terminal, or drop --interactive")
    )]
    Inquire(#[from] inquire::InquireError),
}

/// Asks whether the previewed changes should be written. Defaults to no.
pub fn confirm_apply() -> Result<bool, PromptError> {
    let question = format!(
        "{} {}",
        "└─".bold().bright_blue(),
        "Apply these changes?".bright_green()
    );

    let answer = Confirm::new(&question).with_default(false).prompt()?;

    Ok(answer)
}
