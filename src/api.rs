use crate::{
    errors::PathError,
    materializer::{self, ConsoleReporter, SilentReporter, Summary},
    preview, prompt,
    source::{self, Builtin, Source},
};

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum HinagataError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] source::SourceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Materialize(#[from] materializer::MaterializeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Prompt(#[from] prompt::PromptError),
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ApplyOptions {
    /// Preview the tree and ask before writing.
    pub interactive: bool,
    /// Suppress per-path progress lines.
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied(Summary),
    Canceled,
}

/// Materializes the manifest named by `reference` under `destination`, or under the
/// manifest's own root when no destination is given.
///
/// # Errors
///
/// Returns a [`HinagataError`] if:
///
/// - The manifest cannot be found, read or parsed.
/// - An entry is absolute or escapes the destination.
/// - A directory or file cannot be created or written to.
/// - The confirmation prompt fails in interactive mode.
pub fn apply(
    reference: &str,
    destination: Option<&str>,
    options: ApplyOptions,
) -> Result<Outcome, HinagataError> {
    let mut manifest = Source::resolve(reference)?;

    if let Some(destination) = destination {
        manifest = manifest.with_root(destination);
    }

    if options.interactive {
        preview::preview_as_tree(&manifest)?;

        if !prompt::confirm_apply()? {
            return Ok(Outcome::Canceled);
        }
    }

    let summary = if options.quiet {
        materializer::materialize(&manifest, &mut SilentReporter)?
    } else {
        materializer::materialize(&manifest, &mut ConsoleReporter)?
    };

    Ok(Outcome::Applied(summary))
}

/// Prints the tree the manifest would produce without writing anything.
///
/// # Errors
///
/// Returns a [`HinagataError`] if the manifest cannot be loaded or holds an invalid entry.
pub fn preview(reference: &str, destination: Option<&str>) -> Result<(), HinagataError> {
    let mut manifest = Source::resolve(reference)?;

    if let Some(destination) = destination {
        manifest = manifest.with_root(destination);
    }

    preview::preview_as_tree(&manifest)?;

    Ok(())
}

pub fn list() -> &'static [Builtin] {
    Source::builtins()
}
