//! `generate` subcommand.
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

/// Render Man pages for the command and its subcommands to the output
/// directory if specified, else the current directory.
///
/// # Errors
///
/// Returns an [`anyhow::Error`] if the output directory or a page file could
/// not be created.
pub fn generate_man_pages(cmd: &clap::Command, output_dir: Option<PathBuf>) -> Result<()> {
    let output_dir: PathBuf =
        output_dir.unwrap_or(std::env::current_dir().context("Opening current directory")?);

    std::fs::create_dir_all(&output_dir).context("create output Man directories")?;

    render_man_page(cmd.clone(), &output_dir, cmd.get_name().to_owned())?;

    // One page per subcommand, prefixed with the binary name so SEE ALSO
    // references resolve (jv-generate.1 and so on).
    for subcmd in cmd.get_subcommands() {
        let prefixed = format!("{}-{}", cmd.get_name(), subcmd.get_name());
        // The leaked &'static str is fine here since man page generation is
        // a one-shot operation.
        let leaked: &'static str = Box::leak(prefixed.clone().into_boxed_str());
        let renamed = subcmd.clone().name(leaked).disable_help_subcommand(true);
        render_man_page(renamed, &output_dir, prefixed)?;
    }

    Ok(())
}

/// Render a single command's page as `<name>.1` under `output_dir`.
fn render_man_page(cmd: clap::Command, output_dir: &Path, name: String) -> Result<()> {
    let man = clap_mangen::Man::new(cmd);
    let path = output_dir.join(format!("{name}.1"));
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    man.render(&mut file)?;
    file.flush()?;
    println!("Generated: {}", path.display());
    Ok(())
}
