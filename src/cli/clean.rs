//! CLI entry-point printing normalized text.

use anyhow::Result;
use clap::Args as ClapArgs;

use feedback_insights::clean_text;

/// Args for the `clean` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Text to normalize.
    pub text: String,
}

pub fn run(args: Args) -> Result<()> {
    println!("{}", clean_text(&args.text));
    Ok(())
}
