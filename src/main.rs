//! `windrules` command line front-end.
//!
//! ```text
//! windrules b-x-2 rounded-md b-red-500/50
//! windrules --theme theme.yaml --vars rounded-lg b-brand
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::Style;
use tracing_subscriber::EnvFilter;
use windrules::{border_rules, GenerationPass, Theme};

#[derive(Debug, Parser)]
#[command(name = "windrules", version, about = "Resolve border utility tokens to CSS")]
struct Args {
    /// Utility tokens to resolve
    #[arg(required_unless_present = "hints")]
    tokens: Vec<String>,

    /// Theme file (.json, .yaml or .yml); the built-in preset is used otherwise
    #[arg(long, value_name = "FILE")]
    theme: Option<PathBuf>,

    /// Also print `:root` variables for the theme keys the tokens used
    #[arg(long)]
    vars: bool,

    /// List the autocomplete hints of the rule table and exit
    #[arg(long)]
    hints: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.hints {
        for hint in border_rules().autocomplete() {
            println!("{}", hint);
        }
        return Ok(());
    }

    let theme = match &args.theme {
        Some(path) => Theme::load(path)
            .with_context(|| format!("failed to load theme from {}", path.display()))?,
        None => Theme::preset(),
    };

    let mut pass = GenerationPass::new(&theme);
    let sheet = pass.generate(&args.tokens);

    if args.vars {
        let variables = pass.theme_variables();
        if !variables.is_empty() {
            println!("{}", variables);
        }
    }
    if !sheet.css.is_empty() {
        println!("{}", sheet.css);
    }

    let warn = Style::new().yellow().bold();
    for token in &sheet.unmatched {
        eprintln!("{} no rule matched `{}`", warn.apply_to("warning:"), token);
    }

    Ok(())
}
