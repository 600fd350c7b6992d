//! One module per subcommand.

pub mod auto;
pub mod extract;
pub mod learn_rj;
pub mod parse;
pub mod stats;

use std::path::Path;

use anyhow::Context;

/// Write rendered text to `output`, or to stdout when no path was given.
pub(crate) fn emit_text(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            println!("wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
