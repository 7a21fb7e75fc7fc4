//! Parses a bitstream purely to check it succeeds, exiting nonzero on the
//! first error (`--strict` semantics is the only mode here: vparse has no
//! pixel reconstruction to fall back to, so there is nothing partial to
//! report).

use anyhow::Result;
use std::path::Path;

use super::{read_input, summarize};
use crate::Codec;

pub fn run(file: &Path, codec: Codec) -> Result<()> {
    let data = read_input(file)?;
    let pictures = summarize(codec, &data)?;
    println!("OK: {} picture(s) parsed from {}", pictures.len(), file.display());
    Ok(())
}
