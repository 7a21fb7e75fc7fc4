//! Prints a one-line-per-picture summary of a bitstream.

use anyhow::Result;
use std::path::Path;

use super::{read_input, summarize};
use crate::Codec;

pub fn run(file: &Path, codec: Codec) -> Result<()> {
    let data = read_input(file)?;
    println!("{}: {} bytes", file.display(), data.len());

    let pictures = summarize(codec, &data)?;
    if pictures.is_empty() {
        println!("(no pictures found)");
        return Ok(());
    }
    for picture in &pictures {
        println!("[{:>4}] {:<10} {}", picture.index, picture.kind, picture.detail);
    }
    println!("{} picture(s)", pictures.len());
    Ok(())
}
