use std::io::BufRead;
use std::io::Write;

use log::debug;

use crate::error::Error;
use crate::error::Result;
use crate::schema::Stream;

pub const PROMPT: &str = "Which would you like to play?\n> ";

pub fn print_streams<W: Write>(streams: &[Stream], mut out: W) -> Result<()> {
    for (i, stream) in streams.iter().enumerate() {
        writeln!(out, "{i} -> {}", stream.title())?;
        writeln!(out, "     {:<15} {}", stream.listeners(), stream.location())?;
        for line in stream.info() {
            writeln!(out, "     {line}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Prompts until a valid index is read.  Out-of-range numbers are re-prompted
/// without a message; only end of input stops the loop.
pub fn choose_stream<'s, R: BufRead, W: Write>(
    streams: &'s [Stream],
    mut input: R,
    mut out: W,
) -> Result<&'s Stream> {
    let mut line = String::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(Error::InputClosed);
        }
        let i = match line.trim().parse::<i64>() {
            Ok(i) => i,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };
        match usize::try_from(i).ok().and_then(|i| streams.get(i)) {
            Some(stream) => return Ok(stream),
            None => debug!("Index {i} is out of range"),
        }
    }
}
