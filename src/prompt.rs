use crate::types::Selection;
use std::io::{self, BufRead, Write};

pub const SELECTION_PROMPT: &str = "Enter 1 for Pa5/first or 2 Pa5/second: ";

/// Asks for the assignment variant and echoes the token back.
///
/// End of input is treated like any other unusable answer.
pub fn prompt_selection<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Selection> {
    write!(output, "{}", SELECTION_PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        writeln!(output)?;
        log::debug!("stdin closed before a selection was entered");
        return Ok(Selection::Invalid);
    }

    let token = line.trim();
    writeln!(output, "{}", token)?;
    let selection = Selection::parse(token);
    log::debug!("selection token {:?} parsed as {:?}", token, selection);
    Ok(selection)
}
