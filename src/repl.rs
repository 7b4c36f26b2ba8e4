use crate::runner::execute;
use log::debug;
use std::io::{self, BufRead, Write};

/// Line-based prompt. Every line is run as its own program; nothing carries
/// over between lines.
pub fn start() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_session(stdin.lock(), &mut stdout, |line| {
        execute(line, None);
    })
}

fn run_session<R, W, F>(mut input: R, output: &mut W, mut run_line: F) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str),
{
    writeln!(output, "JaxScript {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(output, "Type 'exit' or press Ctrl+D to quit")?;
    writeln!(output)?;

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // EOF (Ctrl+D or piped input ended)
            writeln!(output)?;
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            writeln!(output, "Goodbye!")?;
            break;
        }

        debug!("Running prompt line {:?}", line);
        run_line(line);
    }

    Ok(())
}
