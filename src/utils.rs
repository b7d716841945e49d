use std::io::Write;

use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, QueueableCommand};
use log::debug;

/// Writes `msg` over the current line, leaving the cursor where it was.
pub fn rewrite_message<W: Write>(out: &mut W, msg: &str) -> crossterm::Result<()> {
    out.queue(cursor::SavePosition)?;
    out.queue(Clear(ClearType::UntilNewLine))?;
    out.write_all(msg.as_bytes())?;
    out.queue(cursor::RestorePosition)?;
    out.flush()?;
    Ok(())
}

/// Progress output is best effort; a failed write only shows up in debug logs.
pub fn print_progress<W: Write>(out: &mut W, done: usize, total: usize) -> bool {
    match rewrite_message(out, &format!("uploaded {} / {} files", done, total)) {
        Ok(()) => true,
        Err(err) => {
            debug!("failed to print upload progress due to {:?}", err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_message_between_cursor_commands() {
        let mut out = Vec::new();
        rewrite_message(&mut out, "uploaded 1 / 3 files").unwrap();

        let text = String::from_utf8(out).unwrap();
        let at = text.find("uploaded 1 / 3 files").unwrap();
        assert!(at > 0);
        assert!(at + "uploaded 1 / 3 files".len() < text.len());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn progress_survives_a_closed_output() {
        assert!(!print_progress(&mut BrokenPipe, 2, 3));

        let mut out = Vec::new();
        assert!(print_progress(&mut out, 2, 3));
        assert!(String::from_utf8(out).unwrap().contains("uploaded 2 / 3 files"));
    }
}
