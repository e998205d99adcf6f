use std::io::Write;

use serde::Serialize;

use crate::error::CliError;

/// Writes `value` to stdout as one JSON document followed by a newline.
pub fn render_json<T>(value: &T, pretty: bool) -> Result<(), CliError>
where
    T: Serialize + ?Sized,
{
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value, pretty)?;
    handle.flush()?;
    Ok(())
}

fn write_json<W, T>(writer: &mut W, value: &T, pretty: bool) -> Result<(), CliError>
where
    W: Write,
    T: Serialize + ?Sized,
{
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, value)?;
    } else {
        serde_json::to_writer(&mut *writer, value)?;
    }
    writer.write_all(b"\n")?;
    Ok(())
}
