use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Context;

/// Writes `value` as pretty JSON followed by a newline, to `output_path` or
/// to stdout when no path is given.
pub fn save_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    match output_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_json(BufWriter::new(file), value, &path.display().to_string())
        }
        None => write_json(io::stdout().lock(), value, "stdout"),
    }
}

fn write_json<W, T>(mut writer: W, value: &T, name: &str) -> anyhow::Result<()>
where
    W: Write,
    T: serde::Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {name}"))?;
    writeln!(writer).with_context(|| format!("Failed to write newline after JSON to {name}"))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush output to {name}"))?;
    Ok(())
}
