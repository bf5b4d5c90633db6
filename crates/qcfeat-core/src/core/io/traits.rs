use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// A table that can be read from and written to a delimited text file.
///
/// Implementors provide the stream-based methods; the path-based variants
/// open the file and wrap it in a buffered reader or writer.
pub trait TabularFile: Sized {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a complete table from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the header is invalid, a row cannot be decoded,
    /// or the underlying reader fails.
    fn read_from(reader: &mut impl BufRead) -> Result<Self, Self::Error>;

    /// Writes the table, header first, to `writer`.
    fn write_to(&self, writer: &mut impl Write) -> Result<(), Self::Error>;

    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
