//! Delimited-text partition writer
//!
//! One `PartitionWriter` owns every physical sub-file of one logical output
//! file. Sub-file naming:
//! `{dir}/{name}_{i}.csv` (or `.csv.gz` when compressed), `i` in `0..num_partitions`.
//! Records rotate round-robin across the sub-files.

use crate::error::{Result, SerializerError};
use crate::storage::FileSystem;
use flate2::write::GzEncoder;
use flate2::Compression;
use snb_datagen_config::{keys, Configuration};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Construction-time writer settings; never changed afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    pub num_partitions: usize,
    pub compressed: bool,
    pub separator: String,
    /// Append a trailing separator before each line break
    pub endline_separator: bool,
}

impl WriterOptions {
    /// Read the per-serializer writer keys, with `separator` fixed by the variant
    pub fn from_config(config: &Configuration, separator: &str) -> Result<Self> {
        let num_partitions = config.get_int_or(keys::NUM_PARTITIONS, 1)?;
        let num_partitions = usize::try_from(num_partitions)
            .ok()
            .filter(|n| *n > 0)
            .ok_or(SerializerError::InvalidPartitionCount(num_partitions))?;

        Ok(Self {
            num_partitions,
            compressed: config.get_bool_or(keys::COMPRESSED, false)?,
            separator: separator.to_string(),
            endline_separator: config.get_bool_or(keys::ENDLINE_SEPARATOR, false)?,
        })
    }
}

type RawSink = BufWriter<Box<dyn Write + Send>>;

enum Sink {
    Plain(RawSink),
    Gzip(GzEncoder<RawSink>),
}

impl Sink {
    fn finish(self) -> io::Result<()> {
        match self {
            Sink::Plain(mut w) => w.flush(),
            Sink::Gzip(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Plain(w) => w.write(buf),
            Sink::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Plain(w) => w.flush(),
            Sink::Gzip(w) => w.flush(),
        }
    }
}

pub struct PartitionWriter {
    name: String,
    separator: String,
    endline_separator: bool,
    paths: Vec<PathBuf>,
    sinks: Vec<Sink>,
    current: usize,
    line: String,
}

impl PartitionWriter {
    /// Open every sub-file for `name` under `dir`.
    ///
    /// Fails on the first sub-file that cannot be created; the ones already
    /// opened are dropped with the partially built writer.
    pub fn create(
        fs: &dyn FileSystem,
        dir: &Path,
        name: &str,
        options: &WriterOptions,
    ) -> Result<Self> {
        if options.num_partitions == 0 {
            return Err(SerializerError::InvalidPartitionCount(0));
        }

        let mut paths = Vec::with_capacity(options.num_partitions);
        let mut sinks = Vec::with_capacity(options.num_partitions);
        for i in 0..options.num_partitions {
            let path = sub_file_path(dir, name, i, options.compressed);
            let raw = fs.create(&path).map_err(|source| SerializerError::Open {
                path: path.clone(),
                source,
            })?;
            let raw = BufWriter::new(raw);
            let sink = if options.compressed {
                Sink::Gzip(GzEncoder::new(raw, Compression::default()))
            } else {
                Sink::Plain(raw)
            };
            debug!(path = %path.display(), "Opened partition file");
            paths.push(path);
            sinks.push(sink);
        }

        Ok(Self {
            name: name.to_string(),
            separator: options.separator.clone(),
            endline_separator: options.endline_separator,
            paths,
            sinks,
            current: 0,
            line: String::new(),
        })
    }

    /// Logical name, `<kind>_<partition>`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Write the header line to every sub-file
    pub fn write_header<S: AsRef<str>>(&mut self, columns: &[S]) -> Result<()> {
        self.format_line(columns);
        for (sink, path) in self.sinks.iter_mut().zip(&self.paths) {
            sink.write_all(self.line.as_bytes())
                .map_err(|source| SerializerError::Write {
                    path: path.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Write one record to the next sub-file in rotation
    pub fn write_entry<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<()> {
        self.format_line(fields);
        let index = self.current;
        self.sinks[index]
            .write_all(self.line.as_bytes())
            .map_err(|source| SerializerError::Write {
                path: self.paths[index].clone(),
                source,
            })?;
        self.current = (index + 1) % self.sinks.len();
        Ok(())
    }

    /// Flush and release every sub-file.
    ///
    /// All sub-files are finished even if one fails; the first error is returned.
    pub fn close(self) -> io::Result<()> {
        let mut first_error = None;
        for (sink, path) in self.sinks.into_iter().zip(&self.paths) {
            if let Err(e) = sink.finish() {
                debug!(path = %path.display(), error = %e, "Failed to finish partition file");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn format_line<S: AsRef<str>>(&mut self, fields: &[S]) {
        self.line.clear();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.line.push_str(&self.separator);
            }
            self.line.push_str(field.as_ref());
        }
        if self.endline_separator {
            self.line.push_str(&self.separator);
        }
        self.line.push('\n');
    }
}

/// Physical path of sub-file `index` of the logical file `name`
pub fn sub_file_path(dir: &Path, name: &str, index: usize, compressed: bool) -> PathBuf {
    let extension = if compressed { ".csv.gz" } else { ".csv" };
    dir.join(format!("{}_{}{}", name, index, extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryFileSystem;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn options(num_partitions: usize, compressed: bool, endline: bool) -> WriterOptions {
        WriterOptions {
            num_partitions,
            compressed,
            separator: " ".to_string(),
            endline_separator: endline,
        }
    }

    fn text(fs: &MemoryFileSystem, path: &str) -> String {
        String::from_utf8(fs.contents(path).unwrap()).unwrap()
    }

    #[test]
    fn test_sub_file_path() {
        assert_eq!(
            sub_file_path(Path::new("out"), "person_knows_person_3", 0, false),
            PathBuf::from("out/person_knows_person_3_0.csv")
        );
        assert_eq!(
            sub_file_path(Path::new("out"), "x_1", 2, true),
            PathBuf::from("out/x_1_2.csv.gz")
        );
    }

    #[test]
    fn test_write_entry_single_partition() {
        let fs = MemoryFileSystem::new();
        let mut writer =
            PartitionWriter::create(&fs, Path::new("out"), "edges_0", &options(1, false, false))
                .unwrap();
        writer.write_entry(&["1", "2"]).unwrap();
        writer.write_entry(&["3", "4"]).unwrap();
        writer.close().unwrap();

        assert_eq!(text(&fs, "out/edges_0_0.csv"), "1 2\n3 4\n");
    }

    #[test]
    fn test_endline_separator() {
        let fs = MemoryFileSystem::new();
        let mut writer =
            PartitionWriter::create(&fs, Path::new("out"), "edges_0", &options(1, false, true))
                .unwrap();
        writer.write_entry(&["1", "2"]).unwrap();
        writer.close().unwrap();

        assert_eq!(text(&fs, "out/edges_0_0.csv"), "1 2 \n");
    }

    #[test]
    fn test_round_robin_across_sub_files() {
        let fs = MemoryFileSystem::new();
        let mut writer =
            PartitionWriter::create(&fs, Path::new("out"), "edges_7", &options(2, false, false))
                .unwrap();
        assert_eq!(writer.paths().len(), 2);
        for (a, b) in [("1", "2"), ("3", "4"), ("5", "6")] {
            writer.write_entry(&[a, b]).unwrap();
        }
        writer.close().unwrap();

        assert_eq!(text(&fs, "out/edges_7_0.csv"), "1 2\n5 6\n");
        assert_eq!(text(&fs, "out/edges_7_1.csv"), "3 4\n");
    }

    #[test]
    fn test_header_goes_to_every_sub_file() {
        let fs = MemoryFileSystem::new();
        let mut writer =
            PartitionWriter::create(&fs, Path::new("out"), "p_0", &options(2, false, false))
                .unwrap();
        writer.write_header(&["Person.id", "Person.id"]).unwrap();
        writer.write_entry(&["1", "2"]).unwrap();
        writer.close().unwrap();

        assert_eq!(text(&fs, "out/p_0_0.csv"), "Person.id Person.id\n1 2\n");
        assert_eq!(text(&fs, "out/p_0_1.csv"), "Person.id Person.id\n");
    }

    #[test]
    fn test_compressed_output_is_gzip() {
        let fs = MemoryFileSystem::new();
        let mut writer =
            PartitionWriter::create(&fs, Path::new("out"), "edges_0", &options(1, true, false))
                .unwrap();
        writer.write_entry(&["10", "20"]).unwrap();
        writer.close().unwrap();

        let bytes = fs.contents("out/edges_0_0.csv.gz").unwrap();
        let mut decoded = String::new();
        GzDecoder::new(bytes.as_slice())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, "10 20\n");
    }

    #[test]
    fn test_zero_partitions_rejected() {
        let fs = MemoryFileSystem::new();
        let result =
            PartitionWriter::create(&fs, Path::new("out"), "edges_0", &options(0, false, false));
        assert!(matches!(
            result,
            Err(SerializerError::InvalidPartitionCount(0))
        ));
    }

    #[test]
    fn test_options_from_config() {
        let mut builder = snb_datagen_config::initialize().into_builder();
        builder
            .set(keys::NUM_PARTITIONS, "4")
            .set(keys::COMPRESSED, "true")
            .set(keys::ENDLINE_SEPARATOR, "true");
        let opts = WriterOptions::from_config(&builder.build(), " ").unwrap();
        assert_eq!(opts, options(4, true, true));
    }

    #[test]
    fn test_options_reject_negative_partitions() {
        let mut builder = snb_datagen_config::initialize().into_builder();
        builder.set(keys::NUM_PARTITIONS, "-2");
        assert!(matches!(
            WriterOptions::from_config(&builder.build(), " "),
            Err(SerializerError::InvalidPartitionCount(-2))
        ));
    }
}
