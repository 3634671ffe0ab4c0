// Integration tests for the edge-list serializer
//
// Drives a full partition lifecycle against real and fault-injecting filesystems

use flate2::read::GzDecoder;
use snb_datagen_config::{initialize, keys, Configuration};
use snb_datagen_serializer::{
    serializer_for, CsvDynamicPersonSerializer, FileSystem, Knows, LocalFileSystem, Person,
    PersonSerializer, PersonSummary, SerializerError, SerializerState, StudyAt, WorkAt,
};
use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn config_for(dir: &Path, extra: &[(&str, &str)]) -> Configuration {
    let mut builder = initialize().into_builder();
    builder.set(keys::SOCIAL_NETWORK_DIR, dir.to_string_lossy().to_string());
    builder.merge(extra.iter().copied());
    builder.build()
}

fn person_with_friends(id: i64, friends: &[i64]) -> Person {
    let mut person = Person::new(id);
    person.knows = friends
        .iter()
        .map(|f| Knows::new(PersonSummary { account_id: *f }))
        .collect();
    person.study_at = Some(StudyAt {
        person: id,
        university: 77,
        year: 2009,
    });
    person.work_at.push(WorkAt {
        person: id,
        company: 88,
        year: 2014,
    });
    person
}

#[test]
fn partition_lifecycle_on_local_disk() {
    let dir = tempfile::tempdir().unwrap();
    let conf = config_for(dir.path(), &[]);

    let mut serializer = CsvDynamicPersonSerializer::new(Arc::new(LocalFileSystem));
    serializer.initialize(&conf, 2).unwrap();
    serializer.write_file_headers().unwrap();
    serializer.export(&person_with_friends(1, &[2, 3])).unwrap();
    serializer.export(&person_with_friends(2, &[3])).unwrap();
    serializer.close().unwrap();

    let written =
        std::fs::read_to_string(dir.path().join("person_knows_person_2_0.csv")).unwrap();
    assert_eq!(written, "1 2\n1 3\n2 3\n");
    assert_eq!(serializer.state(), SerializerState::Closed);
}

#[test]
fn compressed_sub_partitions() {
    let dir = tempfile::tempdir().unwrap();
    let conf = config_for(
        dir.path(),
        &[
            (keys::COMPRESSED, "true"),
            (keys::NUM_PARTITIONS, "2"),
            (keys::ENDLINE_SEPARATOR, "true"),
        ],
    );

    let mut serializer = CsvDynamicPersonSerializer::new(Arc::new(LocalFileSystem));
    serializer.initialize(&conf, 0).unwrap();
    serializer.export(&person_with_friends(10, &[11, 12, 13])).unwrap();
    serializer.close().unwrap();

    let read_gz = |name: &str| {
        let bytes = std::fs::read(dir.path().join(name)).unwrap();
        let mut text = String::new();
        GzDecoder::new(bytes.as_slice())
            .read_to_string(&mut text)
            .unwrap();
        text
    };
    assert_eq!(read_gz("person_knows_person_0_0.csv.gz"), "10 11 \n10 13 \n");
    assert_eq!(read_gz("person_knows_person_0_1.csv.gz"), "10 12 \n");
}

#[test]
fn unwritable_directory_aborts_initialize() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, b"occupied").unwrap();

    let mut serializer = CsvDynamicPersonSerializer::new(Arc::new(LocalFileSystem));
    let err = serializer
        .initialize(&config_for(&blocker, &[]), 0)
        .unwrap_err();

    assert!(matches!(err, SerializerError::Open { .. }));
    assert_eq!(serializer.state(), SerializerState::Uninitialized);
    assert!(serializer.writer_names().is_empty());
}

#[test]
fn write_after_close_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut serializer = CsvDynamicPersonSerializer::new(Arc::new(LocalFileSystem));
    serializer.initialize(&config_for(dir.path(), &[]), 0).unwrap();
    serializer.close().unwrap();

    let err = serializer
        .serialize_knows(&Person::new(1), &Knows::new(PersonSummary { account_id: 2 }))
        .unwrap_err();
    assert!(matches!(
        err,
        SerializerError::InvalidState {
            state: SerializerState::Closed,
            ..
        }
    ));
    assert!(serializer.close().is_err());
}

/// Filesystem whose files accept writes but fail every flush
struct FlushFailingFileSystem {
    flushes: Arc<AtomicUsize>,
}

struct FlushFailingFile {
    flushes: Arc<AtomicUsize>,
}

impl Write for FlushFailingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Err(io::Error::other("disk quota exceeded"))
    }
}

impl FileSystem for FlushFailingFileSystem {
    fn create(&self, _path: &Path) -> io::Result<Box<dyn Write + Send>> {
        Ok(Box::new(FlushFailingFile {
            flushes: Arc::clone(&self.flushes),
        }))
    }
}

#[test]
fn close_attempts_every_writer_and_reports_failures() {
    let flushes = Arc::new(AtomicUsize::new(0));
    let fs = FlushFailingFileSystem {
        flushes: Arc::clone(&flushes),
    };
    let conf = config_for(Path::new("out"), &[(keys::NUM_PARTITIONS, "3")]);

    let mut serializer = CsvDynamicPersonSerializer::new(Arc::new(fs));
    serializer.initialize(&conf, 5).unwrap();
    serializer.export(&person_with_friends(1, &[2])).unwrap();
    let err = serializer.close().unwrap_err();

    match err {
        SerializerError::Close { failures } => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].writer, "person_knows_person_5");
        }
        other => panic!("unexpected error: {other}"),
    }
    // every sub-file was flushed despite the first failure
    assert_eq!(flushes.load(Ordering::SeqCst), 3);
    assert_eq!(serializer.state(), SerializerState::Closed);
}

#[test]
fn registry_serializer_drives_same_output() {
    let dir = tempfile::tempdir().unwrap();
    let conf = config_for(dir.path(), &[]);

    let mut serializer = serializer_for("pgx", Arc::new(LocalFileSystem)).unwrap();
    assert!(serializer.file_names().is_empty());
    serializer.initialize(&conf, 9).unwrap();
    serializer.export(&person_with_friends(4, &[5])).unwrap();
    serializer.close().unwrap();

    let written =
        std::fs::read_to_string(dir.path().join("person_knows_person_9_0.csv")).unwrap();
    assert_eq!(written, "4 5\n");
}
