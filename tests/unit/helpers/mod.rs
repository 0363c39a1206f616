//! Test helper utilities

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use bzip2::write::BzEncoder;
use flate2::write::GzEncoder;
use ttyr::ttyrec::{TtyrecVersion, TtyrecWriter};

/// How a synthetic recording is stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Bzip2,
    Gzip,
}

/// One record of a synthetic recording.
#[derive(Debug, Clone)]
pub enum Record {
    Output(Vec<u8>),
    Input(u8),
    Score(i32),
}

/// Builds recordings record by record, one timestamp tick apart.
pub struct RecordingBuilder {
    version: TtyrecVersion,
    records: Vec<Record>,
}

impl RecordingBuilder {
    pub fn new(version: TtyrecVersion) -> Self {
        Self {
            version,
            records: Vec::new(),
        }
    }

    pub fn output(mut self, payload: impl AsRef<[u8]>) -> Self {
        self.records.push(Record::Output(payload.as_ref().to_vec()));
        self
    }

    pub fn input(mut self, key: u8) -> Self {
        self.records.push(Record::Input(key));
        self
    }

    pub fn score(mut self, score: i32) -> Self {
        self.records.push(Record::Score(score));
        self
    }

    /// Encode the records, 10ms apart starting at second 1_600_000_000.
    pub fn bytes(&self) -> Vec<u8> {
        let mut writer = TtyrecWriter::new(Vec::new(), self.version);
        for (i, record) in self.records.iter().enumerate() {
            let usec = (i as u32) * 10_000;
            let (sec, usec) = (1_600_000_000 + usec / 1_000_000, usec % 1_000_000);
            match record {
                Record::Output(payload) => writer.output(sec, usec, payload),
                Record::Input(key) => writer.input(sec, usec, *key),
                Record::Score(score) => writer.score(sec, usec, *score),
            }
            .expect("write record");
        }
        writer.into_inner()
    }

    /// Write the recording to `dir/name`.
    pub fn write(&self, dir: &Path, name: &str, compression: Compression) -> PathBuf {
        let raw = self.bytes();
        let data = match compression {
            Compression::None => raw,
            Compression::Bzip2 => {
                let mut enc = BzEncoder::new(Vec::new(), bzip2::Compression::default());
                enc.write_all(&raw).unwrap();
                enc.finish().unwrap()
            }
            Compression::Gzip => {
                let mut enc = GzEncoder::new(Vec::new(), flate2::Compression::default());
                enc.write_all(&raw).unwrap();
                enc.finish().unwrap()
            }
        };
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, data).unwrap();
        path
    }
}

/// A short game: a greeting, a two-screen message, a menu page and a
/// status line with a turn counter.
pub fn sample_game(version: TtyrecVersion) -> RecordingBuilder {
    let mut game = RecordingBuilder::new(version)
        .output("\x1b[H\x1b[2JHello Agent, welcome to NetHack!")
        .output("\x1b[24;1HDlvl:1 $:0 HP:12(12) T:1");
    if version.has_channels() {
        game = game.input(b'l');
    }
    if version == TtyrecVersion::V3 {
        game = game.score(4);
    }
    game = game
        .output("\x1b[H\x1b[KYou find a hidden passage.--More--")
        .output("\x1b[H\x1b[KThe door opens.")
        .output("\x1b[2;40H a - a dagger\x1b[3;40H b - an apple\x1b[4;40H (1 of 2)");
    if version.has_channels() {
        game = game.input(b'\r');
    }
    game.output("\x1b[H\x1b[2J\x1b[24;1HDlvl:1 $:0 HP:12(12) T:2")
}
