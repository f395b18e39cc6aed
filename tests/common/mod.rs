// Test utility module for jsdce integration tests
#![allow(dead_code)]

use jsdce::{Analyzer, AnalyzerRun, InvocationArguments, Result, TaskConfig};
use std::cell::RefCell;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Build an in-memory zip archive from `(entry name, content)` pairs
pub fn create_zip(files: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let cursor = Cursor::new(&mut buf);
        let mut writer = zip::ZipWriter::new(cursor);
        let options = SimpleFileOptions::default();

        for (path, content) in files {
            writer.start_file(*path, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }
    buf
}

/// One call observed by [`RecordingAnalyzer`]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub arguments: InvocationArguments,
    /// Whether the scratch directory existed while the analyzer ran
    pub scratch_present: bool,
    /// Contents of each input file at call time
    pub input_contents: Vec<String>,
}

/// Analyzer double that records its calls and replies with a fixed run
pub struct RecordingAnalyzer {
    scratch: PathBuf,
    reply: AnalyzerRun,
    calls: RefCell<Vec<RecordedCall>>,
}

impl RecordingAnalyzer {
    pub fn succeeding(scratch: impl Into<PathBuf>) -> Self {
        Self::replying(scratch, AnalyzerRun::success())
    }

    pub fn failing(scratch: impl Into<PathBuf>, code: i32) -> Self {
        Self::replying(scratch, AnalyzerRun::failure(code, "analysis failed"))
    }

    pub fn replying(scratch: impl Into<PathBuf>, reply: AnalyzerRun) -> Self {
        Self {
            scratch: scratch.into(),
            reply,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn single_call(&self) -> RecordedCall {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one analyzer call");
        calls.into_iter().next().unwrap()
    }
}

impl Analyzer for RecordingAnalyzer {
    fn analyze(&self, args: &InvocationArguments) -> Result<AnalyzerRun> {
        let input_contents = args
            .inputs
            .iter()
            .map(|p| fs::read_to_string(p).unwrap_or_default())
            .collect();
        self.calls.borrow_mut().push(RecordedCall {
            arguments: args.clone(),
            scratch_present: self.scratch.is_dir(),
            input_contents,
        });
        Ok(self.reply.clone())
    }
}

/// Temporary project with a destination directory, sources and libraries
pub struct DceFixture {
    pub temp: TempDir,
}

impl DceFixture {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn destination(&self) -> PathBuf {
        self.root().join("build").join("dce")
    }

    pub fn scratch(&self) -> PathBuf {
        self.destination().join("js-dependencies")
    }

    /// Write a declared source file and return its path
    pub fn source(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join("src").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a jar containing `entries` and return its path
    pub fn jar(&self, name: &str, entries: &[(&str, &str)]) -> PathBuf {
        let path = self.root().join("libs").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, create_zip(entries)).unwrap();
        path
    }

    /// Write an arbitrary (possibly corrupt) file posing as an archive
    pub fn raw_archive(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.root().join("libs").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, bytes).unwrap();
        path
    }

    pub fn config(&self) -> TaskConfig {
        TaskConfig::new(self.destination())
    }

    pub fn recording_analyzer(&self) -> RecordingAnalyzer {
        RecordingAnalyzer::succeeding(self.scratch())
    }
}

impl Default for DceFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Input file names relative to their parent directory
pub fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}
