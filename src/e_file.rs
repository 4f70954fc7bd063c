use crate::e_error::{FlowError, Result};
use crate::prelude::*;
use std::fmt;
use std::io::Read;

/// The contents carried by a file moving through the pipeline.
pub enum FileContents {
    /// No contents at all (directories, placeholders).
    Null,
    /// Contents that can only be consumed as a stream.
    Stream(Box<dyn Read + Send>),
    /// Contents held in memory.
    Buffer(Vec<u8>),
}

impl fmt::Debug for FileContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileContents::Null => f.write_str("Null"),
            FileContents::Stream(_) => f.write_str("Stream(..)"),
            FileContents::Buffer(bytes) => write!(f, "Buffer({} bytes)", bytes.len()),
        }
    }
}

/// A file object as handed from one pipeline stage to the next.
///
/// # Example
/// ```
/// use flow_e::PipelineFile;
///
/// let file = PipelineFile::buffer("src/app.js", "/* @flow */\nvar x = 1;");
/// assert!(file.is_buffer());
/// assert_eq!(file.text().as_deref(), Some("/* @flow */\nvar x = 1;"));
/// ```
#[derive(Debug)]
pub struct PipelineFile {
    pub path: PathBuf,
    pub contents: FileContents,
}

impl PipelineFile {
    pub fn null(path: impl Into<PathBuf>) -> Self {
        PipelineFile {
            path: path.into(),
            contents: FileContents::Null,
        }
    }

    pub fn stream(path: impl Into<PathBuf>, reader: Box<dyn Read + Send>) -> Self {
        PipelineFile {
            path: path.into(),
            contents: FileContents::Stream(reader),
        }
    }

    pub fn buffer(path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        PipelineFile {
            path: path.into(),
            contents: FileContents::Buffer(bytes.into()),
        }
    }

    /// Builds a pipeline file from something on disk: directories become
    /// `Null` files, regular files are read into a buffer.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let meta = fs::metadata(&path).map_err(|e| FlowError::io(&path, e))?;
        if meta.is_dir() {
            return Ok(PipelineFile::null(path));
        }
        let bytes = fs::read(&path).map_err(|e| FlowError::io(&path, e))?;
        Ok(PipelineFile::buffer(path, bytes))
    }

    pub fn is_null(&self) -> bool {
        matches!(self.contents, FileContents::Null)
    }

    pub fn is_stream(&self) -> bool {
        matches!(self.contents, FileContents::Stream(_))
    }

    pub fn is_buffer(&self) -> bool {
        matches!(self.contents, FileContents::Buffer(_))
    }

    /// Buffered contents decoded as UTF-8 (lossily). `None` for null and
    /// stream files.
    pub fn text(&self) -> Option<std::borrow::Cow<'_, str>> {
        match &self.contents {
            FileContents::Buffer(bytes) => Some(String::from_utf8_lossy(bytes)),
            _ => None,
        }
    }
}
