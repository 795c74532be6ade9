use std::fmt::{Debug, Display};
use std::path::PathBuf;

pub trait ErrorType: Display + PartialEq {}

// Where an error happened. Text parsed from memory has no file, and a line of 0
// refers to the source as a whole
#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub file: Option<PathBuf>,
    pub line: usize
}

impl Location {
    pub fn line(line: usize) -> Self {
        Location { file: None, line }
    }

    pub fn file(file: PathBuf) -> Self {
        Location { file: Some(file), line: 0 }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.file, self.line) {
            (Some(file), 0) => write!(f, "{}", file.display()),
            (Some(file), line) => write!(f, "{}:{}", file.display(), line),
            (None, 0) => write!(f, "<input>"),
            (None, line) => write!(f, "line {}", line),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Error<T> {
    // Attaches the file the erroneous text was read from
    pub fn in_file(mut self, file: PathBuf) -> Self {
        self.location.file = Some(file);
        self
    }
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

impl<T: ErrorType + Debug> std::error::Error for Error<T> {}
