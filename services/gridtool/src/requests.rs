//! Variable requests: which variables, at which time step, to export.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

/// One variable to export, optionally at a given time step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableRequest {
    pub name: String,
    pub time_step: Option<usize>,
}

impl VariableRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time_step: None,
        }
    }

    pub fn at(name: impl Into<String>, time_step: usize) -> Self {
        Self {
            name: name.into(),
            time_step: Some(time_step),
        }
    }
}

impl fmt::Display for VariableRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.time_step {
            Some(t) => write!(f, "{}@{}", self.name, t),
            None => write!(f, "{}", self.name),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestParseError {
    #[error("Empty variable name in request '{0}'")]
    EmptyName(String),

    #[error("Invalid time step in request '{0}'")]
    InvalidTimeStep(String),

    #[error("Cannot read request file {path}: {message}")]
    File { path: String, message: String },
}

impl FromStr for VariableRequest {
    type Err = RequestParseError;

    /// Parse `NAME` or `NAME@T`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, step) = match s.split_once('@') {
            Some((name, step)) => {
                let step = step
                    .trim()
                    .parse()
                    .map_err(|_| RequestParseError::InvalidTimeStep(s.to_string()))?;
                (name.trim(), Some(step))
            }
            None => (s, None),
        };

        if name.is_empty() {
            return Err(RequestParseError::EmptyName(s.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            time_step: step,
        })
    }
}

/// An ordered sequence of requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestList {
    requests: Vec<VariableRequest>,
}

impl RequestList {
    pub fn new(requests: Vec<VariableRequest>) -> Self {
        Self { requests }
    }

    /// Parse each argument as a request.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, RequestParseError> {
        let requests = args
            .iter()
            .map(|s| s.as_ref().parse())
            .collect::<Result<_, _>>()?;
        Ok(Self { requests })
    }

    /// Parse a request file: one request per line, blank lines and lines
    /// starting with `#` ignored.
    pub fn from_file(path: &Path) -> Result<Self, RequestParseError> {
        let text = std::fs::read_to_string(path).map_err(|e| RequestParseError::File {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_lines(&text)
    }

    pub fn from_lines(text: &str) -> Result<Self, RequestParseError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .collect();
        Self::parse(&lines)
    }

    /// Append another list.
    pub fn extend(&mut self, other: RequestList) {
        self.requests.extend(other.requests);
    }

    /// Apply `time_step` to every request that has none.
    pub fn with_default_time_step(mut self, time_step: Option<usize>) -> Self {
        if let Some(t) = time_step {
            for request in &mut self.requests {
                request.time_step.get_or_insert(t);
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VariableRequest> {
        self.requests.iter()
    }
}

impl<'a> IntoIterator for &'a RequestList {
    type Item = &'a VariableRequest;
    type IntoIter = std::slice::Iter<'a, VariableRequest>;

    fn into_iter(self) -> Self::IntoIter {
        self.requests.iter()
    }
}
