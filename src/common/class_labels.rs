use std::path::Path;
use regex::Regex;
use crate::error::PostProcessError;
use crate::utils;

/// Ordered class names; the index of a name is its class id.
///
/// Loaded once at start-up and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLabels {
    names: Vec<String>,
}

impl ClassLabels {
    /// Builds the label list from owned names, rejecting an empty list.
    pub fn new(names: Vec<String>) -> crate::Result<Self> {
        if names.is_empty() {
            return Err(PostProcessError::EmptyLabels);
        }
        Ok(Self { names })
    }

    /// Reads a line-delimited label file (`coco.names` style).
    ///
    /// Interior blank lines are kept as labels so later class ids do not shift;
    /// blank lines at the end of the file are dropped.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let mut names = utils::file_to_vec(path.as_ref())?;
        while names.last().is_some_and(|name| name.trim().is_empty()) {
            names.pop();
        }
        log::info!("Loaded {} class labels from {}", names.len(), path.as_ref().display());
        Self::new(names)
    }

    /// Parses labels out of model metadata.
    ///
    /// String format: `{0: 'person', 1: 'bicycle', 2: 'sports ball', ..., 27: "yellow_lady's_slipper"}`
    pub fn from_metadata(metadata: &str) -> crate::Result<Self> {
        let re = Regex::new(r#"(['"])([-()\w '"]+)(['"])"#)?;
        let names = re
            .captures_iter(metadata)
            .map(|x| x.extract())
            .map(|(_, [_, name, _])| name.to_string())
            .collect::<Vec<String>>();
        Self::new(names)
    }

    /// Placeholder names `# 0`, `# 1`, ... for models shipped without a label list.
    pub fn generated(n: usize) -> crate::Result<Self> {
        Self::new((0..n).map(|x| format!("# {}", x)).collect())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, class_id: usize) -> Option<&str> {
        self.names.get(class_id).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl std::ops::Index<usize> for ClassLabels {
    type Output = str;

    fn index(&self, class_id: usize) -> &Self::Output {
        &self.names[class_id]
    }
}
