use crate::output::{ProductRecord, ProductSink};
use crate::OutputError;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Writes product records to one append-only JSONL file per domain
///
/// Files are named `<domain>.jsonl` under the run directory and opened
/// lazily on first write, so domains that yield no product links produce no
/// file.
pub struct JsonlSink {
    dir: PathBuf,
    files: Mutex<HashMap<String, File>>,
}

impl JsonlSink {
    /// Creates the sink, creating the run directory if needed
    pub fn new(dir: PathBuf) -> Result<Self, OutputError> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            files: Mutex::new(HashMap::new()),
        })
    }

    /// Path of the output file for a domain
    pub fn file_path(&self, domain: &str) -> PathBuf {
        // Ports contain ':', which is not filename-friendly everywhere.
        let name = domain.replace(':', "_");
        self.dir.join(format!("{}.jsonl", name))
    }
}

impl ProductSink for JsonlSink {
    fn append(&self, record: &ProductRecord) -> Result<(), OutputError> {
        let line = serde_json::to_string(record)?;

        let mut files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        let file = match files.get_mut(&record.domain) {
            Some(file) => file,
            None => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(self.file_path(&record.domain))?;
                files.entry(record.domain.clone()).or_insert(file)
            }
        };

        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }
}
