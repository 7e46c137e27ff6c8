use serde::{Deserialize, Serialize};

/// Per job run state as reported by the graph/csv feed. This is a read only
/// projection, the JSON job endpoint never carries these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatus {
    pub name: String,
    pub last_outcome: String,
    pub status: String,
}

impl JobStatus {
    /// Parses the newline delimited feed. Only lines with exactly four comma
    /// separated fields count, the first field is feed internal and dropped.
    /// Order is preserved and names are not deduplicated. Line endings may be
    /// CRLF, the trailing carriage return never reaches the status field.
    pub fn parse_feed(feed: &str) -> Vec<JobStatus> {
        feed.lines()
            .filter_map(|line| {
                let fields: Vec<&str> = line.split(',').collect();
                if fields.len() != 4 {
                    return None;
                }
                Some(JobStatus {
                    name: fields[1].to_owned(),
                    last_outcome: fields[2].to_owned(),
                    status: fields[3].to_owned(),
                })
            })
            .collect()
    }
}
