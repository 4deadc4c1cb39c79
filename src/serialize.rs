use crate::{Graph, InfectionError, Result, UidRegistry, UserId};
use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

impl Graph {
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::deserialize_csv(BufReader::new(File::open(path)?))
    }

    /// Reads one user per record: the uid first, followed by the uids of its students.
    /// Students that have no record of their own are created as they are referenced.
    pub fn deserialize_csv<R: BufRead>(reader: R) -> Result<Self> {
        Self::deserialize_csv_with_registry(reader, Arc::new(UidRegistry::new()))
    }

    /// Like [`Graph::deserialize_csv`], but uids are claimed in a registry shared with other graphs.
    pub fn deserialize_csv_with_registry<R: BufRead>(
        reader: R,
        registry: Arc<UidRegistry>,
    ) -> Result<Self> {
        let mut graph = Graph::with_registry(registry);
        let mut declared = HashSet::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;
            let record = line.trim();
            if record.is_empty() || record.starts_with('#') {
                continue;
            }

            let mut fields = record.split(',').map(str::trim);
            let uid = parse_uid(fields.next().unwrap_or_default(), line_number)?;
            if !declared.insert(uid) {
                return Err(InfectionError::DuplicateIdentifier(uid));
            }
            graph.ensure_user(uid)?;

            let mut students = Vec::new();
            for field in fields.filter(|f| !f.is_empty()) {
                let student = parse_uid(field, line_number)?;
                graph.ensure_user(student)?;
                students.push(student);
            }
            graph.add_students(uid, students)?;
        }
        Ok(graph)
    }

    /// Writes the graph in the format read by [`Graph::deserialize_csv`].
    pub fn serialize_csv<W: Write>(&self, mut writer: W) -> Result<()> {
        for user in self.users() {
            write!(writer, "{}", user.uid())?;
            for student in user.students() {
                write!(writer, ",{student}")?;
            }
            writeln!(writer)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.serialize_csv(BufWriter::new(File::create(path)?))
    }
}

fn parse_uid(field: &str, line: usize) -> Result<UserId> {
    field.parse().map_err(|_| InfectionError::Parse {
        line,
        message: format!("invalid uid {field:?}"),
    })
}

/// Writes one uid per line.
pub fn write_infected<W: Write>(mut writer: W, infected: &BTreeSet<UserId>) -> Result<()> {
    for uid in infected {
        writeln!(writer, "{uid}")?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_infected<P: AsRef<Path>>(path: P, infected: &BTreeSet<UserId>) -> Result<()> {
    write_infected(BufWriter::new(File::create(path)?), infected)
}
