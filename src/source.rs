//! Record adapters: where department, cost-center, employee and absence
//! batches come from.
//!
//! Each connection names one source in its configuration; [`resolve`] turns
//! that into a concrete [`RecordSource`] once, at startup. Sources are thin
//! readers with no knowledge of the submission pipeline.

use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::SourceConfig;
use crate::records::{Absence, CostCenter, Department, Employee, HistorySpan};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A connection's window onto one external system. Every capability must
/// tolerate empty results; cost centers commonly return none.
pub trait RecordSource {
    fn departments(&self) -> Result<Vec<Department>, SourceError>;
    fn cost_centers(&self) -> Result<Vec<CostCenter>, SourceError>;
    fn personnel(&self) -> Result<Vec<Employee>, SourceError>;
    fn absences(&self) -> Result<Vec<Absence>, SourceError>;
}

/// Static registry: configuration kind to adapter, resolved once at
/// configuration-load time.
pub fn resolve(config: &SourceConfig) -> Box<dyn RecordSource> {
    match config {
        SourceConfig::Sample => Box::new(SampleSource),
        SourceConfig::JsonFile { path } => Box::new(JsonFileSource::new(PathBuf::from(path))),
    }
}

/// Embedded demo data, handy for trying the tool against a test tenant.
pub struct SampleSource;

impl RecordSource for SampleSource {
    fn departments(&self) -> Result<Vec<Department>, SourceError> {
        Ok(vec![
            Department {
                external_id: "dep1".into(),
                names: [
                    ("en".to_string(), "Department 1".to_string()),
                    ("fi".to_string(), "Osasto 1".to_string()),
                    ("sv".to_string(), "Avdelning 1".to_string()),
                ]
                .into(),
            },
            Department {
                external_id: "dep2".into(),
                names: [
                    ("en".to_string(), "Department 2".to_string()),
                    ("fi".to_string(), "Osasto 2".to_string()),
                    ("sv".to_string(), "Avdelning 2".to_string()),
                ]
                .into(),
            },
        ])
    }

    fn cost_centers(&self) -> Result<Vec<CostCenter>, SourceError> {
        Ok(vec![])
    }

    fn personnel(&self) -> Result<Vec<Employee>, SourceError> {
        Ok(vec![
            Employee {
                external_id: "ceo".into(),
                ssn: Some("090977-954P".into()),
                call_name: "Cecily".into(),
                last_name: "Ceo".into(),
                email_address: Some("ceo@company.com".into()),
                local_phone_number: Some("0101234567".into()),
                start_date: "2016-01-02".into(),
                end_date: None,
                departments: vec![
                    HistorySpan {
                        external_id: "dep2".into(),
                        start_date: "2016-01-02".into(),
                        end_date: Some("2016-12-31".into()),
                    },
                    HistorySpan {
                        external_id: "dep1".into(),
                        start_date: "2017-01-01".into(),
                        end_date: None,
                    },
                ],
                supervisors: vec![],
            },
            Employee {
                external_id: "emp1".into(),
                ssn: Some("161165-951M".into()),
                call_name: "Adam".into(),
                last_name: "Ant".into(),
                email_address: Some("adam.ant@company.com".into()),
                local_phone_number: Some("0101122334".into()),
                start_date: "2018-01-02".into(),
                end_date: Some("2020-12-31".into()),
                departments: vec![HistorySpan {
                    external_id: "dep1".into(),
                    start_date: "2018-01-02".into(),
                    end_date: Some("2020-12-31".into()),
                }],
                supervisors: vec![HistorySpan {
                    external_id: "ceo".into(),
                    start_date: "2018-01-02".into(),
                    end_date: Some("2020-12-31".into()),
                }],
            },
        ])
    }

    fn absences(&self) -> Result<Vec<Absence>, SourceError> {
        Ok(vec![
            Absence {
                external_id: "emp1".into(),
                start_date: "2020-03-02".into(),
                end_date: "2020-03-06".into(),
            },
            Absence {
                external_id: "ceo".into(),
                start_date: "2020-07-01".into(),
                end_date: "2020-07-28".into(),
            },
        ])
    }
}

/// Reads each batch from a JSON file in one directory. A missing file means
/// the source has no data of that kind and yields an empty batch.
pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, SourceError> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let display = path.display().to_string();
        let text = fs::read_to_string(&path).map_err(|source| SourceError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| SourceError::Json {
            path: display,
            source,
        })
    }
}

impl RecordSource for JsonFileSource {
    fn departments(&self) -> Result<Vec<Department>, SourceError> {
        self.read("departments.json")
    }

    fn cost_centers(&self) -> Result<Vec<CostCenter>, SourceError> {
        self.read("cost_centers.json")
    }

    fn personnel(&self) -> Result<Vec<Employee>, SourceError> {
        self.read("employees.json")
    }

    fn absences(&self) -> Result<Vec<Absence>, SourceError> {
        self.read("absences.json")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn sample_source_has_all_capabilities() {
        let source = SampleSource;
        assert_eq!(source.departments().unwrap().len(), 2);
        assert!(source.cost_centers().unwrap().is_empty());
        assert_eq!(source.personnel().unwrap().len(), 2);
        assert_eq!(source.absences().unwrap().len(), 2);
    }

    #[test]
    fn sample_employees_carry_history_spans() {
        let personnel = SampleSource.personnel().unwrap();
        let ceo = &personnel[0];
        assert_eq!(ceo.departments.len(), 2);
        assert!(ceo.departments[1].end_date.is_none());
        assert_eq!(personnel[1].supervisors[0].external_id, "ceo");
    }

    #[test]
    fn resolve_picks_the_configured_source() {
        let source = resolve(&SourceConfig::Sample);
        assert_eq!(source.departments().unwrap().len(), 2);

        let dir = TempDir::new().unwrap();
        let source = resolve(&SourceConfig::JsonFile {
            path: dir.path().display().to_string(),
        });
        assert!(source.departments().unwrap().is_empty());
    }

    #[test]
    fn json_file_source_reads_batches() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("departments.json"),
            r#"[{"externalId": "d9", "names": {"en": "Sales"}}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("absences.json"),
            r#"[{"externalId": "e3", "startDate": "2021-01-04", "endDate": "2021-01-08"}]"#,
        )
        .unwrap();

        let source = JsonFileSource::new(dir.path().to_path_buf());
        let departments = source.departments().unwrap();
        assert_eq!(departments.len(), 1);
        assert_eq!(departments[0].external_id, "d9");
        assert_eq!(source.absences().unwrap()[0].start_date, "2021-01-04");
    }

    #[test]
    fn missing_file_is_an_empty_batch() {
        let dir = TempDir::new().unwrap();
        let source = JsonFileSource::new(dir.path().to_path_buf());
        assert!(source.cost_centers().unwrap().is_empty());
    }

    #[test]
    fn undecodable_file_is_a_json_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("employees.json"), "not json").unwrap();

        let source = JsonFileSource::new(dir.path().to_path_buf());
        let err = source.personnel().unwrap_err();
        assert!(matches!(err, SourceError::Json { .. }));
        assert!(err.to_string().contains("employees.json"));
    }
}
