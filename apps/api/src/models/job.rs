use serde::{Deserialize, Deserializer, Serialize};

/// One row of the jobs table. Its position in the table is its identity and
/// must match the row of the job vector matrix describing it.
///
/// Both columns must be present in the source; their values may be null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(deserialize_with = "nullable_text")]
    pub role: Option<String>,
    #[serde(deserialize_with = "nullable_text")]
    pub description: Option<String>,
}

impl JobPosting {
    pub fn new(role: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            description: Some(description.into()),
        }
    }
}

fn nullable_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_values_allowed() {
        let job: JobPosting =
            serde_json::from_str(r#"{"role": null, "description": "Builds pipelines"}"#).unwrap();
        assert_eq!(job.role, None);
        assert_eq!(job.description.as_deref(), Some("Builds pipelines"));
    }

    #[test]
    fn test_missing_column_rejected() {
        let result = serde_json::from_str::<JobPosting>(r#"{"role": "Data Analyst"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_extra_columns_ignored() {
        let job: JobPosting = serde_json::from_str(
            r#"{"role": "Data Analyst", "description": "SQL reports", "company": "Acme"}"#,
        )
        .unwrap();
        assert_eq!(job, JobPosting::new("Data Analyst", "SQL reports"));
    }
}
