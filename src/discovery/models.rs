//! Subsets of the Docker Engine API responses that discovery relies on.

/// One entry of `GET /containers/json`.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerSummary {
    pub id: String,
    #[serde(default)]
    pub names: Option<Vec<String>>,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub status: String,
}

/// The part of `GET /containers/<id>/json` used for naming.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerInspect {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub config: Option<ContainerConfig>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerConfig {
    #[serde(default)]
    pub env: Option<Vec<String>>,
}

impl ContainerInspect {
    pub fn env(&self) -> &[String] {
        self.config
            .as_ref()
            .and_then(|config| config.env.as_deref())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_ignores_unknown_fields() {
        let summary: ContainerSummary = serde_json::from_str(
            r#"{"Id":"abc123","Names":["/web"],"Image":"nginx","Created":1700000000,"Status":"Up 2 hours","Ports":[]}"#,
        )
        .unwrap();
        assert_eq!(summary.id, "abc123");
        assert_eq!(summary.names.as_deref(), Some(&["/web".to_owned()][..]));
        assert_eq!(summary.created, 1_700_000_000);
        assert_eq!(summary.status, "Up 2 hours");
    }

    #[test]
    fn test_inspect_null_env() {
        let inspect: ContainerInspect =
            serde_json::from_str(r#"{"Name":"/web","Config":{"Env":null}}"#).unwrap();
        assert_eq!(inspect.name, "/web");
        assert!(inspect.env().is_empty());
    }

    #[test]
    fn test_inspect_env() {
        let inspect: ContainerInspect = serde_json::from_str(
            r#"{"Name":"/web","Config":{"Env":["A=1","SERVICE_NAME=web"]}}"#,
        )
        .unwrap();
        assert_eq!(inspect.env(), ["A=1", "SERVICE_NAME=web"]);
    }
}
