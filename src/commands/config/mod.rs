use clap::Subcommand;

/// Configuration management commands.
#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print JSON Schema for the configuration file
    Schema,
}

impl ConfigCommands {
    pub fn run(&self) -> anyhow::Result<()> {
        match self {
            Self::Schema => {
                let schema = crate::shared::config::generate_schema();
                let json = serde_json::to_string_pretty(&schema)?;
                println!("{json}");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn schema_generates_valid_json() {
        let schema = crate::shared::config::generate_schema();
        let value: serde_json::Value = serde_json::to_value(&schema).unwrap();

        // schemars v1 generates a JSON Schema with "title" and "type" keys
        assert_eq!(value["title"], "Config");
        assert_eq!(value["type"], "object");
    }

    #[test]
    fn schema_contains_config_properties() {
        let schema = crate::shared::config::generate_schema();
        let value: serde_json::Value = serde_json::to_value(&schema).unwrap();

        let props = value["properties"].as_object().unwrap();
        assert!(props.contains_key("github_token"));
        assert!(props.contains_key("api_base_url"));
        assert!(props.contains_key("timeout_secs"));
        assert!(props.contains_key("repository"));

        let defs = value["$defs"].as_object().unwrap();
        let repo_props = defs["RepositoryDefaults"]["properties"]
            .as_object()
            .unwrap();
        assert!(repo_props.contains_key("description"));
        assert!(repo_props.contains_key("homepage"));
        assert!(repo_props.contains_key("private"));
    }
}
