//! Deep merge for layered boot configuration.
//!
//! The user, project and local boot files are merged so that later
//! layers override earlier ones.
//!
//! # Merge Rules
//!
//! - Objects are merged recursively
//! - Arrays are replaced entirely (not merged)
//! - Null values in overlay delete the corresponding key from base
//! - Scalars in overlay replace scalars in base

use serde_yaml::Value;

/// Deep merge two YAML values; `overlay` wins at the point of conflict.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), deep_merge(base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Mapping(result)
        }

        (_, overlay) => overlay.clone(),
    }
}

/// Merge layers in order (first is base, last has highest priority).
///
/// A layer that parsed to null (an empty file) contributes nothing.
pub fn merge_configs(configs: &[Value]) -> Value {
    configs
        .iter()
        .filter(|config| !config.is_null())
        .fold(Value::Mapping(Default::default()), |acc, config| {
            deep_merge(&acc, config)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn local_layer_overrides_single_launch_key() {
        let base = yaml(
            r#"
launch:
  app: app.py
  strategy: run
"#,
        );
        let overlay = yaml(
            r#"
launch:
  strategy: entrypoint
"#,
        );

        let result = deep_merge(&base, &overlay);

        assert_eq!(result["launch"]["strategy"], "entrypoint");
        assert_eq!(result["launch"]["app"], "app.py");
    }

    #[test]
    fn module_lists_are_replaced_not_merged() {
        let base = yaml(
            r#"
modules:
  - tqdm
  - dotenv
"#,
        );
        let overlay = yaml(
            r#"
modules:
  - serial
"#,
        );

        let result = deep_merge(&base, &overlay);
        let modules = result["modules"].as_sequence().unwrap();

        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0], "serial");
    }

    #[test]
    fn null_removes_inherited_value() {
        let base = yaml(
            r#"
launch:
  env:
    DEBUG: "1"
    PORT: "8080"
"#,
        );
        let overlay = yaml(
            r#"
launch:
  env:
    DEBUG: null
"#,
        );

        let result = deep_merge(&base, &overlay);

        assert!(result["launch"]["env"].get("DEBUG").is_none());
        assert_eq!(result["launch"]["env"]["PORT"], "8080");
    }

    #[test]
    fn scalar_overlay_replaces_mapping_base() {
        let base = yaml("remediation:\n  policy: install\n");
        let overlay = yaml("remediation: disabled\n");

        let result = deep_merge(&base, &overlay);
        assert_eq!(result["remediation"], "disabled");
    }

    #[test]
    fn merge_configs_merges_multiple_in_order() {
        let configs = vec![
            yaml("python: python3\nprofile: core"),
            yaml("profile: full\napp_name: Sand"),
            yaml("app_name: Dune"),
        ];

        let result = merge_configs(&configs);

        assert_eq!(result["python"], "python3");
        assert_eq!(result["profile"], "full");
        assert_eq!(result["app_name"], "Dune");
    }

    #[test]
    fn empty_layer_is_ignored() {
        let configs = vec![yaml("app_name: Dune"), yaml("")];

        let result = merge_configs(&configs);

        assert_eq!(result["app_name"], "Dune");
    }

    #[test]
    fn merge_empty_configs_returns_empty() {
        let result = merge_configs(&[]);
        assert!(result.as_mapping().unwrap().is_empty());
    }
}
