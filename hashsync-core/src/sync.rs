use tracing::{debug, info, warn};

use crate::config::SyncConfig;
use crate::environment::Environment;
use crate::error::SyncError;
use crate::fragment::{self, strip_marker};
use crate::param_set::ParamSet;
use crate::toggle::{self, ToggleAction};

/// What a restore did, key by key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Regular inputs and toggles whose value was written directly
    pub assigned: Vec<String>,
    /// Toggles that were clicked once
    pub activated: Vec<String>,
    /// Toggles already in the requested state
    pub kept: Vec<String>,
    /// Keys with no value in the fragment; value left as is, change still fired
    pub skipped: Vec<String>,
}

/// Two-way sync between form elements and the URL fragment.
///
/// Every operation is a one-shot transformation over the current page state;
/// nothing is cached between calls.
pub struct HashParamSync<E: Environment> {
    env: E,
    config: SyncConfig,
}

impl<E: Environment> HashParamSync<E> {
    pub fn new(env: E) -> Self {
        Self {
            env,
            config: SyncConfig::default(),
        }
    }

    pub fn with_config(env: E, config: SyncConfig) -> Result<Self, SyncError> {
        config.validate()?;
        Ok(Self { env, config })
    }

    pub fn environment(&self) -> &E {
        &self.env
    }

    /// Append `params` to the fragment, clearing it first when `reset` is set.
    ///
    /// Not idempotent without `reset`: each call appends another copy of the
    /// entries. Returns the fragment as the page reports it afterwards.
    pub fn serialize(&self, params: &ParamSet, reset: bool) -> String {
        if !reset && params.is_empty() {
            return self.env.fragment();
        }

        let mut body = if reset {
            String::new()
        } else {
            strip_marker(&self.env.fragment()).to_string()
        };
        body.push_str(&fragment::encode(params));
        self.env.set_fragment(&body);

        debug!("Wrote {} params to fragment (reset: {reset})", params.len());
        self.env.fragment()
    }

    /// Read id/value pairs from every regular input, then every toggle.
    ///
    /// Within a class, elements come in document order. When two elements
    /// share an id the one enumerated last wins. An element without an id is
    /// collected under the empty key, and one with no readable value as an
    /// empty string.
    pub fn collect(&self) -> ParamSet {
        let mut params = ParamSet::new();

        for class in [&self.config.input_class, &self.config.toggle_class] {
            for element in self.env.query_elements(class) {
                let id = self.env.element_id(&element);
                let value = self.env.value(&element).unwrap_or_default();
                debug!("Collected {id}={value}");
                params.insert(id, value);
            }
        }

        params
    }

    /// Decode the current fragment.
    pub fn parse(&self) -> ParamSet {
        fragment::decode(&self.env.fragment())
    }

    /// Push `params` into the page.
    ///
    /// Toggles (keys starting with the toggle marker) go through
    /// [`toggle::transition`]; everything else gets its value assigned. Keys
    /// with no value keep the element's current value. Every element then
    /// receives a change notification. Stops at the first id with no matching
    /// element.
    pub fn restore(&self, params: &ParamSet) -> Result<RestoreReport, SyncError> {
        let mut report = RestoreReport::default();

        for (key, value) in params.iter() {
            let element = self
                .env
                .find_element(key)
                .ok_or_else(|| SyncError::MissingElement(key.to_string()))?;

            match value {
                Some(value) => self.apply(key, value, &element, &mut report),
                None => {
                    warn!("No value for '{key}' in fragment, keeping current value");
                    report.skipped.push(key.to_string());
                }
            }

            self.env.notify_change(&element);
        }

        Ok(report)
    }

    fn apply(
        &self,
        key: &str,
        value: &str,
        element: &E::Element,
        report: &mut RestoreReport,
    ) {
        if self.config.is_toggle_key(key) {
            let current = self.env.value(element).unwrap_or_default();
            match toggle::transition(&current, value, &self.config) {
                ToggleAction::Keep => report.kept.push(key.to_string()),
                ToggleAction::Activate => {
                    debug!("Toggling {key}: {current} -> {value}");
                    self.env.activate(element);
                    report.activated.push(key.to_string());
                }
                ToggleAction::Assign(v) => {
                    debug!("Assigning toggle {key}: {current} -> {v}");
                    self.env.set_value(element, &v);
                    report.assigned.push(key.to_string());
                }
            }
        } else {
            debug!("Restoring {key}={value}");
            self.env.set_value(element, value);
            report.assigned.push(key.to_string());
        }
    }

    /// Collect the form and replace the fragment with it.
    pub fn save_to_hash(&self) -> String {
        let params = self.collect();
        let fragment = self.serialize(&params, true);
        info!("Saved {} params to URL", params.len());
        fragment
    }

    /// Parse the fragment and restore it into the form.
    pub fn hash_to_inputs(&self) -> Result<RestoreReport, SyncError> {
        let params = self.parse();
        let report = self.restore(&params)?;
        info!(
            "Restored {} params from URL ({} assigned, {} toggled, {} skipped)",
            params.len(),
            report.assigned.len(),
            report.activated.len(),
            report.skipped.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToggleStrategy;
    use crate::environment::{EnvEvent, MemoryEnvironment};

    fn params(pairs: &[(&str, &str)]) -> ParamSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_serialize_appends_without_reset() {
        let sync = HashParamSync::new(MemoryEnvironment::new());
        sync.serialize(&params(&[("a", "1")]), false);
        let fragment = sync.serialize(&params(&[("a", "1")]), false);
        assert_eq!(fragment, "#a=1;a=1;");
    }

    #[test]
    fn test_serialize_reset_discards_previous() {
        let env = MemoryEnvironment::new().fragment_preset("#b=2;");
        let sync = HashParamSync::new(env);
        let fragment = sync.serialize(&params(&[("a", "1")]), true);
        assert_eq!(fragment, "#a=1;");
    }

    #[test]
    fn test_serialize_reset_with_empty_params_clears() {
        let env = MemoryEnvironment::new().fragment_preset("#b=2;");
        let sync = HashParamSync::new(env);
        assert_eq!(sync.serialize(&ParamSet::new(), true), "");
    }

    #[test]
    fn test_serialize_empty_without_reset_leaves_fragment_alone() {
        let env = MemoryEnvironment::new().fragment_preset("#b=2;");
        let sync = HashParamSync::new(env);
        assert_eq!(sync.serialize(&ParamSet::new(), false), "#b=2;");
        assert_eq!(sync.environment().fragment_writes(), 0);
    }

    #[test]
    fn test_serialize_writes_fragment_once() {
        let sync = HashParamSync::new(MemoryEnvironment::new());
        sync.serialize(&params(&[("a", "1"), ("b", "2"), ("c", "3")]), true);
        assert_eq!(sync.environment().fragment_writes(), 1);
    }

    #[test]
    fn test_collect_inputs_before_toggles() {
        let env = MemoryEnvironment::new()
            .toggle("_as_date", "off")
            .input("n_days", "60")
            .input("hosp_los", "7");
        let sync = HashParamSync::new(env);
        let collected = sync.collect();
        assert_eq!(
            collected.keys().collect::<Vec<_>>(),
            vec!["n_days", "hosp_los", "_as_date"]
        );
        assert_eq!(collected.get("_as_date"), Some("off"));
    }

    #[test]
    fn test_collect_duplicate_id_last_wins() {
        let env = MemoryEnvironment::new()
            .input("dup", "first")
            .toggle("dup", "toggle")
            .input("dup", "second");
        let sync = HashParamSync::new(env);
        let collected = sync.collect();
        assert_eq!(collected.len(), 1);
        assert_eq!(collected.get("dup"), Some("toggle"));
    }

    #[test]
    fn test_collect_ignores_other_classes() {
        let env = MemoryEnvironment::new()
            .element("chart", &["plot"], "x")
            .input("n_days", "60");
        let sync = HashParamSync::new(env);
        let collected = sync.collect();
        assert_eq!(collected.keys().collect::<Vec<_>>(), vec!["n_days"]);
    }

    #[test]
    fn test_collect_keeps_element_without_id() {
        let env = MemoryEnvironment::new().input("", "5").input("n", "1");
        let sync = HashParamSync::new(env);
        assert_eq!(sync.save_to_hash(), "#=5;n=1;");

        let err = sync.hash_to_inputs().unwrap_err();
        assert_eq!(err, SyncError::MissingElement(String::new()));
    }

    #[test]
    fn test_collect_unreadable_value_as_empty() {
        let env = MemoryEnvironment::new()
            .element_without_value("legend", &["form-control"])
            .input("n_days", "60");
        let sync = HashParamSync::new(env);
        assert_eq!(sync.save_to_hash(), "#legend=;n_days=60;");
    }

    #[test]
    fn test_parse_reads_live_fragment() {
        let env = MemoryEnvironment::new().fragment_preset("#a=1;;b=2;");
        let sync = HashParamSync::new(env);
        assert_eq!(sync.parse(), params(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn test_restore_assigns_regular_inputs() {
        let env = MemoryEnvironment::new().input("n_days", "60");
        let sync = HashParamSync::new(env);
        let report = sync.restore(&params(&[("n_days", "90")])).unwrap();
        assert_eq!(report.assigned, vec!["n_days"]);
        let env = sync.environment();
        assert_eq!(env.value_of("n_days").as_deref(), Some("90"));
        assert_eq!(
            env.events(),
            vec![
                EnvEvent::Assigned {
                    id: "n_days".into(),
                    value: "90".into()
                },
                EnvEvent::Changed("n_days".into()),
            ]
        );
    }

    #[test]
    fn test_restore_toggle_activates_once() {
        let env = MemoryEnvironment::new().toggle("_flag", "off");
        let sync = HashParamSync::new(env);
        let report = sync.restore(&params(&[("_flag", "on")])).unwrap();
        assert_eq!(report.activated, vec!["_flag"]);
        assert_eq!(sync.environment().activations("_flag"), 1);
        assert_eq!(sync.environment().value_of("_flag").as_deref(), Some("on"));
    }

    #[test]
    fn test_restore_toggle_in_requested_state() {
        let env = MemoryEnvironment::new().toggle("_flag", "off");
        let sync = HashParamSync::new(env);
        let report = sync.restore(&params(&[("_flag", "off")])).unwrap();
        assert_eq!(report.kept, vec!["_flag"]);
        assert_eq!(sync.environment().activations("_flag"), 0);
        assert_eq!(sync.environment().change_notifications("_flag"), 1);
    }

    #[test]
    fn test_restore_toggle_assign_strategy() {
        let config = SyncConfig {
            toggle_strategy: ToggleStrategy::Assign,
            ..SyncConfig::default()
        };
        let env = MemoryEnvironment::with_config(config.clone()).toggle("_flag", "off");
        let sync = HashParamSync::with_config(env, config).unwrap();
        let report = sync.restore(&params(&[("_flag", "on")])).unwrap();
        assert_eq!(report.assigned, vec!["_flag"]);
        assert_eq!(sync.environment().activations("_flag"), 0);
        assert_eq!(sync.environment().value_of("_flag").as_deref(), Some("on"));
    }

    #[test]
    fn test_restore_missing_element_fails_fast() {
        let env = MemoryEnvironment::new().input("a", "0").input("c", "0");
        let sync = HashParamSync::new(env);
        let err = sync
            .restore(&params(&[("a", "1"), ("b", "2"), ("c", "3")]))
            .unwrap_err();
        assert_eq!(err, SyncError::MissingElement("b".into()));
        assert_eq!(sync.environment().value_of("a").as_deref(), Some("1"));
        assert_eq!(sync.environment().value_of("c").as_deref(), Some("0"));
    }

    #[test]
    fn test_restore_missing_value_still_notifies() {
        let env = MemoryEnvironment::new()
            .fragment_preset("#a;_t;")
            .input("a", "0")
            .toggle("_t", "off");
        let sync = HashParamSync::new(env);
        let report = sync.hash_to_inputs().unwrap();
        assert_eq!(report.skipped, vec!["a", "_t"]);

        let env = sync.environment();
        assert_eq!(
            env.events(),
            vec![EnvEvent::Changed("a".into()), EnvEvent::Changed("_t".into())]
        );
        assert_eq!(env.change_notifications("a"), 1);
        assert_eq!(env.value_of("a").as_deref(), Some("0"));
        assert_eq!(env.activations("_t"), 0);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = SyncConfig {
            toggle_marker: '=',
            ..SyncConfig::default()
        };
        assert!(HashParamSync::with_config(MemoryEnvironment::new(), config).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let env = MemoryEnvironment::new()
            .input("n_days", "60")
            .toggle("_show_tables", "on");
        let sync = HashParamSync::new(env);
        assert_eq!(sync.save_to_hash(), "#n_days=60;_show_tables=on;");

        let report = sync.hash_to_inputs().unwrap();
        assert_eq!(report.assigned, vec!["n_days"]);
        assert_eq!(report.kept, vec!["_show_tables"]);
    }
}
