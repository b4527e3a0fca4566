//! Form-encoded request fields.
//!
//! # Responsibilities
//! - Decode `application/x-www-form-urlencoded` bodies and query strings
//! - Provide first-value lookup with empty values treated as absent
//! - Walk positional-list fields (`<List>.member.<N>[.<SubField>]`)
//!
//! # Design Decisions
//! - Body values take precedence over query values for the same key
//! - A list ends at the first index whose probe is empty

use std::collections::HashMap;

/// The decoded field set of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    fields: HashMap<String, String>,
}

impl FormValues {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a request from its raw body and optional query string.
    pub fn from_request(body: &[u8], query: Option<&str>) -> Self {
        let mut form = Self::new();
        form.extend_encoded(body);
        if let Some(query) = query {
            form.extend_encoded(query.as_bytes());
        }
        form
    }

    /// Merge url-encoded pairs; keys already present keep their first value.
    pub fn extend_encoded(&mut self, encoded: &[u8]) {
        for (key, value) in url::form_urlencoded::parse(encoded) {
            self.fields
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Value of `key`, or `None` when missing or empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Value of `key`, or the empty string.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Whether `key` carries a non-empty value.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Integer value of `key`; missing or malformed values decode to 0.
    pub fn int(&self, key: &str) -> i64 {
        self.get(key).and_then(|v| v.parse().ok()).unwrap_or(0)
    }

    /// Iterate the members of the positional list `list`.
    ///
    /// `probe` names the sub-field whose presence keeps the walk going
    /// (`None` probes `<list>.member.<N>` itself).
    pub fn members<'a>(&'a self, list: &'a str, probe: Option<&'a str>) -> Members<'a> {
        Members {
            form: self,
            list,
            probe,
            index: 1,
            done: false,
        }
    }

    /// Collect the values of a scalar positional list.
    pub fn member_values(&self, list: &str) -> Vec<String> {
        self.members(list, None)
            .map(|m| m.value().to_string())
            .collect()
    }

    /// Collect `<list>.member.<N>.<field>` for every member.
    pub fn member_fields(&self, list: &str, field: &str) -> Vec<String> {
        self.members(list, Some(field))
            .map(|m| m.field(field).to_string())
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for FormValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = Self::new();
        for (k, v) in iter {
            form.fields.entry(k.into()).or_insert_with(|| v.into());
        }
        form
    }
}

/// One entry of a positional list.
#[derive(Debug, Clone, Copy)]
pub struct Member<'a> {
    form: &'a FormValues,
    prefix: &'a str,
    /// 1-based position within the list.
    pub index: usize,
}

impl<'a> Member<'a> {
    /// The scalar value at `<list>.member.<N>`.
    pub fn value(&self) -> &'a str {
        self.form.value(&format!("{}.member.{}", self.prefix, self.index))
    }

    /// The sub-field value at `<list>.member.<N>.<field>`.
    pub fn field(&self, field: &str) -> &'a str {
        self.form
            .value(&format!("{}.member.{}.{}", self.prefix, self.index, field))
    }
}

/// Iterator over a positional list, stopping at the first empty probe.
#[derive(Debug)]
pub struct Members<'a> {
    form: &'a FormValues,
    list: &'a str,
    probe: Option<&'a str>,
    index: usize,
    done: bool,
}

impl<'a> Iterator for Members<'a> {
    type Item = Member<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let key = match self.probe {
            Some(field) => format!("{}.member.{}.{}", self.list, self.index, field),
            None => format!("{}.member.{}", self.list, self.index),
        };
        if !self.form.has(&key) {
            self.done = true;
            return None;
        }
        let member = Member {
            form: self.form,
            prefix: self.list,
            index: self.index,
        };
        self.index += 1;
        Some(member)
    }
}

impl std::iter::FusedIterator for Members<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_wins_over_query() {
        let form = FormValues::from_request(b"Action=DescribeLoadBalancers", Some("Action=Other&Version=2012"));
        assert_eq!(form.value("Action"), "DescribeLoadBalancers");
        assert_eq!(form.value("Version"), "2012");
    }

    #[test]
    fn test_empty_value_is_absent() {
        let form = FormValues::from_request(b"LoadBalancerName=&Scheme=internal", None);
        assert!(!form.has("LoadBalancerName"));
        assert_eq!(form.get("LoadBalancerName"), None);
        assert_eq!(form.value("Scheme"), "internal");
    }

    #[test]
    fn test_percent_decoding() {
        let form = FormValues::from_request(b"HealthCheck.Target=HTTP%3A80%2Fping", None);
        assert_eq!(form.value("HealthCheck.Target"), "HTTP:80/ping");
    }

    #[test]
    fn test_member_walk_stops_at_gap() {
        let form: FormValues = [
            ("Instances.member.1.InstanceId", "i-1"),
            ("Instances.member.2.InstanceId", "i-2"),
            ("Instances.member.4.InstanceId", "i-4"),
        ]
        .into_iter()
        .collect();

        assert_eq!(form.member_fields("Instances", "InstanceId"), vec!["i-1", "i-2"]);
    }

    #[test]
    fn test_scalar_member_walk() {
        let form: FormValues = [
            ("AvailabilityZones.member.1", "us-east-1a"),
            ("AvailabilityZones.member.2", "us-east-1b"),
        ]
        .into_iter()
        .collect();

        assert_eq!(form.member_values("AvailabilityZones"), vec!["us-east-1a", "us-east-1b"]);
        assert!(form.member_values("Subnets").is_empty());
    }

    #[test]
    fn test_member_sub_fields() {
        let form: FormValues = [
            ("Listeners.member.1.Protocol", "http"),
            ("Listeners.member.1.LoadBalancerPort", "80"),
        ]
        .into_iter()
        .collect();

        let members: Vec<_> = form.members("Listeners", Some("Protocol")).collect();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].index, 1);
        assert_eq!(members[0].field("LoadBalancerPort"), "80");
        assert_eq!(members[0].field("InstancePort"), "");
    }

    #[test]
    fn test_int_defaults_to_zero() {
        let form: FormValues = [("A", "12"), ("B", "twelve")].into_iter().collect();
        assert_eq!(form.int("A"), 12);
        assert_eq!(form.int("B"), 0);
        assert_eq!(form.int("C"), 0);
    }
}
