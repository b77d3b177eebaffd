//! Required-parameter validation.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use super::error::{ServiceError, ServiceResult};

/// Read-only lookup of request parameters by name (case-sensitive).
pub trait ParameterSource {
    fn get(&self, name: &str) -> Option<&str>;

    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl<S: BuildHasher> ParameterSource for HashMap<String, String, S> {
    fn get(&self, name: &str) -> Option<&str> {
        HashMap::get(self, name).map(String::as_str)
    }
}

impl ParameterSource for BTreeMap<String, String> {
    fn get(&self, name: &str) -> Option<&str> {
        BTreeMap::get(self, name).map(String::as_str)
    }
}

impl ParameterSource for [(&str, &str)] {
    fn get(&self, name: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }
}

/// Check that every name in `required` is present.
///
/// Reports all absent names at once, in the order of `required`.
pub fn validate<P>(params: &P, required: &[&str]) -> ServiceResult<()>
where
    P: ParameterSource + ?Sized,
{
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !params.contains(name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::MissingParameters(missing))
    }
}

/// Fetch a parameter that must be present.
pub fn require<'a, P>(params: &'a P, name: &str) -> ServiceResult<&'a str>
where
    P: ParameterSource + ?Sized,
{
    params
        .get(name)
        .ok_or_else(|| ServiceError::MissingParameters(vec![name.to_string()]))
}
