#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EnvService: Send + Sync + 'static {
    /// Returns the value of the variable `key`, or `None` if it is unset or
    /// empty.
    fn var(&self, key: &str) -> Option<String>;
}

#[cfg(feature = "mock")]
impl MockEnvService {
    /// Serves the given variables, treating every other key as unset.
    pub fn with_vars(mut self, vars: &[(&str, &str)]) -> Self {
        let vars = vars
            .iter()
            .map(|&(key, value)| (key.to_owned(), value.to_owned()))
            .collect::<std::collections::HashMap<_, _>>();
        self.expect_var()
            .returning(move |key| vars.get(key).filter(|x| !x.is_empty()).cloned());
        self
    }
}
