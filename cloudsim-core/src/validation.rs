///! Input validation
///! Checks applied to user-supplied names before they are stored

use cloudsim_common::Error;
use regex::Regex;
use std::sync::LazyLock;

/// Container names: letter or underscore first, then letters, digits, underscores or hyphens
static CONTAINER_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").unwrap()
});

/// Namespaces follow DNS label rules
static NAMESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$").unwrap()
});

/// Validation result type
pub type ValidationResult<T> = Result<T, Error>;

/// Object file name validation: needs an extension and must not be hidden
pub fn validate_file_name(file_name: &str) -> ValidationResult<()> {
    if !file_name.contains('.') || file_name.starts_with('.') {
        return Err(Error::Validation(format!(
            "Invalid file name format: '{}'",
            file_name
        )));
    }

    Ok(())
}

/// Container name validation.
///
/// Identifier rules, widened to accept `-` after the first character so
/// names like `metrics-exporter` are valid. No length limit.
pub fn validate_container_name(name: &str) -> ValidationResult<()> {
    if !CONTAINER_NAME_REGEX.is_match(name) {
        return Err(Error::Validation(format!("Invalid container name: '{}'", name)));
    }

    Ok(())
}

/// Namespace validation, used for configured defaults
pub fn validate_namespace(namespace: &str) -> ValidationResult<()> {
    if !NAMESPACE_REGEX.is_match(namespace) {
        return Err(Error::Validation(format!("Invalid namespace: '{}'", namespace)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("readme.md").is_ok());
        assert!(validate_file_name("log1.txt").is_ok());
        assert!(validate_file_name("archive.tar.gz").is_ok());

        assert!(validate_file_name(".hidden").is_err());
        assert!(validate_file_name("noext").is_err());
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name(&format!("{}.txt", "a".repeat(1100))).is_ok());
    }

    #[test]
    fn test_validate_container_name() {
        assert!(validate_container_name("nginx").is_ok());
        assert!(validate_container_name("metrics_exporter").is_ok());
        assert!(validate_container_name("metrics-exporter").is_ok());
        assert!(validate_container_name("_init").is_ok());
        assert!(validate_container_name(&"a".repeat(300)).is_ok());

        assert!(validate_container_name("123bad").is_err());
        assert!(validate_container_name("").is_err());
        assert!(validate_container_name("has space").is_err());
        assert!(validate_container_name("-leading").is_err());
    }

    #[test]
    fn test_validate_namespace() {
        assert!(validate_namespace("default").is_ok());
        assert!(validate_namespace("kube-system").is_ok());

        assert!(validate_namespace("").is_err());
        assert!(validate_namespace("Prod").is_err());
        assert!(validate_namespace("-edge").is_err());
    }
}
