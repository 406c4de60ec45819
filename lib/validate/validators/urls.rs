//! URL and path resolution.

use url::Url;

use super::super::codes::ErrorCode;
use super::super::result::{ValidationError, ValidationResult};
use crate::config::ValidatorConfig;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Parse an absolute URL and check its scheme against the allow-list.
///
/// Errors are reported at the empty location; callers scope them to the field.
pub fn validate_url(value: &str, config: &ValidatorConfig) -> ValidationResult<Url> {
    let url = Url::parse(value).map_err(|e| {
        ValidationError::new(
            ErrorCode::InvalidUrl,
            "",
            format!("`{}` is not a valid URL: {}", value, e),
        )
    })?;

    if !config.is_protocol_allowed(url.scheme()) {
        return Err(ValidationError::new(
            ErrorCode::DisallowedProtocol,
            "",
            format!("`{}` uses the `{}` protocol", value, url.scheme()),
        )
        .with_help(format!("allowed protocols: {}", config.url_protocols.join(", "))));
    }

    Ok(url)
}

/// Resolve an action path.
///
/// Paths starting with `http` must be absolute URLs. Paths starting with a
/// single `/` are joined onto `base_url`, which must then be present. Every
/// other shape is rejected.
pub fn resolve_path(
    path: &str,
    base_url: Option<&Url>,
    config: &ValidatorConfig,
) -> ValidationResult<Url> {
    if path.starts_with("http") {
        return validate_url(path, config);
    }

    if path.starts_with('/') && !path.starts_with("//") {
        let base = base_url.ok_or_else(|| {
            ValidationError::new(
                ErrorCode::MissingBaseUrl,
                "",
                format!("relative path `{}` requires a `baseUrl` on the metadata", path),
            )
            .with_help("add `baseUrl` to the metadata or use an absolute URL")
        })?;

        return base.join(path).map_err(|e| {
            ValidationError::new(
                ErrorCode::InvalidUrl,
                "",
                format!("`{}` does not resolve against `{}`: {}", path, base, e),
            )
        });
    }

    Err(ValidationError::new(
        ErrorCode::InvalidPathFormat,
        "",
        format!("`{}` is neither an absolute URL nor a path starting with `/`", path),
    ))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
