//! Linux network interface names (`eth0`, `enp3s0`, `wlan0.20`).

use thiserror::Error;

/// IFNAMSIZ minus the trailing NUL.
pub const MAX_INTERFACE_NAME_LEN: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterfaceNameError {
    #[error("interface name cannot be empty")]
    Empty,
    #[error("interface name '{0}' is longer than 15 characters")]
    TooLong(String),
    #[error("interface name '{name}' contains invalid character '{found}'")]
    InvalidCharacter { name: String, found: char },
    #[error("interface name '{0}' must start with a letter or underscore")]
    BadStart(String),
}

/// Checks `name` against the kernel's naming rules: at most 15 characters
/// from `[A-Za-z0-9._-]`, not starting with a digit, `-` or `.`.
pub fn validate_interface_name(name: &str) -> Result<(), InterfaceNameError> {
    if name.is_empty() {
        return Err(InterfaceNameError::Empty);
    }

    if name.len() > MAX_INTERFACE_NAME_LEN {
        return Err(InterfaceNameError::TooLong(name.to_string()));
    }

    if let Some(found) = name
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '-' | '_' | '.'))
    {
        return Err(InterfaceNameError::InvalidCharacter {
            name: name.to_string(),
            found,
        });
    }

    if name.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '.') {
        return Err(InterfaceNameError::BadStart(name.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_interface_names() {
        assert!(validate_interface_name("eth0").is_ok());
        assert!(validate_interface_name("enp3s0").is_ok());
        assert!(validate_interface_name("wlan0.20").is_ok());
        assert!(validate_interface_name("br_lan").is_ok());
        assert!(validate_interface_name("_private").is_ok());
    }

    #[test]
    fn test_invalid_interface_names() {
        assert_eq!(validate_interface_name(""), Err(InterfaceNameError::Empty));
        assert!(matches!(
            validate_interface_name("this_name_is_too_long"),
            Err(InterfaceNameError::TooLong(_))
        ));
        assert_eq!(
            validate_interface_name("eth 0"),
            Err(InterfaceNameError::InvalidCharacter {
                name: "eth 0".into(),
                found: ' '
            })
        );
        assert!(matches!(
            validate_interface_name("eth0;reboot"),
            Err(InterfaceNameError::InvalidCharacter { found: ';', .. })
        ));
        assert!(matches!(
            validate_interface_name("0eth"),
            Err(InterfaceNameError::BadStart(_))
        ));
        assert!(matches!(
            validate_interface_name("-eth"),
            Err(InterfaceNameError::BadStart(_))
        ));
    }
}
